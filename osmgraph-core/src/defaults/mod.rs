//! Default lookup tables for way attributes
//!
//! Pure lookups, pluggable through [`crate::convert::ConvertConfig`]. The
//! speed table follows the implicit-maxspeed catalogue at
//! <https://wiki.openstreetmap.org/wiki/OSM_tags_for_routing/Maxspeed>.

pub mod highway;
pub mod lanes;
pub mod speed;

pub use highway::{HighwayDefaults, UNKNOWN_STREET_TYPE};
pub use lanes::LaneDefaults;
pub use speed::{SpeedDefaults, UrbanContext};
