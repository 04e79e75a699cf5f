//! Data model for the converted street graph
//!
//! Contains the source entity model and the link/street/node types the
//! conversion produces. Neighbor relations are stored as id sets, never as
//! direct references.

pub mod entity;
pub mod link;
pub mod node;
pub mod restriction;
pub mod street;
pub mod street_map;

pub use entity::{Member, OsmData, OsmNode, OsmRelation, OsmWay, Tags};
pub use link::Link;
pub use node::Node;
pub use restriction::{Restriction, RestrictionKind};
pub use street::Street;
pub use street_map::StreetMap;
