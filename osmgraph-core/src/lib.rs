//! Conversion of in-memory OSM entities into a routable street graph.
//!
//! The entity model (nodes, ways, relations with key/value tags) is supplied
//! by an external reader. This crate derives routable attributes from the
//! tags, splits ways into atomic directed links, computes link adjacency,
//! applies turn restrictions and optionally collapses uniform link chains
//! into a reduced street graph. Parsing of the raw source format and all
//! output writers live outside this crate.

pub mod convert;
pub mod defaults;
mod error;
pub mod geo_util;
pub mod model;
pub mod prelude;

pub use error::Error;

/// Id of a source or converted graph node.
pub type NodeId = String;
/// Id of a source way.
pub type WayId = String;
/// Id of a source relation.
pub type RelationId = String;
/// Id of a converted link. Assigned sequentially during segmentation.
pub type LinkId = String;
/// Id of a street in the reduced graph.
pub type StreetId = u32;

/// Street types greater or equal to this are left out of the reduced graph.
pub const DEFAULT_SIMPLIFY_THRESHOLD: u8 = 5;
