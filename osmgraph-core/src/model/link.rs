use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{LinkId, NodeId, StreetId};

/// Atomic directed edge between two adjacent nodes; the routing unit.
///
/// Links are created by splitting a way at every member node, so a link never
/// spans an intermediate node. Two-way roads are represented as two
/// independent directed links with swapped endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Unique id, assigned sequentially during segmentation.
    pub id: LinkId,
    /// The node where the edge starts.
    pub start_node: NodeId,
    /// The node where the edge ends.
    pub end_node: NodeId,
    pub start: Point<f64>,
    pub end: Point<f64>,
    /// Great-circle length in meters.
    pub length: f64,
    /// Street hierarchy class, 0 (motorway) to 10 (unknown or non-road).
    pub street_type: u8,
    /// The raw highway value of the source way.
    pub street_category: String,
    pub name: String,
    /// Maximum speed in km/h.
    pub speed: i32,
    pub lanes: u32,
    /// Access code. 0 = no through road, 1 = unrestricted, 2 = destination
    /// and private traffic only, 3 = delivery only.
    pub access: u8,
    pub one_way: bool,
    /// False when the speed fell back to a derived default instead of an
    /// explicit tag value.
    pub has_explicit: bool,
    /// Ids of links that start where this link ends.
    pub following: Vec<LinkId>,
    /// Ids of links that end where this link starts.
    pub leading: Vec<LinkId>,
    /// Id of the street this link was merged into, if any.
    pub street_id: Option<StreetId>,
}
