use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{LinkId, NodeId, StreetId};

/// Aggregation of links between two structurally significant junctions,
/// forming the reduced graph. References its member links by id; owns none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Street {
    pub id: StreetId,
    pub street_type: u8,
    pub name: String,
    /// Maximum speed in km/h, shared by all member links.
    pub speed: i32,
    /// Sum of the member link lengths in meters.
    pub length: f64,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub start: Point<f64>,
    pub end: Point<f64>,
    /// Member link ids in traversal order.
    pub link_ids: Vec<LinkId>,
    /// Ids of streets reachable from the end of this street.
    pub following: Vec<StreetId>,
    /// Ids of streets leading into the start of this street.
    pub leading: Vec<StreetId>,
}
