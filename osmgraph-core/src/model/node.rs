use geo::Point;
use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Converted graph node. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// WGS84 coordinates (x = longitude, y = latitude).
    pub point: Point<f64>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, point: Point<f64>) -> Self {
        Self {
            id: id.into(),
            point,
        }
    }
}
