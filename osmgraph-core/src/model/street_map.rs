use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Link, Node, Street};
use crate::{LinkId, NodeId, StreetId};

/// The finished street map: links, their nodes and (optionally) the reduced
/// street graph. Downstream writers read it; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreetMap {
    pub links: HashMap<LinkId, Link>,
    pub nodes: HashMap<NodeId, Node>,
    /// Empty unless street simplification was requested.
    pub streets: HashMap<StreetId, Street>,
}

impl StreetMap {
    /// The smallest latitude over all link endpoints.
    pub fn smallest_lat(&self) -> f64 {
        self.fold_endpoints(f64::INFINITY, f64::min, |p| p.1)
    }

    /// The biggest latitude over all link endpoints.
    pub fn biggest_lat(&self) -> f64 {
        self.fold_endpoints(f64::NEG_INFINITY, f64::max, |p| p.1)
    }

    /// The smallest longitude over all link endpoints.
    pub fn smallest_lon(&self) -> f64 {
        self.fold_endpoints(f64::INFINITY, f64::min, |p| p.0)
    }

    /// The biggest longitude over all link endpoints.
    pub fn biggest_lon(&self) -> f64 {
        self.fold_endpoints(f64::NEG_INFINITY, f64::max, |p| p.0)
    }

    fn fold_endpoints(
        &self,
        init: f64,
        fold: impl Fn(f64, f64) -> f64,
        pick: impl Fn((f64, f64)) -> f64,
    ) -> f64 {
        self.links
            .values()
            .flat_map(|link| [link.start.x_y(), link.end.x_y()])
            .map(pick)
            .fold(init, fold)
    }
}
