use thiserror::Error;

use crate::{NodeId, WayId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Way {way} references node {node} which is not in the entity source")]
    DanglingNodeRef { way: WayId, node: NodeId },
}
