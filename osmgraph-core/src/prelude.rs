// Re-export key components
pub use crate::convert::{ConvertConfig, UrbanClassifier, convert_map};
pub use crate::defaults::{HighwayDefaults, LaneDefaults, SpeedDefaults, UrbanContext};
pub use crate::model::{
    Link, Member, Node, OsmData, OsmNode, OsmRelation, OsmWay, Restriction, RestrictionKind,
    Street, StreetMap, Tags,
};

// Core id types
pub use crate::LinkId;
pub use crate::NodeId;
pub use crate::RelationId;
pub use crate::StreetId;
pub use crate::WayId;

pub use crate::{DEFAULT_SIMPLIFY_THRESHOLD, Error};
