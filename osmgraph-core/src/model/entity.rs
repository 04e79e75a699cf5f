//! Read-only in-memory model of the source map entities.
//!
//! Populated by an external reader before conversion starts; this crate never
//! mutates it. Tags are kept verbatim, including keys the conversion does not
//! interpret.

use geo::Point;
use hashbrown::HashMap;

use crate::{NodeId, RelationId, WayId};

/// Key/value tags of a source entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(HashMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Tags {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Source node with WGS84 coordinates (x = longitude, y = latitude).
#[derive(Debug, Clone)]
pub struct OsmNode {
    pub id: NodeId,
    pub point: Point<f64>,
    pub tags: Tags,
}

impl OsmNode {
    pub fn new(id: impl Into<NodeId>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            point: Point::new(lon, lat),
            tags: Tags::new(),
        }
    }
}

/// Source way: an ordered sequence of node references plus tags.
#[derive(Debug, Clone)]
pub struct OsmWay {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    pub tags: Tags,
}

impl OsmWay {
    pub fn new(id: impl Into<WayId>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
            tags: Tags::new(),
        }
    }
}

/// Relation member, dispatched by matching on the entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Node { id: NodeId, role: String },
    Way { id: WayId, role: String },
    Relation { id: RelationId, role: String },
}

impl Member {
    pub fn id(&self) -> &str {
        match self {
            Member::Node { id, .. } | Member::Way { id, .. } | Member::Relation { id, .. } => id,
        }
    }

    pub fn role(&self) -> &str {
        match self {
            Member::Node { role, .. }
            | Member::Way { role, .. }
            | Member::Relation { role, .. } => role,
        }
    }
}

/// Source relation with typed members.
#[derive(Debug, Clone)]
pub struct OsmRelation {
    pub id: RelationId,
    pub members: Vec<Member>,
    pub tags: Tags,
}

impl OsmRelation {
    pub fn new(id: impl Into<RelationId>) -> Self {
        Self {
            id: id.into(),
            members: Vec::new(),
            tags: Tags::new(),
        }
    }
}

/// The complete entity source, keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct OsmData {
    pub nodes: HashMap<NodeId, OsmNode>,
    pub ways: HashMap<WayId, OsmWay>,
    pub relations: HashMap<RelationId, OsmRelation>,
}

impl OsmData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: OsmNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn add_way(&mut self, way: OsmWay) {
        self.ways.insert(way.id.clone(), way);
    }

    pub fn add_relation(&mut self, relation: OsmRelation) {
        self.relations.insert(relation.id.clone(), relation);
    }
}
