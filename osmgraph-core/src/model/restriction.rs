use hashbrown::HashMap;

use crate::model::{Member, OsmRelation, OsmWay};
use crate::{RelationId, WayId};

/// Polarity of a turn restriction, taken from the restriction tag prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionKind {
    /// The from → to movement is prohibited.
    No,
    /// The from → to movement is the only one allowed.
    Only,
}

/// A turn-movement constraint parsed from a restriction relation.
#[derive(Debug, Clone)]
pub struct Restriction {
    pub id: RelationId,
    pub kind: RestrictionKind,
    pub from: WayId,
    pub to: WayId,
    /// Parsed for completeness; via chains are not used for resolution.
    pub via: Option<String>,
    /// True when any temporal qualifier was present. The qualifiers are kept
    /// verbatim and never enforced.
    pub temporary: bool,
    pub day_on: Option<String>,
    pub day_off: Option<String>,
    pub hour_on: Option<String>,
    pub hour_off: Option<String>,
}

impl Restriction {
    /// Parses a restriction relation.
    ///
    /// Returns `None` when the restriction tag carries no usable polarity or
    /// the relation is missing its from/to way member; such relations are
    /// discarded without touching the graph.
    pub fn from_relation(
        relation: &OsmRelation,
        ways: &HashMap<WayId, OsmWay>,
    ) -> Option<Self> {
        let value = relation.tags.get("restriction")?;
        let kind = if value.starts_with("no") {
            RestrictionKind::No
        } else if value.starts_with("only") {
            RestrictionKind::Only
        } else {
            return None;
        };

        let mut from = None;
        let mut to = None;
        let mut via = None;
        let mut temporary = false;
        let mut day_on = None;
        let mut day_off = None;
        let mut hour_on = None;
        let mut hour_off = None;

        for member in &relation.members {
            match member {
                Member::Way { id, role } => {
                    match role.as_str() {
                        "from" => from = Some(id.clone()),
                        "to" => to = Some(id.clone()),
                        "via" => via = Some(id.clone()),
                        _ => {}
                    }

                    // temporal qualifiers sit on the member ways
                    if let Some(way) = ways.get(id) {
                        if let Some(v) = way.tags.get("day_on") {
                            temporary = true;
                            day_on = Some(v.to_string());
                        } else if let Some(v) = way.tags.get("day_off") {
                            temporary = true;
                            day_off = Some(v.to_string());
                        } else if let Some(v) = way.tags.get("hour_on") {
                            temporary = true;
                            hour_on = Some(v.to_string());
                        } else if let Some(v) = way.tags.get("hour_off") {
                            temporary = true;
                            hour_off = Some(v.to_string());
                        }
                    }
                }
                Member::Node { id, role } if role == "via" => {
                    via = Some(id.clone());
                }
                _ => {}
            }
        }

        Some(Self {
            id: relation.id.clone(),
            kind,
            from: from?,
            to: to?,
            via,
            temporary,
            day_on,
            day_off,
            hour_on,
            hour_off,
        })
    }
}
