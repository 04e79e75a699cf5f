//! Conversion pipeline driver
//!
//! Stages run in strict sequence: resolve attributes → segment → build
//! adjacency → apply restrictions → simplify. Each stage depends on fields
//! set by the previous one, so the ordering is a correctness requirement.
//! The whole pipeline is synchronous and performs no I/O.

mod adjacency;
mod attributes;
mod restrictions;
mod segment;
mod simplify;

pub use attributes::{UrbanClassifier, WayAttributes};

use std::cmp::Ordering;

use hashbrown::{HashMap, HashSet};
use log::{debug, error, info, warn};

use crate::defaults::{HighwayDefaults, LaneDefaults, SpeedDefaults, UNKNOWN_STREET_TYPE};
use crate::model::{Link, Node, OsmData, Restriction, StreetMap};
use crate::{DEFAULT_SIMPLIFY_THRESHOLD, Error, LinkId, NodeId, WayId};

/// Highway values that never become part of the converted map.
const SKIPPED_CATEGORIES: [&str; 6] = [
    "",
    "proposed",
    "dismantled",
    "construction",
    "raceway",
    "planned",
];

/// Configuration for a conversion run.
pub struct ConvertConfig<'a> {
    /// Whether to build the reduced street graph after the link graph.
    pub build_streets: bool,
    /// Street types below this value take part in street simplification.
    pub simplify_threshold: u8,
    pub highway_defaults: HighwayDefaults,
    pub speed_defaults: SpeedDefaults,
    pub lane_defaults: LaneDefaults,
    /// Optional external urban classification, consulted by the speed
    /// fallback for ways without a traffic zone tag.
    pub urban_classifier: Option<&'a dyn UrbanClassifier>,
}

impl Default for ConvertConfig<'_> {
    fn default() -> Self {
        Self {
            build_streets: true,
            simplify_threshold: DEFAULT_SIMPLIFY_THRESHOLD,
            highway_defaults: HighwayDefaults::new(),
            speed_defaults: SpeedDefaults::new(),
            lane_defaults: LaneDefaults::new(),
            urban_classifier: None,
        }
    }
}

/// Run-scoped counters, threaded through the pipeline instead of living in
/// ambient state.
#[derive(Debug, Default)]
pub(crate) struct ConvertStats {
    pub ways_converted: usize,
    pub skipped_ways: usize,
    pub missing_node_ways: usize,
    pub speed_tags: usize,
    pub zone_tags: usize,
    pub access_tags: usize,
    pub speed_conflicts: usize,
    pub unknown_highways: HashSet<String>,
    pub skipped_highways: HashSet<String>,
}

/// Converts the materialized entity set into a street map.
///
/// # Errors
///
/// Returns an error only for invalid configuration; all data-level problems
/// are recovered with conservative defaults and diagnostics.
pub fn convert_map(data: &OsmData, config: &ConvertConfig) -> Result<StreetMap, Error> {
    validate_config(config)?;

    info!("Starting conversion of {} ways", data.ways.len());

    let mut stats = ConvertStats::default();

    let all_nodes: HashMap<NodeId, Node> = data
        .nodes
        .iter()
        .map(|(id, node)| (id.clone(), Node::new(id.clone(), node.point)))
        .collect();

    let restrictions = parse_restrictions(data);
    info!("Parsed {} turn restrictions", restrictions.len());

    let (mut links, assignment) = convert_highways(data, config, &mut stats);

    info!("New map contains {} links", links.len());
    info!("Number of traffic zone tags: {}", stats.zone_tags);
    info!(
        "Number of access restrictions on relevant links: {}",
        stats.access_tags
    );

    check_referenced_nodes(&links, &all_nodes);
    let nodes = retain_used_nodes(&links, all_nodes);

    adjacency::derive_adjacency(&mut links);

    let applied = restrictions::apply_restrictions(restrictions, &assignment, &mut links);
    info!("Applied {applied} turn restrictions");

    let streets = if config.build_streets {
        simplify::build_streets(&mut links, config.simplify_threshold)
    } else {
        HashMap::new()
    };

    info!(
        "Conversion finished: {} ways converted, {} skipped, {} with missing nodes, \
         {} explicit speed tags, {} speed conflicts",
        stats.ways_converted,
        stats.skipped_ways,
        stats.missing_node_ways,
        stats.speed_tags,
        stats.speed_conflicts
    );

    Ok(StreetMap {
        links,
        nodes,
        streets,
    })
}

fn validate_config(config: &ConvertConfig) -> Result<(), Error> {
    if config.simplify_threshold > UNKNOWN_STREET_TYPE {
        return Err(Error::InvalidConfig(format!(
            "simplify threshold {} exceeds the street type range (0..={UNKNOWN_STREET_TYPE})",
            config.simplify_threshold
        )));
    }
    Ok(())
}

/// Converts all way entities carrying a highway tag, returning the link set
/// and the way-id → link-ids assignment used for restriction resolution.
fn convert_highways(
    data: &OsmData,
    config: &ConvertConfig,
    stats: &mut ConvertStats,
) -> (HashMap<LinkId, Link>, HashMap<WayId, Vec<LinkId>>) {
    let mut links: HashMap<LinkId, Link> = HashMap::new();
    let mut assignment: HashMap<WayId, Vec<LinkId>> = HashMap::new();

    // fixed iteration order keeps link ids reproducible across runs
    let mut way_ids: Vec<&WayId> = data.ways.keys().collect();
    way_ids.sort_by(|a, b| compare_ids(a, b));

    for way_id in way_ids {
        let way = &data.ways[way_id];
        let Some(category) = way.tags.get("highway") else {
            continue;
        };

        // skip ways which are irrelevant for the map
        if SKIPPED_CATEGORIES.contains(&category) {
            if stats.skipped_highways.insert(category.to_string()) {
                info!("Ways of type highway = {category} skipped!");
            }
            stats.skipped_ways += 1;
            continue;
        }

        let attrs = attributes::resolve_way_attributes(way, data, config, stats);

        match segment::split_way(way, &attrs, &data.nodes, links.len() as u64) {
            Ok(new_links) => {
                let ids: Vec<LinkId> = new_links.iter().map(|link| link.id.clone()).collect();
                for link in new_links {
                    links.insert(link.id.clone(), link);
                }
                assignment.insert(way_id.clone(), ids);
                stats.ways_converted += 1;
            }
            Err(err) => {
                warn!("Way {way_id} skipped: {err}");
                stats.missing_node_ways += 1;
            }
        }
    }

    (links, assignment)
}

fn parse_restrictions(data: &OsmData) -> Vec<Restriction> {
    let mut relation_ids: Vec<&str> = data.relations.keys().map(String::as_str).collect();
    relation_ids.sort_by(|a, b| compare_ids(a, b));

    let mut restrictions = Vec::new();
    for id in relation_ids {
        let relation = &data.relations[id];
        if relation.tags.get("type") != Some("restriction") {
            continue;
        }
        match Restriction::from_relation(relation, &data.ways) {
            Some(restriction) => restrictions.push(restriction),
            None => debug!("Restriction relation {id} discarded at parse time"),
        }
    }
    restrictions
}

/// Post-pass consistency check: every link endpoint must exist as a node.
fn check_referenced_nodes(links: &HashMap<LinkId, Link>, nodes: &HashMap<NodeId, Node>) {
    let mut missing = 0usize;

    for link in links.values() {
        if !nodes.contains_key(&link.start_node) || !nodes.contains_key(&link.end_node) {
            error!("Link {} is missing a node!", link.id);
            missing += 1;
        }
    }

    if missing != 0 {
        warn!("{missing} missing nodes");
    }
}

/// Drops nodes which no link references.
fn retain_used_nodes(
    links: &HashMap<LinkId, Link>,
    mut nodes: HashMap<NodeId, Node>,
) -> HashMap<NodeId, Node> {
    let used: HashSet<&NodeId> = links
        .values()
        .flat_map(|link| [&link.start_node, &link.end_node])
        .collect();

    let before = nodes.len();
    nodes.retain(|id, _| used.contains(id));
    info!(
        "{} unused nodes deleted, new node count: {}",
        before - nodes.len(),
        nodes.len()
    );

    nodes
}

/// Orders ids numerically where possible, falling back to lexicographic
/// comparison for non-numeric ids.
pub(crate) fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Link ids in ascending numeric order, the documented traversal order of
/// the adjacency builder and the street simplifier.
pub(crate) fn sorted_link_ids(links: &HashMap<LinkId, Link>) -> Vec<LinkId> {
    let mut ids: Vec<LinkId> = links.keys().cloned().collect();
    ids.sort_by(|a, b| compare_ids(a, b));
    ids
}
