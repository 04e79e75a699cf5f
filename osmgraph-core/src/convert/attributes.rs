//! Derivation of routable way attributes from heterogeneous tag data
//!
//! Every resolver applies layered fallback rules: explicit tag values win,
//! recognized symbolic values map to fixed constants, and everything else
//! drops to the default tables with a diagnostic. Unrecognized data never
//! aborts the conversion.

use log::warn;

use super::{ConvertConfig, ConvertStats};
use crate::defaults::{UNKNOWN_STREET_TYPE, UrbanContext, speed};
use crate::model::{OsmData, OsmWay};

/// External urban classification. Consulted by the speed fallback for ways
/// without a traffic zone tag; `None` means undecidable. The geometric
/// implementation lives outside this crate.
pub trait UrbanClassifier {
    fn is_urban(&self, way: &OsmWay) -> Option<bool>;
}

/// Way-level attributes, resolved once per way and copied onto every link
/// the way is split into.
#[derive(Debug, Clone)]
pub struct WayAttributes {
    pub street_type: u8,
    pub category: String,
    pub name: String,
    pub speed: i32,
    pub lanes: u32,
    pub access: u8,
    pub one_way: bool,
    /// True for "oneway = -1": the node sequence is traversed in reverse.
    pub reversed: bool,
    /// True while the speed comes from an explicit tag value rather than a
    /// derived default.
    pub has_explicit: bool,
}

pub(crate) fn resolve_way_attributes(
    way: &OsmWay,
    data: &OsmData,
    config: &ConvertConfig,
    stats: &mut ConvertStats,
) -> WayAttributes {
    let category = way.tags.get("highway").unwrap_or("").to_string();

    let street_type = resolve_street_type(&category, config, stats);
    let name = resolve_name(way, data, &category);
    let (one_way, reversed) = resolve_one_way(way);

    let mut has_explicit = true;
    let speed = resolve_speed(way, &category, street_type, config, stats, &mut has_explicit);
    let access = resolve_access(way, &category, stats);
    let lanes = resolve_lanes(way, &category, one_way, config);

    if config
        .speed_defaults
        .check_speed_conflicts(&way.id, &category, speed)
    {
        stats.speed_conflicts += 1;
    }

    WayAttributes {
        street_type,
        category,
        name,
        speed,
        lanes,
        access,
        one_way,
        reversed,
        has_explicit,
    }
}

fn resolve_street_type(category: &str, config: &ConvertConfig, stats: &mut ConvertStats) -> u8 {
    match config.highway_defaults.street_type(category) {
        Some(street_type) => street_type,
        None => {
            if stats.unknown_highways.insert(category.to_string()) {
                warn!("Unknown highway value \"{category}\", using street type {UNKNOWN_STREET_TYPE}");
            }
            UNKNOWN_STREET_TYPE
        }
    }
}

/// Resolves the maximum speed, from most to least explicit: numeric tag
/// value, recognized symbolic value, default table.
fn resolve_speed(
    way: &OsmWay,
    category: &str,
    street_type: u8,
    config: &ConvertConfig,
    stats: &mut ConvertStats,
    has_explicit: &mut bool,
) -> i32 {
    let context = urban_context(way, street_type, config, stats);

    let Some(raw) = way.tags.get("maxspeed") else {
        *has_explicit = false;
        return config.speed_defaults.default_speed(Some(category), context);
    };

    stats.speed_tags += 1;

    match raw.parse::<i32>() {
        Ok(value) if value >= 0 => value,
        Ok(value) => {
            warn!("Not a valid number for maxspeed at way-id: {} ({value})", way.id);
            *has_explicit = false;
            config.speed_defaults.default_speed(Some(category), context)
        }
        Err(_) => match raw {
            // deprecated, but not completely gone from the data
            "walk" => speed::WALK_SPEED,
            // bicycle roads, below 30
            "moderat" => speed::MODERAT_SPEED,
            "DE:living_street" => speed::WALK_SPEED,
            "DE:rural" => speed::RURAL_SPEED,
            "DE:urban" => speed::URBAN_SPEED,
            "DE:motorway" => speed::MOTORWAY,
            "none" => speed::NO_MAXSPEED,
            // signal-controlled speed is unknowable here, take the default
            "signals" => {
                *has_explicit = false;
                config.speed_defaults.default_speed(Some(category), context)
            }
            other => {
                warn!(
                    "Unexpected value for tag maxspeed: {other}\tTrying to get default speed."
                );
                *has_explicit = false;
                config.speed_defaults.default_speed(Some(category), context)
            }
        },
    }
}

/// Urban-ness for the speed fallback: the traffic zone tag wins, then the
/// external classifier, then the street type heuristic.
fn urban_context(
    way: &OsmWay,
    street_type: u8,
    config: &ConvertConfig,
    stats: &mut ConvertStats,
) -> UrbanContext {
    if let Some(zone) = way.tags.get("zone:traffic") {
        stats.zone_tags += 1;
        return if zone == "urban" {
            UrbanContext::Urban
        } else {
            UrbanContext::Outside
        };
    }

    if let Some(urban) = config
        .urban_classifier
        .and_then(|classifier| classifier.is_urban(way))
    {
        return if urban {
            UrbanContext::Urban
        } else {
            UrbanContext::Outside
        };
    }

    if street_type > 2 {
        UrbanContext::Urban
    } else {
        UrbanContext::Unknown
    }
}

fn resolve_one_way(way: &OsmWay) -> (bool, bool) {
    match way.tags.get("oneway") {
        Some("yes") | Some("1") | Some("true") => (true, false),
        Some("-1") => (true, true),
        _ => (false, false),
    }
}

/// Access code from the access, vehicle and motor_vehicle tags, in that
/// priority order. A present tag with an unrecognized value falls through to
/// the next tag.
fn resolve_access(way: &OsmWay, category: &str, stats: &mut ConvertStats) -> u8 {
    for key in ["access", "vehicle", "motor_vehicle"] {
        if let Some(value) = way.tags.get(key) {
            stats.access_tags += 1;
            if let Some(code) = access_code(value) {
                return code;
            }
        }
    }

    if category == "service" { 2 } else { 1 }
}

fn access_code(value: &str) -> Option<u8> {
    match value {
        "yes" | "permissive" | "official" | "designated" => Some(1),
        "no" | "agricultural" | "forestry" => Some(0),
        "private" | "destination" | "unknown" => Some(2),
        "delivery" => Some(3),
        _ => None,
    }
}

fn resolve_lanes(way: &OsmWay, category: &str, one_way: bool, config: &ConvertConfig) -> u32 {
    if let Some(raw) = way.tags.get("lanes") {
        if let Ok(lanes) = raw.parse::<u32>() {
            // the tag counts both directions, links carry one
            return if one_way { lanes } else { (lanes / 2).max(1) };
        }
        warn!("Unparseable lanes value \"{raw}\" at way-id: {}", way.id);
    }

    config.lane_defaults.lanes(category, &way.id)
}

/// Resolves the display name, from the most general to the most specific
/// name tag. Link-category ways without any name tag may inherit a junction
/// node's exit name.
fn resolve_name(way: &OsmWay, data: &OsmData, category: &str) -> String {
    for key in [
        "ref", "name", "alt_name", "int_name", "nat_name", "reg_name", "loc_name",
    ] {
        if let Some(value) = way.tags.get(key) {
            return value.to_string();
        }
    }

    if ["unnamed", "unsigned", "name:absent"]
        .iter()
        .any(|key| way.tags.contains(key))
    {
        return "unnamed".to_string();
    }

    if category.ends_with("link") {
        // a motorway link may carry name and number of its exit on a
        // junction node
        for node_id in &way.nodes {
            let Some(node) = data.nodes.get(node_id) else {
                continue;
            };
            if node.tags.get("highway") != Some("motorway_junction") {
                continue;
            }

            let reference = node.tags.get("ref");
            let junction_name = node.tags.get("name");
            if reference.is_none() && junction_name.is_none() {
                return "nameMissing".to_string();
            }

            let mut name = String::from("Abfahrt");
            if let Some(reference) = reference {
                name.push(' ');
                name.push_str(reference);
            }
            if let Some(junction_name) = junction_name {
                name.push_str(": ");
                name.push_str(junction_name);
            }
            return name;
        }
    }

    "nameMissing".to_string()
}
