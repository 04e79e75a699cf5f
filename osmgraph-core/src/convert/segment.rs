//! Splitting of ways into atomic directed links
//!
//! Every pair of consecutive member nodes becomes one link, so no link spans
//! an intermediate node. Two-way roads additionally get a mirrored link per
//! segment; routing algorithms then only ever deal with directed edges.

use geo::Point;
use hashbrown::HashMap;
use itertools::Itertools;

use super::attributes::WayAttributes;
use crate::geo_util::great_circle_distance;
use crate::model::{Link, OsmNode, OsmWay};
use crate::{Error, NodeId};

/// Splits a way into links, numbering them from `first_id` upwards. Forward
/// link ids are strictly increasing; for two-way roads the mirrored link
/// follows its forward twin immediately.
pub(crate) fn split_way(
    way: &OsmWay,
    attrs: &WayAttributes,
    nodes: &HashMap<NodeId, OsmNode>,
    first_id: u64,
) -> Result<Vec<Link>, Error> {
    let mut node_order: Vec<&NodeId> = way.nodes.iter().collect();
    if attrs.reversed {
        node_order.reverse();
    }

    let mut links = Vec::new();
    let mut next_id = first_id;

    for (start_id, end_id) in node_order.iter().copied().tuple_windows() {
        let start = lookup(nodes, way, start_id)?;
        let end = lookup(nodes, way, end_id)?;
        let length = great_circle_distance(start.point, end.point);

        links.push(make_link(
            next_id,
            start_id,
            end_id,
            start.point,
            end.point,
            length,
            attrs,
            attrs.one_way,
        ));
        next_id += 1;

        if !attrs.one_way {
            links.push(make_link(
                next_id,
                end_id,
                start_id,
                end.point,
                start.point,
                length,
                attrs,
                false,
            ));
            next_id += 1;
        }
    }

    Ok(links)
}

fn lookup<'a>(
    nodes: &'a HashMap<NodeId, OsmNode>,
    way: &OsmWay,
    id: &NodeId,
) -> Result<&'a OsmNode, Error> {
    nodes.get(id).ok_or_else(|| Error::DanglingNodeRef {
        way: way.id.clone(),
        node: id.clone(),
    })
}

#[allow(clippy::too_many_arguments)]
fn make_link(
    id: u64,
    start_node: &NodeId,
    end_node: &NodeId,
    start: Point<f64>,
    end: Point<f64>,
    length: f64,
    attrs: &WayAttributes,
    one_way: bool,
) -> Link {
    Link {
        id: id.to_string(),
        start_node: start_node.clone(),
        end_node: end_node.clone(),
        start,
        end,
        length,
        street_type: attrs.street_type,
        street_category: attrs.category.clone(),
        name: attrs.name.clone(),
        speed: attrs.speed,
        lanes: attrs.lanes,
        access: attrs.access,
        one_way,
        has_explicit: attrs.has_explicit,
        following: Vec::new(),
        leading: Vec::new(),
        street_id: None,
    }
}
