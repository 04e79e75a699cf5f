//! Directed adjacency between links, derived from shared endpoints

use hashbrown::HashMap;

use super::sorted_link_ids;
use crate::model::Link;
use crate::{LinkId, NodeId};

/// Fills every link's following/leading sets. A link never lists itself, its
/// reverse twin, or any link covering the same node pair as a neighbor.
pub(crate) fn derive_adjacency(links: &mut HashMap<LinkId, Link>) {
    let ids = sorted_link_ids(links);

    let mut starting_here: HashMap<NodeId, Vec<LinkId>> = HashMap::new();
    let mut ending_here: HashMap<NodeId, Vec<LinkId>> = HashMap::new();
    let mut endpoints: HashMap<LinkId, (NodeId, NodeId)> = HashMap::with_capacity(links.len());

    for id in &ids {
        let link = &links[id];
        starting_here
            .entry(link.start_node.clone())
            .or_default()
            .push(id.clone());
        ending_here
            .entry(link.end_node.clone())
            .or_default()
            .push(id.clone());
        endpoints.insert(id.clone(), (link.start_node.clone(), link.end_node.clone()));
    }

    for id in &ids {
        let (start, end) = endpoints[id].clone();
        let following = neighbors(starting_here.get(&end), &start, &end, &endpoints);
        let leading = neighbors(ending_here.get(&start), &start, &end, &endpoints);

        if let Some(link) = links.get_mut(id) {
            link.following = following;
            link.leading = leading;
        }
    }
}

fn neighbors(
    candidates: Option<&Vec<LinkId>>,
    start: &NodeId,
    end: &NodeId,
    endpoints: &HashMap<LinkId, (NodeId, NodeId)>,
) -> Vec<LinkId> {
    let mut result = Vec::new();

    for candidate in candidates.into_iter().flatten() {
        let (candidate_start, candidate_end) = &endpoints[candidate];
        let same_pair = candidate_start == start && candidate_end == end;
        let reversed_pair = candidate_start == end && candidate_end == start;
        if !same_pair && !reversed_pair {
            result.push(candidate.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    fn link(id: &str, start_node: &str, end_node: &str) -> Link {
        Link {
            id: id.to_string(),
            start_node: start_node.to_string(),
            end_node: end_node.to_string(),
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 0.0),
            length: 1.0,
            street_type: 3,
            street_category: "residential".to_string(),
            name: "x".to_string(),
            speed: 50,
            lanes: 1,
            access: 1,
            one_way: false,
            has_explicit: false,
            following: Vec::new(),
            leading: Vec::new(),
            street_id: None,
        }
    }

    fn link_map(links: Vec<Link>) -> HashMap<LinkId, Link> {
        links.into_iter().map(|l| (l.id.clone(), l)).collect()
    }

    #[test]
    fn neighbors_share_endpoints() {
        // a -> b -> c, plus mirrored twins
        let mut links = link_map(vec![
            link("0", "a", "b"),
            link("1", "b", "a"),
            link("2", "b", "c"),
            link("3", "c", "b"),
        ]);
        derive_adjacency(&mut links);

        assert_eq!(links["0"].following, vec!["2".to_string()]);
        assert_eq!(links["2"].leading, vec!["0".to_string()]);
        assert_eq!(links["3"].following, vec!["1".to_string()]);
        assert_eq!(links["1"].leading, vec!["3".to_string()]);
    }

    #[test]
    fn twin_and_self_are_never_neighbors() {
        let mut links = link_map(vec![link("0", "a", "b"), link("1", "b", "a")]);
        derive_adjacency(&mut links);

        for l in links.values() {
            assert!(l.following.is_empty());
            assert!(l.leading.is_empty());
        }
    }

    #[test]
    fn parallel_duplicate_edges_are_excluded() {
        // two distinct links over the same node pair
        let mut links = link_map(vec![
            link("0", "a", "b"),
            link("1", "a", "b"),
            link("2", "b", "c"),
        ]);
        derive_adjacency(&mut links);

        assert_eq!(links["0"].following, vec!["2".to_string()]);
        assert_eq!(links["1"].following, vec!["2".to_string()]);
        // both parallel links still lead into the continuation
        assert_eq!(links["2"].leading.len(), 2);
    }

    #[test]
    fn branch_point_lists_all_continuations() {
        let mut links = link_map(vec![
            link("0", "a", "b"),
            link("1", "b", "c"),
            link("2", "b", "d"),
        ]);
        derive_adjacency(&mut links);

        assert_eq!(
            links["0"].following,
            vec!["1".to_string(), "2".to_string()]
        );
    }
}
