//! Application of turn restrictions as adjacency edits
//!
//! Restrictions are resolved from original way ids to converted link ids via
//! the assignment table built during segmentation, keeping the pairwise scan
//! bounded by the handful of links a single way splits into. Edits are
//! idempotent: removing an absent edge or re-pinning an already exclusive
//! successor changes nothing.

use hashbrown::HashMap;
use log::{info, warn};

use crate::model::{Link, Restriction, RestrictionKind};
use crate::{LinkId, WayId};

/// Applies the parsed restrictions to the link adjacency. Returns how many
/// restrictions actually edited an edge; the rest are logged and dropped.
pub(crate) fn apply_restrictions(
    mut restrictions: Vec<Restriction>,
    assignment: &HashMap<WayId, Vec<LinkId>>,
    links: &mut HashMap<LinkId, Link>,
) -> usize {
    // restrictions over ways that never became links (paths etc.) cannot be
    // constructed at all
    let before = restrictions.len();
    restrictions
        .retain(|r| assignment.contains_key(&r.from) && assignment.contains_key(&r.to));
    let unconverted = before - restrictions.len();
    if unconverted > 0 {
        info!("{unconverted} restrictions dropped, their ways were never converted");
    }

    let mut applied = 0;

    for restriction in &restrictions {
        let from_links = &assignment[&restriction.from];
        let to_links = &assignment[&restriction.to];
        let mut edited = false;

        for from_id in from_links {
            for to_id in to_links {
                let edge_exists = links
                    .get(from_id)
                    .is_some_and(|link| link.following.contains(to_id));
                if !edge_exists {
                    continue;
                }

                match restriction.kind {
                    RestrictionKind::No => {
                        if let Some(link) = links.get_mut(from_id) {
                            link.following.retain(|id| id != to_id);
                        }
                        if let Some(link) = links.get_mut(to_id) {
                            link.leading.retain(|id| id != from_id);
                        }
                    }
                    RestrictionKind::Only => {
                        if let Some(link) = links.get_mut(from_id) {
                            link.following = vec![to_id.clone()];
                        }
                        if let Some(link) = links.get_mut(to_id) {
                            link.leading = vec![from_id.clone()];
                        }
                    }
                }
                edited = true;
            }
        }

        if edited {
            applied += 1;
        } else {
            warn!("Restriction {} couldn't be constructed", restriction.id);
        }
    }

    applied
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

    fn restriction(kind: RestrictionKind, from: &str, to: &str) -> Restriction {
        Restriction {
            id: "r".to_string(),
            kind,
            from: from.to_string(),
            to: to.to_string(),
            via: None,
            temporary: false,
            day_on: None,
            day_off: None,
            hour_on: None,
            hour_off: None,
        }
    }

    /// Junction at node b: link 0 continues into links 1 and 2.
    fn junction() -> (HashMap<LinkId, Link>, HashMap<WayId, Vec<LinkId>>) {
        let mut l0 = link("0", "a", "b");
        l0.following = vec!["1".to_string(), "2".to_string()];
        let mut l1 = link("1", "b", "c");
        l1.leading = vec!["0".to_string()];
        let mut l2 = link("2", "b", "d");
        l2.leading = vec!["0".to_string()];

        let links: HashMap<LinkId, Link> = [l0, l1, l2]
            .into_iter()
            .map(|l| (l.id.clone(), l))
            .collect();

        let assignment: HashMap<WayId, Vec<LinkId>> = [
            ("w0".to_string(), vec!["0".to_string()]),
            ("w1".to_string(), vec!["1".to_string()]),
            ("w2".to_string(), vec!["2".to_string()]),
        ]
        .into_iter()
        .collect();

        (links, assignment)
    }

    #[test]
    fn no_restriction_removes_the_edge_symmetrically() {
        let (mut links, assignment) = junction();
        let applied = apply_restrictions(
            vec![restriction(RestrictionKind::No, "w0", "w1")],
            &assignment,
            &mut links,
        );

        assert_eq!(applied, 1);
        assert_eq!(links["0"].following, vec!["2".to_string()]);
        assert!(links["1"].leading.is_empty());
        // the untouched branch keeps its leader
        assert_eq!(links["2"].leading, vec!["0".to_string()]);
    }

    #[test]
    fn only_restriction_pins_the_single_successor() {
        let (mut links, assignment) = junction();
        let applied = apply_restrictions(
            vec![restriction(RestrictionKind::Only, "w0", "w1")],
            &assignment,
            &mut links,
        );

        assert_eq!(applied, 1);
        assert_eq!(links["0"].following, vec!["1".to_string()]);
        assert_eq!(links["1"].leading, vec!["0".to_string()]);
    }

    #[test]
    fn edits_are_idempotent() {
        let (mut links, assignment) = junction();
        let rests = vec![
            restriction(RestrictionKind::No, "w0", "w1"),
            restriction(RestrictionKind::No, "w0", "w1"),
        ];
        apply_restrictions(rests, &assignment, &mut links);

        assert_eq!(links["0"].following, vec!["2".to_string()]);
        assert!(links["1"].leading.is_empty());
    }

    #[test]
    fn restriction_without_matching_edge_is_dropped() {
        let (mut links, assignment) = junction();
        // w1 -> w2 share no edge
        let applied = apply_restrictions(
            vec![restriction(RestrictionKind::No, "w1", "w2")],
            &assignment,
            &mut links,
        );

        assert_eq!(applied, 0);
        assert_eq!(links["0"].following.len(), 2);
    }

    #[test]
    fn restriction_over_unconverted_way_is_dropped() {
        let (mut links, assignment) = junction();
        let applied = apply_restrictions(
            vec![restriction(RestrictionKind::No, "w9", "w1")],
            &assignment,
            &mut links,
        );

        assert_eq!(applied, 0);
        assert_eq!(links["0"].following.len(), 2);
    }
}
