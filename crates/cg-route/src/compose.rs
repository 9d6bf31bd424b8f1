//! Cross-building route composition.
//!
//! A route between two buildings is three legs: start to one of its
//! building's exits, exit to an entrance of the target building through the
//! outdoor graph, and entrance to the target.  Candidate (exit, entrance)
//! pairs are ranked by the first leg plus the straight-line distance between
//! the doors plus the last leg.  The outdoor leg is then searched for each
//! pair in rank order; the first pair with an outdoor route wins.

use std::collections::HashMap;

use cg_core::{NavConfig, NodeRef};
use cg_graph::Graph;

use crate::{Path, PathFinder, SearchOptions};

/// Straight-line distance between every pair of doors, keyed first by the
/// door of the first set.
pub type DoorDistances = HashMap<NodeRef, HashMap<NodeRef, f64>>;

/// Euclidean distances between each door of `first` and each door of
/// `second`, using the coordinates registered in `outdoor`'s exits.
///
/// Doors without outdoor coordinates are left out.
pub fn distances_between_doors<'a, A, B>(first: A, second: B, outdoor: &Graph) -> DoorDistances
where
    A: IntoIterator<Item = &'a NodeRef>,
    B: IntoIterator<Item = &'a NodeRef>,
{
    let located = |door: &'a NodeRef| match outdoor.exits.get(door) {
        Some(position) => Some((door, *position)),
        None => {
            tracing::warn!(door = %door, "door has no outdoor coordinates");
            None
        }
    };
    let second: Vec<_> = second.into_iter().filter_map(located).collect();

    first
        .into_iter()
        .filter_map(located)
        .map(|(door, position)| {
            let row = second
                .iter()
                .map(|(other, to)| (NodeRef::clone(other), position.distance(*to)))
                .collect();
            (NodeRef::clone(door), row)
        })
        .collect()
}

// ── CompositionWeights ────────────────────────────────────────────────────────

/// Multipliers applied to indoor and outdoor distances when ranking
/// candidate door pairs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompositionWeights {
    pub inner: f64,
    pub outer: f64,
}

impl Default for CompositionWeights {
    fn default() -> Self {
        Self { inner: 1.0, outer: 1.0 }
    }
}

impl CompositionWeights {
    /// Unit conversions from `config` when weighted composition is enabled,
    /// plain sums otherwise.
    pub fn from_config(config: &NavConfig) -> Self {
        if config.weighted_composition {
            Self { inner: config.inner_unit_to_m, outer: config.outer_unit_to_m }
        } else {
            Self::default()
        }
    }
}

// ── compose_across ────────────────────────────────────────────────────────────

/// One ranked (exit, entrance) pair.
struct Candidate<'a> {
    cost:     f64,
    exit:     &'a NodeRef,
    entrance: &'a NodeRef,
}

/// Join the best start-side leg, outdoor leg and target-side leg.
///
/// `start_to_exits` maps exits of the start building to paths from the
/// start; `exits_to_target` maps entrances of the target building to paths
/// from the entrance to the target.  Pairs missing from `door_distances` are
/// skipped.  Returns `None` if no pair has an outdoor route.
///
/// The reported distance of the result is the sum of the three legs.
pub fn compose_across<F: PathFinder + ?Sized>(
    finder:          &F,
    start_to_exits:  &HashMap<NodeRef, Path>,
    exits_to_target: &HashMap<NodeRef, Path>,
    door_distances:  &DoorDistances,
    outdoor:         &Graph,
    options:         &SearchOptions,
    weights:         CompositionWeights,
) -> Option<Path> {
    let mut candidates: Vec<Candidate<'_>> = Vec::new();
    for (exit, first) in start_to_exits {
        for (entrance, last) in exits_to_target {
            let Some(straight) = door_distances.get(exit).and_then(|row| row.get(entrance)) else {
                continue;
            };
            let indoor = (first.distance + last.distance) as f64;
            candidates.push(Candidate {
                cost: indoor * weights.inner + straight * weights.outer,
                exit,
                entrance,
            });
        }
    }

    candidates.sort_by(|a, b| {
        a.cost
            .total_cmp(&b.cost)
            .then_with(|| a.exit.cmp(b.exit))
            .then_with(|| a.entrance.cmp(b.entrance))
    });

    let options = options.forward();
    for candidate in &candidates {
        let Some(outside) = finder.find_path(candidate.exit, candidate.entrance, outdoor, &options) else {
            tracing::debug!(
                exit = %candidate.exit,
                entrance = %candidate.entrance,
                "no outdoor route between doors; trying next pair"
            );
            continue;
        };

        let first = start_to_exits[candidate.exit].clone();
        let last = exits_to_target[candidate.entrance].clone();
        tracing::debug!(
            exit = %candidate.exit,
            entrance = %candidate.entrance,
            indoor = first.distance + last.distance,
            outdoor = outside.distance,
            "composed cross-building route"
        );
        return Some(first.join(outside).join(last));
    }
    None
}
