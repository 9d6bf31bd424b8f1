//! Turn-by-turn narration of a [`Path`].
//!
//! # Walking model
//!
//! A path visits nodes `n0 .. nk`; edge `i` leads from `n(i)` to `n(i+1)`
//! and leaves the walker facing its direction.  The turn at an interior node
//! `n(j)` is the turn from the direction of edge `j-1` to that of edge `j`.
//!
//! Steps are produced by node kind:
//!
//! * leaving the start room or door, and arriving at the target room or door;
//! * hallway turns, counting the side hallways passed since the last turn;
//! * stairs and elevators, as enter / ride / leave triples;
//! * building doors, when the path crosses between inside and outside;
//! * outdoors, walked distance per street or path, turns onto new ways and
//!   crossings at intersections.
//!
//! A step that already describes the turn at the following node (leaving a
//! room, a door or an elevator "and turn left") marks that node's turn as
//! consumed so it is not narrated twice.

use std::collections::HashMap;

use cg_core::{NavConfig, NodeRef, NodeType};
use cg_graph::{Edge, Graph};
use cg_route::Path;

use crate::phrases::{self, Description, Way};
use crate::{
    count_missed_halls, language, turning_direction, DirectionResults, Language, MissedHalls, Step,
    StepIcon, Translator, Turn,
};

/// Narrates paths over a set of loaded graphs.
pub struct Narrator<'a, T: Translator + ?Sized> {
    graphs:     &'a HashMap<String, Graph>,
    translator: &'a T,
    config:     &'a NavConfig,
}

/// Mutable narration state threaded through one path.
#[derive(Default)]
struct Walk<'a> {
    steps:    Vec<Step>,
    /// Index of the node whose turn an earlier step already described.
    consumed: Option<usize>,
    halls:    MissedHalls,
    /// Outdoor graph units walked since the last outdoor step.
    walked:   u64,
    way:      Option<Way<'a>>,
}

impl Walk<'_> {
    fn push(&mut self, kind: &str, node: &NodeRef, index: usize, description: Description, icon: StepIcon) {
        self.steps.push(Step::new(format!("{kind}_{}_{index}", node.id()), description, Some(icon)));
    }
}

/// The turn at node `n(j)`; straight at either end of the path.
fn turn_at(edges: &[Edge], j: usize) -> Turn {
    if j == 0 || j >= edges.len() {
        return Turn::Straight;
    }
    turning_direction(edges[j - 1].direction, edges[j].direction)
}

fn turn_icon(turn: Turn) -> StepIcon {
    match turn {
        Turn::Left => StepIcon::TurnLeft,
        Turn::Right => StepIcon::TurnRight,
        Turn::Straight => StepIcon::Straight,
    }
}

fn floor_icon(node: &NodeRef) -> StepIcon {
    if node.node_type() == NodeType::Elevator { StepIcon::Elevator } else { StepIcon::Stairs }
}

impl<'a, T: Translator + ?Sized> Narrator<'a, T> {
    pub fn new(graphs: &'a HashMap<String, Graph>, translator: &'a T, config: &'a NavConfig) -> Self {
        Self { graphs, translator, config }
    }

    /// Full results for a request: the start label, the route's steps and
    /// the target label.  Without a path the results hold one error step
    /// and ask the client to offer a report.
    pub fn narrate(
        &self,
        path:       Option<&Path>,
        start:      &str,
        target:     &str,
        accessible: bool,
        language:   Language,
    ) -> DirectionResults {
        let Some(path) = path else {
            let key = if accessible { language::NO_ACCESSIBLE_PATH_FOUND } else { language::NO_PATH_FOUND };
            tracing::debug!(start, target, accessible, "narrating missing route");
            return DirectionResults {
                steps:       vec![Step::new(key, phrases::no_path(self.translator, accessible), Some(StepIcon::Error))],
                show_report: true,
                language,
                distance:    None,
            };
        };

        let mut steps = Vec::with_capacity(path.edges.len() + 2);
        steps.push(Step::new("start", Description::same(start), Some(StepIcon::Start)));
        steps.extend(self.route_steps(path));
        steps.push(Step::new("target", Description::same(target), Some(StepIcon::Target)));

        DirectionResults { steps, show_report: false, language, distance: Some(path.distance) }
    }

    /// The steps between the start and target labels.
    pub fn route_steps(&self, path: &Path) -> Vec<Step> {
        let edges = path.edges.as_slice();
        if edges.is_empty() {
            return Vec::new();
        }
        let nodes: Vec<&NodeRef> = path.nodes().collect();
        let mut walk = Walk::default();

        self.leave_source(&nodes, edges, &mut walk);
        for j in 1..edges.len() {
            self.visit(j, &nodes, edges, &mut walk);
        }
        self.arrive(&nodes, edges, &mut walk);

        tracing::debug!(source = %path.source, steps = walk.steps.len(), "narrated route");
        walk.steps
    }

    fn is_outside(&self, node: &NodeRef) -> bool {
        node.is_outside(&self.config.outdoor_building)
    }

    fn outdoor(&self) -> Option<&'a Graph> {
        let graphs: &'a HashMap<String, Graph> = self.graphs;
        graphs.get(&self.config.outdoor_building)
    }

    /// The street or path `node` belongs to, if it is one.
    fn way_of(&self, node: &NodeRef) -> Option<Way<'a>> {
        match node.node_type() {
            NodeType::Street => {
                let name = self.outdoor().and_then(|graph| graph.street_name(node));
                Some(name.map_or(Way::Path, Way::Street))
            }
            NodeType::Path | NodeType::OutdoorSteps => Some(Way::Path),
            _ => None,
        }
    }

    /// Outdoor graph units to narrated metres, rounded to the nearest ten
    /// and never below ten.
    fn metres(&self, units: u64) -> u32 {
        let metres = units as f64 * self.config.outer_unit_to_m;
        ((metres / 10.0).round().max(1.0) * 10.0) as u32
    }

    fn flush_walk(&self, walk: &mut Walk<'a>, node: &NodeRef, j: usize) {
        if walk.walked > 0 {
            let way = walk.way.unwrap_or(Way::Path);
            let metres = self.metres(walk.walked);
            walk.push("walk", node, j, phrases::walk_along(way, metres), StepIcon::Walk);
            walk.walked = 0;
        }
    }

    // ── Ends of the path ──────────────────────────────────────────────────

    fn leave_source(&self, nodes: &[&NodeRef], edges: &[Edge], walk: &mut Walk<'a>) {
        let source = nodes[0];
        let next = turn_at(edges, 1);
        match source.node_type() {
            NodeType::Room => {
                walk.push("exitRoom", source, 0, phrases::exit_room(source, next), turn_icon(next));
                walk.consumed = Some(1);
            }
            NodeType::Door if self.is_outside(nodes[1]) => {
                let text = phrases::exit_building(self.translator, source, next);
                walk.push("exitBuilding", source, 0, text, StepIcon::Door);
                walk.consumed = Some(1);
            }
            NodeType::Door => {
                let text = phrases::enter_building(self.translator, source, Some(next));
                walk.push("enterBuilding", source, 0, text, StepIcon::Door);
                walk.consumed = Some(1);
            }
            _ => {}
        }
    }

    fn arrive(&self, nodes: &[&NodeRef], edges: &[Edge], walk: &mut Walk<'a>) {
        let k = edges.len();
        let target = nodes[k];
        let at = turn_at(edges, k - 1);
        match target.node_type() {
            NodeType::Room => {
                let text = phrases::enter_room(self.translator, target, at);
                walk.push("enterRoom", target, k, text, StepIcon::Room);
            }
            NodeType::Door if self.is_outside(nodes[k - 1]) => {
                walk.walked += u64::from(edges[k - 1].distance);
                self.flush_walk(walk, target, k);
                walk.push("buildingSide", target, k, phrases::building_side(target.building(), at), turn_icon(at));
                let text = phrases::enter_building(self.translator, target, None);
                walk.push("enterBuilding", target, k, text, StepIcon::Door);
            }
            _ if self.is_outside(target) => {
                walk.walked += u64::from(edges[k - 1].distance);
                if let Some(way) = self.way_of(target) {
                    walk.way = Some(way);
                }
                self.flush_walk(walk, target, k);
            }
            _ => {}
        }
    }

    // ── Interior nodes ────────────────────────────────────────────────────

    fn visit(&self, j: usize, nodes: &[&NodeRef], edges: &[Edge], walk: &mut Walk<'a>) {
        let node = nodes[j];
        let prev = nodes[j - 1];
        if self.is_outside(node) || (node.node_type() == NodeType::Door && self.is_outside(prev)) {
            walk.walked += u64::from(edges[j - 1].distance);
        }

        match node.node_type() {
            kind if kind.changes_floor() => self.change_floors(j, nodes, edges, walk),
            NodeType::Door => self.pass_door(j, nodes, edges, walk),
            _ if self.is_outside(node) => self.walk_outdoors(j, nodes, edges, walk),
            NodeType::Hallway => self.walk_hallway(j, nodes, edges, walk),
            _ => {
                let turn = turn_at(edges, j);
                if walk.consumed != Some(j) && turn != Turn::Straight {
                    walk.push("turn", node, j, phrases::plain_turn(turn), turn_icon(turn));
                }
            }
        }
    }

    fn change_floors(&self, j: usize, nodes: &[&NodeRef], edges: &[Edge], walk: &mut Walk<'a>) {
        let node = nodes[j];
        if nodes[j - 1].node_type().changes_floor() {
            return;
        }
        let k = edges.len();
        let landing = (j + 1..=k).find(|&i| !nodes[i].node_type().changes_floor()).unwrap_or(k);
        let icon = floor_icon(node);

        walk.push("enter", node, j, phrases::enter_floor_changer(self.translator, node), icon);
        if let Some(floor) = nodes[landing].floor_number() {
            walk.push("take", node, j, phrases::take_to_floor(self.translator, node, floor), icon);
        }
        let next = turn_at(edges, landing);
        walk.push("leave", node, j, phrases::leave_floor_changer(self.translator, node, next), turn_icon(next));

        walk.consumed = Some(landing);
        walk.halls = MissedHalls::default();
    }

    fn pass_door(&self, j: usize, nodes: &[&NodeRef], edges: &[Edge], walk: &mut Walk<'a>) {
        let door = nodes[j];
        let came_from_outside = self.is_outside(nodes[j - 1]);
        let going_outside = self.is_outside(nodes[j + 1]);

        match (came_from_outside, going_outside) {
            (false, true) => {
                let next = turn_at(edges, j + 1);
                let text = phrases::exit_building(self.translator, door, next);
                walk.push("exitBuilding", door, j, text, StepIcon::Door);
                walk.consumed = Some(j + 1);
                walk.walked = 0;
                walk.way = None;
            }
            (true, false) => {
                self.flush_walk(walk, door, j);
                let passing = turn_at(edges, j - 1);
                let side = phrases::building_side(door.building(), passing);
                walk.push("buildingSide", door, j, side, turn_icon(passing));
                let text = phrases::enter_building(self.translator, door, Some(turn_at(edges, j)));
                walk.push("enterBuilding", door, j, text, StepIcon::Door);
                walk.halls = MissedHalls::default();
                walk.way = None;
            }
            _ => {
                let turn = turn_at(edges, j);
                if walk.consumed != Some(j) && turn != Turn::Straight {
                    walk.push("turn", door, j, phrases::plain_turn(turn), turn_icon(turn));
                }
            }
        }
    }

    fn walk_hallway(&self, j: usize, nodes: &[&NodeRef], edges: &[Edge], walk: &mut Walk<'a>) {
        if walk.consumed == Some(j) {
            walk.halls = MissedHalls::default();
            return;
        }
        let (node, prev, next) = (nodes[j], nodes[j - 1], nodes[j + 1]);
        let Some(graph) = self.graphs.get(node.building()) else {
            return;
        };
        let facing = edges[j - 1].direction;
        let seen = count_missed_halls(graph, node, facing, &[prev, next]);
        let turn = turn_at(edges, j);

        if turn == Turn::Straight {
            walk.halls.absorb(seen);
            return;
        }
        // Turning into the target room is described on arrival.
        if j + 1 == edges.len() && next.node_type() == NodeType::Room {
            return;
        }

        let text = if seen.straight == 0 {
            phrases::end_of_hall(turn)
        } else if next.node_type() == NodeType::Hallway {
            phrases::nth_hallway(walk.halls.on(turn) + 1, turn)
        } else {
            phrases::plain_turn(turn)
        };
        walk.push("hallway", node, j, text, turn_icon(turn));
        walk.halls = MissedHalls::default();
    }

    fn walk_outdoors(&self, j: usize, nodes: &[&NodeRef], edges: &[Edge], walk: &mut Walk<'a>) {
        let (node, next) = (nodes[j], nodes[j + 1]);
        let turn = turn_at(edges, j);
        let consumed = walk.consumed == Some(j);

        if node.node_type() == NodeType::Intersection {
            self.flush_walk(walk, node, j);
            let crossed = self.outdoor().and_then(|graph| graph.crossed_street(node, edges[j].direction));
            match crossed {
                Some(street) => walk.push("cross", node, j, phrases::cross(turn, street), StepIcon::Crossing),
                None if !consumed && turn != Turn::Straight => {
                    walk.push("turn", node, j, phrases::plain_turn(turn), turn_icon(turn));
                }
                None => {}
            }
            walk.way = None;
            return;
        }

        if let Some(here) = self.way_of(node) {
            walk.way = Some(here);
        }
        if consumed {
            return;
        }

        let current = walk.way.unwrap_or(Way::Path);
        let metres = self.metres(walk.walked);
        match self.way_of(next) {
            Some(ahead) if turn != Turn::Straight => {
                walk.push("turnOnto", node, j, phrases::walk_then_turn(current, metres, turn, ahead), turn_icon(turn));
                walk.way = Some(ahead);
            }
            Some(ahead) if ahead != current => {
                walk.push("becomes", node, j, phrases::walk_until_it_becomes(current, metres, ahead), StepIcon::Walk);
                walk.way = Some(ahead);
            }
            // A turn right before a door is told by the building side step.
            None if turn != Turn::Straight && next.node_type() != NodeType::Door => {
                walk.push("turn", node, j, phrases::walk_and_turn(current, metres, turn), turn_icon(turn));
            }
            _ => return,
        }
        walk.walked = 0;
    }
}
