//! Unit tests for cg-directions.

#[cfg(test)]
mod helpers {
    use cg_graph::MemorySource;

    use crate::{Catalog, Destination, DirectionResults, Language, Navigator, NavigatorBuilder};

    pub const GSD: &str = include_str!("../../../data/GSD_graph.txt");
    pub const STE: &str = include_str!("../../../data/STE_graph.txt");
    pub const OUT: &str = include_str!("../../../data/OUT_graph.txt");

    pub fn navigator() -> Navigator<MemorySource, Catalog> {
        let source = MemorySource::new().with("GSD", GSD).with("STE", STE).with("OUT", OUT);
        NavigatorBuilder::new(source).build()
    }

    pub fn directions(from: &str, to: &str, accessible: bool) -> DirectionResults {
        let start: Destination = from.parse().unwrap();
        let target: Destination = to.parse().unwrap();
        navigator().get_directions_between(&start, &target, accessible, Language::En).unwrap()
    }
}

// ── Turns ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod turns {
    use cg_core::{NavConfig, NodeCache};
    use cg_graph::{parse_graph, EdgeDirection};

    use crate::phrases::plain_turn;
    use crate::{count_missed_halls, turning_direction, Language, Turn};

    #[test]
    fn down_then_right_is_a_left_turn() {
        let turn = turning_direction(EdgeDirection::Down, EdgeDirection::Right);
        assert_eq!(turn, Turn::Left);
        let text = plain_turn(turn);
        assert_eq!(text.get(Language::En), "Turn left");
        assert_eq!(text.get(Language::Fr), "Tournez à gauche");
    }

    #[test]
    fn turn_table() {
        use EdgeDirection::{Down, Left, Right, Up};
        for (from, to) in [(Down, Left), (Up, Right), (Left, Up), (Right, Down)] {
            assert_eq!(turning_direction(from, to), Turn::Right, "{from} -> {to}");
        }
        for (from, to) in [(Down, Right), (Up, Left), (Left, Down), (Right, Up)] {
            assert_eq!(turning_direction(from, to), Turn::Left, "{from} -> {to}");
        }
        for (from, to) in [(Up, Up), (Up, Down), (Left, Right), (Down, Down)] {
            assert_eq!(turning_direction(from, to), Turn::Straight, "{from} -> {to}");
        }
    }

    #[test]
    fn side_hallways() {
        let text = "\
[EDGES]
H1b|H1a:L:10:T,H1c:R:10:T,H1x:U:5:T,H1z:D:5:T,R9:U:3:T
";
        let cache = NodeCache::new();
        let graph = parse_graph("ABC", text, &cache, &NavConfig::default()).unwrap();
        let node = cache.get("BABC#H1b").unwrap();
        let came_from = cache.get("BABC#H1a").unwrap();

        let halls = count_missed_halls(&graph, &node, EdgeDirection::Right, &[&came_from]);
        assert_eq!(halls.left, 1);
        assert_eq!(halls.right, 1);
        assert_eq!(halls.straight, 1);
        assert_eq!(halls.on(Turn::Left), 1);
    }
}

// ── Language ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod language {
    use crate::language::{NO_ACCESSIBLE_PATH_FOUND, NO_PATH_FOUND};
    use crate::{ordinal, Catalog, Language, Translator};

    #[test]
    fn english_ordinals() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 101, 111].iter().map(|&n| ordinal(n, Language::En)).collect();
        assert_eq!(got, vec!["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "101st", "111th"]);
    }

    #[test]
    fn french_ordinals() {
        assert_eq!(ordinal(1, Language::Fr), "1er");
        assert_eq!(ordinal(2, Language::Fr), "2e");
        assert_eq!(ordinal(11, Language::Fr), "11e");
    }

    #[test]
    fn parse_languages() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" FR ".parse::<Language>().unwrap(), Language::Fr);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn every_language_round_trips_and_is_translated() {
        let catalog = Catalog::default();
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>().unwrap(), language);
            assert_eq!(language.to_string(), language.code());
            assert_ne!(catalog.translate(NO_PATH_FOUND, language), NO_PATH_FOUND);
        }
        assert_eq!(catalog.len(), 2 * 11);
    }

    #[test]
    fn catalog_lookup_and_fallback() {
        let catalog = Catalog::default();
        assert_eq!(catalog.translate("elevator", Language::Fr), "ascenseur");
        assert_eq!(catalog.translate(NO_PATH_FOUND, Language::En), "No path found");
        assert_eq!(catalog.translate(NO_ACCESSIBLE_PATH_FOUND, Language::Fr), "Aucun chemin accessible trouvé");
        assert_eq!(catalog.translate("unheard_of", Language::En), "unheard_of");

        let custom = Catalog::empty().with(Language::En, "room", "lecture hall");
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.translate("room", Language::En), "lecture hall");
        assert_eq!(custom.translate("room", Language::Fr), "room");
    }
}

// ── Phrases ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod phrases {
    use cg_core::{FormattingRules, Node};

    use crate::phrases::{enter_building, enter_floor_changer, take_to_floor, Description};
    use crate::{Catalog, Language, Turn};

    fn node(raw: &str) -> Node {
        Node::new(raw, "GSD", &FormattingRules::new()).unwrap()
    }

    #[test]
    fn elevators_are_not_named() {
        let catalog = Catalog::default();
        let text = enter_floor_changer(&catalog, &node("EA"));
        assert_eq!(text.en, "Enter the elevator");
        assert_eq!(text.fr, "Entrez dans l'ascenseur");
        assert_eq!(enter_floor_changer(&catalog, &node("SB")).en, "Enter the staircase B");
    }

    #[test]
    fn basement_floor() {
        let text = take_to_floor(&Catalog::default(), &node("SB"), -1);
        assert_eq!(text.en, "Take the staircase B to the basement");
        assert_eq!(text.fr, "Prenez l'escalier B jusqu'au sous-sol");
        let text = take_to_floor(&Catalog::default(), &node("EA"), 3);
        assert_eq!(text.fr, "Prenez l'ascenseur jusqu'au 3e étage");
    }

    #[test]
    fn entering_without_a_turn() {
        let catalog = Catalog::default();
        assert_eq!(enter_building(&catalog, &node("D2"), None).en, "Enter GSD through door 2");
        assert_eq!(
            enter_building(&catalog, &node("D2"), Some(Turn::Right)).fr,
            "Entrez dans GSD par la porte 2 et tournez à droite"
        );
    }

    #[test]
    fn same_text_in_both_languages() {
        let text = Description::same("GSD 101");
        assert_eq!(text.get(Language::En), text.get(Language::Fr));
    }
}

// ── Narration ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod narration {
    use std::collections::{HashMap, HashSet};

    use cg_core::{NavConfig, NodeCache};
    use cg_graph::parse_graph;
    use cg_route::{find_shortest_path, SearchOptions};

    use super::helpers::directions;
    use crate::{Catalog, Language, Narrator, StepIcon};

    #[test]
    fn between_buildings() {
        let results = directions("GSD 101", "STE 110", false);
        assert!(!results.show_report);
        assert_eq!(results.distance, Some(385));
        assert_eq!(
            results.lines(),
            vec![
                "GSD 101",
                "Exit GSD 101 and proceed straight",
                "Exit GSD through door 1 and turn left",
                "Walk approximately 130m along King Edward Avenue",
                "Proceed straight and cross Laurier Avenue",
                "Walk approximately 40m along the path",
                "STE will be on your left",
                "Enter STE through door 1 and turn right",
                "Room STE 110 will be on your left",
                "STE 110",
            ]
        );
    }

    #[test]
    fn between_buildings_in_french() {
        let results = directions("GSD 101", "STE 110", false);
        assert_eq!(
            results.lines_in(Language::Fr),
            vec![
                "GSD 101",
                "Sortez de GSD 101 et continuez tout droit",
                "Sortez de GSD par la porte 1 et tournez à gauche",
                "Marchez environ 130m le long de avenue King Edward",
                "Continuez tout droit et traversez avenue Laurier",
                "Marchez environ 40m le long de la voie",
                "STE sera sur votre gauche",
                "Entrez dans STE par la porte 1 et tournez à droite",
                "Salle STE 110 sera sur votre gauche",
                "STE 110",
            ]
        );
    }

    #[test]
    fn to_a_building_door() {
        let results = directions("STE 110", "GSD", false);
        assert_eq!(results.distance, Some(190));
        assert_eq!(
            results.lines(),
            vec![
                "STE 110",
                "Exit STE 110 and turn right",
                "Exit STE through door 1 and turn right",
                "Walk approximately 40m along the path",
                "Walk approximately 130m along King Edward Avenue",
                "GSD will be on your right",
                "Enter GSD through door 1",
                "GSD",
            ]
        );
    }

    #[test]
    fn up_the_stairs() {
        let results = directions("GSD 101", "GSD 201", false);
        assert_eq!(results.distance, Some(320));
        assert_eq!(
            results.lines(),
            vec![
                "GSD 101",
                "Exit GSD 101 and turn left",
                "Walk to the end of the hall and turn left",
                "Enter the staircase B",
                "Take the staircase B to the 2nd floor",
                "Exit the staircase B and turn right",
                "Room GSD 201 will be on your right",
                "GSD 201",
            ]
        );
        assert_eq!(results.steps[3].icon, Some(StepIcon::Stairs));
    }

    #[test]
    fn accessible_route_uses_the_elevator() {
        let results = directions("GSD 101", "GSD 201", true);
        assert_eq!(results.distance, Some(369));
        assert_eq!(
            results.lines_in(Language::Fr),
            vec![
                "GSD 101",
                "Sortez de GSD 101 et tournez à gauche",
                "Tournez à gauche",
                "Entrez dans l'ascenseur",
                "Prenez l'ascenseur jusqu'au 2e étage",
                "Sortez de l'ascenseur et tournez à gauche",
                "Salle GSD 201 sera sur votre gauche",
                "GSD 201",
            ]
        );
    }

    #[test]
    fn from_the_main_door() {
        let results = directions("GSD", "GSD 101", false);
        assert_eq!(
            results.lines(),
            vec!["GSD", "Enter GSD through door 1 and proceed straight", "Room GSD 101 will be directly ahead", "GSD 101"]
        );
    }

    #[test]
    fn no_route() {
        let results = directions("GSD 101", "GSD 999", false);
        assert!(results.show_report);
        assert_eq!(results.distance, None);
        assert_eq!(results.steps.len(), 1);
        assert_eq!(results.steps[0].key, "no_path_found");
        assert_eq!(results.steps[0].icon, Some(StepIcon::Error));
        assert_eq!(results.lines(), vec!["No path found"]);
    }

    #[test]
    fn step_keys_are_unique() {
        for (from, to, accessible) in [("GSD 101", "STE 110", false), ("GSD 101", "GSD 201", true), ("STE 110", "GSD", false)] {
            let results = directions(from, to, accessible);
            let keys: HashSet<&str> = results.steps.iter().map(|s| s.key.as_str()).collect();
            assert_eq!(keys.len(), results.steps.len(), "{from} -> {to}");
        }
    }

    #[test]
    fn counts_passed_hallways() {
        let text = "\
[FORMAT]
floor*=^(\\d).*$

[EDGES]
H1a|H1b:R:10:T
H1b|H1a:L:10:T,H1c:R:10:T,H1x:U:5:T
H1c|H1b:L:10:T,H1d:R:10:T,H1y:U:5:T
H1d|H1c:L:10:T
H1x|H1b:D:5:T
H1y|H1c:D:5:T
";
        let cache = NodeCache::new();
        let config = NavConfig::default();
        let graph = parse_graph("ABC", text, &cache, &config).unwrap();
        let path = find_shortest_path(
            &cache.get("BABC#H1a").unwrap(),
            &cache.get("BABC#H1y").unwrap(),
            &graph,
            &SearchOptions::new(false),
        )
        .unwrap();

        let graphs = HashMap::from([("ABC".to_owned(), graph)]);
        let catalog = Catalog::default();
        let steps = Narrator::new(&graphs, &catalog, &config).route_steps(&path);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].text(Language::En), "Turn down the 2nd hallway on your left");
        assert_eq!(steps[0].text(Language::Fr), "Prenez le 2e couloir sur votre gauche");
    }

    #[test]
    fn outdoor_ways() {
        let text = "\
[EDGES]
P1|P2:R:10:T
P2|T1:U:10:T
T1|T2:U:20:T
T2|P3:U:10:T
P3|P4:U:10:T

[NODES]
T1|0
T2|0

[STREETS]
0|Main Street,rue Main
";
        let cache = NodeCache::new();
        let config = NavConfig::default();
        let graph = parse_graph("OUT", text, &cache, &config).unwrap();
        let path = find_shortest_path(
            &cache.get("BOUT#P1").unwrap(),
            &cache.get("BOUT#P4").unwrap(),
            &graph,
            &SearchOptions::new(false),
        )
        .unwrap();

        let graphs = HashMap::from([("OUT".to_owned(), graph)]);
        let catalog = Catalog::default();
        let lines: Vec<String> = Narrator::new(&graphs, &catalog, &config)
            .route_steps(&path)
            .iter()
            .map(|s| s.text(Language::En).to_owned())
            .collect();
        assert_eq!(
            lines,
            vec![
                "Walk approximately 20m along the path, then turn left onto Main Street",
                "Walk approximately 50m along Main Street, then continue straight when it becomes the path",
                "Walk approximately 30m along the path",
            ]
        );
    }
}

#[cfg(test)]
mod route_turns {
    use std::collections::HashMap;

    use cg_core::{NavConfig, NodeCache};
    use cg_graph::parse_graph;
    use cg_route::{find_shortest_path, SearchOptions};

    use crate::{Catalog, Language, Narrator, StepIcon};

    /// Narrate the shortest route between two nodes of a single graph.
    fn narrate(building: &str, text: &str, from: &str, to: &str) -> Vec<(String, String, Option<StepIcon>)> {
        let cache = NodeCache::new();
        let config = NavConfig::default();
        let graph = parse_graph(building, text, &cache, &config).unwrap();
        let path = find_shortest_path(
            &cache.get(from).unwrap(),
            &cache.get(to).unwrap(),
            &graph,
            &SearchOptions::new(false),
        )
        .unwrap();

        let graphs = HashMap::from([(building.to_owned(), graph)]);
        let catalog = Catalog::default();
        Narrator::new(&graphs, &catalog, &config)
            .route_steps(&path)
            .into_iter()
            .map(|s| (s.text(Language::En).to_owned(), s.text(Language::Fr).to_owned(), s.icon))
            .collect()
    }

    #[test]
    fn down_then_right_in_a_hallway() {
        let text = "[EDGES]\nH1a|H1b:D:10:T\nH1b|H1c:R:10:T\n";
        let steps = narrate("ABC", text, "BABC#H1a", "BABC#H1c");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].0, "Walk to the end of the hall and turn left");
        assert_eq!(steps[0].1, "Marchez jusqu'au bout du couloir et tournez à gauche");
        assert_eq!(steps[0].2, Some(StepIcon::TurnLeft));
    }

    #[test]
    fn turn_just_before_an_intersection() {
        let text = "\
[EDGES]
P1|P2:R:10:T
P2|I1:U:10:T
I1|P3:U:10:T

[NODES]
I1|,,,
";
        let steps = narrate("OUT", text, "BOUT#P1", "BOUT#P3");
        let en: Vec<&str> = steps.iter().map(|s| s.0.as_str()).collect();
        assert_eq!(
            en,
            vec![
                "Walk approximately 20m along the path, then turn left",
                "Walk approximately 20m along the path",
                "Walk approximately 20m along the path",
            ]
        );
        assert_eq!(steps[0].1, "Marchez environ 20m le long de la voie, puis tournez à gauche");
        assert_eq!(steps[0].2, Some(StepIcon::TurnLeft));
    }
}

// ── Navigator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod navigator {
    use cg_graph::{GraphError, MemorySource};

    use super::helpers::{navigator, GSD};
    use crate::{Catalog, Destination, DirectionsError, Language, NavigatorBuilder};

    #[test]
    fn destinations() {
        let room: Destination = "GSD 101".parse().unwrap();
        assert_eq!(room, Destination::room("GSD", "101"));
        assert_eq!(room.raw_node_id(), "R101");
        assert_eq!(room.to_string(), "GSD 101");

        let building: Destination = "  STE ".parse().unwrap();
        assert_eq!(building.raw_node_id(), "D1");
        assert_eq!(building.to_string(), "STE");

        assert!("".parse::<Destination>().is_err());
        assert!("GSD 101 extra".parse::<Destination>().is_err());
    }

    #[test]
    fn missing_building_fails_the_request() {
        let err = navigator()
            .get_directions_between(&Destination::room("GSD", "101"), &Destination::room("MRT", "211"), false, Language::En)
            .unwrap_err();
        assert!(matches!(err, DirectionsError::Graph(GraphError::MissingResource { .. })));
    }

    #[test]
    fn only_needed_graphs_are_loaded() {
        // Without STE or OUT resources, a same-building request still works.
        let navigator = NavigatorBuilder::new(MemorySource::new().with("GSD", GSD)).build();
        let results = navigator
            .get_directions_between(&Destination::room("GSD", "101"), &Destination::room("GSD", "201"), false, Language::Fr)
            .unwrap();
        assert_eq!(results.language, Language::Fr);
        assert_eq!(results.lines()[0], "GSD 101");
        assert!(navigator.cache().len() > 0);
    }

    #[test]
    fn accessible_failure_uses_its_own_message() {
        let text = "[EDGES]\nD1|R101:U:5:F\nR101|D1:D:5:F\n";
        let navigator = NavigatorBuilder::new(MemorySource::new().with("ABC", text))
            .translator(Catalog::default().with(Language::En, "no_accessible_path_found", "Sorry, no step-free route"))
            .build();
        let start = Destination::new("ABC", None);
        let results = navigator
            .get_directions_between(&start, &Destination::room("ABC", "101"), true, Language::En)
            .unwrap();
        assert!(results.show_report);
        assert_eq!(results.steps[0].key, "no_accessible_path_found");
        assert_eq!(results.lines(), vec!["Sorry, no step-free route"]);
    }

    #[test]
    fn cache_can_be_cleared() {
        let mut navigator = navigator();
        navigator.graphs(["GSD"]).unwrap();
        assert!(!navigator.cache().is_empty());
        navigator.clear_cache();
        assert!(navigator.cache().is_empty());
    }
}
