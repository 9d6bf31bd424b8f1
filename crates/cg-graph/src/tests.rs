//! Unit tests for cg-graph.
//!
//! The sample campus under `data/` (GSD, STE and the outdoor graph) is the
//! main fixture; small inline resources cover the error paths.

#[cfg(test)]
mod helpers {
    use cg_core::{NavConfig, NodeCache, NodeRef};

    use crate::{parse_graph, Graph, MemorySource};

    pub const GSD: &str = include_str!("../../../data/GSD_graph.txt");
    pub const STE: &str = include_str!("../../../data/STE_graph.txt");
    pub const OUT: &str = include_str!("../../../data/OUT_graph.txt");

    pub fn campus() -> MemorySource {
        MemorySource::new().with("GSD", GSD).with("STE", STE).with("OUT", OUT)
    }

    pub fn parse(building: &str, text: &str) -> (Graph, NodeCache) {
        let cache = NodeCache::new();
        let graph = parse_graph(building, text, &cache, &NavConfig::default()).unwrap();
        (graph, cache)
    }

    pub fn node(cache: &NodeCache, id: &str) -> NodeRef {
        cache.get(id).unwrap_or_else(|| panic!("{id} not cached"))
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod parse {
    use cg_core::{Coordinate, NodeType};

    use super::helpers::{node, parse, GSD, OUT};
    use crate::EdgeDirection;

    #[test]
    fn building_graph_shape() {
        let (graph, cache) = parse("GSD", GSD);
        assert_eq!(graph.building, "GSD");
        assert_eq!(graph.campus, "main");
        assert_eq!(graph.node_count(), 11);
        assert_eq!(graph.edge_count(), 22);

        let h1h2 = node(&cache, "BGSD#H1h2");
        let edges = graph.edges(&h1h2);
        let targets: Vec<&str> = edges.iter().map(|e| e.node.id()).collect();
        assert_eq!(targets, vec!["BGSD#H1h1", "BGSD#H1h3", "BGSD#H1h4", "BGSD#R101"]);
        assert_eq!(edges[3].direction, EdgeDirection::Up);
        assert_eq!(edges[3].distance, 60);
        assert!(edges[3].accessible);
    }

    #[test]
    fn edge_attributes() {
        let (graph, cache) = parse("GSD", GSD);
        let stairs = node(&cache, "BGSD#SB");
        let edge = graph.edge_between(&stairs, &node(&cache, "BGSD#H2h8")).unwrap();
        assert_eq!(edge.direction, EdgeDirection::Left);
        assert_eq!(edge.distance, 80);
        assert!(!edge.accessible);
        assert_eq!(stairs.node_type(), NodeType::Stairs);
    }

    #[test]
    fn floors_from_format_rules() {
        let (graph, cache) = parse("GSD", GSD);
        assert_eq!(graph.formatting_rules.len(), 2);
        assert_eq!(node(&cache, "BGSD#H2h8").floor(), Some("2"));
        assert_eq!(node(&cache, "BGSD#R101").floor_number(), Some(1));
        assert_eq!(node(&cache, "BGSD#EA").floor(), None);
    }

    #[test]
    fn indoor_doors_are_exits() {
        let (graph, cache) = parse("GSD", GSD);
        assert_eq!(graph.exits.len(), 1);
        assert_eq!(graph.exits[&node(&cache, "BGSD#D1")], Coordinate::ORIGIN);
    }

    #[test]
    fn outdoor_doors_carry_coordinates() {
        let (graph, cache) = parse("OUT", OUT);
        assert_eq!(graph.exits.len(), 3);
        assert_eq!(graph.exits[&node(&cache, "BSTE#D1")], Coordinate::new(310.0, 227.0));
        assert_eq!(graph.exits[&node(&cache, "BGSD#D1")], Coordinate::new(100.0, 100.0));

        // Doors keep the building of their qualified id.
        assert_eq!(node(&cache, "BSTE#D2").building(), "STE");
        assert_eq!(node(&cache, "BOUT#T1").building(), "OUT");
    }

    #[test]
    fn streets_and_intersections() {
        let (graph, cache) = parse("OUT", OUT);
        let t1 = node(&cache, "BOUT#T1");
        assert_eq!(graph.street_name(&t1).unwrap().en, "King Edward Avenue");
        assert_eq!(graph.street_name(&t1).unwrap().fr, "avenue King Edward");

        let i1 = node(&cache, "BOUT#I1");
        assert_eq!(graph.crossed_street(&i1, EdgeDirection::Right).unwrap().en, "Laurier Avenue");
        assert!(graph.crossed_street(&i1, EdgeDirection::Left).is_none());
        assert!(graph.street_name(&node(&cache, "BOUT#P1")).is_none());
    }

    #[test]
    fn exclusions_are_symmetric() {
        let text = "\
[EDGES]
H1h1|H1h2:R:10:T
H1h2|H1h1:L:10:T,H1h3:R:10:T
H1h3|H1h2:L:10:T

[EXCLUDED]
H1h2|H1h3
";
        let (graph, cache) = parse("GSD", text);
        let h2 = node(&cache, "BGSD#H1h2");
        let h3 = node(&cache, "BGSD#H1h3");
        assert!(graph.is_excluded(&h2, &h3));
        assert!(graph.is_excluded(&h3, &h2));
        assert!(!graph.is_excluded(&h2, &node(&cache, "BGSD#H1h1")));
    }

    #[test]
    fn campus_defaults_and_overrides() {
        let (graph, _) = parse("GSD", "[EDGES]\nH1h1|H1h2:R:1:T\n");
        assert_eq!(graph.campus, "main");
        let (graph, _) = parse("LEES", "[CAMPUS]\nlees\n");
        assert_eq!(graph.campus, "lees");
    }

    #[test]
    fn blank_lines_and_crlf() {
        let (graph, _) = parse("GSD", "\r\n[EDGES]\r\nH1h1|H1h2:R:1:T\r\n\r\n");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn trailing_whitespace_is_ignored() {
        let text = "[FORMAT]\nfloor1=^(1).*$ \n[EDGES] \nH1h1|H1h2:R:10:T \t\nH1h2|H1h1:L:10:F  \n";
        let (graph, cache) = parse("GSD", text);
        assert_eq!(graph.formatting_rules.get("floor1"), Some("^(1).*$"));
        assert_eq!(node(&cache, "BGSD#H1h1").floor(), Some("1"));
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edges(&node(&cache, "BGSD#H1h1"))[0].accessible);
        assert!(!graph.edges(&node(&cache, "BGSD#H1h2"))[0].accessible);
    }

    #[test]
    fn edge_lists_preserve_resource_order() {
        let (graph, cache) = parse("OUT", OUT);
        let p2 = node(&cache, "BOUT#P2");
        let order: Vec<&str> = graph.edges(&p2).iter().map(|e| e.node.name()).collect();
        assert_eq!(order, vec!["1", "1", "3"]);
        assert_eq!(graph.edges(&p2)[1].node.node_type(), NodeType::OutdoorSteps);
    }
}

// ── Parse errors ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use cg_core::{CoreError, NavConfig, NodeCache};

    use crate::{parse_graph, GraphError, ParseState};

    fn parse_err(text: &str) -> GraphError {
        parse_graph("GSD", text, &NodeCache::new(), &NavConfig::default()).unwrap_err()
    }

    #[test]
    fn edge_needs_four_fields() {
        let err = parse_err("[EDGES]\nH1h1|H1h2:R:10\n");
        match err {
            GraphError::Parse { line_number, state, .. } => {
                assert_eq!(line_number, 2);
                assert_eq!(state, ParseState::Edges);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn invalid_direction() {
        assert!(matches!(parse_err("[EDGES]\nH1h1|H1h2:N:10:T\n"), GraphError::Parse { .. }));
    }

    #[test]
    fn invalid_distance_and_flag() {
        assert!(matches!(parse_err("[EDGES]\nH1h1|H1h2:R:-3:T\n"), GraphError::Parse { .. }));
        assert!(matches!(parse_err("[EDGES]\nH1h1|H1h2:R:3:Y\n"), GraphError::Parse { .. }));
    }

    #[test]
    fn missing_payload() {
        assert!(matches!(parse_err("[EDGES]\nH1h1|\n"), GraphError::Parse { .. }));
        assert!(matches!(parse_err("[EXCLUDED]\nH1h1|H1h2|H1h3\n"), GraphError::Parse { .. }));
    }

    #[test]
    fn unknown_section() {
        let err = parse_err("[WALLS]\n");
        assert!(err.to_string().contains("unknown section header"));
    }

    #[test]
    fn data_before_any_section() {
        match parse_err("H1h1|H1h2:R:10:T\n") {
            GraphError::Parse { state, .. } => assert_eq!(state, ParseState::None),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn malformed_node_id() {
        let err = parse_err("[EDGES]\nX1|H1h2:R:10:T\n");
        assert!(matches!(err.as_core(), Some(CoreError::MalformedNodeId { .. })));
    }

    #[test]
    fn invalid_floor_rule() {
        let err = parse_err("[FORMAT]\nfloor1=([\n");
        assert!(matches!(err.as_core(), Some(CoreError::InvalidFloorRule { .. })));
    }

    #[test]
    fn bad_outdoor_coordinate() {
        let err = parse_graph("OUT", "[NODES]\nBGSD#D1|100\n", &NodeCache::new(), &NavConfig::default())
            .unwrap_err();
        assert!(matches!(err, GraphError::Parse { state: ParseState::Nodes, .. }));
    }

    #[test]
    fn street_needs_two_names() {
        assert!(matches!(parse_err("[STREETS]\n0|King Edward\n"), GraphError::Parse { .. }));
    }

    #[test]
    fn campus_is_one_token() {
        assert!(matches!(parse_err("[CAMPUS]\nmain campus\n"), GraphError::Parse { .. }));
    }
}

// ── Sources & loading ─────────────────────────────────────────────────────────

#[cfg(test)]
mod loading {
    use std::io::Write;
    use std::sync::Arc;

    use cg_core::{NavConfig, NodeCache};

    use super::helpers::{campus, GSD};
    use crate::{
        doors_for_buildings, get_graphs, load_graph, load_graph_file, load_graph_reader,
        resource_name, DirectorySource, GraphError, GraphSource, MemorySource,
    };

    #[test]
    fn resource_names() {
        assert_eq!(resource_name("GSD"), "/GSD_graph.txt");
        assert_eq!(resource_name(" S/TE "), "/STE_graph.txt");
    }

    #[test]
    fn memory_source_missing_building() {
        let err = MemorySource::new().fetch("GSD").unwrap_err();
        assert!(matches!(err, GraphError::MissingResource { .. }));
    }

    #[test]
    fn get_graphs_loads_requested_buildings() {
        let cache = NodeCache::new();
        let graphs = get_graphs(&campus(), ["GSD", "OUT", "GSD"], &cache, &NavConfig::default()).unwrap();
        let mut keys: Vec<&str> = graphs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["GSD", "OUT"]);
    }

    #[test]
    fn graphs_share_door_handles() {
        let cache = NodeCache::new();
        let graphs = get_graphs(&campus(), ["GSD", "OUT"], &cache, &NavConfig::default()).unwrap();
        let indoor = graphs["GSD"].exits.keys().next().unwrap();
        let outdoor = graphs["OUT"].exits.keys().find(|d| d.id() == "BGSD#D1").unwrap();
        assert!(Arc::ptr_eq(indoor, outdoor));
    }

    #[test]
    fn one_failure_fails_the_request() {
        let cache = NodeCache::new();
        let source = campus().with("BAD", "[EDGES]\nnonsense\n");
        let err = get_graphs(&source, ["GSD", "BAD"], &cache, &NavConfig::default()).unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));

        let err = get_graphs(&source, ["GSD", "MRT"], &cache, &NavConfig::default()).unwrap_err();
        assert!(matches!(err, GraphError::MissingResource { ref building, .. } if building == "MRT"));
    }

    #[test]
    fn directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("GSD_graph.txt")).unwrap();
        file.write_all(GSD.as_bytes()).unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.root(), dir.path());
        let graph = load_graph(&source, "GSD", &NodeCache::new(), &NavConfig::default()).unwrap();
        assert_eq!(graph.node_count(), 11);

        let err = source.fetch("STE").unwrap_err();
        assert!(matches!(err, GraphError::MissingResource { .. }));
    }

    #[test]
    fn file_and_reader_loaders() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GSD.as_bytes()).unwrap();
        let config = NavConfig::default();

        let from_file = load_graph_file(file.path(), "GSD", &NodeCache::new(), &config).unwrap();
        let from_reader = load_graph_reader(GSD.as_bytes(), "GSD", &NodeCache::new(), &config).unwrap();
        assert_eq!(from_file.edge_count(), from_reader.edge_count());

        let missing = load_graph_file(&file.path().with_extension("nope"), "GSD", &NodeCache::new(), &config);
        assert!(matches!(missing, Err(GraphError::Io { .. })));
    }

    #[test]
    fn doors_by_building() {
        let cache = NodeCache::new();
        let graphs = get_graphs(&campus(), ["OUT"], &cache, &NavConfig::default()).unwrap();
        let doors = doors_for_buildings(&graphs["OUT"], ["STE", "LMX"]);
        assert_eq!(doors.len(), 1);
        let mut ids: Vec<&str> = doors["STE"].iter().map(|d| d.id()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["BSTE#D1", "BSTE#D2"]);
    }
}
