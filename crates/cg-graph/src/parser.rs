//! Line-oriented graph resource parser.
//!
//! # Resource format
//!
//! ```text
//! [FORMAT]
//! floor1=^(1).*$
//! [EDGES]
//! H1h1|H1h2:R:10:T
//! H1h2|H1h1:L:10:T,H1h3:R:10:T,R101:U:5:F
//! [NODES]
//! D1|310,227
//! [EXCLUDED]
//! H1h2|H1h3
//! [STREETS]
//! 0|King Edward Avenue,Avenue King Edward
//! [CAMPUS]
//! main
//! ```
//!
//! Trailing whitespace is stripped from every line.  A line that starts with
//! `[` switches section; blank lines are ignored; every other line is parsed
//! by the current section.  Any line that does not
//! fit its section's grammar fails the whole graph with
//! [`GraphError::Parse`] naming the line and section.
//!
//! Parsing is a fold of a [`GraphAccumulator`] over the lines, so each
//! section's grammar lives in one method.

use std::fmt;

use cg_core::{Coordinate, CoreError, NavConfig, NodeCache, NodeRef, NodeType};

use crate::{Edge, EdgeDirection, Graph, GraphError, GraphResult, StreetName};

/// Separates a node id from its payload.
const FIELD_SEPARATOR: char = '|';
/// Separates the quadruples of an edge list.
const EDGE_SEPARATOR: char = ',';
/// Separates the fields of one edge quadruple.
const EDGE_FIELD_SEPARATOR: char = ':';

// ── ParseState ────────────────────────────────────────────────────────────────

/// Section currently being parsed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParseState {
    None,
    Format,
    Edges,
    Nodes,
    Excluded,
    Streets,
    Campus,
}

impl ParseState {
    /// Section selected by a header line, if it names a known section.
    pub fn from_header(line: &str) -> Option<ParseState> {
        match line {
            "[FORMAT]" => Some(ParseState::Format),
            "[EDGES]" => Some(ParseState::Edges),
            "[NODES]" => Some(ParseState::Nodes),
            "[EXCLUDED]" => Some(ParseState::Excluded),
            "[STREETS]" => Some(ParseState::Streets),
            "[CAMPUS]" => Some(ParseState::Campus),
            _ => None,
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            ParseState::None => "no section",
            ParseState::Format => "[FORMAT]",
            ParseState::Edges => "[EDGES]",
            ParseState::Nodes => "[NODES]",
            ParseState::Excluded => "[EXCLUDED]",
            ParseState::Streets => "[STREETS]",
            ParseState::Campus => "[CAMPUS]",
        }
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Parse the resource text of `building` into a [`Graph`].
///
/// Node ids are resolved through `cache`, so graphs parsed with the same
/// cache share node handles.  The graph is treated as the outdoor graph when
/// `building` equals `config.outdoor_building`; only then are door payloads
/// parsed as `x,y` coordinates.
pub fn parse_graph(
    building: &str,
    text:     &str,
    cache:    &NodeCache,
    config:   &NavConfig,
) -> GraphResult<Graph> {
    let start = GraphAccumulator::new(building, cache, config);
    let done = text
        .lines()
        .enumerate()
        .try_fold(start, |mut acc, (index, line)| {
            acc.feed(index + 1, line)?;
            Ok::<_, GraphError>(acc)
        })?;

    let graph = done.finish();
    tracing::debug!(
        building = %graph.building,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        exits = graph.exits.len(),
        "parsed graph"
    );
    Ok(graph)
}

// ── Accumulator ───────────────────────────────────────────────────────────────

/// Parser state threaded through the fold: the graph built so far, the
/// current section and the line being parsed.
struct GraphAccumulator<'a> {
    graph:       Graph,
    cache:       &'a NodeCache,
    outdoor:     bool,
    state:       ParseState,
    line_number: usize,
    line:        &'a str,
}

impl<'a> GraphAccumulator<'a> {
    fn new(building: &str, cache: &'a NodeCache, config: &NavConfig) -> Self {
        Self {
            graph:       Graph::new(building, &config.default_campus),
            cache,
            outdoor:     building == config.outdoor_building,
            state:       ParseState::None,
            line_number: 0,
            line:        "",
        }
    }

    fn finish(self) -> Graph {
        self.graph
    }

    fn feed(&mut self, line_number: usize, raw: &'a str) -> GraphResult<()> {
        let line = raw.trim_end();
        self.line_number = line_number;
        self.line = line;

        if line.trim().is_empty() {
            return Ok(());
        }

        if line.starts_with('[') {
            self.state = ParseState::from_header(line)
                .ok_or_else(|| self.error("unknown section header"))?;
            return Ok(());
        }

        match self.state {
            ParseState::None => Err(self.error("data line outside of any section")),
            ParseState::Format => self.format_rule(line),
            ParseState::Edges => self.edges(line),
            ParseState::Nodes => self.node(line),
            ParseState::Excluded => self.exclusion(line),
            ParseState::Streets => self.street(line),
            ParseState::Campus => self.campus(line),
        }
    }

    // ── Sections ──────────────────────────────────────────────────────────

    /// `key=value`
    fn format_rule(&mut self, line: &str) -> GraphResult<()> {
        let (key, value) = line
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| self.error("expected key=value"))?;
        let line_number = self.line_number;
        let building = self.graph.building.clone();
        self.graph
            .formatting_rules
            .set(key, value)
            .map_err(|source| GraphError::Node { building, line_number, source })
    }

    /// `nodeId|target:direction:distance:accessible{,...}`
    fn edges(&mut self, line: &str) -> GraphResult<()> {
        let [id, list] = self.fields(line)?;
        let source = self.node_ref(id)?;

        let mut parsed = Vec::new();
        for quad in list.split(EDGE_SEPARATOR) {
            parsed.push(self.edge(quad)?);
        }

        if source.node_type() == NodeType::Door {
            self.graph.exits.entry(NodeRef::clone(&source)).or_insert(Coordinate::ORIGIN);
        }
        self.graph.adjacencies.entry(source).or_default().extend(parsed);
        Ok(())
    }

    fn edge(&self, quad: &str) -> GraphResult<Edge> {
        let parts: Vec<&str> = quad.split(EDGE_FIELD_SEPARATOR).collect();
        let [target, direction, distance, accessible] = parts[..] else {
            return Err(self.error(format!("edge {quad:?} must have 4 fields")));
        };

        let direction = EdgeDirection::from_code(direction)
            .ok_or_else(|| self.error(format!("invalid edge direction {direction:?}")))?;
        let distance = distance
            .parse::<u32>()
            .map_err(|_| self.error(format!("invalid edge distance {distance:?}")))?;
        let accessible = match accessible {
            "T" => true,
            "F" => false,
            other => return Err(self.error(format!("invalid accessibility flag {other:?}"))),
        };

        Ok(Edge { node: self.node_ref(target)?, direction, distance, accessible })
    }

    /// `nodeId|payload`
    fn node(&mut self, line: &str) -> GraphResult<()> {
        let [id, payload] = self.fields(line)?;
        let node = self.node_ref(id)?;

        match node.node_type() {
            NodeType::Intersection => {
                self.graph.intersections.insert(node, payload.to_owned());
            }
            NodeType::Street => {
                self.graph.streets.insert(node, payload.to_owned());
            }
            NodeType::Door if self.outdoor => {
                let position = self.coordinate(payload)?;
                self.graph.exits.insert(node, position);
            }
            NodeType::Door => {
                self.graph.exits.entry(node).or_insert(Coordinate::ORIGIN);
            }
            _ => {}
        }
        Ok(())
    }

    /// `nodeIdA|nodeIdB`, recorded in both directions.
    fn exclusion(&mut self, line: &str) -> GraphResult<()> {
        let [a, b] = self.fields(line)?;
        let a = self.node_ref(a)?;
        let b = self.node_ref(b)?;
        self.graph.excluded.entry(NodeRef::clone(&a)).or_default().insert(NodeRef::clone(&b));
        self.graph.excluded.entry(b).or_default().insert(a);
        Ok(())
    }

    /// `streetId|englishName,frenchName`
    fn street(&mut self, line: &str) -> GraphResult<()> {
        let [id, names] = self.fields(line)?;
        let (en, fr) = names
            .split_once(',')
            .filter(|(_, fr)| !fr.contains(','))
            .ok_or_else(|| self.error("expected englishName,frenchName"))?;
        self.graph.street_names.insert(
            id.trim().to_owned(),
            StreetName { en: en.trim().to_owned(), fr: fr.trim().to_owned() },
        );
        Ok(())
    }

    /// A single bare token.
    fn campus(&mut self, line: &str) -> GraphResult<()> {
        let token = line.trim();
        if token.contains(FIELD_SEPARATOR) || token.contains(char::is_whitespace) {
            return Err(self.error("expected a single campus token"));
        }
        self.graph.campus = token.to_owned();
        Ok(())
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Split a `left|right` line into exactly two non-empty fields.
    fn fields<'l>(&self, line: &'l str) -> GraphResult<[&'l str; 2]> {
        let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        match parts[..] {
            [left, right] if !left.is_empty() && !right.is_empty() => Ok([left, right]),
            _ => Err(self.error(format!(
                "expected 2 fields separated by '{FIELD_SEPARATOR}', found {}",
                parts.len()
            ))),
        }
    }

    fn coordinate(&self, payload: &str) -> GraphResult<Coordinate> {
        let parsed = payload
            .split_once(',')
            .and_then(|(x, y)| Some(Coordinate::new(x.trim().parse().ok()?, y.trim().parse().ok()?)));
        parsed.ok_or_else(|| self.error(format!("invalid door coordinate {payload:?}")))
    }

    fn node_ref(&self, id: &str) -> GraphResult<NodeRef> {
        self.cache
            .get_or_build(id.trim(), &self.graph.building, &self.graph.formatting_rules)
            .map_err(|source: CoreError| GraphError::Node {
                building:    self.graph.building.clone(),
                line_number: self.line_number,
                source,
            })
    }

    fn error(&self, reason: impl Into<String>) -> GraphError {
        GraphError::Parse {
            building:    self.graph.building.clone(),
            line_number: self.line_number,
            line:        self.line.to_owned(),
            state:       self.state,
            reason:      reason.into(),
        }
    }
}
