//! Where graph resources come from.
//!
//! The engine never decides how a building's resource is fetched; it asks a
//! [`GraphSource`] for the text of `/{BUILDING}_graph.txt`.  Two sources are
//! provided: one reading a directory on disk and one backed by an in-memory
//! map (tests, embedded campuses).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{GraphError, GraphResult};

/// Resource name of a building's graph: `/{BUILDING}_graph.txt`, with
/// whitespace and `/` removed from the building code.
pub fn resource_name(building: &str) -> String {
    let code: String = building
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .collect();
    format!("/{code}_graph.txt")
}

/// Fetches the raw text resource of a building graph.
///
/// Implementations must be `Send + Sync` so that the graphs of one request
/// can be fetched concurrently (feature `parallel`).
pub trait GraphSource: Send + Sync {
    /// Return the resource text for `building`.
    fn fetch(&self, building: &str) -> GraphResult<String>;
}

// ── DirectorySource ───────────────────────────────────────────────────────────

/// Reads `{root}/{BUILDING}_graph.txt` from disk.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl GraphSource for DirectorySource {
    fn fetch(&self, building: &str) -> GraphResult<String> {
        let resource = resource_name(building);
        let path = self.root.join(resource.trim_start_matches('/'));
        std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => GraphError::MissingResource {
                building: building.to_owned(),
                resource: path.display().to_string(),
            },
            _ => GraphError::Io { resource: path.display().to_string(), source },
        })
    }
}

// ── MemorySource ──────────────────────────────────────────────────────────────

/// Graph resources held in memory, keyed by resource name.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    resources: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the resource text of `building`.
    pub fn insert(&mut self, building: &str, text: impl Into<String>) {
        self.resources.insert(resource_name(building), text.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, building: &str, text: impl Into<String>) -> Self {
        self.insert(building, text);
        self
    }
}

impl GraphSource for MemorySource {
    fn fetch(&self, building: &str) -> GraphResult<String> {
        let resource = resource_name(building);
        self.resources
            .get(&resource)
            .cloned()
            .ok_or(GraphError::MissingResource { building: building.to_owned(), resource })
    }
}
