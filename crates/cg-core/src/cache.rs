//! Session-scoped node cache.
//!
//! Every graph loaded for a navigation session resolves ids through one
//! `NodeCache`, so the outdoor graph and a building graph hand out the same
//! [`NodeRef`] for a shared door.  The cache is append-only and safe to share
//! by reference between concurrent graph loads: inserts go through
//! `DashMap::entry`, so the first node built for an id wins and later
//! builders receive that same handle.

use std::sync::Arc;

use dashmap::DashMap;

use crate::{build_id, CoreResult, FormattingRules, Node, NodeRef};

#[derive(Debug, Default)]
pub struct NodeCache {
    nodes: DashMap<String, NodeRef>,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached node for `(raw_id, building)`, building and caching
    /// it on first use.
    ///
    /// # Errors
    ///
    /// Propagates [`CoreError::MalformedNodeId`](crate::CoreError) from
    /// [`Node::new`]; nothing is cached in that case.
    pub fn get_or_build(
        &self,
        raw_id:   &str,
        building: &str,
        rules:    &FormattingRules,
    ) -> CoreResult<NodeRef> {
        let id = build_id(raw_id, building);
        if let Some(node) = self.get(&id) {
            return Ok(node);
        }

        let node = Arc::new(Node::new(raw_id, building, rules)?);
        tracing::trace!(id = %node, kind = ?node.node_type(), floor = ?node.floor(), "cached node");
        Ok(Arc::clone(self.nodes.entry(id).or_insert(node).value()))
    }

    /// Look up a node by qualified id.
    pub fn get(&self, id: &str) -> Option<NodeRef> {
        self.nodes.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every cached node.  Handles already given out stay valid.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
