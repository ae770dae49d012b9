//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) node interning and edge deduplication during construction.

use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::BufRead;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// External node id as it appeared in the input
    pub ext_id: u64,
    /// Adjacency set of dense node indices
    pub neighbors: FxHashSet<u32>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(ext_id: u64) -> Self {
        Self {
            ext_id,
            neighbors: FxHashSet::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
///
/// External node ids are interned to dense `u32` indices in first-seen
/// order. The graph is undirected: every edge is stored in both adjacency
/// sets, self-loops are skipped, and parallel edges collapse into one.
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps external node id -> dense index
    id_to_index: FxHashMap<u64, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            id_to_index: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            id_to_index: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given external id, returning its index
    pub fn add_node(&mut self, ext_id: u64) -> u32 {
        if let Some(&index) = self.id_to_index.get(&ext_id) {
            return index;
        }

        let index = self.nodes.len() as u32;
        self.id_to_index.insert(ext_id, index);
        self.nodes.push(BuilderNode::new(ext_id));
        index
    }

    /// Add an undirected edge between two external node ids
    ///
    /// Missing endpoints are created. Self-loops are skipped; repeated
    /// edges have no effect.
    pub fn add_edge(&mut self, u: u64, v: u64) {
        if u == v {
            return; // No self-loops
        }

        let ui = self.add_node(u);
        let vi = self.add_node(v);

        // Store in both directions (undirected graph)
        self.nodes[ui as usize].neighbors.insert(vi);
        self.nodes[vi as usize].neighbors.insert(ui);
    }

    /// Build a graph from an edge-list reader
    ///
    /// Expects one undirected edge per line as two whitespace-separated
    /// non-negative integers. Blank lines and lines starting with `#` are
    /// skipped.
    pub fn from_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = Self::new();

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let (u, v) = match (fields.next(), fields.next()) {
                (Some(u), Some(v)) => (u, v),
                _ => {
                    return Err(Error::MalformedGraphInput {
                        line: line_idx + 1,
                        reason: format!("expected two node ids, got {trimmed:?}"),
                    })
                }
            };

            let parse = |token: &str| {
                token.parse::<u64>().map_err(|_| Error::MalformedGraphInput {
                    line: line_idx + 1,
                    reason: format!("invalid node id {token:?}"),
                })
            };

            builder.add_edge(parse(u)?, parse(v)?);
        }

        Ok(builder)
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Get a node by index
    pub fn get_node(&self, index: u32) -> Option<&BuilderNode> {
        self.nodes.get(index as usize)
    }

    /// Get a node index by external id
    pub fn index_of(&self, ext_id: u64) -> Option<u32> {
        self.id_to_index.get(&ext_id).copied()
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let a = builder.add_node(10);
        let b = builder.add_node(20);
        let c = builder.add_node(10); // duplicate

        assert_eq!(a, c); // Same external id should get same index
        assert_ne!(a, b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_edge_deduplication() {
        let mut builder = GraphBuilder::new();

        builder.add_edge(1, 2);
        builder.add_edge(1, 2);
        builder.add_edge(2, 1);

        assert_eq!(builder.edge_count(), 1);
        let a = builder.index_of(1).unwrap();
        let b = builder.index_of(2).unwrap();
        assert!(builder.get_node(a).unwrap().neighbors.contains(&b));
        assert!(builder.get_node(b).unwrap().neighbors.contains(&a));
    }

    #[test]
    fn test_self_loops_skipped() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(7, 7);

        // The endpoint is not even created.
        assert_eq!(builder.node_count(), 0);
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_from_edge_list() {
        let input = "0 1\n1 2\n\n# a comment\n2 3\n3 0\n";
        let builder = GraphBuilder::from_edge_list(Cursor::new(input)).unwrap();

        assert_eq!(builder.node_count(), 4);
        assert_eq!(builder.edge_count(), 4);
        // Indices follow first appearance in the input.
        assert_eq!(builder.index_of(0), Some(0));
        assert_eq!(builder.index_of(3), Some(3));
    }

    #[test]
    fn test_from_edge_list_extra_fields_ignored() {
        // SNAP-style edge lists may carry trailing columns.
        let input = "0 1 extra\n1 2\n";
        let builder = GraphBuilder::from_edge_list(Cursor::new(input)).unwrap();
        assert_eq!(builder.edge_count(), 2);
    }

    #[test]
    fn test_from_edge_list_missing_endpoint() {
        let err = GraphBuilder::from_edge_list(Cursor::new("0 1\n2\n")).unwrap_err();
        match err {
            Error::MalformedGraphInput { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_edge_list_bad_id() {
        let err = GraphBuilder::from_edge_list(Cursor::new("0 x\n")).unwrap_err();
        match err {
            Error::MalformedGraphInput { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
