//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is exactly what
//! the BFS passes and PageRank power iteration need. The graph is
//! immutable for the lifetime of an analysis run.

use super::builder::GraphBuilder;
use rustc_hash::FxHashMap;

/// A graph in Compressed Sparse Row format
///
/// CSR stores edges contiguously, making iteration over neighbors very
/// fast. Node ids are dense `u32` indices; the external ids from the input
/// edge list are kept in a side table. The edge relation is symmetric:
/// every undirected edge appears in both endpoints' neighbor slices.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    num_nodes: usize,
    /// Row pointers: node i's neighbors are at indices row_ptr[i]..row_ptr[i+1]
    row_ptr: Vec<usize>,
    /// Column indices (neighbor nodes) for each edge
    col_idx: Vec<u32>,
    /// Degree of each node
    degree: Vec<u32>,
    /// External id for each node index
    ext_ids: Vec<u64>,
    /// Maps external id -> node index
    ext_to_index: FxHashMap<u64, u32>,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut degree = Vec::with_capacity(num_nodes);
        let mut ext_ids = Vec::with_capacity(num_nodes);
        let mut ext_to_index =
            FxHashMap::with_capacity_and_hasher(num_nodes, Default::default());

        row_ptr.push(0);

        for (index, node) in builder.nodes() {
            ext_ids.push(node.ext_id);
            ext_to_index.insert(node.ext_id, index);

            // Collect and sort neighbors for deterministic iteration
            let mut neighbors: Vec<u32> = node.neighbors.iter().copied().collect();
            neighbors.sort_unstable();

            degree.push(neighbors.len() as u32);
            col_idx.extend_from_slice(&neighbors);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            degree,
            ext_ids,
            ext_to_index,
        }
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.num_nodes
    }

    /// Neighbors of a node, sorted ascending
    pub fn neighbors(&self, node: u32) -> &[u32] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.col_idx[start..end]
    }

    /// Degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.degree[node as usize]
    }

    /// External id of a node index
    pub fn ext_id(&self, node: u32) -> u64 {
        self.ext_ids[node as usize]
    }

    /// Node index of an external id
    pub fn index_of(&self, ext_id: u64) -> Option<u32> {
        self.ext_to_index.get(&ext_id).copied()
    }

    /// Iterate over external node ids in index order
    pub fn node_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ext_ids.iter().copied()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Total number of edges (each undirected edge stored twice internally)
    pub fn num_edges(&self) -> usize {
        self.col_idx.len() / 2
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            degree: Vec::new(),
            ext_ids: Vec::new(),
            ext_to_index: FxHashMap::default(),
        }
    }
}
