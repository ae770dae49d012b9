//! Closeness centrality via all-pairs BFS
//!
//! For each node `u`, a breadth-first traversal sums the unweighted
//! shortest-path distances to every reachable node; the score is
//! `(N-1) / sum`. On a disconnected graph the sum covers only the
//! reachable part, so an isolated node has sum 0 and no defined score —
//! that case is reported as an error instead of dividing.
//!
//! Complexity is O(V·(V+E)): one BFS per source. Sources are independent
//! and run in parallel.

use super::CentralityScores;
use crate::error::{Error, Result};
use crate::graph::csr::CsrGraph;
use rayon::prelude::*;
use std::collections::VecDeque;

/// Closeness centrality engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosenessCentrality;

impl ClosenessCentrality {
    /// Create a new closeness engine
    pub fn new() -> Self {
        Self
    }

    /// Compute closeness centrality for all nodes
    ///
    /// Returns [`Error::DegenerateCentrality`] for the first node whose
    /// total shortest-path distance is zero (an isolated node, or any node
    /// of a single-node graph).
    pub fn run(&self, graph: &CsrGraph) -> Result<CentralityScores> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(CentralityScores::new(Vec::new()));
        }

        let scores = (0..n as u32)
            .into_par_iter()
            .map(|source| {
                let sum = bfs_distance_sum(graph, source);
                if sum == 0 {
                    return Err(Error::DegenerateCentrality {
                        node: graph.ext_id(source),
                    });
                }
                Ok((n as f64 - 1.0) / sum as f64)
            })
            .collect::<Result<Vec<f64>>>()?;

        Ok(CentralityScores::new(scores))
    }
}

/// Sum of BFS distances from `source` to every reachable node.
fn bfs_distance_sum(graph: &CsrGraph, source: u32) -> u64 {
    let n = graph.node_count();
    let mut dist = vec![-1_i64; n];
    dist[source as usize] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    let mut sum = 0_u64;

    while let Some(v) = queue.pop_front() {
        let next = dist[v as usize] + 1;
        for &w in graph.neighbors(v) {
            if dist[w as usize] < 0 {
                dist[w as usize] = next;
                sum += next as u64;
                queue.push_back(w);
            }
        }
    }

    sum
}
