//! Personalized PageRank with a biased restart vector
//!
//! Damped power iteration where the teleport mass returns to a restricted
//! subset of nodes (the restart vector) instead of uniformly to all nodes:
//!
//! ```text
//! score'(u) = α · Σ_{v ∈ N(u)} score(v)/degree(v) + (1-α) · d(u)
//! ```
//!
//! The vector is renormalized to sum 1 after every sweep, and iteration
//! stops once the squared L2 norm of successive iterates drops to
//! [`CONVERGENCE_TOLERANCE`]. The starting vector is the restart vector
//! itself. Exhausting the iteration cap is an error, not a silent stop.

use super::CentralityScores;
use crate::error::{Error, Result};
use crate::graph::csr::CsrGraph;

/// Squared-L2 convergence tolerance of the power iteration. Fixed by the
/// ranking contract; not configurable.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-8;

/// A teleport distribution over the graph's nodes
///
/// Weights are non-negative and sum to 1. Constructed over dense node
/// indices; each constructor normalizes and rejects zero total mass.
#[derive(Debug, Clone, PartialEq)]
pub struct RestartVector {
    weights: Vec<f64>,
}

impl RestartVector {
    /// Build from raw per-node weights, normalizing to sum 1
    pub fn from_weights(mut weights: Vec<f64>) -> Result<Self> {
        if weights.iter().any(|&w| w < 0.0 || !w.is_finite()) {
            return Err(Error::DegenerateRestart {
                reason: "weights must be finite and non-negative".into(),
            });
        }
        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(Error::DegenerateRestart {
                reason: "total mass is zero".into(),
            });
        }
        for w in &mut weights {
            *w /= sum;
        }
        Ok(Self { weights })
    }

    /// Uniform mass over nodes whose external id satisfies
    /// `id % modulus == residue`; zero elsewhere
    pub fn residue_class(graph: &CsrGraph, modulus: u64, residue: u64) -> Result<Self> {
        if modulus == 0 {
            return Err(Error::DegenerateRestart {
                reason: "modulus must be positive".into(),
            });
        }
        let weights: Vec<f64> = graph
            .node_ids()
            .map(|id| if id % modulus == residue { 1.0 } else { 0.0 })
            .collect();
        Self::from_weights(weights).map_err(|_| Error::DegenerateRestart {
            reason: format!("no node has id % {modulus} == {residue}"),
        })
    }

    /// All mass on a single node
    pub fn concentrated(graph: &CsrGraph, ext_id: u64) -> Result<Self> {
        let index = graph.index_of(ext_id).ok_or_else(|| Error::DegenerateRestart {
            reason: format!("node {ext_id} not in graph"),
        })?;
        let mut weights = vec![0.0; graph.node_count()];
        weights[index as usize] = 1.0;
        Ok(Self { weights })
    }

    /// Per-node weights, indexed by dense node index
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Result of a converged power iteration
#[derive(Debug, Clone)]
pub struct PageRankRun {
    /// Scores for each node, summing to 1
    pub scores: CentralityScores,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Final squared-L2 difference between successive iterates
    pub residual: f64,
}

/// Personalized PageRank engine
#[derive(Debug, Clone)]
pub struct BiasedPageRank {
    /// Damping factor (probability of following an edge)
    pub damping: f64,
    /// Iteration cap; exceeding it yields [`Error::DivergentIteration`]
    pub max_iterations: usize,
}

impl Default for BiasedPageRank {
    fn default() -> Self {
        Self {
            damping: 0.8,
            max_iterations: 1000,
        }
    }
}

impl BiasedPageRank {
    /// Create a new engine with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run the power iteration, starting from the restart vector
    pub fn run(&self, graph: &CsrGraph, restart: &RestartVector) -> Result<PageRankRun> {
        self.run_from(graph, restart, restart.weights().to_vec())
    }

    /// Run the power iteration from an explicit starting vector
    ///
    /// The fixed point depends on the restart vector only; exposing the
    /// starting vector lets callers verify that.
    pub fn run_from(
        &self,
        graph: &CsrGraph,
        restart: &RestartVector,
        initial: Vec<f64>,
    ) -> Result<PageRankRun> {
        let n = graph.node_count();
        if restart.len() != n || initial.len() != n {
            return Err(Error::DegenerateRestart {
                reason: format!(
                    "vector length {} does not match graph size {n}",
                    restart.len()
                ),
            });
        }
        if n == 0 {
            return Ok(PageRankRun {
                scores: CentralityScores::new(Vec::new()),
                iterations: 0,
                residual: 0.0,
            });
        }

        let d = restart.weights();
        let mut scores = initial;
        let mut next = vec![0.0_f64; n];

        for iteration in 1..=self.max_iterations {
            for u in 0..n as u32 {
                // Any v in a neighbor list has degree >= 1 (edge symmetry),
                // so the division never sees a degree-0 node. Degree-0
                // nodes themselves are absorbing: no edge term, restart
                // share only.
                let mut t = 0.0;
                for &v in graph.neighbors(u) {
                    t += scores[v as usize] / graph.degree(v) as f64;
                }
                next[u as usize] = self.damping * t + (1.0 - self.damping) * d[u as usize];
            }

            // Renormalize to a probability vector. The restart term keeps
            // at least (1-α) of the mass, so the sum is positive.
            let sum: f64 = next.iter().sum();
            for x in &mut next {
                *x /= sum;
            }

            let residual: f64 = scores
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new) * (old - new))
                .sum();

            std::mem::swap(&mut scores, &mut next);

            if residual <= CONVERGENCE_TOLERANCE {
                return Ok(PageRankRun {
                    scores: CentralityScores::new(scores),
                    iterations: iteration,
                    residual,
                });
            }
        }

        Err(Error::DivergentIteration {
            iterations: self.max_iterations,
        })
    }
}
