//! Core configuration types shared across the analysis pipeline.

use serde::{Deserialize, Serialize};

/// The three centrality algorithms and their output channels.
///
/// Each variant maps to one ranking file under the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Closeness,
    Betweenness,
    PageRank,
}

impl Algorithm {
    /// All algorithms in pipeline execution order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Closeness,
        Algorithm::Betweenness,
        Algorithm::PageRank,
    ];

    /// File name of this algorithm's ranking file.
    pub fn file_name(self) -> &'static str {
        match self {
            Algorithm::Closeness => "closeness.txt",
            Algorithm::Betweenness => "betweenness.txt",
            Algorithm::PageRank => "pagerank.txt",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Closeness => "Closeness Centrality",
            Algorithm::Betweenness => "Betweenness Centrality",
            Algorithm::PageRank => "PageRank Centrality",
        }
    }
}

/// Configuration for an analysis run.
///
/// The PageRank convergence tolerance is deliberately not configurable; see
/// [`crate::centrality::pagerank::CONVERGENCE_TOLERANCE`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// PageRank damping factor (probability of following an edge rather
    /// than teleporting via the restart vector).
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// PageRank iteration cap. Exceeding it is an error, not a silent stop.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Number of top-ranked nodes consulted by the overlap comparison.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Modulus of the restart partition predicate.
    #[serde(default = "default_restart_modulus")]
    pub restart_modulus: u64,

    /// Residue selecting the restart subset: nodes with
    /// `id % restart_modulus == restart_residue` share the teleport mass.
    #[serde(default)]
    pub restart_residue: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            top_k: default_top_k(),
            restart_modulus: default_restart_modulus(),
            restart_residue: 0,
        }
    }
}

fn default_damping() -> f64 {
    0.8
}

fn default_max_iterations() -> usize {
    1000
}

fn default_top_k() -> usize {
    100
}

fn default_restart_modulus() -> u64 {
    4
}
