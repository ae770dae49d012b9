//! Error types for centrality analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for graph loading, centrality computation, and ranking I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// An edge-list line could not be parsed into a pair of node ids.
    #[error("malformed edge-list input at line {line}: {reason}")]
    MalformedGraphInput { line: usize, reason: String },

    /// A node's total shortest-path distance is zero, leaving closeness
    /// centrality undefined for it.
    #[error("closeness centrality undefined for node {node}: zero total shortest-path distance")]
    DegenerateCentrality { node: u64 },

    /// A restart vector could not be formed into a probability distribution.
    #[error("degenerate restart vector: {reason}")]
    DegenerateRestart { reason: String },

    /// Power iteration failed to meet the convergence tolerance within the
    /// iteration cap.
    #[error("power iteration did not converge within {iterations} iterations")]
    DivergentIteration { iterations: usize },

    /// A reference ranking file does not exist.
    #[error("reference ranking file not found: {}", path.display())]
    MissingReferenceFile { path: PathBuf },

    /// A reference ranking record could not be parsed.
    #[error("malformed ranking record at {}:{line}", path.display())]
    MalformedReferenceRecord { path: PathBuf, line: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for centrality operations.
pub type Result<T> = std::result::Result<T, Error>;
