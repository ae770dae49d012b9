//! # rapid-centrality
//!
//! Node-centrality rankings over static, undirected, unweighted graphs:
//! closeness centrality via all-pairs BFS, betweenness centrality via
//! Brandes' algorithm, and a personalized (biased-restart) PageRank
//! computed by power iteration — plus ranking persistence and top-k
//! overlap comparison against reference rankings.
//!
//! # Quick start
//!
//! ```
//! use rapid_centrality::analysis::observer::NoopObserver;
//! use rapid_centrality::analysis::runner::AnalysisPipeline;
//! use rapid_centrality::graph::builder::GraphBuilder;
//! use rapid_centrality::graph::csr::CsrGraph;
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_edge(0, 1);
//! builder.add_edge(1, 2);
//! builder.add_edge(2, 3);
//! builder.add_edge(3, 0);
//! let graph = CsrGraph::from_builder(&builder);
//!
//! let out = std::env::temp_dir().join("rapid-centrality-doc");
//! let pipeline = AnalysisPipeline::default();
//! let rankings = pipeline.generate(&graph, &out, &mut NoopObserver).unwrap();
//! assert_eq!(rankings.closeness.len(), 4);
//! ```
//!
//! The graph is immutable once built; the three engines consume it
//! read-only and independently. Rankings sort descending by score with
//! ties broken by ascending node id, and are persisted as plain
//! `"<id> <score>"` text records with six-decimal scores.

pub mod analysis;
pub mod centrality;
pub mod error;
pub mod graph;
pub mod ranking;
pub mod types;

pub use analysis::observer::{AnalysisObserver, NoopObserver, StageTimingObserver};
pub use analysis::runner::{AnalysisPipeline, GeneratedRankings};
pub use centrality::betweenness::BetweennessCentrality;
pub use centrality::closeness::ClosenessCentrality;
pub use centrality::pagerank::{BiasedPageRank, PageRankRun, RestartVector};
pub use centrality::CentralityScores;
pub use error::{Error, Result};
pub use graph::builder::GraphBuilder;
pub use graph::csr::CsrGraph;
pub use ranking::overlap::{OverlapAnalyzer, OverlapReport};
pub use ranking::{RankedEntry, RankedList};
pub use types::{Algorithm, AnalysisConfig};
