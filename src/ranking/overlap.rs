//! Top-k overlap between a fresh ranking and a reference ranking file
//!
//! Compares the first k entries of a materialized [`RankedList`] against
//! the first k records of a reference file and reports the size of the
//! id-set intersection. Raw score-table iteration order is never
//! consulted; only post-sort rankings enter the comparison.

use super::RankedList;
use crate::error::Result;
use crate::types::Algorithm;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Overlap analyzer comparing top-k id sets
#[derive(Debug, Clone, Copy)]
pub struct OverlapAnalyzer {
    /// Number of leading entries consulted on each side
    pub top_k: usize,
}

impl Default for OverlapAnalyzer {
    fn default() -> Self {
        Self { top_k: 100 }
    }
}

impl OverlapAnalyzer {
    /// Create an analyzer with the default top-100 window
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison window
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Intersection size of the two top-k node-id sets
    ///
    /// Shorter inputs contribute what they have, so the count lies in
    /// `0..=top_k`.
    pub fn overlap(&self, fresh: &RankedList, reference: &Path) -> Result<usize> {
        let reference_entries = RankedList::read_reference(reference, self.top_k)?;

        let fresh_ids: FxHashSet<u64> = fresh.top(self.top_k).iter().map(|e| e.node).collect();
        let reference_ids: FxHashSet<u64> =
            reference_entries.iter().map(|e| e.node).collect();

        Ok(fresh_ids.intersection(&reference_ids).count())
    }
}

/// The three per-algorithm overlap counts of a comparison run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlapReport {
    pub closeness: usize,
    pub betweenness: usize,
    pub pagerank: usize,
}

impl OverlapReport {
    /// Count for a specific algorithm
    pub fn count(&self, algorithm: Algorithm) -> usize {
        match algorithm {
            Algorithm::Closeness => self.closeness,
            Algorithm::Betweenness => self.betweenness,
            Algorithm::PageRank => self.pagerank,
        }
    }
}

impl fmt::Display for OverlapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for algorithm in Algorithm::ALL {
            writeln!(
                f,
                "#overlaps for {}: {}",
                algorithm.label(),
                self.count(algorithm)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::CentralityScores;
    use crate::error::Error;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::csr::CsrGraph;

    fn ranked(pairs: &[(u64, f64)]) -> RankedList {
        let mut builder = GraphBuilder::new();
        for window in pairs.windows(2) {
            builder.add_edge(window[0].0, window[1].0);
        }
        let graph = CsrGraph::from_builder(&builder);
        let mut scores = vec![0.0; graph.node_count()];
        for &(id, score) in pairs {
            scores[graph.index_of(id).unwrap() as usize] = score;
        }
        RankedList::from_scores(&CentralityScores::new(scores), &graph)
    }

    #[test]
    fn test_overlap_with_itself() {
        let list = ranked(&[(0, 0.9), (1, 0.8), (2, 0.7), (3, 0.6)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.txt");
        list.write_to(&path).unwrap();

        let count = OverlapAnalyzer::new().overlap(&list, &path).unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_overlap_respects_window() {
        // Fresh top-2 is {3, 2}; reference file leads with {0, 1}.
        let fresh = ranked(&[(0, 0.1), (1, 0.2), (2, 0.3), (3, 0.4)]);
        let reference = ranked(&[(0, 0.9), (1, 0.8), (2, 0.7), (3, 0.6)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.txt");
        reference.write_to(&path).unwrap();

        let count = OverlapAnalyzer::new()
            .with_top_k(2)
            .overlap(&fresh, &path)
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_partial_overlap() {
        let fresh = ranked(&[(0, 0.9), (1, 0.8), (2, 0.7), (3, 0.6)]);
        let reference = ranked(&[(0, 0.9), (1, 0.8), (8, 0.7), (9, 0.6)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.txt");
        reference.write_to(&path).unwrap();

        let count = OverlapAnalyzer::new()
            .with_top_k(3)
            .overlap(&fresh, &path)
            .unwrap();
        assert_eq!(count, 2); // {0, 1}
    }

    #[test]
    fn test_missing_reference_propagates() {
        let fresh = ranked(&[(0, 0.9), (1, 0.8)]);
        let dir = tempfile::tempdir().unwrap();

        let err = OverlapAnalyzer::new()
            .overlap(&fresh, &dir.path().join("absent.txt"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingReferenceFile { .. }));
    }

    #[test]
    fn test_report_display() {
        let report = OverlapReport {
            closeness: 93,
            betweenness: 87,
            pagerank: 71,
        };
        let text = report.to_string();
        assert!(text.contains("#overlaps for Closeness Centrality: 93"));
        assert!(text.contains("#overlaps for Betweenness Centrality: 87"));
        assert!(text.contains("#overlaps for PageRank Centrality: 71"));
    }
}
