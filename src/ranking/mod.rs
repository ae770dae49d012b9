//! Ranking materialization and persistence
//!
//! A [`RankedList`] is a score table sorted descending, with a documented
//! deterministic tie-break: equal scores order by ascending external node
//! id. Ranking files hold one `"<id> <score>"` record per line with the
//! score fixed to six decimals; writes go to a temporary file that is
//! renamed into place, so a failed run never leaves a truncated file.

pub mod overlap;

use crate::centrality::CentralityScores;
use crate::error::{Error, Result};
use crate::graph::csr::CsrGraph;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// One record of a ranking: an external node id and its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry {
    pub node: u64,
    pub score: f64,
}

/// A score table materialized into descending order
#[derive(Debug, Clone, PartialEq)]
pub struct RankedList {
    entries: Vec<RankedEntry>,
}

impl RankedList {
    /// Materialize a score table, mapping node indices back to external ids
    ///
    /// Sorted by score descending; ties order by ascending node id.
    pub fn from_scores(scores: &CentralityScores, graph: &CsrGraph) -> Self {
        let mut entries: Vec<RankedEntry> = scores
            .iter()
            .map(|(index, score)| RankedEntry {
                node: graph.ext_id(index),
                score,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.node.cmp(&b.node))
        });

        Self { entries }
    }

    /// All entries in rank order
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// The first `k` entries (or all of them, if fewer)
    pub fn top(&self, k: usize) -> &[RankedEntry] {
        &self.entries[..k.min(self.entries.len())]
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the list as a ranking file
    ///
    /// Records are written to `<path>.tmp` and renamed over `path` once
    /// complete.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("tmp");

        let result: Result<()> = (|| {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            for entry in &self.entries {
                writeln!(writer, "{} {:.6}", entry.node, entry.score)?;
            }
            writer.flush()?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                fs::rename(&tmp, path)?;
                Ok(())
            }
            Err(err) => {
                let _ = fs::remove_file(&tmp);
                Err(err)
            }
        }
    }

    /// Read the first `limit` records of a reference ranking file
    ///
    /// Each line's first whitespace-separated token is the node id, the
    /// second the score.
    pub fn read_reference(path: &Path, limit: usize) -> Result<Vec<RankedEntry>> {
        let file = File::open(path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                Error::MissingReferenceFile {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io(err)
            }
        })?;

        let mut entries = Vec::with_capacity(limit);
        for (line_idx, line) in BufReader::new(file).lines().enumerate() {
            if entries.len() >= limit {
                break;
            }
            let line = line?;

            let malformed = || Error::MalformedReferenceRecord {
                path: path.to_path_buf(),
                line: line_idx + 1,
            };

            let mut fields = line.split_whitespace();
            let node = fields
                .next()
                .and_then(|t| t.parse::<u64>().ok())
                .ok_or_else(malformed)?;
            let score = fields
                .next()
                .and_then(|t| t.parse::<f64>().ok())
                .ok_or_else(malformed)?;

            entries.push(RankedEntry { node, score });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn graph_and_scores(pairs: &[(u64, f64)]) -> (CsrGraph, CentralityScores) {
        let mut builder = GraphBuilder::new();
        for window in pairs.windows(2) {
            builder.add_edge(window[0].0, window[1].0);
        }
        let graph = CsrGraph::from_builder(&builder);
        let mut scores = vec![0.0; graph.node_count()];
        for &(id, score) in pairs {
            scores[graph.index_of(id).unwrap() as usize] = score;
        }
        (graph, CentralityScores::new(scores))
    }

    #[test]
    fn test_sort_descending() {
        let (graph, scores) = graph_and_scores(&[(0, 0.2), (1, 0.9), (2, 0.5)]);
        let ranked = RankedList::from_scores(&scores, &graph);

        let ids: Vec<u64> = ranked.entries().iter().map(|e| e.node).collect();
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn test_tie_break_is_ascending_node_id() {
        let (graph, scores) = graph_and_scores(&[(30, 0.5), (10, 0.5), (20, 0.5), (5, 0.9)]);
        let ranked = RankedList::from_scores(&scores, &graph);

        let ids: Vec<u64> = ranked.entries().iter().map(|e| e.node).collect();
        assert_eq!(ids, vec![5, 10, 20, 30]);
    }

    #[test]
    fn test_top_clamps_to_len() {
        let (graph, scores) = graph_and_scores(&[(0, 0.1), (1, 0.2)]);
        let ranked = RankedList::from_scores(&scores, &graph);

        assert_eq!(ranked.top(100).len(), 2);
        assert_eq!(ranked.top(1).len(), 1);
        assert_eq!(ranked.top(1)[0].node, 1);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (graph, scores) = graph_and_scores(&[(3, 0.123456789), (7, 0.75), (11, 0.5)]);
        let ranked = RankedList::from_scores(&scores, &graph);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.txt");
        ranked.write_to(&path).unwrap();

        let back = RankedList::read_reference(&path, 100).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[0].node, 7);
        assert_eq!(back[1].node, 11);
        // Scores survive to the serialized precision.
        assert_eq!(back[2].node, 3);
        assert!((back[2].score - 0.123457).abs() < 1e-12);

        // No temp file left behind.
        assert!(!dir.path().join("ranking.tmp").exists());
    }

    #[test]
    fn test_read_reference_honors_limit() {
        let (graph, scores) =
            graph_and_scores(&[(0, 0.5), (1, 0.4), (2, 0.3), (3, 0.2), (4, 0.1)]);
        let ranked = RankedList::from_scores(&scores, &graph);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.txt");
        ranked.write_to(&path).unwrap();

        let back = RankedList::read_reference(&path, 2).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].node, 0);
        assert_eq!(back[1].node, 1);
    }

    #[test]
    fn test_missing_reference_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RankedList::read_reference(&dir.path().join("absent.txt"), 100).unwrap_err();
        assert!(matches!(err, Error::MissingReferenceFile { .. }));
    }

    #[test]
    fn test_malformed_reference_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.txt");
        fs::write(&path, "12 0.500000\nnot-a-node 0.25\n").unwrap();

        let err = RankedList::read_reference(&path, 100).unwrap_err();
        match err {
            Error::MalformedReferenceRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_record_missing_score_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.txt");
        fs::write(&path, "12\n").unwrap();

        assert!(RankedList::read_reference(&path, 100).is_err());
    }
}
