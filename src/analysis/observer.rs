//! Analysis observer — hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! engine logic. Use cases include timing stages, capturing intermediate
//! score tables, and emitting structured telemetry.

use crate::centrality::CentralityScores;
use crate::ranking::RankedList;
use crate::types::Algorithm;
use std::time::{Duration, Instant};

/// Closeness computation stage.
pub const STAGE_CLOSENESS: &str = "closeness";
/// Betweenness computation stage.
pub const STAGE_BETWEENNESS: &str = "betweenness";
/// PageRank computation stage.
pub const STAGE_PAGERANK: &str = "pagerank";
/// Ranking materialization stage (runs once per algorithm).
pub const STAGE_RANK: &str = "rank";
/// Ranking persistence stage (runs once per algorithm).
pub const STAGE_PERSIST: &str = "persist";
/// Overlap comparison stage (runs once per algorithm).
pub const STAGE_OVERLAP: &str = "overlap";

/// Wall-clock timer for one stage
#[derive(Debug)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    /// Start timing
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Elapsed time since start
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Metrics reported at the end of a stage
#[derive(Debug, Clone, Copy)]
pub struct StageReport {
    elapsed: Duration,
    nodes: Option<usize>,
    edges: Option<usize>,
    iterations: Option<usize>,
    residual: Option<f64>,
}

impl StageReport {
    /// A report carrying only elapsed time
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            nodes: None,
            edges: None,
            iterations: None,
            residual: None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    pub fn edges(&self) -> Option<usize> {
        self.edges
    }

    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn residual(&self) -> Option<f64> {
        self.residual
    }
}

/// Builder for reports carrying per-stage metrics
#[derive(Debug)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.report.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks fired at stage boundaries of an analysis run
///
/// All methods have empty default bodies; implement only what you need.
pub trait AnalysisObserver {
    /// A stage is about to run.
    fn on_stage_start(&mut self, stage: &'static str) {
        let _ = stage;
    }

    /// A stage finished, with its metrics.
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        let _ = (stage, report);
    }

    /// An engine produced its score table.
    fn on_scores(&mut self, algorithm: Algorithm, scores: &CentralityScores) {
        let _ = (algorithm, scores);
    }

    /// A ranking was materialized.
    fn on_ranking(&mut self, algorithm: Algorithm, ranking: &RankedList) {
        let _ = (algorithm, ranking);
    }

    /// An overlap count was computed.
    fn on_overlap(&mut self, algorithm: Algorithm, count: usize) {
        let _ = (algorithm, count);
    }
}

/// Observer that ignores every callback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Observer that records every stage report in order
#[derive(Debug, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded (stage, report) pairs in execution order
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }
}

impl AnalysisObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder_fields() {
        let report = StageReportBuilder::new(Duration::from_millis(5))
            .nodes(10)
            .edges(20)
            .iterations(7)
            .residual(1e-9)
            .build();

        assert_eq!(report.nodes(), Some(10));
        assert_eq!(report.edges(), Some(20));
        assert_eq!(report.iterations(), Some(7));
        assert_eq!(report.residual(), Some(1e-9));
        assert_eq!(report.elapsed(), Duration::from_millis(5));
    }

    #[test]
    fn test_bare_report_has_no_metrics() {
        let report = StageReport::new(Duration::ZERO);
        assert_eq!(report.nodes(), None);
        assert_eq!(report.iterations(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_CLOSENESS, &StageReport::new(Duration::ZERO));
        obs.on_stage_end(STAGE_RANK, &StageReport::new(Duration::ZERO));

        let stages: Vec<&str> = obs.reports().iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, vec![STAGE_CLOSENESS, STAGE_RANK]);
    }
}
