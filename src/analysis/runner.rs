//! Analysis runner — orchestrates engine execution and ranking flow.
//!
//! [`AnalysisPipeline`] drives a full run over one immutable [`CsrGraph`]:
//! each centrality engine computes its score table, the table is
//! materialized into a [`RankedList`], and the ranking is either persisted
//! under the output directory ([`AnalysisPipeline::generate`]) or compared
//! against a reference ranking file ([`AnalysisPipeline::compare`]).
//! An [`AnalysisObserver`] is notified at every stage boundary.

use crate::analysis::observer::{
    AnalysisObserver, StageClock, StageReport, StageReportBuilder, STAGE_BETWEENNESS,
    STAGE_CLOSENESS, STAGE_OVERLAP, STAGE_PAGERANK, STAGE_PERSIST, STAGE_RANK,
};
use crate::centrality::betweenness::BetweennessCentrality;
use crate::centrality::closeness::ClosenessCentrality;
use crate::centrality::pagerank::{BiasedPageRank, RestartVector};
use crate::centrality::CentralityScores;
use crate::error::Result;
use crate::graph::csr::CsrGraph;
use crate::ranking::overlap::{OverlapAnalyzer, OverlapReport};
use crate::ranking::RankedList;
use crate::types::{Algorithm, AnalysisConfig};
use std::fs;
use std::path::Path;

/// Enter a tracing span for an analysis stage (when the `tracing` feature
/// is enabled). When disabled, this is a no-op and the compiler eliminates
/// it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("analysis_stage", stage = $name).entered();
    };
}

/// The rankings produced by a generation run, in-memory alongside their
/// on-disk files
#[derive(Debug, Clone)]
pub struct GeneratedRankings {
    pub closeness: RankedList,
    pub betweenness: RankedList,
    pub pagerank: RankedList,
}

impl GeneratedRankings {
    /// Ranking for a specific algorithm
    pub fn ranking(&self, algorithm: Algorithm) -> &RankedList {
        match algorithm {
            Algorithm::Closeness => &self.closeness,
            Algorithm::Betweenness => &self.betweenness,
            Algorithm::PageRank => &self.pagerank,
        }
    }
}

/// Orchestrates centrality computation, ranking, persistence, and
/// comparison over one graph
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl AnalysisPipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute, rank, and persist all three centralities
    ///
    /// Writes `closeness.txt`, `betweenness.txt`, and `pagerank.txt` under
    /// `out_dir`, creating the directory if needed. Each file holds the
    /// full ranking in descending-score order.
    pub fn generate(
        &self,
        graph: &CsrGraph,
        out_dir: &Path,
        observer: &mut impl AnalysisObserver,
    ) -> Result<GeneratedRankings> {
        fs::create_dir_all(out_dir)?;

        Ok(GeneratedRankings {
            closeness: self.produce(graph, Algorithm::Closeness, out_dir, observer)?,
            betweenness: self.produce(graph, Algorithm::Betweenness, out_dir, observer)?,
            pagerank: self.produce(graph, Algorithm::PageRank, out_dir, observer)?,
        })
    }

    /// Recompute all three rankings and report top-k overlap against the
    /// reference ranking files under `reference_dir`
    pub fn compare(
        &self,
        graph: &CsrGraph,
        reference_dir: &Path,
        observer: &mut impl AnalysisObserver,
    ) -> Result<OverlapReport> {
        let analyzer = OverlapAnalyzer::new().with_top_k(self.config.top_k);

        Ok(OverlapReport {
            closeness: self.check(graph, Algorithm::Closeness, &analyzer, reference_dir, observer)?,
            betweenness: self.check(
                graph,
                Algorithm::Betweenness,
                &analyzer,
                reference_dir,
                observer,
            )?,
            pagerank: self.check(graph, Algorithm::PageRank, &analyzer, reference_dir, observer)?,
        })
    }

    /// Compute, rank, and persist one algorithm's ranking
    fn produce(
        &self,
        graph: &CsrGraph,
        algorithm: Algorithm,
        out_dir: &Path,
        observer: &mut impl AnalysisObserver,
    ) -> Result<RankedList> {
        let scores = self.compute(graph, algorithm, observer)?;
        let ranking = self.rank(graph, algorithm, &scores, observer);

        trace_stage!(STAGE_PERSIST);
        observer.on_stage_start(STAGE_PERSIST);
        let clock = StageClock::start();
        ranking.write_to(&out_dir.join(algorithm.file_name()))?;
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_PERSIST, &report);

        Ok(ranking)
    }

    /// Compute and rank one algorithm, then count its reference overlap
    fn check(
        &self,
        graph: &CsrGraph,
        algorithm: Algorithm,
        analyzer: &OverlapAnalyzer,
        reference_dir: &Path,
        observer: &mut impl AnalysisObserver,
    ) -> Result<usize> {
        let scores = self.compute(graph, algorithm, observer)?;
        let ranking = self.rank(graph, algorithm, &scores, observer);

        trace_stage!(STAGE_OVERLAP);
        observer.on_stage_start(STAGE_OVERLAP);
        let clock = StageClock::start();
        let count = analyzer.overlap(&ranking, &reference_dir.join(algorithm.file_name()))?;
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_OVERLAP, &report);
        observer.on_overlap(algorithm, count);

        Ok(count)
    }

    /// Run one engine, bracketed by observer notifications
    fn compute(
        &self,
        graph: &CsrGraph,
        algorithm: Algorithm,
        observer: &mut impl AnalysisObserver,
    ) -> Result<CentralityScores> {
        let stage = match algorithm {
            Algorithm::Closeness => STAGE_CLOSENESS,
            Algorithm::Betweenness => STAGE_BETWEENNESS,
            Algorithm::PageRank => STAGE_PAGERANK,
        };

        trace_stage!(stage);
        observer.on_stage_start(stage);
        let clock = StageClock::start();

        let mut convergence = None;
        let scores = match algorithm {
            Algorithm::Closeness => ClosenessCentrality::new().run(graph)?,
            Algorithm::Betweenness => BetweennessCentrality::new().run(graph),
            Algorithm::PageRank => {
                let restart = RestartVector::residue_class(
                    graph,
                    self.config.restart_modulus,
                    self.config.restart_residue,
                )?;
                let run = BiasedPageRank::new()
                    .with_damping(self.config.damping)
                    .with_max_iterations(self.config.max_iterations)
                    .run(graph, &restart)?;
                convergence = Some((run.iterations, run.residual));
                run.scores
            }
        };

        let mut builder = StageReportBuilder::new(clock.elapsed())
            .nodes(graph.node_count())
            .edges(graph.num_edges());
        if let Some((iterations, residual)) = convergence {
            builder = builder.iterations(iterations).residual(residual);
        }
        let report = builder.build();
        observer.on_stage_end(stage, &report);
        observer.on_scores(algorithm, &scores);

        Ok(scores)
    }

    /// Materialize a score table into a ranking, bracketed by observer
    /// notifications
    fn rank(
        &self,
        graph: &CsrGraph,
        algorithm: Algorithm,
        scores: &CentralityScores,
        observer: &mut impl AnalysisObserver,
    ) -> RankedList {
        trace_stage!(STAGE_RANK);
        observer.on_stage_start(STAGE_RANK);
        let clock = StageClock::start();
        let ranking = RankedList::from_scores(scores, graph);
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_RANK, &report);
        observer.on_ranking(algorithm, &ranking);
        ranking
    }
}
