//! Analysis modes.
//!
//! The [`Analyzer`] decides which views of an alignment are handed to the
//! [`StatisticsEngine`]:
//!
//! - **whole**: one unit, the full alignment, plus the allele partition
//! - **pairwise**: one unit per unordered pair of rows, each with its own
//!   gap filtering
//! - **window**: one unit per window over the globally gap-free columns
//! - **window + pairwise**: a pairwise diversity matrix per window
//!
//! Pairs and windows are independent and are evaluated in parallel; results
//! are collected in input order.

use divstat_align::{Alignment, AlignmentView, SiteFilter};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::bundle::{AnalysisOutput, PairwiseMatrix, StatisticBundle, WindowMatrix, WindowRecord};
use crate::config::{AnalysisConfig, AnalysisMode, Statistic, WindowSpec};
use crate::constants::CoalescentConstants;
use crate::engine::StatisticsEngine;
use crate::errors::AnalysisError;
use crate::partition::AllelePartition;

/// Start offsets of every full window over `len` columns.
///
/// Yields `floor((len - width) / step) + 1` offsets when `len >= width` and
/// none otherwise; trailing partial windows are dropped.
pub fn window_starts(len: usize, width: usize, step: usize) -> impl Iterator<Item = usize> {
    let last = len.checked_sub(width);
    (0..=last.unwrap_or(0))
        .step_by(step.max(1))
        .filter(move |_| last.is_some())
}

/// Unordered row pairs `(i, j)` with `j < i`, in row-major order.
pub fn row_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|i| (0..i).map(move |j| (i, j))).collect()
}

/// Runs the configured analysis mode over alignments.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    filter: SiteFilter,
}

impl Analyzer {
    /// Validate `config` and build an analyzer for it.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let filter = SiteFilter::new(config.gap);
        Ok(Self { config, filter })
    }

    #[inline]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse one alignment under the configured mode.
    pub fn analyze(&self, alignment: &Alignment) -> Result<AnalysisOutput, AnalysisError> {
        let n = alignment.n_rows();
        if n < 2 {
            return Err(AnalysisError::TooFewSequences(n));
        }

        info!(
            sequences = n,
            width = alignment.width(),
            mode = ?self.config.mode,
            "analysing alignment"
        );

        let output = match self.config.mode {
            AnalysisMode::Whole => AnalysisOutput::Whole(Box::new(self.whole(alignment))),
            AnalysisMode::Pairwise => AnalysisOutput::Pairwise(self.pairwise(&alignment.view())),
            AnalysisMode::Window(spec) => AnalysisOutput::Window(self.windows(alignment, spec)?),
            AnalysisMode::WindowPairwise(spec) => {
                AnalysisOutput::WindowPairwise(self.window_pairwise(alignment, spec)?)
            }
        };
        Ok(output)
    }

    /// Full statistic bundle for the whole alignment.
    pub fn whole(&self, alignment: &Alignment) -> StatisticBundle {
        let view = alignment.view();
        let constants = CoalescentConstants::new(view.n_rows());
        let sites = self.filter.partition(&view);

        let estimates = StatisticsEngine::new(&constants).estimate(&sites, None);
        let partition = AllelePartition::from_sites(&sites.segregating, estimates.theta_w);

        if estimates.segregating_sites == 0 {
            debug!("no segregating sites");
        }

        StatisticBundle::new(
            self.config.label.clone(),
            alignment.width(),
            estimates,
            partition,
        )
    }

    /// Pairwise diversity between every two rows of `view`.
    ///
    /// Each pair is filtered for gaps on its own, so different pairs may use
    /// different columns.
    pub fn pairwise(&self, view: &AlignmentView<'_>) -> PairwiseMatrix {
        let constants = CoalescentConstants::new(2);
        let engine = StatisticsEngine::new(&constants);
        let normalization = self.config.normalization;
        let pairs = row_pairs(view.n_rows());

        let values: Vec<f64> = pairs
            .par_iter()
            .map(|&(i, j)| {
                let pair = view.restrict(Some(&[j, i]), None);
                let sites = self.filter.partition(&pair);
                engine.statistic(&sites, Statistic::Diversity, normalization)
            })
            .collect();

        debug!(pairs = values.len(), "pairwise diversity computed");

        let mut values = values.into_iter();
        let matrix = (0..view.n_rows())
            .map(|i| values.by_ref().take(i).collect())
            .collect();

        PairwiseMatrix {
            ids: view.ids().map(str::to_string).collect(),
            values: matrix,
        }
    }

    /// Sliding-window values of `spec.statistic` over the gap-free columns.
    pub fn windows(
        &self,
        alignment: &Alignment,
        spec: WindowSpec,
    ) -> Result<Vec<WindowRecord>, AnalysisError> {
        let view = alignment.view();
        let gap_free = view.restrict(None, Some(&self.filter.gap_free_columns(&view)));
        let constants = CoalescentConstants::new(view.n_rows());
        let engine = StatisticsEngine::new(&constants);
        let normalization = self.config.normalization;

        let starts: Vec<usize> = window_starts(gap_free.width(), spec.width, spec.step).collect();
        info!(
            gap_free = gap_free.width(),
            windows = starts.len(),
            window = %spec,
            "sliding windows"
        );

        starts
            .par_iter()
            .map(|&start| {
                let window = cut_window(&gap_free, start, spec.width)?;
                let sites = self.filter.partition(&window);
                let value = engine.statistic(&sites, spec.statistic, normalization);
                let (first, last) = bounds(&window);
                Ok(WindowRecord::new(first, last, value))
            })
            .collect()
    }

    /// Pairwise diversity matrices, one per window.
    pub fn window_pairwise(
        &self,
        alignment: &Alignment,
        spec: WindowSpec,
    ) -> Result<Vec<WindowMatrix>, AnalysisError> {
        let view = alignment.view();
        let gap_free = view.restrict(None, Some(&self.filter.gap_free_columns(&view)));

        let starts: Vec<usize> = window_starts(gap_free.width(), spec.width, spec.step).collect();
        info!(
            gap_free = gap_free.width(),
            windows = starts.len(),
            window = %spec,
            "pairwise sliding windows"
        );

        starts
            .iter()
            .map(|&start| {
                let window = cut_window(&gap_free, start, spec.width)?;
                let (first_column, last_column) = bounds(&window);
                let matrix = self.pairwise(&window);
                Ok(WindowMatrix {
                    first_column,
                    last_column,
                    midpoint: (first_column + last_column) as f64 / 2.0,
                    matrix,
                })
            })
            .collect()
    }
}

/// Columns `start..start + width` of an already gap-free view.
fn cut_window<'a>(
    gap_free: &AlignmentView<'a>,
    start: usize,
    width: usize,
) -> Result<AlignmentView<'a>, AnalysisError> {
    let end = (start + width).min(gap_free.width());
    let columns: Vec<usize> = (start..end).collect();
    if columns.len() != width {
        return Err(AnalysisError::WindowWidthMismatch {
            start,
            expected: width,
            found: columns.len(),
        });
    }
    Ok(gap_free.restrict(None, Some(&columns)))
}

/// First and last alignment columns of a non-empty window.
fn bounds(window: &AlignmentView<'_>) -> (usize, usize) {
    let columns = window.column_indices();
    match (columns.first(), columns.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (0, 0),
    }
}
