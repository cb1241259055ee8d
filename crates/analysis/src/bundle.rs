//! Result records handed to the output layer.

use serde::Serialize;

use crate::engine::{Estimates, StandardErrors};
use crate::partition::AllelePartition;

/// Full set of statistics for one whole-alignment analysis unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticBundle {
    pub label: Option<String>,
    /// Sample size `n`.
    pub sample_size: usize,
    /// Distinct alleles `k`.
    pub allele_count: usize,
    pub heterozygosity: f64,
    pub expected_allele_count: f64,
    pub partition_probability: f64,
    /// Alignment width including gapped columns.
    pub total_length: usize,
    /// Gap-free sites `L`.
    pub gap_free_length: usize,
    /// Segregating sites `S`.
    pub segregating_sites: usize,
    /// `s = S / L`.
    pub segregating_fraction: f64,
    pub theta_w: f64,
    pub theta_w_per_site: f64,
    pub theta_w_se: StandardErrors,
    pub pi_total: f64,
    pub pi: f64,
    pub pi_se: StandardErrors,
    pub tajima_d: f64,
    pub fu_li_d_star: Option<f64>,
    pub fu_li_f_star: Option<f64>,
}

impl StatisticBundle {
    pub fn new(
        label: Option<String>,
        total_length: usize,
        estimates: Estimates,
        partition: AllelePartition,
    ) -> Self {
        let segregating_fraction = if estimates.gap_free_length == 0 {
            0.0
        } else {
            estimates.segregating_sites as f64 / estimates.gap_free_length as f64
        };

        Self {
            label,
            sample_size: estimates.sample_size,
            allele_count: partition.allele_count,
            heterozygosity: partition.heterozygosity,
            expected_allele_count: partition.expected_allele_count,
            partition_probability: partition.partition_probability,
            total_length,
            gap_free_length: estimates.gap_free_length,
            segregating_sites: estimates.segregating_sites,
            segregating_fraction,
            theta_w: estimates.theta_w,
            theta_w_per_site: estimates.theta_w_per_site,
            theta_w_se: estimates.theta_w_se,
            pi_total: estimates.pi_total,
            pi: estimates.pi,
            pi_se: estimates.pi_se,
            tajima_d: estimates.tajima_d,
            fu_li_d_star: estimates.fu_li_d_star,
            fu_li_f_star: estimates.fu_li_f_star,
        }
    }
}

/// One sliding-window value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowRecord {
    /// First alignment column of the window (0-based).
    pub first_column: usize,
    /// Last alignment column of the window (0-based, inclusive).
    pub last_column: usize,
    pub midpoint: f64,
    pub value: f64,
}

impl WindowRecord {
    pub fn new(first_column: usize, last_column: usize, value: f64) -> Self {
        Self {
            first_column,
            last_column,
            midpoint: (first_column + last_column) as f64 / 2.0,
            value,
        }
    }
}

/// Lower-triangular matrix of pairwise diversities.
///
/// Row `i` holds the values for pairs `(i, j)` with `j < i`, so row 0 is
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseMatrix {
    pub ids: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl PairwiseMatrix {
    /// Value for an unordered pair of distinct rows.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let (hi, lo) = if i > j { (i, j) } else { (j, i) };
        if hi == lo {
            return None;
        }
        self.values.get(hi).and_then(|row| row.get(lo)).copied()
    }

    /// Number of pairs stored.
    pub fn n_pairs(&self) -> usize {
        self.values.iter().map(Vec::len).sum()
    }
}

/// Pairwise diversities restricted to one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowMatrix {
    pub first_column: usize,
    pub last_column: usize,
    pub midpoint: f64,
    pub matrix: PairwiseMatrix,
}

/// Result of analysing one alignment under the configured mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "result")]
pub enum AnalysisOutput {
    Whole(Box<StatisticBundle>),
    Pairwise(PairwiseMatrix),
    Window(Vec<WindowRecord>),
    WindowPairwise(Vec<WindowMatrix>),
}
