//! Allele (haplotype) partition of a sample.
//!
//! Sequences restricted to the segregating sites are grouped into allele
//! classes of identical strings. The class sizes feed the heterozygosity and
//! the infinite-alleles predictions of Ewens (1972) and Karlin & McGregor
//! (1972).

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;

use divstat_align::AlignmentView;
use serde::Serialize;

/// Allele configuration summary for one alignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllelePartition {
    /// Number of distinct alleles `k`.
    pub allele_count: usize,
    /// `H = 1 - sum (m/n)^2` over allele multiplicities.
    pub heterozygosity: f64,
    /// `E[k]` under the Ewens sampling formula.
    pub expected_allele_count: f64,
    /// Probability of the observed partition under the Ewens sampling formula.
    pub partition_probability: f64,
}

impl AllelePartition {
    /// Summarise the alleles of `segregating` given the Watterson estimate
    /// `theta_w` (absolute, not per site).
    pub fn from_sites(segregating: &AlignmentView<'_>, theta_w: f64) -> Self {
        let n = segregating.n_rows();
        let sizes: Vec<usize> = allele_configuration(segregating).into_values().collect();

        Self {
            allele_count: sizes.len(),
            heterozygosity: heterozygosity(&sizes, n),
            expected_allele_count: expected_allele_count(theta_w, n),
            partition_probability: partition_probability(theta_w, n, &sizes),
        }
    }
}

/// Map each distinct row string to its multiplicity.
pub fn allele_configuration(view: &AlignmentView<'_>) -> HashMap<Vec<u8>, usize> {
    let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
    for row in 0..view.n_rows() {
        *counts.entry(view.row(row)).or_insert(0) += 1;
    }
    counts
}

/// `1 - sum (m/n)^2`.
pub fn heterozygosity(sizes: &[usize], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let sum_squared: f64 = sizes
        .iter()
        .map(|&m| {
            let freq = m as f64 / n as f64;
            freq * freq
        })
        .sum();
    1.0 - sum_squared
}

/// Expected number of alleles in a sample of `n` (Ewens 1972).
///
/// $$E[k] = \theta \sum_{i=0}^{n-1} \frac{1}{\theta + i}$$
///
/// Returns 1 when `theta <= 0`.
pub fn expected_allele_count(theta: f64, n: usize) -> f64 {
    if theta <= 0.0 {
        return 1.0;
    }
    theta * (0..n).map(|i| 1.0 / (theta + i as f64)).sum::<f64>()
}

/// Probability of the observed allele partition (Karlin & McGregor 1972).
///
/// Evaluated in log space:
///
/// $$\log P = k \log\theta + \log k! - \sum_{i=0}^{n-1}\log(\theta+i)
///   - \sum_j \left[a_j \log j + \log a_j!\right]$$
///
/// where `a_j` is the number of allele classes of size `j`. Factorials use
/// [`log_factorial`]. Returns 1 when `theta <= 0`.
pub fn partition_probability(theta: f64, n: usize, sizes: &[usize]) -> f64 {
    if theta <= 0.0 {
        return 1.0;
    }

    let k = sizes.len();
    let mut spectrum: BTreeMap<usize, usize> = BTreeMap::new();
    for &size in sizes {
        *spectrum.entry(size).or_insert(0) += 1;
    }

    let mut log_p = k as f64 * theta.ln() + log_factorial(k);
    log_p -= (0..n).map(|i| (theta + i as f64).ln()).sum::<f64>();
    for (&size, &classes) in &spectrum {
        log_p -= classes as f64 * (size as f64).ln() + log_factorial(classes);
    }

    log_p.exp()
}

/// Closed-form approximation of `log(x!)` (Ramanujan).
///
/// $$\log x! \approx x\log x - x + \tfrac{1}{6}\log(x + 4x^2 + 8x^3) + \tfrac{1}{2}\log(4\pi)$$
///
/// Kept in this exact form so partition probabilities stay comparable
/// across releases. `log_factorial(0)` is 0.
pub fn log_factorial(x: usize) -> f64 {
    if x == 0 {
        return 0.0;
    }
    let x = x as f64;
    x * x.ln() - x + (x + 4.0 * x * x + 8.0 * x * x * x).ln() / 6.0 + (4.0 * PI).ln() / 2.0
}
