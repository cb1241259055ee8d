//! Core estimators over one analysis unit.
//!
//! Implements standard summary statistics of DNA polymorphism:
//! - Watterson's estimator (θ_W)
//! - Nucleotide diversity (π)
//! - Tajima's D
//! - Fu & Li's D* and F*
//! - Sampling standard errors of π and θ_W
//!
//! All statistics are computed from a [`SiteSet`]: the gap-free view of the
//! unit (width `L`) and its segregating sub-view (width `S`).

use divstat_align::{AlignmentView, SiteSet};
use serde::Serialize;

use crate::config::{Normalization, Statistic};
use crate::constants::CoalescentConstants;

/// Standard errors under the two recombination extremes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StandardErrors {
    /// No recombination (complete linkage disequilibrium).
    pub no_recombination: f64,
    /// Free recombination (linkage equilibrium).
    pub free_recombination: f64,
}

/// Everything the engine derives from one analysis unit.
///
/// When the engine stops early (see [`StatisticsEngine::estimate`]), fields
/// past the requested statistic keep their zero defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Estimates {
    pub sample_size: usize,
    /// Gap-free sites `L`.
    pub gap_free_length: usize,
    /// Segregating sites `S`.
    pub segregating_sites: usize,
    pub theta_w: f64,
    pub theta_w_per_site: f64,
    /// Average number of pairwise differences.
    pub pi_total: f64,
    pub pi: f64,
    /// Total number of mutations, `sum(alleles - 1)` over segregating sites.
    pub eta: usize,
    /// Residues seen exactly once in a segregating column.
    pub eta_singletons: usize,
    pub tajima_d: f64,
    /// `None` when the sample has fewer than three sequences.
    pub fu_li_d_star: Option<f64>,
    /// `None` when the sample has fewer than three sequences.
    pub fu_li_f_star: Option<f64>,
    pub pi_se: StandardErrors,
    pub theta_w_se: StandardErrors,
}

impl Estimates {
    /// Value of one statistic under the given normalization.
    pub fn value(&self, statistic: Statistic, normalization: Normalization) -> f64 {
        match (statistic, normalization) {
            (Statistic::Diversity, Normalization::PerSite) => self.pi,
            (Statistic::Diversity, Normalization::Absolute) => self.pi_total,
            (Statistic::Watterson, Normalization::PerSite) => self.theta_w_per_site,
            (Statistic::Watterson, Normalization::Absolute) => self.theta_w,
            (Statistic::TajimaD, _) => self.tajima_d,
        }
    }
}

/// Site-level tallies over the segregating columns.
#[derive(Debug, Clone, Copy, Default)]
struct SiteTally {
    /// `sum(1 - sum_a p_a^2)`
    heterozygosity: f64,
    eta: usize,
    singletons: usize,
}

/// Computes [`Estimates`] for a sample of fixed size.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsEngine<'c> {
    constants: &'c CoalescentConstants,
}

impl<'c> StatisticsEngine<'c> {
    pub fn new(constants: &'c CoalescentConstants) -> Self {
        Self { constants }
    }

    #[inline]
    pub fn constants(&self) -> &CoalescentConstants {
        self.constants
    }

    /// Run the estimators on one analysis unit.
    ///
    /// With `stop_after = Some(statistic)` the computation returns as soon as
    /// that statistic is known. The requested value is identical to the one
    /// produced by a full run.
    ///
    /// Degenerate input never fails:
    /// - `L = 0` gives per-site values of 0
    /// - zero-variance denominators of D, D* and F* are replaced by 1
    /// - D* and F* are `None` for `n <= 2`
    pub fn estimate(&self, sites: &SiteSet<'_>, stop_after: Option<Statistic>) -> Estimates {
        let c = self.constants;
        let n = c.n;
        debug_assert_eq!(sites.gap_free.n_rows(), n, "constants built for another sample size");

        let length = sites.gap_free.width();
        let seg = sites.segregating.width();
        let s = seg as f64;

        let mut est = Estimates {
            sample_size: n,
            gap_free_length: length,
            segregating_sites: seg,
            ..Estimates::default()
        };

        // Watterson (1975)
        est.theta_w = s / c.a1;
        est.theta_w_per_site = per_site(est.theta_w, length);
        if stop_after == Some(Statistic::Watterson) {
            return est;
        }

        // Nucleotide diversity, Nei & Li (1979)
        let tally = tally_sites(&sites.segregating);
        est.eta = tally.eta;
        est.eta_singletons = tally.singletons;
        est.pi_total = if n > 1 {
            tally.heterozygosity * n as f64 / (n as f64 - 1.0)
        } else {
            0.0
        };
        est.pi = per_site(est.pi_total, length);
        if stop_after == Some(Statistic::Diversity) {
            return est;
        }

        // Tajima (1989)
        est.tajima_d =
            (est.pi_total - est.theta_w) / guarded_sqrt(c.e1 * s + c.e2 * s * (s - 1.0));
        if stop_after == Some(Statistic::TajimaD) {
            return est;
        }

        if n > 2 {
            let (d_star, f_star) = fu_li_star(c, est.eta as f64, est.eta_singletons as f64, est.pi_total);
            est.fu_li_d_star = Some(d_star);
            est.fu_li_f_star = Some(f_star);
        }

        let divisor = length.max(1) as f64;
        est.pi_se = pi_standard_errors(c, est.pi_total, divisor);
        est.theta_w_se = theta_w_standard_errors(c, est.theta_w, divisor);

        est
    }

    /// Value of a single statistic, skipping everything computed after it.
    pub fn statistic(
        &self,
        sites: &SiteSet<'_>,
        statistic: Statistic,
        normalization: Normalization,
    ) -> f64 {
        self.estimate(sites, Some(statistic))
            .value(statistic, normalization)
    }
}

#[inline]
fn per_site(value: f64, length: usize) -> f64 {
    if length == 0 {
        0.0
    } else {
        value / length as f64
    }
}

/// Square root of a variance, replaced by 1 when it is zero or undefined.
#[inline]
fn guarded_sqrt(variance: f64) -> f64 {
    let sd = variance.sqrt();
    if sd == 0.0 || !sd.is_finite() {
        1.0
    } else {
        sd
    }
}

fn tally_sites(segregating: &AlignmentView<'_>) -> SiteTally {
    let n = segregating.n_rows() as f64;
    let mut tally = SiteTally::default();
    let mut counts = [0usize; 256];

    for j in 0..segregating.width() {
        counts.fill(0);
        for residue in segregating.column(j) {
            counts[residue as usize] += 1;
        }

        let mut homozygosity = 0.0;
        let mut alleles = 0;
        for &count in counts.iter().filter(|&&count| count > 0) {
            let freq = count as f64 / n;
            homozygosity += freq * freq;
            alleles += 1;
            if count == 1 {
                tally.singletons += 1;
            }
        }

        tally.heterozygosity += 1.0 - homozygosity;
        tally.eta += alleles - 1;
    }

    tally
}

/// Fu & Li's D* and F* without an outgroup.
///
/// D* follows Fu & Li (1993); the F* variance terms use the corrected
/// expressions of Simonsen, Churchill & Aquadro (1995).
///
/// # References
///
/// Fu, Y. X., & Li, W. H. (1993). Statistical tests of neutrality of
/// mutations. Genetics, 133(3), 693-709.
///
/// Simonsen, K. L., Churchill, G. A., & Aquadro, C. F. (1995). Properties of
/// statistical tests of neutrality for DNA polymorphism data. Genetics,
/// 141(1), 413-429.
fn fu_li_star(c: &CoalescentConstants, eta: f64, eta_s: f64, pi_total: f64) -> (f64, f64) {
    let n = c.n as f64;
    let an = c.a1;
    let FuLiVariance { v_d, u_d, v_f, u_f } = FuLiVariance::new(c);

    let d_star = (n / (n - 1.0) * eta - an * eta_s) / guarded_sqrt(u_d * eta + v_d * eta * eta);
    let f_star =
        (pi_total - (n - 1.0) / n * eta_s) / guarded_sqrt(u_f * eta + v_f * eta * eta);

    (d_star, f_star)
}

/// Variance coefficients of D* and F*: `Var = u·η + v·η²`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FuLiVariance {
    v_d: f64,
    u_d: f64,
    v_f: f64,
    u_f: f64,
}

impl FuLiVariance {
    /// Requires `n >= 3`.
    fn new(c: &CoalescentConstants) -> Self {
        let n = c.n as f64;
        let an = c.a1;
        let bn = c.a2;
        let an1 = c.a1_next();

        let cn = 2.0 * (n * an - 2.0 * (n - 1.0)) / ((n - 1.0) * (n - 2.0));
        let dn = cn + (n - 2.0) / (n - 1.0).powi(2)
            + 2.0 / (n - 1.0) * (1.5 - (2.0 * an1 - 3.0) / (n - 2.0) - 1.0 / n);

        let v_d = ((n / (n - 1.0)).powi(2) * bn + an * an * dn
            - 2.0 * n * an * (an + 1.0) / (n - 1.0).powi(2))
            / (an * an + bn);
        let u_d = n / (n - 1.0) * (an - n / (n - 1.0)) - v_d;

        // Simonsen et al. (1995) correction of the F* variance.
        let v_f = ((2.0 * n.powi(3) + 110.0 * n * n - 255.0 * n + 153.0)
            / (9.0 * n * n * (n - 1.0))
            + 2.0 * (n - 1.0) * an / (n * n)
            - 8.0 * bn / n)
            / (an * an + bn);
        let u_f = ((4.0 * n * n + 19.0 * n + 3.0 - 12.0 * (n + 1.0) * an1)
            / (3.0 * n * (n - 1.0)))
            / an
            - v_f;

        Self { v_d, u_d, v_f, u_f }
    }
}

/// Sampling standard errors of per-site π (Tajima 1993).
///
/// `V = b1·θ + b2·θ²` without recombination; the θ² term is divided by `L`
/// under free recombination. θ is estimated by π itself.
fn pi_standard_errors(c: &CoalescentConstants, pi_total: f64, length: f64) -> StandardErrors {
    let linear = c.b1 * pi_total;
    let quadratic = c.b2 * pi_total * pi_total;
    StandardErrors {
        no_recombination: (linear + quadratic).sqrt() / length,
        free_recombination: (linear + quadratic / length).sqrt() / length,
    }
}

/// Sampling standard errors of per-site θ_W (Watterson 1975, Tajima 1993).
fn theta_w_standard_errors(c: &CoalescentConstants, theta_w: f64, length: f64) -> StandardErrors {
    let linear = theta_w / c.a1;
    let quadratic = c.a2 * theta_w * theta_w / (c.a1 * c.a1);
    StandardErrors {
        no_recombination: (linear + quadratic).sqrt() / length,
        free_recombination: (linear + quadratic / length).sqrt() / length,
    }
}
