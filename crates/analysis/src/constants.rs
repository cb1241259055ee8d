//! Sample-size correction terms shared by the estimators.

use serde::Serialize;

/// Harmonic sum `a_n = sum_{i=1}^{n-1} 1/i`.
#[inline]
pub fn harmonic_number(n: usize) -> f64 {
    (1..n).map(|i| 1.0 / i as f64).sum()
}

/// Second-order harmonic sum `b_n = sum_{i=1}^{n-1} 1/i^2`.
#[inline]
pub fn harmonic_number_squared(n: usize) -> f64 {
    (1..n).map(|i| 1.0 / (i as f64 * i as f64)).sum()
}

/// Classical correction terms for a sample of `n` sequences.
///
/// # Formula
///
/// $$a_1 = \sum_{i=1}^{n-1} \frac{1}{i} \qquad a_2 = \sum_{i=1}^{n-1} \frac{1}{i^2}$$
///
/// $$b_1 = \frac{n+1}{3(n-1)} \qquad b_2 = \frac{2(n^2+n+3)}{9n(n-1)}$$
///
/// $$c_1 = b_1 - \frac{1}{a_1} \qquad c_2 = b_2 - \frac{n+2}{a_1 n} + \frac{a_2}{a_1^2}$$
///
/// $$e_1 = \frac{c_1}{a_1} \qquad e_2 = \frac{c_2}{a_1^2 + a_2}$$
///
/// For `n < 2` the sums are empty and the remaining terms are not finite;
/// the analysis layer rejects such samples before building constants.
///
/// # References
///
/// Tajima, F. (1989). Statistical method for testing the neutral mutation
/// hypothesis by DNA polymorphism. Genetics, 123(3), 585-595.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoalescentConstants {
    pub n: usize,
    pub a1: f64,
    pub a2: f64,
    pub b1: f64,
    pub b2: f64,
    pub c1: f64,
    pub c2: f64,
    pub e1: f64,
    pub e2: f64,
}

impl CoalescentConstants {
    pub fn new(n: usize) -> Self {
        let nf = n as f64;
        let a1 = harmonic_number(n);
        let a2 = harmonic_number_squared(n);

        let b1 = (nf + 1.0) / (3.0 * (nf - 1.0));
        let b2 = 2.0 * (nf * nf + nf + 3.0) / (9.0 * nf * (nf - 1.0));

        let c1 = b1 - 1.0 / a1;
        let c2 = b2 - (nf + 2.0) / (a1 * nf) + a2 / (a1 * a1);

        let e1 = c1 / a1;
        let e2 = c2 / (a1 * a1 + a2);

        Self {
            n,
            a1,
            a2,
            b1,
            b2,
            c1,
            c2,
            e1,
            e2,
        }
    }

    /// `a_{n+1} = a_n + 1/n`, used by the Fu & Li variances.
    #[inline]
    pub fn a1_next(&self) -> f64 {
        self.a1 + 1.0 / self.n as f64
    }
}
