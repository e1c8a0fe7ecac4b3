//! Two-sided significance of Kendall's tau.
//!
//! Two policies are available:
//! - **Exact**: the permutation distribution of the discordant count, which
//!   for untied data is the distribution of inversions in a random
//!   permutation (Mahonian numbers).
//! - **Asymptotic**: a normal approximation of `C - D` with tie-corrected
//!   variance.
//!
//! [`PValueMethod::Auto`] picks exact for small untied samples and the normal
//! approximation otherwise.

use crate::ties::TieSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sample size at or below which `Auto` uses the exact distribution.
pub const DEFAULT_EXACT_THRESHOLD: usize = 33;

/// Largest sample for which the exact distribution is ever computed.
///
/// The inversion-count recurrence costs `O(n^3)`; larger samples always use
/// the normal approximation, whatever the method or threshold.
pub const MAX_EXACT_SAMPLE_SIZE: usize = 170;

/// How the p-value is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PValueMethod {
    /// Exact for untied samples up to the threshold, asymptotic otherwise
    #[default]
    Auto,
    /// Permutation distribution of the discordant count
    Exact,
    /// Normal approximation with tie-corrected variance
    Asymptotic,
}

impl PValueMethod {
    /// Returns the lowercase name of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Exact => "exact",
            Self::Asymptotic => "asymptotic",
        }
    }
}

impl fmt::Display for PValueMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PValueMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exact" => Ok(Self::Exact),
            "asymptotic" | "normal" => Ok(Self::Asymptotic),
            _ => Err(anyhow::anyhow!(
                "Unknown p-value method: '{}'. Valid methods: auto, exact, asymptotic",
                s
            )),
        }
    }
}

/// Standard normal CDF.
///
/// Uses the relationship: Phi(x) = 0.5 * (1 + erf(x / sqrt(2)))
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Two-sided p-value for a standard normal statistic.
///
/// Equal to `2 * (1 - Phi(|z|))`, computed through `erfc` so that small
/// tail probabilities do not cancel to zero.
#[must_use]
pub fn two_sided_normal_p_value(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    libm::erfc(z.abs() / std::f64::consts::SQRT_2).clamp(0.0, 1.0)
}

/// Exact two-sided p-value for `discordant` discordant pairs among `n`
/// untied observations.
///
/// Let `c = min(D, n0 - D)`. The result is `min(1, 2 * P(K <= c))` where `K`
/// is the number of inversions of a uniformly random permutation of `n`.
///
/// Runs in `O(n * c)` time. [`KendallEvaluator`](crate::KendallEvaluator)
/// only calls it up to [`MAX_EXACT_SAMPLE_SIZE`].
///
/// # Examples
/// ```
/// use kendall_core::exact_p_value;
///
/// // perfect agreement of three points: 2 / 3!
/// assert!((exact_p_value(0, 3) - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn exact_p_value(discordant: u64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }

    let total = (n as u64) * (n as u64 - 1) / 2;
    let discordant = discordant.min(total);
    let c = discordant.min(total - discordant);
    if 2 * c == total {
        return 1.0;
    }

    let c = c as usize;

    // dist[k] = P(K = k) for permutations of the first j elements, truncated at c.
    // Inserting element j adds 0..j-1 inversions with equal probability.
    let mut dist = vec![0.0_f64; c + 1];
    let mut next = vec![0.0_f64; c + 1];
    dist[0] = 1.0;
    for j in 2..=n {
        let mut window = 0.0;
        for k in 0..=c {
            window += dist[k];
            if k >= j {
                window -= dist[k - j];
            }
            next[k] = window / j as f64;
        }
        std::mem::swap(&mut dist, &mut next);
    }

    let lower_tail: f64 = dist.iter().sum();
    (2.0 * lower_tail).clamp(0.0, 1.0)
}

/// Tie-corrected variance of `C - D` under independence.
///
/// ```text
/// m   = n(n-1)
/// var = (m(2n+5) - v1x - v1y) / 18
///     + 2 Tx Ty / m
///     + v2x v2y / (9 m (n-2))
/// ```
#[must_use]
pub fn score_variance(n: usize, x_ties: &TieSummary, y_ties: &TieSummary) -> f64 {
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let m = n_f * (n_f - 1.0);

    let mut var = (m * (2.0 * n_f + 5.0) - x_ties.v1() - y_ties.v1()) / 18.0;
    var += 2.0 * x_ties.tied_pairs() as f64 * y_ties.tied_pairs() as f64 / m;
    if n > 2 {
        var += x_ties.v2() * y_ties.v2() / (9.0 * m * (n_f - 2.0));
    }
    var
}

/// Asymptotic z-statistic and two-sided p-value for the score `C - D`.
///
/// Returns `(NaN, NaN)` when the variance is not positive.
#[must_use]
pub fn asymptotic_p_value(
    score: i64,
    n: usize,
    x_ties: &TieSummary,
    y_ties: &TieSummary,
) -> (f64, f64) {
    let var = score_variance(n, x_ties, y_ties);
    if var <= 0.0 || !var.is_finite() {
        return (f64::NAN, f64::NAN);
    }

    let z = score as f64 / var.sqrt();
    (z, two_sided_normal_p_value(z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factorial(n: usize) -> f64 {
        (1..=n).map(|k| k as f64).product()
    }

    #[test]
    fn method_parse_accepts_known_names() {
        assert_eq!("auto".parse::<PValueMethod>().unwrap(), PValueMethod::Auto);
        assert_eq!("EXACT".parse::<PValueMethod>().unwrap(), PValueMethod::Exact);
        assert_eq!(
            "asymptotic".parse::<PValueMethod>().unwrap(),
            PValueMethod::Asymptotic
        );
        assert_eq!(
            "normal".parse::<PValueMethod>().unwrap(),
            PValueMethod::Asymptotic
        );
    }

    #[test]
    fn method_parse_rejects_unknown() {
        assert!("permutation".parse::<PValueMethod>().is_err());
        assert!("".parse::<PValueMethod>().is_err());
    }

    #[test]
    fn method_serializes_lowercase() {
        let json = serde_json::to_string(&PValueMethod::Asymptotic).unwrap();
        assert_eq!(json, "\"asymptotic\"");
        let parsed: PValueMethod = serde_json::from_str("\"exact\"").unwrap();
        assert_eq!(parsed, PValueMethod::Exact);
    }

    #[test]
    fn normal_cdf_known_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((normal_cdf(1.959_963_984_540_054) - 0.975).abs() < 1e-9);
        assert!((normal_cdf(-1.0) + normal_cdf(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn two_sided_p_value_matches_cdf() {
        for z in [0.0, 0.25, 1.0, 1.96, 3.0] {
            let expected = 2.0 * (1.0 - normal_cdf(z));
            let actual = two_sided_normal_p_value(-z);
            assert!((actual - expected).abs() < 1e-12, "z={z}: {actual} vs {expected}");
        }
    }

    #[test]
    fn exact_zero_discordant_is_two_over_factorial() {
        for n in 3..=10 {
            let p = exact_p_value(0, n);
            let expected = 2.0 / factorial(n);
            assert!((p - expected).abs() < 1e-12, "n={n}: {p} vs {expected}");
        }
    }

    #[test]
    fn exact_one_discordant_is_two_over_factorial_minus_one() {
        for n in 4..=10 {
            let p = exact_p_value(1, n);
            let expected = 2.0 / factorial(n - 1);
            assert!((p - expected).abs() < 1e-12, "n={n}: {p} vs {expected}");
        }
    }

    #[test]
    fn exact_is_symmetric_in_discordant_count() {
        let n = 7;
        let total = 21;
        for d in 0..=total {
            let a = exact_p_value(d, n);
            let b = exact_p_value(total - d, n);
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn exact_middle_of_distribution_is_one() {
        // n = 5 has 10 pairs; 5 discordant is the median
        assert!((exact_p_value(5, 5) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact_small_sample_reference_value() {
        // Inversion counts for n = 4: 1, 3, 5, 6, 5, 3, 1 (total 24).
        // One discordant pair: 2 * (1 + 3) / 24
        assert!((exact_p_value(1, 4) - 8.0 / 24.0).abs() < 1e-12);
        // Two discordant pairs: 2 * (1 + 3 + 5) / 24
        assert!((exact_p_value(2, 4) - 18.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn exact_tiny_samples_are_not_significant() {
        assert!((exact_p_value(0, 2) - 1.0).abs() < f64::EPSILON);
        assert!((exact_p_value(0, 1) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn variance_without_ties_matches_closed_form() {
        let none = TieSummary::default();
        for n in 3..20 {
            let n_f = n as f64;
            let expected = n_f * (n_f - 1.0) * (2.0 * n_f + 5.0) / 18.0;
            assert!((score_variance(n, &none, &none) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn asymptotic_with_one_tie_reference_value() {
        let x = TieSummary::default();
        let y = TieSummary::from_values(&[2.5, 0.0, 0.5, 2.5, -0.5]);
        let (z, p) = asymptotic_p_value(-1, 5, &x, &y);
        // var = (20 * 15 - 18) / 18
        assert!((z + 1.0 / (282.0_f64 / 18.0).sqrt()).abs() < 1e-12);
        assert!((p - 0.800_542_107_423_126_3).abs() < 1e-9, "p was {p}");
    }

    #[test]
    fn variance_with_ties_in_both_sequences_reference_value() {
        let x = TieSummary::from_values(&[1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
        let y = TieSummary::from_values(&[5.0, 4.0, 4.0, 4.0, 1.0, 1.0, 0.0]);
        assert_eq!(x.tied_pairs(), 5);
        assert_eq!(y.tied_pairs(), 4);
        assert!((x.v2() - 6.0).abs() < f64::EPSILON);
        assert!((y.v2() - 6.0).abs() < f64::EPSILON);

        // 34 from the base term, 2 * 5 * 4 / 42 and 6 * 6 / (9 * 42 * 5)
        let expected = 34.0 + 40.0 / 42.0 + 36.0 / 1890.0;
        let var = score_variance(7, &x, &y);
        assert!((var - 34.971_428_571_428_57).abs() < 1e-12, "var was {var}");
        assert!((var - expected).abs() < 1e-12);

        // C = 0, D = 14
        let (z, p) = asymptotic_p_value(-14, 7, &x, &y);
        assert!((z + 2.367_398_395_580_831).abs() < 1e-12, "z was {z}");
        let reference = libm::erfc(14.0 / expected.sqrt() / std::f64::consts::SQRT_2);
        assert!((p - reference).abs() < 1e-15);
        assert!((p - 0.017_913_637_964_450_2).abs() < 1e-12, "p was {p}");
    }

    #[test]
    fn exact_largest_supported_sample_is_finite() {
        let n = MAX_EXACT_SAMPLE_SIZE;
        let total = (n * (n - 1) / 2) as u64;
        let p = exact_p_value(total / 3, n);
        assert!(p.is_finite() && (0.0..=1.0).contains(&p), "p was {p}");
    }

    #[test]
    fn asymptotic_zero_variance_is_nan() {
        let x = TieSummary::from_values(&[1.0, 1.0]);
        let y = TieSummary::from_values(&[2.0, 2.0]);
        let (z, p) = asymptotic_p_value(0, 2, &x, &y);
        assert!(z.is_nan());
        assert!(p.is_nan());
    }
}
