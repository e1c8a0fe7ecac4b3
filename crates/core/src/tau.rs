//! Kendall's tau-b rank correlation.
//!
//! Every unordered index pair `(i, j)` is classified by the sign of
//! `(x_i - x_j) * (y_i - y_j)`:
//!
//! ```text
//!  > 0            concordant
//!  < 0            discordant
//!  x tie only     tied_x
//!  y tie only     tied_y
//!  both tied      tied_both
//! ```
//!
//! tau-b is then `(C - D) / sqrt((n0 - T) * (n0 - U))` where `T` and `U` are
//! the tied-pair counts of `x` and `y` and `n0 = n(n-1)/2`.

use crate::config::EvaluatorConfig;
use crate::error::KendallError;
use crate::significance::{
    asymptotic_p_value, exact_p_value, PValueMethod, DEFAULT_EXACT_THRESHOLD,
    MAX_EXACT_SAMPLE_SIZE,
};
use crate::ties::TieSummary;
use serde::{Deserialize, Serialize};

/// Classification counts over all `n(n-1)/2` index pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCounts {
    /// Pairs where both sequences move in the same direction
    pub concordant: u64,
    /// Pairs where the sequences move in opposite directions
    pub discordant: u64,
    /// Pairs tied in `x` only
    pub tied_x: u64,
    /// Pairs tied in `y` only
    pub tied_y: u64,
    /// Pairs tied in both sequences
    pub tied_both: u64,
}

impl PairCounts {
    /// Counts pair classes with a direct pass over every index pair.
    ///
    /// Callers are responsible for length and finiteness checks.
    #[must_use]
    pub fn count(x: &[f64], y: &[f64]) -> Self {
        let mut counts = Self::default();
        let n = x.len().min(y.len());

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = x[i] - x[j];
                let dy = y[i] - y[j];
                match (dx == 0.0, dy == 0.0) {
                    (true, true) => counts.tied_both += 1,
                    (true, false) => counts.tied_x += 1,
                    (false, true) => counts.tied_y += 1,
                    (false, false) => {
                        if (dx > 0.0) == (dy > 0.0) {
                            counts.concordant += 1;
                        } else {
                            counts.discordant += 1;
                        }
                    }
                }
            }
        }

        counts
    }

    /// Total number of pairs classified.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.concordant + self.discordant + self.tied_x + self.tied_y + self.tied_both
    }

    /// The Kendall score `C - D`.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.concordant as i64 - self.discordant as i64
    }
}

/// Result of a Kendall's tau-b evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KendallTau {
    /// tau-b in [-1, 1], NaN when either sequence is constant
    pub tau: f64,
    /// Two-sided p-value under the null of no association
    pub p_value: f64,
    /// Number of observations
    pub sample_size: usize,
    /// Pair classification counts
    pub counts: PairCounts,
    /// Method actually used for the p-value (never `Auto`)
    pub method: PValueMethod,
}

impl KendallTau {
    /// Returns true if the association is significant at `alpha`.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Evaluates tau-b and its significance under a fixed p-value policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KendallEvaluator {
    method: PValueMethod,
    exact_threshold: usize,
}

impl Default for KendallEvaluator {
    fn default() -> Self {
        Self::new(PValueMethod::Auto, DEFAULT_EXACT_THRESHOLD)
    }
}

impl From<&EvaluatorConfig> for KendallEvaluator {
    fn from(config: &EvaluatorConfig) -> Self {
        Self::new(config.method, config.exact_threshold)
    }
}

impl KendallEvaluator {
    /// Creates an evaluator with the given p-value policy.
    #[must_use]
    pub const fn new(method: PValueMethod, exact_threshold: usize) -> Self {
        Self {
            method,
            exact_threshold,
        }
    }

    /// Returns the configured p-value method.
    #[must_use]
    pub const fn method(&self) -> PValueMethod {
        self.method
    }

    /// Computes Kendall's tau-b and a two-sided p-value for `x` and `y`.
    ///
    /// # Errors
    /// - [`KendallError::LengthMismatch`] if the sequences differ in length
    /// - [`KendallError::TooFewObservations`] if fewer than two points are given
    /// - [`KendallError::NonFinite`] if any value is NaN or infinite
    ///
    /// # Examples
    /// ```
    /// use kendall_core::KendallEvaluator;
    ///
    /// let result = KendallEvaluator::default()
    ///     .evaluate(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0])
    ///     .unwrap();
    /// assert_eq!(result.tau, -1.0);
    /// ```
    pub fn evaluate(&self, x: &[f64], y: &[f64]) -> Result<KendallTau, KendallError> {
        if x.len() != y.len() {
            return Err(KendallError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }

        let n = x.len();
        if n < 2 {
            return Err(KendallError::TooFewObservations { n });
        }

        for (sequence, values) in [("x", x), ("y", y)] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(KendallError::NonFinite { sequence, index });
            }
        }

        let counts = PairCounts::count(x, y);
        let x_ties = TieSummary::from_values(x);
        let y_ties = TieSummary::from_values(y);

        let n0 = (n as u64) * (n as u64 - 1) / 2;
        let denominator =
            ((n0 - x_ties.tied_pairs()) as f64 * (n0 - y_ties.tied_pairs()) as f64).sqrt();

        let method = self.resolve_method(n, &x_ties, &y_ties);

        tracing::debug!(
            n,
            concordant = counts.concordant,
            discordant = counts.discordant,
            tied_x = x_ties.tied_pairs(),
            tied_y = y_ties.tied_pairs(),
            method = %method,
            "Kendall pair counts"
        );

        if denominator == 0.0 {
            return Ok(KendallTau {
                tau: f64::NAN,
                p_value: f64::NAN,
                sample_size: n,
                counts,
                method,
            });
        }

        let tau = (counts.score() as f64 / denominator).clamp(-1.0, 1.0);

        let p_value = match method {
            PValueMethod::Exact => exact_p_value(counts.discordant, n),
            _ => asymptotic_p_value(counts.score(), n, &x_ties, &y_ties).1,
        };

        Ok(KendallTau {
            tau,
            p_value,
            sample_size: n,
            counts,
            method,
        })
    }

    /// Picks the concrete p-value method for a sample.
    ///
    /// Samples above [`MAX_EXACT_SAMPLE_SIZE`] never use the exact
    /// distribution.
    fn resolve_method(&self, n: usize, x_ties: &TieSummary, y_ties: &TieSummary) -> PValueMethod {
        let has_ties = !x_ties.is_empty() || !y_ties.is_empty();
        match self.method {
            PValueMethod::Asymptotic => PValueMethod::Asymptotic,
            PValueMethod::Exact if has_ties => {
                tracing::warn!(
                    n,
                    "Exact p-value requested for tied data, using asymptotic approximation"
                );
                PValueMethod::Asymptotic
            }
            PValueMethod::Exact if n > MAX_EXACT_SAMPLE_SIZE => {
                tracing::warn!(
                    n,
                    max = MAX_EXACT_SAMPLE_SIZE,
                    "Exact p-value requested for a large sample, using asymptotic approximation"
                );
                PValueMethod::Asymptotic
            }
            PValueMethod::Exact => PValueMethod::Exact,
            PValueMethod::Auto
                if !has_ties && n <= self.exact_threshold.min(MAX_EXACT_SAMPLE_SIZE) =>
            {
                PValueMethod::Exact
            }
            PValueMethod::Auto => PValueMethod::Asymptotic,
        }
    }
}

/// Computes Kendall's tau-b with the default p-value policy.
///
/// # Errors
/// See [`KendallEvaluator::evaluate`].
pub fn kendall_tau(x: &[f64], y: &[f64]) -> Result<KendallTau, KendallError> {
    KendallEvaluator::default().evaluate(x, y)
}
