//! Tie-class bookkeeping for a single sequence.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sizes of the tie classes in one sequence plus the aggregates used by
/// tau-b and its variance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieSummary {
    /// Sizes of every tie class with more than one member.
    pub class_sizes: Vec<u64>,
}

impl TieSummary {
    /// Groups `values` into tie classes.
    ///
    /// Values are compared with `==`, so callers must reject NaN first.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let mut class_sizes = Vec::new();
        let mut i = 0;
        while i < sorted.len() {
            let mut j = i + 1;
            while j < sorted.len() && sorted[j] == sorted[i] {
                j += 1;
            }
            let size = (j - i) as u64;
            if size > 1 {
                class_sizes.push(size);
            }
            i = j;
        }

        Self { class_sizes }
    }

    /// Returns true if the sequence has no repeated values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_sizes.is_empty()
    }

    /// Number of tied pairs: `Σ t(t-1)/2`.
    #[must_use]
    pub fn tied_pairs(&self) -> u64 {
        self.class_sizes.iter().map(|t| t * (t - 1) / 2).sum()
    }

    /// Variance term `Σ t(t-1)(2t+5)`.
    #[must_use]
    pub fn v1(&self) -> f64 {
        self.class_sizes
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * (t - 1.0) * (2.0 * t + 5.0)
            })
            .sum()
    }

    /// Variance term `Σ t(t-1)(t-2)`.
    #[must_use]
    pub fn v2(&self) -> f64 {
        self.class_sizes
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * (t - 1.0) * (t - 2.0)
            })
            .sum()
    }
}
