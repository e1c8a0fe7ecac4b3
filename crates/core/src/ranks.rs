//! Average ranks and rank normalization.
//!
//! Kendall's tau depends only on the ordering of each sequence, so replacing
//! a sample by its ranks (or by pseudo-observations in `(0, 1]`) leaves tau
//! unchanged.

use std::cmp::Ordering;

/// Calculates ranks for a slice of values, handling ties with average rank.
///
/// # Arguments
/// * `values` - Slice of values to rank
///
/// # Returns
/// Vector of ranks (1-based, with ties averaged)
///
/// # Examples
/// ```
/// use kendall_core::average_ranks;
///
/// assert_eq!(average_ranks(&[10.0, 30.0, 20.0, 20.0]), vec![1.0, 4.0, 2.5, 2.5]);
/// ```
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return vec![];
    }

    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];

    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }

        // positions i..j hold ranks (i+1)..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for entry in &indexed[i..j] {
            ranks[entry.0] = avg_rank;
        }

        i = j;
    }

    ranks
}

/// Converts a sample into pseudo-observations: average ranks divided by the
/// largest rank.
///
/// The largest value always maps to `1.0`. When the maximum is tied, the
/// shared average rank is the divisor, so every member of that class maps to
/// `1.0` as well.
///
/// # Examples
/// ```
/// use kendall_core::rank_normalize;
///
/// let u = rank_normalize(&[4.9, 4.4, 5.1, 4.3, 4.7]);
/// assert_eq!(u, vec![0.8, 0.4, 1.0, 0.2, 0.6]);
/// ```
#[must_use]
pub fn rank_normalize(values: &[f64]) -> Vec<f64> {
    let ranks = average_ranks(values);
    let max_rank = ranks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max_rank.is_finite() || max_rank <= 0.0 {
        return ranks;
    }
    ranks.into_iter().map(|r| r / max_rank).collect()
}
