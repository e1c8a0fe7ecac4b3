//! Pairwise tau across several variables and the maximum spanning
//! dependence tree built from it.
//!
//! The dependence tree links the most strongly associated variables: it is
//! a maximum spanning tree over `|tau|`, which is the first tree of a
//! regular vine.

use crate::error::KendallError;
use crate::tau::KendallEvaluator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One weighted link between two variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TauEdge {
    /// Index of the first variable
    pub from: usize,
    /// Index of the second variable
    pub to: usize,
    /// Signed tau between them
    pub tau: f64,
}

impl TauEdge {
    /// Spanning-tree weight: `|tau|`, with NaN treated as no association.
    #[must_use]
    pub fn weight(&self) -> f64 {
        if self.tau.is_nan() {
            0.0
        } else {
            self.tau.abs()
        }
    }
}

/// Maximum spanning tree over `|tau|`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependenceTree {
    /// Edges in the order Prim's algorithm added them
    pub edges: Vec<TauEdge>,
}

impl DependenceTree {
    /// Sum of the edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(TauEdge::weight).sum()
    }
}

/// Symmetric matrix of Kendall's tau for named variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TauMatrix {
    names: Vec<String>,
    taus: Vec<f64>,
    p_values: Vec<f64>,
}

impl TauMatrix {
    /// Evaluates tau for every pair of columns.
    ///
    /// # Errors
    /// - [`KendallError::NoColumns`] if `columns` is empty
    /// - [`KendallError::ColumnNameMismatch`] if names and columns differ in count
    /// - any error from [`KendallEvaluator::evaluate`], e.g. for a ragged column
    pub fn from_columns(
        names: Vec<String>,
        columns: &[Vec<f64>],
        evaluator: &KendallEvaluator,
    ) -> Result<Self, KendallError> {
        if columns.is_empty() {
            return Err(KendallError::NoColumns);
        }
        if names.len() != columns.len() {
            return Err(KendallError::ColumnNameMismatch {
                names: names.len(),
                columns: columns.len(),
            });
        }

        let k = columns.len();
        let mut taus = vec![f64::NAN; k * k];
        let mut p_values = vec![f64::NAN; k * k];

        for i in 0..k {
            for j in i..k {
                let result = evaluator.evaluate(&columns[i], &columns[j])?;
                taus[i * k + j] = result.tau;
                taus[j * k + i] = result.tau;
                p_values[i * k + j] = result.p_value;
                p_values[j * k + i] = result.p_value;
            }
        }

        tracing::debug!(variables = k, "Tau matrix evaluated");

        Ok(Self {
            names,
            taus,
            p_values,
        })
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Tau between variables `i` and `j`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let k = self.len();
        (i < k && j < k).then(|| self.taus[i * k + j])
    }

    /// p-value between variables `i` and `j`, or `None` if out of range.
    #[must_use]
    pub fn p_value(&self, i: usize, j: usize) -> Option<f64> {
        let k = self.len();
        (i < k && j < k).then(|| self.p_values[i * k + j])
    }

    /// Off-diagonal pairs sorted by descending `|tau|`, NaN pairs skipped.
    ///
    /// Equal strengths keep index order.
    #[must_use]
    pub fn strongest_pairs(&self, limit: usize) -> Vec<TauEdge> {
        let k = self.len();
        let mut pairs: Vec<TauEdge> = (0..k)
            .flat_map(|i| ((i + 1)..k).map(move |j| (i, j)))
            .map(|(from, to)| TauEdge {
                from,
                to,
                tau: self.taus[from * k + to],
            })
            .filter(|edge| !edge.tau.is_nan())
            .collect();

        pairs.sort_by(|a, b| {
            b.tau
                .abs()
                .partial_cmp(&a.tau.abs())
                .unwrap_or(Ordering::Equal)
        });
        pairs.truncate(limit);
        pairs
    }

    /// Builds the maximum spanning tree over `|tau|` with Prim's algorithm,
    /// starting from variable 0.
    ///
    /// Among equally weighted candidates the lowest `(from, to)` pair wins.
    /// Returns `None` for an empty matrix.
    #[must_use]
    pub fn dependence_tree(&self) -> Option<DependenceTree> {
        let k = self.len();
        if k == 0 {
            return None;
        }

        let mut in_tree = vec![false; k];
        in_tree[0] = true;
        let mut edges = Vec::with_capacity(k - 1);

        while edges.len() < k - 1 {
            let mut best: Option<TauEdge> = None;

            for from in (0..k).filter(|&v| in_tree[v]) {
                for to in (0..k).filter(|&v| !in_tree[v]) {
                    let candidate = TauEdge {
                        from,
                        to,
                        tau: self.taus[from * k + to],
                    };
                    let better = match &best {
                        None => true,
                        Some(current) => candidate.weight() > current.weight(),
                    };
                    if better {
                        best = Some(candidate);
                    }
                }
            }

            // k - 1 > edges.len() guarantees an outside vertex remains
            let Some(edge) = best else { break };
            in_tree[edge.to] = true;
            edges.push(edge);
        }

        Some(DependenceTree { edges })
    }
}
