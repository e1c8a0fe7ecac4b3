#![allow(clippy::format_push_string)]

use crate::config::OutputConfig;
use crate::matrix::{DependenceTree, TauEdge, TauMatrix};
use crate::significance::PValueMethod;
use crate::tau::KendallTau;
use serde::Serialize;

/// Flat record written for JSON output.
#[derive(Debug, Serialize)]
struct JsonRecord {
    tau: f64,
    p_value: f64,
    sample_size: usize,
    method: PValueMethod,
    concordant: u64,
    discordant: u64,
}

impl From<&KendallTau> for JsonRecord {
    fn from(result: &KendallTau) -> Self {
        Self {
            tau: result.tau,
            p_value: result.p_value,
            sample_size: result.sample_size,
            method: result.method,
            concordant: result.counts.concordant,
            discordant: result.counts.discordant,
        }
    }
}

/// Renders evaluation results as text or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultFormatter {
    precision: usize,
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl From<&OutputConfig> for ResultFormatter {
    fn from(config: &OutputConfig) -> Self {
        Self::new(config.precision)
    }
}

impl ResultFormatter {
    #[must_use]
    pub const fn new(precision: usize) -> Self {
        Self { precision }
    }

    fn value(&self, v: f64) -> String {
        if v.is_nan() {
            "nan".to_string()
        } else {
            format!("{:.*}", self.precision, v)
        }
    }

    /// Formats a result as `(tau, p_value)`.
    ///
    /// # Examples
    /// ```
    /// use kendall_core::{kendall_tau, ResultFormatter};
    ///
    /// let result = kendall_tau(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(ResultFormatter::new(2).pair(&result), "(1.00, 0.33)");
    /// ```
    #[must_use]
    pub fn pair(&self, result: &KendallTau) -> String {
        format!("({}, {})", self.value(result.tau), self.value(result.p_value))
    }

    /// Formats a result as a single-line JSON object.
    ///
    /// NaN values are written as `null`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn json(&self, result: &KendallTau) -> serde_json::Result<String> {
        serde_json::to_string(&JsonRecord::from(result))
    }

    /// Formats a tau matrix as an aligned table.
    #[must_use]
    pub fn matrix(&self, matrix: &TauMatrix) -> String {
        let cell = (self.precision + 3)
            .max(matrix.names().iter().map(String::len).max().unwrap_or(0))
            .max(3);
        let label = matrix.names().iter().map(String::len).max().unwrap_or(0);

        let mut output = String::new();
        output.push_str(&format!("{:label$}", ""));
        for name in matrix.names() {
            output.push_str(&format!("  {name:>cell$}"));
        }
        output.push('\n');

        for (i, name) in matrix.names().iter().enumerate() {
            output.push_str(&format!("{name:<label$}"));
            for j in 0..matrix.len() {
                let tau = matrix.get(i, j).unwrap_or(f64::NAN);
                output.push_str(&format!("  {:>cell$}", self.value(tau)));
            }
            output.push('\n');
        }

        output
    }

    /// Formats a dependence tree, one `from -- to  tau` line per edge.
    #[must_use]
    pub fn tree(&self, matrix: &TauMatrix, tree: &DependenceTree) -> String {
        self.edges(matrix, &tree.edges)
    }

    /// Formats edges as `from -- to  tau` lines, naming variables from `matrix`.
    #[must_use]
    pub fn edges(&self, matrix: &TauMatrix, edges: &[TauEdge]) -> String {
        let mut output = String::new();
        for edge in edges {
            let from = matrix.names().get(edge.from).map_or("?", String::as_str);
            let to = matrix.names().get(edge.to).map_or("?", String::as_str);
            output.push_str(&format!("{from} -- {to}  {}\n", self.value(edge.tau)));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tau::{kendall_tau, KendallEvaluator};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn pair_uses_configured_precision() {
        let result = kendall_tau(&[1.5, 3.5, 2.0, 1.0, -1.0], &[2.5, 0.0, 0.5, 2.5, -0.5]).unwrap();
        assert_eq!(ResultFormatter::default().pair(&result), "(-0.1054, 0.8005)");
        assert_eq!(ResultFormatter::new(2).pair(&result), "(-0.11, 0.80)");
    }

    #[test]
    fn pair_renders_nan() {
        let result = kendall_tau(&[1.0, 1.0], &[1.0, 2.0]).unwrap();
        assert_eq!(ResultFormatter::default().pair(&result), "(nan, nan)");
    }

    #[test]
    fn pair_is_deterministic() {
        let result = kendall_tau(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
        let formatter = ResultFormatter::default();
        assert_eq!(formatter.pair(&result), formatter.pair(&result));
        assert_eq!(formatter.pair(&result), "(-1.0000, 0.3333)");
    }

    #[test]
    fn json_contains_all_fields() {
        let result = kendall_tau(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        let json = ResultFormatter::default().json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tau"], 1.0);
        assert_eq!(value["sample_size"], 3);
        assert_eq!(value["method"], "exact");
        assert_eq!(value["concordant"], 3);
        assert_eq!(value["discordant"], 0);
        assert!(!json.contains('\n'));
    }

    #[test]
    fn json_writes_nan_as_null() {
        let result = kendall_tau(&[1.0, 1.0], &[1.0, 2.0]).unwrap();
        let json = ResultFormatter::default().json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["tau"].is_null());
        assert!(value["p_value"].is_null());
    }

    #[test]
    fn matrix_has_header_and_one_row_per_variable() {
        let columns = vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]];
        let matrix =
            TauMatrix::from_columns(names(&["up", "down"]), &columns, &KendallEvaluator::default())
                .unwrap();
        let text = ResultFormatter::new(2).matrix(&matrix);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("up") && lines[0].contains("down"));
        assert!(lines[1].starts_with("up"));
        assert!(lines[1].contains("1.00") && lines[1].contains("-1.00"));
        assert!(lines[2].starts_with("down"));
    }

    #[test]
    fn tree_lists_edges_by_name() {
        let columns = vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0], vec![1.0, 3.0, 2.0]];
        let matrix = TauMatrix::from_columns(
            names(&["a", "b", "c"]),
            &columns,
            &KendallEvaluator::default(),
        )
        .unwrap();
        let tree = matrix.dependence_tree().unwrap();
        let text = ResultFormatter::new(2).tree(&matrix, &tree);

        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("a -- b  -1.00"));
    }
}
