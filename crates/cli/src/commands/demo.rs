//! Built-in sample pairs.

use anyhow::Result;
use kendall_core::{AppConfig, KendallEvaluator};

use super::render_result;

/// Five-point sample with one tie in the second sequence.
pub const TIED_A: [f64; 5] = [1.5, 3.5, 2.0, 1.0, -1.0];
pub const TIED_B: [f64; 5] = [2.5, 0.0, 0.5, 2.5, -0.5];

/// The same observations as `TIED_A`/`TIED_B`, sorted by the first sequence.
pub const SORTED_X: [f64; 5] = [-1.0, 1.0, 1.5, 2.0, 3.5];
pub const SORTED_Y: [f64; 5] = [-0.5, 2.5, 2.5, 0.5, 0.0];

/// Evaluates both sample pairs and returns one rendered line per pair.
///
/// # Errors
/// Returns an error if evaluation or rendering fails.
pub fn demo_lines(config: &AppConfig) -> Result<Vec<String>> {
    let evaluator = KendallEvaluator::from(&config.evaluator);

    [(&TIED_A[..], &TIED_B[..]), (&SORTED_X[..], &SORTED_Y[..])]
        .into_iter()
        .map(|(x, y)| {
            let result = evaluator.evaluate(x, y)?;
            render_result(&result, config)
        })
        .collect()
}

/// Runs the demo command.
///
/// # Errors
/// Returns an error if evaluation or rendering fails.
pub fn run_demo(config: &AppConfig) -> Result<()> {
    for line in demo_lines(config)? {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kendall_core::{OutputFormat, PValueMethod};

    #[test]
    fn demo_lines_default_output() {
        let lines = demo_lines(&AppConfig::default()).unwrap();
        assert_eq!(lines, vec!["(-0.1054, 0.8005)", "(-0.1054, 0.8005)"]);
    }

    #[test]
    fn demo_pairs_hold_the_same_observations() {
        let mut rows: Vec<(f64, f64)> = TIED_A.iter().copied().zip(TIED_B).collect();
        rows.sort_by(|l, r| l.0.total_cmp(&r.0));
        let sorted: Vec<(f64, f64)> = SORTED_X.iter().copied().zip(SORTED_Y).collect();
        assert_eq!(rows, sorted);
    }

    #[test]
    fn demo_lines_ignore_forced_method_for_tied_samples() {
        let mut config = AppConfig::default();
        config.evaluator.method = PValueMethod::Exact;
        let lines = demo_lines(&config).unwrap();
        assert_eq!(lines, vec!["(-0.1054, 0.8005)", "(-0.1054, 0.8005)"]);
    }

    #[test]
    fn demo_lines_json_is_parseable() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormat::Json;
        for line in demo_lines(&config).unwrap() {
            let value: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert!(value["tau"].is_number());
        }
    }
}
