//! Kendall's tau-b rank correlation with tie correction and significance
//! testing, plus rank normalization and pairwise dependence analysis.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod formatter;
pub mod matrix;
pub mod ranks;
pub mod significance;
pub mod tau;
pub mod ties;

pub use config::{AppConfig, EvaluatorConfig, OutputConfig, OutputFormat};
pub use config_loader::ConfigLoader;
pub use error::KendallError;
pub use formatter::ResultFormatter;
pub use matrix::{DependenceTree, TauEdge, TauMatrix};
pub use ranks::{average_ranks, rank_normalize};
pub use significance::{
    asymptotic_p_value, exact_p_value, normal_cdf, two_sided_normal_p_value, PValueMethod,
    DEFAULT_EXACT_THRESHOLD, MAX_EXACT_SAMPLE_SIZE,
};
pub use tau::{kendall_tau, KendallEvaluator, KendallTau, PairCounts};
pub use ties::TieSummary;
