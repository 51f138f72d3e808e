pub mod scores;
pub mod timing;

pub use scores::ScoreMetrics;
pub use timing::TimingMetrics;

use std::collections::BTreeMap;

/// Score and timing statistics of one validation strategy, merged into one map
pub fn summarize(scores: &[f64], elapsed_seconds: &[f64]) -> BTreeMap<String, f64> {
    let mut summary = ScoreMetrics::calculate(scores);
    summary.extend(TimingMetrics::calculate(elapsed_seconds));
    summary.insert("trials".to_string(), scores.len() as f64);
    summary
}
