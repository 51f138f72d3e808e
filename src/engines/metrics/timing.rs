use super::scores::ScoreMetrics;
use std::collections::BTreeMap;

pub struct TimingMetrics;

impl TimingMetrics {
    pub fn calculate(elapsed_seconds: &[f64]) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        if elapsed_seconds.is_empty() {
            return metrics;
        }

        let total: f64 = elapsed_seconds.iter().sum();
        metrics.insert("total_elapsed_seconds".to_string(), total);
        metrics.insert(
            "mean_elapsed_seconds".to_string(),
            ScoreMetrics::mean(elapsed_seconds),
        );
        metrics.insert(
            "max_elapsed_seconds".to_string(),
            elapsed_seconds.iter().copied().fold(0.0, f64::max),
        );

        metrics
    }
}
