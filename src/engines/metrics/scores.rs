use std::collections::BTreeMap;

/// Descriptive statistics over the fitness scores of repeated trials
pub struct ScoreMetrics;

impl ScoreMetrics {
    pub fn calculate(scores: &[f64]) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        if scores.is_empty() {
            return metrics;
        }

        let mean = Self::mean(scores);
        metrics.insert("mean_score".to_string(), mean);
        metrics.insert("std_dev_score".to_string(), Self::std_dev(scores, mean));
        metrics.insert("median_score".to_string(), Self::median(scores));

        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        metrics.insert("min_score".to_string(), min);
        metrics.insert("max_score".to_string(), max);

        metrics
    }

    pub(crate) fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Population standard deviation
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        let variance = values
            .iter()
            .map(|&v| (v - mean).powi(2))
            .sum::<f64>()
            / values.len() as f64;

        variance.sqrt()
    }

    fn median(values: &[f64]) -> f64 {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }
}
