use crate::types::{MatchRecord, PredictionResult, Side, TeamStats};

/// Weighted sum of one team's statistics.
///
/// Statistic `i` is multiplied by gene `i`. Non-numeric statistics contribute
/// the raw gene, acting as a bias term. Genes past the last statistic are unused.
pub fn team_score(chromosome: &[f64], stats: &TeamStats) -> f64 {
    stats
        .values()
        .iter()
        .zip(chromosome)
        .map(|(value, gene)| match value.as_number() {
            Some(number) => number * gene,
            None => *gene,
        })
        .sum()
}

/// Scores both teams of a match and picks the first-quarter winner.
///
/// The home team wins ties. When the winning score is exactly zero the
/// difference percentage is reported as 0.0.
pub fn predict_match(chromosome: &[f64], record: &MatchRecord) -> PredictionResult {
    let home_team_score = team_score(chromosome, &record.team_home);
    let away_team_score = team_score(chromosome, &record.team_away);
    let score_difference = (home_team_score - away_team_score).abs();

    let (predicted_winner, winner_score) = if home_team_score >= away_team_score {
        (Side::Home, home_team_score)
    } else {
        (Side::Away, away_team_score)
    };

    let score_difference_percentage = if winner_score == 0.0 {
        0.0
    } else {
        100.0 * score_difference / winner_score
    };

    PredictionResult {
        predicted_winner,
        home_team_score,
        away_team_score,
        score_difference,
        score_difference_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatValue;
    use serde_json::json;

    fn record(home: &[f64], away: &[f64]) -> MatchRecord {
        MatchRecord::new(
            home.iter().copied().collect(),
            away.iter().copied().collect(),
            true,
        )
    }

    #[test]
    fn weighted_sum_per_team() {
        let result = predict_match(&[1.0, 2.0], &record(&[10.0, 5.0], &[4.0, 1.0]));

        assert_eq!(result.home_team_score, 20.0);
        assert_eq!(result.away_team_score, 6.0);
        assert_eq!(result.predicted_winner, Side::Home);
        assert_eq!(result.score_difference, 14.0);
        assert_eq!(result.score_difference_percentage, 70.0);
    }

    #[test]
    fn away_wins_on_higher_score() {
        let result = predict_match(&[1.0], &record(&[3.0], &[4.0]));
        assert_eq!(result.predicted_winner, Side::Away);
        assert_eq!(result.score_difference_percentage, 25.0);
    }

    #[test]
    fn home_wins_ties() {
        let result = predict_match(&[1.0, -1.0], &record(&[2.0, 2.0], &[5.0, 5.0]));
        assert_eq!(result.home_team_score, 0.0);
        assert_eq!(result.away_team_score, 0.0);
        assert_eq!(result.predicted_winner, Side::Home);
    }

    #[test]
    fn zero_winner_score_reports_zero_percent() {
        let result = predict_match(&[0.0, 0.0], &record(&[7.0, 1.0], &[3.0, 9.0]));
        assert_eq!(result.score_difference_percentage, 0.0);
        assert!(result.score_difference_percentage.is_finite());
    }

    #[test]
    fn non_numeric_statistic_uses_raw_gene() {
        let home = TeamStats::new(vec![StatValue::Number(2.0), StatValue::Other(json!("home"))]);
        let away = TeamStats::new(vec![StatValue::Number(2.0), StatValue::Other(json!(null))]);
        let score = team_score(&[3.0, 0.5], &home);

        assert_eq!(score, 6.5);
        assert_eq!(team_score(&[3.0, 0.5], &away), 6.5);
    }

    #[test]
    fn trailing_genes_are_ignored() {
        let result = predict_match(&[1.0, 100.0, 100.0], &record(&[1.0], &[2.0]));
        assert_eq!(result.home_team_score, 1.0);
        assert_eq!(result.away_team_score, 2.0);
    }
}
