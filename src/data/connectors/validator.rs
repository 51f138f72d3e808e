use crate::data::schema::{MatchDataset, StatSchema};
use crate::error::{CourtsideError, Result};
use crate::types::StatValue;

pub struct DataValidator;

impl DataValidator {
    /// Fitness is a share of matches, so an empty training set is refused.
    pub fn validate_minimum_matches(dataset: &MatchDataset, min_matches: usize) -> Result<()> {
        if dataset.len() < min_matches.max(1) {
            return Err(CourtsideError::DatasetValidation(format!(
                "dataset has {} matches, at least {} required",
                dataset.len(),
                min_matches.max(1)
            )));
        }
        Ok(())
    }

    /// Every statistic needs a gene; genes past the schema width are unused.
    pub fn validate_chromosome_size(schema: &StatSchema, chromosome_size: usize) -> Result<()> {
        if chromosome_size < schema.len() {
            return Err(CourtsideError::Configuration(format!(
                "chromosome_size {} is smaller than the {} statistics in the dataset schema",
                chromosome_size,
                schema.len()
            )));
        }
        if chromosome_size > schema.len() {
            log::warn!(
                "chromosome_size {} exceeds the {} schema statistics; trailing genes are unused",
                chromosome_size,
                schema.len()
            );
        }
        Ok(())
    }

    /// Names of statistics that hold a non-numeric value in any record.
    pub fn non_numeric_fields(dataset: &MatchDataset) -> Vec<String> {
        dataset
            .schema()
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                dataset.matches().iter().any(|m| {
                    matches!(m.team_home.values()[*i], StatValue::Other(_))
                        || matches!(m.team_away.values()[*i], StatValue::Other(_))
                })
            })
            .map(|(_, name)| name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchRecord, TeamStats};
    use serde_json::json;

    #[test]
    fn chromosome_must_cover_schema() {
        let schema = StatSchema::new(["a", "b", "c"]).unwrap();
        assert!(DataValidator::validate_chromosome_size(&schema, 2).is_err());
        assert!(DataValidator::validate_chromosome_size(&schema, 3).is_ok());
        assert!(DataValidator::validate_chromosome_size(&schema, 10).is_ok());
    }

    #[test]
    fn reports_non_numeric_fields() {
        let schema = StatSchema::new(["points", "venue"]).unwrap();
        let home = TeamStats::new(vec![StatValue::Number(10.0), StatValue::Other(json!("home"))]);
        let away = TeamStats::new(vec![StatValue::Number(8.0), StatValue::Number(0.0)]);
        let dataset = MatchDataset::new(schema, vec![MatchRecord::new(home, away, true)]).unwrap();

        assert_eq!(DataValidator::non_numeric_fields(&dataset), vec!["venue".to_string()]);
        assert!(DataValidator::validate_minimum_matches(&dataset, 1).is_ok());
        assert!(DataValidator::validate_minimum_matches(&dataset, 2).is_err());
    }
}
