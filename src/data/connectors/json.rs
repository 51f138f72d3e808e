use super::{
    types::{DatasetMetadata, RawDataset},
    validator::DataValidator,
};
use crate::data::schema::{MatchDataset, StatSchema};
use crate::error::{CourtsideError, Result};
use crate::types::MatchRecord;
use std::path::Path;

pub struct JsonConnector;

impl JsonConnector {
    /// Load a JSON dataset file into a schema-checked dataset
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MatchDataset> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CourtsideError::DataLoading(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents).map_err(|e| match e {
            CourtsideError::Serde(e) => {
                CourtsideError::DataLoading(format!("Failed to parse {}: {}", path.display(), e))
            }
            other => other,
        })
    }

    /// Parse dataset JSON already in memory
    pub fn parse(contents: &str) -> Result<MatchDataset> {
        let raw: RawDataset = serde_json::from_str(contents)?;
        let schema = StatSchema::new(raw.schema)?;

        let matches = raw
            .matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| -> Result<MatchRecord> {
                let align = |stats: &serde_json::Map<String, serde_json::Value>| {
                    schema.align(stats).map_err(|e| {
                        CourtsideError::DatasetValidation(format!("match {}: {}", i, e))
                    })
                };
                Ok(MatchRecord {
                    date: m.date,
                    home_team: m.home_team,
                    away_team: m.away_team,
                    team_home: align(&m.team_home)?,
                    team_away: align(&m.team_away)?,
                    home_won: m.home_won,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        MatchDataset::new(schema, matches)
    }

    /// Load and validate a dataset for training
    pub fn load_and_validate<P: AsRef<Path>>(path: P, min_matches: Option<usize>) -> Result<MatchDataset> {
        let dataset = Self::load(&path)?;
        DataValidator::validate_minimum_matches(&dataset, min_matches.unwrap_or(1))?;

        let non_numeric = DataValidator::non_numeric_fields(&dataset);
        if !non_numeric.is_empty() {
            log::warn!(
                "Non-numeric statistics act as bias terms: {:?}",
                non_numeric
            );
        }

        Ok(dataset)
    }

    /// Create metadata for a loaded dataset
    pub fn create_metadata<P: AsRef<Path>>(path: P, dataset: &MatchDataset) -> DatasetMetadata {
        let dates = dataset.matches().iter().filter_map(|m| m.date);
        let date_range = dates.clone().min().zip(dates.max());

        let home_wins = dataset.matches().iter().filter(|m| m.home_won).count();
        let home_win_pct = if dataset.is_empty() {
            0.0
        } else {
            100.0 * home_wins as f64 / dataset.len() as f64
        };

        DatasetMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_matches: dataset.len(),
            num_fields: dataset.schema().len(),
            fields: dataset.schema().fields().to_vec(),
            date_range,
            home_win_pct,
            non_numeric_fields: DataValidator::non_numeric_fields(dataset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatValue;
    use chrono::NaiveDate;

    const DATASET: &str = r#"{
        "schema": ["points", "rebounds", "venue"],
        "matches": [
            {
                "date": "2018-06-20",
                "home_team": "Lakers",
                "away_team": "Celtics",
                "team_home": {"points": 28, "rebounds": 11, "venue": null},
                "team_away": {"points": 25, "rebounds": 14, "venue": null},
                "home_won": true
            },
            {
                "date": "2018-06-22",
                "home_team": "Celtics",
                "away_team": "Lakers",
                "team_home": {"points": 22, "rebounds": 9, "venue": null},
                "team_away": {"points": 30, "rebounds": 10, "venue": null},
                "home_won": false
            }
        ]
    }"#;

    #[test]
    fn parses_dataset_in_schema_order() {
        let dataset = JsonConnector::parse(DATASET).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.schema().fields(), &["points", "rebounds", "venue"]);
        let first = &dataset.matches()[0];
        assert_eq!(first.team_home.values()[1], StatValue::Number(11.0));
        assert_eq!(first.team_home.values()[2], StatValue::Other(serde_json::Value::Null));
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2018, 6, 20));
    }

    #[test]
    fn metadata_summarises_dataset() {
        let dataset = JsonConnector::parse(DATASET).unwrap();
        let metadata = JsonConnector::create_metadata("matches.json", &dataset);

        assert_eq!(metadata.num_matches, 2);
        assert_eq!(metadata.home_win_pct, 50.0);
        assert_eq!(metadata.non_numeric_fields, vec!["venue".to_string()]);
        assert_eq!(
            metadata.date_range,
            NaiveDate::from_ymd_opt(2018, 6, 20).zip(NaiveDate::from_ymd_opt(2018, 6, 22))
        );
    }

    #[test]
    fn missing_file_is_a_loading_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonConnector::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CourtsideError::DataLoading(_)));
    }

    #[test]
    fn misaligned_record_is_rejected() {
        let bad = r#"{"schema": ["points"], "matches": [
            {"team_home": {"points": 1}, "team_away": {"assists": 2}, "home_won": true}
        ]}"#;
        assert!(matches!(
            JsonConnector::parse(bad),
            Err(CourtsideError::DatasetValidation(_))
        ));
    }
}
