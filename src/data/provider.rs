use crate::data::connectors::JsonConnector;
use crate::data::schema::{MatchDataset, StatSchema};
use crate::error::{CourtsideError, Result};
use crate::types::MatchRecord;
use chrono::NaiveDate;
use std::path::Path;

/// Source of labelled match statistics.
///
/// Scraping and database storage live behind implementations of this trait.
pub trait MatchProvider {
    fn schema(&self) -> &StatSchema;

    /// Training set, optionally restricted to matches up to `until`.
    fn training_matches(&self, until: Option<NaiveDate>) -> Result<MatchDataset>;

    /// Each team's average statistics over its matches before `date`.
    ///
    /// The returned record is unlabelled input for prediction; `home_won` is false.
    fn match_averages(&self, home: &str, away: &str, date: NaiveDate) -> Result<MatchRecord>;
}

impl MatchProvider for MatchDataset {
    fn schema(&self) -> &StatSchema {
        MatchDataset::schema(self)
    }

    fn training_matches(&self, until: Option<NaiveDate>) -> Result<MatchDataset> {
        let dataset = match until {
            Some(date) => self.until(date),
            None => self.clone(),
        };
        if dataset.is_empty() {
            return Err(CourtsideError::DatasetValidation(
                "no matches available for training".to_string(),
            ));
        }
        Ok(dataset)
    }

    fn match_averages(&self, home: &str, away: &str, date: NaiveDate) -> Result<MatchRecord> {
        let averages = |team: &str| {
            self.team_averages(team, date).ok_or_else(|| CourtsideError::NoTeamHistory {
                team: team.to_string(),
                date,
            })
        };
        let mut record = MatchRecord::new(averages(home)?, averages(away)?, false);
        record.date = Some(date);
        record.home_team = Some(home.to_string());
        record.away_team = Some(away.to_string());
        Ok(record)
    }
}

/// Provider backed by a JSON dataset file, loaded once
#[derive(Debug, Clone)]
pub struct JsonMatchProvider {
    dataset: MatchDataset,
}

impl JsonMatchProvider {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dataset = JsonConnector::load_and_validate(&path, None)?;
        log::info!(
            "Loaded {} matches with {} statistics from {}",
            dataset.len(),
            dataset.schema().len(),
            path.as_ref().display()
        );
        Ok(Self { dataset })
    }

    pub fn dataset(&self) -> &MatchDataset {
        &self.dataset
    }
}

impl MatchProvider for JsonMatchProvider {
    fn schema(&self) -> &StatSchema {
        self.dataset.schema()
    }

    fn training_matches(&self, until: Option<NaiveDate>) -> Result<MatchDataset> {
        self.dataset.training_matches(until)
    }

    fn match_averages(&self, home: &str, away: &str, date: NaiveDate) -> Result<MatchRecord> {
        self.dataset.match_averages(home, away, date)
    }
}
