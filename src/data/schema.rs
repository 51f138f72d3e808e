use crate::error::{CourtsideError, Result};
use crate::types::{MatchRecord, StatValue, TeamStats};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Ordered statistic names shared by every match record and every chromosome.
///
/// Gene `i` of a chromosome weighs field `i` of this schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StatSchema {
    fields: Vec<String>,
}

impl StatSchema {
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(CourtsideError::DatasetValidation(
                "schema must name at least one statistic".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.as_str()) {
                return Err(CourtsideError::DatasetValidation(format!(
                    "schema lists '{}' more than once",
                    field
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Orders a raw name→value mapping by this schema.
    ///
    /// Every schema field must be present and no other field may appear.
    pub fn align(&self, stats: &Map<String, Value>) -> Result<TeamStats> {
        if let Some(extra) = stats.keys().find(|k| self.index_of(k).is_none()) {
            return Err(CourtsideError::DatasetValidation(format!(
                "statistic '{}' is not part of the schema",
                extra
            )));
        }
        let values = self
            .fields
            .iter()
            .map(|field| {
                stats
                    .get(field)
                    .map(stat_value)
                    .ok_or_else(|| {
                        CourtsideError::DatasetValidation(format!("missing statistic '{}'", field))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(TeamStats::new(values))
    }
}

fn stat_value(value: &Value) -> StatValue {
    match value {
        Value::Bool(flag) => StatValue::Number(if *flag { 1.0 } else { 0.0 }),
        _ => match value.as_f64() {
            Some(number) => StatValue::Number(number),
            None => StatValue::Other(value.clone()),
        },
    }
}

impl TryFrom<Vec<String>> for StatSchema {
    type Error = CourtsideError;

    fn try_from(fields: Vec<String>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<StatSchema> for Vec<String> {
    fn from(schema: StatSchema) -> Self {
        schema.fields
    }
}

/// Labelled matches together with the schema their statistics follow
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDataset {
    schema: StatSchema,
    matches: Vec<MatchRecord>,
}

impl MatchDataset {
    /// Builds a dataset, checking every record against the schema width.
    pub fn new(schema: StatSchema, matches: Vec<MatchRecord>) -> Result<Self> {
        for (i, record) in matches.iter().enumerate() {
            for (side, stats) in [("team_home", &record.team_home), ("team_away", &record.team_away)] {
                if stats.len() != schema.len() {
                    return Err(CourtsideError::DatasetValidation(format!(
                        "match {} {} has {} statistics, schema has {}",
                        i,
                        side,
                        stats.len(),
                        schema.len()
                    )));
                }
            }
        }
        Ok(Self { schema, matches })
    }

    pub fn schema(&self) -> &StatSchema {
        &self.schema
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches played on or before `date`; undated matches are kept.
    pub fn until(&self, date: NaiveDate) -> Self {
        Self {
            schema: self.schema.clone(),
            matches: self
                .matches
                .iter()
                .filter(|m| m.date.is_none_or(|d| d <= date))
                .cloned()
                .collect(),
        }
    }

    /// Mean statistics of `team` over its matches played before `date`, home or away.
    ///
    /// A field with no numeric observation keeps its most recent value.
    /// Undated matches are skipped.
    pub fn team_averages(&self, team: &str, date: NaiveDate) -> Option<TeamStats> {
        let mut history: Vec<(NaiveDate, &TeamStats)> = self
            .matches
            .iter()
            .filter_map(|m| {
                let played = m.date.filter(|d| *d < date)?;
                if m.home_team.as_deref() == Some(team) {
                    Some((played, &m.team_home))
                } else if m.away_team.as_deref() == Some(team) {
                    Some((played, &m.team_away))
                } else {
                    None
                }
            })
            .collect();
        history.sort_by_key(|(played, _)| *played);
        let (_, latest) = history.last()?;

        let values = (0..self.schema.len())
            .map(|i| {
                let numbers: Vec<f64> = history
                    .iter()
                    .filter_map(|(_, stats)| stats.values()[i].as_number())
                    .collect();
                if numbers.is_empty() {
                    latest.values()[i].clone()
                } else {
                    StatValue::Number(numbers.iter().sum::<f64>() / numbers.len() as f64)
                }
            })
            .collect();
        Some(TeamStats::new(values))
    }
}
