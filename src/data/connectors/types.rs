use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// On-disk dataset layout read by [`super::JsonConnector`]
#[derive(Debug, Clone, Deserialize)]
pub struct RawDataset {
    pub schema: Vec<String>,
    pub matches: Vec<RawMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    pub team_home: Map<String, Value>,
    pub team_away: Map<String, Value>,
    pub home_won: bool,
}

/// Summary of a loaded dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub num_matches: usize,
    pub num_fields: usize,
    pub fields: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Share of matches whose first quarter went to the home team, in percent
    pub home_win_pct: f64,
    /// Statistics that are non-numeric in at least one record
    pub non_numeric_fields: Vec<String>,
}
