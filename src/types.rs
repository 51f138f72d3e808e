use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered weight vector; gene `i` weighs the `i`-th statistic of the schema.
pub type Chromosome = Vec<f64>;

/// Ordered set of chromosomes making up one generation.
pub type Population = Vec<Chromosome>;

/// Closed interval `[min, max]`, written as a two-element array in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

impl From<[f64; 2]> for Bounds {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Bounds> for [f64; 2] {
    fn from(bounds: Bounds) -> Self {
        [bounds.min, bounds.max]
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}

/// Which side of a match a prediction refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn from_home_won(home_won: bool) -> Self {
        if home_won {
            Self::Home
        } else {
            Self::Away
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "team_home",
            Self::Away => "team_away",
        }
    }
}

/// A single statistic as delivered by the data provider.
///
/// Anything that is not a JSON number (text, null, booleans) is kept verbatim;
/// the scorer treats such fields as a bias term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Other(serde_json::Value),
}

impl StatValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Other(_) => None,
        }
    }
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One team's statistics, ordered by the dataset schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    values: Vec<StatValue>,
}

impl TeamStats {
    pub fn new(values: Vec<StatValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[StatValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<f64> for TeamStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(StatValue::Number).collect())
    }
}

/// Labelled match used for training and prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: Option<NaiveDate>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub team_home: TeamStats,
    pub team_away: TeamStats,
    /// Whether the home team won the first quarter
    pub home_won: bool,
}

impl MatchRecord {
    pub fn new(team_home: TeamStats, team_away: TeamStats, home_won: bool) -> Self {
        Self {
            date: None,
            home_team: None,
            away_team: None,
            team_home,
            team_away,
            home_won,
        }
    }

    pub fn winner(&self) -> Side {
        Side::from_home_won(self.home_won)
    }
}

/// Chromosome paired with its fitness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChromosome {
    pub chromosome: Chromosome,
    pub fitness: f64,
}

/// Scored chromosomes, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedPopulation {
    individuals: Vec<ScoredChromosome>,
}

impl RankedPopulation {
    /// Sorts by fitness descending. Ties keep no particular order.
    pub fn from_scored(mut individuals: Vec<ScoredChromosome>) -> Self {
        individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Self { individuals }
    }

    pub fn best(&self) -> Option<&ScoredChromosome> {
        self.individuals.first()
    }

    pub fn as_slice(&self) -> &[ScoredChromosome] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredChromosome> {
        self.individuals.iter()
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Chromosomes in rank order.
    pub fn chromosomes(&self) -> Population {
        self.individuals
            .iter()
            .map(|s| s.chromosome.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a RankedPopulation {
    type Item = &'a ScoredChromosome;
    type IntoIter = std::slice::Iter<'a, ScoredChromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

/// Outcome of scoring one match with one chromosome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_winner: Side,
    pub home_team_score: f64,
    pub away_team_score: f64,
    pub score_difference: f64,
    pub score_difference_percentage: f64,
}
