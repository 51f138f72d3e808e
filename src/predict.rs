use crate::config::RunConfig;
use crate::data::MatchProvider;
use crate::engines::evaluation::predict_match;
use crate::engines::generation::random_chromosome;
use crate::error::{CourtsideError, Result};
use crate::persistence::{PopulationStore, SnapshotLoad};
use crate::types::{Chromosome, Side};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the chromosome behind a prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromosomeSource {
    Supplied,
    StoredBest,
    StoredPopulation,
    Random,
}

impl fmt::Display for ChromosomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self {
            Self::Supplied => "supplied chromosome",
            Self::StoredBest => "stored best chromosome",
            Self::StoredPopulation => "first stored chromosome",
            Self::Random => "random chromosome",
        };
        f.write_str(source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    pub home_team: String,
    pub away_team: String,
    pub date: NaiveDate,
    pub predicted_winner: String,
    pub predicted_side: Side,
    pub home_team_score: f64,
    pub away_team_score: f64,
    pub score_difference: f64,
    pub score_difference_percentage: f64,
    pub chromosome_source: ChromosomeSource,
}

impl fmt::Display for MatchPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vs {} on {}", self.home_team, self.away_team, self.date)?;
        writeln!(f, "Predicted first quarter winner: {}", self.predicted_winner)?;
        writeln!(f, "{} score: {:.4}", self.home_team, self.home_team_score)?;
        writeln!(f, "{} score: {:.4}", self.away_team, self.away_team_score)?;
        write!(
            f,
            "Difference: {:.4} ({:.2}%)",
            self.score_difference, self.score_difference_percentage
        )
    }
}

/// Predicts the first-quarter winner of one fixture.
///
/// Uses `chromosome` when given, otherwise the best chromosome of the stored
/// snapshot, then its first chromosome, and finally a random one.
#[allow(clippy::too_many_arguments)]
pub fn predict_score<P, S, R>(
    provider: &P,
    store: &S,
    home: &str,
    away: &str,
    date: NaiveDate,
    chromosome: Option<Chromosome>,
    config: &RunConfig,
    rng: &mut R,
) -> Result<MatchPrediction>
where
    P: MatchProvider + ?Sized,
    S: PopulationStore + ?Sized,
    R: Rng + ?Sized,
{
    let record = provider.match_averages(home, away, date)?;
    let (chromosome, chromosome_source) = match chromosome {
        Some(chromosome) => (chromosome, ChromosomeSource::Supplied),
        None => stored_chromosome(store, config, rng),
    };
    log::info!("Predicting with {}", chromosome_source);

    let width = provider.schema().len();
    if chromosome.len() < width {
        return Err(CourtsideError::Configuration(format!(
            "chromosome has {} genes but the dataset has {} statistics",
            chromosome.len(),
            width
        )));
    }

    let result = predict_match(&chromosome, &record);
    let predicted_winner = match result.predicted_winner {
        Side::Home => home,
        Side::Away => away,
    };

    Ok(MatchPrediction {
        home_team: home.to_string(),
        away_team: away.to_string(),
        date,
        predicted_winner: predicted_winner.to_string(),
        predicted_side: result.predicted_winner,
        home_team_score: result.home_team_score,
        away_team_score: result.away_team_score,
        score_difference: result.score_difference,
        score_difference_percentage: result.score_difference_percentage,
        chromosome_source,
    })
}

fn stored_chromosome<S, R>(store: &S, config: &RunConfig, rng: &mut R) -> (Chromosome, ChromosomeSource)
where
    S: PopulationStore + ?Sized,
    R: Rng + ?Sized,
{
    match store.load() {
        SnapshotLoad::Loaded(snapshot) => {
            if let Some(best) = snapshot.best {
                return (best.chromosome, ChromosomeSource::StoredBest);
            }
            if let Some(first) = snapshot.population.into_iter().next() {
                return (first, ChromosomeSource::StoredPopulation);
            }
        }
        SnapshotLoad::Corrupt(reason) => log::warn!("Ignoring stored snapshot: {}", reason),
        SnapshotLoad::NotFound => {}
    }

    log::warn!("No stored chromosome, predicting with a random one");
    (
        random_chromosome(config.chromosome_size, config.weight_range, rng),
        ChromosomeSource::Random,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MatchDataset, StatSchema};
    use crate::persistence::{GenerationSnapshot, MemorySnapshotStore};
    use crate::types::{MatchRecord, ScoredChromosome};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 6, 20).unwrap()
    }

    fn dataset() -> MatchDataset {
        let mut record = MatchRecord::new(
            [30.0, 2.0].into_iter().collect(),
            [20.0, 2.0].into_iter().collect(),
            true,
        );
        record.date = NaiveDate::from_ymd_opt(2018, 6, 10);
        record.home_team = Some("Lakers".to_string());
        record.away_team = Some("Celtics".to_string());
        MatchDataset::new(StatSchema::new(["points", "timeouts"]).unwrap(), vec![record]).unwrap()
    }

    fn config() -> RunConfig {
        RunConfig {
            chromosome_size: 2,
            ..RunConfig::default()
        }
    }

    #[test]
    fn supplied_chromosome_names_the_winner() {
        let mut rng = StdRng::seed_from_u64(1);
        let prediction = predict_score(
            &dataset(),
            &MemorySnapshotStore::new(),
            "Lakers",
            "Celtics",
            date(),
            Some(vec![-1.0, 0.0]),
            &config(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(prediction.predicted_winner, "Celtics");
        assert_eq!(prediction.predicted_side, Side::Away);
        assert_eq!(prediction.home_team_score, -30.0);
        assert_eq!(prediction.score_difference, 10.0);
        assert_eq!(prediction.chromosome_source, ChromosomeSource::Supplied);
    }

    #[test]
    fn prefers_stored_best_chromosome() {
        let mut rng = StdRng::seed_from_u64(2);
        let store = MemorySnapshotStore::with_snapshot(GenerationSnapshot::new(
            vec![vec![-1.0, 0.0]],
            Some(ScoredChromosome {
                chromosome: vec![1.0, 0.0],
                fitness: 90.0,
            }),
        ));

        let prediction =
            predict_score(&dataset(), &store, "Lakers", "Celtics", date(), None, &config(), &mut rng)
                .unwrap();

        assert_eq!(prediction.predicted_winner, "Lakers");
        assert_eq!(prediction.chromosome_source, ChromosomeSource::StoredBest);
        assert!((prediction.score_difference_percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_random_chromosome() {
        let mut rng = StdRng::seed_from_u64(3);
        let prediction = predict_score(
            &dataset(),
            &MemorySnapshotStore::new(),
            "Lakers",
            "Celtics",
            date(),
            None,
            &config(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(prediction.chromosome_source, ChromosomeSource::Random);
    }

    #[test]
    fn team_without_earlier_matches_is_an_error() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = predict_score(
            &dataset(),
            &MemorySnapshotStore::new(),
            "Bulls",
            "Lakers",
            date(),
            None,
            &config(),
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(err, CourtsideError::NoTeamHistory { .. }));
    }

    #[test]
    fn narrow_chromosome_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = predict_score(
            &dataset(),
            &MemorySnapshotStore::new(),
            "Lakers",
            "Celtics",
            date(),
            Some(vec![1.0]),
            &config(),
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(err, CourtsideError::Configuration(_)));
    }
}
