pub mod fitness;
pub mod predictor;

pub use fitness::{apply_fitness, calculate_fitness};
pub use predictor::{predict_match, team_score};
