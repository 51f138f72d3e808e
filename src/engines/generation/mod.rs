pub mod convergence;
pub mod evolution_engine;
pub mod operators;
pub mod population_store;
pub mod progress;
pub mod reproduction;

pub use convergence::{ConvergencePolicy, GOOD_FITNESS_THRESHOLD};
pub use evolution_engine::{
    EvolutionEngine, GenerationProgress, ProgressCallback, RunReport, StatWeight, StopReason,
};
pub use operators::{crossover, mutate, random_chromosome, weighted_choice};
pub use population_store::{load_initial_population, FallbackReason, InitialPopulation, PopulationSource};
pub use progress::{FileProgressCallback, NullProgressCallback};
pub use reproduction::reproduce_population;
