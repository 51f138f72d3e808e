//! Genetic-algorithm optimiser that learns per-statistic weights predicting
//! the first-quarter winner of basketball matches.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod persistence;
pub mod predict;
pub mod types;

pub use error::{CourtsideError, Result};
