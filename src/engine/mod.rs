//! Optimization engine: configuration, coefficient schedules, main loop.

pub mod convergence_test;
pub mod optimizer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use optimizer::{Engine, RunResult, TracePoint};

/// Result type for engine construction.
pub type EngineResult<T> = Result<T, ConfigError>;

/// Configuration errors, reported before any evaluation is consumed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("population size must be positive")]
    EmptyPopulation,
    #[error("dimension must be positive")]
    ZeroDimension,
    #[error("evaluation budget must be positive")]
    ZeroBudget,
    #[error("invalid bounds: min {min} >= max {max}")]
    InvalidBounds { min: f64, max: f64 },
}

/// Linear coefficient schedule over the run: `start` at FEs=0, `end` at
/// FEs=maxFEs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub start: f64,
    pub end: f64,
}

impl Schedule {
    pub const fn new(start: f64, end: f64) -> Self {
        Schedule { start, end }
    }

    /// Value at `progress` = FEs/maxFEs.
    pub fn at(&self, progress: f64) -> f64 {
        self.start + (self.end - self.start) * progress
    }
}

/// Engine hyperparameters.
///
/// Defaults follow the published experiment setup: 20 layers, dimension
/// 10, a budget of 10000 evaluations per dimension, stall budget M = 6,
/// and the published coefficient schedules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of layers (N).
    pub population_size: usize,
    /// Problem dimension.
    pub dim: usize,
    /// Maximum objective evaluations (the run's clock and budget).
    pub max_fes: u64,
    /// Total stall budget M split between the channels by ABS.
    pub stall_budget: u32,
    /// Search-space lower bound, applied per coordinate.
    pub x_min: f64,
    /// Search-space upper bound, applied per coordinate.
    pub x_max: f64,
    /// Inertia weight schedule (default 0.99 -> 0.20).
    pub inertia: Schedule,
    /// Er acceleration schedule (default 3.0 -> 1.5).
    pub accel_er: Schedule,
    /// Ei acceleration schedule (default 2.5 -> 0.5).
    pub accel_ei: Schedule,
    /// RNG seed; `None` seeds from system entropy.
    pub seed: Option<u64>,
    /// Record a (FEs, global best) point after every evaluation.
    pub record_trace: bool,
    /// Log the global best every this many evaluations (0 disables).
    pub log_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let dim = 10;
        EngineConfig {
            population_size: 20,
            dim,
            max_fes: 10_000 * dim as u64,
            stall_budget: 6,
            x_min: -100.0,
            x_max: 100.0,
            inertia: Schedule::new(0.99, 0.20),
            accel_er: Schedule::new(3.0, 1.5),
            accel_ei: Schedule::new(2.5, 0.5),
            seed: None,
            record_trace: false,
            log_interval: 0,
        }
    }
}

impl EngineConfig {
    /// Velocity clamp: 0.2 of the search-space width per coordinate.
    pub fn v_max(&self) -> f64 {
        0.2 * (self.x_max - self.x_min)
    }

    /// Fail fast on configurations that could silently corrupt a run.
    pub fn validate(&self) -> EngineResult<()> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.dim == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.max_fes == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if self.x_min >= self.x_max {
            return Err(ConfigError::InvalidBounds {
                min: self.x_min,
                max: self.x_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_degenerate_configs() {
        let mut cfg = EngineConfig::default();
        cfg.population_size = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyPopulation));

        let mut cfg = EngineConfig::default();
        cfg.dim = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDimension));

        let mut cfg = EngineConfig::default();
        cfg.max_fes = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroBudget));

        let mut cfg = EngineConfig::default();
        cfg.x_min = 5.0;
        cfg.x_max = -5.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn schedule_interpolates_linearly() {
        let s = Schedule::new(0.99, 0.20);
        assert!((s.at(0.0) - 0.99).abs() < 1e-12);
        assert!((s.at(1.0) - 0.20).abs() < 1e-12);
        let mid = s.at(0.5);
        assert!((mid - 0.595).abs() < 1e-12);
    }

    #[test]
    fn v_max_is_a_fifth_of_the_range() {
        let mut cfg = EngineConfig::default();
        cfg.x_min = -5.0;
        cfg.x_max = 5.0;
        assert!((cfg.v_max() - 2.0).abs() < 1e-12);
    }
}
