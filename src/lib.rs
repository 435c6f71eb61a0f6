//! CHxPSO-ABS: a layered particle swarm optimizer with adaptive
//! bi-strategy evaluation control.
//!
//! Each population slot (a "layer") pairs an exploration particle with an
//! exploitation particle, and an admission-control rule (ABS) decides per
//! layer which of the two spends the next objective evaluation, shifting
//! the budget from exploration to exploitation as the run advances. Two
//! variants differ only in how a layer's exemplar attraction target is
//! rebuilt: cognitive-only (own best) and comprehensive learning
//! (cross-layer coordinate borrowing).

pub mod benchmarks;
pub mod engine;
pub mod model;
pub mod report;
pub mod strategy;

pub use engine::{ConfigError, Engine, EngineConfig, RunResult, Schedule, TracePoint};
pub use model::{ChannelRole, Layer, Particle};
pub use report::RunStats;
pub use strategy::{CognitiveExemplar, ComprehensiveLearning, ExemplarStrategy};
