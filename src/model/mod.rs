//! Layer/particle data model.
//!
//! A layer pairs one exploration particle (Er) with one exploitation
//! particle (Ei) and carries the shared state both channels compete over:
//! the layer best `L`, the exemplar `Q` the Er channel steers toward, and
//! the reward counter that gates exemplar reconstruction.

use serde::{Deserialize, Serialize};

/// Search role of a particle within its layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelRole {
    Exploration,
    Exploitation,
}

/// One velocity-driven search point.
///
/// `stall` counts consecutive evaluations of this particle that failed to
/// improve the layer best. It is the alpha counter the admission-control
/// thresholds are compared against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub role: ChannelRole,
    pub stall: u32,
}

impl Particle {
    pub fn new(position: Vec<f64>, velocity: Vec<f64>, role: ChannelRole) -> Self {
        Particle {
            position,
            velocity,
            role,
            stall: 0,
        }
    }
}

/// One slot of the population: an Er/Ei particle pair plus layer-level state.
///
/// Invariant: `exemplar` is rewritten only by exemplar construction, never
/// by channel updates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Layer {
    pub er: Particle,
    pub ei: Particle,
    /// Best position this layer has ever evaluated (`L`).
    pub best: Vec<f64>,
    /// Fitness of `best` (`L_fit`), minimization.
    pub best_fit: f64,
    /// Attraction target for the Er channel (`Q`).
    pub exemplar: Vec<f64>,
    /// Consecutive Er-driven improvements of the layer best (beta).
    /// Reset only at reconstruction.
    pub reward: u32,
}

impl Layer {
    /// Seed a layer from one shared random position/velocity pair.
    ///
    /// Both channels start at the identical point; they diverge only
    /// through their different velocity updates.
    pub fn seeded(position: Vec<f64>, velocity: Vec<f64>) -> Self {
        let dim = position.len();
        Layer {
            er: Particle::new(position.clone(), velocity.clone(), ChannelRole::Exploration),
            ei: Particle::new(position.clone(), velocity, ChannelRole::Exploitation),
            best: position,
            best_fit: f64::INFINITY,
            exemplar: vec![0.0; dim],
            reward: 0,
        }
    }

    /// Zero both stall counters and the reward counter.
    ///
    /// Called by the engine immediately before exemplar construction.
    pub fn reset_counters(&mut self) {
        self.er.stall = 0;
        self.ei.stall = 0;
        self.reward = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_layer_duplicates_state_into_both_channels() {
        let layer = Layer::seeded(vec![1.0, -2.0], vec![0.5, 0.25]);

        assert_eq!(layer.er.position, layer.ei.position);
        assert_eq!(layer.er.velocity, layer.ei.velocity);
        assert_eq!(layer.er.role, ChannelRole::Exploration);
        assert_eq!(layer.ei.role, ChannelRole::Exploitation);
        assert_eq!(layer.best, vec![1.0, -2.0]);
        assert!(layer.best_fit.is_infinite());
        assert_eq!(layer.exemplar.len(), 2);
    }

    #[test]
    fn reset_counters_zeroes_all_three() {
        let mut layer = Layer::seeded(vec![0.0], vec![0.0]);
        layer.er.stall = 7;
        layer.ei.stall = 3;
        layer.reward = 2;

        layer.reset_counters();

        assert_eq!(layer.er.stall, 0);
        assert_eq!(layer.ei.stall, 0);
        assert_eq!(layer.reward, 0);
    }
}
