//! Exemplar construction policies.
//!
//! The exemplar `Q` is the only thing that distinguishes the optimizer
//! variants, so it is the one injected seam: the engine calls
//! [`ExemplarStrategy::construct`] at initialization and after every
//! reconstruct action, and stays agnostic to which policy is behind it.

use crate::model::Layer;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

/// Rebuilds one layer's exemplar vector in place.
///
/// The caller zeroes the layer's counters before invoking this; the
/// strategy itself touches nothing but `layers[index].exemplar` (and its
/// own diagnostic state).
pub trait ExemplarStrategy {
    /// `progress` is FEs/maxFEs at the moment of the rebuild, in [0, 1].
    fn construct(&mut self, layers: &mut [Layer], index: usize, rng: &mut StdRng, progress: f64);
}

/// Cognitive-only policy: the exemplar is the layer's own best vector.
#[derive(Clone, Copy, Debug, Default)]
pub struct CognitiveExemplar;

impl ExemplarStrategy for CognitiveExemplar {
    fn construct(&mut self, layers: &mut [Layer], index: usize, _rng: &mut StdRng, _progress: f64) {
        let layer = &mut layers[index];
        layer.exemplar.clone_from(&layer.best);
    }
}

/// Comprehensive-learning policy: each coordinate is borrowed from a
/// uniformly random layer's best with probability `Pc`, otherwise taken
/// from the layer's own best. `Pc` rises linearly over the run so late
/// exemplars mix more cross-layer information.
#[derive(Clone, Debug)]
pub struct ComprehensiveLearning {
    pc_start: f64,
    pc_end: f64,
    /// Per layer, per coordinate: which layer donated it at the last
    /// rebuild. Diagnostic only, never read by the search itself.
    donors: Vec<Vec<usize>>,
}

impl ComprehensiveLearning {
    pub fn new(population_size: usize, dim: usize) -> Self {
        ComprehensiveLearning {
            pc_start: 0.05,
            pc_end: 0.5,
            donors: vec![vec![0; dim]; population_size],
        }
    }

    /// Learning probability at the given point in the run.
    pub fn learning_probability(&self, progress: f64) -> f64 {
        self.pc_start + (self.pc_end - self.pc_start) * progress
    }

    /// Donor layer recorded for each coordinate at the last rebuild of
    /// `index`.
    pub fn donors(&self, index: usize) -> &[usize] {
        &self.donors[index]
    }
}

impl ExemplarStrategy for ComprehensiveLearning {
    fn construct(&mut self, layers: &mut [Layer], index: usize, rng: &mut StdRng, progress: f64) {
        let n = layers.len();
        let dim = layers[index].exemplar.len();
        let pc = self.learning_probability(progress);

        for d in 0..dim {
            let donor = if rng.gen::<f64>() < pc {
                // Uniform over all layers, clamped against the dim==n edge
                // of the scaled draw.
                let picked = (rng.gen::<f64>() * n as f64) as usize;
                picked.min(n - 1)
            } else {
                index
            };
            layers[index].exemplar[d] = layers[donor].best[d];
            self.donors[index][d] = donor;
        }
        debug!("[Exemplar] layer {} rebuilt with Pc={:.3}", index, pc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Layer;
    use rand::SeedableRng;

    fn population(n: usize, dim: usize) -> Vec<Layer> {
        (0..n)
            .map(|i| {
                let mut layer = Layer::seeded(vec![0.0; dim], vec![0.0; dim]);
                // Distinct bests so the donor of each coordinate is visible.
                layer.best = vec![i as f64 + 1.0; dim];
                layer
            })
            .collect()
    }

    #[test]
    fn cognitive_copies_own_best() {
        let mut layers = population(4, 3);
        let mut rng = StdRng::seed_from_u64(7);
        let mut strategy = CognitiveExemplar;

        strategy.construct(&mut layers, 2, &mut rng, 0.5);

        assert_eq!(layers[2].exemplar, layers[2].best);
    }

    #[test]
    fn learning_probability_ramps_linearly() {
        let strategy = ComprehensiveLearning::new(5, 2);
        assert!((strategy.learning_probability(0.0) - 0.05).abs() < 1e-12);
        assert!((strategy.learning_probability(1.0) - 0.5).abs() < 1e-12);
        assert!((strategy.learning_probability(0.5) - 0.275).abs() < 1e-12);
    }

    #[test]
    fn zero_pc_never_borrows() {
        let mut layers = population(5, 8);
        let mut rng = StdRng::seed_from_u64(11);
        let mut strategy = ComprehensiveLearning::new(5, 8);
        strategy.pc_start = 0.0;
        strategy.pc_end = 0.0;

        strategy.construct(&mut layers, 3, &mut rng, 0.7);

        assert_eq!(layers[3].exemplar, layers[3].best);
        assert!(strategy.donors(3).iter().all(|&d| d == 3));
    }

    #[test]
    fn full_pc_always_draws_a_donor() {
        let mut layers = population(5, 32);
        let mut rng = StdRng::seed_from_u64(13);
        let mut strategy = ComprehensiveLearning::new(5, 32);
        strategy.pc_start = 1.0;
        strategy.pc_end = 1.0;

        strategy.construct(&mut layers, 1, &mut rng, 0.0);

        for (d, &donor) in strategy.donors(1).iter().enumerate() {
            assert!(donor < 5);
            assert_eq!(layers[1].exemplar[d], layers[donor].best[d]);
        }
        // With 32 coordinates over 5 layers, a uniform donor draw that only
        // ever picked layer 1 would be astronomically unlikely.
        assert!(strategy.donors(1).iter().any(|&d| d != 1));
    }

    #[test]
    fn construct_touches_only_the_target_exemplar() {
        let mut layers = population(3, 4);
        let before: Vec<Vec<f64>> = layers.iter().map(|l| l.best.clone()).collect();
        let mut rng = StdRng::seed_from_u64(17);
        let mut strategy = ComprehensiveLearning::new(3, 4);

        strategy.construct(&mut layers, 0, &mut rng, 1.0);

        for (layer, best) in layers.iter().zip(before) {
            assert_eq!(layer.best, best);
        }
        assert_eq!(layers[1].exemplar, vec![0.0; 4]);
        assert_eq!(layers[2].exemplar, vec![0.0; 4]);
    }
}
