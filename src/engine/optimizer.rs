//! CHxPSO-ABS main loop.
//!
//! The engine owns the layer population, the global best, and the
//! evaluation clock. Every outer round it snapshots the ABS thresholds
//! once, then walks the layers in order: admission control picks a
//! channel (rebuilding the exemplar first when told to), the chosen
//! particle takes one velocity/position step, the objective is billed one
//! evaluation, and the counters and bests are updated under the channel's
//! reward policy. The run stops the instant the budget is spent, even
//! mid-round.

use crate::engine::{EngineConfig, EngineResult};
use crate::model::Layer;
use crate::strategy::{
    select_action, Action, CognitiveExemplar, ComprehensiveLearning, ExemplarStrategy, Thresholds,
};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One sample of the convergence trace.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TracePoint {
    pub evaluations: u64,
    pub best_fitness: f64,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunResult {
    pub best_position: Vec<f64>,
    pub best_fitness: f64,
    pub evaluations: u64,
    /// Global-best-vs-evaluations curve; empty unless
    /// [`EngineConfig::record_trace`] is set.
    pub trace: Vec<TracePoint>,
}

/// Layered bi-channel particle swarm optimizer.
///
/// Generic over the exemplar-construction policy, which is the only
/// behavioral difference between the cognitive-only and the
/// comprehensive-learning variants.
pub struct Engine<S: ExemplarStrategy> {
    config: EngineConfig,
    strategy: S,
    layers: Vec<Layer>,
    global_best: Vec<f64>,
    global_best_fit: f64,
    fes: u64,
    rng: StdRng,
    trace: Vec<TracePoint>,
}

impl Engine<CognitiveExemplar> {
    /// Cognitive-only variant: the exemplar is the layer's own best.
    pub fn cognitive(config: EngineConfig) -> EngineResult<Self> {
        Engine::new(config, CognitiveExemplar)
    }
}

impl Engine<ComprehensiveLearning> {
    /// Comprehensive-learning variant: exemplar coordinates are borrowed
    /// across layers with a probability that rises over the run.
    pub fn comprehensive_learning(config: EngineConfig) -> EngineResult<Self> {
        let strategy = ComprehensiveLearning::new(config.population_size, config.dim);
        Engine::new(config, strategy)
    }
}

impl<S: ExemplarStrategy> Engine<S> {
    /// Build an engine with an injected exemplar policy.
    ///
    /// Fails fast on degenerate configurations; no evaluation is consumed
    /// until [`Engine::run`].
    pub fn new(config: EngineConfig, strategy: S) -> EngineResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dim = config.dim;
        Ok(Engine {
            config,
            strategy,
            layers: Vec::new(),
            global_best: vec![0.0; dim],
            global_best_fit: f64::INFINITY,
            fes: 0,
            rng,
            trace: Vec::new(),
        })
    }

    /// Evaluations consumed so far.
    pub fn evaluations(&self) -> u64 {
        self.fes
    }

    /// Best fitness observed so far.
    pub fn best_fitness(&self) -> f64 {
        self.global_best_fit
    }

    /// Layer population, for inspection after a run.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The injected exemplar policy, for diagnostic access.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Run to budget exhaustion and return the global best.
    ///
    /// The objective must be total; a non-finite fitness is logged and
    /// treated as worse than any finite value, and still counts against
    /// the budget.
    pub fn run<F>(&mut self, mut objective: F) -> RunResult
    where
        F: FnMut(&[f64]) -> f64,
    {
        info!(
            "🧬 [Engine] starting run (N={}, dim={}, maxFEs={}, M={})",
            self.config.population_size, self.config.dim, self.config.max_fes, self.config.stall_budget
        );

        self.initialize(&mut objective);

        while self.fes < self.config.max_fes {
            // One threshold snapshot per round; every layer sees the same pair.
            let thresholds = Thresholds::compute(
                self.fes,
                self.config.max_fes,
                self.config.stall_budget,
            );
            for index in 0..self.layers.len() {
                if self.fes >= self.config.max_fes {
                    break;
                }
                let mut action = select_action(&self.layers[index], thresholds);
                if action == Action::Reconstruct {
                    self.reconstruct(index);
                    // Re-query with fresh counters; no evaluation consumed.
                    action = select_action(&self.layers[index], thresholds);
                }
                match action {
                    Action::UseEr => self.step_er(&mut objective, index),
                    Action::UseEi => self.step_ei(&mut objective, index),
                    Action::Reconstruct => continue,
                }
            }
        }

        info!(
            "🏆 [Engine] run complete: best fitness {:.6e} after {} evaluations",
            self.global_best_fit, self.fes
        );

        RunResult {
            best_position: self.global_best.clone(),
            best_fitness: self.global_best_fit,
            evaluations: self.fes,
            trace: std::mem::take(&mut self.trace),
        }
    }

    /// Seed every layer with one shared random position/velocity pair,
    /// evaluate the seeds while budget remains, then build each layer's
    /// initial exemplar.
    fn initialize<F>(&mut self, objective: &mut F)
    where
        F: FnMut(&[f64]) -> f64,
    {
        let v_max = self.config.v_max();
        let pos_dist = Uniform::new_inclusive(self.config.x_min, self.config.x_max);
        let vel_dist = Uniform::new_inclusive(-v_max, v_max);

        self.layers = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let position: Vec<f64> = (0..self.config.dim)
                .map(|_| pos_dist.sample(&mut self.rng))
                .collect();
            let velocity: Vec<f64> = (0..self.config.dim)
                .map(|_| vel_dist.sample(&mut self.rng))
                .collect();
            self.layers.push(Layer::seeded(position, velocity));
        }

        for index in 0..self.layers.len() {
            if self.fes >= self.config.max_fes {
                // Budget smaller than the population: later layers keep
                // their random seed unevaluated.
                break;
            }
            let fitness = sanitize(objective(&self.layers[index].best));
            self.fes += 1;
            self.layers[index].best_fit = fitness;
            if fitness < self.global_best_fit {
                self.global_best_fit = fitness;
                self.global_best.clone_from(&self.layers[index].best);
            }
            self.record();
        }

        let progress = self.progress();
        for index in 0..self.layers.len() {
            self.strategy
                .construct(&mut self.layers, index, &mut self.rng, progress);
        }
        debug!(
            "[Engine] initialized {} layers, best {:.6e}",
            self.layers.len(),
            self.global_best_fit
        );
    }

    /// Zero the layer's counters and rebuild its exemplar.
    fn reconstruct(&mut self, index: usize) {
        self.layers[index].reset_counters();
        let progress = self.progress();
        self.strategy
            .construct(&mut self.layers, index, &mut self.rng, progress);
    }

    /// Exploration step: steer toward the layer exemplar only.
    ///
    /// Reward policy: any layer-best improvement resets the stall counter
    /// and increments the layer reward.
    fn step_er<F>(&mut self, objective: &mut F, index: usize)
    where
        F: FnMut(&[f64]) -> f64,
    {
        let t = self.progress();
        let w = self.config.inertia.at(t);
        let c = self.config.accel_er.at(t);
        let v_max = self.config.v_max();
        let (x_min, x_max) = (self.config.x_min, self.config.x_max);

        {
            let layer = &mut self.layers[index];
            for d in 0..layer.er.position.len() {
                let r: f64 = self.rng.gen();
                let v = w * layer.er.velocity[d]
                    + c * r * (layer.exemplar[d] - layer.er.position[d]);
                let (x, v) = clamp_step(layer.er.position[d], v, v_max, x_min, x_max);
                layer.er.position[d] = x;
                layer.er.velocity[d] = v;
            }
        }

        let fitness = sanitize(objective(&self.layers[index].er.position));
        self.fes += 1;

        let layer = &mut self.layers[index];
        if fitness >= layer.best_fit {
            layer.er.stall += 1;
        } else {
            layer.er.stall = 0;
            layer.reward += 1;
            layer.best.clone_from(&layer.er.position);
            layer.best_fit = fitness;
            if fitness < self.global_best_fit {
                self.global_best_fit = fitness;
                self.global_best.clone_from(&layer.best);
            }
        }
        self.record();
    }

    /// Exploitation step: steer toward the midpoint of the exemplar and
    /// the global best.
    ///
    /// Reward policy is deliberately asymmetric to the Er channel: the
    /// stall counter resets only when the global best advanced. An
    /// improvement of the layer best alone leaves it untouched, so the
    /// particle is rewarded one more time before being penalized.
    fn step_ei<F>(&mut self, objective: &mut F, index: usize)
    where
        F: FnMut(&[f64]) -> f64,
    {
        let t = self.progress();
        let w = self.config.inertia.at(t);
        let c1 = self.config.accel_ei.at(t);
        let v_max = self.config.v_max();
        let (x_min, x_max) = (self.config.x_min, self.config.x_max);

        {
            let layer = &mut self.layers[index];
            for d in 0..layer.ei.position.len() {
                let r1: f64 = self.rng.gen();
                let target = 0.5 * (layer.exemplar[d] + self.global_best[d]);
                let v = w * layer.ei.velocity[d] + c1 * r1 * (target - layer.ei.position[d]);
                let (x, v) = clamp_step(layer.ei.position[d], v, v_max, x_min, x_max);
                layer.ei.position[d] = x;
                layer.ei.velocity[d] = v;
            }
        }

        let fitness = sanitize(objective(&self.layers[index].ei.position));
        self.fes += 1;

        let layer = &mut self.layers[index];
        if fitness >= layer.best_fit {
            layer.ei.stall += 1;
        } else {
            layer.best.clone_from(&layer.ei.position);
            layer.best_fit = fitness;
            if fitness < self.global_best_fit {
                self.global_best_fit = fitness;
                self.global_best.clone_from(&layer.best);
                layer.ei.stall = 0;
            }
        }
        self.record();
    }

    fn progress(&self) -> f64 {
        self.fes as f64 / self.config.max_fes as f64
    }

    /// Trace/log bookkeeping after every billed evaluation.
    fn record(&mut self) {
        if self.config.record_trace {
            self.trace.push(TracePoint {
                evaluations: self.fes,
                best_fitness: self.global_best_fit,
            });
        }
        if self.config.log_interval > 0 && self.fes % self.config.log_interval == 0 {
            debug!(
                "[Engine] FEs {} best {:.6e}",
                self.fes, self.global_best_fit
            );
        }
    }
}

/// Clamp a velocity, advance the coordinate, and pin both at the boundary.
///
/// A coordinate that leaves the box is clamped to the wall and its
/// velocity component zeroed (inelastic, no bounce).
fn clamp_step(x: f64, v: f64, v_max: f64, x_min: f64, x_max: f64) -> (f64, f64) {
    let v = v.clamp(-v_max, v_max);
    let x = x + v;
    if x < x_min {
        (x_min, 0.0)
    } else if x > x_max {
        (x_max, 0.0)
    } else {
        (x, v)
    }
}

/// Non-finite fitness policy: worse than any finite value, never NaN.
fn sanitize(raw: f64) -> f64 {
    if raw.is_finite() {
        raw
    } else {
        warn!("[Engine] non-finite fitness {raw}; treated as +inf");
        f64::INFINITY
    }
}
