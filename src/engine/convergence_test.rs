//! End-to-end convergence scenarios.
//!
//! Run the long ones with: cargo test --release -- --ignored --nocapture

#[cfg(test)]
mod tests {
    use crate::benchmarks;
    use crate::engine::{Engine, EngineConfig, Schedule};

    fn scenario_config(seed: u64) -> EngineConfig {
        EngineConfig {
            population_size: 1,
            dim: 2,
            max_fes: 2000,
            stall_budget: 5,
            x_min: -5.0,
            x_max: 5.0,
            inertia: Schedule::new(0.99, 0.20),
            accel_er: Schedule::new(3.0, 1.5),
            accel_ei: Schedule::new(2.5, 0.5),
            seed: Some(seed),
            record_trace: true,
            log_interval: 0,
        }
    }

    /// Single layer, 2-D sphere, 2000 evaluations: the run must land
    /// within 1e-3 of the known minimum at the origin with the budget
    /// exactly spent.
    #[test]
    fn sphere_single_layer_converges() {
        let mut engine = Engine::cognitive(scenario_config(42)).unwrap();
        let result = engine.run(benchmarks::sphere);

        assert_eq!(result.evaluations, 2000);
        assert!(
            result.best_fitness < 1e-3,
            "expected near-zero sphere minimum, got {:.3e}",
            result.best_fitness
        );
        for &x in &result.best_position {
            assert!(x.abs() < 0.1);
        }
    }

    #[test]
    fn sphere_comprehensive_learning_converges() {
        let mut cfg = scenario_config(42);
        cfg.population_size = 10;
        cfg.max_fes = 20_000;
        let mut engine = Engine::comprehensive_learning(cfg).unwrap();
        let result = engine.run(benchmarks::sphere);

        assert_eq!(result.evaluations, 20_000);
        assert!(
            result.best_fitness < 1e-3,
            "expected near-zero sphere minimum, got {:.3e}",
            result.best_fitness
        );
    }

    #[test]
    fn trace_ends_at_the_reported_best() {
        let mut engine = Engine::cognitive(scenario_config(7)).unwrap();
        let result = engine.run(benchmarks::sphere);

        let last = result.trace.last().unwrap();
        assert_eq!(last.evaluations, 2000);
        assert_eq!(last.best_fitness, result.best_fitness);
    }

    /// Paper-scale experiment: dim 10, N 20, 100k evaluations on the
    /// full basic suite. Slow, so opt-in.
    #[test]
    #[ignore]
    fn basic_suite_full_scale() {
        for bench in benchmarks::basic_suite() {
            let cfg = EngineConfig {
                population_size: 20,
                dim: 10,
                max_fes: 100_000,
                stall_budget: 6,
                x_min: bench.lower,
                x_max: bench.upper,
                seed: Some(1),
                ..EngineConfig::default()
            };
            let mut engine = Engine::comprehensive_learning(cfg).unwrap();
            let result = engine.run(bench.func);

            println!(
                "{:<12} best {:.6e} after {} FEs",
                bench.name, result.best_fitness, result.evaluations
            );
            assert_eq!(result.evaluations, 100_000);
            assert!(result.best_fitness.is_finite());
        }
    }
}
