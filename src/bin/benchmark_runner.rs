//! Basic benchmark experiment driver.
//!
//! Runs both optimizer variants over the analytic suite, logs per-run
//! fitness and aggregate statistics, and writes the raw results to
//! `results_basic.json`.

use anyhow::{Context, Result};
use chxpso_abs::benchmarks::{basic_suite, Benchmark};
use chxpso_abs::{Engine, EngineConfig, RunStats};
use serde::Serialize;
use std::fs::File;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DIM: usize = 10;
const POPULATION: usize = 20;
const STALL_BUDGET: u32 = 6;
const NUM_RUNS: u64 = 3;

#[derive(Serialize)]
struct ExperimentRecord {
    algorithm: &'static str,
    function: &'static str,
    final_fitnesses: Vec<f64>,
    stats: RunStats,
}

fn config_for(bench: &Benchmark, seed: u64) -> EngineConfig {
    EngineConfig {
        population_size: POPULATION,
        dim: DIM,
        max_fes: 10_000 * DIM as u64,
        stall_budget: STALL_BUDGET,
        x_min: bench.lower,
        x_max: bench.upper,
        seed: Some(seed),
        log_interval: 50_000,
        ..EngineConfig::default()
    }
}

fn run_variant(
    algorithm: &'static str,
    bench: &Benchmark,
    seed_base: u64,
) -> Result<ExperimentRecord> {
    let mut final_fitnesses = Vec::with_capacity(NUM_RUNS as usize);
    for run in 0..NUM_RUNS {
        let config = config_for(bench, seed_base + run);
        let result = match algorithm {
            "CHpPSO-ABS" => Engine::cognitive(config)?.run(bench.func),
            _ => Engine::comprehensive_learning(config)?.run(bench.func),
        };
        info!(
            "  run {}: {} on {} -> {:.6e}",
            run + 1,
            algorithm,
            bench.name,
            result.best_fitness
        );
        final_fitnesses.push(result.best_fitness);
    }

    let stats = RunStats::from_results(&final_fitnesses)
        .context("no runs completed")?;
    info!(
        "📈 {} / {}: mean {:.6e} std {:.6e} best {:.6e} worst {:.6e}",
        algorithm, bench.name, stats.mean, stats.std_dev, stats.best, stats.worst
    );
    Ok(ExperimentRecord {
        algorithm,
        function: bench.name,
        final_fitnesses,
        stats,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(
        "📊 Basic benchmark experiment: dim={}, N={}, maxFEs={}, M={}, runs={}",
        DIM,
        POPULATION,
        10_000 * DIM,
        STALL_BUDGET,
        NUM_RUNS
    );

    let mut records = Vec::new();
    for bench in basic_suite() {
        info!("Function: {}", bench.name);
        records.push(run_variant("CHpPSO-ABS", &bench, 1000)?);
        records.push(run_variant("CHCLPSO-ABS", &bench, 2000)?);
    }

    let out = File::create("results_basic.json").context("creating results file")?;
    serde_json::to_writer_pretty(out, &records).context("writing results file")?;
    info!("✅ Results saved to results_basic.json");
    Ok(())
}
