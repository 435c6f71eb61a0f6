//! Analytic benchmark objectives.
//!
//! The classic minimization test bed the experiments run on.
//! All functions have a known global minimum of 0.

use std::f64::consts::PI;

/// Sum of squares; minimum at the origin.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Highly multimodal; minimum at the origin.
pub fn rastrigin(x: &[f64]) -> f64 {
    const A: f64 = 10.0;
    let sum: f64 = x
        .iter()
        .map(|xi| xi * xi - A * (2.0 * PI * xi).cos())
        .sum();
    A * x.len() as f64 + sum
}

/// Narrow curved valley; minimum at (1, ..., 1).
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|pair| {
            let a = pair[1] - pair[0] * pair[0];
            let b = pair[0] - 1.0;
            100.0 * a * a + b * b
        })
        .sum()
}

/// Nearly flat outer region with a deep central funnel; minimum at the
/// origin.
pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();
    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + std::f64::consts::E
}

/// A named objective with its conventional search bounds.
#[derive(Clone, Copy)]
pub struct Benchmark {
    pub name: &'static str,
    pub func: fn(&[f64]) -> f64,
    pub lower: f64,
    pub upper: f64,
}

/// The basic experiment suite with each function's conventional bounds.
pub fn basic_suite() -> Vec<Benchmark> {
    vec![
        Benchmark {
            name: "Sphere",
            func: sphere,
            lower: -100.0,
            upper: 100.0,
        },
        Benchmark {
            name: "Rastrigin",
            func: rastrigin,
            lower: -5.12,
            upper: 5.12,
        },
        Benchmark {
            name: "Rosenbrock",
            func: rosenbrock,
            lower: -30.0,
            upper: 30.0,
        },
        Benchmark {
            name: "Ackley",
            func: ackley,
            lower: -32.0,
            upper: 32.0,
        },
    ]
}
