//! Multi-run result aggregation.

use serde::{Deserialize, Serialize};

/// Summary statistics over the final fitnesses of repeated runs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RunStats {
    pub mean: f64,
    pub std_dev: f64,
    pub best: f64,
    pub worst: f64,
}

impl RunStats {
    /// Aggregate a batch of final fitnesses; `None` when empty.
    ///
    /// Std-dev is the population form, matching how the experiment
    /// results are conventionally reported.
    pub fn from_results(results: &[f64]) -> Option<Self> {
        let first = *results.first()?;
        let mut best = first;
        let mut worst = first;
        let mut sum = 0.0;
        for &r in results {
            sum += r;
            if r < best {
                best = r;
            }
            if r > worst {
                worst = r;
            }
        }
        let mean = sum / results.len() as f64;
        let var: f64 = results.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>()
            / results.len() as f64;
        Some(RunStats {
            mean,
            std_dev: var.sqrt(),
            best,
            worst,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_has_no_stats() {
        assert!(RunStats::from_results(&[]).is_none());
    }

    #[test]
    fn single_run_stats_are_degenerate() {
        let stats = RunStats::from_results(&[2.5]).unwrap();
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.best, 2.5);
        assert_eq!(stats.worst, 2.5);
    }

    #[test]
    fn known_batch() {
        let stats = RunStats::from_results(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.best, 1.0);
        assert_eq!(stats.worst, 4.0);
        // Population std-dev of 1..4.
        assert!((stats.std_dev - 1.118_033_988_749_895).abs() < 1e-12);
    }
}
