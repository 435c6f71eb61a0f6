//! Adaptive Bi-Strategy (ABS) admission control.
//!
//! Splits a fixed stall budget `M` between the two channels as a function
//! of how much of the evaluation budget has been spent: exploration slack
//! `M_Er` shrinks from `M` to 0 over the run while exploitation slack
//! `M_Ei` grows from 0 to `M`. The selection rule then spends each
//! evaluation on whichever channel still has slack, or orders an exemplar
//! rebuild when neither does.

use crate::model::Layer;
use crate::strategy::Action;
use serde::{Deserialize, Serialize};

/// Per-round stall-slack pair, derived from the evaluation clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Exploration slack: `ceil(M * (1 - FEs/maxFEs))`.
    pub m_er: u32,
    /// Exploitation slack: `floor(M * FEs/maxFEs)`.
    pub m_ei: u32,
}

impl Thresholds {
    /// Compute the threshold pair for the current evaluation count.
    ///
    /// Recomputed once per outer round so every layer in the round sees
    /// the same pair.
    pub fn compute(fes: u64, max_fes: u64, m: u32) -> Self {
        let t = fes as f64 / max_fes as f64;
        Thresholds {
            m_er: (f64::from(m) * (1.0 - t)).ceil() as u32,
            m_ei: (f64::from(m) * t).floor() as u32,
        }
    }
}

/// Decide what a layer does with its next turn.
///
/// Pure function over the layer's counters and the round thresholds; the
/// engine re-queries it after a reconstruct to learn which channel runs
/// with the freshly zeroed counters.
///
/// Priority order, checked strictly top to bottom:
/// 1. Reconstruct when the layer has ever rewarded exploration (beta != 0)
///    and Er has stalled past its slack, or when Ei has stalled past its
///    slack.
/// 2. Er while it still has slack.
/// 3. Ei when Er exhausted its slack without a single reward and Ei still
///    has slack.
/// 4. Reconstruct as the designed default; this branch never hands the
///    turn to a channel whose slack is already exhausted.
pub fn select_action(layer: &Layer, thresholds: Thresholds) -> Action {
    let alpha_er = layer.er.stall;
    let alpha_ei = layer.ei.stall;
    let beta = layer.reward;

    if (beta != 0 && alpha_er > thresholds.m_er) || alpha_ei > thresholds.m_ei {
        return Action::Reconstruct;
    }
    if alpha_er <= thresholds.m_er {
        return Action::UseEr;
    }
    if beta == 0 && alpha_ei <= thresholds.m_ei {
        return Action::UseEi;
    }
    Action::Reconstruct
}
