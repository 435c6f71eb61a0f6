//! Evaluation-budget strategies.
//!
//! Two pluggable pieces sit between the engine and the particles: the ABS
//! admission-control rule that decides which channel spends the next
//! evaluation, and the exemplar-construction policy that rebuilds a
//! layer's attraction target when the rule declares it stale.

pub mod abs;
pub mod exemplar;

pub use abs::{select_action, Thresholds};
pub use exemplar::{CognitiveExemplar, ComprehensiveLearning, ExemplarStrategy};

/// Per-layer decision returned by admission control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// The exemplar is stale; rebuild it before searching further.
    Reconstruct,
    /// Spend the evaluation on the exploration channel.
    UseEr,
    /// Spend the evaluation on the exploitation channel.
    UseEi,
}
