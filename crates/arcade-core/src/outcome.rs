//! Outcome source trait and its random and scripted implementations.
//!
//! Every round is won or lost by asking an [`OutcomeSource`]. Production
//! uses [`RandomOutcomeSource`], a coin flip backed by a seedable RNG;
//! tests substitute [`ScriptedOutcomeSource`] to force a known sequence
//! of wins and losses.

use rand::distr::{Bernoulli, BernoulliError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The result of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// The bet pays out.
    Win,
    /// The escrowed bet is lost.
    Loss,
}

impl RoundOutcome {
    /// Whether this outcome pays out.
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }
}

/// A source of round outcomes.
///
/// The resolver calls [`draw`](OutcomeSource::draw) exactly once per
/// round. Implementations must be shareable across the server's worker
/// threads.
pub trait OutcomeSource: Send + Sync {
    /// Decide whether the current round is won or lost.
    fn draw(&mut self) -> RoundOutcome;
}

impl std::fmt::Debug for dyn OutcomeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn OutcomeSource")
    }
}

/// Bernoulli coin flip over a [`StdRng`].
///
/// Not cryptographically secure.
#[derive(Debug, Clone)]
pub struct RandomOutcomeSource {
    rng: StdRng,
    coin: Bernoulli,
}

impl RandomOutcomeSource {
    /// Create a source that wins with probability `win_probability`.
    ///
    /// With `seed` set the outcome sequence is reproducible; otherwise the
    /// RNG is seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`BernoulliError`] if `win_probability` is not in `[0, 1]`.
    pub fn new(win_probability: f64, seed: Option<u64>) -> Result<Self, BernoulliError> {
        let coin = Bernoulli::new(win_probability)?;
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Ok(Self { rng, coin })
    }
}

impl OutcomeSource for RandomOutcomeSource {
    fn draw(&mut self) -> RoundOutcome {
        if self.rng.sample(self.coin) {
            RoundOutcome::Win
        } else {
            RoundOutcome::Loss
        }
    }
}

/// Replays a fixed outcome sequence, cycling back to the start when it
/// runs out. An empty script always loses.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOutcomeSource {
    script: Vec<RoundOutcome>,
    next: usize,
}

impl ScriptedOutcomeSource {
    /// Create a source that replays `script` in order.
    pub const fn new(script: Vec<RoundOutcome>) -> Self {
        Self { script, next: 0 }
    }

    /// Create a source that returns `outcome` every time.
    pub fn always(outcome: RoundOutcome) -> Self {
        Self::new(vec![outcome])
    }
}

impl OutcomeSource for ScriptedOutcomeSource {
    fn draw(&mut self) -> RoundOutcome {
        let outcome = self
            .script
            .get(self.next)
            .copied()
            .unwrap_or(RoundOutcome::Loss);
        self.next = self.next.saturating_add(1);
        if self.next >= self.script.len() {
            self.next = 0;
        }
        outcome
    }
}
