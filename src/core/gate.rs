//! Per-iteration availability gate.
//!
//! The gate is not a stored state machine: each worker iteration re-rolls the
//! weather, flips the shared skilled-worker coin, and folds both together with
//! budget exhaustion into a single may-proceed decision.

use std::fmt;
use std::sync::atomic::Ordering;

use tracing::debug;

use crate::core::context::SiteContext;

/// Opaque provider of environmental randomness.
///
/// The engine treats these as boolean oracles. Production wiring uses
/// [`crate::sim::RandomEnvironment`]; tests substitute deterministic stubs.
pub trait Environment: Send + Sync + 'static {
    /// Re-roll the weather; `true` means conditions turned bad.
    fn weather_turns_bad(&self) -> bool;

    /// Whether a worker takes a break this cycle.
    fn break_comes_up(&self) -> bool;
}

/// Reason a worker iteration may not proceed to dequeue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    /// The weather roll came up bad.
    BadWeather,
    /// The shared skilled-worker coin landed on unavailable.
    NoSkilledWorker,
    /// The budget balance is at or below zero.
    BudgetExhausted,
}

impl fmt::Display for Hold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadWeather => write!(f, "bad weather"),
            Self::NoSkilledWorker => write!(f, "no skilled worker available"),
            Self::BudgetExhausted => write!(f, "budget exhausted"),
        }
    }
}

/// Recompute the gate for one worker iteration.
///
/// Every call flips the shared skilled-worker coin, for all workers at once.
pub fn evaluate(ctx: &SiteContext, env: &dyn Environment) -> Result<(), Hold> {
    let bad = env.weather_turns_bad();
    ctx.flags.bad_weather.store(bad, Ordering::Release);
    if bad {
        debug!("the weather has turned bad");
    } else {
        debug!("the weather is good");
    }

    let skilled = !ctx.flags.skilled_worker.fetch_xor(true, Ordering::AcqRel);
    debug!(available = skilled, "skill roster updated");

    if bad {
        return Err(Hold::BadWeather);
    }
    if !skilled {
        return Err(Hold::NoSkilledWorker);
    }
    if ctx.budget.is_exhausted() {
        return Err(Hold::BudgetExhausted);
    }
    Ok(())
}
