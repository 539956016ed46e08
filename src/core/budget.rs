//! Monetary budget gating admission of costed work.

use std::sync::atomic::{AtomicI64, Ordering};

use tracing::{debug, info};

/// Balance below which a failing check triggers the emergency top-up.
pub const LOW_WATERMARK: i64 = 30;

/// Amount granted by a single emergency top-up.
pub const TOP_UP: i64 = 400;

/// Thread-safe budget counter gating costed actions.
///
/// `check` and `deduct` are separate operations and the pair is deliberately
/// not atomic: two workers passing `check` concurrently may transiently
/// overdraw the balance by at most the largest single cost in flight. The
/// balance is signed so that window is representable.
#[derive(Debug)]
pub struct BudgetGovernor {
    balance: AtomicI64,
}

impl BudgetGovernor {
    /// Create a governor with an initial balance.
    pub fn new(initial: i64) -> Self {
        Self {
            balance: AtomicI64::new(initial),
        }
    }

    /// Check whether `cost` is affordable at call time.
    ///
    /// Returns `true` iff the balance was at least `cost` when loaded. A
    /// failing check with the balance under [`LOW_WATERMARK`] additionally
    /// grants [`TOP_UP`] as a side effect; the grant takes effect for the
    /// next check, not this one.
    pub fn check(&self, cost: i64) -> bool {
        let balance = self.balance.load(Ordering::Acquire);
        if balance < cost {
            if balance < LOW_WATERMARK {
                let topped_up = self.balance.fetch_add(TOP_UP, Ordering::AcqRel) + TOP_UP;
                info!(granted = TOP_UP, balance = topped_up, "budget low, emergency funds granted");
            }
            return false;
        }
        true
    }

    /// Unconditionally subtract `cost`. Callers are expected to have just
    /// passed [`check`](Self::check) for the same cost.
    pub fn deduct(&self, cost: i64) {
        let remaining = self.balance.fetch_sub(cost, Ordering::AcqRel) - cost;
        debug!(cost, remaining, "budget deducted");
    }

    /// Current balance snapshot.
    pub fn balance(&self) -> i64 {
        self.balance.load(Ordering::Acquire)
    }

    /// Whether the balance has reached zero or below.
    pub fn is_exhausted(&self) -> bool {
        self.balance() <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_when_affordable() {
        let budget = BudgetGovernor::new(100);
        assert!(budget.check(100));
        assert!(budget.check(1));
        assert_eq!(budget.balance(), 100);
    }

    #[test]
    fn check_fails_without_grant_above_watermark() {
        let budget = BudgetGovernor::new(50);
        assert!(!budget.check(60));
        // 50 is above the watermark, so no top-up fires.
        assert_eq!(budget.balance(), 50);
        // A second failing check is equally grant-free.
        assert!(!budget.check(60));
        assert_eq!(budget.balance(), 50);
    }

    #[test]
    fn failing_check_below_watermark_grants_top_up() {
        let budget = BudgetGovernor::new(20);
        assert!(!budget.check(25));
        assert_eq!(budget.balance(), 20 + TOP_UP);
        // The grant takes effect for the next check.
        assert!(budget.check(25));
    }

    #[test]
    fn deduct_is_unconditional() {
        let budget = BudgetGovernor::new(1000);
        budget.deduct(50);
        budget.deduct(30);
        assert_eq!(budget.balance(), 920);
        // 920 fails a 1000 check but is nowhere near the watermark.
        assert!(!budget.check(1000));
        assert_eq!(budget.balance(), 920);
    }

    #[test]
    fn balance_may_go_negative_between_check_and_deduct() {
        let budget = BudgetGovernor::new(40);
        // Two callers both passed check(40) before either deducted.
        budget.deduct(40);
        budget.deduct(40);
        assert_eq!(budget.balance(), -40);
        assert!(budget.is_exhausted());
    }
}
