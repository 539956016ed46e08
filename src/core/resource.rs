//! Self-healing resource pools and their admission gate.
//!
//! A [`ResourcePool`] is a quantity counter guarded by its own mutex, paired
//! with an [`AdmissionGate`] capped at one permit. The gate serializes the
//! compound consume-check-replenish sequence across consumers; the background
//! replenisher takes only the quantity lock, so quantity mutations stay atomic
//! while replenishment never waits behind a consumer's full critical section.

use parking_lot::{Condvar, Mutex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Inclusive range for random replenish draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplenishRange {
    /// Smallest amount a draw can produce.
    pub min: u64,
    /// Largest amount a draw can produce.
    pub max: u64,
}

impl ReplenishRange {
    /// Create a range. `min` must not exceed `max`; configuration validation
    /// enforces this for ranges coming from outside.
    pub fn new(min: u64, max: u64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    fn draw(&self) -> u64 {
        rand::rng().random_range(self.min..=self.max)
    }
}

/// Counting admission gate capped at one permit.
///
/// Functions as a second layer of mutual exclusion around the compound
/// consume sequence, not as a concurrency limiter.
#[derive(Debug)]
pub struct AdmissionGate {
    permits: Mutex<u32>,
    returned: Condvar,
}

impl AdmissionGate {
    fn new() -> Self {
        Self {
            permits: Mutex::new(1),
            returned: Condvar::new(),
        }
    }

    /// Block until a permit is free and take it. The permit is returned when
    /// the guard drops, so every exit path releases it.
    pub fn acquire(&self) -> GatePermit<'_> {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.returned.wait(&mut permits);
        }
        *permits -= 1;
        GatePermit { gate: self }
    }
}

/// RAII permit handed out by [`AdmissionGate::acquire`].
#[derive(Debug)]
pub struct GatePermit<'a> {
    gate: &'a AdmissionGate,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        *self.gate.permits.lock() += 1;
        self.gate.returned.notify_one();
    }
}

/// Thread-safe quantity counter with threshold-triggered self-healing.
///
/// The quantity is only ever read or written under the lock, and the ordering
/// is fixed everywhere to gate-then-lock, so consumers cannot deadlock against
/// each other or against the replenisher.
#[derive(Debug)]
pub struct ResourcePool {
    name: String,
    quantity: Mutex<u64>,
    gate: AdmissionGate,
}

impl ResourcePool {
    /// Create a pool with an initial quantity.
    pub fn new(name: impl Into<String>, initial: u64) -> Self {
        Self {
            name: name.into(),
            quantity: Mutex::new(initial),
            gate: AdmissionGate::new(),
        }
    }

    /// Name the pool was configured under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consume `amount` units, self-healing instead of failing.
    ///
    /// On a shortfall the pool replenishes by a draw from `range` rather than
    /// reporting an error. After either branch, a second draw fires if the
    /// quantity sits below `min_threshold`. The quantity never goes negative;
    /// the lock is released before the gate permit on every path.
    pub fn consume(&self, amount: u64, min_threshold: u64, range: ReplenishRange) {
        let _permit = self.gate.acquire();
        let mut quantity = self.quantity.lock();
        if *quantity >= amount {
            *quantity -= amount;
            debug!(pool = %self.name, used = amount, remaining = *quantity, "resource consumed");
        } else {
            let drawn = range.draw();
            *quantity += drawn;
            info!(pool = %self.name, drawn, total = *quantity, "shortfall, auto-replenished");
        }
        if *quantity < min_threshold {
            let drawn = range.draw();
            *quantity += drawn;
            info!(pool = %self.name, drawn, total = *quantity, "below threshold, auto-replenished");
        }
    }

    /// Add a draw from `range` to the pool. Takes the quantity lock only,
    /// never the gate; used by the background replenisher.
    pub fn replenish(&self, range: ReplenishRange) {
        let drawn = range.draw();
        let mut quantity = self.quantity.lock();
        *quantity += drawn;
        info!(pool = %self.name, drawn, total = *quantity, "replenished");
    }

    /// Lock-protected availability check.
    pub fn has_at_least(&self, required: u64) -> bool {
        *self.quantity.lock() >= required
    }

    /// Current quantity snapshot.
    pub fn quantity(&self) -> u64 {
        *self.quantity.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_decrements_when_sufficient() {
        let pool = ResourcePool::new("bricks", 100);
        pool.consume(10, 15, ReplenishRange::new(30, 70));
        assert_eq!(pool.quantity(), 90);
    }

    #[test]
    fn shortfall_heals_instead_of_failing() {
        let pool = ResourcePool::new("bricks", 8);
        // 8 < 10 triggers the first draw; 8 + 30..=70 is never below 15, so
        // the threshold draw stays quiet.
        pool.consume(10, 15, ReplenishRange::new(30, 70));
        let quantity = pool.quantity();
        assert!((38..=78).contains(&quantity), "quantity was {quantity}");
    }

    #[test]
    fn threshold_triggers_second_draw() {
        let pool = ResourcePool::new("cement", 20);
        // 20 - 10 = 10 sits below the threshold of 15, so a draw fires.
        pool.consume(10, 15, ReplenishRange::new(30, 70));
        let quantity = pool.quantity();
        assert!((40..=80).contains(&quantity), "quantity was {quantity}");
    }

    #[test]
    fn replenish_adds_within_range() {
        let pool = ResourcePool::new("cement", 50);
        pool.replenish(ReplenishRange::new(5, 15));
        let quantity = pool.quantity();
        assert!((55..=65).contains(&quantity), "quantity was {quantity}");
    }

    #[test]
    fn availability_is_a_snapshot() {
        let pool = ResourcePool::new("bricks", 10);
        assert!(pool.has_at_least(10));
        assert!(!pool.has_at_least(11));
    }

    #[test]
    fn gate_permit_is_returned_on_drop() {
        let pool = ResourcePool::new("bricks", 100);
        drop(pool.gate.acquire());
        // A second acquire would deadlock if the permit leaked.
        drop(pool.gate.acquire());
    }
}
