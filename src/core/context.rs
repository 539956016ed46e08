//! Shared site state handed to every worker, the replenisher, and task bodies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::config::TimingConfig;
use crate::core::budget::BudgetGovernor;
use crate::core::queue::TaskQueue;
use crate::core::resource::ResourcePool;

/// Cooperative-shutdown token observed by every loop.
///
/// Clones share the underlying flag. Once tripped it never resets; workers,
/// the replenisher, and the queue all observe it within one iteration.
#[derive(Clone, Debug, Default)]
pub struct DepletionFlag(Arc<AtomicBool>);

impl DepletionFlag {
    /// Create an untripped flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the flag. Idempotent; the first trip is logged.
    pub fn trip(&self) {
        if !self.0.swap(true, Ordering::AcqRel) {
            info!("depletion flag tripped, loops will drain");
        }
    }

    /// Whether the flag has been tripped.
    pub fn is_tripped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Process-wide gating flags recomputed by worker iterations.
#[derive(Debug)]
pub struct SiteFlags {
    /// Set when the latest weather roll came up bad.
    pub bad_weather: AtomicBool,
    /// Shared skilled-worker coin, toggled by every gate recompute.
    pub skilled_worker: AtomicBool,
}

impl Default for SiteFlags {
    fn default() -> Self {
        Self {
            bad_weather: AtomicBool::new(false),
            skilled_worker: AtomicBool::new(true),
        }
    }
}

/// Shared context: flags, budget, queue, timing knobs, and the named pools.
///
/// Built once by the orchestrator and passed around as an `Arc`; nothing in
/// the engine reaches for free-standing globals.
pub struct SiteContext {
    /// Cooperative-shutdown token.
    pub depleted: DepletionFlag,
    /// Weather and skill gating flags.
    pub flags: SiteFlags,
    /// Shared monetary budget.
    pub budget: BudgetGovernor,
    /// Three-lane task queue.
    pub queue: TaskQueue,
    /// Engine timing knobs (backoff, break, pauses).
    pub timings: TimingConfig,
    resources: HashMap<String, Arc<ResourcePool>>,
}

impl SiteContext {
    /// Assemble the context. The queue shares the context's depletion flag.
    pub fn new(
        budget: BudgetGovernor,
        timings: TimingConfig,
        resources: HashMap<String, Arc<ResourcePool>>,
    ) -> Self {
        let depleted = DepletionFlag::new();
        Self {
            queue: TaskQueue::new(depleted.clone()),
            depleted,
            flags: SiteFlags::default(),
            budget,
            timings,
            resources,
        }
    }

    /// Look up a configured pool by name.
    pub fn resource(&self, name: &str) -> Option<Arc<ResourcePool>> {
        self.resources.get(name).cloned()
    }

    /// Trip the depletion flag; all loops exit within one iteration.
    pub fn shutdown(&self) {
        self.depleted.trip();
    }
}
