//! Stub construction actions bound to the seeded tasks.
//!
//! Each constructor returns a [`Task`] whose body is an opaque business
//! action. The costed actions (bricklaying, cement mixing, scaffolding)
//! re-check their resource and budget preconditions on every pass and back
//! off on shortfall; the outer loop is the retry, there is no inner one.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::core::context::SiteContext;
use crate::core::queue::{Priority, Task};
use crate::core::resource::ReplenishRange;

/// Quantity below which a consume triggers the follow-up replenish draw.
const REFILL_THRESHOLD: u64 = 15;

/// Range of the in-consume auto-replenish draw.
const REFILL_RANGE: ReplenishRange = ReplenishRange { min: 30, max: 70 };

/// High priority: urgent repairs.
pub fn urgent_repairs() -> Task {
    Task::new(Priority::High, "urgent repairs", || {
        info!("performing urgent repairs");
        thread::sleep(Duration::from_secs(1));
    })
}

/// High priority: laying the foundation.
pub fn foundation_laying() -> Task {
    Task::new(Priority::High, "foundation laying", || {
        info!("laying foundation");
        thread::sleep(Duration::from_secs(2));
    })
}

/// High priority: critical structural work.
pub fn critical_structural_work() -> Task {
    Task::new(Priority::High, "critical structural work", || {
        info!("doing critical structural work");
        thread::sleep(Duration::from_secs(3));
    })
}

/// Medium priority: general construction.
pub fn general_construction() -> Task {
    Task::new(Priority::Medium, "general construction", || {
        info!("performing general construction tasks");
        thread::sleep(Duration::from_secs(2));
    })
}

/// Medium priority: lay bricks until the pool or the site is exhausted.
///
/// Costs 50 per pass and consumes 10 bricks.
pub fn laying_bricks(ctx: Arc<SiteContext>) -> Task {
    Task::new(Priority::Medium, "laying bricks", move || {
        let Some(bricks) = ctx.resource("bricks") else {
            warn!("bricks pool not configured, skipping bricklaying");
            return;
        };
        while bricks.quantity() > 0 && !ctx.depleted.is_tripped() {
            if !bricks.has_at_least(10) || !ctx.budget.check(50) {
                warn!("resource shortage or budget overrun in laying bricks");
                thread::sleep(ctx.timings.backoff());
                continue;
            }
            ctx.budget.deduct(50);
            bricks.consume(10, REFILL_THRESHOLD, REFILL_RANGE);
            info!("worker is laying bricks");
            thread::sleep(ctx.timings.work_pause());
        }
    })
}

/// Medium priority: mix cement until the pool or the site is exhausted.
///
/// Costs 30 per pass and consumes 10 cement.
pub fn mixing_cement(ctx: Arc<SiteContext>) -> Task {
    Task::new(Priority::Medium, "mixing cement", move || {
        let Some(cement) = ctx.resource("cement") else {
            warn!("cement pool not configured, skipping cement mixing");
            return;
        };
        while cement.quantity() > 0 && !ctx.depleted.is_tripped() {
            if !cement.has_at_least(10) || !ctx.budget.check(30) {
                warn!("resource shortage or budget overrun in mixing cement");
                thread::sleep(ctx.timings.backoff());
                continue;
            }
            ctx.budget.deduct(30);
            cement.consume(10, REFILL_THRESHOLD, REFILL_RANGE);
            info!("worker is mixing cement");
            thread::sleep(ctx.timings.work_pause());
        }
    })
}

/// Medium priority: scaffolding, drawing on both pools at once.
///
/// Costs 40 per pass and consumes 5 bricks plus 5 cement. Runs until the
/// depletion flag trips.
pub fn scaffolding(ctx: Arc<SiteContext>) -> Task {
    Task::new(Priority::Medium, "scaffolding", move || {
        let (Some(bricks), Some(cement)) = (ctx.resource("bricks"), ctx.resource("cement"))
        else {
            warn!("bricks or cement pool not configured, skipping scaffolding");
            return;
        };
        while !ctx.depleted.is_tripped() {
            if !bricks.has_at_least(5) || !cement.has_at_least(5) || !ctx.budget.check(40) {
                warn!("resource shortage or budget overrun in scaffolding");
                thread::sleep(ctx.timings.backoff());
                continue;
            }
            ctx.budget.deduct(40);
            bricks.consume(5, REFILL_THRESHOLD, REFILL_RANGE);
            cement.consume(5, REFILL_THRESHOLD, REFILL_RANGE);
            info!("worker is working on scaffolding");
            thread::sleep(ctx.timings.work_pause());
        }
    })
}

/// Low priority: finishing touches.
pub fn finishing_touches() -> Task {
    Task::new(Priority::Low, "finishing touches", || {
        info!("applying finishing touches");
        thread::sleep(Duration::from_secs(1));
    })
}

/// Low priority: aesthetic elements.
pub fn aesthetic_elements() -> Task {
    Task::new(Priority::Low, "aesthetic elements", || {
        info!("working on aesthetic elements");
        thread::sleep(Duration::from_secs(1));
    })
}
