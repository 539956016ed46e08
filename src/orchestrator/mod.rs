//! Composition root: build the pools, context, workers, and replenisher.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::info;

use crate::config::EngineConfig;
use crate::core::budget::BudgetGovernor;
use crate::core::context::SiteContext;
use crate::core::error::EngineError;
use crate::core::gate::Environment;
use crate::core::queue::Task;
use crate::core::replenisher::{self, ReplenisherHandle};
use crate::core::resource::ResourcePool;
use crate::core::worker;

/// A running engine: the shared context plus the threads driving it.
pub struct Orchestrator {
    ctx: Arc<SiteContext>,
    workers: Vec<JoinHandle<()>>,
    replenisher: ReplenisherHandle,
}

impl Orchestrator {
    /// Validate `config`, build the shared context, and start all threads.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or OS thread-spawn failure; nothing
    /// else at startup can fail.
    pub fn start(config: EngineConfig, env: Arc<dyn Environment>) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        let mut resources = HashMap::new();
        let mut replenish_targets = Vec::with_capacity(config.resources.len());
        for (name, resource_cfg) in &config.resources {
            let pool = Arc::new(ResourcePool::new(name.clone(), resource_cfg.initial_quantity));
            replenish_targets.push((Arc::clone(&pool), resource_cfg.replenish));
            resources.insert(name.clone(), pool);
        }

        let ctx = Arc::new(SiteContext::new(
            BudgetGovernor::new(config.initial_budget),
            config.timings,
            resources,
        ));

        info!(
            workers = config.worker_count,
            pools = replenish_targets.len(),
            budget = config.initial_budget,
            "site initialized"
        );

        let workers = worker::spawn_workers(config.worker_count, Arc::clone(&ctx), env)?;
        let replenisher = replenisher::spawn(
            replenish_targets,
            ctx.depleted.clone(),
            config.timings.replenish_period(),
        )?;

        Ok(Self {
            ctx,
            workers,
            replenisher,
        })
    }

    /// Handle to the shared context, for task construction and inspection.
    pub fn context(&self) -> Arc<SiteContext> {
        Arc::clone(&self.ctx)
    }

    /// Queue a task for execution.
    pub fn submit(&self, task: Task) {
        self.ctx.queue.enqueue(task);
    }

    /// Trip the depletion flag; every loop exits within one iteration.
    pub fn shutdown(&self) {
        self.ctx.shutdown();
    }

    /// Wait for every worker to exit, then stop the replenisher.
    pub fn join(self) {
        for handle in self.workers {
            let _ = handle.join();
        }
        self.replenisher.stop();
        info!("site drained");
    }
}
