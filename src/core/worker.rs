//! Per-thread worker control loop.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::core::context::SiteContext;
use crate::core::error::EngineError;
use crate::core::gate::{self, Environment};

/// Mutable per-worker bookkeeping, owned by the worker's own thread.
#[derive(Debug)]
pub struct WorkerState {
    /// True while the worker sleeps through a break.
    pub on_break: bool,
    /// Last time the worker came back from a break.
    pub last_active: Instant,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            on_break: false,
            last_active: Instant::now(),
        }
    }
}

/// Spawn `count` worker threads running the control loop.
pub fn spawn_workers(
    count: usize,
    ctx: Arc<SiteContext>,
    env: Arc<dyn Environment>,
) -> Result<Vec<JoinHandle<()>>, EngineError> {
    let mut handles = Vec::with_capacity(count);
    for worker_id in 0..count {
        let ctx = Arc::clone(&ctx);
        let env = Arc::clone(&env);
        let handle = thread::Builder::new()
            .name(format!("crew-worker-{worker_id}"))
            .spawn(move || run(worker_id, &ctx, env.as_ref()))
            .map_err(|source| EngineError::ThreadSpawn {
                role: "worker",
                source,
            })?;
        handles.push(handle);
    }
    Ok(handles)
}

/// The control loop: gate, break roll, dequeue, execute, repeat.
///
/// A blocked gate and an empty queue both yield with a timed sleep; nothing
/// here blocks indefinitely, so the loop observes the depletion flag within
/// one iteration.
fn run(worker_id: usize, ctx: &SiteContext, env: &dyn Environment) {
    let mut state = WorkerState::new();
    debug!(worker_id, "worker thread started");

    while !ctx.depleted.is_tripped() {
        if let Err(hold) = gate::evaluate(ctx, env) {
            warn!(worker_id, %hold, "pausing tasks");
            thread::sleep(ctx.timings.backoff());
            continue;
        }

        if env.break_comes_up() {
            state.on_break = true;
            info!(worker_id, "taking a break");
            thread::sleep(ctx.timings.break_duration());
            state.on_break = false;
            state.last_active = Instant::now();
            info!(worker_id, "back from break");
            continue;
        }

        match ctx.queue.dequeue() {
            Some(task) => {
                let (id, label) = (task.id(), task.label());
                info!(worker_id, id, label, "starting task");
                task.run();
                info!(worker_id, id, label, "task completed");
            }
            // Yield so other threads get a chance at the queue.
            None => thread::sleep(ctx.timings.idle_pause()),
        }
    }

    debug!(worker_id, "worker thread exiting");
}
