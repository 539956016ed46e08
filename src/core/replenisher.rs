//! Background replenisher thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use tracing::debug;

use crate::core::context::DepletionFlag;
use crate::core::error::EngineError;
use crate::core::resource::{ReplenishRange, ResourcePool};

/// Handle to the replenisher thread: a stop channel plus the join handle.
///
/// Dropping the handle without calling [`stop`](Self::stop) leaves the thread
/// running until the depletion flag trips.
pub struct ReplenisherHandle {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl ReplenisherHandle {
    /// Signal the thread and wait for it to exit.
    pub fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.join();
    }
}

/// Spawn the replenisher: every `period` it tops up each pool by an
/// independent draw from that pool's configured range.
///
/// The thread exits on the stop signal, when the sender side is dropped, or
/// on the first tick after the depletion flag trips.
pub fn spawn(
    targets: Vec<(Arc<ResourcePool>, ReplenishRange)>,
    depleted: DepletionFlag,
    period: Duration,
) -> Result<ReplenisherHandle, EngineError> {
    let (stop_tx, stop_rx) = bounded::<()>(1);
    let handle = thread::Builder::new()
        .name("crew-replenisher".into())
        .spawn(move || {
            debug!("replenisher thread started");
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        if depleted.is_tripped() {
                            break;
                        }
                        for (pool, range) in &targets {
                            pool.replenish(*range);
                        }
                    }
                    // Stop signal, or the sender went away.
                    _ => break,
                }
            }
            debug!("replenisher thread exiting");
        })
        .map_err(|source| EngineError::ThreadSpawn {
            role: "replenisher",
            source,
        })?;
    Ok(ReplenisherHandle { stop_tx, handle })
}
