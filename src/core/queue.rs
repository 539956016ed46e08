//! Three-lane priority task queue.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::context::DepletionFlag;

/// Priority lane for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Dispatched before everything else.
    High,
    /// Dispatched once the high lane is empty.
    Medium,
    /// Dispatched only when no higher-priority work is pending.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A unit of schedulable work: a label, a lane, and a run-once action.
///
/// The task is exclusively owned by its lane until dequeued, then by the
/// executing worker, which consumes it. Actions carry no result or error
/// channel; they always complete.
pub struct Task {
    id: u64,
    label: &'static str,
    priority: Priority,
    action: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Create a task. The id is assigned at enqueue time.
    pub fn new(priority: Priority, label: &'static str, action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id: 0,
            label,
            priority,
            action: Box::new(action),
        }
    }

    /// Queue-assigned identifier (zero until enqueued).
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Human-readable label used in logs.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Lane this task belongs to.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Execute the action to completion, consuming the task.
    pub fn run(self) {
        (self.action)();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Lanes {
    high: VecDeque<Task>,
    medium: VecDeque<Task>,
    low: VecDeque<Task>,
}

/// Three FIFO lanes behind one mutex, drained in strict priority order.
///
/// Starvation of the lower lanes is intentional: low-priority work runs only
/// when no higher-priority work is pending at the instant of dequeue.
pub struct TaskQueue {
    depleted: DepletionFlag,
    next_id: AtomicU64,
    lanes: Mutex<Lanes>,
}

impl TaskQueue {
    /// Create an empty queue observing the given depletion flag.
    pub fn new(depleted: DepletionFlag) -> Self {
        Self {
            depleted,
            next_id: AtomicU64::new(1),
            lanes: Mutex::new(Lanes::default()),
        }
    }

    /// Append a task to the lane matching its priority.
    ///
    /// Once the depletion flag has tripped the task is dropped silently (a
    /// log line, no error).
    pub fn enqueue(&self, mut task: Task) {
        if self.depleted.is_tripped() {
            warn!(label = task.label, "depletion flag set, task dropped");
            return;
        }
        task.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut lanes = self.lanes.lock();
        debug!(id = task.id, label = task.label, priority = %task.priority, "task enqueued");
        match task.priority {
            Priority::High => lanes.high.push_back(task),
            Priority::Medium => lanes.medium.push_back(task),
            Priority::Low => lanes.low.push_back(task),
        }
    }

    /// Pop the oldest task from the highest non-empty lane, if any.
    pub fn dequeue(&self) -> Option<Task> {
        let mut lanes = self.lanes.lock();
        if let Some(task) = lanes.high.pop_front() {
            Some(task)
        } else if let Some(task) = lanes.medium.pop_front() {
            Some(task)
        } else {
            lanes.low.pop_front()
        }
    }

    /// Number of queued tasks across all lanes.
    pub fn len(&self) -> usize {
        let lanes = self.lanes.lock();
        lanes.high.len() + lanes.medium.len() + lanes.low.len()
    }

    /// Whether all three lanes are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
