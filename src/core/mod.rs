//! Core scheduling components and shared state.

pub mod budget;
pub mod context;
pub mod error;
pub mod gate;
pub mod queue;
pub mod replenisher;
pub mod resource;
pub mod worker;

pub use budget::BudgetGovernor;
pub use context::{DepletionFlag, SiteContext, SiteFlags};
pub use error::{AppResult, EngineError};
pub use gate::{Environment, Hold};
pub use queue::{Priority, Task, TaskQueue};
pub use replenisher::ReplenisherHandle;
pub use resource::{AdmissionGate, GatePermit, ReplenishRange, ResourcePool};
pub use worker::{spawn_workers, WorkerState};
