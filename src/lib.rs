//! # Foreman
//!
//! A bounded-resource, priority-driven crew scheduling engine.
//!
//! A fixed pool of worker threads drains a three-lane priority queue, gated
//! by shared, self-healing resource pools and a monetary budget. The hard
//! part is the governance core: safe concurrent access to shared counters
//! under contention, strict-priority admission of work, threshold-triggered
//! replenishment, and budget checks that hold workers back instead of letting
//! the site overdraw.
//!
//! ## Shape of the engine
//!
//! - [`core::resource::ResourcePool`] — a quantity counter behind its own
//!   mutex plus a one-permit admission gate serializing the compound
//!   consume-or-replenish sequence. Shortfalls self-heal with a random
//!   replenish draw; consumption cannot fail.
//! - [`core::budget::BudgetGovernor`] — an atomic balance with a check /
//!   deduct pair and an emergency top-up when the balance runs critically
//!   low.
//! - [`core::queue::TaskQueue`] — three FIFO lanes behind one mutex, drained
//!   strictly High, Medium, Low.
//! - [`core::worker`] — the per-thread control loop: recompute the
//!   availability gate (weather, skill, budget), roll for a break, then
//!   dequeue and execute.
//! - [`core::replenisher`] — a background thread topping up every pool on a
//!   fixed period, cancellable through a stop channel.
//! - [`orchestrator::Orchestrator`] — builds everything from an
//!   [`config::EngineConfig`], seeds tasks, and joins on shutdown.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use foreman::actions;
//! use foreman::config::EngineConfig;
//! use foreman::orchestrator::Orchestrator;
//! use foreman::sim::RandomEnvironment;
//!
//! let site = Orchestrator::start(
//!     EngineConfig::construction_site(),
//!     Arc::new(RandomEnvironment),
//! ).expect("startup");
//!
//! site.submit(actions::urgent_repairs());
//! site.submit(actions::laying_bricks(site.context()));
//!
//! site.shutdown();
//! site.join();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core scheduling components and shared state.
pub mod core;
/// Configuration models for the engine and its pools.
pub mod config;
/// Composition root wiring pools, workers, and the replenisher together.
pub mod orchestrator;
/// Stub construction actions bound to the seeded tasks.
pub mod actions;
/// Random environment simulation (weather, breaks).
pub mod sim;
/// Shared utilities.
pub mod util;
