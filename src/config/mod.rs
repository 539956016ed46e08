//! Engine configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::resource::ReplenishRange;

/// Per-pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Quantity the pool starts with.
    pub initial_quantity: u64,
    /// Range for background replenish draws.
    pub replenish: ReplenishRange,
}

/// Engine timing knobs, in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Sleep after a blocked gate or a failed task precondition.
    pub backoff_ms: u64,
    /// Length of a worker break.
    pub break_ms: u64,
    /// Sleep when the queue comes up empty.
    pub idle_ms: u64,
    /// Pause after each unit of work inside a costed action.
    pub work_ms: u64,
    /// Period of the background replenisher.
    pub replenish_period_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            backoff_ms: 5_000,
            break_ms: 10_000,
            idle_ms: 1_000,
            work_ms: 1_000,
            replenish_period_ms: 5_000,
        }
    }
}

impl TimingConfig {
    /// Backoff after a blocked gate or failed precondition.
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Length of a worker break.
    pub fn break_duration(&self) -> Duration {
        Duration::from_millis(self.break_ms)
    }

    /// Yield when the queue is empty.
    pub fn idle_pause(&self) -> Duration {
        Duration::from_millis(self.idle_ms)
    }

    /// Pause between units of work inside a costed action.
    pub fn work_pause(&self) -> Duration {
        Duration::from_millis(self.work_ms)
    }

    /// Replenisher tick period.
    pub fn replenish_period(&self) -> Duration {
        Duration::from_millis(self.replenish_period_ms)
    }
}

/// Root engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of worker threads.
    pub worker_count: usize,
    /// Starting budget balance.
    pub initial_budget: i64,
    /// Named resource pools.
    pub resources: HashMap<String, ResourceConfig>,
    /// Timing knobs.
    #[serde(default)]
    pub timings: TimingConfig,
}

impl EngineConfig {
    /// The classic construction-site wiring: one hundred bricks, fifty bags
    /// of cement, a thousand in the kitty, and a three-person crew.
    pub fn construction_site() -> Self {
        let mut resources = HashMap::new();
        resources.insert(
            "bricks".to_string(),
            ResourceConfig {
                initial_quantity: 100,
                replenish: ReplenishRange::new(5, 15),
            },
        );
        resources.insert(
            "cement".to_string(),
            ResourceConfig {
                initial_quantity: 50,
                replenish: ReplenishRange::new(5, 15),
            },
        );
        Self {
            worker_count: 3,
            initial_budget: 1_000,
            resources,
            timings: TimingConfig::default(),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be greater than 0".into());
        }
        if self.initial_budget <= 0 {
            return Err("initial_budget must be greater than 0".into());
        }
        if self.resources.is_empty() {
            return Err("at least one resource pool must be defined".into());
        }
        for (name, resource) in &self.resources {
            if resource.replenish.min > resource.replenish.max {
                return Err(format!(
                    "resource `{name}` invalid: replenish min exceeds max"
                ));
            }
        }
        Ok(())
    }

    /// Parse engine configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: EngineConfig =
            serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_site_wiring_is_valid() {
        let cfg = EngineConfig::construction_site();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.worker_count, 3);
        assert_eq!(cfg.resources["bricks"].initial_quantity, 100);
        assert_eq!(cfg.resources["cement"].initial_quantity, 50);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let mut cfg = EngineConfig::construction_site();
        cfg.worker_count = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_resource_map_is_rejected() {
        let mut cfg = EngineConfig::construction_site();
        cfg.resources.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_replenish_range_is_rejected() {
        let mut cfg = EngineConfig::construction_site();
        cfg.resources.get_mut("bricks").unwrap().replenish = ReplenishRange { min: 20, max: 5 };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("bricks"));
    }

    #[test]
    fn from_json_str_parses_and_validates() {
        let cfg = EngineConfig::from_json_str(
            r#"{
                "worker_count": 2,
                "initial_budget": 500,
                "resources": {
                    "bricks": { "initial_quantity": 10, "replenish": { "min": 1, "max": 3 } }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.worker_count, 2);
        // Timings fall back to the defaults.
        assert_eq!(cfg.timings.backoff_ms, 5_000);

        assert!(EngineConfig::from_json_str("{}").is_err());
    }
}
