use serde::{Deserialize, Serialize};
use std::fmt;

/// Upgrade scheduled to run at a fixed block height
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePlan {
    /// Key into the handler registry
    pub name: String,

    /// First block at which the migration runs
    pub height: u64,

    /// Free-form metadata, never interpreted
    #[serde(default)]
    pub info: String,
}

impl UpgradePlan {
    pub fn new(name: impl Into<String>, height: u64) -> Self {
        UpgradePlan {
            name: name.into(),
            height,
            info: String::new(),
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Whether the plan fires at `height`
    pub fn should_execute(&self, height: u64) -> bool {
        height >= self.height
    }
}

impl fmt::Display for UpgradePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.height)
    }
}

/// Lifecycle position of the upgrade subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeState {
    NoPlan,
    PlanPending(UpgradePlan),
    /// The pending plan is due at the queried height
    Applying(UpgradePlan),
}

/// What `begin_block` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginBlockOutcome {
    Idle,
    Pending { name: String, height: u64 },
    Applied { name: String, height: u64 },
}
