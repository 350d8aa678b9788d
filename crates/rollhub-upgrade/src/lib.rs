// === Plan records ===
pub mod plan;
pub mod error;
pub mod registry;

// === Dispatch ===
pub mod handler;
pub mod keeper;
pub mod migrations;

pub use error::{FatalError, MigrationError, UpgradeError};
pub use handler::UpgradeHandler;
pub use keeper::UpgradeKeeper;
pub use migrations::register_upgrade_handlers;
pub use plan::{BeginBlockOutcome, UpgradePlan, UpgradeState};
