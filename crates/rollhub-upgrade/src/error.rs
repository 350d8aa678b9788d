use rollhub_params::ParamsError;
use rollhub_state::StoreError;
use thiserror::Error;

/// Rejected scheduling request; chain keeps running
#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("upgrade plan {pending} is already scheduled")]
    DuplicatePlan { pending: String },

    #[error("upgrade height {height} must be greater than current height {current}")]
    InvalidHeight { height: u64, current: u64 },

    #[error("upgrade plan name must not be empty")]
    EmptyName,

    #[error("upgrade {name} was already applied at height {height}")]
    AlreadyApplied { name: String, height: u64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure inside a migration routine
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("params migration failed: {0}")]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}

/// The node must halt; continuing would diverge from the network
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("UPGRADE \"{name}\" NEEDED at height {height}: no handler registered for this binary")]
    UnknownUpgradeName { name: String, height: u64 },

    #[error("upgrade {name} failed at height {height}: {source}")]
    MigrationFailed {
        name: String,
        height: u64,
        #[source]
        source: MigrationError,
    },

    #[error("upgrade store failure: {0}")]
    Store(#[from] StoreError),
}
