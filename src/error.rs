use rollhub_params::ParamsError;
use rollhub_state::StoreError;
use rollhub_upgrade::{FatalError, UpgradeError};
use thiserror::Error;

/// Recoverable node errors; fatal halts travel as [`BlockError::Halt`]
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Upgrade(#[from] UpgradeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("param change proposal for {0} has no changes")]
    EmptyParamChange(String),

    #[error("no upgrade plan to cancel")]
    NoPlanToCancel,

    #[error("block {0} is still in progress")]
    BlockInProgress(u64),

    #[error("no block in progress to commit")]
    NoBlockInProgress,

    #[error("block {height} does not follow committed height {committed}")]
    NonSequentialHeight { height: u64, committed: u64 },
}

/// Outcome of a failed `begin_block`
#[derive(Debug, Error)]
pub enum BlockError {
    /// The block was refused before any state changed
    #[error(transparent)]
    Rejected(#[from] AppError),

    /// The node must halt
    #[error(transparent)]
    Halt(#[from] FatalError),
}
