pub mod app;
pub mod config;
pub mod error;
pub mod gov;

pub use app::App;
pub use config::{NodeConfig, StoreBackend};
pub use error::{AppError, BlockError};
pub use gov::{execute_proposal, validate_proposal, ParamChange, Proposal};

pub use rollhub_params as params;
pub use rollhub_state as state;
pub use rollhub_upgrade as upgrade;
