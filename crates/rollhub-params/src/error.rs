use rollhub_state::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("invalid parameter type: {0}")]
    InvalidParameterType(&'static str),

    #[error("invalid {pool} params: {value}")]
    InvalidParameterValue { pool: &'static str, value: String },

    #[error("{param} must not be negative: {value}")]
    NegativeValue { param: &'static str, value: String },

    #[error("{param} too large: {value} must be less than {ceiling}")]
    ValueTooLarge {
        param: &'static str,
        value: String,
        ceiling: String,
    },

    #[error("{param} too small: {value} must be at least {floor}")]
    ValueTooSmall {
        param: &'static str,
        value: String,
        floor: String,
    },

    #[error("unknown parameter {key} for module {module}")]
    UnknownParameter { module: String, key: String },

    #[error("missing parameter {key} for module {module}")]
    MissingParameter { module: String, key: String },

    #[error("unknown module: {0}")]
    UnknownModule(String),

    #[error("params for module {0} are not initialized")]
    ParamsNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
