// === Value types ===
pub mod dec;
pub mod coin;
pub mod value;

// === Validation gate ===
pub mod error;
pub mod validate;
pub mod set;
pub mod modules;

// === Storage ===
pub mod keeper;

pub use coin::Coin;
pub use dec::{Dec, DecParseError};
pub use error::ParamsError;
pub use keeper::{ModuleSpec, ParamKeeper};
pub use modules::{EibcParams, RollappParams, SequencerParams};
pub use set::{validate_param_set, ModuleParams, ParamSet, ParamSetPair, ValidatorFn};
pub use value::ParamValue;
