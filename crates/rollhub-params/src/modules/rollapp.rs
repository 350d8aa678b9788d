use crate::error::ParamsError;
use crate::set::{ModuleParams, ParamSet, ParamSetPair};
use crate::validate::{expect_bool, expect_u64, validate_min_u64};
use crate::value::ParamValue;
use serde::{Deserialize, Serialize};

pub const MODULE: &str = "rollapp";

pub const KEY_ROLLAPPS_ENABLED: &str = "RollappsEnabled";
pub const KEY_DISPUTE_PERIOD_IN_BLOCKS: &str = "DisputePeriodInBlocks";

/// Shortest fraud-proof window: three days of 15s blocks
pub const MIN_DISPUTE_PERIOD_IN_BLOCKS: u64 = 17_280;

/// Three weeks of 15s blocks
pub const DEFAULT_DISPUTE_PERIOD_IN_BLOCKS: u64 = 120_960;

pub fn validate_rollapps_enabled(value: &ParamValue) -> Result<(), ParamsError> {
    expect_bool(value).map(|_| ())
}

pub fn validate_dispute_period_in_blocks(value: &ParamValue) -> Result<(), ParamsError> {
    validate_min_u64(KEY_DISPUTE_PERIOD_IN_BLOCKS, MIN_DISPUTE_PERIOD_IN_BLOCKS, value)
}

const PAIRS: &[ParamSetPair] = &[
    ParamSetPair::new(KEY_ROLLAPPS_ENABLED, validate_rollapps_enabled),
    ParamSetPair::new(KEY_DISPUTE_PERIOD_IN_BLOCKS, validate_dispute_period_in_blocks),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollappParams {
    /// Gates registration of new rollapps
    pub rollapps_enabled: bool,

    /// Blocks a state update stays open to fraud disputes
    pub dispute_period_in_blocks: u64,
}

impl Default for RollappParams {
    fn default() -> Self {
        RollappParams {
            rollapps_enabled: true,
            dispute_period_in_blocks: DEFAULT_DISPUTE_PERIOD_IN_BLOCKS,
        }
    }
}

impl ModuleParams for RollappParams {
    const MODULE: &'static str = MODULE;

    fn param_set_pairs() -> &'static [ParamSetPair] {
        PAIRS
    }

    fn to_param_set(&self) -> ParamSet {
        ParamSet::new()
            .with(KEY_ROLLAPPS_ENABLED, self.rollapps_enabled)
            .with(KEY_DISPUTE_PERIOD_IN_BLOCKS, self.dispute_period_in_blocks)
    }

    fn from_param_set(set: &ParamSet) -> Result<Self, ParamsError> {
        Ok(RollappParams {
            rollapps_enabled: expect_bool(set.require(MODULE, KEY_ROLLAPPS_ENABLED)?)?,
            dispute_period_in_blocks: expect_u64(set.require(MODULE, KEY_DISPUTE_PERIOD_IN_BLOCKS)?)?,
        })
    }
}
