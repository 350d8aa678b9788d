use crate::coin::Coin;
use crate::error::ParamsError;
use crate::set::{ModuleParams, ParamSet, ParamSetPair};
use crate::validate::{expect_coin, expect_u64, validate_coin_floor, validate_min_u64};
use crate::value::ParamValue;
use serde::{Deserialize, Serialize};

pub const MODULE: &str = "sequencer";

pub const KEY_MIN_BOND: &str = "MinBond";
pub const KEY_UNBONDING_TIME: &str = "UnbondingTime";

pub const BOND_DENOM: &str = "adym";

/// Smallest bond governance may set: a tenth of the launch bond
pub const MIN_BOND_FLOOR: i128 = 100_000_000;

pub const DEFAULT_MIN_BOND_AMOUNT: i128 = 1_000_000_000;

/// 21 days
pub const DEFAULT_UNBONDING_TIME_SECS: u64 = 1_814_400;

pub fn validate_min_bond(value: &ParamValue) -> Result<(), ParamsError> {
    validate_coin_floor(KEY_MIN_BOND, MODULE, MIN_BOND_FLOOR, value)
}

pub fn validate_unbonding_time(value: &ParamValue) -> Result<(), ParamsError> {
    validate_min_u64(KEY_UNBONDING_TIME, 1, value)
}

const PAIRS: &[ParamSetPair] = &[
    ParamSetPair::new(KEY_MIN_BOND, validate_min_bond),
    ParamSetPair::new(KEY_UNBONDING_TIME, validate_unbonding_time),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerParams {
    /// Bond required to register a sequencer
    pub min_bond: Coin,

    /// Seconds a bond stays locked after unbonding starts
    pub unbonding_time_secs: u64,
}

impl Default for SequencerParams {
    fn default() -> Self {
        SequencerParams {
            min_bond: Coin::new(BOND_DENOM, DEFAULT_MIN_BOND_AMOUNT),
            unbonding_time_secs: DEFAULT_UNBONDING_TIME_SECS,
        }
    }
}

impl ModuleParams for SequencerParams {
    const MODULE: &'static str = MODULE;

    fn param_set_pairs() -> &'static [ParamSetPair] {
        PAIRS
    }

    fn to_param_set(&self) -> ParamSet {
        ParamSet::new()
            .with(KEY_MIN_BOND, self.min_bond.clone())
            .with(KEY_UNBONDING_TIME, self.unbonding_time_secs)
    }

    fn from_param_set(set: &ParamSet) -> Result<Self, ParamsError> {
        Ok(SequencerParams {
            min_bond: expect_coin(set.require(MODULE, KEY_MIN_BOND)?)?.clone(),
            unbonding_time_secs: expect_u64(set.require(MODULE, KEY_UNBONDING_TIME)?)?,
        })
    }
}
