//! `v3` store migration.
//!
//! Closes rollapp registration, resets sequencer bonding to the launch values
//! and moves eibc to the schema with gauge fees. Fee rates and the epoch
//! identifier already on chain are kept when they still pass validation.

use crate::error::MigrationError;
use crate::handler::UpgradeHandler;
use crate::plan::UpgradePlan;
use log::{info, warn};
use rollhub_params::modules::eibc::{
    self, KEY_EPOCH_IDENTIFIER, KEY_ERR_ACK_FEE, KEY_TIMEOUT_FEE,
};
use rollhub_params::modules::rollapp::DEFAULT_DISPUTE_PERIOD_IN_BLOCKS;
use rollhub_params::modules::sequencer::{BOND_DENOM, DEFAULT_UNBONDING_TIME_SECS};
use rollhub_params::{
    Coin, Dec, EibcParams, ParamKeeper, ParamSet, ParamValue, ParamsError, RollappParams,
    SequencerParams,
};
use rollhub_state::KvStore;

pub const UPGRADE_NAME: &str = "v3";

pub const V3_MIN_BOND_AMOUNT: i128 = 1_000_000_000;
pub const V3_CREATE_GAUGE_FEE: i128 = 10_000_000_000_000_000_000;
pub const V3_ADD_TO_GAUGE_FEE: i128 = 0;

pub fn rollapp_params() -> RollappParams {
    RollappParams {
        rollapps_enabled: false,
        dispute_period_in_blocks: DEFAULT_DISPUTE_PERIOD_IN_BLOCKS,
    }
}

pub fn sequencer_params() -> SequencerParams {
    SequencerParams {
        min_bond: Coin::new(BOND_DENOM, V3_MIN_BOND_AMOUNT),
        unbonding_time_secs: DEFAULT_UNBONDING_TIME_SECS,
    }
}

/// eibc set after the schema change, keeping still-valid prior values
pub fn eibc_params(previous: Option<&ParamSet>) -> EibcParams {
    let mut params = EibcParams {
        create_gauge_fee: V3_CREATE_GAUGE_FEE,
        add_to_gauge_fee: V3_ADD_TO_GAUGE_FEE,
        ..EibcParams::default()
    };

    let previous = match previous {
        Some(set) => set,
        None => return params,
    };

    if let Some(fee) = carried_dec(previous, KEY_ERR_ACK_FEE, eibc::validate_err_ack_fee) {
        params.err_ack_fee = fee;
    }
    if let Some(fee) = carried_dec(previous, KEY_TIMEOUT_FEE, eibc::validate_timeout_fee) {
        params.timeout_fee = fee;
    }
    if let Some(value) = previous.get(KEY_EPOCH_IDENTIFIER) {
        match (eibc::validate_epoch_identifier(value), value.as_str()) {
            (Ok(()), Some(epoch)) => params.epoch_identifier = epoch.to_string(),
            _ => warn!("Dropping invalid eibc {}: {}", KEY_EPOCH_IDENTIFIER, value),
        }
    }

    params
}

fn carried_dec(
    previous: &ParamSet,
    key: &str,
    validate: fn(&ParamValue) -> Result<(), ParamsError>,
) -> Option<Dec> {
    let value = previous.get(key)?;
    match validate(value) {
        Ok(()) => value.as_dec(),
        Err(err) => {
            warn!("Dropping invalid eibc {}: {}", key, err);
            None
        }
    }
}

/// Handler registered under [`UPGRADE_NAME`]
#[derive(Debug, Clone)]
pub struct V3Migration {
    params: ParamKeeper,
}

impl V3Migration {
    pub fn new(params: ParamKeeper) -> Self {
        V3Migration { params }
    }
}

impl UpgradeHandler for V3Migration {
    fn migrate(&self, store: &mut dyn KvStore, plan: &UpgradePlan) -> Result<(), MigrationError> {
        self.params.set(store, &rollapp_params())?;
        self.params.set(store, &sequencer_params())?;

        let previous = self.params.get_raw_params(store, eibc::MODULE)?;
        self.params.set(store, &eibc_params(previous.as_ref()))?;

        info!("Migrated module params for {} at height {}", plan.name, plan.height);
        Ok(())
    }
}
