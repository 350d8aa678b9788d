// GOVERNANCE PROPOSAL EXECUTION
// Applies proposals that already passed; voting and tallying happen elsewhere
//
// SAFETY INVARIANTS:
// 1. Validation runs the same gates as execution and never writes
// 2. A param change proposal lands in one gated write or not at all
// 3. Cancelling removes the plan only; applied records stay

use crate::error::AppError;
use log::info;
use rollhub_params::{ParamKeeper, ParamSet, ParamValue};
use rollhub_state::KvStore;
use rollhub_upgrade::{registry, UpgradePlan};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamChange {
    pub key: String,
    pub value: ParamValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proposal {
    SoftwareUpgrade { plan: UpgradePlan },
    CancelSoftwareUpgrade,
    ParamChange { module: String, changes: Vec<ParamChange> },
}

impl Proposal {
    pub fn kind(&self) -> &'static str {
        match self {
            Proposal::SoftwareUpgrade { .. } => "SoftwareUpgrade",
            Proposal::CancelSoftwareUpgrade => "CancelSoftwareUpgrade",
            Proposal::ParamChange { .. } => "ParamChange",
        }
    }
}

fn merged_params(
    params: &ParamKeeper,
    store: &dyn KvStore,
    module: &str,
    changes: &[ParamChange],
) -> Result<ParamSet, AppError> {
    if changes.is_empty() {
        return Err(AppError::EmptyParamChange(module.to_string()));
    }
    let mut merged = params.get_params(store, module)?;
    for change in changes {
        merged.insert(&change.key, change.value.clone());
    }
    Ok(merged)
}

/// Check that `proposal` would execute at `height`, without writing
pub fn validate_proposal(
    proposal: &Proposal,
    params: &ParamKeeper,
    store: &dyn KvStore,
    height: u64,
) -> Result<(), AppError> {
    match proposal {
        Proposal::SoftwareUpgrade { plan } => registry::check_schedule(store, plan, height)?,
        Proposal::CancelSoftwareUpgrade => {
            if registry::get(store)?.is_none() {
                return Err(AppError::NoPlanToCancel);
            }
        }
        Proposal::ParamChange { module, changes } => {
            let merged = merged_params(params, store, module, changes)?;
            params.validate_params(module, &merged)?;
        }
    }
    Ok(())
}

pub fn execute_proposal(
    proposal: Proposal,
    params: &ParamKeeper,
    store: &mut dyn KvStore,
    height: u64,
) -> Result<(), AppError> {
    let kind = proposal.kind();
    match proposal {
        Proposal::SoftwareUpgrade { plan } => registry::schedule(store, &plan, height)?,
        Proposal::CancelSoftwareUpgrade => {
            if registry::clear(store)?.is_none() {
                return Err(AppError::NoPlanToCancel);
            }
        }
        Proposal::ParamChange { module, mut changes } if changes.len() == 1 => {
            if let Some(ParamChange { key, value }) = changes.pop() {
                params.update_param(store, &module, &key, value)?;
            }
        }
        Proposal::ParamChange { module, changes } => {
            let merged = merged_params(params, store, &module, &changes)?;
            params.set_params(store, &module, merged)?;
        }
    }
    info!("Executed {} proposal at height {}", kind, height);
    Ok(())
}
