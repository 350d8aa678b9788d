// MODULE PARAMETER STORE
// Per-module parameter sets, written only through the validator gate
//
// SAFETY INVARIANTS:
// 1. Every write runs the full module validator first
// 2. A module's set is replaced by a single key write (all fields or none)
// 3. Reads return the whole committed set or fail; never a partial view
// 4. Stored bytes are the deterministic encoding of the set

use crate::error::ParamsError;
use crate::modules::{EibcParams, RollappParams, SequencerParams};
use crate::set::{validate_param_set, ModuleParams, ParamSet, ParamSetPair};
use crate::value::ParamValue;
use log::{debug, info, warn};
use rollhub_state::{decode, encode, KvStore};
use std::collections::BTreeMap;

const PARAMS_PREFIX: &str = "params/";

/// Registered parameter subspace of one module
#[derive(Debug, Clone, Copy)]
pub struct ModuleSpec {
    pub module: &'static str,
    pub pairs: &'static [ParamSetPair],
    pub defaults: fn() -> ParamSet,
}

fn defaults_of<P: ModuleParams>() -> ParamSet {
    P::default().to_param_set()
}

/// Gatekeeper for every module parameter read and write
#[derive(Debug, Clone, Default)]
pub struct ParamKeeper {
    modules: BTreeMap<&'static str, ModuleSpec>,
}

impl ParamKeeper {
    /// Keeper with no registered modules
    pub fn new() -> Self {
        ParamKeeper {
            modules: BTreeMap::new(),
        }
    }

    /// Keeper with the hub's governed modules registered
    pub fn with_default_modules() -> Self {
        let mut keeper = ParamKeeper::new();
        keeper.register::<RollappParams>();
        keeper.register::<SequencerParams>();
        keeper.register::<EibcParams>();
        keeper
    }

    /// Register the subspace of `P`
    pub fn register<P: ModuleParams>(&mut self) {
        self.modules.insert(
            P::MODULE,
            ModuleSpec {
                module: P::MODULE,
                pairs: P::param_set_pairs(),
                defaults: defaults_of::<P>,
            },
        );
    }

    /// Registered module names, ascending
    pub fn modules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.keys().copied()
    }

    pub fn spec(&self, module: &str) -> Result<&ModuleSpec, ParamsError> {
        self.modules
            .get(module)
            .ok_or_else(|| ParamsError::UnknownModule(module.to_string()))
    }

    /// Storage key of a module's parameter set
    pub fn params_key(module: &str) -> Vec<u8> {
        format!("{PARAMS_PREFIX}{module}").into_bytes()
    }

    /// Run the module validator without writing
    pub fn validate_params(&self, module: &str, candidate: &ParamSet) -> Result<(), ParamsError> {
        let spec = self.spec(module)?;
        validate_param_set(spec.module, spec.pairs, candidate)
    }

    /// Stored set, undecoded schema; used by migrations reading pre-upgrade state
    pub fn get_raw_params(
        &self,
        store: &dyn KvStore,
        module: &str,
    ) -> Result<Option<ParamSet>, ParamsError> {
        self.spec(module)?;
        match store.get(&Self::params_key(module))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Current committed set of `module`
    pub fn get_params(&self, store: &dyn KvStore, module: &str) -> Result<ParamSet, ParamsError> {
        self.get_raw_params(store, module)?
            .ok_or_else(|| ParamsError::ParamsNotFound(module.to_string()))
    }

    /// Validate `candidate` in full and replace the stored set
    pub fn set_params(
        &self,
        store: &mut dyn KvStore,
        module: &str,
        candidate: ParamSet,
    ) -> Result<(), ParamsError> {
        if let Err(err) = self.validate_params(module, &candidate) {
            warn!("Rejected params for {}: {}", module, err);
            return Err(err);
        }

        let bytes = encode(&candidate)?;
        store.set(&Self::params_key(module), &bytes)?;
        debug!("Params for {} updated ({} keys)", module, candidate.len());
        Ok(())
    }

    /// Change one parameter; the merged set is validated as a whole
    pub fn update_param(
        &self,
        store: &mut dyn KvStore,
        module: &str,
        key: &str,
        value: ParamValue,
    ) -> Result<ParamSet, ParamsError> {
        let mut merged = self.get_params(store, module)?;
        merged.insert(key, value);
        self.set_params(store, module, merged.clone())?;
        info!("Param {}.{} changed", module, key);
        Ok(merged)
    }

    pub fn get<P: ModuleParams>(&self, store: &dyn KvStore) -> Result<P, ParamsError> {
        P::from_param_set(&self.get_params(store, P::MODULE)?)
    }

    pub fn set<P: ModuleParams>(&self, store: &mut dyn KvStore, params: &P) -> Result<(), ParamsError> {
        self.set_params(store, P::MODULE, params.to_param_set())
    }

    /// Write default sets for modules that have none; returns how many were written
    pub fn init_defaults(&self, store: &mut dyn KvStore) -> Result<usize, ParamsError> {
        let mut written = 0;
        for spec in self.modules.values() {
            if store.has(&Self::params_key(spec.module))? {
                continue;
            }
            self.set_params(store, spec.module, (spec.defaults)())?;
            written += 1;
        }
        if written > 0 {
            info!("Initialized default params for {} modules", written);
        }
        Ok(written)
    }
}
