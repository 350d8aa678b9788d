// NODE APPLICATION
// Wires the state store, parameter keeper and upgrade keeper into the block pipeline
//
// SAFETY INVARIANTS:
// 1. The upgrade check is the first step of every block
// 2. A block only begins at the height right after the committed one
// 3. Upgrades are scheduled against the block in progress, never a past one
// 4. Fatal upgrade errors are returned untouched; this type never exits the process

use crate::config::{NodeConfig, StoreBackend};
use crate::error::{AppError, BlockError};
use crate::gov::{self, Proposal};
use log::{debug, info};
use rollhub_params::{ParamKeeper, ParamSet};
use rollhub_state::{commit_id, CommitId, KvStore, MemoryStore, SledStore, StoreError};
use rollhub_upgrade::{
    register_upgrade_handlers, registry, BeginBlockOutcome, UpgradeKeeper, UpgradePlan,
    UpgradeState,
};

pub const HEIGHT_KEY: &[u8] = b"app/height";

pub struct App {
    store: Box<dyn KvStore>,
    params: ParamKeeper,
    upgrades: UpgradeKeeper,
    /// Last committed height
    height: u64,
    /// Height of the block in progress, if any
    block: Option<u64>,
}

fn load_height(store: &dyn KvStore) -> Result<u64, StoreError> {
    match store.get(HEIGHT_KEY)? {
        Some(bytes) => {
            let raw: [u8; 8] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| StoreError::Codec(format!("stored height is {} bytes", bytes.len())))?;
            Ok(u64::from_be_bytes(raw))
        }
        None => Ok(0),
    }
}

impl App {
    /// App over `store` with every known upgrade handler registered
    pub fn new(store: Box<dyn KvStore>) -> Result<Self, AppError> {
        let params = ParamKeeper::with_default_modules();
        let mut upgrades = UpgradeKeeper::new();
        register_upgrade_handlers(&mut upgrades, &params);
        Self::with_keepers(store, params, upgrades)
    }

    pub fn with_keepers(
        store: Box<dyn KvStore>,
        params: ParamKeeper,
        upgrades: UpgradeKeeper,
    ) -> Result<Self, AppError> {
        let height = load_height(&*store)?;
        debug!(
            "Loaded app at height {} with upgrade handlers {:?}",
            height,
            upgrades.handler_names().collect::<Vec<_>>()
        );
        Ok(App {
            store,
            params,
            upgrades,
            height,
            block: None,
        })
    }

    pub fn open(config: &NodeConfig) -> Result<Self, AppError> {
        let store: Box<dyn KvStore> = match config.store {
            StoreBackend::Sled => Box::new(SledStore::open(config.data_dir())?),
            StoreBackend::Memory => Box::new(MemoryStore::new()),
        };
        Self::new(store)
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn param_keeper(&self) -> &ParamKeeper {
        &self.params
    }

    pub fn upgrade_keeper(&self) -> &UpgradeKeeper {
        &self.upgrades
    }

    /// Height of the block in progress, or the committed height between blocks
    pub fn current_height(&self) -> u64 {
        self.block.unwrap_or(self.height)
    }

    pub fn store(&self) -> &dyn KvStore {
        &*self.store
    }

    /// Write default params for every module that has none
    pub fn init_genesis(&mut self) -> Result<usize, AppError> {
        let written = self.params.init_defaults(&mut *self.store)?;
        info!("Genesis initialized {} module param sets", written);
        Ok(written)
    }

    /// Start block `height`; a due upgrade is applied before anything else
    pub fn begin_block(&mut self, height: u64) -> Result<BeginBlockOutcome, BlockError> {
        if let Some(open) = self.block {
            return Err(AppError::BlockInProgress(open).into());
        }
        if height != self.height + 1 {
            return Err(AppError::NonSequentialHeight {
                height,
                committed: self.height,
            }
            .into());
        }

        let outcome = self.upgrades.begin_block(&mut *self.store, height)?;
        self.block = Some(height);
        Ok(outcome)
    }

    /// Persist the block in progress and return its commitment
    ///
    /// Without an open block only the genesis state at height 0 may be committed.
    pub fn commit(&mut self) -> Result<CommitId, AppError> {
        let height = match self.block.take() {
            Some(height) => height,
            None if self.height == 0 => 0,
            None => return Err(AppError::NoBlockInProgress),
        };

        self.store.set(HEIGHT_KEY, &height.to_be_bytes())?;
        self.store.flush()?;
        self.height = height;

        let id = commit_id(&*self.store, height)?;
        debug!("Committed height {} hash {}", height, id.hash_hex());
        Ok(id)
    }

    /// Commitment of the current committed state
    pub fn last_commit(&self) -> Result<CommitId, AppError> {
        Ok(commit_id(&*self.store, self.height)?)
    }

    /// Schedule `plan`; its height must lie beyond the block in progress
    pub fn schedule_upgrade(&mut self, plan: UpgradePlan) -> Result<(), AppError> {
        let current_height = self.current_height();
        Ok(self
            .upgrades
            .schedule_upgrade(&mut *self.store, plan, current_height)?)
    }

    pub fn get_upgrade_plan(&self) -> Result<Option<UpgradePlan>, AppError> {
        Ok(self.upgrades.get_upgrade_plan(&*self.store)?)
    }

    pub fn upgrade_status(&self) -> Result<UpgradeState, AppError> {
        Ok(self.upgrades.status(&*self.store, self.height + 1)?)
    }

    pub fn applied_upgrades(&self) -> Result<Vec<(String, u64)>, AppError> {
        Ok(registry::applied_upgrades(&*self.store)?)
    }

    pub fn get_params(&self, module: &str) -> Result<ParamSet, AppError> {
        Ok(self.params.get_params(&*self.store, module)?)
    }

    pub fn set_params(&mut self, module: &str, candidate: ParamSet) -> Result<(), AppError> {
        Ok(self.params.set_params(&mut *self.store, module, candidate)?)
    }

    pub fn validate_proposal(&self, proposal: &Proposal) -> Result<(), AppError> {
        gov::validate_proposal(proposal, &self.params, &*self.store, self.current_height())
    }

    /// Apply an already authorized proposal
    pub fn execute_proposal(&mut self, proposal: Proposal) -> Result<(), AppError> {
        let height = self.current_height();
        gov::execute_proposal(proposal, &self.params, &mut *self.store, height)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("height", &self.height)
            .field("block", &self.block)
            .field("upgrades", &self.upgrades)
            .finish()
    }
}
