// UPGRADE HANDLER DISPATCH
// Height-triggered, exactly-once migration inside the block-begin hook
//
// SAFETY INVARIANTS:
// 1. A due plan runs before any other block-begin logic
// 2. The migration, the plan removal and the applied record commit together
// 3. A failed migration leaves the plan and all prior state untouched
// 4. A due plan without a handler halts the node instead of skipping the upgrade
// 5. After a plan is applied, later blocks are a no-op

use crate::error::{FatalError, UpgradeError};
use crate::handler::UpgradeHandler;
use crate::plan::{BeginBlockOutcome, UpgradePlan, UpgradeState};
use crate::registry;
use log::{debug, error, info};
use rollhub_state::{CacheStore, KvStore, StoreError};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct UpgradeKeeper {
    handlers: BTreeMap<String, Box<dyn UpgradeHandler>>,
}

impl UpgradeKeeper {
    pub fn new() -> Self {
        UpgradeKeeper {
            handlers: BTreeMap::new(),
        }
    }

    /// Bind a migration routine to an upgrade name, replacing any previous one
    pub fn set_upgrade_handler<H>(&mut self, name: impl Into<String>, handler: H)
    where
        H: UpgradeHandler + 'static,
    {
        let name = name.into();
        debug!("Registered upgrade handler {}", name);
        self.handlers.insert(name, Box::new(handler));
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn handler_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn schedule_upgrade(
        &self,
        store: &mut dyn KvStore,
        plan: UpgradePlan,
        current_height: u64,
    ) -> Result<(), UpgradeError> {
        registry::schedule(store, &plan, current_height)
    }

    pub fn get_upgrade_plan(&self, store: &dyn KvStore) -> Result<Option<UpgradePlan>, StoreError> {
        registry::get(store)
    }

    pub fn clear_upgrade_plan(&self, store: &mut dyn KvStore) -> Result<Option<UpgradePlan>, StoreError> {
        registry::clear(store)
    }

    pub fn status(&self, store: &dyn KvStore, height: u64) -> Result<UpgradeState, StoreError> {
        Ok(match registry::get(store)? {
            None => UpgradeState::NoPlan,
            Some(plan) if plan.should_execute(height) => UpgradeState::Applying(plan),
            Some(plan) => UpgradeState::PlanPending(plan),
        })
    }

    /// Block-begin check; applies the pending plan once `height` reaches it
    pub fn begin_block(
        &self,
        store: &mut dyn KvStore,
        height: u64,
    ) -> Result<BeginBlockOutcome, FatalError> {
        let plan = match registry::get(store)? {
            None => return Ok(BeginBlockOutcome::Idle),
            Some(plan) => plan,
        };

        if !plan.should_execute(height) {
            return Ok(BeginBlockOutcome::Pending {
                name: plan.name,
                height: plan.height,
            });
        }

        let handler = match self.handlers.get(&plan.name) {
            Some(handler) => handler,
            None => {
                error!(
                    "UPGRADE \"{}\" NEEDED at height {}: {}",
                    plan.name, height, plan.info
                );
                return Err(FatalError::UnknownUpgradeName {
                    name: plan.name,
                    height,
                });
            }
        };

        info!("Applying upgrade {} at height {}", plan.name, height);

        let mut branch = CacheStore::new(store);
        if let Err(source) = handler.migrate(&mut branch, &plan) {
            branch.discard();
            error!("Upgrade {} failed at height {}: {}", plan.name, height, source);
            return Err(FatalError::MigrationFailed {
                name: plan.name,
                height,
                source,
            });
        }

        debug!("Upgrade {} migration touched {} keys", plan.name, branch.pending_len());
        registry::clear(&mut branch)?;
        registry::mark_applied(&mut branch, &plan.name, height)?;
        branch.write()?;

        info!("Upgrade {} applied at height {}", plan.name, height);
        Ok(BeginBlockOutcome::Applied {
            name: plan.name,
            height,
        })
    }
}

impl std::fmt::Debug for UpgradeKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpgradeKeeper")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
