use crate::error::MigrationError;
use crate::plan::UpgradePlan;
use rollhub_state::KvStore;

/// Migration routine bound to an upgrade name
///
/// `store` is a cache branch: writes reach durable state only if the routine
/// returns `Ok`.
pub trait UpgradeHandler {
    fn migrate(&self, store: &mut dyn KvStore, plan: &UpgradePlan) -> Result<(), MigrationError>;
}

impl<F> UpgradeHandler for F
where
    F: Fn(&mut dyn KvStore, &UpgradePlan) -> Result<(), MigrationError>,
{
    fn migrate(&self, store: &mut dyn KvStore, plan: &UpgradePlan) -> Result<(), MigrationError> {
        self(store, plan)
    }
}
