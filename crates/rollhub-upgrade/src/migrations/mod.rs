pub mod v3;

use crate::keeper::UpgradeKeeper;
use rollhub_params::ParamKeeper;

/// Bind every migration this binary knows about
pub fn register_upgrade_handlers(upgrades: &mut UpgradeKeeper, params: &ParamKeeper) {
    upgrades.set_upgrade_handler(v3::UPGRADE_NAME, v3::V3Migration::new(params.clone()));
}
