// UPGRADE PLAN REGISTRY
// Durable record of the pending upgrade and of upgrades already applied
//
// SAFETY INVARIANTS:
// 1. At most one plan is pending
// 2. A plan is only accepted for a strictly future height
// 3. An applied upgrade name can never be scheduled again
// 4. Every record lives in the store handed in, never in memory

use crate::error::UpgradeError;
use crate::plan::UpgradePlan;
use log::info;
use rollhub_state::{decode, encode, KvStore, StoreError};

pub const PLAN_KEY: &[u8] = b"upgrade/plan";
pub const DONE_PREFIX: &str = "upgrade/done/";

pub fn done_key(name: &str) -> Vec<u8> {
    format!("{DONE_PREFIX}{name}").into_bytes()
}

/// Accept `plan` if nothing is pending and its height lies ahead of `current_height`
pub fn schedule(
    store: &mut dyn KvStore,
    plan: &UpgradePlan,
    current_height: u64,
) -> Result<(), UpgradeError> {
    check_schedule(store, plan, current_height)?;
    store.set(PLAN_KEY, &encode(plan)?)?;
    info!("Scheduled upgrade {} at height {}", plan.name, plan.height);
    Ok(())
}

/// The checks of [`schedule`] without writing
pub fn check_schedule(
    store: &dyn KvStore,
    plan: &UpgradePlan,
    current_height: u64,
) -> Result<(), UpgradeError> {
    if plan.name.trim().is_empty() {
        return Err(UpgradeError::EmptyName);
    }
    if let Some(pending) = get(store)? {
        return Err(UpgradeError::DuplicatePlan {
            pending: pending.name,
        });
    }
    if plan.height <= current_height {
        return Err(UpgradeError::InvalidHeight {
            height: plan.height,
            current: current_height,
        });
    }
    if let Some(height) = applied_height(store, &plan.name)? {
        return Err(UpgradeError::AlreadyApplied {
            name: plan.name.clone(),
            height,
        });
    }
    Ok(())
}

pub fn get(store: &dyn KvStore) -> Result<Option<UpgradePlan>, StoreError> {
    match store.get(PLAN_KEY)? {
        Some(bytes) => Ok(Some(decode(&bytes)?)),
        None => Ok(None),
    }
}

/// Remove the pending plan; no-op when there is none
pub fn clear(store: &mut dyn KvStore) -> Result<Option<UpgradePlan>, StoreError> {
    let pending = get(store)?;
    if let Some(plan) = &pending {
        store.delete(PLAN_KEY)?;
        info!("Cleared upgrade plan {}", plan.name);
    }
    Ok(pending)
}

pub fn mark_applied(store: &mut dyn KvStore, name: &str, height: u64) -> Result<(), StoreError> {
    store.set(&done_key(name), &height.to_be_bytes())
}

pub fn applied_height(store: &dyn KvStore, name: &str) -> Result<Option<u64>, StoreError> {
    match store.get(&done_key(name))? {
        Some(bytes) => {
            let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                StoreError::Codec(format!("applied height of {name} is {} bytes", bytes.len()))
            })?;
            Ok(Some(u64::from_be_bytes(raw)))
        }
        None => Ok(None),
    }
}

/// Every applied upgrade, ascending by name
pub fn applied_upgrades(store: &dyn KvStore) -> Result<Vec<(String, u64)>, StoreError> {
    let mut applied = Vec::new();
    for (key, _) in store.scan_prefix(DONE_PREFIX.as_bytes())? {
        let name = String::from_utf8_lossy(&key[DONE_PREFIX.len()..]).into_owned();
        if let Some(height) = applied_height(store, &name)? {
            applied.push((name, height));
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollhub_state::MemoryStore;

    #[test]
    fn test_schedule_rules() {
        let mut store = MemoryStore::new();

        assert!(matches!(
            schedule(&mut store, &UpgradePlan::new("v3", 10), 10),
            Err(UpgradeError::InvalidHeight { height: 10, current: 10 })
        ));
        assert!(matches!(
            schedule(&mut store, &UpgradePlan::new("  ", 20), 10),
            Err(UpgradeError::EmptyName)
        ));

        schedule(&mut store, &UpgradePlan::new("v3", 15), 10).unwrap();
        assert!(matches!(
            schedule(&mut store, &UpgradePlan::new("v4", 20), 10),
            Err(UpgradeError::DuplicatePlan { .. })
        ));
        assert_eq!(get(&store).unwrap(), Some(UpgradePlan::new("v3", 15)));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = MemoryStore::new();
        schedule(&mut store, &UpgradePlan::new("v3", 5), 0).unwrap();

        assert!(clear(&mut store).unwrap().is_some());
        assert!(clear(&mut store).unwrap().is_none());
        assert_eq!(get(&store).unwrap(), None);
    }

    #[test]
    fn test_applied_name_cannot_be_rescheduled() {
        let mut store = MemoryStore::new();
        mark_applied(&mut store, "v3", 5).unwrap();

        assert_eq!(applied_height(&store, "v3").unwrap(), Some(5));
        assert!(matches!(
            schedule(&mut store, &UpgradePlan::new("v3", 50), 10),
            Err(UpgradeError::AlreadyApplied { height: 5, .. })
        ));
        assert_eq!(applied_upgrades(&store).unwrap(), vec![("v3".to_string(), 5)]);
    }
}
