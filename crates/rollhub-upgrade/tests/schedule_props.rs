use proptest::prelude::*;
use rollhub_state::MemoryStore;
use rollhub_upgrade::{BeginBlockOutcome, UpgradeError, UpgradeKeeper, UpgradePlan};

proptest! {
    #[test]
    fn schedule_accepts_only_future_heights(current in 0u64..1_000_000, plan_height in 0u64..1_000_000) {
        let keeper = UpgradeKeeper::new();
        let mut store = MemoryStore::new();
        let result = keeper.schedule_upgrade(&mut store, UpgradePlan::new("v3", plan_height), current);

        if plan_height > current {
            prop_assert!(result.is_ok());
        } else {
            let is_invalid_height = matches!(result, Err(UpgradeError::InvalidHeight { .. }));
            prop_assert!(is_invalid_height);
        }
    }

    #[test]
    fn plan_stays_pending_below_its_height(plan_height in 1u64..10_000, offset in 1u64..10_000) {
        let keeper = UpgradeKeeper::new();
        let mut store = MemoryStore::new();
        keeper.schedule_upgrade(&mut store, UpgradePlan::new("v3", plan_height), 0).unwrap();

        let height = plan_height.saturating_sub(offset);
        let outcome = keeper.begin_block(&mut store, height).unwrap();
        prop_assert_eq!(outcome, BeginBlockOutcome::Pending { name: "v3".to_string(), height: plan_height });
    }
}
