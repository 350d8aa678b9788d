use rollhub_params::modules::eibc::{KEY_EPOCH_IDENTIFIER, KEY_ERR_ACK_FEE, KEY_TIMEOUT_FEE};
use rollhub_params::modules::sequencer::BOND_DENOM;
use rollhub_params::{
    Coin, Dec, EibcParams, ParamKeeper, ParamSet, RollappParams, SequencerParams,
};
use rollhub_state::{encode, KvStore, MemoryStore, SledStore};
use rollhub_upgrade::migrations::v3::{V3_CREATE_GAUGE_FEE, UPGRADE_NAME};
use rollhub_upgrade::{
    register_upgrade_handlers, registry, BeginBlockOutcome, FatalError, MigrationError,
    UpgradeKeeper, UpgradePlan,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Chain state as it looked before v3: registration open, short dispute
/// window, small bond and the eibc set without gauge fees.
fn seed_pre_v3(params: &ParamKeeper, store: &mut dyn KvStore) {
    params
        .set(
            store,
            &RollappParams {
                rollapps_enabled: true,
                dispute_period_in_blocks: 20_000,
            },
        )
        .unwrap();
    params
        .set(
            store,
            &SequencerParams {
                min_bond: Coin::new(BOND_DENOM, 500_000_000),
                unbonding_time_secs: 600,
            },
        )
        .unwrap();

    let legacy_eibc = ParamSet::new()
        .with(KEY_EPOCH_IDENTIFIER, "minute")
        .with(KEY_TIMEOUT_FEE, Dec::with_prec(2, 3))
        .with(KEY_ERR_ACK_FEE, Dec::with_prec(5, 2));
    store
        .set(&ParamKeeper::params_key("eibc"), &encode(&legacy_eibc).unwrap())
        .unwrap();
}

fn node() -> (ParamKeeper, UpgradeKeeper) {
    let params = ParamKeeper::with_default_modules();
    let mut upgrades = UpgradeKeeper::new();
    register_upgrade_handlers(&mut upgrades, &params);
    (params, upgrades)
}

#[test]
fn v3_applies_at_plan_height() {
    init_logger();
    let (params, upgrades) = node();
    let mut store = MemoryStore::new();
    seed_pre_v3(&params, &mut store);

    upgrades
        .schedule_upgrade(&mut store, UpgradePlan::new(UPGRADE_NAME, 5), 0)
        .unwrap();
    let plan = upgrades.get_upgrade_plan(&store).unwrap().unwrap();
    assert_eq!(plan.name, "v3");
    assert_eq!(plan.height, 5);

    assert!(matches!(
        upgrades.begin_block(&mut store, 4).unwrap(),
        BeginBlockOutcome::Pending { height: 5, .. }
    ));
    let rollapp: RollappParams = params.get(&store).unwrap();
    assert!(rollapp.rollapps_enabled);

    assert_eq!(
        upgrades.begin_block(&mut store, 5).unwrap(),
        BeginBlockOutcome::Applied {
            name: "v3".to_string(),
            height: 5
        }
    );
    assert!(upgrades.get_upgrade_plan(&store).unwrap().is_none());

    let rollapp: RollappParams = params.get(&store).unwrap();
    assert!(!rollapp.rollapps_enabled);
    assert_eq!(rollapp.dispute_period_in_blocks, 120_960);

    let sequencer: SequencerParams = params.get(&store).unwrap();
    assert_eq!(sequencer.min_bond.amount, 1_000_000_000);
    assert_eq!(sequencer.min_bond.denom, "adym");

    let eibc: EibcParams = params.get(&store).unwrap();
    assert_eq!(eibc.create_gauge_fee, V3_CREATE_GAUGE_FEE);
    assert_eq!(eibc.add_to_gauge_fee, 0);
    assert_eq!(eibc.err_ack_fee, Dec::with_prec(5, 2));
    assert_eq!(eibc.timeout_fee, Dec::with_prec(2, 3));
    assert_eq!(eibc.epoch_identifier, "minute");

    // Later blocks are a no-op.
    for height in 5..10 {
        assert_eq!(upgrades.begin_block(&mut store, height).unwrap(), BeginBlockOutcome::Idle);
    }
    assert_eq!(registry::applied_height(&store, "v3").unwrap(), Some(5));
}

#[test]
fn schedule_height_must_be_in_future() {
    let (_, upgrades) = node();
    let mut store = MemoryStore::new();
    let current = 100;

    assert!(upgrades
        .schedule_upgrade(&mut store, UpgradePlan::new("v3", current), current)
        .is_err());
    assert!(upgrades
        .schedule_upgrade(&mut store, UpgradePlan::new("v3", current - 1), current)
        .is_err());
    upgrades
        .schedule_upgrade(&mut store, UpgradePlan::new("v3", current + 5), current)
        .unwrap();
}

#[test]
fn unknown_upgrade_halts_without_touching_state() {
    init_logger();
    let (params, upgrades) = node();
    let mut store = MemoryStore::new();
    seed_pre_v3(&params, &mut store);
    upgrades
        .schedule_upgrade(&mut store, UpgradePlan::new("v4", 3).with_info("release v4.0.0"), 1)
        .unwrap();

    let err = upgrades.begin_block(&mut store, 3).unwrap_err();
    assert!(matches!(err, FatalError::UnknownUpgradeName { .. }));
    assert!(err.to_string().contains("v4"));

    assert_eq!(upgrades.get_upgrade_plan(&store).unwrap().unwrap().name, "v4");
    let rollapp: RollappParams = params.get(&store).unwrap();
    assert_eq!(rollapp.dispute_period_in_blocks, 20_000);
}

#[test]
fn failing_migration_keeps_old_params() {
    init_logger();
    let params = ParamKeeper::with_default_modules();
    let mut upgrades = UpgradeKeeper::new();
    let writer = params.clone();
    upgrades.set_upgrade_handler(
        "v3",
        move |store: &mut dyn KvStore, _plan: &UpgradePlan| -> Result<(), MigrationError> {
            writer.set(
                store,
                &RollappParams {
                    rollapps_enabled: false,
                    dispute_period_in_blocks: 30_000,
                },
            )?;
            // Zero bond is rejected by the gate.
            writer.set(
                store,
                &SequencerParams {
                    min_bond: Coin::new(BOND_DENOM, 0),
                    unbonding_time_secs: 1,
                },
            )?;
            Ok(())
        },
    );

    let mut store = MemoryStore::new();
    params.init_defaults(&mut store).unwrap();
    upgrades
        .schedule_upgrade(&mut store, UpgradePlan::new("v3", 2), 1)
        .unwrap();

    let err = upgrades.begin_block(&mut store, 2).unwrap_err();
    assert!(matches!(err, FatalError::MigrationFailed { .. }));

    let rollapp: RollappParams = params.get(&store).unwrap();
    assert_eq!(rollapp, RollappParams::default());
    assert!(upgrades.get_upgrade_plan(&store).unwrap().is_some());
}

#[test]
fn plan_and_params_survive_restart() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let (params, upgrades) = node();

    {
        let mut store = SledStore::open(dir.path()).unwrap();
        seed_pre_v3(&params, &mut store);
        upgrades
            .schedule_upgrade(&mut store, UpgradePlan::new("v3", 5), 2)
            .unwrap();
        store.flush().unwrap();
    }

    let mut store = SledStore::open(dir.path()).unwrap();
    assert_eq!(
        upgrades.get_upgrade_plan(&store).unwrap(),
        Some(UpgradePlan::new("v3", 5))
    );

    // Restarted past the plan height.
    assert!(matches!(
        upgrades.begin_block(&mut store, 6).unwrap(),
        BeginBlockOutcome::Applied { height: 6, .. }
    ));
    store.flush().unwrap();
    drop(store);

    let store = SledStore::open(dir.path()).unwrap();
    assert!(upgrades.get_upgrade_plan(&store).unwrap().is_none());
    let rollapp: RollappParams = params.get(&store).unwrap();
    assert!(!rollapp.rollapps_enabled);
}
