use proptest::prelude::*;
use rollhub_params::modules::eibc::{validate_err_ack_fee, validate_timeout_fee, KEY_TIMEOUT_FEE};
use rollhub_params::{Dec, EibcParams, ParamKeeper, ParamValue, ParamsError, RollappParams};
use rollhub_state::{KvStore, MemoryStore};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

proptest! {
    #[test]
    fn fee_accepted_iff_in_unit_interval(raw in -3_000_000_000_000_000_000i128..3_000_000_000_000_000_000i128) {
        let fee = Dec::from_raw(raw);
        let accepted = validate_err_ack_fee(&ParamValue::Dec(fee)).is_ok();
        prop_assert_eq!(accepted, raw >= 0 && raw < 1_000_000_000_000_000_000);
    }

    #[test]
    fn fee_checks_are_deterministic(raw in any::<i64>()) {
        let value = ParamValue::Dec(Dec::from_raw(raw as i128));
        let first = validate_timeout_fee(&value).map_err(|e| e.to_string());
        let second = validate_timeout_fee(&value).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }
}

#[test]
fn gated_write_is_all_or_nothing() {
    init_logger();
    let keeper = ParamKeeper::with_default_modules();
    let mut store = MemoryStore::new();
    keeper.init_defaults(&mut store).unwrap();

    let before_bytes = store.get(&ParamKeeper::params_key("eibc")).unwrap();

    // Valid gauge fees together with an out-of-range timeout fee.
    let candidate = EibcParams {
        create_gauge_fee: 7,
        add_to_gauge_fee: 3,
        timeout_fee: Dec::from_int(2),
        ..Default::default()
    };
    let err = keeper.set(&mut store, &candidate).unwrap_err();
    assert!(matches!(err, ParamsError::ValueTooLarge { param: KEY_TIMEOUT_FEE, .. }));

    assert_eq!(store.get(&ParamKeeper::params_key("eibc")).unwrap(), before_bytes);
    let current: EibcParams = keeper.get(&store).unwrap();
    assert_eq!(current, EibcParams::default());
}

#[test]
fn wrong_typed_value_is_rejected_before_write() {
    init_logger();
    let keeper = ParamKeeper::with_default_modules();
    let mut store = MemoryStore::new();
    keeper.init_defaults(&mut store).unwrap();

    let err = keeper
        .update_param(&mut store, "rollapp", "DisputePeriodInBlocks", ParamValue::Bool(true))
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid parameter type: bool");

    let rollapp: RollappParams = keeper.get(&store).unwrap();
    assert_eq!(rollapp, RollappParams::default());
}

#[test]
fn stored_encoding_is_stable() {
    let keeper = ParamKeeper::with_default_modules();
    let mut a = MemoryStore::new();
    let mut b = MemoryStore::new();
    keeper.init_defaults(&mut a).unwrap();
    keeper.init_defaults(&mut b).unwrap();

    for module in keeper.modules() {
        let key = ParamKeeper::params_key(module);
        assert_eq!(a.get(&key).unwrap(), b.get(&key).unwrap(), "module {module}");
    }
}
