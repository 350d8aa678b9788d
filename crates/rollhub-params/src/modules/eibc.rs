//! eIBC demand-order parameters.
//!
//! Fees taken from fulfilled demand orders are rates in `[0, 1)`; gauge fees
//! are plain integer amounts charged by the incentives hooks.

use crate::dec::Dec;
use crate::error::ParamsError;
use crate::set::{ModuleParams, ParamSet, ParamSetPair};
use crate::validate::{
    expect_dec, expect_int, expect_str, validate_fee_rate, validate_identifier,
    validate_non_negative_int,
};
use crate::value::ParamValue;
use serde::{Deserialize, Serialize};

pub const MODULE: &str = "eibc";

/// Structural pool named in nil-value errors
pub const GLOBAL_POOL: &str = "global pool";

pub const KEY_EPOCH_IDENTIFIER: &str = "EpochIdentifier";
pub const KEY_TIMEOUT_FEE: &str = "TimeoutFee";
pub const KEY_ERR_ACK_FEE: &str = "ErrAckFee";
pub const KEY_CREATE_GAUGE_FEE: &str = "CreateGaugeFee";
pub const KEY_ADD_TO_GAUGE_FEE: &str = "AddToGaugeFee";

pub const DEFAULT_EPOCH_IDENTIFIER: &str = "hour";
pub const DEFAULT_CREATE_GAUGE_FEE: i128 = 10_000_000_000_000_000_000;
pub const DEFAULT_ADD_TO_GAUGE_FEE: i128 = 0;

/// 0.0015
pub fn default_timeout_fee() -> Dec {
    Dec::with_prec(15, 4)
}

/// 0.1
pub fn default_err_ack_fee() -> Dec {
    Dec::with_prec(1, 1)
}

pub fn validate_epoch_identifier(value: &ParamValue) -> Result<(), ParamsError> {
    validate_identifier(GLOBAL_POOL, value)
}

pub fn validate_timeout_fee(value: &ParamValue) -> Result<(), ParamsError> {
    validate_fee_rate(KEY_TIMEOUT_FEE, GLOBAL_POOL, value)
}

pub fn validate_err_ack_fee(value: &ParamValue) -> Result<(), ParamsError> {
    validate_fee_rate(KEY_ERR_ACK_FEE, GLOBAL_POOL, value)
}

pub fn validate_create_gauge_fee(value: &ParamValue) -> Result<(), ParamsError> {
    validate_non_negative_int(KEY_CREATE_GAUGE_FEE, value)
}

pub fn validate_add_to_gauge_fee(value: &ParamValue) -> Result<(), ParamsError> {
    validate_non_negative_int(KEY_ADD_TO_GAUGE_FEE, value)
}

const PAIRS: &[ParamSetPair] = &[
    ParamSetPair::new(KEY_EPOCH_IDENTIFIER, validate_epoch_identifier),
    ParamSetPair::new(KEY_TIMEOUT_FEE, validate_timeout_fee),
    ParamSetPair::new(KEY_ERR_ACK_FEE, validate_err_ack_fee),
    ParamSetPair::new(KEY_CREATE_GAUGE_FEE, validate_create_gauge_fee),
    ParamSetPair::new(KEY_ADD_TO_GAUGE_FEE, validate_add_to_gauge_fee),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EibcParams {
    pub epoch_identifier: String,
    pub timeout_fee: Dec,
    pub err_ack_fee: Dec,
    pub create_gauge_fee: i128,
    pub add_to_gauge_fee: i128,
}

impl Default for EibcParams {
    fn default() -> Self {
        EibcParams {
            epoch_identifier: DEFAULT_EPOCH_IDENTIFIER.to_string(),
            timeout_fee: default_timeout_fee(),
            err_ack_fee: default_err_ack_fee(),
            create_gauge_fee: DEFAULT_CREATE_GAUGE_FEE,
            add_to_gauge_fee: DEFAULT_ADD_TO_GAUGE_FEE,
        }
    }
}

impl ModuleParams for EibcParams {
    const MODULE: &'static str = MODULE;

    fn param_set_pairs() -> &'static [ParamSetPair] {
        PAIRS
    }

    fn to_param_set(&self) -> ParamSet {
        ParamSet::new()
            .with(KEY_EPOCH_IDENTIFIER, self.epoch_identifier.as_str())
            .with(KEY_TIMEOUT_FEE, self.timeout_fee)
            .with(KEY_ERR_ACK_FEE, self.err_ack_fee)
            .with(KEY_CREATE_GAUGE_FEE, self.create_gauge_fee)
            .with(KEY_ADD_TO_GAUGE_FEE, self.add_to_gauge_fee)
    }

    fn from_param_set(set: &ParamSet) -> Result<Self, ParamsError> {
        Ok(EibcParams {
            epoch_identifier: expect_str(set.require(MODULE, KEY_EPOCH_IDENTIFIER)?)?.to_string(),
            timeout_fee: expect_dec(set.require(MODULE, KEY_TIMEOUT_FEE)?)?,
            err_ack_fee: expect_dec(set.require(MODULE, KEY_ERR_ACK_FEE)?)?,
            create_gauge_fee: expect_int(set.require(MODULE, KEY_CREATE_GAUGE_FEE)?)?,
            add_to_gauge_fee: expect_int(set.require(MODULE, KEY_ADD_TO_GAUGE_FEE)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_err_ack_fee() {
        struct Case {
            name: &'static str,
            input: ParamValue,
            expected_err: Option<&'static str>,
        }

        let cases = vec![
            Case {
                name: "valid fee",
                input: ParamValue::Dec(Dec::with_prec(5, 2)),
                expected_err: None,
            },
            Case {
                name: "wrong type",
                input: ParamValue::UInt(123),
                expected_err: Some("invalid parameter type: u64"),
            },
            Case {
                name: "nil value",
                input: ParamValue::Dec(Dec::default()),
                expected_err: Some("invalid global pool params: <nil>"),
            },
            Case {
                name: "negative fee",
                input: ParamValue::Dec(Dec::from_int(-1)),
                expected_err: Some("ErrAckFee must not be negative: -1.000000000000000000"),
            },
            Case {
                name: "too much fee",
                input: ParamValue::Dec(Dec::one()),
                expected_err: Some(
                    "ErrAckFee too large: 1.000000000000000000 must be less than 1.000000000000000000",
                ),
            },
        ];

        for case in cases {
            let result = validate_err_ack_fee(&case.input);
            match case.expected_err {
                Some(msg) => assert_eq!(
                    result.expect_err(case.name).to_string(),
                    msg,
                    "case {}",
                    case.name
                ),
                None => assert!(result.is_ok(), "case {}", case.name),
            }
        }
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            validate_err_ack_fee(&ParamValue::UInt(123)),
            Err(ParamsError::InvalidParameterType("u64"))
        ));
        assert!(matches!(
            validate_err_ack_fee(&ParamValue::Dec(Dec::nil())),
            Err(ParamsError::InvalidParameterValue { pool: GLOBAL_POOL, .. })
        ));
        assert!(matches!(
            validate_err_ack_fee(&ParamValue::Dec(Dec::from_int(-1))),
            Err(ParamsError::NegativeValue { param: KEY_ERR_ACK_FEE, .. })
        ));
        assert!(matches!(
            validate_err_ack_fee(&ParamValue::Dec(Dec::one())),
            Err(ParamsError::ValueTooLarge { param: KEY_ERR_ACK_FEE, .. })
        ));
    }

    #[test]
    fn test_gauge_fees() {
        assert!(validate_create_gauge_fee(&ParamValue::Int(DEFAULT_CREATE_GAUGE_FEE)).is_ok());
        assert!(validate_add_to_gauge_fee(&ParamValue::Int(0)).is_ok());
        assert!(matches!(
            validate_add_to_gauge_fee(&ParamValue::Int(-1)),
            Err(ParamsError::NegativeValue { param: KEY_ADD_TO_GAUGE_FEE, .. })
        ));
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(EibcParams::default().validate().is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        let params = EibcParams {
            timeout_fee: Dec::one(),
            err_ack_fee: Dec::from_int(-1),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::ValueTooLarge { param: KEY_TIMEOUT_FEE, .. })
        ));
    }
}
