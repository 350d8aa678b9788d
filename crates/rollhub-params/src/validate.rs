// PARAMETER VALIDATOR SET
// Pure predicates gating every parameter write
//
// SAFETY INVARIANTS:
// 1. Type is checked before domain, domain before bounds
// 2. Negativity is checked before upper bounds
// 3. Validators never touch state and never panic
// 4. The same input yields the same error on every node

use crate::coin::{is_valid_denom, Coin};
use crate::dec::Dec;
use crate::error::ParamsError;
use crate::value::ParamValue;

pub fn expect_bool(value: &ParamValue) -> Result<bool, ParamsError> {
    value
        .as_bool()
        .ok_or(ParamsError::InvalidParameterType(value.type_name()))
}

pub fn expect_u64(value: &ParamValue) -> Result<u64, ParamsError> {
    value
        .as_u64()
        .ok_or(ParamsError::InvalidParameterType(value.type_name()))
}

pub fn expect_int(value: &ParamValue) -> Result<i128, ParamsError> {
    value
        .as_int()
        .ok_or(ParamsError::InvalidParameterType(value.type_name()))
}

pub fn expect_dec(value: &ParamValue) -> Result<Dec, ParamsError> {
    value
        .as_dec()
        .ok_or(ParamsError::InvalidParameterType(value.type_name()))
}

pub fn expect_coin(value: &ParamValue) -> Result<&Coin, ParamsError> {
    value
        .as_coin()
        .ok_or(ParamsError::InvalidParameterType(value.type_name()))
}

pub fn expect_str(value: &ParamValue) -> Result<&str, ParamsError> {
    value
        .as_str()
        .ok_or(ParamsError::InvalidParameterType(value.type_name()))
}

/// Fee rate in `[0, 1)`
pub fn validate_fee_rate(
    param: &'static str,
    pool: &'static str,
    value: &ParamValue,
) -> Result<(), ParamsError> {
    let fee = expect_dec(value)?;

    let raw = fee.raw().ok_or_else(|| ParamsError::InvalidParameterValue {
        pool,
        value: fee.to_string(),
    })?;

    if raw < 0 {
        return Err(ParamsError::NegativeValue {
            param,
            value: fee.to_string(),
        });
    }

    let ceiling = Dec::one();
    if fee.compare(&ceiling).map_or(true, |ord| ord.is_ge()) {
        return Err(ParamsError::ValueTooLarge {
            param,
            value: fee.to_string(),
            ceiling: ceiling.to_string(),
        });
    }

    Ok(())
}

/// Integer amount `>= 0`
pub fn validate_non_negative_int(param: &'static str, value: &ParamValue) -> Result<(), ParamsError> {
    let amount = expect_int(value)?;
    if amount < 0 {
        return Err(ParamsError::NegativeValue {
            param,
            value: amount.to_string(),
        });
    }
    Ok(())
}

/// Unsigned count `>= floor`
pub fn validate_min_u64(param: &'static str, floor: u64, value: &ParamValue) -> Result<(), ParamsError> {
    let v = expect_u64(value)?;
    if v < floor {
        return Err(ParamsError::ValueTooSmall {
            param,
            value: v.to_string(),
            floor: floor.to_string(),
        });
    }
    Ok(())
}

/// Coin with a well formed denom and amount `>= floor`
pub fn validate_coin_floor(
    param: &'static str,
    pool: &'static str,
    floor: i128,
    value: &ParamValue,
) -> Result<(), ParamsError> {
    let coin = expect_coin(value)?;

    if coin.is_nil() || !is_valid_denom(&coin.denom) {
        return Err(ParamsError::InvalidParameterValue {
            pool,
            value: coin.to_string(),
        });
    }

    if coin.is_negative() {
        return Err(ParamsError::NegativeValue {
            param,
            value: coin.to_string(),
        });
    }

    if coin.amount < floor {
        return Err(ParamsError::ValueTooSmall {
            param,
            value: coin.to_string(),
            floor: floor.to_string(),
        });
    }

    Ok(())
}

/// Non-blank identifier without surrounding whitespace
pub fn validate_identifier(pool: &'static str, value: &ParamValue) -> Result<(), ParamsError> {
    let id = expect_str(value)?;
    if id.trim().is_empty() || id.trim() != id {
        return Err(ParamsError::InvalidParameterValue {
            pool,
            value: format!("{id:?}"),
        });
    }
    Ok(())
}
