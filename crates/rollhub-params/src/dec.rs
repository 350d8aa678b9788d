// Fixed-point decimal used for governed rates
//
// SAFETY INVARIANTS:
// 1. Values carry exactly 18 fractional digits; arithmetic is integer only
// 2. The zero value of the type is the nil sentinel, distinct from 0.0
// 3. Text and binary encodings are identical on every node

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits
pub const PRECISION: u32 = 18;

const ONE_RAW: i128 = 1_000_000_000_000_000_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecParseError {
    #[error("empty decimal string")]
    Empty,

    #[error("invalid decimal string: {0}")]
    Invalid(String),

    #[error("too many fractional digits in {0} (max 18)")]
    TooPrecise(String),

    #[error("decimal out of range: {0}")]
    OutOfRange(String),
}

/// Signed decimal with 18 digits of precision and an explicit nil state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Option<String>", try_from = "Option<String>")]
pub struct Dec {
    raw: Option<i128>,
}

impl Dec {
    /// The uninitialised decimal
    pub const fn nil() -> Self {
        Dec { raw: None }
    }

    pub const fn zero() -> Self {
        Dec { raw: Some(0) }
    }

    pub const fn one() -> Self {
        Dec { raw: Some(ONE_RAW) }
    }

    /// Whole number `value`
    pub fn from_int(value: i64) -> Self {
        Dec {
            raw: Some(value as i128 * ONE_RAW),
        }
    }

    /// `value * 10^-prec`, e.g. `with_prec(5, 2)` is 0.05
    ///
    /// Digits beyond 18 decimal places are truncated.
    pub fn with_prec(value: i64, prec: u32) -> Self {
        let raw = if prec <= PRECISION {
            value as i128 * 10i128.pow(PRECISION - prec)
        } else {
            10i128
                .checked_pow(prec - PRECISION)
                .map(|divisor| value as i128 / divisor)
                .unwrap_or(0)
        };
        Dec { raw: Some(raw) }
    }

    /// Build from the underlying 18-digit integer
    pub const fn from_raw(raw: i128) -> Self {
        Dec { raw: Some(raw) }
    }

    pub fn raw(&self) -> Option<i128> {
        self.raw
    }

    pub fn is_nil(&self) -> bool {
        self.raw.is_none()
    }

    pub fn is_negative(&self) -> bool {
        matches!(self.raw, Some(v) if v < 0)
    }

    pub fn is_zero(&self) -> bool {
        self.raw == Some(0)
    }

    /// Numeric comparison; `None` when either side is nil
    pub fn compare(&self, other: &Dec) -> Option<Ordering> {
        match (self.raw, other.raw) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self.raw {
            Some(raw) => raw,
            None => return write!(f, "<nil>"),
        };
        let sign = if raw < 0 { "-" } else { "" };
        let abs = raw.unsigned_abs();
        let one = ONE_RAW as u128;
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / one,
            abs % one,
            width = PRECISION as usize
        )
    }
}

impl FromStr for Dec {
    type Err = DecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DecParseError::Empty);
        }

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(DecParseError::Invalid(s.to_string()));
        }
        if body.contains('.') && frac_part.is_empty() {
            return Err(DecParseError::Invalid(s.to_string()));
        }
        if frac_part.len() > PRECISION as usize {
            return Err(DecParseError::TooPrecise(s.to_string()));
        }

        let out_of_range = || DecParseError::OutOfRange(s.to_string());

        let int_value: i128 = int_part.parse().map_err(|_| out_of_range())?;
        let frac_value: i128 = if frac_part.is_empty() {
            0
        } else {
            let digits: i128 = frac_part.parse().map_err(|_| out_of_range())?;
            digits * 10i128.pow(PRECISION - frac_part.len() as u32)
        };

        let magnitude = int_value
            .checked_mul(ONE_RAW)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(out_of_range)?;

        Ok(Dec {
            raw: Some(if negative { -magnitude } else { magnitude }),
        })
    }
}

impl From<Dec> for Option<String> {
    fn from(dec: Dec) -> Self {
        dec.raw.map(|_| dec.to_string())
    }
}

impl TryFrom<Option<String>> for Dec {
    type Error = DecParseError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(s) => s.parse(),
            None => Ok(Dec::nil()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Dec::with_prec(5, 2).to_string(), "0.050000000000000000");
        assert_eq!(Dec::from_int(-1).to_string(), "-1.000000000000000000");
        assert_eq!(Dec::nil().to_string(), "<nil>");
    }

    #[test]
    fn test_parse() {
        assert_eq!("0.05".parse::<Dec>().unwrap(), Dec::with_prec(5, 2));
        assert_eq!("1".parse::<Dec>().unwrap(), Dec::one());
        assert_eq!("-1.5".parse::<Dec>().unwrap(), Dec::with_prec(-15, 1));
        assert!("1.".parse::<Dec>().is_err());
        assert!(".5".parse::<Dec>().is_err());
        assert!("abc".parse::<Dec>().is_err());
        assert!(matches!(
            "0.1234567890123456789".parse::<Dec>(),
            Err(DecParseError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_default_is_nil() {
        assert!(Dec::default().is_nil());
        assert!(!Dec::zero().is_nil());
        assert_ne!(Dec::default(), Dec::zero());
    }

    #[test]
    fn test_compare() {
        assert_eq!(Dec::with_prec(5, 2).compare(&Dec::one()), Some(Ordering::Less));
        assert_eq!(Dec::one().compare(&Dec::from_int(1)), Some(Ordering::Equal));
        assert_eq!(Dec::nil().compare(&Dec::one()), None);
    }

    #[test]
    fn test_with_prec_truncates_extra_digits() {
        assert_eq!(Dec::with_prec(15, 19), Dec::from_raw(1));
    }
}
