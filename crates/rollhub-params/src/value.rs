use crate::coin::Coin;
use crate::dec::Dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candidate or stored value of a single governed parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    UInt(u64),
    Int(#[serde(with = "crate::coin::amount_string")] i128),
    Dec(Dec),
    Coin(Coin),
    Str(String),
}

impl ParamValue {
    /// Name of the carried type, used in type-mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::UInt(_) => "u64",
            ParamValue::Int(_) => "i128",
            ParamValue::Dec(_) => "Dec",
            ParamValue::Coin(_) => "Coin",
            ParamValue::Str(_) => "String",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ParamValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_dec(&self) -> Option<Dec> {
        match self {
            ParamValue::Dec(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_coin(&self) -> Option<&Coin> {
        match self {
            ParamValue::Coin(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::UInt(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Dec(v) => write!(f, "{v}"),
            ParamValue::Coin(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::UInt(v)
    }
}

impl From<i128> for ParamValue {
    fn from(v: i128) -> Self {
        ParamValue::Int(v)
    }
}

impl From<Dec> for ParamValue {
    fn from(v: Dec) -> Self {
        ParamValue::Dec(v)
    }
}

impl From<Coin> for ParamValue {
    fn from(v: Coin) -> Self {
        ParamValue::Coin(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}
