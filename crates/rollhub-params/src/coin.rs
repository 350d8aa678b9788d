use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount of a single denomination
///
/// The zero value (empty denom) is the nil coin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,

    #[serde(with = "amount_string")]
    pub amount: i128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: i128) -> Self {
        Coin {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_nil(&self) -> bool {
        self.denom.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            return write!(f, "<nil>");
        }
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Denominations: a letter followed by 2 to 127 of `[a-zA-Z0-9/:._-]`
pub fn is_valid_denom(denom: &str) -> bool {
    let bytes = denom.as_bytes();
    if bytes.len() < 3 || bytes.len() > 128 {
        return false;
    }
    if !bytes[0].is_ascii_alphabetic() {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'))
}

/// Integer amounts travel as decimal strings so JSON readers never lose precision
pub(crate) mod amount_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<i128>()
            .map_err(|e| D::Error::custom(format!("invalid amount {s:?}: {e}")))
    }
}
