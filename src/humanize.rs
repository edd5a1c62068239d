//! Human-readable byte sizes for configuration values and log fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty size value")]
    Empty,

    #[error("invalid number in size '{0}'")]
    InvalidNumber(String),

    #[error("unknown size unit '{0}'")]
    InvalidUnit(String),

    #[error("size '{0}' overflows u64")]
    Overflow(String),
}

const KIB: u64 = 1024;

/// Binary units, largest first
const UNITS: [(&str, u64); 4] = [
    ("GB", KIB * KIB * KIB),
    ("MB", KIB * KIB),
    ("KB", KIB),
    ("B", 1),
];

/// Byte count that deserializes from either an integer or a string such as `"512MB"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct ByteSize(pub u64);

impl ByteSize {
    pub const fn mib(n: u64) -> Self {
        ByteSize(n * KIB * KIB)
    }

    pub const fn gib(n: u64) -> Self {
        ByteSize(n * KIB * KIB * KIB)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ByteSize {
    /// One decimal place at most, trailing `.0` dropped (`1536` -> `1.5KB`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, divisor) = UNITS
            .iter()
            .copied()
            .find(|(_, divisor)| self.0 >= *divisor)
            .unwrap_or(("B", 1));

        let whole = self.0 / divisor;
        let tenth = (self.0 % divisor) * 10 / divisor;
        if tenth == 0 {
            write!(f, "{whole}{unit}")
        } else {
            write!(f, "{whole}.{tenth}{unit}")
        }
    }
}

impl From<ByteSize> for String {
    fn from(size: ByteSize) -> Self {
        // Exact units only, so the value survives a round trip through TOML
        let (unit, divisor) = UNITS
            .iter()
            .copied()
            .find(|(_, divisor)| size.0 >= *divisor && size.0 % divisor == 0)
            .unwrap_or(("B", 1));
        format!("{}{}", size.0 / divisor, unit)
    }
}

impl FromStr for ByteSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);
        let value: u64 = digits
            .parse()
            .map_err(|_| ParseError::InvalidNumber(s.to_string()))?;

        let multiplier = match unit.trim().to_ascii_uppercase().as_str() {
            "" | "B" => 1,
            "K" | "KB" | "KIB" => KIB,
            "M" | "MB" | "MIB" => KIB * KIB,
            "G" | "GB" | "GIB" => KIB * KIB * KIB,
            other => return Err(ParseError::InvalidUnit(other.to_string())),
        };

        value
            .checked_mul(multiplier)
            .map(ByteSize)
            .ok_or_else(|| ParseError::Overflow(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(ByteSize(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("2048".parse::<ByteSize>().unwrap(), ByteSize(2048));
        assert_eq!("4kb".parse::<ByteSize>().unwrap(), ByteSize(4 * 1024));
        assert_eq!("512MB".parse::<ByteSize>().unwrap(), ByteSize::mib(512));
        assert_eq!(" 2 GiB ".parse::<ByteSize>().unwrap(), ByteSize::gib(2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<ByteSize>(), Err(ParseError::Empty));
        assert!(matches!(
            "MB".parse::<ByteSize>(),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "10PB".parse::<ByteSize>(),
            Err(ParseError::InvalidUnit(_))
        ));
        assert!(matches!(
            "99999999999999GB".parse::<ByteSize>(),
            Err(ParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_display_rounds_to_one_decimal() {
        assert_eq!(ByteSize(512).to_string(), "512B");
        assert_eq!(ByteSize(1536).to_string(), "1.5KB");
        assert_eq!(ByteSize::mib(3).to_string(), "3MB");
        assert_eq!(ByteSize(0).to_string(), "0B");
    }

    #[test]
    fn test_serializes_to_exact_unit() {
        assert_eq!(String::from(ByteSize::gib(1)), "1GB");
        assert_eq!(String::from(ByteSize(1536)), "1536B");
    }

    #[test]
    fn test_deserialize_int_or_string() {
        #[derive(Deserialize)]
        struct Holder {
            size: ByteSize,
        }

        let a: Holder = serde_json::from_str(r#"{"size": 10}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"size": "1MB"}"#).unwrap();
        assert_eq!(a.size, ByteSize(10));
        assert_eq!(b.size, ByteSize::mib(1));
    }
}
