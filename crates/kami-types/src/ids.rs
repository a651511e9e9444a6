//! Identifier types for creatures, skills, and harvest nodes.
//!
//! Creatures are addressed on chain either by their small sequential index
//! or by a 256-bit entity id. [`CreatureRef`] makes that choice once, at the
//! request boundary, so nothing downstream has to re-derive it.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

/// Numeric values strictly below this are creature indices; anything at or
/// above it is an entity id.
pub const INDEX_THRESHOLD: u64 = 10_000_000_000;

/// Errors produced when parsing identifiers at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// The input string was empty.
    #[error("identifier is empty")]
    Empty,

    /// The input contained a character that is not a digit of the radix.
    #[error("invalid character {found:?} in identifier {input:?}")]
    InvalidDigit {
        /// The full input.
        input: String,
        /// The offending character.
        found: char,
    },

    /// The value does not fit in 256 bits.
    #[error("identifier {0:?} exceeds 256 bits")]
    Overflow(String),
}

/// Generates a newtype wrapper around an unsigned integer with standard derives.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub $inner);

        impl $name {
            /// Return the raw numeric value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

define_index! {
    /// Sequential creature index as minted on chain.
    KamiIndex(u64)
}

define_index! {
    /// Skill index in the `TXY` layout (tree, tier, slot), e.g. `213`.
    SkillIndex(u32)
}

define_index! {
    /// Index of a harvestable node (room resource location).
    NodeIndex(u32)
}

// ---------------------------------------------------------------------------
// KamiEntityId
// ---------------------------------------------------------------------------

/// A 256-bit on-chain entity id, stored big-endian.
///
/// Serialized as a decimal string since JSON numbers cannot carry the full
/// width. [`FromStr`] accepts decimal or `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KamiEntityId([u8; 32]);

impl KamiEntityId {
    /// Build an id from its big-endian byte representation.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build an id from a 64-bit value.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0_u8; 32];
        for (slot, byte) in bytes.iter_mut().rev().zip(value.to_le_bytes()) {
            *slot = byte;
        }
        Self(bytes)
    }

    /// Whether the id is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Parse a string of digits in the given radix (10 or 16).
    fn parse_radix(input: &str, digits: &str, radix: u32) -> Result<Self, IdParseError> {
        if digits.is_empty() {
            return Err(IdParseError::Empty);
        }
        let mut bytes = [0_u8; 32];
        for ch in digits.chars() {
            let digit = ch.to_digit(radix).ok_or_else(|| IdParseError::InvalidDigit {
                input: input.to_owned(),
                found: ch,
            })?;
            mul_add(&mut bytes, radix, digit)
                .ok_or_else(|| IdParseError::Overflow(input.to_owned()))?;
        }
        Ok(Self(bytes))
    }

    /// Lower-case hex rendering with a `0x` prefix and no leading zeros.
    pub fn to_hex(&self) -> String {
        let full: String = self.0.iter().map(|b| format!("{b:02x}")).collect();
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            String::from("0x0")
        } else {
            format!("0x{trimmed}")
        }
    }
}

/// Multiply the big-endian number in `bytes` by `radix` and add `digit`.
///
/// Returns `None` when the result no longer fits in 256 bits.
fn mul_add(bytes: &mut [u8; 32], radix: u32, digit: u32) -> Option<()> {
    let mut carry = digit;
    for byte in bytes.iter_mut().rev() {
        let value = u32::from(*byte).checked_mul(radix)?.checked_add(carry)?;
        let [low, high0, high1, high2] = value.to_le_bytes();
        *byte = low;
        carry = u32::from_le_bytes([high0, high1, high2, 0]);
    }
    (carry == 0).then_some(())
}

/// Divide the big-endian number in `bytes` by ten in place, returning the
/// remainder.
fn div_rem_10(bytes: &mut [u8; 32]) -> Option<u8> {
    let mut remainder: u16 = 0;
    for byte in bytes.iter_mut() {
        let current = remainder.checked_mul(256)?.checked_add(u16::from(*byte))?;
        let [quotient, _] = current.checked_div(10)?.to_le_bytes();
        *byte = quotient;
        remainder = current.checked_rem(10)?;
    }
    let [rem, _] = remainder.to_le_bytes();
    Some(rem)
}

impl fmt::Display for KamiEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut work = self.0;
        let mut digits = Vec::with_capacity(78);
        while work.iter().any(|b| *b != 0) {
            let rem = div_rem_10(&mut work).ok_or(fmt::Error)?;
            let ch = char::from_digit(u32::from(rem), 10).ok_or(fmt::Error)?;
            digits.push(ch);
        }
        let rendered: String = digits.iter().rev().collect();
        f.write_str(&rendered)
    }
}

impl FromStr for KamiEntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => Self::parse_radix(s, hex, 16),
            None => Self::parse_radix(s, trimmed, 10),
        }
    }
}

impl Serialize for KamiEntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KamiEntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CreatureRef
// ---------------------------------------------------------------------------

/// How a request addresses a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CreatureRef {
    /// Addressed by sequential index.
    ByIndex(KamiIndex),
    /// Addressed by 256-bit entity id.
    ByEntityId(KamiEntityId),
}

impl CreatureRef {
    /// Decide index versus entity id for a numeric value.
    pub fn from_number(value: u64) -> Self {
        if value < INDEX_THRESHOLD {
            Self::ByIndex(KamiIndex(value))
        } else {
            Self::ByEntityId(KamiEntityId::from_u64(value))
        }
    }

    /// Parse a path or query parameter.
    ///
    /// Decimal strings below [`INDEX_THRESHOLD`] are indices, larger
    /// decimals are entity ids, and `0x`-prefixed hex is always an entity id.
    ///
    /// # Errors
    ///
    /// Returns [`IdParseError`] for empty, non-numeric or oversized input.
    pub fn parse(input: &str) -> Result<Self, IdParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(IdParseError::Empty);
        }
        if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            return trimmed.parse().map(Self::ByEntityId);
        }
        if let Some(found) = trimmed.chars().find(|c| !c.is_ascii_digit()) {
            return Err(IdParseError::InvalidDigit {
                input: input.to_owned(),
                found,
            });
        }
        match trimmed.parse::<u64>() {
            Ok(value) => Ok(Self::from_number(value)),
            Err(_) => trimmed.parse().map(Self::ByEntityId),
        }
    }
}

impl fmt::Display for CreatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByIndex(index) => write!(f, "kami #{index}"),
            Self::ByEntityId(id) => write!(f, "kami {}", id.to_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers_are_indices() {
        assert_eq!(CreatureRef::from_number(0), CreatureRef::ByIndex(KamiIndex(0)));
        assert_eq!(
            CreatureRef::from_number(9_999_999_999),
            CreatureRef::ByIndex(KamiIndex(9_999_999_999))
        );
    }

    #[test]
    fn threshold_and_above_are_entity_ids() {
        assert_eq!(
            CreatureRef::from_number(INDEX_THRESHOLD),
            CreatureRef::ByEntityId(KamiEntityId::from_u64(INDEX_THRESHOLD))
        );
    }

    #[test]
    fn parse_decimal_index() {
        assert_eq!(CreatureRef::parse(" 42 "), Ok(CreatureRef::ByIndex(KamiIndex(42))));
    }

    #[test]
    fn parse_large_decimal_entity_id() {
        let raw = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let parsed = CreatureRef::parse(raw);
        assert_eq!(
            parsed,
            Ok(CreatureRef::ByEntityId(KamiEntityId::from_be_bytes([0xff; 32])))
        );
        assert_eq!(KamiEntityId::from_be_bytes([0xff; 32]).to_string(), raw);
    }

    #[test]
    fn parse_rejects_overflow() {
        let raw = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(CreatureRef::parse(raw), Err(IdParseError::Overflow(_))));
    }

    #[test]
    fn parse_hex_is_always_entity_id() {
        assert_eq!(
            CreatureRef::parse("0x2a"),
            Ok(CreatureRef::ByEntityId(KamiEntityId::from_u64(42)))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(CreatureRef::parse(""), Err(IdParseError::Empty));
        assert!(matches!(
            CreatureRef::parse("12a"),
            Err(IdParseError::InvalidDigit { found: 'a', .. })
        ));
        assert!(matches!(
            CreatureRef::parse("-5"),
            Err(IdParseError::InvalidDigit { found: '-', .. })
        ));
    }

    #[test]
    fn entity_id_hex_rendering() {
        let id = KamiEntityId::from_u64(255);
        assert_eq!(id.to_hex(), "0xff");
        assert_eq!(KamiEntityId::default().to_hex(), "0x0");
        assert_eq!(KamiEntityId::default().to_string(), "0");
    }

    #[test]
    fn entity_id_serializes_as_decimal_string() {
        let id = KamiEntityId::from_u64(12_345_678_901);
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"12345678901\""));
        let back: Result<KamiEntityId, _> = serde_json::from_str("\"12345678901\"");
        assert_eq!(back.ok(), Some(id));
    }
}
