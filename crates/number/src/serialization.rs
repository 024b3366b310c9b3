//! Serde helpers for 256-bit amounts.
//!
//! `primitive_types::U256` serializes to hex by default, which is awkward for
//! token amounts in configuration files and quote output. These helpers
//! always serialize as a decimal string and accept either a decimal string
//! or a `0x` prefixed hex string when deserializing.

use {
    primitive_types::U256,
    serde::{Deserializer, Serializer, de},
    serde_with::{DeserializeAs, SerializeAs},
    std::fmt,
};

pub struct HexOrDecimalU256;

impl<'de> DeserializeAs<'de, U256> for HexOrDecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize(deserializer)
    }
}

impl SerializeAs<U256> for HexOrDecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize(source, serializer)
    }
}

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor {}
    impl de::Visitor<'_> for Visitor {
        type Value = U256;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(
                formatter,
                "a u256 encoded either as 0x hex prefixed or decimal encoded string"
            )
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse(s).map_err(|err| {
                de::Error::custom(format!(
                    "failed to decode {s:?} as hex or decimal u256: {err}"
                ))
            })
        }
    }

    deserializer.deserialize_str(Visitor {})
}

/// Parses a decimal or `0x` prefixed hex string into a [`U256`].
pub fn parse(s: &str) -> Result<U256, String> {
    match s.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|err| err.to_string()),
        None => U256::from_dec_str(s).map_err(|err| err.to_string()),
    }
}
