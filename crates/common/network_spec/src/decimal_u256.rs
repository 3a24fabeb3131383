use std::fmt;

use alloy_primitives::U256;
use serde::{
    Deserializer, Serializer,
    de::{Error, Visitor},
};

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = U256;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal 256-bit integer as a number or a string")
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<U256, E> {
        Ok(U256::from(value))
    }

    fn visit_u128<E: Error>(self, value: u128) -> Result<U256, E> {
        Ok(U256::from(value))
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<U256, E> {
        u64::try_from(value)
            .map(U256::from)
            .map_err(|_| E::custom(format!("expected a non-negative integer, got {value}")))
    }

    fn visit_str<E: Error>(self, text: &str) -> Result<U256, E> {
        U256::from_str_radix(text.trim(), 10).map_err(|err| {
            E::custom(format!(
                "expected a decimal 256-bit integer, got {text}: {err}"
            ))
        })
    }
}

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalVisitor)
}
