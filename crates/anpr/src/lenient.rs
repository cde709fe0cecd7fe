//! Deserialization helpers for typed XML leaves.
//!
//! Camera firmware emits numeric and boolean leaves as free text, sometimes
//! padded, sometimes empty. These helpers read the text, trim it, and treat an
//! empty leaf as the zero value. Anything else that does not parse is a hard
//! error so a corrupt value never turns silently into zero.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Deserialize an integer leaf. Empty text yields `T::default()`.
pub fn int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    parse_int(&raw).map_err(D::Error::custom)
}

/// Deserialize a boolean leaf. Empty text yields `false`.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_bool(&raw).map_err(D::Error::custom)
}

/// Integer leaf read through [`int`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Int<T>(pub T);

impl<'de, T> Deserialize<'de> for Int<T>
where
    T: FromStr + Default,
    T::Err: Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        int(deserializer).map(Int)
    }
}

/// Boolean leaf read through [`boolean`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        boolean(deserializer).map(Flag)
    }
}

fn parse_int<T>(raw: &str) -> Result<T, String>
where
    T: FromStr + Default,
    T::Err: Display,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse::<T>()
        .map_err(|err| format!("invalid integer {trimmed:?}: {err}"))
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim() {
        "" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(format!("invalid boolean {other:?}")),
    }
}
