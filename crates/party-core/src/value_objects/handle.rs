//! Handle - the unique, stable key of a nominee (their social-media handle)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Maximum accepted handle length in characters
pub const MAX_HANDLE_LEN: usize = 64;

/// Nominee handle
///
/// Always trimmed and non-empty. Two handles are equal only if their
/// trimmed text is byte-for-byte equal; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(String);

impl Handle {
    /// Parse a handle from raw text
    pub fn parse(raw: &str) -> Result<Self, HandleParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HandleParseError::Empty);
        }
        if trimmed.chars().count() > MAX_HANDLE_LEN {
            return Err(HandleParseError::TooLong { max: MAX_HANDLE_LEN });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the handle text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a Handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HandleParseError {
    #[error("handle is empty")]
    Empty,

    #[error("handle is longer than {max} characters")]
    TooLong { max: usize },
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Handle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Handle {
    type Err = HandleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::parse(s)
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Handle::parse(&value)
    }
}

impl Serialize for Handle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Handle::parse(&raw).map_err(serde::de::Error::custom)
    }
}
