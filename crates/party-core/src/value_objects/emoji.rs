//! Reaction emoji - the fixed set of emoji a visitor can put on a photo

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One of the six reaction emoji
///
/// Declaration order is the enumeration order used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReactionEmoji {
    Fire,
    Laugh,
    Crown,
    Muscle,
    Skull,
    ThumbsDown,
}

impl ReactionEmoji {
    /// Every reaction emoji in enumeration order
    pub const ALL: [Self; 6] = [
        Self::Fire,
        Self::Laugh,
        Self::Crown,
        Self::Muscle,
        Self::Skull,
        Self::ThumbsDown,
    ];

    /// The emoji glyph as stored in the ledger
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "🔥",
            Self::Laugh => "😂",
            Self::Crown => "👑",
            Self::Muscle => "💪",
            Self::Skull => "💀",
            Self::ThumbsDown => "👎",
        }
    }

    /// Position in enumeration order
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a glyph, returning `None` for anything outside the set
    #[must_use]
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == glyph)
    }
}

/// Error for a glyph outside the reaction set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reaction emoji: {0}")]
pub struct UnknownEmoji(pub String);

impl fmt::Display for ReactionEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionEmoji {
    type Err = UnknownEmoji;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_glyph(s).ok_or_else(|| UnknownEmoji(s.to_string()))
    }
}

impl Serialize for ReactionEmoji {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReactionEmoji {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
