//! Reaction entity - one visitor's emoji on one archive photo

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::value_objects::{ReactionEmoji, UserId};

/// How many emoji a photo overlay shows by default
pub const DEFAULT_TOP_EMOJIS: usize = 3;

/// Reaction record, unique per (photo_url, user_id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRecord {
    pub photo_url: String,
    pub user_id: UserId,
    pub emoji: ReactionEmoji,
    pub created_at: DateTime<Utc>,
}

impl ReactionRecord {
    /// Create a new ReactionRecord
    pub fn new(photo_url: impl Into<String>, user_id: UserId, emoji: ReactionEmoji) -> Self {
        Self {
            photo_url: photo_url.into(),
            user_id,
            emoji,
            created_at: Utc::now(),
        }
    }
}

/// What a toggle does to the (photo, user) slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No record yet: create one
    Insert(ReactionEmoji),
    /// Record holds another emoji: overwrite it
    Replace(ReactionEmoji),
    /// Record holds the same emoji: delete it
    Remove,
}

impl ToggleOutcome {
    /// Decide the toggle from the existing record and the chosen emoji
    pub fn decide(existing: Option<ReactionEmoji>, chosen: ReactionEmoji) -> Self {
        match existing {
            None => Self::Insert(chosen),
            Some(current) if current == chosen => Self::Remove,
            Some(_) => Self::Replace(chosen),
        }
    }

    /// The user's reaction after the toggle is applied
    pub fn resulting(self) -> Option<ReactionEmoji> {
        match self {
            Self::Insert(emoji) | Self::Replace(emoji) => Some(emoji),
            Self::Remove => None,
        }
    }
}

/// Per-emoji counts for one photo, always covering all six emoji
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactionCounts {
    counts: [u64; ReactionEmoji::ALL.len()],
}

impl ReactionCounts {
    /// Tally raw stored glyphs; anything outside the reaction set is dropped
    pub fn tally<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = Self::default();
        for glyph in glyphs {
            if let Some(emoji) = ReactionEmoji::from_glyph(glyph.as_ref()) {
                counts.counts[emoji.index()] += 1;
            }
        }
        counts
    }

    /// Count for one emoji
    #[inline]
    pub fn get(&self, emoji: ReactionEmoji) -> u64 {
        self.counts[emoji.index()]
    }

    /// Set the count for one emoji
    pub fn set(&mut self, emoji: ReactionEmoji, count: u64) {
        self.counts[emoji.index()] = count;
    }

    /// (emoji, count) pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionEmoji, u64)> + '_ {
        ReactionEmoji::ALL.iter().map(|e| (*e, self.counts[e.index()]))
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Most-used emoji, see [`top_emojis`]
    pub fn top(&self, n: usize) -> Vec<ReactionEmoji> {
        top_emojis(self, n)
    }
}

impl FromIterator<(ReactionEmoji, u64)> for ReactionCounts {
    fn from_iter<T: IntoIterator<Item = (ReactionEmoji, u64)>>(iter: T) -> Self {
        let mut counts = Self::default();
        for (emoji, count) in iter {
            counts.set(emoji, count);
        }
        counts
    }
}

// Serialized as a glyph -> count map in enumeration order
impl Serialize for ReactionCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (emoji, count) in self.iter() {
            map.serialize_entry(emoji.as_str(), &count)?;
        }
        map.end()
    }
}

/// Emoji sorted by count descending, zero counts dropped, truncated to `n`.
///
/// Ties keep enumeration order (the sort is stable).
pub fn top_emojis(counts: &ReactionCounts, n: usize) -> Vec<ReactionEmoji> {
    let mut ranked: Vec<(ReactionEmoji, u64)> = counts.iter().filter(|(_, c)| *c > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(emoji, _)| emoji).collect()
}
