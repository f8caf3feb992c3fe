//! Nominee entity - a "best drip" contestant with live vote count

use std::collections::HashMap;

use serde::Serialize;

use crate::entities::NomineeContent;
use crate::value_objects::Handle;

/// Nominee with its vote count merged in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nominee {
    pub handle: Handle,
    pub photo_urls: Vec<String>,
    pub votes: u64,
}

impl Nominee {
    /// Number of photos in the nominee's carousel
    #[inline]
    pub fn photo_count(&self) -> usize {
        self.photo_urls.len()
    }
}

/// Left outer join of content nominees against a vote map, keyed on handle.
///
/// The content list drives membership and order; a nominee with no vote
/// row gets zero. Vote rows for unknown handles are ignored.
pub fn merge_votes(content: &[NomineeContent], votes: &HashMap<Handle, u64>) -> Vec<Nominee> {
    content
        .iter()
        .map(|n| Nominee {
            handle: n.handle.clone(),
            photo_urls: n.photo_urls.clone(),
            votes: votes.get(&n.handle).copied().unwrap_or(0),
        })
        .collect()
}

/// Nominees holding the highest vote count, in list order.
///
/// Empty when the list is empty or the maximum is zero. The first entry is
/// "the" leader when a single one is needed.
pub fn leaders(nominees: &[Nominee]) -> Vec<&Nominee> {
    let max = nominees.iter().map(|n| n.votes).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    nominees.iter().filter(|n| n.votes == max).collect()
}
