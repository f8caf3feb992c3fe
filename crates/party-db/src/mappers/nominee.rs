//! Nominee vote row -> domain mapper

use std::collections::HashMap;

use party_core::{DomainError, Handle, VoteEvent};
use tracing::warn;

use crate::models::NomineeVotesModel;

impl TryFrom<NomineeVotesModel> for VoteEvent {
    type Error = DomainError;

    fn try_from(model: NomineeVotesModel) -> Result<Self, Self::Error> {
        let handle = Handle::parse(&model.handle)?;
        let votes = u64::try_from(model.votes).map_err(|_| {
            DomainError::InvalidRecord(format!("negative vote count for {handle}"))
        })?;
        Ok(VoteEvent::new(handle, votes))
    }
}

/// Collect rows into a handle -> votes map, skipping rows that fail to map
pub fn votes_by_handle(rows: Vec<NomineeVotesModel>) -> HashMap<Handle, u64> {
    let mut votes = HashMap::with_capacity(rows.len());
    for row in rows {
        match VoteEvent::try_from(row) {
            Ok(event) => {
                votes.insert(event.handle, event.votes);
            }
            Err(e) => warn!(error = %e, "Skipping malformed vote row"),
        }
    }
    votes
}
