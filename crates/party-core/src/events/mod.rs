//! Domain events - typed change notifications delivered by the backing stores

mod reaction_event;
mod subscription;
mod vote_event;

pub use reaction_event::{ReactionChange, ReactionEvent};
pub use subscription::{EventSink, Subscription, DEFAULT_SUBSCRIPTION_BUFFER};
pub use vote_event::VoteEvent;

/// Live vote count updates
pub type VoteSubscription = Subscription<VoteEvent>;

/// Live reaction ledger changes
pub type ReactionSubscription = Subscription<ReactionEvent>;
