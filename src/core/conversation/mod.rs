//! Conversation Adapter: bounded-retry replies and conversation lifecycle.

mod adapter;
mod outcome;

pub use adapter::ConversationAdapter;
pub use outcome::{ReplyOutcome, placeholder_message};
