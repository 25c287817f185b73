/// User-facing text sent when every attempt came back empty or failed.
pub fn placeholder_message(attempts: u32) -> String {
    format!(
        "Only gibberish as response even after {attempts} tries.. The model is probably overloaded.. Sorry :( You can try again though"
    )
}

/// Result of [`super::ConversationAdapter::get_reply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    Answered { text: String, attempts: u32 },
    /// The retry budget was exhausted without a usable answer.
    Degraded { attempts: u32 },
}

impl ReplyOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Answered { attempts, .. } | Self::Degraded { attempts } => *attempts,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Text to show the user; degraded outcomes become the placeholder.
    pub fn into_text(self) -> String {
        match self {
            Self::Answered { text, .. } => text,
            Self::Degraded { attempts } => placeholder_message(attempts),
        }
    }
}
