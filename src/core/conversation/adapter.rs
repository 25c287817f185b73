use super::outcome::ReplyOutcome;
use crate::core::sessions::{SessionRecord, Temperature};
use crate::llm::{ChatBackend, ConversationHandle};
use std::sync::Arc;

/// Wraps a [`ChatBackend`] with the fixed attempt budget and the
/// new/reset/temporary conversation operations used by the command handlers.
pub struct ConversationAdapter {
    backend: Arc<dyn ChatBackend>,
    max_tries: u32,
}

impl ConversationAdapter {
    pub fn new(backend: Arc<dyn ChatBackend>, max_tries: u32) -> Self {
        Self {
            backend,
            max_tries: max_tries.max(1),
        }
    }

    pub fn backend(&self) -> &Arc<dyn ChatBackend> {
        &self.backend
    }

    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Prompt `handle` until a non-empty answer arrives or the budget is spent.
    ///
    /// Backend errors and empty answers each consume one attempt. There is no
    /// delay between attempts.
    pub async fn get_reply(
        &self,
        handle: &ConversationHandle,
        temperature: Temperature,
        prompt: &str,
    ) -> ReplyOutcome {
        for attempt in 1..=self.max_tries {
            match self.backend.chat(handle, prompt, temperature.value()).await {
                Ok(text) if !text.trim().is_empty() => {
                    if attempt > 1 {
                        tracing::info!(conversation = %handle, attempt, "backend recovered after retries");
                    }
                    return ReplyOutcome::Answered { text, attempts: attempt };
                }
                Ok(_) => {
                    tracing::warn!(
                        conversation = %handle,
                        attempt,
                        max_tries = self.max_tries,
                        "backend returned an empty answer"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        conversation = %handle,
                        attempt,
                        max_tries = self.max_tries,
                        "backend call failed: {error:#}"
                    );
                }
            }
        }

        tracing::warn!(conversation = %handle, attempts = self.max_tries, "reply degraded to placeholder");
        ReplyOutcome::Degraded {
            attempts: self.max_tries,
        }
    }

    /// Switch `record` to a fresh conversation and return the retired handle.
    ///
    /// When `delete_old` is set the retired conversation is also removed on
    /// the backend; a failed removal is logged and does not undo the switch.
    pub async fn reset_conversation(
        &self,
        record: &mut SessionRecord,
        delete_old: bool,
    ) -> anyhow::Result<ConversationHandle> {
        let fresh = self.backend.new_conversation().await?;
        let old = std::mem::replace(&mut record.conversation_handle, fresh);
        tracing::info!(
            identity = %record.identity,
            old = %old,
            new = %record.conversation_handle,
            delete_old,
            "conversation reset"
        );
        if delete_old
            && let Err(error) = self.backend.delete_conversation(&old).await
        {
            tracing::warn!(conversation = %old, "failed to delete old conversation: {error:#}");
        }
        Ok(old)
    }

    /// Open a conversation that is not attached to any session.
    pub async fn open_temporary(&self) -> anyhow::Result<ConversationHandle> {
        self.backend.new_conversation().await
    }

    /// Delete a temporary conversation; failures are only logged.
    pub async fn discard(&self, handle: &ConversationHandle) {
        if let Err(error) = self.backend.delete_conversation(handle).await {
            tracing::warn!(conversation = %handle, "failed to delete temporary conversation: {error:#}");
        }
    }

    /// One exchange in a throwaway conversation, deleted afterwards whatever
    /// the outcome.
    pub async fn one_off(
        &self,
        prompt: &str,
        temperature: Temperature,
    ) -> anyhow::Result<ReplyOutcome> {
        let handle = self.open_temporary().await?;
        let outcome = self.get_reply(&handle, temperature, prompt).await;
        self.discard(&handle).await;
        Ok(outcome)
    }
}
