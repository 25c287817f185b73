use super::types::ConversationHandle;
use std::future::Future;
use std::pin::Pin;

/// Conversational backend that keeps conversation threads on its side.
///
/// Implementations are stateless with respect to the active thread: callers
/// pass the [`ConversationHandle`] they own on every call.
pub trait ChatBackend: Send + Sync {
    /// Backend identifier (e.g. "huggingchat").
    fn name(&self) -> &str;

    /// Verify credentials are present before any message is handled.
    fn ensure_authenticated<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move { Ok(()) })
    }

    /// Open a fresh conversation thread.
    fn new_conversation<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ConversationHandle>> + Send + 'a>>;

    fn delete_conversation<'a>(
        &'a self,
        handle: &'a ConversationHandle,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    /// Send one prompt into `handle` and return the completion text.
    fn chat<'a>(
        &'a self,
        handle: &'a ConversationHandle,
        prompt: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}
