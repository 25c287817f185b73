use std::future::Future;
use std::pin::Pin;

/// Voice note attached to an inbound message. The audio itself is fetched
/// lazily with [`Channel::download_voice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceNote {
    pub file_id: String,
    pub mime_type: String,
    pub duration_secs: u32,
}

/// A message received from a channel.
///
/// `user_id` identifies the sender and keys their session; `chat_id` is
/// where replies go.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub channel: String,
    pub user_id: String,
    pub username: Option<String>,
    /// Human-readable label used in storage names (username or full name).
    pub display_name: String,
    pub chat_id: String,
    pub message_id: String,
    pub text: Option<String>,
    pub voice: Option<VoiceNote>,
    pub forwarded: bool,
    pub timestamp: u64,
}

/// Core channel trait: one messaging platform.
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Send `message` to `recipient`, optionally as a reply to `reply_to`.
    /// Returns the platform id of the sent message.
    fn send_reply<'a>(
        &'a self,
        message: &'a str,
        recipient: &'a str,
        reply_to: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

    fn send<'a>(
        &'a self,
        message: &'a str,
        recipient: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.send_reply(message, recipient, None).await?;
            Ok(())
        })
    }

    /// Start listening for incoming messages (long-running)
    fn listen<'a>(
        &'a self,
        tx: tokio::sync::mpsc::Sender<InboundMessage>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    fn download_voice<'a>(
        &'a self,
        _voice: &'a VoiceNote,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move { anyhow::bail!("voice download not supported by this channel") })
    }

    fn health_check<'a>(&'a self) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move { true })
    }

    fn max_message_length(&self) -> usize {
        usize::MAX
    }

    fn send_typing<'a>(
        &'a self,
        _recipient: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move { Ok(()) })
    }

    /// Send `message` split at [`Channel::max_message_length`]. Only the first
    /// chunk replies to `reply_to`. Returns the id of the last chunk sent.
    fn send_chunked<'a>(
        &'a self,
        message: &'a str,
        recipient: &'a str,
        reply_to: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<String>>> + Send + 'a>> {
        Box::pin(async move {
            let chunks = super::chunker::wrap_reply(message, self.max_message_length());
            let mut last = None;
            for (index, chunk) in chunks.iter().enumerate() {
                let target = if index == 0 { reply_to } else { None };
                last = Some(self.send_reply(chunk, recipient, target).await?);
            }
            Ok(last)
        })
    }
}
