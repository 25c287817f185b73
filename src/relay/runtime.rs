use crate::config::Config;
use crate::core::access::{AccessLists, Requester};
use crate::core::conversation::ConversationAdapter;
use crate::core::sessions::{Identity, SessionDirectory, SessionHandle, Temperature};
use crate::llm::{BackendCredentials, ChatBackend, HuggingChatBackend};
use crate::speech::{DeepgramTranscriber, SpeechToText};
use crate::transport::channels::{Channel, InboundMessage};
use crate::translate::{DeeplTranslator, Translator};
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

/// Optional collaborators and tunables for [`RelayRuntime`].
pub struct RelayOptions {
    pub translator: Option<Arc<dyn Translator>>,
    pub speech: Option<Arc<dyn SpeechToText>>,
    pub max_response_tries: u32,
    pub default_temperature: Temperature,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            translator: None,
            speech: None,
            max_response_tries: crate::config::schema::DEFAULT_MAX_RESPONSE_TRIES,
            default_temperature: Temperature::DEFAULT,
        }
    }
}

/// Everything a handler needs. Built once at startup and shared by `Arc`.
pub struct RelayRuntime {
    pub(super) sessions: SessionDirectory,
    pub(super) adapter: ConversationAdapter,
    pub(super) access: AccessLists,
    pub(super) translator: Option<Arc<dyn Translator>>,
    pub(super) speech: Option<Arc<dyn SpeechToText>>,
    pub(super) channel: Arc<dyn Channel>,
}

impl RelayRuntime {
    pub fn new(
        data_dir: &Path,
        backend: Arc<dyn ChatBackend>,
        channel: Arc<dyn Channel>,
        options: RelayOptions,
    ) -> Self {
        Self {
            sessions: SessionDirectory::new(
                data_dir,
                Arc::clone(&backend),
                options.translator.clone(),
                options.default_temperature,
            ),
            adapter: ConversationAdapter::new(backend, options.max_response_tries),
            access: AccessLists::new(data_dir),
            translator: options.translator,
            speech: options.speech,
            channel,
        }
    }

    /// Wire up HuggingChat, and DeepL and Deepgram when their tokens are set.
    pub fn from_config(config: &Config, channel: Arc<dyn Channel>) -> anyhow::Result<Self> {
        let credentials = BackendCredentials::load(&BackendCredentials::path_in(&config.workspace_dir))
            .context("failed loading backend credentials")?;
        let backend: Arc<dyn ChatBackend> =
            Arc::new(HuggingChatBackend::new(&config.backend, credentials));
        let translator = config
            .deepl_token()
            .map(|key| Arc::new(DeeplTranslator::new(key)) as Arc<dyn Translator>);
        let speech = config
            .deepgram_token()
            .map(|key| Arc::new(DeepgramTranscriber::new(key)) as Arc<dyn SpeechToText>);
        let options = RelayOptions {
            translator,
            speech,
            max_response_tries: config.backend.max_response_tries,
            default_temperature: Temperature::new(config.backend.default_temperature)?,
        };
        Ok(Self::new(&config.workspace_dir, backend, channel, options))
    }

    pub fn backend(&self) -> &Arc<dyn ChatBackend> {
        self.adapter.backend()
    }

    pub fn sessions(&self) -> &SessionDirectory {
        &self.sessions
    }

    pub fn access(&self) -> &AccessLists {
        &self.access
    }

    pub(super) async fn session_for(&self, msg: &InboundMessage) -> anyhow::Result<SessionHandle> {
        self.sessions
            .get_or_create(&identity_of(msg), &msg.display_name)
            .await
    }

    pub(super) async fn reply(&self, msg: &InboundMessage, text: &str) -> anyhow::Result<()> {
        self.channel.send_chunked(text, &msg.chat_id, None).await?;
        Ok(())
    }

    pub(super) async fn reply_to(&self, msg: &InboundMessage, text: &str) -> anyhow::Result<()> {
        self.channel
            .send_chunked(text, &msg.chat_id, Some(&msg.message_id))
            .await?;
        Ok(())
    }

    /// Typing indicators are cosmetic; failures are only logged.
    pub(super) async fn typing(&self, msg: &InboundMessage) {
        if let Err(error) = self.channel.send_typing(&msg.chat_id).await {
            tracing::debug!(chat_id = %msg.chat_id, "typing indicator failed: {error:#}");
        }
    }

    /// Append to the sender's conversation log named `key`.
    pub(super) fn log(
        &self,
        msg: &InboundMessage,
        key: &str,
        title: &str,
        message: &str,
    ) -> anyhow::Result<()> {
        self.sessions
            .logs()
            .append(&identity_of(msg), &msg.display_name, key, title, message)
    }
}

pub(super) fn identity_of(msg: &InboundMessage) -> Identity {
    Identity::new(msg.user_id.clone())
}

pub(super) fn requester_of(msg: &InboundMessage) -> Requester<'_> {
    Requester {
        user_id: &msg.user_id,
        username: msg.username.as_deref(),
    }
}
