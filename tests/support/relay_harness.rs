#![allow(dead_code, clippy::needless_lifetimes)]

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use telechat::core::access::AccessList;
use telechat::llm::{ChatBackend, ConversationHandle};
use telechat::relay::{RelayOptions, RelayRuntime};
use telechat::speech::{SpeechToText, Transcript};
use telechat::transport::channels::{Channel, InboundMessage, VoiceNote};
use telechat::translate::{Language, Translation, Translator};

pub const USER_ID: &str = "42";
pub const CHAT_ID: &str = "4242";

/// Scripted backend. Queued replies are consumed first; after that every
/// prompt is answered with `reply to <prompt>`.
#[derive(Default)]
pub struct MockBackend {
    replies: Mutex<VecDeque<anyhow::Result<String>>>,
    created: AtomicUsize,
    deleted: Mutex<Vec<ConversationHandle>>,
    chats: Mutex<Vec<(ConversationHandle, String, f64)>>,
}

impl MockBackend {
    pub fn push_reply(&self, reply: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(reply.to_string()));
    }

    pub fn push_failure(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(anyhow::anyhow!(message.to_string())));
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn deleted(&self) -> Vec<ConversationHandle> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn chats(&self) -> Vec<(ConversationHandle, String, f64)> {
        self.chats.lock().unwrap().clone()
    }

    pub fn chat_count(&self) -> usize {
        self.chats.lock().unwrap().len()
    }
}

impl ChatBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn new_conversation<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ConversationHandle>> + Send + 'a>> {
        Box::pin(async move {
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(ConversationHandle::new(format!("conv-{n}")))
        })
    }

    fn delete_conversation<'a>(
        &'a self,
        handle: &'a ConversationHandle,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.deleted.lock().unwrap().push(handle.clone());
            Ok(())
        })
    }

    fn chat<'a>(
        &'a self,
        handle: &'a ConversationHandle,
        prompt: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.chats
                .lock()
                .unwrap()
                .push((handle.clone(), prompt.to_string(), temperature));
            let scripted = self.replies.lock().unwrap().pop_front();
            scripted.unwrap_or_else(|| Ok(format!("reply to {prompt}")))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub id: String,
    pub text: String,
    pub recipient: String,
    pub reply_to: Option<String>,
}

/// Channel that records everything sent through it.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicUsize,
    typing: AtomicUsize,
}

impl RecordingChannel {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.text).collect()
    }

    pub fn last_text(&self) -> String {
        self.sent()
            .last()
            .map(|s| s.text.clone())
            .unwrap_or_default()
    }

    pub fn typing_count(&self) -> usize {
        self.typing.load(Ordering::SeqCst)
    }
}

impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "recording"
    }

    fn send_reply<'a>(
        &'a self,
        message: &'a str,
        recipient: &'a str,
        reply_to: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 100).to_string();
            self.sent.lock().unwrap().push(Sent {
                id: id.clone(),
                text: message.to_string(),
                recipient: recipient.to_string(),
                reply_to: reply_to.map(str::to_string),
            });
            Ok(id)
        })
    }

    fn listen<'a>(
        &'a self,
        _tx: tokio::sync::mpsc::Sender<InboundMessage>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move { Ok(()) })
    }

    fn download_voice<'a>(
        &'a self,
        _voice: &'a VoiceNote,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move { Ok(vec![0x4f, 0x67, 0x67, 0x53]) })
    }

    fn max_message_length(&self) -> usize {
        3500
    }

    fn send_typing<'a>(
        &'a self,
        _recipient: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.typing.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

/// Translator that tags text with the target code, e.g. `[DE] hello`.
/// Every source is reported as German.
#[derive(Default)]
pub struct TaggingTranslator {
    calls: AtomicUsize,
}

impl TaggingTranslator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Translator for TaggingTranslator {
    fn name(&self) -> &str {
        "tagging"
    }

    fn translate<'a>(
        &'a self,
        text: &'a str,
        target: Language,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Translation>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Translation {
                text: format!("[{target}] {text}"),
                detected_source_language: "DE".into(),
            })
        })
    }
}

/// Speech recognizer returning a fixed transcript.
pub struct FixedSpeech {
    pub transcript: Transcript,
}

impl FixedSpeech {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            transcript: Transcript {
                text: text.into(),
                detected_language: language.into(),
            },
        }
    }
}

impl SpeechToText for FixedSpeech {
    fn name(&self) -> &str {
        "fixed"
    }

    fn transcribe<'a>(
        &'a self,
        _audio: &'a [u8],
        _mime_type: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Transcript>> + Send + 'a>> {
        Box::pin(async move { Ok(self.transcript.clone()) })
    }
}

pub struct Harness {
    pub dir: TempDir,
    pub backend: Arc<MockBackend>,
    pub channel: Arc<RecordingChannel>,
    pub translator: Option<Arc<TaggingTranslator>>,
    pub runtime: RelayRuntime,
}

#[derive(Default)]
pub struct HarnessOptions {
    pub translator: bool,
    pub speech: Option<FixedSpeech>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_options(HarnessOptions::default())
    }

    pub fn with_translator() -> Self {
        Self::with_options(HarnessOptions {
            translator: true,
            ..HarnessOptions::default()
        })
    }

    pub fn with_options(options: HarnessOptions) -> Self {
        let dir = TempDir::new().unwrap();
        let backend = Arc::new(MockBackend::default());
        let translator = options
            .translator
            .then(|| Arc::new(TaggingTranslator::default()));
        let (runtime, channel) = build_runtime(
            &dir,
            &backend,
            translator.clone(),
            options.speech.map(Arc::new),
        );
        Self {
            dir,
            backend,
            channel,
            translator,
            runtime,
        }
    }

    /// A second runtime over the same data directory, as after a restart.
    pub fn restart(&self) -> (RelayRuntime, Arc<RecordingChannel>) {
        build_runtime(&self.dir, &self.backend, self.translator.clone(), None)
    }

    /// Hand the runtime out behind an `Arc`, as the message loop holds it.
    pub fn into_shared(self) -> (Arc<RelayRuntime>, Arc<RecordingChannel>, TempDir) {
        (Arc::new(self.runtime), self.channel, self.dir)
    }

    /// `conversation_handle` of the single persisted session file.
    pub fn persisted_handle(&self) -> String {
        let entry = std::fs::read_dir(self.dir.path().join("sessions"))
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        let raw = std::fs::read_to_string(entry.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        value["conversation_handle"].as_str().unwrap().to_string()
    }

    pub async fn allow(&self, entry: &str) {
        self.runtime
            .access()
            .add(AccessList::Allowed, entry)
            .await
            .unwrap();
    }

    pub async fn make_admin(&self, entry: &str) {
        self.runtime
            .access()
            .add(AccessList::Admins, entry)
            .await
            .unwrap();
    }

    pub async fn send(&self, text: &str) {
        self.runtime.handle_message(&text_message(text)).await.unwrap();
    }
}

fn build_runtime(
    dir: &TempDir,
    backend: &Arc<MockBackend>,
    translator: Option<Arc<TaggingTranslator>>,
    speech: Option<Arc<FixedSpeech>>,
) -> (RelayRuntime, Arc<RecordingChannel>) {
    let channel = Arc::new(RecordingChannel::default());
    let options = RelayOptions {
        translator: translator.map(|t| t as Arc<dyn Translator>),
        speech: speech.map(|s| s as Arc<dyn SpeechToText>),
        ..RelayOptions::default()
    };
    let runtime = RelayRuntime::new(
        dir.path(),
        Arc::clone(backend) as Arc<dyn ChatBackend>,
        Arc::clone(&channel) as Arc<dyn Channel>,
        options,
    );
    (runtime, channel)
}

pub fn text_message(text: &str) -> InboundMessage {
    InboundMessage {
        id: "telegram_4242_7".into(),
        channel: "telegram".into(),
        user_id: USER_ID.into(),
        username: Some("alice".into()),
        display_name: "@alice".into(),
        chat_id: CHAT_ID.into(),
        message_id: "7".into(),
        text: Some(text.into()),
        voice: None,
        forwarded: false,
        timestamp: 1_700_000_000,
    }
}

pub fn voice_message(forwarded: bool) -> InboundMessage {
    InboundMessage {
        text: None,
        voice: Some(VoiceNote {
            file_id: "voice-1".into(),
            mime_type: "audio/ogg".into(),
            duration_secs: 3,
        }),
        forwarded,
        ..text_message("")
    }
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route `tracing` events on this thread into the returned buffer until
/// the guard is dropped.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
