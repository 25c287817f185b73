use crate::core::sessions::Temperature;
use crate::relay::runtime::RelayRuntime;
use crate::speech::Transcript;
use crate::transport::channels::{InboundMessage, VoiceNote};
use crate::translate::Language;

const NO_SPEECH: &str = "This bot doesn't have speech recognition installed. Please ask the creator of the bot to add one.";

fn summary_prompt(transcript: &str) -> String {
    format!(
        "The following text is an automatic transcript of a voice message, so it might not have the best quality. \
Please write a short summary of that text. \
Answer with just the summary, no introductory words or anything. \
Transcript:\n\n{transcript}"
    )
}

/// Transcript in English, unless it needed a translator that is not configured.
enum English {
    Ready(String),
    MissingTranslator,
}

impl RelayRuntime {
    /// Download and transcribe; `None` once the user has been told why not.
    async fn transcribe(
        &self,
        msg: &InboundMessage,
        voice: &VoiceNote,
    ) -> anyhow::Result<Option<Transcript>> {
        let Some(speech) = self.speech.as_ref() else {
            self.reply(msg, NO_SPEECH).await?;
            return Ok(None);
        };
        let audio = self.channel.download_voice(voice).await?;
        let transcript = speech.transcribe(&audio, &voice.mime_type).await?;
        if transcript.text.trim().is_empty() {
            self.reply(msg, "Could not transcribe voice message").await?;
            return Ok(None);
        }
        tracing::debug!(
            user_id = %msg.user_id,
            language = %transcript.spoken_language(),
            "voice message transcribed"
        );
        Ok(Some(transcript))
    }

    async fn to_english(&self, transcript: &Transcript) -> anyhow::Result<English> {
        if transcript.is_english() {
            return Ok(English::Ready(transcript.text.clone()));
        }
        let Some(translator) = self.translator.as_ref() else {
            return Ok(English::MissingTranslator);
        };
        let translated = translator
            .translate(&transcript.text, Language::BACKEND)
            .await?;
        Ok(English::Ready(translated.text))
    }

    async fn reply_missing_translator(
        &self,
        msg: &InboundMessage,
        transcript: &Transcript,
    ) -> anyhow::Result<()> {
        let spoken = transcript.spoken_language();
        self.reply(
            msg,
            &format!(
                "The detected language is \"{spoken}\" but this bot doesn't have a translator installed. Please ask the creator of the bot to add one."
            ),
        )
        .await
    }

    /// Forwarded voice: summarize in a throwaway conversation.
    pub(in crate::relay) async fn voice_summary(
        &self,
        msg: &InboundMessage,
        voice: &VoiceNote,
    ) -> anyhow::Result<()> {
        self.typing(msg).await;
        let Some(transcript) = self.transcribe(msg, voice).await? else {
            return Ok(());
        };
        let English::Ready(english) = self.to_english(&transcript).await? else {
            return self.reply_missing_translator(msg, &transcript).await;
        };

        let summary = self
            .adapter
            .one_off(&summary_prompt(&english), Temperature::DEFAULT)
            .await?
            .into_text();

        let spoken = transcript.spoken_language();
        let (summary, translated) = match (transcript.is_english(), self.translator.as_ref()) {
            (false, Some(translator)) => match Language::from_detected(&transcript.detected_language) {
                Ok(target) => (translator.translate(&summary, target).await?.text, true),
                Err(error) => {
                    tracing::warn!(language = %spoken, "summary left in english: {error}");
                    (summary, false)
                }
            },
            _ => (summary, false),
        };

        let label = if translated { "Summary (translated):" } else { "Summary:" };
        let text = format!(
            "{label}\n{summary}\n\nTranscript (detected language: {spoken}):\n{}",
            transcript.text
        );
        self.reply(msg, &text).await
    }

    /// Direct voice: relay the transcript through the sender's session.
    pub(in crate::relay) async fn voice_prompt(
        &self,
        msg: &InboundMessage,
        voice: &VoiceNote,
    ) -> anyhow::Result<()> {
        self.typing(msg).await;
        let Some(transcript) = self.transcribe(msg, voice).await? else {
            return Ok(());
        };

        let session = self.session_for(msg).await?;
        let record = session.lock().await;
        let key = record.conversation_handle.to_string();
        self.log(msg, &key, "voice message transcript", &transcript.text)?;

        let English::Ready(english) = self.to_english(&transcript).await? else {
            drop(record);
            return self.reply_missing_translator(msg, &transcript).await;
        };

        let answer = self
            .adapter
            .get_reply(&record.conversation_handle, record.temperature(), &english)
            .await
            .into_text();
        self.log(msg, &key, "hugchat", &answer)?;
        drop(record);

        let text = format!(
            "Transcript (detected language: {}):\n{}\n\nAnswer from bot:\n{answer}",
            transcript.spoken_language(),
            transcript.text
        );
        self.reply(msg, &text).await
    }
}
