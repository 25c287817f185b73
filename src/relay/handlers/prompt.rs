use crate::relay::runtime::RelayRuntime;
use crate::transport::channels::InboundMessage;
use crate::translate::Language;

impl RelayRuntime {
    /// Free text: relay through the sender's own conversation, with the
    /// optional translation pass on both sides.
    pub(in crate::relay) async fn prompt(
        &self,
        msg: &InboundMessage,
        text: &str,
    ) -> anyhow::Result<()> {
        self.typing(msg).await;
        let session = self.session_for(msg).await?;
        let record = session.lock().await;
        let key = record.conversation_handle.to_string();
        self.log(msg, &key, "user", text)?;

        let translation = record.active_translation();
        let prompt = match translation {
            Some((_, translator)) => {
                let translated = translator.translate(text, Language::BACKEND).await?;
                self.log(
                    msg,
                    &key,
                    &format!(
                        "translated from {} to english",
                        translated.detected_source_language
                    ),
                    &translated.text,
                )?;
                translated.text
            }
            None => text.to_string(),
        };

        let outcome = self
            .adapter
            .get_reply(&record.conversation_handle, record.temperature(), &prompt)
            .await;
        let mut answer = outcome.into_text();
        self.log(msg, &key, "hugchat", &answer)?;

        if let Some((language, translator)) = translation {
            answer = translator.translate(&answer, language).await?.text;
            self.log(
                msg,
                &key,
                &format!("translated from english to {language}"),
                &answer,
            )?;
        }
        drop(record);

        self.reply_to(msg, &answer).await
    }
}
