use super::NO_TRANSLATOR;
use crate::core::sessions::Temperature;
use crate::relay::runtime::RelayRuntime;
use crate::transport::channels::InboundMessage;
use crate::translate::{Language, language_list};
use std::sync::Arc;

impl RelayRuntime {
    pub(in crate::relay) async fn temp(
        &self,
        msg: &InboundMessage,
        value: Option<&str>,
    ) -> anyhow::Result<()> {
        let session = self.session_for(msg).await?;
        let mut record = session.lock().await;

        let Some(raw) = value else {
            let current = record.temperature();
            drop(record);
            return self
                .reply(
                    msg,
                    &format!("Current temperature is {current}\n\nUpdate with: /temp [temperature]"),
                )
                .await;
        };

        let Ok(temperature) = Temperature::parse_user_input(raw) else {
            drop(record);
            return self.reply(msg, &format!("Invalid temperature: {raw}")).await;
        };

        record.set_temperature(temperature);
        self.sessions.save(&record)?;
        drop(record);
        tracing::info!(user_id = %msg.user_id, %temperature, "temperature updated");
        self.reply(msg, &format!("Temperature set to {temperature}"))
            .await
    }

    pub(in crate::relay) async fn translate(
        &self,
        msg: &InboundMessage,
        target: Option<&str>,
    ) -> anyhow::Result<()> {
        let Some(raw) = target else {
            return self
                .reply(
                    msg,
                    &format!(
                        "Please specify a language like this: /translate [language]\n\npossible language codes:\n\n{}",
                        language_list()
                    ),
                )
                .await;
        };

        if raw.eq_ignore_ascii_case("off") {
            let session = self.session_for(msg).await?;
            let mut record = session.lock().await;
            record.disable_translation();
            self.sessions.save(&record)?;
            drop(record);
            return self.reply(msg, "Translation disabled").await;
        }

        let Ok(language) = Language::parse_code(raw) else {
            return self
                .reply(
                    msg,
                    &format!(
                        "Unrecognized language code: {raw}\n\npossible language codes:\n\n{}",
                        language_list()
                    ),
                )
                .await;
        };

        let Some(translator) = self.translator.as_ref() else {
            return self.reply(msg, NO_TRANSLATOR).await;
        };

        let session = self.session_for(msg).await?;
        let mut record = session.lock().await;
        record.enable_translation(language, Arc::clone(translator));
        self.sessions.save(&record)?;
        drop(record);
        tracing::info!(user_id = %msg.user_id, %language, "translation enabled");

        self.reply(
            msg,
            &format!(
                "Language set to {language}. You can now write in your language and it will be translated to english before the Chatbot sees it. The answer from the bot will then be translated back to your language. You can disable this with /translate off"
            ),
        )
        .await
    }
}
