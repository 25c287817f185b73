use crate::relay::runtime::{RelayRuntime, identity_of};
use crate::transport::channels::InboundMessage;

impl RelayRuntime {
    /// `/new`: fresh conversation, the old one stays on the backend.
    pub(in crate::relay) async fn new_conversation(
        &self,
        msg: &InboundMessage,
    ) -> anyhow::Result<()> {
        self.typing(msg).await;
        let session = self.session_for(msg).await?;
        let mut record = session.lock().await;
        self.adapter.reset_conversation(&mut record, false).await?;
        self.sessions.save(&record)?;
        drop(record);
        self.reply(
            msg,
            "New conversation was started, the old one is still on HuggingChat",
        )
        .await
    }

    /// `/delete [logs]`: fresh conversation, the old one is deleted on the
    /// backend and optionally its local log too.
    pub(in crate::relay) async fn delete_conversation(
        &self,
        msg: &InboundMessage,
        delete_logs: bool,
    ) -> anyhow::Result<()> {
        self.typing(msg).await;
        let session = self.session_for(msg).await?;
        let mut record = session.lock().await;
        let old = self.adapter.reset_conversation(&mut record, true).await?;
        // The old conversation is gone on the backend; persist the switch
        // before anything else can fail.
        self.sessions.save(&record)?;
        drop(record);
        let logs_deleted = if delete_logs {
            self.sessions.delete_log(&identity_of(msg), &old)?
        } else {
            false
        };

        let suffix = if logs_deleted {
            "\nand the logs have been deleted"
        } else {
            "\nbut the logs have been kept"
        };
        self.reply(
            msg,
            &format!("Conversation has been deleted and a new one has been started{suffix}"),
        )
        .await
    }

    /// `/private <message>`: one exchange in a throwaway conversation. The
    /// session is only read for its temperature.
    pub(in crate::relay) async fn private(
        &self,
        msg: &InboundMessage,
        message: &str,
    ) -> anyhow::Result<()> {
        self.typing(msg).await;
        if message.trim().is_empty() {
            return self
                .reply_to(msg, "Please specify a message like this: /private [message]")
                .await;
        }

        let session = self.session_for(msg).await?;
        let temperature = session.lock().await.temperature();
        let outcome = self.adapter.one_off(message.trim(), temperature).await?;
        self.reply_to(msg, &outcome.into_text()).await
    }
}
