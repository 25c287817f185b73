use crate::core::sessions::Temperature;
use crate::llm::ConversationHandle;
use crate::relay::runtime::RelayRuntime;
use crate::transport::channels::InboundMessage;

const MAX_BOTTALK_ITERATIONS: u32 = 10;

const BOTTALK_USAGE: &str = "Please specify a message like this:\n/bottalk [iterations] [message]\n\
where [iterations] is a number that specifies how many messages will be exchanged overall - \
e.g. for \"4\" both bots would get to write 2 messages each. \
This happens completely outside of your current conversation.";

fn turn_header(turn: u32, iterations: u32) -> String {
    format!("[Bot {} | Iteration {}/{iterations}]", turn % 2 + 1, turn + 1)
}

impl RelayRuntime {
    /// Two throwaway conversations answer each other for `iterations` turns.
    /// Both are deleted afterwards whatever happened in between.
    pub(in crate::relay) async fn bottalk(
        &self,
        msg: &InboundMessage,
        iterations: u32,
        message: &str,
    ) -> anyhow::Result<()> {
        if iterations == 0 || message.trim().is_empty() {
            return self.reply_to(msg, BOTTALK_USAGE).await;
        }
        if iterations > MAX_BOTTALK_ITERATIONS {
            return self
                .reply_to(
                    msg,
                    &format!(
                        "Please specify a number of iterations between 1 and {MAX_BOTTALK_ITERATIONS}"
                    ),
                )
                .await;
        }

        let first = self.adapter.open_temporary().await?;
        let second = match self.adapter.open_temporary().await {
            Ok(handle) => handle,
            Err(error) => {
                self.adapter.discard(&first).await;
                return Err(error);
            }
        };
        let bots = [first, second];

        let result = self.run_bottalk(msg, &bots, iterations, message.trim()).await;
        for handle in &bots {
            self.adapter.discard(handle).await;
        }
        result
    }

    async fn run_bottalk(
        &self,
        msg: &InboundMessage,
        bots: &[ConversationHandle; 2],
        iterations: u32,
        opening: &str,
    ) -> anyhow::Result<()> {
        let log_key = format!("bottalk_{}_{}", bots[0], bots[1]);
        self.log(msg, &log_key, "user", opening)?;

        let mut text = opening.to_string();
        let mut last_message_id = msg.message_id.clone();
        for turn in 0..iterations {
            self.typing(msg).await;
            let bot = &bots[(turn % 2) as usize];
            text = self
                .adapter
                .get_reply(bot, Temperature::DEFAULT, &text)
                .await
                .into_text();
            self.log(msg, &log_key, &format!("Bot {}", turn % 2 + 1), &text)?;

            let rendered = format!("{}\n\n{text}", turn_header(turn, iterations));
            if let Some(sent) = self
                .channel
                .send_chunked(&rendered, &msg.chat_id, Some(&last_message_id))
                .await?
            {
                last_message_id = sent;
            }
        }
        tracing::info!(user_id = %msg.user_id, iterations, "bottalk finished");
        Ok(())
    }
}
