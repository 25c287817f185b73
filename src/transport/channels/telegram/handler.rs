use super::TelegramChannel;
use super::api::{ApiResponse, File, SentMessage, Update};
use crate::error::TransportError;
use crate::transport::channels::traits::{Channel, InboundMessage, VoiceNote};
use crate::utils::text::truncate_with_ellipsis;
use reqwest::Response;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const CHANNEL_NAME: &str = "telegram";
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

async fn failure_body(resp: Response) -> String {
    let body = resp
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
    truncate_with_ellipsis(&body, 200)
}

impl TelegramChannel {
    async fn poll_updates(&self, offset: i64) -> anyhow::Result<Vec<Update>> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message"]
        });
        let resp = self
            .client
            .post(self.api_url("getUpdates"))
            .json(&body)
            .send()
            .await?;
        let parsed: ApiResponse<Vec<Update>> = resp.json().await?;
        parsed.into_result("getUpdates")
    }
}

impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        CHANNEL_NAME
    }

    fn max_message_length(&self) -> usize {
        self.max_message_chars
    }

    fn send_reply<'a>(
        &'a self,
        message: &'a str,
        chat_id: &'a str,
        reply_to: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let mut body = serde_json::json!({
                "chat_id": chat_id,
                "text": message,
            });
            if let Some(reply_to) = reply_to.and_then(|id| id.parse::<i64>().ok()) {
                body["reply_parameters"] = serde_json::json!({
                    "message_id": reply_to,
                    "allow_sending_without_reply": true
                });
            }

            let resp = self
                .client
                .post(self.api_url("sendMessage"))
                .json(&body)
                .send()
                .await?;
            if !resp.status().is_success() {
                let status = resp.status();
                return Err(TransportError::Send {
                    channel: CHANNEL_NAME.into(),
                    message: format!("sendMessage ({status}): {}", failure_body(resp).await),
                }
                .into());
            }

            let sent: ApiResponse<SentMessage> = resp.json().await?;
            Ok(sent.into_result("sendMessage")?.message_id.to_string())
        })
    }

    fn send_typing<'a>(
        &'a self,
        chat_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::json!({ "chat_id": chat_id, "action": "typing" });
            let resp = self
                .client
                .post(self.api_url("sendChatAction"))
                .json(&body)
                .send()
                .await?;
            if !resp.status().is_success() {
                let status = resp.status();
                anyhow::bail!(
                    "Telegram sendChatAction failed ({status}): {}",
                    failure_body(resp).await
                );
            }
            Ok(())
        })
    }

    fn download_voice<'a>(
        &'a self,
        voice: &'a VoiceNote,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let download_error = |message: String| TransportError::Download {
                channel: CHANNEL_NAME.into(),
                message,
            };

            let resp = self
                .client
                .post(self.api_url("getFile"))
                .json(&serde_json::json!({ "file_id": voice.file_id }))
                .send()
                .await?;
            let file: ApiResponse<File> = resp.json().await?;
            let file_path = file
                .into_result("getFile")?
                .file_path
                .ok_or_else(|| download_error("getFile returned no file_path".into()))?;

            let resp = self.client.get(self.file_url(&file_path)).send().await?;
            if !resp.status().is_success() {
                let status = resp.status();
                return Err(download_error(format!("{status}: {}", failure_body(resp).await)).into());
            }
            Ok(resp.bytes().await?.to_vec())
        })
    }

    fn listen<'a>(
        &'a self,
        tx: tokio::sync::mpsc::Sender<InboundMessage>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut offset: i64 = 0;
            tracing::info!("Telegram channel listening for messages...");

            loop {
                let updates = match self.poll_updates(offset).await {
                    Ok(updates) => updates,
                    Err(error) => {
                        tracing::warn!("Telegram poll error: {error:#}");
                        tokio::time::sleep(POLL_RETRY_DELAY).await;
                        continue;
                    }
                };

                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    let Some(message) = update.message.and_then(|m| m.into_inbound(CHANNEL_NAME))
                    else {
                        continue;
                    };
                    if tx.send(message).await.is_err() {
                        return Ok(());
                    }
                }
            }
        })
    }

    fn health_check<'a>(&'a self) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            self.client
                .get(self.api_url("getMe"))
                .send()
                .await
                .is_ok_and(|r| r.status().is_success())
        })
    }
}
