//! Bot API payloads; only the fields the relay reads.

use super::super::traits::{InboundMessage, VoiceNote};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self, method: &str) -> anyhow::Result<T> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => anyhow::bail!(
                "Telegram {method} failed: {}",
                self.description.as_deref().unwrap_or("no description")
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub date: u64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<Voice>,
    #[serde(default)]
    pub forward_origin: Option<serde_json::Value>,
    #[serde(default)]
    pub forward_date: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// `@username` when set, otherwise the full name.
    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => format!("@{username}"),
            _ => match self.last_name.as_deref() {
                Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
                _ => self.first_name.clone(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Voice {
    pub file_id: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct File {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl Message {
    /// Convert to the channel-neutral form. Messages without a sender or
    /// without text or voice are dropped.
    pub fn into_inbound(self, channel: &str) -> Option<InboundMessage> {
        let from = self.from?;
        if self.text.is_none() && self.voice.is_none() {
            return None;
        }
        Some(InboundMessage {
            id: uuid::Uuid::new_v4().to_string(),
            channel: channel.to_string(),
            user_id: from.id.to_string(),
            display_name: from.display_name(),
            username: from.username.filter(|u| !u.is_empty()),
            chat_id: self.chat.id.to_string(),
            message_id: self.message_id.to_string(),
            text: self.text,
            voice: self.voice.map(|voice| VoiceNote {
                file_id: voice.file_id,
                mime_type: voice.mime_type.unwrap_or_else(|| "audio/ogg".to_string()),
                duration_secs: voice.duration,
            }),
            forwarded: self.forward_origin.is_some() || self.forward_date.is_some(),
            timestamp: self.date,
        })
    }
}
