//! HuggingChat web backend.
//!
//! Conversations live on the HuggingChat side; this client only creates,
//! prompts and deletes them using the session cookie stored by
//! `telechat login`.

use super::credentials::BackendCredentials;
use super::http_client::build_http_client;
use super::traits::ChatBackend;
use super::types::ConversationHandle;
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::utils::text::truncate_with_ellipsis;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

const BACKEND_NAME: &str = "huggingchat";
const SESSION_COOKIE: &str = "hf-chat";

pub struct HuggingChatBackend {
    base_url: String,
    model: Option<String>,
    credentials: Option<BackendCredentials>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct NewConversationRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewConversationResponse {
    conversation_id: String,
}

#[derive(Debug, Serialize)]
struct PromptRequest<'a> {
    inputs: &'a str,
    is_retry: bool,
    is_continue: bool,
    web_search: bool,
    parameters: PromptParameters,
}

#[derive(Debug, Serialize)]
struct PromptParameters {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum StreamUpdate {
    Stream {
        token: String,
    },
    FinalAnswer {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl HuggingChatBackend {
    pub fn new(config: &BackendConfig, credentials: Option<BackendCredentials>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            credentials,
            client: build_http_client(),
        }
    }

    fn conversation_url(&self, handle: Option<&ConversationHandle>) -> String {
        match handle {
            Some(handle) => format!("{}/conversation/{handle}", self.base_url),
            None => format!("{}/conversation", self.base_url),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or_else(|| BackendError::NotAuthenticated {
                backend: BACKEND_NAME.into(),
            })?;
        Ok(request.header(
            reqwest::header::COOKIE,
            format!("{SESSION_COOKIE}={}", creds.cookie),
        ))
    }

    async fn check_status(resp: Response) -> anyhow::Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(BackendError::NotAuthenticated {
                backend: BACKEND_NAME.into(),
            }
            .into());
        }
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
        Err(BackendError::Request {
            backend: BACKEND_NAME.into(),
            status: status.as_u16(),
            message: truncate_with_ellipsis(&body, 200),
        }
        .into())
    }
}

/// Extract the answer from HuggingChat's newline-delimited update stream.
///
/// Prefers the `finalAnswer` update and falls back to the concatenated
/// `stream` tokens when the connection ended before it arrived.
pub(crate) fn parse_stream_body(body: &str) -> String {
    let mut tokens = String::new();
    for line in body.lines() {
        let line = line.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<StreamUpdate>(line) {
            Ok(StreamUpdate::FinalAnswer { text }) => return text.trim().to_string(),
            Ok(StreamUpdate::Stream { token }) => tokens.push_str(&token.replace('\0', "")),
            Ok(StreamUpdate::Other) => {}
            Err(error) => {
                tracing::debug!(%error, "skipping unparseable huggingchat update");
            }
        }
    }
    tokens.trim().to_string()
}

impl ChatBackend for HuggingChatBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn ensure_authenticated<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if self.credentials.is_none() {
                return Err(BackendError::NotAuthenticated {
                    backend: BACKEND_NAME.into(),
                }
                .into());
            }
            Ok(())
        })
    }

    fn new_conversation<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ConversationHandle>> + Send + 'a>> {
        Box::pin(async move {
            let request = self
                .client
                .post(self.conversation_url(None))
                .json(&NewConversationRequest {
                    model: self.model.as_deref(),
                });
            let resp = self.authorized(request)?.send().await?;
            let resp = Self::check_status(resp).await?;
            let parsed: NewConversationResponse =
                resp.json().await.map_err(|e| BackendError::Protocol {
                    backend: BACKEND_NAME.into(),
                    message: e.to_string(),
                })?;
            tracing::debug!(conversation = %parsed.conversation_id, "huggingchat conversation created");
            Ok(ConversationHandle::new(parsed.conversation_id))
        })
    }

    fn delete_conversation<'a>(
        &'a self,
        handle: &'a ConversationHandle,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let request = self.client.delete(self.conversation_url(Some(handle)));
            let resp = self.authorized(request)?.send().await?;
            Self::check_status(resp).await?;
            tracing::debug!(conversation = %handle, "huggingchat conversation deleted");
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
            let request = self
                .client
                .post(self.conversation_url(Some(handle)))
                .json(&PromptRequest {
                    inputs: prompt,
                    is_retry: false,
                    is_continue: false,
                    web_search: false,
                    parameters: PromptParameters { temperature },
                });
            let resp = self.authorized(request)?.send().await?;
            let body = Self::check_status(resp).await?.text().await?;
            Ok(parse_stream_body(&body))
        })
    }
}
