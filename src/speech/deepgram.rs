use super::traits::{SpeechToText, Transcript};
use crate::error::SpeechError;
use crate::llm::build_http_client;
use crate::utils::text::truncate_with_ellipsis;
use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

const DEFAULT_API_BASE: &str = "https://api.deepgram.com";

/// Deepgram pre-recorded transcription with language detection.
pub struct DeepgramTranscriber {
    auth_header: String,
    listen_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<ListenChannel>,
}

#[derive(Debug, Deserialize)]
struct ListenChannel {
    #[serde(default)]
    alternatives: Vec<ListenAlternative>,
    #[serde(default)]
    detected_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListenAlternative {
    transcript: String,
}

impl DeepgramTranscriber {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            auth_header: format!("Token {}", api_key.trim()),
            listen_url: format!("{}/v1/listen", base_url.trim_end_matches('/')),
            client: build_http_client(),
        }
    }
}

impl SpeechToText for DeepgramTranscriber {
    fn name(&self) -> &str {
        "deepgram"
    }

    fn transcribe<'a>(
        &'a self,
        audio: &'a [u8],
        mime_type: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Transcript>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .client
                .post(&self.listen_url)
                .query(&[("detect_language", "true")])
                .header(reqwest::header::AUTHORIZATION, &self.auth_header)
                .header(reqwest::header::CONTENT_TYPE, mime_type)
                .body(audio.to_vec())
                .send()
                .await?;

            if !resp.status().is_success() {
                let status = resp.status();
                let err = resp
                    .text()
                    .await
                    .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
                anyhow::bail!(
                    "Deepgram listen failed ({status}): {}",
                    truncate_with_ellipsis(&err, 200)
                );
            }

            let parsed: ListenResponse = resp
                .json()
                .await
                .context("failed to decode Deepgram response")?;
            let channel = parsed
                .results
                .channels
                .into_iter()
                .next()
                .ok_or(SpeechError::MissingField("results.channels[0]"))?;
            let detected_language = channel
                .detected_language
                .ok_or(SpeechError::MissingField("detected_language"))?;
            let text = channel
                .alternatives
                .into_iter()
                .next()
                .map(|alt| alt.transcript)
                .unwrap_or_default();

            Ok(Transcript {
                text: text.trim().to_string(),
                detected_language,
            })
        })
    }
}
