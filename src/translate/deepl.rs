use super::languages::Language;
use super::traits::{Translation, Translator};
use crate::error::TranslationError;
use crate::llm::build_http_client;
use crate::utils::text::truncate_with_ellipsis;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

const FREE_API_BASE: &str = "https://api-free.deepl.com";
const PRO_API_BASE: &str = "https://api.deepl.com";

/// DeepL REST translator.
pub struct DeeplTranslator {
    auth_header: String,
    translate_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    detected_source_language: String,
    text: String,
}

impl DeeplTranslator {
    /// Free-tier keys end in `:fx` and are served from a separate host.
    pub fn new(api_key: &str) -> Self {
        let base = if api_key.trim().ends_with(":fx") {
            FREE_API_BASE
        } else {
            PRO_API_BASE
        };
        Self::with_base_url(api_key, base)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            auth_header: format!("DeepL-Auth-Key {}", api_key.trim()),
            translate_url: format!("{}/v2/translate", base_url.trim_end_matches('/')),
            client: build_http_client(),
        }
    }
}

impl Translator for DeeplTranslator {
    fn name(&self) -> &str {
        "deepl"
    }

    fn translate<'a>(
        &'a self,
        text: &'a str,
        target: Language,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Translation>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .client
                .post(&self.translate_url)
                .header(reqwest::header::AUTHORIZATION, &self.auth_header)
                .json(&TranslateRequest {
                    text: [text],
                    target_lang: target.to_string(),
                })
                .send()
                .await?;

            if !resp.status().is_success() {
                let status = resp.status();
                let err = resp
                    .text()
                    .await
                    .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
                anyhow::bail!(
                    "DeepL translate failed ({status}): {}",
                    truncate_with_ellipsis(&err, 200)
                );
            }

            let parsed: TranslateResponse = resp
                .json()
                .await
                .context("failed to decode DeepL response")?;
            let first = parsed
                .translations
                .into_iter()
                .next()
                .ok_or(TranslationError::Empty)?;

            Ok(Translation {
                text: first.text,
                detected_source_language: first.detected_source_language,
            })
        })
    }
}
