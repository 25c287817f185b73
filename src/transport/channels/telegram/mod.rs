pub mod api;
mod handler;


use crate::config::TelegramConfig;
use crate::llm::build_http_client_with_timeout;

/// Telegram channel: long-polls the Bot API for updates.
pub struct TelegramChannel {
    bot_token: String,
    api_base: String,
    max_message_chars: usize,
    poll_timeout_secs: u64,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: String, config: &TelegramConfig) -> Self {
        // Long polls must outlive the server-side wait.
        let client = build_http_client_with_timeout(config.poll_timeout_secs + 30);
        Self {
            bot_token,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            max_message_chars: config.max_message_chars,
            poll_timeout_secs: config.poll_timeout_secs,
            client,
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.bot_token)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{file_path}", self.api_base, self.bot_token)
    }
}
