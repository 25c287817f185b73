use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("TELECHAT_TELEGRAM_TOKEN")
            && !token.is_empty()
        {
            self.telegram_api_token = token;
        }

        if let Ok(token) = std::env::var("TELECHAT_DEEPL_TOKEN")
            && !token.is_empty()
        {
            self.deepl_api_token = Some(token);
        }

        if let Ok(token) = std::env::var("TELECHAT_DEEPGRAM_TOKEN")
            && !token.is_empty()
        {
            self.deepgram_api_token = Some(token);
        }

        if let Ok(dir) = std::env::var("TELECHAT_DATA_DIR")
            && !dir.is_empty()
        {
            self.data_dir = Some(dir);
        }
    }
}
