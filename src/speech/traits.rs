use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    /// Language tag as reported by the recognizer (e.g. "en", "de").
    pub detected_language: String,
}

impl Transcript {
    /// Spoken language in translator notation: English becomes `EN-US`,
    /// everything else is upper-cased.
    pub fn spoken_language(&self) -> String {
        let tag = self.detected_language.trim();
        if tag.eq_ignore_ascii_case("en") {
            "EN-US".to_string()
        } else {
            tag.to_ascii_uppercase()
        }
    }

    pub fn is_english(&self) -> bool {
        self.spoken_language() == "EN-US"
    }
}

pub trait SpeechToText: Send + Sync {
    fn name(&self) -> &str;

    fn transcribe<'a>(
        &'a self,
        audio: &'a [u8],
        mime_type: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Transcript>> + Send + 'a>>;
}
