use super::languages::Language;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Source language as reported by the translator (e.g. "DE").
    pub detected_source_language: String,
}

/// Stateless request/response translation backend.
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    fn translate<'a>(
        &'a self,
        text: &'a str,
        target: Language,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Translation>> + Send + 'a>>;
}
