use crate::error::SessionError;
use crate::llm::ConversationHandle;
use crate::translate::languages::serde_code;
use crate::translate::{Language, Translator};
use crate::utils::fs::sanitize_file_component;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable external user key (the platform's numeric user id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix under which this identity's files are stored.
    pub fn storage_prefix(&self) -> String {
        sanitize_file_component(&self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for Identity {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Backend sampling temperature, always within `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Temperature(f64);

impl Temperature {
    pub const DEFAULT: Self = Self(0.9);

    pub fn new(value: f64) -> Result<Self, SessionError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(SessionError::InvalidTemperature(value.to_string()))
        }
    }

    /// Parse user input: plain decimal digits with at most one dot, no sign
    /// or exponent, then range-checked.
    pub fn parse_user_input(raw: &str) -> Result<Self, SessionError> {
        let invalid = || SessionError::InvalidTemperature(raw.to_string());
        let digits = raw.replacen('.', "", 1);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: f64 = raw.parse().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Always shows a fractional part (`1.0`, `0.9`).
impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = SessionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f64 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

/// `<identity>_<label>` with the display label reduced to filename-safe characters.
pub fn derive_backing_filename(identity: &Identity, display_name: &str) -> String {
    let label = sanitize_file_component(display_name.trim());
    let label = label.trim_matches('_');
    if label.is_empty() {
        identity.storage_prefix()
    } else {
        format!("{}_{label}", identity.storage_prefix())
    }
}

/// Durable per-identity state.
///
/// The translator binding is never serialized; it is re-attached from
/// configuration whenever a record with a language is materialized.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub identity: Identity,
    pub conversation_handle: ConversationHandle,
    temperature: Temperature,
    #[serde(default, with = "serde_code")]
    language: Option<Language>,
    #[serde(skip)]
    translator: Option<Arc<dyn Translator>>,
    /// `None` marks a transient record that is never written to disk.
    #[serde(default)]
    pub backing_filename: Option<String>,
}

impl fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRecord")
            .field("identity", &self.identity)
            .field("conversation_handle", &self.conversation_handle)
            .field("temperature", &self.temperature)
            .field("language", &self.language)
            .field("translator", &self.translator.as_ref().map(|t| t.name()))
            .field("backing_filename", &self.backing_filename)
            .finish()
    }
}

impl SessionRecord {
    pub fn new(
        identity: Identity,
        conversation_handle: ConversationHandle,
        temperature: Temperature,
        backing_filename: Option<String>,
    ) -> Self {
        Self {
            identity,
            conversation_handle,
            temperature,
            language: None,
            translator: None,
            backing_filename,
        }
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature = temperature;
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn translator(&self) -> Option<&Arc<dyn Translator>> {
        self.translator.as_ref()
    }

    /// Language and translator, present only when both are set.
    pub fn active_translation(&self) -> Option<(Language, &Arc<dyn Translator>)> {
        Some((self.language?, self.translator.as_ref()?))
    }

    pub fn enable_translation(&mut self, language: Language, translator: Arc<dyn Translator>) {
        self.language = Some(language);
        self.translator = Some(translator);
    }

    pub fn disable_translation(&mut self) {
        self.language = None;
        self.translator = None;
    }

    /// Re-attach a translator after loading; ignored when no language is set.
    pub fn rebind_translator(&mut self, translator: Option<Arc<dyn Translator>>) {
        self.translator = if self.language.is_some() {
            translator
        } else {
            None
        };
    }
}
