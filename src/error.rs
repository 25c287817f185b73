use std::path::PathBuf;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `telechat`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum RelayError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Session directory ───────────────────────────────────────────────
    #[error("session: {0}")]
    Session(#[from] SessionError),

    // ── Conversational backend ──────────────────────────────────────────
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    // ── Translation ─────────────────────────────────────────────────────
    #[error("translation: {0}")]
    Translation(#[from] TranslationError),

    // ── Speech-to-text ──────────────────────────────────────────────────
    #[error("speech: {0}")]
    Speech(#[from] SpeechError),

    // ── Transport / Channel ─────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Allow-list / admin-list ─────────────────────────────────────────
    #[error("access: {0}")]
    Access(#[from] AccessError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing {0}; add it to config.toml")]
    Missing(&'static str),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Session errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("persisted session {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("temperature must be within (0, 1], got {0}")]
    InvalidTemperature(String),

    #[error("store: {0}")]
    Store(String),
}

// ─── Backend errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("not logged in to {backend}; run `telechat login` first")]
    NotAuthenticated { backend: String },

    #[error("{backend} request failed ({status}): {message}")]
    Request {
        backend: String,
        status: u16,
        message: String,
    },

    #[error("{backend} returned an unexpected payload: {message}")]
    Protocol { backend: String, message: String },
}

// ─── Translation errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("translator returned no result")]
    Empty,
}

// ─── Speech errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("transcription response is missing {0}")]
    MissingField(&'static str),
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("channel {channel} send failed: {message}")]
    Send { channel: String, message: String },

    #[error("channel {channel} download failed: {message}")]
    Download { channel: String, message: String },
}

// ─── Access-list errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("list file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, RelayError>;
