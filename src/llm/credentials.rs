use crate::utils::fs::write_atomic;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CREDENTIALS_FILENAME: &str = "backend_credentials.json";

/// Session cookie captured by `telechat login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendCredentials {
    pub cookie: String,
    pub saved_at: DateTime<Utc>,
}

impl std::fmt::Debug for BackendCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCredentials")
            .field("cookie", &"[REDACTED]")
            .field("saved_at", &self.saved_at)
            .finish()
    }
}

impl BackendCredentials {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into().trim().to_string(),
            saved_at: Utc::now(),
        }
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CREDENTIALS_FILENAME)
    }

    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading credentials: {}", path.display()))?;
        let parsed: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing credentials: {}", path.display()))?;
        if parsed.cookie.is_empty() {
            return Ok(None);
        }
        Ok(Some(parsed))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)
    }
}
