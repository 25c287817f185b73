use super::record::{Identity, SessionRecord};
use crate::error::SessionError;
use crate::utils::fs::write_atomic;
use std::fs;
use std::path::{Path, PathBuf};

const RECORD_EXTENSION: &str = "json";

/// Locate the persisted file for `identity`.
///
/// A file belongs to an identity when its stem equals the identity prefix or
/// starts with `<prefix>_`; the display label after the underscore may change
/// between runs.
pub fn find_identity_entry(
    dir: &Path,
    identity: &Identity,
    extension: Option<&str>,
) -> Option<PathBuf> {
    let prefix = identity.storage_prefix();
    let owned = format!("{prefix}_");
    let entries = fs::read_dir(dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| match extension {
            Some(ext) => path.extension().and_then(|e| e.to_str()) == Some(ext),
            None => true,
        })
        .filter(|path| {
            let stem = match extension {
                Some(_) => path.file_stem(),
                None => path.file_name(),
            };
            stem.and_then(|s| s.to_str())
                .is_some_and(|stem| stem == prefix || stem.starts_with(&owned))
        })
        .collect();
    matches.sort();
    matches.into_iter().next()
}

/// File-per-identity persistence for [`SessionRecord`]s.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("sessions"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn find(&self, identity: &Identity) -> Option<PathBuf> {
        find_identity_entry(&self.dir, identity, Some(RECORD_EXTENSION))
    }

    /// Load the persisted record for `identity`, if any.
    ///
    /// The returned record keeps the stem of the file it came from as its
    /// backing filename so later saves overwrite the same file.
    pub fn load(&self, identity: &Identity) -> Result<Option<SessionRecord>, SessionError> {
        let Some(path) = self.find(identity) else {
            return Ok(None);
        };
        let raw = fs::read_to_string(&path)
            .map_err(|e| SessionError::Store(format!("failed reading {}: {e}", path.display())))?;
        let mut record: SessionRecord = serde_json::from_str(&raw)
            .map_err(|source| SessionError::Corrupt {
                path: path.clone(),
                source,
            })?;
        record.identity = identity.clone();
        record.backing_filename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
        Ok(Some(record))
    }

    /// Write `record` to its backing file. Transient records are skipped.
    pub fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        let Some(stem) = record.backing_filename.as_deref() else {
            return Ok(());
        };
        let path = self.dir.join(format!("{stem}.{RECORD_EXTENSION}"));
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| SessionError::Store(format!("failed encoding session: {e}")))?;
        write_atomic(&path, &json).map_err(|e| SessionError::Store(format!("{e:#}")))?;
        tracing::debug!(identity = %record.identity, path = %path.display(), "session persisted");
        Ok(())
    }
}
