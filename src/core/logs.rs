//! Plain-text conversation logs, one file per (identity, conversation).

use super::sessions::{Identity, derive_backing_filename, find_identity_entry};
use crate::utils::fs::sanitize_file_component;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const LOG_EXTENSION: &str = "log";

pub struct ConversationLogs {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl ConversationLogs {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("logs"),
            write_lock: Mutex::new(()),
        }
    }

    /// Folder holding `identity`'s logs. An existing folder wins over the
    /// current display name so renamed users keep one folder.
    fn folder_for(&self, identity: &Identity, display_name: &str) -> PathBuf {
        find_identity_entry(&self.dir, identity, None)
            .unwrap_or_else(|| self.dir.join(derive_backing_filename(identity, display_name)))
    }

    /// Path of an existing log file, if any.
    pub fn path(&self, identity: &Identity, key: &str) -> Option<PathBuf> {
        let folder = find_identity_entry(&self.dir, identity, None)?;
        let path = folder.join(log_file_name(key));
        path.is_file().then_some(path)
    }

    /// Append one `[timestamp] title` block to the log named `key`.
    pub fn append(
        &self,
        identity: &Identity,
        display_name: &str,
        key: &str,
        title: &str,
        message: &str,
    ) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("log write lock poisoned"))?;
        let folder = self.folder_for(identity, display_name);
        fs::create_dir_all(&folder)
            .with_context(|| format!("failed creating log folder: {}", folder.display()))?;
        let path = folder.join(log_file_name(key));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed opening log: {}", path.display()))?;
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        write!(file, "[{stamp}] {title}\n{message}\n\n")
            .with_context(|| format!("failed appending log: {}", path.display()))?;
        Ok(())
    }

    /// Remove the log named `key`; `false` when there was nothing to remove.
    pub fn delete(&self, identity: &Identity, key: &str) -> Result<bool> {
        let Some(path) = self.path(identity, key) else {
            return Ok(false);
        };
        fs::remove_file(&path)
            .with_context(|| format!("failed deleting log: {}", path.display()))?;
        tracing::info!(%identity, log = %path.display(), "conversation log deleted");
        Ok(true)
    }
}

fn log_file_name(key: &str) -> String {
    format!("{}.{LOG_EXTENSION}", sanitize_file_component(key))
}
