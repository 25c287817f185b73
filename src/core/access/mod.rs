//! Allow-list and admin-list files.
//!
//! Both lists are flat JSON arrays of user ids or usernames. Every mutation
//! loads the whole file, edits it and writes it back under one lock.

use crate::error::AccessError;
use crate::utils::fs::write_atomic;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const WILDCARD: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AccessList {
    #[strum(serialize = "whitelist")]
    Allowed,
    #[strum(serialize = "admin list")]
    Admins,
}

impl AccessList {
    fn file_name(self) -> &'static str {
        match self {
            Self::Allowed => "allowed_users.json",
            Self::Admins => "admins.json",
        }
    }
}

/// Who sent a message, as far as the lists are concerned.
#[derive(Debug, Clone, Copy)]
pub struct Requester<'a> {
    pub user_id: &'a str,
    pub username: Option<&'a str>,
}

pub struct AccessLists {
    data_dir: PathBuf,
    lock: Mutex<()>,
}

fn normalize(entry: &str) -> String {
    entry.trim().trim_start_matches('@').to_string()
}

fn entry_matches(entry: &str, requester: Requester<'_>) -> bool {
    if entry == WILDCARD || entry == requester.user_id {
        return true;
    }
    requester
        .username
        .map(|name| name.trim_start_matches('@'))
        .is_some_and(|name| !name.is_empty() && entry.eq_ignore_ascii_case(name))
}

impl AccessLists {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self, list: AccessList) -> PathBuf {
        self.data_dir.join(list.file_name())
    }

    fn read(&self, list: AccessList) -> anyhow::Result<Vec<String>> {
        let path = self.path(list);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        let entries: Vec<String> = serde_json::from_str(&raw)
            .map_err(|source| AccessError::Corrupt { path, source })?;
        Ok(entries)
    }

    fn write(&self, list: AccessList, entries: &[String]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        write_atomic(&self.path(list), &json)
    }

    pub async fn list(&self, list: AccessList) -> anyhow::Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.read(list)
    }

    /// Add `entry`; `false` when it was already present.
    pub async fn add(&self, list: AccessList, entry: &str) -> anyhow::Result<bool> {
        let entry = normalize(entry);
        anyhow::ensure!(!entry.is_empty(), "cannot add an empty entry to the {list}");
        let _guard = self.lock.lock().await;
        let mut entries = self.read(list)?;
        if entries.iter().any(|e| e.eq_ignore_ascii_case(&entry)) {
            return Ok(false);
        }
        entries.push(entry);
        self.write(list, &entries)?;
        Ok(true)
    }

    /// Remove `entry`; `false` when it was not present.
    pub async fn remove(&self, list: AccessList, entry: &str) -> anyhow::Result<bool> {
        let entry = normalize(entry);
        let _guard = self.lock.lock().await;
        let mut entries = self.read(list)?;
        let before = entries.len();
        entries.retain(|e| !e.eq_ignore_ascii_case(&entry));
        if entries.len() == before {
            return Ok(false);
        }
        self.write(list, &entries)?;
        Ok(true)
    }

    pub async fn is_admin(&self, requester: Requester<'_>) -> anyhow::Result<bool> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read(AccessList::Admins)?
            .iter()
            .any(|entry| entry_matches(entry, requester)))
    }

    /// Admins are implicitly allowed.
    pub async fn is_allowed(&self, requester: Requester<'_>) -> anyhow::Result<bool> {
        let _guard = self.lock.lock().await;
        for list in [AccessList::Allowed, AccessList::Admins] {
            if self.read(list)?.iter().any(|entry| entry_matches(entry, requester)) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
