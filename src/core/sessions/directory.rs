use super::record::{Identity, SessionRecord, Temperature, derive_backing_filename};
use super::store::SessionStore;
use crate::core::logs::ConversationLogs;
use crate::error::SessionError;
use crate::llm::{ChatBackend, ConversationHandle};
use crate::translate::Translator;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to one resident record. Hold the lock for the whole command
/// that reads or mutates it.
pub type SessionHandle = Arc<Mutex<SessionRecord>>;

/// Process-wide identity → [`SessionRecord`] map backed by [`SessionStore`].
pub struct SessionDirectory {
    records: Mutex<HashMap<Identity, SessionHandle>>,
    store: SessionStore,
    logs: ConversationLogs,
    backend: Arc<dyn ChatBackend>,
    translator: Option<Arc<dyn Translator>>,
    default_temperature: Temperature,
}

impl SessionDirectory {
    pub fn new(
        data_dir: &Path,
        backend: Arc<dyn ChatBackend>,
        translator: Option<Arc<dyn Translator>>,
        default_temperature: Temperature,
    ) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            store: SessionStore::new(data_dir),
            logs: ConversationLogs::new(data_dir),
            backend,
            translator,
            default_temperature,
        }
    }

    pub fn logs(&self) -> &ConversationLogs {
        &self.logs
    }

    pub fn translator(&self) -> Option<&Arc<dyn Translator>> {
        self.translator.as_ref()
    }

    /// Return the record for `identity`, creating it on first contact.
    ///
    /// Resolution order is resident map, then persisted file, then a fresh
    /// record with a new backend conversation. The directory lock is held
    /// across the whole lookup so concurrent first contacts for one identity
    /// create exactly one conversation. The record is persisted before
    /// returning unless another task currently holds it, in which case that
    /// task persists its own mutation.
    pub async fn get_or_create(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> anyhow::Result<SessionHandle> {
        let mut records = self.records.lock().await;

        if let Some(handle) = records.get(identity) {
            if let Ok(record) = handle.try_lock() {
                self.store.save(&record)?;
            }
            return Ok(Arc::clone(handle));
        }

        let record = match self.store.load(identity)? {
            Some(mut record) => {
                record.rebind_translator(self.translator.clone());
                tracing::info!(%identity, "session restored from disk");
                record
            }
            None => {
                let handle = self.backend.new_conversation().await?;
                tracing::info!(%identity, conversation = %handle, "session created");
                SessionRecord::new(
                    identity.clone(),
                    handle,
                    self.default_temperature,
                    Some(derive_backing_filename(identity, display_name)),
                )
            }
        };

        self.store.save(&record)?;
        let handle = Arc::new(Mutex::new(record));
        records.insert(identity.clone(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Persist the current state of `record`.
    pub fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        self.store.save(record)
    }

    /// Remove the log kept for one of `identity`'s conversations; `false`
    /// when no such log existed.
    pub fn delete_log(
        &self,
        identity: &Identity,
        handle: &ConversationHandle,
    ) -> anyhow::Result<bool> {
        self.logs.delete(identity, handle.as_str())
    }

    pub async fn resident_count(&self) -> usize {
        self.records.lock().await.len()
    }
}
