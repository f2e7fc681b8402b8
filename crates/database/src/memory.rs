use crate::error::DbError;
use crate::store::LedgerStore;
use async_trait::async_trait;
use chrono::Utc;
use core_types::{Record, RecordDraft, RecordFilter, Settings};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    records: HashMap<Uuid, Record>,
    settings: Option<Settings>,
}

/// A process-local [`LedgerStore`] used by tests and the `demo` command.
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn insert_record(&self, draft: RecordDraft) -> Result<Record, DbError> {
        let now = Utc::now();
        let record = draft.into_record(Uuid::new_v4(), now, now);
        let mut state = self.state.write().await;
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_record(&self, id: Uuid, draft: RecordDraft) -> Result<Record, DbError> {
        let mut state = self.state.write().await;
        let existing = state.records.get_mut(&id).ok_or(DbError::NotFound)?;
        let updated = draft.into_record(id, existing.created_at, Utc::now());
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete_record(&self, id: Uuid) -> Result<(), DbError> {
        let mut state = self.state.write().await;
        state.records.remove(&id).map(|_| ()).ok_or(DbError::NotFound)
    }

    async fn get_record(&self, id: Uuid) -> Result<Record, DbError> {
        let state = self.state.read().await;
        state.records.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn query_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, DbError> {
        let state = self.state.read().await;
        let mut records: Vec<Record> = state
            .records
            .values()
            .filter(|r| filter.matches(r.record_type(), r.date))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(records)
    }

    async fn get_settings(&self) -> Result<Option<Settings>, DbError> {
        Ok(self.state.read().await.settings.clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), DbError> {
        self.state.write().await.settings = Some(settings.clone());
        Ok(())
    }
}
