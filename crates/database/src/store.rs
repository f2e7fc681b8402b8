use crate::error::DbError;
use async_trait::async_trait;
use core_types::{Record, RecordDraft, RecordFilter, Settings};
use uuid::Uuid;

/// The persistence contract for the ledger.
///
/// Implementations assign ids and timestamps; they never derive or validate
/// record contents. That is the job of the [`crate::Ledger`] write path.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Stores a new record, assigning its id and timestamps.
    async fn insert_record(&self, draft: RecordDraft) -> Result<Record, DbError>;

    /// Replaces the contents of an existing record, keeping its id and
    /// creation time. Fails with `NotFound` for unknown ids.
    async fn update_record(&self, id: Uuid, draft: RecordDraft) -> Result<Record, DbError>;

    /// Removes a record. Fails with `NotFound` for unknown ids.
    async fn delete_record(&self, id: Uuid) -> Result<(), DbError>;

    async fn get_record(&self, id: Uuid) -> Result<Record, DbError>;

    /// Records matching the filter, newest first (by date, then creation time).
    async fn query_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, DbError>;

    /// The stored settings document, if one was ever saved.
    async fn get_settings(&self) -> Result<Option<Settings>, DbError>;

    /// Upserts the single settings document.
    async fn save_settings(&self, settings: &Settings) -> Result<(), DbError>;
}
