use crate::drafts::prepare_draft;
use crate::error::DbError;
use crate::seed::sample_requests;
use crate::store::LedgerStore;
use analytics::{DashboardMetrics, MetricsEngine};
use chrono::{NaiveDate, Utc};
use core_types::{LogRequest, Record, RecordFilter, Settings};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// The application service over a [`LedgerStore`].
///
/// Owns the write path (validation and derived fields), settings resolution
/// and the hand-off from stored records to the [`MetricsEngine`]. Cheap to
/// clone; clones share the store.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
    engine: MetricsEngine,
    clock: Clock,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            engine: MetricsEngine::new(),
            clock: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Replaces the source of "today" (UTC date by default).
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// The fully-resolved settings: stored document, else environment, else defaults.
    pub async fn settings(&self) -> Result<Settings, DbError> {
        let stored = self.store.get_settings().await?;
        Ok(configuration::resolve_settings(stored)?)
    }

    pub async fn update_settings(&self, settings: Settings) -> Result<Settings, DbError> {
        settings.validate()?;
        self.store.save_settings(&settings).await?;
        info!(base_fee = %settings.base_fee, "Settings saved.");
        Ok(settings)
    }

    pub async fn list_logs(&self, filter: &RecordFilter) -> Result<Vec<Record>, DbError> {
        self.store.query_records(filter).await
    }

    pub async fn get_log(&self, id: Uuid) -> Result<Record, DbError> {
        self.store.get_record(id).await
    }

    pub async fn create_log(&self, request: LogRequest) -> Result<Record, DbError> {
        let settings = self.settings().await?;
        let existing = self.store.query_records(&RecordFilter::default()).await?;
        let draft = prepare_draft(request, &settings, &existing, None, self.today())?;

        let record = self.store.insert_record(draft).await?;
        info!(id = %record.id, record_type = %record.record_type(), date = %record.date, "Log created.");
        Ok(record)
    }

    pub async fn update_log(&self, id: Uuid, request: LogRequest) -> Result<Record, DbError> {
        let current = self.store.get_record(id).await?;
        let settings = self.settings().await?;
        let existing = self.store.query_records(&RecordFilter::default()).await?;
        let draft = prepare_draft(request, &settings, &existing, Some(&current), self.today())?;

        let record = self.store.update_record(id, draft).await?;
        info!(id = %record.id, record_type = %record.record_type(), "Log updated.");
        Ok(record)
    }

    pub async fn delete_log(&self, id: Uuid) -> Result<(), DbError> {
        self.store.delete_record(id).await?;
        info!(%id, "Log deleted.");
        Ok(())
    }

    /// Recomputes every dashboard metric from the current ledger.
    pub async fn dashboard(&self) -> Result<DashboardMetrics, DbError> {
        let settings = self.settings().await?;
        let records = self.store.query_records(&RecordFilter::default()).await?;
        Ok(self.engine.calculate(&records, &settings, self.today()))
    }

    /// The amount owed as of the date of the given record.
    pub async fn amount_due_as_of(&self, id: Uuid) -> Result<(NaiveDate, Decimal), DbError> {
        let record = self.store.get_record(id).await?;
        let settings = self.settings().await?;
        let records = self.store.query_records(&RecordFilter::default()).await?;
        let due = self.engine.amount_due_as_of(&records, &settings, record.date);
        Ok((record.date, due))
    }

    /// Writes the sample ledger through the normal write path. Returns the
    /// number of records created.
    pub async fn seed_sample(&self, days_back: i64) -> Result<usize, DbError> {
        let existing = self.store.query_records(&RecordFilter::default()).await?;
        if !existing.is_empty() {
            warn!(records = existing.len(), "Seeding into a non-empty ledger.");
        }

        let requests = sample_requests(self.today(), days_back);
        let total = requests.len();
        for request in requests {
            self.create_log(request).await?;
        }
        info!(records = total, days_back, "Sample ledger written.");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedgerStore;
    use core_types::{BoughtBy, RecordType};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    async fn ledger() -> Ledger {
        let ledger = Ledger::new(Arc::new(InMemoryLedgerStore::new())).with_clock(|| day(20));
        ledger
            .update_settings(Settings { base_fee: dec!(625), ..Settings::default() })
            .await
            .unwrap();
        ledger
    }

    #[tokio::test]
    async fn dashboard_reflects_created_logs() {
        let ledger = ledger().await;
        ledger.create_log(LogRequest::cook(day(1), "Dal", None)).await.unwrap();
        ledger
            .create_log(LogRequest::grocery(day(1), "Vegetables", dec!(750), BoughtBy::Staff))
            .await
            .unwrap();
        ledger
            .create_log(LogRequest::payment(day(2), dec!(380)).with_remarks("Tip"))
            .await
            .unwrap();

        let metrics = ledger.dashboard().await.unwrap();
        assert_eq!(metrics.amount_due, dec!(1375));
        assert_eq!(metrics.total_food_spend.all_time, dec!(1375));
        assert_eq!(metrics.stats.total_payments, 1);
    }

    #[tokio::test]
    async fn second_cook_gets_days_food_lasted() {
        let ledger = ledger().await;
        ledger.create_log(LogRequest::cook(day(1), "Dal", None)).await.unwrap();
        let second = ledger.create_log(LogRequest::cook(day(9), "Rice", None)).await.unwrap();

        let cook = second.as_cook().unwrap();
        assert_eq!(cook.days_food_lasted, Some(8));
        assert_eq!(cook.base_fee, Some(dec!(625)));
    }

    #[tokio::test]
    async fn amount_due_as_of_uses_the_record_date() {
        let ledger = ledger().await;
        let first = ledger.create_log(LogRequest::cook(day(1), "Dal", None)).await.unwrap();
        ledger.create_log(LogRequest::cook(day(5), "Rice", None)).await.unwrap();
        ledger.create_log(LogRequest::payment(day(6), dec!(1000))).await.unwrap();

        let (date, due) = ledger.amount_due_as_of(first.id).await.unwrap();
        assert_eq!(date, day(1));
        assert_eq!(due, dec!(625));
        assert_eq!(ledger.dashboard().await.unwrap().amount_due, dec!(250));
    }

    #[tokio::test]
    async fn invalid_requests_and_unknown_ids_surface_as_errors() {
        let ledger = ledger().await;
        let future = ledger.create_log(LogRequest::payment(day(21), dec!(10))).await;
        assert!(matches!(future, Err(DbError::Invalid(_))));

        let missing = Uuid::new_v4();
        assert!(matches!(ledger.get_log(missing).await, Err(DbError::NotFound)));
        assert!(matches!(ledger.delete_log(missing).await, Err(DbError::NotFound)));
        assert!(matches!(
            ledger.update_log(missing, LogRequest::payment(day(1), dec!(10))).await,
            Err(DbError::NotFound)
        ));
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let ledger = ledger().await;
        let created = ledger
            .create_log(LogRequest::grocery(day(3), "Milk", dec!(60), BoughtBy::Me))
            .await
            .unwrap();

        let updated = ledger
            .update_log(created.id, LogRequest::grocery(day(3), "Milk", dec!(60), BoughtBy::Staff))
            .await
            .unwrap();
        assert!(updated.as_grocery().unwrap().reimbursable);

        ledger.delete_log(created.id).await.unwrap();
        assert!(ledger.list_logs(&RecordFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn menu_only_update_keeps_the_fee_snapshot() {
        let ledger = ledger().await;
        let created = ledger.create_log(LogRequest::cook(day(1), "Dal", None)).await.unwrap();
        ledger
            .update_settings(Settings { base_fee: dec!(700), ..Settings::default() })
            .await
            .unwrap();

        let menu_only = LogRequest { menu: Some("Khichdi".to_string()), ..LogRequest::default() };
        let updated = ledger.update_log(created.id, menu_only).await.unwrap();
        let cook = updated.as_cook().unwrap();
        assert_eq!(cook.menu, "Khichdi");
        assert_eq!(cook.base_fee, Some(dec!(625)));
    }

    #[tokio::test]
    async fn oversized_amounts_are_rejected() {
        let ledger = ledger().await;
        let grocery = ledger
            .create_log(LogRequest::grocery(day(1), "Rice", Decimal::MAX, BoughtBy::Staff))
            .await;
        assert!(matches!(grocery, Err(DbError::Invalid(_))));

        let huge_fee = Settings { base_fee: Decimal::MAX, ..Settings::default() };
        assert!(matches!(ledger.update_settings(huge_fee).await, Err(DbError::Invalid(_))));
        assert_eq!(ledger.dashboard().await.unwrap().amount_due, Decimal::ZERO);
    }

    #[tokio::test]
    async fn invalid_settings_are_rejected_and_not_saved() {
        let ledger = ledger().await;
        let bad = Settings {
            baseline_daily_low: dec!(500),
            baseline_daily_high: dec!(400),
            ..Settings::default()
        };
        assert!(matches!(ledger.update_settings(bad).await, Err(DbError::Invalid(_))));
        assert_eq!(ledger.settings().await.unwrap().base_fee, dec!(625));
    }

    #[tokio::test]
    async fn seeding_writes_every_sample_request() {
        let ledger = ledger().await;
        let written = ledger.seed_sample(30).await.unwrap();
        let records = ledger.list_logs(&RecordFilter::default()).await.unwrap();
        assert_eq!(records.len(), written);

        let cooks = ledger
            .list_logs(&RecordFilter { record_type: Some(RecordType::Cook), ..RecordFilter::default() })
            .await
            .unwrap();
        let with_days = cooks
            .iter()
            .filter(|r| r.as_cook().is_some_and(|c| c.days_food_lasted.is_some()))
            .count();
        assert_eq!(with_days, cooks.len() - 1);
    }
}
