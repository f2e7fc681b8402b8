use crate::error::DbError;
use crate::store::LedgerStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{Record, RecordDraft, RecordFilter, RecordKind, Settings};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder, Row};
use uuid::Uuid;

/// Fixed key of the single row in `app_settings`.
const SETTINGS_DOC_ID: &str = "app_settings";

const RECORD_COLUMNS: &str =
    "id, record_type, record_date, notes, details, created_at, updated_at";

/// The `DbRepository` is the PostgreSQL implementation of [`LedgerStore`].
/// It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Represents a row from the `app_settings` table.
#[derive(Debug, Clone, FromRow)]
struct DbSettings {
    base_fee: Decimal,
    baseline_daily_low: Decimal,
    baseline_daily_high: Decimal,
    baseline_daily_avg: Decimal,
    tracking_start_date: Option<NaiveDate>,
}

impl From<DbSettings> for Settings {
    fn from(row: DbSettings) -> Self {
        Settings {
            base_fee: row.base_fee,
            baseline_daily_low: row.baseline_daily_low,
            baseline_daily_high: row.baseline_daily_high,
            baseline_daily_avg: row.baseline_daily_avg,
            tracking_start_date: row.tracking_start_date,
        }
    }
}

fn record_from_row(row: &PgRow) -> Result<Record, DbError> {
    let Json(kind): Json<RecordKind> = row.try_get("details")?;
    Ok(Record {
        id: row.try_get("id")?,
        date: row.try_get("record_date")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        kind,
    })
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for DbRepository {
    async fn insert_record(&self, draft: RecordDraft) -> Result<Record, DbError> {
        let now: DateTime<Utc> = Utc::now();
        let record = draft.into_record(Uuid::new_v4(), now, now);

        sqlx::query(
            r#"
            INSERT INTO ledger_records (id, record_type, record_date, notes, details, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(record.record_type().as_str())
        .bind(record.date)
        .bind(record.notes.as_deref())
        .bind(Json(&record.kind))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update_record(&self, id: Uuid, draft: RecordDraft) -> Result<Record, DbError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE ledger_records
            SET record_type = $1, record_date = $2, notes = $3, details = $4, updated_at = $5
            WHERE id = $6
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(draft.kind.record_type().as_str())
        .bind(draft.date)
        .bind(draft.notes.as_deref())
        .bind(Json(&draft.kind))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        record_from_row(&row)
    }

    async fn delete_record(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM ledger_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn get_record(&self, id: Uuid) -> Result<Record, DbError> {
        let row = sqlx::query(&format!("SELECT {RECORD_COLUMNS} FROM ledger_records WHERE id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;
        record_from_row(&row)
    }

    async fn query_records(&self, filter: &RecordFilter) -> Result<Vec<Record>, DbError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM ledger_records WHERE TRUE"));

        if let Some(record_type) = filter.record_type {
            query.push(" AND record_type = ").push_bind(record_type.as_str());
        }
        if let Some(from) = filter.from {
            query.push(" AND record_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            query.push(" AND record_date <= ").push_bind(to);
        }
        query.push(" ORDER BY record_date DESC, created_at DESC");

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn get_settings(&self) -> Result<Option<Settings>, DbError> {
        let row = sqlx::query_as::<_, DbSettings>(
            r#"
            SELECT base_fee, baseline_daily_low, baseline_daily_high, baseline_daily_avg, tracking_start_date
            FROM app_settings
            WHERE id = $1
            "#,
        )
        .bind(SETTINGS_DOC_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Settings::from))
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO app_settings (id, base_fee, baseline_daily_low, baseline_daily_high, baseline_daily_avg, tracking_start_date, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                base_fee = EXCLUDED.base_fee,
                baseline_daily_low = EXCLUDED.baseline_daily_low,
                baseline_daily_high = EXCLUDED.baseline_daily_high,
                baseline_daily_avg = EXCLUDED.baseline_daily_avg,
                tracking_start_date = EXCLUDED.tracking_start_date,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(SETTINGS_DOC_ID)
        .bind(settings.base_fee)
        .bind(settings.baseline_daily_low)
        .bind(settings.baseline_daily_high)
        .bind(settings.baseline_daily_avg)
        .bind(settings.tracking_start_date)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
