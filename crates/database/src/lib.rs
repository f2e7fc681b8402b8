//! # Food Spend Database Crate
//!
//! This crate is the persistence and application-service layer. It is the
//! system's "permanent archive" of ledger records and the single settings
//! document.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All storage-specific logic lives here behind the
//!   `LedgerStore` trait. Callers never see SQL.
//! - **Asynchronous & Pooled:** All operations are asynchronous; the
//!   PostgreSQL store uses a connection pool (`PgPool`).
//! - **Write Path Ownership:** `Ledger` validates requests and fills in the
//!   derived fields (`daysFoodLasted`, `reimbursable`) before anything reaches
//!   a store.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: pool setup and schema migrations.
//! - `LedgerStore`: the storage contract, with `DbRepository` (PostgreSQL)
//!   and `InMemoryLedgerStore` implementations.
//! - `Ledger`: the service used by the web server and the CLI.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod drafts;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod repository;
pub mod seed;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use ledger::Ledger;
pub use memory::InMemoryLedgerStore;
pub use repository::DbRepository;
pub use store::LedgerStore;
