pub mod enums;
pub mod error;
pub mod requests;
pub mod settings;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{BoughtBy, RecordType};
pub use error::CoreError;
pub use requests::{LogRequest, RecordFilter};
pub use settings::Settings;
pub use structs::{
    CookLog, GroceryLog, MAX_AMOUNT, PaymentLog, Record, RecordDraft, RecordKind,
};
