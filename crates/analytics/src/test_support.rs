use chrono::{NaiveDate, TimeZone, Utc};
use core_types::{BoughtBy, CookLog, GroceryLog, PaymentLog, Record, RecordKind, Settings};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn settings_with_fee(base_fee: Decimal) -> Settings {
    Settings { base_fee, ..Settings::default() }
}

fn record(date: NaiveDate, notes: Option<&str>, kind: RecordKind) -> Record {
    let created = Utc.from_utc_datetime(&date.and_hms_opt(10, 0, 0).unwrap());
    Record {
        id: Uuid::new_v4(),
        date,
        notes: notes.map(str::to_string),
        created_at: created,
        updated_at: created,
        kind,
    }
}

pub fn cook(date: NaiveDate, base_fee: Option<Decimal>) -> Record {
    record(
        date,
        None,
        RecordKind::Cook(CookLog {
            menu: "Rice and curry".to_string(),
            base_fee,
            days_food_lasted: None,
        }),
    )
}

pub fn grocery(date: NaiveDate, amount: Decimal, bought_by: BoughtBy) -> Record {
    record(
        date,
        None,
        RecordKind::Grocery(GroceryLog {
            category: "Vegetables".to_string(),
            amount,
            bought_by,
            reimbursable: bought_by.is_reimbursable(),
            linked_cook_id: None,
        }),
    )
}

pub fn payment(date: NaiveDate, amount_paid: Decimal, remarks: Option<&str>) -> Record {
    record(
        date,
        None,
        RecordKind::Payment(PaymentLog {
            amount_paid,
            method: Some("Cash".to_string()),
            remarks: remarks.map(str::to_string),
            is_tip: None,
        }),
    )
}
