//! Deterministic sample ledger used by the `seed` and `demo` commands.

use chrono::{Duration, NaiveDate};
use core_types::{BoughtBy, LogRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const SAMPLE_BASE_FEE: Decimal = dec!(500);
pub const DEFAULT_DAYS_BACK: i64 = 30;

const COOK_MENUS: [&str; 8] = [
    "Dal, Rice, Vegetables, Pickle",
    "Chicken Curry, Rice, Vegetables",
    "Mutton Curry, Rice, Salad",
    "Dal, Roti, Vegetables, Yogurt",
    "Fish Curry, Rice, Vegetables",
    "Dal, Rice, Saag, Pickle",
    "Chicken Biryani, Raita",
    "Dal, Rice, Mixed Vegetables",
];

/// Gaps between cook sessions, cycled.
const COOK_GAPS: [i64; 3] = [3, 2, 4];

/// (category, amount, bought by)
const GROCERIES: [(&str, Decimal, BoughtBy); 6] = [
    ("Meat", dec!(1150), BoughtBy::Staff),
    ("Veggies", dec!(340), BoughtBy::Staff),
    ("Saag", dec!(180), BoughtBy::Me),
    ("Spices", dec!(260), BoughtBy::Staff),
    ("Rice", dec!(450), BoughtBy::Me),
    ("Dal", dec!(300), BoughtBy::Staff),
];

const PAYMENT_METHODS: [&str; 4] = ["Cash", "Bank Transfer", "UPI", "Mobile Banking"];
const PAYMENT_INTERVAL_DAYS: i64 = 12;

/// Builds the sample requests for the `days_back` days ending at `today`,
/// oldest first so the write path derives `daysFoodLasted` in order.
pub fn sample_requests(today: NaiveDate, days_back: i64) -> Vec<LogRequest> {
    let start = today - Duration::days(days_back);
    let mut requests = Vec::new();

    let mut next_cook = start;
    let mut next_payment = start + Duration::days(PAYMENT_INTERVAL_DAYS - 1);
    let (mut cooks, mut groceries, mut payments) = (0usize, 0usize, 0usize);

    for offset in 0..=days_back {
        let date = start + Duration::days(offset);

        if date == next_cook {
            let mut request =
                LogRequest::cook(date, COOK_MENUS[cooks % COOK_MENUS.len()], Some(SAMPLE_BASE_FEE));
            if offset % 7 == 0 {
                request = request.with_notes("Extra portion prepared");
            }
            requests.push(request);
            next_cook = date + Duration::days(COOK_GAPS[cooks % COOK_GAPS.len()]);
            cooks += 1;
        }

        // Roughly two grocery runs a week.
        if offset % 3 == 1 {
            let (category, amount, bought_by) = GROCERIES[groceries % GROCERIES.len()];
            requests.push(LogRequest::grocery(date, category, amount, bought_by));
            groceries += 1;
        }

        if date == next_payment {
            let method = PAYMENT_METHODS[payments % PAYMENT_METHODS.len()];
            requests.push(
                LogRequest::payment(date, dec!(2500) + Decimal::from(payments as i64 * 250))
                    .with_method(method)
                    .with_remarks(format!("Payment for period ending {date}")),
            );
            next_payment = date + Duration::days(PAYMENT_INTERVAL_DAYS);
            payments += 1;
        }
    }

    requests.push(
        LogRequest::payment(today, dec!(200))
            .with_method("Cash")
            .with_remarks("Tip for festival meal"),
    );

    requests
}
