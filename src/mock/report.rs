use chrono::{Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::models::{Category, ReportRecord};

/// Bounds on the synthesized row count.
const MIN_ROWS: usize = 50;
const MAX_ROWS: usize = 1000;

/// Round to two decimal places, the precision of the money fields.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate synthetic report rows for the period.
///
/// Shape is deterministic, content is randomized: each call draws a row count
/// in the 500-999 band (clamped to [50, 1000]), prices in [100, 10100), costs
/// in [50, 8050), quantities in [1, 1000] and dates uniformly inside the
/// requested range. Profit and profitability are computed per row.
///
/// Callers that need reproducible output pass a seeded RNG; the API client
/// uses `thread_rng`.
pub fn generate_rows(
    start: NaiveDate,
    end: NaiveDate,
    organization_id: Uuid,
    organization_name: &str,
    rng: &mut impl Rng,
) -> Vec<ReportRecord> {
    let span_days = (end - start).num_days().max(0);
    let count = (500 + rng.gen_range(0..500)).clamp(MIN_ROWS, MAX_ROWS);
    let stamp = Utc::now().timestamp_millis();

    (0..count)
        .map(|i| {
            let price = round2(rng.gen_range(100.0..10_100.0));
            let cost = round2(rng.gen_range(50.0..8_050.0));
            let profit = round2(price - cost);
            let profitability = round2(profit / cost * 100.0);

            ReportRecord {
                id: format!("{}-{}-{}", organization_id, i + 1, stamp),
                product_id: format!("PRD-{:06}", i + 1),
                name: format!("Product {}", i + 1),
                category: *Category::ALL.choose(rng).unwrap_or(&Category::Electronics),
                quantity: rng.gen_range(1..=1000),
                price,
                cost,
                profit,
                profitability,
                date: start + Duration::days(rng.gen_range(0..=span_days)),
                organization: organization_name.to_string(),
                organization_id,
            }
        })
        .collect()
}
