use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product categories used by report rows. The set is fixed; the remote API
/// and the mock generator both draw from these ten labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Category {
    Electronics,
    Clothing,
    Groceries,
    Furniture,
    Stationery,
    #[serde(rename = "Auto parts")]
    AutoParts,
    Cosmetics,
    Books,
    Toys,
    #[serde(rename = "Sporting goods")]
    SportingGoods,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Clothing,
        Category::Groceries,
        Category::Furniture,
        Category::Stationery,
        Category::AutoParts,
        Category::Cosmetics,
        Category::Books,
        Category::Toys,
        Category::SportingGoods,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Groceries => "Groceries",
            Category::Furniture => "Furniture",
            Category::Stationery => "Stationery",
            Category::AutoParts => "Auto parts",
            Category::Cosmetics => "Cosmetics",
            Category::Books => "Books",
            Category::Toys => "Toys",
            Category::SportingGoods => "Sporting goods",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line item of a computed report. Generated per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ReportRecord {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub price: f64,
    pub cost: f64,
    /// price − cost
    pub profit: f64,
    /// profit / cost × 100
    pub profitability: f64,
    pub date: NaiveDate,
    pub organization: String,
    pub organization_id: Uuid,
}

/// Raw period input from the report form. Both dates must be present and
/// ordered before a report can be calculated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ReportPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}

/// A validated, inclusive date range as echoed back in report metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Period {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Summary attached to every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ReportMeta {
    pub organization_id: Uuid,
    pub organization_name: String,
    pub period: Period,
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub total_profit: f64,
    pub average_profitability: f64,
}

/// A computed report: line items plus summary metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Report {
    pub data: Vec<ReportRecord>,
    pub meta: ReportMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_to_its_label() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn test_category_set_has_ten_distinct_labels() {
        let mut labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 10);
    }

    #[test]
    fn test_report_period_dates_use_iso_format() {
        let period = ReportPeriod::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json["startDate"], "2024-03-01");
        assert_eq!(json["endDate"], "2024-03-31");
    }
}
