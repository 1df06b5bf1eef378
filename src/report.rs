use crate::schema::ReportType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    /// Percent of revenue.
    pub profit_margin: f64,
    /// Percent of total purchase price.
    pub roi: f64,
    /// Percent of bookings that completed.
    pub utilization_rate: f64,
    pub average_daily_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub rental_income: f64,
    pub other_income: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub maintenance: f64,
    pub insurance: f64,
    pub fuel: f64,
    pub other: f64,
    pub depreciation: f64,
    pub total: f64,
}

impl ExpenseBreakdown {
    /// Builds a breakdown whose `total` is the sum of its parts.
    pub fn from_parts(
        maintenance: f64,
        insurance: f64,
        fuel: f64,
        other: f64,
        depreciation: f64,
    ) -> Self {
        Self {
            maintenance,
            insurance,
            fuel,
            other,
            depreciation,
            total: maintenance + insurance + fuel + other + depreciation,
        }
    }

    /// Category name and amount pairs in presentation order.
    pub fn categories(&self) -> [(&'static str, f64); 5] {
        [
            ("Maintenance", self.maintenance),
            ("Insurance", self.insurance),
            ("Fuel", self.fuel),
            ("Other", self.other),
            ("Depreciation", self.depreciation),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    pub revenue: RevenueBreakdown,
    pub expenses: ExpenseBreakdown,
    pub net_income: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub total_purchase_price: f64,
    pub current_value: f64,
    pub accumulated_depreciation: f64,
    pub total_assets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleBreakdown {
    pub id: String,
    pub make: String,
    pub model: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: f64,
    /// Share of the income statement's expense total, in percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedBreakdown {
    pub by_vehicle: Vec<VehicleBreakdown>,
    pub by_category: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    pub period: String,
    pub report_type: ReportType,
    pub vehicle_id: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryMetrics,
    pub income_statement: IncomeStatement,
    pub balance_sheet: BalanceSheet,
    pub detailed_breakdown: DetailedBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportData {
    /// e.g. "Mar 2024"
    pub month: String,
    pub month_start: NaiveDate,
    pub revenue: f64,
    pub expenses: ExpenseBreakdown,
    pub bookings: usize,
    pub utilization: f64,
}

/// A statement together with its trailing monthly trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    pub statement: FinancialStatement,
    pub monthly: Vec<MonthlyReportData>,
    /// Stored expense totals that drift from the records in scope.
    #[serde(default)]
    pub warnings: Vec<String>,
}
