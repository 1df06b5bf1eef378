use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timeline title the booking flow stamps on its own revenue events. Those
/// events duplicate booking income and never count as other income.
pub const RENTAL_BOOKING_TITLE: &str = "Rental Booking";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[schemars(description = "Requested but not yet confirmed or started")]
    Pending,

    #[schemars(description = "The vehicle is currently out on this booking")]
    Active,

    #[schemars(description = "Finished and paid; the only status that earns revenue")]
    Completed,

    #[schemars(description = "Cancelled before completion")]
    Cancelled,
}

/// Kind of a timeline event. Strings outside the known set deserialize to
/// `Unknown` instead of failing the whole fleet payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimelineEventType {
    Maintenance,
    Insurance,
    Accident,
    Inspection,
    Revenue,
    Repair,
    Registration,
    Other,
    Unknown(String),
}

impl TimelineEventType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Insurance => "insurance",
            Self::Accident => "accident",
            Self::Inspection => "inspection",
            Self::Revenue => "revenue",
            Self::Repair => "repair",
            Self::Registration => "registration",
            Self::Other => "other",
            Self::Unknown(raw) => raw,
        }
    }

    /// Event kinds whose amounts land in the "other" expense category.
    pub fn is_other_expense(&self) -> bool {
        matches!(self, Self::Accident | Self::Inspection | Self::Other)
    }
}

impl From<String> for TimelineEventType {
    fn from(raw: String) -> Self {
        match raw.to_lowercase().as_str() {
            "maintenance" => Self::Maintenance,
            "insurance" => Self::Insurance,
            "accident" => Self::Accident,
            "inspection" => Self::Inspection,
            "revenue" => Self::Revenue,
            "repair" => Self::Repair,
            "registration" => Self::Registration,
            "other" => Self::Other,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<TimelineEventType> for String {
    fn from(kind: TimelineEventType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TimelineEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,

    #[schemars(description = "Date the rental starts; decides which month the booking belongs to")]
    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    pub total_amount: f64,

    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub date: NaiveDate,
    pub cost: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[schemars(description = "Annual premium. Monthly trend reports spread it as premium / 12 over covered months.")]
    pub premium: f64,

    #[serde(default)]
    pub provider: Option<String>,
}

impl InsurancePolicy {
    /// Inclusive on both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub date: NaiveDate,

    #[serde(rename = "type")]
    #[schemars(
        with = "String",
        description = "maintenance, insurance, accident, inspection, revenue, repair, registration or other"
    )]
    pub event_type: TimelineEventType,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub amount: Option<f64>,
}

impl TimelineEvent {
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Revenue recorded outside the booking flow.
    pub fn is_other_income(&self) -> bool {
        self.event_type == TimelineEventType::Revenue && self.title != RENTAL_BOOKING_TITLE
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,

    #[schemars(description = "Model year, used as the start of the depreciation age")]
    pub year: i32,

    #[serde(default)]
    pub purchase_price: Option<f64>,

    #[serde(default)]
    pub current_value: Option<f64>,

    #[serde(default)]
    pub daily_rate: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Straight-line depreciation in percent of purchase price per year")]
    pub depreciation_rate: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Lifetime revenue as computed upstream. Trusted as-is.")]
    pub total_revenue: f64,

    #[serde(default)]
    #[schemars(description = "Lifetime expenses as computed upstream. Trusted as-is.")]
    pub total_expenses: f64,

    #[serde(default)]
    pub bookings: Vec<Booking>,

    #[serde(default)]
    pub maintenance_records: Vec<MaintenanceRecord>,

    #[serde(default)]
    pub insurance_policies: Vec<InsurancePolicy>,

    #[serde(default)]
    pub timeline_events: Vec<TimelineEvent>,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            make: make.into(),
            model: model.into(),
            year,
            purchase_price: None,
            current_value: None,
            daily_rate: None,
            depreciation_rate: None,
            total_revenue: 0.0,
            total_expenses: 0.0,
            bookings: Vec::new(),
            maintenance_records: Vec::new(),
            insurance_policies: Vec::new(),
            timeline_events: Vec::new(),
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Vec<Vehicle>)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Monthly,
    Annual,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    #[schemars(description = "Reporting period: 'YYYY-MM' for a month or 'YYYY' for a year")]
    pub period: String,

    #[serde(default)]
    pub report_type: ReportType,

    #[serde(default)]
    #[schemars(description = "Restrict the statement to one vehicle. Omit for the whole fleet.")]
    pub vehicle_id: Option<String>,

    #[serde(default)]
    #[schemars(description = "Year depreciation is measured up to. Defaults to the current year.")]
    pub as_of_year: Option<i32>,
}

impl ReportConfig {
    pub fn new(period: impl Into<String>, report_type: ReportType) -> Self {
        Self {
            period: period.into(),
            report_type,
            vehicle_id: None,
            as_of_year: None,
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportConfig)
    }
}
