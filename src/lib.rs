//! # Fleet Financial Report
//!
//! A library for turning rental-fleet vehicle records into financial reports:
//! an income statement, a balance sheet, per-vehicle and per-category
//! breakdowns, and a trailing twelve-month trend series.
//!
//! ## Core Concepts
//!
//! - **Vehicle record**: one fleet asset with its bookings, maintenance records,
//!   insurance policies and timeline events
//! - **Financial statement**: summary metrics plus income statement, balance sheet
//!   and breakdowns, each derived independently from the records in scope
//! - **Monthly trend**: twelve months ending at the report period, with insurance
//!   premiums prorated to 1/12 per covered month
//! - **Stored totals**: `total_revenue` / `total_expenses` on each record are
//!   trusted as given; [`audit_record_totals`] reports where they drift
//!
//! ## Example
//!
//! ```rust,ignore
//! use fleet_financial_report::*;
//!
//! let fleet = load_fleet_file("fleet.json")?;
//! let config = ReportConfig::new("2024-03", ReportType::Monthly);
//!
//! let report = generate_fleet_report(&fleet, &config)?;
//! println!("{}", report.statement.to_markdown());
//! println!("{}", monthly_report_to_csv(&report.monthly));
//! ```

pub mod engine;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod reconciler;
pub mod report;
pub mod schema;
pub mod utils;

pub use engine::{percent_of, vehicle_depreciation, vehicle_expenses, ReportGenerator};
pub use error::{FleetReportError, Result};
pub use export::monthly_report_to_csv;
pub use ingestion::*;
pub use reconciler::{audit_record_totals, verify_statement, StatementReconciler, VerificationResult};
pub use report::*;
pub use schema::*;
pub use utils::*;

use log::{debug, info};

pub struct FleetReportProcessor;

impl FleetReportProcessor {
    pub fn process(vehicles: &[Vehicle], config: &ReportConfig) -> Result<FleetReport> {
        let generator = ReportGenerator::from_config(vehicles, config)?;

        info!(
            "Building {:?} fleet report for period {} ({} vehicles)",
            config.report_type,
            config.period,
            vehicles.len()
        );

        let statement = generator.generate_financial_statement(config.vehicle_id.as_deref());
        let monthly = generator.generate_monthly_report_for(config.vehicle_id.as_deref());

        let in_scope: Vec<Vehicle> = match config.vehicle_id.as_deref() {
            Some(id) => vehicles.iter().filter(|v| v.id == id).cloned().collect(),
            None => vehicles.to_vec(),
        };
        let audit = audit_record_totals(&in_scope, generator.as_of_year(), 0.01);
        if !audit.is_clean() {
            debug!(
                "{} vehicles carry stored expense totals that differ from their records",
                audit.warnings.len()
            );
        }

        Ok(FleetReport {
            statement,
            monthly,
            warnings: audit.warnings,
        })
    }

    pub fn process_with_verification(
        vehicles: &[Vehicle],
        config: &ReportConfig,
        tolerance: f64,
    ) -> Result<FleetReport> {
        let report = Self::process(vehicles, config)?;

        verify_statement(&report.statement, tolerance)?;

        Ok(report)
    }
}

pub fn generate_fleet_report(vehicles: &[Vehicle], config: &ReportConfig) -> Result<FleetReport> {
    FleetReportProcessor::process(vehicles, config)
}

pub fn generate_fleet_report_with_verification(
    vehicles: &[Vehicle],
    config: &ReportConfig,
    tolerance: f64,
) -> Result<FleetReport> {
    FleetReportProcessor::process_with_verification(vehicles, config, tolerance)
}
