use crate::engine::vehicle_expenses;
use crate::error::{FleetReportError, Result};
use crate::report::FinancialStatement;
use crate::schema::Vehicle;
use log::debug;

#[derive(Debug, Clone, Default)]
pub struct VerificationResult {
    pub warnings: Vec<String>,
}

impl VerificationResult {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Checks that the sections of a statement agree with each other.
pub struct StatementReconciler<'a> {
    statement: &'a FinancialStatement,
}

impl<'a> StatementReconciler<'a> {
    pub fn new(statement: &'a FinancialStatement) -> Self {
        Self { statement }
    }

    /// Fails on the first check whose two sides differ by more than `tolerance`.
    pub fn verify(&self, tolerance: f64) -> Result<()> {
        for (check, expected, actual) in self.checks() {
            if (expected - actual).abs() > tolerance {
                return Err(FleetReportError::ReconciliationViolation {
                    check: check.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn checks(&self) -> Vec<(&'static str, f64, f64)> {
        let s = self.statement;
        let summary = &s.summary;
        let revenue = &s.income_statement.revenue;
        let expenses = &s.income_statement.expenses;
        let balance = &s.balance_sheet;
        let breakdown = &s.detailed_breakdown;

        let category_amounts: f64 = breakdown.by_category.iter().map(|c| c.amount).sum();
        let category_percentages: f64 = breakdown.by_category.iter().map(|c| c.percentage).sum();
        let expected_percentages = if expenses.total > 0.0 { 100.0 } else { 0.0 };

        let vehicle_revenue: f64 = breakdown.by_vehicle.iter().map(|v| v.revenue).sum();
        let vehicle_expenses: f64 = breakdown.by_vehicle.iter().map(|v| v.expenses).sum();
        let vehicle_profit: f64 = breakdown.by_vehicle.iter().map(|v| v.profit).sum();

        vec![
            (
                "summary net profit",
                summary.total_revenue - summary.total_expenses,
                summary.net_profit,
            ),
            (
                "revenue total",
                revenue.rental_income + revenue.other_income,
                revenue.total,
            ),
            (
                "expense total",
                expenses.maintenance
                    + expenses.insurance
                    + expenses.fuel
                    + expenses.other
                    + expenses.depreciation,
                expenses.total,
            ),
            (
                "net income",
                revenue.total - expenses.total,
                s.income_statement.net_income,
            ),
            ("category amounts", expenses.total, category_amounts),
            ("category percentages", expected_percentages, category_percentages),
            (
                "accumulated depreciation",
                balance.total_purchase_price - balance.current_value,
                balance.accumulated_depreciation,
            ),
            ("vehicle profit", vehicle_revenue - vehicle_expenses, vehicle_profit),
            ("vehicle revenue", summary.total_revenue, vehicle_revenue),
        ]
    }
}

pub fn verify_statement(statement: &FinancialStatement, tolerance: f64) -> Result<()> {
    StatementReconciler::new(statement).verify(tolerance)
}

/// Compares each vehicle's stored `total_expenses` with the sum derived from
/// its records. Discrepancies are reported, never corrected.
pub fn audit_record_totals(
    vehicles: &[Vehicle],
    as_of_year: i32,
    tolerance: f64,
) -> VerificationResult {
    let mut result = VerificationResult::default();

    for vehicle in vehicles {
        let derived = vehicle_expenses(vehicle, as_of_year).total;
        let difference = vehicle.total_expenses - derived;

        if difference.abs() > tolerance {
            let warning = format!(
                "Vehicle {} ({} {}): stored total expenses {:.2} differ from derived {:.2} by {:.2}",
                vehicle.id, vehicle.make, vehicle.model, vehicle.total_expenses, derived, difference
            );
            debug!("{}", warning);
            result.warnings.push(warning);
        }
    }

    result
}
