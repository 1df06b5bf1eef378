use crate::error::Result;
use crate::report::*;
use crate::schema::*;
use crate::utils::{month_label, same_month, ReportPeriod};
use chrono::{Datelike, NaiveDate, Utc};
use log::debug;

/// Capacity baseline for monthly utilization: each vehicle counts as 30
/// bookable days regardless of the real month length.
pub const DAYS_PER_VEHICLE_MONTH: f64 = 30.0;

/// Derives financial statements and monthly trends from a fleet of vehicle
/// records.
///
/// The generator borrows the fleet and never mutates it. Period, report type
/// and depreciation year are fixed at construction; build a new generator to
/// change them.
pub struct ReportGenerator<'a> {
    vehicles: &'a [Vehicle],
    period_label: String,
    period: ReportPeriod,
    report_type: ReportType,
    as_of_year: i32,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(vehicles: &'a [Vehicle], period: &str, report_type: ReportType) -> Result<Self> {
        let parsed = ReportPeriod::parse(period)?;

        Ok(Self {
            vehicles,
            period_label: period.trim().to_string(),
            period: parsed,
            report_type,
            as_of_year: Utc::now().year(),
        })
    }

    pub fn from_config(vehicles: &'a [Vehicle], config: &ReportConfig) -> Result<Self> {
        let generator = Self::new(vehicles, &config.period, config.report_type)?;
        Ok(match config.as_of_year {
            Some(year) => generator.with_as_of_year(year),
            None => generator,
        })
    }

    /// Pins the year depreciation age is measured up to.
    pub fn with_as_of_year(mut self, year: i32) -> Self {
        self.as_of_year = year;
        self
    }

    pub fn period(&self) -> &ReportPeriod {
        &self.period
    }

    pub fn report_type(&self) -> ReportType {
        self.report_type
    }

    pub fn as_of_year(&self) -> i32 {
        self.as_of_year
    }

    pub fn generate_financial_statement(&self, vehicle_id: Option<&str>) -> FinancialStatement {
        let scoped = self.filter_vehicles(vehicle_id);
        debug!(
            "Generating {:?} statement for period {} over {} of {} vehicles",
            self.report_type,
            self.period_label,
            scoped.len(),
            self.vehicles.len()
        );

        let summary = self.calculate_summary(&scoped);
        let income_statement = self.calculate_income_statement(&scoped);
        let balance_sheet = self.calculate_balance_sheet(&scoped);
        let detailed_breakdown = self.calculate_detailed_breakdown(&scoped);

        FinancialStatement {
            period: self.period_label.clone(),
            report_type: self.report_type,
            vehicle_id: vehicle_id.map(str::to_string),
            period_start: self.period.start_date(),
            period_end: self.period.end_date(),
            generated_at: Utc::now(),
            summary,
            income_statement,
            balance_sheet,
            detailed_breakdown,
        }
    }

    /// Twelve trailing months for the whole fleet, oldest first.
    ///
    /// The window always ends at the period's month; `report_type` does not
    /// change its shape.
    pub fn generate_monthly_report(&self) -> Vec<MonthlyReportData> {
        self.generate_monthly_report_for(None)
    }

    pub fn generate_monthly_report_for(&self, vehicle_id: Option<&str>) -> Vec<MonthlyReportData> {
        let scoped = self.filter_vehicles(vehicle_id);
        debug!(
            "Generating trailing monthly report ending {} over {} vehicles",
            self.period_label,
            scoped.len()
        );

        self.period
            .trailing_month_starts()
            .into_iter()
            .map(|month_start| monthly_entry(&scoped, month_start))
            .collect()
    }

    fn filter_vehicles(&self, vehicle_id: Option<&str>) -> Vec<&'a Vehicle> {
        match vehicle_id {
            Some(id) => self.vehicles.iter().filter(|v| v.id == id).collect(),
            None => self.vehicles.iter().collect(),
        }
    }

    fn calculate_summary(&self, vehicles: &[&Vehicle]) -> SummaryMetrics {
        let total_revenue: f64 = vehicles.iter().map(|v| v.total_revenue).sum();
        let total_expenses: f64 = vehicles.iter().map(|v| v.total_expenses).sum();
        let net_profit = total_revenue - total_expenses;

        let total_investment: f64 = vehicles
            .iter()
            .map(|v| v.purchase_price.unwrap_or(0.0))
            .sum();

        let total_bookings: usize = vehicles.iter().map(|v| v.bookings.len()).sum();
        let completed_bookings = vehicles
            .iter()
            .flat_map(|v| v.bookings.iter())
            .filter(|b| b.status == BookingStatus::Completed)
            .count();

        let total_daily_rate: f64 = vehicles.iter().map(|v| v.daily_rate.unwrap_or(0.0)).sum();

        SummaryMetrics {
            total_revenue,
            total_expenses,
            net_profit,
            profit_margin: percent_of(net_profit, total_revenue),
            roi: percent_of(net_profit, total_investment),
            utilization_rate: percent_of(completed_bookings as f64, total_bookings as f64),
            average_daily_rate: if vehicles.is_empty() {
                0.0
            } else {
                total_daily_rate / vehicles.len() as f64
            },
        }
    }

    fn calculate_income_statement(&self, vehicles: &[&Vehicle]) -> IncomeStatement {
        let rental_income: f64 = vehicles
            .iter()
            .flat_map(|v| v.bookings.iter())
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.total_amount)
            .sum();

        let other_income: f64 = vehicles
            .iter()
            .flat_map(|v| v.timeline_events.iter())
            .filter(|e| e.is_other_income())
            .map(TimelineEvent::amount_or_zero)
            .sum();

        let revenue = RevenueBreakdown {
            rental_income,
            other_income,
            total: rental_income + other_income,
        };
        let expenses = self.calculate_expense_breakdown(vehicles);
        let net_income = revenue.total - expenses.total;

        IncomeStatement {
            revenue,
            expenses,
            net_income,
        }
    }

    fn calculate_expense_breakdown(&self, vehicles: &[&Vehicle]) -> ExpenseBreakdown {
        let mut maintenance = 0.0;
        let mut insurance = 0.0;
        let mut other = 0.0;
        let mut depreciation = 0.0;

        for vehicle in vehicles {
            let expenses = vehicle_expenses(vehicle, self.as_of_year);
            maintenance += expenses.maintenance;
            insurance += expenses.insurance;
            other += expenses.other;
            depreciation += expenses.depreciation;
        }

        ExpenseBreakdown::from_parts(maintenance, insurance, 0.0, other, depreciation)
    }

    fn calculate_balance_sheet(&self, vehicles: &[&Vehicle]) -> BalanceSheet {
        let total_purchase_price: f64 = vehicles
            .iter()
            .map(|v| v.purchase_price.unwrap_or(0.0))
            .sum();
        let current_value: f64 = vehicles
            .iter()
            .map(|v| v.current_value.unwrap_or(0.0))
            .sum();

        BalanceSheet {
            total_purchase_price,
            current_value,
            accumulated_depreciation: total_purchase_price - current_value,
            total_assets: current_value,
        }
    }

    fn calculate_detailed_breakdown(&self, vehicles: &[&Vehicle]) -> DetailedBreakdown {
        let by_vehicle = vehicles
            .iter()
            .map(|v| VehicleBreakdown {
                id: v.id.clone(),
                make: v.make.clone(),
                model: v.model.clone(),
                revenue: v.total_revenue,
                expenses: v.total_expenses,
                profit: v.total_revenue - v.total_expenses,
            })
            .collect();

        let expenses = self.calculate_expense_breakdown(vehicles);
        let by_category = expenses
            .categories()
            .into_iter()
            .filter(|(_, amount)| *amount != 0.0)
            .map(|(category, amount)| CategoryBreakdown {
                category: category.to_string(),
                amount,
                percentage: percent_of(amount, expenses.total),
            })
            .collect();

        DetailedBreakdown {
            by_vehicle,
            by_category,
        }
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Straight-line depreciation from the model year up to `as_of_year`.
pub fn vehicle_depreciation(vehicle: &Vehicle, as_of_year: i32) -> f64 {
    match (vehicle.purchase_price, vehicle.depreciation_rate) {
        (Some(price), Some(rate)) => {
            let age = (as_of_year - vehicle.year).max(0);
            price * rate / 100.0 * age as f64
        }
        _ => 0.0,
    }
}

/// Lifetime expenses of one vehicle derived from its records. Insurance counts
/// each policy's full annual premium.
pub fn vehicle_expenses(vehicle: &Vehicle, as_of_year: i32) -> ExpenseBreakdown {
    let maintenance: f64 = vehicle.maintenance_records.iter().map(|m| m.cost).sum();
    let insurance: f64 = vehicle.insurance_policies.iter().map(|p| p.premium).sum();
    let other: f64 = vehicle
        .timeline_events
        .iter()
        .filter(|e| e.event_type.is_other_expense())
        .map(TimelineEvent::amount_or_zero)
        .sum();
    let depreciation = vehicle_depreciation(vehicle, as_of_year);

    ExpenseBreakdown::from_parts(maintenance, insurance, 0.0, other, depreciation)
}

fn monthly_entry(vehicles: &[&Vehicle], month_start: NaiveDate) -> MonthlyReportData {
    let mut revenue = 0.0;
    let mut bookings = 0;
    let mut completed = 0;
    let mut maintenance = 0.0;
    let mut insurance = 0.0;
    let mut other = 0.0;

    for vehicle in vehicles {
        for booking in &vehicle.bookings {
            if !same_month(booking.start_date, month_start) {
                continue;
            }
            bookings += 1;
            if booking.status == BookingStatus::Completed {
                completed += 1;
                revenue += booking.total_amount;
            }
        }

        maintenance += vehicle
            .maintenance_records
            .iter()
            .filter(|m| same_month(m.date, month_start))
            .map(|m| m.cost)
            .sum::<f64>();

        insurance += vehicle
            .insurance_policies
            .iter()
            .filter(|p| p.covers(month_start))
            .map(|p| p.premium / 12.0)
            .sum::<f64>();

        other += vehicle
            .timeline_events
            .iter()
            .filter(|e| e.event_type != TimelineEventType::Revenue && same_month(e.date, month_start))
            .map(TimelineEvent::amount_or_zero)
            .sum::<f64>();
    }

    // Completed bookings stand in for booked days.
    let capacity_days = DAYS_PER_VEHICLE_MONTH * vehicles.len() as f64;

    MonthlyReportData {
        month: month_label(month_start),
        month_start,
        revenue,
        expenses: ExpenseBreakdown::from_parts(maintenance, insurance, 0.0, other, 0.0),
        bookings,
        utilization: percent_of(completed as f64, capacity_days),
    }
}
