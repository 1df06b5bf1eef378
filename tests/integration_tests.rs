use chrono::{Datelike, NaiveDate};
use fleet_financial_report::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn booking(id: &str, start: NaiveDate, amount: f64, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_string(),
        start_date: start,
        end_date: None,
        total_amount: amount,
        status,
    }
}

fn policy(id: &str, start: NaiveDate, end: NaiveDate, premium: f64) -> InsurancePolicy {
    InsurancePolicy {
        id: id.to_string(),
        start_date: start,
        end_date: end,
        premium,
        provider: Some("Acme Mutual".to_string()),
    }
}

fn maintenance(id: &str, on: NaiveDate, cost: f64) -> MaintenanceRecord {
    MaintenanceRecord {
        id: id.to_string(),
        date: on,
        cost,
        description: None,
    }
}

/// A mixed fleet of three vehicles with activity spread over 2023-2024.
fn mixed_fleet() -> Vec<Vehicle> {
    let mut sedan = Vehicle::new("sedan", "Toyota", "Camry", 2021);
    sedan.purchase_price = Some(28000.0);
    sedan.current_value = Some(21000.0);
    sedan.daily_rate = Some(60.0);
    sedan.depreciation_rate = Some(12.0);
    sedan.total_revenue = 9400.0;
    sedan.total_expenses = 4100.0;
    sedan.bookings = vec![
        booking("s-1", date(2024, 1, 5), 1800.0, BookingStatus::Completed),
        booking("s-2", date(2024, 4, 9), 2200.0, BookingStatus::Completed),
        booking("s-3", date(2024, 6, 1), 900.0, BookingStatus::Cancelled),
        booking("s-4", date(2024, 6, 21), 1300.0, BookingStatus::Active),
    ];
    sedan.maintenance_records = vec![
        maintenance("s-m1", date(2023, 9, 2), 320.0),
        maintenance("s-m2", date(2024, 4, 18), 610.0),
    ];
    sedan.insurance_policies = vec![policy("s-p1", date(2023, 7, 1), date(2024, 6, 30), 1440.0)];
    sedan.timeline_events = vec![TimelineEvent {
        id: "s-t1".to_string(),
        date: date(2024, 2, 11),
        event_type: TimelineEventType::Accident,
        title: "Rear bumper".to_string(),
        amount: Some(450.0),
    }];

    let mut van = Vehicle::new("van", "Ford", "Transit", 2019);
    van.purchase_price = Some(35000.0);
    van.current_value = Some(22000.0);
    van.daily_rate = Some(95.0);
    van.total_revenue = 12000.0;
    van.total_expenses = 7600.0;
    van.bookings = vec![
        booking("v-1", date(2024, 6, 3), 2850.0, BookingStatus::Completed),
        booking("v-2", date(2024, 6, 14), 1900.0, BookingStatus::Completed),
        booking("v-3", date(2024, 5, 30), 700.0, BookingStatus::Pending),
    ];
    van.insurance_policies = vec![
        policy("v-p1", date(2024, 1, 1), date(2024, 12, 31), 2400.0),
        policy("v-p2", date(2024, 6, 1), date(2024, 6, 30), 600.0),
    ];
    van.timeline_events = vec![
        TimelineEvent {
            id: "v-t1".to_string(),
            date: date(2024, 6, 3),
            event_type: TimelineEventType::Revenue,
            title: "Rental Booking".to_string(),
            amount: Some(2850.0),
        },
        TimelineEvent {
            id: "v-t2".to_string(),
            date: date(2024, 3, 3),
            event_type: TimelineEventType::Revenue,
            title: "Damage recovery".to_string(),
            amount: Some(300.0),
        },
    ];

    let mut compact = Vehicle::new("compact", "Fiat", "500", 2023);
    compact.daily_rate = None;
    compact.total_revenue = 0.0;
    compact.total_expenses = 250.0;

    vec![sedan, van, compact]
}

#[test]
fn test_net_profit_is_exact_difference() {
    let fleet = mixed_fleet();
    let generator = ReportGenerator::new(&fleet, "2024-06", ReportType::Monthly).unwrap();

    for scope in [None, Some("sedan"), Some("van"), Some("compact")] {
        let summary = generator.generate_financial_statement(scope).summary;
        assert_eq!(
            summary.net_profit,
            summary.total_revenue - summary.total_expenses
        );
    }

    let summary = generator.generate_financial_statement(None).summary;
    assert_eq!(summary.total_revenue, 21400.0);
    assert_eq!(summary.total_expenses, 11950.0);
    assert_eq!(summary.net_profit, 9450.0);
}

#[test]
fn test_empty_fleet_produces_zeros() {
    let fleet: Vec<Vehicle> = Vec::new();
    let generator = ReportGenerator::new(&fleet, "2024-06", ReportType::Annual).unwrap();
    let statement = generator.generate_financial_statement(None);

    let s = &statement.summary;
    for value in [
        s.total_revenue,
        s.total_expenses,
        s.net_profit,
        s.profit_margin,
        s.roi,
        s.utilization_rate,
        s.average_daily_rate,
    ] {
        assert_eq!(value, 0.0);
    }

    let i = &statement.income_statement;
    assert_eq!(i.revenue.total, 0.0);
    assert_eq!(i.expenses.total, 0.0);
    assert_eq!(i.net_income, 0.0);
    assert_eq!(statement.balance_sheet.accumulated_depreciation, 0.0);
    assert_eq!(statement.balance_sheet.total_assets, 0.0);
    assert!(statement.detailed_breakdown.by_vehicle.is_empty());
    assert!(statement.detailed_breakdown.by_category.is_empty());

    let monthly = generator.generate_monthly_report();
    assert_eq!(monthly.len(), 12);
    assert!(monthly
        .iter()
        .all(|m| m.revenue == 0.0 && m.expenses.total == 0.0 && m.utilization == 0.0));
}

#[test]
fn test_zero_purchase_price_gives_zero_roi() {
    let mut vehicle = Vehicle::new("z", "Tesla", "Model 3", 2024);
    vehicle.purchase_price = Some(0.0);
    vehicle.total_revenue = 1500.0;
    vehicle.total_expenses = 200.0;
    let fleet = vec![vehicle];

    let generator = ReportGenerator::new(&fleet, "2024-06", ReportType::Monthly).unwrap();
    let summary = generator.generate_financial_statement(None).summary;

    assert_eq!(summary.roi, 0.0);
    assert!(summary.roi.is_finite());
    assert!(summary.profit_margin.is_finite());
}

#[test]
fn test_monthly_report_shape() {
    let fleet = mixed_fleet();

    for (period, last_year, last_month) in [("2024-06", 2024, 6), ("2024-01", 2024, 1), ("2023", 2023, 12)] {
        for report_type in [ReportType::Monthly, ReportType::Annual] {
            let generator = ReportGenerator::new(&fleet, period, report_type).unwrap();
            let monthly = generator.generate_monthly_report();

            assert_eq!(monthly.len(), 12);
            assert!(monthly.windows(2).all(|w| w[0].month_start < w[1].month_start));

            let last = monthly.last().unwrap();
            assert_eq!(last.month_start.year(), last_year);
            assert_eq!(last.month_start.month(), last_month);
        }
    }
}

#[test]
fn test_monthly_insurance_is_prorated() {
    let fleet = mixed_fleet();
    let generator = ReportGenerator::new(&fleet, "2024-07", ReportType::Monthly).unwrap();
    let monthly = generator.generate_monthly_report();

    let by_label = |label: &str| {
        monthly
            .iter()
            .find(|m| m.month == label)
            .unwrap_or_else(|| panic!("missing month {}", label))
            .clone()
    };

    // Aug 2023: only the sedan policy.
    assert!((by_label("Aug 2023").expenses.insurance - 120.0).abs() < 1e-9);
    // Jan 2024: sedan + van annual.
    assert!((by_label("Jan 2024").expenses.insurance - 320.0).abs() < 1e-9);
    // Jun 2024: sedan + van annual + van June rider.
    assert!((by_label("Jun 2024").expenses.insurance - 370.0).abs() < 1e-9);
    // Jul 2024: sedan policy ended on Jun 30.
    assert!((by_label("Jul 2024").expenses.insurance - 200.0).abs() < 1e-9);

    // Statement level keeps full annual premiums.
    let statement = generator.generate_financial_statement(None);
    assert_eq!(statement.income_statement.expenses.insurance, 4440.0);
}

#[test]
fn test_monthly_revenue_bookings_and_utilization() {
    let fleet = mixed_fleet();
    let generator = ReportGenerator::new(&fleet, "2024-06", ReportType::Monthly).unwrap();
    let june = generator.generate_monthly_report().pop().unwrap();

    assert_eq!(june.month, "Jun 2024");
    // Only the van's two completed June bookings earn revenue.
    assert_eq!(june.revenue, 4750.0);
    assert_eq!(june.bookings, 4);
    assert!((june.utilization - 2.0 / 90.0 * 100.0).abs() < 1e-9);
    assert_eq!(june.expenses.fuel, 0.0);
    assert_eq!(june.expenses.depreciation, 0.0);
}

#[test]
fn test_category_percentages_sum_to_hundred() {
    let fleet = mixed_fleet();
    let generator = ReportGenerator::new(&fleet, "2024-06", ReportType::Monthly)
        .unwrap()
        .with_as_of_year(2024);

    for scope in [None, Some("sedan"), Some("van")] {
        let statement = generator.generate_financial_statement(scope);
        let categories = &statement.detailed_breakdown.by_category;
        assert!(statement.income_statement.expenses.total > 0.0);

        let total: f64 = categories.iter().map(|c| c.percentage).sum();
        assert!((total - 100.0).abs() < 1e-6, "{:?} summed to {}", scope, total);
    }

    let statement = generator.generate_financial_statement(Some("compact"));
    assert_eq!(statement.income_statement.expenses.total, 0.0);
    assert!(statement
        .detailed_breakdown
        .by_category
        .iter()
        .all(|c| c.percentage == 0.0));
}

#[test]
fn test_worked_example() -> anyhow::Result<()> {
    let mut vehicle = Vehicle::new("ex-1", "Nissan", "Leaf", 2022);
    vehicle.purchase_price = Some(20000.0);
    vehicle.current_value = Some(15000.0);
    vehicle.total_revenue = 5000.0;
    vehicle.total_expenses = 2000.0;
    vehicle.bookings = vec![booking("b", date(2024, 5, 10), 5000.0, BookingStatus::Completed)];
    vehicle.maintenance_records = vec![maintenance("m", date(2024, 5, 22), 500.0)];
    vehicle.insurance_policies = vec![policy("p", date(2024, 1, 1), date(2024, 12, 31), 1200.0)];
    let fleet = vec![vehicle];

    let generator = ReportGenerator::new(&fleet, "2024-05", ReportType::Monthly)?;
    let statement = generator.generate_financial_statement(None);

    assert_eq!(statement.summary.net_profit, 3000.0);
    assert!((statement.summary.profit_margin - 60.0).abs() < 1e-9);
    assert_eq!(statement.balance_sheet.accumulated_depreciation, 5000.0);

    let may = generator
        .generate_monthly_report()
        .pop()
        .ok_or_else(|| anyhow::anyhow!("empty monthly report"))?;
    assert_eq!(may.revenue, 5000.0);
    assert_eq!(may.expenses.maintenance, 500.0);
    assert!((may.expenses.insurance - 100.0).abs() < 1e-9);
    assert_eq!(may.bookings, 1);
    assert!((may.utilization - 100.0 / 30.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_unknown_vehicle_yields_empty_statement() {
    let fleet = mixed_fleet();
    let generator = ReportGenerator::new(&fleet, "2024-06", ReportType::Monthly).unwrap();
    let statement = generator.generate_financial_statement(Some("no-such-car"));

    assert_eq!(statement.summary, SummaryMetrics::default());
    assert!(statement.detailed_breakdown.by_vehicle.is_empty());
    assert!(statement.detailed_breakdown.by_category.is_empty());
    assert_eq!(statement.vehicle_id.as_deref(), Some("no-such-car"));
}

#[test]
fn test_statement_sections_reconcile() {
    let fleet = mixed_fleet();
    let mut config = ReportConfig::new("2024-06", ReportType::Annual);
    config.as_of_year = Some(2024);

    let report = generate_fleet_report_with_verification(&fleet, &config, 1e-6).unwrap();
    let income = &report.statement.income_statement;

    assert_eq!(income.revenue.rental_income, 1800.0 + 2200.0 + 2850.0 + 1900.0);
    assert_eq!(income.revenue.other_income, 300.0);
    assert_eq!(income.expenses.maintenance, 930.0);
    assert_eq!(income.expenses.other, 450.0);
    // Only the sedan has a depreciation rate: 28000 * 12% * 3 years.
    assert!((income.expenses.depreciation - 10080.0).abs() < 1e-9);

    let balance = &report.statement.balance_sheet;
    assert_eq!(balance.total_purchase_price, 63000.0);
    assert_eq!(balance.current_value, 43000.0);
    assert_eq!(balance.accumulated_depreciation, 20000.0);
}

#[test]
fn test_stored_totals_are_trusted_not_reconciled() {
    let fleet = mixed_fleet();
    let generator = ReportGenerator::new(&fleet, "2024-06", ReportType::Monthly)
        .unwrap()
        .with_as_of_year(2024);
    let statement = generator.generate_financial_statement(Some("sedan"));

    assert_eq!(statement.summary.total_expenses, 4100.0);
    assert_ne!(
        statement.summary.total_expenses,
        statement.income_statement.expenses.total
    );

    let audit = audit_record_totals(&fleet, 2024, 0.01);
    assert!(audit.warnings.iter().any(|w| w.contains("sedan")));
}

#[test]
fn test_exports_parse_as_csv() -> anyhow::Result<()> {
    let fleet = mixed_fleet();
    let config = ReportConfig::new("2024-06", ReportType::Monthly);
    let report = generate_fleet_report(&fleet, &config)?;

    let statement_csv = report.statement.to_csv();
    let mut reader = csv::Reader::from_reader(statement_csv.as_bytes());
    let headers = reader.headers()?.clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["Section", "Item", "Amount"]);
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        record[2].parse::<f64>()?;
        rows += 1;
    }
    assert!(rows > 20);

    let monthly_csv = monthly_report_to_csv(&report.monthly);
    let mut reader = csv::Reader::from_reader(monthly_csv.as_bytes());
    let months: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert_eq!(months.len(), 12);
    assert_eq!(&months[11][0], "Jun 2024");
    assert_eq!(&months[11][7], "4");

    Ok(())
}

#[test]
fn test_vehicle_labels_with_commas_stay_in_one_field() -> anyhow::Result<()> {
    let mut benz = Vehicle::new("v-9", "Mercedes, Benz", "C \"Estate\"", 2020);
    benz.total_revenue = 1200.0;
    benz.total_expenses = 200.0;
    let fleet = vec![benz];
    let config = ReportConfig::new("2024-06", ReportType::Monthly);
    let report = generate_fleet_report(&fleet, &config)?;

    let statement_csv = report.statement.to_csv();
    let mut reader = csv::Reader::from_reader(statement_csv.as_bytes());
    let records: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert!(records.iter().all(|r| r.len() == 3));

    let profit = records
        .iter()
        .find(|r| &r[0] == "Vehicle Profit")
        .expect("vehicle profit row");
    assert_eq!(&profit[1], "Mercedes, Benz C \"Estate\" (v-9)");
    assert_eq!(&profit[2], "1000.00");

    Ok(())
}

#[test]
fn test_json_round_trip_through_ingestion() -> anyhow::Result<()> {
    let fleet = mixed_fleet();
    let json = serde_json::to_string(&fleet)?;
    let parsed = parse_fleet_json(&json)?;

    let config = ReportConfig::new("2024-06", ReportType::Monthly);
    let original = generate_fleet_report(&fleet, &config)?;
    let reparsed = generate_fleet_report(&parsed, &config)?;

    assert_eq!(original.statement.summary, reparsed.statement.summary);
    assert_eq!(original.monthly, reparsed.monthly);

    let statement_json = original.statement.to_json()?;
    assert!(statement_json.contains("\"incomeStatement\""));
    assert!(statement_json.contains("\"accumulatedDepreciation\""));

    Ok(())
}
