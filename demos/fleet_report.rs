use fleet_financial_report::*;

const FLEET: &str = r#"{
  "vehicles": [
    {
      "id": "car-101", "make": "Toyota", "model": "Corolla", "year": 2022,
      "purchasePrice": 21000, "currentValue": 17500, "dailyRate": 48, "depreciationRate": 8,
      "totalRevenue": 6400, "totalExpenses": 2300,
      "bookings": [
        {"id": "b-1", "startDate": "2024-04-02", "endDate": "2024-04-09", "totalAmount": 380, "status": "completed"},
        {"id": "b-2", "startDate": "2024-05-15", "totalAmount": 520, "status": "completed"},
        {"id": "b-3", "startDate": "2024-06-01", "totalAmount": 260, "status": "cancelled"}
      ],
      "maintenanceRecords": [{"id": "m-1", "date": "2024-05-20", "cost": 180, "description": "Brake pads"}],
      "insurancePolicies": [{"id": "p-1", "startDate": "2024-01-01", "endDate": "2024-12-31", "premium": 1320}],
      "timelineEvents": [
        {"id": "t-1", "date": "2024-05-15", "type": "revenue", "title": "Rental Booking", "amount": 520},
        {"id": "t-2", "date": "2024-06-04", "type": "inspection", "title": "Annual inspection", "amount": 65}
      ]
    },
    {
      "id": "car-202", "make": "Ford", "model": "Transit", "year": 2020,
      "purchasePrice": 36000, "currentValue": 24000, "dailyRate": 110,
      "totalRevenue": 14800, "totalExpenses": 5200,
      "bookings": [
        {"id": "b-4", "startDate": "2024-06-10", "totalAmount": 1650, "status": "completed"},
        {"id": "b-5", "startDate": "2024-06-24", "totalAmount": 990, "status": "active"}
      ]
    }
  ]
}"#;

fn main() {
    println!("🚗 Fleet Financial Report Demo\n");

    let fleet = match parse_fleet_json(FLEET) {
        Ok(fleet) => fleet,
        Err(e) => {
            eprintln!("❌ Could not parse fleet: {}", e);
            return;
        }
    };

    let mut config = ReportConfig::new("2024-06", ReportType::Monthly);
    config.as_of_year = Some(2024);

    match generate_fleet_report_with_verification(&fleet, &config, 0.01) {
        Ok(report) => {
            println!("{}", report.statement.to_markdown());

            println!("📈 Trailing 12 months:\n");
            println!("{}", monthly_report_to_csv(&report.monthly));

            let audit = audit_record_totals(&fleet, 2024, 0.01);
            if audit.is_clean() {
                println!("✅ Stored vehicle totals match their records");
            } else {
                println!("⚠️  Stored totals that differ from the records:");
                for warning in audit.warnings {
                    println!("  - {}", warning);
                }
            }
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
        }
    }
}
