use crate::report::{FinancialStatement, MonthlyReportData};

/// Two-decimal rendering that never prints `-0.00`.
fn money(value: f64) -> String {
    format!("{:.2}", value + 0.0)
}

/// Quotes a CSV field when it holds a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl FinancialStatement {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("Section,Item,Amount\n");

        let summary = &self.summary;
        let rows = [
            ("Summary", "Total Revenue", summary.total_revenue),
            ("Summary", "Total Expenses", summary.total_expenses),
            ("Summary", "Net Profit", summary.net_profit),
            ("Summary", "Profit Margin (%)", summary.profit_margin),
            ("Summary", "ROI (%)", summary.roi),
            ("Summary", "Utilization Rate (%)", summary.utilization_rate),
            ("Summary", "Average Daily Rate", summary.average_daily_rate),
        ];
        for (section, item, amount) in rows {
            output.push_str(&format!("{},{},{}\n", section, item, money(amount)));
        }

        let revenue = &self.income_statement.revenue;
        output.push_str(&format!("Revenue,Rental Income,{}\n", money(revenue.rental_income)));
        output.push_str(&format!("Revenue,Other Income,{}\n", money(revenue.other_income)));
        output.push_str(&format!("Revenue,Total,{}\n", money(revenue.total)));

        let expenses = &self.income_statement.expenses;
        for (category, amount) in expenses.categories() {
            output.push_str(&format!("Expenses,{},{}\n", category, money(amount)));
        }
        output.push_str(&format!("Expenses,Total,{}\n", money(expenses.total)));
        output.push_str(&format!(
            "Income Statement,Net Income,{}\n",
            money(self.income_statement.net_income)
        ));

        let balance = &self.balance_sheet;
        output.push_str(&format!(
            "Balance Sheet,Total Purchase Price,{}\n",
            money(balance.total_purchase_price)
        ));
        output.push_str(&format!("Balance Sheet,Current Value,{}\n", money(balance.current_value)));
        output.push_str(&format!(
            "Balance Sheet,Accumulated Depreciation,{}\n",
            money(balance.accumulated_depreciation)
        ));
        output.push_str(&format!("Balance Sheet,Total Assets,{}\n", money(balance.total_assets)));

        for vehicle in &self.detailed_breakdown.by_vehicle {
            let label = format!("{} {} ({})", vehicle.make, vehicle.model, vehicle.id);
            output.push_str(&format!(
                "Vehicle Profit,{},{}\n",
                csv_field(&label),
                money(vehicle.profit)
            ));
        }

        output
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Financial Statement - {}\n\n", self.period));
        output.push_str(&format!(
            "**Period:** {} to {}\n\n",
            self.period_start, self.period_end
        ));
        if let Some(id) = &self.vehicle_id {
            output.push_str(&format!("**Vehicle:** {}\n\n", id));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("- Total Revenue: {}\n", money(self.summary.total_revenue)));
        output.push_str(&format!("- Total Expenses: {}\n", money(self.summary.total_expenses)));
        output.push_str(&format!("- Net Profit: {}\n", money(self.summary.net_profit)));
        output.push_str(&format!("- Profit Margin: {}%\n", money(self.summary.profit_margin)));
        output.push_str(&format!("- ROI: {}%\n", money(self.summary.roi)));
        output.push_str(&format!(
            "- Utilization Rate: {}%\n",
            money(self.summary.utilization_rate)
        ));
        output.push_str(&format!(
            "- Average Daily Rate: {}\n\n",
            money(self.summary.average_daily_rate)
        ));

        output.push_str("## Income Statement\n\n");
        output.push_str("| Item | Amount |\n|---|---:|\n");
        let revenue = &self.income_statement.revenue;
        output.push_str(&format!("| Rental Income | {} |\n", money(revenue.rental_income)));
        output.push_str(&format!("| Other Income | {} |\n", money(revenue.other_income)));
        output.push_str(&format!("| **Total Revenue** | {} |\n", money(revenue.total)));
        for (category, amount) in self.income_statement.expenses.categories() {
            output.push_str(&format!("| {} | {} |\n", category, money(amount)));
        }
        output.push_str(&format!(
            "| **Total Expenses** | {} |\n",
            money(self.income_statement.expenses.total)
        ));
        output.push_str(&format!(
            "| **Net Income** | {} |\n\n",
            money(self.income_statement.net_income)
        ));

        output.push_str("## Balance Sheet\n\n");
        output.push_str(&format!(
            "- Total Purchase Price: {}\n",
            money(self.balance_sheet.total_purchase_price)
        ));
        output.push_str(&format!(
            "- Current Value: {}\n",
            money(self.balance_sheet.current_value)
        ));
        output.push_str(&format!(
            "- Accumulated Depreciation: {}\n\n",
            money(self.balance_sheet.accumulated_depreciation)
        ));

        if !self.detailed_breakdown.by_vehicle.is_empty() {
            output.push_str("## By Vehicle\n\n");
            output.push_str("| Vehicle | Revenue | Expenses | Profit |\n|---|---:|---:|---:|\n");
            for v in &self.detailed_breakdown.by_vehicle {
                output.push_str(&format!(
                    "| {} {} ({}) | {} | {} | {} |\n",
                    v.make,
                    v.model,
                    v.id,
                    money(v.revenue),
                    money(v.expenses),
                    money(v.profit)
                ));
            }
            output.push('\n');
        }

        if !self.detailed_breakdown.by_category.is_empty() {
            output.push_str("## By Category\n\n");
            for c in &self.detailed_breakdown.by_category {
                output.push_str(&format!(
                    "- {}: {} ({}%)\n",
                    c.category,
                    money(c.amount),
                    money(c.percentage)
                ));
            }
            output.push('\n');
        }

        output
    }
}

pub fn monthly_report_to_csv(months: &[MonthlyReportData]) -> String {
    let mut output = String::new();
    output.push_str(
        "Month,Revenue,Maintenance,Insurance,Fuel,Other,Total Expenses,Bookings,Utilization\n",
    );

    for m in months {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            m.month,
            money(m.revenue),
            money(m.expenses.maintenance),
            money(m.expenses.insurance),
            money(m.expenses.fuel),
            money(m.expenses.other),
            money(m.expenses.total),
            m.bookings,
            money(m.utilization)
        ));
    }

    output
}
