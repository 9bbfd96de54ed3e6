//! Closing command - land transfer tax and closing cost breakdown

use super::{format_money, format_percent, load_tax_schedule};
use clap::Args;
use homecalc::calc::{compute_closing_costs_with, ClosingCostInputs, ClosingCosts};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ClosingCommand {
    /// Purchase price
    #[arg(short, long)]
    price: Decimal,

    /// Buyer qualifies for the first-time buyer rebate
    #[arg(short, long)]
    first_time_buyer: bool,

    /// Legal fees
    #[arg(long, default_value = "1500")]
    legal: Decimal,

    /// Title insurance
    #[arg(long, default_value = "300")]
    title: Decimal,

    /// Home inspection
    #[arg(long, default_value = "500")]
    inspection: Decimal,

    /// Moving costs
    #[arg(long, default_value = "2000")]
    moving: Decimal,

    /// Property tax and utility adjustments
    #[arg(long, default_value = "1000")]
    adjustments: Decimal,

    /// JSON file with the land transfer tax brackets (default: built-in Ontario schedule)
    #[arg(short, long)]
    tax_schedule: Option<PathBuf>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled)]
struct CostRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Serialize)]
struct ClosingOutput<'a> {
    home_price: Decimal,
    first_time_buyer: bool,
    tax_schedule: &'a str,
    #[serde(flatten)]
    costs: &'a ClosingCosts,
}

impl ClosingCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schedule = load_tax_schedule(self.tax_schedule.as_ref())?;
        let inputs = ClosingCostInputs {
            home_price: self.price,
            first_time_buyer: self.first_time_buyer,
            legal_fees: self.legal,
            title_insurance: self.title,
            home_inspection: self.inspection,
            moving_costs: self.moving,
            adjustments: self.adjustments,
        };
        let costs = compute_closing_costs_with(&schedule, &inputs)?;

        if self.json {
            let output = ClosingOutput {
                home_price: self.price,
                first_time_buyer: self.first_time_buyer,
                tax_schedule: schedule.name(),
                costs: &costs,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_costs(&costs, schedule.name());
        }
        Ok(())
    }

    fn print_costs(&self, costs: &ClosingCosts, schedule_name: &str) {
        println!();
        println!(
            "CLOSING COSTS - {} ({}{})",
            format_money(self.price),
            schedule_name,
            if self.first_time_buyer {
                ", first-time buyer"
            } else {
                ""
            }
        );
        println!();

        let mut rows: Vec<CostRow> = costs
            .line_items
            .iter()
            .map(|item| CostRow {
                item: item.label.to_string(),
                amount: format_money(item.amount),
            })
            .collect();
        rows.push(CostRow {
            item: "Total".to_string(),
            amount: format_money(costs.total_closing_costs),
        });

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        println!(
            "  {} of the purchase price",
            format_percent(costs.percent_of_price)
        );
        println!();
    }
}
