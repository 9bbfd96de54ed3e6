//! Afford command - maximum purchase price under the GDS/TDS ratios

use super::format_money;
use clap::Args;
use homecalc::calc::{compute_affordability, Affordability, AffordabilityInputs};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct AffordCommand {
    /// Gross annual household income
    #[arg(short, long)]
    income: Decimal,

    /// Existing monthly debt payments (car, cards, loans)
    #[arg(long, default_value = "0")]
    debt: Decimal,

    /// Down payment available
    #[arg(short, long, default_value = "0")]
    down: Decimal,

    /// Annual interest rate as a percentage (e.g. 4.5)
    #[arg(short, long)]
    rate: Decimal,

    /// Amortization period in years
    #[arg(short, long, default_value_t = 25)]
    years: u32,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct AffordabilityOutput<'a> {
    gross_annual_income: Decimal,
    monthly_debt: Decimal,
    down_payment: Decimal,
    #[serde(flatten)]
    result: &'a Affordability,
}

impl AffordCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let result = compute_affordability(&AffordabilityInputs {
            gross_annual_income: self.income,
            monthly_debt: self.debt,
            down_payment: self.down,
            annual_rate_percent: self.rate,
            term_years: self.years,
        })?;

        if self.json {
            let output = AffordabilityOutput {
                gross_annual_income: self.income,
                monthly_debt: self.debt,
                down_payment: self.down,
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_result(&result);
        }
        Ok(())
    }

    fn print_result(&self, result: &Affordability) {
        println!();
        println!("AFFORDABILITY");
        println!();
        println!(
            "  Income: {} / year | Debts: {} / month | Down: {}",
            format_money(self.income),
            format_money(self.debt),
            format_money(self.down)
        );
        println!(
            "  GDS limit: {} | TDS limit: {} | Limited by {}",
            format_money(result.gds_limit),
            format_money(result.tds_limit),
            result.limiting_ratio
        );
        println!(
            "  Max monthly payment: {}",
            format_money(result.monthly_mortgage_payment)
        );
        println!("  Max mortgage: {}", format_money(result.max_loan));
        println!("  Affordable price: {}", format_money(result.affordable_price));
        if !result.is_affordable() {
            println!();
            println!("  Existing debt leaves no room for a mortgage payment.");
        }
        println!();
    }
}
