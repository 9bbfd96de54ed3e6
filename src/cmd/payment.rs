//! Payment command - monthly mortgage payment for a purchase

use super::format_money;
use clap::Args;
use homecalc::calc::{amortization_schedule, LoanInputs};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct PaymentCommand {
    /// Purchase price (or loan amount when no down payment is given)
    #[arg(short, long)]
    price: Decimal,

    /// Down payment
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
struct PaymentSummary {
    price: Decimal,
    down_payment: Decimal,
    loan_amount: Decimal,
    rate_percent: Decimal,
    term_years: u32,
    payments: usize,
    monthly_payment: Decimal,
    total_paid: Decimal,
    total_interest: Decimal,
}

impl PaymentCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if self.down > self.price {
            anyhow::bail!(
                "Down payment {} is larger than the price {}",
                format_money(self.down),
                format_money(self.price)
            );
        }

        let loan = LoanInputs::new(self.price - self.down, self.rate, self.years);
        let schedule = amortization_schedule(&loan, None)?;

        let summary = PaymentSummary {
            price: self.price,
            down_payment: self.down,
            loan_amount: loan.principal,
            rate_percent: self.rate,
            term_years: self.years,
            payments: schedule.entries.len(),
            monthly_payment: schedule.monthly_payment,
            total_paid: schedule.total_paid(),
            total_interest: schedule.total_interest(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }
        Ok(())
    }
}

fn print_summary(s: &PaymentSummary) {
    println!();
    println!("MORTGAGE PAYMENT");
    println!();
    println!(
        "  Price: {} | Down: {} | Loan: {}",
        format_money(s.price),
        format_money(s.down_payment),
        format_money(s.loan_amount)
    );
    println!(
        "  Rate: {}% over {} years ({} payments)",
        s.rate_percent.normalize(),
        s.term_years,
        s.payments
    );
    println!("  Monthly payment: {}", format_money(s.monthly_payment));
    println!(
        "  Total paid: {} | Total interest: {}",
        format_money(s.total_paid),
        format_money(s.total_interest)
    );
    println!();
}
