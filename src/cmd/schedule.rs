//! Schedule command - month-by-month (or yearly) amortization table

use super::format_money;
use chrono::NaiveDate;
use clap::Args;
use homecalc::calc::{amortization_schedule, AmortizationSchedule, LoanInputs};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ScheduleCommand {
    /// Amount borrowed
    #[arg(short, long)]
    principal: Decimal,

    /// Annual interest rate as a percentage (e.g. 4.5)
    #[arg(short, long)]
    rate: Decimal,

    /// Amortization period in years
    #[arg(short, long, default_value_t = 25)]
    years: u32,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Roll payments up per year
    #[arg(long)]
    yearly: bool,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct MonthRow {
    #[tabled(rename = "#")]
    period: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Payments")]
    payments: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl ScheduleCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let loan = LoanInputs::new(self.principal, self.rate, self.years);
        let schedule = amortization_schedule(&loan, self.start)?;

        if self.yearly {
            let rows = year_rows(&schedule, self.csv)?;
            self.output(rows, &schedule)
        } else {
            let rows = month_rows(&schedule, self.csv);
            self.output(rows, &schedule)
        }
    }

    fn output<R>(&self, rows: Vec<R>, schedule: &AmortizationSchedule) -> anyhow::Result<()>
    where
        R: Tabled + Serialize,
    {
        if self.csv {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
            return Ok(());
        }

        println!();
        println!(
            "AMORTIZATION SCHEDULE - {} at {}% over {} years",
            format_money(self.principal),
            self.rate.normalize(),
            self.years
        );
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        println!(
            "  Monthly payment: {} | Total paid: {} | Total interest: {}",
            format_money(schedule.monthly_payment),
            format_money(schedule.total_paid()),
            format_money(schedule.total_interest())
        );
        println!();
        Ok(())
    }
}

/// Plain numbers for CSV, currency formatted for the table
fn amount(value: Decimal, raw: bool) -> String {
    if raw {
        format!("{:.2}", value)
    } else {
        format_money(value)
    }
}

fn month_rows(schedule: &AmortizationSchedule, raw: bool) -> Vec<MonthRow> {
    schedule
        .entries
        .iter()
        .map(|e| MonthRow {
            period: e.period,
            date: e
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            payment: amount(e.payment, raw),
            interest: amount(e.interest, raw),
            principal: amount(e.principal, raw),
            balance: amount(e.balance, raw),
        })
        .collect()
}

fn year_rows(schedule: &AmortizationSchedule, raw: bool) -> anyhow::Result<Vec<YearRow>> {
    Ok(schedule
        .yearly()?
        .into_iter()
        .map(|y| YearRow {
            year: y.year,
            payments: amount(y.payments, raw),
            interest: amount(y.interest, raw),
            principal: amount(y.principal, raw),
            balance: amount(y.closing_balance, raw),
        })
        .collect())
}
