//! Fixed-payment mortgage amortization, compounded monthly.

use super::error::{ensure_non_negative, ensure_term, CalcError, Result};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

/// Inputs for a single loan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanInputs {
    pub principal: Decimal,
    /// Nominal annual rate as a percentage, e.g. 4.5 for 4.5%
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
}

impl LoanInputs {
    pub fn new(principal: Decimal, annual_rate_percent: Decimal, term_years: u32) -> Self {
        LoanInputs {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_non_negative("principal", self.principal)?;
        ensure_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        ensure_term(self.term_years)
    }

    /// Rounded up to the next cent so that `n` payments always cover the
    /// principal.
    pub fn monthly_payment(&self) -> Result<Decimal> {
        self.validate()?;
        let r = monthly_rate(self.annual_rate_percent);
        let n = payment_count(self.term_years);
        let payment = if r.is_zero() {
            self.principal / Decimal::from(n)
        } else {
            let d = discount_factor(r, n);
            self.principal
                .checked_mul(r)
                .and_then(|interest| interest.checked_div(Decimal::ONE - d))
                .ok_or(CalcError::Overflow("monthly payment"))?
        };
        log::debug!(
            "Payment: principal={}, r={}, n={} => {}",
            self.principal,
            r,
            n,
            payment
        );
        Ok(payment.round_dp_with_strategy(2, RoundingStrategy::AwayFromZero))
    }
}

/// Monthly payment that fully amortizes `principal` over `term_years`.
///
/// A zero rate is repaid straight-line as `principal / n`.
pub fn compute_amortized_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
) -> Result<Decimal> {
    LoanInputs::new(principal, annual_rate_percent, term_years).monthly_payment()
}

/// Largest principal that `monthly_payment` can amortize: the inverse of
/// [`compute_amortized_payment`], rounded down to the cent.
pub fn compute_principal_for_payment(
    monthly_payment: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
) -> Result<Decimal> {
    ensure_non_negative("monthly_payment", monthly_payment)?;
    ensure_non_negative("annual_rate_percent", annual_rate_percent)?;
    ensure_term(term_years)?;

    let r = monthly_rate(annual_rate_percent);
    let n = payment_count(term_years);
    let principal = if r.is_zero() {
        monthly_payment.checked_mul(Decimal::from(n))
    } else {
        monthly_payment
            .checked_mul(Decimal::ONE - discount_factor(r, n))
            .and_then(|p| p.checked_div(r))
    }
    .ok_or(CalcError::Overflow("principal"))?;
    Ok(principal.round_dp_with_strategy(2, RoundingStrategy::ToZero))
}

pub(crate) fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / dec!(100) / dec!(12)
}

pub(crate) fn payment_count(term_years: u32) -> u64 {
    u64::from(term_years) * 12
}

/// `(1 + r)^-n`, which tends to zero once `(1 + r)^n` leaves the `Decimal` range
fn discount_factor(r: Decimal, n: u64) -> Decimal {
    (Decimal::ONE + r)
        .checked_powu(n)
        .and_then(|f| Decimal::ONE.checked_div(f))
        .unwrap_or(Decimal::ZERO)
}

/// A single monthly instalment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub period: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub balance: Decimal,
}

/// Instalments rolled up per year of the loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    /// Calendar year when the schedule has dates, otherwise loan year (1-based)
    pub year: i32,
    pub payments: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub closing_balance: Decimal,
}

#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    pub monthly_payment: Decimal,
    pub entries: Vec<ScheduleEntry>,
}

impl AmortizationSchedule {
    pub fn total_paid(&self) -> Decimal {
        self.entries.iter().map(|e| e.payment).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.entries.iter().map(|e| e.interest).sum()
    }

    pub fn yearly(&self) -> Result<Vec<YearSummary>> {
        let mut years: Vec<YearSummary> = Vec::new();
        for entry in &self.entries {
            let year = match entry.due_date {
                Some(date) => date.year(),
                None => i32::try_from((entry.period - 1) / 12 + 1)
                    .map_err(|_| CalcError::Overflow("loan year"))?,
            };
            match years.last_mut() {
                Some(summary) if summary.year == year => {
                    summary.payments += entry.payment;
                    summary.interest += entry.interest;
                    summary.principal += entry.principal;
                    summary.closing_balance = entry.balance;
                }
                _ => years.push(YearSummary {
                    year,
                    payments: entry.payment,
                    interest: entry.interest,
                    principal: entry.principal,
                    closing_balance: entry.balance,
                }),
            }
        }
        Ok(years)
    }
}

/// Month-by-month breakdown of a loan. Interest is charged on the opening
/// balance and rounded to cents; the last instalment absorbs rounding so
/// the balance closes at exactly zero.
pub fn amortization_schedule(
    loan: &LoanInputs,
    start: Option<NaiveDate>,
) -> Result<AmortizationSchedule> {
    let monthly_payment = loan.monthly_payment()?;
    let r = monthly_rate(loan.annual_rate_percent);
    let n = payment_count(loan.term_years);

    let mut entries = Vec::new();
    let mut balance = loan.principal;
    for period in 1..=n {
        let interest = (balance * r).round_dp(2);
        let mut principal = monthly_payment - interest;
        if period == n || principal > balance {
            principal = balance;
        }
        balance -= principal;

        let due_date = match start {
            Some(start) => {
                let months =
                    u32::try_from(period - 1).map_err(|_| CalcError::Overflow("due date"))?;
                Some(
                    start
                        .checked_add_months(Months::new(months))
                        .ok_or(CalcError::Overflow("due date"))?,
                )
            }
            None => None,
        };

        entries.push(ScheduleEntry {
            period,
            due_date,
            payment: principal + interest,
            interest,
            principal,
            balance,
        });

        if balance.is_zero() && !loan.principal.is_zero() {
            break;
        }
    }

    Ok(AmortizationSchedule {
        monthly_payment,
        entries,
    })
}
