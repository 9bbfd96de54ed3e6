use super::amortization::compute_principal_for_payment;
use super::error::{ensure_non_negative, ensure_positive, ensure_term, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Gross debt service ratio: share of gross monthly income available for housing
pub const GDS_RATIO: Decimal = dec!(0.39);

/// Total debt service ratio: share of gross monthly income available for all debt
pub const TDS_RATIO: Decimal = dec!(0.44);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffordabilityInputs {
    pub gross_annual_income: Decimal,
    pub monthly_debt: Decimal,
    pub down_payment: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
}

impl AffordabilityInputs {
    fn validate(&self) -> Result<()> {
        ensure_positive("gross_annual_income", self.gross_annual_income)?;
        ensure_non_negative("monthly_debt", self.monthly_debt)?;
        ensure_non_negative("down_payment", self.down_payment)?;
        ensure_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        ensure_term(self.term_years)
    }
}

/// Which qualification ratio capped the monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LimitingRatio {
    Gds,
    Tds,
}

impl LimitingRatio {
    pub fn display(&self) -> &'static str {
        match self {
            LimitingRatio::Gds => "GDS (39%)",
            LimitingRatio::Tds => "TDS (44%)",
        }
    }
}

impl std::fmt::Display for LimitingRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affordability {
    /// Maximum purchase price: largest qualifying loan plus the down payment
    pub affordable_price: Decimal,
    /// Largest monthly mortgage payment allowed by both ratios
    pub monthly_mortgage_payment: Decimal,
    pub max_loan: Decimal,
    pub gds_limit: Decimal,
    /// Zero when existing debt already exceeds the TDS ceiling
    pub tds_limit: Decimal,
    pub limiting_ratio: LimitingRatio,
}

impl Affordability {
    pub fn is_affordable(&self) -> bool {
        self.max_loan > Decimal::ZERO
    }
}

/// Maximum home price a buyer qualifies for under the GDS/TDS ratios.
///
/// Debt above the TDS ceiling is not an error: the qualifying payment and
/// loan clamp to zero and the price falls back to the down payment alone.
pub fn compute_affordability(inputs: &AffordabilityInputs) -> Result<Affordability> {
    inputs.validate()?;

    let monthly_income = inputs.gross_annual_income / dec!(12);
    let gds_limit = monthly_income * GDS_RATIO;
    let tds_limit = monthly_income * TDS_RATIO - inputs.monthly_debt;

    let (limit, limiting_ratio) = if gds_limit <= tds_limit {
        (gds_limit, LimitingRatio::Gds)
    } else {
        (tds_limit, LimitingRatio::Tds)
    };
    let max_monthly_payment = limit.max(Decimal::ZERO);

    if max_monthly_payment.is_zero() {
        log::warn!(
            "Monthly debt {} leaves no room under the TDS ceiling ({} of income {})",
            inputs.monthly_debt,
            TDS_RATIO,
            monthly_income.round_dp(2)
        );
    }

    let max_loan = compute_principal_for_payment(
        max_monthly_payment,
        inputs.annual_rate_percent,
        inputs.term_years,
    )?;
    let affordable_price = (max_loan + inputs.down_payment).max(Decimal::ZERO);

    log::debug!(
        "Affordability: income/month={}, gds={}, tds={}, payment={}, loan={}, price={}",
        monthly_income.round_dp(2),
        gds_limit.round_dp(2),
        tds_limit.round_dp(2),
        max_monthly_payment.round_dp(2),
        max_loan,
        affordable_price
    );

    Ok(Affordability {
        affordable_price,
        monthly_mortgage_payment: max_monthly_payment.round_dp(2),
        max_loan,
        gds_limit: gds_limit.round_dp(2),
        tds_limit: tds_limit.max(Decimal::ZERO).round_dp(2),
        limiting_ratio,
    })
}
