use super::error::{ensure_non_negative, ensure_positive, Result};
use super::land_transfer::TaxSchedule;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosingCostInputs {
    pub home_price: Decimal,
    pub first_time_buyer: bool,
    pub legal_fees: Decimal,
    pub title_insurance: Decimal,
    pub home_inspection: Decimal,
    pub moving_costs: Decimal,
    pub adjustments: Decimal,
}

impl ClosingCostInputs {
    /// Typical flat costs for a purchase at `home_price`
    pub fn with_default_costs(home_price: Decimal, first_time_buyer: bool) -> Self {
        ClosingCostInputs {
            home_price,
            first_time_buyer,
            legal_fees: dec!(1500),
            title_insurance: dec!(300),
            home_inspection: dec!(500),
            moving_costs: dec!(2000),
            adjustments: dec!(1000),
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_positive("home_price", self.home_price)?;
        ensure_non_negative("legal_fees", self.legal_fees)?;
        ensure_non_negative("title_insurance", self.title_insurance)?;
        ensure_non_negative("home_inspection", self.home_inspection)?;
        ensure_non_negative("moving_costs", self.moving_costs)?;
        ensure_non_negative("adjustments", self.adjustments)
    }

    fn flat_costs(&self) -> [(&'static str, Decimal); 5] {
        [
            ("Legal fees", self.legal_fees),
            ("Title insurance", self.title_insurance),
            ("Home inspection", self.home_inspection),
            ("Moving costs", self.moving_costs),
            ("Adjustments", self.adjustments),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosingCosts {
    pub land_transfer_tax: Decimal,
    pub total_closing_costs: Decimal,
    /// Total as a percentage of the home price, unrounded
    pub percent_of_price: Decimal,
    pub line_items: Vec<LineItem>,
}

/// Closing costs with land transfer tax from the default schedule
pub fn compute_closing_costs(inputs: &ClosingCostInputs) -> Result<ClosingCosts> {
    compute_closing_costs_with(&TaxSchedule::default(), inputs)
}

pub fn compute_closing_costs_with(
    schedule: &TaxSchedule,
    inputs: &ClosingCostInputs,
) -> Result<ClosingCosts> {
    inputs.validate()?;

    let land_transfer_tax = schedule.land_transfer_tax(inputs.home_price, inputs.first_time_buyer)?;

    let mut line_items = vec![LineItem {
        label: "Land transfer tax",
        amount: land_transfer_tax,
    }];
    line_items.extend(
        inputs
            .flat_costs()
            .into_iter()
            .map(|(label, amount)| LineItem { label, amount }),
    );

    let total_closing_costs: Decimal = line_items.iter().map(|item| item.amount).sum();
    let percent_of_price = total_closing_costs / inputs.home_price * dec!(100);

    log::debug!(
        "Closing costs: price={}, tax={}, total={} ({}%)",
        inputs.home_price,
        land_transfer_tax,
        total_closing_costs,
        percent_of_price.round_dp(2)
    );

    Ok(ClosingCosts {
        land_transfer_tax,
        total_closing_costs,
        percent_of_price,
        line_items,
    })
}
