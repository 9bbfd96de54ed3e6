//! Batch evaluation of purchase scenarios read from CSV.

use crate::calc::{
    amortization_schedule, compute_closing_costs_with, CalcError, ClosingCostInputs, LoanInputs,
    TaxSchedule,
};
use homecalc_derive::CsvSchema;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Column description produced by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One row of a scenarios CSV file
#[derive(Debug, Clone, Serialize, Deserialize, CsvSchema)]
pub struct ScenarioRecord {
    /// Name shown in the output, e.g. the listing address
    pub label: String,
    /// Purchase price
    pub home_price: Decimal,
    /// Cash put down; the rest is borrowed
    pub down_payment: Decimal,
    /// Annual mortgage rate as a percentage (4.5 = 4.5%)
    pub rate_percent: Decimal,
    /// Amortization period in years
    pub term_years: u32,
    /// true if the buyer qualifies for the first-time buyer rebate
    pub first_time_buyer: bool,
    /// Legal fees (default 1500)
    #[serde(default)]
    pub legal_fees: Option<Decimal>,
    /// Title insurance (default 300)
    #[serde(default)]
    pub title_insurance: Option<Decimal>,
    /// Home inspection (default 500)
    #[serde(default)]
    pub home_inspection: Option<Decimal>,
    /// Moving costs (default 2000)
    #[serde(default)]
    pub moving_costs: Option<Decimal>,
    /// Tax and utility adjustments (default 1000)
    #[serde(default)]
    pub adjustments: Option<Decimal>,
}

impl ScenarioRecord {
    fn closing_cost_inputs(&self) -> ClosingCostInputs {
        let defaults = ClosingCostInputs::with_default_costs(self.home_price, self.first_time_buyer);
        ClosingCostInputs {
            legal_fees: self.legal_fees.unwrap_or(defaults.legal_fees),
            title_insurance: self.title_insurance.unwrap_or(defaults.title_insurance),
            home_inspection: self.home_inspection.unwrap_or(defaults.home_inspection),
            moving_costs: self.moving_costs.unwrap_or(defaults.moving_costs),
            adjustments: self.adjustments.unwrap_or(defaults.adjustments),
            ..defaults
        }
    }
}

/// Result row written for each scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub label: String,
    pub loan_amount: Decimal,
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub land_transfer_tax: Decimal,
    pub closing_costs: Decimal,
    /// Down payment plus closing costs
    pub cash_to_close: Decimal,
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("scenario '{label}': {source}")]
    Calc { label: String, source: CalcError },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub fn evaluate(
    schedule: &TaxSchedule,
    record: &ScenarioRecord,
) -> Result<ScenarioOutcome, ScenarioError> {
    evaluate_inner(schedule, record).map_err(|source| ScenarioError::Calc {
        label: record.label.clone(),
        source,
    })
}

fn evaluate_inner(schedule: &TaxSchedule, record: &ScenarioRecord) -> Result<ScenarioOutcome, CalcError> {
    if record.down_payment > record.home_price {
        return Err(CalcError::InvalidInput {
            field: "down_payment",
            reason: format!(
                "{} exceeds the home price {}",
                record.down_payment, record.home_price
            ),
        });
    }

    let loan = LoanInputs::new(
        record.home_price - record.down_payment,
        record.rate_percent,
        record.term_years,
    );
    let amortization = amortization_schedule(&loan, None)?;
    let closing = compute_closing_costs_with(schedule, &record.closing_cost_inputs())?;

    Ok(ScenarioOutcome {
        label: record.label.clone(),
        loan_amount: loan.principal,
        monthly_payment: amortization.monthly_payment,
        total_interest: amortization.total_interest(),
        land_transfer_tax: closing.land_transfer_tax,
        closing_costs: closing.total_closing_costs,
        cash_to_close: record.down_payment + closing.total_closing_costs,
    })
}

pub fn read_scenarios<R: Read>(reader: R) -> Result<Vec<ScenarioRecord>, ScenarioError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<ScenarioRecord>, _>>()?;
    log::info!("Read {} scenarios", records.len());
    Ok(records)
}

pub fn write_outcomes<'a, I, W>(outcomes: I, writer: W) -> Result<(), ScenarioError>
where
    I: IntoIterator<Item = &'a ScenarioOutcome>,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        wtr.serialize(outcome)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SCENARIOS: &str = "\
label,home_price,down_payment,rate_percent,term_years,first_time_buyer,legal_fees,title_insurance,home_inspection,moving_costs,adjustments
Condo,500000,100000,4.5,25,false,,,,,
Starter,300000,15000,5,25,true,1200,250,0,800,500
";

    #[test]
    fn reads_records_with_optional_columns() {
        let records = read_scenarios(SCENARIOS.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "Condo");
        assert_eq!(records[0].legal_fees, None);
        assert!(records[1].first_time_buyer);
        assert_eq!(records[1].home_inspection, Some(dec!(0)));
    }

    #[test]
    fn evaluates_scenario() {
        let records = read_scenarios(SCENARIOS.as_bytes()).unwrap();
        let outcome = evaluate(&TaxSchedule::default(), &records[0]).unwrap();

        assert_eq!(outcome.loan_amount, dec!(400000));
        assert_eq!(outcome.land_transfer_tax, dec!(6475));
        assert_eq!(outcome.closing_costs, dec!(11775));
        assert_eq!(outcome.cash_to_close, dec!(111775));
        assert!(outcome.total_interest > Decimal::ZERO);
    }

    #[test]
    fn explicit_costs_override_defaults() {
        let records = read_scenarios(SCENARIOS.as_bytes()).unwrap();
        let outcome = evaluate(&TaxSchedule::default(), &records[1]).unwrap();

        // 2,975 tax less the 4,000 rebate is nothing
        assert_eq!(outcome.land_transfer_tax, Decimal::ZERO);
        assert_eq!(outcome.closing_costs, dec!(2750));
        assert_eq!(outcome.cash_to_close, dec!(17750));
    }

    #[test]
    fn down_payment_above_price_is_rejected() {
        let record = ScenarioRecord {
            label: "Overpaid".to_string(),
            home_price: dec!(100000),
            down_payment: dec!(150000),
            rate_percent: dec!(5),
            term_years: 25,
            first_time_buyer: false,
            legal_fees: None,
            title_insurance: None,
            home_inspection: None,
            moving_costs: None,
            adjustments: None,
        };
        let err = evaluate(&TaxSchedule::default(), &record).unwrap_err();
        assert!(err.to_string().starts_with("scenario 'Overpaid'"));
    }

    #[test]
    fn writes_outcome_csv() {
        let records = read_scenarios(SCENARIOS.as_bytes()).unwrap();
        let outcome = evaluate(&TaxSchedule::default(), &records[0]).unwrap();

        let mut buf = Vec::new();
        write_outcomes([&outcome], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "label,loan_amount,monthly_payment,total_interest,land_transfer_tax,closing_costs,cash_to_close"
        );
        assert!(lines.next().unwrap().starts_with("Condo,400000,"));
    }

    #[test]
    fn derived_schema_describes_columns() {
        let fields = ScenarioRecord::csv_fields();

        assert_eq!(fields.len(), 11);
        assert_eq!(fields[0].name, "label");
        assert!(fields[0].required);
        assert_eq!(fields[1].description, "Purchase price");
        assert!(!fields[6].required);
        assert!(ScenarioRecord::csv_header().starts_with("label,home_price,down_payment"));
    }
}
