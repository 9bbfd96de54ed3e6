use super::error::{ensure_positive, CalcError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};

/// One tier of a marginal tax schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBracket {
    /// Price at which this tier starts; the tier ends where the next one starts
    #[schemars(with = "f64")]
    pub threshold: Decimal,
    /// Marginal rate applied to the portion of the price inside this tier (0.01 = 1%)
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn new(threshold: Decimal, rate: Decimal) -> Self {
        TaxBracket { threshold, rate }
    }
}

/// Land transfer tax schedule for one jurisdiction.
///
/// Only constructed through [`TaxSchedule::new`], [`TaxSchedule::ontario`] or
/// deserialization, all of which reject an invalid bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TaxSchedule {
    name: String,
    /// Flat amount deducted from the tax for first-time buyers, never below zero
    #[serde(default)]
    #[schemars(with = "f64")]
    first_time_buyer_rebate: Decimal,
    /// Tiers ordered by threshold, the first starting at zero
    brackets: Vec<TaxBracket>,
}

/// Unvalidated schedule as written in a jurisdiction file
#[derive(Deserialize)]
struct TaxScheduleFile {
    name: String,
    #[serde(default)]
    first_time_buyer_rebate: Decimal,
    brackets: Vec<TaxBracket>,
}

impl<'de> Deserialize<'de> for TaxSchedule {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let file = TaxScheduleFile::deserialize(deserializer)?;
        TaxSchedule::new(file.name, file.brackets, file.first_time_buyer_rebate)
            .map_err(de::Error::custom)
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        TaxSchedule::ontario()
    }
}

impl TaxSchedule {
    pub fn new(
        name: impl Into<String>,
        brackets: Vec<TaxBracket>,
        first_time_buyer_rebate: Decimal,
    ) -> Result<Self> {
        let schedule = TaxSchedule {
            name: name.into(),
            first_time_buyer_rebate,
            brackets,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Provincial schedule used when no other is configured
    pub fn ontario() -> Self {
        TaxSchedule {
            name: "Ontario".to_string(),
            first_time_buyer_rebate: dec!(4000),
            brackets: vec![
                TaxBracket::new(dec!(0), dec!(0.005)),
                TaxBracket::new(dec!(55000), dec!(0.01)),
                TaxBracket::new(dec!(250000), dec!(0.015)),
                TaxBracket::new(dec!(400000), dec!(0.02)),
                TaxBracket::new(dec!(2000000), dec!(0.025)),
            ],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn first_time_buyer_rebate(&self) -> Decimal {
        self.first_time_buyer_rebate
    }

    pub fn validate(&self) -> Result<()> {
        let first = self
            .brackets
            .first()
            .ok_or_else(|| CalcError::InvalidSchedule("no brackets".to_string()))?;
        if !first.threshold.is_zero() {
            return Err(CalcError::InvalidSchedule(format!(
                "first bracket must start at 0, starts at {}",
                first.threshold
            )));
        }
        for pair in self.brackets.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(CalcError::InvalidSchedule(format!(
                    "thresholds must increase: {} follows {}",
                    pair[1].threshold, pair[0].threshold
                )));
            }
        }
        if let Some(bracket) = self.brackets.iter().find(|b| b.rate < Decimal::ZERO) {
            return Err(CalcError::InvalidSchedule(format!(
                "negative rate {} at threshold {}",
                bracket.rate, bracket.threshold
            )));
        }
        if self.first_time_buyer_rebate < Decimal::ZERO {
            return Err(CalcError::InvalidSchedule(format!(
                "negative first-time buyer rebate {}",
                self.first_time_buyer_rebate
            )));
        }
        Ok(())
    }

    /// Tax before any rebate: each tier taxes only the part of the price inside it
    pub fn marginal_tax(&self, price: Decimal) -> Decimal {
        let mut tax = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if price <= bracket.threshold {
                break;
            }
            let top = match self.brackets.get(i + 1) {
                Some(next) => price.min(next.threshold),
                None => price,
            };
            let portion = top - bracket.threshold;
            log::trace!(
                "Bracket {} @ {}: taxable portion {}",
                bracket.threshold,
                bracket.rate,
                portion
            );
            tax += portion * bracket.rate;
        }
        tax
    }

    pub fn land_transfer_tax(&self, price: Decimal, first_time_buyer: bool) -> Result<Decimal> {
        ensure_positive("price", price)?;
        let gross = self.marginal_tax(price);
        let tax = if first_time_buyer {
            (gross - self.first_time_buyer_rebate).max(Decimal::ZERO)
        } else {
            gross
        };
        log::debug!(
            "{} land transfer tax: price={}, first_time_buyer={}, gross={}, payable={}",
            self.name,
            price,
            first_time_buyer,
            gross,
            tax
        );
        Ok(tax.round_dp(2))
    }
}

/// Land transfer tax under the default schedule
pub fn compute_land_transfer_tax(price: Decimal, first_time_buyer: bool) -> Result<Decimal> {
    TaxSchedule::ontario().land_transfer_tax(price, first_time_buyer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bracket_boundary() {
        assert_eq!(compute_land_transfer_tax(dec!(55000), false).unwrap(), dec!(275));
        assert_eq!(compute_land_transfer_tax(dec!(55000), true).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn second_bracket_boundary() {
        assert_eq!(compute_land_transfer_tax(dec!(250000), false).unwrap(), dec!(2225));
    }

    #[test]
    fn upper_brackets() {
        assert_eq!(compute_land_transfer_tax(dec!(400000), false).unwrap(), dec!(4475));
        assert_eq!(compute_land_transfer_tax(dec!(500000), false).unwrap(), dec!(6475));
        assert_eq!(compute_land_transfer_tax(dec!(2000000), false).unwrap(), dec!(36475));
        assert_eq!(compute_land_transfer_tax(dec!(2500000), false).unwrap(), dec!(48975));
    }

    #[test]
    fn first_time_buyer_rebate() {
        assert_eq!(compute_land_transfer_tax(dec!(500000), true).unwrap(), dec!(2475));
        // 368,333.33 is roughly where the full rebate is used up
        assert_eq!(compute_land_transfer_tax(dec!(300000), true).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn within_first_bracket() {
        assert_eq!(compute_land_transfer_tax(dec!(10000), false).unwrap(), dec!(50));
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(compute_land_transfer_tax(dec!(100.01), false).unwrap(), dec!(0.50));
    }

    #[test]
    fn rejects_non_positive_price() {
        assert!(matches!(
            compute_land_transfer_tax(Decimal::ZERO, false),
            Err(CalcError::InvalidInput { field: "price", .. })
        ));
    }

    #[test]
    fn custom_schedule() {
        let schedule = TaxSchedule::new(
            "Flat-ish",
            vec![
                TaxBracket::new(dec!(0), dec!(0)),
                TaxBracket::new(dec!(100000), dec!(0.01)),
            ],
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(schedule.land_transfer_tax(dec!(90000), false).unwrap(), Decimal::ZERO);
        assert_eq!(schedule.land_transfer_tax(dec!(150000), true).unwrap(), dec!(500));
    }

    #[test]
    fn schedule_validation() {
        let empty = TaxSchedule::new("empty", vec![], Decimal::ZERO);
        assert!(matches!(empty, Err(CalcError::InvalidSchedule(_))));

        let offset = TaxSchedule::new(
            "offset",
            vec![TaxBracket::new(dec!(1000), dec!(0.01))],
            Decimal::ZERO,
        );
        assert!(matches!(offset, Err(CalcError::InvalidSchedule(_))));

        let unordered = TaxSchedule::new(
            "unordered",
            vec![
                TaxBracket::new(dec!(0), dec!(0.01)),
                TaxBracket::new(dec!(50000), dec!(0.02)),
                TaxBracket::new(dec!(50000), dec!(0.03)),
            ],
            Decimal::ZERO,
        );
        assert!(matches!(unordered, Err(CalcError::InvalidSchedule(_))));

        let negative = TaxSchedule::new(
            "negative",
            vec![TaxBracket::new(dec!(0), dec!(-0.01))],
            Decimal::ZERO,
        );
        assert!(matches!(negative, Err(CalcError::InvalidSchedule(_))));

        assert!(TaxSchedule::ontario().validate().is_ok());
    }

    #[test]
    fn deserializing_validates_brackets() {
        let json = r#"{ "name": "gap", "brackets": [
            { "threshold": "0", "rate": "0.01" },
            { "threshold": "0", "rate": "0.02" }
        ] }"#;
        let err = serde_json::from_str::<TaxSchedule>(json).unwrap_err();
        assert!(err.to_string().contains("thresholds must increase"));

        let json = r#"{ "name": "ok", "brackets": [ { "threshold": "0", "rate": "0.01" } ] }"#;
        let schedule: TaxSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.name(), "ok");
        assert_eq!(schedule.first_time_buyer_rebate(), Decimal::ZERO);
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        let schedule = TaxSchedule::default();
        for price in [dec!(55000), dec!(399999.99), dec!(3150000)] {
            for first_time_buyer in [false, true] {
                let first = schedule.land_transfer_tax(price, first_time_buyer).unwrap();
                let second = compute_land_transfer_tax(price, first_time_buyer).unwrap();
                assert_eq!(first, second);
                assert_eq!(first, schedule.land_transfer_tax(price, first_time_buyer).unwrap());
            }
        }
    }
}
