use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
    #[error("invalid tax schedule: {0}")]
    InvalidSchedule(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;

pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(CalcError::InvalidInput {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

pub(crate) fn ensure_positive(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(CalcError::InvalidInput {
            field,
            reason: format!("must be greater than zero, got {value}"),
        });
    }
    Ok(())
}

/// Longest amortization period accepted, in years
pub const MAX_TERM_YEARS: u32 = 100;

pub(crate) fn ensure_term(term_years: u32) -> Result<()> {
    if term_years == 0 {
        return Err(CalcError::InvalidInput {
            field: "term_years",
            reason: "must be at least one year".to_string(),
        });
    }
    if term_years > MAX_TERM_YEARS {
        return Err(CalcError::InvalidInput {
            field: "term_years",
            reason: format!("must be at most {MAX_TERM_YEARS} years, got {term_years}"),
        });
    }
    Ok(())
}
