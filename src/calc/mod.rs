pub mod affordability;
pub mod amortization;
pub mod closing;
pub mod error;
pub mod land_transfer;

// Flat public surface for the calculators.
pub use affordability::{
    compute_affordability, Affordability, AffordabilityInputs, LimitingRatio, GDS_RATIO, TDS_RATIO,
};
pub use amortization::{
    amortization_schedule, compute_amortized_payment, compute_principal_for_payment,
    AmortizationSchedule, LoanInputs, ScheduleEntry, YearSummary,
};
pub use closing::{
    compute_closing_costs, compute_closing_costs_with, ClosingCostInputs, ClosingCosts, LineItem,
};
pub use error::{CalcError, MAX_TERM_YEARS};
pub use land_transfer::{compute_land_transfer_tax, TaxBracket, TaxSchedule};
