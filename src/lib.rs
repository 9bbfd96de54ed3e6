//! Real estate financial calculators.
//!
//! Every calculation is a pure function over exact decimal amounts: the same
//! inputs always give the same outputs, with no I/O or shared state.

pub mod calc;
pub mod config;
pub mod scenario;

pub use calc::{
    compute_affordability, compute_amortized_payment, compute_closing_costs,
    compute_land_transfer_tax, CalcError,
};
