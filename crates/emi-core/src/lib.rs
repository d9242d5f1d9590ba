pub mod amortization;
pub mod error;
pub mod types;

pub use amortization::{
    amortize, compute_amortization, AmortizationResult, AmortizationSummary, LoanTerms,
    PeriodRecord,
};
pub use error::EmiError;
pub use types::*;

/// Standard result type for all EMI operations
pub type EmiResult<T> = Result<T, EmiError>;
