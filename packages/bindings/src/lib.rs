use napi::Result as NapiResult;
use napi_derive::napi;

use emi_core::amortization::{self, LoanTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_terms(input_json: &str) -> NapiResult<LoanTerms> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// Full result (summary + schedule) for a JSON-encoded `LoanTerms`.
#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let output = amortization::amortize(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Full result from plain form numbers; NaN, negative or fractional tenure is rejected.
#[napi]
pub fn calculate_emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: f64,
    tax_percent: Option<f64>,
) -> NapiResult<String> {
    let terms = LoanTerms::from_f64(principal, annual_rate_percent, tenure_months, tax_percent)
        .map_err(to_napi_error)?;
    let output = amortization::amortize(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Headline figures only, for a JSON-encoded `LoanTerms`.
#[napi]
pub fn amortization_summary(input_json: String) -> NapiResult<String> {
    let terms = parse_terms(&input_json)?;
    let out = amortization::amortize(&terms).map_err(to_napi_error)?;
    let summary = out.map(|result| result.summary());
    serde_json::to_string(&summary).map_err(to_napi_error)
}
