use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::EmiError;
use crate::types::*;
use crate::EmiResult;

/// Tenures above this are accepted but flagged as unrealistic.
pub const REALISTIC_TENURE_MONTHS: u32 = 600;

/// Hard ceiling on the schedule length (100 years).
pub const MAX_TENURE_MONTHS: u32 = 1200;

/// Terms of a fixed-rate loan repaid in equal monthly installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Nominal annual rate as a percentage (10 = 10% p.a.)
    pub annual_rate_percent: Percent,
    pub tenure_months: u32,
    /// Tax charged on interest, as a percentage of interest payable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<Percent>,
    #[serde(default)]
    pub rounding: RoundingMode,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub month: u32,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Money>,
    pub closing_balance: Money,
    pub cumulative_interest_paid: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub installment: Money,
    pub total_interest: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Money>,
    pub total_payment: Money,
    pub schedule: Vec<PeriodRecord>,
}

/// Headline figures without the per-month breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub installment: Money,
    pub total_interest: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<Money>,
    pub total_payment: Money,
}

impl AmortizationResult {
    pub fn summary(&self) -> AmortizationSummary {
        AmortizationSummary {
            installment: self.installment,
            total_interest: self.total_interest,
            tax_amount: self.tax_amount,
            total_payment: self.total_payment,
        }
    }

    /// Balance left after the last installment (zero up to rounding).
    pub fn residual(&self) -> Money {
        self.schedule
            .last()
            .map(|p| p.closing_balance)
            .unwrap_or(Decimal::ZERO)
    }
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Percent, tenure_months: u32) -> Self {
        LoanTerms {
            principal,
            annual_rate_percent,
            tenure_months,
            tax_percent: None,
            rounding: RoundingMode::default(),
        }
    }

    pub fn with_tax(mut self, tax_percent: Percent) -> Self {
        self.tax_percent = Some(tax_percent);
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Build terms from binary floats as handed over by a form layer.
    ///
    /// Non-finite, negative and fractional tenure values are rejected here
    /// so they never reach the decimal arithmetic.
    pub fn from_f64(
        principal: f64,
        annual_rate_percent: f64,
        tenure_months: f64,
        tax_percent: Option<f64>,
    ) -> EmiResult<Self> {
        let principal = decimal_from_f64("principal", principal)?;
        let annual_rate_percent = decimal_from_f64("annual_rate_percent", annual_rate_percent)?;

        if !tenure_months.is_finite() {
            return Err(EmiError::invalid("tenure_months", "Tenure must be a finite number"));
        }
        if tenure_months.fract() != 0.0 {
            return Err(EmiError::invalid(
                "tenure_months",
                format!("Tenure must be a whole number of months, got {tenure_months}"),
            ));
        }
        if tenure_months < 1.0 || tenure_months > f64::from(MAX_TENURE_MONTHS) {
            return Err(EmiError::invalid(
                "tenure_months",
                format!("Tenure must be between 1 and {MAX_TENURE_MONTHS} months, got {tenure_months}"),
            ));
        }

        let tax_percent = tax_percent
            .map(|t| decimal_from_f64("tax_percent", t))
            .transpose()?;

        let terms = LoanTerms {
            principal,
            annual_rate_percent,
            tenure_months: tenure_months as u32,
            tax_percent,
            rounding: RoundingMode::default(),
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> EmiResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(EmiError::invalid("principal", "Principal must not be negative"));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(EmiError::invalid(
                "annual_rate_percent",
                "Interest rate must not be negative",
            ));
        }
        if self.tenure_months == 0 {
            return Err(EmiError::invalid("tenure_months", "Tenure must be at least 1 month"));
        }
        if self.tenure_months > MAX_TENURE_MONTHS {
            return Err(EmiError::invalid(
                "tenure_months",
                format!("Tenure must not exceed {MAX_TENURE_MONTHS} months"),
            ));
        }
        if let Some(tax) = self.tax_percent {
            if tax < Decimal::ZERO {
                return Err(EmiError::invalid("tax_percent", "Tax percentage must not be negative"));
            }
        }
        Ok(())
    }
}

fn decimal_from_f64(field: &str, value: f64) -> EmiResult<Decimal> {
    if !value.is_finite() {
        return Err(EmiError::invalid(field, "Value must be a finite number"));
    }
    if value < 0.0 {
        return Err(EmiError::invalid(field, "Value must not be negative"));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| EmiError::invalid(field, "Value is out of decimal range"))
}

fn overflow(field: &str) -> EmiError {
    EmiError::invalid(field, "Value overflows decimal precision")
}

fn percent_of(amount: Money, percent: Percent) -> EmiResult<Money> {
    amount
        .checked_mul(percent)
        .map(|v| v / dec!(100))
        .ok_or_else(|| overflow("tax_percent"))
}

/// Monthly fractional rate from an annual percentage: 12% p.a. -> 0.01
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(1200)
}

/// Level installment: P * r(1+r)^n / ((1+r)^n - 1), or P / n when r is zero.
///
/// The result is left at full precision; callers round for display.
pub fn level_installment(principal: Money, monthly_rate: Rate, months: u32) -> EmiResult<Money> {
    if months == 0 {
        return Err(EmiError::invalid("tenure_months", "Tenure must be at least 1 month"));
    }
    let n = Decimal::from(months);

    if monthly_rate.is_zero() {
        return Ok(principal / n);
    }

    // (1 + r)^n via iterative multiplication
    let one_plus_r = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        compound = compound
            .checked_mul(one_plus_r)
            .ok_or_else(|| overflow("annual_rate_percent"))?;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // Rate too small to register at 28 digits: treat as interest-free
        return Ok(principal / n);
    }

    principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| overflow("principal"))
}

/// Compute the installment, totals and month-by-month schedule.
///
/// Balances are rounded to cents every month and the last period is not
/// trued up, so the final closing balance may carry a small residual.
pub fn compute_amortization(terms: &LoanTerms) -> EmiResult<AmortizationResult> {
    terms.validate()?;

    let mode = terms.rounding;
    let r = monthly_rate(terms.annual_rate_percent);
    let n = Decimal::from(terms.tenure_months);

    let installment = level_installment(terms.principal, r, terms.tenure_months)?;
    let total_repaid = installment
        .checked_mul(n)
        .ok_or_else(|| overflow("principal"))?;

    let total_interest = mode.round(total_repaid - terms.principal);
    let tax_amount = terms
        .tax_percent
        .map(|tax| percent_of(total_interest, tax).map(|t| mode.round(t)))
        .transpose()?;
    let total_payment = mode.round(total_repaid + tax_amount.unwrap_or(Decimal::ZERO));

    let mut schedule = Vec::with_capacity(terms.tenure_months as usize);
    let mut balance = terms.principal;
    let mut cumulative_interest = Decimal::ZERO;

    for month in 1..=terms.tenure_months {
        let interest = mode.round(balance * r);
        let principal_portion = mode.round(installment - interest);
        let new_balance = mode.round(balance - principal_portion);
        cumulative_interest += interest;
        let period_tax = terms
            .tax_percent
            .map(|tax| percent_of(interest, tax).map(|t| mode.round(t)))
            .transpose()?;

        schedule.push(PeriodRecord {
            month,
            opening_balance: new_balance + principal_portion,
            installment: mode.round(installment),
            interest_portion: interest,
            principal_portion,
            tax_amount: period_tax,
            closing_balance: new_balance,
            cumulative_interest_paid: cumulative_interest,
        });

        balance = new_balance;
    }

    Ok(AmortizationResult {
        installment: mode.round(installment),
        total_interest,
        tax_amount,
        total_payment,
        schedule,
    })
}

/// Run the amortization and wrap it with assumptions, warnings and timing.
pub fn amortize(terms: &LoanTerms) -> EmiResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_amortization(terms)?;

    if terms.tenure_months > REALISTIC_TENURE_MONTHS {
        warnings.push(format!(
            "Tenure of {} months exceeds the usual maximum of {REALISTIC_TENURE_MONTHS} months",
            terms.tenure_months
        ));
    }
    if terms.principal.is_zero() {
        warnings.push("Principal is zero; schedule contains no repayments".into());
    }
    let residual = result.residual();
    if !residual.is_zero() {
        warnings.push(format!(
            "Final closing balance carries a rounding residual of {residual}"
        ));
    }

    debug!(
        principal = %terms.principal,
        annual_rate_percent = %terms.annual_rate_percent,
        tenure_months = terms.tenure_months,
        installment = %result.installment,
        residual = %residual,
        "amortization computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment (EMI) amortization, balance rounded to cents each month",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "monthly_rate": monthly_rate(terms.annual_rate_percent).to_string(),
            "tenure_months": terms.tenure_months,
            "tax_percent": terms.tax_percent.map(|t| t.to_string()),
            "rounding": terms.rounding,
        }),
        warnings,
        elapsed,
        result,
    ))
}
