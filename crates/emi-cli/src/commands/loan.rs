use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use emi_core::amortization::{self, LoanTerms};
use emi_core::types::RoundingMode;

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoundingArg {
    /// Midpoints round away from zero
    HalfUp,
    /// Midpoints round to the nearest even cent
    Bankers,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfUp => RoundingMode::HalfUp,
            RoundingArg::Bankers => RoundingMode::Bankers,
        }
    }
}

/// Loan terms, from flags or a JSON/YAML document
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Principal amount borrowed
    #[arg(long, conflicts_with = "input")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 10 for 10%)
    #[arg(long, requires = "principal")]
    pub rate: Option<Decimal>,

    /// Loan tenure in months
    #[arg(long, requires = "principal")]
    pub tenure: Option<u32>,

    /// Tax on interest in percent (applied on top of any input document)
    #[arg(long)]
    pub tax: Option<Decimal>,

    /// Rounding rule for cents (applied on top of any input document)
    #[arg(long)]
    pub rounding: Option<RoundingArg>,
}

fn load_terms(args: LoanArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let mut terms: LoanTerms = if let Some(ref path) = args.input {
        debug!(path = %path, "reading loan terms from file");
        input::file::read_document(path)?
    } else if let Some(principal) = args.principal {
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let tenure = args
            .tenure
            .ok_or("--tenure is required (or provide --input)")?;

        LoanTerms::new(principal, rate, tenure)
    } else if let Some(terms) = input::stdin::read_stdin()? {
        debug!("reading loan terms from stdin");
        terms
    } else {
        return Err("--principal, --rate and --tenure are required (or provide --input or pipe JSON on stdin)".into());
    };

    if let Some(tax) = args.tax {
        terms.tax_percent = Some(tax);
    }
    if let Some(rounding) = args.rounding {
        terms.rounding = rounding.into();
    }
    Ok(terms)
}

pub fn run_amortize(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = load_terms(args)?;
    let result = amortization::amortize(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = load_terms(args)?;
    let out = amortization::amortize(&terms)?;
    let summary = out.map(|result| result.summary());
    Ok(serde_json::to_value(summary)?)
}
