use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Percentages as entered by a borrower (10 = 10%).
pub type Percent = Decimal;

/// Number of fractional digits kept on every reported monetary value.
pub const MONEY_DP: u32 = 2;

/// Midpoint rule applied whenever a monetary value is rounded to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.005 rounds to 0.01 (away from zero)
    #[default]
    HalfUp,
    /// 0.005 rounds to 0.00 (nearest even)
    Bankers,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Bankers => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Round a monetary value to cents, always carrying exactly two
    /// fractional digits (100 -> 100.00).
    pub fn round(self, value: Money) -> Money {
        let mut rounded = value.round_dp_with_strategy(MONEY_DP, self.strategy());
        rounded.rescale(MONEY_DP);
        rounded
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

impl<T: Serialize> ComputationOutput<T> {
    /// Replace the result, keeping methodology, assumptions, warnings and metadata.
    pub fn map<U: Serialize>(self, f: impl FnOnce(T) -> U) -> ComputationOutput<U> {
        ComputationOutput {
            result: f(self.result),
            methodology: self.methodology,
            assumptions: self.assumptions,
            warnings: self.warnings,
            metadata: self.metadata,
        }
    }
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(RoundingMode::HalfUp.round(dec!(2.345)), dec!(2.35));
        assert_eq!(RoundingMode::HalfUp.round(dec!(-2.345)), dec!(-2.35));
    }

    #[test]
    fn test_bankers_rounds_midpoint_to_even() {
        assert_eq!(RoundingMode::Bankers.round(dec!(2.345)), dec!(2.34));
        assert_eq!(RoundingMode::Bankers.round(dec!(2.355)), dec!(2.36));
    }

    #[test]
    fn test_round_pads_whole_amounts_to_cents() {
        assert_eq!(RoundingMode::HalfUp.round(dec!(100)).to_string(), "100.00");
        assert_eq!(RoundingMode::Bankers.round(dec!(1.5)).to_string(), "1.50");
        assert_eq!(RoundingMode::HalfUp.round(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(RoundingMode::HalfUp.round(dec!(8791.5887)).scale(), 2);
    }

    #[test]
    fn test_rounding_mode_deserializes_snake_case() {
        let mode: RoundingMode = serde_json::from_str("\"bankers\"").unwrap();
        assert_eq!(mode, RoundingMode::Bankers);
        let mode: RoundingMode = serde_json::from_str("\"half_up\"").unwrap();
        assert_eq!(mode, RoundingMode::HalfUp);
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata(
            "Test",
            &serde_json::json!({ "k": "v" }),
            vec!["w".into()],
            42,
            dec!(1.5),
        );
        assert_eq!(out.result, dec!(1.5));
        assert_eq!(out.warnings, vec!["w".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 42);
        assert_eq!(out.assumptions["k"], "v");
    }

    #[test]
    fn test_map_keeps_envelope() {
        let out = with_metadata("Test", &serde_json::json!({}), vec!["w".into()], 7, dec!(2));
        let mapped = out.map(|v| v * dec!(10));
        assert_eq!(mapped.result, dec!(20));
        assert_eq!(mapped.methodology, "Test");
        assert_eq!(mapped.warnings.len(), 1);
        assert_eq!(mapped.metadata.computation_time_us, 7);
    }
}
