use emi_core::amortization::{compute_amortization, monthly_rate, LoanTerms};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rounding drift bound: a cent per period, scaled by the compounding factor.
fn tolerance(terms: &LoanTerms) -> Decimal {
    let r = monthly_rate(terms.annual_rate_percent);
    let mut growth = Decimal::ONE;
    for _ in 0..terms.tenure_months {
        growth *= Decimal::ONE + r;
    }
    dec!(0.01) * Decimal::from(terms.tenure_months) * growth
}

fn loan_terms() -> impl Strategy<Value = LoanTerms> {
    (
        1i64..=1_000_000_000, // principal in cents, up to 10 million
        0i64..=3_000,         // annual rate in basis points of a percent, up to 30%
        1u32..=360,
        proptest::option::of(0i64..=3_000),
    )
        .prop_map(|(cents, rate_bp, months, tax_bp)| {
            let mut terms = LoanTerms::new(Decimal::new(cents, 2), Decimal::new(rate_bp, 2), months);
            if let Some(tax) = tax_bp {
                terms = terms.with_tax(Decimal::new(tax, 2));
            }
            terms
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_principal_portions_sum_to_principal(terms in loan_terms()) {
        let result = compute_amortization(&terms).unwrap();
        let repaid: Decimal = result.schedule.iter().map(|p| p.principal_portion).sum();
        prop_assert!((repaid - terms.principal).abs() <= tolerance(&terms));
    }

    #[test]
    fn prop_final_balance_near_zero(terms in loan_terms()) {
        let result = compute_amortization(&terms).unwrap();
        prop_assert!(result.residual().abs() <= tolerance(&terms));
    }

    #[test]
    fn prop_total_interest_matches_schedule(terms in loan_terms()) {
        let result = compute_amortization(&terms).unwrap();
        let interest: Decimal = result.schedule.iter().map(|p| p.interest_portion).sum();
        prop_assert!((interest - result.total_interest).abs() <= tolerance(&terms));
        let last = result.schedule.last().unwrap();
        prop_assert_eq!(last.cumulative_interest_paid, interest);
    }

    #[test]
    fn prop_balances_chain(terms in loan_terms()) {
        let result = compute_amortization(&terms).unwrap();
        for p in &result.schedule {
            prop_assert_eq!(p.closing_balance, p.opening_balance - p.principal_portion);
        }
        for pair in result.schedule.windows(2) {
            prop_assert!(pair[1].cumulative_interest_paid >= pair[0].cumulative_interest_paid);
        }
    }

    #[test]
    fn prop_idempotent(terms in loan_terms()) {
        prop_assert_eq!(compute_amortization(&terms).unwrap(), compute_amortization(&terms).unwrap());
    }

    #[test]
    fn prop_tenure_one_repays_everything(cents in 1i64..=1_000_000_000, rate_bp in 0i64..=3_000) {
        let terms = LoanTerms::new(Decimal::new(cents, 2), Decimal::new(rate_bp, 2), 1);
        let result = compute_amortization(&terms).unwrap();
        prop_assert_eq!(result.schedule.len(), 1);
        prop_assert!((result.schedule[0].principal_portion - terms.principal).abs() <= dec!(0.01));
        prop_assert!(result.residual().abs() <= dec!(0.01));
    }
}
