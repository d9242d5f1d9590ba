/// Fields that are counts rather than amounts of money.
const NON_MONETARY: &[&str] = &["month"];

/// Column / row heading for a result field.
pub fn label(key: &str) -> String {
    match key {
        "month" => "Month".into(),
        "installment" => "EMI".into(),
        "interest_portion" => "Interest".into(),
        "principal_portion" => "Principal".into(),
        "tax_amount" => "Tax".into(),
        "cumulative_interest_paid" => "Total Interest Paid".into(),
        "total_interest" => "Total Interest Payable".into(),
        "total_payment" => "Total Payment".into(),
        other => title_case(other),
    }
}

pub fn is_monetary(key: &str) -> bool {
    !NON_MONETARY.contains(&key)
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
