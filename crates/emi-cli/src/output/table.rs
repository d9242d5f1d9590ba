use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::labels::{is_monetary, label};

/// Format output as tables: headline figures, then the schedule.
pub fn print_table(value: &Value, currency_symbol: &str) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map, currency_symbol);
            } else {
                print_fields(map, currency_symbol);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>, currency_symbol: &str) {
    if let Value::Object(res_map) = result {
        print_fields(res_map, currency_symbol);

        if let Some(Value::Array(rows)) = res_map.get("schedule") {
            println!("\nAmortization Schedule");
            print_rows(rows, currency_symbol);
        }
    } else {
        print_fields(envelope, currency_symbol);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Scalar fields as a two-column table; nested arrays are skipped.
fn print_fields(map: &Map<String, Value>, currency_symbol: &str) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() {
            continue;
        }
        builder.push_record([label(key), format_value(key, val, currency_symbol)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value], currency_symbol: &str) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let keys: Vec<&String> = first.keys().collect();
    let mut builder = Builder::default();
    builder.push_record(keys.iter().map(|k| label(k)));

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = keys
                .iter()
                .map(|k| {
                    map.get(k.as_str())
                        .map(|v| format_value(k, v, currency_symbol))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

fn format_value(key: &str, value: &Value, currency_symbol: &str) -> String {
    match value {
        Value::String(s) if is_monetary(key) => format!("{currency_symbol}{s}"),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_gets_currency_symbol() {
        assert_eq!(format_value("installment", &json!("8791.59"), "₹"), "₹8791.59");
    }

    #[test]
    fn test_month_stays_plain() {
        assert_eq!(format_value("month", &json!(3), "₹"), "3");
    }

    #[test]
    fn test_null_renders_dash() {
        assert_eq!(format_value("tax_amount", &Value::Null, "$"), "-");
    }
}
