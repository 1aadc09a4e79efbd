use serde_json::Value;

/// Keys tried, in order, for any calculation other than a tenure solve.
const PRIORITY_KEYS: [&str; 4] = ["error", "solved_rate_pct", "monthly_payment", "total_amount"];

/// Keys tried for a tenure solve, where the month count is the answer.
const TENURE_KEYS: [&str; 2] = ["error", "tenure_months"];

/// Print just the key answer value from the output.
///
/// The priority list depends on the methodology: tenure solves answer with a
/// month count, everything else with a rate or an amount.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let is_tenure = value
        .get("methodology")
        .and_then(Value::as_str)
        .map_or(false, |m| m.contains("Tenure"));
    let keys: &[&str] = if is_tenure { &TENURE_KEYS } else { &PRIORITY_KEYS };

    if let Value::Object(map) = result_obj {
        for key in keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // e.g. a bare schedule: its length is the answer
    if let Value::Array(rows) = result_obj {
        println!("{}", rows.len());
        return;
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
