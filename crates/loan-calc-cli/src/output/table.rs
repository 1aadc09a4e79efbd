use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Result fields printed as their own tables rather than Field/Value rows.
const NESTED_FIELDS: [&str; 2] = ["breakdown", "schedule"];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    let res_map = match result {
        Value::Object(m) => m,
        _ => {
            print_flat_object(envelope);
            return;
        }
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in res_map {
        if NESTED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));

    if let Some(Value::Array(breakdown)) = res_map.get("breakdown") {
        if !breakdown.is_empty() {
            println!("\nBreakdown:");
            print_array_table(breakdown);
        }
    }

    if let Some(Value::Array(schedule)) = res_map.get("schedule") {
        println!("\nSchedule ({} months):", schedule.len());
        print_array_table(schedule);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let headers: Vec<String> = match arr.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => {
            for item in arr {
                println!("{}", format_value(item));
            }
            return;
        }
    };

    let mut builder = Builder::default();
    builder.push_record(&headers);
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => round_money(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Decimal strings shown to two places; anything else passes through.
fn round_money(s: &str) -> String {
    match s.parse::<rust_decimal::Decimal>() {
        Ok(d) if d.scale() > 2 => d.round_dp(2).to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_display() {
        assert_eq!(round_money("8884.878867"), "8884.88");
        assert_eq!(round_money("1000"), "1000");
        assert_eq!(round_money("Principal"), "Principal");
    }

    #[test]
    fn test_format_value_joins_arrays() {
        let v = serde_json::json!(["a", 1, true]);
        assert_eq!(format_value(&v), "a, 1, true");
    }
}
