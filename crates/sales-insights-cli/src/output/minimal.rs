use serde_json::Value;

/// Label fields, in the order they are concatenated.
const LABEL_KEYS: [&str; 4] = ["month_label", "branch", "name", "product_name"];

/// Metric fields, first match wins.
const METRIC_KEYS: [&str; 7] = [
    "share_pct",
    "avg_ticket",
    "revenue",
    "measure_sum",
    "total",
    "unique_customers",
    "count",
];

/// Print one terse line per row: its labels and its leading metric.
pub fn print_minimal(value: &Value) {
    match value {
        Value::Array(arr) => {
            for item in arr {
                print_row(item);
            }
        }
        _ => print_row(value),
    }
}

fn print_row(value: &Value) {
    if let Value::Object(map) = value {
        let mut parts: Vec<String> = Vec::new();
        for key in LABEL_KEYS {
            if let Some(v) = map.get(key) {
                parts.push(plain(v));
            }
        }
        for key in METRIC_KEYS {
            if let Some(v) = map.get(key) {
                parts.push(plain(v));
                break;
            }
        }
        if parts.is_empty() {
            println!("{}", value);
        } else {
            println!("{}", parts.join(" "));
        }
    } else {
        println!("{}", value);
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
