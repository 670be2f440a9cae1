use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{scalar_text, unwrap_result};

/// Format output as tables. Scalar fields form a Field/Value table; every
/// array of objects (schedule rows, growth points, goals) gets its own table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if is_report(map) => {
            for (name, section) in map {
                match section {
                    Value::Object(_) | Value::Array(_) => {
                        println!("\n{}", name.bold());
                        print_section(section);
                    }
                    other => println!("{}: {}", name.bold(), scalar_text(other, "")),
                }
            }
        }
        _ => print_section(value),
    }
}

/// A dashboard report: several computation envelopes side by side.
fn is_report(map: &Map<String, Value>) -> bool {
    !map.contains_key("result")
        && map
            .values()
            .any(|v| v.as_object().is_some_and(|m| m.contains_key("result")))
}

fn print_section(value: &Value) {
    match unwrap_result(value) {
        Value::Object(result) => print_object(result),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", scalar_text(other, "null")),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("{}", "Warnings:".yellow());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(&String, &Vec<Value>)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                nested.push((key, rows));
            }
            Value::Object(inner) => {
                for (sub, v) in inner {
                    builder.push_record([format!("{key}.{sub}"), scalar_text(v, "")]);
                }
            }
            _ => builder.push_record([key.clone(), scalar_text(val, "null")]),
        }
    }
    println!("{}", Table::from(builder));

    for (key, rows) in nested {
        println!("\n{key}");
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", scalar_text(item, "null"));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| item.get(h).map(|v| scalar_text(v, "")).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
