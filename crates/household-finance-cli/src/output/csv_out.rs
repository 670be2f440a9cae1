use serde_json::{Map, Value};
use std::io;

use super::{scalar_text, unwrap_result};

/// Write output as CSV to stdout. The first list of row objects found in
/// the result (schedule, growth points, goals, habit series) is written as
/// a table; otherwise the result is flattened to `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Err(e) = write_csv(&mut wtr, unwrap_result(value)) {
        tracing::error!(error = %e, "CSV output failed");
    }
    if let Err(e) = wtr.flush() {
        tracing::error!(error = %e, "CSV flush failed");
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> csv::Result<()> {
    match result {
        Value::Array(rows) => write_rows(wtr, rows),
        Value::Object(map) => match first_row_list(map) {
            Some(rows) => write_rows(wtr, rows),
            None => {
                wtr.write_record(["field", "value"])?;
                write_flat(wtr, "", map)
            }
        },
        other => wtr.write_record([scalar_text(other, "")]),
    }
}

fn first_row_list(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    map.values().find_map(|v| match v {
        Value::Array(rows) if rows.first().is_some_and(Value::is_object) => Some(rows),
        _ => None,
    })
}

fn write_flat<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &Map<String, Value>,
) -> csv::Result<()> {
    for (key, val) in map {
        let field = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => write_flat(wtr, &field, inner)?,
            _ => wtr.write_record([field.as_str(), &scalar_text(val, "")])?,
        }
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([scalar_text(item, "")])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in rows.iter().filter_map(Value::as_object) {
        wtr.write_record(
            headers
                .iter()
                .map(|h| item.get(*h).map(|v| scalar_text(v, "")).unwrap_or_default()),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(&mut wtr, unwrap_result(value)).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_flat_result_with_nested_object() {
        let out = render(&json!({
            "result": {"monthly_payment": "1401.75", "risk": {"category": "High Risk"}},
            "warnings": []
        }));
        assert_eq!(out, "field,value\nmonthly_payment,1401.75\nrisk.category,High Risk\n");
    }

    #[test]
    fn test_row_list_becomes_table() {
        let out = render(&json!({
            "years": 2,
            "points": [
                {"year": 1, "value": "1200"},
                {"year": 2, "value": "2484"}
            ]
        }));
        assert_eq!(out, "value,year\n1200,1\n2484,2\n");
    }
}
