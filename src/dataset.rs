// 📝 Dataset Writer - Canonical input layout via serde_json
//
// Produces the exact layout the scanner expects: one flat record per line,
// keys in schema order (serde field order). Also offers a slow reference
// decode through serde_json, useful to cross-check the fast scanner.

use crate::merge::Dataset;
use crate::model::{Area, Employee};
use anyhow::{Context, Result};
use serde::Serialize;

/// Render employees + areas as an input document
///
/// ```text
/// {
/// "funcionarios":[
/// {"id":1,"nome":"Ana","sobrenome":"Silva","salario":100.0,"area":"EN"}
/// ],
/// "areas":[
/// {"codigo":"EN","nome":"Engenharia"}
/// ]
/// }
/// ```
pub fn render_input(employees: &[Employee], areas: &[Area]) -> Result<String> {
    let mut out = String::from("{\n\"funcionarios\":[\n");
    push_records(&mut out, employees).context("Failed to serialize employees")?;
    out.push_str("],\n\"areas\":[\n");
    push_records(&mut out, areas).context("Failed to serialize areas")?;
    out.push_str("]\n}\n");
    Ok(out)
}

fn push_records<T: Serialize>(out: &mut String, records: &[T]) -> serde_json::Result<()> {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str(&serde_json::to_string(record)?);
    }
    if !records.is_empty() {
        out.push('\n');
    }
    Ok(())
}

/// Decode a document with serde_json (full parser, reference only)
pub fn decode_reference(input: &str) -> Result<Dataset> {
    serde_json::from_str(input).context("Failed to decode input document")
}
