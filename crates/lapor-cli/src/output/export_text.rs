use std::io;

use serde_json::Value;

use super::format;

pub fn render_export_word(data: &Value) -> io::Result<String> {
    let file_name = data
        .get("file_name")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("export output requires file_name"))?;
    let variant = data.get("variant").and_then(Value::as_str).unwrap_or("");

    let block_count = data
        .get("document")
        .and_then(|document| document.get("blocks"))
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);

    let mut lines = vec![
        format!("Prepared `{file_name}` ({variant} layout)."),
        String::new(),
    ];
    let entries = [("Blocks:", block_count.to_string())];
    lines.extend(format::key_value_rows(&entries, 2));

    let warnings = data
        .get("warnings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        for warning in &warnings {
            let message = warning.get("message").and_then(Value::as_str).unwrap_or("");
            lines.push(format!("  - {message}"));
        }
    }

    lines.push(String::new());
    lines.extend(destination_lines(data));

    Ok(lines.join("\n"))
}

pub fn render_export_pdf(data: &Value) -> io::Result<String> {
    let file_name = data
        .get("file_name")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("export pdf output requires file_name"))?;
    let plan = data.get("plan").cloned().unwrap_or(Value::Null);
    let capture = data.get("capture").cloned().unwrap_or(Value::Null);

    let page_count = plan
        .get("pages")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    let pages_label = if page_count == 1 { "page" } else { "pages" };

    let mut lines = vec![
        format!("Planned `{file_name}`: {page_count} {pages_label}."),
        String::new(),
    ];
    let entries = [
        (
            "Capture:",
            format!(
                "{}x{} px",
                capture.get("width_px").and_then(Value::as_u64).unwrap_or(0),
                capture.get("height_px").and_then(Value::as_u64).unwrap_or(0),
            ),
        ),
        (
            "Scaled height:",
            format!(
                "{:.1} mm at {:.0} mm width",
                plan.get("image_height_mm")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
                plan.get("image_width_mm")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            ),
        ),
    ];
    lines.extend(format::key_value_rows(&entries, 2));

    lines.push(String::new());
    lines.extend(destination_lines(data));

    Ok(lines.join("\n"))
}

fn destination_lines(data: &Value) -> Vec<String> {
    match data.get("written_to").and_then(Value::as_str) {
        Some(path) => vec![format!("Payload written to `{path}`.")],
        None => vec![
            "Pass --out <path> to write the payload to disk,".to_string(),
            "or --json to print it.".to_string(),
        ],
    }
}
