use std::io;

use serde_json::Value;

use super::format;

pub fn render_config_show(data: &Value) -> io::Result<String> {
    let config = config_object(data)?;

    let mut lines = vec!["Report configuration:".to_string(), String::new()];

    let mut entries = vec![
        ("Storage:", text_field(data, "storage_path")),
        (
            "Transactions:",
            data.get("transaction_count")
                .and_then(Value::as_i64)
                .unwrap_or(0)
                .to_string(),
        ),
        ("Mode:", text_field(config, "mode")),
        ("Title:", text_field(config, "title")),
        ("Event:", placeholder_if_empty(text_field(config, "event_name"))),
        (
            "Organization:",
            placeholder_if_empty(text_field(config, "organization_name")),
        ),
        ("Date:", text_field(config, "report_date")),
        ("Location:", placeholder_if_empty(text_field(config, "location"))),
    ];
    entries.push((
        "Logo:",
        if config.get("logo").is_some_and(|logo| !logo.is_null()) {
            "attached".to_string()
        } else {
            "(none)".to_string()
        },
    ));
    lines.extend(format::key_value_rows(&entries, 2));

    lines.push(String::new());
    lines.push("Signers:".to_string());
    lines.extend(render_signer_rows(config));

    lines.push(String::new());
    lines.push("Narrative fields:".to_string());
    lines.extend(render_narrative_rows(config));

    Ok(lines.join("\n"))
}

pub fn render_config_set(data: &Value) -> io::Result<String> {
    let field = data
        .get("field")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("config set output requires field"))?;
    let config = config_object(data)?;

    let mut lines = vec![format!("Updated `{field}`."), String::new()];
    let entries = [
        ("Mode:", text_field(config, "mode")),
        ("Event:", placeholder_if_empty(text_field(config, "event_name"))),
        ("Date:", text_field(config, "report_date")),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());
    lines.push("Run `lapor config show` for the full configuration.".to_string());

    Ok(lines.join("\n"))
}

pub fn render_reset(data: &Value) -> io::Result<String> {
    let cleared = data
        .get("cleared_transactions")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    let count_line = if cleared == 1 {
        "Cleared 1 transaction and the generated narrative.".to_string()
    } else {
        format!("Cleared {cleared} transactions and the generated narrative.")
    };

    Ok([
        count_line.as_str(),
        "Event name, signers, and other identity fields were kept.",
    ]
    .join("\n"))
}

fn render_signer_rows(config: &Value) -> Vec<String> {
    let Some(signers) = config.get("signers").and_then(Value::as_array) else {
        return vec!["  (none)".to_string()];
    };

    signers
        .iter()
        .enumerate()
        .map(|(index, signer)| {
            let title = signer.get("title").and_then(Value::as_str).unwrap_or("");
            let name = signer.get("name").and_then(Value::as_str).unwrap_or("");
            let name = if name.trim().is_empty() {
                "(unnamed)"
            } else {
                name
            };
            format!("  {}. {title}: {name}", index + 1)
        })
        .collect()
}

fn render_narrative_rows(config: &Value) -> Vec<String> {
    const FIELDS: [(&str, &str); 10] = [
        ("background", "Background"),
        ("objective", "Objective"),
        ("audience", "Audience"),
        ("time_place", "Time and place"),
        ("participants", "Participants"),
        ("mechanism", "Mechanism"),
        ("outcome", "Outcome"),
        ("obstacles", "Obstacles"),
        ("recommendations", "Recommendations"),
        ("conclusion", "Conclusion"),
    ];

    let entries = FIELDS
        .iter()
        .map(|(key, label)| {
            let filled = config
                .get(*key)
                .and_then(Value::as_str)
                .is_some_and(|value| !value.trim().is_empty());
            let status = if filled { "filled" } else { "empty" };
            (format!("{label}:"), status.to_string())
        })
        .collect::<Vec<(String, String)>>();

    let borrowed = entries
        .iter()
        .map(|(label, status)| (label.as_str(), status.clone()))
        .collect::<Vec<(&str, String)>>();
    format::key_value_rows(&borrowed, 2)
}

fn config_object(data: &Value) -> io::Result<&Value> {
    data.get("config")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("config output requires a config object"))
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn placeholder_if_empty(value: String) -> String {
    if value.trim().is_empty() {
        "(not set)".to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_config_set, render_config_show, render_reset};

    #[test]
    fn config_show_lists_identity_signers_and_narrative_status() {
        let data = json!({
            "storage_path": "/tmp/lapor/state.db",
            "transaction_count": 2,
            "config": {
                "mode": "Cepat",
                "title": "LAPORAN PERTANGGUNGJAWABAN",
                "event_name": "Pentas Seni",
                "organization_name": "",
                "report_date": "2026-08-05",
                "location": "",
                "logo": null,
                "signers": [
                    {"name": "Budi", "title": "Ketua Panitia"},
                    {"name": "", "title": "Bendahara"},
                    {"name": "", "title": ""},
                    {"name": "", "title": ""}
                ],
                "background": "Latar belakang.",
                "conclusion": ""
            }
        });

        let rendered = render_config_show(&data).unwrap();
        assert!(rendered.contains("Transactions:"));
        assert!(rendered.contains("Pentas Seni"));
        assert!(rendered.contains("1. Ketua Panitia: Budi"));
        assert!(rendered.contains("2. Bendahara: (unnamed)"));
        assert!(rendered.contains("Background:"));
        assert!(rendered.contains("(not set)"));
    }

    #[test]
    fn config_set_confirms_the_field() {
        let data = json!({
            "field": "event",
            "config": {"mode": "Cepat", "event_name": "Pentas Seni", "report_date": "2026-08-05"}
        });

        let rendered = render_config_set(&data).unwrap();
        assert!(rendered.starts_with("Updated `event`."));
        assert!(rendered.contains("Pentas Seni"));
    }

    #[test]
    fn reset_reports_the_cleared_count() {
        let rendered = render_reset(&json!({"cleared_transactions": 2})).unwrap();
        assert!(rendered.starts_with("Cleared 2 transactions"));

        let one = render_reset(&json!({"cleared_transactions": 1})).unwrap();
        assert!(one.starts_with("Cleared 1 transaction "));
    }
}
