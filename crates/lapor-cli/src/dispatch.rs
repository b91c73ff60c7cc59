use std::fs;
use std::io::Read;
use std::path::Path;

use lapor_client::commands::{self, tx::TxAddArgs};
use lapor_client::{ClientError, ClientResult, SuccessEnvelope};
use serde_json::Value;

use crate::cli::{Cli, Commands, ConfigCommand, ExportCommand, NarrateCommand, ScanCommand, TxCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Config { command } => match command {
            ConfigCommand::Show { .. } => commands::config::show(),
            ConfigCommand::Set { field, value, .. } => commands::config::set(field, value),
        },
        Commands::Tx { command } => match command {
            TxCommand::Add {
                description,
                amount,
                kind,
                date,
                label,
                receipt,
                json: _,
            } => commands::tx::add(TxAddArgs {
                date: date.as_ref().map(|value| value.as_str().to_string()),
                description: description.clone(),
                amount: *amount,
                kind: *kind,
                label: label.clone(),
                receipt: receipt.clone(),
            }),
            TxCommand::List { .. } => commands::tx::list(),
            TxCommand::Remove { id, .. } => commands::tx::remove(id),
        },
        Commands::Report { .. } => commands::report::run(),
        Commands::Narrate { command } => match command {
            NarrateCommand::Request { api_key, .. } => {
                commands::narrate::request(api_key.as_deref())
            }
            NarrateCommand::Apply { response, .. } => {
                let body = read_response_body(response)?;
                commands::narrate::apply(&body)
            }
        },
        Commands::Scan { command } => match command {
            ScanCommand::Request { image, api_key, .. } => {
                commands::scan::request(image, api_key.as_deref())
            }
            ScanCommand::Apply { image, response, .. } => {
                let body = read_response_body(response)?;
                commands::scan::apply(image, &body)
            }
        },
        Commands::Export { command } => match command {
            ExportCommand::Word { out, .. } => write_out(commands::export::word()?, out.as_deref()),
            ExportCommand::Gdoc { out, .. } => write_out(commands::export::gdoc()?, out.as_deref()),
            ExportCommand::Pdf { capture, out, .. } => {
                write_out(commands::export::pdf(capture)?, out.as_deref())
            }
        },
        Commands::Reset { yes, .. } => {
            if !*yes {
                return Err(reset_needs_confirmation());
            }
            commands::reset::run()
        }
    }
}

/// Reads a model reply from a file path, or from stdin when the path is `-`.
fn read_response_body(source: &str) -> ClientResult<String> {
    if source == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .map_err(|error| response_read_error("stdin", &error.to_string()))?;
        return Ok(body);
    }

    fs::read_to_string(source)
        .map_err(|error| response_read_error(source, &error.to_string()))
}

fn response_read_error(source: &str, detail: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        &format!("Cannot read the model reply from `{source}`: {detail}"),
        vec![
            "Pass the path of a file holding the model's JSON reply.".to_string(),
            "Or pipe the reply in: `cat reply.json | lapor narrate apply -`.".to_string(),
        ],
    )
}

fn reset_needs_confirmation() -> ClientError {
    ClientError::invalid_argument_with_recovery(
        "Reset deletes every recorded transaction and the generated narrative.",
        vec![
            "Re-run with confirmation: `lapor reset --yes`.".to_string(),
            "Run `lapor tx list` first if you want to review what will be lost.".to_string(),
        ],
    )
}

/// With `--out`, the full data payload is also written to disk and the
/// envelope records where it landed.
fn write_out(mut success: SuccessEnvelope, out: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let Some(path) = out else {
        return Ok(success);
    };

    let body = serde_json::to_string_pretty(&success.data)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    fs::write(path, body)
        .map_err(|error| ClientError::export_write_failed(&path.display().to_string(), &error.to_string()))?;

    if let Value::Object(data) = &mut success.data {
        data.insert(
            "written_to".to_string(),
            Value::String(path.display().to_string()),
        );
    }
    Ok(success)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lapor_client::contracts::envelope::success;
    use serde_json::json;
    use tempfile::tempdir;

    use crate::cli::parse_from;

    use super::{dispatch, read_response_body, write_out};

    #[test]
    fn reset_without_yes_is_refused() {
        let parsed = parse_from(["lapor", "reset"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let error = dispatch(&cli).unwrap_err();
            assert_eq!(error.code, "invalid_argument");
            assert!(error.recovery_steps.iter().any(|step| step.contains("--yes")));
        }
    }

    #[test]
    fn response_body_reads_from_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reply.json");
        fs::write(&path, "{\"background\":\"...\"}").unwrap();

        let body = read_response_body(path.to_str().unwrap()).unwrap();
        assert!(body.contains("background"));
    }

    #[test]
    fn missing_response_file_fails_cleanly() {
        let error = read_response_body("/nonexistent/reply.json").unwrap_err();
        assert_eq!(error.code, "invalid_argument");
    }

    #[test]
    fn write_out_records_the_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lpj.json");
        let envelope = success("export word", json!({"file_name": "LPJ_Laporan.docx"})).unwrap();

        let written = write_out(envelope, Some(&path)).unwrap();
        assert_eq!(
            written.data["written_to"],
            json!(path.display().to_string())
        );
        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["file_name"], "LPJ_Laporan.docx");
    }

    #[test]
    fn write_out_rejects_unwritable_paths() {
        let envelope = success("export word", json!({})).unwrap();
        let error = write_out(envelope, Some("/nonexistent/dir/lpj.json".as_ref())).unwrap_err();
        assert_eq!(error.code, "export_write_failed");
    }
}
