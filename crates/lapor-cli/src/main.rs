mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use lapor_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Lapor - LPJ (financial accountability report) builder

Usage:
  lapor <command>

Start here:
  lapor config set event \"Nama Kegiatan\"
  lapor tx add \"Konsumsi rapat\" 50000
  lapor report
";

const TOP_LEVEL_HELP: &str = "Lapor — LPJ (financial accountability report) builder

USAGE: lapor <command>

Set up the report:
  lapor config set event \"Pentas Seni 2026\"          Name the event
  lapor config set mode Lengkap                      Switch to the full report layout
  lapor config show                                  Review the stored configuration

Record the money:
  lapor tx add \"Konsumsi rapat\" 50000               Record an expense
  lapor tx add \"Dana sponsor\" 500000 --kind Pemasukan
  lapor scan request nota.jpg                        Extract transactions from a receipt photo
  lapor tx list                                      List transactions with running totals

Write the narrative:
  lapor narrate request                              Build the model request for the chapters
  lapor narrate apply reply.json                     Merge the model's reply

Produce the report:
  lapor report                                       Preview the assembled document
  lapor export word --out lpj.json                   Word payload with embedded receipts
  lapor export gdoc --out lpj.json                   Cloud-docs payload (no images)
  lapor export pdf capture.png                       Plan PDF pages from a rendered capture

Having issues/errors?
  Run `lapor <command> --help` for command usage,
  or add --json to any command for machine-readable output.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if matches!(
                    err.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) && is_top_level_help_request(&raw_args)
                {
                    if write_stdout_text(TOP_LEVEL_HELP).is_err() {
                        return Err(ExitCode::from(2));
                    }
                } else if write_stdout_text(&err.to_string()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                parse_error_with_command_hint(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information"
/// hint) so the "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Builds the subcommand path from raw CLI args for use in help hints,
/// e.g. "tx add" or "export pdf".
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();
    if non_flags.is_empty() {
        return None;
    }

    let hint = match non_flags.as_slice() {
        ["config", "show", ..] => Some("config show"),
        ["config", "set", ..] => Some("config set"),
        ["config", ..] => Some("config"),
        ["tx", "add", ..] => Some("tx add"),
        ["tx", "list", ..] => Some("tx list"),
        ["tx", "remove", ..] => Some("tx remove"),
        ["tx", ..] => Some("tx"),
        ["report", ..] => Some("report"),
        ["narrate", "request", ..] => Some("narrate request"),
        ["narrate", "apply", ..] => Some("narrate apply"),
        ["narrate", ..] => Some("narrate"),
        ["scan", "request", ..] => Some("scan request"),
        ["scan", "apply", ..] => Some("scan apply"),
        ["scan", ..] => Some("scan"),
        ["export", "word", ..] => Some("export word"),
        ["export", "gdoc", ..] => Some("export gdoc"),
        ["export", "pdf", ..] => Some("export pdf"),
        ["export", ..] => Some("export"),
        ["reset", ..] => Some("reset"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn parse_error_with_command_hint(clean_message: &str, command_hint: Option<&str>) -> ClientError {
    // A leading minus reads as a flag to the parser, so `tx add X -5000`
    // surfaces as an unexpected argument rather than a bad amount.
    if command_hint == Some("tx add") && clean_message.contains("unexpected argument") {
        return ClientError::invalid_argument_with_recovery(
            "Amounts are whole rupiah and must not be negative.",
            vec![
                "Record the amount without a sign: `lapor tx add \"Diskon\" 5000`.".to_string(),
                "Discounts only enter as negative rows via `lapor scan apply`.".to_string(),
            ],
        );
    }

    ClientError::invalid_argument_for_command(clean_message, command_hint)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "state_init_permission_denied"
                | "state_locked"
                | "state_file_corrupt"
                | "migration_failed"
                | "state_init_failed"
        )
}
