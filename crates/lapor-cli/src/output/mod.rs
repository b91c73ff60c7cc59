mod ai_text;
mod config_text;
mod error_text;
mod export_text;
mod format;
mod json;
mod mode;
mod report_text;
mod tx_text;

use std::io;

use lapor_client::{ClientError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    println!("{body}");
    Ok(())
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    println!("{body}");
    Ok(())
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "config show" => config_text::render_config_show(&success.data),
        "config set" => config_text::render_config_set(&success.data),
        "tx add" => tx_text::render_tx_add(&success.data),
        "tx list" => tx_text::render_tx_list(&success.data),
        "tx remove" => tx_text::render_tx_remove(&success.data),
        "report" => report_text::render_report(&success.data),
        "narrate request" => ai_text::render_narrate_request(&success.data),
        "narrate apply" => ai_text::render_narrate_apply(&success.data),
        "scan request" => ai_text::render_scan_request(&success.data),
        "scan apply" => ai_text::render_scan_apply(&success.data),
        "export word" | "export gdoc" => export_text::render_export_word(&success.data),
        "export pdf" => export_text::render_export_pdf(&success.data),
        "reset" => config_text::render_reset(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
