use std::path::Path;

use chrono::NaiveDate;

use crate::commands::CommandOptions;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ConfigSetData, ConfigShowData};
use crate::error::{ClientError, ClientResult};
use crate::images;
use crate::model::{ReportConfig, ReportMode};
use crate::store::StateStore;

pub const KNOWN_FIELDS: [&str; 25] = [
    "mode",
    "title",
    "event",
    "organization",
    "date",
    "location",
    "logo",
    "signer1-name",
    "signer1-title",
    "signer2-name",
    "signer2-title",
    "signer3-name",
    "signer3-title",
    "signer4-name",
    "signer4-title",
    "background",
    "conclusion",
    "objective",
    "audience",
    "time-place",
    "participants",
    "mechanism",
    "outcome",
    "obstacles",
    "recommendations",
];

pub fn show() -> ClientResult<SuccessEnvelope> {
    show_with_options(CommandOptions::default())
}

#[doc(hidden)]
pub fn show_with_options(options: CommandOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = StateStore::open(options.home_override)?;
    let state = store.load()?;
    success(
        "config show",
        ConfigShowData {
            storage_path: store.db_path().display().to_string(),
            transaction_count: state.transactions.len(),
            config: state.config,
        },
    )
}

pub fn set(field: &str, value: &str) -> ClientResult<SuccessEnvelope> {
    set_with_options(field, value, CommandOptions::default())
}

#[doc(hidden)]
pub fn set_with_options(
    field: &str,
    value: &str,
    options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let mut store = StateStore::open(options.home_override)?;
    let mut state = store.load()?;
    apply_field(&mut state.config, field, value)?;
    store.save(&state)?;
    success(
        "config set",
        ConfigSetData {
            field: field.to_string(),
            config: state.config,
        },
    )
}

fn apply_field(config: &mut ReportConfig, field: &str, value: &str) -> ClientResult<()> {
    match field {
        "mode" => config.mode = parse_mode(value)?,
        "title" => config.title = value.to_string(),
        "event" => config.event_name = value.to_string(),
        "organization" => config.organization_name = value.to_string(),
        "date" => config.report_date = parse_date(value)?,
        "location" => config.location = value.to_string(),
        "logo" => {
            config.logo = if value.trim().is_empty() {
                None
            } else {
                Some(images::encode_file(Path::new(value))?)
            };
        }
        "signer1-name" => config.signers[0].name = value.to_string(),
        "signer1-title" => config.signers[0].title = value.to_string(),
        "signer2-name" => config.signers[1].name = value.to_string(),
        "signer2-title" => config.signers[1].title = value.to_string(),
        "signer3-name" => config.signers[2].name = value.to_string(),
        "signer3-title" => config.signers[2].title = value.to_string(),
        "signer4-name" => config.signers[3].name = value.to_string(),
        "signer4-title" => config.signers[3].title = value.to_string(),
        "background" => config.background = value.to_string(),
        "conclusion" => config.conclusion = value.to_string(),
        "objective" => config.objective = value.to_string(),
        "audience" => config.audience = value.to_string(),
        "time-place" => config.time_place = value.to_string(),
        "participants" => config.participants = value.to_string(),
        "mechanism" => config.mechanism = value.to_string(),
        "outcome" => config.outcome = value.to_string(),
        "obstacles" => config.obstacles = value.to_string(),
        "recommendations" => config.recommendations = value.to_string(),
        unknown => return Err(ClientError::unknown_config_field(unknown, &KNOWN_FIELDS)),
    }
    Ok(())
}

fn parse_mode(value: &str) -> ClientResult<ReportMode> {
    let normalized = value.trim();
    if let Some(mode) = ReportMode::parse_label(normalized) {
        return Ok(mode);
    }
    match normalized.to_lowercase().as_str() {
        "cepat" | "quick" => Ok(ReportMode::Quick),
        "lengkap" | "full" => Ok(ReportMode::Full),
        _ => Err(ClientError::invalid_argument_with_recovery(
            &format!("Mode `{value}` is not recognized."),
            vec!["Use `Cepat` (quick) or `Lengkap` (full).".to_string()],
        )),
    }
}

fn parse_date(value: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_with_recovery(
            &format!("Date `{value}` is not a valid ISO date."),
            vec!["Use the form YYYY-MM-DD, e.g. 2026-08-17.".to_string()],
        )
    })?;
    Ok(trimmed.to_string())
}
