use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `lapor {cmd} --help` for usage."),
            None => "Run `lapor --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn unknown_config_field(field: &str, known_fields: &[&str]) -> Self {
        Self::new(
            "unknown_config_field",
            &format!("Config field `{field}` is not recognized."),
            vec![
                "Run `lapor config set --help` to list settable fields.".to_string(),
                "Run `lapor config show` to inspect the current values.".to_string(),
            ],
        )
        .with_data(json!({
            "field": field,
            "known_fields": known_fields,
        }))
    }

    pub fn transaction_not_found(id: &str) -> Self {
        Self::new(
            "transaction_not_found",
            &format!("Transaction `{id}` was not found."),
            vec![
                "Run `lapor tx list` to find a valid transaction id.".to_string(),
                "Retry with `lapor tx remove <txn-id>`.".to_string(),
            ],
        )
        .with_data(json!({
            "transaction_id": id,
        }))
    }

    pub fn narrative_no_transactions() -> Self {
        Self::new(
            "narrative_no_transactions",
            "Narrative generation needs at least one recorded transaction.",
            vec![
                "Add rows with `lapor tx add` or `lapor scan apply`.".to_string(),
                "Then rerun `lapor narrate request`.".to_string(),
            ],
        )
    }

    pub fn ai_response_unreadable(detail: &str) -> Self {
        Self::new(
            "ai_response_unreadable",
            &format!("AI response is not valid JSON: {detail}"),
            vec![
                "Pass the raw JSON body returned by the service.".to_string(),
                "Retry the service call and apply the fresh response.".to_string(),
            ],
        )
    }

    pub fn ai_response_invalid(detail: &str) -> Self {
        Self::new(
            "ai_response_invalid",
            &format!("AI response does not match the expected shape: {detail}"),
            vec![
                "Retry the service call; no local data was changed.".to_string(),
            ],
        )
    }

    pub fn image_unreadable(path: &str, detail: &str) -> Self {
        Self::new(
            "image_unreadable",
            &format!("Cannot read image `{path}`: {detail}"),
            vec![
                "Check the file path and read permissions.".to_string(),
                "Supported formats: png, jpg, jpeg, webp, gif.".to_string(),
            ],
        )
    }

    pub fn export_capture_invalid(detail: &str) -> Self {
        Self::new(
            "export_capture_invalid",
            &format!("Report capture is not a usable PNG: {detail}"),
            vec![
                "Re-capture the rendered report as a PNG at full height.".to_string(),
                "Wait for logos and receipt images to finish loading before capturing.".to_string(),
            ],
        )
    }

    pub fn export_write_failed(path: &str, detail: &str) -> Self {
        Self::new(
            "export_write_failed",
            &format!("Cannot write export to `{path}`: {detail}"),
            vec![format!("Grant write access to `{path}` or pick another --out path.")],
        )
    }

    pub fn operation_in_progress(slot: &str) -> Self {
        Self::new(
            "operation_in_progress",
            &format!("Another `{slot}` operation is already running against this state."),
            vec![
                "Wait for the running operation to finish, then retry.".to_string(),
                "Stale slots are reclaimed automatically after a few minutes.".to_string(),
            ],
        )
        .with_data(json!({
            "slot": slot,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn state_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "state_init_permission_denied",
            &format!("Cannot initialize report state at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `LAPOR_HOME` to a writable directory."
            )],
        )
    }

    pub fn state_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "state_locked",
            &format!("Report state database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn state_file_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "state_file_corrupt",
            &format!("Report state database appears corrupt at `{location}`."),
            vec![format!(
                "Move `{location}` aside; a fresh state file is created on the next run."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Report state migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn state_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "state_init_failed",
            &format!("Report state initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
