pub mod pdf;
pub mod word;

use serde::Serialize;

/// Non-fatal problem hit while building an export. The export still
/// completes; the damaged piece is skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportWarning {
    pub code: String,
    pub message: String,
}

impl ExportWarning {
    pub fn image_skipped(context: &str, detail: &str) -> Self {
        Self {
            code: "image_skipped".to_string(),
            message: format!("Skipped {context}: {detail}"),
        }
    }
}
