use std::fs;
use std::path::Path;

use crate::commands::CommandOptions;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ExportPdfData, ExportWordData};
use crate::error::{ClientError, ClientResult};
use crate::export::pdf;
use crate::export::word::{self, WordVariant};
use crate::ops::{self, ActionKind};
use crate::report;
use crate::store::StateStore;

pub fn word() -> ClientResult<SuccessEnvelope> {
    word_with_options(CommandOptions::default())
}

#[doc(hidden)]
pub fn word_with_options(options: CommandOptions<'_>) -> ClientResult<SuccessEnvelope> {
    build_word("export word", "word", WordVariant::Generic, ActionKind::ExportWord, options)
}

pub fn gdoc() -> ClientResult<SuccessEnvelope> {
    gdoc_with_options(CommandOptions::default())
}

#[doc(hidden)]
pub fn gdoc_with_options(options: CommandOptions<'_>) -> ClientResult<SuccessEnvelope> {
    build_word("export gdoc", "gdoc", WordVariant::CloudDocs, ActionKind::ExportCloud, options)
}

fn build_word(
    command: &str,
    variant_label: &str,
    variant: WordVariant,
    action: ActionKind,
    options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let store = StateStore::open(options.home_override)?;
    let _permit = ops::acquire(store.db_path(), action)?;
    let state = store.load()?;
    let document = report::assemble(&state.config, &state.transactions);
    let export = word::build(&document, variant);
    success(
        command,
        ExportWordData {
            file_name: format!("{}.docx", document.file_stem),
            variant: variant_label.to_string(),
            document: export.document,
            warnings: export.warnings,
        },
    )
}

pub fn pdf(capture: &Path) -> ClientResult<SuccessEnvelope> {
    pdf_with_options(capture, CommandOptions::default())
}

#[doc(hidden)]
pub fn pdf_with_options(
    capture: &Path,
    options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let store = StateStore::open(options.home_override)?;
    let _permit = ops::acquire(store.db_path(), ActionKind::ExportPdf)?;
    let state = store.load()?;
    let document = report::assemble(&state.config, &state.transactions);

    let bytes = fs::read(capture)
        .map_err(|error| ClientError::export_capture_invalid(&error.to_string()))?;
    let capture = pdf::capture_from_png(&bytes)?;
    let plan = pdf::plan_pages(&capture)?;

    success(
        "export pdf",
        ExportPdfData {
            file_name: format!("{}.pdf", document.file_stem),
            plan,
            capture,
        },
    )
}
