use std::path::Path;

use crate::ai::{self, receipt};
use crate::commands::CommandOptions;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ScanApplyData, ScanRequestData, TotalsData, TransactionRow};
use crate::error::{ClientError, ClientResult};
use crate::images;
use crate::model::Totals;
use crate::ops::{self, ActionKind};
use crate::store::{StateStore, today};

pub fn request(image: &Path, api_key: Option<&str>) -> ClientResult<SuccessEnvelope> {
    request_with_options(image, api_key, CommandOptions::default())
}

#[doc(hidden)]
pub fn request_with_options(
    image: &Path,
    api_key: Option<&str>,
    _options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let data_uri = images::encode_file(image)?;
    let credential = ai::resolve_credential(api_key);
    let request = receipt::build_request(&data_uri, credential)?;
    success("scan request", ScanRequestData { request })
}

pub fn apply(image: &Path, response_text: &str) -> ClientResult<SuccessEnvelope> {
    apply_with_options(image, response_text, CommandOptions::default())
}

#[doc(hidden)]
pub fn apply_with_options(
    image: &Path,
    response_text: &str,
    options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let data_uri = images::encode_file(image)?;
    let response: serde_json::Value = serde_json::from_str(response_text)
        .map_err(|error| ClientError::ai_response_unreadable(&error.to_string()))?;

    let mut store = StateStore::open(options.home_override)?;
    let _permit = ops::acquire(store.db_path(), ActionKind::Scan)?;
    let mut state = store.load()?;

    let extracted = receipt::parse_response(
        &response,
        &data_uri,
        state.transactions.len(),
        &today(),
    )?;

    let first_new_index = state.transactions.len();
    state.transactions.extend(extracted.iter().cloned());
    store.save(&state)?;

    let added = extracted
        .iter()
        .enumerate()
        .map(|(offset, transaction)| {
            TransactionRow::from_transaction(first_new_index + offset, transaction)
        })
        .collect();
    success(
        "scan apply",
        ScanApplyData {
            added,
            totals: TotalsData::from(Totals::compute(&state.transactions)),
        },
    )
}
