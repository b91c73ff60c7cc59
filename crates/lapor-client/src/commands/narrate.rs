use crate::ai::{self, narrative};
use crate::commands::CommandOptions;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{NarrateApplyData, NarrateRequestData};
use crate::error::{ClientError, ClientResult};
use crate::ops::{self, ActionKind};
use crate::store::StateStore;

pub fn request(api_key: Option<&str>) -> ClientResult<SuccessEnvelope> {
    request_with_options(api_key, CommandOptions::default())
}

#[doc(hidden)]
pub fn request_with_options(
    api_key: Option<&str>,
    options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let store = StateStore::open(options.home_override)?;
    let state = store.load()?;
    let credential = ai::resolve_credential(api_key);
    let request = narrative::build_request(&state.config, &state.transactions, credential)?;
    success("narrate request", NarrateRequestData { request })
}

pub fn apply(response_text: &str) -> ClientResult<SuccessEnvelope> {
    apply_with_options(response_text, CommandOptions::default())
}

#[doc(hidden)]
pub fn apply_with_options(
    response_text: &str,
    options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let mut store = StateStore::open(options.home_override)?;
    let response: serde_json::Value = serde_json::from_str(response_text)
        .map_err(|error| ClientError::ai_response_unreadable(&error.to_string()))?;

    let _permit = ops::acquire(store.db_path(), ActionKind::Narrate)?;
    let mut state = store.load()?;
    let merge = narrative::merge_response(&mut state.config, &response)?;
    store.save(&state)?;

    success(
        "narrate apply",
        NarrateApplyData {
            mode: state.config.mode.label().to_string(),
            applied: merge.applied,
            skipped: merge.skipped,
        },
    )
}
