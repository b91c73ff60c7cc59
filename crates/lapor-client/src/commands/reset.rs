use crate::commands::CommandOptions;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ResetData;
use crate::error::ClientResult;
use crate::store::StateStore;

/// Clears the transaction list, every narrative field, and the logo. Event
/// identity, signers, and mode are kept so the next report starts from the
/// same organization setup.
pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(CommandOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: CommandOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut store = StateStore::open(options.home_override)?;
    let mut state = store.load()?;
    let cleared_transactions = state.transactions.len();
    state.transactions.clear();
    state.config.clear_narrative();
    state.config.logo = None;
    store.save(&state)?;
    success("reset", ResetData { cleared_transactions })
}
