use crate::commands::CommandOptions;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ReportData;
use crate::error::ClientResult;
use crate::report;
use crate::store::StateStore;

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(CommandOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: CommandOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = StateStore::open(options.home_override)?;
    let state = store.load()?;
    let document = report::assemble(&state.config, &state.transactions);
    success("report", ReportData { document })
}
