mod config;
mod totals;
mod transaction;

pub use config::{DEFAULT_REPORT_TITLE, ReportConfig, ReportMode, SignerSlot};
pub use totals::Totals;
pub use transaction::{Transaction, TransactionKind};

use serde::{Deserialize, Serialize};

/// The whole persisted state of one report: its configuration and the
/// recorded transaction rows. Serialized as a single JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub config: ReportConfig,
    pub transactions: Vec<Transaction>,
}
