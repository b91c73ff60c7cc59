pub mod ai;
pub mod commands;
pub mod contracts;
pub mod docmodel;
pub mod error;
pub mod export;
pub mod format;
pub mod images;
pub mod migrations;
pub mod model;
pub mod ops;
pub mod report;
pub mod state;
pub mod store;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
