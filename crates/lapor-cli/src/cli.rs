use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lapor_client::model::TransactionKind;

const NARRATE_APPLY_AFTER_HELP: &str = "\
RESPONSE FORMAT

`narrate apply` expects the raw JSON object the model returned for a
`narrate request` payload: one string value per requested field, e.g.

  { \"background\": \"...\", \"conclusion\": \"...\" }

Pass the reply as a file path, or `-` to read it from stdin. Fields that
are missing or empty in the reply keep their current value.
";

const SCAN_APPLY_AFTER_HELP: &str = "\
RESPONSE FORMAT

`scan apply` expects the raw JSON object the model returned for a
`scan request` payload:

  { \"transactions\": [ { \"date\": \"YYYY-MM-DD\", \"description\": \"...\",
      \"amount\": 18500, \"type\": \"Pengeluaran\" }, ... ] }

Pass the reply as a file path, or `-` to read it from stdin. The batch is
applied whole: if any row is malformed, nothing is recorded.
";

#[derive(Debug, Parser)]
#[command(
    name = "lapor",
    version,
    about = "Penyusun LPJ - builds financial accountability reports from the terminal",
    disable_help_subcommand = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show or change the report configuration
    #[command(arg_required_else_help = true)]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Record, list, and remove ledger transactions
    #[command(arg_required_else_help = true)]
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },
    /// Assemble the report document from the current configuration and ledger
    Report {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Draft the narrative chapters with a language model
    #[command(arg_required_else_help = true)]
    Narrate {
        #[command(subcommand)]
        command: NarrateCommand,
    },
    /// Extract transactions from a photographed receipt
    #[command(arg_required_else_help = true)]
    Scan {
        #[command(subcommand)]
        command: ScanCommand,
    },
    /// Export the report for Word, cloud documents, or PDF
    #[command(arg_required_else_help = true)]
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
    /// Clear all transactions and generated narrative, keeping event identity
    Reset {
        /// Confirm that recorded transactions may be deleted
        #[arg(long)]
        yes: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Show the stored configuration and where it lives on disk
    Show {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Set one configuration field (e.g. `lapor config set event "Pentas Seni"`)
    Set {
        /// Field name, e.g. event, mode, date, signer1-name
        field: String,
        /// New value; an empty value clears optional fields
        value: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TxCommand {
    /// Record a transaction in the ledger
    Add {
        /// What the money was for
        description: String,
        /// Amount in whole rupiah, never negative
        amount: i64,
        /// Transaction kind: Pemasukan (income) or Pengeluaran (expense)
        #[arg(long, value_parser = parse_kind, default_value = "Pengeluaran")]
        kind: TransactionKind,
        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Override the row label shown in the report table
        #[arg(long)]
        label: Option<String>,
        /// Attach a receipt image (png, jpg, webp, or gif)
        #[arg(long)]
        receipt: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List recorded transactions with running totals
    List {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Remove one transaction by its id (e.g. txn_01J8...)
    Remove {
        /// The transaction id to remove
        id: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum NarrateCommand {
    /// Build the model request payload for the narrative chapters
    Request {
        /// API key for the model call; falls back to LAPOR_API_KEY
        #[arg(long)]
        api_key: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Merge a model reply into the report configuration
    #[command(after_long_help = NARRATE_APPLY_AFTER_HELP)]
    Apply {
        /// Path to the model's JSON reply, or `-` for stdin
        response: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ScanCommand {
    /// Build the model request payload for a receipt image
    Request {
        /// Path to the receipt image
        image: PathBuf,
        /// API key for the model call; falls back to LAPOR_API_KEY
        #[arg(long)]
        api_key: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Record the transactions a model extracted from a receipt
    #[command(after_long_help = SCAN_APPLY_AFTER_HELP)]
    Apply {
        /// Path to the receipt image the reply was produced from
        image: PathBuf,
        /// Path to the model's JSON reply, or `-` for stdin
        response: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ExportCommand {
    /// Build the Word document with embedded receipt images
    Word {
        /// Write the document payload to a file instead of only printing a summary
        #[arg(long)]
        out: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Build the cloud-docs Word document (no embedded images)
    Gdoc {
        /// Write the document payload to a file instead of only printing a summary
        #[arg(long)]
        out: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Plan PDF pages from a rendered report capture (PNG)
    Pdf {
        /// Path to the full-height PNG capture of the rendered report
        capture: PathBuf,
        /// Write the page plan payload to a file instead of only printing a summary
        #[arg(long)]
        out: Option<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

/// A date argument already validated as YYYY-MM-DD.
#[derive(Debug, Clone)]
pub struct IsoDate(String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| IsoDate(value.to_string()))
        .map_err(|_| format!("`{value}` is not a valid date (expected YYYY-MM-DD)"))
}

fn parse_kind(value: &str) -> Result<TransactionKind, String> {
    match value.trim().to_lowercase().as_str() {
        "pemasukan" | "income" | "masuk" => Ok(TransactionKind::Income),
        "pengeluaran" | "expense" | "keluar" => Ok(TransactionKind::Expense),
        other => Err(format!(
            "unknown transaction kind `{other}` (use Pemasukan or Pengeluaran)"
        )),
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
