use std::path::PathBuf;

use chrono::NaiveDate;

use crate::commands::CommandOptions;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TotalsData, TransactionRow, TxAddData, TxListData, TxRemoveData};
use crate::error::{ClientError, ClientResult};
use crate::format;
use crate::images;
use crate::model::{Totals, Transaction, TransactionKind};
use crate::store::{StateStore, today};

#[derive(Debug, Clone)]
pub struct TxAddArgs {
    pub date: Option<String>,
    pub description: String,
    pub amount: i64,
    pub kind: TransactionKind,
    pub label: Option<String>,
    pub receipt: Option<PathBuf>,
}

pub fn add(args: TxAddArgs) -> ClientResult<SuccessEnvelope> {
    add_with_options(args, CommandOptions::default())
}

#[doc(hidden)]
pub fn add_with_options(
    args: TxAddArgs,
    options: CommandOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    // Manual rows are stored uppercase; extracted rows keep title case.
    let description = format::upper(&args.description);
    if description.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Transaction description cannot be empty.",
            Some("tx add"),
        ));
    }
    if args.amount < 0 {
        return Err(ClientError::invalid_argument_with_recovery(
            "Amounts are entered as non-negative whole rupiah.",
            vec![
                "Record a discount by scanning its receipt with `lapor scan apply`.".to_string(),
            ],
        ));
    }

    let date = match args.date {
        Some(date) => validate_date(&date)?,
        None => today(),
    };
    let receipt = args
        .receipt
        .as_deref()
        .map(images::encode_file)
        .transpose()?;

    let mut store = StateStore::open(options.home_override)?;
    let mut state = store.load()?;
    let transaction = Transaction {
        id: Transaction::new_id(),
        date,
        description,
        kind: args.kind,
        amount: args.amount,
        display_label: args.label,
        receipt,
    };
    state.transactions.push(transaction.clone());
    store.save(&state)?;

    let index = state.transactions.len() - 1;
    success(
        "tx add",
        TxAddData {
            transaction: TransactionRow::from_transaction(index, &transaction),
            totals: TotalsData::from(Totals::compute(&state.transactions)),
        },
    )
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(CommandOptions::default())
}

#[doc(hidden)]
pub fn list_with_options(options: CommandOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = StateStore::open(options.home_override)?;
    let state = store.load()?;
    let transactions = state
        .transactions
        .iter()
        .enumerate()
        .map(|(index, transaction)| TransactionRow::from_transaction(index, transaction))
        .collect();
    success(
        "tx list",
        TxListData {
            transactions,
            totals: TotalsData::from(Totals::compute(&state.transactions)),
        },
    )
}

pub fn remove(id: &str) -> ClientResult<SuccessEnvelope> {
    remove_with_options(id, CommandOptions::default())
}

#[doc(hidden)]
pub fn remove_with_options(id: &str, options: CommandOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut store = StateStore::open(options.home_override)?;
    let mut state = store.load()?;
    let before = state.transactions.len();
    state.transactions.retain(|transaction| transaction.id != id);
    if state.transactions.len() == before {
        return Err(ClientError::transaction_not_found(id));
    }
    store.save(&state)?;
    success(
        "tx remove",
        TxRemoveData {
            removed_id: id.to_string(),
            totals: TotalsData::from(Totals::compute(&state.transactions)),
        },
    )
}

fn validate_date(value: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_with_recovery(
            &format!("Date `{value}` is not a valid ISO date."),
            vec!["Use the form YYYY-MM-DD, e.g. 2026-08-17.".to_string()],
        )
    })?;
    Ok(trimmed.to_string())
}
