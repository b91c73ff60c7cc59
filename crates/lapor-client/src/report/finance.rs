use serde::Serialize;

use crate::format;
use crate::model::{Totals, Transaction, TransactionKind};

pub const SUBTOTAL_LABEL: &str = "SUBTOTAL KAS";
pub const BALANCE_LABEL: &str = "SALDO AKHIR PANITIA";
pub const EMPTY_TABLE_NOTICE: &str = "Belum ada transaksi terekam.";
pub const COLUMN_HEADINGS: [&str; 5] = ["No", "Tanggal", "Deskripsi", "Debit", "Kredit"];

/// One display row of the finance table. Amount strings are already
/// rupiah-formatted; a `None` column renders as `-`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceRow {
    pub label: String,
    pub date: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceTable {
    pub rows: Vec<FinanceRow>,
    pub totals: Totals,
    pub subtotal_income: String,
    pub subtotal_expense: String,
    pub balance: String,
}

pub fn build_table(transactions: &[Transaction]) -> FinanceTable {
    let totals = Totals::compute(transactions);
    let rows = transactions
        .iter()
        .enumerate()
        .map(|(index, transaction)| build_row(index, transaction))
        .collect();
    FinanceTable {
        rows,
        totals,
        subtotal_income: format::rupiah(totals.income),
        subtotal_expense: format::rupiah(totals.expense),
        balance: format::rupiah(totals.balance),
    }
}

fn build_row(index: usize, transaction: &Transaction) -> FinanceRow {
    let label = transaction
        .display_label
        .clone()
        .unwrap_or_else(|| (index + 1).to_string());
    let amount = format::rupiah(transaction.amount.abs());

    // A positive amount sits in its kind's natural column. A negative amount
    // (an extracted discount) flips into the opposite column as money moving
    // the other way, so no row ever shows a minus sign.
    let natural = transaction.amount >= 0;
    let (debit, credit) = match transaction.kind {
        TransactionKind::Income if natural => (Some(amount), None),
        TransactionKind::Income => (None, Some(amount)),
        TransactionKind::Expense if natural => (None, Some(amount)),
        TransactionKind::Expense => (Some(amount), None),
    };

    FinanceRow {
        label,
        date: transaction.date.clone(),
        description: format::upper(&transaction.description),
        debit,
        credit,
    }
}
