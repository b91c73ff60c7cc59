use serde::Serialize;

use super::{Transaction, TransactionKind};

/// Signed per-kind sums over the recorded rows. Exact integer arithmetic:
/// a negative discount row nets directly against its kind's total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

impl Totals {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut income: i64 = 0;
        let mut expense: i64 = 0;
        for transaction in transactions {
            match transaction.kind {
                TransactionKind::Income => income += transaction.amount,
                TransactionKind::Expense => expense += transaction.amount,
            }
        }
        Totals {
            income,
            expense,
            balance: income - expense,
        }
    }
}
