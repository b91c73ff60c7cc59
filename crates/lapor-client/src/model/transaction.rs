use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "Pemasukan")]
    Income,
    #[serde(rename = "Pengeluaran")]
    Expense,
}

impl TransactionKind {
    /// The Indonesian label used on the wire and in rendered documents.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Pemasukan",
            TransactionKind::Expense => "Pengeluaran",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim() {
            "Pemasukan" => Some(TransactionKind::Income),
            "Pengeluaran" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// One recorded cash movement. Amounts are whole rupiah. Manual entry only
/// accepts non-negative amounts; receipt extraction may store a negative
/// amount for a discount line so per-kind sums stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub description: String,
    pub kind: TransactionKind,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Transaction {
    pub fn new_id() -> String {
        format!("txn_{}", Ulid::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_round_trip() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            assert_eq!(TransactionKind::parse_label(kind.label()), Some(kind));
        }
        assert_eq!(TransactionKind::parse_label("Transfer"), None);
    }

    #[test]
    fn kind_serializes_as_indonesian_label() {
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"Pemasukan\"");
    }

    #[test]
    fn new_ids_carry_the_txn_prefix() {
        let id = Transaction::new_id();
        assert!(id.starts_with("txn_"));
        assert_eq!(id.len(), "txn_".len() + 26);
    }
}
