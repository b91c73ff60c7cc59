use serde::Serialize;

use crate::format;
use crate::model::Transaction;

/// One receipt image in the evidence appendix, captioned with the date of
/// the first transaction that references it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppendixEntry {
    pub image: String,
    pub description: String,
    pub date_long: String,
}

/// Collects receipt images in first-seen order, one entry per distinct
/// image. Rows sharing an image (a multi-line receipt scan) collapse into
/// a single appendix entry.
pub fn collect(transactions: &[Transaction]) -> Vec<AppendixEntry> {
    let mut seen: Vec<&str> = Vec::new();
    let mut entries = Vec::new();

    for transaction in transactions {
        let Some(image) = transaction.receipt.as_deref() else {
            continue;
        };
        if seen.contains(&image) {
            continue;
        }
        seen.push(image);
        entries.push(AppendixEntry {
            image: image.to_string(),
            description: format::upper(&transaction.description),
            date_long: format::long_date(&transaction.date),
        });
    }

    entries
}
