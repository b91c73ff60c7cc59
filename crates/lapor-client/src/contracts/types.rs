//! Payload shapes carried inside success envelopes. These are the stable
//! machine-readable surface; renderers and scripts read these, never the
//! internal state document directly.

use serde::Serialize;

use crate::ai::narrative::NarrativeRequest;
use crate::ai::receipt::ExtractionRequest;
use crate::docmodel::WordDocument;
use crate::export::ExportWarning;
use crate::export::pdf::{PdfPlan, RasterCapture};
use crate::format;
use crate::model::{ReportConfig, Totals, Transaction};
use crate::report::ReportDocument;

#[derive(Debug, Clone, Serialize)]
pub struct TotalsData {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
    pub income_display: String,
    pub expense_display: String,
    pub balance_display: String,
}

impl From<Totals> for TotalsData {
    fn from(totals: Totals) -> Self {
        Self {
            income: totals.income,
            expense: totals.expense,
            balance: totals.balance,
            income_display: format::rupiah(totals.income),
            expense_display: format::rupiah(totals.expense),
            balance_display: format::rupiah(totals.balance),
        }
    }
}

/// A transaction as listed. Receipt payloads are megabytes of base64, so
/// rows carry a presence flag instead of the image itself.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub label: String,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: i64,
    pub amount_display: String,
    pub has_receipt: bool,
}

impl TransactionRow {
    pub fn from_transaction(index: usize, transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.clone(),
            label: transaction
                .display_label
                .clone()
                .unwrap_or_else(|| (index + 1).to_string()),
            date: transaction.date.clone(),
            description: transaction.description.clone(),
            kind: transaction.kind.label().to_string(),
            amount: transaction.amount,
            amount_display: format::rupiah(transaction.amount),
            has_receipt: transaction.receipt.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigShowData {
    pub storage_path: String,
    pub transaction_count: usize,
    pub config: ReportConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSetData {
    pub field: String,
    pub config: ReportConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct TxAddData {
    pub transaction: TransactionRow,
    pub totals: TotalsData,
}

#[derive(Debug, Clone, Serialize)]
pub struct TxListData {
    pub transactions: Vec<TransactionRow>,
    pub totals: TotalsData,
}

#[derive(Debug, Clone, Serialize)]
pub struct TxRemoveData {
    pub removed_id: String,
    pub totals: TotalsData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub document: ReportDocument,
}

#[derive(Debug, Clone, Serialize)]
pub struct NarrateRequestData {
    pub request: NarrativeRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct NarrateApplyData {
    pub mode: String,
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanRequestData {
    pub request: ExtractionRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanApplyData {
    pub added: Vec<TransactionRow>,
    pub totals: TotalsData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportWordData {
    pub file_name: String,
    pub variant: String,
    pub document: WordDocument,
    pub warnings: Vec<ExportWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportPdfData {
    pub file_name: String,
    pub plan: PdfPlan,
    pub capture: RasterCapture,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetData {
    pub cleared_transactions: usize,
}
