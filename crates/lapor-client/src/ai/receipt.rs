use serde::Serialize;
use serde_json::{Value, json};

use crate::ai::MODEL_ID;
use crate::error::{ClientError, ClientResult};
use crate::format;
use crate::images;
use crate::model::{Transaction, TransactionKind};

/// Amounts beyond this are treated as extraction noise, not money.
const MAX_ABS_AMOUNT: i64 = 1_000_000_000_000;

const PROMPT: &str = "\
Tugas: Bertindak sebagai Auditor Keuangan. Ekstrak SEMUA informasi dari foto nota/struk ini dengan akurasi 100%.

Aturan Ekstraksi:
1. Ekstrak setiap baris item belanja secara individual.
2. Masukkan diskon atau potongan harga sebagai angka NEGATIF (misal: -1500).
3. Masukkan Pajak (PPN/Tax) sebagai item terpisah jika ada.
4. Pastikan jumlah total dari semua item yang kamu ekstrak SAMA dengan \"Grand Total\" yang tertera di nota.
5. Jika ada teks yang buram, berikan estimasi terbaik berdasarkan konteks harga.
6. JANGAN gunakan huruf kapital semua untuk deskripsi. Gunakan format huruf normal (contoh: dari \"SUSU\" menjadi \"Susu\").

Format JSON yang harus dikembalikan:
{
  \"transactions\": [
    {
      \"date\": \"YYYY-MM-DD (Gunakan tanggal yang tertera di nota, jika tidak ada gunakan hari ini)\",
      \"description\": \"Nama Barang / Jasa (Gunakan Huruf Normal, Bukan Kapital Semua)\",
      \"amount\": angka_saja (positif untuk barang, negatif untuk diskon),
      \"type\": \"Selalu 'Pengeluaran'\"
    }
  ]
}";

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRequest {
    pub model: String,
    pub prompt: String,
    pub image_mime_type: String,
    /// Raw base64 body of the receipt image, without the data-URI prefix.
    pub image_data: String,
    pub response_mime_type: String,
    pub response_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

pub fn build_request(image_data_uri: &str, api_key: Option<String>) -> ClientResult<ExtractionRequest> {
    let (mime, payload) = images::split_data_uri(image_data_uri)
        .map_err(|detail| ClientError::image_unreadable("<receipt>", &detail))?;

    Ok(ExtractionRequest {
        model: MODEL_ID.to_string(),
        prompt: PROMPT.to_string(),
        image_mime_type: mime,
        image_data: payload,
        response_mime_type: "application/json".to_string(),
        response_schema: response_schema(),
        api_key,
    })
}

/// Validates a whole extraction response and turns it into ready-to-append
/// rows. All-or-nothing: one malformed item rejects the batch, so a partial
/// receipt never lands in the ledger. Every row gets a fresh id, a display
/// label continuing the current numbering, and the shared source image.
pub fn parse_response(
    response: &Value,
    source_image: &str,
    existing_count: usize,
    today: &str,
) -> ClientResult<Vec<Transaction>> {
    let items = response
        .get("transactions")
        .and_then(Value::as_array)
        .ok_or_else(|| ClientError::ai_response_invalid("missing `transactions` array"))?;

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let object = item
            .as_object()
            .ok_or_else(|| item_error(index, "not an object"))?;

        let description = object
            .get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| item_error(index, "missing description"))?;

        let amount = parse_amount(object.get("amount"))
            .ok_or_else(|| item_error(index, "missing or non-numeric amount"))?;
        if amount.abs() >= MAX_ABS_AMOUNT {
            return Err(item_error(index, "amount is implausibly large"));
        }

        let date = object
            .get("date")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(today)
            .to_string();

        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .and_then(TransactionKind::parse_label)
            .unwrap_or(TransactionKind::Expense);

        rows.push(Transaction {
            id: Transaction::new_id(),
            date,
            description: format::title_case(description),
            kind,
            amount,
            display_label: Some((existing_count + index + 1).to_string()),
            receipt: Some(source_image.to_string()),
        });
    }

    Ok(rows)
}

fn parse_amount(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }
    // Schemas say NUMBER; models still sometimes emit decimals or strings.
    if let Some(float) = value.as_f64() {
        return Some(float.round() as i64);
    }
    value.as_str()?.trim().parse::<i64>().ok()
}

fn item_error(index: usize, detail: &str) -> ClientError {
    ClientError::ai_response_invalid(&format!("transactions[{index}] {detail}"))
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "transactions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "amount": { "type": "NUMBER" },
                        "type": { "type": "STRING" },
                    },
                    "required": ["date", "description", "amount", "type"],
                },
            },
        },
        "required": ["transactions"],
    })
}
