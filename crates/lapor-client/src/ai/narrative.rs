use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::ai::MODEL_ID;
use crate::error::{ClientError, ClientResult};
use crate::format;
use crate::model::{ReportConfig, ReportMode, Totals, Transaction};

const QUICK_FIELDS: [&str; 2] = ["background", "conclusion"];
const FULL_FIELDS: [&str; 10] = [
    "background",
    "tujuan",
    "sasaran",
    "waktuTempat",
    "peserta",
    "mekanisme",
    "hasil",
    "hambatan",
    "saran",
    "conclusion",
];

/// Everything the transport needs to call the model: prompt, structured
/// response schema, and an optional credential.
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeRequest {
    pub model: String,
    pub prompt: String,
    pub response_mime_type: String,
    pub response_schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

pub fn build_request(
    config: &ReportConfig,
    transactions: &[Transaction],
    api_key: Option<String>,
) -> ClientResult<NarrativeRequest> {
    if transactions.is_empty() {
        return Err(ClientError::narrative_no_transactions());
    }

    let (prompt, fields) = match config.mode {
        ReportMode::Quick => (quick_prompt(config, transactions), &QUICK_FIELDS[..]),
        ReportMode::Full => (full_prompt(config, transactions), &FULL_FIELDS[..]),
    };

    Ok(NarrativeRequest {
        model: MODEL_ID.to_string(),
        prompt,
        response_mime_type: "application/json".to_string(),
        response_schema: string_object_schema(fields),
        api_key,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeMerge {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

/// Merges a validated response into the config. Only fields the mode's
/// schema names are considered; a present, non-empty string replaces the
/// stored value, everything else leaves the stored value alone. The config
/// is untouched if the response is not an object.
pub fn merge_response(config: &mut ReportConfig, response: &Value) -> ClientResult<NarrativeMerge> {
    let object = response
        .as_object()
        .ok_or_else(|| ClientError::ai_response_invalid("expected a JSON object"))?;

    let fields = match config.mode {
        ReportMode::Quick => &QUICK_FIELDS[..],
        ReportMode::Full => &FULL_FIELDS[..],
    };

    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    for field in fields {
        match usable_string(object, field) {
            Some(text) => {
                *field_slot(config, field) = text;
                applied.push(field.to_string());
            }
            None => skipped.push(field.to_string()),
        }
    }

    Ok(NarrativeMerge { applied, skipped })
}

fn usable_string(object: &Map<String, Value>, field: &str) -> Option<String> {
    let value = object.get(field)?.as_str()?;
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn field_slot<'a>(config: &'a mut ReportConfig, field: &str) -> &'a mut String {
    match field {
        "background" => &mut config.background,
        "conclusion" => &mut config.conclusion,
        "tujuan" => &mut config.objective,
        "sasaran" => &mut config.audience,
        "waktuTempat" => &mut config.time_place,
        "peserta" => &mut config.participants,
        "mekanisme" => &mut config.mechanism,
        "hasil" => &mut config.outcome,
        "hambatan" => &mut config.obstacles,
        "saran" => &mut config.recommendations,
        other => unreachable!("unmapped narrative field {other}"),
    }
}

fn transaction_lines(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|transaction| {
            format!(
                "- {}: {} ({}: {})",
                transaction.date,
                transaction.description,
                transaction.kind.label(),
                format::rupiah(transaction.amount),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn quick_prompt(config: &ReportConfig, transactions: &[Transaction]) -> String {
    format!(
        "Bertindaklah sebagai Sekretaris Organisasi profesional. Buat narasi LPJ CEPAT (Sederhana) dalam Bahasa Indonesia.\n\
         Kegiatan: {}\n\
         Organisasi: {}\n\
         Detail Transaksi:\n{}\n\n\
         Berikan output JSON: \"background\" (latar belakang) dan \"conclusion\" (penutup).",
        config.event_name,
        config.organization_name,
        transaction_lines(transactions),
    )
}

fn full_prompt(config: &ReportConfig, transactions: &[Transaction]) -> String {
    let totals = Totals::compute(transactions);
    format!(
        "Bertindaklah sebagai Sekretaris Organisasi profesional. Buat narasi LPJ LENGKAP yang mendalam dalam Bahasa Indonesia.\n\
         Kegiatan: {}\n\
         Organisasi: {}\n\
         Ringkasan Kas: Masuk {}, Keluar {}.\n\n\
         Detail Transaksi:\n{}\n\n\
         Berikan output JSON dengan field berikut (semua dalam Bahasa Indonesia yang formal):\n\
         - background: Latar belakang kegiatan secara naratif.\n\
         - tujuan: Tujuan utama dilaksanakannya kegiatan ini.\n\
         - sasaran: Target peserta atau penerima manfaat.\n\
         - waktuTempat: Ringkasan naratif waktu dan lokasi pelaksanaan.\n\
         - peserta: Deskripsi kehadiran peserta.\n\
         - mekanisme: Ringkasan jalannya acara dari awal hingga akhir.\n\
         - hasil: Dampak positif atau pencapaian kegiatan.\n\
         - hambatan: Kendala atau masalah yang dihadapi di lapangan.\n\
         - saran: Rekomendasi untuk panitia di masa mendatang.\n\
         - conclusion: Kalimat penutup formal.",
        config.event_name,
        config.organization_name,
        format::rupiah(totals.income),
        format::rupiah(totals.expense),
        transaction_lines(transactions),
    )
}

fn string_object_schema(fields: &[&str]) -> Value {
    let mut properties = Map::new();
    for field in fields {
        properties.insert(field.to_string(), json!({ "type": "STRING" }));
    }
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": fields,
    })
}
