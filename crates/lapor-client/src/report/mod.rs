mod appendix;
mod finance;
mod signers;

pub use appendix::AppendixEntry;
pub use finance::{
    BALANCE_LABEL, COLUMN_HEADINGS, EMPTY_TABLE_NOTICE, FinanceRow, FinanceTable, SUBTOTAL_LABEL,
};
pub use signers::ResolvedSigner;

use serde::Serialize;

use crate::format;
use crate::model::{DEFAULT_REPORT_TITLE, ReportConfig, ReportMode, Transaction};

pub const ACKNOWLEDGEMENT_LABEL: &str = "MENGETAHUI,";
pub const APPENDIX_HEADING: &str = "LAMPIRAN BUKTI TRANSAKSI";
pub const APPENDIX_CAPTION_PREFIX: &str = "BUKTI TRANSAKSI";
pub const UNFILLED_SECTION: &str = "Belum diisi.";
pub const EMPTY_FIELD: &str = "-";
pub const EVENT_PLACEHOLDER: &str = "[NAMA KEGIATAN]";
pub const LOCATION_PLACEHOLDER: &str = "[LOKASI]";
pub const SIGNATURE_BLANK: &str = "....................";

/// The fully resolved report. Every renderer (word, cloud docs, terminal
/// preview, PDF capture layout) reads from this one structure, so the three
/// export surfaces cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub mode: ReportMode,
    pub header: ReportHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<CoverPage>,
    pub chapters: Vec<Chapter>,
    pub finance: FinanceTable,
    pub signers: Vec<ResolvedSigner>,
    pub appendix: Vec<AppendixEntry>,
    pub file_stem: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHeader {
    pub title: String,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    pub report_date: String,
    pub report_date_long: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Standalone first page, only present in Full mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverPage {
    pub title: String,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    /// Roman chapter number, e.g. `II`.
    pub number: String,
    pub heading: String,
    pub body: ChapterBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ChapterBody {
    Sections { sections: Vec<Section> },
    Finance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Decimal subsection number, e.g. `1.2`. Quick-mode chapters carry a
    /// single unnumbered section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub text: String,
}

pub fn assemble(config: &ReportConfig, transactions: &[Transaction]) -> ReportDocument {
    let header = build_header(config);
    let cover = match config.mode {
        ReportMode::Full => Some(build_cover(config)),
        ReportMode::Quick => None,
    };

    ReportDocument {
        mode: config.mode,
        header,
        cover,
        chapters: build_chapters(config),
        finance: finance::build_table(transactions),
        signers: signers::resolve(&config.signers),
        appendix: appendix::collect(transactions),
        file_stem: format::export_file_stem(&config.event_name),
    }
}

fn build_header(config: &ReportConfig) -> ReportHeader {
    ReportHeader {
        title: title_or_default(&config.title),
        event_name: event_or_placeholder(&config.event_name),
        organization_name: optional_upper(&config.organization_name),
        report_date: config.report_date.clone(),
        report_date_long: format::long_date(&config.report_date),
        logo: config.logo.clone(),
    }
}

fn build_cover(config: &ReportConfig) -> CoverPage {
    let location = if config.location.trim().is_empty() {
        LOCATION_PLACEHOLDER.to_string()
    } else {
        format::upper(&config.location)
    };
    CoverPage {
        title: title_or_default(&config.title),
        event_name: event_or_placeholder(&config.event_name),
        organization_name: optional_upper(&config.organization_name),
        location,
        logo: config.logo.clone(),
    }
}

fn build_chapters(config: &ReportConfig) -> Vec<Chapter> {
    match config.mode {
        ReportMode::Quick => quick_chapters(config),
        ReportMode::Full => full_chapters(config),
    }
}

fn quick_chapters(config: &ReportConfig) -> Vec<Chapter> {
    vec![
        narrative_chapter(1, "PENDAHULUAN", vec![plain_section(&config.background)]),
        finance_chapter(2, "RINCIAN ANGGARAN KEUANGAN"),
        narrative_chapter(3, "PENUTUP", vec![plain_section(&config.conclusion)]),
    ]
}

fn full_chapters(config: &ReportConfig) -> Vec<Chapter> {
    vec![
        narrative_chapter(
            1,
            "PENDAHULUAN",
            vec![
                numbered_section("1.1", "Latar Belakang", &config.background, UNFILLED_SECTION),
                numbered_section("1.2", "Tujuan Kegiatan", &config.objective, EMPTY_FIELD),
                numbered_section("1.3", "Sasaran / Target", &config.audience, EMPTY_FIELD),
            ],
        ),
        narrative_chapter(
            2,
            "PELAKSANAAN KEGIATAN",
            vec![
                numbered_section("2.1", "Waktu dan Tempat", &config.time_place, EMPTY_FIELD),
                numbered_section("2.2", "Mekanisme Kegiatan", &config.mechanism, EMPTY_FIELD),
            ],
        ),
        finance_chapter(3, "LAPORAN KEUANGAN"),
        narrative_chapter(
            4,
            "EVALUASI DAN PENUTUP",
            vec![
                numbered_section("4.1", "Hasil Kegiatan", &config.outcome, EMPTY_FIELD),
                numbered_section("4.2", "Hambatan", &config.obstacles, EMPTY_FIELD),
                numbered_section("4.3", "Saran", &config.recommendations, EMPTY_FIELD),
                numbered_section("4.4", "Penutup", &config.conclusion, UNFILLED_SECTION),
            ],
        ),
    ]
}

fn narrative_chapter(number: usize, heading: &str, sections: Vec<Section>) -> Chapter {
    Chapter {
        number: format::roman(number),
        heading: heading.to_string(),
        body: ChapterBody::Sections { sections },
    }
}

fn finance_chapter(number: usize, heading: &str) -> Chapter {
    Chapter {
        number: format::roman(number),
        heading: heading.to_string(),
        body: ChapterBody::Finance,
    }
}

fn plain_section(text: &str) -> Section {
    Section {
        number: None,
        heading: None,
        text: filled(text, UNFILLED_SECTION),
    }
}

fn numbered_section(number: &str, heading: &str, text: &str, fallback: &str) -> Section {
    Section {
        number: Some(number.to_string()),
        heading: Some(heading.to_string()),
        text: filled(text, fallback),
    }
}

fn filled(text: &str, fallback: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

fn title_or_default(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        DEFAULT_REPORT_TITLE.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

fn event_or_placeholder(event_name: &str) -> String {
    let trimmed = event_name.trim();
    if trimmed.is_empty() {
        EVENT_PLACEHOLDER.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

fn optional_upper(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
