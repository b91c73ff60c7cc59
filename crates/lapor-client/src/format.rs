use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "JANUARI",
    "FEBRUARI",
    "MARET",
    "APRIL",
    "MEI",
    "JUNI",
    "JULI",
    "AGUSTUS",
    "SEPTEMBER",
    "OKTOBER",
    "NOVEMBER",
    "DESEMBER",
];

/// Formats whole rupiah with dot thousand separators, e.g. `Rp 1.234.567`.
/// Negative amounts keep a leading minus before the currency marker.
pub fn rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        let remaining = digits.len() - position;
        if position > 0 && remaining % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Renders an ISO `YYYY-MM-DD` date as the long Indonesian form used in
/// document headers, e.g. `05 AGUSTUS 2026`. The day keeps its zero padding.
/// Unparseable input is returned unchanged so a half-filled config still
/// renders.
pub fn long_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => {
            let month = MONTH_NAMES[date.month0() as usize];
            format!("{:02} {} {}", date.day(), month, date.year())
        }
        Err(_) => iso.to_string(),
    }
}

pub fn upper(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Title-cases each whitespace-separated word: `beras 5kg` -> `Beras 5kg`.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Roman numeral for a chapter number. Report documents never exceed a
/// handful of chapters, so this covers 1 through 20.
pub fn roman(number: usize) -> String {
    const TABLE: [(usize, &str); 5] = [(10, "X"), (9, "IX"), (5, "V"), (4, "IV"), (1, "I")];
    let mut remaining = number;
    let mut out = String::new();
    for (value, token) in TABLE {
        while remaining >= value {
            out.push_str(token);
            remaining -= value;
        }
    }
    out
}

/// Export file stem: `LPJ_<event name>`, falling back to `LPJ_Laporan` when
/// no event name is set. Path-hostile characters become underscores.
pub fn export_file_stem(event_name: &str) -> String {
    let trimmed = event_name.trim();
    let base = if trimmed.is_empty() { "Laporan" } else { trimmed };
    let sanitized: String = base
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    format!("LPJ_{sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_groups_thousands_with_dots() {
        assert_eq!(rupiah(0), "Rp 0");
        assert_eq!(rupiah(950), "Rp 950");
        assert_eq!(rupiah(1_500), "Rp 1.500");
        assert_eq!(rupiah(1_234_567), "Rp 1.234.567");
        assert_eq!(rupiah(-5_000), "-Rp 5.000");
    }

    #[test]
    fn long_date_uses_uppercase_indonesian_months() {
        assert_eq!(long_date("2026-08-17"), "17 AGUSTUS 2026");
        assert_eq!(long_date("2025-01-02"), "02 JANUARI 2025");
    }

    #[test]
    fn long_date_zero_pads_single_digit_days() {
        assert_eq!(long_date("2026-08-05"), "05 AGUSTUS 2026");
        assert_eq!(long_date("2026-12-09"), "09 DESEMBER 2026");
    }

    #[test]
    fn long_date_passes_garbage_through() {
        assert_eq!(long_date("segera"), "segera");
        assert_eq!(long_date(""), "");
    }

    #[test]
    fn title_case_normalizes_each_word() {
        assert_eq!(title_case("BERAS 5KG"), "Beras 5kg");
        assert_eq!(title_case("aqua gelas"), "Aqua Gelas");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn roman_covers_report_chapter_range() {
        let expected = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
        for (index, token) in expected.iter().enumerate() {
            assert_eq!(roman(index + 1), *token);
        }
    }

    #[test]
    fn export_file_stem_falls_back_and_sanitizes() {
        assert_eq!(export_file_stem(""), "LPJ_Laporan");
        assert_eq!(export_file_stem("   "), "LPJ_Laporan");
        assert_eq!(export_file_stem("Pentas Seni"), "LPJ_Pentas Seni");
        assert_eq!(export_file_stem("Rapat 17/08"), "LPJ_Rapat 17_08");
    }
}
