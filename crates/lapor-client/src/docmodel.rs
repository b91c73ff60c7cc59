//! Serializable word-processor document model. Exports hand this structure
//! to whatever serializes the final `.docx`; nothing in it is specific to
//! one export target. Sizes are half-points, spacing and widths are
//! twentieths of a point (DXA), matching OOXML conventions.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordDocument {
    pub default_font: String,
    /// Half-points.
    pub default_size: u32,
    pub blocks: Vec<DocBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DocBlock {
    Paragraph(DocParagraph),
    Table(DocTable),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocParagraph {
    pub runs: Vec<DocRun>,
    pub alignment: DocAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_before: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_after: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub page_break_before: bool,
}

impl DocParagraph {
    pub fn new(runs: Vec<DocRun>) -> Self {
        Self {
            runs,
            alignment: DocAlign::Left,
            spacing_before: None,
            spacing_after: None,
            page_break_before: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn aligned(mut self, alignment: DocAlign) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn before(mut self, twips: u32) -> Self {
        self.spacing_before = Some(twips);
        self
    }

    pub fn after(mut self, twips: u32) -> Self {
        self.spacing_after = Some(twips);
        self
    }

    pub fn page_break(mut self) -> Self {
        self.page_break_before = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "run")]
pub enum DocRun {
    Text(DocText),
    Image(DocImage),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocText {
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    /// Half-points; `None` inherits the document default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Hex RGB without `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl DocText {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
            italic: false,
            underline: false,
            size: None,
            color: None,
            font: None,
        }
    }

    pub fn bold(text: &str) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn color(mut self, hex: &str) -> Self {
        self.color = Some(hex.to_string());
        self
    }

    pub fn font(mut self, name: &str) -> Self {
        self.font = Some(name.to_string());
        self
    }

    pub fn into_run(self) -> DocRun {
        DocRun::Text(self)
    }
}

/// Embedded image payload with a fixed render size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocImage {
    pub mime: String,
    pub base64_data: String,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocAlign {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTable {
    pub width_dxa: u32,
    pub fixed_layout: bool,
    pub borders: TableBorders,
    pub rows: Vec<DocTableRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableBorders {
    /// Full grid on every cell edge.
    Grid,
    /// No borders anywhere (signature blocks).
    None,
    /// Only a rule under the table (letterheads).
    BottomRule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTableRow {
    pub cells: Vec<DocTableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocTableCell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_dxa: Option<u32>,
    #[serde(skip_serializing_if = "is_one")]
    pub column_span: u32,
    pub paragraphs: Vec<DocParagraph>,
}

impl DocTableCell {
    pub fn new(paragraphs: Vec<DocParagraph>) -> Self {
        Self {
            width_dxa: None,
            column_span: 1,
            paragraphs,
        }
    }

    pub fn width(mut self, dxa: u32) -> Self {
        self.width_dxa = Some(dxa);
        self
    }

    pub fn span(mut self, columns: u32) -> Self {
        self.column_span = columns;
        self
    }
}

fn is_one(value: &u32) -> bool {
    *value == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_builder_applies_layout() {
        let paragraph = DocParagraph::new(vec![DocText::bold("JUDUL").size(36).into_run()])
            .aligned(DocAlign::Center)
            .before(800)
            .page_break();
        assert_eq!(paragraph.alignment, DocAlign::Center);
        assert_eq!(paragraph.spacing_before, Some(800));
        assert!(paragraph.page_break_before);
    }

    #[test]
    fn default_flags_are_omitted_from_json() {
        let json = serde_json::to_value(DocText::plain("x").into_run()).unwrap();
        assert!(json.get("bold").is_none());
        assert!(json.get("size").is_none());
        assert_eq!(json["run"], "text");
    }

    #[test]
    fn spanned_cells_serialize_their_span() {
        let cell = DocTableCell::new(vec![DocParagraph::empty()]).span(3);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["column_span"], 3);
        let plain = DocTableCell::new(vec![DocParagraph::empty()]);
        assert!(serde_json::to_value(&plain).unwrap().get("column_span").is_none());
    }
}
