//! One builder for both word-processor exports. The generic variant embeds
//! the logo and receipt images; the cloud-docs variant carries the same
//! structure with captions standing in for images, since cloud importers
//! mangle embedded media.

use crate::docmodel::{
    DocAlign, DocBlock, DocImage, DocParagraph, DocRun, DocTable, DocTableCell, DocTableRow,
    DocText, TableBorders, WordDocument,
};
use crate::export::ExportWarning;
use crate::images;
use crate::report::{
    ACKNOWLEDGEMENT_LABEL, APPENDIX_CAPTION_PREFIX, APPENDIX_HEADING, BALANCE_LABEL,
    COLUMN_HEADINGS, ChapterBody, EMPTY_TABLE_NOTICE, ReportDocument, SIGNATURE_BLANK,
    SUBTOTAL_LABEL, Section,
};

const TABLE_WIDTH: u32 = 9000;
const COL_NO: u32 = 700;
const COL_DATE: u32 = 1500;
const COL_DESC: u32 = 3200;
const COL_DEBIT: u32 = 1800;
const COL_CREDIT: u32 = 1800;
const SIGNER_CELL_WIDTH: u32 = 4500;
const ACCENT_COLOR: &str = "1E3A8A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordVariant {
    Generic,
    CloudDocs,
}

impl WordVariant {
    pub fn embeds_images(&self) -> bool {
        matches!(self, WordVariant::Generic)
    }
}

#[derive(Debug, Clone)]
pub struct WordExport {
    pub document: WordDocument,
    pub warnings: Vec<ExportWarning>,
}

pub fn build(report: &ReportDocument, variant: WordVariant) -> WordExport {
    let mut builder = Builder {
        report,
        variant,
        blocks: Vec::new(),
        warnings: Vec::new(),
    };
    builder.cover();
    builder.letterhead();
    builder.chapters();
    builder.signatures();
    builder.appendix();

    WordExport {
        document: WordDocument {
            default_font: "Arial".to_string(),
            default_size: 22,
            blocks: builder.blocks,
        },
        warnings: builder.warnings,
    }
}

struct Builder<'a> {
    report: &'a ReportDocument,
    variant: WordVariant,
    blocks: Vec<DocBlock>,
    warnings: Vec<ExportWarning>,
}

impl Builder<'_> {
    fn cover(&mut self) {
        let Some(cover) = &self.report.cover else {
            return;
        };

        let logo = cover
            .logo
            .as_deref()
            .and_then(|source| self.decode_image(source, "cover logo", 150, 150));
        let has_logo = logo.is_some();
        if let Some(image) = logo {
            self.push(
                DocParagraph::new(vec![DocRun::Image(image)])
                    .aligned(DocAlign::Center)
                    .before(1000),
            );
        }

        self.push(
            DocParagraph::new(vec![DocText::bold(&cover.title).size(36).into_run()])
                .aligned(DocAlign::Center)
                .before(if has_logo { 800 } else { 2000 }),
        );
        self.push(
            DocParagraph::new(vec![
                DocText::bold(&cover.event_name)
                    .size(48)
                    .color(ACCENT_COLOR)
                    .into_run(),
            ])
            .aligned(DocAlign::Center)
            .before(800),
        );
        if let Some(organization) = &cover.organization_name {
            self.push(
                DocParagraph::new(vec![DocText::bold(organization).size(28).into_run()])
                    .aligned(DocAlign::Center)
                    .before(400)
                    .after(1000),
            );
        }
        self.push(
            DocParagraph::new(vec![DocText::bold(&cover.location).size(24).into_run()])
                .aligned(DocAlign::Center)
                .before(3000),
        );
        self.push(DocParagraph::empty().page_break());
    }

    fn letterhead(&mut self) {
        let header = &self.report.header;
        let logo = header
            .logo
            .as_deref()
            .and_then(|source| self.decode_image(source, "letterhead logo", 80, 80));

        if let Some(image) = logo {
            let logo_cell = DocTableCell::new(vec![DocParagraph::new(vec![DocRun::Image(image)])])
                .width(2000);
            let mut text_paragraphs = vec![
                DocParagraph::new(vec![DocText::bold(&header.title).size(24).into_run()]),
                DocParagraph::new(vec![
                    DocText::bold(&header.event_name)
                        .size(28)
                        .color(ACCENT_COLOR)
                        .into_run(),
                ]),
            ];
            if let Some(organization) = &header.organization_name {
                text_paragraphs.push(DocParagraph::new(vec![
                    DocText::bold(organization).size(18).into_run(),
                ]));
            }
            let text_cell = DocTableCell::new(text_paragraphs).width(7000);

            self.blocks.push(DocBlock::Table(DocTable {
                width_dxa: TABLE_WIDTH,
                fixed_layout: false,
                borders: TableBorders::BottomRule,
                rows: vec![DocTableRow {
                    cells: vec![logo_cell, text_cell],
                }],
            }));
            self.push(DocParagraph::empty().after(400));
            return;
        }

        self.push(
            DocParagraph::new(vec![DocText::bold(&header.title).size(28).underline().into_run()])
                .aligned(DocAlign::Center),
        );
        self.push(
            DocParagraph::new(vec![
                DocText::bold(&header.event_name)
                    .size(36)
                    .color(ACCENT_COLOR)
                    .into_run(),
            ])
            .aligned(DocAlign::Center)
            .before(200),
        );
        self.push(
            DocParagraph::new(vec![
                DocText::bold(&format!("TANGGAL LAPORAN: {}", header.report_date))
                    .font("Courier New")
                    .into_run(),
            ])
            .aligned(DocAlign::Center)
            .before(200)
            .after(400),
        );
    }

    fn chapters(&mut self) {
        for chapter in &self.report.chapters {
            let heading = format!("{}. {}", chapter.number, chapter.heading);
            self.push(
                DocParagraph::new(vec![DocText::bold(&heading).size(24).into_run()])
                    .before(400)
                    .after(200),
            );
            match &chapter.body {
                ChapterBody::Sections { sections } => {
                    for section in sections {
                        self.section(section);
                    }
                }
                ChapterBody::Finance => self.finance_table(),
            }
        }
    }

    fn section(&mut self, section: &Section) {
        if let (Some(number), Some(heading)) = (&section.number, &section.heading) {
            let label = format!("{number} {heading}");
            self.push(DocParagraph::new(vec![
                DocText::bold(&label).size(24).into_run(),
            ]));
        }
        self.push(
            DocParagraph::new(vec![DocText::plain(&section.text).size(24).into_run()])
                .aligned(DocAlign::Justified)
                .after(200),
        );
    }

    fn finance_table(&mut self) {
        let finance = &self.report.finance;
        let mut rows = vec![header_row()];

        if finance.rows.is_empty() {
            rows.push(DocTableRow {
                cells: vec![
                    DocTableCell::new(vec![
                        DocParagraph::new(vec![
                            DocText::plain(EMPTY_TABLE_NOTICE).italic().into_run(),
                        ])
                        .aligned(DocAlign::Center),
                    ])
                    .span(5),
                ],
            });
        }

        for row in &finance.rows {
            rows.push(DocTableRow {
                cells: vec![
                    centered_cell(&row.label).width(COL_NO),
                    centered_cell(&row.date).width(COL_DATE),
                    DocTableCell::new(vec![DocParagraph::new(vec![
                        DocText::plain(&row.description).into_run(),
                    ])])
                    .width(COL_DESC),
                    amount_cell(row.debit.as_deref()).width(COL_DEBIT),
                    amount_cell(row.credit.as_deref()).width(COL_CREDIT),
                ],
            });
        }

        rows.push(DocTableRow {
            cells: vec![
                label_cell(SUBTOTAL_LABEL, DocAlign::Right)
                    .span(3)
                    .width(COL_NO + COL_DATE + COL_DESC),
                label_cell(&finance.subtotal_income, DocAlign::Right).width(COL_DEBIT),
                label_cell(&finance.subtotal_expense, DocAlign::Right).width(COL_CREDIT),
            ],
        });
        rows.push(DocTableRow {
            cells: vec![
                label_cell(BALANCE_LABEL, DocAlign::Right)
                    .span(3)
                    .width(COL_NO + COL_DATE + COL_DESC),
                label_cell(&finance.balance, DocAlign::Center)
                    .span(2)
                    .width(COL_DEBIT + COL_CREDIT),
            ],
        });

        self.blocks.push(DocBlock::Table(DocTable {
            width_dxa: TABLE_WIDTH,
            fixed_layout: true,
            borders: TableBorders::Grid,
            rows,
        }));
    }

    fn signatures(&mut self) {
        self.push(
            DocParagraph::new(vec![DocText::bold(ACKNOWLEDGEMENT_LABEL).into_run()])
                .aligned(DocAlign::Center)
                .before(600)
                .after(300),
        );

        let rows = self
            .report
            .signers
            .chunks(2)
            .map(|pair| DocTableRow {
                cells: pair.iter().map(signer_cell).collect(),
            })
            .collect();

        self.blocks.push(DocBlock::Table(DocTable {
            width_dxa: TABLE_WIDTH,
            fixed_layout: true,
            borders: TableBorders::None,
            rows,
        }));
    }

    fn appendix(&mut self) {
        if self.report.appendix.is_empty() {
            return;
        }

        self.push(
            DocParagraph::new(vec![
                DocText::bold(APPENDIX_HEADING).size(32).underline().into_run(),
            ])
            .aligned(DocAlign::Center)
            .after(400)
            .page_break(),
        );

        // Entries are cloned up front so decode warnings can borrow self.
        let entries = self.report.appendix.clone();
        for entry in &entries {
            if self.variant.embeds_images() {
                let context = format!("receipt image for {}", entry.description);
                if let Some(image) = self.decode_image(&entry.image, &context, 450, 600) {
                    self.push(
                        DocParagraph::new(vec![DocRun::Image(image)])
                            .aligned(DocAlign::Center)
                            .before(400),
                    );
                }
            }
            let caption = format!("{APPENDIX_CAPTION_PREFIX} {}", entry.date_long);
            self.push(
                DocParagraph::new(vec![DocText::bold(&caption).into_run()])
                    .aligned(DocAlign::Center)
                    .after(100),
            );
            self.push(
                DocParagraph::new(vec![DocText::plain(&entry.description).italic().into_run()])
                    .aligned(DocAlign::Center)
                    .after(400),
            );
        }
    }

    fn decode_image(
        &mut self,
        source: &str,
        context: &str,
        width_px: u32,
        height_px: u32,
    ) -> Option<DocImage> {
        if !self.variant.embeds_images() {
            return None;
        }
        match images::decode_data_uri(source) {
            Ok((mime, _bytes)) => {
                let base64_data = source.split_once(',').map(|(_, body)| body.to_string())?;
                Some(DocImage {
                    mime,
                    base64_data,
                    width_px,
                    height_px,
                })
            }
            Err(detail) => {
                self.warnings.push(ExportWarning::image_skipped(context, &detail));
                None
            }
        }
    }

    fn push(&mut self, paragraph: DocParagraph) {
        self.blocks.push(DocBlock::Paragraph(paragraph));
    }
}

fn header_row() -> DocTableRow {
    let widths = [COL_NO, COL_DATE, COL_DESC, COL_DEBIT, COL_CREDIT];
    DocTableRow {
        cells: COLUMN_HEADINGS
            .iter()
            .zip(widths)
            .map(|(heading, width)| label_cell(heading, DocAlign::Center).width(width))
            .collect(),
    }
}

fn centered_cell(text: &str) -> DocTableCell {
    DocTableCell::new(vec![
        DocParagraph::new(vec![DocText::plain(text).into_run()]).aligned(DocAlign::Center),
    ])
}

fn amount_cell(amount: Option<&str>) -> DocTableCell {
    DocTableCell::new(vec![
        DocParagraph::new(vec![DocText::plain(amount.unwrap_or("-")).into_run()])
            .aligned(DocAlign::Right),
    ])
}

fn label_cell(text: &str, alignment: DocAlign) -> DocTableCell {
    DocTableCell::new(vec![
        DocParagraph::new(vec![DocText::bold(text).into_run()]).aligned(alignment),
    ])
}

fn signer_cell(signer: &crate::report::ResolvedSigner) -> DocTableCell {
    let name = signer.name.as_deref().unwrap_or(SIGNATURE_BLANK);
    DocTableCell::new(vec![
        DocParagraph::new(vec![DocText::bold(&signer.title).size(24).into_run()])
            .aligned(DocAlign::Center)
            .after(100),
        DocParagraph::empty().before(1000).after(1000),
        DocParagraph::new(vec![DocText::bold(name).size(24).underline().into_run()])
            .aligned(DocAlign::Center),
    ])
    .width(SIGNER_CELL_WIDTH)
}
