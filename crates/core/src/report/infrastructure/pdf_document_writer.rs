use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::report::domain::document::{DrawOp, FontWeight, Page, ReportDocument, Rgb};
use crate::report::domain::document_writer::DocumentWriter;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Writes reports as PDF using the standard Helvetica fonts, so no font
/// files are embedded.
pub struct PdfDocumentWriter {
    compress: bool,
}

impl PdfDocumentWriter {
    pub fn new() -> Self {
        Self { compress: true }
    }

    /// Leaves content streams uncompressed; handy when inspecting output.
    pub fn uncompressed() -> Self {
        Self { compress: false }
    }

    fn build(&self, document: &ReportDocument) -> Result<Document, Box<dyn std::error::Error>> {
        let mut pdf = Document::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let regular_id = pdf.add_object(font_dictionary("Helvetica"));
        let bold_id = pdf.add_object(font_dictionary("Helvetica-Bold"));
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let content = Content {
                operations: page_operations(page),
            };
            let content_id = pdf.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id: ObjectId = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), document.width.into(), document.height.into()],
            }),
        );

        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        pdf.trailer.set("Root", catalog_id);

        if self.compress {
            pdf.compress();
        }
        Ok(pdf)
    }
}

impl Default for PdfDocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentWriter for PdfDocumentWriter {
    fn write(&self, path: &Path, document: &ReportDocument) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut pdf = self.build(document)?;
        pdf.save(path)?;
        log::info!(
            "Wrote {} page report to {}",
            document.page_count(),
            path.display()
        );
        Ok(())
    }
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Content-stream operators for one page, body first then footer.
pub fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in page.all_ops() {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                weight,
                color,
                text,
            } => {
                let font = match weight {
                    FontWeight::Regular => REGULAR_FONT,
                    FontWeight::Bold => BOLD_FONT,
                };
                ops.push(fill_color(*color));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new("Tj", vec![Object::string_literal(text.as_str())]));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::FilledRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(Operation::new(
                    "RG",
                    vec![color.r.into(), color.g.into(), color.b.into()],
                ));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (*y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (*y2).into()]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

fn fill_color(color: Rgb) -> Operation {
    Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()])
}
