//! Project submission certificates.
//!
//! A certificate is a single A4 page with four centered lines of Helvetica
//! text, laid out top to bottom at fixed offsets. Lines sit in 200mm wide
//! cells starting at the 10mm page margin.

use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Category, Certificate};
use crate::services::storage::Storage;

/// Suffix marking generated certificate files.
pub const CERTIFICATE_SUFFIX: &str = "_certificate.pdf";

/// Prefix of stems derived from the hex encoding of a name with no letters or digits.
const HEX_STEM_PREFIX: &str = "name_";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const CELL_WIDTH_MM: f32 = 200.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

const TITLE: &str = "Certificate of Project Submission";
const CONGRATULATIONS: &str = "For successfully submitting the project.";

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // 'A'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // 'a'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width used for characters outside the table.
const DEFAULT_WIDTH: u16 = 556;

/// One positioned line of certificate text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Font size in points
    pub size_pt: f32,
    /// Left edge of the text, from the page's left edge
    pub x_mm: f32,
    /// Baseline, from the page's top edge
    pub baseline_mm: f32,
}

/// Width of `text` set in Helvetica at `size_pt`, in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                u32::from(HELVETICA_WIDTHS[(code - 32) as usize])
            } else {
                u32::from(DEFAULT_WIDTH)
            }
        })
        .sum();
    units as f32 / 1000.0 * size_pt * PT_TO_MM
}

/// Top-to-bottom cursor placing centered text in fixed-height cells.
struct Cursor {
    y_mm: f32,
    lines: Vec<TextLine>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            y_mm: MARGIN_MM,
            lines: Vec::new(),
        }
    }

    fn cell(&mut self, text: String, size_pt: f32, height_mm: f32) {
        let width = text_width_mm(&text, size_pt);
        self.lines.push(TextLine {
            x_mm: MARGIN_MM + (CELL_WIDTH_MM - width) / 2.0,
            baseline_mm: self.y_mm + height_mm / 2.0 + 0.3 * size_pt * PT_TO_MM,
            text,
            size_pt,
        });
        self.y_mm += height_mm;
    }

    fn gap(&mut self, height_mm: f32) {
        self.y_mm += height_mm;
    }
}

/// Lay out the certificate text for `name` issued on `date`.
pub fn layout(name: &str, date: NaiveDate) -> Vec<TextLine> {
    let mut cursor = Cursor::new();

    cursor.cell(TITLE.to_string(), 22.0, 20.0);
    cursor.gap(10.0);
    cursor.cell(format!("Awarded to: {}", name), 16.0, 10.0);
    cursor.gap(10.0);
    cursor.cell(CONGRATULATIONS.to_string(), 12.0, 10.0);
    cursor.gap(20.0);
    cursor.cell(format!("Date: {}", date.format("%d-%m-%Y")), 12.0, 10.0);

    cursor.lines
}

/// Render the certificate for `name` as PDF bytes.
pub fn render_certificate(name: &str, date: NaiveDate) -> AppResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Certificate",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Certificate(format!("Failed to load font: {:?}", e)))?;

    let canvas = doc.get_page(page).get_layer(layer);
    for line in layout(name, date) {
        canvas.use_text(
            line.text,
            line.size_pt,
            Mm(line.x_mm),
            Mm(PAGE_HEIGHT_MM - line.baseline_mm),
            &font,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::Certificate(format!("Failed to serialize PDF: {:?}", e)))
}

/// Filename a certificate for `name` is stored under.
///
/// Letters and digits of any script are kept, whitespace, underscores and
/// path separators become single underscores, and everything else is
/// dropped, so the name cannot leave the certificate directory. A name with
/// no letters or digits is stored under the hex encoding of its bytes.
pub fn certificate_filename(name: &str) -> String {
    let stem = certificate_stem(name)
        .unwrap_or_else(|| format!("{}{}", HEX_STEM_PREFIX, hex::encode(name.as_bytes())));
    format!("{}{}", stem, CERTIFICATE_SUFFIX)
}

fn certificate_stem(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' {
                Some(c)
            } else if c.is_whitespace() || matches!(c, '_' | '/' | '\\') {
                Some(' ')
            } else {
                None
            }
        })
        .collect();

    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = stem.trim_matches('-');
    stem.chars()
        .any(char::is_alphanumeric)
        .then(|| stem.to_string())
}

/// Render and store the certificate for `name`, replacing an earlier one for
/// the same name.
pub async fn generate_certificate(
    storage: &Storage,
    name: &str,
    issued_on: NaiveDate,
) -> AppResult<Certificate> {
    let filename = certificate_filename(name);
    let bytes = render_certificate(name, issued_on)?;
    let path = storage
        .write(Category::Certificate, &filename, &bytes)
        .await?;

    info!(
        "Generated certificate {} ({} bytes) for {:?}",
        filename,
        bytes.len(),
        name
    );

    Ok(Certificate {
        name: name.to_string(),
        issued_on,
        filename,
        path,
    })
}
