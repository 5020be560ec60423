//! Receipt rendering
//!
//! Draws each field of a [`ReceiptRecord`] onto a fresh copy of the template
//! image and encodes the result as PNG. The template and font are read from
//! disk on every call, so no canvas is ever shared between requests.

use std::fmt::Display;
use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale};
use chrono::{DateTime, TimeZone};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::error::{ReceiptError, Result};
use crate::layout::{FieldLayoutConfig, FieldLayoutEntry};
use crate::record::ReceiptRecord;

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Renders receipts from a template image and a font file
#[derive(Debug, Clone)]
pub struct ReceiptRenderer {
    template_path: PathBuf,
    font_path: PathBuf,
}

impl ReceiptRenderer {
    /// Create a renderer, checking that the template exists
    ///
    /// The font is only checked at render time.
    pub fn new(template_path: impl Into<PathBuf>, font_path: impl Into<PathBuf>) -> Result<Self> {
        let template_path = template_path.into();
        if !template_path.is_file() {
            return Err(ReceiptError::TemplateMissing(template_path));
        }

        Ok(Self {
            template_path,
            font_path: font_path.into(),
        })
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Render `record` and return the PNG bytes
    pub fn render(&self, record: &ReceiptRecord, layout: &FieldLayoutConfig) -> Result<Vec<u8>> {
        let canvas = self.render_image(record, layout)?;
        let png = encode_png(&canvas)?;
        tracing::debug!(
            "Rendered receipt {} ({}x{}, {} bytes)",
            record.receipt_number,
            canvas.width(),
            canvas.height(),
            png.len()
        );
        Ok(png)
    }

    /// Render `record` onto a fresh RGBA copy of the template
    pub fn render_image(
        &self,
        record: &ReceiptRecord,
        layout: &FieldLayoutConfig,
    ) -> Result<RgbaImage> {
        let mut canvas = self.open_template()?;
        let font = self.load_font()?;

        for (field, value) in record.fields() {
            let entry = layout.lookup_field(field);
            tracing::debug!(
                "Drawing {} at ({}, {}) size {}",
                field,
                entry.x,
                entry.y,
                entry.size
            );
            draw_field(&mut canvas, &font, entry, value);
        }

        Ok(canvas)
    }

    fn open_template(&self) -> Result<RgbaImage> {
        let template = image::open(&self.template_path).map_err(|e| match e {
            ImageError::IoError(ref io) if io.kind() == ErrorKind::NotFound => {
                ReceiptError::TemplateMissing(self.template_path.clone())
            }
            other => ReceiptError::TemplateDecode {
                path: self.template_path.clone(),
                reason: other.to_string(),
            },
        })?;
        Ok(template.to_rgba8())
    }

    fn load_font(&self) -> Result<FontVec> {
        let data = fs::read(&self.font_path).map_err(|e| ReceiptError::FontResource {
            path: self.font_path.clone(),
            reason: e.to_string(),
        })?;
        FontVec::try_from_vec(data).map_err(|e| ReceiptError::FontResource {
            path: self.font_path.clone(),
            reason: e.to_string(),
        })
    }
}

/// Draw `text` with its top-left corner at the entry's anchor.
///
/// Glyph pixels outside the canvas are dropped. Anchors from which the text
/// cannot reach the canvas are skipped before any glyph arithmetic, which
/// keeps anchors near `i32::MIN`/`i32::MAX` from overflowing.
fn draw_field(canvas: &mut RgbaImage, font: &FontVec, entry: FieldLayoutEntry, text: &str) {
    if !may_reach_canvas(canvas, entry, text) {
        tracing::debug!(
            "Skipping text anchored outside the canvas at ({}, {})",
            entry.x,
            entry.y
        );
        return;
    }

    let scale = em_scale(font, entry.size);
    draw_text_mut(canvas, TEXT_COLOR, entry.x, entry.y, scale, font, text);
}

/// Conservative reach check: no glyph extends more than a few ems from its
/// pen position, so text of `n` characters spans under `(n + 1) * 4` ems.
fn may_reach_canvas(canvas: &RgbaImage, entry: FieldLayoutEntry, text: &str) -> bool {
    let em = i64::from(entry.size.max(1)) * 4;
    let width = (text.chars().count() as i64 + 1) * em;
    let (x, y) = (i64::from(entry.x), i64::from(entry.y));

    x < i64::from(canvas.width()) && y < i64::from(canvas.height()) && x + width > 0 && y + em > 0
}

/// ab_glyph scales by line height; layout sizes are pixels per em.
fn em_scale(font: &impl Font, size: u32) -> PxScale {
    let px_per_em = size as f32;
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(px_per_em * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(px_per_em),
    }
}

/// Encode an image as PNG into an in-memory buffer
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ReceiptError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Download name for a receipt rendered at `timestamp`
pub fn receipt_file_name<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("receipt_{}.png", timestamp.format("%Y%m%d%H%M%S"))
}
