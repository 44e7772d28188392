//! Raster backend: square canvas, centered text, PNG output.

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use crate::{
    backend::{GeneratedIcon, IconBackend},
    builtin_font,
    color::Color,
    config::{IconJob, Settings},
    font::{LoadedFont, resolve_font},
};

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(size: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(size, size, Rgb(background.channels())),
        }
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        Color::rgb(r, g, b)
    }

    /// Draw `text` so its box is centered on `anchor`.
    pub fn draw_text(&mut self, text: &str, anchor: (u32, u32), fill: Color, font: &LoadedFont) {
        match font {
            LoadedFont::TrueType { font, scale, .. } => {
                self.draw_outlined(text, anchor, fill, font, *scale)
            }
            LoadedFont::BuiltIn { scale } => self.draw_bitmap(text, anchor, fill, *scale),
        }
    }

    // Horizontal middle of the advance, vertical middle between ascender
    // and descender lines.
    fn draw_outlined(
        &mut self,
        text: &str,
        anchor: (u32, u32),
        fill: Color,
        font: &FontVec,
        scale: PxScale,
    ) {
        let scaled = font.as_scaled(scale);
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        let mut placed = Vec::with_capacity(text.len());
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            placed.push((id, caret));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let origin_x = anchor.0 as f32 - caret / 2.0;
        let baseline = anchor.1 as f32 + (scaled.ascent() + scaled.descent()) / 2.0;
        for (id, x) in placed {
            let glyph = id.with_scale_and_position(scale, point(origin_x + x, baseline));
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
            outlined.draw(|gx, gy, coverage| {
                self.blend(left + gx as i64, top + gy as i64, fill, coverage);
            });
        }
    }

    fn draw_bitmap(&mut self, text: &str, anchor: (u32, u32), fill: Color, scale: u32) {
        let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let scale = scale as i64;
        let width = (builtin_font::text_width(count) as i64).saturating_mul(scale);
        let height = (builtin_font::GLYPH_HEIGHT as i64).saturating_mul(scale);
        let left = anchor.0 as i64 - width / 2;
        let top = anchor.1 as i64 - height / 2;
        let advance =
            ((builtin_font::GLYPH_WIDTH + builtin_font::GLYPH_SPACING) as i64).saturating_mul(scale);

        for (i, c) in text.chars().enumerate() {
            let glyph_left = left.saturating_add((i as i64).saturating_mul(advance));
            if glyph_left >= self.size() as i64 {
                break;
            }
            let rows = builtin_font::glyph(c);
            for row in 0..builtin_font::GLYPH_HEIGHT {
                for col in 0..builtin_font::GLYPH_WIDTH {
                    if builtin_font::is_set(&rows, col, row) {
                        let x0 = glyph_left.saturating_add((col as i64).saturating_mul(scale));
                        let y0 = top.saturating_add((row as i64).saturating_mul(scale));
                        self.fill_block(x0, y0, scale, fill);
                    }
                }
            }
        }
    }

    /// Fill the `extent`-sided square at (x0, y0), clipped to the canvas.
    fn fill_block(&mut self, x0: i64, y0: i64, extent: i64, fill: Color) {
        let size = self.size() as i64;
        let (x_start, x_end) = (x0.max(0), x0.saturating_add(extent).min(size));
        let (y_start, y_end) = (y0.max(0), y0.saturating_add(extent).min(size));
        for y in y_start..y_end {
            for x in x_start..x_end {
                self.blend(x, y, fill, 1.0);
            }
        }
    }

    fn blend(&mut self, x: i64, y: i64, fill: Color, coverage: f32) {
        let size = self.size() as i64;
        if x < 0 || y < 0 || x >= size || y >= size {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        let Rgb(dst) = self.image.get_pixel_mut(x as u32, y as u32);
        for (d, s) in dst.iter_mut().zip(fill.channels()) {
            let mixed = *d as f32 + (s as f32 - *d as f32) * coverage;
            *d = mixed.round() as u8;
        }
    }

    pub fn write_png<W: Write>(&self, w: W) -> Result<()> {
        let mut encoder = png::Encoder::new(w, self.image.width(), self.image.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().context("png header")?;
        writer
            .write_image_data(self.image.as_raw())
            .context("png data")?;
        writer.finish().context("png finish")
    }

    /// Truncates an existing file; the parent directory must already exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut w = BufWriter::new(file);
        self.write_png(&mut w)
            .with_context(|| format!("encode {}", path.display()))?;
        w.flush().with_context(|| format!("write {}", path.display()))
    }
}

/// Render one icon job and write it to disk.
pub fn generate(settings: &Settings, job: &IconJob) -> Result<GeneratedIcon> {
    let start = Instant::now();
    job.validate()?;
    let mut canvas = Canvas::new(job.size, settings.background);
    let font = resolve_font(&settings.font_candidates, job.font_size);
    canvas.draw_text(&settings.text, job.anchor(), settings.foreground, &font);
    canvas.save(&job.output)?;

    let icon = GeneratedIcon {
        path: job.output.clone(),
        size: job.size,
        font: font.source(),
    };
    tracing::info!(
        target = "render",
        path = %icon.path.display(),
        size = icon.size,
        font = %icon.font,
        duration_ms = start.elapsed().as_millis() as u64,
        "icon_written"
    );
    Ok(icon)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RasterBackend;

impl IconBackend for RasterBackend {
    fn generate(&self, settings: &Settings, job: &IconJob) -> Result<GeneratedIcon> {
        generate(settings, job)
    }
}
