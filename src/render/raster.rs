//! SVG document to pixels.
//!
//! Rasterization goes through `usvg` + `resvg`, so the PNG export, the video frames and the SVG
//! export all come from the same document.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{TileError, TileResult};
use crate::render::scene::Scene;
use crate::render::svg::{SvgOptions, scene_to_svg};
use crate::style::color::Color;

/// Device-pixel ratio used for image and video exports.
pub const EXPORT_PIXEL_RATIO: f32 = 2.0;

const MAX_DIM: u32 = 16_384;

/// Options for [`Rasterizer::rasterize_scene`].
#[derive(Clone, Copy, Debug)]
pub struct RasterOptions {
    /// Output pixels per scene pixel.
    pub pixel_ratio: f32,
    /// Opaque background; `None` keeps the alpha channel.
    pub background: Option<Color>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: EXPORT_PIXEL_RATIO,
            background: None,
        }
    }
}

/// Turns scenes into premultiplied RGBA frames.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl Rasterizer {
    /// Rasterizer over an explicit font database.
    pub fn new(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Rasterizer with the system fonts plus any fonts found in `extra_dirs`.
    pub fn with_system_fonts(extra_dirs: &[std::path::PathBuf]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            db.load_fonts_dir(dir);
        }
        tracing::debug!(faces = db.len(), "loaded font database");
        Self::new(Arc::new(db))
    }

    /// Rasterizer without any fonts; glyphs are skipped. Shapes still render.
    pub fn without_fonts() -> Self {
        Self::new(Arc::new(usvg::fontdb::Database::new()))
    }

    /// Number of font faces available for glyph rendering.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    /// Build the SVG for `scene` and rasterize it.
    pub fn rasterize_scene(&self, scene: &Scene, opts: RasterOptions) -> TileResult<FrameRGBA> {
        let svg = scene_to_svg(
            scene,
            SvgOptions {
                background: opts.background,
            },
        );
        self.rasterize_svg(&svg, opts.pixel_ratio)
    }

    /// Rasterize an SVG document at `pixel_ratio`.
    pub fn rasterize_svg(&self, svg: &str, pixel_ratio: f32) -> TileResult<FrameRGBA> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(TileError::validation("pixel ratio must be positive"));
        }

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| TileError::encoding(format!("svg parse failed: {e}")))?;

        let size = tree.size();
        let width = to_px(size.width() * pixel_ratio)?;
        let height = to_px(size.height() * pixel_ratio)?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| TileError::encoding("failed to allocate pixmap"))?;
        let xform = resvg::tiny_skia::Transform::from_scale(pixel_ratio, pixel_ratio);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

fn to_px(v: f32) -> TileResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(TileError::encoding("svg has invalid width/height"));
    }
    let px = (v.round() as u32).max(1);
    if px > MAX_DIM {
        return Err(TileError::encoding(format!(
            "raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px)
}

/// Encode a frame as PNG with straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> TileResult<Vec<u8>> {
    let rgba = frame.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| TileError::encoding("frame buffer does not match width*height*4"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")
        .map_err(|e| TileError::encoding(format!("{e:#}")))?;
    Ok(buf)
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };

            // The tile look needs some glyph even when the requested family is missing.
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
