//! Scene to self-contained SVG document.
//!
//! The document is the vector export and also the input of the raster path, so PNG frames and
//! SVG files always agree. Blurs are expressed as SVG filters; viewers may render them slightly
//! differently from the raster path.

use std::fmt::Write as _;

use crate::foundation::core::Affine;
use crate::layout::flow::is_xml_char;
use crate::render::scene::{
    BACKDROP_COLOR, BACKDROP_RADIUS, COMPOSITION_SHADOW_COLOR, Scene, SceneBanner, SceneTile,
};
use crate::style::color::Color;

/// Baseline shift that visually centers a cap-height glyph, in ems.
const GLYPH_BASELINE_EM: f64 = 0.35;
/// Bottom border thickness of the banner, pixels.
const BANNER_BORDER: f64 = crate::layout::flow::BANNER_BORDER;

/// Options for [`scene_to_svg`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgOptions {
    /// Paint this color behind everything. Exports leave it unset (transparent).
    pub background: Option<Color>,
}

/// Serialize `scene` into an SVG document.
pub fn scene_to_svg(scene: &Scene, opts: SvgOptions) -> String {
    let w = num(scene.size.width);
    let h = num(scene.size.height);
    let mut out = String::with_capacity(1024 + scene.tiles.len() * 640);

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    if let Some(bg) = opts.background {
        let _ = writeln!(out, r#"  <rect width="{w}" height="{h}"{}/>"#, fill(bg));
    }

    let shadow = scene.composition_shadow > 0.0;
    if shadow {
        let _ = writeln!(
            out,
            r#"  <defs><filter id="composition-shadow" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="0" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/></filter></defs>"#,
            num(scene.composition_shadow / 2.0),
            COMPOSITION_SHADOW_COLOR.svg_rgb(),
            num(COMPOSITION_SHADOW_COLOR.opacity()),
        );
        out.push_str(r#"  <g filter="url(#composition-shadow)">"#);
    } else {
        out.push_str("  <g>");
    }
    out.push('\n');

    if let Some(panel) = scene.backdrop {
        let _ = writeln!(
            out,
            r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{}"{}/>"#,
            num(panel.x0),
            num(panel.y0),
            num(panel.width()),
            num(panel.height()),
            num(BACKDROP_RADIUS),
            fill(BACKDROP_COLOR),
        );
    }

    for tile in &scene.tiles {
        write_tile(&mut out, tile);
    }
    if let Some(banner) = &scene.banner {
        write_banner(&mut out, banner);
    }

    out.push_str("  </g>\n</svg>\n");
    out
}

fn write_tile(out: &mut String, tile: &SceneTile) {
    let v = &tile.visual;
    if v.is_hidden() {
        return;
    }
    let half = v.size / 2.0;
    let r = num(v.corner_radius);
    let s = num(v.size);

    let _ = writeln!(
        out,
        r#"    <g transform="{}"{}>"#,
        matrix(v.transform(tile.center())),
        opacity_attr(v.opacity),
    );
    if v.shadow_offset > 0.0 {
        let _ = writeln!(
            out,
            r#"      <rect x="{}" y="{}" width="{s}" height="{s}" rx="{r}"{}/>"#,
            num(-half + v.shadow_offset),
            num(-half + v.shadow_offset),
            fill(v.border_color),
        );
    }
    let _ = writeln!(
        out,
        r#"      <rect x="{}" y="{}" width="{s}" height="{s}" rx="{r}"{}/>"#,
        num(-half),
        num(-half),
        fill(v.border_color),
    );
    let _ = writeln!(
        out,
        r#"      <rect x="{}" y="{}" width="{s}" height="{}" rx="{r}"{}/>"#,
        num(-half),
        num(-half),
        num((v.size - v.border_bottom).max(0.0)),
        fill(v.face),
    );
    let _ = writeln!(
        out,
        r#"      <text x="0" y="{}" text-anchor="middle" font-family="{}" font-size="{}" font-weight="700"{}>{}</text>"#,
        num(v.font_size * GLYPH_BASELINE_EM - v.border_bottom / 2.0),
        font_stack(&v.font_family),
        num(v.font_size),
        fill(v.glyph_color),
        escape(&v.glyph),
    );
    out.push_str("    </g>\n");
}

fn write_banner(out: &mut String, banner: &SceneBanner) {
    let v = &banner.visual;
    if v.opacity <= 0.0 || v.scale == 0.0 {
        return;
    }
    let hw = v.width / 2.0;
    let hh = v.height / 2.0;
    let r = num(v.corner_radius);

    let _ = writeln!(
        out,
        r#"    <g transform="{}"{}>"#,
        matrix(v.transform(banner.rect.center())),
        opacity_attr(v.opacity),
    );
    let _ = writeln!(
        out,
        r#"      <rect x="{}" y="{}" width="{}" height="{}" rx="{r}"{}/>"#,
        num(-hw),
        num(-hh),
        num(v.width),
        num(v.height),
        fill(v.border_color),
    );
    let _ = writeln!(
        out,
        r#"      <rect x="{}" y="{}" width="{}" height="{}" rx="{r}"{}/>"#,
        num(-hw),
        num(-hh),
        num(v.width),
        num((v.height - BANNER_BORDER).max(0.0)),
        fill(v.face),
    );
    let _ = writeln!(
        out,
        r#"      <text x="0" y="{}" text-anchor="middle" font-family="{}" font-size="{}" font-weight="700"{}>{}</text>"#,
        num(v.font_size * GLYPH_BASELINE_EM - BANNER_BORDER / 2.0),
        font_stack(&v.font_family),
        num(v.font_size),
        fill(v.text_color),
        escape(&v.text),
    );
    out.push_str("    </g>\n");
}

fn matrix(a: Affine) -> String {
    let [a, b, c, d, e, f] = a.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    )
}

fn fill(c: Color) -> String {
    if c.a == 255 {
        format!(r#" fill="{}""#, c.svg_rgb())
    } else {
        format!(
            r#" fill="{}" fill-opacity="{}""#,
            c.svg_rgb(),
            num(c.opacity())
        )
    }
}

fn opacity_attr(opacity: f64) -> String {
    if opacity >= 1.0 {
        String::new()
    } else {
        format!(r#" opacity="{}""#, num(opacity.max(0.0)))
    }
}

fn font_stack(family: &str) -> String {
    format!("'{}', sans-serif", escape(&family.replace('\'', "")))
}

/// Format with at most four decimals and no trailing zeros.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
