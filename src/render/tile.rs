//! Per-tile and subtitle style resolution.
//!
//! The static jitter is always the baseline. An animation preset other than `none` only scales,
//! translates or fades relative to it.

use crate::animation::ease::{ease_out_back, ease_out_quad};
use crate::animation::stagger::{
    SUBTITLE_SLIDE_DISTANCE, TILE_SLIDE_DISTANCE, subtitle_local_t, tile_local_t,
};
use crate::animation::timeline::AnimationState;
use crate::chaos::jitter::JitterVector;
use crate::foundation::core::{Affine, Point, Vec2};
use crate::layout::flow::{PlacedBanner, TILE_FONT_SIZE, Tile, tile_edge};
use crate::style::color::Color;
use crate::style::config::{AnimationPreset, StyleConfig};

/// Fixed tilt of the subtitle banner, degrees.
pub const SUBTITLE_TILT_DEG: f64 = -1.0;
/// How much darker borders and hard shadows are than the face color.
pub const BORDER_DARKEN: f64 = 0.2;

/// Fully resolved style of one tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileVisual {
    /// Global index the jitter was derived from.
    pub global_index: u32,
    /// Uppercased glyph text.
    pub glyph: String,
    /// Box edge, pixels.
    pub size: f64,
    /// Glyph size, pixels.
    pub font_size: f64,
    /// Font family.
    pub font_family: String,
    /// Corner radius, pixels.
    pub corner_radius: f64,
    /// Face color.
    pub face: Color,
    /// Glyph color.
    pub glyph_color: Color,
    /// Border and hard-shadow color.
    pub border_color: Color,
    /// Bottom border thickness, pixels.
    pub border_bottom: f64,
    /// Rotation, degrees.
    pub rotation_deg: f64,
    /// Translation relative to the layout cell, pixels.
    pub translation: Vec2,
    /// Scale around the cell center.
    pub scale: f64,
    /// Hard-shadow offset (applied on both axes), pixels.
    pub shadow_offset: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl TileVisual {
    /// Transform from tile-local coordinates (origin at the tile center) to composition space.
    pub fn transform(&self, center: Point) -> Affine {
        Affine::translate(center.to_vec2() + self.translation)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
    }

    /// `true` when the tile would not draw anything.
    pub fn is_hidden(&self) -> bool {
        self.opacity <= 0.0 || self.scale == 0.0
    }
}

/// Compose the visual of `tile` from configuration, static jitter and animation state.
pub fn render_tile(
    tile: &Tile,
    cfg: &StyleConfig,
    jitter: &JitterVector,
    anim: &AnimationState,
) -> TileVisual {
    let size = tile_edge(cfg);
    let font_size = (TILE_FONT_SIZE * cfg.tile_size).min((size - cfg.tile_padding).max(size * 0.25));

    let mut visual = TileVisual {
        global_index: tile.global_index,
        glyph: tile.ch.to_uppercase().collect(),
        size,
        font_size,
        font_family: cfg.font_family.clone(),
        corner_radius: cfg.border_radius.min(size / 2.0),
        face: cfg.tile_color,
        glyph_color: cfg.text_color,
        border_color: cfg.tile_color.mix_black(BORDER_DARKEN),
        border_bottom: (cfg.tile_size * 4.0).max(2.0),
        rotation_deg: jitter.rotation_deg,
        translation: jitter.offset,
        scale: jitter.scale,
        shadow_offset: jitter.shadow_offset,
        opacity: 1.0,
    };

    if !anim.is_animating() {
        return visual;
    }

    let t = tile_local_t(anim.progress, tile.global_index);
    match anim.preset {
        AnimationPreset::None => {}
        AnimationPreset::Pop => {
            visual.scale = jitter.scale * ease_out_back(t);
            visual.opacity = if t < 0.1 { 0.0 } else { 1.0 };
        }
        AnimationPreset::Slide => {
            visual.translation.y += (1.0 - ease_out_quad(t)) * TILE_SLIDE_DISTANCE;
            visual.opacity = t;
        }
        AnimationPreset::Typewriter => {
            visual.opacity = if t > 0.5 { 1.0 } else { 0.0 };
        }
    }
    visual
}

/// Fully resolved style of the subtitle banner.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleVisual {
    /// Uppercased text.
    pub text: String,
    /// Font size, pixels.
    pub font_size: f64,
    /// Font family.
    pub font_family: String,
    /// Box width, pixels.
    pub width: f64,
    /// Box height including the bottom border, pixels.
    pub height: f64,
    /// Corner radius, pixels.
    pub corner_radius: f64,
    /// Face color.
    pub face: Color,
    /// Text color.
    pub text_color: Color,
    /// Border color.
    pub border_color: Color,
    /// Rotation, degrees.
    pub rotation_deg: f64,
    /// Vertical translation, pixels.
    pub translate_y: f64,
    /// Scale around the banner center.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl SubtitleVisual {
    /// Transform from banner-local coordinates (origin at the banner center) to composition space.
    pub fn transform(&self, center: Point) -> Affine {
        Affine::translate(Vec2::new(center.x, center.y + self.translate_y))
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
    }
}

/// Compose the banner visual. The banner never takes part in tile indexing.
pub fn render_subtitle(
    banner: &PlacedBanner,
    cfg: &StyleConfig,
    anim: &AnimationState,
) -> SubtitleVisual {
    let mut visual = SubtitleVisual {
        text: banner.text.clone(),
        font_size: banner.font_size,
        font_family: cfg.font_family.clone(),
        width: banner.rect.width(),
        height: banner.rect.height(),
        corner_radius: banner.radius,
        face: cfg.sub_tile_color,
        text_color: cfg.sub_text_color,
        border_color: cfg.sub_tile_color.mix_black(BORDER_DARKEN),
        rotation_deg: SUBTITLE_TILT_DEG,
        translate_y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    if !anim.is_animating() {
        return visual;
    }

    let t = subtitle_local_t(anim.progress);
    match anim.preset {
        AnimationPreset::None => {}
        AnimationPreset::Pop => {
            visual.scale = ease_out_back(t);
            visual.opacity = if t < 0.1 { 0.0 } else { 1.0 };
        }
        AnimationPreset::Slide => {
            visual.translate_y = (1.0 - ease_out_quad(t)) * SUBTITLE_SLIDE_DISTANCE;
            visual.opacity = t;
        }
        AnimationPreset::Typewriter => {
            visual.opacity = t;
        }
    }
    visual
}

#[cfg(test)]
#[path = "../../tests/unit/render/tile.rs"]
mod tests;
