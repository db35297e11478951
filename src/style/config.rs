//! The flat, immutable snapshot of every user-tunable styling knob.
//!
//! A [`StyleConfig`] is passed by value into layout, rendering and export. Out-of-range values
//! are tolerated on input and clamped by [`StyleConfig::sanitized`]; the pipeline entry points
//! call it before doing any work.

use crate::foundation::math::clamp_or;
use crate::style::color::Color;
use serde::{Deserialize, Serialize};

/// Fonts offered by the font picker. Any family name is accepted; these are the
/// families the default look was designed around.
pub const FONT_FAMILIES: &[&str] = &[
    "Fredoka One",
    "Nunito",
    "Nunito Sans",
    "Inter",
    "Roboto",
    "Oswald",
    "Anton",
    "Bangers",
    "Permanent Marker",
    "Lobster",
    "Pacifico",
    "Creepster",
    "Monoton",
];

/// Inclusive numeric bounds of one control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlRange {
    /// Lowest accepted value.
    pub min: f64,
    /// Highest accepted value.
    pub max: f64,
}

impl ControlRange {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp into range; non-finite input becomes `fallback`.
    pub fn clamp(self, v: f64, fallback: f64) -> f64 {
        clamp_or(v, self.min, self.max, fallback)
    }

    /// `true` when `v` is finite and inside the range.
    pub fn contains(self, v: f64) -> bool {
        v.is_finite() && v >= self.min && v <= self.max
    }
}

/// Per-control bounds.
pub mod ranges {
    use super::ControlRange;

    /// Rotation chaos, degrees.
    pub const ROTATION_CHAOS: ControlRange = ControlRange::new(0.0, 15.0);
    /// Position scatter, pixels.
    pub const POSITION_CHAOS: ControlRange = ControlRange::new(0.0, 20.0);
    /// Size variation factor.
    pub const SCALE_CHAOS: ControlRange = ControlRange::new(0.0, 1.0);
    /// Shadow chaos intensity.
    pub const SHADOW_CHAOS: ControlRange = ControlRange::new(0.0, 10.0);
    /// Shadow depth, pixels.
    pub const SHADOW_OFFSET: ControlRange = ControlRange::new(0.0, 40.0);
    /// Tile scale factor.
    pub const TILE_SIZE: ControlRange = ControlRange::new(0.5, 2.5);
    /// Gap between tiles and rows, pixels.
    pub const TILE_GAP: ControlRange = ControlRange::new(0.0, 60.0);
    /// Inner tile padding, pixels.
    pub const TILE_PADDING: ControlRange = ControlRange::new(0.0, 40.0);
    /// Tile corner radius, pixels.
    pub const BORDER_RADIUS: ControlRange = ControlRange::new(0.0, 50.0);
    /// Subtitle font size, rem.
    pub const SUBTITLE_SIZE: ControlRange = ControlRange::new(0.5, 3.0);
    /// Subtitle horizontal padding, pixels.
    pub const SUBTITLE_PADDING_X: ControlRange = ControlRange::new(0.0, 60.0);
    /// Subtitle vertical padding, pixels.
    pub const SUBTITLE_PADDING_Y: ControlRange = ControlRange::new(0.0, 40.0);
    /// Subtitle corner radius, pixels (999 renders as a pill).
    pub const SUBTITLE_RADIUS: ControlRange = ControlRange::new(0.0, 999.0);
    /// Space between tile block and subtitle banner, pixels.
    pub const BANNER_GAP: ControlRange = ControlRange::new(0.0, 100.0);
    /// Composition drop-shadow blur, pixels.
    pub const COMPOSITION_SHADOW: ControlRange = ControlRange::new(0.0, 50.0);
    /// Animation length, seconds.
    pub const ANIMATION_DURATION: ControlRange = ControlRange::new(0.5, 10.0);
    /// Maximum row width before tiles wrap, pixels.
    pub const WRAP_WIDTH: ControlRange = ControlRange::new(200.0, 4000.0);
    /// Video export frame rate, frames per second.
    pub const VIDEO_FPS: ControlRange = ControlRange::new(1.0, 60.0);
}

/// Which side of the tile block the subtitle banner sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitlePos {
    /// Above the tiles.
    Top,
    /// Below the tiles.
    #[default]
    Bottom,
}

/// Entrance animation applied to tiles and subtitle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPreset {
    /// Static composition.
    #[default]
    None,
    /// Overshooting scale-in with a hard cut-in.
    Pop,
    /// Decelerating slide up with a linear fade.
    Slide,
    /// Binary per-tile reveal.
    Typewriter,
}

impl AnimationPreset {
    /// All presets in display order.
    pub const ALL: [Self; 4] = [Self::None, Self::Pop, Self::Slide, Self::Typewriter];

    /// `true` for every preset other than [`AnimationPreset::None`].
    pub fn is_animated(self) -> bool {
        self != Self::None
    }
}

/// Horizontal and vertical padding of the subtitle banner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Horizontal padding, pixels.
    pub x: f64,
    /// Vertical padding, pixels.
    pub y: f64,
}

/// The chaos family of parameters consumed by [`crate::jitter`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChaosParams {
    /// Rotation magnitude, degrees.
    pub rotation: f64,
    /// Position scatter, pixels.
    pub position: f64,
    /// Scale variation factor.
    pub scale: f64,
    /// Shadow offset variation.
    pub shadow: f64,
    /// Base shadow offset, pixels.
    pub shadow_offset: f64,
}

/// Every user-tunable parameter, as one immutable value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    /// Main text; `\n` separates lines.
    pub text: String,
    /// Banner text; empty hides the banner.
    pub subtitle: String,
    /// Banner placement.
    pub subtitle_pos: SubtitlePos,
    /// Banner font size, rem.
    pub subtitle_size: f64,
    /// Banner padding, pixels.
    pub subtitle_padding: Padding,
    /// Banner corner radius, pixels.
    pub subtitle_radius: f64,
    /// Tile face color.
    pub tile_color: Color,
    /// Tile glyph color.
    pub text_color: Color,
    /// Banner face color.
    pub sub_tile_color: Color,
    /// Banner text color.
    pub sub_text_color: Color,
    /// Font family name for tiles and banner.
    pub font_family: String,
    /// Rotation chaos, degrees.
    pub rotation_chaos: f64,
    /// Tile scale factor.
    pub tile_size: f64,
    /// Gap between tiles and between rows, pixels.
    pub tile_gap: f64,
    /// Base hard-shadow offset, pixels.
    pub shadow_offset: f64,
    /// Shadow offset variation.
    pub shadow_chaos: f64,
    /// Tile corner radius, pixels.
    pub border_radius: f64,
    /// Inner tile padding, pixels.
    pub tile_padding: f64,
    /// Preview background; exports are always transparent.
    pub canvas_bg: Color,
    /// Size variation factor.
    pub scale_chaos: f64,
    /// Position scatter, pixels.
    pub pos_chaos: f64,
    /// Space between tile block and banner, pixels.
    pub banner_gap: f64,
    /// Soft drop shadow around the whole composition, pixels (0 disables).
    pub composition_shadow: f64,
    /// Draw a translucent black panel behind the composition.
    pub black_bg_blur: bool,
    /// Entrance animation.
    pub animation_preset: AnimationPreset,
    /// Entrance animation length, seconds.
    pub animation_duration: f64,
    /// Row width at which tiles wrap, pixels.
    pub wrap_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text: "SCOTT ROGOWSKY".to_owned(),
            subtitle: "BETA MALE".to_owned(),
            subtitle_pos: SubtitlePos::Bottom,
            subtitle_size: 1.25,
            subtitle_padding: Padding { x: 32.0, y: 12.0 },
            subtitle_radius: 999.0,
            tile_color: Color::rgb(0xe0, 0xf2, 0xfe),
            text_color: Color::rgb(0x1f, 0x29, 0x37),
            sub_tile_color: Color::rgb(0xf9, 0x73, 0x16),
            sub_text_color: Color::rgb(0xff, 0xff, 0xff),
            font_family: "Fredoka One".to_owned(),
            rotation_chaos: 5.0,
            tile_size: 1.0,
            tile_gap: 12.0,
            shadow_offset: 8.0,
            shadow_chaos: 0.0,
            border_radius: 12.0,
            tile_padding: 16.0,
            canvas_bg: Color::rgb(0x17, 0x17, 0x17),
            scale_chaos: 0.0,
            pos_chaos: 0.0,
            banner_gap: 24.0,
            composition_shadow: 0.0,
            black_bg_blur: false,
            animation_preset: AnimationPreset::None,
            animation_duration: 2.0,
            wrap_width: 1200.0,
        }
    }
}

impl StyleConfig {
    /// Copy with every numeric field clamped into its control range and text normalized.
    ///
    /// Non-finite numbers fall back to the default value of the field.
    pub fn sanitized(&self) -> Self {
        use ranges::*;

        let d = Self::default();
        let font_family = if self.font_family.trim().is_empty() {
            d.font_family.clone()
        } else {
            self.font_family.trim().to_owned()
        };

        Self {
            text: self.text.replace("\r\n", "\n").replace('\r', "\n"),
            subtitle: self.subtitle.replace(['\r', '\n'], " "),
            subtitle_pos: self.subtitle_pos,
            subtitle_size: SUBTITLE_SIZE.clamp(self.subtitle_size, d.subtitle_size),
            subtitle_padding: Padding {
                x: SUBTITLE_PADDING_X.clamp(self.subtitle_padding.x, d.subtitle_padding.x),
                y: SUBTITLE_PADDING_Y.clamp(self.subtitle_padding.y, d.subtitle_padding.y),
            },
            subtitle_radius: SUBTITLE_RADIUS.clamp(self.subtitle_radius, d.subtitle_radius),
            tile_color: self.tile_color,
            text_color: self.text_color,
            sub_tile_color: self.sub_tile_color,
            sub_text_color: self.sub_text_color,
            font_family,
            rotation_chaos: ROTATION_CHAOS.clamp(self.rotation_chaos, d.rotation_chaos),
            tile_size: TILE_SIZE.clamp(self.tile_size, d.tile_size),
            tile_gap: TILE_GAP.clamp(self.tile_gap, d.tile_gap),
            shadow_offset: SHADOW_OFFSET.clamp(self.shadow_offset, d.shadow_offset),
            shadow_chaos: SHADOW_CHAOS.clamp(self.shadow_chaos, d.shadow_chaos),
            border_radius: BORDER_RADIUS.clamp(self.border_radius, d.border_radius),
            tile_padding: TILE_PADDING.clamp(self.tile_padding, d.tile_padding),
            canvas_bg: self.canvas_bg,
            scale_chaos: SCALE_CHAOS.clamp(self.scale_chaos, d.scale_chaos),
            pos_chaos: POSITION_CHAOS.clamp(self.pos_chaos, d.pos_chaos),
            banner_gap: BANNER_GAP.clamp(self.banner_gap, d.banner_gap),
            composition_shadow: COMPOSITION_SHADOW
                .clamp(self.composition_shadow, d.composition_shadow),
            black_bg_blur: self.black_bg_blur,
            animation_preset: self.animation_preset,
            animation_duration: ANIMATION_DURATION
                .clamp(self.animation_duration, d.animation_duration),
            wrap_width: WRAP_WIDTH.clamp(self.wrap_width, d.wrap_width),
        }
    }

    /// The chaos parameters of this snapshot.
    pub fn chaos(&self) -> ChaosParams {
        ChaosParams {
            rotation: self.rotation_chaos,
            position: self.pos_chaos,
            scale: self.scale_chaos,
            shadow: self.shadow_chaos,
            shadow_offset: self.shadow_offset,
        }
    }

    /// Names of all configuration keys, sorted.
    pub fn field_names() -> Vec<String> {
        match serde_json::to_value(Self::default()) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
