//! The composed visual tree at one instant of the timeline.
//!
//! A [`Scene`] is what every export captures: laid-out cells, resolved tile and banner visuals,
//! and the optional backdrop and composition shadow.

use crate::animation::timeline::AnimationState;
use crate::chaos::jitter::jitter;
use crate::foundation::core::{Point, Rect, Size};
use crate::layout::flow::{Composition, compose};
use crate::render::tile::{SubtitleVisual, TileVisual, render_subtitle, render_tile};
use crate::style::color::Color;
use crate::style::config::StyleConfig;

/// How far the backdrop panel extends beyond the composition, pixels.
pub const BACKDROP_MARGIN: f64 = 20.0;
/// Corner radius of the backdrop panel, pixels.
pub const BACKDROP_RADIUS: f64 = 12.0;
/// Backdrop panel color (black at 30%).
pub const BACKDROP_COLOR: Color = Color::rgba(0, 0, 0, 77);
/// Composition drop-shadow color (black at 60%).
pub const COMPOSITION_SHADOW_COLOR: Color = Color::rgba(0, 0, 0, 153);

/// A tile visual anchored to its layout cell.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneTile {
    /// Untransformed layout cell.
    pub cell: Rect,
    /// Resolved style.
    pub visual: TileVisual,
}

impl SceneTile {
    /// Center of the layout cell.
    pub fn center(&self) -> Point {
        self.cell.center()
    }
}

/// The subtitle banner anchored to its layout box.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBanner {
    /// Untransformed banner box.
    pub rect: Rect,
    /// Resolved style.
    pub visual: SubtitleVisual,
}

/// The fully composed visual tree for one instant of the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Export size, pixels at 1x.
    pub size: Size,
    /// Tiles and banner bounds without transforms.
    pub content: Rect,
    /// Tiles in index order.
    pub tiles: Vec<SceneTile>,
    /// Subtitle banner, if any.
    pub banner: Option<SceneBanner>,
    /// Translucent panel behind the composition, if enabled.
    pub backdrop: Option<Rect>,
    /// Drop-shadow blur radius around the composition (0 disables).
    pub composition_shadow: f64,
    /// Preview background color (not used by exports).
    pub canvas_bg: Color,
    /// Animation state the scene was built at.
    pub animation: AnimationState,
}

impl Scene {
    /// Lay out `cfg` and resolve every tile and the banner at `anim`.
    #[tracing::instrument(skip(cfg), fields(progress = anim.progress, preset = ?anim.preset))]
    pub fn build(cfg: &StyleConfig, anim: AnimationState) -> Self {
        let cfg = cfg.sanitized();
        let layout = compose(&cfg);
        Self::from_layout(&cfg, &layout, anim)
    }

    /// Resolve visuals for an existing layout. `cfg` must be the config the layout came from.
    pub fn from_layout(cfg: &StyleConfig, layout: &Composition, anim: AnimationState) -> Self {
        let chaos = cfg.chaos();
        let tiles = layout
            .tiles
            .iter()
            .map(|placed| {
                let j = jitter(placed.tile.global_index, chaos);
                SceneTile {
                    cell: placed.cell,
                    visual: render_tile(&placed.tile, cfg, &j, &anim),
                }
            })
            .collect();

        let banner = layout.banner.as_ref().map(|b| SceneBanner {
            rect: b.rect,
            visual: render_subtitle(b, cfg, &anim),
        });

        let backdrop = cfg
            .black_bg_blur
            .then(|| layout.content.inflate(BACKDROP_MARGIN, BACKDROP_MARGIN));

        Self {
            size: layout.size,
            content: layout.content,
            tiles,
            banner,
            backdrop,
            composition_shadow: cfg.composition_shadow,
            canvas_bg: cfg.canvas_bg,
            animation: anim,
        }
    }

    /// Number of tiles that currently draw something.
    pub fn visible_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| !t.visual.is_hidden()).count()
    }
}
