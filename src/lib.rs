//! Chaostile turns a line of text into a composition of tilted, jittered letter tiles.
//!
//! The pipeline is pure up to the export boundary:
//!
//! - Describe the look with a [`StyleConfig`]
//! - Lay it out and resolve every tile into a [`Scene`] at some [`AnimationState`]
//! - Export the scene as PNG or SVG, or drive a [`Stage`] through its animation into a
//!   [`FrameSink`] with an [`Exporter`]
//!
//! Per-tile chaos is a stateless function of the tile index ([`jitter`]), so the same
//! configuration always renders the same picture.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod chaos;
/// Video encoding sinks.
pub mod encode;
/// PNG, SVG and video export.
pub mod export;
pub(crate) mod layout;
/// Settings and preset persistence.
pub mod persist;
pub(crate) mod render;
pub(crate) mod style;

pub use crate::foundation::core::{Affine, Fps, FrameIndex, FrameRGBA, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{TileError, TileResult};

pub use crate::animation::ease::{Ease, ease_out_back, ease_out_quad};
pub use crate::animation::stagger::{subtitle_local_t, tile_local_t};
pub use crate::animation::timeline::{
    AnimationState, Clock, ManualClock, PlayState, SystemClock, Timeline,
};
pub use crate::chaos::jitter::{JitterVector, jitter};
pub use crate::layout::flow::{
    Composition, Line, PlacedBanner, PlacedTile, Row, Slot, Tile, compose, index_text,
};
pub use crate::render::raster::{EXPORT_PIXEL_RATIO, RasterOptions, Rasterizer, encode_png};
pub use crate::render::scene::{Scene, SceneBanner, SceneTile};
pub use crate::render::svg::{SvgOptions, scene_to_svg};
pub use crate::render::tile::{SubtitleVisual, TileVisual, render_subtitle, render_tile};
pub use crate::style::color::Color;
pub use crate::style::config::{
    AnimationPreset, ChaosParams, ControlRange, FONT_FAMILIES, Padding, StyleConfig, SubtitlePos,
    ranges,
};

pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::webm::{FfmpegWebmSink, VideoCodec, WebmSinkOpts};
pub use crate::export::pipeline::{
    ExportArtifact, Exporter, LogNotifier, Notifier, RecordingNotifier, VideoSummary,
};
pub use crate::export::surface::{CaptureSurface, Stage};
pub use crate::persist::presets::{Preset, PresetCollection};
pub use crate::persist::store::{JsonFileStore, KeyValueStore, MemoryStore};
