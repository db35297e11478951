//! Text to rows of tiles.
//!
//! Two stages:
//!
//! 1. [`index_text`] splits the text on explicit line breaks and assigns a global index to every
//!    non-space character. Indices continue across lines; spaces take up a gap slot but no index.
//! 2. [`compose`] places the slots: each logical line flows left to right and wraps at the
//!    configured width, wrapped rows are centered, rows stack with the tile gap, and the subtitle
//!    banner is attached above or below the block.

use crate::foundation::core::{Point, Rect, Size};
use crate::style::config::{StyleConfig, SubtitlePos};

/// Edge of an unscaled tile, pixels (4rem).
pub const TILE_EDGE: f64 = 64.0;
/// Glyph size of an unscaled tile, pixels (2.5rem).
pub const TILE_FONT_SIZE: f64 = 40.0;
/// Width of the gap slot that stands in for a space, pixels.
pub const SPACE_WIDTH: f64 = 32.0;
/// Root em size used to turn the subtitle size into pixels.
pub const REM: f64 = 16.0;
/// Average advance of a bold uppercase glyph, in ems, used to size the banner.
pub const BANNER_ADVANCE_EM: f64 = 0.62;
/// Banner line height, in ems.
pub const BANNER_LINE_HEIGHT: f64 = 1.5;
/// Thickness of the banner's bottom border, pixels.
pub const BANNER_BORDER: f64 = 4.0;
/// Transparent margin around the composition in exports, pixels.
pub const WRAPPER_PADDING: f64 = 80.0;

/// One visible character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// The character as typed.
    pub ch: char,
    /// Position in the space-skipping sequence of all characters of all lines.
    pub global_index: u32,
}

/// A slot in a logical line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// A tile.
    Tile(Tile),
    /// A space: occupies width, consumes no index.
    Gap,
}

/// One logical line (between explicit line breaks).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    /// Slots in typing order.
    pub slots: Vec<Slot>,
}

impl Line {
    /// Tiles of this line, in order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.slots.iter().filter_map(|s| match s {
            Slot::Tile(t) => Some(*t),
            Slot::Gap => None,
        })
    }
}

/// Split `text` into lines and assign global indices.
///
/// `"AB\nC D"` yields A=0, B=1, C=2, D=3. Control characters are dropped without an index.
pub fn index_text(text: &str) -> Vec<Line> {
    let mut next = 0u32;
    text.split('\n')
        .map(|line| Line {
            slots: line
                .chars()
                .filter(|c| *c != '\r' && is_xml_char(*c))
                .map(|ch| {
                    if ch.is_whitespace() {
                        Slot::Gap
                    } else {
                        let tile = Tile {
                            ch,
                            global_index: next,
                        };
                        next = next.saturating_add(1);
                        Slot::Tile(tile)
                    }
                })
                .collect(),
        })
        .collect()
}

/// Whether `c` may appear in an XML 1.0 document. Other characters get no slot.
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (!c.is_control() && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// A tile with its resolved cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedTile {
    /// The tile.
    pub tile: Tile,
    /// Logical line it came from.
    pub line: usize,
    /// Visual row after wrapping.
    pub row: usize,
    /// Untransformed cell, in composition coordinates.
    pub cell: Rect,
}

impl PlacedTile {
    /// Center of the cell; tile transforms pivot here.
    pub fn center(&self) -> Point {
        self.cell.center()
    }
}

/// A visual row after wrapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Logical line the row belongs to.
    pub line: usize,
    /// Row bounds.
    pub bounds: Rect,
}

/// The subtitle banner's untransformed box.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBanner {
    /// Uppercased banner text.
    pub text: String,
    /// Banner box, border included.
    pub rect: Rect,
    /// Font size, pixels.
    pub font_size: f64,
    /// Corner radius after clamping to half the height.
    pub radius: f64,
}

/// Geometry of a whole composition, in pixels, origin at the top-left of the export wrapper.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    /// Logical lines with indices.
    pub lines: Vec<Line>,
    /// Visual rows.
    pub rows: Vec<Row>,
    /// Tiles in index order.
    pub tiles: Vec<PlacedTile>,
    /// Banner, when the subtitle is non-empty.
    pub banner: Option<PlacedBanner>,
    /// Bounds of tiles plus banner, without the wrapper padding.
    pub content: Rect,
    /// Full export size (content plus padding), rounded up to even pixels.
    pub size: Size,
}

impl Composition {
    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

/// Edge length of a tile at the configured scale.
pub fn tile_edge(cfg: &StyleConfig) -> f64 {
    TILE_EDGE * cfg.tile_size
}

struct FlowItem {
    width: f64,
    tile: Option<Tile>,
}

struct FlowRow {
    line: usize,
    items: Vec<FlowItem>,
}

impl FlowRow {
    fn width(&self, gap: f64) -> f64 {
        let n = self.items.len();
        if n == 0 {
            return 0.0;
        }
        self.items.iter().map(|i| i.width).sum::<f64>() + gap * (n - 1) as f64
    }
}

fn wrap_line(line_idx: usize, line: &Line, edge: f64, gap: f64, max_width: f64) -> Vec<FlowRow> {
    let mut rows = vec![FlowRow {
        line: line_idx,
        items: Vec::new(),
    }];
    let mut cursor = 0.0;

    for slot in &line.slots {
        let (width, tile) = match slot {
            Slot::Tile(t) => (edge, Some(*t)),
            Slot::Gap => (SPACE_WIDTH, None),
        };
        let Some(current) = rows.last_mut() else {
            break;
        };
        let needed = if current.items.is_empty() {
            width
        } else {
            cursor + gap + width
        };
        if !current.items.is_empty() && needed > max_width {
            rows.push(FlowRow {
                line: line_idx,
                items: vec![FlowItem { width, tile }],
            });
            cursor = width;
        } else {
            current.items.push(FlowItem { width, tile });
            cursor = needed;
        }
    }

    rows
}

/// Lay out tiles and banner for `cfg`.
///
/// The config is sanitized first, so callers may pass raw UI values.
#[tracing::instrument(skip(cfg), fields(chars = cfg.text.chars().count()))]
pub fn compose(cfg: &StyleConfig) -> Composition {
    let cfg = cfg.sanitized();
    let lines = index_text(&cfg.text);
    let edge = tile_edge(&cfg);
    let gap = cfg.tile_gap;

    let flow_rows: Vec<FlowRow> = lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| wrap_line(i, line, edge, gap, cfg.wrap_width))
        .collect();

    let block_width = flow_rows
        .iter()
        .map(|r| r.width(gap))
        .fold(0.0f64, f64::max);

    // Rows holding only gaps collapse to zero height, like an empty flex row.
    let row_height = |r: &FlowRow| {
        if r.items.iter().any(|i| i.tile.is_some()) {
            edge
        } else {
            0.0
        }
    };
    let block_height = flow_rows.iter().map(row_height).sum::<f64>()
        + gap * flow_rows.len().saturating_sub(1) as f64;

    let banner_text = cfg.subtitle.trim().to_uppercase();
    let banner_size = (!banner_text.is_empty()).then(|| banner_box(&cfg, &banner_text));

    let content_width = block_width.max(banner_size.map_or(0.0, |s| s.width));
    let content_height = block_height
        + banner_size.map_or(0.0, |s| s.height + cfg.banner_gap);

    let origin_x = WRAPPER_PADDING;
    let origin_y = WRAPPER_PADDING;
    let center_x = origin_x + content_width / 2.0;

    let (block_top, banner_top) = match cfg.subtitle_pos {
        SubtitlePos::Top => {
            let banner_h = banner_size.map_or(0.0, |s| s.height + cfg.banner_gap);
            (origin_y + banner_h, origin_y)
        }
        SubtitlePos::Bottom => (origin_y, origin_y + block_height + cfg.banner_gap),
    };

    let mut rows = Vec::with_capacity(flow_rows.len());
    let mut tiles = Vec::new();
    let mut y = block_top;
    for (row_idx, flow) in flow_rows.iter().enumerate() {
        let width = flow.width(gap);
        let height = row_height(flow);
        let mut x = center_x - width / 2.0;
        for item in &flow.items {
            if let Some(tile) = item.tile {
                tiles.push(PlacedTile {
                    tile,
                    line: flow.line,
                    row: row_idx,
                    cell: Rect::new(x, y, x + edge, y + edge),
                });
            }
            x += item.width + gap;
        }
        rows.push(Row {
            line: flow.line,
            bounds: Rect::new(center_x - width / 2.0, y, center_x + width / 2.0, y + height),
        });
        y += height + gap;
    }

    let banner = banner_size.map(|s| {
        let x0 = center_x - s.width / 2.0;
        PlacedBanner {
            text: banner_text.clone(),
            rect: Rect::new(x0, banner_top, x0 + s.width, banner_top + s.height),
            font_size: cfg.subtitle_size * REM,
            radius: cfg.subtitle_radius.min(s.height / 2.0),
        }
    });

    let content = Rect::new(
        origin_x,
        origin_y,
        origin_x + content_width,
        origin_y + content_height,
    );
    let size = Size::new(
        even_ceil(content_width + 2.0 * WRAPPER_PADDING),
        even_ceil(content_height + 2.0 * WRAPPER_PADDING),
    );

    tracing::debug!(
        tiles = tiles.len(),
        rows = rows.len(),
        width = size.width,
        height = size.height,
        "composed layout"
    );

    Composition {
        lines,
        rows,
        tiles,
        banner,
        content,
        size,
    }
}

fn banner_box(cfg: &StyleConfig, text: &str) -> Size {
    let font = cfg.subtitle_size * REM;
    let glyphs = text.chars().count() as f64;
    let width = glyphs * font * BANNER_ADVANCE_EM + 2.0 * cfg.subtitle_padding.x;
    let height = font * BANNER_LINE_HEIGHT + 2.0 * cfg.subtitle_padding.y + BANNER_BORDER;
    Size::new(width, height)
}

fn even_ceil(v: f64) -> f64 {
    let n = v.ceil().max(2.0) as u64;
    (n + (n % 2)) as f64
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flow.rs"]
mod tests;
