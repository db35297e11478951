//! Mapping global timeline progress to per-tile and subtitle local progress.

/// Global-progress delay added per tile index.
pub const STAGGER_DELAY: f64 = 0.05;
/// Global-progress span over which one tile completes its entrance.
pub const TILE_WINDOW: f64 = 0.3;
/// Global progress at which the subtitle entrance begins.
pub const SUBTITLE_START: f64 = 0.6;
/// Global-progress span of the subtitle entrance.
pub const SUBTITLE_WINDOW: f64 = 0.4;
/// Vertical slide distance of a tile, pixels.
pub const TILE_SLIDE_DISTANCE: f64 = 100.0;
/// Vertical slide distance of the subtitle, pixels.
pub const SUBTITLE_SLIDE_DISTANCE: f64 = 50.0;

/// Local entrance parameter of the tile at `index`:
/// `clamp((progress - index * STAGGER_DELAY) / TILE_WINDOW, 0, 1)`.
///
/// Global progress of 1 always yields 1, so the terminal frame shows every tile even when the
/// text is long enough that late tiles would still be inside their window.
///
/// The stagger does not compress for long texts. Tiles from index 15 on cannot finish their
/// window before progress 1, and tiles from index 20 on start at or past it. Those stay
/// partial or hidden until the terminal frame, where they all appear at once.
pub fn tile_local_t(progress: f64, index: u32) -> f64 {
    if progress >= 1.0 {
        return 1.0;
    }
    let start = f64::from(index) * STAGGER_DELAY;
    ((progress - start) / TILE_WINDOW).clamp(0.0, 1.0)
}

/// Local entrance parameter of the subtitle (single window, no stagger).
pub fn subtitle_local_t(progress: f64) -> f64 {
    ((progress - SUBTITLE_START) / SUBTITLE_WINDOW).clamp(0.0, 1.0)
}
