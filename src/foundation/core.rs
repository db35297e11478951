use crate::foundation::error::{TileError, TileResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// 0-based index of a captured video frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> TileResult<Self> {
        if den == 0 {
            return Err(TileError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TileError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number frame rate, the usual case for video export.
    pub fn integer(num: u32) -> TileResult<Self> {
        Self::new(num, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Number of frame intervals needed to cover `secs`, rounded up.
    ///
    /// A capture covering the whole span takes one more frame than this (both endpoints).
    pub fn intervals_ceil(self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        // Snap values like 59.999999 produced by float error before rounding up.
        let raw = secs * self.as_f64();
        let snapped = (raw * 1e6).round() / 1e6;
        snapped.ceil() as u64
    }
}

/// A captured frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** unless `premultiplied` says otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
            premultiplied: true,
        }
    }

    /// Build a premultiplied frame from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> TileResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(TileError::validation(format!(
                "rgba buffer is {} bytes, expected {expected}",
                data.len()
            )));
        }
        crate::foundation::math::premultiply_rgba8_in_place(&mut data);
        Ok(Self {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    /// Return `true` when at least one pixel has non-zero alpha.
    pub fn has_visible_pixels(&self) -> bool {
        self.data.chunks_exact(4).any(|px| px[3] != 0)
    }

    /// Copy of the pixels with straight (non-premultiplied) alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            crate::foundation::math::unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
