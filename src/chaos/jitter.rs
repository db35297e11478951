//! Deterministic per-tile perturbation.
//!
//! [`jitter`] is a pure function of the tile's global index and the chaos parameters. Nothing is
//! cached or seeded from entropy, so the live preview, a replayed animation and every exported
//! video frame agree bit for bit.

use crate::foundation::core::Vec2;
use crate::style::config::ChaosParams;

/// Multiplier turning a tile index into the phase fed to the trig-based noise.
pub const SEED_FACTOR: f64 = 123.45;

/// Static perturbation of one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JitterVector {
    /// Rotation, degrees. Sign alternates with index parity.
    pub rotation_deg: f64,
    /// Translation, pixels, bounded by `±position chaos` on each axis.
    pub offset: Vec2,
    /// Scale multiplier around the tile center.
    pub scale: f64,
    /// Resolved hard-shadow offset, pixels, never negative.
    pub shadow_offset: f64,
}

impl JitterVector {
    /// The vector produced when every chaos parameter is zero.
    pub fn identity(shadow_offset: f64) -> Self {
        Self {
            rotation_deg: 0.0,
            offset: Vec2::ZERO,
            scale: 1.0,
            shadow_offset,
        }
    }
}

/// Compute the static jitter for the tile at `index`.
///
/// The scale multiplier is `1 + sin(seed * 2.5) * chaos.scale` and is not clamped here; keep
/// `chaos.scale` in `[0, 1]` (see [`crate::ranges::SCALE_CHAOS`]) to keep it positive.
pub fn jitter(index: u32, chaos: ChaosParams) -> JitterVector {
    let seed = f64::from(index) * SEED_FACTOR;

    let rotation_deg = if chaos.rotation == 0.0 {
        0.0
    } else {
        let direction = if index % 2 == 0 { -1.0 } else { 1.0 };
        direction * chaos.rotation
    };

    let offset = if chaos.position == 0.0 {
        Vec2::ZERO
    } else {
        Vec2::new(
            seed.sin() * chaos.position,
            (seed * 0.5).cos() * chaos.position,
        )
    };

    let scale = if chaos.scale == 0.0 {
        1.0
    } else {
        1.0 + (seed * 2.5).sin() * chaos.scale
    };

    let shadow_offset = if chaos.shadow > 0.0 {
        let rand = (f64::from(index) * 3.3).sin().abs();
        let variance = (rand - 0.5) * 2.0 * chaos.shadow;
        (chaos.shadow_offset + variance).max(0.0)
    } else {
        chaos.shadow_offset
    };

    JitterVector {
        rotation_deg,
        offset,
        scale,
        shadow_offset,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chaos/jitter.rs"]
mod tests;
