//! Export driver.
//!
//! Image and vector exports capture the mounted scene at its current progress. Video export
//! seeks the surface frame by frame, waits a settle delay, captures, and only hands frames to
//! the sink once every capture has succeeded, so a failed run never emits a partial video.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context as _;

use crate::animation::timeline::{Clock, SystemClock};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::webm::ensure_parent_dir;
use crate::foundation::core::{Fps, FrameIndex, FrameRGBA};
use crate::foundation::error::{TileError, TileResult};
use crate::render::raster::{RasterOptions, Rasterizer, encode_png};
use crate::render::svg::{SvgOptions, scene_to_svg};
use crate::style::config::ranges::VIDEO_FPS;

use super::surface::CaptureSurface;

/// Wait between a progress change and its capture.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(50);

const MAX_RESERVED_FRAMES: u64 = 1024;

/// Receives the single user-facing message raised by a failed export.
pub trait Notifier {
    /// Show `message` without blocking the caller.
    fn notify(&self, message: &str);
}

/// Routes notifications to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "chaostile::notify", "{message}");
    }
}

/// Keeps notifications in memory. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

/// Result of an image or vector export.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportArtifact {
    /// PNG bytes with a transparent background.
    Png {
        /// Encoded file.
        bytes: Vec<u8>,
        /// Pixel width.
        width: u32,
        /// Pixel height.
        height: u32,
    },
    /// Standalone SVG document with a transparent background.
    Svg {
        /// Document text.
        document: String,
    },
}

impl ExportArtifact {
    /// File contents.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Png { bytes, .. } => bytes,
            Self::Svg { document } => document.as_bytes(),
        }
    }

    /// Write the artifact to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> TileResult<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, self.as_bytes())
            .with_context(|| format!("write export '{}'", path.display()))?;
        Ok(())
    }
}

/// Outcome of a successful video export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoSummary {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate.
    pub fps: Fps,
}

/// Runs exports against a [`CaptureSurface`].
pub struct Exporter<C: Clock = SystemClock> {
    rasterizer: Rasterizer,
    clock: C,
    settle: Duration,
    notifier: Box<dyn Notifier>,
    downloading: bool,
}

impl<C: Clock> std::fmt::Debug for Exporter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("rasterizer", &self.rasterizer)
            .field("settle", &self.settle)
            .field("downloading", &self.downloading)
            .finish()
    }
}

impl<C: Clock> Exporter<C> {
    /// Exporter that logs failures and settles for [`DEFAULT_SETTLE`].
    pub fn new(rasterizer: Rasterizer, clock: C) -> Self {
        Self {
            rasterizer,
            clock,
            settle: DEFAULT_SETTLE,
            notifier: Box::new(LogNotifier),
            downloading: false,
        }
    }

    /// Replace the failure notifier.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Replace the settle delay.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// `true` while an export is in flight.
    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    /// Capture the surface as a 2x PNG with a transparent background.
    #[tracing::instrument(skip_all)]
    pub fn export_png(&mut self, surface: &dyn CaptureSurface) -> TileResult<ExportArtifact> {
        self.run("image", |this| {
            let frame = this.capture_frame(surface)?;
            let bytes = encode_png(&frame)?;
            tracing::info!(width = frame.width, height = frame.height, "png exported");
            Ok(ExportArtifact::Png {
                bytes,
                width: frame.width,
                height: frame.height,
            })
        })
    }

    /// Capture the surface as an SVG document with a transparent background.
    #[tracing::instrument(skip_all)]
    pub fn export_svg(&mut self, surface: &dyn CaptureSurface) -> TileResult<ExportArtifact> {
        self.run("vector", |_| {
            let scene = surface.capture_scene()?;
            let document = scene_to_svg(&scene, SvgOptions::default());
            tracing::info!(bytes = document.len(), "svg exported");
            Ok(ExportArtifact::Svg { document })
        })
    }

    /// Capture the whole animation at `fps` and encode it into `sink`.
    ///
    /// `ceil(duration * fps) + 1` frames are captured at progress `i / ceil(duration * fps)`.
    /// `fps` must lie in [`crate::ranges::VIDEO_FPS`].
    /// `on_progress` receives a percentage after each capture. Whatever the outcome, the
    /// surface is reset to full visibility afterwards.
    #[tracing::instrument(skip_all, fields(fps = fps.as_f64()))]
    pub fn export_video(
        &mut self,
        surface: &mut dyn CaptureSurface,
        fps: Fps,
        sink: &mut dyn FrameSink,
        on_progress: &mut dyn FnMut(u8),
    ) -> TileResult<VideoSummary> {
        let res = self.run("video", |this| {
            let frames = this.capture_frames(&mut *surface, fps, on_progress)?;
            encode_frames(&frames, fps, &mut *sink)
        });
        surface.reset();
        match &res {
            Ok(summary) => tracing::info!(frames = summary.frames, "video exported"),
            Err(_) => sink.abort(),
        }
        res
    }

    fn run<T>(
        &mut self,
        kind: &str,
        f: impl FnOnce(&mut Self) -> TileResult<T>,
    ) -> TileResult<T> {
        self.downloading = true;
        let res = f(self);
        self.downloading = false;
        if let Err(e) = &res {
            tracing::error!(kind, error = %e, "export failed");
            self.notifier.notify(&format!("{kind} export failed: {e}"));
        }
        res
    }

    fn capture_frame(&self, surface: &dyn CaptureSurface) -> TileResult<FrameRGBA> {
        let scene = surface.capture_scene()?;
        self.rasterizer.rasterize_scene(&scene, RasterOptions::default())
    }

    fn capture_frames(
        &self,
        surface: &mut dyn CaptureSurface,
        fps: Fps,
        on_progress: &mut dyn FnMut(u8),
    ) -> TileResult<Vec<FrameRGBA>> {
        if !VIDEO_FPS.contains(fps.as_f64()) {
            return Err(TileError::validation(format!(
                "video fps {} is outside {}..={}",
                fps.as_f64(),
                VIDEO_FPS.min,
                VIDEO_FPS.max
            )));
        }
        let intervals = fps.intervals_ceil(surface.duration_secs());
        let total = intervals + 1;
        let mut frames = Vec::with_capacity(total.min(MAX_RESERVED_FRAMES) as usize);

        for i in 0..total {
            let progress = if intervals == 0 {
                1.0
            } else {
                i as f64 / intervals as f64
            };
            surface.seek(progress);
            self.clock.sleep(self.settle);

            let frame = self.capture_frame(surface)?;
            if let Some(first) = frames.first()
                && !same_size(first, &frame)
            {
                return Err(TileError::encoding(format!(
                    "frame {i} is {}x{}, expected {}x{}",
                    frame.width, frame.height, first.width, first.height
                )));
            }
            tracing::debug!(frame = i, progress, "captured frame");
            frames.push(frame);
            on_progress(percent(i + 1, total));
        }
        Ok(frames)
    }
}

fn encode_frames(
    frames: &[FrameRGBA],
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> TileResult<VideoSummary> {
    let first = frames
        .first()
        .ok_or_else(|| TileError::encoding("no frames captured"))?;
    let (width, height) = (first.width, first.height);

    sink.begin(SinkConfig { width, height, fps })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()?;

    Ok(VideoSummary {
        frames: frames.len() as u64,
        width,
        height,
        fps,
    })
}

fn same_size(a: &FrameRGBA, b: &FrameRGBA) -> bool {
    a.width == b.width && a.height == b.height
}

fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
