use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameRGBA};
use crate::foundation::error::{TileError, TileResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// WebM video codec. Both keep the alpha channel (`yuva420p`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    /// `libvpx` (VP8).
    Vp8,
    /// `libvpx-vp9` (VP9).
    #[default]
    Vp9,
}

impl VideoCodec {
    fn encoder_args(self) -> &'static [&'static str] {
        match self {
            Self::Vp8 => &["-c:v", "libvpx", "-b:v", "4M", "-auto-alt-ref", "0"],
            Self::Vp9 => &[
                "-c:v",
                "libvpx-vp9",
                "-b:v",
                "0",
                "-crf",
                "30",
                "-auto-alt-ref",
                "0",
            ],
        }
    }
}

/// Options for [`FfmpegWebmSink`].
#[derive(Clone, Debug)]
pub struct WebmSinkOpts {
    /// Output WebM file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Codec.
    pub codec: VideoCodec,
}

impl WebmSinkOpts {
    /// Create options for writing a VP9 WebM to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            codec: VideoCodec::default(),
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams straight-alpha RGBA frames to stdin.
///
/// On failure or [`FrameSink::abort`] the partially written file is removed. A file at the
/// output path is only ever removed once this sink has spawned `ffmpeg` to write it.
pub struct FfmpegWebmSink {
    opts: WebmSinkOpts,
    owns_output: bool,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegWebmSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: WebmSinkOpts) -> Self {
        Self {
            opts,
            owns_output: false,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Output path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn remove_output(&mut self) {
        if !std::mem::take(&mut self.owns_output) {
            return;
        }
        if self.opts.out_path.exists()
            && let Err(e) = std::fs::remove_file(&self.opts.out_path)
        {
            tracing::warn!(path = %self.opts.out_path.display(), error = %e, "failed to remove partial video");
        }
    }
}

impl FrameSink for FfmpegWebmSink {
    fn begin(&mut self, cfg: SinkConfig) -> TileResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(TileError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(TileError::validation(
                "webm sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(TileError::validation(
                "webm sink width/height must be even (required for yuva420p output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(TileError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(TileError::encoding(
                "ffmpeg is required for WebM encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        // Input: raw straight-alpha RGBA8 frames (premultiplied frames are converted in push_frame).
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an"]);
        cmd.args(self.opts.codec.encoder_args());
        cmd.args(["-pix_fmt", "yuva420p", "-f", "webm"]);
        cmd.arg(&self.opts.out_path);

        tracing::debug!(?cmd, "spawning ffmpeg");
        let mut child = cmd.spawn().map_err(|e| {
            TileError::encoding(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TileError::encoding("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| TileError::encoding("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.owns_output = true;
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TileResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| TileError::encoding("webm sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(TileError::encoding(
                "webm sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TileError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(TileError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        self.scratch.copy_from_slice(&frame.data);
        if frame.premultiplied {
            unpremultiply_rgba8_in_place(&mut self.scratch);
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TileError::encoding("webm sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            TileError::encoding(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> TileResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| TileError::encoding("webm sink not started"))?;

        let status = child.wait().map_err(|e| {
            TileError::encoding(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TileError::encoding("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| TileError::encoding(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        self.cfg = None;
        if !status.success() {
            self.remove_output();
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(TileError::encoding(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        self.owns_output = false;
        Ok(())
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        self.cfg = None;
        self.remove_output();
    }
}

impl Drop for FfmpegWebmSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` before `-i` sets the input framerate (rational `num/den`).
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TileResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
