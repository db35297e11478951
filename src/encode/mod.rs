//! Video encoding sinks.
//!
//! Sinks consume captured frames in capture order and are driven by
//! [`crate::Exporter::export_video`].

/// Generic frame sink trait and built-in sinks.
pub mod sink;
/// `ffmpeg`-based WebM sink (VP8/VP9 with alpha via system `ffmpeg`).
pub mod webm;
