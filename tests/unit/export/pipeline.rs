use super::*;
use crate::animation::timeline::{ManualClock, PlayState};
use crate::encode::sink::InMemorySink;
use crate::export::surface::Stage;
use crate::style::config::{AnimationPreset, StyleConfig};

fn small_config() -> StyleConfig {
    StyleConfig {
        text: "HI".into(),
        subtitle: String::new(),
        animation_preset: AnimationPreset::Pop,
        animation_duration: 0.5,
        ..StyleConfig::default()
    }
}

fn exporter(clock: &ManualClock) -> Exporter<&ManualClock> {
    Exporter::new(Rasterizer::without_fonts(), clock)
}

#[derive(Default)]
struct FailingSink {
    aborted: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> TileResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> TileResult<()> {
        if idx.0 == 1 {
            return Err(TileError::encoding("encoder rejected frame"));
        }
        Ok(())
    }

    fn end(&mut self) -> TileResult<()> {
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[test]
fn png_export_is_a_decodable_2x_image() {
    let clock = ManualClock::new();
    let stage = Stage::mounted(&clock, small_config());
    let scene = stage.capture_scene().unwrap();

    let mut exp = exporter(&clock);
    let art = exp.export_png(&stage).unwrap();
    let ExportArtifact::Png {
        bytes,
        width,
        height,
    } = art
    else {
        panic!("expected png");
    };
    assert_eq!(width as f64, scene.size.width * 2.0);
    assert_eq!(height as f64, scene.size.height * 2.0);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!(img.width(), width);
    assert!(!exp.is_downloading());
}

#[test]
fn svg_export_has_no_background_rect() {
    let clock = ManualClock::new();
    let stage = Stage::mounted(&clock, small_config());
    let mut exp = exporter(&clock);
    let ExportArtifact::Svg { document } = exp.export_svg(&stage).unwrap() else {
        panic!("expected svg");
    };
    assert!(document.starts_with("<svg"));
    assert!(!document.contains("#171717"));
}

#[test]
fn unmounted_exports_notify_once_each() {
    let clock = ManualClock::new();
    let stage = Stage::new(&clock);
    let notes = RecordingNotifier::new();
    let mut exp = exporter(&clock).with_notifier(notes.clone());

    assert!(matches!(
        exp.export_png(&stage),
        Err(TileError::CaptureUnavailable)
    ));
    assert!(matches!(
        exp.export_svg(&stage),
        Err(TileError::CaptureUnavailable)
    ));
    assert!(!exp.is_downloading());
    let msgs = notes.messages();
    assert_eq!(msgs.len(), 2);
    assert!(msgs[0].starts_with("image export failed"));
    assert!(msgs[1].starts_with("vector export failed"));
}

#[test]
fn video_export_settles_before_every_frame() {
    let clock = ManualClock::new();
    let mut stage = Stage::mounted(&clock, small_config());
    let mut exp = exporter(&clock);
    let mut sink = InMemorySink::new();
    let mut reported = Vec::new();

    let fps = Fps::integer(4).unwrap();
    let summary = exp
        .export_video(&mut stage, fps, &mut sink, &mut |p| reported.push(p))
        .unwrap();

    // 0.5 s at 4 fps: two intervals, three frames.
    assert_eq!(summary.frames, 3);
    assert_eq!(sink.frames().len(), 3);
    assert!(sink.is_finished());
    assert_eq!(reported, vec![33, 67, 100]);
    assert_eq!(clock.total_slept(), DEFAULT_SETTLE * 3);
    assert_eq!(stage.timeline().state(), PlayState::Idle);
    assert!(!exp.is_downloading());
}

#[test]
fn failed_video_export_aborts_sink_and_resets_progress() {
    let clock = ManualClock::new();
    let mut stage = Stage::mounted(&clock, small_config());
    stage.seek(0.3);
    let notes = RecordingNotifier::new();
    let mut exp = exporter(&clock).with_notifier(notes.clone());
    let mut sink = FailingSink::default();

    let err = exp
        .export_video(&mut stage, Fps::integer(4).unwrap(), &mut sink, &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, TileError::Encoding(_)));
    assert!(sink.aborted);
    assert_eq!(stage.capture_scene().unwrap().animation.progress, 1.0);
    assert_eq!(notes.messages().len(), 1);
    assert!(!exp.is_downloading());
}

#[test]
fn unmounted_video_export_never_touches_the_sink() {
    let clock = ManualClock::new();
    let mut stage = Stage::new(&clock);
    let mut exp = exporter(&clock);
    let mut sink = InMemorySink::new();
    let err = exp
        .export_video(&mut stage, Fps::integer(30).unwrap(), &mut sink, &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, TileError::CaptureUnavailable));
    assert!(sink.config().is_none());
    assert!(sink.frames().is_empty());
}

#[test]
fn percent_rounds_and_saturates() {
    assert_eq!(percent(1, 61), 2);
    assert_eq!(percent(61, 61), 100);
    assert_eq!(percent(0, 0), 100);
}

#[test]
fn out_of_range_fps_is_rejected_before_capturing() {
    let clock = ManualClock::new();
    let mut stage = Stage::mounted(
        &clock,
        StyleConfig {
            animation_duration: 10.0,
            ..small_config()
        },
    );
    let notes = RecordingNotifier::new();
    let mut exp = exporter(&clock).with_notifier(notes.clone());
    let mut sink = InMemorySink::new();

    for fps in [Fps::integer(u32::MAX).unwrap(), Fps::integer(61).unwrap()] {
        let err = exp
            .export_video(&mut stage, fps, &mut sink, &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, TileError::Validation(_)));
    }
    assert_eq!(clock.total_slept(), Duration::ZERO);
    assert!(sink.config().is_none());
    assert_eq!(notes.messages().len(), 2);
    assert!(!exp.is_downloading());
}

fn keep_file(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("chaostile_export_{name}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("keep.webm");
    std::fs::write(&path, b"older video").unwrap();
    path
}

#[test]
fn failed_capture_keeps_existing_video_file() {
    use crate::encode::webm::{FfmpegWebmSink, WebmSinkOpts};

    let path = keep_file("capture_failed");
    let clock = ManualClock::new();
    let mut stage = Stage::new(&clock);
    let mut exp = exporter(&clock);
    let mut sink = FfmpegWebmSink::new(WebmSinkOpts::new(&path));

    let err = exp
        .export_video(&mut stage, Fps::integer(30).unwrap(), &mut sink, &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, TileError::CaptureUnavailable));
    drop(sink);
    assert_eq!(std::fs::read(&path).unwrap(), b"older video");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn refused_sink_start_keeps_existing_video_file() {
    use crate::encode::webm::{FfmpegWebmSink, VideoCodec, WebmSinkOpts};

    let path = keep_file("begin_refused");
    let clock = ManualClock::new();
    let mut stage = Stage::mounted(&clock, small_config());
    let mut exp = exporter(&clock);
    let mut sink = FfmpegWebmSink::new(WebmSinkOpts {
        out_path: path.clone(),
        overwrite: false,
        codec: VideoCodec::Vp9,
    });

    let err = exp
        .export_video(&mut stage, Fps::integer(4).unwrap(), &mut sink, &mut |_| {})
        .unwrap_err();
    assert!(matches!(err, TileError::Validation(_)));
    drop(sink);
    assert_eq!(std::fs::read(&path).unwrap(), b"older video");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
