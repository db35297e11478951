use crate::animation::timeline::{AnimationState, Clock, Timeline};
use crate::foundation::error::{TileError, TileResult};
use crate::render::scene::Scene;
use crate::style::config::StyleConfig;

/// A visual tree an exporter can drive and capture.
///
/// Exports only read the tree; `seek` and `reset` are the single mutation points, used by
/// video capture.
pub trait CaptureSurface {
    /// Compose the tree at the current animation progress.
    ///
    /// Fails with [`TileError::CaptureUnavailable`] when nothing is mounted.
    fn capture_scene(&self) -> TileResult<Scene>;
    /// Current animation snapshot.
    fn animation(&self) -> AnimationState;
    /// Pin global progress for the next capture.
    fn seek(&mut self, progress: f64);
    /// Return to the fully visible resting state.
    fn reset(&mut self);
    /// Configured animation duration, seconds.
    fn duration_secs(&self) -> f64;
}

/// The preview stage: the mounted configuration plus its timeline.
#[derive(Debug)]
pub struct Stage<C: Clock> {
    config: Option<StyleConfig>,
    timeline: Timeline<C>,
}

impl<C: Clock> Stage<C> {
    /// Empty stage; captures fail until [`Stage::mount`] is called.
    pub fn new(clock: C) -> Self {
        let duration = StyleConfig::default().animation_duration;
        Self {
            config: None,
            timeline: Timeline::new(clock, duration),
        }
    }

    /// Stage with `cfg` already mounted.
    pub fn mounted(clock: C, cfg: StyleConfig) -> Self {
        let mut stage = Self::new(clock);
        stage.mount(cfg);
        stage
    }

    /// Mount (or replace) the configuration.
    pub fn mount(&mut self, cfg: StyleConfig) {
        let cfg = cfg.sanitized();
        self.timeline.set_duration_secs(cfg.animation_duration);
        self.config = Some(cfg);
    }

    /// Remove the visual tree.
    pub fn unmount(&mut self) {
        self.config = None;
    }

    /// `true` while a configuration is mounted.
    pub fn is_mounted(&self) -> bool {
        self.config.is_some()
    }

    /// Mounted configuration.
    pub fn config(&self) -> Option<&StyleConfig> {
        self.config.as_ref()
    }

    /// Apply an edit to the mounted configuration. No-op when unmounted.
    pub fn update(&mut self, edit: impl FnOnce(&mut StyleConfig)) {
        if let Some(cfg) = self.config.take() {
            let mut next = cfg;
            edit(&mut next);
            self.mount(next);
        }
    }

    /// Borrow the timeline.
    pub fn timeline(&self) -> &Timeline<C> {
        &self.timeline
    }

    /// Start playback from progress 0.
    pub fn play(&mut self) {
        self.timeline.play();
    }

    /// Advance playback and return the current progress.
    pub fn tick(&mut self) -> f64 {
        self.timeline.tick()
    }
}

impl<C: Clock> CaptureSurface for Stage<C> {
    fn capture_scene(&self) -> TileResult<Scene> {
        let cfg = self.config.as_ref().ok_or(TileError::CaptureUnavailable)?;
        Ok(Scene::build(cfg, self.animation()))
    }

    fn animation(&self) -> AnimationState {
        let preset = self
            .config
            .as_ref()
            .map(|c| c.animation_preset)
            .unwrap_or_default();
        self.timeline.animation_state(preset)
    }

    fn seek(&mut self, progress: f64) {
        self.timeline.seek(progress);
    }

    fn reset(&mut self) {
        self.timeline.reset();
    }

    fn duration_secs(&self) -> f64 {
        self.timeline.duration().as_secs_f64()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/surface.rs"]
mod tests;
