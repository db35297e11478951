use super::*;
use crate::chaos::jitter::jitter;
use crate::foundation::core::Rect;

fn tile(ch: char, global_index: u32) -> Tile {
    Tile { ch, global_index }
}

fn anim(preset: AnimationPreset, progress: f64) -> AnimationState {
    AnimationState {
        progress,
        preset,
        duration_secs: 2.0,
    }
}

fn banner() -> PlacedBanner {
    PlacedBanner {
        text: "BETA".to_owned(),
        rect: Rect::new(0.0, 0.0, 120.0, 58.0),
        font_size: 20.0,
        radius: 29.0,
    }
}

#[test]
fn zero_chaos_renders_identity_transform() {
    let cfg = StyleConfig {
        text: "HI".to_owned(),
        rotation_chaos: 0.0,
        pos_chaos: 0.0,
        scale_chaos: 0.0,
        shadow_chaos: 0.0,
        shadow_offset: 8.0,
        ..StyleConfig::default()
    };
    for (i, ch) in ['H', 'I'].into_iter().enumerate() {
        let t = tile(ch, i as u32);
        let j = jitter(t.global_index, cfg.chaos());
        let v = render_tile(&t, &cfg, &j, &AnimationState::at_rest());
        assert_eq!(v.rotation_deg, 0.0);
        assert_eq!(v.translation, Vec2::ZERO);
        assert_eq!(v.scale, 1.0);
        assert_eq!(v.shadow_offset, 8.0);
        assert_eq!(v.opacity, 1.0);
    }
}

#[test]
fn static_render_uses_jitter_verbatim() {
    let cfg = StyleConfig {
        pos_chaos: 5.0,
        scale_chaos: 0.3,
        shadow_chaos: 2.0,
        ..StyleConfig::default()
    };
    let t = tile('a', 7);
    let j = jitter(7, cfg.chaos());
    let v = render_tile(&t, &cfg, &j, &AnimationState::at_rest());
    assert_eq!(v.glyph, "A");
    assert_eq!(v.rotation_deg, j.rotation_deg);
    assert_eq!(v.translation, j.offset);
    assert_eq!(v.scale, j.scale);
    assert_eq!(v.shadow_offset, j.shadow_offset);
    assert_eq!(v.border_color, cfg.tile_color.mix_black(0.2));
}

#[test]
fn none_preset_ignores_progress() {
    let cfg = StyleConfig::default();
    let t = tile('A', 0);
    let j = jitter(0, cfg.chaos());
    let v = render_tile(&t, &cfg, &j, &anim(AnimationPreset::None, 0.0));
    assert_eq!(v.opacity, 1.0);
    assert_eq!(v.scale, j.scale);
}

#[test]
fn pop_multiplies_static_scale_and_cuts_in() {
    let cfg = StyleConfig {
        scale_chaos: 0.4,
        ..StyleConfig::default()
    };
    let t = tile('A', 1);
    let j = jitter(1, cfg.chaos());

    let hidden = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Pop, 0.05));
    assert_eq!(hidden.opacity, 0.0);

    let mid = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Pop, 0.29));
    let local = (0.29 - 0.05) / 0.3;
    assert_eq!(mid.opacity, 1.0);
    assert!((mid.scale - j.scale * ease_out_back(local)).abs() < 1e-12);

    let done = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Pop, 1.0));
    assert!((done.scale - j.scale).abs() < 1e-12);
    assert_eq!(done.rotation_deg, j.rotation_deg);
}

#[test]
fn slide_offsets_from_static_position_and_fades() {
    let cfg = StyleConfig {
        pos_chaos: 4.0,
        ..StyleConfig::default()
    };
    let t = tile('A', 0);
    let j = jitter(0, cfg.chaos());

    let start = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Slide, 0.0));
    assert!((start.translation.y - (j.offset.y + 100.0)).abs() < 1e-12);
    assert_eq!(start.translation.x, j.offset.x);
    assert_eq!(start.opacity, 0.0);

    let half = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Slide, 0.15));
    assert!((half.opacity - 0.5).abs() < 1e-9);
    assert!((half.translation.y - (j.offset.y + 25.0)).abs() < 1e-6);

    let end = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Slide, 1.0));
    assert_eq!(end.translation, j.offset);
    assert_eq!(end.opacity, 1.0);
}

#[test]
fn typewriter_snaps_tiles() {
    let cfg = StyleConfig::default();
    let t = tile('A', 0);
    let j = jitter(0, cfg.chaos());
    let before = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Typewriter, 0.15));
    let after = render_tile(&t, &cfg, &j, &anim(AnimationPreset::Typewriter, 0.16));
    assert_eq!(before.opacity, 0.0);
    assert_eq!(after.opacity, 1.0);
    assert_eq!(after.translation, j.offset);
    assert_eq!(after.scale, j.scale);
}

#[test]
fn glyph_shrinks_only_when_padding_crowds_it() {
    let cfg = StyleConfig::default();
    let j = jitter(0, cfg.chaos());
    let v = render_tile(&tile('A', 0), &cfg, &j, &AnimationState::at_rest());
    assert_eq!(v.size, 64.0);
    assert_eq!(v.font_size, 40.0);
    assert_eq!(v.border_bottom, 4.0);

    let tight = StyleConfig {
        tile_padding: 40.0,
        ..StyleConfig::default()
    };
    let v = render_tile(&tile('A', 0), &tight, &j, &AnimationState::at_rest());
    assert_eq!(v.font_size, 24.0);
}

#[test]
fn subtitle_keeps_tilt_and_follows_its_own_window() {
    let cfg = StyleConfig::default();
    let b = banner();

    let still = render_subtitle(&b, &cfg, &AnimationState::at_rest());
    assert_eq!(still.rotation_deg, -1.0);
    assert_eq!(still.opacity, 1.0);
    assert_eq!(still.scale, 1.0);

    let early = render_subtitle(&b, &cfg, &anim(AnimationPreset::Pop, 0.5));
    assert_eq!(early.opacity, 0.0);
    assert_eq!(early.rotation_deg, -1.0);

    let slide = render_subtitle(&b, &cfg, &anim(AnimationPreset::Slide, 0.6));
    assert_eq!(slide.translate_y, 50.0);
    assert_eq!(slide.opacity, 0.0);

    let fade = render_subtitle(&b, &cfg, &anim(AnimationPreset::Typewriter, 0.8));
    assert!((fade.opacity - 0.5).abs() < 1e-9);
}

#[test]
fn transform_pivots_on_center() {
    let cfg = StyleConfig {
        rotation_chaos: 0.0,
        ..StyleConfig::default()
    };
    let j = jitter(0, cfg.chaos());
    let v = render_tile(&tile('A', 0), &cfg, &j, &AnimationState::at_rest());
    let center = Point::new(100.0, 50.0);
    assert_eq!(v.transform(center) * Point::ORIGIN, center);
}
