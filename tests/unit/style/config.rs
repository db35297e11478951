use super::*;
use serde_json::json;

#[test]
fn defaults_match_the_stock_look() {
    let cfg = StyleConfig::default();
    assert_eq!(cfg.text, "SCOTT ROGOWSKY");
    assert_eq!(cfg.subtitle_pos, SubtitlePos::Bottom);
    assert_eq!(cfg.tile_color.to_hex(), "#e0f2fe");
    assert_eq!(cfg.rotation_chaos, 5.0);
    assert_eq!(cfg.shadow_offset, 8.0);
    assert_eq!(cfg.animation_preset, AnimationPreset::None);
    assert_eq!(cfg.sanitized(), cfg);
}

#[test]
fn sanitized_clamps_out_of_range_values() {
    let cfg = StyleConfig {
        rotation_chaos: 90.0,
        pos_chaos: -4.0,
        scale_chaos: 3.0,
        shadow_chaos: 11.0,
        tile_size: 0.0,
        tile_padding: f64::NAN,
        animation_duration: f64::INFINITY,
        ..StyleConfig::default()
    };
    let s = cfg.sanitized();
    assert_eq!(s.rotation_chaos, 15.0);
    assert_eq!(s.pos_chaos, 0.0);
    assert_eq!(s.scale_chaos, 1.0);
    assert_eq!(s.shadow_chaos, 10.0);
    assert_eq!(s.tile_size, 0.5);
    assert_eq!(s.tile_padding, 16.0);
    assert_eq!(s.animation_duration, 2.0);
}

#[test]
fn sanitized_normalizes_line_breaks_and_font() {
    let cfg = StyleConfig {
        text: "AB\r\nCD\rEF".to_owned(),
        subtitle: "TWO\nLINES".to_owned(),
        font_family: "   ".to_owned(),
        ..StyleConfig::default()
    };
    let s = cfg.sanitized();
    assert_eq!(s.text, "AB\nCD\nEF");
    assert_eq!(s.subtitle, "TWO LINES");
    assert_eq!(s.font_family, "Fredoka One");
}

#[test]
fn serde_uses_camel_case_and_fills_missing_fields() {
    let cfg: StyleConfig = serde_json::from_value(json!({
        "text": "HI",
        "rotationChaos": 0.0,
        "animationPreset": "pop",
        "subtitlePos": "top"
    }))
    .unwrap();
    assert_eq!(cfg.text, "HI");
    assert_eq!(cfg.rotation_chaos, 0.0);
    assert_eq!(cfg.animation_preset, AnimationPreset::Pop);
    assert_eq!(cfg.subtitle_pos, SubtitlePos::Top);
    assert_eq!(cfg.tile_gap, 12.0);
}

#[test]
fn chaos_params_mirror_config() {
    let cfg = StyleConfig {
        rotation_chaos: 3.0,
        pos_chaos: 4.0,
        scale_chaos: 0.5,
        shadow_chaos: 2.0,
        shadow_offset: 6.0,
        ..StyleConfig::default()
    };
    let chaos = cfg.chaos();
    assert_eq!(chaos.rotation, 3.0);
    assert_eq!(chaos.position, 4.0);
    assert_eq!(chaos.scale, 0.5);
    assert_eq!(chaos.shadow, 2.0);
    assert_eq!(chaos.shadow_offset, 6.0);
}

#[test]
fn field_names_cover_persisted_keys() {
    let names = StyleConfig::field_names();
    assert!(names.contains(&"tileColor".to_owned()));
    assert!(names.contains(&"rotationChaos".to_owned()));
    assert!(names.contains(&"animationDuration".to_owned()));
    assert_eq!(names.len(), 27);
}

#[test]
fn control_ranges_report_membership() {
    assert!(ranges::SCALE_CHAOS.contains(0.5));
    assert!(!ranges::SCALE_CHAOS.contains(1.5));
    assert!(!ranges::SCALE_CHAOS.contains(f64::NAN));
}
