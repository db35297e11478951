use super::*;
use crate::animation::timeline::AnimationState;
use crate::style::config::{AnimationPreset, StyleConfig};

fn scene(cfg: &StyleConfig) -> Scene {
    Scene::build(cfg, AnimationState::at_rest())
}

#[test]
fn num_trims_trailing_zeros() {
    assert_eq!(num(1.0), "1");
    assert_eq!(num(0.5), "0.5");
    assert_eq!(num(-0.00001), "0");
    assert_eq!(num(12.34567), "12.3457");
    assert_eq!(num(f64::NAN), "0");
}

#[test]
fn escape_handles_markup() {
    assert_eq!(escape("<A&B>"), "&lt;A&amp;B&gt;");
}

#[test]
fn document_has_one_group_per_visible_tile() {
    let cfg = StyleConfig {
        text: "AB C".to_owned(),
        subtitle: String::new(),
        ..StyleConfig::default()
    };
    let svg = scene_to_svg(&scene(&cfg), SvgOptions::default());
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<text").count(), 3);
    assert!(svg.contains(">A</text>"));
    assert!(svg.contains("'Fredoka One', sans-serif"));
    // Transparent export: no background rect, no filter.
    assert!(!svg.contains("composition-shadow"));
}

#[test]
fn background_and_shadow_are_optional() {
    let cfg = StyleConfig {
        composition_shadow: 10.0,
        ..StyleConfig::default()
    };
    let svg = scene_to_svg(
        &scene(&cfg),
        SvgOptions {
            background: Some(cfg.canvas_bg),
        },
    );
    assert!(svg.contains(r##"fill="#171717""##));
    assert!(svg.contains(r#"stdDeviation="5""#));
    assert!(svg.contains(r#"filter="url(#composition-shadow)""#));
}

#[test]
fn hidden_tiles_are_omitted() {
    let cfg = StyleConfig {
        text: "HELLO".to_owned(),
        subtitle: "SUB".to_owned(),
        animation_preset: AnimationPreset::Typewriter,
        ..StyleConfig::default()
    };
    let anim = AnimationState {
        progress: 0.0,
        preset: AnimationPreset::Typewriter,
        duration_secs: 2.0,
    };
    let svg = scene_to_svg(&Scene::build(&cfg, anim), SvgOptions::default());
    assert!(!svg.contains("<text"));
}

#[test]
fn zero_shadow_drops_shadow_rect() {
    let with = StyleConfig {
        text: "A".to_owned(),
        subtitle: String::new(),
        ..StyleConfig::default()
    };
    let without = StyleConfig {
        shadow_offset: 0.0,
        ..with.clone()
    };
    let a = scene_to_svg(&scene(&with), SvgOptions::default());
    let b = scene_to_svg(&scene(&without), SvgOptions::default());
    assert_eq!(a.matches("<rect").count(), 3);
    assert_eq!(b.matches("<rect").count(), 2);
}

#[test]
fn output_parses_as_svg() {
    let svg = scene_to_svg(&scene(&StyleConfig::default()), SvgOptions::default());
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default());
    assert!(tree.is_ok());
}

#[test]
fn escape_drops_characters_xml_forbids() {
    assert_eq!(escape("A\u{1}B\u{1b}\u{FFFF}"), "AB");
    assert_eq!(escape("tab\there"), "tab\there");
}

#[test]
fn control_characters_in_text_still_yield_valid_svg() {
    let cfg = StyleConfig {
        text: "A\u{1}B".into(),
        subtitle: "sub\u{7}title".into(),
        ..StyleConfig::default()
    };
    let svg = scene_to_svg(&scene(&cfg), SvgOptions::default());
    assert!(!svg.contains('\u{1}'));
    assert!(!svg.contains('\u{7}'));
    assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
}
