use super::*;
use crate::animation::timeline::AnimationState;
use crate::style::config::StyleConfig;

fn scene() -> Scene {
    let cfg = StyleConfig {
        text: "HI".to_owned(),
        subtitle: String::new(),
        ..StyleConfig::default()
    };
    Scene::build(&cfg, AnimationState::at_rest())
}

#[test]
fn export_is_double_resolution_and_transparent_at_edges() {
    let scene = scene();
    let frame = Rasterizer::without_fonts()
        .rasterize_scene(&scene, RasterOptions::default())
        .unwrap();
    assert_eq!(frame.width, (scene.size.width * 2.0) as u32);
    assert_eq!(frame.height, (scene.size.height * 2.0) as u32);
    assert!(frame.premultiplied);
    assert!(frame.has_visible_pixels());
    // Top-left corner lies inside the wrapper padding.
    assert_eq!(&frame.data[0..4], &[0, 0, 0, 0]);
}

#[test]
fn background_option_fills_corners() {
    let scene = scene();
    let frame = Rasterizer::without_fonts()
        .rasterize_scene(
            &scene,
            RasterOptions {
                pixel_ratio: 1.0,
                background: Some(scene.canvas_bg),
            },
        )
        .unwrap();
    assert_eq!(&frame.data[0..4], &[0x17, 0x17, 0x17, 255]);
}

#[test]
fn rasterizing_twice_is_identical() {
    let scene = scene();
    let r = Rasterizer::without_fonts();
    let a = r.rasterize_scene(&scene, RasterOptions::default()).unwrap();
    let b = r.rasterize_scene(&scene, RasterOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_inputs_are_encoding_errors() {
    let r = Rasterizer::without_fonts();
    assert!(matches!(
        r.rasterize_svg("<svg", 1.0),
        Err(TileError::Encoding(_))
    ));
    assert!(matches!(
        r.rasterize_svg("<svg xmlns=\"http://www.w3.org/2000/svg\"/>", 0.0),
        Err(TileError::Validation(_))
    ));
}

#[test]
fn png_round_trips_dimensions() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    };
    let png = encode_png(&frame).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0[3], 0);
}

#[test]
fn png_rejects_short_buffers() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 8],
        premultiplied: true,
    };
    assert!(matches!(encode_png(&frame), Err(TileError::Encoding(_))));
}
