use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::integer(30).unwrap().as_f64(), 30.0);
}

#[test]
fn intervals_ceil_covers_whole_duration() {
    let fps = Fps::integer(30).unwrap();
    assert_eq!(fps.intervals_ceil(2.0), 60);
    assert_eq!(fps.intervals_ceil(1.01), 31);
    assert_eq!(fps.intervals_ceil(0.0), 0);
    assert_eq!(fps.intervals_ceil(f64::NAN), 0);

    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert_eq!(ntsc.intervals_ceil(1.0), 30);
}

#[test]
fn transparent_frame_has_no_visible_pixels() {
    let frame = FrameRGBA::transparent(4, 2);
    assert_eq!(frame.data.len(), 32);
    assert!(!frame.has_visible_pixels());
}

#[test]
fn straight_copy_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    let straight = frame.to_straight_rgba8();
    assert_eq!(straight[3], 128);
    assert_eq!(straight[0], 128);
}

#[test]
fn straight_input_is_premultiplied_and_size_checked() {
    let frame = FrameRGBA::from_straight_rgba8(1, 1, vec![200, 100, 50, 128]).unwrap();
    assert!(frame.premultiplied);
    assert_eq!(frame.data, vec![100, 50, 25, 128]);
    assert!(FrameRGBA::from_straight_rgba8(2, 2, vec![0; 4]).is_err());
}
