use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(200, 100).unwrap();
    assert_eq!(c.center(), Point::new(100.0, 50.0));
    assert_eq!(c.min_dim(), 100.0);
}

#[test]
fn fps_frame_duration() {
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.frame_duration_ms() - 16.666_666).abs() < 1e-3);
    assert_eq!(fps.secs_to_frames_floor(2.0), 120);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn rgba_formats_as_opaque_hex() {
    let c = Rgba8::rgb(255, 128, 0);
    assert_eq!(c.a, 255);
    assert_eq!(c.to_hex_rgb(), "#ff8000");
    assert_eq!(c.alpha_f32(), 1.0);
}

#[test]
fn span_validation() {
    assert!(Span::new(1u32, 3).validate("x").is_ok());
    assert!(Span::new(4u32, 3).validate("x").is_err());
    assert!(Span::new(0.0, f64::NAN).validate("x").is_err());
    assert!(Span::new(2.0, 1.0).validate("x").is_err());
    assert!(Span::new(1.0, 1.0).validate("x").is_ok());
}
