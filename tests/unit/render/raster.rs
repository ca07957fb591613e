use super::*;

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4" viewBox="0 0 4 4"><rect x="0" y="0" width="4" height="4" fill="#ff0000" opacity="0.5"/></svg>"##;

#[test]
fn rasterizes_to_canvas_size() {
    let frame = rasterize_svg(RED_SQUARE, Canvas::new(8, 8).unwrap()).unwrap();
    assert_eq!((frame.width, frame.height), (8, 8));
    assert_eq!(frame.data.len(), 8 * 8 * 4);
    assert!(frame.premultiplied);
    let px = &frame.data[..4];
    assert!(px[3] > 100 && px[3] < 160);
    assert!(px[0] <= px[3]);
    assert_eq!(px[1], 0);
}

#[test]
fn demultiply_restores_straight_alpha() {
    let mut frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 10, 10, 10, 0],
        premultiplied: true,
    };
    frame.demultiply();
    assert!(!frame.premultiplied);
    assert_eq!(&frame.data[..4], &[128, 64, 0, 128]);
    assert_eq!(&frame.data[4..], &[0, 0, 0, 0]);

    // Idempotent once straight.
    frame.demultiply();
    assert_eq!(&frame.data[..4], &[128, 64, 0, 128]);
}

#[test]
fn malformed_svg_is_an_error() {
    assert!(rasterize_svg("<svg", Canvas::new(2, 2).unwrap()).is_err());
}
