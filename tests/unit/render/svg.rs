use super::*;
use crate::{
    foundation::core::{BezPath, Point},
    render::{
        palette::ThemePalette,
        plan::{DrawPlan, DrawStats},
        surface::execute_plan,
    },
};

fn line() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((10.0, 10.0));
    p
}

fn plan(ops: Vec<DrawOp>, frozen: bool) -> DrawPlan {
    DrawPlan {
        canvas: Canvas::new(64, 32).unwrap(),
        frozen,
        ops,
        stats: DrawStats::default(),
    }
}

fn stroke(motion: Motion, fx: VisualFx) -> DrawOp {
    DrawOp::Stroke {
        path: line(),
        transform: Affine::IDENTITY,
        paint: Paint::Linear(ThemePalette::DARK.idle),
        width: 1.0,
        opacity: 0.5,
        motion,
        fx,
    }
}

fn render(plan: &DrawPlan, animated: bool) -> String {
    let mut surface = SvgSurface::new(SvgOptions { animated });
    execute_plan(&mut surface, plan).unwrap()
}

#[test]
fn document_has_canvas_size_and_gradient_defs() {
    let doc = render(
        &plan(
            vec![
                DrawOp::Background {
                    paint: Paint::Linear(ThemePalette::DARK.background),
                },
                stroke(Motion::Static, VisualFx::NONE),
                stroke(Motion::Static, VisualFx::NONE),
            ],
            false,
        ),
        true,
    );
    assert!(doc.starts_with("<svg"));
    assert!(doc.ends_with("</svg>"));
    assert!(doc.contains(r#"width="64" height="32" viewBox="0 0 64 32""#));
    // Repeated gradients share one definition.
    assert!(doc.contains(r#"id="grad-0""#));
    assert!(doc.contains(r#"id="grad-1""#));
    assert!(!doc.contains(r#"id="grad-2""#));
    assert!(doc.contains("url(#grad-1)"));
}

#[test]
fn filters_are_defined_only_when_used() {
    let plain = render(&plan(vec![stroke(Motion::Static, VisualFx::NONE)], false), false);
    assert!(!plain.contains(r#"id="glow""#));
    assert!(!plain.contains(r#"id="chroma""#));

    let fx = VisualFx {
        glow: true,
        chromatic: true,
    };
    let doc = render(&plan(vec![stroke(Motion::Static, fx)], false), false);
    assert!(doc.contains(r#"<filter id="glow""#));
    assert!(doc.contains(r#"<filter id="chroma""#));
    assert!(doc.contains(r#"filter="url(#glow)""#));
}

#[test]
fn motion_is_emitted_only_when_animated() {
    let ops = vec![
        stroke(Motion::Draw { duration_s: 4.0 }, VisualFx::NONE),
        stroke(
            Motion::Fall {
                distance: 100.0,
                duration_s: 6.0,
            },
            VisualFx::NONE,
        ),
    ];
    let animated = render(&plan(ops.clone(), false), true);
    assert!(animated.contains("@keyframes flourish-draw"));
    assert!(animated.contains("animation:flourish-draw 4.00s"));
    assert!(animated.contains("--fall:100.0px"));
    assert!(animated.contains(r#"pathLength="1""#));
    assert!(!animated.contains("animation-play-state:paused"));

    let still = render(&plan(ops, false), false);
    assert!(!still.contains("<style>"));
    assert!(!still.contains("animation:"));
    assert!(!still.contains("pathLength"));
}

#[test]
fn frozen_plans_pause_animation() {
    let doc = render(
        &plan(vec![stroke(Motion::Pulse { duration_s: 2.0 }, VisualFx::NONE)], true),
        true,
    );
    assert!(doc.contains("svg *{animation-play-state:paused}"));
}

#[test]
fn distortion_wraps_prior_content() {
    let ops = vec![
        stroke(Motion::Static, VisualFx::NONE),
        DrawOp::Overlay {
            kind: OverlayKind::Distortion,
            paint: Paint::Solid(Rgba8::rgb(255, 0, 0)),
            opacity: 0.1,
            displacement_px: 9.0,
        },
    ];
    let doc = render(&plan(ops, false), false);
    assert!(doc.contains(r#"<filter id="distort""#));
    assert!(doc.contains(r#"scale="9.0""#));
    let wrap = doc.find(r#"<g filter="url(#distort)"><path"#).unwrap();
    let tint = doc.find(r##"fill="#ff0000" opacity="0.100""##).unwrap();
    assert!(wrap < tint);
}

#[test]
fn text_is_escaped_and_rotated() {
    let op = DrawOp::Text {
        position: Point::new(5.0, 6.0),
        text: "<&>".to_string(),
        font_size: 12.0,
        rotation_deg: 45.0,
        transform: Affine::IDENTITY,
        paint: Paint::Solid(Rgba8::rgb(1, 2, 3)),
        opacity: 1.0,
        motion: Motion::Static,
    };
    let doc = render(&plan(vec![op], false), false);
    assert!(doc.contains("&lt;&amp;&gt;</text>"));
    assert!(doc.contains(r#"transform="rotate(45.00 5.00 6.00)""#));
}

#[test]
fn draw_before_begin_is_an_error() {
    let mut surface = SvgSurface::new(SvgOptions::default());
    assert!(surface.draw(&stroke(Motion::Static, VisualFx::NONE)).is_err());
    assert!(surface.finish().is_err());
}
