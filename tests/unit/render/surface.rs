use super::*;
use crate::{
    foundation::{core::Rgba8, error::FlourishError},
    render::{palette::Paint, plan::DrawStats},
};

#[derive(Default)]
struct Recorder {
    begun: Option<(Canvas, bool)>,
    ops: usize,
    fail_at: Option<usize>,
}

impl DrawSurface for Recorder {
    type Output = usize;

    fn begin(&mut self, canvas: Canvas, frozen: bool) -> FlourishResult<()> {
        self.begun = Some((canvas, frozen));
        Ok(())
    }

    fn draw(&mut self, _op: &DrawOp) -> FlourishResult<()> {
        if self.fail_at == Some(self.ops) {
            return Err(FlourishError::render("boom"));
        }
        self.ops += 1;
        Ok(())
    }

    fn finish(&mut self) -> FlourishResult<usize> {
        Ok(self.ops)
    }
}

fn plan(n: usize) -> DrawPlan {
    DrawPlan {
        canvas: Canvas::new(10, 10).unwrap(),
        frozen: true,
        ops: vec![
            DrawOp::Background {
                paint: Paint::Solid(Rgba8::rgb(0, 0, 0)),
            };
            n
        ],
        stats: DrawStats::default(),
    }
}

#[test]
fn executes_every_op_in_order() {
    let mut rec = Recorder::default();
    let out = execute_plan(&mut rec, &plan(4)).unwrap();
    assert_eq!(out, 4);
    assert_eq!(rec.begun, Some((Canvas::new(10, 10).unwrap(), true)));
}

#[test]
fn stops_at_first_failing_op() {
    let mut rec = Recorder {
        fail_at: Some(2),
        ..Recorder::default()
    };
    let surface: &mut dyn DrawSurface<Output = usize> = &mut rec;
    assert!(execute_plan(surface, &plan(5)).is_err());
    assert_eq!(rec.ops, 2);
}
