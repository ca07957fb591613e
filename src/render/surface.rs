use crate::{
    foundation::{core::Canvas, error::FlourishResult},
    render::plan::{DrawOp, DrawPlan},
};

/// Sink for draw ops. One `begin`, any number of `draw`, one `finish` per frame.
pub trait DrawSurface {
    type Output;

    fn begin(&mut self, canvas: Canvas, frozen: bool) -> FlourishResult<()>;

    fn draw(&mut self, op: &DrawOp) -> FlourishResult<()>;

    fn finish(&mut self) -> FlourishResult<Self::Output>;
}

pub fn execute_plan<S: DrawSurface + ?Sized>(
    surface: &mut S,
    plan: &DrawPlan,
) -> FlourishResult<S::Output> {
    surface.begin(plan.canvas, plan.frozen)?;
    for op in &plan.ops {
        surface.draw(op)?;
    }
    surface.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
