// The drawing capability the simulator renders through.
//
// The physics step only ever needs these four calls, so tests can swap in a
// recorder and the window can use the software `Painter`.

use crate::types::Rgba;

pub trait Canvas {
    /// Current drawable size in pixels.
    fn size(&self) -> (usize, usize);

    /// Wipe the whole surface back to its background.
    fn clear(&mut self);

    /// Filled disc centred at (x,y).
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);

    /// 1 px line from (x0,y0) to (x1,y1).
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba);
}

#[cfg(test)]
pub mod recording {
    use super::Canvas;
    use crate::types::Rgba;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Op {
        Clear,
        Circle { x: f32, y: f32, radius: f32, color: Rgba },
        Line { from: (f32, f32), to: (f32, f32), color: Rgba },
    }

    /// Canvas that remembers every call instead of drawing.
    pub struct RecordingCanvas {
        pub width: usize,
        pub height: usize,
        pub ops: Vec<Op>,
    }

    impl RecordingCanvas {
        pub fn new(width: usize, height: usize) -> Self {
            Self { width, height, ops: Vec::new() }
        }

        pub fn circles(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Circle { .. })).count()
        }

        pub fn lines(&self) -> Vec<&Op> {
            self.ops.iter().filter(|op| matches!(op, Op::Line { .. })).collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (usize, usize) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
            self.ops.push(Op::Circle { x, y, radius, color });
        }

        fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
            self.ops.push(Op::Line { from: (x0, y0), to: (x1, y1), color });
        }
    }
}
