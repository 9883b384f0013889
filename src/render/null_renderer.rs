use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer that records what a frame would have drawn.
///
/// Frames are validated first, so invalid bar geometry fails here just as it
/// would in a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_rect_count: usize,
    pub last_stack_count: usize,
    pub last_segment_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_rect_count = frame.rects.len();
        self.last_stack_count = frame.stacks.len();
        self.last_segment_count = frame.segment_count();
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
