use crate::core::{PixelRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarStackPrimitive, ChartCanvas, LinePrimitive, RectPrimitive, TextPrimitive,
};

/// One recorded `draw_rect_stack` call.
#[derive(Debug, Clone, PartialEq)]
pub struct StackDrawCommand {
    pub stack: BarStackPrimitive,
    pub clip_bounds: Option<PixelRect>,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Implements [`ChartCanvas`] by recording every call, so a paint pass can be
/// replayed by any [`crate::render::Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub stacks: Vec<StackDrawCommand>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            stacks: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for command in &self.stacks {
            command.stack.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    /// Number of bar segments across every recorded stack.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.stacks
            .iter()
            .map(|command| command.stack.segments.len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.stacks.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.stacks.clear();
        self.lines.clear();
        self.texts.clear();
    }
}

impl ChartCanvas for RenderFrame {
    fn draw_rect(&mut self, rect: &RectPrimitive) {
        self.rects.push(rect.clone());
    }

    fn draw_rect_stack(&mut self, stack: &BarStackPrimitive, clip_bounds: Option<PixelRect>) {
        self.stacks.push(StackDrawCommand {
            stack: stack.clone(),
            clip_bounds,
        });
    }

    fn draw_line(&mut self, line: &LinePrimitive) {
        self.lines.push(line.clone());
    }

    fn draw_text(&mut self, text: &TextPrimitive) {
        self.texts.push(text.clone());
    }
}
