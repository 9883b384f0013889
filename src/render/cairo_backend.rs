use cairo::{Context, Format, ImageSurface, LineCap};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::PixelRect;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarStackPrimitive, Color, FillPattern, LinePrimitive, RectPrimitive, RenderFrame, Renderer,
    RoundedCorners, TextHAlign, TextPrimitive,
};

const HATCH_SPACING_PX: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub stacks_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            draw_rect(context, rect)?;
            stats.rects_drawn += 1;
        }

        for command in &frame.stacks {
            draw_stack(context, &command.stack, command.clip_bounds)?;
            stats.stacks_drawn += 1;
        }

        for line in &frame.lines {
            draw_line(context, line)?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_rect(context: &Context, rect: &RectPrimitive) -> ChartResult<()> {
    let bounds = rect.bounds;
    if let Some(fill) = rect.fill {
        context.rectangle(bounds.left, bounds.top, bounds.width, bounds.height);
        apply_color(context, fill);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        if rect.pattern == FillPattern::ForwardHatch {
            draw_forward_hatch(context, bounds, fill)?;
        }
    }

    if let Some(stroke) = rect.stroke {
        if rect.stroke_width_px > 0.0 {
            context.rectangle(bounds.left, bounds.top, bounds.width, bounds.height);
            apply_color(context, stroke);
            context.set_line_width(rect.stroke_width_px);
            context.set_dash(rect.dash_pattern.as_deref().unwrap_or(&[]), 0.0);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle", err))?;
            context.set_dash(&[], 0.0);
        }
    }
    Ok(())
}

fn draw_forward_hatch(context: &Context, bounds: PixelRect, fill: Color) -> ChartResult<()> {
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.rectangle(bounds.left, bounds.top, bounds.width, bounds.height);
    context.clip();
    apply_color(
        context,
        Color::rgba(1.0 - fill.red, 1.0 - fill.green, 1.0 - fill.blue, fill.alpha),
    );
    context.set_line_width(1.0);
    let mut offset = -bounds.height;
    while offset < bounds.width {
        context.move_to(bounds.left + offset, bounds.bottom());
        context.line_to(bounds.left + offset + bounds.height, bounds.top);
        offset += HATCH_SPACING_PX;
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke hatch pattern", err))?;
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn draw_stack(
    context: &Context,
    stack: &BarStackPrimitive,
    clip_bounds: Option<PixelRect>,
) -> ChartResult<()> {
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;

    if let Some(clip) = clip_bounds {
        context.rectangle(clip.left, clip.top, clip.width, clip.height);
        context.clip();
    }
    if stack.radius_px > 0.0 && stack.rounded_corners.any() {
        append_rounded_rect_path(
            context,
            stack.full_stack_rect,
            stack.radius_px,
            stack.rounded_corners,
        );
        context.clip();
    }

    for segment in &stack.segments {
        draw_rect(context, segment)?;
    }

    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn draw_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    let Some((first, rest)) = line.points.split_first() else {
        return Ok(());
    };
    apply_color(context, line.stroke);
    context.set_line_width(line.stroke_width_px);
    context.set_line_cap(if line.round_end_caps {
        LineCap::Round
    } else {
        LineCap::Butt
    });
    context.set_dash(line.dash_pattern.as_deref().unwrap_or(&[]), 0.0);
    context.move_to(first.x, first.y);
    for point in rest {
        context.line_to(point.x, point.y);
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))?;
    context.set_dash(&[], 0.0);
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    apply_color(context, text.color);
    context.translate(text.x, text.y);
    context.rotate(text.rotation_radians);
    context.move_to(dx, 0.0);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rounded_rect_path(
    context: &Context,
    rect: PixelRect,
    radius_px: f64,
    corners: RoundedCorners,
) {
    let radius = radius_px.min(rect.width * 0.5).min(rect.height * 0.5);
    let left = rect.left;
    let top = rect.top;
    let right = rect.right();
    let bottom = rect.bottom();
    let corner = |flag: bool| if flag { radius } else { 0.0 };

    context.new_sub_path();
    let r = corner(corners.top_right);
    context.arc(right - r, top + r, r, -FRAC_PI_2, 0.0);
    let r = corner(corners.bottom_right);
    context.arc(right - r, bottom - r, r, 0.0, FRAC_PI_2);
    let r = corner(corners.bottom_left);
    context.arc(left + r, bottom - r, r, FRAC_PI_2, PI);
    let r = corner(corners.top_left);
    context.arc(left + r, top + r, r, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
