use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::font::FontFace;
use crate::render::surface::{FrameRGBA, Surface, TextMeasure};

#[derive(Clone, Copy, Debug)]
struct DrawState {
    transform: Affine,
    alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Parley shaping bound to one registered face.
struct TextShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl TextShaper {
    fn new(face: &FontFace) -> KinetypeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.data.to_vec()), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                KinetypeError::font(format!("no font families registered from '{}'", face.family))
            })?;

        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| KinetypeError::font("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.data.to_vec()),
            face.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        })
    }

    fn layout(&mut self, text: &str, size_px: f32) -> KinetypeResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(KinetypeError::validation(
                "font size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// CPU rasterizing surface backed by `vello_cpu`.
///
/// Text needs a [`FontFace`]; without one, drawing or measuring non-empty text fails with
/// [`KinetypeError::Font`] while shapes still render.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    state: DrawState,
    stack: Vec<DrawState>,
    text: Option<TextShaper>,
}

impl CpuSurface {
    /// Create a `width x height` surface. Both sides must be in `1..=65535`.
    pub fn new(width: u32, height: u32, font: Option<&FontFace>) -> KinetypeResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| KinetypeError::render("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| KinetypeError::render("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(KinetypeError::render("surface dimensions must be non-zero"));
        }

        let text = font.map(TextShaper::new).transpose()?;

        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            state: DrawState::default(),
            stack: Vec::new(),
            text,
        })
    }

    /// Whether a font face is loaded.
    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    fn paint(&self, color: Rgba8) -> vello_cpu::peniko::Color {
        let c = color.with_opacity(self.state.alpha);
        vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }

    fn prepare(&mut self, color: Rgba8) {
        let paint = self.paint(color);
        self.ctx.set_transform(affine_to_cpu(self.state.transform));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
    }

    fn draw_text(
        &mut self,
        text: &str,
        center: Point,
        font_size_px: f32,
        color: Rgba8,
        stroke_width: Option<f64>,
    ) -> KinetypeResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.prepare(color);
        if let Some(w) = stroke_width {
            self.ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(w).with_join(vello_cpu::kurbo::Join::Round),
            );
        }

        let shaper = self.text.as_mut().ok_or_else(no_font)?;
        let layout = shaper.layout(text, font_size_px)?;
        let Some(first) = layout.lines().next() else {
            return Ok(());
        };
        let m = first.metrics();
        let x0 = center.x as f32 - layout.width() / 2.0;
        let y0 = center.y as f32 - (m.baseline - (m.ascent - m.descent) / 2.0);

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: x0 + g.x,
                    y: y0 + g.y,
                });
                let builder = self
                    .ctx
                    .glyph_run(&shaper.font)
                    .font_size(run.run().font_size());
                if stroke_width.is_some() {
                    builder.stroke_glyphs(glyphs);
                } else {
                    builder.fill_glyphs(glyphs);
                }
            }
        }
        Ok(())
    }
}

fn no_font() -> KinetypeError {
    KinetypeError::font("text drawing requires a font face; none was loaded")
}

impl TextMeasure for CpuSurface {
    fn measure_text(&mut self, text: &str, font_size_px: f32) -> KinetypeResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let shaper = self.text.as_mut().ok_or_else(no_font)?;
        Ok(shaper.layout(text, font_size_px)?.width())
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn clear(&mut self) {
        self.ctx.reset();
        self.state = DrawState::default();
        self.stack.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
    }

    fn concat_transform(&mut self, affine: Affine) {
        self.state.transform *= affine;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.prepare(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.prepare(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64) {
        self.prepare(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_text(
        &mut self,
        text: &str,
        center: Point,
        font_size_px: f32,
        color: Rgba8,
    ) -> KinetypeResult<()> {
        self.draw_text(text, center, font_size_px, color, None)
    }

    fn stroke_text(
        &mut self,
        text: &str,
        center: Point,
        font_size_px: f32,
        color: Rgba8,
        width: f64,
    ) -> KinetypeResult<()> {
        self.draw_text(text, center, font_size_px, color, Some(width))
    }

    fn read_pixels(&mut self) -> KinetypeResult<FrameRGBA> {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        })
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
