use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::KinetypeResult;
use crate::render::surface::{FrameRGBA, MonospaceMeasure, Surface, TextMeasure};

/// One drawing primitive captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Rectangle fill.
    FillRect {
        /// Rectangle in user space.
        rect: Rect,
        /// Paint color.
        color: Rgba8,
    },
    /// Path fill.
    FillPath {
        /// Path in user space.
        path: BezPath,
        /// Paint color.
        color: Rgba8,
    },
    /// Path stroke.
    StrokePath {
        /// Path in user space.
        path: BezPath,
        /// Paint color.
        color: Rgba8,
        /// Line width.
        width: f64,
    },
    /// Text fill.
    FillText {
        /// Text run.
        text: String,
        /// Center point in user space.
        center: Point,
        /// Font size.
        font_size_px: f32,
        /// Paint color.
        color: Rgba8,
    },
    /// Text outline stroke.
    StrokeText {
        /// Text run.
        text: String,
        /// Center point in user space.
        center: Point,
        /// Font size.
        font_size_px: f32,
        /// Paint color.
        color: Rgba8,
        /// Line width.
        width: f64,
    },
}

/// A drawing primitive together with the state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    /// The primitive.
    pub op: DrawOp,
    /// Transform in effect.
    pub transform: Affine,
    /// Global alpha in effect.
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct State {
    transform: Affine,
    alpha: f32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Display-list surface for tests and debugging.
///
/// Records every primitive instead of rasterizing. Text is measured with [`MonospaceMeasure`]
/// and pixel readback yields a frame filled with [`RecordingSurface::readback_fill`].
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: State,
    stack: Vec<State>,
    calls: Vec<DrawCall>,
    rounded_rect: bool,
    measure: MonospaceMeasure,
    /// Color of every pixel returned by `read_pixels`.
    pub readback_fill: Rgba8,
}

impl RecordingSurface {
    /// Create a recording surface of `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: State::default(),
            stack: Vec::new(),
            calls: Vec::new(),
            rounded_rect: true,
            measure: MonospaceMeasure::default(),
            readback_fill: Rgba8::TRANSPARENT,
        }
    }

    /// Toggle the rounded-rectangle capability.
    pub fn with_rounded_rect(mut self, supported: bool) -> Self {
        self.rounded_rect = supported;
        self
    }

    /// Calls recorded since the last `clear`.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Current depth of the save stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Current transform.
    pub fn current_transform(&self) -> Affine {
        self.state.transform
    }

    fn record(&mut self, op: DrawOp) {
        self.calls.push(DrawCall {
            op,
            transform: self.state.transform,
            alpha: self.state.alpha,
        });
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&mut self, text: &str, font_size_px: f32) -> KinetypeResult<f32> {
        self.measure.measure_text(text, font_size_px)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.clear();
        self.stack.clear();
        self.state = State::default();
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
        self.state.alpha = alpha;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.record(DrawOp::FillRect { rect, color });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.record(DrawOp::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64) {
        self.record(DrawOp::StrokePath {
            path: path.clone(),
            color,
            width,
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        center: Point,
        font_size_px: f32,
        color: Rgba8,
    ) -> KinetypeResult<()> {
        self.record(DrawOp::FillText {
            text: text.to_owned(),
            center,
            font_size_px,
            color,
        });
        Ok(())
    }

    fn stroke_text(
        &mut self,
        text: &str,
        center: Point,
        font_size_px: f32,
        color: Rgba8,
        width: f64,
    ) -> KinetypeResult<()> {
        self.record(DrawOp::StrokeText {
            text: text.to_owned(),
            center,
            font_size_px,
            color,
            width,
        });
        Ok(())
    }

    fn supports_rounded_rect(&self) -> bool {
        self.rounded_rect
    }

    fn read_pixels(&mut self) -> KinetypeResult<FrameRGBA> {
        let c = self.readback_fill;
        let mut frame = FrameRGBA::transparent(self.width, self.height);
        for px in frame.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        Ok(frame)
    }
}
