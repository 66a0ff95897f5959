//! The narrow painting interface a cell needs from the rendering backend.
//!
//! The cell core decides *what* to draw and *when* a cached rendering is
//! stale; rasterization lives behind [`CellPainter`]. Backends additionally
//! support offscreen capture, which the cell uses to snapshot its un-hovered
//! appearance once and composite the hover fade cheaply on every tick.

use std::any::Any;

use crate::geometry::{Point, Rect, Size};
use crate::style::Color;

/// An opaque backend handle to a cached offscreen rendering.
///
/// Produced by [`CellPainter::capture_end`] and consumed by
/// [`CellPainter::draw_cached`]. The cell owns it exclusively and frees it
/// (drops it) whenever a visually-relevant property changes.
pub struct CachedRender(Box<dyn Any>);

impl CachedRender {
    /// Wrap a backend-specific payload.
    pub fn new<T: Any>(payload: T) -> Self {
        Self(Box::new(payload))
    }

    /// Borrow the backend payload.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for CachedRender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CachedRender(..)")
    }
}

/// Rasterization operations the cell core is allowed to request.
///
/// Coordinates are in cell-local logical pixels. `capture_begin` /
/// `capture_end` bracket an offscreen recording: draw calls issued in
/// between land in the capture instead of the output surface. Captures do
/// not nest.
pub trait CellPainter {
    /// Fill a rectangle with a premultiplied color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline (used for focus indication).
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);

    /// Begin recording draw calls into an offscreen surface of `size`.
    fn capture_begin(&mut self, size: Size);

    /// Finish recording and hand the result to the caller.
    fn capture_end(&mut self) -> CachedRender;

    /// Draw a previously captured rendering at `origin`, modulated by
    /// `opacity` in [0, 1].
    fn draw_cached(&mut self, cached: &CachedRender, origin: Point, opacity: f32);
}
