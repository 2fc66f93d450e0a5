use crate::foundation::core::{Line, Rgba8};
use crate::foundation::error::{ConstellateError, ConstellateResult};

/// Soft halo stroked underneath the main line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub width: f64,
    pub color: Rgba8,
    /// Multiplier applied on top of the stroke opacity.
    pub strength: f32,
}

/// Resolved stroke parameters for one batch of segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in logical pixels.
    pub width: f64,
    pub color: Rgba8,
    /// Group opacity in `[0, 1]`.
    pub opacity: f32,
    pub glow: Option<Glow>,
}

/// Minimal immediate-mode drawing target used by the reveal engine.
pub trait DrawSurface {
    /// Erase everything drawn since the last clear.
    fn clear(&mut self) -> ConstellateResult<()>;

    /// Stroke a batch of independent segments (logical coordinates) with one style.
    fn stroke_lines(&mut self, lines: &[Line], style: &StrokeStyle) -> ConstellateResult<()>;
}

impl<T: DrawSurface + ?Sized> DrawSurface for &mut T {
    fn clear(&mut self) -> ConstellateResult<()> {
        (**self).clear()
    }

    fn stroke_lines(&mut self, lines: &[Line], style: &StrokeStyle) -> ConstellateResult<()> {
        (**self).stroke_lines(lines, style)
    }
}

/// One recorded `stroke_lines` call.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeBatch {
    pub lines: Vec<Line>,
    pub style: StrokeStyle,
}

/// Surface that records draw calls instead of rasterizing.
///
/// `batches` holds the calls since the last clear; `clears` counts clears.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub(crate) batches: Vec<StrokeBatch>,
    pub(crate) clears: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stroke calls since the last clear.
    pub fn batches(&self) -> &[StrokeBatch] {
        &self.batches
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// Total number of segments since the last clear.
    pub fn line_count(&self) -> usize {
        self.batches.iter().map(|b| b.lines.len()).sum()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) -> ConstellateResult<()> {
        self.batches.clear();
        self.clears += 1;
        Ok(())
    }

    fn stroke_lines(&mut self, lines: &[Line], style: &StrokeStyle) -> ConstellateResult<()> {
        if !(0.0..=1.0).contains(&style.opacity) {
            return Err(ConstellateError::render(format!(
                "stroke opacity {} outside [0, 1]",
                style.opacity
            )));
        }
        self.batches.push(StrokeBatch {
            lines: lines.to_vec(),
            style: *style,
        });
        Ok(())
    }
}
