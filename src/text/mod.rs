//! Text measurement and glyph rasterization.
//!
//! The sampler only needs two capabilities from a font: measuring the advance width of a string,
//! and filling a single glyph into an alpha buffer. Both are expressed through [`GlyphSource`].

pub(crate) mod block;
pub(crate) mod mask;
pub(crate) mod parley_font;

use crate::foundation::error::ConstellateResult;
use crate::text::mask::AlphaMask;

/// Font capabilities required by the sampler.
///
/// Implementations must be deterministic for a given input: measuring or rasterizing the same
/// text at the same size must always produce the same result.
pub trait GlyphSource {
    /// Advance width of `text` laid out on a single line at `size_px`.
    fn measure(&mut self, text: &str, size_px: f64) -> ConstellateResult<f64>;

    /// Rasterize `ch` alone into a `width x height` alpha buffer.
    ///
    /// The glyph is centered horizontally in the buffer and its em box is centered vertically
    /// (a "middle" baseline). Anything falling outside the buffer is clipped.
    fn rasterize(
        &mut self,
        ch: char,
        size_px: f64,
        width: u32,
        height: u32,
    ) -> ConstellateResult<AlphaMask>;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &mut T {
    fn measure(&mut self, text: &str, size_px: f64) -> ConstellateResult<f64> {
        (**self).measure(text, size_px)
    }

    fn rasterize(
        &mut self,
        ch: char,
        size_px: f64,
        width: u32,
        height: u32,
    ) -> ConstellateResult<AlphaMask> {
        (**self).rasterize(ch, size_px, width, height)
    }
}

impl<T: GlyphSource + ?Sized> GlyphSource for Box<T> {
    fn measure(&mut self, text: &str, size_px: f64) -> ConstellateResult<f64> {
        (**self).measure(text, size_px)
    }

    fn rasterize(
        &mut self,
        ch: char,
        size_px: f64,
        width: u32,
        height: u32,
    ) -> ConstellateResult<AlphaMask> {
        (**self).rasterize(ch, size_px, width, height)
    }
}
