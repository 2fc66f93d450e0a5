use crate::foundation::error::ConstellateResult;
use crate::text::GlyphSource;
use crate::text::mask::AlphaMask;

/// Font-free [`GlyphSource`] that draws every visible glyph as a solid block.
///
/// Every character advances by `advance_em * size`; the block covers `block_w_em x block_h_em`
/// of the em square, centered the same way a real glyph would be. Whitespace is measured but
/// never filled. Useful for previews without a font file and for deterministic tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockGlyphs {
    pub advance_em: f64,
    pub block_w_em: f64,
    pub block_h_em: f64,
}

impl Default for BlockGlyphs {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            block_w_em: 0.5,
            block_h_em: 0.7,
        }
    }
}

impl GlyphSource for BlockGlyphs {
    fn measure(&mut self, text: &str, size_px: f64) -> ConstellateResult<f64> {
        Ok(text.chars().count() as f64 * self.advance_em * size_px.max(0.0))
    }

    fn rasterize(
        &mut self,
        ch: char,
        size_px: f64,
        width: u32,
        height: u32,
    ) -> ConstellateResult<AlphaMask> {
        let mut mask = AlphaMask::new(width, height);
        if ch.is_whitespace() || !(size_px.is_finite() && size_px > 0.0) {
            return Ok(mask);
        }

        let bw = self.block_w_em * size_px;
        let bh = self.block_h_em * size_px;
        let x0 = (f64::from(width) - bw) / 2.0;
        let y0 = (f64::from(height) - bh) / 2.0;
        for y in 0..height {
            let cy = f64::from(y) + 0.5;
            if cy < y0 || cy > y0 + bh {
                continue;
            }
            for x in 0..width {
                let cx = f64::from(x) + 0.5;
                if cx >= x0 && cx <= x0 + bw {
                    mask.set_alpha(x, y, 255);
                }
            }
        }
        Ok(mask)
    }
}
