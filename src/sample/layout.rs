use crate::foundation::core::{Canvas, Rect};
use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::text::GlyphSource;

/// Tuning knobs for choosing the phrase font size and line spacing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    /// Assumed advance of an average glyph in em; the longest word must fit
    /// `chars * width_ratio * size <= canvas width`.
    pub width_ratio: f64,
    /// Fraction of the canvas height available to the stack of lines.
    pub height_fill: f64,
    /// Extra shrink applied to the height-derived size.
    pub vertical_shrink: f64,
    /// Line height as a multiple of the font size.
    pub line_height_em: f64,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            width_ratio: 0.85,
            height_fill: 0.85,
            vertical_shrink: 0.85,
            line_height_em: 1.1,
        }
    }
}

impl LayoutOpts {
    pub fn validate(&self) -> ConstellateResult<()> {
        for (name, v) in [
            ("width_ratio", self.width_ratio),
            ("height_fill", self.height_fill),
            ("vertical_shrink", self.vertical_shrink),
            ("line_height_em", self.line_height_em),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConstellateError::validation(format!(
                    "layout.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// One glyph's allotted cell in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphSlot {
    pub ch: char,
    /// Zero-based line (word) index.
    pub line: usize,
    /// `advance x line_height` rectangle; top-left is the pen position for this glyph.
    pub cell: Rect,
}

/// Deterministic placement of every glyph of a phrase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhraseLayout {
    pub font_size: f64,
    pub line_height: f64,
    pub slots: Vec<GlyphSlot>,
}

impl PhraseLayout {
    pub fn empty() -> Self {
        Self {
            font_size: 0.0,
            line_height: 0.0,
            slots: Vec::new(),
        }
    }
}

/// Split on whitespace runs, one word per line.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Single font size for the whole phrase: the smaller of the width-bound size of the longest word
/// and the height-bound size of the line stack. Degenerate inputs yield `0.0`.
pub fn font_size_for(words: &[&str], canvas: Canvas, opts: &LayoutOpts) -> f64 {
    let longest = words
        .iter()
        .map(|w| w.chars().count())
        .max()
        .unwrap_or(0);
    if longest == 0 {
        return 0.0;
    }
    let horizontal = canvas.width_f64() / (longest as f64 * opts.width_ratio);
    let vertical = canvas.height_f64() * opts.height_fill / words.len() as f64;
    let size = horizontal.min(vertical * opts.vertical_shrink);
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

/// Lay out `text` on `canvas`: one word per line, the block of lines centered vertically, each
/// word centered horizontally, glyphs advancing left to right by their own measured widths.
pub fn layout_phrase<G: GlyphSource + ?Sized>(
    text: &str,
    canvas: Canvas,
    glyphs: &mut G,
    opts: &LayoutOpts,
) -> ConstellateResult<PhraseLayout> {
    let words = split_words(text);
    if words.is_empty() {
        return Ok(PhraseLayout::empty());
    }

    let font_size = font_size_for(&words, canvas, opts);
    let line_height = font_size * opts.line_height_em;
    let total_height = words.len() as f64 * line_height;
    let mut line_center = (canvas.height_f64() - total_height) / 2.0 + line_height / 2.0;

    let mut slots = Vec::with_capacity(words.iter().map(|w| w.chars().count()).sum());
    for (line, word) in words.iter().enumerate() {
        let word_width = glyphs.measure(word, font_size)?;
        let mut pen_x = (canvas.width_f64() - word_width) / 2.0;
        let top = line_center - line_height / 2.0;

        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let advance = glyphs.measure(ch.encode_utf8(&mut buf), font_size)?.max(0.0);
            slots.push(GlyphSlot {
                ch,
                line,
                cell: Rect::new(pen_x, top, pen_x + advance, top + line_height),
            });
            pen_x += advance;
        }
        line_center += line_height;
    }

    Ok(PhraseLayout {
        font_size,
        line_height,
        slots,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/sample/layout.rs"]
mod tests;
