use std::borrow::Cow;
use std::path::Path;

use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::text::GlyphSource;
use crate::text::mask::AlphaMask;

/// Brush type used for Parley layouts; glyphs are always filled opaque white into masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MaskBrush;

/// Heaviest standard weight; phrases render in black weight.
pub const DEFAULT_FONT_WEIGHT: f32 = 900.0;

/// [`GlyphSource`] backed by a primary font file plus optional fallback fonts.
///
/// Shaping and measurement go through Parley with a font stack of every registered family, in
/// registration order, so characters the primary font lacks are taken from the first fallback
/// that covers them. Rasterization fills each glyph run with the face Parley chose for it via
/// `vello_cpu` and reads back the alpha channel.
pub struct ParleyFont {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MaskBrush>,
    families: Vec<String>,
    weight: f32,
    ctx: Option<vello_cpu::RenderContext>,
}

impl ParleyFont {
    /// Load a TTF/OTF font from disk.
    pub fn from_path(path: impl AsRef<Path>) -> ConstellateResult<Self> {
        Self::from_bytes(read_font(path.as_ref())?)
    }

    /// Load a primary font and a list of fallback fonts, in priority order.
    pub fn from_paths<P: AsRef<Path>>(
        primary: impl AsRef<Path>,
        fallbacks: impl IntoIterator<Item = P>,
    ) -> ConstellateResult<Self> {
        let mut font = Self::from_path(primary)?;
        for path in fallbacks {
            font.add_fallback_path(path)?;
        }
        Ok(font)
    }

    /// Register raw font bytes as the primary font.
    pub fn from_bytes(font_bytes: Vec<u8>) -> ConstellateResult<Self> {
        let mut font = Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
            weight: DEFAULT_FONT_WEIGHT,
            ctx: None,
        };
        font.register(font_bytes)?;
        Ok(font)
    }

    /// Append a fallback font read from disk.
    pub fn with_fallback_path(mut self, path: impl AsRef<Path>) -> ConstellateResult<Self> {
        self.add_fallback_path(path)?;
        Ok(self)
    }

    /// Append a fallback font from raw bytes.
    pub fn with_fallback_bytes(mut self, font_bytes: Vec<u8>) -> ConstellateResult<Self> {
        self.register(font_bytes)?;
        Ok(self)
    }

    /// Override the requested weight (default [`DEFAULT_FONT_WEIGHT`]).
    pub fn with_weight(mut self, weight: f32) -> ConstellateResult<Self> {
        if !weight.is_finite() || !(1.0..=1000.0).contains(&weight) {
            return Err(ConstellateError::validation(
                "font weight must be within 1..=1000",
            ));
        }
        self.weight = weight;
        Ok(self)
    }

    /// Primary family name.
    pub fn family_name(&self) -> &str {
        self.families.first().map(String::as_str).unwrap_or_default()
    }

    /// Every registered family, primary first.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    fn add_fallback_path(&mut self, path: impl AsRef<Path>) -> ConstellateResult<()> {
        let path = path.as_ref();
        self.register(read_font(path)?).map_err(|e| {
            ConstellateError::font(format!("fallback font '{}': {e}", path.display()))
        })
    }

    fn register(&mut self, font_bytes: Vec<u8>) -> ConstellateResult<()> {
        let registered = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        if registered.is_empty() {
            return Err(ConstellateError::font(
                "no font families registered from font bytes",
            ));
        }
        for (family_id, _) in registered {
            let name = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| ConstellateError::font("registered font family has no name"))?
                .to_string();
            if !self.families.contains(&name) {
                tracing::debug!(family = %name, index = self.families.len(), "font registered");
                self.families.push(name);
            }
        }
        Ok(())
    }

    fn layout(&mut self, text: &str, size_px: f64) -> ConstellateResult<parley::Layout<MaskBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ConstellateError::validation(
                "font size must be finite and > 0",
            ));
        }

        let stack: Vec<parley::style::FontFamily<'static>> = self
            .families
            .iter()
            .map(|name| parley::style::FontFamily::Named(Cow::Owned(name.clone())))
            .collect();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::List(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(self.weight),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));

        let mut layout: parley::Layout<MaskBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> R,
    ) -> R {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }
}

fn read_font(path: &Path) -> ConstellateResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        ConstellateError::font(format!("failed to read font '{}': {e}", path.display()))
    })
}

struct FaceRun {
    font: vello_cpu::peniko::FontData,
    font_size: f32,
    glyphs: Vec<vello_cpu::Glyph>,
}

impl GlyphSource for ParleyFont {
    fn measure(&mut self, text: &str, size_px: f64) -> ConstellateResult<f64> {
        if text.is_empty() || size_px <= 0.0 {
            return Ok(0.0);
        }
        let layout = self.layout(text, size_px)?;
        Ok(f64::from(layout.width()))
    }

    fn rasterize(
        &mut self,
        ch: char,
        size_px: f64,
        width: u32,
        height: u32,
    ) -> ConstellateResult<AlphaMask> {
        if width == 0 || height == 0 || ch.is_whitespace() || size_px <= 0.0 {
            return Ok(AlphaMask::new(width, height));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| ConstellateError::render("glyph buffer width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| ConstellateError::render("glyph buffer height exceeds u16"))?;

        let mut buf = [0u8; 4];
        let layout = self.layout(ch.encode_utf8(&mut buf), size_px)?;

        let dx = (f64::from(width) - f64::from(layout.width())) / 2.0;
        let mut runs = Vec::new();
        for line in layout.lines() {
            let m = line.metrics();
            // Middle baseline: center the em box (ascent + descent) on the buffer's midline.
            let baseline = f64::from(height) / 2.0 + f64::from(m.ascent - m.descent) / 2.0;
            let dy = baseline - f64::from(m.baseline);
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: (f64::from(g.x) + dx) as f32,
                        y: (f64::from(g.y) + dy) as f32,
                    })
                    .collect();
                runs.push(FaceRun {
                    font: run.run().font().clone(),
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.with_ctx_mut(w, h, |ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            for run in runs {
                ctx.glyph_run(&run.font)
                    .font_size(run.font_size)
                    .fill_glyphs(run.glyphs.into_iter());
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
        });

        AlphaMask::from_rgba8_alpha(width, height, pixmap.data_as_u8_slice())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_font.rs"]
mod tests;
