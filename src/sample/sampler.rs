use rand::Rng;

use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::sample::graph::{Edge, GraphOpts, build_proximity_edges, shuffle_points};
use crate::sample::layout::{LayoutOpts, PhraseLayout, layout_phrase};
use crate::text::GlyphSource;

/// All sampler tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplerOpts {
    /// Scan stride in pixels; one candidate point per `step x step` cell.
    pub step: u32,
    /// Pixels with alpha strictly above this become points.
    pub alpha_threshold: u8,
    pub layout: LayoutOpts,
    pub graph: GraphOpts,
}

impl Default for SamplerOpts {
    fn default() -> Self {
        Self {
            step: 2,
            alpha_threshold: 128,
            layout: LayoutOpts::default(),
            graph: GraphOpts::default(),
        }
    }
}

impl SamplerOpts {
    pub fn validate(&self) -> ConstellateResult<()> {
        if self.step == 0 {
            return Err(ConstellateError::validation("sampler.step must be > 0"));
        }
        self.layout.validate()?;
        self.graph.validate()
    }
}

/// One glyph's point cloud and its proximity edges.
///
/// `points` is stored in reveal order; `edges` index into it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphGraph {
    pub ch: char,
    pub cell: Rect,
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
}

impl GlyphGraph {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sampled phrase: one [`GlyphGraph`] per non-whitespace character, in reading order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhraseGraph {
    pub text: String,
    pub canvas: Canvas,
    pub font_size: f64,
    pub line_height: f64,
    pub glyphs: Vec<GlyphGraph>,
}

impl PhraseGraph {
    pub fn empty(text: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            text: text.into(),
            canvas,
            font_size: 0.0,
            line_height: 0.0,
            glyphs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn point_count(&self) -> usize {
        self.glyphs.iter().map(|g| g.points.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.glyphs.iter().map(|g| g.edges.len()).sum()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConstellateResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConstellateError::serde(e.to_string()))
    }
}

/// Sample `text` into per-glyph point graphs.
///
/// Layout is deterministic for a given text, canvas and font; only the point order (and hence
/// the edge set) depends on `rng`.
#[tracing::instrument(skip(glyphs, opts, rng), fields(chars = text.chars().count()))]
pub fn sample_phrase<G, R>(
    text: &str,
    canvas: Canvas,
    glyphs: &mut G,
    opts: &SamplerOpts,
    rng: &mut R,
) -> ConstellateResult<PhraseGraph>
where
    G: GlyphSource + ?Sized,
    R: Rng + ?Sized,
{
    opts.validate()?;
    let layout = layout_phrase(text, canvas, glyphs, &opts.layout)?;
    let PhraseLayout {
        font_size,
        line_height,
        slots,
    } = layout;

    let mut out = Vec::with_capacity(slots.len());
    for slot in slots {
        let cell = slot.cell;
        // Buffer covers the cell; every sample is strictly inside `cell`.
        let w = cell.width().max(0.0).ceil() as u32;
        let h = cell.height().max(0.0).ceil() as u32;

        let mut points = if w == 0 || h == 0 || font_size <= 0.0 {
            Vec::new()
        } else {
            glyphs.rasterize(slot.ch, font_size, w, h)?.sample_points(
                opts.step,
                opts.alpha_threshold,
                Point::new(cell.x0, cell.y0),
            )
        };

        shuffle_points(&mut points, rng);
        let edges = build_proximity_edges(&points, &opts.graph);
        tracing::trace!(
            ch = %slot.ch,
            points = points.len(),
            edges = edges.len(),
            "glyph sampled"
        );
        out.push(GlyphGraph {
            ch: slot.ch,
            cell,
            points,
            edges,
        });
    }

    let phrase = PhraseGraph {
        text: text.to_owned(),
        canvas,
        font_size,
        line_height,
        glyphs: out,
    };
    tracing::debug!(
        glyphs = phrase.len(),
        points = phrase.point_count(),
        edges = phrase.edge_count(),
        font_size,
        "phrase sampled"
    );
    Ok(phrase)
}

/// Stateful sampler bundling a glyph source with its options.
pub struct Sampler<G> {
    glyphs: G,
    opts: SamplerOpts,
}

impl<G: GlyphSource> Sampler<G> {
    pub fn new(glyphs: G, opts: SamplerOpts) -> Self {
        Self { glyphs, opts }
    }

    pub fn opts(&self) -> &SamplerOpts {
        &self.opts
    }

    /// Sample with the thread-local RNG; repeated calls may produce different point orders.
    pub fn sample(&mut self, text: &str, canvas: Canvas) -> ConstellateResult<PhraseGraph> {
        self.sample_with_rng(text, canvas, &mut rand::rng())
    }

    pub fn sample_with_rng<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        canvas: Canvas,
        rng: &mut R,
    ) -> ConstellateResult<PhraseGraph> {
        sample_phrase(text, canvas, &mut self.glyphs, &self.opts, rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/sampler.rs"]
mod tests;
