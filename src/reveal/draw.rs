use crate::foundation::core::{Line, Rgba8};
use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::foundation::math::lerp;
use crate::render::surface::{DrawSurface, Glow, StrokeStyle};
use crate::sample::graph::Edge;
use crate::sample::sampler::GlyphGraph;

/// Stroke look of the constellation lines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealStyle {
    pub line_width: f64,
    pub color: Rgba8,
    pub glow_color: Rgba8,
    /// Extra width of the glow underlay; `0` disables it.
    pub glow_width: f64,
    pub glow_strength: f32,
    /// Opacity at progress 0.
    pub base_opacity: f32,
    /// Opacity added at progress 1.
    pub opacity_gain: f32,
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self {
            line_width: 0.3,
            color: Rgba8::rgb(0xFF, 0x99, 0xAA),
            glow_color: Rgba8::rgb(0xFF, 0x33, 0x66),
            glow_width: 4.0,
            glow_strength: 0.35,
            base_opacity: 0.1,
            opacity_gain: 0.3,
        }
    }
}

impl RevealStyle {
    pub fn validate(&self) -> ConstellateResult<()> {
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ConstellateError::validation("style.line_width must be > 0"));
        }
        if !self.glow_width.is_finite() || self.glow_width < 0.0 {
            return Err(ConstellateError::validation("style.glow_width must be >= 0"));
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.glow_strength) {
            return Err(ConstellateError::validation(
                "style.glow_strength must be in [0, 1]",
            ));
        }
        if !unit.contains(&self.base_opacity) || self.opacity_gain < 0.0 {
            return Err(ConstellateError::validation(
                "style.base_opacity must be in [0, 1] and style.opacity_gain >= 0",
            ));
        }
        Ok(())
    }

    /// Stroke opacity at `progress`; non-decreasing in `progress`, capped at 1.
    pub fn opacity(&self, progress: f64) -> f32 {
        let base = f64::from(self.base_opacity);
        let peak = base + f64::from(self.opacity_gain);
        lerp(base, peak, sanitize_progress(progress)).clamp(0.0, 1.0) as f32
    }

    pub fn stroke_at(&self, progress: f64) -> StrokeStyle {
        let glow = (self.glow_width > 0.0 && self.glow_strength > 0.0).then_some(Glow {
            width: self.glow_width,
            color: self.glow_color,
            strength: self.glow_strength,
        });
        StrokeStyle {
            width: self.line_width,
            color: self.color,
            opacity: self.opacity(progress),
            glow,
        }
    }
}

/// What one `draw_glyph` call put on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphDrawStats {
    pub visible_points: usize,
    pub edges_drawn: usize,
}

fn sanitize_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// `floor(progress * count)` with `progress` clamped to `[0, 1]`.
pub fn visible_count(count: usize, progress: f64) -> usize {
    let v = (sanitize_progress(progress) * count as f64).floor() as usize;
    v.min(count)
}

/// Edges whose endpoints have both arrived.
pub fn visible_edges(edges: &[Edge], visible: usize) -> impl Iterator<Item = Edge> + '_ {
    edges.iter().copied().filter(move |e| e.is_within(visible))
}

/// Segments of `glyph` visible at `progress`.
pub fn glyph_lines(glyph: &GlyphGraph, progress: f64) -> Vec<Line> {
    let visible = visible_count(glyph.points.len(), progress);
    visible_edges(&glyph.edges, visible)
        .map(|e| Line::new(glyph.points[e.a], glyph.points[e.b]))
        .collect()
}

/// Draw one glyph at `progress`. Nothing is stroked when no edge is visible.
pub fn draw_glyph<S>(
    surface: &mut S,
    glyph: &GlyphGraph,
    progress: f64,
    style: &RevealStyle,
) -> ConstellateResult<GlyphDrawStats>
where
    S: DrawSurface + ?Sized,
{
    let visible_points = visible_count(glyph.points.len(), progress);
    let lines = glyph_lines(glyph, progress);
    if !lines.is_empty() {
        surface.stroke_lines(&lines, &style.stroke_at(progress))?;
    }
    Ok(GlyphDrawStats {
        visible_points,
        edges_drawn: lines.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/draw.rs"]
mod tests;
