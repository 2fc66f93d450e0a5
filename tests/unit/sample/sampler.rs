use super::*;
use crate::text::block::BlockGlyphs;
use crate::text::mask::AlphaMask;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sample_blocks(text: &str, canvas: Canvas, seed: u64) -> PhraseGraph {
    let mut glyphs = BlockGlyphs::default();
    sample_phrase(
        text,
        canvas,
        &mut glyphs,
        &SamplerOpts::default(),
        &mut StdRng::seed_from_u64(seed),
    )
    .unwrap()
}

/// Glyph source whose '.' renders nothing.
struct HollowDots(BlockGlyphs);

impl GlyphSource for HollowDots {
    fn measure(&mut self, text: &str, size_px: f64) -> ConstellateResult<f64> {
        self.0.measure(text, size_px)
    }

    fn rasterize(
        &mut self,
        ch: char,
        size_px: f64,
        width: u32,
        height: u32,
    ) -> ConstellateResult<AlphaMask> {
        if ch == '.' {
            return Ok(AlphaMask::new(width, height));
        }
        self.0.rasterize(ch, size_px, width, height)
    }
}

#[test]
fn two_letter_word_yields_two_populated_glyphs() {
    let phrase = sample_blocks("HI", Canvas::new(400, 300), 1);
    assert_eq!(phrase.len(), 2);
    assert_eq!(phrase.glyphs[0].ch, 'H');
    assert_eq!(phrase.glyphs[1].ch, 'I');
    for g in &phrase.glyphs {
        assert!(!g.points.is_empty());
        assert!(!g.edges.is_empty());
    }
}

#[test]
fn points_stay_inside_their_cells() {
    let phrase = sample_blocks("Hello big world", Canvas::new(640, 480), 3);
    assert_eq!(phrase.len(), 13);
    for g in &phrase.glyphs {
        assert!(!g.points.is_empty());
        for p in &g.points {
            assert!(p.x >= g.cell.x0 && p.x < g.cell.x1, "{p:?} outside {:?}", g.cell);
            assert!(p.y >= g.cell.y0 && p.y < g.cell.y1, "{p:?} outside {:?}", g.cell);
        }
    }
}

#[test]
fn edges_index_their_own_glyph() {
    let phrase = sample_blocks("AB CD", Canvas::new(300, 300), 9);
    for g in &phrase.glyphs {
        for e in &g.edges {
            assert_ne!(e.a, e.b);
            assert!(e.a < g.points.len());
            assert!(e.b < g.points.len());
        }
    }
}

#[test]
fn layout_is_stable_across_calls_while_order_varies() {
    let a = sample_blocks("HI", Canvas::new(400, 300), 1);
    let b = sample_blocks("HI", Canvas::new(400, 300), 2);

    assert_eq!(a.font_size, b.font_size);
    for (ga, gb) in a.glyphs.iter().zip(&b.glyphs) {
        assert_eq!(ga.cell, gb.cell);
        assert_eq!(ga.points.len(), gb.points.len());
    }
    assert_ne!(a.glyphs[0].points, b.glyphs[0].points);

    let again = sample_blocks("HI", Canvas::new(400, 300), 1);
    assert_eq!(a, again);
}

#[test]
fn whitespace_only_text_is_empty() {
    assert!(sample_blocks("", Canvas::new(100, 100), 0).is_empty());
    assert!(sample_blocks("   \t ", Canvas::new(100, 100), 0).is_empty());
}

#[test]
fn zero_sized_canvas_keeps_slots_without_points() {
    let phrase = sample_blocks("HI", Canvas::new(0, 0), 0);
    assert_eq!(phrase.len(), 2);
    assert!(phrase.glyphs.iter().all(|g| g.is_empty() && g.edges.is_empty()));
}

#[test]
fn zero_point_glyph_keeps_its_slot() {
    let mut glyphs = HollowDots(BlockGlyphs::default());
    let phrase = sample_phrase(
        "A.B",
        Canvas::new(300, 200),
        &mut glyphs,
        &SamplerOpts::default(),
        &mut StdRng::seed_from_u64(5),
    )
    .unwrap();
    assert_eq!(phrase.len(), 3);
    assert!(phrase.glyphs[1].is_empty());
    assert!(phrase.glyphs[1].edges.is_empty());
    assert!(!phrase.glyphs[0].is_empty());
    assert!(!phrase.glyphs[2].is_empty());
}

#[test]
fn invalid_options_are_rejected() {
    let mut glyphs = BlockGlyphs::default();
    let opts = SamplerOpts {
        step: 0,
        ..SamplerOpts::default()
    };
    let err = sample_phrase(
        "A",
        Canvas::new(10, 10),
        &mut glyphs,
        &opts,
        &mut StdRng::seed_from_u64(0),
    );
    assert!(err.is_err());
}

#[test]
fn sampler_struct_and_json_dump() {
    let mut sampler = Sampler::new(BlockGlyphs::default(), SamplerOpts::default());
    let phrase = sampler.sample("Hi", Canvas::new(200, 100)).unwrap();
    assert_eq!(phrase.len(), 2);

    let json = phrase.to_json().unwrap();
    let back: PhraseGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back.glyphs.len(), 2);
    assert_eq!(back.point_count(), phrase.point_count());
}
