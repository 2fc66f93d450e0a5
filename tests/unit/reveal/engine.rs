use super::*;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::render::surface::RecordingSurface;
use crate::sample::graph::Edge;
use crate::sample::sampler::GlyphGraph;

fn pair_glyph(ch: char, x: f64) -> GlyphGraph {
    GlyphGraph {
        ch,
        cell: Rect::new(x, 0.0, x + 10.0, 10.0),
        points: vec![Point::new(x + 2.0, 2.0), Point::new(x + 6.0, 6.0)],
        edges: vec![Edge::new(0, 1), Edge::new(1, 0)],
    }
}

fn phrase(text: &str) -> PhraseGraph {
    let glyphs = text
        .chars()
        .enumerate()
        .map(|(i, ch)| pair_glyph(ch, i as f64 * 10.0))
        .collect();
    PhraseGraph {
        text: text.to_owned(),
        canvas: Canvas::new(100, 10),
        font_size: 10.0,
        line_height: 11.0,
        glyphs,
    }
}

fn engine() -> RevealEngine {
    RevealEngine::new(10_000.0, RevealStyle::default()).unwrap()
}

#[test]
fn boundary_frame_draws_first_glyph_only() {
    let mut e = engine();
    let run = e.start(phrase("ABCD")).unwrap();
    let mut s = RecordingSurface::new();

    let first = e.render_frame(run, 1_000.0, &mut s).unwrap();
    assert_eq!(first.outcome, FrameOutcome::Continue);
    assert_eq!(first.state.unwrap().elapsed_ms, 0.0);

    let r = e.render_frame(run, 3_500.0, &mut s).unwrap();
    let st = r.state.unwrap();
    assert_eq!(st.active_index, 1);
    assert_eq!(st.glyph_progress(1), Some(0.0));
    // Glyph 0 complete, glyph 1 started at zero progress.
    assert_eq!(r.glyphs_drawn, 2);
    assert_eq!(r.edges_drawn, 2);
    assert_eq!(s.batches().len(), 1);
    assert_eq!(s.clears(), 2);
}

#[test]
fn last_glyph_progress_near_the_end() {
    let mut e = engine();
    let run = e.start(phrase("ABCD")).unwrap();
    let mut s = RecordingSurface::new();
    e.render_frame(run, 0.0, &mut s).unwrap();

    let r = e.render_frame(run, 9_999.0, &mut s).unwrap();
    assert_eq!(r.outcome, FrameOutcome::Continue);
    let st = r.state.unwrap();
    assert_eq!(st.active_index, 3);
    assert!((st.glyph_progress(3).unwrap() - 0.9996).abs() < 1e-12);
    assert_eq!(r.glyphs_drawn, 4);
}

#[test]
fn finishes_once_and_then_stops() {
    let mut e = engine();
    let run = e.start(phrase("HI")).unwrap();
    let mut s = RecordingSurface::new();

    let mut ts = 0.0;
    let mut frames = 0;
    loop {
        let r = e.render_frame(run, ts, &mut s).unwrap();
        frames += 1;
        if !r.outcome.wants_next_frame() {
            assert_eq!(r.outcome, FrameOutcome::Finished);
            break;
        }
        ts += 1000.0 / 60.0;
        assert!(frames < 1_000);
    }
    assert!(!e.is_running());
    // Final frame stays: every edge of every glyph.
    assert_eq!(s.line_count(), 4);

    let clears = s.clears();
    let again = e.render_frame(run, ts + 16.0, &mut s).unwrap();
    assert_eq!(again.outcome, FrameOutcome::Finished);
    assert_eq!(again.state, None);
    assert_eq!(s.clears(), clears);
}

#[test]
fn retrigger_supersedes_previous_run() {
    let mut e = engine();
    let mut s = RecordingSurface::new();

    let old = e.start(phrase("OLD")).unwrap();
    e.render_frame(old, 0.0, &mut s).unwrap();

    let new = e.start(phrase("NEW!")).unwrap();
    assert!(new > old);
    assert_eq!(e.current_run(), Some(new));

    let r = e.render_frame(new, 100.0, &mut s).unwrap();
    assert_eq!(r.outcome, FrameOutcome::Continue);
    let clears = s.clears();
    let batches = s.batches().to_vec();

    let stale = e.render_frame(old, 200.0, &mut s).unwrap();
    assert_eq!(stale.outcome, FrameOutcome::Superseded);
    assert_eq!(s.clears(), clears);
    assert_eq!(s.batches(), batches.as_slice());

    // New run has its own clock.
    assert_eq!(r.state.unwrap().elapsed_ms, 0.0);
    assert_eq!(e.phrase().map(|p| p.text.as_str()), Some("NEW!"));
}

#[test]
fn idle_and_empty_phrase() {
    let mut e = engine();
    let mut s = RecordingSurface::new();
    assert_eq!(
        e.render_frame(RunId(1), 0.0, &mut s).unwrap().outcome,
        FrameOutcome::Idle
    );
    assert_eq!(
        e.start(PhraseGraph::empty("   ", Canvas::new(10, 10))),
        None
    );
    assert_eq!(e.current_run(), None);
    assert_eq!(s.clears(), 0);

    let run = e.start(phrase("A")).unwrap();
    e.cancel();
    assert_eq!(
        e.render_frame(run, 0.0, &mut s).unwrap().outcome,
        FrameOutcome::Idle
    );
}

#[test]
fn timestamps_must_not_go_backwards() {
    let mut e = engine();
    let run = e.start(phrase("AB")).unwrap();
    let mut s = RecordingSurface::new();
    e.render_frame(run, 500.0, &mut s).unwrap();
    e.render_frame(run, 500.0, &mut s).unwrap();
    assert!(e.render_frame(run, 499.0, &mut s).is_err());
    assert!(e.render_frame(run, f64::NAN, &mut s).is_err());
}

#[test]
fn draw_phrase_skips_unstarted_glyphs() {
    let p = phrase("ABCD");
    let schedule = RevealSchedule::new(10_000.0, 4).unwrap();
    let mut s = RecordingSurface::new();
    let stats = draw_phrase(&mut s, &p, &schedule.state_at(6_000.0), &RevealStyle::default())
        .unwrap();
    // Glyphs 0 and 1 complete, glyph 2 at 0.4 (visible 0 of 2).
    assert_eq!(stats.glyphs_drawn, 3);
    assert_eq!(stats.edges_drawn, 4);
    assert_eq!(s.clears(), 0);
}

#[test]
fn rejects_bad_construction() {
    assert!(RevealEngine::new(0.0, RevealStyle::default()).is_err());
    let bad = RevealStyle {
        line_width: -1.0,
        ..RevealStyle::default()
    };
    assert!(RevealEngine::new(1000.0, bad).is_err());
}
