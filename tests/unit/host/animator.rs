use super::*;
use crate::host::scheduler::FrameTicker;
use crate::foundation::core::Fps;
use crate::render::surface::RecordingSurface;
use crate::reveal::engine::FrameOutcome;
use crate::text::block::BlockGlyphs;

fn opts() -> AnimatorOpts {
    AnimatorOpts {
        canvas: Canvas::new(320, 180),
        duration_ms: 1_000.0,
        settle_delay_ms: 100.0,
        sampler: SamplerOpts::default(),
        style: RevealStyle::default(),
        seed: Some(11),
    }
}

fn ready() -> Animator<BlockGlyphs> {
    let mut a = Animator::new(opts()).unwrap();
    a.install_font(BlockGlyphs::default());
    a
}

fn drain(
    a: &mut Animator<BlockGlyphs>,
    ticker: &mut FrameTicker,
    surface: &mut RecordingSurface,
) -> Vec<(RunId, FrameReport)> {
    let mut out = Vec::new();
    while let Some(refresh) = ticker.next_refresh() {
        for run in refresh.runs {
            let report = a.on_frame(run, refresh.timestamp_ms, surface, ticker).unwrap();
            out.push((run, report));
        }
        assert!(out.len() < 10_000);
    }
    out
}

#[test]
fn loading_gate() {
    let mut a: Animator<BlockGlyphs> = Animator::new(opts()).unwrap();
    assert_eq!(a.readiness(), Readiness::Loading);
    assert_eq!(
        a.control(),
        ControlState {
            enabled: false,
            label: "Loading Fonts...",
            visible: true
        }
    );
    let mut ticker = FrameTicker::new(Fps::default());
    assert_eq!(
        a.trigger("Hello", &mut ticker).unwrap(),
        TriggerOutcome::NotReady
    );
    assert!(!ticker.has_pending());

    a.install_font(BlockGlyphs::default());
    let c = a.control();
    assert!(c.enabled);
    assert_eq!(c.label, "Start Animation");
}

#[test]
fn blank_input_schedules_nothing() {
    let mut a = ready();
    let mut ticker = FrameTicker::new(Fps::default());
    for text in ["", "   ", "\t\n"] {
        assert_eq!(a.trigger(text, &mut ticker).unwrap(), TriggerOutcome::Ignored);
    }
    assert!(!ticker.has_pending());
    assert!(a.phrase().is_none());
}

#[test]
fn full_run_stops_requesting_frames() {
    let mut a = ready();
    let mut ticker = FrameTicker::new(Fps::default());
    let mut surface = RecordingSurface::new();

    let TriggerOutcome::Started(run) = a.trigger("  HI  ", &mut ticker).unwrap() else {
        panic!("expected a run");
    };
    assert_eq!(a.phrase().unwrap().text, "HI");
    assert_eq!(a.phrase().unwrap().len(), 2);

    let frames = drain(&mut a, &mut ticker, &mut surface);
    assert!(frames.len() > 50);
    assert!(frames.iter().all(|(r, _)| *r == run));
    let (last, rest) = frames.split_last().unwrap();
    assert_eq!(last.1.outcome, FrameOutcome::Finished);
    assert!(rest.iter().all(|(_, r)| r.outcome == FrameOutcome::Continue));
    assert!(!ticker.has_pending());

    // Final frame shows every edge of the phrase.
    assert_eq!(surface.line_count(), a.phrase().unwrap().edge_count());
}

#[test]
fn first_frame_waits_for_settle_delay() {
    let mut a = ready();
    let mut ticker = FrameTicker::new(Fps::default());
    let mut surface = RecordingSurface::new();
    a.trigger("A", &mut ticker).unwrap();
    let refresh = ticker.next_refresh().unwrap();
    assert!(refresh.timestamp_ms >= 100.0);
    assert!(refresh.timestamp_ms < 100.0 + Fps::default().frame_duration_ms());
    let run = refresh.runs[0];
    a.on_frame(run, refresh.timestamp_ms, &mut surface, &mut ticker)
        .unwrap();
    assert_eq!(surface.clears(), 1);
}

#[test]
fn retrigger_drops_old_run_frames() {
    let mut a = ready();
    let mut ticker = FrameTicker::new(Fps::default());
    let mut surface = RecordingSurface::new();

    let TriggerOutcome::Started(old) = a.trigger("OLD", &mut ticker).unwrap() else {
        panic!("expected a run");
    };
    for _ in 0..10 {
        let refresh = ticker.next_refresh().unwrap();
        for run in refresh.runs {
            a.on_frame(run, refresh.timestamp_ms, &mut surface, &mut ticker)
                .unwrap();
        }
    }

    let TriggerOutcome::Started(new) = a.trigger("NEW", &mut ticker).unwrap() else {
        panic!("expected a run");
    };
    assert_ne!(old, new);

    let frames = drain(&mut a, &mut ticker, &mut surface);
    let first_new = frames.iter().position(|(r, _)| *r == new).unwrap();
    for (run, report) in &frames {
        if *run == old {
            assert_eq!(report.outcome, FrameOutcome::Superseded);
            assert_eq!(report.glyphs_drawn, 0);
        }
    }
    assert!(frames[first_new..].iter().all(|(r, _)| *r == new));
    assert_eq!(frames.last().unwrap().1.outcome, FrameOutcome::Finished);
}

#[test]
fn prefill_hides_input_and_waits_for_font() {
    let mut a: Animator<BlockGlyphs> = Animator::new(opts()).unwrap();
    a.prefill(AutoStart {
        text: "Hi".into(),
        delay_ms: 500.0,
    });
    assert!(!a.control().visible);
    assert!(a.take_auto_start().is_none());

    a.install_font(BlockGlyphs::default());
    let auto = a.take_auto_start().unwrap();
    assert_eq!(auto.text, "Hi");
    assert!(a.take_auto_start().is_none());
}

#[test]
fn resize_affects_next_trigger_only() {
    let mut a = ready();
    let mut ticker = FrameTicker::new(Fps::default());
    a.trigger("A", &mut ticker).unwrap();
    let before = a.phrase().unwrap().clone();

    a.resize(Canvas::new(640, 360));
    assert_eq!(a.phrase().unwrap(), &before);

    a.trigger("A", &mut ticker).unwrap();
    assert_eq!(a.phrase().unwrap().canvas, Canvas::new(640, 360));
}

#[test]
fn seeded_animators_agree() {
    let mut a = ready();
    let mut b = ready();
    let mut t = FrameTicker::new(Fps::default());
    a.trigger("Ada", &mut t).unwrap();
    b.trigger("Ada", &mut t).unwrap();
    assert_eq!(a.phrase(), b.phrase());
}
