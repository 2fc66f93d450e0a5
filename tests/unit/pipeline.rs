use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::host::prefill::AutoStart;
use crate::text::block::BlockGlyphs;

fn config() -> AnimationConfig {
    AnimationConfig {
        canvas: Canvas::new(64, 36),
        fps: Fps::new(10, 1).unwrap(),
        duration_ms: 500.0,
        settle_delay_ms: 100.0,
        auto_start_delay_ms: 500.0,
        hold_ms: 200.0,
        background: Rgba8::rgb(0, 0, 0),
        seed: Some(3),
        ..AnimationConfig::default()
    }
}

fn is_blank(frame: &FrameRGBA) -> bool {
    frame
        .data
        .chunks_exact(4)
        .all(|px| px == [0, 0, 0, 255])
}

#[test]
fn timeline_has_lead_in_reveal_and_hold() {
    let mut sink = InMemorySink::new();
    let stats = render_phrase(
        &config(),
        BlockGlyphs::default(),
        "HI",
        RenderPhraseOpts::default(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(stats.lead_in_frames, 1);
    assert_eq!(stats.reveal_frames, 6);
    assert_eq!(stats.hold_frames, 2);
    assert_eq!(stats.frames, 9);
    assert_eq!(stats.glyphs, 2);
    assert!(stats.points > 0);
    assert!(stats.edges > 0);

    assert!(sink.is_ended());
    let frames = sink.frames();
    assert_eq!(frames.len(), 9);
    for (i, (idx, _)) in frames.iter().enumerate() {
        assert_eq!(idx.0, i as u64);
    }
    assert!(is_blank(&frames[0].1));
    // First reveal frame is at elapsed 0: nothing visible yet.
    assert!(is_blank(&frames[1].1));
    let last = &frames[8].1;
    assert!(!is_blank(last));
    assert_eq!(&frames[6].1, last);
}

#[test]
fn auto_start_adds_its_delay() {
    let cfg = config();
    let auto = AutoStart::from_query("?input=HI", cfg.auto_start_delay_ms).unwrap();
    let mut sink = InMemorySink::new();
    let stats = render_phrase(
        &cfg,
        BlockGlyphs::default(),
        "",
        RenderPhraseOpts::with_auto_start(auto),
        &mut sink,
    )
    .unwrap();
    assert_eq!(stats.glyphs, 2);
    assert_eq!(stats.lead_in_frames, 6);
    assert_eq!(stats.frames, 6 + 6 + 2);
}

#[test]
fn auto_start_uses_its_own_delay_and_text() {
    let auto = AutoStart {
        text: "OK".to_owned(),
        delay_ms: 1_000.0,
    };
    let mut sink = InMemorySink::new();
    let stats = render_phrase(
        &config(),
        BlockGlyphs::default(),
        "ignored text",
        RenderPhraseOpts::with_auto_start(auto),
        &mut sink,
    )
    .unwrap();
    // 1000 ms auto-start + 100 ms settle at 10 fps.
    assert_eq!(stats.lead_in_frames, 11);
    assert_eq!(stats.glyphs, 2);
}

#[test]
fn blank_auto_start_renders_nothing() {
    let auto = AutoStart {
        text: "  ".to_owned(),
        delay_ms: 500.0,
    };
    let mut sink = InMemorySink::new();
    let stats = render_phrase(
        &config(),
        BlockGlyphs::default(),
        "HI",
        RenderPhraseOpts::with_auto_start(auto),
        &mut sink,
    )
    .unwrap();
    assert_eq!(stats, RenderStats::default());
    assert!(sink.config().is_none());
}

#[test]
fn pixel_ratio_scales_sink_size() {
    let cfg = AnimationConfig {
        pixel_ratio: 2.0,
        hold_ms: 0.0,
        ..config()
    };
    let mut sink = InMemorySink::new();
    render_phrase(
        &cfg,
        BlockGlyphs::default(),
        "A",
        RenderPhraseOpts::default(),
        &mut sink,
    )
    .unwrap();
    let sc = sink.config().unwrap();
    assert_eq!((sc.width, sc.height), (128, 72));
    assert!(sink.frames().iter().all(|(_, f)| f.width == 128 && f.height == 72));
}

#[test]
fn blank_text_leaves_sink_untouched() {
    let mut sink = InMemorySink::new();
    let stats = render_phrase(
        &config(),
        BlockGlyphs::default(),
        "   ",
        RenderPhraseOpts::default(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(stats, RenderStats::default());
    assert!(sink.config().is_none());
    assert!(sink.frames().is_empty());
}

#[test]
fn still_frame_matches_final_video_frame() {
    let cfg = config();
    let mut sink = InMemorySink::new();
    render_phrase(
        &cfg,
        BlockGlyphs::default(),
        "HI",
        RenderPhraseOpts::default(),
        &mut sink,
    )
    .unwrap();
    let last = &sink.frames().last().unwrap().1;

    let mut glyphs = BlockGlyphs::default();
    let still = render_frame_at(&cfg, &mut glyphs, "HI", cfg.duration_ms).unwrap();
    assert_eq!(&still, last);

    let start = render_frame_at(&cfg, &mut glyphs, "HI", 0.0).unwrap();
    assert!(is_blank(&start));
    let empty = render_frame_at(&cfg, &mut glyphs, "", 1_000.0).unwrap();
    assert!(is_blank(&empty));
}

#[test]
fn seeded_sampling_is_reproducible() {
    let cfg = config();
    let a = sample_with_config(&cfg, &mut BlockGlyphs::default(), " Ada ").unwrap();
    let b = sample_with_config(&cfg, &mut BlockGlyphs::default(), "Ada").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.text, "Ada");
}
