use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::AnimationConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::ConstellateResult;
use crate::host::animator::{Animator, TriggerOutcome};
use crate::host::prefill::AutoStart;
use crate::host::scheduler::FrameTicker;
use crate::render::cpu::CpuSurface;
use crate::render::frame::FrameRGBA;
use crate::render::surface::DrawSurface;
use crate::reveal::engine::{FrameOutcome, draw_phrase};
use crate::reveal::schedule::RevealSchedule;
use crate::sample::sampler::{PhraseGraph, sample_phrase};
use crate::text::GlyphSource;

/// Options of [`render_phrase`] beyond the animation config.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderPhraseOpts {
    /// Prefilled phrase. It replaces `text` and triggers once the font is installed and its
    /// delay has passed.
    pub auto_start: Option<AutoStart>,
}

impl RenderPhraseOpts {
    pub fn with_auto_start(auto: AutoStart) -> Self {
        Self {
            auto_start: Some(auto),
        }
    }
}

/// Frame counts of an offline render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames pushed to the sink.
    pub frames: u64,
    /// Blank frames before the first reveal frame.
    pub lead_in_frames: u64,
    /// Frames drawn by the reveal engine, including the final one.
    pub reveal_frames: u64,
    /// Copies of the final frame appended at the end.
    pub hold_frames: u64,
    pub glyphs: usize,
    pub points: usize,
    pub edges: usize,
}

fn rng_for(config: &AnimationConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Sample `text` with the config's layout and seed.
pub fn sample_with_config<G>(
    config: &AnimationConfig,
    glyphs: &mut G,
    text: &str,
) -> ConstellateResult<PhraseGraph>
where
    G: GlyphSource + ?Sized,
{
    config.validate()?;
    let text = text.trim();
    let mut rng = rng_for(config);
    sample_phrase(text, config.canvas, glyphs, &config.sampler, &mut rng)
}

/// Render `text` as it looks `elapsed_ms` into its reveal.
///
/// Uses the same sampling as an animated run with the same seed, so a seeded still matches the
/// corresponding video frame.
#[tracing::instrument(skip(config, glyphs, text))]
pub fn render_frame_at<G>(
    config: &AnimationConfig,
    glyphs: &mut G,
    text: &str,
    elapsed_ms: f64,
) -> ConstellateResult<FrameRGBA>
where
    G: GlyphSource + ?Sized,
{
    let phrase = sample_with_config(config, glyphs, text)?;
    let mut surface = CpuSurface::new(config.canvas, config.pixel_ratio, config.background)?;
    surface.clear()?;
    if !phrase.is_empty() {
        let schedule = RevealSchedule::new(config.duration_ms, phrase.len())?;
        let state = schedule.state_at(elapsed_ms);
        draw_phrase(&mut surface, &phrase, &state, &config.style)?;
    }
    surface.snapshot()
}

/// Drive a full run at the config's frame rate and push every frame into `sink`.
///
/// The video starts at time zero with blank frames covering the auto-start delay (for a
/// prefilled phrase) and the settle delay, follows the reveal until it finishes, then holds the
/// final frame for `hold_ms`. Blank input renders nothing and leaves the sink untouched.
#[tracing::instrument(skip(config, glyphs, text, sink))]
pub fn render_phrase<G, S>(
    config: &AnimationConfig,
    glyphs: G,
    text: &str,
    opts: RenderPhraseOpts,
    sink: &mut S,
) -> ConstellateResult<RenderStats>
where
    G: GlyphSource,
    S: FrameSink + ?Sized,
{
    config.validate()?;
    let blank = match &opts.auto_start {
        Some(auto) => auto.text.trim().is_empty(),
        None => text.trim().is_empty(),
    };
    if blank {
        tracing::debug!("blank phrase; nothing to render");
        return Ok(RenderStats::default());
    }

    let mut animator = Animator::new(config.animator_opts())?;
    if let Some(auto) = opts.auto_start {
        animator.prefill(auto);
    }
    animator.install_font(glyphs);
    let mut ticker = FrameTicker::new(config.fps);
    let mut surface = CpuSurface::new(config.canvas, config.pixel_ratio, config.background)?;
    let physical = surface.physical_size();

    let outcome = match animator.take_auto_start() {
        Some(auto) => {
            ticker.advance_by(auto.delay_ms);
            tracing::debug!(delay_ms = auto.delay_ms, "auto-start");
            animator.trigger(&auto.text, &mut ticker)?
        }
        None => animator.trigger(text, &mut ticker)?,
    };
    let TriggerOutcome::Started(run) = outcome else {
        return Ok(RenderStats::default());
    };

    sink.begin(SinkConfig {
        width: physical.width,
        height: physical.height,
        fps: config.fps,
    })?;

    let mut stats = RenderStats::default();
    if let Some(phrase) = animator.phrase() {
        stats.glyphs = phrase.len();
        stats.points = phrase.point_count();
        stats.edges = phrase.edge_count();
    }

    let mut next_idx = 0u64;
    let mut frame = surface.snapshot()?;
    while let Some(refresh) = ticker.next_refresh() {
        while next_idx < refresh.frame.0 {
            sink.push_frame(FrameIndex(next_idx), &frame)?;
            if stats.reveal_frames == 0 {
                stats.lead_in_frames += 1;
            }
            next_idx += 1;
        }

        let mut drew = false;
        for r in refresh.runs {
            let report = animator.on_frame(r, refresh.timestamp_ms, &mut surface, &mut ticker)?;
            drew |= !matches!(report.outcome, FrameOutcome::Superseded | FrameOutcome::Idle);
        }
        if drew {
            frame = surface.snapshot()?;
            stats.reveal_frames += 1;
        }
        sink.push_frame(FrameIndex(next_idx), &frame)?;
        next_idx += 1;
    }
    tracing::debug!(run = run.0, frames = next_idx, "reveal rendered");

    let hold = config.fps.ms_to_frames_ceil(config.hold_ms);
    for _ in 0..hold {
        sink.push_frame(FrameIndex(next_idx), &frame)?;
        next_idx += 1;
    }
    stats.hold_frames = hold;
    stats.frames = next_idx;

    sink.end()?;
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
