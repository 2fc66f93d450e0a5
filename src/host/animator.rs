use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::foundation::core::Canvas;
use crate::foundation::error::ConstellateResult;
use crate::host::prefill::AutoStart;
use crate::host::scheduler::FrameScheduler;
use crate::render::surface::DrawSurface;
use crate::reveal::draw::RevealStyle;
use crate::reveal::engine::{FrameReport, RevealEngine, RunId};
use crate::sample::sampler::{PhraseGraph, SamplerOpts, sample_phrase};
use crate::text::GlyphSource;

/// Whether a font has been installed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    Loading,
    Ready,
}

impl Readiness {
    /// Label shown on the trigger control.
    pub fn label(self) -> &'static str {
        match self {
            Readiness::Loading => "Loading Fonts...",
            Readiness::Ready => "Start Animation",
        }
    }
}

/// Presentation state of the input and its trigger button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: &'static str,
    /// `false` once a prefilled phrase took over.
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Started(RunId),
    /// Blank input; the current run, if any, keeps going.
    Ignored,
    /// No font yet.
    NotReady,
}

/// Timing knobs of the animator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorOpts {
    pub canvas: Canvas,
    pub duration_ms: f64,
    pub settle_delay_ms: f64,
    pub sampler: SamplerOpts,
    pub style: RevealStyle,
    /// Fixed seed for reproducible point orders; `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Ties a glyph source, the sampler and the reveal engine to a frame scheduler.
pub struct Animator<G> {
    glyphs: Option<G>,
    canvas: Canvas,
    sampler: SamplerOpts,
    settle_delay_ms: f64,
    engine: RevealEngine,
    rng: StdRng,
    input_visible: bool,
    auto_start: Option<AutoStart>,
}

impl<G: GlyphSource> Animator<G> {
    pub fn new(opts: AnimatorOpts) -> ConstellateResult<Self> {
        opts.sampler.validate()?;
        let engine = RevealEngine::new(opts.duration_ms, opts.style)?;
        let rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            glyphs: None,
            canvas: opts.canvas,
            sampler: opts.sampler,
            settle_delay_ms: opts.settle_delay_ms.max(0.0),
            engine,
            rng,
            input_visible: true,
            auto_start: None,
        })
    }

    pub fn readiness(&self) -> Readiness {
        if self.glyphs.is_some() {
            Readiness::Ready
        } else {
            Readiness::Loading
        }
    }

    pub fn control(&self) -> ControlState {
        let readiness = self.readiness();
        ControlState {
            enabled: readiness == Readiness::Ready,
            label: readiness.label(),
            visible: self.input_visible,
        }
    }

    pub fn install_font(&mut self, glyphs: G) {
        tracing::debug!("font installed");
        self.glyphs = Some(glyphs);
    }

    /// Register a prefilled phrase. The input control is hidden right away.
    pub fn prefill(&mut self, auto: AutoStart) {
        self.input_visible = false;
        self.auto_start = Some(auto);
    }

    /// Take the pending auto-start once the font is ready.
    pub fn take_auto_start(&mut self) -> Option<AutoStart> {
        if self.readiness() == Readiness::Ready {
            self.auto_start.take()
        } else {
            None
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Later triggers lay out for the new size; a running phrase keeps its coordinates.
    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    pub fn phrase(&self) -> Option<&PhraseGraph> {
        self.engine.phrase()
    }

    /// Sample `text`, replace the current run and ask for its first frame after the settle delay.
    #[tracing::instrument(skip(self, text, scheduler))]
    pub fn trigger<S>(&mut self, text: &str, scheduler: &mut S) -> ConstellateResult<TriggerOutcome>
    where
        S: FrameScheduler + ?Sized,
    {
        let Some(glyphs) = self.glyphs.as_mut() else {
            return Ok(TriggerOutcome::NotReady);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(TriggerOutcome::Ignored);
        }
        let phrase = sample_phrase(text, self.canvas, glyphs, &self.sampler, &mut self.rng)?;
        let Some(run) = self.engine.start(phrase) else {
            return Ok(TriggerOutcome::Ignored);
        };
        scheduler.request_frame(run, self.settle_delay_ms);
        tracing::debug!(run = run.0, "run started");
        Ok(TriggerOutcome::Started(run))
    }

    /// Draw the frame of `run` and keep the loop going while it is unfinished.
    pub fn on_frame<S, D>(
        &mut self,
        run: RunId,
        timestamp_ms: f64,
        surface: &mut D,
        scheduler: &mut S,
    ) -> ConstellateResult<FrameReport>
    where
        S: FrameScheduler + ?Sized,
        D: DrawSurface + ?Sized,
    {
        let report = self.engine.render_frame(run, timestamp_ms, surface)?;
        if report.outcome.wants_next_frame() {
            scheduler.request_frame(run, 0.0);
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/animator.rs"]
mod tests;
