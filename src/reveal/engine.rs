use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::render::surface::DrawSurface;
use crate::reveal::clock::AnimationClock;
use crate::reveal::draw::{RevealStyle, draw_glyph};
use crate::reveal::schedule::{RevealSchedule, ScheduleState};
use crate::sample::sampler::PhraseGraph;

/// Generation marker of a reveal run. Later runs have larger ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

/// What the caller should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Run still revealing; request another frame.
    Continue,
    /// Final frame drawn; stop requesting frames.
    Finished,
    /// The frame belonged to a run that has been replaced. Nothing was drawn.
    Superseded,
    /// No run. Nothing was drawn.
    Idle,
}

impl FrameOutcome {
    pub fn wants_next_frame(self) -> bool {
        matches!(self, FrameOutcome::Continue)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    /// Schedule position of the drawn frame; `None` when nothing was drawn.
    pub state: Option<ScheduleState>,
    pub glyphs_drawn: usize,
    pub edges_drawn: usize,
}

impl FrameReport {
    fn skipped(outcome: FrameOutcome) -> Self {
        Self {
            outcome,
            state: None,
            glyphs_drawn: 0,
            edges_drawn: 0,
        }
    }
}

/// Totals of one `draw_phrase` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhraseDrawStats {
    pub glyphs_drawn: usize,
    pub edges_drawn: usize,
}

/// Draw every started glyph of `phrase` at `state`. Does not clear.
pub fn draw_phrase<S>(
    surface: &mut S,
    phrase: &PhraseGraph,
    state: &ScheduleState,
    style: &RevealStyle,
) -> ConstellateResult<PhraseDrawStats>
where
    S: DrawSurface + ?Sized,
{
    let mut stats = PhraseDrawStats::default();
    for (i, glyph) in phrase.glyphs.iter().enumerate() {
        let Some(progress) = state.glyph_progress(i) else {
            break;
        };
        let g = draw_glyph(surface, glyph, progress, style)?;
        stats.glyphs_drawn += 1;
        stats.edges_drawn += g.edges_drawn;
    }
    Ok(stats)
}

struct Run {
    id: RunId,
    phrase: PhraseGraph,
    clock: AnimationClock,
    schedule: RevealSchedule,
    last_ts: Option<f64>,
    finished: bool,
}

/// Owns at most one run and turns frame timestamps into draw calls.
pub struct RevealEngine {
    total_ms: f64,
    style: RevealStyle,
    next_id: u64,
    run: Option<Run>,
}

impl RevealEngine {
    pub fn new(total_ms: f64, style: RevealStyle) -> ConstellateResult<Self> {
        RevealSchedule::new(total_ms, 0)?;
        style.validate()?;
        Ok(Self {
            total_ms,
            style,
            next_id: 1,
            run: None,
        })
    }

    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    pub fn style(&self) -> &RevealStyle {
        &self.style
    }

    /// Id of the current run, finished or not.
    pub fn current_run(&self) -> Option<RunId> {
        self.run.as_ref().map(|r| r.id)
    }

    pub fn phrase(&self) -> Option<&PhraseGraph> {
        self.run.as_ref().map(|r| &r.phrase)
    }

    /// A run exists and has not drawn its final frame.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| !r.finished)
    }

    /// Replace the current run with `phrase`. An empty phrase starts nothing and keeps the
    /// current run.
    #[tracing::instrument(skip(self, phrase), fields(glyphs = phrase.len()))]
    pub fn start(&mut self, phrase: PhraseGraph) -> Option<RunId> {
        if phrase.is_empty() {
            tracing::debug!("empty phrase; run not started");
            return None;
        }
        let schedule = RevealSchedule::new(self.total_ms, phrase.len()).ok()?;
        let id = RunId(self.next_id);
        self.next_id += 1;
        if let Some(old) = &self.run {
            tracing::debug!(old = old.id.0, new = id.0, "run superseded");
        }
        self.run = Some(Run {
            id,
            phrase,
            clock: AnimationClock::new(),
            schedule,
            last_ts: None,
            finished: false,
        });
        Some(id)
    }

    pub fn cancel(&mut self) {
        self.run = None;
    }

    /// Render the frame of `run` at display timestamp `timestamp_ms`.
    ///
    /// The first frame of a run latches its start time. Timestamps must not go backwards.
    pub fn render_frame<S>(
        &mut self,
        run: RunId,
        timestamp_ms: f64,
        surface: &mut S,
    ) -> ConstellateResult<FrameReport>
    where
        S: DrawSurface + ?Sized,
    {
        let style = self.style;
        let Some(current) = self.run.as_mut() else {
            return Ok(FrameReport::skipped(FrameOutcome::Idle));
        };
        if current.id != run {
            tracing::trace!(stale = run.0, current = current.id.0, "stale frame dropped");
            return Ok(FrameReport::skipped(FrameOutcome::Superseded));
        }
        if current.finished {
            return Ok(FrameReport::skipped(FrameOutcome::Finished));
        }
        if !timestamp_ms.is_finite() {
            return Err(ConstellateError::validation("frame timestamp must be finite"));
        }
        if let Some(last) = current.last_ts
            && timestamp_ms < last
        {
            return Err(ConstellateError::validation(format!(
                "frame timestamp {timestamp_ms} precedes previous {last}"
            )));
        }
        current.last_ts = Some(timestamp_ms);

        let elapsed = current.clock.elapsed_at(timestamp_ms);
        let state = current.schedule.state_at(elapsed);

        surface.clear()?;
        let stats = draw_phrase(surface, &current.phrase, &state, &style)?;

        let outcome = if state.is_finished() {
            current.finished = true;
            tracing::debug!(run = run.0, elapsed_ms = elapsed, "reveal finished");
            FrameOutcome::Finished
        } else {
            FrameOutcome::Continue
        };
        tracing::trace!(
            run = run.0,
            elapsed_ms = elapsed,
            active = state.active_index,
            edges = stats.edges_drawn,
            "frame"
        );
        Ok(FrameReport {
            outcome,
            state: Some(state),
            glyphs_drawn: stats.glyphs_drawn,
            edges_drawn: stats.edges_drawn,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/engine.rs"]
mod tests;
