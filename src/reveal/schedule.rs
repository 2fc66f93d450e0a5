use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::foundation::math::unit_ratio;

/// Splits a fixed total duration evenly across all glyphs of a phrase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealSchedule {
    total_ms: f64,
    glyph_count: usize,
}

/// Where every glyph stands at one elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduleState {
    pub elapsed_ms: f64,
    /// `elapsed / total`, clamped to `[0, 1]`.
    pub total_progress: f64,
    /// Glyphs below this index are complete. Equals the glyph count once everything is drawn.
    pub active_index: usize,
    /// Progress of the glyph at `active_index`, if one is still being revealed.
    pub active_progress: Option<f64>,
}

impl ScheduleState {
    /// Draw progress of glyph `index`, or `None` if it is not drawn yet.
    pub fn glyph_progress(&self, index: usize) -> Option<f64> {
        if index < self.active_index {
            Some(1.0)
        } else if index == self.active_index {
            self.active_progress
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total_progress >= 1.0
    }
}

impl RevealSchedule {
    pub fn new(total_ms: f64, glyph_count: usize) -> ConstellateResult<Self> {
        if !total_ms.is_finite() || total_ms <= 0.0 {
            return Err(ConstellateError::validation(
                "reveal duration must be finite and > 0",
            ));
        }
        Ok(Self {
            total_ms,
            glyph_count,
        })
    }

    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    /// Time slice of one glyph. Zero-point glyphs get a slice too.
    pub fn per_glyph_ms(&self) -> f64 {
        self.total_ms / self.glyph_count.max(1) as f64
    }

    pub fn total_progress(&self, elapsed_ms: f64) -> f64 {
        unit_ratio(elapsed_ms.max(0.0), self.total_ms)
    }

    pub fn state_at(&self, elapsed_ms: f64) -> ScheduleState {
        let elapsed_ms = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };
        let total_progress = self.total_progress(elapsed_ms);
        let n = self.glyph_count;

        if total_progress >= 1.0 || n == 0 {
            return ScheduleState {
                elapsed_ms,
                total_progress,
                active_index: n,
                active_progress: None,
            };
        }

        // Index and progress both come from one quotient so they agree at glyph boundaries.
        let position = elapsed_ms / self.per_glyph_ms();
        let active_index = (position.floor() as usize).min(n);
        let active_progress =
            (active_index < n).then(|| (position - active_index as f64).clamp(0.0, 1.0));
        ScheduleState {
            elapsed_ms,
            total_progress,
            active_index,
            active_progress,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/schedule.rs"]
mod tests;
