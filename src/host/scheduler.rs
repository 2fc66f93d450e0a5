use crate::foundation::core::{FrameIndex, Fps};
use crate::reveal::engine::RunId;

/// Something that calls back on a future display refresh.
pub trait FrameScheduler {
    /// Ask for one callback for `run` on the first refresh at least `delay_ms` from now.
    fn request_frame(&mut self, run: RunId, delay_ms: f64);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self, run: RunId, delay_ms: f64) {
        (**self).request_frame(run, delay_ms)
    }
}

/// One simulated display refresh and the runs that asked for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Refresh {
    pub frame: FrameIndex,
    pub timestamp_ms: f64,
    pub runs: Vec<RunId>,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    run: RunId,
    due_ms: f64,
}

/// Fixed-rate refresh clock for offline rendering.
///
/// Refresh `k` happens at `k * frame_duration`. Emitted timestamps are strictly increasing.
#[derive(Clone, Debug)]
pub struct FrameTicker {
    fps: Fps,
    now_ms: f64,
    next_frame: u64,
    pending: Vec<Pending>,
}

impl FrameTicker {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            now_ms: 0.0,
            next_frame: 0,
            pending: Vec::new(),
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Index of the next refresh that has not been emitted.
    pub fn next_frame(&self) -> FrameIndex {
        FrameIndex(self.next_frame)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn frame_time(&self, k: u64) -> f64 {
        k as f64 * self.fps.frame_duration_ms()
    }

    /// Let `ms` pass without emitting refreshes.
    pub fn advance_by(&mut self, ms: f64) {
        if !(ms.is_finite() && ms > 0.0) {
            return;
        }
        self.now_ms += ms;
        let k = self.fps.ms_to_frames_ceil(self.now_ms);
        self.next_frame = self.next_frame.max(k);
    }

    /// Emit the next refresh that has callbacks due, or `None` when nothing is pending.
    pub fn next_refresh(&mut self) -> Option<Refresh> {
        let due = self
            .pending
            .iter()
            .map(|p| p.due_ms)
            .fold(f64::INFINITY, f64::min);
        if !due.is_finite() {
            return None;
        }
        let mut k = self.next_frame.max(self.fps.ms_to_frames_ceil(due));
        if self.frame_time(k) < due {
            k += 1;
        }
        let timestamp_ms = self.frame_time(k);
        self.next_frame = k + 1;
        self.now_ms = self.now_ms.max(timestamp_ms);

        let mut runs = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= timestamp_ms {
                runs.push(p.run);
                false
            } else {
                true
            }
        });
        Some(Refresh {
            frame: FrameIndex(k),
            timestamp_ms,
            runs,
        })
    }
}

impl FrameScheduler for FrameTicker {
    fn request_frame(&mut self, run: RunId, delay_ms: f64) {
        let delay_ms = if delay_ms.is_finite() {
            delay_ms.max(0.0)
        } else {
            0.0
        };
        self.pending.push(Pending {
            run,
            due_ms: self.now_ms + delay_ms,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scheduler.rs"]
mod tests;
