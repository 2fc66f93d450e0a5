/// Per-run clock: the first frame timestamp is latched as the start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    start_ms: Option<f64>,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.start_ms.is_some()
    }

    pub fn start_ms(&self) -> Option<f64> {
        self.start_ms
    }

    /// Elapsed time at `timestamp_ms`, latching the start on the first call.
    pub fn elapsed_at(&mut self, timestamp_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(timestamp_ms);
        (timestamp_ms - start).max(0.0)
    }

    pub fn reset(&mut self) {
        self.start_ms = None;
    }
}
