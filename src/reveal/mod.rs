//! Time-driven reveal: a single elapsed time maps to a deterministic drawing of every glyph.

pub(crate) mod clock;
pub(crate) mod draw;
pub(crate) mod engine;
pub(crate) mod schedule;
