//! Host-side glue: readiness gate, trigger handling, frame scheduling and URL prefill.

pub(crate) mod animator;
pub(crate) mod prefill;
pub(crate) mod scheduler;
