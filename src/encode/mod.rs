//! Frame sinks: offline consumers of rendered frames.

/// `ffmpeg`-based MP4 output via the system binary.
pub(crate) mod ffmpeg;
/// PNG file output.
pub(crate) mod png;
/// Sink trait and in-memory sink.
pub(crate) mod sink;
