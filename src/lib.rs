//! Constellate renders a phrase as a constellation: every glyph becomes a cloud of sampled
//! points joined by short edges, and the glyphs reveal themselves one after another.
//!
//! The pipeline has two halves:
//!
//! - [`Sampler`] / [`sample_phrase`]: lay out the phrase, rasterize each glyph through a
//!   [`GlyphSource`], keep the opaque pixels as points and link nearby points.
//! - [`RevealEngine`]: map a frame timestamp to the set of glyphs, points and edges to draw on a
//!   [`DrawSurface`].
//!
//! [`Animator`] ties both to a [`FrameScheduler`]; [`render_phrase`] drives it offline into a
//! [`FrameSink`] (PNG sequence, MP4 via `ffmpeg`, or memory).
#![forbid(unsafe_code)]

mod config;
mod encode;
mod foundation;
mod host;
mod pipeline;
mod render;
mod reveal;
mod sample;
mod text;

pub use crate::config::AnimationConfig;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Line, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ConstellateError, ConstellateResult};
pub use crate::host::animator::{
    Animator, AnimatorOpts, ControlState, Readiness, TriggerOutcome,
};
pub use crate::host::prefill::{AutoStart, prefill_from_query, query_param, strip_wrapping_quotes};
pub use crate::host::scheduler::{FrameScheduler, FrameTicker, Refresh};
pub use crate::pipeline::{
    RenderPhraseOpts, RenderStats, render_frame_at, render_phrase, sample_with_config,
};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::{DrawSurface, Glow, RecordingSurface, StrokeBatch, StrokeStyle};
pub use crate::reveal::clock::AnimationClock;
pub use crate::reveal::draw::{
    GlyphDrawStats, RevealStyle, draw_glyph, glyph_lines, visible_count, visible_edges,
};
pub use crate::reveal::engine::{
    FrameOutcome, FrameReport, PhraseDrawStats, RevealEngine, RunId, draw_phrase,
};
pub use crate::reveal::schedule::{RevealSchedule, ScheduleState};
pub use crate::sample::graph::{Edge, GraphOpts, build_proximity_edges, shuffle_points};
pub use crate::sample::layout::{
    GlyphSlot, LayoutOpts, PhraseLayout, font_size_for, layout_phrase, split_words,
};
pub use crate::sample::sampler::{GlyphGraph, PhraseGraph, Sampler, SamplerOpts, sample_phrase};
pub use crate::text::GlyphSource;
pub use crate::text::block::BlockGlyphs;
pub use crate::text::mask::AlphaMask;
pub use crate::text::parley_font::{DEFAULT_FONT_WEIGHT, ParleyFont};
