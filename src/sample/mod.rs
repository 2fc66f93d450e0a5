//! Text-to-point-cloud sampling.
//!
//! `text -> PhraseLayout -> per-glyph alpha masks -> shuffled points -> proximity edges`.

pub(crate) mod graph;
pub(crate) mod layout;
pub(crate) mod sampler;
