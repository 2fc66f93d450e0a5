use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::host::animator::AnimatorOpts;
use crate::reveal::draw::RevealStyle;
use crate::sample::sampler::SamplerOpts;

/// Everything that shapes an animation, loadable from JSON. Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Logical drawing size.
    pub canvas: Canvas,
    /// Device pixel ratio; the output is `canvas * pixel_ratio` pixels.
    pub pixel_ratio: f64,
    pub fps: Fps,
    /// Time for the whole phrase to reveal.
    pub duration_ms: f64,
    /// Pause between a trigger and the first frame.
    pub settle_delay_ms: f64,
    /// Wait before a prefilled phrase starts on its own.
    pub auto_start_delay_ms: f64,
    /// How long the finished frame is held at the end of an offline render.
    pub hold_ms: f64,
    pub background: Rgba8,
    /// Fixed shuffle seed; `None` gives a different point order each run.
    pub seed: Option<u64>,
    pub sampler: SamplerOpts,
    pub style: RevealStyle,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(1280, 720),
            pixel_ratio: 1.0,
            fps: Fps::default(),
            duration_ms: 10_000.0,
            settle_delay_ms: 100.0,
            auto_start_delay_ms: 500.0,
            hold_ms: 1_000.0,
            background: Rgba8::rgb(0, 0, 0),
            seed: None,
            sampler: SamplerOpts::default(),
            style: RevealStyle::default(),
        }
    }
}

impl AnimationConfig {
    pub fn from_json_str(s: &str) -> ConstellateResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| ConstellateError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> ConstellateResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json(&self) -> ConstellateResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConstellateError::serde(e.to_string()))
    }

    pub fn validate(&self) -> ConstellateResult<()> {
        if self.canvas.is_empty() {
            return Err(ConstellateError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(ConstellateError::validation("pixel_ratio must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(ConstellateError::validation("duration_ms must be > 0"));
        }
        for (name, v) in [
            ("settle_delay_ms", self.settle_delay_ms),
            ("auto_start_delay_ms", self.auto_start_delay_ms),
            ("hold_ms", self.hold_ms),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ConstellateError::validation(format!("{name} must be >= 0")));
            }
        }
        self.sampler.validate()?;
        self.style.validate()
    }

    pub fn physical_canvas(&self) -> Canvas {
        self.canvas.scaled(self.pixel_ratio)
    }

    pub fn animator_opts(&self) -> AnimatorOpts {
        AnimatorOpts {
            canvas: self.canvas,
            duration_ms: self.duration_ms,
            settle_delay_ms: self.settle_delay_ms,
            sampler: self.sampler,
            style: self.style,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
