use crate::foundation::core::{Canvas, Line, Rgba8};
use crate::foundation::error::{ConstellateError, ConstellateResult};
use crate::render::frame::FrameRGBA;
use crate::render::surface::{DrawSurface, StrokeStyle};

/// Raster [`DrawSurface`] powered by `vello_cpu`.
///
/// Drawing uses logical coordinates; the pixel buffer is `logical * pixel_ratio` and a scale
/// transform maps between them. Draw calls accumulate until [`CpuSurface::snapshot`].
pub struct CpuSurface {
    logical: Canvas,
    pixel_ratio: f64,
    physical: Canvas,
    background: Rgba8,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    pub fn new(logical: Canvas, pixel_ratio: f64, background: Rgba8) -> ConstellateResult<Self> {
        let pixel_ratio = sanitize_ratio(pixel_ratio);
        let physical = logical.scaled(pixel_ratio);
        let (w, h) = physical_dims(physical)?;
        let mut surface = Self {
            logical,
            pixel_ratio,
            physical,
            background,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        };
        surface.clear()?;
        Ok(surface)
    }

    pub fn logical_size(&self) -> Canvas {
        self.logical
    }

    pub fn physical_size(&self) -> Canvas {
        self.physical
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Reallocate the pixel buffer for a new logical size. Pending draw calls are dropped.
    pub fn resize(&mut self, logical: Canvas) -> ConstellateResult<()> {
        let physical = logical.scaled(self.pixel_ratio);
        let (w, h) = physical_dims(physical)?;
        self.logical = logical;
        self.physical = physical;
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        tracing::debug!(width = w, height = h, "surface resized");
        self.clear()
    }

    /// Rasterize everything drawn since the last clear.
    pub fn snapshot(&mut self) -> ConstellateResult<FrameRGBA> {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(FrameRGBA {
            width: self.physical.width,
            height: self.physical.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn stroke_pass(&mut self, path: &vello_cpu::kurbo::BezPath, width: f64, color: Rgba8, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 || width <= 0.0 {
            return;
        }
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.stroke_path(path);
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }
}

impl DrawSurface for CpuSurface {
    fn clear(&mut self) -> ConstellateResult<()> {
        self.ctx.reset();
        if self.background.a > 0 {
            let bg = self.background;
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.physical.width),
                f64::from(self.physical.height),
            ));
        }
        Ok(())
    }

    fn stroke_lines(&mut self, lines: &[Line], style: &StrokeStyle) -> ConstellateResult<()> {
        if lines.is_empty() {
            return Ok(());
        }
        if !style.width.is_finite() || style.width < 0.0 {
            return Err(ConstellateError::render(
                "stroke width must be finite and >= 0",
            ));
        }

        let path = lines_to_cpu_path(lines);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::scale(self.pixel_ratio));
        if let Some(glow) = style.glow {
            self.stroke_pass(
                &path,
                style.width + glow.width,
                glow.color,
                style.opacity * glow.strength,
            );
        }
        self.stroke_pass(&path, style.width, style.color, style.opacity);
        Ok(())
    }
}

fn sanitize_ratio(r: f64) -> f64 {
    if r.is_finite() && r > 0.0 { r } else { 1.0 }
}

fn physical_dims(physical: Canvas) -> ConstellateResult<(u16, u16)> {
    if physical.is_empty() {
        return Err(ConstellateError::render("surface size must be non-zero"));
    }
    let w: u16 = physical
        .width
        .try_into()
        .map_err(|_| ConstellateError::render("surface width exceeds u16"))?;
    let h: u16 = physical
        .height
        .try_into()
        .map_err(|_| ConstellateError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn lines_to_cpu_path(lines: &[Line]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for l in lines {
        out.move_to(vello_cpu::kurbo::Point::new(l.p0.x, l.p0.y));
        out.line_to(vello_cpu::kurbo::Point::new(l.p1.x, l.p1.y));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
