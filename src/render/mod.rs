//! Drawing surfaces.
//!
//! The reveal engine only strokes line segments and clears; [`DrawSurface`](surface::DrawSurface)
//! covers exactly that.
//! [`CpuSurface`](cpu::CpuSurface) rasterizes with `vello_cpu`; [`RecordingSurface`](surface::RecordingSurface)
//! keeps the commands for inspection.

pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod surface;
