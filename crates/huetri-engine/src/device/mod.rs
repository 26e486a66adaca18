//! GPU device + surface management.
//!
//! [`Gpu`] owns the wgpu Instance/Adapter/Device/Queue and the window surface,
//! and hands out one [`GpuFrame`] per redraw.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
