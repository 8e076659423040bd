//! GPU rendering subsystem.
//!
//! One frame is three passes over an offscreen canvas sized to the drawable:
//! - `FillPass`: compute kernel writes the fill color to every pixel
//! - `encode_blit`: texture-to-texture copy of the preloaded image
//! - `PresentPass`: fullscreen triangle copies the canvas onto the drawable
//!
//! Convention: pixel coordinates are physical, top-left origin, +Y down.

mod blit;
mod canvas;
mod ctx;
mod dispatch;
mod fill;
mod present;

pub use blit::{blit_region, encode_blit, BlitRegion};
pub use canvas::{Canvas, CANVAS_FORMAT};
pub use ctx::{RenderCtx, RenderTarget};
pub use dispatch::{dispatch_size, WorkgroupSize};
pub use fill::FillPass;
pub use present::PresentPass;
