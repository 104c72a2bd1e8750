pub mod canvas;
pub mod compositor;

pub use canvas::{LuminanceMask, blend_over, blend_pixel};
pub use compositor::{Compositor, LinePlacement};
