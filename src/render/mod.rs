//! Drawing: the scene onto a [`Surface`], the pixel canvas, and the
//! terminal layout around it.

pub mod canvas;
pub mod renderer;
pub mod scene;
pub mod surface;

pub use canvas::PixelCanvas;
pub use renderer::{Renderer, RESTART_LABEL};
pub use scene::{segment_opacity, SceneRenderer};
pub use surface::{Rgba, Surface};
