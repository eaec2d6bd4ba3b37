//! Rendering module
//!
//! Canvas-style 2D drawing: the scene is emitted as `DrawCommand`s against
//! any `Surface` implementation.

pub mod scene;
pub mod shapes;
pub mod surface;

pub use scene::{RenderOptions, render};
pub use surface::{ColorStop, DrawCommand, Glow, Paint, RecordingSurface, Surface};
