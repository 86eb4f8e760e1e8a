//! WebGPU rendering module
//!
//! The scene is a flat list of coloured quads in pixel space; the pipeline
//! maps them to NDC and draws one triangle list per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use sprites::SpriteKind;
pub use vertex::Vertex;
