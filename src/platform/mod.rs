//! Platform abstraction layer
//!
//! Browser plumbing that sits between DOM events and the simulation:
//! - Pointer position shared between event handlers and the frame callback
//! - Cancellable requestAnimationFrame loop (wasm32 only)

#[cfg(target_arch = "wasm32")]
mod frame_loop;

#[cfg(target_arch = "wasm32")]
pub use frame_loop::FrameLoop;

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

/// Latest pointer position in canvas pixels
///
/// Event handlers write, the frame callback reads once per tick. Last writer
/// wins; there is no queue.
#[derive(Debug, Clone, Default)]
pub struct PointerCell(Rc<Cell<Option<Vec2>>>);

impl PointerCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pos: Vec2) {
        self.0.set(Some(pos));
    }

    pub fn get(&self) -> Option<Vec2> {
        self.0.get()
    }

    pub fn clear(&self) {
        self.0.set(None);
    }
}

/// Convert client coordinates to canvas-local pixels
pub fn client_to_canvas(client: Vec2, canvas_origin: Vec2) -> Vec2 {
    client - canvas_origin
}
