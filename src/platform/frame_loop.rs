//! requestAnimationFrame loop with teardown

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct Inner {
    callback: RefCell<Option<FrameCallback>>,
    handle: Cell<Option<i32>>,
}

impl Inner {
    fn schedule(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return false;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.handle.set(Some(handle));
                true
            }
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                false
            }
        }
    }

    fn stop(&self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
        // Breaks the closure's reference back to us
        let _ = self.callback.borrow_mut().take();
    }
}

/// Handle to a running frame loop
///
/// `step` runs once per animation frame with the browser timestamp and
/// returns `false` to end the loop.
#[derive(Clone)]
pub struct FrameLoop {
    inner: Rc<Inner>,
}

impl FrameLoop {
    pub fn start<F>(mut step: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let inner = Rc::new(Inner {
            callback: RefCell::new(None),
            handle: Cell::new(None),
        });

        let looped = inner.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            looped.handle.set(None);
            if !step(time) || !looped.schedule() {
                log::info!("Frame loop stopped");
                looped.stop();
            }
        });
        *inner.callback.borrow_mut() = Some(callback);

        if !inner.schedule() {
            inner.stop();
        }

        Self { inner }
    }

    /// Cancel the pending frame and release the callback
    pub fn stop(&self) {
        self.inner.stop();
    }
}
