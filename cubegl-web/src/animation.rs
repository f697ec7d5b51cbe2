/// `requestAnimationFrame` loop around the core animation driver
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use cubegl_core::AnimationDriver;
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{Result, WebError};

type FrameCallback = Closure<dyn FnMut(f64)>;

struct LoopState {
    driver: RefCell<AnimationDriver>,
    request_id: Cell<Option<i32>>,
    callback: RefCell<Option<FrameCallback>>,
}

impl LoopState {
    fn schedule(&self) -> Result<()> {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.request_id.set(Some(id));
        Ok(())
    }

    fn cancel(&self) {
        let mut driver = self.driver.borrow_mut();
        if driver.is_running() {
            info!("animation stopped after {} frames", driver.frames());
        }
        driver.cancel();
        if let (Some(id), Some(window)) = (self.request_id.take(), web_sys::window()) {
            if let Err(err) = window.cancel_animation_frame(id) {
                error!("failed to cancel animation frame: {}", WebError::from(err));
            }
        }
    }
}

/// A running animation loop
///
/// Each callback asks the driver for the frame's delta time, draws, then
/// requests the next frame. Stopping (or dropping the handle) cancels the
/// pending callback; a stopped loop never runs again.
pub struct AnimationLoop {
    state: Rc<LoopState>,
}

impl AnimationLoop {
    /// Start calling `frame` with the seconds elapsed since the previous
    /// frame. An error from `frame` stops the loop.
    pub fn start<F>(mut frame: F) -> Result<Self>
    where
        F: FnMut(f32) -> Result<()> + 'static,
    {
        let mut driver = AnimationDriver::new();
        driver.start()?;

        let state = Rc::new(LoopState {
            driver: RefCell::new(driver),
            request_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        // The callback only holds a weak reference so dropping the handle
        // frees the loop.
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let callback = Closure::wrap(Box::new(move |now: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.request_id.set(None);

            let Some(delta) = state.driver.borrow_mut().begin_frame(now) else {
                return;
            };
            if let Err(err) = frame(delta) {
                error!("frame failed, stopping animation: {}", err);
                state.cancel();
                return;
            }
            if let Err(err) = state.schedule() {
                error!("failed to schedule next frame: {}", err);
                state.cancel();
            }
        }) as Box<dyn FnMut(f64)>);

        *state.callback.borrow_mut() = Some(callback);
        state.schedule()?;

        Ok(Self { state })
    }

    pub fn stop(&self) {
        self.state.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.state.driver.borrow().is_running()
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
