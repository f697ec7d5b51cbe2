/// Browser-layer errors and their way back to JavaScript
use std::cell::RefCell;
use std::rc::Rc;

use cubegl_core::RenderError;
use log::error;
use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, WebError>;

/// Failures of the browser layer, including every core rendering error
#[derive(Error, Debug)]
pub enum WebError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("No browser window or document is available")]
    NoWindow,

    #[error("Canvas element `{0}` not found")]
    CanvasNotFound(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        WebError::Js(message)
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Forwards error messages to an optional JavaScript callback
///
/// Clones share the same callback, so a handler set after the animation loop
/// has started still receives its errors.
#[derive(Clone, Default)]
pub struct ErrorReporter {
    handler: Rc<RefCell<Option<js_sys::Function>>>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_handler(&self, handler: js_sys::Function) {
        *self.handler.borrow_mut() = Some(handler);
    }

    /// Call the handler with the error message, if one is set
    pub fn report(&self, err: &WebError) {
        if let Some(callback) = self.handler.borrow().as_ref() {
            let message = JsValue::from_str(&err.to_string());
            if let Err(js_err) = callback.call1(&JsValue::NULL, &message) {
                error!("error handler threw: {}", WebError::from(js_err));
            }
        }
    }

    /// Wrap a frame callback so its errors are reported before being returned
    pub fn wrap<F>(&self, mut frame: F) -> impl FnMut(f32) -> Result<()> + 'static
    where
        F: FnMut(f32) -> Result<()> + 'static,
    {
        let reporter = self.clone();
        move |delta_time| {
            let result = frame(delta_time);
            if let Err(err) = &result {
                reporter.report(err);
            }
            result
        }
    }
}
