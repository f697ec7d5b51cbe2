/// Fire-and-forget image loading for textures
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::error::Result;

/// An image being fetched by the browser
///
/// The load callback only parks the decoded element; the render loop picks it
/// up with [`ImageRequest::take_loaded`] at the start of the next frame and
/// uploads it on the render thread.
pub struct ImageRequest {
    image: HtmlImageElement,
    loaded: Rc<RefCell<Option<HtmlImageElement>>>,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl ImageRequest {
    pub fn load(url: &str) -> Result<Self> {
        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some(""));

        let loaded = Rc::new(RefCell::new(None));

        let on_load = {
            let slot = loaded.clone();
            let image_ref = image.clone();
            let url = url.to_string();
            Closure::wrap(Box::new(move || {
                debug!("texture image {} loaded", url);
                *slot.borrow_mut() = Some(image_ref.clone());
            }) as Box<dyn FnMut()>)
        };
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));

        let on_error = {
            let url = url.to_string();
            Closure::wrap(Box::new(move || {
                warn!("failed to load texture image {}, keeping placeholder", url);
            }) as Box<dyn FnMut()>)
        };
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        image.set_src(url);

        Ok(Self {
            image,
            loaded,
            _on_load: on_load,
            _on_error: on_error,
        })
    }

    /// The decoded image, once, after it has finished loading
    pub fn take_loaded(&self) -> Option<HtmlImageElement> {
        self.loaded.borrow_mut().take()
    }
}

impl Drop for ImageRequest {
    fn drop(&mut self) {
        // The closures die with this struct; stop the browser from calling them
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}
