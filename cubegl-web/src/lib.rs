/// CubeGL Web - WASM-based WebGL2 renderer
///
/// Exposes [`WebRenderer`] to JavaScript. A renderer owns the WebGL context,
/// the frame renderer and the transform controls; the page wires its sliders
/// and play/pause button to the setters and surfaces thrown errors through
/// its own error display.
use std::cell::RefCell;
use std::rc::Rc;

use cubegl_core::{
    FrameRenderer, Geometry, ProgramInfo, RenderError, RendererConfig, ShaderSources,
    TransformControls,
};
use log::info;
use wasm_bindgen::prelude::*;

pub mod animation;
pub mod context;
pub mod error;
pub mod image;

pub use animation::AnimationLoop;
pub use context::WebGlContext;
pub use error::{ErrorReporter, Result, WebError};
pub use image::ImageRequest;

/// Everything one frame touches
struct Scene {
    gl: WebGlContext,
    renderer: FrameRenderer<WebGlContext>,
    controls: TransformControls,
    image: Option<ImageRequest>,
}

impl Scene {
    fn new(canvas_id: &str, sources: &ShaderSources, geometry: &Geometry) -> Result<Self> {
        let gl = WebGlContext::from_canvas_id(canvas_id)?;
        let program = ProgramInfo::build(&gl, sources)?;
        let renderer = FrameRenderer::new(&gl, program, geometry, RendererConfig::default())?;

        Ok(Self {
            gl,
            renderer,
            controls: TransformControls::new(),
            image: None,
        })
    }

    fn draw(&mut self, delta_time: f32) -> Result<()> {
        if let Some(image) = self.image.as_ref().and_then(ImageRequest::take_loaded) {
            self.renderer.replace_texture_image(&self.gl, &image)?;
        }
        let state = *self.controls.state();
        self.renderer.render_frame(&self.gl, &state, delta_time);
        Ok(())
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    scene: Rc<RefCell<Scene>>,
    on_error: ErrorReporter,
    animation: Option<AnimationLoop>,
}

impl WebRenderer {
    fn from_scene(scene: Scene) -> Self {
        Self {
            scene: Rc::new(RefCell::new(scene)),
            on_error: ErrorReporter::new(),
            animation: None,
        }
    }
}

#[wasm_bindgen]
impl WebRenderer {
    /// Textured, Blinn-Phong shaded cube. The texture shows a placeholder
    /// color until `texture_url` has loaded.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, texture_url: &str) -> std::result::Result<WebRenderer, JsValue> {
        let mut scene = Scene::new(canvas_id, &ShaderSources::BLINN_PHONG, &Geometry::cube())?;
        scene.renderer = scene
            .renderer
            .with_placeholder_texture(&scene.gl)
            .map_err(WebError::from)?;
        scene.image = Some(ImageRequest::load(texture_url)?);

        info!("textured cube renderer ready on #{}", canvas_id);
        Ok(Self::from_scene(scene))
    }

    /// Cube with one solid color per face.
    #[wasm_bindgen(js_name = coloredCube)]
    pub fn colored_cube(canvas_id: &str) -> std::result::Result<WebRenderer, JsValue> {
        let scene = Scene::new(canvas_id, &ShaderSources::FLAT_COLOR, &Geometry::colored_cube())?;
        Ok(Self::from_scene(scene))
    }

    /// Flat-colored triangle.
    #[wasm_bindgen(js_name = flatTriangle)]
    pub fn flat_triangle(canvas_id: &str) -> std::result::Result<WebRenderer, JsValue> {
        let scene = Scene::new(canvas_id, &ShaderSources::FLAT_COLOR, &Geometry::triangle())?;
        Ok(Self::from_scene(scene))
    }

    /// Start the animation loop. Starting a running loop does nothing;
    /// a stopped loop cannot be restarted.
    pub fn start(&mut self) -> std::result::Result<(), JsValue> {
        if let Some(animation) = &self.animation {
            if animation.is_running() {
                return Ok(());
            }
            return Err(WebError::from(RenderError::AnimationCancelled).into());
        }

        let scene = self.scene.clone();
        // The scene borrow ends before the error handler runs
        let frame = self
            .on_error
            .wrap(move |delta_time| scene.borrow_mut().draw(delta_time));
        let animation = AnimationLoop::start(frame)?;
        self.animation = Some(animation);
        Ok(())
    }

    /// Cancel the pending animation frame for good.
    pub fn stop(&mut self) {
        if let Some(animation) = &self.animation {
            animation.stop();
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation
            .as_ref()
            .map(AnimationLoop::is_running)
            .unwrap_or(false)
    }

    /// Whether the texture image has replaced the placeholder color.
    #[wasm_bindgen(js_name = textureLoaded)]
    pub fn texture_loaded(&self) -> bool {
        self.scene
            .borrow()
            .renderer
            .texture()
            .is_some_and(|texture| texture.is_loaded())
    }

    /// Draw a single frame without advancing the spin clock.
    pub fn render(&mut self) -> std::result::Result<(), JsValue> {
        self.scene.borrow_mut().draw(0.0)?;
        Ok(())
    }

    /// Called with the error message when a frame fails.
    #[wasm_bindgen(js_name = setErrorHandler)]
    pub fn set_error_handler(&mut self, handler: js_sys::Function) {
        self.on_error.set_handler(handler);
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&mut self, value: f32) {
        self.scene.borrow_mut().controls.set_scale(value);
    }

    #[wasm_bindgen(js_name = setRotationX)]
    pub fn set_rotation_x(&mut self, value: f32) {
        self.scene.borrow_mut().controls.set_rotation_x(value);
    }

    #[wasm_bindgen(js_name = setRotationY)]
    pub fn set_rotation_y(&mut self, value: f32) {
        self.scene.borrow_mut().controls.set_rotation_y(value);
    }

    #[wasm_bindgen(js_name = setRotationZ)]
    pub fn set_rotation_z(&mut self, value: f32) {
        self.scene.borrow_mut().controls.set_rotation_z(value);
    }

    #[wasm_bindgen(js_name = setPlaying)]
    pub fn set_playing(&mut self, playing: bool) {
        self.scene.borrow_mut().controls.set_playing(playing);
    }

    /// Flip play/pause and return whether the animation now plays.
    #[wasm_bindgen(js_name = togglePlaying)]
    pub fn toggle_playing(&mut self) -> bool {
        self.scene.borrow_mut().controls.toggle_playing()
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.scene.borrow().controls.state().is_playing
    }

    /// Whether the rotation sliders should be shown as disabled.
    #[wasm_bindgen(js_name = rotationLocked)]
    pub fn rotation_locked(&self) -> bool {
        self.scene.borrow().controls.rotation_locked()
    }

    #[wasm_bindgen(js_name = setClearColor)]
    pub fn set_clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.scene.borrow_mut().renderer.config_mut().clear_color = [r, g, b, a];
    }

    #[wasm_bindgen(js_name = setCameraDistance)]
    pub fn set_camera_distance(&mut self, distance: f32) {
        self.scene
            .borrow_mut()
            .renderer
            .config_mut()
            .set_camera_distance(distance);
    }
}

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    Ok(())
}
