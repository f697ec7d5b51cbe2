/// WebGL2 backend for the core GL trait
use cubegl_core::{BufferTarget, GlContext, RenderError, ShaderStage};
use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlTexture, WebGlUniformLocation,
};

use crate::error::{Result, WebError};

// 0 is the default and what is used here
const TEXTURE_LEVEL: i32 = 0;

// Required to be 0 for textures
const TEXTURE_BORDER: i32 = 0;

/// A WebGL2 context together with the canvas it draws into
pub struct WebGlContext {
    gl: Gl,
    canvas: HtmlCanvasElement,
}

impl WebGlContext {
    /// Look up `canvas_id` in the document and obtain its WebGL2 context.
    pub fn from_canvas_id(canvas_id: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(WebError::NoWindow)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| WebError::CanvasNotFound(canvas_id.to_string()))?;

        Self::from_canvas(canvas)
    }

    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self> {
        let gl = canvas
            .get_context("webgl2")?
            .ok_or(RenderError::ContextUnavailable)?
            .dyn_into::<Gl>()
            .map_err(|_| RenderError::ContextUnavailable)?;

        Ok(Self { gl, canvas })
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => Gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => Gl::ELEMENT_ARRAY_BUFFER,
    }
}

fn upload_error(err: wasm_bindgen::JsValue) -> RenderError {
    RenderError::TextureUpload(WebError::from(err).to_string())
}

impl GlContext for WebGlContext {
    type Buffer = WebGlBuffer;
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Texture = WebGlTexture;
    type UniformLocation = WebGlUniformLocation;
    type Image = HtmlImageElement;

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        self.gl.create_buffer()
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<&WebGlBuffer>) {
        self.gl.bind_buffer(buffer_target(target), buffer);
    }

    fn buffer_data_f32(&self, target: BufferTarget, data: &[f32]) {
        let array = Float32Array::from(data);
        self.gl
            .buffer_data_with_array_buffer_view(buffer_target(target), &array, Gl::STATIC_DRAW);
    }

    fn buffer_data_u16(&self, target: BufferTarget, data: &[u16]) {
        let array = Uint16Array::from(data);
        self.gl
            .buffer_data_with_array_buffer_view(buffer_target(target), &array, Gl::STATIC_DRAW);
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        let kind = match stage {
            ShaderStage::Vertex => Gl::VERTEX_SHADER,
            ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
        };
        self.gl.create_shader(kind)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        self.gl.shader_source(shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        self.gl.compile_shader(shader);
    }

    fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
        self.gl
            .get_shader_parameter(shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.gl.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        self.gl.delete_shader(Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        self.gl.create_program()
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        self.gl.attach_shader(program, shader);
    }

    fn detach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        self.gl.detach_shader(program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        self.gl.link_program(program);
    }

    fn program_link_status(&self, program: &WebGlProgram) -> bool {
        self.gl
            .get_program_parameter(program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.gl.get_program_info_log(program)
    }

    fn delete_program(&self, program: &WebGlProgram) {
        self.gl.delete_program(Some(program));
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        self.gl.use_program(program);
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> i32 {
        self.gl.get_attrib_location(program, name)
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32) {
        self.gl
            .vertex_attrib_pointer_with_i32(location, components, Gl::FLOAT, false, 0, 0);
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.gl.enable_vertex_attrib_array(location);
    }

    fn uniform_matrix4(&self, location: &WebGlUniformLocation, matrix: &[f32]) {
        self.gl
            .uniform_matrix4fv_with_f32_array(Some(location), false, matrix);
    }

    fn uniform1i(&self, location: &WebGlUniformLocation, value: i32) {
        self.gl.uniform1i(Some(location), value);
    }

    fn create_texture(&self) -> Option<WebGlTexture> {
        self.gl.create_texture()
    }

    fn active_texture(&self, unit: u32) {
        self.gl.active_texture(Gl::TEXTURE0 + unit);
    }

    fn bind_texture(&self, texture: Option<&WebGlTexture>) {
        self.gl.bind_texture(Gl::TEXTURE_2D, texture);
    }

    fn tex_image_rgba(&self, width: i32, height: i32, pixels: &[u8]) -> cubegl_core::Result<()> {
        self.gl
            .tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
                Gl::TEXTURE_2D,
                TEXTURE_LEVEL,
                Gl::RGBA as i32,
                width,
                height,
                TEXTURE_BORDER,
                Gl::RGBA,
                Gl::UNSIGNED_BYTE,
                Some(pixels),
            )
            .map_err(upload_error)
    }

    fn tex_image_from(&self, image: &HtmlImageElement) -> cubegl_core::Result<()> {
        self.gl
            .tex_image_2d_with_u32_and_u32_and_html_image_element(
                Gl::TEXTURE_2D,
                TEXTURE_LEVEL,
                Gl::RGBA as i32,
                Gl::RGBA,
                Gl::UNSIGNED_BYTE,
                image,
            )
            .map_err(upload_error)
    }

    fn image_size(&self, image: &HtmlImageElement) -> (u32, u32) {
        (image.natural_width(), image.natural_height())
    }

    fn generate_mipmap(&self) {
        self.gl.generate_mipmap(Gl::TEXTURE_2D);
    }

    fn set_texture_clamp_linear(&self) {
        self.gl
            .tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, Gl::CLAMP_TO_EDGE as i32);
        self.gl
            .tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, Gl::CLAMP_TO_EDGE as i32);
        self.gl
            .tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, Gl::LINEAR as i32);
    }

    /// Client size of the canvas. The drawing buffer is resized to match
    /// whenever the element's layout size has changed.
    fn surface_size(&self) -> (u32, u32) {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        (width, height)
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        self.gl.clear_color(r, g, b, a);
    }

    fn clear_depth(&self, depth: f32) {
        self.gl.clear_depth(depth);
    }

    fn enable_depth_test(&self) {
        self.gl.enable(Gl::DEPTH_TEST);
        self.gl.depth_func(Gl::LEQUAL);
    }

    fn clear(&self, depth: bool) {
        let mut mask = Gl::COLOR_BUFFER_BIT;
        if depth {
            mask |= Gl::DEPTH_BUFFER_BIT;
        }
        self.gl.clear(mask);
    }

    fn draw_elements_u16(&self, count: i32) {
        self.gl
            .draw_elements_with_i32(Gl::TRIANGLES, count, Gl::UNSIGNED_SHORT, 0);
    }

    fn draw_arrays(&self, count: i32) {
        self.gl.draw_arrays(Gl::TRIANGLES, 0, count);
    }
}
