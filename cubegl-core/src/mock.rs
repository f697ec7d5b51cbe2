/// Recording GL context for unit tests
///
/// Handles are plain integers. Shaders "compile" when their source declares
/// `void main` and has balanced braces, which is enough to exercise the
/// failure paths without a driver.
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use crate::error::{RenderError, ResourceKind, Result};
use crate::gl::{BufferTarget, GlContext, ShaderStage};

/// Attribute names in the order the mock assigns locations.
const ATTRIBUTE_SLOTS: [&str; 4] = [
    "aVertexPosition",
    "aVertexColor",
    "aTextureCoord",
    "aVertexNormal",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockImage {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Elements(i32),
    Arrays(i32),
}

#[derive(Default)]
pub struct MockGl {
    next_id: Cell<u32>,
    pub fail_create: Cell<Option<ResourceKind>>,
    pub fail_link: Cell<bool>,
    pub buffers_created: Cell<usize>,
    bound_buffers: RefCell<HashMap<u8, u32>>,
    buffer_lengths: RefCell<HashMap<u32, usize>>,
    shader_sources: RefCell<HashMap<u32, String>>,
    compiled: RefCell<HashMap<u32, bool>>,
    live_shaders: RefCell<HashSet<u32>>,
    live_programs: RefCell<HashSet<u32>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    linked: RefCell<HashMap<u32, bool>>,
    pub current_program: Cell<Option<u32>>,
    pub enabled_attributes: RefCell<HashSet<u32>>,
    pub uniforms: RefCell<HashMap<String, Vec<f32>>>,
    pub int_uniforms: RefCell<HashMap<String, i32>>,
    pub bound_texture: Cell<Option<u32>>,
    pub active_unit: Cell<Option<u32>>,
    pub texture_uploads: RefCell<Vec<(u32, u32, u32)>>,
    pub mipmaps: Cell<usize>,
    pub clamps: Cell<usize>,
    pub surface: Cell<(u32, u32)>,
    pub viewports: RefCell<Vec<(i32, i32, i32, i32)>>,
    pub clear_colors: RefCell<Vec<[f32; 4]>>,
    pub depth_test: Cell<bool>,
    pub clears: Cell<usize>,
    pub draws: RefCell<Vec<Draw>>,
}

impl MockGl {
    pub fn new() -> Self {
        let gl = Self::default();
        gl.surface.set((640, 480));
        gl
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn fails(&self, kind: ResourceKind) -> bool {
        self.fail_create.get() == Some(kind)
    }

    pub fn buffer_len(&self, buffer: u32) -> Option<usize> {
        self.buffer_lengths.borrow().get(&buffer).copied()
    }

    pub fn live_shader_count(&self) -> usize {
        self.live_shaders.borrow().len()
    }

    pub fn live_program_count(&self) -> usize {
        self.live_programs.borrow().len()
    }

    pub fn uniform(&self, name: &str) -> Option<Vec<f32>> {
        self.uniforms.borrow().get(name).cloned()
    }

    fn record_buffer_data(&self, target: BufferTarget, len: usize) {
        let bound = self.bound_buffers.borrow().get(&target_key(target)).copied();
        if let Some(buffer) = bound {
            self.buffer_lengths.borrow_mut().insert(buffer, len);
        }
    }

    fn program_source_contains(&self, program: u32, name: &str) -> bool {
        let attached = self.attached.borrow();
        let sources = self.shader_sources.borrow();
        attached
            .get(&program)
            .map(|shaders| {
                shaders
                    .iter()
                    .filter_map(|shader| sources.get(shader))
                    .any(|source| source.contains(name))
            })
            .unwrap_or(false)
    }
}

fn target_key(target: BufferTarget) -> u8 {
    match target {
        BufferTarget::Array => 0,
        BufferTarget::ElementArray => 1,
    }
}

fn source_compiles(source: &str) -> bool {
    let opens = source.matches('{').count();
    let closes = source.matches('}').count();
    source.contains("void main") && opens == closes
}

impl GlContext for MockGl {
    type Buffer = u32;
    type Shader = u32;
    type Program = u32;
    type Texture = u32;
    type UniformLocation = String;
    type Image = MockImage;

    fn create_buffer(&self) -> Option<u32> {
        if self.fails(ResourceKind::Buffer) {
            return None;
        }
        self.buffers_created.set(self.buffers_created.get() + 1);
        Some(self.next())
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<&u32>) {
        let mut bound = self.bound_buffers.borrow_mut();
        match buffer {
            Some(buffer) => bound.insert(target_key(target), *buffer),
            None => bound.remove(&target_key(target)),
        };
    }

    fn buffer_data_f32(&self, target: BufferTarget, data: &[f32]) {
        self.record_buffer_data(target, data.len());
    }

    fn buffer_data_u16(&self, target: BufferTarget, data: &[u16]) {
        self.record_buffer_data(target, data.len());
    }

    fn create_shader(&self, _stage: ShaderStage) -> Option<u32> {
        if self.fails(ResourceKind::Shader) {
            return None;
        }
        let id = self.next();
        self.live_shaders.borrow_mut().insert(id);
        Some(id)
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        self.shader_sources
            .borrow_mut()
            .insert(*shader, source.to_string());
    }

    fn compile_shader(&self, shader: &u32) {
        let ok = self
            .shader_sources
            .borrow()
            .get(shader)
            .map(|source| source_compiles(source))
            .unwrap_or(false);
        self.compiled.borrow_mut().insert(*shader, ok);
    }

    fn shader_compile_status(&self, shader: &u32) -> bool {
        self.compiled.borrow().get(shader).copied().unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &u32) -> Option<String> {
        if self.shader_compile_status(shader) {
            Some(String::new())
        } else {
            Some("ERROR: 0:1: syntax error".to_string())
        }
    }

    fn delete_shader(&self, shader: &u32) {
        self.live_shaders.borrow_mut().remove(shader);
    }

    fn create_program(&self) -> Option<u32> {
        if self.fails(ResourceKind::Program) {
            return None;
        }
        let id = self.next();
        self.live_programs.borrow_mut().insert(id);
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        self.attached
            .borrow_mut()
            .entry(*program)
            .or_default()
            .push(*shader);
    }

    fn detach_shader(&self, _program: &u32, _shader: &u32) {
        // Sources stay readable so location lookups keep working after link.
    }

    fn link_program(&self, program: &u32) {
        let ok = !self.fail_link.get() && {
            let attached = self.attached.borrow();
            let compiled = self.compiled.borrow();
            attached
                .get(program)
                .map(|shaders| {
                    shaders.len() == 2
                        && shaders
                            .iter()
                            .all(|shader| compiled.get(shader).copied().unwrap_or(false))
                })
                .unwrap_or(false)
        };
        self.linked.borrow_mut().insert(*program, ok);
    }

    fn program_link_status(&self, program: &u32) -> bool {
        self.linked.borrow().get(program).copied().unwrap_or(false)
    }

    fn program_info_log(&self, program: &u32) -> Option<String> {
        if self.program_link_status(program) {
            Some(String::new())
        } else {
            Some("error: varying vNormal not written by vertex shader".to_string())
        }
    }

    fn delete_program(&self, program: &u32) {
        self.live_programs.borrow_mut().remove(program);
    }

    fn use_program(&self, program: Option<&u32>) {
        self.current_program.set(program.copied());
    }

    fn attrib_location(&self, program: &u32, name: &str) -> i32 {
        if !self.program_source_contains(*program, name) {
            return -1;
        }
        ATTRIBUTE_SLOTS
            .iter()
            .position(|slot| *slot == name)
            .map(|index| index as i32)
            .unwrap_or(-1)
    }

    fn uniform_location(&self, program: &u32, name: &str) -> Option<String> {
        self.program_source_contains(*program, name)
            .then(|| name.to_string())
    }

    fn vertex_attrib_pointer_f32(&self, _location: u32, _components: i32) {}

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.enabled_attributes.borrow_mut().insert(location);
    }

    fn uniform_matrix4(&self, location: &String, matrix: &[f32]) {
        self.uniforms
            .borrow_mut()
            .insert(location.clone(), matrix.to_vec());
    }

    fn uniform1i(&self, location: &String, value: i32) {
        self.int_uniforms.borrow_mut().insert(location.clone(), value);
    }

    fn create_texture(&self) -> Option<u32> {
        if self.fails(ResourceKind::Texture) {
            return None;
        }
        Some(self.next())
    }

    fn active_texture(&self, unit: u32) {
        self.active_unit.set(Some(unit));
    }

    fn bind_texture(&self, texture: Option<&u32>) {
        self.bound_texture.set(texture.copied());
    }

    fn tex_image_rgba(&self, width: i32, height: i32, pixels: &[u8]) -> Result<()> {
        if pixels.len() != (width * height * 4) as usize {
            return Err(RenderError::TextureUpload("pixel data size mismatch".into()));
        }
        let texture = self.bound_texture.get().unwrap_or(0);
        self.texture_uploads
            .borrow_mut()
            .push((texture, width as u32, height as u32));
        Ok(())
    }

    fn tex_image_from(&self, image: &MockImage) -> Result<()> {
        let texture = self.bound_texture.get().unwrap_or(0);
        self.texture_uploads
            .borrow_mut()
            .push((texture, image.width, image.height));
        Ok(())
    }

    fn image_size(&self, image: &MockImage) -> (u32, u32) {
        (image.width, image.height)
    }

    fn generate_mipmap(&self) {
        self.mipmaps.set(self.mipmaps.get() + 1);
    }

    fn set_texture_clamp_linear(&self) {
        self.clamps.set(self.clamps.get() + 1);
    }

    fn surface_size(&self) -> (u32, u32) {
        self.surface.get()
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.viewports.borrow_mut().push((x, y, width, height));
    }

    fn clear_color(&self, rgba: [f32; 4]) {
        self.clear_colors.borrow_mut().push(rgba);
    }

    fn clear_depth(&self, _depth: f32) {}

    fn enable_depth_test(&self) {
        self.depth_test.set(true);
    }

    fn clear(&self, _depth: bool) {
        self.clears.set(self.clears.get() + 1);
    }

    fn draw_elements_u16(&self, count: i32) {
        self.draws.borrow_mut().push(Draw::Elements(count));
    }

    fn draw_arrays(&self, count: i32) {
        self.draws.borrow_mut().push(Draw::Arrays(count));
    }
}
