/// Abstraction over the WebGL calls used by the pipeline, plus the
/// fail-fast resource helpers built on top of it.
use std::fmt;

use crate::error::{RenderError, ResourceKind, Result};

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Binding point for buffer objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// Vertex attribute data (`ARRAY_BUFFER`)
    Array,
    /// Index data (`ELEMENT_ARRAY_BUFFER`)
    ElementArray,
}

/// The subset of a WebGL2 rendering context the renderer needs.
///
/// Object handles are associated types so a backend can use its native
/// handle types. All calls happen on the thread that owns the context.
/// Texture calls always target `TEXTURE_2D`; buffer uploads use
/// `STATIC_DRAW`.
pub trait GlContext {
    type Buffer;
    type Shader;
    type Program;
    type Texture;
    type UniformLocation;
    /// Decoded image that can be uploaded into a texture.
    type Image;

    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<&Self::Buffer>);
    fn buffer_data_f32(&self, target: BufferTarget, data: &[f32]);
    fn buffer_data_u16(&self, target: BufferTarget, data: &[u16]);

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn detach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn program_link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn delete_program(&self, program: &Self::Program);
    fn use_program(&self, program: Option<&Self::Program>);

    /// Location of a named attribute, `-1` when the program has none.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> i32;
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// Describe the bound `ARRAY_BUFFER` as tightly packed `FLOAT` components.
    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32);
    fn enable_vertex_attrib_array(&self, location: u32);
    /// Upload a column-major 4x4 matrix (`transpose = false`).
    fn uniform_matrix4(&self, location: &Self::UniformLocation, matrix: &[f32]);
    fn uniform1i(&self, location: &Self::UniformLocation, value: i32);

    fn create_texture(&self) -> Option<Self::Texture>;
    /// Select texture unit `TEXTURE0 + unit`.
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, texture: Option<&Self::Texture>);
    /// Upload RGBA/UNSIGNED_BYTE pixels at mip level 0.
    fn tex_image_rgba(&self, width: i32, height: i32, pixels: &[u8]) -> Result<()>;
    /// Upload a decoded image as RGBA/UNSIGNED_BYTE at mip level 0.
    fn tex_image_from(&self, image: &Self::Image) -> Result<()>;
    fn image_size(&self, image: &Self::Image) -> (u32, u32);
    fn generate_mipmap(&self);
    /// `CLAMP_TO_EDGE` on both axes and `LINEAR` minification.
    fn set_texture_clamp_linear(&self);

    /// Current pixel size of the drawing surface. Read every frame.
    fn surface_size(&self) -> (u32, u32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, rgba: [f32; 4]);
    fn clear_depth(&self, depth: f32);
    /// Enable depth testing with `LEQUAL` comparison.
    fn enable_depth_test(&self);
    /// Clear the color buffer, and the depth buffer when `depth` is set.
    fn clear(&self, depth: bool);

    /// Indexed `TRIANGLES` draw over `UNSIGNED_SHORT` indices.
    fn draw_elements_u16(&self, count: i32);
    /// Non-indexed `TRIANGLES` draw.
    fn draw_arrays(&self, count: i32);
}

pub fn create_buffer<G: GlContext>(gl: &G) -> Result<G::Buffer> {
    gl.create_buffer()
        .ok_or(RenderError::ResourceCreation(ResourceKind::Buffer))
}

pub fn create_shader<G: GlContext>(gl: &G, stage: ShaderStage) -> Result<G::Shader> {
    gl.create_shader(stage)
        .ok_or(RenderError::ResourceCreation(ResourceKind::Shader))
}

pub fn create_program<G: GlContext>(gl: &G) -> Result<G::Program> {
    gl.create_program()
        .ok_or(RenderError::ResourceCreation(ResourceKind::Program))
}

pub fn create_texture<G: GlContext>(gl: &G) -> Result<G::Texture> {
    gl.create_texture()
        .ok_or(RenderError::ResourceCreation(ResourceKind::Texture))
}

/// Create a `STATIC_DRAW` float buffer holding `data`.
pub fn upload_f32<G: GlContext>(gl: &G, target: BufferTarget, data: &[f32]) -> Result<G::Buffer> {
    let buffer = create_buffer(gl)?;
    gl.bind_buffer(target, Some(&buffer));
    gl.buffer_data_f32(target, data);
    Ok(buffer)
}

/// Create a `STATIC_DRAW` index buffer holding `data`.
pub fn upload_u16<G: GlContext>(gl: &G, data: &[u16]) -> Result<G::Buffer> {
    let buffer = create_buffer(gl)?;
    gl.bind_buffer(BufferTarget::ElementArray, Some(&buffer));
    gl.buffer_data_u16(BufferTarget::ElementArray, data);
    Ok(buffer)
}
