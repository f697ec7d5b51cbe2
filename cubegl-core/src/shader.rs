/// Shader program building and the attribute/uniform naming contract
///
/// [`build_program`] compiles and links a vertex/fragment pair and returns the
/// bare program. [`ProgramInfo`] pairs that program with the locations the
/// renderer looks up by name, resolved once after linking.
use log::{info, warn};

use crate::error::{RenderError, Result};
use crate::gl::{self, GlContext, ShaderStage};

pub const A_VERTEX_POSITION: &str = "aVertexPosition";
pub const A_VERTEX_COLOR: &str = "aVertexColor";
pub const A_TEXTURE_COORD: &str = "aTextureCoord";
pub const A_VERTEX_NORMAL: &str = "aVertexNormal";

pub const U_PROJECTION_MATRIX: &str = "uProjectionMatrix";
pub const U_MODEL_VIEW_MATRIX: &str = "uModelViewMatrix";
pub const U_NORMAL_MATRIX: &str = "uNormalMatrix";
pub const U_SAMPLER: &str = "uSampler";

/// Vertex and fragment source text for one program
#[derive(Debug, Clone, Copy)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderSources {
    /// Textured Blinn-Phong shading with a single directional light.
    pub const BLINN_PHONG: ShaderSources = ShaderSources {
        vertex: include_str!("shaders/blinn_phong.vert"),
        fragment: include_str!("shaders/blinn_phong.frag"),
    };

    /// Unlit per-vertex color.
    pub const FLAT_COLOR: ShaderSources = ShaderSources {
        vertex: include_str!("shaders/flat_color.vert"),
        fragment: include_str!("shaders/flat_color.frag"),
    };
}

/// Compile a single stage. A failed shader is deleted before the error
/// is returned.
pub fn compile_shader<G: GlContext>(gl: &G, stage: ShaderStage, source: &str) -> Result<G::Shader> {
    let shader = gl::create_shader(gl, stage)?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl.shader_compile_status(&shader) {
        let log = gl.shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(&shader);
        warn!("{} shader failed to compile: {}", stage, log);
        return Err(RenderError::ShaderCompile { stage, log });
    }

    Ok(shader)
}

/// Compile both stages and link them into a program.
///
/// Nothing is left allocated on failure. On success the shader objects are
/// detached and deleted; the linked program does not need them.
pub fn build_program<G: GlContext>(
    gl: &G,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<G::Program> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(&vertex);
            return Err(err);
        }
    };

    let program = match gl::create_program(gl) {
        Ok(program) => program,
        Err(err) => {
            gl.delete_shader(&vertex);
            gl.delete_shader(&fragment);
            return Err(err);
        }
    };

    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);
    let linked = gl.program_link_status(&program);

    let log = if linked {
        None
    } else {
        Some(gl.program_info_log(&program).unwrap_or_default())
    };

    gl.detach_shader(&program, &vertex);
    gl.detach_shader(&program, &fragment);
    gl.delete_shader(&vertex);
    gl.delete_shader(&fragment);

    if let Some(log) = log {
        gl.delete_program(&program);
        warn!("shader program failed to link: {}", log);
        return Err(RenderError::ProgramLink { log });
    }

    info!("shader program linked");
    Ok(program)
}

/// Attribute slots; `None` when the program does not use the attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeLocations {
    pub vertex_position: Option<u32>,
    pub vertex_color: Option<u32>,
    pub texture_coord: Option<u32>,
    pub vertex_normal: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct UniformLocations<U> {
    pub projection_matrix: Option<U>,
    pub model_view_matrix: Option<U>,
    pub normal_matrix: Option<U>,
    pub sampler: Option<U>,
}

/// A linked program and its cached input locations
pub struct ProgramInfo<G: GlContext> {
    pub program: G::Program,
    pub attributes: AttributeLocations,
    pub uniforms: UniformLocations<G::UniformLocation>,
}

impl<G: GlContext> ProgramInfo<G> {
    /// Build a program from `sources` and resolve its locations.
    pub fn build(gl: &G, sources: &ShaderSources) -> Result<Self> {
        let program = build_program(gl, sources.vertex, sources.fragment)?;
        Ok(Self::new(gl, program))
    }

    /// Resolve the named inputs of an already linked program.
    pub fn new(gl: &G, program: G::Program) -> Self {
        let attrib = |name: &str| u32::try_from(gl.attrib_location(&program, name)).ok();

        let attributes = AttributeLocations {
            vertex_position: attrib(A_VERTEX_POSITION),
            vertex_color: attrib(A_VERTEX_COLOR),
            texture_coord: attrib(A_TEXTURE_COORD),
            vertex_normal: attrib(A_VERTEX_NORMAL),
        };
        let uniforms = UniformLocations {
            projection_matrix: gl.uniform_location(&program, U_PROJECTION_MATRIX),
            model_view_matrix: gl.uniform_location(&program, U_MODEL_VIEW_MATRIX),
            normal_matrix: gl.uniform_location(&program, U_NORMAL_MATRIX),
            sampler: gl.uniform_location(&program, U_SAMPLER),
        };

        Self {
            program,
            attributes,
            uniforms,
        }
    }
}
