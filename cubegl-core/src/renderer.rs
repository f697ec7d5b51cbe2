/// Per-frame drawing of a single object
///
/// A [`FrameRenderer`] owns everything a frame needs: the linked program with
/// its locations, the geometry buffers (uploaded once, in [`FrameRenderer::new`]),
/// an optional texture and the spin clock. Each call to
/// [`FrameRenderer::render_frame`] resets the viewport from the current surface
/// size, computes the matrices, rebinds the buffers and issues one draw call.
use log::debug;
use nalgebra::Matrix4;

use crate::config::RendererConfig;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::gl::{self, BufferTarget, GlContext};
use crate::shader::ProgramInfo;
use crate::texture::{Texture, TextureSampling};
use crate::transform::{SpinClock, Transform, TransformState};

/// Matrices used for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub projection: Matrix4<f32>,
    pub model_view: Matrix4<f32>,
    pub normal: Matrix4<f32>,
}

/// GPU copies of the geometry attributes
struct GeometryBuffers<B> {
    position: B,
    color: Option<B>,
    texture_coord: Option<B>,
    normal: Option<B>,
    index: Option<B>,
    draw_count: i32,
}

impl<B> GeometryBuffers<B> {
    fn upload<G>(gl: &G, geometry: &Geometry) -> Result<Self>
    where
        G: GlContext<Buffer = B>,
    {
        let array = |data: &Option<Vec<f32>>| -> Result<Option<B>> {
            data.as_deref()
                .map(|data| gl::upload_f32(gl, BufferTarget::Array, data))
                .transpose()
        };

        let buffers = Self {
            position: gl::upload_f32(gl, BufferTarget::Array, &geometry.positions)?,
            color: array(&geometry.colors)?,
            texture_coord: array(&geometry.texture_coords)?,
            normal: array(&geometry.normals)?,
            index: geometry
                .indices
                .as_deref()
                .map(|indices| gl::upload_u16(gl, indices))
                .transpose()?,
            draw_count: geometry.draw_count() as i32,
        };
        debug!(
            "uploaded geometry buffers ({} vertices, {} drawn)",
            geometry.vertex_count(),
            buffers.draw_count
        );
        Ok(buffers)
    }
}

pub struct FrameRenderer<G: GlContext> {
    config: RendererConfig,
    program: ProgramInfo<G>,
    buffers: GeometryBuffers<G::Buffer>,
    texture: Option<Texture<G::Texture>>,
    spin: SpinClock,
}

impl<G: GlContext> FrameRenderer<G> {
    /// Upload `geometry` for `program`. Buffers are created here and never
    /// again for the lifetime of the renderer.
    pub fn new(gl: &G, program: ProgramInfo<G>, geometry: &Geometry, config: RendererConfig) -> Result<Self> {
        let buffers = GeometryBuffers::upload(gl, geometry)?;

        gl.clear_color(config.clear_color);
        gl.clear(false);

        Ok(Self {
            config,
            program,
            buffers,
            texture: None,
            spin: SpinClock::new(),
        })
    }

    /// Attach a texture showing the configured placeholder pixel until an
    /// image is swapped in with [`FrameRenderer::replace_texture_image`].
    pub fn with_placeholder_texture(mut self, gl: &G) -> Result<Self> {
        self.texture = Some(Texture::with_placeholder(gl, self.config.placeholder_pixel)?);
        Ok(self)
    }

    /// Swap a loaded image into the attached texture. Without a texture the
    /// image is ignored.
    pub fn replace_texture_image(&mut self, gl: &G, image: &G::Image) -> Result<Option<TextureSampling>> {
        self.texture
            .as_mut()
            .map(|texture| texture.replace_image(gl, image))
            .transpose()
    }

    pub fn texture(&self) -> Option<&Texture<G::Texture>> {
        self.texture.as_ref()
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RendererConfig {
        &mut self.config
    }

    pub fn spin(&self) -> &SpinClock {
        &self.spin
    }

    /// Compute the matrices for a frame without drawing it.
    pub fn frame_matrices(&self, state: &TransformState, width: u32, height: u32) -> FrameMatrices {
        let rotation = state.effective_rotation(&self.spin, &self.config.spin_rates);
        let model_view =
            Transform::model_view_matrix(self.config.camera_distance, state.scale, &rotation);

        FrameMatrices {
            projection: self.config.projection.matrix(width, height),
            model_view,
            normal: Transform::normal_matrix(&model_view),
        }
    }

    /// Draw one frame. `delta_time` is the number of seconds since the
    /// previous frame and advances the spin clock after drawing while
    /// `state.is_playing`.
    pub fn render_frame(&mut self, gl: &G, state: &TransformState, delta_time: f32) -> FrameMatrices {
        let (width, height) = gl.surface_size();
        gl.viewport(0, 0, width as i32, height as i32);

        gl.clear_color(self.config.clear_color);
        gl.clear_depth(1.0);
        gl.enable_depth_test();
        gl.clear(true);

        let matrices = self.frame_matrices(state, width, height);

        self.bind_attributes(gl);
        gl.use_program(Some(&self.program.program));

        let uniforms = &self.program.uniforms;
        if let Some(location) = &uniforms.projection_matrix {
            gl.uniform_matrix4(location, matrices.projection.as_slice());
        }
        if let Some(location) = &uniforms.model_view_matrix {
            gl.uniform_matrix4(location, matrices.model_view.as_slice());
        }
        if let Some(location) = &uniforms.normal_matrix {
            gl.uniform_matrix4(location, matrices.normal.as_slice());
        }

        if let Some(texture) = &self.texture {
            gl.active_texture(0);
            gl.bind_texture(Some(texture.handle()));
            if let Some(location) = &uniforms.sampler {
                gl.uniform1i(location, 0);
            }
        }

        match &self.buffers.index {
            Some(index) => {
                gl.bind_buffer(BufferTarget::ElementArray, Some(index));
                gl.draw_elements_u16(self.buffers.draw_count);
            }
            None => gl.draw_arrays(self.buffers.draw_count),
        }

        if state.is_playing {
            self.spin.advance(delta_time);
        }

        matrices
    }

    fn bind_attributes(&self, gl: &G) {
        let attributes = self.program.attributes;
        let buffers = &self.buffers;

        let slots = [
            (attributes.vertex_position, Some(&buffers.position), 3),
            (attributes.vertex_color, buffers.color.as_ref(), 4),
            (attributes.texture_coord, buffers.texture_coord.as_ref(), 2),
            (attributes.vertex_normal, buffers.normal.as_ref(), 3),
        ];
        for (location, buffer, components) in slots {
            if let (Some(location), Some(buffer)) = (location, buffer) {
                gl.bind_buffer(BufferTarget::Array, Some(buffer));
                gl.vertex_attrib_pointer_f32(location, components);
                gl.enable_vertex_attrib_array(location);
            }
        }
    }
}
