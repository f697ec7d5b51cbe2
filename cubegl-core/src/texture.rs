/// 2D textures with an immediate placeholder and a deferred image swap
use log::debug;

use crate::error::Result;
use crate::gl::{self, GlContext};

/// How a freshly uploaded image is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSampling {
    /// Power-of-two image: full mipmap chain
    Mipmapped,
    /// Any other size: edge clamping and linear minification
    ClampLinear,
}

impl TextureSampling {
    pub fn for_size(width: u32, height: u32) -> Self {
        if width.is_power_of_two() && height.is_power_of_two() {
            TextureSampling::Mipmapped
        } else {
            TextureSampling::ClampLinear
        }
    }
}

/// A texture handle that is bindable from the moment it is created
pub struct Texture<T> {
    handle: T,
    width: u32,
    height: u32,
    loaded: bool,
}

impl<T> Texture<T> {
    /// Create the texture holding a single placeholder pixel.
    pub fn with_placeholder<G>(gl: &G, pixel: [u8; 4]) -> Result<Self>
    where
        G: GlContext<Texture = T>,
    {
        let handle = gl::create_texture(gl)?;
        gl.bind_texture(Some(&handle));
        gl.tex_image_rgba(1, 1, &pixel)?;

        Ok(Self {
            handle,
            width: 1,
            height: 1,
            loaded: false,
        })
    }

    /// Replace the pixel data with a decoded image, keeping the handle.
    pub fn replace_image<G>(&mut self, gl: &G, image: &G::Image) -> Result<TextureSampling>
    where
        G: GlContext<Texture = T>,
    {
        let (width, height) = gl.image_size(image);
        gl.bind_texture(Some(&self.handle));
        gl.tex_image_from(image)?;

        let sampling = TextureSampling::for_size(width, height);
        match sampling {
            TextureSampling::Mipmapped => gl.generate_mipmap(),
            TextureSampling::ClampLinear => gl.set_texture_clamp_linear(),
        }

        self.width = width;
        self.height = height;
        self.loaded = true;
        debug!("texture image swapped in ({}x{}, {:?})", width, height, sampling);
        Ok(sampling)
    }

    pub fn handle(&self) -> &T {
        &self.handle
    }

    /// Whether the real image has replaced the placeholder
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
