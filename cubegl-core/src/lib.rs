/// CubeGL Core Library - Backend-agnostic rendering pipeline
///
/// This library provides the rendering core for the rotating textured cube:
/// shader program building, static geometry, transformation and projection
/// matrices, the frame renderer and the animation driver. GPU access goes
/// through the [`GlContext`] trait so the pipeline runs against WebGL in the
/// browser and against a recording context in tests.

pub mod animation;
pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod gl;
pub mod projection;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod transform;

#[cfg(test)]
pub(crate) mod mock;

// Re-export commonly used types
pub use animation::{AnimationDriver, AnimationState, FrameClock};
pub use config::RendererConfig;
pub use controls::TransformControls;
pub use error::{RenderError, ResourceKind, Result};
pub use geometry::Geometry;
pub use gl::{BufferTarget, GlContext, ShaderStage};
pub use projection::Projection;
pub use renderer::{FrameMatrices, FrameRenderer};
pub use shader::{build_program, ProgramInfo, ShaderSources};
pub use texture::{Texture, TextureSampling};
pub use transform::{RotationState, SpinClock, Transform, TransformState};
