/// Error types for the rendering pipeline
///
/// Every variant is terminal for the current render attempt. Callers surface
/// the error (in the browser, by throwing it to JavaScript) instead of retrying.
use std::fmt;

use thiserror::Error;

use crate::gl::ShaderStage;

/// Result alias used across the core crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Kind of GPU object whose creation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Buffer,
    Shader,
    Program,
    Texture,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Buffer => "buffer",
            ResourceKind::Shader => "shader",
            ResourceKind::Program => "program",
            ResourceKind::Texture => "texture",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    /// No WebGL context could be obtained from the surface.
    #[error("Unable to initialize WebGL. Your browser or machine may not support it.")]
    ContextUnavailable,

    /// The context refused to allocate an object (exhaustion or context loss).
    #[error("Failed to create {0}.")]
    ResourceCreation(ResourceKind),

    #[error("An error occurred compiling the {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Unable to initialize the shader program: {log}")]
    ProgramLink { log: String },

    /// Pixel data was rejected by the texture upload call.
    #[error("Failed to upload texture data: {0}")]
    TextureUpload(String),

    /// The animation driver was cancelled and cannot be restarted.
    #[error("Animation loop was cancelled and cannot be restarted")]
    AnimationCancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_names_kind() {
        let err = RenderError::ResourceCreation(ResourceKind::Texture);
        assert_eq!(err.to_string(), "Failed to create texture.");
    }

    #[test]
    fn test_compile_error_carries_stage_and_log() {
        let err = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "ERROR: 0:3: syntax error".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fragment"));
        assert!(message.contains("syntax error"));
    }
}
