//! Error types for the gizmo overlay.

use std::fmt;
use thiserror::Error;

/// Shader pipeline stage a compile error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// The gizmo program could not be built. Fatal for the overlay session.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{stage} stage of shader '{label}' failed to compile: {message}")]
pub struct ShaderCompileError {
    pub label: String,
    pub stage: ShaderStage,
    pub message: String,
}

/// Overlay error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    #[error("3D viewport not found, cannot show gizmos")]
    NoViewport,
    #[error(transparent)]
    ShaderCompile(#[from] ShaderCompileError),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
