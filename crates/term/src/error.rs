//! Renderer error type.

use std::fmt;

use thiserror::Error;

/// Errors produced while rendering a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A sampler returned a draw string that is not exactly one character.
    ///
    /// This is a caller bug, not a transient failure.
    #[error("draw string at ({x}, {y}) must be a single character, got {len}")]
    DrawLength { x: u16, y: u16, len: usize },

    /// Writing into the output buffer failed.
    #[error("failed to format escape sequence")]
    Format(#[from] fmt::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
