//! Container error types

use csl_lang::CslError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("invalid magic: expected {expected:?}")]
    InvalidMagic { expected: &'static str },

    #[error("unsupported container version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("container truncated: {0}")]
    Truncated(&'static str),

    #[error("invalid embedded file name {0:?}")]
    InvalidName(String),

    #[error("invalid expression tree: {0}")]
    InvalidNode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Source(#[from] CslError),
}

impl ContainerError {
    /// Errors caused by bytes that are not a container of the expected kind.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ContainerError::InvalidMagic { .. }
                | ContainerError::UnsupportedVersion { .. }
                | ContainerError::Truncated(_)
                | ContainerError::InvalidName(_)
                | ContainerError::InvalidNode(_)
        )
    }
}

pub type ContainerResult<T> = Result<T, ContainerError>;
