//! Kernel error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("program too short: expected a field declaration and a validator line, found {found} line(s)")]
    ProgramTooShort { found: usize },

    #[error("line {line}: missing '::' declaration separator in `{text}`")]
    MissingDeclSeparator { line: usize, text: String },

    #[error("line {line}: expected field layout f<p>^<dim>, got `{layout}`")]
    MissingFieldPrefix { line: usize, layout: String },

    #[error("line {line}: expected caret (^) in field layout, got `{layout}`")]
    MissingCaret { line: usize, layout: String },

    #[error("line {line}: invalid number `{value}` in field layout `{layout}`")]
    InvalidFieldNumber {
        line: usize,
        layout: String,
        value: String,
    },

    #[error("line {line}: validator must look like `{{ x in f3^3 : x1 = 0 }}`, got `{text}`")]
    MissingValidator { line: usize, text: String },

    #[error("line {line}: could not parse validator, expected `x<k> = <c>` in `{region}`")]
    InvalidValidator { line: usize, region: String },

    #[error("validator axis x{axis} is outside a lattice of dimension {dim}")]
    AxisOutOfRange { axis: usize, dim: u32 },

    #[error("lattice f{p}^{dim} has more than 2^64 points")]
    LatticeTooLarge { p: u32, dim: u32 },

    #[error("instruction {index}: mask of {bits} bits does not fit the 64-bit record field")]
    MaskTooWide { index: usize, bits: u64 },

    #[error("truncated bytecode record at byte {offset}: {remaining} byte(s) left, record is {expected}")]
    TruncatedRecord {
        offset: usize,
        remaining: usize,
        expected: usize,
    },

    #[error("unknown opcode {opcode} at byte {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("invalid bytecode hex: {0}")]
    InvalidHex(String),
}

impl KernelError {
    /// Errors caused by malformed CSL source rather than by encoding limits.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            KernelError::ProgramTooShort { .. }
                | KernelError::MissingDeclSeparator { .. }
                | KernelError::MissingFieldPrefix { .. }
                | KernelError::MissingCaret { .. }
                | KernelError::InvalidFieldNumber { .. }
                | KernelError::MissingValidator { .. }
                | KernelError::InvalidValidator { .. }
                | KernelError::AxisOutOfRange { .. }
        )
    }
}

pub type KernelResult<T> = Result<T, KernelError>;
