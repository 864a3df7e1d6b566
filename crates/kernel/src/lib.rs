//! # CSL kernel
//!
//! Front half of the CSL toolchain: canonicalize source text, parse it into a
//! [`Program`], build the validator's lattice bitmask and lower everything to
//! seven-opcode bytecode, which [`asm`] renders as a listing, binary records
//! or hex.
//!
//! ```text
//! source -> canonicalize -> parse_program -> compile -> to_assembly / to_bytes
//! ```

pub mod asm;
pub mod bitmask;
pub mod bytecode;
pub mod canon;
pub mod compiler;
pub mod error;
pub mod parser;
pub mod program;

pub use asm::{decode, decode_hex, to_assembly, to_bytes, to_bytes_strict, to_hex, RECORD_LEN};
pub use bytecode::{Bytecode, Instr, Opcode};
pub use canon::canonicalize;
pub use compiler::compile;
pub use error::{KernelError, KernelResult};
pub use parser::parse_program;
pub use program::{Program, PsiDecl, Step, ValDecl, ValKind};

/// Canonicalize, parse and compile raw CSL source.
pub fn compile_source(source: &str) -> KernelResult<Bytecode> {
    let program = parse_program(&canonicalize(source))?;
    compile(&program)
}
