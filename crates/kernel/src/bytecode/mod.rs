//! Kernel bytecode: seven opcodes with three float operands and one
//! arbitrary-precision integer operand.

pub mod instruction;
pub mod opcode;

pub use instruction::Instr;
pub use opcode::Opcode;

/// Compiled instruction sequence, in emission order.
pub type Bytecode = Vec<Instr>;
