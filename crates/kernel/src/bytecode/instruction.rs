//! Kernel instructions

use super::opcode::Opcode;
use num_bigint::BigUint;
use num_traits::Zero;

/// One instruction. Operands an opcode does not use stay zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Instr {
    pub op: Opcode,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub i: BigUint,
}

impl Instr {
    pub fn new(op: Opcode) -> Self {
        Self {
            op,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            i: BigUint::zero(),
        }
    }

    /// `INIT` carrying the field order in `i`.
    pub fn init_order(p: u32) -> Self {
        Self {
            i: BigUint::from(p),
            ..Self::new(Opcode::Init)
        }
    }

    /// `INIT` carrying the lattice dimension in `b`.
    pub fn init_dim(dim: u32) -> Self {
        Self {
            b: f64::from(dim),
            ..Self::new(Opcode::Init)
        }
    }

    pub fn vmask(mask: BigUint) -> Self {
        Self {
            i: mask,
            ..Self::new(Opcode::VMask)
        }
    }

    pub fn grad(a: f64, b: f64, eta: f64) -> Self {
        Self {
            a,
            b,
            c: eta,
            ..Self::new(Opcode::Grad)
        }
    }
}
