//! Opcode definitions for the kernel instruction set

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Init = 1,
    Seed = 2,
    VMask = 3,
    Grad = 4,
    Proj = 5,
    Metrics = 6,
    Halt = 7,
}

impl Opcode {
    pub const ALL: [Opcode; 7] = [
        Opcode::Init,
        Opcode::Seed,
        Opcode::VMask,
        Opcode::Grad,
        Opcode::Proj,
        Opcode::Metrics,
        Opcode::Halt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Init => "INIT",
            Opcode::Seed => "SEED",
            Opcode::VMask => "VMASK",
            Opcode::Grad => "GRAD",
            Opcode::Proj => "PROJ",
            Opcode::Metrics => "METRICS",
            Opcode::Halt => "HALT",
        }
    }

    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Opcode::Init),
            2 => Some(Opcode::Seed),
            3 => Some(Opcode::VMask),
            4 => Some(Opcode::Grad),
            5 => Some(Opcode::Proj),
            6 => Some(Opcode::Metrics),
            7 => Some(Opcode::Halt),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_byte_roundtrip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_u8(op.to_u8()), Some(op));
        }
    }

    #[test]
    fn test_unassigned_bytes() {
        assert_eq!(Opcode::from_u8(0), None);
        assert_eq!(Opcode::from_u8(8), None);
        assert_eq!(Opcode::from_u8(0xff), None);
    }
}
