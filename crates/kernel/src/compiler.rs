//! Lowers a [`Program`] to kernel bytecode.

use crate::bitmask::{build_mask, lattice_size};
use crate::bytecode::{Bytecode, Instr, Opcode};
use crate::error::{KernelError, KernelResult};
use crate::program::{Program, Step};
use tracing::debug;

/// Gradient step operands: `a`, `b` and the learning rate `eta` in `c`.
pub const GRAD_OPERANDS: (f64, f64, f64) = (1.0, 1.0, 0.1);

pub fn compile(program: &Program) -> KernelResult<Bytecode> {
    let psi = program.psi;
    let val = program.val;

    if val.axis >= psi.dim as usize {
        return Err(KernelError::AxisOutOfRange {
            axis: val.axis + 1,
            dim: psi.dim,
        });
    }
    let points = lattice_size(psi.p, psi.dim)?;

    let mut code = vec![
        Instr::init_order(psi.p),
        Instr::init_dim(psi.dim),
        Instr::new(Opcode::Seed),
    ];

    let mask = build_mask(psi.dim, psi.p, |coords| val.accepts(coords));
    debug!(
        p = psi.p,
        dim = psi.dim,
        points,
        validator = val.kind.name(),
        set_bits = mask.count_ones(),
        "validator mask built"
    );
    code.push(Instr::vmask(mask));

    for step in &program.steps {
        match step {
            Step::Grad => {
                let (a, b, eta) = GRAD_OPERANDS;
                code.push(Instr::grad(a, b, eta));
            }
            Step::Project => code.push(Instr::new(Opcode::Proj)),
            Step::Goal { .. } => {
                code.push(Instr::new(Opcode::Metrics));
                code.push(Instr::new(Opcode::Halt));
            }
        }
    }

    for (index, instr) in code.iter().enumerate() {
        debug!(index, op = %instr.op, "emit");
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{PsiDecl, ValDecl};

    fn program(p: u32, dim: u32, axis: usize, constant: i64, steps: Vec<Step>) -> Program {
        Program {
            psi: PsiDecl { p, dim },
            val: ValDecl::x_eq_const(axis, constant),
            steps,
        }
    }

    #[test]
    fn test_prologue_layout() {
        let code = compile(&program(3, 3, 0, 0, vec![])).unwrap();
        let ops: Vec<Opcode> = code.iter().map(|i| i.op).collect();
        assert_eq!(ops, vec![Opcode::Init, Opcode::Init, Opcode::Seed, Opcode::VMask]);
        assert_eq!(code[0].i, 3u32.into());
        assert_eq!(code[1].b, 3.0);
    }

    #[test]
    fn test_goal_emits_metrics_then_halt() {
        let code = compile(&program(2, 2, 1, 1, vec![Step::goal(), Step::Grad])).unwrap();
        let ops: Vec<Opcode> = code[4..].iter().map(|i| i.op).collect();
        assert_eq!(ops, vec![Opcode::Metrics, Opcode::Halt, Opcode::Grad]);
        assert_eq!(code[6].c, 0.1);
    }

    #[test]
    fn test_axis_beyond_dimension() {
        let err = compile(&program(3, 2, 2, 0, vec![])).unwrap_err();
        assert_eq!(err, KernelError::AxisOutOfRange { axis: 3, dim: 2 });
        assert!(err.is_format_error());
    }

    #[test]
    fn test_unreachable_constant_gives_empty_mask() {
        let code = compile(&program(3, 2, 0, 7, vec![])).unwrap();
        assert_eq!(code[3].i, 0u32.into());
    }
}
