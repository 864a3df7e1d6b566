//! Typed form of a parsed CSL program.

use std::fmt;

/// Field layout `f<p>^<dim>`: a lattice of `p^dim` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsiDecl {
    pub p: u32,
    pub dim: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValKind {
    /// Accept tuples whose coordinate at `axis` equals a constant.
    XEqConst,
}

impl ValKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValKind::XEqConst => "x_eq_const",
        }
    }
}

/// Validator declaration. `axis` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValDecl {
    pub kind: ValKind,
    pub axis: usize,
    pub constant: i64,
}

impl ValDecl {
    pub fn x_eq_const(axis: usize, constant: i64) -> Self {
        Self {
            kind: ValKind::XEqConst,
            axis,
            constant,
        }
    }

    pub fn accepts(&self, coords: &[u32]) -> bool {
        match self.kind {
            ValKind::XEqConst => coords
                .get(self.axis)
                .is_some_and(|&c| i64::from(c) == self.constant),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Grad,
    Project,
    /// Goal with its lower and upper acceptance thresholds.
    Goal { low: f64, high: f64 },
}

pub const GOAL_THRESHOLDS: (f64, f64) = (0.01, 0.99);

impl Step {
    pub fn goal() -> Self {
        Step::Goal {
            low: GOAL_THRESHOLDS.0,
            high: GOAL_THRESHOLDS.1,
        }
    }

    pub fn op(&self) -> &'static str {
        match self {
            Step::Grad => "grad",
            Step::Project => "project",
            Step::Goal { .. } => "goal",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Goal { low, high } => write!(f, "goal({}, {})", low, high),
            other => f.write_str(other.op()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub psi: PsiDecl,
    pub val: ValDecl,
    pub steps: Vec<Step>,
}
