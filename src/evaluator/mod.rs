pub mod builtins;
pub mod value;

use crate::error::{CslError, CslResult};
use crate::parser::ast::{Node, Op};
use builtins::{add, call_builtin, multiply};
use value::{Environment, Value};

/// Tree-walking evaluator over one shared, mutable environment.
///
/// `let` bindings are scoped by saving the previous binding, rebinding, and
/// restoring afterwards whether or not the body succeeded.
pub struct Evaluator {
  pub environment: Environment,
}

impl Default for Evaluator {
  fn default() -> Self {
    Self::new()
  }
}

impl Evaluator {
  pub fn new() -> Self {
    Self::with_environment(Environment::with_builtins())
  }

  pub fn with_environment(environment: Environment) -> Self {
    Self { environment }
  }

  pub fn eval(&mut self, node: &Node) -> CslResult<Value> {
    match node.op() {
      Op::Int => node
        .int_value()
        .map(Value::Int)
        .ok_or_else(|| CslError::runtime("INT node without a value")),

      Op::Var => {
        let name = node_name(node)?;
        self
          .environment
          .get(name)
          .cloned()
          .ok_or_else(|| CslError::unbound(name))
      }

      Op::Add => {
        let (left, right) = node.pair();
        let left_val = self.eval(left)?;
        let right_val = self.eval(right)?;
        add(&left_val, &right_val)
      }

      Op::Mul => {
        let (left, right) = node.pair();
        let left_val = self.eval(left)?;
        let right_val = self.eval(right)?;
        multiply(&left_val, &right_val)
      }

      Op::Apply => {
        let (callee, argument) = node.pair();
        let func = self.eval(callee)?;
        let arg = self.eval(argument)?;
        self.apply(func, arg)
      }

      Op::Let => {
        let name = node_name(node)?;
        let (value_node, body) = node.pair();
        let value = self.eval(value_node)?;

        let previous = self.environment.bind(name, value);
        let result = self.eval(body);
        self.environment.restore(name, previous);
        result
      }
    }
  }

  /// Apply a callable to exactly one argument.
  pub fn apply(&mut self, func: Value, arg: Value) -> CslResult<Value> {
    let Value::Function(mut callable) = func else {
      return Err(CslError::runtime(format!(
        "{} value is not callable",
        func.type_name()
      )));
    };

    callable.applied.push(arg);
    if callable.remaining() > 0 {
      return Ok(Value::Function(callable));
    }

    call_builtin(callable.name, &callable.applied)
  }
}

fn node_name(node: &Node) -> CslResult<&str> {
  node
    .name()
    .ok_or_else(|| CslError::runtime(format!("{} node without a name", node.op())))
}
