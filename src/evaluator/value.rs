use super::builtins::BUILTINS;
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Int(i64),
  Float(f64),
  Function(Callable),
}

/// A curried builtin, possibly partially applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
  pub name: &'static str,
  pub arity: usize,
  pub applied: Vec<Value>,
}

impl Callable {
  pub fn new(name: &'static str, arity: usize) -> Self {
    Self {
      name,
      arity,
      applied: Vec::new(),
    }
  }

  pub fn remaining(&self) -> usize {
    self.arity - self.applied.len()
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Value::Int(n) => write!(f, "{}", n),
      Value::Float(n) => write!(f, "{:?}", n),
      Value::Function(callable) if callable.applied.is_empty() => {
        write!(f, "<builtin {}/{}>", callable.name, callable.arity)
      }
      Value::Function(callable) => write!(
        f,
        "<builtin {}/{} with {} applied>",
        callable.name,
        callable.arity,
        callable.applied.len()
      ),
    }
  }
}

impl Value {
  pub fn type_name(&self) -> &str {
    match self {
      Value::Int(_) => "Int",
      Value::Float(_) => "Float",
      Value::Function(_) => "Function",
    }
  }
}

/// The single mutable binding table an evaluation runs against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
  bindings: IndexMap<String, Value>,
}

impl Environment {
  pub fn new() -> Self {
    Self::default()
  }

  /// An environment with every builtin bound under its own name.
  pub fn with_builtins() -> Self {
    let mut env = Self::new();
    for builtin in BUILTINS {
      env.define(
        builtin.name.to_string(),
        Value::Function(Callable::new(builtin.name, builtin.arity)),
      );
    }
    env
  }

  pub fn define(&mut self, name: String, value: Value) {
    self.bindings.insert(name, value);
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.bindings.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.bindings.contains_key(name)
  }

  /// Rebind `name`, handing back whatever it was bound to before.
  pub fn bind(&mut self, name: &str, value: Value) -> Option<Value> {
    self.bindings.insert(name.to_string(), value)
  }

  /// Undo a [`bind`](Self::bind): reinstate the old value or drop the name.
  pub fn restore(&mut self, name: &str, previous: Option<Value>) {
    match previous {
      Some(value) => {
        self.bindings.insert(name.to_string(), value);
      }
      None => {
        self.bindings.shift_remove(name);
      }
    }
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.bindings.iter()
  }
}
