use super::value::Value;
use crate::error::{CslError, CslResult};

pub struct Builtin {
  pub name: &'static str,
  pub arity: usize,
}

pub const BUILTINS: &[Builtin] = &[
  Builtin { name: "add1", arity: 1 },
  Builtin { name: "double", arity: 1 },
  Builtin { name: "sub", arity: 2 },
  Builtin { name: "div", arity: 2 },
  Builtin { name: "floordiv", arity: 2 },
  Builtin { name: "mod", arity: 2 },
  Builtin { name: "pow", arity: 2 },
];

/// Run a builtin once all of its arguments have been applied.
pub fn call_builtin(name: &str, args: &[Value]) -> CslResult<Value> {
  match (name, args) {
    ("add1", [x]) => add(x, &Value::Int(1)),
    ("double", [x]) => multiply(x, &Value::Int(2)),
    ("sub", [a, b]) => subtract(a, b),
    ("div", [a, b]) => divide(a, b),
    ("floordiv", [a, b]) => floor_divide(a, b),
    ("mod", [a, b]) => modulo(a, b),
    ("pow", [a, b]) => power(a, b),
    _ => Err(CslError::runtime(format!(
      "builtin '{}' cannot take {} argument(s)",
      name,
      args.len()
    ))),
  }
}

fn as_float(value: &Value) -> f64 {
  match value {
    Value::Int(n) => *n as f64,
    Value::Float(f) => *f,
    Value::Function(_) => f64::NAN,
  }
}

fn operand_error(op: &str, a: &Value, b: &Value) -> CslError {
  CslError::runtime(format!(
    "unsupported operand types for {}: {} and {}",
    op,
    a.type_name(),
    b.type_name()
  ))
}

fn overflow(op: &str) -> CslError {
  CslError::runtime(format!("integer overflow in {}", op))
}

pub fn add(a: &Value, b: &Value) -> CslResult<Value> {
  match (a, b) {
    (Value::Int(x), Value::Int(y)) => x.checked_add(*y).map(Value::Int).ok_or_else(|| overflow("+")),
    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
      Ok(Value::Float(as_float(a) + as_float(b)))
    }
    _ => Err(operand_error("+", a, b)),
  }
}

pub fn multiply(a: &Value, b: &Value) -> CslResult<Value> {
  match (a, b) {
    (Value::Int(x), Value::Int(y)) => x.checked_mul(*y).map(Value::Int).ok_or_else(|| overflow("*")),
    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
      Ok(Value::Float(as_float(a) * as_float(b)))
    }
    _ => Err(operand_error("*", a, b)),
  }
}

fn subtract(a: &Value, b: &Value) -> CslResult<Value> {
  match (a, b) {
    (Value::Int(x), Value::Int(y)) => x.checked_sub(*y).map(Value::Int).ok_or_else(|| overflow("-")),
    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
      Ok(Value::Float(as_float(a) - as_float(b)))
    }
    _ => Err(operand_error("-", a, b)),
  }
}

fn divide(a: &Value, b: &Value) -> CslResult<Value> {
  match (a, b) {
    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
      let divisor = as_float(b);
      if divisor == 0.0 {
        return Err(CslError::runtime("division by zero"));
      }
      Ok(Value::Float(as_float(a) / divisor))
    }
    _ => Err(operand_error("/", a, b)),
  }
}

// Integer division and remainder round toward negative infinity.
fn floor_divide(a: &Value, b: &Value) -> CslResult<Value> {
  match (a, b) {
    (Value::Int(_), Value::Int(0)) => Err(CslError::runtime("integer division by zero")),
    (Value::Int(x), Value::Int(y)) => {
      let quotient = x.checked_div(*y).ok_or_else(|| overflow("//"))?;
      if x % y != 0 && ((*x < 0) != (*y < 0)) {
        Ok(Value::Int(quotient - 1))
      } else {
        Ok(Value::Int(quotient))
      }
    }
    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
      let divisor = as_float(b);
      if divisor == 0.0 {
        return Err(CslError::runtime("float floor division by zero"));
      }
      Ok(Value::Float((as_float(a) / divisor).floor()))
    }
    _ => Err(operand_error("//", a, b)),
  }
}

fn modulo(a: &Value, b: &Value) -> CslResult<Value> {
  match (a, b) {
    (Value::Int(_), Value::Int(0)) => Err(CslError::runtime("integer modulo by zero")),
    (Value::Int(x), Value::Int(y)) => {
      let remainder = x.checked_rem(*y).ok_or_else(|| overflow("%"))?;
      if remainder != 0 && ((remainder < 0) != (*y < 0)) {
        Ok(Value::Int(remainder + y))
      } else {
        Ok(Value::Int(remainder))
      }
    }
    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
      let divisor = as_float(b);
      if divisor == 0.0 {
        return Err(CslError::runtime("float modulo by zero"));
      }
      let dividend = as_float(a);
      Ok(Value::Float(dividend - divisor * (dividend / divisor).floor()))
    }
    _ => Err(operand_error("%", a, b)),
  }
}

fn power(a: &Value, b: &Value) -> CslResult<Value> {
  match (a, b) {
    (Value::Int(base), Value::Int(exp)) if *exp >= 0 => {
      let exp = u32::try_from(*exp).map_err(|_| overflow("**"))?;
      base.checked_pow(exp).map(Value::Int).ok_or_else(|| overflow("**"))
    }
    (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
      Ok(Value::Float(as_float(a).powf(as_float(b))))
    }
    _ => Err(operand_error("**", a, b)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn floor_division_rounds_down() {
    assert_eq!(call_builtin("floordiv", &[Value::Int(-7), Value::Int(2)]).unwrap(), Value::Int(-4));
    assert_eq!(call_builtin("floordiv", &[Value::Int(7), Value::Int(2)]).unwrap(), Value::Int(3));
  }

  #[test]
  fn modulo_follows_divisor_sign() {
    assert_eq!(call_builtin("mod", &[Value::Int(-7), Value::Int(3)]).unwrap(), Value::Int(2));
    assert_eq!(call_builtin("mod", &[Value::Int(7), Value::Int(-3)]).unwrap(), Value::Int(-2));
  }

  #[test]
  fn negative_exponent_yields_float() {
    assert_eq!(call_builtin("pow", &[Value::Int(2), Value::Int(-1)]).unwrap(), Value::Float(0.5));
  }

  #[test]
  fn division_by_zero_is_fatal() {
    assert!(call_builtin("div", &[Value::Int(1), Value::Int(0)]).is_err());
    assert!(call_builtin("floordiv", &[Value::Int(1), Value::Int(0)]).is_err());
  }
}
