//! Content-addressed expression tree.
//!
//! Every [`Node`] carries an identifier derived from its canonical JSON form
//! (`{"args":[...],"meta":{...},"op":"..."}` with sorted keys and no
//! whitespace, children fully expanded). Two trees with the same structure
//! always share an identifier, wherever and whenever they were built.

use crate::error::{CslError, CslResult, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json, json};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Number of hex digits kept from the SHA-256 digest.
pub const CONTENT_ID_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Op {
  Int,
  Var,
  Add,
  Mul,
  Apply,
  Let,
}

impl Op {
  pub fn name(&self) -> &'static str {
    match self {
      Op::Int => "INT",
      Op::Var => "VAR",
      Op::Add => "ADD",
      Op::Mul => "MUL",
      Op::Apply => "APPLY",
      Op::Let => "LET",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "INT" => Some(Op::Int),
      "VAR" => Some(Op::Var),
      "ADD" => Some(Op::Add),
      "MUL" => Some(Op::Mul),
      "APPLY" => Some(Op::Apply),
      "LET" => Some(Op::Let),
      _ => None,
    }
  }

  fn arity(&self) -> usize {
    match self {
      Op::Int | Op::Var => 0,
      Op::Add | Op::Mul | Op::Apply | Op::Let => 2,
    }
  }
}

impl fmt::Display for Op {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
  Int(i64),
  Text(String),
}

pub type Meta = BTreeMap<String, MetaValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
  op: Op,
  args: Vec<Node>,
  meta: Meta,
  content_id: String,
}

impl Node {
  /// Build a node, checking that the operator's arity and metadata are present.
  pub fn try_new(op: Op, args: Vec<Node>, meta: Meta) -> CslResult<Self> {
    if args.len() != op.arity() {
      return Err(shape_error(format!(
        "{} expects {} children, found {}",
        op,
        op.arity(),
        args.len()
      )));
    }

    match op {
      Op::Int => {
        if !matches!(meta.get("value"), Some(MetaValue::Int(_))) {
          return Err(shape_error("INT node requires an integer 'value'"));
        }
      }
      Op::Var | Op::Let => {
        if !matches!(meta.get("name"), Some(MetaValue::Text(_))) {
          return Err(shape_error(format!("{} node requires a string 'name'", op)));
        }
      }
      Op::Add | Op::Mul | Op::Apply => {}
    }

    Ok(Self::build(op, args, meta))
  }

  fn build(op: Op, args: Vec<Node>, meta: Meta) -> Self {
    let mut node = Self {
      op,
      args,
      meta,
      content_id: String::new(),
    };
    let digest = Sha256::digest(node.to_canonical().as_bytes());
    node.content_id = hex::encode(digest)[..CONTENT_ID_LEN].to_string();
    node
  }

  pub fn int(value: i64) -> Self {
    let meta = BTreeMap::from([("value".to_string(), MetaValue::Int(value))]);
    Self::build(Op::Int, Vec::new(), meta)
  }

  pub fn var(name: impl Into<String>) -> Self {
    Self::build(Op::Var, Vec::new(), name_meta(name))
  }

  pub fn add(left: Node, right: Node) -> Self {
    Self::build(Op::Add, vec![left, right], Meta::new())
  }

  pub fn mul(left: Node, right: Node) -> Self {
    Self::build(Op::Mul, vec![left, right], Meta::new())
  }

  pub fn apply(callee: Node, argument: Node) -> Self {
    Self::build(Op::Apply, vec![callee, argument], Meta::new())
  }

  pub fn let_in(name: impl Into<String>, value: Node, body: Node) -> Self {
    Self::build(Op::Let, vec![value, body], name_meta(name))
  }

  pub fn op(&self) -> Op {
    self.op
  }

  pub fn args(&self) -> &[Node] {
    &self.args
  }

  pub fn meta(&self) -> &Meta {
    &self.meta
  }

  pub fn content_id(&self) -> &str {
    &self.content_id
  }

  /// Literal value of an `INT` node.
  pub fn int_value(&self) -> Option<i64> {
    match self.meta.get("value") {
      Some(MetaValue::Int(value)) => Some(*value),
      _ => None,
    }
  }

  /// Bound or referenced name of a `VAR` or `LET` node.
  pub fn name(&self) -> Option<&str> {
    match self.meta.get("name") {
      Some(MetaValue::Text(name)) => Some(name),
      _ => None,
    }
  }

  /// Both children of a binary node (`ADD`, `MUL`, `APPLY`, `LET`).
  pub fn pair(&self) -> (&Node, &Node) {
    (&self.args[0], &self.args[1])
  }

  pub fn to_json(&self) -> Json {
    let meta: Map<String, Json> = self
      .meta
      .iter()
      .map(|(key, value)| {
        let value = match value {
          MetaValue::Int(n) => json!(n),
          MetaValue::Text(s) => json!(s),
        };
        (key.clone(), value)
      })
      .collect();

    json!({
      "op": self.op.name(),
      "args": self.args.iter().map(Node::to_json).collect::<Vec<_>>(),
      "meta": meta,
    })
  }

  /// Compact JSON with sorted keys; the input to the content identifier.
  ///
  /// Strings are written as raw UTF-8, never `\u` escaped. Source text only
  /// yields ASCII names, so this matters only for nodes built by hand or read
  /// from JSON.
  pub fn to_canonical(&self) -> String {
    self.to_json().to_string()
  }

  /// Rebuild a tree from its JSON form. `args` and `meta` may be omitted.
  pub fn from_json(value: &Json) -> CslResult<Self> {
    let object = value
      .as_object()
      .ok_or_else(|| shape_error("node must be a JSON object"))?;

    let op_name = object
      .get("op")
      .and_then(Json::as_str)
      .ok_or_else(|| shape_error("node is missing 'op'"))?;
    let op = Op::from_name(op_name)
      .ok_or_else(|| shape_error(format!("unknown operator '{}'", op_name)))?;

    let args = match object.get("args") {
      None => Vec::new(),
      Some(Json::Array(items)) => items
        .iter()
        .map(Node::from_json)
        .collect::<CslResult<Vec<_>>>()?,
      Some(_) => return Err(shape_error("'args' must be an array")),
    };

    let meta = match object.get("meta") {
      None => Meta::new(),
      Some(Json::Object(entries)) => {
        let mut meta = Meta::new();
        for (key, value) in entries {
          let value = match value {
            Json::String(s) => MetaValue::Text(s.clone()),
            Json::Number(n) => MetaValue::Int(
              n.as_i64()
                .ok_or_else(|| shape_error(format!("meta '{}' is not a 64-bit integer", key)))?,
            ),
            _ => return Err(shape_error(format!("unsupported meta value for '{}'", key))),
          };
          meta.insert(key.clone(), value);
        }
        meta
      }
      Some(_) => return Err(shape_error("'meta' must be an object")),
    };

    Node::try_new(op, args, meta)
  }

  /// Number of nodes in the tree, this one included.
  pub fn size(&self) -> usize {
    1 + self.args.iter().map(Node::size).sum::<usize>()
  }
}

fn name_meta(name: impl Into<String>) -> Meta {
  BTreeMap::from([("name".to_string(), MetaValue::Text(name.into()))])
}

fn shape_error(message: impl Into<String>) -> CslError {
  CslError::new(ErrorKind::Parse, message, 0, 0)
}
