//! # Collapse expressions
//!
//! A tiny integer language (`+`, `*`, curried calls, `let NAME -> EXPR in EXPR`)
//! whose syntax tree is content-addressed: every node carries an identifier
//! derived from its structure. Trees built here are what the container crate
//! packs into `CSLX` envelopes.

pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use error::{CslError, CslResult, ErrorKind};
pub use evaluator::Evaluator;
pub use evaluator::value::{Environment, Value};
pub use parser::ast::{Meta, MetaValue, Node, Op};

use lexer::Lexer;
use parser::Parser;

/// Tokenize and parse `source` into a tree.
pub fn compile(source: &str) -> CslResult<Node> {
  let tokens = Lexer::new(source).tokenize()?;
  Parser::new(tokens).parse()
}

/// Compile `source` and evaluate it against `environment`.
pub fn run_with(source: &str, environment: Environment) -> CslResult<(Value, Node)> {
  let node = compile(source)?;
  tracing::debug!(
    root = %node.op(),
    collapse_id = node.content_id(),
    nodes = node.size(),
    "expression compiled"
  );
  let value = Evaluator::with_environment(environment).eval(&node)?;
  Ok((value, node))
}

/// Compile and evaluate `source` with the builtin environment.
pub fn run(source: &str) -> CslResult<(Value, Node)> {
  run_with(source, Environment::with_builtins())
}
