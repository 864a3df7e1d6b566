//! Line-oriented scripts that fold into a single expression tree.
//!
//! ```text
//! # comment
//! base = 5
//! scaled = double(base)
//! scaled + 1
//! ```
//!
//! The last statement is the result; an assignment there yields its own
//! name. Earlier assignments wrap the result in `LET`s, outermost first.
//! Earlier bare expressions have no effect on the tree.

use csl_lang::lexer::Lexer;
use csl_lang::lexer::token::TokenType;
use csl_lang::{CslError, CslResult, ErrorKind, Node, compile};
use tracing::trace;

pub const COMMENT_PREFIX: char = '#';

#[derive(Debug)]
enum Statement {
    Assign { name: String, value: Node },
    Expr(Node),
}

pub fn parse_script(source: &str) -> CslResult<Node> {
    let mut statements = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.split(COMMENT_PREFIX).next().unwrap_or_default();
        if text.trim().is_empty() {
            continue;
        }
        statements.push(parse_statement(text, line)?);
    }

    let Some(last) = statements.pop() else {
        return Err(CslError::new(ErrorKind::Parse, "empty script", 0, 0));
    };

    let mut tree = match last {
        Statement::Expr(node) => node,
        Statement::Assign { name, value } => {
            let body = Node::var(name.clone());
            Node::let_in(name, value, body)
        }
    };

    for statement in statements.into_iter().rev() {
        match statement {
            Statement::Assign { name, value } => tree = Node::let_in(name, value, tree),
            Statement::Expr(node) => trace!(collapse_id = node.content_id(), "expression statement dropped"),
        }
    }

    Ok(tree)
}

fn parse_statement(text: &str, line: usize) -> CslResult<Statement> {
    let Some((target, expr)) = text.split_once('=') else {
        return compile_at(text, line, 0).map(Statement::Expr);
    };

    let name = assignment_target(target, line)?;
    let value = compile_at(expr, line, target.chars().count() + 1)?;
    Ok(Statement::Assign { name, value })
}

fn assignment_target(target: &str, line: usize) -> CslResult<String> {
    let tokens = Lexer::new(target).tokenize().map_err(|e| relocate(e, line, 0))?;
    match tokens.as_slice() {
        [ident, eof] if ident.token_type == TokenType::Ident && eof.token_type == TokenType::Eof => {
            Ok(ident.lexeme.clone())
        }
        _ => Err(CslError::new(
            ErrorKind::Parse,
            format!("assignment target must be a single name, got '{}'", target.trim()),
            line,
            1,
        )),
    }
}

fn compile_at(text: &str, line: usize, column_offset: usize) -> CslResult<Node> {
    compile(text).map_err(|e| relocate(e, line, column_offset))
}

fn relocate(mut err: CslError, line: usize, column_offset: usize) -> CslError {
    if err.line != 0 {
        err.line = line;
        err.column += column_offset;
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use csl_lang::Op;

    #[test]
    fn test_final_assignment_yields_its_name() {
        let tree = parse_script("x = 5\n").unwrap();
        assert_eq!(tree, Node::let_in("x", Node::int(5), Node::var("x")));
    }

    #[test]
    fn test_earlier_assignments_wrap_in_order() {
        let tree = parse_script("# setup\na = 1\nb = a + 1\nb * 2").unwrap();
        let expected = Node::let_in(
            "a",
            Node::int(1),
            Node::let_in(
                "b",
                Node::add(Node::var("a"), Node::int(1)),
                Node::mul(Node::var("b"), Node::int(2)),
            ),
        );
        assert_eq!(tree.content_id(), expected.content_id());
    }

    #[test]
    fn test_expression_statements_before_the_end_are_dropped() {
        let tree = parse_script("1 + 2\ndouble(4)").unwrap();
        assert_eq!(tree.op(), Op::Apply);
    }

    #[test]
    fn test_trailing_comment() {
        let tree = parse_script("7 # seven").unwrap();
        assert_eq!(tree.int_value(), Some(7));
    }

    #[test]
    fn test_empty_script() {
        let err = parse_script("# only a comment\n\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn test_errors_carry_script_line() {
        let err = parse_script("a = 1\nb = a +\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.line, 2);

        let err = parse_script("let = 3").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.line, 1);
    }
}
