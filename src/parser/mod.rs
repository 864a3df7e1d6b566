pub mod ast;

use crate::error::{CslError, CslResult, ErrorKind};
use crate::lexer::token::{Token, TokenType};
use ast::Node;

/// Recursive-descent parser for collapse expressions.
///
/// ```text
/// expr := "let" IDENT "->" expr "in" expr | add
/// add  := mul ("+" mul)*
/// mul  := app ("*" app)*
/// app  := prim ("(" [expr ("," expr)*] ")")*
/// prim := INT | IDENT | "(" expr ")"
/// ```
pub struct Parser {
  tokens: Vec<Token>,
  current: usize,
}

impl Parser {
  pub fn new(tokens: Vec<Token>) -> Self {
    Self { tokens, current: 0 }
  }

  fn current_token(&self) -> &Token {
    // `tokenize` always terminates the stream with Eof.
    &self.tokens[self.current.min(self.tokens.len() - 1)]
  }

  fn is_at_end(&self) -> bool {
    self.current_token().token_type == TokenType::Eof
  }

  fn advance(&mut self) -> Token {
    let token = self.current_token().clone();
    if !self.is_at_end() {
      self.current += 1;
    }
    token
  }

  fn check(&self, token_type: TokenType) -> bool {
    self.current_token().token_type == token_type
  }

  fn match_token(&mut self, token_type: TokenType) -> bool {
    if self.check(token_type) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn consume(&mut self, token_type: TokenType, message: &str) -> CslResult<Token> {
    if self.check(token_type) {
      Ok(self.advance())
    } else {
      Err(self.error(message))
    }
  }

  fn error(&self, message: &str) -> CslError {
    let token = self.current_token();
    CslError::new(
      ErrorKind::Parse,
      format!("{}, got {}", message, token.token_type.describe()),
      token.line,
      token.column,
    )
  }

  /// Parse a whole token stream as a single expression.
  pub fn parse(&mut self) -> CslResult<Node> {
    if self.tokens.is_empty() {
      return Err(CslError::new(ErrorKind::Parse, "Empty token stream", 1, 1));
    }
    let node = self.expression()?;
    self.consume(TokenType::Eof, "Expected end of input")?;
    Ok(node)
  }

  fn expression(&mut self) -> CslResult<Node> {
    if self.match_token(TokenType::Let) {
      let name = self.consume(TokenType::Ident, "Expected name after 'let'")?;
      self.consume(TokenType::Arrow, "Expected '->' after let name")?;
      let value = self.expression()?;
      self.consume(TokenType::In, "Expected 'in' after let value")?;
      let body = self.expression()?;
      return Ok(Node::let_in(name.lexeme, value, body));
    }

    self.addition()
  }

  fn addition(&mut self) -> CslResult<Node> {
    let mut left = self.multiplication()?;

    while self.match_token(TokenType::Plus) {
      let right = self.multiplication()?;
      left = Node::add(left, right);
    }

    Ok(left)
  }

  fn multiplication(&mut self) -> CslResult<Node> {
    let mut left = self.application()?;

    while self.match_token(TokenType::Star) {
      let right = self.application()?;
      left = Node::mul(left, right);
    }

    Ok(left)
  }

  fn application(&mut self) -> CslResult<Node> {
    let mut callee = self.primary()?;

    while self.match_token(TokenType::LParen) {
      let mut args = Vec::new();
      if !self.check(TokenType::RParen) {
        loop {
          args.push(self.expression()?);
          if !self.match_token(TokenType::Comma) {
            break;
          }
        }
      }
      self.consume(TokenType::RParen, "Expected ')' after arguments")?;

      // f(a, b) is curried into APPLY(APPLY(f, a), b)
      for arg in args {
        callee = Node::apply(callee, arg);
      }
    }

    Ok(callee)
  }

  fn primary(&mut self) -> CslResult<Node> {
    let token = self.current_token().clone();

    match token.token_type {
      TokenType::Int => {
        self.advance();
        let value = token.lexeme.parse::<i64>().map_err(|_| {
          CslError::new(
            ErrorKind::Parse,
            format!("Invalid integer literal '{}'", token.lexeme),
            token.line,
            token.column,
          )
        })?;
        Ok(Node::int(value))
      }
      TokenType::Ident => {
        self.advance();
        Ok(Node::var(token.lexeme))
      }
      TokenType::LParen => {
        self.advance();
        let expr = self.expression()?;
        self.consume(TokenType::RParen, "Expected ')' after expression")?;
        Ok(expr)
      }
      _ => Err(self.error("Expected expression")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lexer::Lexer;

  fn parse(source: &str) -> CslResult<Node> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse()
  }

  #[test]
  fn empty_call_keeps_callee() {
    assert_eq!(parse("f()").unwrap(), Node::var("f"));
  }

  #[test]
  fn chained_calls_apply_in_order() {
    let expected = Node::apply(Node::apply(Node::var("f"), Node::int(1)), Node::int(2));
    assert_eq!(parse("f(1)(2)").unwrap(), expected);
  }

  #[test]
  fn trailing_tokens_are_rejected() {
    let err = parse("1 2").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Parse);
    assert_eq!(err.column, 3);
  }
}
