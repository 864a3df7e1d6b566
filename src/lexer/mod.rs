pub mod token;

use crate::error::{CslError, ErrorKind};
use token::{Token, TokenType, keyword_or_ident};

pub struct Lexer {
  input: Vec<char>,
  position: usize,
  line: usize,
  column: usize,
}

impl Lexer {
  pub fn new(input: impl Into<String>) -> Self {
    Self {
      input: input.into().chars().collect(),
      position: 0,
      line: 1,
      column: 1,
    }
  }

  fn current_char(&self) -> Option<char> {
    self.input.get(self.position).copied()
  }

  fn peek_char(&self) -> Option<char> {
    self.input.get(self.position + 1).copied()
  }

  fn advance(&mut self) -> Option<char> {
    let ch = self.current_char()?;
    self.position += 1;
    if ch == '\n' {
      self.line += 1;
      self.column = 1;
    } else {
      self.column += 1;
    }
    Some(ch)
  }

  fn skip_whitespace(&mut self) {
    while let Some(ch) = self.current_char() {
      if ch.is_whitespace() {
        self.advance();
      } else {
        break;
      }
    }
  }

  fn read_number(&mut self) -> Result<Token, CslError> {
    let start_line = self.line;
    let start_column = self.column;
    let mut num = String::new();

    while let Some(ch) = self.current_char() {
      if ch.is_ascii_digit() {
        num.push(ch);
        self.advance();
      } else {
        break;
      }
    }

    if num.parse::<i64>().is_err() {
      return Err(CslError::new(
        ErrorKind::Lex,
        format!("Integer literal '{}' does not fit in 64 bits", num),
        start_line,
        start_column,
      ));
    }

    Ok(Token::new(TokenType::Int, num, start_line, start_column))
  }

  fn read_identifier(&mut self) -> Token {
    let start_line = self.line;
    let start_column = self.column;
    let mut ident = String::new();

    while let Some(ch) = self.current_char() {
      if ch.is_ascii_alphanumeric() || ch == '_' {
        ident.push(ch);
        self.advance();
      } else {
        break;
      }
    }

    let token_type = keyword_or_ident(&ident);
    Token::new(token_type, ident, start_line, start_column)
  }

  fn single(&mut self, token_type: TokenType, lexeme: &str) -> Token {
    let (line, column) = (self.line, self.column);
    self.advance();
    Token::new(token_type, lexeme.to_string(), line, column)
  }

  pub fn next_token(&mut self) -> Result<Token, CslError> {
    self.skip_whitespace();

    let line = self.line;
    let column = self.column;

    let token = match self.current_char() {
      Option::None => Token::new(TokenType::Eof, String::new(), line, column),

      Some(ch) if ch.is_ascii_digit() => return self.read_number(),

      Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_identifier(),

      Some('-') if self.peek_char() == Some('>') => {
        self.advance();
        self.advance();
        Token::new(TokenType::Arrow, "->".to_string(), line, column)
      }

      Some('+') => self.single(TokenType::Plus, "+"),
      Some('*') => self.single(TokenType::Star, "*"),
      Some('(') => self.single(TokenType::LParen, "("),
      Some(')') => self.single(TokenType::RParen, ")"),
      Some(',') => self.single(TokenType::Comma, ","),

      Some(ch) => {
        return Err(CslError::new(
          ErrorKind::Lex,
          format!("Unexpected character '{}'", ch),
          line,
          column,
        ));
      }
    };

    Ok(token)
  }

  pub fn tokenize(&mut self) -> Result<Vec<Token>, CslError> {
    let mut tokens = Vec::new();

    loop {
      let token = self.next_token()?;
      let is_eof = token.token_type == TokenType::Eof;
      tokens.push(token);

      if is_eof {
        break;
      }
    }

    Ok(tokens)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tracks_columns_across_lines() {
    let mut lexer = Lexer::new("a\n  b");
    let tokens = lexer.tokenize().unwrap();
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
  }

  #[test]
  fn lone_minus_is_rejected() {
    let err = Lexer::new("1 - 2").tokenize().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
    assert_eq!(err.column, 3);
  }
}
