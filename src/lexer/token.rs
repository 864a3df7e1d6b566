#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
  // Literals
  Int,

  // Identifiers and keywords
  Ident,
  Let,
  In,

  // Operators
  Plus,  // +
  Star,  // *
  Arrow, // ->

  // Delimiters
  LParen, // (
  RParen, // )
  Comma,  // ,

  // Special
  Eof,
}

impl TokenType {
  pub fn describe(&self) -> &'static str {
    match self {
      TokenType::Int => "integer",
      TokenType::Ident => "identifier",
      TokenType::Let => "'let'",
      TokenType::In => "'in'",
      TokenType::Plus => "'+'",
      TokenType::Star => "'*'",
      TokenType::Arrow => "'->'",
      TokenType::LParen => "'('",
      TokenType::RParen => "')'",
      TokenType::Comma => "','",
      TokenType::Eof => "end of input",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub token_type: TokenType,
  pub lexeme: String,
  pub line: usize,
  pub column: usize,
}

impl Token {
  pub fn new(token_type: TokenType, lexeme: String, line: usize, column: usize) -> Self {
    Self {
      token_type,
      lexeme,
      line,
      column,
    }
  }
}

pub fn keyword_or_ident(word: &str) -> TokenType {
  match word {
    "let" => TokenType::Let,
    "in" => TokenType::In,
    _ => TokenType::Ident,
  }
}
