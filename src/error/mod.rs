#[derive(Debug, Clone, PartialEq)]
pub struct CslError {
  pub kind: ErrorKind,
  pub message: String,
  pub line: usize,
  pub column: usize,
  pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Lex,
  Parse,
  UnboundName,
  Runtime,
}

pub type CslResult<T> = Result<T, CslError>;

impl CslError {
  pub fn new(kind: ErrorKind, message: impl Into<String>, line: usize, column: usize) -> Self {
    Self {
      kind,
      message: message.into(),
      line,
      column,
      file: None,
    }
  }

  /// Errors raised while walking the tree have no source position.
  pub fn runtime(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Runtime, message, 0, 0)
  }

  pub fn unbound(name: &str) -> Self {
    Self::new(
      ErrorKind::UnboundName,
      format!("Variable '{}' not found", name),
      0,
      0,
    )
  }

  pub fn with_file(mut self, file: String) -> Self {
    self.file = Some(file);
    self
  }

  pub fn format(&self) -> String {
    let kind_str = match self.kind {
      ErrorKind::Lex => "Lexical Error",
      ErrorKind::Parse => "Parse Error",
      ErrorKind::UnboundName => "Unbound Name",
      ErrorKind::Runtime => "Runtime Error",
    };

    if self.line == 0 {
      return match self.file {
        Some(ref file) => format!("{} in {}: {}", kind_str, file, self.message),
        None => format!("{}: {}", kind_str, self.message),
      };
    }

    let location = if let Some(ref file) = self.file {
      format!("{}:{}:{}", file, self.line, self.column)
    } else {
      format!("line {}:{}", self.line, self.column)
    };

    format!("{} at {}: {}", kind_str, location, self.message)
  }
}

impl std::fmt::Display for CslError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}", self.format())
  }
}

impl std::error::Error for CslError {}
