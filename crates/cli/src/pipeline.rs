//! Pipeline for each `csl` subcommand.
//!
//! Every step returns the text to print on success; the first failure aborts
//! the command and nothing after it runs.

use crate::config::CliConfig;
use csl_container::{
    ContainerError, collapse_listing, pack_raw_file, pack_script_file, unpack_node_file, unpack_raw_into,
};
use csl_kernel::{KernelError, compile_source, to_assembly, to_bytes, to_bytes_strict};
use csl_lang::{CslError, Evaluator, run};
use std::fs;
use std::path::Path;
use tracing::info;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline error type
#[derive(Debug)]
pub enum PipelineError {
    /// File I/O error
    Io(std::io::Error),
    /// Malformed CSL program or unencodable bytecode
    Kernel(KernelError),
    /// Lex, parse or evaluation error in an expression
    Expression(CslError),
    /// Container encode/decode error
    Container(ContainerError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Io(e) => write!(f, "I/O error: {}", e),
            PipelineError::Kernel(e) => write!(f, "CSL error: {}", e),
            PipelineError::Expression(e) => write!(f, "{}", e),
            PipelineError::Container(e) => write!(f, "container error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        PipelineError::Io(error)
    }
}

impl From<KernelError> for PipelineError {
    fn from(error: KernelError) -> Self {
        PipelineError::Kernel(error)
    }
}

impl From<CslError> for PipelineError {
    fn from(error: CslError) -> Self {
        PipelineError::Expression(error)
    }
}

impl From<ContainerError> for PipelineError {
    fn from(error: ContainerError) -> Self {
        PipelineError::Container(error)
    }
}

/// Compile a CSL program to its listing and bytecode hex.
pub fn compile_file(path: &Path, strict_mask: bool, config: &CliConfig) -> PipelineResult<String> {
    let source = fs::read_to_string(path)?;
    let code = compile_source(&source)?;

    let bytes = if strict_mask || config.bytecode.strict_mask {
        to_bytes_strict(&code)?
    } else {
        to_bytes(&code)
    };

    Ok(format!(
        "=== CSL :: SHORTENED OPERATIONAL CODE ===\n{}\n=== BYTECODE (hex) ===\n{}",
        to_assembly(&code),
        hex::encode(bytes)
    ))
}

/// Evaluate one expression with the builtin environment.
pub fn eval_expr(expr: &str) -> PipelineResult<String> {
    let (value, node) = run(expr)?;
    Ok(format!(
        "Z root: {} collapse_id: {}\n1: {}",
        node.op(),
        node.content_id(),
        value
    ))
}

pub fn pack_script(path: &Path, out: Option<&Path>, config: &CliConfig) -> PipelineResult<String> {
    let (written, node) = pack_script_file(path, out, config.container.compression_level)?;
    info!(path = %written.display(), "envelope written");
    Ok(format!(
        "packed: {} nodes: {} collapse_id: {}",
        written.display(),
        node.size(),
        node.content_id()
    ))
}

pub fn unpack_envelope(path: &Path, out: Option<&Path>, eval: bool) -> PipelineResult<String> {
    let (written, node) = unpack_node_file(path, out)?;
    info!(path = %written.display(), "script written");

    let mut report = format!("unpacked: {}", written.display());
    if eval {
        let value = Evaluator::new().eval(&node)?;
        report.push_str(&format!("\nrun: {}", value));
    }
    Ok(report)
}

/// Print the operational listing for any file and pack it raw.
pub fn collapse_file(path: &Path, out: Option<&Path>, config: &CliConfig) -> PipelineResult<String> {
    let payload = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let listing = collapse_listing(&name, &payload);
    let written = pack_raw_file(path, out, config.container.compression_level)?;
    info!(path = %written.display(), bytes = payload.len(), "raw package written");

    Ok(format!("{}\nout: {}", listing, written.display()))
}

pub fn expand_package(path: &Path, dir: &Path) -> PipelineResult<String> {
    let restored = unpack_raw_into(path, dir)?;
    info!(path = %restored.display(), "file restored");
    Ok(format!("expanded: {}", restored.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROGRAM: &str = "psi :: f3^3\nv :: { x in f3^3 : x1 = 0 }\ngrad\nproject\ngoal\n";

    #[test]
    fn test_compile_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.csl");
        fs::write(&path, PROGRAM).unwrap();

        let report = compile_file(&path, false, &CliConfig::default()).unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "00: INIT p=3");
        assert_eq!(lines[8], "07: HALT");
        assert_eq!(lines[10].len(), 8 * 21 * 2);
    }

    #[test]
    fn test_strict_mask_from_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wide.csl");
        fs::write(&path, "psi :: f3^4\nv :: { x in f3^4 : x4 = 2 }\n").unwrap();

        let mut config = CliConfig::default();
        assert!(compile_file(&path, false, &config).is_ok());

        config.bytecode.strict_mask = true;
        assert!(matches!(
            compile_file(&path, false, &config),
            Err(PipelineError::Kernel(KernelError::MaskTooWide { .. }))
        ));
    }

    #[test]
    fn test_eval_report() {
        let report = eval_expr("let x -> 5 in (let x -> 7 in x) + x").unwrap();
        assert!(report.starts_with("Z root: LET collapse_id: "));
        assert!(report.ends_with("\n1: 12"));
    }

    #[test]
    fn test_pack_then_unpack_with_eval() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("sum.script");
        fs::write(&script, "a = 4\nb = double(a)\na + b\n").unwrap();

        pack_script(&script, None, &CliConfig::default()).unwrap();
        let out = dir.path().join("sum.out");
        let report = unpack_envelope(&dir.path().join("sum.cslx"), Some(&out), true).unwrap();
        assert!(report.ends_with("run: 12"));
        assert!(out.exists());
    }

    #[test]
    fn test_collapse_then_expand() {
        let src_dir = TempDir::new().unwrap();
        let file = src_dir.path().join("notes.txt");
        fs::write(&file, "keep me").unwrap();

        let report = collapse_file(&file, None, &CliConfig::default()).unwrap();
        assert!(report.starts_with("=== CSL :: SHORTENED OPERATIONAL CODE ===\n00: INIT mode=ANY"));

        let out_dir = TempDir::new().unwrap();
        let report = expand_package(&src_dir.path().join("notes.txt.cslx"), out_dir.path()).unwrap();
        assert!(report.starts_with("expanded: "));
        assert_eq!(fs::read_to_string(out_dir.path().join("notes.txt")).unwrap(), "keep me");
    }
}
