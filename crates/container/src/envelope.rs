//! Variant B: a content-addressed expression tree.
//!
//! ```text
//! "CSLX" | u32be version | zlib(canonical json)
//! ```

use crate::error::{ContainerError, ContainerResult};
use crate::header::Reader;
use crate::raw::PACKAGE_EXTENSION;
use crate::render::render_source;
use crate::script::parse_script;
use crate::zlib;
use csl_lang::Node;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const AST_MAGIC: &[u8] = b"CSLX";
pub const AST_VERSION: u32 = 1;

/// Extension given to rendered scripts when no output path is chosen.
pub const SCRIPT_EXTENSION: &str = "script";

pub fn pack_node(node: &Node, level: u32) -> ContainerResult<Vec<u8>> {
    let canonical = node.to_canonical();
    let compressed = zlib::compress(canonical.as_bytes(), level)?;

    let mut out = Vec::with_capacity(AST_MAGIC.len() + 4 + compressed.len());
    out.extend_from_slice(AST_MAGIC);
    out.extend_from_slice(&AST_VERSION.to_be_bytes());
    out.extend_from_slice(&compressed);

    debug!(
        collapse_id = node.content_id(),
        nodes = node.size(),
        canonical = canonical.len(),
        packed = out.len(),
        "expression envelope built"
    );
    Ok(out)
}

pub fn unpack_node(bytes: &[u8]) -> ContainerResult<Node> {
    let mut reader = Reader::new(bytes);
    reader.expect_magic(AST_MAGIC, "CSLX")?;
    reader.version(AST_VERSION)?;

    let canonical = zlib::decompress(reader.rest())?;
    let json: serde_json::Value = serde_json::from_slice(&canonical)?;
    Node::from_json(&json).map_err(|e| ContainerError::InvalidNode(e.message))
}

/// Compile a script file and write its envelope to `out`, or next to the
/// script with a `.cslx` extension.
pub fn pack_script_file(path: &Path, out: Option<&Path>, level: u32) -> ContainerResult<(PathBuf, Node)> {
    let source = fs::read_to_string(path)?;
    let node = parse_script(&source).map_err(|e| e.with_file(path.display().to_string()))?;
    let package = pack_node(&node, level)?;

    let out = out.map_or_else(|| path.with_extension(PACKAGE_EXTENSION), Path::to_path_buf);
    fs::write(&out, package)?;
    Ok((out, node))
}

/// Decode an envelope file and write its rendered source to `out`, or next to
/// the package with a `.script` extension.
pub fn unpack_node_file(path: &Path, out: Option<&Path>) -> ContainerResult<(PathBuf, Node)> {
    let node = unpack_node(&fs::read(path)?)?;
    let out = out.map_or_else(|| path.with_extension(SCRIPT_EXTENSION), Path::to_path_buf);
    fs::write(&out, render_source(&node))?;
    Ok((out, node))
}
