//! # CSLX containers
//!
//! Two zlib-compressed container layouts, distinguished by magic:
//!
//! - `CSLXRAW` ([`raw`]): an arbitrary file plus its name, restored
//!   byte-for-byte.
//! - `CSLX` ([`envelope`]): the canonical JSON of an expression tree, built
//!   from a [`script`] and rendered back with [`render`].
//!
//! Decoding never falls back from one layout to the other, and no file is
//! written until a package has decoded completely.

pub mod envelope;
pub mod error;
mod header;
pub mod raw;
pub mod render;
pub mod script;
mod zlib;

pub use envelope::{AST_MAGIC, AST_VERSION, pack_node, pack_script_file, unpack_node, unpack_node_file};
pub use error::{ContainerError, ContainerResult};
pub use raw::{
    RAW_MAGIC, RAW_VERSION, RawPackage, certificate, collapse_listing, pack_raw, pack_raw_file, unpack_raw,
    unpack_raw_into,
};
pub use render::render_source;
pub use script::parse_script;
pub use zlib::MAX_LEVEL;
