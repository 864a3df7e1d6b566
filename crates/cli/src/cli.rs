//! Command-line interface for CSL.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CSL - collapse programs, expressions and files
#[derive(Parser)]
#[command(name = "csl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./csl.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a CSL program and print its listing and bytecode hex
    Compile {
        /// Path to the CSL source
        file: PathBuf,

        /// Fail instead of truncating masks wider than 64 bits
        #[arg(long)]
        strict_mask: bool,
    },

    /// Evaluate a single expression
    Eval {
        /// Expression text, e.g. "let x -> 5 in double(x)"
        expr: String,
    },

    /// Pack a script into a CSLX expression envelope
    Pack {
        /// Path to the script
        script: PathBuf,

        /// Output path (defaults to the script with a .cslx extension)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Unpack a CSLX expression envelope back to script text
    Unpack {
        /// Path to the envelope
        package: PathBuf,

        /// Output path (defaults to the package with a .script extension)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Evaluate the unpacked expression
        #[arg(long)]
        eval: bool,
    },

    /// Print a file's operational listing and certificate, then pack it raw
    Collapse {
        /// Any file
        file: PathBuf,

        /// Output path (defaults to the file name with .cslx appended)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Restore a raw CSLX package under its embedded file name
    Expand {
        /// Path to the raw package
        package: PathBuf,

        /// Directory to restore into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}
