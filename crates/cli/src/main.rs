mod cli;
mod config;
mod pipeline;

use clap::Parser;
use cli::{Cli, Commands};
use config::CliConfig;
use pipeline::{collapse_file, compile_file, eval_expr, expand_package, pack_script, unpack_envelope};
use std::process;
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };
    init_logging(&config.log.filter);

    let result = match &cli.command {
        Commands::Compile { file, strict_mask } => compile_file(file, *strict_mask, &config),
        Commands::Eval { expr } => eval_expr(expr),
        Commands::Pack { script, out } => pack_script(script, out.as_deref(), &config),
        Commands::Unpack { package, out, eval } => unpack_envelope(package, out.as_deref(), *eval),
        Commands::Collapse { file, out } => collapse_file(file, out.as_deref(), &config),
        Commands::Expand { package, dir } => expand_package(package, dir),
    };

    match result {
        Ok(report) => println!("{}", report),
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    }
}
