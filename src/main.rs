mod repl;

use csl_lang::{Evaluator, compile};
use std::env;
use std::fs;

fn main() {
  let args: Vec<String> = env::args().collect();

  // Start REPL if no arguments
  if args.len() < 2 {
    repl::start();
    return;
  }

  let filename = &args[1];
  let parse_only = args.contains(&"--parse".to_string());

  let source = fs::read_to_string(filename).unwrap_or_else(|_| {
    eprintln!("Failed to read file: {}", filename);
    std::process::exit(1);
  });

  let node = match compile(&source) {
    Ok(node) => node,
    Err(err) => {
      eprintln!("{}", err.with_file(filename.clone()));
      std::process::exit(1);
    }
  };

  println!("Z root: {} collapse_id: {}", node.op(), node.content_id());

  if parse_only {
    return;
  }

  let mut evaluator = Evaluator::new();
  match evaluator.eval(&node) {
    Ok(result) => println!("1: {}", result),
    Err(err) => {
      eprintln!("{}", err.with_file(filename.clone()));
      std::process::exit(1);
    }
  }
}
