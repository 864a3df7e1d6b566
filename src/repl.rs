use csl_lang::evaluator::builtins::BUILTINS;
use csl_lang::{Evaluator, compile};
use std::io::{self, Write};

pub fn start() {
  println!("CSL collapse REPL v{}", env!("CARGO_PKG_VERSION"));
  println!("Type 'exit' or 'quit' to exit\n");

  let mut evaluator = Evaluator::new();

  loop {
    print!("csl> ");
    if io::stdout().flush().is_err() {
      break;
    }

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
      Ok(0) => break,
      Ok(_) => {
        let input = input.trim();

        if input.is_empty() {
          continue;
        }

        if input == "exit" || input == "quit" {
          break;
        }

        if input == "help" {
          print_help();
          continue;
        }

        if input == "env" {
          for (name, value) in evaluator.environment.iter() {
            println!("  {} = {}", name, value);
          }
          continue;
        }

        match compile(input) {
          Ok(node) => match evaluator.eval(&node) {
            Ok(result) => println!("{}    [{} {}]", result, node.op(), node.content_id()),
            Err(e) => eprintln!("{}", e),
          },
          Err(e) => eprintln!("{}", e),
        }
      }
      Err(e) => {
        eprintln!("Error reading input: {}", e);
        break;
      }
    }
  }
}

fn print_help() {
  println!("CSL REPL Commands:");
  println!("  help  - Show this help message");
  println!("  env   - Show current environment");
  println!("  exit  - Exit the REPL");
  println!("  quit  - Exit the REPL");
  println!("\nSyntax: integers, names, + *, f(a, b), let NAME -> EXPR in EXPR");
  let names: Vec<&str> = BUILTINS.iter().map(|b| b.name).collect();
  println!("Builtins: {}", names.join(", "));
}
