//! gosh entry point.
//!
//! With no arguments, start the interactive shell. With arguments, join
//! them with spaces and evaluate the result as one expression.

use clap::Parser;

use gosh::compile::Compiler;
use gosh::display;
use gosh::repl;

#[derive(Parser)]
#[command(name = "gosh")]
#[command(about = "A typed, functional shell", long_about = None)]
#[command(version)]
struct Cli {
    /// Expression to evaluate; omit to enter the shell
    #[arg(trailing_var_arg = true)]
    expr: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    let mut compiler = Compiler::new();

    if cli.expr.is_empty() {
        if let Err(error) = repl::run(&mut compiler) {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    } else {
        let input = cli.expr.join(" ");
        let outcome = compiler.gosh(&input, true, display::terminal_width());
        repl::report_diagnostics(&mut compiler, &input);
        if let Some(rendered) = outcome.rendered {
            print!("{}", rendered);
        }
    }
}
