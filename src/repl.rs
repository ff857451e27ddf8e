//! The interactive driver: prompt, read, route, repeat.
//!
//! Plain lines run the full pipeline with display on. Lines starting with
//! `:` are meta-commands looked up in a fixed registry; `:exit` ends the
//! session. A failed line never takes the session down with it. Line
//! history persists via the editor to `~/.gosh_history`.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::arena::AstArena;
use crate::compile::Compiler;
use crate::display;
use crate::interpreter::{run as run_tree, EnvCtx};
use crate::style::Style;

type CommandHandler = fn(&mut Compiler, &str);

/// Meta-command registry: the token after `:` picks the handler, the rest
/// of the line is its argument expression.
const COMMANDS: &[(&str, CommandHandler)] =
    &[("cd", cmd_cd), ("ast", cmd_ast), ("type", cmd_type)];

pub fn run(compiler: &mut Compiler) -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    let history_path = history_path();
    let _ = editor.load_history(&history_path);

    let mut prompt = String::new();
    let mut prompt_valid_for: Option<PathBuf> = None;

    loop {
        refresh_prompt(compiler, &mut prompt, &mut prompt_valid_for);

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error),
        };

        if line.is_empty() {
            continue;
        }
        if line == ":exit" {
            break;
        }

        let _ = editor.add_history_entry(line.as_str());
        let _ = editor.save_history(&history_path);

        if let Some(rest) = line.strip_prefix(':') {
            dispatch(compiler, rest);
        } else {
            let width = display::terminal_width();
            let outcome = compiler.gosh(&line, true, width);
            report_diagnostics(compiler, &line);
            if let Some(rendered) = outcome.rendered {
                print!("{}", rendered);
            }
        }
    }

    Ok(())
}

/// Print and clear whatever the last pipeline run reported.
pub fn report_diagnostics(compiler: &mut Compiler, source: &str) {
    for diagnostic in compiler.sink.drain() {
        eprintln!("{}", diagnostic.display_with_source(source));
    }
}

fn history_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".gosh_history"))
        .unwrap_or_else(|| PathBuf::from("./.gosh_history"))
}

/// Rebuild the prompt only when the working directory moved.
fn refresh_prompt(compiler: &Compiler, prompt: &mut String, valid_for: &mut Option<PathBuf>) {
    if valid_for.as_deref() == Some(compiler.dirs.working_dir.as_path()) {
        return;
    }

    let home = dirs::home_dir();
    let contracted = compiler.dirs.prompt_path(home.as_deref());
    *prompt = format!("{} $ ", Style::yellow(&format!("{{{}}}", contracted)));
    *valid_for = Some(compiler.dirs.working_dir.clone());
}

fn find_command(name: &str) -> Option<CommandHandler> {
    COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, handler)| *handler)
}

fn dispatch(compiler: &mut Compiler, input: &str) {
    let (name, rest) = match input.find(' ') {
        Some(space) => (&input[..space], input[space + 1..].trim_start()),
        None => (input, ""),
    };

    if name.is_empty() {
        println!("No command name given");
        return;
    }

    match find_command(name) {
        Some(handler) => handler(compiler, rest),
        None => println!("No command named ':{}'", name),
    }
}

/// `:cd <expr>` — the expression must type as File; evaluate it and enter
/// the named directory.
fn cmd_cd(compiler: &mut Compiler, input: &str) {
    let arena = AstArena::new();
    let (tree, errors) = compiler.compile(&arena, input);
    report_diagnostics(compiler, input);

    let dt = tree.dt.get();
    if errors > 0 || dt.is_invalid() {
        return;
    }

    if !compiler.pool.is_file(dt) {
        println!(
            ":cd requires a File argument, given {}",
            compiler.pool.name(dt)
        );
        return;
    }

    let env = EnvCtx {
        symbols: &compiler.symbols,
        interner: &compiler.interner,
    };
    let result = run_tree(&env, tree);

    if let Some(target) = result.as_filename().map(str::to_string) {
        if compiler.dirs.change_wd(&target).is_err() {
            println!("Unable to enter directory \"{}\"", target);
        }
    }
}

/// `:ast <expr>` — compile and pretty-print the tree, errors and all.
fn cmd_ast(compiler: &mut Compiler, input: &str) {
    let arena = AstArena::new();
    let (tree, _) = compiler.compile(&arena, input);
    report_diagnostics(compiler, input);
    print!("{}", tree.pretty(&compiler.interner, &compiler.pool));
}

/// `:type <expr>` — print the inferred type; silent on errors.
fn cmd_type(compiler: &mut Compiler, input: &str) {
    let arena = AstArena::new();
    let (tree, errors) = compiler.compile(&arena, input);
    report_diagnostics(compiler, input);

    if errors == 0 {
        println!("{}", compiler.pool.name(tree.dt.get()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_its_commands() {
        assert!(find_command("cd").is_some());
        assert!(find_command("ast").is_some());
        assert!(find_command("type").is_some());
        assert!(find_command("exit").is_none());
        assert!(find_command("cdd").is_none());
    }

    #[test]
    fn history_file_is_named_gosh_history() {
        assert!(history_path().ends_with(".gosh_history"));
    }

    #[test]
    fn prompt_is_cached_per_working_directory() {
        let compiler = Compiler::new();
        let mut prompt = String::new();
        let mut valid_for = None;

        refresh_prompt(&compiler, &mut prompt, &mut valid_for);
        assert!(prompt.contains('{'));
        assert!(prompt.ends_with("$ "));
        assert_eq!(valid_for.as_deref(), Some(compiler.dirs.working_dir.as_path()));

        let built = prompt.clone();
        refresh_prompt(&compiler, &mut prompt, &mut valid_for);
        assert_eq!(prompt, built);
    }
}
