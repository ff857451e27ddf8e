//! End-to-end pipeline scenarios: source text in, rendered result out.

mod common;

use common::{add_thunk, compiler, eval, fixture_file, render};

use gosh::arena::AstArena;
use gosh::error::DiagnosticKind;

#[test]
fn size_of_a_two_kilobyte_file_is_an_int_scalar() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_file(dir.path(), "foo.txt", 2048);

    let mut compiler = compiler();
    let source = format!("size \"{}\"", path.display());
    assert_eq!(render(&mut compiler, &source), "2048 :: Int\n");
}

#[test]
fn a_directory_result_describes_and_lists_itself() {
    let dir = tempfile::tempdir().unwrap();
    fixture_file(dir.path(), "beta.txt", 1);
    fixture_file(dir.path(), "alpha.txt", 1);
    std::fs::create_dir(dir.path().join("nested")).unwrap();

    let mut compiler = compiler();
    let source = format!("\"{}\"", dir.path().display());
    let out = render(&mut compiler, &source);

    assert!(out.contains(" :: File\n"));
    assert!(out.contains("(A Dir)\n"));
    assert!(out.contains("{nested}/"));
    let alpha = out.find("alpha.txt").unwrap();
    let beta = out.find("beta.txt").unwrap();
    assert!(alpha < beta, "listing not alphabetized:\n{}", out);
}

#[test]
fn a_list_of_files_renders_as_a_grid() {
    let mut compiler = compiler();
    let out = render(&mut compiler, "[\"aa.x\", \"bb.x\", \"cc.x\"]");
    assert_eq!(out, "aa.x  bb.x  cc.x  \n :: [File]\n");
}

#[test]
fn the_empty_list_renders_as_a_scalar() {
    let mut compiler = compiler();
    assert_eq!(render(&mut compiler, "[]"), "[] :: [Invalid]\n");
}

#[test]
fn a_nullary_builtin_is_applied_automatically() {
    let mut compiler = compiler();
    add_thunk(&mut compiler, "answer", 42);
    let out = render(&mut compiler, "answer");
    assert_eq!(
        out,
        "(A value of () -> Int has been automatically applied.)\n42 :: Int\n"
    );
}

#[test]
fn the_type_of_size_is_file_to_int() {
    let mut compiler = compiler();
    let arena = AstArena::new();
    let (tree, errors) = compiler.compile(&arena, "size");
    assert_eq!(errors, 0);
    assert_eq!(compiler.pool.name(tree.dt.get()), "File -> Int");
}

#[test]
fn unbound_barewords_act_as_file_literals() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_file(dir.path(), "bare.bin", 512);

    let mut compiler = compiler();
    let source = format!("size {}", path.display());
    assert_eq!(render(&mut compiler, &source), "512 :: Int\n");
}

#[test]
fn size_of_a_missing_file_flows_through_as_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-created");

    let mut compiler = compiler();
    let source = format!("size \"{}\"", path.display());
    assert_eq!(render(&mut compiler, &source), "<invalid> :: Int\n");
}

#[test]
fn applying_a_typo_reports_unknown_symbol_with_a_hint() {
    let mut compiler = compiler();
    let outcome = eval(&mut compiler, "sise \"foo.txt\"");
    assert_eq!(outcome.errors, 1);
    assert!(outcome.value.is_none(), "evaluation should be suppressed");

    let diagnostics = compiler.sink.drain();
    assert_eq!(diagnostics.len(), 1);
    match &diagnostics[0].kind {
        DiagnosticKind::UnknownSymbol { name, hint } => {
            assert_eq!(name, "sise");
            assert_eq!(hint.as_deref(), Some("size"));
        }
        other => panic!("unexpected diagnostic: {:?}", other),
    }
}

#[test]
fn parse_errors_suppress_evaluation_but_not_the_session() {
    let mut compiler = compiler();

    let broken = eval(&mut compiler, "[\"a\", ");
    assert!(broken.errors > 0);
    assert!(broken.rendered.is_none());
    compiler.sink.drain();

    let healthy = eval(&mut compiler, "[\"a\", \"b\", \"c\"]");
    assert_eq!(healthy.errors, 0);
    assert!(healthy.rendered.is_some());
}

#[test]
fn mixed_list_element_types_are_rejected() {
    let mut compiler = compiler();
    let outcome = eval(&mut compiler, "[\"a\", size \"b\"]");
    assert_eq!(outcome.errors, 1);
    assert!(outcome.value.is_none());
}

#[test]
fn too_many_arguments_is_a_type_error() {
    let mut compiler = compiler();
    let outcome = eval(&mut compiler, "size \"a\" \"b\"");
    assert_eq!(outcome.errors, 1);
    assert!(outcome.value.is_none());
}

#[test]
fn evaluation_is_deterministic_for_an_unchanged_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_file(dir.path(), "stable.bin", 99);

    let mut compiler = compiler();
    let source = format!("size \"{}\"", path.display());
    let first = render(&mut compiler, &source);
    let second = render(&mut compiler, &source);
    assert_eq!(first, second);
}

#[test]
fn ast_pretty_printer_shows_the_application_shape() {
    let mut compiler = compiler();
    let arena = AstArena::new();
    let (tree, _) = compiler.compile(&arena, "size \"foo.txt\"");
    let pretty = tree.pretty(&compiler.interner, &compiler.pool);
    assert!(pretty.starts_with("FnApp"));
    assert!(pretty.contains("SymbolLit size"));
    assert!(pretty.contains("StrLit \"foo.txt\""));
}
