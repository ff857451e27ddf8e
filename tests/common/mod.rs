//! Test harness: a compiler with built-ins installed plus helpers for
//! running the pipeline and building filesystem fixtures.
#![allow(dead_code)]

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use gosh::compile::{Compiler, GoshOutcome};
use gosh::types::TypeId;
use gosh::value::Value;

pub const WIDTH: usize = 80;

pub fn compiler() -> Compiler {
    Compiler::new()
}

/// Run one expression through the full pipeline with display on.
pub fn eval(compiler: &mut Compiler, source: &str) -> GoshOutcome {
    compiler.gosh(source, true, WIDTH)
}

/// Run and return the rendering, which must exist.
pub fn render(compiler: &mut Compiler, source: &str) -> String {
    let outcome = eval(compiler, source);
    assert_eq!(outcome.errors, 0, "unexpected errors for {:?}", source);
    outcome.rendered.expect("expected a rendering")
}

/// Register a nullary built-in `name : () -> Int` returning `result`.
pub fn add_thunk(compiler: &mut Compiler, name: &str, result: i64) {
    let ty = compiler.pool.fn_type(TypeId::UNIT, TypeId::INT);
    let name = compiler.interner.intern(name);
    compiler
        .symbols
        .add(name, ty, Some(Value::function(move |_| Value::Int(result))));
}

/// A scratch file of `len` zero bytes; returns its absolute path.
pub fn fixture_file(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&vec![0u8; len]).unwrap();
    path
}
