//! Built-in functions, installed into the global scope at startup.

use std::fs;

use crate::intern::Interner;
use crate::sym::SymbolTable;
use crate::types::{TypeId, TypePool};
use crate::value::Value;

/// Populate the global scope. Called once before any pipeline runs.
pub fn install(pool: &mut TypePool, interner: &mut Interner, symbols: &mut SymbolTable) {
    let size_ty = pool.fn_type(TypeId::FILE, TypeId::INT);
    let size = interner.intern("size");
    symbols.add(size, size_ty, Some(Value::function(builtin_size)));
}

/// `size : File -> Int` — the file's length in bytes. Any stat failure
/// (missing file, permissions, broken path) yields Invalid rather than an
/// error.
fn builtin_size(arg: &Value) -> Value {
    let Some(filename) = arg.as_filename() else {
        return Value::Invalid;
    };

    match fs::metadata(filename) {
        Ok(meta) => Value::Int(meta.len() as i64),
        Err(_) => Value::Invalid,
    }
}
