//! Tree-walking evaluation: typed AST → value.
//!
//! Evaluation is total on well-typed trees and never panics on ill-typed
//! ones — anything that cannot be computed flows through as
//! [`Value::Invalid`]. The AST is never mutated.

use crate::ast::{Ast, AstKind};
use crate::intern::{Interner, Name};
use crate::sym::{SymId, SymbolTable};
use crate::value::Value;

/// Evaluation context. Carries no mutable state beyond the table of
/// resolved bindings; scoped runtime bindings would live here.
pub struct EnvCtx<'a> {
    pub symbols: &'a SymbolTable,
    pub interner: &'a Interner,
}

pub fn run(env: &EnvCtx, node: &Ast) -> Value {
    match &node.kind {
        AstKind::FnApp { head, args } => run_fn_app(env, head, args),
        AstKind::StrLit(text) => Value::file(env.interner.resolve(*text)),
        AstKind::ListLit(elements) => run_list_lit(env, elements),
        AstKind::SymbolLit { name, resolved } => run_symbol_lit(env, *name, resolved.get()),
        AstKind::Invalid => Value::Invalid,
    }
}

/// Evaluate the head, then fold each argument through a call.
fn run_fn_app(env: &EnvCtx, head: &Ast, args: &[&Ast]) -> Value {
    let mut result = run(env, head);

    for arg in args {
        let value = run(env, arg);
        result = result.call(&value);
    }

    result
}

fn run_list_lit(env: &EnvCtx, elements: &[&Ast]) -> Value {
    Value::vector(elements.iter().map(|element| run(env, element)).collect())
}

fn run_symbol_lit(env: &EnvCtx, name: Name, resolved: Option<SymId>) -> Value {
    match resolved {
        // Built-ins materialize as their stored value; bindings without
        // one cannot be evaluated.
        Some(id) => env
            .symbols
            .get(id)
            .value
            .clone()
            .unwrap_or(Value::Invalid),
        // Unresolved barewords are file literals.
        None => Value::file(env.interner.resolve(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::arena::AstArena;
    use crate::error::DiagnosticSink;
    use crate::lexer::Lexer;
    use crate::parser::parse;
    use crate::types::{TypeId, TypePool};

    struct Fixture {
        pool: TypePool,
        interner: Interner,
        symbols: SymbolTable,
    }

    impl Fixture {
        fn new() -> Self {
            let mut pool = TypePool::new();
            let mut interner = Interner::new();
            let mut symbols = SymbolTable::new();

            // A stand-in for `size` that measures the filename itself, so
            // tests need no filesystem.
            let size_ty = pool.fn_type(TypeId::FILE, TypeId::INT);
            let name_len = Value::function(|arg| match arg.as_filename() {
                Some(name) => Value::Int(name.len() as i64),
                None => Value::Invalid,
            });
            let sym = interner.intern("namelen");
            symbols.add(sym, size_ty, Some(name_len));

            Fixture {
                pool,
                interner,
                symbols,
            }
        }

        fn eval(&mut self, source: &str) -> Value {
            let arena = AstArena::new();
            let mut sink = DiagnosticSink::new();
            let tokens = Lexer::new(source, &mut self.interner).tokenize(&mut sink);
            let outcome = parse(&tokens, &arena, &mut sink);
            analyze(
                outcome.tree,
                &mut self.pool,
                &self.interner,
                &self.symbols,
                &mut sink,
            );
            let env = EnvCtx {
                symbols: &self.symbols,
                interner: &self.interner,
            };
            run(&env, outcome.tree)
        }
    }

    #[test]
    fn string_literals_evaluate_to_files() {
        let mut fx = Fixture::new();
        assert_eq!(fx.eval("\"foo.txt\""), Value::file("foo.txt"));
    }

    #[test]
    fn unbound_barewords_evaluate_to_files() {
        let mut fx = Fixture::new();
        assert_eq!(fx.eval("notes.md"), Value::file("notes.md"));
    }

    #[test]
    fn lists_evaluate_in_order() {
        let mut fx = Fixture::new();
        let value = fx.eval("[\"a\", \"b\"]");
        assert_eq!(
            value,
            Value::vector(vec![Value::file("a"), Value::file("b")])
        );
    }

    #[test]
    fn application_calls_the_builtin() {
        let mut fx = Fixture::new();
        assert_eq!(fx.eval("namelen \"four\""), Value::Int(4));
    }

    #[test]
    fn applying_a_non_function_yields_invalid() {
        let mut fx = Fixture::new();
        assert!(fx.eval("\"a\" \"b\"").is_invalid());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let mut fx = Fixture::new();
        assert_eq!(fx.eval("namelen \"four\""), fx.eval("namelen \"four\""));
    }

    #[test]
    fn lists_of_applications() {
        let mut fx = Fixture::new();
        let value = fx.eval("[namelen \"a\", namelen \"bb\"]");
        assert_eq!(value, Value::vector(vec![Value::Int(1), Value::Int(2)]));
    }
}
