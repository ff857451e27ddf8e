//! Pipeline orchestration.
//!
//! A [`Compiler`] owns everything that outlives a single line: the type
//! pool, the interner, the symbol table with its built-ins, the
//! working-directory context, and the diagnostic sink. Each invocation
//! builds its AST in a fresh arena and ends with either a rendering or a
//! batch of diagnostics — never both.

use crate::analyzer::analyze;
use crate::arena::AstArena;
use crate::ast::Ast;
use crate::builtins;
use crate::display::display_result;
use crate::error::DiagnosticSink;
use crate::intern::Interner;
use crate::interpreter::{run, EnvCtx};
use crate::lexer::Lexer;
use crate::parser::parse;
use crate::paths::DirCtx;
use crate::sym::SymbolTable;
use crate::types::{TypeId, TypePool};
use crate::value::Value;

pub struct Compiler {
    pub pool: TypePool,
    pub interner: Interner,
    pub symbols: SymbolTable,
    pub dirs: DirCtx,
    pub sink: DiagnosticSink,
}

/// The outcome of one full pipeline run.
pub struct GoshOutcome {
    /// The evaluated value; absent when errors suppressed evaluation.
    pub value: Option<Value>,
    /// The derived type of the tree root.
    pub dt: TypeId,
    /// Diagnostics emitted during this run.
    pub errors: usize,
    /// The display engine's output, when evaluation ran with display on.
    pub rendered: Option<String>,
}

impl Compiler {
    pub fn new() -> Self {
        let mut pool = TypePool::new();
        let mut interner = Interner::new();
        let mut symbols = SymbolTable::new();
        builtins::install(&mut pool, &mut interner, &mut symbols);

        Compiler {
            pool,
            interner,
            symbols,
            dirs: DirCtx::from_env(),
            sink: DiagnosticSink::new(),
        }
    }

    /// Source → typed AST. The returned count covers every diagnostic the
    /// phases emitted; the tree is always usable.
    pub fn compile<'a>(&mut self, arena: &'a AstArena, source: &str) -> (&'a Ast<'a>, usize) {
        let snapshot = self.sink.snapshot();

        let tokens = Lexer::new(source, &mut self.interner).tokenize(&mut self.sink);
        let outcome = parse(&tokens, arena, &mut self.sink);
        analyze(
            outcome.tree,
            &mut self.pool,
            &self.interner,
            &self.symbols,
            &mut self.sink,
        );

        (outcome.tree, self.sink.count() - snapshot)
    }

    /// Compile, evaluate, and (optionally) render one expression.
    /// Evaluation only runs when nothing was reported since pipeline
    /// entry.
    pub fn gosh(&mut self, source: &str, display: bool, width: usize) -> GoshOutcome {
        let snapshot = self.sink.snapshot();
        let arena = AstArena::new();
        let (tree, errors) = self.compile(&arena, source);
        let dt = tree.dt.get();

        if errors > 0 || self.sink.errors_since(snapshot) {
            return GoshOutcome {
                value: None,
                dt,
                errors,
                rendered: None,
            };
        }

        let env = EnvCtx {
            symbols: &self.symbols,
            interner: &self.interner,
        };
        let value = run(&env, tree);

        let rendered = display.then(|| display_result(&self.pool, &value, dt, width));

        GoshOutcome {
            value: Some(value),
            dt,
            errors,
            rendered,
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
