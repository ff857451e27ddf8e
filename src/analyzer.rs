//! Semantic analysis: derive a type for every AST node.
//!
//! Children are visited before parents and nothing short-circuits: every
//! node ends up with a `dt`, possibly Invalid, so later phases stay
//! well-formed. Symbol resolution happens entirely here — the evaluator
//! consumes resolved bindings and never looks names up itself.
//!
//! A bareword resolves through the symbol table; one that does not bind is
//! a file literal, unless it is about to be applied, which is reported as
//! an unknown symbol (with a nearest-name hint when one is close enough).

use crate::ast::{Ast, AstKind};
use crate::error::{DiagnosticKind, DiagnosticSink};
use crate::intern::Interner;
use crate::suggest::find_similar;
use crate::sym::SymbolTable;
use crate::types::{TypeId, TypePool};

pub struct AnalyzeOutcome {
    /// Number of diagnostics this pass emitted.
    pub errors: usize,
}

pub fn analyze(
    tree: &Ast,
    pool: &mut TypePool,
    interner: &Interner,
    symbols: &SymbolTable,
    sink: &mut DiagnosticSink,
) -> AnalyzeOutcome {
    let snapshot = sink.snapshot();
    let mut analyzer = Analyzer {
        pool,
        interner,
        symbols,
        sink,
    };
    analyzer.visit(tree);
    AnalyzeOutcome {
        errors: analyzer.sink.count() - snapshot,
    }
}

struct Analyzer<'c> {
    pool: &'c mut TypePool,
    interner: &'c Interner,
    symbols: &'c SymbolTable,
    sink: &'c mut DiagnosticSink,
}

impl<'c> Analyzer<'c> {
    fn visit(&mut self, node: &Ast) {
        let dt = match &node.kind {
            AstKind::StrLit(_) => TypeId::FILE,
            AstKind::SymbolLit { name, resolved } => match self.symbols.lookup(*name) {
                Some(id) => {
                    resolved.set(Some(id));
                    self.symbols.get(id).ty
                }
                // Unbound barewords denote file paths.
                None => TypeId::FILE,
            },
            AstKind::ListLit(elements) => self.visit_list(elements),
            AstKind::FnApp { head, args } => self.visit_app(head, args),
            AstKind::Invalid => TypeId::INVALID,
        };
        node.dt.set(dt);
    }

    fn visit_list(&mut self, elements: &[&Ast]) -> TypeId {
        for element in elements {
            self.visit(element);
        }

        let Some(first) = elements.first() else {
            // The empty list: element type unknown.
            return self.pool.list_type(TypeId::INVALID);
        };

        let first_ty = first.dt.get();
        for element in &elements[1..] {
            let ty = element.dt.get();
            if ty == first_ty {
                continue;
            }
            // Mismatching elements poison the list. Elements that already
            // failed have been reported; only report a fresh conflict.
            if !ty.is_invalid() && !first_ty.is_invalid() {
                self.sink.report(
                    DiagnosticKind::ListElementMismatch {
                        first: self.pool.name(first_ty),
                        found: self.pool.name(ty),
                    },
                    element.span,
                );
            }
            return TypeId::INVALID;
        }

        self.pool.list_type(first_ty)
    }

    /// Left-fold the curried application `head a₁ … aₙ`.
    fn visit_app(&mut self, head: &Ast, args: &[&Ast]) -> TypeId {
        self.visit(head);
        for arg in args {
            self.visit(arg);
        }

        // Applying a name that binds nothing is a typo, not a file.
        if let AstKind::SymbolLit { name, resolved } = &head.kind {
            if resolved.get().is_none() {
                let word = self.interner.resolve(*name);
                let bound: Vec<&str> = self
                    .symbols
                    .names()
                    .map(|n| self.interner.resolve(n))
                    .collect();
                let hint = find_similar(word, bound, 2).map(str::to_string);
                self.sink.report(
                    DiagnosticKind::UnknownSymbol {
                        name: word.to_string(),
                        hint,
                    },
                    head.span,
                );
                return TypeId::INVALID;
            }
        }

        let fn_ty = head.dt.get();
        if fn_ty.is_invalid() {
            return TypeId::INVALID;
        }

        let mut ty = fn_ty;
        for (i, arg) in args.iter().enumerate() {
            let (param, result) = match (self.pool.fn_param(ty), self.pool.fn_result(ty)) {
                (Some(param), Some(result)) => (param, result),
                _ => {
                    let kind = if i == 0 {
                        DiagnosticKind::NotAFunction {
                            ty: self.pool.name(ty),
                        }
                    } else {
                        DiagnosticKind::TooManyArguments {
                            ty: self.pool.name(fn_ty),
                        }
                    };
                    self.sink.report(kind, arg.span);
                    return TypeId::INVALID;
                }
            };

            let arg_ty = arg.dt.get();
            if arg_ty.is_invalid() {
                // Already reported at the argument itself.
                return TypeId::INVALID;
            }
            if arg_ty != param {
                self.sink.report(
                    DiagnosticKind::ArgumentMismatch {
                        expected: self.pool.name(param),
                        found: self.pool.name(arg_ty),
                    },
                    arg.span,
                );
                return TypeId::INVALID;
            }

            ty = result;
        }

        ty
    }
}
