//! The abstract syntax tree.
//!
//! Nodes are allocated in an [`crate::arena::AstArena`] and never mutated
//! structurally. Two slots are written after construction, both by the
//! analyzer: the derived type `dt` (every node, possibly Invalid) and the
//! resolved binding of a `SymbolLit`. The evaluator only reads them.

use std::cell::Cell;

use crate::intern::{Interner, Name};
use crate::sym::SymId;
use crate::token::Span;
use crate::types::{TypeId, TypePool};

pub struct Ast<'a> {
    pub kind: AstKind<'a>,
    pub span: Span,
    /// Derived type, Invalid until the analyzer has run.
    pub dt: Cell<TypeId>,
}

pub enum AstKind<'a> {
    /// Application by juxtaposition: `f x y`. The argument list is ordered
    /// and applied left to right (curried).
    FnApp {
        head: &'a Ast<'a>,
        args: &'a [&'a Ast<'a>],
    },
    /// Quoted literal text; denotes a file path.
    StrLit(Name),
    ListLit(&'a [&'a Ast<'a>]),
    /// A bareword. Bound names are symbols; the analyzer decides what the
    /// rest are and records the binding here.
    SymbolLit {
        name: Name,
        resolved: Cell<Option<SymId>>,
    },
    /// Placeholder produced by parser error recovery.
    Invalid,
}

impl<'a> Ast<'a> {
    pub fn new(kind: AstKind<'a>, span: Span) -> Self {
        Ast {
            kind,
            span,
            dt: Cell::new(TypeId::INVALID),
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self.kind {
            AstKind::FnApp { .. } => "FnApp",
            AstKind::StrLit(_) => "StrLit",
            AstKind::ListLit(_) => "ListLit",
            AstKind::SymbolLit { .. } => "SymbolLit",
            AstKind::Invalid => "Invalid",
        }
    }

    /// Multi-line tree rendering for the `:ast` meta-command. Typed nodes
    /// show their derived type.
    pub fn pretty(&self, interner: &Interner, pool: &TypePool) -> String {
        let mut out = String::new();
        self.pretty_into(interner, pool, 0, &mut out);
        out
    }

    fn pretty_into(&self, interner: &Interner, pool: &TypePool, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        match &self.kind {
            AstKind::FnApp { .. } | AstKind::ListLit(_) | AstKind::Invalid => {
                out.push_str(self.kind_str());
            }
            AstKind::StrLit(text) => {
                out.push_str(&format!("StrLit \"{}\"", interner.resolve(*text)));
            }
            AstKind::SymbolLit { name, .. } => {
                out.push_str(&format!("SymbolLit {}", interner.resolve(*name)));
            }
        }
        if !self.dt.get().is_invalid() {
            out.push_str(&format!(" :: {}", pool.name(self.dt.get())));
        }
        out.push('\n');
        match &self.kind {
            AstKind::FnApp { head, args } => {
                head.pretty_into(interner, pool, depth + 1, out);
                for arg in *args {
                    arg.pretty_into(interner, pool, depth + 1, out);
                }
            }
            AstKind::ListLit(elements) => {
                for element in *elements {
                    element.pretty_into(interner, pool, depth + 1, out);
                }
            }
            _ => {}
        }
    }
}
