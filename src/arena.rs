//! Bump allocation for AST nodes.
//!
//! Every pipeline invocation gets its own arena; the tree it produces lives
//! exactly as long as the invocation. Node payloads are interned names and
//! `Copy` references, so nothing allocated here needs `Drop`.

use bumpalo::Bump;

use crate::ast::Ast;

pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    pub fn new() -> Self {
        AstArena { bump: Bump::new() }
    }

    pub fn node<'a>(&'a self, node: Ast<'a>) -> &'a Ast<'a> {
        self.bump.alloc(node)
    }

    /// Allocate an ordered child list.
    pub fn children<'a>(&'a self, nodes: &[&'a Ast<'a>]) -> &'a [&'a Ast<'a>] {
        self.bump.alloc_slice_copy(nodes)
    }

    /// Invalidates all trees while keeping the allocated capacity, so a
    /// long-lived REPL can reuse one arena across lines.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstKind;
    use crate::intern::Name;
    use crate::token::Span;

    #[test]
    fn nodes_keep_stable_addresses() {
        let arena = AstArena::new();
        let a = arena.node(Ast::new(AstKind::StrLit(Name::EMPTY), Span::new(0, 1)));
        let b = arena.node(Ast::new(AstKind::StrLit(Name::EMPTY), Span::new(2, 3)));
        assert_eq!(a.span, Span::new(0, 1));
        assert_eq!(b.span, Span::new(2, 3));
    }

    #[test]
    fn children_preserve_order() {
        let arena = AstArena::new();
        let a = arena.node(Ast::new(AstKind::StrLit(Name::EMPTY), Span::new(0, 1)));
        let b = arena.node(Ast::new(AstKind::StrLit(Name::EMPTY), Span::new(2, 3)));
        let list = arena.children(&[a, b]);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].span, a.span);
        assert_eq!(list[1].span, b.span);
    }

    #[test]
    fn empty_child_list() {
        let arena = AstArena::new();
        assert!(arena.children(&[]).is_empty());
    }
}
