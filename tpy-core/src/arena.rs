//! Bump arena owning every AST node of a compilation unit
//!
//! Nodes are never freed one by one. Dropping (or resetting) the arena
//! releases all of them, and the borrow checker rejects either while an
//! [`ExprRef`] into it is still alive.

use crate::ast::{Expr, ExprKind, ExprRef};
use crate::config::FrontendConfig;
use crate::span::Span;
use bumpalo::Bump;

pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Pre-size the first slab to `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    pub fn from_config(config: &FrontendConfig) -> Self {
        Self::with_capacity(config.arena_capacity)
    }

    pub fn alloc<'ast>(&'ast self, kind: ExprKind<'ast>, span: Span) -> ExprRef<'ast> {
        self.bump.alloc(Expr { kind, span })
    }

    /// Copy a list of children into the arena.
    pub fn alloc_exprs<'ast>(&'ast self, exprs: &[ExprRef<'ast>]) -> &'ast [ExprRef<'ast>] {
        self.bump.alloc_slice_copy(exprs)
    }

    /// Copy dict entries into the arena.
    pub fn alloc_pairs<'ast>(
        &'ast self,
        pairs: &[(ExprRef<'ast>, ExprRef<'ast>)],
    ) -> &'ast [(ExprRef<'ast>, ExprRef<'ast>)] {
        self.bump.alloc_slice_copy(pairs)
    }

    /// Bytes currently held by the arena, across all slabs.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Release every node while keeping the largest slab for reuse.
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("allocated_bytes", &self.allocated_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_reference_children() {
        let arena = Arena::new();
        let one = arena.alloc(ExprKind::IntLiteral { radix: 10 }, Span::new(0, 0, 1));
        let two = arena.alloc(ExprKind::IntLiteral { radix: 10 }, Span::new(3, 3, 1));
        let elements = arena.alloc_exprs(&[one, two]);
        let list = arena.alloc(ExprKind::List(elements), Span::new(0, 0, 5));

        assert_eq!(list.children().len(), 2);
        assert!(std::ptr::eq(list.children()[1], two));
    }

    #[test]
    fn test_reset_reclaims() {
        let mut arena = Arena::with_capacity(64);
        for i in 0..100 {
            arena.alloc(ExprKind::Name, Span::new(i, i, 1));
        }
        let grown = arena.allocated_bytes();
        arena.reset();
        assert!(arena.allocated_bytes() <= grown);
    }
}
