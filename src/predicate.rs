//! Successor predicates for the grammar automaton.
//!
//! Predicates are stored once in a [`PredicateArena`] and referred to by
//! [`PredicateId`]. Several automaton states hold the same id when they accept
//! the same successor set, so editing the wiring in one place changes every
//! state that shares it.

use crate::token::{Token, TokenKind};

/// Handle to a predicate stored in a [`PredicateArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredicateId(usize);

/// "Is this token an acceptable successor?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenPredicate {
    /// Matches tokens of exactly one kind
    Terminal(TokenKind),
    /// Matches if any member matches
    Disjunction(Vec<PredicateId>),
}

/// Append-only storage for predicates.
///
/// A disjunction can only reference ids handed out earlier by the same arena,
/// so the predicate graph is acyclic by construction.
#[derive(Debug, Clone, Default)]
pub struct PredicateArena {
    predicates: Vec<TokenPredicate>,
}

impl PredicateArena {
    pub fn new() -> Self {
        PredicateArena {
            predicates: Vec::new(),
        }
    }

    /// Add a predicate matching a single token kind
    pub fn terminal(&mut self, kind: TokenKind) -> PredicateId {
        self.push(TokenPredicate::Terminal(kind))
    }

    /// Add a predicate matching any of `members`
    pub fn disjunction(&mut self, members: impl IntoIterator<Item = PredicateId>) -> PredicateId {
        self.push(TokenPredicate::Disjunction(members.into_iter().collect()))
    }

    fn push(&mut self, predicate: TokenPredicate) -> PredicateId {
        self.predicates.push(predicate);
        PredicateId(self.predicates.len() - 1)
    }

    pub fn get(&self, id: PredicateId) -> &TokenPredicate {
        &self.predicates[id.0]
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check `token` against the predicate `id`, stopping at the first matching member
    pub fn matches(&self, id: PredicateId, token: &Token) -> bool {
        self.matches_kind(id, token.kind)
    }

    fn matches_kind(&self, id: PredicateId, kind: TokenKind) -> bool {
        match self.get(id) {
            TokenPredicate::Terminal(expected) => *expected == kind,
            TokenPredicate::Disjunction(members) => {
                members.iter().any(|member| self.matches_kind(*member, kind))
            }
        }
    }

    /// The token kinds accepted by `id`, in declaration order (for diagnostics)
    pub fn accepted_kinds(&self, id: PredicateId) -> Vec<TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(|kind| self.matches_kind(id, *kind))
            .collect()
    }
}
