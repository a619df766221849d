//! Grammar gate and numeric evaluator for arithmetic expressions.
//!
//! Expressions pass through two independent components:
//!
//! - [`GrammarScanner`] checks that a sequence of classified [`Token`]s forms a
//!   legal expression (operators, operands, brackets, function calls with a fixed
//!   number of arguments) in a single forward pass.
//! - [`ExprNode`] is an immutable expression tree that evaluates to an `f64`
//!   against an [`Environment`] of variable and constant values.
//!
//! ```text
//! text --lexer--> tokens --GrammarScanner--> (tree builder) --> ExprNode --evaluate--> f64
//! ```
//!
//! The lexer (feature `lexer`) is a convenience front end; the scanner only
//! depends on token classification. Building trees from tokens is left to the
//! caller.

use std::fmt;

use crate::scanner::State;

/// Direction of an argument count mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityMismatchKind {
    TooFew,
    TooMany,
}

impl fmt::Display for ArityMismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityMismatchKind::TooFew => f.write_str("too few"),
            ArityMismatchKind::TooMany => f.write_str("too many"),
        }
    }
}

/// Grammar violations reported by [`GrammarScanner::scan`]. The scan stops at the first one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    /// The token is not a legal successor in `state`. `token` is `None` when
    /// the input ended while an operand was still required.
    #[error("{}", unexpected_message(.token, .state, .position))]
    UnexpectedToken {
        token: Option<Token>,
        state: State,
        position: usize,
    },
    /// A function call closed with the wrong number of arguments
    #[error("{kind} arguments in {function}: expected {expected}, got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
        kind: ArityMismatchKind,
    },
    /// Brackets do not pair up; `missing` is the bracket that would fix it
    #[error("unbalanced brackets: missing '{missing}'")]
    UnbalancedBrackets { missing: char },
}

fn unexpected_message(token: &Option<Token>, state: &State, position: &usize) -> String {
    match token {
        Some(token) => format!("unexpected token {} at position {} after {}", token, position, state),
        None => format!("unexpected end of input after {}", state),
    }
}

/// Error types for the crate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// A function name that the arity table does not know
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    /// A variable or constant without a value in the environment
    #[error("unbound name: {0}")]
    UnboundName(String),
    #[error("lexical error at position {position}: {message}")]
    Lex { position: usize, message: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The grammar violation, if this is one
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Error::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

pub mod evaluator;
pub mod functions;
#[cfg(feature = "lexer")]
pub mod lexer;
pub mod predicate;
pub mod scanner;
pub mod token;
pub mod tree;

pub use evaluator::{Environment, UnivariateFunction};
pub use functions::FunctionArityTable;
pub use scanner::GrammarScanner;
pub use token::{Token, TokenKind};
pub use tree::{BinaryOp, ExprNode, Leaf, UnaryOp};
