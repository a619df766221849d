//! Grammar validation automaton.
//!
//! The grammar the scanner accepts:
//!
//! ```text
//! <MathExp>  ::= [<UnaryOp>] <Operand> { <BinaryOp> <Operand> }*
//! <Operand>  ::= <Variable> | <Constant> | <Number> | <Function> | '(' <MathExp> ')'
//! <Function> ::= <FunctionName> '(' <MathExp> { ',' <MathExp> }* ')'
//! ```
//!
//! It is encoded as a table of legal successor kinds keyed by the kind of the
//! previous token, so a scan is one forward pass with constant work per token.
//! Nesting and argument counts are tracked on the side with a bracket depth
//! counter and a stack of open function calls.
//!
//! | state (previous token)               | legal next tokens |
//! |--------------------------------------|-------------------|
//! | start, binary op, `(`, `,`           | variable, constant, number, function name, `(`, unary op |
//! | variable, constant, number, `)`      | binary op, `)`, `,` |
//! | unary op                             | variable, number, constant, function name, `(` |
//! | function name                        | `(` |

use std::fmt;

use log::{debug, trace};

use crate::functions::{FunctionArityTable, check_arity};
use crate::predicate::{PredicateArena, PredicateId};
use crate::token::{Token, TokenKind};
use crate::{Error, SyntaxError};

/// Automaton state: the start state, or the kind of the last accepted token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    MathExp,
    Variable,
    Constant,
    Number,
    BinaryOp,
    UnaryOp,
    LBracket,
    RBracket,
    FuncSeparator,
    FunctionName,
}

impl State {
    pub const ALL: [State; 10] = [
        State::MathExp,
        State::Variable,
        State::Constant,
        State::Number,
        State::BinaryOp,
        State::UnaryOp,
        State::LBracket,
        State::RBracket,
        State::FuncSeparator,
        State::FunctionName,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// True if the input may end in this state
    pub fn is_accepting(self) -> bool {
        matches!(
            self,
            State::Variable | State::Constant | State::Number | State::RBracket
        )
    }
}

impl From<TokenKind> for State {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Variable => State::Variable,
            TokenKind::Constant => State::Constant,
            TokenKind::Number => State::Number,
            TokenKind::BinaryOp => State::BinaryOp,
            TokenKind::UnaryOp => State::UnaryOp,
            TokenKind::FunctionName => State::FunctionName,
            TokenKind::LBracket => State::LBracket,
            TokenKind::RBracket => State::RBracket,
            TokenKind::FuncSeparator => State::FuncSeparator,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::MathExp => "start of expression",
            State::Variable => "variable",
            State::Constant => "constant",
            State::Number => "number",
            State::BinaryOp => "binary operator",
            State::UnaryOp => "unary operator",
            State::LBracket => "left bracket",
            State::RBracket => "right bracket",
            State::FuncSeparator => "argument separator",
            State::FunctionName => "function name",
        };
        f.write_str(name)
    }
}

/// Edge table of the automaton: one successor predicate per state
#[derive(Debug, Clone)]
pub struct Grammar {
    arena: PredicateArena,
    edges: [PredicateId; 10],
}

impl Grammar {
    /// Wire the arithmetic expression grammar
    pub fn arithmetic() -> Self {
        let mut arena = PredicateArena::new();

        let variable = arena.terminal(TokenKind::Variable);
        let constant = arena.terminal(TokenKind::Constant);
        let number = arena.terminal(TokenKind::Number);
        let binary_op = arena.terminal(TokenKind::BinaryOp);
        let unary_op = arena.terminal(TokenKind::UnaryOp);
        let function_name = arena.terminal(TokenKind::FunctionName);
        let lbracket = arena.terminal(TokenKind::LBracket);
        let rbracket = arena.terminal(TokenKind::RBracket);
        let func_separator = arena.terminal(TokenKind::FuncSeparator);

        let expression_start = arena.disjunction([
            variable,
            constant,
            number,
            function_name,
            lbracket,
            unary_op,
        ]);
        let after_operand = arena.disjunction([binary_op, rbracket, func_separator]);
        let after_unary = arena.disjunction([variable, number, constant, function_name, lbracket]);
        let after_function = arena.disjunction([lbracket]);

        let mut edges = [expression_start; 10];
        for state in State::ALL {
            edges[state.index()] = match state {
                State::MathExp | State::BinaryOp | State::LBracket | State::FuncSeparator => {
                    expression_start
                }
                State::Variable | State::Constant | State::Number | State::RBracket => {
                    after_operand
                }
                State::UnaryOp => after_unary,
                State::FunctionName => after_function,
            };
        }

        Grammar { arena, edges }
    }

    pub fn edge(&self, state: State) -> PredicateId {
        self.edges[state.index()]
    }

    pub fn accepts(&self, state: State, token: &Token) -> bool {
        self.arena.matches(self.edge(state), token)
    }

    /// Token kinds that may follow `state`
    pub fn successors(&self, state: State) -> Vec<TokenKind> {
        self.arena.accepted_kinds(self.edge(state))
    }

    pub fn arena(&self) -> &PredicateArena {
        &self.arena
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::arithmetic()
    }
}

/// An open function call
#[derive(Debug, Clone, PartialEq)]
struct CallFrame {
    name: String,
    arity: usize,
    separators: usize,
    /// Bracket depth just before the call's `(`
    opening_depth: usize,
}

/// Validates token sequences against the arithmetic grammar.
///
/// A scanner keeps per-scan bookkeeping, so `scan` takes `&mut self`; every
/// scan starts from a clean state and an instance can be reused for any
/// number of inputs, one at a time.
///
/// ```
/// use mathgate::{FunctionArityTable, GrammarScanner, Token};
///
/// let mut scanner = GrammarScanner::new(FunctionArityTable::default());
/// let tokens = [
///     Token::function("sin"),
///     Token::lbracket(),
///     Token::variable("x"),
///     Token::rbracket(),
/// ];
/// assert!(scanner.scan(&tokens).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GrammarScanner {
    grammar: Grammar,
    functions: FunctionArityTable,
    state: State,
    depth: usize,
    calls: Vec<CallFrame>,
}

impl Default for GrammarScanner {
    fn default() -> Self {
        GrammarScanner::new(FunctionArityTable::default())
    }
}

impl GrammarScanner {
    pub fn new(functions: FunctionArityTable) -> Self {
        GrammarScanner {
            grammar: Grammar::arithmetic(),
            functions,
            state: State::MathExp,
            depth: 0,
            calls: Vec::new(),
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn functions(&self) -> &FunctionArityTable {
        &self.functions
    }

    /// Check `tokens`, stopping at the first violation.
    ///
    /// Besides [`SyntaxError`]s this fails with [`Error::UnknownFunction`] when a
    /// function name has no entry in the arity table.
    pub fn scan(&mut self, tokens: &[Token]) -> Result<(), Error> {
        self.reset();
        let result = self.run(tokens);
        match &result {
            Ok(()) => debug!("accepted {} tokens", tokens.len()),
            Err(err) => debug!("rejected input: {}", err),
        }
        result
    }

    pub fn is_valid(&mut self, tokens: &[Token]) -> bool {
        self.scan(tokens).is_ok()
    }

    fn reset(&mut self) {
        self.state = State::MathExp;
        self.depth = 0;
        self.calls.clear();
    }

    fn run(&mut self, tokens: &[Token]) -> Result<(), Error> {
        for (position, token) in tokens.iter().enumerate() {
            self.step(position, token)?;
        }
        self.finish(tokens.len())
    }

    fn step(&mut self, position: usize, token: &Token) -> Result<(), Error> {
        let previous = self.state;
        if !self.grammar.accepts(previous, token) {
            return Err(unexpected(Some(token), previous, position));
        }

        self.state = State::from(token.kind);
        trace!("{} -> {} on '{}'", previous, self.state, token.text);

        match token.kind {
            TokenKind::FunctionName => self.enter_function(token)?,
            TokenKind::LBracket => self.depth += 1,
            TokenKind::RBracket => self.close_bracket()?,
            TokenKind::FuncSeparator => self.next_argument(token, previous, position)?,
            _ => {}
        }
        Ok(())
    }

    fn enter_function(&mut self, token: &Token) -> Result<(), Error> {
        let arity = self
            .functions
            .arity(&token.text)
            .ok_or_else(|| Error::UnknownFunction(token.text.clone()))?;
        self.calls.push(CallFrame {
            name: token.text.clone(),
            arity,
            separators: 0,
            opening_depth: self.depth,
        });
        Ok(())
    }

    fn close_bracket(&mut self) -> Result<(), Error> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or(SyntaxError::UnbalancedBrackets { missing: '(' })?;

        match self.calls.pop() {
            Some(call) if call.opening_depth == self.depth => {
                trace!("closing call to {} with {} separators", call.name, call.separators);
                check_arity(&call.name, call.arity, call.separators + 1)?;
            }
            Some(call) => self.calls.push(call),
            None => {}
        }
        Ok(())
    }

    /// A separator only counts directly inside the innermost call's own brackets
    fn next_argument(&mut self, token: &Token, previous: State, position: usize) -> Result<(), Error> {
        match self.calls.last_mut() {
            Some(call) if call.opening_depth + 1 == self.depth => {
                call.separators += 1;
                Ok(())
            }
            _ => Err(unexpected(Some(token), previous, position)),
        }
    }

    fn finish(&self, len: usize) -> Result<(), Error> {
        if self.depth > 0 {
            return Err(SyntaxError::UnbalancedBrackets { missing: ')' }.into());
        }
        if !self.state.is_accepting() {
            return Err(unexpected(None, self.state, len));
        }
        debug_assert!(self.calls.is_empty());
        Ok(())
    }
}

fn unexpected(token: Option<&Token>, state: State, position: usize) -> Error {
    SyntaxError::UnexpectedToken {
        token: token.cloned(),
        state,
        position,
    }
    .into()
}
