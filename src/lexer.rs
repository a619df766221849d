//! Tokenizer for arithmetic expressions.
//!
//! Produces the classified tokens the [`GrammarScanner`] consumes:
//!
//! - numbers: `12`, `3.5`, `10.`, `1e-3`, `2.5E+4`
//! - identifiers `[A-Za-z_][A-Za-z0-9_]*`: a function name when the arity table
//!   knows it, a constant for `pi` and `e`, otherwise a variable
//! - `+ * / ^` binary operators; `-` is unary at the start of the input and after
//!   `(`, `,` or another operator, binary everywhere else
//! - `(`, `)` and the argument separator `,`
//!
//! Positions in errors are byte offsets into the input.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit0, digit1, multispace0, one_of, satisfy},
    combinator::{map, opt, recognize, value},
    sequence::{pair, tuple},
};

use crate::Error;
use crate::evaluator::is_standard_constant;
use crate::functions::FunctionArityTable;
use crate::scanner::GrammarScanner;
use crate::token::{Token, TokenKind};

/// Unclassified lexical unit
#[derive(Debug, Clone, PartialEq)]
enum Lexeme<'a> {
    Number(&'a str),
    Identifier(&'a str),
    Operator(char),
    LBracket,
    RBracket,
    Separator,
}

/// Parse a number with optional fraction and exponent
fn parse_number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        digit1,
        opt(pair(char('.'), digit0)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn parse_lexeme(input: &str) -> IResult<&str, Lexeme<'_>> {
    alt((
        map(parse_number, Lexeme::Number),
        map(parse_identifier, Lexeme::Identifier),
        map(one_of("+-*/^"), Lexeme::Operator),
        value(Lexeme::LBracket, char('(')),
        value(Lexeme::RBracket, char(')')),
        value(Lexeme::Separator, char(',')),
    ))(input)
}

/// True when a `-` at this point must be a sign rather than a subtraction
fn expects_operand(previous: Option<&Token>) -> bool {
    previous.is_none_or(|token| {
        matches!(
            token.kind,
            TokenKind::LBracket | TokenKind::FuncSeparator | TokenKind::BinaryOp | TokenKind::UnaryOp
        )
    })
}

fn classify(lexeme: Lexeme<'_>, previous: Option<&Token>, functions: &FunctionArityTable) -> Token {
    match lexeme {
        Lexeme::Number(text) => Token::number(text),
        Lexeme::Identifier(name) if functions.contains(name) => Token::function(name),
        Lexeme::Identifier(name) if is_standard_constant(name) => Token::constant(name),
        Lexeme::Identifier(name) => Token::variable(name),
        Lexeme::Operator('-') if expects_operand(previous) => Token::unary_op("-"),
        Lexeme::Operator(op) => Token::new(TokenKind::BinaryOp, op.to_string()),
        Lexeme::LBracket => Token::lbracket(),
        Lexeme::RBracket => Token::rbracket(),
        Lexeme::Separator => Token::separator(),
    }
}

/// Split `input` into classified tokens.
///
/// Function names are recognized through `functions`, so the same text can
/// tokenize differently under different dialects.
pub fn tokenize(input: &str, functions: &FunctionArityTable) -> Result<Vec<Token>, Error> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) =
            multispace0::<&str, nom::error::Error<&str>>(remaining).unwrap_or((remaining, ""));
        if rest.is_empty() {
            break;
        }

        let position = input.len() - rest.len();
        match parse_lexeme(rest) {
            Ok((rest, lexeme)) => {
                let token = classify(lexeme, tokens.last(), functions);
                tokens.push(token);
                remaining = rest;
            }
            Err(_) => {
                let found = rest.chars().next().unwrap_or_default();
                return Err(Error::Lex {
                    position,
                    message: format!("unexpected character '{}'", found),
                });
            }
        }
    }

    Ok(tokens)
}

/// Tokenize `input` with the scanner's function table and validate it.
/// Returns the tokens on success, ready for a tree builder.
pub fn check(input: &str, scanner: &mut GrammarScanner) -> Result<Vec<Token>, Error> {
    let tokens = tokenize(input, scanner.functions())?;
    scanner.scan(&tokens)?;
    Ok(tokens)
}
