use std::fmt;

/// Classification of a lexical unit, as produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Variable,
    Constant,
    Number,
    BinaryOp,
    UnaryOp,
    FunctionName,
    LBracket,
    RBracket,
    FuncSeparator,
}

impl TokenKind {
    /// Every kind, in declaration order
    pub const ALL: [TokenKind; 9] = [
        TokenKind::Variable,
        TokenKind::Constant,
        TokenKind::Number,
        TokenKind::BinaryOp,
        TokenKind::UnaryOp,
        TokenKind::FunctionName,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::FuncSeparator,
    ];
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Variable => "variable",
            TokenKind::Constant => "constant",
            TokenKind::Number => "number",
            TokenKind::BinaryOp => "binary operator",
            TokenKind::UnaryOp => "unary operator",
            TokenKind::FunctionName => "function name",
            TokenKind::LBracket => "left bracket",
            TokenKind::RBracket => "right bracket",
            TokenKind::FuncSeparator => "argument separator",
        };
        f.write_str(name)
    }
}

/// A classified token. `text` is only used for diagnostics and function lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn variable(name: &str) -> Self {
        Token::new(TokenKind::Variable, name)
    }

    pub fn constant(name: &str) -> Self {
        Token::new(TokenKind::Constant, name)
    }

    pub fn number(text: &str) -> Self {
        Token::new(TokenKind::Number, text)
    }

    pub fn binary_op(symbol: &str) -> Self {
        Token::new(TokenKind::BinaryOp, symbol)
    }

    pub fn unary_op(symbol: &str) -> Self {
        Token::new(TokenKind::UnaryOp, symbol)
    }

    pub fn function(name: &str) -> Self {
        Token::new(TokenKind::FunctionName, name)
    }

    pub fn lbracket() -> Self {
        Token::new(TokenKind::LBracket, "(")
    }

    pub fn rbracket() -> Self {
        Token::new(TokenKind::RBracket, ")")
    }

    pub fn separator() -> Self {
        Token::new(TokenKind::FuncSeparator, ",")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.text, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        assert_eq!(Token::variable("x").to_string(), "'x' (variable)");
        assert_eq!(Token::rbracket().to_string(), "')' (right bracket)");
        assert_eq!(Token::function("sin").to_string(), "'sin' (function name)");
    }
}
