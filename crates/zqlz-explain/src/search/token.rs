//! Tokens of the FT.EXPLAIN text grammar

use std::fmt;

/// Kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Illegal,

    Union,
    Intersect,
    TagExpr,
    Numeric,

    LBrace,
    RBrace,
    LParen,
    RParen,
    Number,
    NewLine,

    Less,
    Greater,
    Equal,
    LessEqual,
    GreaterEqual,

    Identifier,
}

impl TokenKind {
    /// Returns the name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Illegal => "ILLEGAL",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::TagExpr => "TAG_EXPR",
            Self::Numeric => "NUMERIC",
            Self::LBrace => "LBRACE",
            Self::RBrace => "RBRACE",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Number => "NUMBER",
            Self::NewLine => "NEW_LINE",
            Self::Less => "LESS",
            Self::Greater => "GREATER",
            Self::Equal => "EQUAL",
            Self::LessEqual => "LESS_EQUAL",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Identifier => "IDENTIFIER",
        }
    }

    /// Returns true for the range comparators allowed inside `NUMERIC {}`
    pub fn is_comparator(&self) -> bool {
        matches!(
            self,
            Self::Less | Self::Greater | Self::Equal | Self::LessEqual | Self::GreaterEqual
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token together with the literal text it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
