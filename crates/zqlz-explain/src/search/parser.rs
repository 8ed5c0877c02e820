//! Recursive-descent parser for FT.EXPLAIN output
//!
//! The plan printed by `FT.EXPLAIN` looks like:
//!
//! ```text
//! INTERSECT {
//!   @title:UNION {
//!     @title:hello
//!     @title:+hello(expanded)
//!   }
//!   NUMERIC {10.000000 <= @price <= inf}
//!   TAG:@color {
//!     red
//!   }
//! }
//! ```
//!
//! Grammar:
//!
//! ```text
//! expr     := group | numeric | tag | term
//! group    := (UNION | INTERSECT) '{' NEWLINE (expr | NEWLINE)* '}' [NEWLINE]
//! numeric  := NUMERIC '{' bound CMP IDENTIFIER+ CMP bound '}'
//! bound    := ['+' | '-'] NUMBER
//! tag      := TAG_EXPR '{' NEWLINE IDENTIFIER NEWLINE '}'
//! term     := IDENTIFIER any* NEWLINE
//! ```
//!
//! Inside a group, a line that cannot start an expression is skipped.
//! Otherwise parsing is fail-fast: the first token that does not fit aborts
//! the parse.
//!
//! # Examples
//!
//! ```
//! use zqlz_explain::search::parse_explain;
//! use zqlz_explain::EntityType;
//!
//! let root = parse_explain("@title:UNION {\n  hello\n  world\n}\n").unwrap();
//! assert_eq!(root.entity_type, EntityType::Union);
//! assert_eq!(root.snippet.as_deref(), Some("@title"));
//! assert_eq!(root.children.len(), 2);
//! ```

use super::ast::{Expr, GroupExpr, NumericExpr, SearchExpr};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::entity::EntityInfo;
use crate::options::ParseOptions;
use thiserror::Error;

/// Errors that can occur when parsing FT.EXPLAIN output
#[derive(Debug, Error, PartialEq)]
pub enum ExplainParseError {
    #[error("Expected {expected}, actual: {actual} ({literal:?})")]
    UnexpectedToken {
        expected: String,
        actual: TokenKind,
        literal: String,
    },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Plan nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),
}

/// Result type for FT.EXPLAIN parsing
pub type Result<T> = std::result::Result<T, ExplainParseError>;

/// Parses FT.EXPLAIN output into an entity tree
pub fn parse_explain(output: &str) -> Result<EntityInfo> {
    parse_explain_with(output, &ParseOptions::default())
}

/// Parses FT.EXPLAIN output into an entity tree with explicit limits
pub fn parse_explain_with(output: &str, options: &ParseOptions) -> Result<EntityInfo> {
    let expr = parse_search_expr(output, options)?;
    let root = expr.to_entity();
    tracing::debug!(nodes = root.node_count(), root = %root.entity_type, "parsed explain output");
    Ok(root)
}

/// Parses FT.EXPLAIN output into its syntax tree
pub fn parse_search_expr(output: &str, options: &ParseOptions) -> Result<SearchExpr> {
    let mut parser = Parser::new(Lexer::new(output), *options);
    let expr = parser.parse_expression()?;
    if !matches!(parser.current.kind, TokenKind::Eof | TokenKind::NewLine) {
        tracing::trace!(next = %parser.current.kind, "ignoring input after the top-level expression");
    }
    Ok(expr)
}

/// Parser state: the current token plus one token of lookahead
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>, options: ParseOptions) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            depth: 0,
            options,
        }
    }

    fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Consumes the current token if it has the expected kind
    fn expect(&mut self, kind: TokenKind) -> Result<String> {
        if self.current.is(kind) {
            let literal = std::mem::take(&mut self.current.literal);
            self.advance();
            Ok(literal)
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    fn expect_comparator(&mut self) -> Result<Token> {
        if self.current.kind.is_comparator() {
            let token = self.current.clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected("comparator"))
        }
    }

    fn unexpected(&self, expected: &str) -> ExplainParseError {
        if self.current.is(TokenKind::Eof) {
            ExplainParseError::UnexpectedEof
        } else {
            ExplainParseError::UnexpectedToken {
                expected: expected.to_string(),
                actual: self.current.kind,
                literal: self.current.literal.clone(),
            }
        }
    }

    /// Parses one expression, dispatching on the current token
    pub fn parse_expression(&mut self) -> Result<SearchExpr> {
        if self.depth >= self.options.max_depth {
            return Err(ExplainParseError::DepthLimitExceeded(self.options.max_depth));
        }
        self.depth += 1;
        let expr = match self.current.kind {
            TokenKind::Intersect => self.parse_group(TokenKind::Intersect).map(SearchExpr::Intersect),
            TokenKind::Union => self.parse_group(TokenKind::Union).map(SearchExpr::Union),
            TokenKind::Numeric => self.parse_numeric().map(SearchExpr::Numeric),
            TokenKind::TagExpr => self.parse_tag().map(SearchExpr::Expr),
            _ => self.parse_term().map(SearchExpr::Expr),
        };
        self.depth -= 1;
        expr
    }

    fn parse_group(&mut self, kind: TokenKind) -> Result<GroupExpr> {
        let marker = self.expect(kind)?;
        self.expect(TokenKind::LBrace)?;
        self.expect(TokenKind::NewLine)?;

        let mut exprs = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::RBrace => {
                    if !matches!(self.peek.kind, TokenKind::NewLine | TokenKind::Eof) {
                        self.advance();
                        return Err(self.unexpected(TokenKind::NewLine.name()));
                    }
                    self.advance();
                    break;
                }
                TokenKind::NewLine => self.advance(),
                TokenKind::Numeric
                | TokenKind::Identifier
                | TokenKind::Union
                | TokenKind::Intersect
                | TokenKind::TagExpr => exprs.push(self.parse_expression()?),
                TokenKind::Eof => return Err(ExplainParseError::UnexpectedEof),
                _ => self.skip_line(),
            }
        }

        Ok(GroupExpr::new(exprs, marker))
    }

    /// Drops a group line that cannot start an expression, e.g. `<WILDCARD>`
    fn skip_line(&mut self) {
        tracing::trace!(
            token = %self.current.kind,
            literal = %self.current.literal,
            "skipping unrecognized line inside group"
        );
        while !matches!(
            self.current.kind,
            TokenKind::NewLine | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.advance();
        }
    }

    fn parse_numeric(&mut self) -> Result<NumericExpr> {
        self.expect(TokenKind::Numeric)?;
        self.expect(TokenKind::LBrace)?;

        let left = self.parse_bound()?;
        let left_sign = self.expect_comparator()?;

        // Field names may lex as several identifiers, stitch them back together
        let mut identifier = Token::new(TokenKind::Identifier, self.expect(TokenKind::Identifier)?);
        while self.current.is(TokenKind::Identifier) {
            identifier.literal.push_str(&self.current.literal);
            self.advance();
        }

        let right_sign = self.expect_comparator()?;
        let right = self.parse_bound()?;
        self.expect(TokenKind::RBrace)?;

        Ok(NumericExpr {
            left,
            left_sign,
            identifier,
            right_sign,
            right,
        })
    }

    fn parse_bound(&mut self) -> Result<f64> {
        let mut negative = false;
        if self.current.is(TokenKind::Identifier)
            && matches!(self.current.literal.as_str(), "+" | "-")
            && self.peek.is(TokenKind::Number)
        {
            negative = self.current.literal == "-";
            self.advance();
        }

        let literal = self.expect(TokenKind::Number)?;
        let value = if literal == "inf" {
            f64::INFINITY
        } else {
            literal
                .parse::<f64>()
                .map_err(|_| ExplainParseError::InvalidNumber(literal.clone()))?
        };

        Ok(if negative { -value } else { value })
    }

    fn parse_tag(&mut self) -> Result<Expr> {
        let marker = self.expect(TokenKind::TagExpr)?;
        self.expect(TokenKind::LBrace)?;
        self.expect(TokenKind::NewLine)?;
        let value = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::NewLine)?;
        self.expect(TokenKind::RBrace)?;

        Ok(Expr::tag(value, marker))
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut core = self.expect(TokenKind::Identifier)?;

        loop {
            match self.current.kind {
                TokenKind::NewLine => break,
                TokenKind::Eof => return Err(ExplainParseError::UnexpectedEof),
                // Field names and values may hold characters outside the grammar (`_`, non-ASCII)
                _ => {
                    core.push_str(&self.current.literal);
                    self.advance();
                }
            }
        }

        Ok(Expr::text(core))
    }
}
