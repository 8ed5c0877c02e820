//! Lexer for FT.EXPLAIN output
//!
//! Scans the textual execution plan one token at a time. Newlines are
//! significant (they terminate expressions), other whitespace is skipped.
//! Characters outside the grammar become [`TokenKind::Illegal`] tokens and
//! are left for the parser to reject.

use super::token::{Token, TokenKind};

/// Tokenizer over explain text
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            finished: false,
        }
    }

    /// Tokenize the entire input, the last token is always EOF
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is(TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Get the next token, returns EOF forever once the input is exhausted
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Token::eof();
        };

        let single = |kind| Token::new(kind, ch.to_string());

        let token = match ch {
            '\n' => single(TokenKind::NewLine),
            '{' => single(TokenKind::LBrace),
            '}' => single(TokenKind::RBrace),
            '(' => single(TokenKind::LParen),
            ')' => single(TokenKind::RParen),
            // Signs stay identifiers, the parser folds them into bounds and terms
            '+' | '-' => single(TokenKind::Identifier),
            '<' => {
                if self.peek_char() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::LessEqual, "<=")
                } else {
                    single(TokenKind::Less)
                }
            }
            '>' => {
                if self.peek_char() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::GreaterEqual, ">=")
                } else {
                    single(TokenKind::Greater)
                }
            }
            '=' => {
                if self.peek_char() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Equal, "==")
                } else {
                    // No assignment in this grammar
                    single(TokenKind::Illegal)
                }
            }
            c if is_identifier_char(c) => return self.read_identifier(),
            c if c.is_ascii_digit() => return self.read_number(),
            _ => single(TokenKind::Illegal),
        };

        self.advance();
        token
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_char(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(' ' | '\t' | '\r')) {
            self.advance();
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if !accept(ch) {
                break;
            }
            self.advance();
        }
        &input[start..self.position]
    }

    fn read_identifier(&mut self) -> Token {
        let literal = self.read_while(is_identifier_char);
        Token::new(classify_identifier(literal), literal)
    }

    fn read_number(&mut self) -> Token {
        let literal = self.read_while(|c| c.is_ascii_digit() || c == '.');
        Token::new(TokenKind::Number, literal)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is(TokenKind::Eof);
        Some(token)
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '@' || c == ':'
}

/// Decides the kind of an identifier-shaped literal
fn classify_identifier(literal: &str) -> TokenKind {
    if literal.starts_with("TAG:") {
        TokenKind::TagExpr
    } else if literal.starts_with('@') && literal.ends_with(":UNION") {
        TokenKind::Union
    } else if literal.starts_with('@') && literal.ends_with(":INTERSECT") {
        TokenKind::Intersect
    } else {
        match literal {
            "inf" => TokenKind::Number,
            "UNION" => TokenKind::Union,
            "INTERSECT" => TokenKind::Intersect,
            "NUMERIC" => TokenKind::Numeric,
            _ => TokenKind::Identifier,
        }
    }
}
