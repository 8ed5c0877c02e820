//! RediSearch FT.EXPLAIN parsing
//!
//! - [`token`] / [`lexer`]: scanning the textual plan
//! - [`parser`]: recursive descent into a [`SearchExpr`] syntax tree
//! - [`ast`]: the syntax tree and its conversion into [`crate::EntityInfo`]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Expr, ExprKind, GroupExpr, NumericExpr, SearchExpr, format_bound};
pub use lexer::Lexer;
pub use parser::{
    ExplainParseError, Parser, parse_explain, parse_explain_with, parse_search_expr,
};
pub use token::{Token, TokenKind};
