//! Syntax tree of a parsed FT.EXPLAIN plan and its conversion to entities

use super::token::Token;
use crate::entity::{EntityInfo, EntityType};

/// Prefix carried by tag filter markers (`TAG:@field`)
pub const TAG_PREFIX: &str = "TAG:";

const UNION_SUFFIX: &str = ":UNION";
const INTERSECT_SUFFIX: &str = ":INTERSECT";

/// A node of the explain syntax tree
#[derive(Debug, Clone, PartialEq)]
pub enum SearchExpr {
    Expr(Expr),
    Numeric(NumericExpr),
    Union(GroupExpr),
    Intersect(GroupExpr),
}

/// Semantic flavour of a leaf expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Text,
    Tag,
    /// Reserved, the explain grammar does not produce geo leaves yet
    Geo,
}

impl ExprKind {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Text => EntityType::Text,
            Self::Tag => EntityType::Tag,
            Self::Geo => EntityType::Geo,
        }
    }
}

/// Leaf expression: a term, phrase or tag value
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub core: String,
    pub kind: ExprKind,
    /// Raw marker the expression came from, e.g. `TAG:@color`
    pub info: Option<String>,
}

impl Expr {
    pub fn text(core: impl Into<String>) -> Self {
        Self {
            core: core.into(),
            kind: ExprKind::Text,
            info: None,
        }
    }

    pub fn tag(core: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            core: core.into(),
            kind: ExprKind::Tag,
            info: Some(marker.into()),
        }
    }
}

/// Numeric range filter, `left <sign> @field <sign> right`
#[derive(Debug, Clone, PartialEq)]
pub struct NumericExpr {
    pub left: f64,
    pub left_sign: Token,
    pub identifier: Token,
    pub right_sign: Token,
    pub right: f64,
}

impl NumericExpr {
    /// Renders the range the way the plan prints it
    pub fn snippet(&self) -> String {
        format!(
            "{} {} {} {} {}",
            format_bound(self.left),
            self.left_sign.literal,
            self.identifier.literal,
            self.right_sign.literal,
            format_bound(self.right)
        )
    }
}

/// Union or intersection of sub-expressions
#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpr {
    pub exprs: Vec<SearchExpr>,
    /// Raw marker, e.g. `@title:UNION` or a bare `INTERSECT`
    pub marker: String,
}

impl GroupExpr {
    pub fn new(exprs: Vec<SearchExpr>, marker: impl Into<String>) -> Self {
        Self {
            exprs,
            marker: marker.into(),
        }
    }

    /// Field part of the marker, `None` for a bare keyword
    fn field(&self, suffix: &str) -> Option<String> {
        self.marker
            .find(suffix)
            .map(|idx| self.marker[..idx].to_string())
    }
}

impl SearchExpr {
    /// Converts the syntax tree into an entity tree with fresh identifiers
    pub fn to_entity(&self) -> EntityInfo {
        match self {
            Self::Expr(expr) => {
                let mut node = EntityInfo::new(EntityType::Expr)
                    .with_sub_type(expr.kind.entity_type())
                    .with_data(expr.core.clone());
                if expr.kind == ExprKind::Tag
                    && let Some(field) = expr.info.as_deref().and_then(|i| i.strip_prefix(TAG_PREFIX))
                {
                    node = node.with_snippet(field);
                }
                node
            }
            Self::Numeric(numeric) => EntityInfo::new(EntityType::Numeric)
                .with_data("Numeric")
                .with_snippet(numeric.snippet()),
            Self::Union(group) => group_entity(EntityType::Union, group.field(UNION_SUFFIX), group),
            Self::Intersect(group) => {
                group_entity(EntityType::Intersect, group.field(INTERSECT_SUFFIX), group)
            }
        }
    }
}

fn group_entity(entity_type: EntityType, snippet: Option<String>, group: &GroupExpr) -> EntityInfo {
    let mut node = EntityInfo::new(entity_type);
    node.snippet = snippet;
    node.with_children(group.exprs.iter().map(SearchExpr::to_entity))
}

/// Formats a range bound, infinity prints as `inf` like the plan does
pub fn format_bound(value: f64) -> String {
    if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        value.to_string()
    }
}
