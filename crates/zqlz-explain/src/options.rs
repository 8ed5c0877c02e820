//! Parser limits shared by every entry point

use serde::{Deserialize, Serialize};

/// Default cap on tree nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling how explain and profile output is parsed
///
/// All parsers recurse once per nesting level, so `max_depth` bounds stack
/// usage for adversarial input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum nesting depth of the produced tree
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
