//! Logical combinators between sibling filters.

/// Conjunction joining a node to its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Conjunction {
    /// Logical AND.
    #[default]
    And,
    /// Logical OR.
    Or,
    /// Any other combinator understood by the evaluator.
    Other(String),
}

impl Conjunction {
    /// Parse a conjunction name. Only the exact spellings `and` and `or`
    /// map to the named variants; anything else keeps its spelling.
    pub fn parse(name: &str) -> Self {
        match name {
            "and" => Self::And,
            "or" => Self::Or,
            other => Self::Other(other.to_string()),
        }
    }

    /// The conjunction name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Conjunction {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for Conjunction {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl std::fmt::Display for Conjunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
