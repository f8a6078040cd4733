use std::fmt;

/// Opaque identifier for one classification option. Identity is the token
/// itself, never rendered text, so parsing rejects anything that would
/// round-trip differently through a display layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagToken(String);

impl TagToken {
    pub fn parse(value: &str) -> Result<Self, TagTokenError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TagTokenError::Empty);
        }
        if trimmed.len() != value.len() {
            return Err(TagTokenError::UntrimmedWhitespace);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TagToken {
    type Err = TagTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTokenError {
    Empty,
    UntrimmedWhitespace,
}

impl fmt::Display for TagTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagTokenError::Empty => write!(f, "tag token must not be empty"),
            TagTokenError::UntrimmedWhitespace => {
                write!(f, "tag token must not carry leading or trailing whitespace")
            }
        }
    }
}

impl std::error::Error for TagTokenError {}
