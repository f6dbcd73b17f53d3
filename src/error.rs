use crate::{MatchErr, ParseError, Position};
use std::fmt::{Display, Formatter};

impl ParseError {
    pub fn new(at: Position, source: String, message: String) -> Self {
        Self {
            line: at.line,
            column: at.column,
            source,
            message,
        }
    }

    /// Position of the offending statement in the physical source.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "at line {}", self.line)?;
        writeln!(f, ">>>{}", self.source)?;
        if !self.message.is_empty() {
            writeln!(f, "{}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl MatchErr {
    pub fn is_nomatch(&self) -> bool {
        matches!(self, MatchErr::NoMatch)
    }

    /// Whether the error must abort the enclosing construct instead of
    /// triggering the next alternative.
    pub fn is_fatal(&self) -> bool {
        !self.is_nomatch()
    }

    pub fn internal(message: impl Into<String>) -> Self {
        MatchErr::Internal(message.into())
    }
}

impl Display for MatchErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchErr::NoMatch => write!(f, "NoMatch"),
            MatchErr::Syntax(err) => write!(f, "SyntaxError: {}", err),
            MatchErr::Internal(what) => write!(f, "InternalError: {}", what),
        }
    }
}
