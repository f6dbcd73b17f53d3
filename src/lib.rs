//! fortran_pt is a recursive descent parser for free-form and fixed-form Fortran 2003/2008
//! source which produces a concrete syntax tree ([CST](CstNode)).
//!
//! # Overview
//! Every node of the produced tree corresponds directly to a numbered production of the
//! Fortran standard (R201, R304, R706, ...), so downstream tools such as refactoring
//! engines and static analyzers can traverse the tree without re-deriving lexical detail.
//! The grammar is realized by a table-driven matcher: each production is a variant of the
//! closed [Rule] universe, and the registry stores for each variant its ordered
//! alternative list together with an optional structural shape which the
//! generic matcher knows how to execute (keyword + payload, binary operator, bracketed
//! payload, keyword=value, separated list, block construct, ...). Productions whose
//! matching cannot be expressed by a shape carry a bespoke match function.
//!
//! Fortran grammar is ambiguous without semantic context (`A(I)` may be an array element,
//! a function call or a substring), so the matcher backtracks freely: a failed
//! alternative rewinds the [reader](FortranReader) to the position it started from and
//! the next alternative is tried. Failures are therefore cheap [no-match](MatchErr)
//! signals; only the outermost rule converts an unmatchable input into a
//! [ParseError] pointing at the deepest source line the reader reached.
//!
//! # Example
//!
//! ```
//! use fortran_pt::{Dialect, FortranParser};
//!
//! let parser = FortranParser::new(Dialect::F2008);
//! let tree = parser
//!     .parse("submodule (foobar) bar\nend\n")
//!     .unwrap();
//! assert_eq!(
//!     tree.to_string(),
//!     "SUBMODULE (foobar) bar\nEND SUBMODULE bar"
//! );
//! ```
//!
//! # License
//! [fortran_pt](crate) is provided under the MIT license.
mod error;
mod kernel;
mod node;
mod parser;
mod pattern;
mod position;
mod reader;
mod render;
mod rules;
mod splitline;

#[cfg(test)]
mod __tests__;

pub use parser::FortranParser;
pub use reader::{CommentItem, FortranReader, SourceForm, SourceItem, StmtItem};
pub use rules::{BaseRule, NameKind, Rule};
pub use splitline::{string_replace_map, ReplaceMap};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
/// The line and column information at a source point.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The Fortran standard the parser accepts. [F2008](Dialect::F2008) is the
/// F2003 rule set with the submodule rules added and `do-term-action-stmt`
/// narrowed per constraint C816; overridden rules are substituted, not
/// duplicated.
pub enum Dialect {
    F2003,
    F2008,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Non-standard constructs the parser may be told to accept. Every flag is
/// off unless explicitly enabled, and the set is per parser instance so that
/// parses with different extension sets can run concurrently.
pub struct Extensions {
    /// Accept a bare `X` edit descriptor without a leading count.
    pub x_format: bool,
    /// Accept the `$` control edit descriptor.
    pub dollar_edit: bool,
    /// Accept `BYTE` as an intrinsic type.
    pub byte_type: bool,
    /// Accept `DOUBLE COMPLEX` as an intrinsic type.
    pub double_complex: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One positional child of a [CstNode]. The items tuple of a node mixes
/// sub-trees with leaf strings; optional positions that did not match hold
/// [Absent](Item::Absent).
pub enum Item {
    Tree(CstNode),
    Word(String),
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Back-pointer from a statement node to the reader item it was built from.
/// `at` is the 1-based line and column where the statement starts on its
/// first physical line, `raw` is that line verbatim (for error echo), and
/// the numeric label / construct name the reader stripped are exposed too.
pub struct SourceRef {
    pub at: Position,
    pub end_line: usize,
    pub raw: String,
    pub label: Option<String>,
    pub name: Option<String>,
}

#[derive(Clone)]
/// Concrete syntax tree node. `rule` names the production the node
/// instantiates and `items` is the production's fixed-arity children tuple.
/// Rendering a node with `to_string()` yields canonical Fortran which
/// re-parses to an equal tree. Equality compares rule tags and items;
/// the source back-pointer is ignored, so a re-parsed rendering compares
/// equal to the tree it came from.
pub struct CstNode {
    pub rule: Rule,
    pub items: Vec<Item>,
    pub src: Option<SourceRef>,
}

#[derive(Debug, Clone)]
/// An error surfaced to the caller when the source is not valid Fortran.
/// `line` and `column` are the 1-based position in the original physical
/// source where the offending statement starts; `source` is that line
/// verbatim.
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone)]
/// Failure signal inside the grammar engine.
///
/// [NoMatch](MatchErr::NoMatch) is the backtracking workhorse: it tells the
/// enclosing rule to restore the reader and try its next alternative, and it
/// never escapes the top-level parse call. [Syntax](MatchErr::Syntax) aborts
/// the enclosing construct (for example a construct-name mismatch on an end
/// statement). [Internal](MatchErr::Internal) indicates a bug in the grammar
/// tables themselves and aborts unconditionally.
pub enum MatchErr {
    NoMatch,
    Syntax(ParseError),
    Internal(String),
}

/// Result of any single rule-match attempt.
pub type MatchResult<T> = Result<T, MatchErr>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// A leveled debug label which can be attached to a parser to trace rule
/// entry, success and failure while developing the grammar tables.
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}
