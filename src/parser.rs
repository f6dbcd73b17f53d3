use crate::reader::FortranReader;
use crate::rules::{self, b, BaseRule, Rule, RuleSpec};
use crate::{CstNode, Dialect, Extensions, Log, MatchErr, ParseError, Position, SourceForm};

/// Parser front end. Owns the dialect, the extension flag set, comment
/// preservation and the source form; one instance can run any number of
/// parses, and instances with different settings can run concurrently
/// because all configuration is per instance.
pub struct FortranParser {
    dialect: Dialect,
    extensions: Extensions,
    preserve_comments: bool,
    form: SourceForm,
    log: Log<&'static str>,
}

impl FortranParser {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            extensions: Extensions::default(),
            preserve_comments: false,
            form: SourceForm::Free,
            log: Log::None,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn set_extensions(&mut self, extensions: Extensions) -> &mut Self {
        self.extensions = extensions;
        self
    }

    /// Surface comments as sibling nodes in the tree instead of dropping
    /// them in the reader.
    pub fn preserve_comments(&mut self, preserve: bool) -> &mut Self {
        self.preserve_comments = preserve;
        self
    }

    pub fn set_form(&mut self, form: SourceForm) -> &mut Self {
        self.form = form;
        self
    }

    /// Set a log label to trace rule matching while developing the grammar
    /// tables; output only appears in debug builds.
    pub fn set_log(&mut self, log: Log<&'static str>) -> &mut Self {
        self.log = log;
        self
    }

    /// Parse in-memory source into a CST rooted at a `Program` node. Empty
    /// input is valid and yields an empty program.
    pub fn parse(&self, source: &str) -> Result<CstNode, ParseError> {
        let mut reader = FortranReader::with_form(self.form, source, self.preserve_comments);
        self.parse_reader(&mut reader)
    }

    /// Parse from an already-constructed reader (used to select fixed form
    /// or to share reader configuration across parses).
    pub fn parse_reader(&self, reader: &mut FortranReader) -> Result<CstNode, ParseError> {
        match self.match_reader(b(BaseRule::Program), reader) {
            Ok(node) => Ok(node),
            Err(MatchErr::NoMatch) => {
                let (at, raw) = reader.deepest();
                let hint = reader
                    .deepest_hint
                    .map(|rule| format!("in {}", rule))
                    .unwrap_or_default();
                Err(ParseError::new(at, raw.to_string(), hint))
            }
            Err(MatchErr::Syntax(err)) => Err(err),
            Err(MatchErr::Internal(what)) => {
                Err(ParseError::new(Position::new(0, 1), String::new(), what))
            }
        }
    }

    /// Resolve a rule through the active dialect: the F2008 table first
    /// (substituting overridden rules), falling back to the F2003 table.
    pub(crate) fn spec_of(&self, rule: Rule) -> RuleSpec {
        if self.dialect == Dialect::F2008 {
            if let Some(spec) = rules::f2008::override_spec(rule) {
                return spec;
            }
        }
        rules::spec(rule)
    }

    pub(crate) fn trace(&self, rule: Rule, outcome: &str) {
        if let Log::Verbose(label) = self.log {
            #[cfg(debug_assertions)]
            println!("[{}] {}: {}", label, rule, outcome);
            #[cfg(not(debug_assertions))]
            let _ = (label, rule, outcome);
        }
    }
}
