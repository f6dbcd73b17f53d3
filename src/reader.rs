//! The line reader: turns physical Fortran source into a FIFO stream of
//! logical items (statement lines, comments) with arbitrary-depth put-back.
//!
//! Free-form reading joins `&` continuations, protects character literals
//! from `!` and `&`, splits statements at top-level `;`, and strips a
//! leading numeric label (R313) and an optional `name:` construct label,
//! both of which are exposed on the item. Fixed-form reading additionally
//! understands column-1 comment markers, columns 1-5 labels and the
//! column-6 continuation marker.

use crate::rules::Rule;
use crate::Position;
use once_cell::sync::Lazy;
use regex::Regex;

static STMT_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{1,5})(?:\s+|$)").unwrap());
static CONSTRUCT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]*)\s*:").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Physical layout of the source handed to the reader. Free form is the
/// default everywhere else in the crate.
pub enum SourceForm {
    Free,
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A logical statement line: continuation-joined, comment-stripped text,
/// the 1-based physical line span it came from, the raw first physical line
/// (kept verbatim for error echo), and the label / construct name the
/// reader stripped off the front. `column` is the 1-based column of the
/// first non-blank character on the first physical line.
pub struct StmtItem {
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub raw: String,
    pub label: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A comment, surfaced as its own item when comment preservation is on.
/// `column` is the 1-based column of the comment marker.
pub struct CommentItem {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceItem {
    Stmt(StmtItem),
    Comment(CommentItem),
}

impl SourceItem {
    pub fn as_stmt(&self) -> Option<&StmtItem> {
        match self {
            SourceItem::Stmt(item) => Some(item),
            SourceItem::Comment(_) => None,
        }
    }
}

/// FIFO stream of [SourceItem]s with positional rewind. All items are
/// produced up front; `next`/`put_item` move a cursor, so backtracking any
/// number of items is a cheap cursor assignment and a failed match can
/// always restore the exact pre-call position.
pub struct FortranReader {
    items: Vec<SourceItem>,
    pos: usize,
    deepest_line: usize,
    deepest_column: usize,
    deepest_raw: String,
    pub(crate) deepest_hint: Option<Rule>,
    pub(crate) pending_do_labels: Vec<String>,
}

impl FortranReader {
    pub fn free_form(source: &str, preserve_comments: bool) -> Self {
        Self::from_items(split_free_form(source, preserve_comments))
    }

    pub fn fixed_form(source: &str, preserve_comments: bool) -> Self {
        Self::from_items(split_fixed_form(source, preserve_comments))
    }

    pub fn with_form(form: SourceForm, source: &str, preserve_comments: bool) -> Self {
        match form {
            SourceForm::Free => Self::free_form(source, preserve_comments),
            SourceForm::Fixed => Self::fixed_form(source, preserve_comments),
        }
    }

    fn from_items(items: Vec<SourceItem>) -> Self {
        Self {
            items,
            pos: 0,
            deepest_line: 0,
            deepest_column: 1,
            deepest_raw: String::new(),
            deepest_hint: None,
            pending_do_labels: Vec::new(),
        }
    }

    /// Next item in source order, or `None` at end of stream.
    pub fn next_item(&mut self) -> Option<SourceItem> {
        let item = self.items.get(self.pos)?.clone();
        self.pos += 1;
        if let SourceItem::Stmt(stmt) = &item {
            if stmt.line >= self.deepest_line {
                self.deepest_line = stmt.line;
                self.deepest_column = stmt.column;
                self.deepest_raw = stmt.raw.clone();
                self.deepest_hint = None;
            }
        }
        Some(item)
    }

    /// Return the given item to the front of the stream. The reader hands
    /// out clones of an immutable item list, so returning an item is a
    /// cursor step; the argument is only sanity-checked.
    pub fn put_item(&mut self, item: SourceItem) {
        debug_assert!(self.pos > 0, "put_item with no item outstanding");
        debug_assert_eq!(self.items[self.pos - 1], item, "put_item out of order");
        let _ = item;
        self.pos -= 1;
    }

    pub fn peek(&self) -> Option<&SourceItem> {
        self.items.get(self.pos)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.items.len()
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.pos
    }

    pub(crate) fn rewind_to(&mut self, checkpoint: usize) {
        debug_assert!(checkpoint <= self.items.len());
        self.pos = checkpoint;
    }

    /// Record the rule being attempted against the deepest line reached,
    /// used as the hint of a surfaced syntax error.
    pub(crate) fn note_hint(&mut self, line: usize, rule: Rule) {
        if line >= self.deepest_line && self.deepest_hint.is_none() {
            self.deepest_hint = Some(rule);
        }
    }

    /// Deepest physical position the reader has handed out, with the raw
    /// text of that line.
    pub(crate) fn deepest(&self) -> (Position, &str) {
        (
            Position::new(self.deepest_line.max(1), self.deepest_column),
            &self.deepest_raw,
        )
    }
}

/// Scan `code` for an unquoted `!`, tracking quote state that may have been
/// carried in from a previous continuation line. Returns the code part, the
/// optional comment part and the quote state at the end of the code part.
fn split_comment(code: &str, mut in_quote: Option<char>) -> (String, Option<String>, Option<char>) {
    let chars: Vec<char> = code.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        match in_quote {
            Some(q) => {
                if c == q {
                    if chars.get(i + 1) == Some(&q) {
                        i += 1;
                    } else {
                        in_quote = None;
                    }
                }
            }
            None => {
                if c == '\'' || c == '"' {
                    in_quote = Some(c);
                } else if c == '!' {
                    let code_part: String = chars[..i].iter().collect();
                    let comment: String = chars[i..].iter().collect();
                    return (code_part, Some(comment), None);
                }
            }
        }
        i += 1;
    }
    (code.to_string(), None, in_quote)
}

/// Split a complete logical line at top-level semicolons.
fn split_statements(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        match in_quote {
            Some(q) if c == q => {
                if chars.get(i + 1) == Some(&q) {
                    current.push(c);
                    current.push(c);
                    i += 2;
                    continue;
                }
                in_quote = None;
                current.push(c);
            }
            Some(_) => current.push(c),
            None => {
                if c == '\'' || c == '"' {
                    in_quote = Some(c);
                    current.push(c);
                } else if c == ';' {
                    parts.push(std::mem::take(&mut current));
                } else {
                    current.push(c);
                }
            }
        }
        i += 1;
    }
    parts.push(current);
    parts.retain(|p| !p.trim().is_empty());
    parts
}

/// Strip a leading statement label and an optional `name:` construct label.
fn strip_label_and_name(text: &str) -> (Option<String>, Option<String>, String) {
    let mut rest = text.trim().to_string();
    let mut label = None;
    if let Some(caps) = STMT_LABEL.captures(&rest) {
        let whole = caps.get(0).unwrap().as_str().len();
        label = Some(caps[1].to_string());
        rest = rest[whole..].trim_start().to_string();
    }
    let mut name = None;
    if let Some(caps) = CONSTRUCT_NAME.captures(&rest) {
        let end = caps.get(0).unwrap().as_str().len();
        let follow = rest[end..].chars().next();
        // `::` is a declaration separator and `:=` never starts a statement
        if !matches!(follow, Some(':') | Some('=') | None) {
            name = Some(caps[1].to_string());
            rest = rest[end..].trim_start().to_string();
        }
    }
    (label, name, rest)
}

struct PendingStmt {
    text: String,
    line: usize,
    end_line: usize,
    raw: String,
    in_quote: Option<char>,
}

fn push_stmt(items: &mut Vec<SourceItem>, pending: PendingStmt, held: &mut Vec<SourceItem>) {
    let column = column_of(&pending.raw);
    for piece in split_statements(&pending.text) {
        let (label, name, text) = strip_label_and_name(&piece);
        if text.is_empty() && label.is_none() {
            continue;
        }
        items.push(SourceItem::Stmt(StmtItem {
            text,
            line: pending.line,
            column,
            end_line: pending.end_line,
            raw: pending.raw.clone(),
            label,
            name,
        }));
    }
    items.append(held);
}

/// 1-based column of the first non-blank character of a physical line.
fn column_of(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count() + 1
}

fn split_free_form(source: &str, preserve_comments: bool) -> Vec<SourceItem> {
    let mut items = Vec::new();
    let mut held_comments = Vec::new();
    let mut pending: Option<PendingStmt> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let lineno = idx + 1;
        let carried_quote = pending.as_ref().and_then(|p| p.in_quote);
        let (mut code, comment, quote_after) = split_comment(raw_line, carried_quote);

        if preserve_comments {
            if let Some(comment) = &comment {
                let item = SourceItem::Comment(CommentItem {
                    text: comment.trim_end().to_string(),
                    line: lineno,
                    column: code.chars().count() + 1,
                });
                if pending.is_some() || !code.trim().is_empty() {
                    held_comments.push(item);
                } else {
                    items.push(item);
                }
            }
        }
        if code.trim().is_empty() {
            if pending.is_none() && !held_comments.is_empty() {
                items.append(&mut held_comments);
            }
            continue;
        }

        let mut continues = false;
        let trimmed = code.trim_end();
        if trimmed.ends_with('&') {
            continues = true;
            code = trimmed[..trimmed.len() - 1].to_string();
        } else {
            code = trimmed.to_string();
        }

        match pending.as_mut() {
            Some(p) => {
                let piece = code.trim_start();
                if let Some(stripped) = piece.strip_prefix('&') {
                    p.text.push_str(stripped);
                } else {
                    p.text.push(' ');
                    p.text.push_str(piece);
                }
                p.end_line = lineno;
                p.in_quote = quote_after;
            }
            None => {
                pending = Some(PendingStmt {
                    text: code.trim_start().to_string(),
                    line: lineno,
                    end_line: lineno,
                    raw: raw_line.to_string(),
                    in_quote: quote_after,
                });
            }
        }

        if !continues {
            if let Some(p) = pending.take() {
                push_stmt(&mut items, p, &mut held_comments);
            }
        }
    }
    if let Some(p) = pending.take() {
        // trailing `&` with nothing after it; treat the line as complete
        push_stmt(&mut items, p, &mut held_comments);
    }
    items.append(&mut held_comments);
    items
}

fn split_fixed_form(source: &str, preserve_comments: bool) -> Vec<SourceItem> {
    let mut items = Vec::new();
    let mut held_comments = Vec::new();
    let mut pending: Option<PendingStmt> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let lineno = idx + 1;
        if raw_line.trim().is_empty() {
            continue;
        }
        let first = raw_line.chars().next().unwrap();
        if matches!(first, 'c' | 'C' | '*' | '!') {
            if preserve_comments {
                let item = SourceItem::Comment(CommentItem {
                    text: raw_line.trim_end().to_string(),
                    line: lineno,
                    column: 1,
                });
                if pending.is_some() {
                    held_comments.push(item);
                } else {
                    items.push(item);
                }
            }
            continue;
        }

        let chars: Vec<char> = raw_line.chars().collect();
        let label_field: String = chars.iter().take(5).collect();
        let cont_marker = chars.get(5).copied().unwrap_or(' ');
        let body: String = chars.iter().skip(6).collect();
        let is_continuation = cont_marker != ' ' && cont_marker != '0';

        let carried_quote = pending.as_ref().and_then(|p| p.in_quote);
        let (code, comment, quote_after) = split_comment(&body, carried_quote);
        if preserve_comments {
            if let Some(comment) = comment {
                held_comments.push(SourceItem::Comment(CommentItem {
                    text: comment.trim_end().to_string(),
                    line: lineno,
                    // the body starts at column 7
                    column: code.chars().count() + 7,
                }));
            }
        }

        if is_continuation {
            if let Some(p) = pending.as_mut() {
                p.text.push(' ');
                p.text.push_str(code.trim());
                p.end_line = lineno;
                p.in_quote = quote_after;
            }
            continue;
        }

        if let Some(p) = pending.take() {
            push_stmt(&mut items, p, &mut held_comments);
        }
        let label = label_field.trim();
        let mut text = String::new();
        if !label.is_empty() {
            text.push_str(label);
            text.push(' ');
        }
        text.push_str(code.trim());
        if text.trim().is_empty() {
            continue;
        }
        pending = Some(PendingStmt {
            text,
            line: lineno,
            end_line: lineno,
            raw: raw_line.to_string(),
            in_quote: quote_after,
        });
    }
    if let Some(p) = pending.take() {
        push_stmt(&mut items, p, &mut held_comments);
    }
    items.append(&mut held_comments);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmts(reader: &mut FortranReader) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(item) = reader.next_item() {
            if let SourceItem::Stmt(s) = item {
                out.push(s.text);
            }
        }
        out
    }

    #[test]
    fn joins_free_form_continuations() {
        let mut reader = FortranReader::free_form("x = 1 + &\n    2\n", false);
        assert_eq!(stmts(&mut reader), vec!["x = 1 + 2"]);
    }

    #[test]
    fn ampersand_pair_splices_tokens() {
        let mut reader = FortranReader::free_form("call fo&\n&o()\n", false);
        assert_eq!(stmts(&mut reader), vec!["call foo()"]);
    }

    #[test]
    fn comment_inside_string_is_kept() {
        let mut reader = FortranReader::free_form("s = 'a ! b' ! real comment\n", false);
        assert_eq!(stmts(&mut reader), vec!["s = 'a ! b'"]);
    }

    #[test]
    fn label_and_name_are_stripped() {
        let mut reader = FortranReader::free_form("10 outer: do i = 1, n\n", false);
        let item = reader.next_item().unwrap();
        let stmt = item.as_stmt().unwrap();
        assert_eq!(stmt.label.as_deref(), Some("10"));
        assert_eq!(stmt.name.as_deref(), Some("outer"));
        assert_eq!(stmt.text, "do i = 1, n");
    }

    #[test]
    fn double_colon_is_not_a_construct_name() {
        let mut reader = FortranReader::free_form("integer :: x\n", false);
        let item = reader.next_item().unwrap();
        let stmt = item.as_stmt().unwrap();
        assert_eq!(stmt.name, None);
        assert_eq!(stmt.text, "integer :: x");
    }

    #[test]
    fn semicolons_split_statements() {
        let mut reader = FortranReader::free_form("a = 1; b = 2\n", false);
        assert_eq!(stmts(&mut reader), vec!["a = 1", "b = 2"]);
    }

    #[test]
    fn comments_surface_when_preserved() {
        let mut reader = FortranReader::free_form("! c1\nx = 1\n! c2\n", true);
        let mut kinds = Vec::new();
        while let Some(item) = reader.next_item() {
            kinds.push(matches!(item, SourceItem::Comment(_)));
        }
        assert_eq!(kinds, vec![true, false, true]);
    }

    #[test]
    fn put_item_restores_position() {
        let mut reader = FortranReader::free_form("a = 1\nb = 2\n", false);
        let first = reader.next_item().unwrap();
        reader.put_item(first.clone());
        assert_eq!(reader.next_item(), Some(first));
    }

    #[test]
    fn fixed_form_label_and_continuation() {
        let source = "C comment line\n   10 x = 1 +\n     &    2\n      end\n";
        let mut reader = FortranReader::fixed_form(source, false);
        let item = reader.next_item().unwrap();
        let stmt = item.as_stmt().unwrap();
        assert_eq!(stmt.label.as_deref(), Some("10"));
        assert_eq!(stmt.text, "x = 1 + 2");
        assert_eq!(stmt.column, 4);
        let item = reader.next_item().unwrap();
        assert_eq!(item.as_stmt().unwrap().text, "end");
    }

    #[test]
    fn statement_column_skips_indentation() {
        let mut reader = FortranReader::free_form("    x = 1\n", false);
        let item = reader.next_item().unwrap();
        assert_eq!(item.as_stmt().unwrap().column, 5);
    }
}
