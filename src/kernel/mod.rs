//! The matcher kernel: generic dispatch that, given a rule and an input
//! (one statement's text, or the reader for multi-statement constructs),
//! tries the rule's alternatives in declared order and then executes the
//! rule's own structural shape.
//!
//! Backtracking discipline: every failed attempt leaves the input exactly
//! where it started. String matching is pure, and reader matching brackets
//! each attempt with a checkpoint/rewind pair, so a no-match can never leak
//! consumed items.

mod block;

use crate::pattern;
use crate::reader::{FortranReader, SourceItem, StmtItem};
use crate::rules::{Alts, KwPat, Shape};
use crate::splitline::string_replace_map;
use crate::{CstNode, FortranParser, Item, MatchErr, MatchResult, Position, Rule, SourceRef};

impl FortranParser {
    /// Match `rule` against the text of a single logical statement.
    pub(crate) fn match_str(&self, rule: Rule, text: &str) -> MatchResult<CstNode> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        let spec = self.spec_of(rule);
        for alt in spec.alternatives.iter() {
            if self.is_reader_rule(alt) {
                continue;
            }
            match self.match_str(alt, text) {
                Ok(node) => return Ok(node),
                Err(MatchErr::NoMatch) => {}
                Err(fatal) => return Err(fatal),
            }
        }
        let shape = match spec.shape {
            Some(shape) => shape,
            None => return Err(MatchErr::NoMatch),
        };
        let items = self.run_shape_str(rule, &shape, text)?;
        Ok(CstNode::new(rule, items))
    }

    /// Match `rule` against the reader. Statement-shaped rules consume one
    /// item and match its text; block rules drive the block matcher.
    pub(crate) fn match_reader(
        &self,
        rule: Rule,
        reader: &mut FortranReader,
    ) -> MatchResult<CstNode> {
        let spec = self.spec_of(rule);
        match spec.shape {
            Some(Shape::Blocked(block_spec)) => {
                let checkpoint = reader.checkpoint();
                match self.run_block(rule, &block_spec, reader) {
                    Ok(items) => Ok(CstNode::new(rule, items)),
                    Err(MatchErr::NoMatch) => {
                        reader.rewind_to(checkpoint);
                        Err(MatchErr::NoMatch)
                    }
                    Err(fatal) => Err(fatal),
                }
            }
            Some(Shape::CustomReader(matcher)) => {
                let checkpoint = reader.checkpoint();
                match matcher(self, reader) {
                    Ok(items) => Ok(CstNode::new(rule, items)),
                    Err(MatchErr::NoMatch) => {
                        reader.rewind_to(checkpoint);
                        Err(MatchErr::NoMatch)
                    }
                    Err(fatal) => Err(fatal),
                }
            }
            None if !matches!(spec.alternatives, Alts::None) => {
                for alt in spec.alternatives.iter() {
                    match self.match_reader(alt, reader) {
                        Ok(node) => return Ok(node),
                        Err(MatchErr::NoMatch) => {}
                        Err(fatal) => return Err(fatal),
                    }
                }
                Err(MatchErr::NoMatch)
            }
            _ => self.match_stmt(rule, reader),
        }
    }

    /// Pull one statement item and match `rule` against its text; restore
    /// the item on failure.
    fn match_stmt(&self, rule: Rule, reader: &mut FortranReader) -> MatchResult<CstNode> {
        let checkpoint = reader.checkpoint();
        let item = match reader.next_item() {
            Some(item) => item,
            None => return Err(MatchErr::NoMatch),
        };
        let stmt = match item {
            SourceItem::Stmt(stmt) => stmt,
            SourceItem::Comment(_) => {
                reader.rewind_to(checkpoint);
                return Err(MatchErr::NoMatch);
            }
        };
        reader.note_hint(stmt.line, rule);
        match self.match_str(rule, &stmt.text) {
            Ok(node) => {
                self.trace(rule, "matched");
                Ok(node.with_src(stmt_source(&stmt)))
            }
            Err(MatchErr::NoMatch) => {
                self.trace(rule, "no-match");
                reader.rewind_to(checkpoint);
                Err(MatchErr::NoMatch)
            }
            Err(fatal) => Err(fatal),
        }
    }

    /// Whether matching this rule needs the reader (block constructs and
    /// bespoke reader matchers); such rules can never match a plain string.
    pub(crate) fn is_reader_rule(&self, rule: Rule) -> bool {
        matches!(
            self.spec_of(rule).shape,
            Some(Shape::Blocked(_)) | Some(Shape::CustomReader(_))
        )
    }

    fn run_shape_str(&self, rule: Rule, shape: &Shape, text: &str) -> MatchResult<Vec<Item>> {
        match *shape {
            Shape::Keyword(pat) => match_keyword_full(pat, text),
            Shape::Text(re) => {
                if re.is_match(text) {
                    Ok(vec![Item::word(text)])
                } else {
                    Err(MatchErr::NoMatch)
                }
            }
            Shape::Literal(values) => {
                if values.contains(&text) {
                    Ok(vec![Item::word(text)])
                } else {
                    Err(MatchErr::NoMatch)
                }
            }
            Shape::Number(re) => {
                let caps = re.captures(text).ok_or(MatchErr::NoMatch)?;
                let value = caps.name("value").ok_or(MatchErr::NoMatch)?.as_str();
                let kind = caps
                    .name("kind_param")
                    .map(|m| Item::word(m.as_str()))
                    .unwrap_or(Item::Absent);
                Ok(vec![Item::word(value), kind])
            }
            Shape::Bracket {
                left,
                right,
                inner,
                require_inner,
            } => {
                if text.len() < left.len() + right.len()
                    || !text.starts_with(left)
                    || !text.ends_with(right)
                {
                    return Err(MatchErr::NoMatch);
                }
                let payload = text[left.len()..text.len() - right.len()].trim();
                if payload.is_empty() {
                    if require_inner {
                        return Err(MatchErr::NoMatch);
                    }
                    return Ok(vec![Item::word(left), Item::Absent, Item::word(right)]);
                }
                let node = self.match_str(inner, payload)?;
                Ok(vec![Item::word(left), Item::tree(node), Item::word(right)])
            }
            Shape::WordCls {
                word,
                cls,
                check_colons,
                require_cls,
                ..
            } => {
                let (canonical, consumed) = match_keyword_prefix(word, text)?;
                let mut rest = text[consumed..].trim_start();
                if check_colons {
                    if let Some(stripped) = rest.strip_prefix("::") {
                        rest = stripped.trim_start();
                    }
                }
                if rest.is_empty() {
                    if require_cls {
                        return Err(MatchErr::NoMatch);
                    }
                    return Ok(vec![Item::word(canonical), Item::Absent]);
                }
                let cls = cls.ok_or(MatchErr::NoMatch)?;
                let node = self.match_str(cls, rest)?;
                Ok(vec![Item::word(canonical), Item::tree(node)])
            }
            Shape::Call {
                word,
                args,
                require_args,
            } => {
                let (canonical, consumed) = match_keyword_prefix(word, text)?;
                let rest = text[consumed..].trim_start();
                if !rest.starts_with('(') || !rest.ends_with(')') {
                    return Err(MatchErr::NoMatch);
                }
                let payload = rest[1..rest.len() - 1].trim();
                if payload.is_empty() {
                    if require_args {
                        return Err(MatchErr::NoMatch);
                    }
                    return Ok(vec![Item::word(canonical), Item::Absent]);
                }
                let node = self.match_str(args, payload)?;
                Ok(vec![Item::word(canonical), Item::tree(node)])
            }
            Shape::CallOf {
                head,
                args,
                require_args,
            } => {
                if !text.ends_with(')') {
                    return Err(MatchErr::NoMatch);
                }
                let (line, repmap) = string_replace_map(text);
                let open = line.rfind('(').ok_or(MatchErr::NoMatch)?;
                if !line.ends_with(')') {
                    return Err(MatchErr::NoMatch);
                }
                let head_text = repmap.restore(line[..open].trim_end());
                if head_text.is_empty() {
                    return Err(MatchErr::NoMatch);
                }
                let payload = repmap.restore(line[open + 1..line.len() - 1].trim());
                let head_node = self.match_str(head, &head_text)?;
                if payload.trim().is_empty() {
                    if require_args {
                        return Err(MatchErr::NoMatch);
                    }
                    return Ok(vec![Item::tree(head_node), Item::Absent]);
                }
                let args_node = self.match_str(args, payload.trim())?;
                Ok(vec![Item::tree(head_node), Item::tree(args_node)])
            }
            Shape::Binary { lhs, op, rhs } => {
                let (line, repmap) = string_replace_map(text);
                let (left, op_text, right) =
                    pattern::split_binary(&line, op).ok_or(MatchErr::NoMatch)?;
                let left = repmap.restore(left);
                let right = repmap.restore(right);
                let lhs_node = self.match_str(lhs, &left)?;
                let rhs_node = self.match_str(rhs, &right)?;
                Ok(vec![
                    Item::tree(lhs_node),
                    Item::word(op_text),
                    Item::tree(rhs_node),
                ])
            }
            Shape::BinaryStr {
                lhs,
                op,
                rhs,
                first,
            } => {
                let (line, repmap) = string_replace_map(text);
                let at = if first { line.find(op) } else { line.rfind(op) };
                let at = at.ok_or(MatchErr::NoMatch)?;
                let left = repmap.restore(line[..at].trim_end());
                let right = repmap.restore(line[at + op.len()..].trim_start());
                if left.is_empty() || right.is_empty() {
                    return Err(MatchErr::NoMatch);
                }
                let lhs_node = self.match_str(lhs, &left)?;
                let rhs_node = self.match_str(rhs, &right)?;
                Ok(vec![
                    Item::tree(lhs_node),
                    Item::word(op),
                    Item::tree(rhs_node),
                ])
            }
            Shape::Unary { op, operand } => {
                let (op_text, rest) = pattern::match_unary(text, op).ok_or(MatchErr::NoMatch)?;
                let node = self.match_str(operand, rest)?;
                Ok(vec![Item::word(op_text), Item::tree(node)])
            }
            Shape::Separated {
                lhs,
                rhs,
                require_lhs,
                require_rhs,
            } => {
                let (line, repmap) = string_replace_map(text);
                let colon = line.find(':').ok_or(MatchErr::NoMatch)?;
                let left = line[..colon].trim_end();
                let right = line[colon + 1..].trim_start();
                let lhs_item = if left.is_empty() {
                    if require_lhs {
                        return Err(MatchErr::NoMatch);
                    }
                    Item::Absent
                } else {
                    let lhs = lhs.ok_or(MatchErr::NoMatch)?;
                    Item::tree(self.match_str(lhs, &repmap.restore(left))?)
                };
                let rhs_item = if right.is_empty() {
                    if require_rhs {
                        return Err(MatchErr::NoMatch);
                    }
                    Item::Absent
                } else {
                    let rhs = rhs.ok_or(MatchErr::NoMatch)?;
                    Item::tree(self.match_str(rhs, &repmap.restore(right))?)
                };
                Ok(vec![lhs_item, rhs_item])
            }
            Shape::Sequence { item, sep } => {
                let (line, repmap) = string_replace_map(text);
                let parts: Vec<&str> = line.split(sep).collect();
                if parts.len() < 2 {
                    return Err(MatchErr::NoMatch);
                }
                let mut items = Vec::with_capacity(parts.len());
                for part in parts {
                    let part = repmap.restore(part.trim());
                    if part.is_empty() {
                        return Err(MatchErr::NoMatch);
                    }
                    items.push(Item::tree(self.match_str(item, &part)?));
                }
                Ok(items)
            }
            Shape::KeywordValue {
                pairs,
                unit_fallback,
            } => {
                let (line, repmap) = string_replace_map(text);
                let eq = line.find('=');
                let eq = match eq {
                    None => {
                        let unit = unit_fallback.ok_or(MatchErr::NoMatch)?;
                        let node = self.match_str(unit, text)?;
                        return Ok(vec![Item::word("UNIT"), Item::tree(node)]);
                    }
                    Some(eq) => eq,
                };
                let key = line[..eq].trim();
                let value = repmap.restore(line[eq + 1..].trim_start());
                if value.is_empty() {
                    return Err(MatchErr::NoMatch);
                }
                for (keys, value_rule) in pairs {
                    for candidate in keys.iter() {
                        if key.eq_ignore_ascii_case(candidate) {
                            match self.match_str(*value_rule, &value) {
                                Ok(node) => {
                                    return Ok(vec![Item::word(*candidate), Item::tree(node)]);
                                }
                                Err(MatchErr::NoMatch) => break,
                                Err(fatal) => return Err(fatal),
                            }
                        }
                    }
                }
                Err(MatchErr::NoMatch)
            }
            Shape::KeyedValue { key, value } => {
                let (line, repmap) = string_replace_map(text);
                let eq = line.find('=').ok_or(MatchErr::NoMatch)?;
                let left = repmap.restore(line[..eq].trim_end());
                let right = repmap.restore(line[eq + 1..].trim_start());
                if left.is_empty() || right.is_empty() {
                    return Err(MatchErr::NoMatch);
                }
                let key_node = self.match_str(key, &left)?;
                let value_node = self.match_str(value, &right)?;
                Ok(vec![Item::tree(key_node), Item::tree(value_node)])
            }
            Shape::EndStmt {
                kind,
                name,
                require_kind,
            } => {
                if text.len() < 3 || !text[..3].eq_ignore_ascii_case("end") {
                    return Err(MatchErr::NoMatch);
                }
                let rest = text[3..].trim_start();
                if rest.is_empty() {
                    if require_kind {
                        return Err(MatchErr::NoMatch);
                    }
                    return Ok(vec![Item::word(kind), Item::Absent]);
                }
                let consumed =
                    pattern::match_keyword_prefix(rest, kind).ok_or(MatchErr::NoMatch)?;
                let tail = rest[consumed..].trim_start();
                if tail.is_empty() {
                    return Ok(vec![Item::word(kind), Item::Absent]);
                }
                let name = name.ok_or(MatchErr::NoMatch)?;
                let node = self.match_str(name, tail)?;
                Ok(vec![Item::word(kind), Item::tree(node)])
            }
            Shape::CustomStr(matcher) => matcher(self, text),
            Shape::Blocked(_) | Shape::CustomReader(_) => Err(MatchErr::internal(format!(
                "rule {} needs a reader but was matched against a string",
                rule
            ))),
        }
    }
}

pub(crate) fn stmt_source(stmt: &StmtItem) -> SourceRef {
    SourceRef {
        at: Position::new(stmt.line, stmt.column),
        end_line: stmt.end_line,
        raw: stmt.raw.clone(),
        label: stmt.label.clone(),
        name: stmt.name.clone(),
    }
}

/// Uppercase a keyword spelling and collapse interior whitespace, so that
/// `double  precision` is stored as `DOUBLE PRECISION`.
fn canonical_keyword(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn match_keyword_full(pat: KwPat, text: &str) -> MatchResult<Vec<Item>> {
    let canonical = canonical_keyword(text);
    match pat {
        KwPat::W(word) => {
            if canonical == word {
                Ok(vec![Item::word(word)])
            } else {
                Err(MatchErr::NoMatch)
            }
        }
        KwPat::Set(words) => words
            .iter()
            .find(|w| canonical == **w)
            .map(|w| vec![Item::word(*w)])
            .ok_or(MatchErr::NoMatch),
        KwPat::Re(re) => {
            if re.is_match(text) {
                Ok(vec![Item::word(canonical)])
            } else {
                Err(MatchErr::NoMatch)
            }
        }
    }
}

/// Match a keyword pattern at the start of a statement; returns the
/// canonical spelling and the number of bytes consumed.
fn match_keyword_prefix(pat: KwPat, text: &str) -> MatchResult<(String, usize)> {
    match pat {
        KwPat::W(word) => pattern::match_keyword_prefix(text, word)
            .map(|n| (word.to_string(), n))
            .ok_or(MatchErr::NoMatch),
        KwPat::Set(words) => {
            for word in words {
                if let Some(n) = pattern::match_keyword_prefix(text, word) {
                    return Ok((word.to_string(), n));
                }
            }
            Err(MatchErr::NoMatch)
        }
        KwPat::Re(re) => {
            let found = re.find(text).ok_or(MatchErr::NoMatch)?;
            if found.start() != 0 {
                return Err(MatchErr::NoMatch);
            }
            let end = found.end();
            if let Some(c) = text[end..].chars().next() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    return Err(MatchErr::NoMatch);
                }
            }
            Ok((canonical_keyword(found.as_str()), end))
        }
    }
}
