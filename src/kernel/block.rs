//! The block matcher: start statement, middle constructs in declared
//! order, end statement. Runs the construct-name checks (C431, C730, C801,
//! C803, C810, C819, C820, C1114) and the DO-label stack (R826), and honors
//! the construct hooks that let `ELSE IF` / `ELSEWHERE` / `CASE` /
//! `TYPE IS` sections repeat.
//!
//! State machine: INIT -> AFTER_HEAD -> IN_BODY -> AFTER_END. A name
//! mismatch on the end statement is a syntax error, not a no-match.

use crate::reader::{FortranReader, SourceItem};
use crate::rules::{b, BaseRule, BlockSpec, Hook, Rule, Shape};
use crate::{CstNode, FortranParser, Item, MatchErr, MatchResult, ParseError, Position};

/// How a label-DO construct was closed: by its own labeled terminator, or
/// by a shared terminator consumed inside a nested construct (which pops
/// every pending entry bearing the label, per R826).
pub(crate) enum BlockOutcome {
    EndMatched,
    SharedTerminator,
}

impl FortranParser {
    pub(crate) fn run_block(
        &self,
        rule: Rule,
        spec: &BlockSpec,
        reader: &mut FortranReader,
    ) -> MatchResult<Vec<Item>> {
        let mut content: Vec<CstNode> = Vec::new();
        let mut start_name: Option<String> = None;
        let mut start_label: Option<String> = None;
        let mut label_depth: Option<usize> = None;

        if let Some(start_rule) = spec.start {
            let start = self.match_reader(start_rule, reader)?;
            start_name = start_name_of(&start);
            if spec.match_labels {
                start_label = do_label_of(&start);
                if let Some(label) = &start_label {
                    label_depth = Some(reader.pending_do_labels.len());
                    reader.pending_do_labels.push(label.clone());
                }
            }
            content.push(start);
        }

        let drop_pending = |reader: &mut FortranReader| {
            if let Some(depth) = label_depth {
                reader.pending_do_labels.truncate(depth);
            }
        };

        let mut outcome = BlockOutcome::EndMatched;
        let mut i = 0usize;
        while i < spec.mids.len() {
            self.eat_comments(reader, &mut content);
            if spec.hook == Hook::DoLabel {
                match (&start_label, label_depth) {
                    (Some(label), Some(depth)) => {
                        // a nested construct consumed a shared terminator
                        if reader.pending_do_labels.len() <= depth {
                            outcome = BlockOutcome::SharedTerminator;
                            break;
                        }
                        if peek_label_is(reader, label) {
                            break;
                        }
                    }
                    _ => {
                        // do-body inside a shared-terminator construct
                        if peek_label_pending(reader) {
                            break;
                        }
                    }
                }
            }
            match self.match_reader(spec.mids[i], reader) {
                Ok(node) => {
                    if let Some(err) = self.check_intermediate_name(spec, &node, &start_name) {
                        drop_pending(reader);
                        return Err(err);
                    }
                    if let Some(reset) = divider_reset(spec, base_of(node.rule)) {
                        i = reset;
                    }
                    content.push(node);
                }
                Err(MatchErr::NoMatch) => i += 1,
                Err(fatal) => {
                    drop_pending(reader);
                    return Err(fatal);
                }
            }
        }

        if let Some(end_rule) = spec.end {
            if matches!(outcome, BlockOutcome::EndMatched) {
                self.eat_comments(reader, &mut content);
                let mut end = match self.match_reader(end_rule, reader) {
                    Ok(end) => end,
                    Err(err) => {
                        drop_pending(reader);
                        return Err(err);
                    }
                };
                if spec.match_labels {
                    let end_label = end.src.as_ref().and_then(|src| src.label.clone());
                    if start_label.is_some() && end_label != start_label {
                        drop_pending(reader);
                        return Err(MatchErr::NoMatch);
                    }
                    if let Some(label) = &start_label {
                        reader.pending_do_labels.retain(|pending| pending != label);
                    }
                } else if let Some(depth) = label_depth {
                    reader.pending_do_labels.truncate(depth);
                }
                match self.check_end_name(&mut end, &start_name) {
                    Ok(()) => {}
                    Err(err) => {
                        drop_pending(reader);
                        return Err(err);
                    }
                }
                content.push(end);
            }
        } else {
            drop_pending(reader);
        }

        if content.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        let _ = rule;
        Ok(content.into_iter().map(Item::tree).collect())
    }

    pub(crate) fn eat_comments(&self, reader: &mut FortranReader, content: &mut Vec<CstNode>) {
        while let Some(SourceItem::Comment(comment)) = reader.peek() {
            let comment = comment.clone();
            reader.next_item();
            content.push(
                CstNode::leaf(b(BaseRule::Comment), &comment.text).with_src(crate::SourceRef {
                    at: Position::new(comment.line, comment.column),
                    end_line: comment.line,
                    raw: comment.text.clone(),
                    label: None,
                    name: None,
                }),
            );
        }
    }

    /// C730/C801: the name trailing an `ELSE`, `ELSE IF` or `ELSEWHERE`
    /// statement must repeat the construct name.
    fn check_intermediate_name(
        &self,
        spec: &BlockSpec,
        node: &CstNode,
        start_name: &Option<String>,
    ) -> Option<MatchErr> {
        let trailing = match (spec.hook, base_of(node.rule)) {
            (Hook::If, Some(BaseRule::ElseIfStmt)) => item_name(node, 1),
            (Hook::If, Some(BaseRule::ElseStmt)) => item_name(node, 0),
            (Hook::Where, Some(BaseRule::MaskedElsewhereStmt)) => item_name(node, 1),
            (Hook::Where, Some(BaseRule::ElsewhereStmt)) => item_name(node, 1),
            _ => None,
        }?;
        if name_matches(start_name.as_deref(), &trailing) {
            return None;
        }
        Some(name_mismatch_error(node, start_name, &trailing))
    }

    /// The end statement either omits the construct name or repeats it
    /// identically; when omitted it is materialized so that the rendered
    /// construct echoes the name.
    fn check_end_name(&self, end: &mut CstNode, start_name: &Option<String>) -> Result<(), MatchErr> {
        if !matches!(
            crate::rules::spec(end.rule).shape,
            Some(Shape::EndStmt { .. })
        ) {
            return Ok(());
        }
        match item_name(end, 1) {
            Some(end_name) => {
                if name_matches(start_name.as_deref(), &end_name) {
                    Ok(())
                } else {
                    Err(name_mismatch_error(end, start_name, &end_name))
                }
            }
            None => {
                if end.items.get(1) == Some(&Item::Absent) {
                    if let Some(name) = start_name {
                        end.items[1] = Item::tree(CstNode::leaf(b(BaseRule::Name), name));
                    }
                }
                Ok(())
            }
        }
    }
}

fn base_of(rule: Rule) -> Option<BaseRule> {
    match rule {
        Rule::Base(base) => Some(base),
        _ => None,
    }
}

/// Position to continue the middle scan from after a section divider
/// matched; `ELSE IF`-like dividers reopen the whole list, `ELSE`-like
/// dividers jump to the final body section.
fn divider_reset(spec: &BlockSpec, rule: Option<BaseRule>) -> Option<usize> {
    let rule = rule?;
    match (spec.hook, rule) {
        (Hook::If, BaseRule::ElseIfStmt) => Some(0),
        (Hook::If, BaseRule::ElseStmt) => Some(spec.mids.len() - 1),
        (Hook::Where, BaseRule::MaskedElsewhereStmt) => Some(0),
        (Hook::Where, BaseRule::ElsewhereStmt) => Some(spec.mids.len() - 1),
        (Hook::Case, BaseRule::CaseStmt) => Some(0),
        (Hook::SelectType, BaseRule::TypeGuardStmt) => Some(0),
        _ => None,
    }
}

fn peek_label_is(reader: &FortranReader, label: &str) -> bool {
    match reader.peek() {
        Some(SourceItem::Stmt(stmt)) => stmt.label.as_deref() == Some(label),
        _ => false,
    }
}

fn peek_label_pending(reader: &FortranReader) -> bool {
    match reader.peek() {
        Some(SourceItem::Stmt(stmt)) => match &stmt.label {
            Some(label) => reader.pending_do_labels.iter().any(|l| l == label),
            None => false,
        },
        _ => false,
    }
}

/// The name a construct head declares: a `name:` construct label stripped
/// by the reader, or the entity name embedded in the statement itself
/// (program, module, subroutine, function, derived type, submodule).
fn start_name_of(node: &CstNode) -> Option<String> {
    if let Some(src) = &node.src {
        if let Some(name) = &src.name {
            return Some(name.clone());
        }
    }
    match base_of(node.rule)? {
        BaseRule::ProgramStmt
        | BaseRule::ModuleStmt
        | BaseRule::SubroutineStmt
        | BaseRule::FunctionStmt
        | BaseRule::DerivedTypeStmt
        | BaseRule::SubmoduleStmt => item_name(node, 1),
        BaseRule::BlockDataStmt => item_name(node, 0),
        _ => None,
    }
}

/// The numeric label a `label-do-stmt` opens with (items: name, label,
/// loop-control).
fn do_label_of(node: &CstNode) -> Option<String> {
    if base_of(node.rule)? != BaseRule::LabelDoStmt {
        return None;
    }
    let label = node.items.get(1)?.as_tree()?;
    label.items.first()?.as_word().map(str::to_string)
}

/// Extract a bare name held (directly or as a Name leaf) at item position
/// `index`.
fn item_name(node: &CstNode, index: usize) -> Option<String> {
    match node.items.get(index)? {
        Item::Word(word) => Some(word.clone()),
        Item::Tree(tree) => {
            if base_of(tree.rule) == Some(BaseRule::Name)
                || base_of(tree.rule) == Some(BaseRule::TypeName)
            {
                tree.items.first()?.as_word().map(str::to_string)
            } else {
                None
            }
        }
        Item::Absent => None,
    }
}

/// Fortran names compare without regard to case.
fn name_matches(start: Option<&str>, end: &str) -> bool {
    match start {
        Some(start) => start.eq_ignore_ascii_case(end),
        None => false,
    }
}

fn name_mismatch_error(node: &CstNode, start_name: &Option<String>, found: &str) -> MatchErr {
    let (at, raw) = node
        .src
        .as_ref()
        .map(|src| (src.at, src.raw.clone()))
        .unwrap_or((Position::new(0, 1), String::new()));
    let expected = start_name.as_deref().unwrap_or("<unnamed>");
    MatchErr::Syntax(ParseError::new(
        at,
        raw,
        format!(
            "construct name '{}' does not match '{}'",
            found, expected
        ),
    ))
}
