//! The Fortran 2008 delta: submodules (R1116-R1120) and the narrowed
//! `do-term-action-stmt` (R826, constraint C816). Overridden F2003 rules
//! are substituted through [override_spec] when the F2008 dialect is
//! active; the new rules below live in the shared registry so that trees
//! containing them can always be rendered.

use super::BaseRule::{self, *};
use super::{alts, rlist, b, n, shaped, BlockSpec, Hook, NameKind, Rule, RuleSpec, Shape};
use crate::pattern;
use crate::{FortranParser, Item, MatchErr, MatchResult};

/// Rules the F2008 dialect replaces. References resolve here first, so the
/// delta composes with the F2003 tables by substitution, not duplication.
pub(crate) fn override_spec(rule: Rule) -> Option<RuleSpec> {
    match rule {
        // R202 gains the submodule program unit
        Rule::Base(ProgramUnit) => Some(alts(rlist![
            b(Comment),
            b(MainProgram),
            b(ExternalSubprogram),
            b(Module),
            b(Submodule),
            b(BlockData),
        ])),
        // R826/C816 narrows the permitted terminating action statements
        Rule::Base(DoTermActionStmt) => Some(alts(rlist![b(ActionStmtC816)])),
        _ => None,
    }
}

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R1116
        Submodule => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(SubmoduleStmt)),
            mids: rlist![b(SpecificationPart), b(ModuleSubprogramPart)],
            end: Some(b(EndSubmoduleStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1117
        SubmoduleStmt => shaped(Shape::CustomStr(m_submodule_stmt)),
        // R1118
        EndSubmoduleStmt => shaped(Shape::EndStmt {
            kind: "SUBMODULE",
            name: Some(n(NameKind::Submodule)),
            require_kind: false,
        }),
        // R1119
        ParentIdentifier => shaped(Shape::CustomStr(m_parent_identifier)),
        // C816
        ActionStmtC816 => alts(super::section_2::ACTION_STMT_C824_ALTS),
        _ => return None,
    })
}

/// R1117: `SUBMODULE ( parent-identifier ) submodule-name`.
fn m_submodule_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let end = pattern::match_keyword_prefix(text, "SUBMODULE").ok_or(MatchErr::NoMatch)?;
    let line = text[end..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let parent = parser.match_str(b(ParentIdentifier), line[1..close].trim())?;
    let rest = line[close + 1..].trim();
    if rest.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let name = parser.match_str(n(NameKind::Submodule), rest)?;
    Ok(vec![Item::tree(parent), Item::tree(name)])
}

/// R1119: `ancestor-module-name [: parent-submodule-name]`.
fn m_parent_identifier(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    match text.find(':') {
        None => {
            let ancestor = parser.match_str(n(NameKind::Module), text)?;
            Ok(vec![Item::tree(ancestor), Item::Absent])
        }
        Some(colon) => {
            let ancestor = parser.match_str(n(NameKind::Module), text[..colon].trim_end())?;
            let parent = parser.match_str(n(NameKind::Submodule), text[colon + 1..].trim_start())?;
            Ok(vec![Item::tree(ancestor), Item::tree(parent)])
        }
    }
}
