//! Section 11 of the standard: main programs, modules, USE statements and
//! block data (R1101-R1118).

use super::BaseRule::{self, *};
use super::{alts, rlist, b, n, shaped, BlockSpec, Hook, KwPat, NameKind, RuleSpec, Shape};
use crate::pattern;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R1101
        MainProgram => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(ProgramStmt)),
            mids: rlist![
                b(SpecificationPart),
                b(ExecutionPart),
                b(InternalSubprogramPart),
            ],
            end: Some(b(EndProgramStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // a main program whose program-stmt is omitted
        MainProgram0 => shaped(Shape::Blocked(BlockSpec {
            start: None,
            mids: rlist![
                b(SpecificationPart),
                b(ExecutionPart),
                b(InternalSubprogramPart),
            ],
            end: Some(b(EndProgramStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1102
        ProgramStmt => shaped(Shape::WordCls {
            word: KwPat::W("PROGRAM"),
            cls: Some(n(NameKind::Program)),
            check_colons: false,
            require_cls: true,
            colons_in_render: false,
        }),
        // R1103
        EndProgramStmt => shaped(Shape::EndStmt {
            kind: "PROGRAM",
            name: Some(n(NameKind::Program)),
            require_kind: false,
        }),
        // R1104
        Module => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(ModuleStmt)),
            mids: rlist![b(SpecificationPart), b(ModuleSubprogramPart)],
            end: Some(b(EndModuleStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1105
        ModuleStmt => shaped(Shape::WordCls {
            word: KwPat::W("MODULE"),
            cls: Some(n(NameKind::Module)),
            check_colons: false,
            require_cls: true,
            colons_in_render: false,
        }),
        // R1106
        EndModuleStmt => shaped(Shape::EndStmt {
            kind: "MODULE",
            name: Some(n(NameKind::Module)),
            require_kind: false,
        }),
        // R1107
        ModuleSubprogramPart => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(ContainsStmt)),
            mids: rlist![b(ModuleSubprogram)],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R1108
        ModuleSubprogram => alts(rlist![b(FunctionSubprogram), b(SubroutineSubprogram)]),
        // R1109
        UseStmt => shaped(Shape::CustomStr(m_use_stmt)),
        // R1110
        ModuleNature => shaped(Shape::Keyword(KwPat::Set(&["INTRINSIC", "NON_INTRINSIC"]))),
        // R1111
        Rename => shaped(Shape::CustomStr(m_rename)),
        // R1112
        Only => alts(rlist![b(GenericSpec), b(OnlyUseName), b(Rename)]),
        // R1113
        OnlyUseName => alts(rlist![b(Name)]),
        // R1114, R1115
        LocalDefinedOperator => alts(rlist![b(DefinedUnaryOp), b(DefinedBinaryOp)]),
        UseDefinedOperator => alts(rlist![b(DefinedUnaryOp), b(DefinedBinaryOp)]),
        // R1116
        BlockData => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(BlockDataStmt)),
            mids: rlist![b(SpecificationPart)],
            end: Some(b(EndBlockDataStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1117
        BlockDataStmt => shaped(Shape::CustomStr(m_block_data_stmt)),
        // R1118
        EndBlockDataStmt => shaped(Shape::EndStmt {
            kind: "BLOCK DATA",
            name: Some(n(NameKind::BlockData)),
            require_kind: false,
        }),
        _ => return None,
    })
}

/// R1109: `USE [[, module-nature] ::] module-name [, rename-list]` or
/// `USE [[, module-nature] ::] module-name , ONLY : [only-list]`.
/// Items: nature, double-colon, module name, only/comma marker, list.
fn m_use_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..3.min(text.len())].eq_ignore_ascii_case("USE") {
        return Err(MatchErr::NoMatch);
    }
    let after = &text[3..];
    match after.chars().next() {
        None => return Err(MatchErr::NoMatch),
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => return Err(MatchErr::NoMatch),
        _ => {}
    }
    let mut line = after.trim_start();
    let mut nature = Item::Absent;
    let mut dcolon = Item::Absent;
    if let Some(colons) = line.find("::") {
        dcolon = Item::word("::");
        if let Some(after_comma) = line.strip_prefix(',') {
            let nature_text = after_comma[..colons - 1].trim();
            if nature_text.is_empty() {
                return Err(MatchErr::NoMatch);
            }
            nature = Item::tree(parser.match_str(b(ModuleNature), nature_text)?);
        } else if !line[..colons].trim().is_empty() {
            return Err(MatchErr::NoMatch);
        }
        line = line[colons + 2..].trim_start();
        if line.is_empty() {
            return Err(MatchErr::NoMatch);
        }
    } else {
        // a module nature without `::` is an error, not a rename target
        for word in line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
            if word.eq_ignore_ascii_case("INTRINSIC") || word.eq_ignore_ascii_case("NON_INTRINSIC")
            {
                return Err(MatchErr::NoMatch);
            }
        }
    }
    let comma = match line.find(',') {
        None => {
            let name = parser.match_str(n(NameKind::Module), line)?;
            return Ok(vec![nature, dcolon, Item::tree(name), Item::word(""), Item::Absent]);
        }
        Some(comma) => comma,
    };
    let name_text = line[..comma].trim_end();
    if name_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let name = parser.match_str(n(NameKind::Module), name_text)?;
    let rest = line[comma + 1..].trim_start();
    if rest.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    if rest[..4.min(rest.len())].eq_ignore_ascii_case("ONLY") {
        let rest = rest[4..].trim_start();
        let rest = rest.strip_prefix(':').ok_or(MatchErr::NoMatch)?;
        let rest = rest.trim_start();
        if rest.is_empty() {
            return Ok(vec![
                nature,
                dcolon,
                Item::tree(name),
                Item::word(", ONLY:"),
                Item::Absent,
            ]);
        }
        let onlys = parser.match_str(super::l(Only), rest)?;
        return Ok(vec![
            nature,
            dcolon,
            Item::tree(name),
            Item::word(", ONLY:"),
            Item::tree(onlys),
        ]);
    }
    let renames = parser.match_str(super::l(Rename), rest)?;
    Ok(vec![
        nature,
        dcolon,
        Item::tree(name),
        Item::word(","),
        Item::tree(renames),
    ])
}

/// R1111: `local-name => use-name` or
/// `OPERATOR(local-op) => OPERATOR(use-op)`.
fn m_rename(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let arrow = text.find("=>").ok_or(MatchErr::NoMatch)?;
    let lhs = text[..arrow].trim_end();
    let rhs = text[arrow + 2..].trim_start();
    if lhs.is_empty() || rhs.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    if lhs[..8.min(lhs.len())].eq_ignore_ascii_case("OPERATOR")
        && rhs[..8.min(rhs.len())].eq_ignore_ascii_case("OPERATOR")
    {
        let local = lhs[8..].trim_start();
        let use_op = rhs[8..].trim_start();
        if local.len() >= 2
            && local.starts_with('(')
            && local.ends_with(')')
            && use_op.len() >= 2
            && use_op.starts_with('(')
            && use_op.ends_with(')')
        {
            let local = local[1..local.len() - 1].trim();
            let use_op = use_op[1..use_op.len() - 1].trim();
            if local.is_empty() || use_op.is_empty() {
                return Err(MatchErr::NoMatch);
            }
            let local = parser.match_str(b(LocalDefinedOperator), local)?;
            let use_op = parser.match_str(b(UseDefinedOperator), use_op)?;
            return Ok(vec![
                Item::word("OPERATOR"),
                Item::tree(local),
                Item::tree(use_op),
            ]);
        }
    }
    let local = parser.match_str(n(NameKind::Local), lhs)?;
    let use_name = parser.match_str(n(NameKind::Use), rhs)?;
    Ok(vec![Item::Absent, Item::tree(local), Item::tree(use_name)])
}

/// R1117: `BLOCK DATA [block-data-name]`.
fn m_block_data_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let end = pattern::match_keyword_prefix(text, "BLOCK DATA").ok_or(MatchErr::NoMatch)?;
    let rest = text[end..].trim();
    if rest.is_empty() {
        return Ok(vec![Item::Absent]);
    }
    let name = parser.match_str(n(NameKind::BlockData), rest)?;
    Ok(vec![Item::tree(name)])
}
