//! Section 8 of the standard: IF / CASE / ASSOCIATE / SELECT TYPE / DO
//! constructs and simple control statements (R801-R850).

use super::BaseRule::{self, *};
use super::{alts, rlist, alts_shaped, b, l, n, sc, shaped, BlockSpec, Hook, KwPat, NameKind, RuleSpec, Shape};
use crate::pattern;
use crate::reader::FortranReader;
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R801
        Block => shaped(Shape::Blocked(BlockSpec {
            start: None,
            mids: rlist![b(ExecutionPartConstruct)],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R802
        IfConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(IfThenStmt)),
            mids: rlist![
                b(ExecutionPartConstruct),
                b(ElseIfStmt),
                b(ExecutionPartConstruct),
                b(ElseStmt),
                b(ExecutionPartConstruct),
            ],
            end: Some(b(EndIfStmt)),
            match_labels: false,
            hook: Hook::If,
        })),
        // R803
        IfThenStmt => shaped(Shape::CustomStr(m_if_then_stmt)),
        // R804
        ElseIfStmt => shaped(Shape::CustomStr(m_else_if_stmt)),
        // R805
        ElseStmt => shaped(Shape::CustomStr(m_else_stmt)),
        // R806
        EndIfStmt => shaped(Shape::EndStmt {
            kind: "IF",
            name: Some(n(NameKind::IfConstruct)),
            require_kind: true,
        }),
        // R807
        IfStmt => shaped(Shape::CustomStr(m_if_stmt)),
        // R808
        CaseConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(SelectCaseStmt)),
            mids: rlist![b(CaseStmt), b(ExecutionPartConstruct), b(CaseStmt)],
            end: Some(b(EndSelectStmt)),
            match_labels: false,
            hook: Hook::Case,
        })),
        // R809
        SelectCaseStmt => shaped(Shape::CustomStr(m_select_case_stmt)),
        // R810
        CaseStmt => shaped(Shape::CustomStr(m_case_stmt)),
        // R811
        EndSelectStmt => shaped(Shape::EndStmt {
            kind: "SELECT",
            name: Some(n(NameKind::CaseConstruct)),
            require_kind: true,
        }),
        // R812
        CaseExpr => alts(rlist![sc(IntExpr), sc(CharExpr), sc(LogicalExpr)]),
        // R813
        CaseSelector => shaped(Shape::CustomStr(m_case_selector)),
        // R814
        CaseValueRange => alts_shaped(
            rlist![b(CaseValue)],
            Shape::Separated {
                lhs: Some(b(CaseValue)),
                rhs: Some(b(CaseValue)),
                require_lhs: false,
                require_rhs: false,
            },
        ),
        // R815
        CaseValue => alts(rlist![
            sc(IntInitializationExpr),
            sc(CharInitializationExpr),
            sc(LogicalInitializationExpr),
        ]),
        // R816
        AssociateConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(AssociateStmt)),
            mids: rlist![b(ExecutionPartConstruct)],
            end: Some(b(EndAssociateStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R817
        AssociateStmt => shaped(Shape::Call {
            word: KwPat::W("ASSOCIATE"),
            args: l(Association),
            require_args: true,
        }),
        // R818
        Association => shaped(Shape::BinaryStr {
            lhs: n(NameKind::Associate),
            op: "=>",
            rhs: b(Selector),
            first: false,
        }),
        // R819
        Selector => alts(rlist![b(Expr), b(Variable)]),
        // R820
        EndAssociateStmt => shaped(Shape::EndStmt {
            kind: "ASSOCIATE",
            name: Some(n(NameKind::AssociateConstruct)),
            require_kind: true,
        }),
        // R821
        SelectTypeConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(SelectTypeStmt)),
            mids: rlist![b(TypeGuardStmt), b(ExecutionPartConstruct), b(TypeGuardStmt)],
            end: Some(b(EndSelectTypeStmt)),
            match_labels: false,
            hook: Hook::SelectType,
        })),
        // R822
        SelectTypeStmt => shaped(Shape::CustomStr(m_select_type_stmt)),
        // R823
        TypeGuardStmt => shaped(Shape::CustomStr(m_type_guard_stmt)),
        // R824
        EndSelectTypeStmt => shaped(Shape::EndStmt {
            kind: "SELECT",
            name: Some(n(NameKind::SelectConstruct)),
            require_kind: true,
        }),
        // R825
        DoConstruct => alts(rlist![b(BlockDoConstruct), b(NonblockDoConstruct)]),
        // R826
        BlockDoConstruct => alts(rlist![b(BlockLabelDoConstruct), b(BlockNonlabelDoConstruct)]),
        BlockLabelDoConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(LabelDoStmt)),
            mids: rlist![b(ExecutionPartConstruct)],
            end: Some(b(EndDo)),
            match_labels: true,
            hook: Hook::DoLabel,
        })),
        BlockNonlabelDoConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(NonlabelDoStmt)),
            mids: rlist![b(ExecutionPartConstruct)],
            end: Some(b(EndDoStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R827
        DoStmt => alts(rlist![b(LabelDoStmt), b(NonlabelDoStmt)]),
        // R828
        LabelDoStmt => shaped(Shape::CustomStr(m_label_do_stmt)),
        // R829
        NonlabelDoStmt => shaped(Shape::WordCls {
            word: KwPat::W("DO"),
            cls: Some(b(LoopControl)),
            check_colons: false,
            require_cls: false,
            colons_in_render: false,
        }),
        // R830
        LoopControl => shaped(Shape::CustomStr(m_loop_control)),
        // R831
        DoVariable => alts(rlist![sc(IntVariable)]),
        // R832
        DoBlock => shaped(Shape::Blocked(BlockSpec {
            start: None,
            mids: rlist![b(ExecutionPartConstruct)],
            end: None,
            match_labels: false,
            hook: Hook::DoLabel,
        })),
        // R833
        EndDo => alts(rlist![b(EndDoStmt), b(ContinueStmt)]),
        // R834
        EndDoStmt => shaped(Shape::EndStmt {
            kind: "DO",
            name: Some(n(NameKind::DoConstruct)),
            require_kind: true,
        }),
        // R835
        NonblockDoConstruct => alts(rlist![b(ActionTermDoConstruct), b(OuterSharedDoConstruct)]),
        // R836
        ActionTermDoConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(LabelDoStmt)),
            mids: rlist![b(ExecutionPartConstruct)],
            end: Some(b(DoTermActionStmt)),
            match_labels: true,
            hook: Hook::DoLabel,
        })),
        // R837
        DoBody => shaped(Shape::Blocked(BlockSpec {
            start: None,
            mids: rlist![b(ExecutionPartConstruct)],
            end: None,
            match_labels: false,
            hook: Hook::DoLabel,
        })),
        // R838
        DoTermActionStmt => alts(rlist![b(ActionStmtC824)]),
        // R839
        OuterSharedDoConstruct => shaped(Shape::CustomReader(m_outer_shared_do_construct)),
        // R840
        SharedTermDoConstruct => alts(rlist![b(OuterSharedDoConstruct), b(InnerSharedDoConstruct)]),
        // R841
        InnerSharedDoConstruct => shaped(Shape::CustomReader(m_inner_shared_do_construct)),
        // R842
        DoTermSharedStmt => alts(rlist![b(ActionStmt)]),
        // R843
        CycleStmt => shaped(Shape::WordCls {
            word: KwPat::W("CYCLE"),
            cls: Some(n(NameKind::DoConstruct)),
            check_colons: false,
            require_cls: false,
            colons_in_render: false,
        }),
        // R844
        ExitStmt => shaped(Shape::WordCls {
            word: KwPat::W("EXIT"),
            cls: Some(n(NameKind::DoConstruct)),
            check_colons: false,
            require_cls: false,
            colons_in_render: false,
        }),
        // R845
        GotoStmt => shaped(Shape::CustomStr(m_goto_stmt)),
        // R846
        ComputedGotoStmt => shaped(Shape::CustomStr(m_computed_goto_stmt)),
        // R847
        ArithmeticIfStmt => shaped(Shape::CustomStr(m_arithmetic_if_stmt)),
        // R848
        ContinueStmt => shaped(Shape::Keyword(KwPat::W("CONTINUE"))),
        // R849
        StopStmt => shaped(Shape::WordCls {
            word: KwPat::W("STOP"),
            cls: Some(b(StopCode)),
            check_colons: false,
            require_cls: false,
            colons_in_render: false,
        }),
        // R850
        StopCode => alts_shaped(rlist![sc(CharConstant)], Shape::Text(&pattern::ABS_LABEL)),
        _ => return None,
    })
}

/// R803: `IF ( scalar-logical-expr ) THEN`.
fn m_if_then_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.len() < 6 || !text[..2].eq_ignore_ascii_case("IF") {
        return Err(MatchErr::NoMatch);
    }
    if !text[text.len() - 4..].eq_ignore_ascii_case("THEN") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[2..text.len() - 4].trim();
    if line.len() < 2 || !line.starts_with('(') || !line.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let expr = parser.match_str(sc(LogicalExpr), line[1..line.len() - 1].trim())?;
    Ok(vec![Item::tree(expr)])
}

/// R804: `ELSE IF ( scalar-logical-expr ) THEN [if-construct-name]`.
fn m_else_if_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("ELSE") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[4..].trim_start();
    if !line[..2.min(line.len())].eq_ignore_ascii_case("IF") {
        return Err(MatchErr::NoMatch);
    }
    let line = line[2..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.rfind(')').ok_or(MatchErr::NoMatch)?;
    let expr_text = line[1..close].trim();
    let rest = line[close + 1..].trim_start();
    if !rest[..4.min(rest.len())].eq_ignore_ascii_case("THEN") {
        return Err(MatchErr::NoMatch);
    }
    let rest = rest[4..].trim();
    let expr = parser.match_str(sc(LogicalExpr), expr_text)?;
    if rest.is_empty() {
        return Ok(vec![Item::tree(expr), Item::Absent]);
    }
    let name = parser.match_str(n(NameKind::IfConstruct), rest)?;
    Ok(vec![Item::tree(expr), Item::tree(name)])
}

/// R805: `ELSE [if-construct-name]`.
fn m_else_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("ELSE") {
        return Err(MatchErr::NoMatch);
    }
    let rest = text[4..].trim();
    if rest.is_empty() {
        return Ok(vec![Item::Absent]);
    }
    let name = parser.match_str(n(NameKind::IfConstruct), rest)?;
    Ok(vec![Item::tree(name)])
}

/// R807: `IF ( scalar-logical-expr ) action-stmt`.
fn m_if_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..2.min(text.len())].eq_ignore_ascii_case("IF") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text);
    let line = line[2..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let expr = parser.match_str(sc(LogicalExpr), &repmap.restore(line[1..close].trim()))?;
    let stmt = parser.match_str(b(ActionStmtC802), &repmap.restore(line[close + 1..].trim_start()))?;
    Ok(vec![Item::tree(expr), Item::tree(stmt)])
}

/// R809: `SELECT CASE ( case-expr )`.
fn m_select_case_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..6.min(text.len())].eq_ignore_ascii_case("SELECT") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[6..].trim_start();
    if !line[..4.min(line.len())].eq_ignore_ascii_case("CASE") {
        return Err(MatchErr::NoMatch);
    }
    let line = line[4..].trim_start();
    if line.len() < 2 || !line.starts_with('(') || !line.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let expr = parser.match_str(b(CaseExpr), line[1..line.len() - 1].trim())?;
    Ok(vec![Item::tree(expr)])
}

/// R810: `CASE case-selector [case-construct-name]`.
fn m_case_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("CASE") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[4..].trim_start());
    if line.starts_with('(') {
        let close = line.find(')').ok_or(MatchErr::NoMatch)?;
        let selector = parser.match_str(b(CaseSelector), &repmap.restore(line[..close + 1].trim()))?;
        let rest = line[close + 1..].trim();
        if rest.is_empty() {
            return Ok(vec![Item::tree(selector), Item::Absent]);
        }
        let name = parser.match_str(n(NameKind::CaseConstruct), &repmap.restore(rest))?;
        return Ok(vec![Item::tree(selector), Item::tree(name)]);
    }
    if line[..7.min(line.len())].eq_ignore_ascii_case("DEFAULT") {
        let selector = parser.match_str(b(CaseSelector), "DEFAULT")?;
        let rest = line[7..].trim();
        if rest.is_empty() {
            return Ok(vec![Item::tree(selector), Item::Absent]);
        }
        let name = parser.match_str(n(NameKind::CaseConstruct), &repmap.restore(rest))?;
        return Ok(vec![Item::tree(selector), Item::tree(name)]);
    }
    Err(MatchErr::NoMatch)
}

/// R813: `( case-value-range-list )` or `DEFAULT`.
fn m_case_selector(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.eq_ignore_ascii_case("DEFAULT") {
        return Ok(vec![Item::Absent]);
    }
    if !(text.starts_with('(') && text.ends_with(')')) {
        return Err(MatchErr::NoMatch);
    }
    let ranges = parser.match_str(l(CaseValueRange), text[1..text.len() - 1].trim())?;
    Ok(vec![Item::tree(ranges)])
}

/// R822: `SELECT TYPE ( [associate-name =>] selector )`.
fn m_select_type_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..6.min(text.len())].eq_ignore_ascii_case("SELECT") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[6..].trim_start();
    if !line[..4.min(line.len())].eq_ignore_ascii_case("TYPE") {
        return Err(MatchErr::NoMatch);
    }
    let line = line[4..].trim_start();
    if line.len() < 2 || !line.starts_with('(') || !line.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let payload = line[1..line.len() - 1].trim();
    if let Some(arrow) = payload.find("=>") {
        let name = parser.match_str(n(NameKind::Associate), payload[..arrow].trim_end())?;
        let selector = parser.match_str(b(Selector), payload[arrow + 2..].trim_start())?;
        return Ok(vec![Item::tree(name), Item::tree(selector)]);
    }
    let selector = parser.match_str(b(Selector), payload)?;
    Ok(vec![Item::Absent, Item::tree(selector)])
}

/// R823: `TYPE IS (...)`, `CLASS IS (...)` or `CLASS DEFAULT`, each with an
/// optional trailing construct name.
fn m_type_guard_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (kind, mut line) = if text[..4.min(text.len())].eq_ignore_ascii_case("TYPE") {
        let line = text[4..].trim_start();
        if !line[..2.min(line.len())].eq_ignore_ascii_case("IS") {
            return Err(MatchErr::NoMatch);
        }
        ("TYPE IS", line[2..].trim_start())
    } else if text[..5.min(text.len())].eq_ignore_ascii_case("CLASS") {
        let line = text[5..].trim_start();
        if line[..2.min(line.len())].eq_ignore_ascii_case("IS") {
            ("CLASS IS", line[2..].trim_start())
        } else if line[..7.min(line.len())].eq_ignore_ascii_case("DEFAULT") {
            let rest = line[7..].trim();
            if rest.is_empty() {
                return Ok(vec![Item::word("CLASS DEFAULT"), Item::Absent, Item::Absent]);
            }
            let name = parser.match_str(n(NameKind::SelectConstruct), rest)?;
            return Ok(vec![
                Item::word("CLASS DEFAULT"),
                Item::Absent,
                Item::tree(name),
            ]);
        } else {
            return Err(MatchErr::NoMatch);
        }
    } else {
        return Err(MatchErr::NoMatch);
    };
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.rfind(')').ok_or(MatchErr::NoMatch)?;
    let spec_text = line[1..close].trim();
    if spec_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let spec = parser.match_str(b(TypeSpec), spec_text)?;
    line = line[close + 1..].trim();
    if line.is_empty() {
        return Ok(vec![Item::word(kind), Item::tree(spec), Item::Absent]);
    }
    let name = parser.match_str(n(NameKind::SelectConstruct), line)?;
    Ok(vec![Item::word(kind), Item::tree(spec), Item::tree(name)])
}

/// R828: `DO label [loop-control]`; the construct name comes from the
/// reader item, so the first item slot stays empty here.
fn m_label_do_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..2.min(text.len())].eq_ignore_ascii_case("DO") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[2..].trim_start();
    let label_match = pattern::LABEL.find(line).ok_or(MatchErr::NoMatch)?;
    let label = parser.match_str(b(Label), label_match.as_str())?;
    let rest = line[label_match.end()..].trim_start();
    if rest.is_empty() {
        return Ok(vec![Item::Absent, Item::tree(label), Item::Absent]);
    }
    let control = parser.match_str(b(LoopControl), rest)?;
    Ok(vec![Item::Absent, Item::tree(label), Item::tree(control)])
}

/// R830: `[,] do-variable = expr, expr [, expr]` or `[,] WHILE ( expr )`.
/// Items: while-expr, do-variable, three bound slots, optional leading
/// comma.
fn m_loop_control(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (rest, delim) = match text.strip_prefix(',') {
        Some(rest) => (rest.trim_start(), Item::word(", ")),
        None => (text, Item::Absent),
    };
    let (line, repmap) = string_replace_map(rest);
    if line[..5.min(line.len())].eq_ignore_ascii_case("WHILE") {
        let tail = line[5..].trim_start();
        if tail.starts_with('(') && tail.ends_with(')') {
            let expr = parser.match_str(
                sc(LogicalExpr),
                &repmap.restore(tail[1..tail.len() - 1].trim()),
            )?;
            return Ok(vec![
                Item::tree(expr),
                Item::Absent,
                Item::Absent,
                Item::Absent,
                Item::Absent,
                delim,
            ]);
        }
    }
    if line.matches('=').count() != 1 {
        return Err(MatchErr::NoMatch);
    }
    let eq = line.find('=').unwrap();
    let variable = parser.match_str(b(Variable), &repmap.restore(line[..eq].trim_end()))?;
    let bounds: Vec<&str> = line[eq + 1..].split(',').collect();
    if !(2..=3).contains(&bounds.len()) {
        return Err(MatchErr::NoMatch);
    }
    let first = parser.match_str(sc(IntExpr), &repmap.restore(bounds[0].trim()))?;
    let second = parser.match_str(sc(IntExpr), &repmap.restore(bounds[1].trim()))?;
    let third = if bounds.len() == 3 {
        Item::tree(parser.match_str(sc(IntExpr), &repmap.restore(bounds[2].trim()))?)
    } else {
        Item::Absent
    };
    Ok(vec![
        Item::Absent,
        Item::tree(variable),
        Item::tree(first),
        Item::tree(second),
        third,
        delim,
    ])
}

/// R839: `label-do-stmt do-body shared-term-do-construct`; the do label is
/// pushed so the body stops at the shared terminator.
fn m_outer_shared_do_construct(
    parser: &FortranParser,
    reader: &mut FortranReader,
) -> MatchResult<Vec<Item>> {
    shared_do_construct(parser, reader, b(SharedTermDoConstruct))
}

/// R841: `label-do-stmt do-body do-term-shared-stmt`.
fn m_inner_shared_do_construct(
    parser: &FortranParser,
    reader: &mut FortranReader,
) -> MatchResult<Vec<Item>> {
    shared_do_construct(parser, reader, b(DoTermSharedStmt))
}

fn shared_do_construct(
    parser: &FortranParser,
    reader: &mut FortranReader,
    term: super::Rule,
) -> MatchResult<Vec<Item>> {
    let start = parser.match_reader(b(LabelDoStmt), reader)?;
    let label = start
        .items
        .get(1)
        .and_then(Item::as_tree)
        .and_then(|node| node.items.first())
        .and_then(Item::as_word)
        .map(str::to_string);
    let depth = reader.pending_do_labels.len();
    if let Some(label) = &label {
        reader.pending_do_labels.push(label.clone());
    }
    let result = (|| {
        let body = parser.match_reader(b(DoBody), reader)?;
        let terminator = parser.match_reader(term, reader)?;
        if let Some(label) = &label {
            let term_label = terminator.src.as_ref().and_then(|src| src.label.as_deref());
            if term_label != Some(label.as_str()) {
                return Err(MatchErr::NoMatch);
            }
        }
        Ok(vec![Item::tree(start.clone()), Item::tree(body), Item::tree(terminator)])
    })();
    reader.pending_do_labels.truncate(depth);
    result
}

/// R845: `GO TO label`.
fn m_goto_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..2.min(text.len())].eq_ignore_ascii_case("GO") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[2..].trim_start();
    if !line[..2.min(line.len())].eq_ignore_ascii_case("TO") {
        return Err(MatchErr::NoMatch);
    }
    let label = parser.match_str(b(Label), line[2..].trim_start())?;
    Ok(vec![Item::tree(label)])
}

/// R846: `GO TO ( label-list ) [,] scalar-int-expr`.
fn m_computed_goto_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..2.min(text.len())].eq_ignore_ascii_case("GO") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[2..].trim_start();
    if !line[..2.min(line.len())].eq_ignore_ascii_case("TO") {
        return Err(MatchErr::NoMatch);
    }
    let line = line[2..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let labels = parser.match_str(l(Label), line[1..close].trim())?;
    let mut rest = line[close + 1..].trim_start();
    if let Some(stripped) = rest.strip_prefix(',') {
        rest = stripped.trim_start();
    }
    if rest.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let expr = parser.match_str(sc(IntExpr), rest)?;
    Ok(vec![Item::tree(labels), Item::tree(expr)])
}

/// R847: `IF ( scalar-numeric-expr ) label, label, label`.
fn m_arithmetic_if_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..2.min(text.len())].eq_ignore_ascii_case("IF") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[2..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.rfind(')').ok_or(MatchErr::NoMatch)?;
    let labels: Vec<&str> = line[close + 1..].trim_start().split(',').collect();
    if labels.len() != 3 {
        return Err(MatchErr::NoMatch);
    }
    let expr = parser.match_str(sc(NumericExpr), line[1..close].trim())?;
    let mut items = vec![Item::tree(expr)];
    for label in labels {
        items.push(Item::tree(parser.match_str(b(Label), label.trim())?));
    }
    Ok(items)
}
