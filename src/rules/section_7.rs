//! Section 7 of the standard: the expression ladder, assignment, WHERE and
//! FORALL (R701-R759). Operator precedence is encoded by the rule
//! hierarchy; the formally left-recursive binary rules split at the
//! rightmost operator occurrence and recurse into their left operand.

use super::BaseRule::{self, *};
use super::{alts, rlist, alts_shaped, b, l, n, sc, shaped, BlockSpec, Hook, NameKind, RuleSpec, Shape};
use crate::pattern::{self, OpClass};
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R701
        Primary => alts(rlist![
            b(Constant),
            b(Parenthesis),
            b(Designator),
            b(ArrayConstructor),
            b(StructureConstructor),
            b(FunctionReference),
            b(TypeParamInquiry),
            n(NameKind::TypeParam),
        ]),
        // R701.h
        Parenthesis => shaped(Shape::Bracket {
            left: "(",
            right: ")",
            inner: b(Expr),
            require_inner: true,
        }),
        // R702
        Level1Expr => alts_shaped(
            rlist![b(Primary)],
            Shape::Unary {
                op: OpClass::DefinedUnary,
                operand: b(Primary),
            },
        ),
        // R703, R723
        DefinedUnaryOp => alts(rlist![b(DefinedOp)]),
        DefinedBinaryOp => alts(rlist![b(DefinedOp)]),
        DefinedOp => shaped(Shape::CustomStr(m_defined_op)),
        // R311, R312
        DefinedOperator => alts(rlist![
            b(DefinedUnaryOp),
            b(DefinedBinaryOp),
            b(ExtendedIntrinsicOp),
        ]),
        ExtendedIntrinsicOp => shaped(Shape::Keyword(super::KwPat::Set(&[
            "**", "*", "/", "+", "-", "//", "==", "/=", "<", "<=", ">", ">=", ".EQ.", ".NE.",
            ".LT.", ".LE.", ".GT.", ".GE.", ".NOT.", ".AND.", ".OR.", ".EQV.", ".NEQV.",
        ]))),
        // R704: power is right-associative
        MultOperand => alts_shaped(
            rlist![b(Level1Expr)],
            Shape::Binary {
                lhs: b(Level1Expr),
                op: OpClass::Power,
                rhs: b(MultOperand),
            },
        ),
        // R705
        AddOperand => alts_shaped(
            rlist![b(MultOperand)],
            Shape::Binary {
                lhs: b(AddOperand),
                op: OpClass::Mult,
                rhs: b(MultOperand),
            },
        ),
        // R706
        Level2Expr => alts_shaped(
            rlist![b(Level2UnaryExpr)],
            Shape::Binary {
                lhs: b(Level2Expr),
                op: OpClass::Add,
                rhs: b(AddOperand),
            },
        ),
        // R706.c
        Level2UnaryExpr => alts_shaped(
            rlist![b(AddOperand)],
            Shape::Unary {
                op: OpClass::Add,
                operand: b(AddOperand),
            },
        ),
        // R710
        Level3Expr => alts_shaped(
            rlist![b(Level2Expr)],
            Shape::Binary {
                lhs: b(Level3Expr),
                op: OpClass::Concat,
                rhs: b(Level2Expr),
            },
        ),
        // R712
        Level4Expr => alts_shaped(
            rlist![b(Level3Expr)],
            Shape::Binary {
                lhs: b(Level3Expr),
                op: OpClass::Rel,
                rhs: b(Level3Expr),
            },
        ),
        // R714
        AndOperand => alts_shaped(
            rlist![b(Level4Expr)],
            Shape::Unary {
                op: OpClass::Not,
                operand: b(Level4Expr),
            },
        ),
        // R715
        OrOperand => alts_shaped(
            rlist![b(AndOperand)],
            Shape::Binary {
                lhs: b(OrOperand),
                op: OpClass::And,
                rhs: b(AndOperand),
            },
        ),
        // R716
        EquivOperand => alts_shaped(
            rlist![b(OrOperand)],
            Shape::Binary {
                lhs: b(EquivOperand),
                op: OpClass::Or,
                rhs: b(OrOperand),
            },
        ),
        // R717
        Level5Expr => alts_shaped(
            rlist![b(EquivOperand)],
            Shape::Binary {
                lhs: b(Level5Expr),
                op: OpClass::Equiv,
                rhs: b(EquivOperand),
            },
        ),
        // R722
        Expr => alts_shaped(
            rlist![b(Level5Expr)],
            Shape::Binary {
                lhs: b(Expr),
                op: OpClass::DefinedBinary,
                rhs: b(Level5Expr),
            },
        ),
        // R724-R733
        LogicalExpr => alts(rlist![b(Expr)]),
        CharExpr => alts(rlist![b(Expr)]),
        DefaultCharExpr => alts(rlist![b(Expr)]),
        IntExpr => alts(rlist![b(Expr)]),
        NumericExpr => alts(rlist![b(Expr)]),
        SpecificationExpr => alts(rlist![sc(IntExpr)]),
        InitializationExpr => alts(rlist![b(Expr)]),
        CharInitializationExpr => alts(rlist![b(CharExpr)]),
        IntInitializationExpr => alts(rlist![b(IntExpr)]),
        LogicalInitializationExpr => alts(rlist![b(LogicalExpr)]),
        // R734
        AssignmentStmt => shaped(Shape::BinaryStr {
            lhs: b(Variable),
            op: "=",
            rhs: b(Expr),
            first: true,
        }),
        // R735
        PointerAssignmentStmt => shaped(Shape::CustomStr(m_pointer_assignment_stmt)),
        // R736
        DataPointerObject => alts_shaped(
            rlist![b(VariableName)],
            Shape::BinaryStr {
                lhs: b(Variable),
                op: "%",
                rhs: n(NameKind::DataPointerComponent),
                first: false,
            },
        ),
        // R737
        BoundsSpec => shaped(Shape::Separated {
            lhs: Some(b(LowerBoundExpr)),
            rhs: None,
            require_lhs: true,
            require_rhs: false,
        }),
        // R738
        BoundsRemapping => shaped(Shape::Separated {
            lhs: Some(b(LowerBoundExpr)),
            rhs: Some(b(UpperBoundExpr)),
            require_lhs: true,
            require_rhs: true,
        }),
        // R739
        DataTarget => alts(rlist![b(Variable), b(Expr)]),
        // R740
        ProcPointerObject => alts(rlist![b(ProcPointerName), b(ProcComponentRef)]),
        // R741
        ProcComponentRef => shaped(Shape::BinaryStr {
            lhs: b(Variable),
            op: "%",
            rhs: n(NameKind::ProcedureComponent),
            first: false,
        }),
        // R742
        ProcTarget => alts(rlist![b(Expr), n(NameKind::Procedure), b(ProcComponentRef)]),
        // R743
        WhereStmt => shaped(Shape::CustomStr(m_where_stmt)),
        // R744
        WhereConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(WhereConstructStmt)),
            mids: rlist![
                b(WhereBodyConstruct),
                b(MaskedElsewhereStmt),
                b(WhereBodyConstruct),
                b(ElsewhereStmt),
                b(WhereBodyConstruct),
            ],
            end: Some(b(EndWhereStmt)),
            match_labels: false,
            hook: Hook::Where,
        })),
        // R745
        WhereConstructStmt => shaped(Shape::CustomStr(m_where_construct_stmt)),
        // R746
        WhereBodyConstruct => alts(rlist![b(WhereAssignmentStmt), b(WhereStmt), b(WhereConstruct)]),
        // R747
        WhereAssignmentStmt => alts(rlist![b(AssignmentStmt)]),
        // R748
        MaskExpr => alts(rlist![b(LogicalExpr)]),
        // R749
        MaskedElsewhereStmt => shaped(Shape::CustomStr(m_masked_elsewhere_stmt)),
        // R750
        ElsewhereStmt => shaped(Shape::CustomStr(m_elsewhere_stmt)),
        // R751
        EndWhereStmt => shaped(Shape::EndStmt {
            kind: "WHERE",
            name: Some(n(NameKind::WhereConstruct)),
            require_kind: true,
        }),
        // R752
        ForallConstruct => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(ForallConstructStmt)),
            mids: rlist![b(ForallBodyConstruct)],
            end: Some(b(EndForallStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R753
        ForallConstructStmt => shaped(Shape::WordCls {
            word: super::KwPat::W("FORALL"),
            cls: Some(b(ForallHeader)),
            check_colons: false,
            require_cls: true,
            colons_in_render: false,
        }),
        // R754
        ForallHeader => shaped(Shape::CustomStr(m_forall_header)),
        // R755
        ForallTripletSpec => shaped(Shape::CustomStr(m_forall_triplet_spec)),
        // R756
        ForallBodyConstruct => alts(rlist![
            b(ForallAssignmentStmt),
            b(WhereStmt),
            b(WhereConstruct),
            b(ForallConstruct),
            b(ForallStmt),
        ]),
        // R757
        ForallAssignmentStmt => alts(rlist![b(AssignmentStmt), b(PointerAssignmentStmt)]),
        // R758
        EndForallStmt => shaped(Shape::EndStmt {
            kind: "FORALL",
            name: Some(n(NameKind::ForallConstruct)),
            require_kind: true,
        }),
        // R759
        ForallStmt => shaped(Shape::CustomStr(m_forall_stmt)),
        _ => return None,
    })
}

/// R703/R723: `. letter [letter]... .`, excluding the intrinsic operator
/// and logical literal spellings.
fn m_defined_op(_parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if pattern::ABS_NON_DEFINED_BINARY_OP.is_match(text) {
        return Err(MatchErr::NoMatch);
    }
    if !pattern::ABS_DEFINED_OP.is_match(text) {
        return Err(MatchErr::NoMatch);
    }
    Ok(vec![Item::word(text.to_uppercase())])
}

/// R735: three pointer assignment forms; the bounds variants are tried as
/// bounds-spec first and bounds-remapping second.
fn m_pointer_assignment_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let arrow = line.find("=>").ok_or(MatchErr::NoMatch)?;
    let lhs = line[..arrow].trim_end();
    let rhs = repmap.restore(line[arrow + 2..].trim_start());
    if rhs.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    if lhs.ends_with(')') {
        let open = lhs.rfind('(').ok_or(MatchErr::NoMatch)?;
        let object = repmap.restore(lhs[..open].trim_end());
        let bounds_text = repmap.restore(lhs[open + 1..lhs.len() - 1].trim());
        let object = parser.match_str(b(DataPointerObject), &object)?;
        let target = parser.match_str(b(DataTarget), &rhs)?;
        let bounds = match parser.match_str(l(BoundsSpec), &bounds_text) {
            Ok(bounds) => bounds,
            Err(MatchErr::NoMatch) => parser.match_str(l(BoundsRemapping), &bounds_text)?,
            Err(fatal) => return Err(fatal),
        };
        return Ok(vec![
            Item::tree(object),
            Item::tree(bounds),
            Item::tree(target),
        ]);
    }
    let lhs = repmap.restore(lhs);
    match parser.match_str(b(DataPointerObject), &lhs) {
        Ok(object) => {
            let target = parser.match_str(b(DataTarget), &rhs)?;
            Ok(vec![Item::tree(object), Item::Absent, Item::tree(target)])
        }
        Err(MatchErr::NoMatch) => {
            let object = parser.match_str(b(ProcPointerObject), &lhs)?;
            let target = parser.match_str(b(ProcTarget), &rhs)?;
            Ok(vec![Item::tree(object), Item::Absent, Item::tree(target)])
        }
        Err(fatal) => Err(fatal),
    }
}

/// R743: `WHERE ( mask-expr ) where-assignment-stmt`.
fn m_where_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..5.min(text.len())].eq_ignore_ascii_case("WHERE") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[5..].trim_start());
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let stmt_text = repmap.restore(line[close + 1..].trim_start());
    if stmt_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let mask = parser.match_str(b(MaskExpr), &repmap.restore(line[1..close].trim()))?;
    let stmt = parser.match_str(b(WhereAssignmentStmt), &stmt_text)?;
    Ok(vec![Item::tree(mask), Item::tree(stmt)])
}

/// R745: `WHERE ( mask-expr )`.
fn m_where_construct_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..5.min(text.len())].eq_ignore_ascii_case("WHERE") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[5..].trim_start();
    if line.len() < 2 || !line.starts_with('(') || !line.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let mask = parser.match_str(b(MaskExpr), line[1..line.len() - 1].trim())?;
    Ok(vec![Item::tree(mask)])
}

/// R749: `ELSEWHERE ( mask-expr ) [where-construct-name]`, with optional
/// space between ELSE and WHERE.
fn m_masked_elsewhere_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let found = pattern::ELSEWHERE_WORD.find(text).ok_or(MatchErr::NoMatch)?;
    let line = text[found.end()..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.rfind(')').ok_or(MatchErr::NoMatch)?;
    let mask_text = line[1..close].trim();
    if mask_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let mask = parser.match_str(b(MaskExpr), mask_text)?;
    let rest = line[close + 1..].trim();
    if rest.is_empty() {
        return Ok(vec![Item::tree(mask), Item::Absent]);
    }
    let name = parser.match_str(n(NameKind::WhereConstruct), rest)?;
    Ok(vec![Item::tree(mask), Item::tree(name)])
}

/// R750: `ELSEWHERE [where-construct-name]`.
fn m_elsewhere_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let found = pattern::ELSEWHERE_WORD.find(text).ok_or(MatchErr::NoMatch)?;
    let rest = text[found.end()..].trim();
    if rest.is_empty() {
        return Ok(vec![Item::word("ELSEWHERE"), Item::Absent]);
    }
    let name = parser.match_str(n(NameKind::WhereConstruct), rest)?;
    Ok(vec![Item::word("ELSEWHERE"), Item::tree(name)])
}

/// R754: `( forall-triplet-spec-list [, scalar-mask-expr] )`. A trailing
/// element containing `:` belongs to the triplet list, not the mask.
fn m_forall_header(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.len() < 2 || !text.starts_with('(') || !text.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[1..text.len() - 1].trim());
    if let Some(comma) = line.rfind(',') {
        let tail = &line[comma + 1..];
        if !tail.contains(':') {
            let triplets =
                parser.match_str(l(ForallTripletSpec), &repmap.restore(line[..comma].trim_end()))?;
            let mask = parser.match_str(sc(MaskExpr), &repmap.restore(tail.trim()))?;
            return Ok(vec![Item::tree(triplets), Item::tree(mask)]);
        }
    }
    let triplets = parser.match_str(l(ForallTripletSpec), &repmap.restore(&line))?;
    Ok(vec![Item::tree(triplets), Item::Absent])
}

/// R755: `index-name = subscript : subscript [: stride]`.
fn m_forall_triplet_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let eq = line.find('=').ok_or(MatchErr::NoMatch)?;
    let name = parser.match_str(n(NameKind::Index), &repmap.restore(line[..eq].trim_end()))?;
    let parts: Vec<&str> = line[eq + 1..].split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(MatchErr::NoMatch);
    }
    let first = parser.match_str(b(Subscript), &repmap.restore(parts[0].trim()))?;
    let second = parser.match_str(b(Subscript), &repmap.restore(parts[1].trim()))?;
    let stride = if parts.len() == 3 {
        Item::tree(parser.match_str(b(Stride), &repmap.restore(parts[2].trim()))?)
    } else {
        Item::Absent
    };
    Ok(vec![Item::tree(name), Item::tree(first), Item::tree(second), stride])
}

/// R759: `FORALL forall-header forall-assignment-stmt`.
fn m_forall_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..6.min(text.len())].eq_ignore_ascii_case("FORALL") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[6..].trim_start());
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let header_text = repmap.restore(line[..close + 1].trim());
    let stmt_text = repmap.restore(line[close + 1..].trim_start());
    if stmt_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let header = parser.match_str(b(ForallHeader), &header_text)?;
    let stmt = parser.match_str(b(ForallAssignmentStmt), &stmt_text)?;
    Ok(vec![Item::tree(header), Item::tree(stmt)])
}
