//! Section 6 of the standard: designators, substrings, part references,
//! ALLOCATE / NULLIFY / DEALLOCATE (R601-R636).

use super::BaseRule::{self, *};
use super::{alts, rlist, kvlist, alts_shaped, b, l, n, sc, shaped, KwPat, NameKind, RuleSpec, Shape};
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R601
        Variable => alts(rlist![b(Designator)]),
        // R602
        VariableName => alts(rlist![b(Name)]),
        // R603
        Designator => alts(rlist![
            b(ObjectName),
            b(ArraySection),
            b(ArrayElement),
            b(StructureComponent),
            b(Substring),
        ]),
        // R604-R608
        LogicalVariable => alts(rlist![b(Variable)]),
        DefaultLogicalVariable => alts(rlist![b(Variable)]),
        CharVariable => alts(rlist![b(Variable)]),
        DefaultCharVariable => alts(rlist![b(Variable)]),
        IntVariable => alts(rlist![b(Variable)]),
        // R609
        Substring => shaped(Shape::CallOf {
            head: b(ParentString),
            args: b(SubstringRange),
            require_args: true,
        }),
        // R610
        ParentString => alts(rlist![
            sc(VariableName),
            b(ArrayElement),
            sc(StructureComponent),
            sc(Constant),
        ]),
        // R611
        SubstringRange => shaped(Shape::Separated {
            lhs: Some(sc(IntExpr)),
            rhs: Some(sc(IntExpr)),
            require_lhs: false,
            require_rhs: false,
        }),
        // R612
        DataRef => alts_shaped(
            rlist![b(PartRef)],
            Shape::Sequence {
                item: b(PartRef),
                sep: "%",
            },
        ),
        // R613
        PartRef => alts_shaped(
            rlist![n(NameKind::Part)],
            Shape::CallOf {
                head: n(NameKind::Part),
                args: l(SectionSubscript),
                require_args: true,
            },
        ),
        // R614
        StructureComponent => alts(rlist![b(DataRef)]),
        // R615
        TypeParamInquiry => shaped(Shape::BinaryStr {
            lhs: b(Designator),
            op: "%",
            rhs: n(NameKind::TypeParam),
            first: false,
        }),
        // R616
        ArrayElement => alts(rlist![b(DataRef)]),
        // R617
        ArraySection => alts_shaped(
            rlist![b(DataRef)],
            Shape::CallOf {
                head: b(DataRef),
                args: b(SubstringRange),
                require_args: true,
            },
        ),
        // R618
        Subscript => alts(rlist![sc(IntExpr)]),
        // R619
        SectionSubscript => alts(rlist![b(SubscriptTriplet), b(VectorSubscript), b(Subscript)]),
        // R620
        SubscriptTriplet => shaped(Shape::CustomStr(m_subscript_triplet)),
        // R621
        Stride => alts(rlist![sc(IntExpr)]),
        // R622
        VectorSubscript => alts(rlist![b(IntExpr)]),
        // R623
        AllocateStmt => shaped(Shape::CustomStr(m_allocate_stmt)),
        // R624
        AllocOpt => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (&["STAT"], b(StatVariable)),
                (&["ERRMSG"], b(ErrmsgVariable)),
                (&["SOURCE"], b(SourceExpr)),
            ],
            unit_fallback: None,
        }),
        // R625-R627
        StatVariable => alts(rlist![sc(IntVariable)]),
        ErrmsgVariable => alts(rlist![sc(DefaultCharVariable)]),
        SourceExpr => alts(rlist![b(Expr)]),
        // R628
        Allocation => alts_shaped(
            rlist![b(VariableName), b(AllocateObject)],
            Shape::CallOf {
                head: b(AllocateObject),
                args: l(AllocateShapeSpec),
                require_args: true,
            },
        ),
        // R629
        AllocateObject => alts(rlist![b(VariableName), b(StructureComponent)]),
        // R630
        AllocateShapeSpec => shaped(Shape::CustomStr(m_allocate_shape_spec)),
        // R631, R632
        LowerBoundExpr => alts(rlist![sc(IntExpr)]),
        UpperBoundExpr => alts(rlist![sc(IntExpr)]),
        // R633
        NullifyStmt => shaped(Shape::Call {
            word: KwPat::W("NULLIFY"),
            args: l(PointerObject),
            require_args: true,
        }),
        // R634
        PointerObject => alts(rlist![b(VariableName), b(StructureComponent), b(ProcPointerName)]),
        // R635
        DeallocateStmt => shaped(Shape::CustomStr(m_deallocate_stmt)),
        // R636
        DeallocOpt => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (&["STAT"], b(StatVariable)),
                (&["ERRMSG"], b(ErrmsgVariable)),
            ],
            unit_fallback: None,
        }),
        _ => return None,
    })
}

/// R620: `[subscript] : [subscript] [: stride]`.
fn m_subscript_triplet(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let parts: Vec<&str> = line.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(MatchErr::NoMatch);
    }
    let mut sub = |part: &str| -> MatchResult<Item> {
        let part = part.trim();
        if part.is_empty() {
            Ok(Item::Absent)
        } else {
            Ok(Item::tree(
                parser.match_str(b(Subscript), &repmap.restore(part))?,
            ))
        }
    };
    let lower = sub(parts[0])?;
    let upper = sub(parts[1])?;
    let stride = if parts.len() == 3 {
        let part = parts[2].trim();
        if part.is_empty() {
            Item::Absent
        } else {
            Item::tree(parser.match_str(b(Stride), &repmap.restore(part))?)
        }
    } else {
        Item::Absent
    };
    Ok(vec![lower, upper, stride])
}

/// R623: `ALLOCATE ( [type-spec ::] allocation-list [, alloc-opt-list] )`.
fn m_allocate_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..8.min(text.len())].eq_ignore_ascii_case("ALLOCATE") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[8..].trim_start();
    if !(line.starts_with('(') && line.ends_with(')')) {
        return Err(MatchErr::NoMatch);
    }
    let (mut line, repmap) = string_replace_map(line[1..line.len() - 1].trim());
    let mut spec = Item::Absent;
    if let Some(colons) = line.find("::") {
        spec = Item::tree(parser.match_str(b(TypeSpec), &repmap.restore(line[..colons].trim_end()))?);
        line = line[colons + 2..].trim_start().to_string();
    }
    let mut opts = Item::Absent;
    if let Some(eq) = line.find('=') {
        let comma = line[..eq].rfind(',').ok_or(MatchErr::NoMatch)?;
        opts = Item::tree(
            parser.match_str(l(AllocOpt), &repmap.restore(line[comma + 1..].trim_start()))?,
        );
        line = line[..comma].trim_end().to_string();
    }
    let allocations = parser.match_str(l(Allocation), &repmap.restore(&line))?;
    Ok(vec![spec, Item::tree(allocations), opts])
}

/// R630: `[lower-bound-expr :] upper-bound-expr`.
fn m_allocate_shape_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    super::section_5::shape_bounds(parser, text, b(LowerBoundExpr), b(UpperBoundExpr))
}

/// R635: `DEALLOCATE ( allocate-object-list [, dealloc-opt-list] )`.
fn m_deallocate_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..10.min(text.len())].eq_ignore_ascii_case("DEALLOCATE") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[10..].trim_start();
    if !(line.starts_with('(') && line.ends_with(')')) {
        return Err(MatchErr::NoMatch);
    }
    let (mut line, repmap) = string_replace_map(line[1..line.len() - 1].trim());
    let mut opts = Item::Absent;
    if let Some(eq) = line.find('=') {
        let comma = line[..eq].rfind(',').ok_or(MatchErr::NoMatch)?;
        opts = Item::tree(
            parser.match_str(l(DeallocOpt), &repmap.restore(line[comma + 1..].trim_start()))?,
        );
        line = line[..comma].trim_end().to_string();
    }
    let objects = parser.match_str(l(AllocateObject), &repmap.restore(&line))?;
    Ok(vec![Item::tree(objects), opts])
}
