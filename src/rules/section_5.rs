//! Section 5 of the standard: type declarations, attributes, DATA,
//! IMPLICIT, NAMELIST, EQUIVALENCE and COMMON (R501-R558).

use super::BaseRule::{self, *};
use super::{alts, rlist, alts_shaped, b, l, n, nl, sc, shaped, KwPat, NameKind, Rule, RuleSpec, Shape};
use crate::pattern;
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};
use once_cell::sync::Lazy;
use regex::Regex;

// first blank followed by a letter: the boundary between a type spec
// without `::` and the entity list
static DECL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s[A-Za-z_]").unwrap());

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R501
        TypeDeclarationStmt => shaped(Shape::CustomStr(m_type_declaration_stmt)),
        // R502
        DeclarationTypeSpec => alts_shaped(
            rlist![b(IntrinsicTypeSpec)],
            Shape::CustomStr(m_declaration_type_spec),
        ),
        // R503.d, R503.f
        DimensionAttrSpec => shaped(Shape::Call {
            word: KwPat::W("DIMENSION"),
            args: b(ArraySpec),
            require_args: true,
        }),
        IntentAttrSpec => shaped(Shape::Call {
            word: KwPat::W("INTENT"),
            args: b(IntentSpec),
            require_args: true,
        }),
        // R503
        AttrSpec => alts_shaped(
            rlist![
                b(AccessSpec),
                b(LanguageBindingSpec),
                b(DimensionAttrSpec),
                b(IntentAttrSpec),
            ],
            Shape::Keyword(KwPat::Set(&[
                "ALLOCATABLE",
                "ASYNCHRONOUS",
                "EXTERNAL",
                "INTRINSIC",
                "OPTIONAL",
                "PARAMETER",
                "POINTER",
                "PROTECTED",
                "SAVE",
                "TARGET",
                "VALUE",
                "VOLATILE",
            ])),
        ),
        // R504
        EntityDecl => shaped(Shape::CustomStr(m_entity_decl)),
        // R505
        ObjectName => alts(rlist![b(Name)]),
        // R506
        Initialization => shaped(Shape::CustomStr(m_initialization)),
        // R507
        NullInit => alts_shaped(rlist![b(FunctionReference)], Shape::Keyword(KwPat::W("NULL"))),
        // R508
        AccessSpec => shaped(Shape::Keyword(KwPat::Set(&["PUBLIC", "PRIVATE"]))),
        // R509
        LanguageBindingSpec => shaped(Shape::CustomStr(m_language_binding_spec)),
        // R510
        ArraySpec => alts(rlist![
            b(AssumedSizeSpec),
            l(ExplicitShapeSpec),
            l(AssumedShapeSpec),
            l(DeferredShapeSpec),
        ]),
        // R511
        ExplicitShapeSpec => shaped(Shape::CustomStr(m_explicit_shape_spec)),
        // R512, R513
        LowerBound => alts(rlist![b(SpecificationExpr)]),
        UpperBound => alts(rlist![b(SpecificationExpr)]),
        // R514
        AssumedShapeSpec => shaped(Shape::Separated {
            lhs: Some(b(LowerBound)),
            rhs: None,
            require_lhs: false,
            require_rhs: false,
        }),
        // R515
        DeferredShapeSpec => shaped(Shape::Separated {
            lhs: None,
            rhs: None,
            require_lhs: false,
            require_rhs: false,
        }),
        // R516
        AssumedSizeSpec => shaped(Shape::CustomStr(m_assumed_size_spec)),
        // R517
        IntentSpec => shaped(Shape::Keyword(KwPat::Re(&pattern::ABS_INTENT_SPEC))),
        // R518
        AccessStmt => shaped(Shape::WordCls {
            word: KwPat::Set(&["PUBLIC", "PRIVATE"]),
            cls: Some(l(AccessId)),
            check_colons: true,
            require_cls: false,
            colons_in_render: true,
        }),
        // R519
        AccessId => alts(rlist![n(NameKind::Use), b(GenericSpec)]),
        ObjectNameDeferredShapeSpecListItem => alts_shaped(
            rlist![b(ObjectName)],
            Shape::CallOf {
                head: b(ObjectName),
                args: l(DeferredShapeSpec),
                require_args: true,
            },
        ),
        // R520
        AllocatableStmt => shaped(Shape::WordCls {
            word: KwPat::W("ALLOCATABLE"),
            cls: Some(l(ObjectNameDeferredShapeSpecListItem)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R521
        AsynchronousStmt => shaped(Shape::WordCls {
            word: KwPat::W("ASYNCHRONOUS"),
            cls: Some(l(ObjectName)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R522
        BindStmt => shaped(Shape::CustomStr(m_bind_stmt)),
        // R523
        BindEntity => alts_shaped(
            rlist![n(NameKind::Entity)],
            Shape::Bracket {
                left: "/",
                right: "/",
                inner: n(NameKind::CommonBlock),
                require_inner: true,
            },
        ),
        // R524
        DataStmt => shaped(Shape::CustomStr(m_data_stmt)),
        // R525
        DataStmtSet => shaped(Shape::CustomStr(m_data_stmt_set)),
        // R526
        DataStmtObject => alts(rlist![b(Variable), b(DataImpliedDo)]),
        // R527
        DataImpliedDo => shaped(Shape::CustomStr(m_data_implied_do)),
        // R528
        DataIDoObject => alts(rlist![
            b(ArrayElement),
            sc(StructureComponent),
            b(DataImpliedDo),
        ]),
        // R529
        DataIDoVariable => alts(rlist![sc(IntVariable)]),
        // R530
        DataStmtValue => alts_shaped(
            rlist![b(DataStmtConstant)],
            Shape::BinaryStr {
                lhs: b(DataStmtRepeat),
                op: "*",
                rhs: b(DataStmtConstant),
                first: true,
            },
        ),
        // R531
        DataStmtRepeat => alts(rlist![sc(IntConstant), sc(IntConstantSubobject)]),
        // R532
        DataStmtConstant => alts(rlist![
            sc(Constant),
            sc(ConstantSubobject),
            b(SignedIntLiteralConstant),
            b(SignedRealLiteralConstant),
            b(NullInit),
            b(StructureConstructor),
        ]),
        // R533, R534
        IntConstantSubobject => alts(rlist![b(ConstantSubobject)]),
        ConstantSubobject => alts(rlist![b(Designator)]),
        // R535
        DimensionStmt => shaped(Shape::CustomStr(m_dimension_stmt)),
        // R536
        IntentStmt => shaped(Shape::CustomStr(m_intent_stmt)),
        // R537
        OptionalStmt => shaped(Shape::WordCls {
            word: KwPat::W("OPTIONAL"),
            cls: Some(l(DummyArgName)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R538
        ParameterStmt => shaped(Shape::Call {
            word: KwPat::W("PARAMETER"),
            args: l(NamedConstantDef),
            require_args: true,
        }),
        // R539
        NamedConstantDef => shaped(Shape::KeyedValue {
            key: b(NamedConstant),
            value: b(InitializationExpr),
        }),
        // R540
        PointerStmt => shaped(Shape::WordCls {
            word: KwPat::W("POINTER"),
            cls: Some(l(PointerDecl)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R541
        PointerDecl => alts_shaped(
            rlist![n(NameKind::ProcEntity), b(ObjectName)],
            Shape::CallOf {
                head: b(ObjectName),
                args: l(DeferredShapeSpec),
                require_args: true,
            },
        ),
        // R542
        ProtectedStmt => shaped(Shape::WordCls {
            word: KwPat::W("PROTECTED"),
            cls: Some(nl(NameKind::Entity)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R543
        SaveStmt => shaped(Shape::WordCls {
            word: KwPat::W("SAVE"),
            cls: Some(l(SavedEntity)),
            check_colons: true,
            require_cls: false,
            colons_in_render: true,
        }),
        // R544
        SavedEntity => alts_shaped(
            rlist![b(ObjectName), b(ProcPointerName)],
            Shape::Bracket {
                left: "/",
                right: "/",
                inner: n(NameKind::CommonBlock),
                require_inner: true,
            },
        ),
        // R545
        ProcPointerName => alts(rlist![b(Name)]),
        TargetEntityDecl => shaped(Shape::CustomStr(m_target_entity_decl)),
        // R546
        TargetStmt => shaped(Shape::CustomStr(m_target_stmt)),
        // R547
        ValueStmt => shaped(Shape::WordCls {
            word: KwPat::W("VALUE"),
            cls: Some(l(DummyArgName)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R548
        VolatileStmt => shaped(Shape::WordCls {
            word: KwPat::W("VOLATILE"),
            cls: Some(l(ObjectName)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R549
        ImplicitStmt => shaped(Shape::CustomStr(m_implicit_stmt)),
        // R550
        ImplicitSpec => shaped(Shape::CallOf {
            head: b(DeclarationTypeSpec),
            args: l(LetterSpec),
            require_args: true,
        }),
        // R551
        LetterSpec => shaped(Shape::CustomStr(m_letter_spec)),
        // R552
        NamelistStmt => shaped(Shape::CustomStr(m_namelist_stmt)),
        // R553
        NamelistGroupObject => alts(rlist![b(VariableName)]),
        // R554
        EquivalenceStmt => shaped(Shape::WordCls {
            word: KwPat::W("EQUIVALENCE"),
            cls: Some(l(EquivalenceSet)),
            check_colons: false,
            require_cls: true,
            colons_in_render: false,
        }),
        // R555
        EquivalenceSet => shaped(Shape::CustomStr(m_equivalence_set)),
        // R556
        EquivalenceObject => alts(rlist![b(VariableName), b(ArrayElement), b(Substring)]),
        // R557
        CommonStmt => shaped(Shape::CustomStr(m_common_stmt)),
        // R558
        CommonBlockObject => alts_shaped(
            rlist![b(ProcPointerName), b(VariableName)],
            Shape::CallOf {
                head: b(VariableName),
                args: l(ExplicitShapeSpec),
                require_args: true,
            },
        ),
        _ => return None,
    })
}

/// The shared split of `declaration-type-spec [[, attrs] ::] decls`, used
/// by R501 and by the data component definition of a derived type. With no
/// `::` the type spec ends at the first blank followed by a letter
/// (minding `DOUBLE PRECISION`).
pub(super) fn type_declaration_like(
    parser: &FortranParser,
    text: &str,
    attr_list: Rule,
    decl_list: Rule,
) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let split = match line.find("::") {
        Some(colons) => match line[..colons].find(',') {
            Some(comma) => comma,
            None => colons,
        },
        None => {
            let skip = if line[..6.min(line.len())].eq_ignore_ascii_case("DOUBLE") {
                let tail = line[6..].trim_start();
                line.len() - tail.len()
            } else {
                0
            };
            let found = DECL_BOUNDARY
                .find(&line[skip..])
                .ok_or(MatchErr::NoMatch)?;
            skip + found.start()
        }
    };
    let type_spec = parser.match_str(
        b(DeclarationTypeSpec),
        &repmap.restore(line[..split].trim_end()),
    )?;
    let mut rest = line[split..].trim_start();
    let attrs = if let Some(after_comma) = rest.strip_prefix(',') {
        let colons = after_comma.find("::").ok_or(MatchErr::NoMatch)?;
        let attrs = parser.match_str(attr_list, &repmap.restore(after_comma[..colons].trim()))?;
        rest = after_comma[colons..].trim_start();
        Item::tree(attrs)
    } else {
        Item::Absent
    };
    if let Some(stripped) = rest.strip_prefix("::") {
        rest = stripped.trim_start();
    }
    let decls = parser.match_str(decl_list, &repmap.restore(rest))?;
    Ok(vec![Item::tree(type_spec), attrs, Item::tree(decls)])
}

/// The shared entity declaration body: `name [(array-spec)] [*char-length]
/// [initialization]`; target declarations stop after the array spec.
pub(super) fn entity_decl_like(
    parser: &FortranParser,
    text: &str,
    array_spec: Rule,
    initialization: Option<Rule>,
    target: bool,
) -> MatchResult<Vec<Item>> {
    let name_match = pattern::NAME.find(text).ok_or(MatchErr::NoMatch)?;
    let name = parser.match_str(b(Name), name_match.as_str())?;
    let mut rest = text[name_match.end()..].trim_start().to_string();
    if rest.is_empty() {
        return Ok(vec![Item::tree(name), Item::Absent, Item::Absent, Item::Absent]);
    }
    let mut spec = Item::Absent;
    if rest.starts_with('(') {
        let (line, repmap) = string_replace_map(&rest);
        let close = line.find(')').ok_or(MatchErr::NoMatch)?;
        spec = Item::tree(parser.match_str(array_spec, &repmap.restore(line[1..close].trim()))?);
        rest = repmap.restore(line[close + 1..].trim_start());
    }
    if target {
        if !rest.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        return Ok(vec![Item::tree(name), spec, Item::Absent, Item::Absent]);
    }
    let mut char_length = Item::Absent;
    if rest.starts_with('*') {
        let (line, repmap) = string_replace_map(&rest);
        match line.find('=') {
            Some(eq) => {
                let length = repmap.restore(line[1..eq].trim());
                char_length = Item::tree(parser.match_str(b(CharLength), &length)?);
                rest = repmap.restore(line[eq..].trim_start());
            }
            None => {
                let length = repmap.restore(line[1..].trim());
                char_length = Item::tree(parser.match_str(b(CharLength), &length)?);
                rest = String::new();
            }
        }
    }
    let init = if rest.starts_with('=') {
        let init_rule = initialization.ok_or(MatchErr::NoMatch)?;
        Item::tree(parser.match_str(init_rule, &rest)?)
    } else if !rest.is_empty() {
        return Err(MatchErr::NoMatch);
    } else {
        Item::Absent
    };
    Ok(vec![Item::tree(name), spec, char_length, init])
}

fn m_type_declaration_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    type_declaration_like(parser, text, l(AttrSpec), l(EntityDecl))
}

/// R502: `TYPE (derived-type-spec)`, `CLASS (derived-type-spec)` or
/// `CLASS (*)`; a bare intrinsic type spec is the subclass alternative.
fn m_declaration_type_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    if text[..4.min(text.len())].eq_ignore_ascii_case("TYPE") {
        let line = text[4..].trim_start();
        if line.starts_with('(') {
            let spec = parser.match_str(b(DerivedTypeSpec), line[1..line.len() - 1].trim())?;
            return Ok(vec![Item::word("TYPE"), Item::tree(spec)]);
        }
    }
    if text[..5.min(text.len())].eq_ignore_ascii_case("CLASS") {
        let line = text[5..].trim_start();
        if line.starts_with('(') {
            let payload = line[1..line.len() - 1].trim();
            if payload == "*" {
                return Ok(vec![Item::word("CLASS"), Item::word("*")]);
            }
            let spec = parser.match_str(b(DerivedTypeSpec), payload)?;
            return Ok(vec![Item::word("CLASS"), Item::tree(spec)]);
        }
    }
    Err(MatchErr::NoMatch)
}

fn m_entity_decl(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    entity_decl_like(parser, text, b(ArraySpec), Some(b(Initialization)), false)
}

fn m_target_entity_decl(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    entity_decl_like(parser, text, b(ArraySpec), None, true)
}

/// R506: `= initialization-expr` or `=> null-init`.
fn m_initialization(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if let Some(rest) = text.strip_prefix("=>") {
        let init = parser.match_str(b(NullInit), rest.trim_start())?;
        return Ok(vec![Item::word("=>"), Item::tree(init)]);
    }
    if let Some(rest) = text.strip_prefix('=') {
        let expr = parser.match_str(b(InitializationExpr), rest.trim_start())?;
        return Ok(vec![Item::word("="), Item::tree(expr)]);
    }
    Err(MatchErr::NoMatch)
}

/// R509: `BIND ( C [, NAME = scalar-char-initialization-expr] )`.
fn m_language_binding_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("BIND") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[4..].trim_start();
    if line.len() < 2 || !line.starts_with('(') || !line.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let payload = line[1..line.len() - 1].trim();
    if payload.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    if !payload[..1].eq_ignore_ascii_case("C") {
        return Err(MatchErr::NoMatch);
    }
    let rest = payload[1..].trim_start();
    if rest.is_empty() {
        return Ok(vec![Item::Absent]);
    }
    let rest = rest.strip_prefix(',').ok_or(MatchErr::NoMatch)?.trim_start();
    if !rest[..4.min(rest.len())].eq_ignore_ascii_case("NAME") {
        return Err(MatchErr::NoMatch);
    }
    let rest = rest[4..].trim_start();
    let rest = rest.strip_prefix('=').ok_or(MatchErr::NoMatch)?.trim_start();
    let expr = parser.match_str(sc(CharInitializationExpr), rest)?;
    Ok(vec![Item::tree(expr)])
}

/// R511: `[lower-bound :] upper-bound`.
fn m_explicit_shape_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    shape_bounds(parser, text, b(LowerBound), b(UpperBound))
}

pub(super) fn shape_bounds(
    parser: &FortranParser,
    text: &str,
    lower_rule: Rule,
    upper_rule: Rule,
) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let colon = match line.find(':') {
        None => {
            let upper = parser.match_str(upper_rule, text)?;
            return Ok(vec![Item::Absent, Item::tree(upper)]);
        }
        Some(colon) => colon,
    };
    let lower = line[..colon].trim_end();
    let upper = line[colon + 1..].trim_start();
    if lower.is_empty() || upper.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let lower = parser.match_str(lower_rule, &repmap.restore(lower))?;
    let upper = parser.match_str(upper_rule, &repmap.restore(upper))?;
    Ok(vec![Item::tree(lower), Item::tree(upper)])
}

/// R516: `[explicit-shape-spec-list ,] [lower-bound :] *`.
fn m_assumed_size_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let line = text.strip_suffix('*').ok_or(MatchErr::NoMatch)?;
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(vec![Item::Absent, Item::Absent]);
    }
    if let Some(head) = line.strip_suffix(':') {
        let (mapped, repmap) = string_replace_map(head.trim_end());
        return match mapped.rfind(',') {
            None => {
                let lower = parser.match_str(b(LowerBound), &repmap.restore(&mapped))?;
                Ok(vec![Item::Absent, Item::tree(lower)])
            }
            Some(comma) => {
                let specs = parser.match_str(
                    l(ExplicitShapeSpec),
                    &repmap.restore(mapped[..comma].trim_end()),
                )?;
                let lower =
                    parser.match_str(b(LowerBound), &repmap.restore(mapped[comma + 1..].trim_start()))?;
                Ok(vec![Item::tree(specs), Item::tree(lower)])
            }
        };
    }
    let head = line.strip_suffix(',').ok_or(MatchErr::NoMatch)?;
    let specs = parser.match_str(l(ExplicitShapeSpec), head.trim_end())?;
    Ok(vec![Item::tree(specs), Item::Absent])
}

/// R522: `language-binding-spec [::] bind-entity-list`. When `::` is
/// absent the split falls back to the first `)`, which accepts more than
/// the standard allows; kept that way on purpose.
fn m_bind_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("BIND") {
        return Err(MatchErr::NoMatch);
    }
    let (lhs, rhs) = match text.find("::") {
        Some(colons) => (text[..colons].trim_end(), text[colons + 2..].trim_start()),
        None => {
            let close = text.find(')').ok_or(MatchErr::NoMatch)?;
            (text[..close + 1].trim_end(), text[close + 1..].trim_start())
        }
    };
    if lhs.is_empty() || rhs.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let binding = parser.match_str(b(LanguageBindingSpec), lhs)?;
    let entities = parser.match_str(l(BindEntity), rhs)?;
    Ok(vec![Item::tree(binding), Item::tree(entities)])
}

/// R524: `DATA data-stmt-set [[,] data-stmt-set]...`; one item per set.
fn m_data_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("DATA") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[4..].trim_start());
    let mut rest = line.as_str();
    let mut items = Vec::new();
    loop {
        let first = rest.find('/').ok_or(MatchErr::NoMatch)?;
        let second = rest[first + 1..].find('/').ok_or(MatchErr::NoMatch)? + first + 1;
        let set_text = repmap.restore(rest[..second + 1].trim());
        items.push(Item::tree(parser.match_str(b(DataStmtSet), &set_text)?));
        rest = rest[second + 1..].trim_start();
        if rest.is_empty() {
            return Ok(items);
        }
        if let Some(stripped) = rest.strip_prefix(',') {
            rest = stripped.trim_start();
        }
    }
}

/// R525: `data-stmt-object-list / data-stmt-value-list /`.
fn m_data_stmt_set(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text.ends_with('/') {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text);
    let slash = line.find('/').ok_or(MatchErr::NoMatch)?;
    if slash + 1 >= line.len() {
        return Err(MatchErr::NoMatch);
    }
    let objects = parser.match_str(l(DataStmtObject), &repmap.restore(line[..slash].trim_end()))?;
    let values = parser.match_str(
        l(DataStmtValue),
        &repmap.restore(line[slash + 1..line.len() - 1].trim()),
    )?;
    Ok(vec![Item::tree(objects), Item::tree(values)])
}

/// R527: `( data-i-do-object-list , var = expr , expr [, expr] )`.
fn m_data_implied_do(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !(text.starts_with('(') && text.ends_with(')')) {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[1..text.len() - 1].trim());
    let eq = line.find('=').ok_or(MatchErr::NoMatch)?;
    let lhs = line[..eq].trim_end();
    let rhs = line[eq + 1..].trim_start();
    let comma = lhs.rfind(',').ok_or(MatchErr::NoMatch)?;
    let bounds: Vec<&str> = rhs.split(',').collect();
    if !(2..=3).contains(&bounds.len()) {
        return Err(MatchErr::NoMatch);
    }
    let objects = parser.match_str(l(DataIDoObject), &repmap.restore(lhs[..comma].trim_end()))?;
    let variable =
        parser.match_str(b(DataIDoVariable), &repmap.restore(lhs[comma + 1..].trim_start()))?;
    let first = parser.match_str(sc(IntExpr), &repmap.restore(bounds[0].trim()))?;
    let second = parser.match_str(sc(IntExpr), &repmap.restore(bounds[1].trim()))?;
    let third = if bounds.len() == 3 {
        Item::tree(parser.match_str(sc(IntExpr), &repmap.restore(bounds[2].trim()))?)
    } else {
        Item::Absent
    };
    Ok(vec![
        Item::tree(objects),
        Item::tree(variable),
        Item::tree(first),
        Item::tree(second),
        third,
    ])
}

/// R535: `DIMENSION [::] array-name (array-spec), ...`; items alternate
/// name, spec, name, spec.
fn m_dimension_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..9.min(text.len())].eq_ignore_ascii_case("DIMENSION") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[9..].trim_start());
    let mut rest = line.as_str();
    if let Some(stripped) = rest.strip_prefix("::") {
        rest = stripped.trim_start();
    }
    let mut items = Vec::new();
    for decl in rest.split(',') {
        let decl = decl.trim();
        if !decl.ends_with(')') {
            return Err(MatchErr::NoMatch);
        }
        let open = decl.find('(').ok_or(MatchErr::NoMatch)?;
        let name = parser.match_str(n(NameKind::Array), &repmap.restore(decl[..open].trim_end()))?;
        let array_spec = parser.match_str(
            b(ArraySpec),
            &repmap.restore(decl[open + 1..decl.len() - 1].trim()),
        )?;
        items.push(Item::tree(name));
        items.push(Item::tree(array_spec));
    }
    if items.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    Ok(items)
}

/// R536: `INTENT ( intent-spec ) [::] dummy-arg-name-list`.
fn m_intent_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..6.min(text.len())].eq_ignore_ascii_case("INTENT") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[6..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.rfind(')').ok_or(MatchErr::NoMatch)?;
    let spec = parser.match_str(b(IntentSpec), line[1..close].trim())?;
    let mut rest = line[close + 1..].trim_start();
    if let Some(stripped) = rest.strip_prefix("::") {
        rest = stripped.trim_start();
    }
    if rest.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let names = parser.match_str(l(DummyArgName), rest)?;
    Ok(vec![Item::tree(spec), Item::tree(names)])
}

/// R546: `TARGET [::] target-entity-decl-list`.
fn m_target_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..6.min(text.len())].eq_ignore_ascii_case("TARGET") {
        return Err(MatchErr::NoMatch);
    }
    let mut rest = text[6..].trim_start();
    if let Some(stripped) = rest.strip_prefix("::") {
        rest = stripped.trim_start();
    }
    let decls = parser.match_str(l(TargetEntityDecl), rest)?;
    Ok(vec![Item::tree(decls)])
}

/// R549: `IMPLICIT NONE` or `IMPLICIT implicit-spec-list`.
fn m_implicit_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..8.min(text.len())].eq_ignore_ascii_case("IMPLICIT") {
        return Err(MatchErr::NoMatch);
    }
    let rest = text[8..].trim_start();
    if rest.eq_ignore_ascii_case("NONE") {
        return Ok(vec![Item::word("NONE")]);
    }
    let specs = parser.match_str(l(ImplicitSpec), rest)?;
    Ok(vec![Item::tree(specs)])
}

/// R551: `letter [- letter]`.
fn m_letter_spec(_parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let is_letter = |s: &str| s.len() == 1 && s.chars().next().unwrap().is_ascii_alphabetic();
    if is_letter(text) {
        return Ok(vec![Item::word(text.to_uppercase()), Item::Absent]);
    }
    let dash = text.find('-').ok_or(MatchErr::NoMatch)?;
    let lhs = text[..dash].trim();
    let rhs = text[dash + 1..].trim();
    if !is_letter(lhs) || !is_letter(rhs) {
        return Err(MatchErr::NoMatch);
    }
    let lhs = lhs.to_uppercase();
    let rhs = rhs.to_uppercase();
    if lhs > rhs {
        return Err(MatchErr::NoMatch);
    }
    Ok(vec![Item::word(lhs), Item::word(rhs)])
}

/// R552: `NAMELIST /group/ objects [[,] /group/ objects]...`; items
/// alternate group name, object list.
fn m_namelist_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..8.min(text.len())].eq_ignore_ascii_case("NAMELIST") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[8..].trim_start();
    if !line.starts_with('/') {
        return Err(MatchErr::NoMatch);
    }
    let mut parts: Vec<&str> = line.split('/').collect();
    parts.remove(0);
    if parts.len() < 2 {
        return Err(MatchErr::NoMatch);
    }
    let mut items = Vec::new();
    while parts.len() >= 2 {
        let name = parts.remove(0).trim();
        let mut objects = parts.remove(0).trim();
        if let Some(stripped) = objects.strip_suffix(',') {
            objects = stripped.trim_end();
        }
        let name = parser.match_str(n(NameKind::NamelistGroup), name)?;
        let objects = parser.match_str(l(NamelistGroupObject), objects)?;
        items.push(Item::tree(name));
        items.push(Item::tree(objects));
    }
    if !parts.is_empty() && !parts[0].trim().is_empty() {
        return Err(MatchErr::NoMatch);
    }
    Ok(items)
}

/// R555: `( equivalence-object , equivalence-object-list )`; the first
/// object is split off the matched list.
fn m_equivalence_set(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !(text.starts_with('(') && text.ends_with(')')) {
        return Err(MatchErr::NoMatch);
    }
    let payload = text[1..text.len() - 1].trim();
    let list = parser.match_str(l(EquivalenceObject), payload)?;
    let mut elements = list.items;
    if elements.len() < 2 {
        return Err(MatchErr::NoMatch);
    }
    let first = elements.remove(0);
    let rest = crate::CstNode::new(l(EquivalenceObject), elements);
    Ok(vec![first, Item::tree(rest)])
}

/// R557: `COMMON [/[name]/] objects [[,] /[name]/ objects]...`; items
/// alternate optional block name and object list.
fn m_common_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..6.min(text.len())].eq_ignore_ascii_case("COMMON") {
        return Err(MatchErr::NoMatch);
    }
    let after = &text[6..];
    match after.chars().next() {
        None => return Err(MatchErr::NoMatch),
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => return Err(MatchErr::NoMatch),
        _ => {}
    }
    let (line, repmap) = string_replace_map(after.trim_start());
    let mut rest = line.as_str();
    let mut items = Vec::new();
    let mut first = true;
    while !rest.is_empty() {
        if !first {
            if let Some(stripped) = rest.strip_prefix(',') {
                rest = stripped.trim_start();
            }
        }
        let name = if let Some(after_slash) = rest.strip_prefix('/') {
            let close = after_slash.find('/').ok_or(MatchErr::NoMatch)?;
            let name_text = after_slash[..close].trim();
            rest = after_slash[close + 1..].trim_start();
            if name_text.is_empty() {
                Item::Absent
            } else {
                Item::tree(parser.match_str(n(NameKind::CommonBlock), name_text)?)
            }
        } else if first {
            Item::Absent
        } else {
            return Err(MatchErr::NoMatch);
        };
        let objects_text = match rest.find('/') {
            Some(slash) => {
                let mut head = rest[..slash].trim_end();
                if let Some(stripped) = head.strip_suffix(',') {
                    head = stripped.trim_end();
                }
                rest = &rest[slash..];
                head
            }
            None => {
                let head = rest;
                rest = "";
                head
            }
        };
        if objects_text.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        let objects = parser.match_str(l(CommonBlockObject), &repmap.restore(objects_text))?;
        items.push(name);
        items.push(Item::tree(objects));
        first = false;
    }
    if items.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    Ok(items)
}
