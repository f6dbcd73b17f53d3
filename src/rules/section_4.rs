//! Section 4 of the standard: types, type parameters, derived types,
//! enumerations and array constructors (R401-R472).

use super::BaseRule::{self, *};
use super::{alts, rlist, alts_shaped, b, l, n, nl, sc, shaped, BlockSpec, Hook, KwPat, NameKind, RuleSpec, Shape};
use crate::pattern;
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R401
        TypeSpec => alts(rlist![b(IntrinsicTypeSpec), b(DerivedTypeSpec)]),
        // R402
        TypeParamValue => alts_shaped(rlist![sc(IntExpr)], Shape::Literal(&["*", ":"])),
        // R403
        IntrinsicTypeSpec => shaped(Shape::CustomStr(m_intrinsic_type_spec)),
        // R404
        KindSelector => shaped(Shape::CustomStr(m_kind_selector)),
        // R405
        SignedIntLiteralConstant => alts_shaped(
            rlist![b(IntLiteralConstant)],
            Shape::Number(&pattern::ABS_SIGNED_INT_LITERAL_CONSTANT),
        ),
        // R406
        IntLiteralConstant => shaped(Shape::Number(&pattern::ABS_INT_LITERAL_CONSTANT)),
        DigitString => shaped(Shape::Number(&pattern::ABS_DIGIT_STRING)),
        // R411
        BozLiteralConstant => alts(rlist![b(BinaryConstant), b(OctalConstant), b(HexConstant)]),
        // R412-R414
        BinaryConstant => shaped(Shape::Keyword(KwPat::Re(&pattern::ABS_BINARY_CONSTANT))),
        OctalConstant => shaped(Shape::Keyword(KwPat::Re(&pattern::ABS_OCTAL_CONSTANT))),
        HexConstant => shaped(Shape::Keyword(KwPat::Re(&pattern::ABS_HEX_CONSTANT))),
        // R416
        SignedRealLiteralConstant => alts_shaped(
            rlist![b(RealLiteralConstant)],
            Shape::Number(&pattern::ABS_SIGNED_REAL_LITERAL_CONSTANT),
        ),
        // R417
        RealLiteralConstant => shaped(Shape::Number(&pattern::ABS_REAL_LITERAL_CONSTANT)),
        // R421
        ComplexLiteralConstant => shaped(Shape::CustomStr(m_complex_literal_constant)),
        // R422, R423
        RealPart => alts(rlist![
            b(SignedIntLiteralConstant),
            b(SignedRealLiteralConstant),
            b(NamedConstant),
        ]),
        ImagPart => alts(rlist![
            b(SignedIntLiteralConstant),
            b(SignedRealLiteralConstant),
            b(NamedConstant),
        ]),
        // R424
        CharSelector => alts_shaped(rlist![b(LengthSelector)], Shape::CustomStr(m_char_selector)),
        // R425
        LengthSelector => shaped(Shape::CustomStr(m_length_selector)),
        // R426
        CharLength => alts_shaped(
            rlist![sc(IntLiteralConstant)],
            Shape::Bracket {
                left: "(",
                right: ")",
                inner: b(TypeParamValue),
                require_inner: true,
            },
        ),
        // R427
        CharLiteralConstant => shaped(Shape::CustomStr(m_char_literal_constant)),
        // R428
        LogicalLiteralConstant => shaped(Shape::CustomStr(m_logical_literal_constant)),
        // R429
        DerivedTypeDef => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(DerivedTypeStmt)),
            mids: rlist![
                b(TypeParamDefStmt),
                b(PrivateOrSequence),
                b(ComponentPart),
                b(TypeBoundProcedurePart),
            ],
            end: Some(b(EndTypeStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R430
        DerivedTypeStmt => shaped(Shape::CustomStr(m_derived_type_stmt)),
        // C424
        TypeName => shaped(Shape::CustomStr(m_type_name)),
        // R431
        TypeAttrSpec => alts_shaped(rlist![b(AccessSpec)], Shape::CustomStr(m_type_attr_spec)),
        // R432
        PrivateOrSequence => alts(rlist![b(PrivateComponentsStmt), b(SequenceStmt)]),
        // R433
        EndTypeStmt => shaped(Shape::EndStmt {
            kind: "TYPE",
            name: Some(b(TypeName)),
            require_kind: true,
        }),
        // R434
        SequenceStmt => shaped(Shape::Keyword(KwPat::W("SEQUENCE"))),
        // R435
        TypeParamDefStmt => shaped(Shape::CustomStr(m_type_param_def_stmt)),
        // R436
        TypeParamDecl => alts_shaped(
            rlist![n(NameKind::TypeParam)],
            Shape::BinaryStr {
                lhs: n(NameKind::TypeParam),
                op: "=",
                rhs: sc(IntInitializationExpr),
                first: true,
            },
        ),
        // R437
        TypeParamAttrSpec => shaped(Shape::Keyword(KwPat::Set(&["KIND", "LEN"]))),
        // R438
        ComponentPart => shaped(Shape::Blocked(BlockSpec {
            start: None,
            mids: rlist![b(ComponentDefStmt)],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R439
        ComponentDefStmt => alts(rlist![b(DataComponentDefStmt), b(ProcComponentDefStmt)]),
        // R440
        DataComponentDefStmt => shaped(Shape::CustomStr(m_data_component_def_stmt)),
        DimensionComponentAttrSpec => shaped(Shape::Call {
            word: KwPat::W("DIMENSION"),
            args: b(ComponentArraySpec),
            require_args: true,
        }),
        // R441
        ComponentAttrSpec => alts_shaped(
            rlist![b(AccessSpec), b(DimensionComponentAttrSpec)],
            Shape::Keyword(KwPat::Set(&["POINTER", "ALLOCATABLE"])),
        ),
        // R442
        ComponentDecl => shaped(Shape::CustomStr(m_component_decl)),
        // R443
        ComponentArraySpec => alts(rlist![l(ExplicitShapeSpec), l(DeferredShapeSpec)]),
        // R444
        ComponentInitialization => shaped(Shape::CustomStr(m_component_initialization)),
        // R445
        ProcComponentDefStmt => shaped(Shape::CustomStr(m_proc_component_def_stmt)),
        ProcComponentPASSArgName => shaped(Shape::Call {
            word: KwPat::W("PASS"),
            args: n(NameKind::Arg),
            require_args: true,
        }),
        // R446
        ProcComponentAttrSpec => alts_shaped(
            rlist![b(AccessSpec), b(ProcComponentPASSArgName)],
            Shape::Keyword(KwPat::Set(&["POINTER", "PASS", "NOPASS"])),
        ),
        // R447
        PrivateComponentsStmt => shaped(Shape::Keyword(KwPat::W("PRIVATE"))),
        // R448
        TypeBoundProcedurePart => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(ContainsStmt)),
            mids: rlist![b(BindingPrivateStmt), b(ProcBindingStmt)],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R449
        BindingPrivateStmt => shaped(Shape::Keyword(KwPat::W("PRIVATE"))),
        // R450
        ProcBindingStmt => alts(rlist![b(SpecificBinding), b(GenericBinding), b(FinalBinding)]),
        // R451
        SpecificBinding => shaped(Shape::CustomStr(m_specific_binding)),
        BindingPASSArgName => shaped(Shape::Call {
            word: KwPat::W("PASS"),
            args: n(NameKind::Arg),
            require_args: true,
        }),
        // R452
        GenericBinding => shaped(Shape::CustomStr(m_generic_binding)),
        // R453
        BindingAttr => alts_shaped(
            rlist![b(AccessSpec), b(BindingPASSArgName)],
            Shape::Keyword(KwPat::Set(&["PASS", "NOPASS", "NON_OVERRIDABLE", "DEFERRED"])),
        ),
        // R454
        FinalBinding => shaped(Shape::WordCls {
            word: KwPat::W("FINAL"),
            cls: Some(nl(NameKind::FinalSubroutine)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R455
        DerivedTypeSpec => alts_shaped(
            rlist![b(TypeName)],
            Shape::CallOf {
                head: b(TypeName),
                args: l(TypeParamSpec),
                require_args: true,
            },
        ),
        // R456
        TypeParamSpec => alts_shaped(
            rlist![b(TypeParamValue)],
            Shape::KeyedValue {
                key: b(Keyword),
                value: b(TypeParamValue),
            },
        ),
        // R457.b
        StructureConstructor2 => shaped(Shape::KeyedValue {
            key: b(Keyword),
            value: b(ComponentDataSource),
        }),
        // R457
        StructureConstructor => alts_shaped(
            rlist![b(StructureConstructor2)],
            Shape::CallOf {
                head: b(DerivedTypeSpec),
                args: l(ComponentSpec),
                require_args: false,
            },
        ),
        // R458
        ComponentSpec => alts_shaped(
            rlist![b(ComponentDataSource)],
            Shape::KeyedValue {
                key: b(Keyword),
                value: b(ComponentDataSource),
            },
        ),
        // R459
        ComponentDataSource => alts(rlist![b(Expr), b(DataTarget), b(ProcTarget)]),
        // R460
        EnumDef => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(EnumDefStmt)),
            mids: rlist![b(EnumeratorDefStmt)],
            end: Some(b(EndEnumStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R461
        EnumDefStmt => shaped(Shape::CustomStr(m_enum_def_stmt)),
        // R462
        EnumeratorDefStmt => shaped(Shape::WordCls {
            word: KwPat::W("ENUMERATOR"),
            cls: Some(l(Enumerator)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R463
        Enumerator => alts_shaped(
            rlist![b(NamedConstant)],
            Shape::BinaryStr {
                lhs: b(NamedConstant),
                op: "=",
                rhs: sc(IntInitializationExpr),
                first: true,
            },
        ),
        // R464
        EndEnumStmt => shaped(Shape::EndStmt {
            kind: "ENUM",
            name: None,
            require_kind: true,
        }),
        // R465
        ArrayConstructor => shaped(Shape::CustomStr(m_array_constructor)),
        // R466
        AcSpec => alts_shaped(rlist![l(AcValue)], Shape::CustomStr(m_ac_spec)),
        // R469
        AcValue => alts(rlist![b(AcImpliedDo), b(Expr)]),
        // R470
        AcImpliedDo => shaped(Shape::CustomStr(m_ac_implied_do)),
        // R471
        AcImpliedDoControl => shaped(Shape::CustomStr(m_ac_implied_do_control)),
        // R472
        AcDoVariable => alts(rlist![sc(IntVariable)]),
        _ => return None,
    })
}

fn parenthesized(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        Some(text[1..text.len() - 1].trim())
    } else {
        None
    }
}

/// R403: INTEGER/REAL/COMPLEX/LOGICAL with an optional kind selector,
/// CHARACTER with an optional char selector, DOUBLE PRECISION, and the
/// DOUBLE COMPLEX / BYTE extensions when enabled.
fn m_intrinsic_type_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let with_kind: &[(&str, BaseRule)] = &[
        ("INTEGER", KindSelector),
        ("REAL", KindSelector),
        ("COMPLEX", KindSelector),
        ("LOGICAL", KindSelector),
        ("CHARACTER", CharSelector),
    ];
    for (word, selector) in with_kind {
        if let Some(end) = pattern::match_keyword_prefix(text, word) {
            let rest = text[end..].trim_start();
            if rest.is_empty() {
                return Ok(vec![Item::word(*word), Item::Absent]);
            }
            match parser.match_str(b(*selector), rest) {
                Ok(node) => return Ok(vec![Item::word(*word), Item::tree(node)]),
                Err(MatchErr::NoMatch) => continue,
                Err(fatal) => return Err(fatal),
            }
        }
    }
    if parser.extensions().double_complex {
        if let Some(end) = pattern::match_keyword_prefix(text, "DOUBLE COMPLEX") {
            if text[end..].trim().is_empty() {
                return Ok(vec![Item::word("DOUBLE COMPLEX"), Item::Absent]);
            }
        }
    }
    if let Some(end) = pattern::match_keyword_prefix(text, "DOUBLE PRECISION") {
        if text[end..].trim().is_empty() {
            return Ok(vec![Item::word("DOUBLE PRECISION"), Item::Absent]);
        }
    }
    if parser.extensions().byte_type {
        if let Some(end) = pattern::match_keyword_prefix(text, "BYTE") {
            if text[end..].trim().is_empty() {
                return Ok(vec![Item::word("BYTE"), Item::Absent]);
            }
        }
    }
    Err(MatchErr::NoMatch)
}

/// R404: `( [KIND =] scalar-int-initialization-expr )`, plus the common
/// `*n` extension.
fn m_kind_selector(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    // `*n` is the shortest valid selector
    if text.len() <= 1 {
        return Err(MatchErr::NoMatch);
    }
    let payload = match parenthesized(text) {
        Some(payload) => payload,
        None => {
            let rest = match text.strip_prefix('*') {
                Some(rest) => rest.trim_start(),
                None => return Err(MatchErr::NoMatch),
            };
            let length = parser.match_str(b(CharLength), rest)?;
            return Ok(vec![Item::word("*"), Item::tree(length)]);
        }
    };
    let mut payload = payload;
    if payload.len() > 5 && payload[..4].eq_ignore_ascii_case("KIND") {
        let after = payload[4..].trim_start();
        if let Some(stripped) = after.strip_prefix('=') {
            payload = stripped.trim_start();
        }
    }
    let expr = parser.match_str(sc(IntInitializationExpr), payload)?;
    Ok(vec![Item::word("("), Item::tree(expr), Item::word(")")])
}

/// R421: `( real-part, imag-part )`.
fn m_complex_literal_constant(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let payload = parenthesized(text).ok_or(MatchErr::NoMatch)?;
    let (line, repmap) = string_replace_map(payload);
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 2 {
        return Err(MatchErr::NoMatch);
    }
    let real = parser.match_str(b(RealPart), &repmap.restore(parts[0].trim()))?;
    let imag = parser.match_str(b(ImagPart), &repmap.restore(parts[1].trim()))?;
    Ok(vec![Item::tree(real), Item::tree(imag)])
}

/// R424: the three parenthesized LEN/KIND spellings; a bare length
/// selector is handled by the Length_Selector alternative.
fn m_char_selector(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let payload = parenthesized(text).ok_or(MatchErr::NoMatch)?;
    let (line, repmap) = string_replace_map(payload);
    let line = line.trim();

    let strip_key = |line: &str, key: &str| -> Option<String> {
        if line.len() < key.len() || !line[..key.len()].eq_ignore_ascii_case(key) {
            return None;
        }
        let rest = line[key.len()..].trim_start();
        rest.strip_prefix('=').map(|r| r.trim_start().to_string())
    };

    if let Some(rest) = strip_key(line, "LEN") {
        // ( LEN = type-param-value , KIND = expr )
        let comma = rest.find(',').ok_or(MatchErr::NoMatch)?;
        let value = rest[..comma].trim_end();
        let kind_part = rest[comma + 1..].trim_start();
        let kind = strip_key(kind_part, "KIND").ok_or(MatchErr::NoMatch)?;
        let value = parser.match_str(b(TypeParamValue), &repmap.restore(value))?;
        let kind = parser.match_str(sc(IntInitializationExpr), &repmap.restore(&kind))?;
        return Ok(vec![Item::tree(value), Item::tree(kind)]);
    }
    if let Some(rest) = strip_key(line, "KIND") {
        // ( KIND = expr [, LEN = type-param-value] )
        match rest.find(',') {
            None => {
                let kind = parser.match_str(sc(IntInitializationExpr), &repmap.restore(&rest))?;
                return Ok(vec![Item::Absent, Item::tree(kind)]);
            }
            Some(comma) => {
                let kind_text = rest[..comma].trim_end();
                let len_part = rest[comma + 1..].trim_start();
                let value = strip_key(len_part, "LEN").ok_or(MatchErr::NoMatch)?;
                let value = parser.match_str(b(TypeParamValue), &repmap.restore(&value))?;
                let kind = parser.match_str(sc(IntInitializationExpr), &repmap.restore(kind_text))?;
                return Ok(vec![Item::tree(value), Item::tree(kind)]);
            }
        }
    }
    // ( type-param-value , [KIND =] expr )
    let comma = line.find(',').ok_or(MatchErr::NoMatch)?;
    let value = line[..comma].trim_end();
    let mut kind_text = line[comma + 1..].trim_start().to_string();
    if let Some(rest) = strip_key(&kind_text, "KIND") {
        kind_text = rest;
    }
    let value = parser.match_str(b(TypeParamValue), &repmap.restore(value))?;
    let kind = parser.match_str(sc(IntInitializationExpr), &repmap.restore(&kind_text))?;
    Ok(vec![Item::tree(value), Item::tree(kind)])
}

/// R425: `( [LEN =] type-param-value )` or `* char-length [,]`.
fn m_length_selector(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if let Some(payload) = parenthesized(text) {
        let mut payload = payload;
        if payload.len() > 3 && payload[..3].eq_ignore_ascii_case("LEN") {
            let rest = payload[3..].trim_start();
            if let Some(stripped) = rest.strip_prefix('=') {
                payload = stripped.trim_start();
            }
        }
        let value = parser.match_str(b(TypeParamValue), payload)?;
        return Ok(vec![Item::word("("), Item::tree(value), Item::word(")")]);
    }
    let rest = text.strip_prefix('*').ok_or(MatchErr::NoMatch)?;
    let mut rest = rest.trim_start();
    if let Some(stripped) = rest.strip_suffix(',') {
        rest = stripped.trim_end();
    }
    let length = parser.match_str(b(CharLength), rest)?;
    Ok(vec![Item::word("*"), Item::tree(length)])
}

/// R427: `[kind-param _] 'rep-chars'`; the literal value keeps its quotes
/// and original case.
fn m_char_literal_constant(_parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let last = text.chars().last().ok_or(MatchErr::NoMatch)?;
    let re = match last {
        '"' => &pattern::CHAR_LITERAL_DOUBLE,
        '\'' => &pattern::CHAR_LITERAL_SINGLE,
        _ => return Err(MatchErr::NoMatch),
    };
    let (line, repmap) = string_replace_map(text);
    let caps = re.captures(&line).ok_or(MatchErr::NoMatch)?;
    let value = repmap.restore(caps.name("value").ok_or(MatchErr::NoMatch)?.as_str());
    let kind = caps
        .name("kind_param")
        .map(|m| Item::word(m.as_str()))
        .unwrap_or(Item::Absent);
    Ok(vec![Item::word(value), kind])
}

/// R428: `.TRUE.`/`.FALSE.` with optional kind; the keyword spelling is
/// normalized to uppercase.
fn m_logical_literal_constant(_parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let caps = pattern::ABS_LOGICAL_LITERAL_CONSTANT
        .captures(text)
        .ok_or(MatchErr::NoMatch)?;
    let value = caps
        .name("value")
        .ok_or(MatchErr::NoMatch)?
        .as_str()
        .to_uppercase();
    let kind = caps
        .name("kind_param")
        .map(|m| Item::word(m.as_str()))
        .unwrap_or(Item::Absent);
    Ok(vec![Item::word(value), kind])
}

/// R430: `TYPE [[, type-attr-spec-list] ::] type-name [(type-param-names)]`.
fn m_derived_type_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("TYPE") {
        return Err(MatchErr::NoMatch);
    }
    let mut line = text[4..].trim_start();
    let mut attrs = Item::Absent;
    if let Some(colons) = line.find("::") {
        if let Some(after_comma) = line.strip_prefix(',') {
            let attr_text = after_comma[..colons - 1].trim();
            if attr_text.is_empty() {
                return Err(MatchErr::NoMatch);
            }
            attrs = Item::tree(parser.match_str(l(TypeAttrSpec), attr_text)?);
        } else if !line[..colons].trim().is_empty() {
            return Err(MatchErr::NoMatch);
        }
        line = line[colons + 2..].trim_start();
    }
    let name_match = pattern::NAME.find(line).ok_or(MatchErr::NoMatch)?;
    let name = parser.match_str(b(TypeName), name_match.as_str())?;
    let line = line[name_match.end()..].trim_start();
    if line.is_empty() {
        return Ok(vec![attrs, Item::tree(name), Item::Absent]);
    }
    let payload = parenthesized(line).ok_or(MatchErr::NoMatch)?;
    let params = parser.match_str(nl(NameKind::TypeParam), payload)?;
    Ok(vec![attrs, Item::tree(name), Item::tree(params)])
}

/// C424: a type-name shall not be the name of an intrinsic type.
fn m_type_name(_parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if pattern::ABS_INTRINSIC_TYPE_NAME.is_match(text) {
        return Err(MatchErr::NoMatch);
    }
    if !pattern::ABS_NAME.is_match(text) {
        return Err(MatchErr::NoMatch);
    }
    Ok(vec![Item::word(text)])
}

/// R431: `ABSTRACT`, `BIND(C)` or `EXTENDS(parent-type-name)`.
fn m_type_attr_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.eq_ignore_ascii_case("ABSTRACT") {
        return Ok(vec![Item::word("ABSTRACT"), Item::Absent]);
    }
    if text[..4.min(text.len())].eq_ignore_ascii_case("BIND") {
        let payload = parenthesized(text[4..].trim_start()).ok_or(MatchErr::NoMatch)?;
        if payload.eq_ignore_ascii_case("C") {
            return Ok(vec![Item::word("BIND"), Item::word("C")]);
        }
        return Err(MatchErr::NoMatch);
    }
    if text[..7.min(text.len())].eq_ignore_ascii_case("EXTENDS") {
        let payload = parenthesized(text[7..].trim_start()).ok_or(MatchErr::NoMatch)?;
        let name = parser.match_str(n(NameKind::ParentType), payload)?;
        return Ok(vec![Item::word("EXTENDS"), Item::tree(name)]);
    }
    Err(MatchErr::NoMatch)
}

/// R435: `INTEGER [kind-selector], type-param-attr-spec :: decls`.
fn m_type_param_def_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..7.min(text.len())].eq_ignore_ascii_case("INTEGER") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[7..].trim_start());
    let comma = line.find(',').ok_or(MatchErr::NoMatch)?;
    let kind_text = repmap.restore(line[..comma].trim_end());
    let kind = if kind_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(b(KindSelector), &kind_text)?)
    };
    let rest = repmap.restore(line[comma + 1..].trim_start());
    let colons = rest.find("::").ok_or(MatchErr::NoMatch)?;
    let attr = rest[..colons].trim_end();
    let decls = rest[colons + 2..].trim_start();
    if attr.is_empty() || decls.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let attr = parser.match_str(b(TypeParamAttrSpec), attr)?;
    let decls = parser.match_str(l(TypeParamDecl), decls)?;
    Ok(vec![kind, Item::tree(attr), Item::tree(decls)])
}

/// R440: a data component definition follows the same split as a type
/// declaration statement, with the component variants of the lists.
fn m_data_component_def_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    super::section_5::type_declaration_like(parser, text, l(ComponentAttrSpec), l(ComponentDecl))
}

/// R442: `component-name [(array-spec)] [*char-length] [init]`.
fn m_component_decl(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    super::section_5::entity_decl_like(
        parser,
        text,
        b(ComponentArraySpec),
        Some(b(ComponentInitialization)),
        false,
    )
}

/// R444: `= initialization-expr` or `=> null-init`.
fn m_component_initialization(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
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

/// R445: `PROCEDURE ([proc-interface]), attr-list :: proc-decl-list`.
fn m_proc_component_def_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..9.min(text.len())].eq_ignore_ascii_case("PROCEDURE") {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[9..].trim_start());
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let iface_text = repmap.restore(&line[..close + 1]);
    let iface_text = iface_text[1..iface_text.len() - 1].trim();
    let iface = if iface_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(b(ProcInterface), iface_text)?)
    };
    let rest = line[close + 1..].trim_start();
    let rest = rest.strip_prefix(',').ok_or(MatchErr::NoMatch)?.trim_start();
    let colons = rest.find("::").ok_or(MatchErr::NoMatch)?;
    let attrs = parser.match_str(
        l(ProcComponentAttrSpec),
        &repmap.restore(rest[..colons].trim_end()),
    )?;
    let decls = parser.match_str(l(ProcDecl), &repmap.restore(rest[colons + 2..].trim_start()))?;
    Ok(vec![iface, Item::tree(attrs), Item::tree(decls)])
}

/// R451: the spacing rules here are deliberate (C456, C457): without an
/// interface or a double colon there must be a space after `PROCEDURE`,
/// `=>` requires the double colon, and an interface forbids `=>`.
fn m_specific_binding(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..9.min(text.len())].eq_ignore_ascii_case("PROCEDURE") {
        return Err(MatchErr::NoMatch);
    }
    if text.len() < 11 {
        return Err(MatchErr::NoMatch);
    }
    let space_after = text.as_bytes()[9] == b' ';
    let mut line = text[9..].trim_start();

    let mut iname = Item::Absent;
    if line.starts_with('(') {
        let close = line.find(')').ok_or(MatchErr::NoMatch)?;
        iname = Item::tree(parser.match_str(b(InterfaceName), line[1..close].trim())?);
        line = line[close + 1..].trim_start();
    }

    let mut dcolon = Item::Absent;
    let mut attrs = Item::Absent;
    if let Some(colons) = line.find("::") {
        dcolon = Item::word("::");
        if let Some(after_comma) = line.strip_prefix(',') {
            attrs = Item::tree(
                parser.match_str(l(BindingAttr), after_comma[..colons - 1].trim())?,
            );
        } else if !line[..colons].trim().is_empty() {
            return Err(MatchErr::NoMatch);
        }
        line = line[colons + 2..].trim_start();
    }
    if iname.is_absent() && dcolon.is_absent() && !space_after {
        return Err(MatchErr::NoMatch);
    }

    let mut pname = Item::Absent;
    if let Some(arrow) = line.find("=>") {
        pname = Item::tree(parser.match_str(n(NameKind::Procedure), line[arrow + 2..].trim_start())?);
        line = line[..arrow].trim_end();
        if dcolon.is_absent() {
            return Err(MatchErr::NoMatch);
        }
    }
    if !iname.is_absent() && !pname.is_absent() {
        return Err(MatchErr::NoMatch);
    }
    let binding = parser.match_str(n(NameKind::Binding), line)?;
    Ok(vec![iname, attrs, dcolon, Item::tree(binding), pname])
}

/// R452: `GENERIC [, access-spec] :: generic-spec => binding-name-list`.
fn m_generic_binding(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..7.min(text.len())].eq_ignore_ascii_case("GENERIC") {
        return Err(MatchErr::NoMatch);
    }
    let mut line = text[7..].trim_start();
    let mut access = Item::Absent;
    let colons = line.find("::").ok_or(MatchErr::NoMatch)?;
    if let Some(after_comma) = line.strip_prefix(',') {
        access = Item::tree(parser.match_str(b(AccessSpec), after_comma[..colons - 1].trim())?);
    } else if !line[..colons].trim().is_empty() {
        return Err(MatchErr::NoMatch);
    }
    line = line[colons + 2..].trim_start();
    let arrow = line.find("=>").ok_or(MatchErr::NoMatch)?;
    let generic = parser.match_str(b(GenericSpec), line[..arrow].trim_end())?;
    let bindings = parser.match_str(nl(NameKind::Binding), line[arrow + 2..].trim_start())?;
    Ok(vec![access, Item::tree(generic), Item::tree(bindings)])
}

/// R461: `ENUM, BIND(C)` with arbitrary interior spacing.
fn m_enum_def_stmt(_parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let squeezed: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if squeezed != "ENUM,BIND(C)" {
        return Err(MatchErr::NoMatch);
    }
    Ok(vec![Item::word("ENUM, BIND(C)")])
}

/// R465: `(/ ac-spec /)` or `[ ac-spec ]`.
fn m_array_constructor(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    for (left, right) in [("(/", "/)"), ("[", "]")] {
        if text.len() > left.len() + right.len()
            && text.starts_with(left)
            && text.ends_with(right)
        {
            let payload = text[left.len()..text.len() - right.len()].trim();
            if payload.is_empty() {
                continue;
            }
            let spec = parser.match_str(b(AcSpec), payload)?;
            return Ok(vec![Item::word(left), Item::tree(spec), Item::word(right)]);
        }
    }
    Err(MatchErr::NoMatch)
}

/// R466: `type-spec ::` or `type-spec :: ac-value-list`; the bare value
/// list is the subclass alternative.
fn m_ac_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if let Some(head) = text.strip_suffix("::") {
        let head = head.trim_end();
        if !head.is_empty() {
            if let Ok(spec) = parser.match_str(b(TypeSpec), head) {
                return Ok(vec![Item::tree(spec), Item::Absent]);
            }
        }
    }
    let (line, repmap) = string_replace_map(text);
    let colons = line.find("::").ok_or(MatchErr::NoMatch)?;
    let spec = parser.match_str(b(TypeSpec), &repmap.restore(line[..colons].trim_end()))?;
    let values = parser.match_str(l(AcValue), &repmap.restore(line[colons + 2..].trim_start()))?;
    Ok(vec![Item::tree(spec), Item::tree(values)])
}

/// R470: `( ac-value-list , ac-implied-do-control )`.
fn m_ac_implied_do(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let payload = parenthesized(text).ok_or(MatchErr::NoMatch)?;
    let (line, repmap) = string_replace_map(payload);
    let eq = line.rfind('=').ok_or(MatchErr::NoMatch)?;
    let comma = line[..eq].rfind(',').ok_or(MatchErr::NoMatch)?;
    let values = parser.match_str(l(AcValue), &repmap.restore(line[..comma].trim_end()))?;
    let control =
        parser.match_str(b(AcImpliedDoControl), &repmap.restore(line[comma + 1..].trim_start()))?;
    Ok(vec![Item::tree(values), Item::tree(control)])
}

/// R471: `ac-do-variable = expr, expr [, expr]`.
fn m_ac_implied_do_control(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let eq = text.find('=').ok_or(MatchErr::NoMatch)?;
    let variable = parser.match_str(b(AcDoVariable), text[..eq].trim_end())?;
    let (line, repmap) = string_replace_map(text[eq + 1..].trim_start());
    let parts: Vec<&str> = line.split(',').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(MatchErr::NoMatch);
    }
    let mut items = vec![Item::tree(variable)];
    for part in &parts {
        items.push(Item::tree(
            parser.match_str(sc(IntExpr), &repmap.restore(part.trim()))?,
        ));
    }
    if parts.len() == 2 {
        items.push(Item::Absent);
    }
    Ok(items)
}
