//! Section 12 of the standard: interfaces, procedure declarations, CALL,
//! functions and subroutines (R1201-R1238).

use super::BaseRule::{self, *};
use super::{alts, rlist, alts_shaped, b, l, n, nl, sc, shaped, BlockSpec, Hook, KwPat, NameKind, RuleSpec, Shape};
use crate::pattern;
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R1201
        InterfaceBlock => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(InterfaceStmt)),
            mids: rlist![b(InterfaceSpecification)],
            end: Some(b(EndInterfaceStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1202
        InterfaceSpecification => alts(rlist![b(InterfaceBody), b(ProcedureStmt)]),
        // R1203
        InterfaceStmt => shaped(Shape::CustomStr(m_interface_stmt)),
        // R1204
        EndInterfaceStmt => shaped(Shape::EndStmt {
            kind: "INTERFACE",
            name: Some(b(GenericSpec)),
            require_kind: true,
        }),
        // interface bodies are a specification part only
        FunctionBody => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(FunctionStmt)),
            mids: rlist![b(SpecificationPart)],
            end: Some(b(EndFunctionStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        SubroutineBody => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(SubroutineStmt)),
            mids: rlist![b(SpecificationPart)],
            end: Some(b(EndSubroutineStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1205
        InterfaceBody => alts(rlist![b(FunctionBody), b(SubroutineBody)]),
        // R1206
        ProcedureStmt => shaped(Shape::CustomStr(m_procedure_stmt)),
        // R1207
        GenericSpec => alts_shaped(
            rlist![n(NameKind::Generic), b(DtioGenericSpec)],
            Shape::CustomStr(m_generic_spec),
        ),
        // R1208
        DtioGenericSpec => shaped(Shape::CustomStr(m_dtio_generic_spec)),
        // R1209
        ImportStmt => shaped(Shape::WordCls {
            word: KwPat::W("IMPORT"),
            cls: Some(nl(NameKind::Import)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R1210
        ExternalStmt => shaped(Shape::WordCls {
            word: KwPat::W("EXTERNAL"),
            cls: Some(nl(NameKind::External)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R1211
        ProcedureDeclarationStmt => shaped(Shape::CustomStr(m_procedure_declaration_stmt)),
        // R1212
        ProcInterface => alts(rlist![b(InterfaceName), b(DeclarationTypeSpec)]),
        // R1213
        ProcAttrSpec => alts_shaped(
            rlist![b(AccessSpec), b(ProcLanguageBindingSpec)],
            Shape::CustomStr(m_proc_attr_spec),
        ),
        // R1214
        ProcDecl => alts_shaped(
            rlist![n(NameKind::ProcedureEntity)],
            Shape::BinaryStr {
                lhs: n(NameKind::ProcedureEntity),
                op: "=>",
                rhs: b(NullInit),
                first: false,
            },
        ),
        // R1215
        InterfaceName => alts(rlist![b(Name)]),
        // R1216
        IntrinsicStmt => shaped(Shape::WordCls {
            word: KwPat::W("INTRINSIC"),
            cls: Some(nl(NameKind::IntrinsicProcedure)),
            check_colons: true,
            require_cls: true,
            colons_in_render: true,
        }),
        // R1217
        FunctionReference => shaped(Shape::CallOf {
            head: b(ProcedureDesignator),
            args: l(ActualArgSpec),
            require_args: false,
        }),
        // R1218
        CallStmt => shaped(Shape::CustomStr(m_call_stmt)),
        // R1219
        ProcedureDesignator => alts_shaped(
            rlist![n(NameKind::Procedure), b(ProcComponentRef)],
            Shape::BinaryStr {
                lhs: b(DataRef),
                op: "%",
                rhs: n(NameKind::Binding),
                first: false,
            },
        ),
        // R1220
        ActualArgSpec => alts_shaped(
            rlist![b(ActualArg)],
            Shape::KeyedValue {
                key: b(Keyword),
                value: b(ActualArg),
            },
        ),
        // R1221
        ActualArg => alts(rlist![
            n(NameKind::Procedure),
            b(ProcComponentRef),
            b(AltReturnSpec),
            b(Variable),
            b(Expr),
        ]),
        // R1222
        AltReturnSpec => shaped(Shape::CustomStr(m_alt_return_spec)),
        // R1223
        FunctionSubprogram => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(FunctionStmt)),
            mids: rlist![
                b(SpecificationPart),
                b(ExecutionPart),
                b(InternalSubprogramPart),
            ],
            end: Some(b(EndFunctionStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1224
        FunctionStmt => shaped(Shape::CustomStr(m_function_stmt)),
        // R1225
        ProcLanguageBindingSpec => alts(rlist![b(LanguageBindingSpec)]),
        // R1226
        DummyArgName => alts(rlist![b(Name)]),
        // R1227
        Prefix => alts_shaped(rlist![b(PrefixSpec)], Shape::CustomStr(m_prefix)),
        // R1228
        PrefixSpec => alts_shaped(
            rlist![b(DeclarationTypeSpec)],
            Shape::Keyword(KwPat::Set(&[
                "ELEMENTAL",
                "IMPURE",
                "MODULE",
                "PURE",
                "RECURSIVE",
            ])),
        ),
        // R1229
        Suffix => alts_shaped(rlist![b(ProcLanguageBindingSpec)], Shape::CustomStr(m_suffix)),
        // R1230
        EndFunctionStmt => shaped(Shape::EndStmt {
            kind: "FUNCTION",
            name: Some(n(NameKind::Function)),
            require_kind: false,
        }),
        // R1231
        SubroutineSubprogram => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(SubroutineStmt)),
            mids: rlist![
                b(SpecificationPart),
                b(ExecutionPart),
                b(InternalSubprogramPart),
            ],
            end: Some(b(EndSubroutineStmt)),
            match_labels: false,
            hook: Hook::None,
        })),
        // R1232
        SubroutineStmt => shaped(Shape::CustomStr(m_subroutine_stmt)),
        // R1233
        DummyArg => alts_shaped(rlist![b(DummyArgName)], Shape::Literal(&["*"])),
        // R1234
        EndSubroutineStmt => shaped(Shape::EndStmt {
            kind: "SUBROUTINE",
            name: Some(n(NameKind::Subroutine)),
            require_kind: false,
        }),
        // R1235
        EntryStmt => shaped(Shape::CustomStr(m_entry_stmt)),
        // R1236
        ReturnStmt => shaped(Shape::WordCls {
            word: KwPat::W("RETURN"),
            cls: Some(sc(IntExpr)),
            check_colons: false,
            require_cls: false,
            colons_in_render: false,
        }),
        // R1237
        ContainsStmt => shaped(Shape::Keyword(KwPat::W("CONTAINS"))),
        // R1238
        StmtFunctionStmt => shaped(Shape::CustomStr(m_stmt_function_stmt)),
        _ => return None,
    })
}

/// R1203: `INTERFACE [generic-spec]` or `ABSTRACT INTERFACE`.
fn m_interface_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text[..9.min(text.len())].eq_ignore_ascii_case("INTERFACE") {
        let rest = text[9..].trim();
        if rest.is_empty() {
            return Ok(vec![Item::Absent]);
        }
        let spec = parser.match_str(b(GenericSpec), rest)?;
        return Ok(vec![Item::tree(spec)]);
    }
    if text[..8.min(text.len())].eq_ignore_ascii_case("ABSTRACT") {
        let rest = text[8..].trim();
        if rest.eq_ignore_ascii_case("INTERFACE") {
            return Ok(vec![Item::word("ABSTRACT")]);
        }
    }
    Err(MatchErr::NoMatch)
}

/// R1206: `[MODULE] PROCEDURE procedure-name-list`.
fn m_procedure_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let line = match pattern::match_keyword_prefix(text, "MODULE") {
        Some(end) => text[end..].trim_start(),
        None => text,
    };
    let end = pattern::match_keyword_prefix(line, "PROCEDURE").ok_or(MatchErr::NoMatch)?;
    let names = parser.match_str(nl(NameKind::Procedure), line[end..].trim_start())?;
    Ok(vec![Item::tree(names)])
}

/// R1207: `OPERATOR ( defined-operator )` or `ASSIGNMENT ( = )`.
fn m_generic_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text[..8.min(text.len())].eq_ignore_ascii_case("OPERATOR") {
        let line = text[8..].trim_start();
        if line.len() >= 2 && line.starts_with('(') && line.ends_with(')') {
            let op = parser.match_str(b(DefinedOperator), line[1..line.len() - 1].trim())?;
            return Ok(vec![Item::word("OPERATOR"), Item::tree(op)]);
        }
        return Err(MatchErr::NoMatch);
    }
    if text[..10.min(text.len())].eq_ignore_ascii_case("ASSIGNMENT") {
        let line = text[10..].trim_start();
        if line.len() >= 2 && line.starts_with('(') && line.ends_with(')') {
            if line[1..line.len() - 1].trim() == "=" {
                return Ok(vec![Item::word("ASSIGNMENT"), Item::word("=")]);
            }
        }
    }
    Err(MatchErr::NoMatch)
}

/// R1208: `READ/WRITE ( FORMATTED/UNFORMATTED )`.
fn m_dtio_generic_spec(_parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    for word in ["READ", "WRITE"] {
        if text[..word.len().min(text.len())].eq_ignore_ascii_case(word) {
            let line = text[word.len()..].trim_start();
            if line.len() >= 2 && line.starts_with('(') && line.ends_with(')') {
                let mode = line[1..line.len() - 1].trim().to_uppercase();
                if mode == "FORMATTED" || mode == "UNFORMATTED" {
                    return Ok(vec![Item::word(format!("{}({})", word, mode))]);
                }
            }
        }
    }
    Err(MatchErr::NoMatch)
}

/// R1211: `PROCEDURE ([proc-interface]) [[, proc-attr-spec]... ::]
/// proc-decl-list`.
fn m_procedure_declaration_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..9.min(text.len())].eq_ignore_ascii_case("PROCEDURE") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[9..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(line);
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let iface_text = repmap.restore(line[1..close].trim());
    let iface = if iface_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(b(ProcInterface), &iface_text)?)
    };
    let mut rest = line[close + 1..].trim_start();
    let mut attrs = Item::Absent;
    if let Some(colons) = rest.find("::") {
        let head = rest[..colons].trim_end();
        if let Some(after_comma) = head.strip_prefix(',') {
            attrs = Item::tree(parser.match_str(l(ProcAttrSpec), &repmap.restore(after_comma.trim()))?);
        } else if !head.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        rest = rest[colons + 2..].trim_start();
    }
    let decls = parser.match_str(l(ProcDecl), &repmap.restore(rest))?;
    Ok(vec![iface, attrs, Item::tree(decls)])
}

/// R1213: `INTENT ( intent-spec )`, `OPTIONAL`, `POINTER`, `PROTECTED` or
/// `SAVE`.
fn m_proc_attr_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text[..6.min(text.len())].eq_ignore_ascii_case("INTENT") {
        let line = text[6..].trim_start();
        if line.len() >= 2 && line.starts_with('(') && line.ends_with(')') {
            let spec = parser.match_str(b(IntentSpec), line[1..line.len() - 1].trim())?;
            return Ok(vec![Item::word("INTENT"), Item::tree(spec)]);
        }
        return Err(MatchErr::NoMatch);
    }
    for word in ["OPTIONAL", "POINTER", "PROTECTED", "SAVE"] {
        if text.eq_ignore_ascii_case(word) {
            return Ok(vec![Item::word(word), Item::Absent]);
        }
    }
    Err(MatchErr::NoMatch)
}

/// R1218: `CALL procedure-designator [( [actual-arg-spec-list] )]`.
fn m_call_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("CALL") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[4..].trim_start();
    if line.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    if line.ends_with(')') {
        let (mapped, repmap) = string_replace_map(line);
        if let Some(open) = mapped.rfind('(') {
            let designator = parser
                .match_str(b(ProcedureDesignator), &repmap.restore(mapped[..open].trim_end()))?;
            let args_text = repmap.restore(mapped[open + 1..mapped.len() - 1].trim());
            if args_text.is_empty() {
                return Ok(vec![Item::tree(designator), Item::Absent]);
            }
            let args = parser.match_str(l(ActualArgSpec), &args_text)?;
            return Ok(vec![Item::tree(designator), Item::tree(args)]);
        }
        return Err(MatchErr::NoMatch);
    }
    let designator = parser.match_str(b(ProcedureDesignator), line)?;
    Ok(vec![Item::tree(designator), Item::Absent])
}

/// R1222: `* label`.
fn m_alt_return_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let rest = text.strip_prefix('*').ok_or(MatchErr::NoMatch)?.trim_start();
    if rest.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let label = parser.match_str(b(Label), rest)?;
    Ok(vec![Item::tree(label)])
}

/// R1224: `[prefix] FUNCTION name ( [dummy-arg-name-list] ) [suffix]`.
fn m_function_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let word = pattern::FUNCTION_WORD.find(&line).ok_or(MatchErr::NoMatch)?;
    let prefix_text = repmap.restore(line[..word.start()].trim_end());
    let prefix = if prefix_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(b(Prefix), &prefix_text)?)
    };
    let rest = line[word.end()..].trim_start();
    let name_match = pattern::NAME.find(rest).ok_or(MatchErr::NoMatch)?;
    let name = parser.match_str(b(Name), name_match.as_str())?;
    let rest = rest[name_match.end()..].trim_start();
    if !rest.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let close = rest.find(')').ok_or(MatchErr::NoMatch)?;
    let args_text = repmap.restore(rest[1..close].trim());
    let args = if args_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(l(DummyArg), &args_text)?)
    };
    let tail = rest[close + 1..].trim_start();
    let suffix = if tail.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(b(Suffix), &repmap.restore(tail))?)
    };
    Ok(vec![prefix, Item::tree(name), args, suffix])
}

/// R1227: `prefix-spec [prefix-spec]...` separated by blanks; one item per
/// spec.
fn m_prefix(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let mut items = Vec::new();
    let mut rest = line.trim();
    while !rest.is_empty() {
        // a prefix spec may itself contain a blank (TYPE (t)); take the
        // longest leading piece that matches
        let mut matched = None;
        let mut boundary = rest.len();
        loop {
            let candidate = rest[..boundary].trim_end();
            if !candidate.is_empty() {
                if let Ok(node) = parser.match_str(b(PrefixSpec), &repmap.restore(candidate)) {
                    matched = Some((node, boundary));
                    break;
                }
            }
            match rest[..boundary].rfind(char::is_whitespace) {
                Some(at) if at > 0 => boundary = at,
                _ => break,
            }
        }
        let (node, consumed) = matched.ok_or(MatchErr::NoMatch)?;
        items.push(Item::tree(node));
        rest = rest[consumed.min(rest.len())..].trim_start();
    }
    if items.len() < 2 {
        return Err(MatchErr::NoMatch);
    }
    Ok(items)
}

/// R1229: `proc-language-binding-spec [RESULT (name)]` or
/// `RESULT (name) [proc-language-binding-spec]`.
fn m_suffix(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text[..6.min(text.len())].eq_ignore_ascii_case("RESULT") {
        let line = text[6..].trim_start();
        if !line.starts_with('(') {
            return Err(MatchErr::NoMatch);
        }
        let close = line.find(')').ok_or(MatchErr::NoMatch)?;
        let name_text = line[1..close].trim();
        if name_text.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        let name = parser.match_str(n(NameKind::Result), name_text)?;
        let rest = line[close + 1..].trim_start();
        if rest.is_empty() {
            return Ok(vec![Item::tree(name), Item::Absent]);
        }
        let binding = parser.match_str(b(ProcLanguageBindingSpec), rest)?;
        return Ok(vec![Item::tree(name), Item::tree(binding)]);
    }
    if !text.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let open = text.rfind('(').ok_or(MatchErr::NoMatch)?;
    let name_text = text[open + 1..text.len() - 1].trim();
    if name_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let head = text[..open].trim_end();
    if head.len() < 6 || !head[head.len() - 6..].eq_ignore_ascii_case("RESULT") {
        return Err(MatchErr::NoMatch);
    }
    let binding_text = head[..head.len() - 6].trim_end();
    if binding_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let name = parser.match_str(n(NameKind::Result), name_text)?;
    let binding = parser.match_str(b(ProcLanguageBindingSpec), binding_text)?;
    Ok(vec![Item::tree(name), Item::tree(binding)])
}

/// R1232: `[prefix] SUBROUTINE name [( [dummy-arg-list] )
/// [proc-language-binding-spec]]`.
fn m_subroutine_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let word = pattern::SUBROUTINE_WORD
        .find(&line)
        .ok_or(MatchErr::NoMatch)?;
    let prefix_text = repmap.restore(line[..word.start()].trim_end());
    let prefix = if prefix_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(b(Prefix), &prefix_text)?)
    };
    let rest = line[word.end()..].trim_start();
    let name_match = pattern::NAME.find(rest).ok_or(MatchErr::NoMatch)?;
    let name = parser.match_str(b(Name), name_match.as_str())?;
    let mut rest = rest[name_match.end()..].trim_start();
    let mut args = Item::Absent;
    if rest.starts_with('(') {
        let close = rest.find(')').ok_or(MatchErr::NoMatch)?;
        let args_text = repmap.restore(rest[1..close].trim());
        if !args_text.is_empty() {
            args = Item::tree(parser.match_str(l(DummyArg), &args_text)?);
        }
        rest = rest[close + 1..].trim_start();
    }
    let binding = if rest.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(b(ProcLanguageBindingSpec), &repmap.restore(rest))?)
    };
    Ok(vec![prefix, Item::tree(name), args, binding])
}

/// R1235: `ENTRY entry-name [( [dummy-arg-list] ) [suffix]]`.
fn m_entry_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let end = pattern::match_keyword_prefix(text, "ENTRY").ok_or(MatchErr::NoMatch)?;
    let line = text[end..].trim_start();
    let open = match line.find('(') {
        None => {
            let name = parser.match_str(n(NameKind::Entry), line)?;
            return Ok(vec![Item::tree(name), Item::Absent, Item::Absent]);
        }
        Some(open) => open,
    };
    let name = parser.match_str(n(NameKind::Entry), line[..open].trim_end())?;
    let (mapped, repmap) = string_replace_map(&line[open..]);
    let close = mapped.find(')').ok_or(MatchErr::NoMatch)?;
    let args_text = repmap.restore(mapped[1..close].trim());
    let args = if args_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(l(DummyArg), &args_text)?)
    };
    let tail = mapped[close + 1..].trim_start();
    if tail.is_empty() {
        return Ok(vec![Item::tree(name), args, Item::Absent]);
    }
    let suffix = parser.match_str(b(Suffix), &repmap.restore(tail))?;
    Ok(vec![Item::tree(name), args, Item::tree(suffix)])
}

/// R1238: `function-name ( [dummy-arg-name-list] ) = scalar-expr`.
fn m_stmt_function_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let eq = text.find('=').ok_or(MatchErr::NoMatch)?;
    let expr_text = text[eq + 1..].trim_start();
    if expr_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let head = text[..eq].trim_end();
    if head.is_empty() || !head.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let open = head.find('(').ok_or(MatchErr::NoMatch)?;
    let name_text = head[..open].trim_end();
    if name_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let name = parser.match_str(n(NameKind::Function), name_text)?;
    let args_text = head[open + 1..head.len() - 1].trim();
    let args = if args_text.is_empty() {
        Item::Absent
    } else {
        Item::tree(parser.match_str(l(DummyArgName), args_text)?)
    };
    let expr = parser.match_str(sc(Expr), expr_text)?;
    Ok(vec![Item::tree(name), args, Item::tree(expr)])
}
