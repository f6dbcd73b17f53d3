//! Section 9 of the standard: input/output statements and their
//! keyword-argument tables (R901-R930). A positional first argument is
//! accepted only for the unit number; in an io-control-spec-list a second
//! positional argument is labelled as a format spec when it is a character
//! constant or `*`.

use super::BaseRule::{self, *};
use super::{alts, rlist, kvlist, alts_shaped, b, l, n, sc, shaped, KwPat, NameKind, RuleSpec, Shape};
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R901
        IoUnit => alts_shaped(
            rlist![b(FileUnitNumber), b(InternalFileVariable)],
            Shape::Literal(&["*"]),
        ),
        // R902
        FileUnitNumber => alts(rlist![sc(IntExpr)]),
        // R903
        InternalFileVariable => alts(rlist![b(CharVariable)]),
        // R904
        OpenStmt => shaped(Shape::Call {
            word: KwPat::W("OPEN"),
            args: l(ConnectSpec),
            require_args: true,
        }),
        // R905
        ConnectSpec => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (
                    &[
                        "ACCESS",
                        "ACTION",
                        "ASYNCHRONOUS",
                        "BLANK",
                        "DECIMAL",
                        "DELIM",
                        "ENCODING",
                        "FORM",
                        "PAD",
                        "POSITION",
                        "ROUND",
                        "SIGN",
                        "STATUS",
                    ],
                    sc(DefaultCharExpr),
                ),
                (&["ERR"], b(Label)),
                (&["FILE"], b(FileNameExpr)),
                (&["IOSTAT"], sc(IntVariable)),
                (&["IOMSG"], b(IomsgVariable)),
                (&["RECL"], sc(IntExpr)),
                (&["UNIT"], b(FileUnitNumber)),
            ],
            unit_fallback: Some(b(FileUnitNumber)),
        }),
        // R906
        FileNameExpr => alts(rlist![sc(DefaultCharExpr)]),
        // R907
        IomsgVariable => alts(rlist![sc(DefaultCharVariable)]),
        // R908
        CloseStmt => shaped(Shape::Call {
            word: KwPat::W("CLOSE"),
            args: l(CloseSpec),
            require_args: true,
        }),
        // R909
        CloseSpec => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (&["ERR"], b(Label)),
                (&["IOSTAT"], sc(IntVariable)),
                (&["IOMSG"], b(IomsgVariable)),
                (&["STATUS"], sc(DefaultCharExpr)),
                (&["UNIT"], b(FileUnitNumber)),
            ],
            unit_fallback: Some(b(FileUnitNumber)),
        }),
        // R910
        ReadStmt => shaped(Shape::CustomStr(m_read_stmt)),
        // R911
        WriteStmt => shaped(Shape::CustomStr(m_write_stmt)),
        // R912
        PrintStmt => shaped(Shape::CustomStr(m_print_stmt)),
        // R913-list: C910/C917/C918 make the list more than a plain
        // comma-separated sequence
        IoControlSpecList => shaped(Shape::CustomStr(m_io_control_spec_list)),
        // R913
        IoControlSpec => shaped(Shape::CustomStr(m_io_control_spec)),
        // R914
        Format => alts_shaped(rlist![b(Label), b(DefaultCharExpr)], Shape::Literal(&["*"])),
        // R915
        InputItem => alts(rlist![b(Variable), b(IoImpliedDo)]),
        // R916
        OutputItem => alts(rlist![b(Expr), b(IoImpliedDo)]),
        // R917
        IoImpliedDo => shaped(Shape::CustomStr(m_io_implied_do)),
        // R918
        IoImpliedDoObject => alts(rlist![b(InputItem), b(OutputItem)]),
        // R919
        IoImpliedDoControl => shaped(Shape::CustomStr(m_io_implied_do_control)),
        // R920
        DtvTypeSpec => shaped(Shape::Call {
            word: KwPat::Set(&["TYPE", "CLASS"]),
            args: b(DerivedTypeSpec),
            require_args: true,
        }),
        // R921
        WaitStmt => shaped(Shape::Call {
            word: KwPat::W("WAIT"),
            args: l(WaitSpec),
            require_args: true,
        }),
        // R922
        WaitSpec => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (&["END", "EOR", "ERR"], b(Label)),
                (&["IOSTAT"], sc(IntVariable)),
                (&["IOMSG"], b(IomsgVariable)),
                (&["ID"], sc(IntExpr)),
                (&["UNIT"], b(FileUnitNumber)),
            ],
            unit_fallback: Some(b(FileUnitNumber)),
        }),
        // R923-R925, R927
        BackspaceStmt => shaped(Shape::CustomStr(m_backspace_stmt)),
        EndfileStmt => shaped(Shape::CustomStr(m_endfile_stmt)),
        RewindStmt => shaped(Shape::CustomStr(m_rewind_stmt)),
        FlushStmt => shaped(Shape::CustomStr(m_flush_stmt)),
        // R926
        PositionSpec => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (&["ERR"], b(Label)),
                (&["IOSTAT"], sc(IntVariable)),
                (&["IOMSG"], b(IomsgVariable)),
                (&["UNIT"], b(FileUnitNumber)),
            ],
            unit_fallback: Some(b(FileUnitNumber)),
        }),
        // R928
        FlushSpec => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (&["ERR"], b(Label)),
                (&["IOSTAT"], sc(IntVariable)),
                (&["IOMSG"], b(IomsgVariable)),
                (&["UNIT"], b(FileUnitNumber)),
            ],
            unit_fallback: Some(b(FileUnitNumber)),
        }),
        // R929
        InquireStmt => shaped(Shape::CustomStr(m_inquire_stmt)),
        // R930
        InquireSpec => shaped(Shape::KeywordValue {
            pairs: kvlist![
                (
                    &[
                        "ACCESS",
                        "ACTION",
                        "ASYNCHRONOUS",
                        "BLANK",
                        "DECIMAL",
                        "DELIM",
                        "DIRECT",
                        "ENCODING",
                        "FORM",
                        "NAME",
                        "PAD",
                        "POSITION",
                        "READ",
                        "READWRITE",
                        "ROUND",
                        "SEQUENTIAL",
                        "SIGN",
                        "STREAM",
                        "UNFORMATTED",
                        "WRITE",
                    ],
                    sc(DefaultCharVariable),
                ),
                (&["ERR"], b(Label)),
                (
                    &["EXIST", "NAMED", "PENDING", "OPENED"],
                    sc(DefaultLogicalVariable),
                ),
                (&["ID"], sc(IntExpr)),
                (
                    &["IOSTAT", "NEXTREC", "NUMBER", "POS", "RECL", "SIZE"],
                    sc(IntVariable),
                ),
                (&["IOMSG"], b(IomsgVariable)),
                (&["FILE"], b(FileNameExpr)),
                (&["UNIT"], b(FileUnitNumber)),
            ],
            unit_fallback: Some(b(FileUnitNumber)),
        }),
        _ => return None,
    })
}

/// R910: `READ ( io-control-spec-list ) [input-item-list]` or
/// `READ format [, input-item-list]`. The no-parenthesis branch tags its
/// items as an output-item list; kept as is for compatibility.
fn m_read_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..4.min(text.len())].eq_ignore_ascii_case("READ") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[4..].trim_start();
    if line.starts_with('(') {
        let (line, repmap) = string_replace_map(line);
        let close = line.find(')').ok_or(MatchErr::NoMatch)?;
        let controls = line[1..close].trim();
        if controls.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        let controls = parser.match_str(b(IoControlSpecList), &repmap.restore(controls))?;
        let rest = line[close + 1..].trim_start();
        if rest.is_empty() {
            return Ok(vec![Item::tree(controls), Item::Absent, Item::Absent]);
        }
        let inputs = parser.match_str(l(InputItem), &repmap.restore(rest))?;
        return Ok(vec![Item::tree(controls), Item::Absent, Item::tree(inputs)]);
    }
    if line.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let first = line.chars().next().unwrap();
    if first.is_ascii_alphabetic() || first == '_' {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(line);
    let comma = line.find(',').ok_or(MatchErr::NoMatch)?;
    let items_text = repmap.restore(line[comma + 1..].trim_start());
    if items_text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let format = parser.match_str(b(Format), &repmap.restore(line[..comma].trim_end()))?;
    let items = parser.match_str(l(OutputItem), &items_text)?;
    Ok(vec![Item::Absent, Item::tree(format), Item::tree(items)])
}

/// R911: `WRITE ( io-control-spec-list ) [output-item-list]`.
fn m_write_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..5.min(text.len())].eq_ignore_ascii_case("WRITE") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[5..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(line);
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let controls = line[1..close].trim();
    if controls.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let controls = parser.match_str(b(IoControlSpecList), &repmap.restore(controls))?;
    let rest = line[close + 1..].trim_start();
    if rest.is_empty() {
        return Ok(vec![Item::tree(controls), Item::Absent]);
    }
    let outputs = parser.match_str(l(OutputItem), &repmap.restore(rest))?;
    Ok(vec![Item::tree(controls), Item::tree(outputs)])
}

/// R912: `PRINT format [, output-item-list]`.
fn m_print_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..5.min(text.len())].eq_ignore_ascii_case("PRINT") {
        return Err(MatchErr::NoMatch);
    }
    let line = &text[5..];
    let first = line.chars().next().ok_or(MatchErr::NoMatch)?;
    if first.is_ascii_alphanumeric() || first == '_' {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(line.trim_start());
    match line.find(',') {
        None => {
            let format = parser.match_str(b(Format), &repmap.restore(&line))?;
            Ok(vec![Item::tree(format), Item::Absent])
        }
        Some(comma) => {
            let items_text = repmap.restore(line[comma + 1..].trim_start());
            if items_text.is_empty() {
                return Err(MatchErr::NoMatch);
            }
            let format = parser.match_str(b(Format), &repmap.restore(line[..comma].trim_end()))?;
            let outputs = parser.match_str(l(OutputItem), &items_text)?;
            Ok(vec![Item::tree(format), Item::tree(outputs)])
        }
    }
}

/// R913-list: the unit may be positional in the first slot; a second
/// positional argument is recognized as a format spec when it is a char
/// constant or `*` (C917), and positional arguments may not follow named
/// ones.
fn m_io_control_spec_list(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let mut items = Vec::new();
    let mut unit_is_positional = false;
    for (index, part) in line.split(',').enumerate() {
        let spec = repmap.restore(part.trim());
        if spec.is_empty() {
            return Err(MatchErr::NoMatch);
        }
        let named = spec_is_named(&spec);
        if index == 0 && !named {
            unit_is_positional = true;
            items.push(Item::tree(parser.match_str(b(IoControlSpec), &spec)?));
            continue;
        }
        if index == 1 && !named {
            if !unit_is_positional {
                return Err(MatchErr::NoMatch);
            }
            let promoted = if is_format_like(parser, &spec) {
                format!("FMT={}", spec)
            } else {
                spec
            };
            items.push(Item::tree(parser.match_str(b(IoControlSpec), &promoted)?));
            continue;
        }
        items.push(Item::tree(parser.match_str(b(IoControlSpec), &spec)?));
    }
    if items.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    Ok(items)
}

fn spec_is_named(spec: &str) -> bool {
    let (line, _) = string_replace_map(spec);
    line.contains('=') && !line.contains("=>")
}

fn is_format_like(parser: &FortranParser, spec: &str) -> bool {
    spec == "*" || parser.match_str(b(CharLiteralConstant), spec).is_ok()
}

/// R913: `[UNIT =] io-unit`, `[FMT =] format`, `[NML =] namelist-group`
/// or one of the named-only control specs.
fn m_io_control_spec(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let positional: &[(&str, super::Rule)] = &[
        ("UNIT", b(IoUnit)),
        ("FMT", b(Format)),
        ("NML", n(NameKind::NamelistGroup)),
    ];
    let (line, repmap) = string_replace_map(text);
    match line.find('=') {
        None => {
            for (_, value_rule) in positional {
                match parser.match_str(*value_rule, text) {
                    Ok(node) => return Ok(vec![Item::Absent, Item::tree(node)]),
                    Err(MatchErr::NoMatch) => continue,
                    Err(fatal) => return Err(fatal),
                }
            }
            Err(MatchErr::NoMatch)
        }
        Some(eq) => {
            let key = line[..eq].trim();
            let value = repmap.restore(line[eq + 1..].trim_start());
            if value.is_empty() {
                return Err(MatchErr::NoMatch);
            }
            for (candidate, value_rule) in positional {
                if key.eq_ignore_ascii_case(candidate) {
                    let node = parser.match_str(*value_rule, &value)?;
                    return Ok(vec![Item::word(*candidate), Item::tree(node)]);
                }
            }
            let named: &[(&[&str], super::Rule)] = &[
                (
                    &["ADVANCE", "BLANK", "DECIMAL", "DELIM", "PAD", "ROUND", "SIGN"],
                    sc(DefaultCharExpr),
                ),
                (&["ASYNCHRONOUS"], sc(CharInitializationExpr)),
                (&["END", "EOR", "ERR"], b(Label)),
                (&["ID", "IOSTAT", "SIZE"], sc(IntVariable)),
                (&["IOMSG"], b(IomsgVariable)),
                (&["POS", "REC"], sc(IntExpr)),
            ];
            for (keys, value_rule) in named {
                for candidate in keys.iter() {
                    if key.eq_ignore_ascii_case(candidate) {
                        let node = parser.match_str(*value_rule, &value)?;
                        return Ok(vec![Item::word(*candidate), Item::tree(node)]);
                    }
                }
            }
            Err(MatchErr::NoMatch)
        }
    }
}

/// R917: `( io-implied-do-object-list , io-implied-do-control )`.
fn m_io_implied_do(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.len() <= 9 || !text.starts_with('(') || !text.ends_with(')') {
        return Err(MatchErr::NoMatch);
    }
    let (line, repmap) = string_replace_map(text[1..text.len() - 1].trim());
    let eq = line.rfind('=').ok_or(MatchErr::NoMatch)?;
    let comma = line[..eq].rfind(',').ok_or(MatchErr::NoMatch)?;
    let objects =
        parser.match_str(l(IoImpliedDoObject), &repmap.restore(line[..comma].trim_end()))?;
    let control = parser.match_str(
        b(IoImpliedDoControl),
        &repmap.restore(line[comma + 1..].trim_start()),
    )?;
    Ok(vec![Item::tree(objects), Item::tree(control)])
}

/// R919: `do-variable = expr, expr [, expr]`.
fn m_io_implied_do_control(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let (line, repmap) = string_replace_map(text);
    let eq = line.find('=').ok_or(MatchErr::NoMatch)?;
    let variable = parser.match_str(b(DoVariable), &repmap.restore(line[..eq].trim_end()))?;
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
    Ok(vec![Item::tree(variable), Item::tree(first), Item::tree(second), third])
}

/// The shared `KEYWORD file-unit-number | KEYWORD ( position-spec-list )`
/// shape of BACKSPACE, ENDFILE, REWIND and FLUSH.
fn position_stmt(parser: &FortranParser, text: &str, word: &str) -> MatchResult<Vec<Item>> {
    let end = crate::pattern::match_keyword_prefix(text, word).ok_or(MatchErr::NoMatch)?;
    let line = text[end..].trim_start();
    if line.starts_with('(') {
        if !line.ends_with(')') {
            return Err(MatchErr::NoMatch);
        }
        let specs = parser.match_str(l(PositionSpec), line[1..line.len() - 1].trim())?;
        return Ok(vec![Item::Absent, Item::tree(specs)]);
    }
    let unit = parser.match_str(b(FileUnitNumber), line)?;
    Ok(vec![Item::tree(unit), Item::Absent])
}

fn m_backspace_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    position_stmt(parser, text, "BACKSPACE")
}

fn m_endfile_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    position_stmt(parser, text, "ENDFILE")
}

fn m_rewind_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    position_stmt(parser, text, "REWIND")
}

fn m_flush_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    position_stmt(parser, text, "FLUSH")
}

/// R929: `INQUIRE ( inquire-spec-list )` or
/// `INQUIRE ( IOLENGTH = scalar-int-variable ) output-item-list`.
fn m_inquire_stmt(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if !text[..7.min(text.len())].eq_ignore_ascii_case("INQUIRE") {
        return Err(MatchErr::NoMatch);
    }
    let line = text[7..].trim_start();
    if !line.starts_with('(') {
        return Err(MatchErr::NoMatch);
    }
    if line.ends_with(')') {
        let specs = parser.match_str(l(InquireSpec), line[1..line.len() - 1].trim())?;
        return Ok(vec![Item::tree(specs), Item::Absent, Item::Absent]);
    }
    let (line, repmap) = string_replace_map(line);
    let close = line.find(')').ok_or(MatchErr::NoMatch)?;
    let inner = repmap.restore(line[1..close].trim());
    if !inner[..8.min(inner.len())].eq_ignore_ascii_case("IOLENGTH") {
        return Err(MatchErr::NoMatch);
    }
    let inner = inner[8..].trim_start();
    let inner = inner.strip_prefix('=').ok_or(MatchErr::NoMatch)?.trim_start();
    let variable = parser.match_str(sc(IntVariable), inner)?;
    let outputs = parser.match_str(l(OutputItem), &repmap.restore(line[close + 1..].trim_start()))?;
    Ok(vec![Item::Absent, Item::tree(variable), Item::tree(outputs)])
}
