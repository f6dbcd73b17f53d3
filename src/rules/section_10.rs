//! Section 10 of the standard: FORMAT statements and edit descriptors
//! (R1001-R1019), including the comma-less C1002 forms and the `x-format`
//! and `dollar-edit` extensions.

use super::BaseRule::{self, *};
use super::{alts, rlist, alts_shaped, b, l, shaped, KwPat, RuleSpec, Shape};
use crate::splitline::string_replace_map;
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R1001
        FormatStmt => shaped(Shape::WordCls {
            word: KwPat::W("FORMAT"),
            cls: Some(b(FormatSpecification)),
            check_colons: false,
            require_cls: true,
            colons_in_render: false,
        }),
        // R1002
        FormatSpecification => shaped(Shape::Bracket {
            left: "(",
            right: ")",
            inner: l(FormatItem),
            require_inner: false,
        }),
        // C1002
        FormatItemC1002 => shaped(Shape::CustomStr(m_format_item_c1002)),
        // R1003
        FormatItem => alts_shaped(
            rlist![
                b(ControlEditDesc),
                b(CharStringEditDesc),
                b(FormatItemC1002),
            ],
            Shape::CustomStr(m_format_item),
        ),
        // R1004
        R => alts(rlist![b(DigitString)]),
        DataEditDescC1002 => shaped(Shape::CustomStr(m_data_edit_desc_c1002)),
        // R1005
        DataEditDesc => alts_shaped(rlist![b(DataEditDescC1002)], Shape::CustomStr(m_data_edit_desc)),
        // R1006-R1010, R1012, R1014
        W => alts(rlist![b(DigitString)]),
        M => alts(rlist![b(IntLiteralConstant)]),
        D => alts(rlist![b(IntLiteralConstant)]),
        E => alts(rlist![b(DigitString)]),
        V => alts(rlist![b(SignedIntLiteralConstant)]),
        K => alts(rlist![b(SignedIntLiteralConstant)]),
        N => alts(rlist![b(DigitString)]),
        // R1011
        ControlEditDesc => alts_shaped(
            rlist![
                b(PositionEditDesc),
                b(SignEditDesc),
                b(BlankInterpEditDesc),
                b(RoundEditDesc),
                b(DecimalEditDesc),
            ],
            Shape::CustomStr(m_control_edit_desc),
        ),
        // R1013
        PositionEditDesc => shaped(Shape::CustomStr(m_position_edit_desc)),
        // R1015
        SignEditDesc => shaped(Shape::Keyword(KwPat::Set(&["SS", "SP", "S"]))),
        // R1016
        BlankInterpEditDesc => shaped(Shape::Keyword(KwPat::Set(&["BN", "BZ"]))),
        // R1017
        RoundEditDesc => shaped(Shape::Keyword(KwPat::Set(&[
            "RU", "RD", "RZ", "RN", "RC", "RP",
        ]))),
        // R1018
        DecimalEditDesc => shaped(Shape::Keyword(KwPat::Set(&["DC", "DP"]))),
        // R1019
        CharStringEditDesc => alts(rlist![b(CharLiteralConstant)]),
        _ => return None,
    })
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(|c| c.is_ascii_digit()).count()
}

/// C1002: the comma-less adjacencies around `/`, `:` and `kP`.
fn m_format_item_c1002(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.len() <= 1 {
        return Err(MatchErr::NoMatch);
    }
    let first = text.chars().next().unwrap();
    if first == ':' || first == '/' {
        let lead = parser.match_str(b(ControlEditDesc), &first.to_string())?;
        let rest = parser.match_str(b(FormatItem), text[1..].trim_start())?;
        return Ok(vec![Item::tree(lead), Item::tree(rest)]);
    }
    let last = text.chars().last().unwrap();
    if last == ':' || last == '/' {
        let head = parser.match_str(b(FormatItem), text[..text.len() - 1].trim_end())?;
        let tail = parser.match_str(b(ControlEditDesc), &last.to_string())?;
        return Ok(vec![Item::tree(head), Item::tree(tail)]);
    }
    let (line, repmap) = string_replace_map(text);
    let digits = leading_digits(&line);
    if digits > 0 {
        if let Some(marker) = line[digits..].chars().next() {
            if marker == '/' || marker.eq_ignore_ascii_case(&'P') {
                let lead = parser.match_str(
                    b(ControlEditDesc),
                    &repmap.restore(&line[..digits + 1]),
                )?;
                let rest = parser.match_str(
                    b(FormatItem),
                    &repmap.restore(line[digits + 1..].trim_start()),
                )?;
                return Ok(vec![Item::tree(lead), Item::tree(rest)]);
            }
        }
    }
    for marker in ['/', ':'] {
        if let Some(at) = line.find(marker) {
            let head = parser.match_str(b(FormatItem), &repmap.restore(line[..at].trim_end()))?;
            let tail = parser.match_str(
                b(FormatItem),
                &format!("{}{}", marker, repmap.restore(line[at + 1..].trim_start())),
            )?;
            return Ok(vec![Item::tree(head), Item::tree(tail)]);
        }
    }
    Err(MatchErr::NoMatch)
}

/// R1003: `[r] data-edit-desc` or `[r] ( format-item-list )`.
fn m_format_item(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    let digits = leading_digits(text);
    let repeat = if digits > 0 {
        Item::tree(parser.match_str(b(R), &text[..digits])?)
    } else {
        Item::Absent
    };
    let rest = text[digits..].trim_start();
    if rest.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    if rest.starts_with('(') && rest.ends_with(')') {
        let inner = parser.match_str(l(FormatItem), rest[1..rest.len() - 1].trim())?;
        return Ok(vec![repeat, Item::tree(inner)]);
    }
    let desc = parser.match_str(b(DataEditDesc), rest)?;
    Ok(vec![repeat, Item::tree(desc)])
}

fn split_wd(parser: &FortranParser, text: &str) -> MatchResult<(Item, Item, Item)> {
    // w . d [E e]
    let dot = text.find('.').ok_or(MatchErr::NoMatch)?;
    let width = parser.match_str(b(W), text[..dot].trim_end())?;
    let rest = text[dot + 1..].trim_start();
    let upper = rest.to_uppercase();
    if let Some(exp) = upper.find('E') {
        let digits = parser.match_str(b(D), rest[..exp].trim_end())?;
        let exponent = parser.match_str(b(E), rest[exp + 1..].trim_start())?;
        return Ok((Item::tree(width), Item::tree(digits), Item::tree(exponent)));
    }
    let digits = parser.match_str(b(D), rest)?;
    Ok((Item::tree(width), Item::tree(digits), Item::Absent))
}

/// C1002 data edit descriptors: `F`, `E`, `EN`, `ES`, `G`, `D` with
/// `w.d[Ee]` fields.
fn m_data_edit_desc_c1002(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let upper = text.to_uppercase();
    for prefix in ["EN", "ES"] {
        if let Some(rest) = upper.strip_prefix(prefix) {
            if rest.chars().next().map_or(false, |c| c.is_ascii_digit()) {
                let (w, d, e) = split_wd(parser, text[2..].trim_start())?;
                return Ok(vec![Item::word(prefix), w, d, e]);
            }
        }
    }
    for prefix in ["F", "G", "E", "D"] {
        if let Some(rest) = upper.strip_prefix(prefix) {
            if rest.chars().next().map_or(false, |c| c.is_ascii_digit()) {
                let (w, d, e) = split_wd(parser, text[1..].trim_start())?;
                if (prefix == "F" || prefix == "D") && !matches!(e, Item::Absent) {
                    return Err(MatchErr::NoMatch);
                }
                return Ok(vec![Item::word(prefix), w, d, e]);
            }
        }
    }
    Err(MatchErr::NoMatch)
}

/// R1005: `Iw[.m]`, `Bw[.m]`, `Ow[.m]`, `Zw[.m]`, `Lw`, `A[w]`,
/// `DT [char-literal] [(v-list)]`.
fn m_data_edit_desc(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let upper = text.to_uppercase();
    if let Some(rest) = upper.strip_prefix("DT") {
        let _ = rest;
        let line = text[2..].trim_start();
        if line.is_empty() {
            return Ok(vec![Item::word("DT"), Item::Absent, Item::Absent]);
        }
        let (mut line, v_list) = if line.ends_with(')') {
            let open = line.rfind('(').ok_or(MatchErr::NoMatch)?;
            let inner = line[open + 1..line.len() - 1].trim();
            if inner.is_empty() {
                return Err(MatchErr::NoMatch);
            }
            let v_list = parser.match_str(l(V), inner)?;
            (line[..open].trim_end(), Item::tree(v_list))
        } else {
            (line, Item::Absent)
        };
        line = line.trim_end();
        if line.is_empty() {
            return Ok(vec![Item::word("DT"), Item::Absent, v_list]);
        }
        let literal = parser.match_str(b(CharLiteralConstant), line)?;
        return Ok(vec![Item::word("DT"), Item::tree(literal), v_list]);
    }
    let first = upper.chars().next().unwrap();
    match first {
        'I' | 'B' | 'O' | 'Z' => {
            let line = text[1..].trim_start();
            if let Some(dot) = line.find('.') {
                let width = parser.match_str(b(W), line[..dot].trim_end())?;
                let min_digits = parser.match_str(b(M), line[dot + 1..].trim_start())?;
                return Ok(vec![
                    Item::word(first.to_string()),
                    Item::tree(width),
                    Item::tree(min_digits),
                ]);
            }
            let width = parser.match_str(b(W), line)?;
            Ok(vec![
                Item::word(first.to_string()),
                Item::tree(width),
                Item::Absent,
            ])
        }
        'L' => {
            let line = text[1..].trim_start();
            if line.is_empty() {
                return Err(MatchErr::NoMatch);
            }
            let width = parser.match_str(b(W), line)?;
            Ok(vec![Item::word("L"), Item::tree(width), Item::Absent])
        }
        'A' => {
            let line = text[1..].trim_start();
            if line.is_empty() {
                return Ok(vec![Item::word("A"), Item::Absent, Item::Absent]);
            }
            let width = parser.match_str(b(W), line)?;
            Ok(vec![Item::word("A"), Item::tree(width), Item::Absent])
        }
        _ => Err(MatchErr::NoMatch),
    }
}

/// R1011: `[r] /`, `:`, `k P`, and `$` under the dollar-edit extension.
fn m_control_edit_desc(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text == "/" || text == ":" {
        return Ok(vec![Item::Absent, Item::word(text)]);
    }
    if text == "$" {
        if parser.extensions().dollar_edit {
            return Ok(vec![Item::Absent, Item::word("$")]);
        }
        return Err(MatchErr::NoMatch);
    }
    if let Some(head) = text.strip_suffix('/') {
        let repeat = parser.match_str(b(R), head.trim_end())?;
        return Ok(vec![Item::tree(repeat), Item::word("/")]);
    }
    if text.to_uppercase().ends_with('P') {
        let scale = parser.match_str(b(K), text[..text.len() - 1].trim_end())?;
        return Ok(vec![Item::tree(scale), Item::word("P")]);
    }
    Err(MatchErr::NoMatch)
}

/// R1013: `T n`, `TL n`, `TR n`, `n X`; bare `X` only under the x-format
/// extension.
fn m_position_edit_desc(parser: &FortranParser, text: &str) -> MatchResult<Vec<Item>> {
    if text.is_empty() {
        return Err(MatchErr::NoMatch);
    }
    let upper = text.to_uppercase();
    if upper.starts_with('T') {
        let (start, rest) = if upper.len() > 1 && (upper.as_bytes()[1] == b'L' || upper.as_bytes()[1] == b'R')
        {
            (upper[..2].to_string(), text[2..].trim_start())
        } else {
            ("T".to_string(), text[1..].trim_start())
        };
        let number = parser.match_str(b(N), rest)?;
        return Ok(vec![Item::word(start), Item::tree(number)]);
    }
    if upper.ends_with('X') {
        if upper == "X" {
            if parser.extensions().x_format {
                return Ok(vec![Item::Absent, Item::word("X")]);
            }
            return Err(MatchErr::NoMatch);
        }
        let number = parser.match_str(b(N), text[..text.len() - 1].trim_end())?;
        return Ok(vec![Item::tree(number), Item::word("X")]);
    }
    Err(MatchErr::NoMatch)
}
