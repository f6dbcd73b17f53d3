//! Compiled regular expressions for the Fortran terminals, and the scanners
//! which locate top-level operator occurrences inside a replace-mapped line.
//!
//! The statics below are process-wide read-only state, compiled once on
//! first use. All matching of operators assumes the line has been through
//! [string_replace_map](crate::string_replace_map) first, so that operator
//! characters inside character literals and parenthesized groups are hidden.

use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! pat {
    ($name:ident, $re:expr) => {
        pub(crate) static $name: Lazy<Regex> = Lazy::new(|| Regex::new($re).unwrap());
    };
}

pat!(NAME, r"^[A-Za-z][A-Za-z0-9_]*");
pat!(ABS_NAME, r"^[A-Za-z][A-Za-z0-9_]*$");
pat!(LABEL, r"^\d{1,5}");
pat!(ABS_LABEL, r"^\d{1,5}$");
pat!(ABS_DIGIT_STRING, r"^(?P<value>\d+)$");
pat!(
    ABS_INT_LITERAL_CONSTANT,
    r"^(?P<value>\d+)(?:_(?P<kind_param>\d+|[A-Za-z][A-Za-z0-9_]*))?$"
);
pat!(
    ABS_SIGNED_INT_LITERAL_CONSTANT,
    r"^(?P<value>[+-]?\s*\d+)(?:_(?P<kind_param>\d+|[A-Za-z][A-Za-z0-9_]*))?$"
);
pat!(
    ABS_REAL_LITERAL_CONSTANT,
    r"^(?P<value>(?:\d+\.\d*|\.\d+)(?:[EeDd][+-]?\d+)?|\d+[EeDd][+-]?\d+)(?:_(?P<kind_param>\d+|[A-Za-z][A-Za-z0-9_]*))?$"
);
pat!(
    ABS_SIGNED_REAL_LITERAL_CONSTANT,
    r"^(?P<value>[+-]?\s*(?:(?:\d+\.\d*|\.\d+)(?:[EeDd][+-]?\d+)?|\d+[EeDd][+-]?\d+))(?:_(?P<kind_param>\d+|[A-Za-z][A-Za-z0-9_]*))?$"
);
pat!(
    ABS_LOGICAL_LITERAL_CONSTANT,
    r"(?i)^(?P<value>\.(?:true|false)\.)(?:_(?P<kind_param>\d+|[A-Za-z][A-Za-z0-9_]*))?$"
);
pat!(
    CHAR_LITERAL_SINGLE,
    r"^(?:(?P<kind_param>\d+|[A-Za-z][A-Za-z0-9_]*)_)?(?P<value>'(?:[^']|'')*')$"
);
pat!(
    CHAR_LITERAL_DOUBLE,
    r#"^(?:(?P<kind_param>\d+|[A-Za-z][A-Za-z0-9_]*)_)?(?P<value>"(?:[^"]|"")*")$"#
);
pat!(ABS_BINARY_CONSTANT, r#"(?i)^(?:b'[01]+'|b"[01]+")$"#);
pat!(ABS_OCTAL_CONSTANT, r#"(?i)^(?:o'[0-7]+'|o"[0-7]+")$"#);
pat!(ABS_HEX_CONSTANT, r#"(?i)^(?:z'[0-9a-fA-F]+'|z"[0-9a-fA-F]+")$"#);
pat!(
    ABS_INTRINSIC_TYPE_NAME,
    r"(?i)^(?:integer|real|double\s*precision|complex|character|logical|double\s*complex|byte)$"
);
pat!(ABS_DEFINED_OP, r"^\.[A-Za-z]+\.$");
pat!(
    ABS_NON_DEFINED_BINARY_OP,
    r"(?i)^\.(?:and|or|not|eqv|neqv|eq|ne|lt|le|gt|ge|true|false)\.$"
);
pat!(ABS_INTENT_SPEC, r"(?i)^(?:inout|in|out)$");
pat!(FUNCTION_WORD, r"(?i)\bfunction\b");
pat!(SUBROUTINE_WORD, r"(?i)\bsubroutine\b");
pat!(ELSEWHERE_WORD, r"(?i)^else\s*where");

pat!(
    REL_OP_SCAN,
    r"(?i)\.(?:eq|ne|lt|le|gt|ge)\.|==|/=|<=|>=|<|>"
);
pat!(AND_OP_SCAN, r"(?i)\.and\.");
pat!(OR_OP_SCAN, r"(?i)\.or\.");
pat!(EQUIV_OP_SCAN, r"(?i)\.(?:eqv|neqv)\.");
pat!(NOT_OP_PREFIX, r"(?i)^\.not\.");
pat!(DEFINED_OP_SCAN, r"\.[A-Za-z]+\.");
pat!(DEFINED_OP_PREFIX, r"^\.[A-Za-z]+\.");
// trailing numeric token ending in an exponent letter, e.g. `1.5e` in `1.5e+3`
pat!(EXPONENT_TAIL, r"(?:^|[^A-Za-z0-9_.])(?:\d+\.?\d*|\.\d+)[EeDd]$");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The operator family a binary or unary rule matches on. Precedence is
/// encoded by the rule hierarchy, not here; each class only knows how to
/// locate its own occurrences.
pub enum OpClass {
    Power,
    Mult,
    Add,
    Concat,
    Rel,
    Not,
    And,
    Or,
    Equiv,
    DefinedBinary,
    DefinedUnary,
}

fn nonempty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// `lhs` tail is a numeric token ending in E/D, so a following sign is an
/// exponent sign rather than an operator.
fn ends_in_exponent(lhs: &str) -> bool {
    EXPONENT_TAIL.is_match(lhs.trim_end())
}

fn regex_split_last<'a>(line: &'a str, re: &Regex) -> Option<(&'a str, String, &'a str)> {
    let m = re.find_iter(line).last()?;
    let (lhs, rhs) = (&line[..m.start()], &line[m.end()..]);
    if !nonempty(lhs) || !nonempty(rhs) {
        return None;
    }
    Some((lhs.trim(), m.as_str().to_uppercase(), rhs.trim()))
}

/// Locate the splitting occurrence of a binary operator of class `op` in a
/// replace-mapped line. Left-associative operators split at their last
/// occurrence; the right-associative power operator splits at its first.
/// Returns `(lhs, op, rhs)` with the operator text uppercased.
pub(crate) fn split_binary<'a>(line: &'a str, op: OpClass) -> Option<(&'a str, String, &'a str)> {
    let bytes = line.as_bytes();
    match op {
        OpClass::Power => {
            let i = line.find("**")?;
            let (lhs, rhs) = (&line[..i], &line[i + 2..]);
            if !nonempty(lhs) || !nonempty(rhs) {
                return None;
            }
            Some((lhs.trim(), "**".to_string(), rhs.trim()))
        }
        OpClass::Mult => {
            for i in (0..bytes.len()).rev() {
                let c = bytes[i];
                if c != b'*' && c != b'/' {
                    continue;
                }
                let prev = if i > 0 { bytes[i - 1] } else { 0 };
                let next = if i + 1 < bytes.len() { bytes[i + 1] } else { 0 };
                if c == b'*' && (prev == b'*' || next == b'*') {
                    continue;
                }
                if c == b'/' && (prev == b'/' || next == b'/' || next == b'=') {
                    continue;
                }
                let (lhs, rhs) = (&line[..i], &line[i + 1..]);
                if nonempty(lhs) && nonempty(rhs) {
                    return Some((lhs.trim(), (c as char).to_string(), rhs.trim()));
                }
            }
            None
        }
        OpClass::Add => {
            for i in (0..bytes.len()).rev() {
                let c = bytes[i];
                if c != b'+' && c != b'-' {
                    continue;
                }
                let lhs = &line[..i];
                if !nonempty(lhs) {
                    continue;
                }
                if ends_in_exponent(lhs) {
                    continue;
                }
                let rhs = &line[i + 1..];
                if !nonempty(rhs) {
                    continue;
                }
                return Some((lhs.trim(), (c as char).to_string(), rhs.trim()));
            }
            None
        }
        OpClass::Concat => {
            let mut i = bytes.len();
            while i >= 2 {
                i -= 1;
                if bytes[i] == b'/' && bytes[i - 1] == b'/' {
                    let next = if i + 1 < bytes.len() { bytes[i + 1] } else { 0 };
                    if next == b'/' || next == b'=' {
                        continue;
                    }
                    let (lhs, rhs) = (&line[..i - 1], &line[i + 1..]);
                    if nonempty(lhs) && nonempty(rhs) {
                        return Some((lhs.trim(), "//".to_string(), rhs.trim()));
                    }
                }
            }
            None
        }
        OpClass::Rel => regex_split_last(line, &REL_OP_SCAN),
        OpClass::And => regex_split_last(line, &AND_OP_SCAN),
        OpClass::Or => regex_split_last(line, &OR_OP_SCAN),
        OpClass::Equiv => regex_split_last(line, &EQUIV_OP_SCAN),
        OpClass::DefinedBinary => {
            for m in DEFINED_OP_SCAN
                .find_iter(line)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
            {
                if ABS_NON_DEFINED_BINARY_OP.is_match(m.as_str()) {
                    continue;
                }
                let (lhs, rhs) = (&line[..m.start()], &line[m.end()..]);
                if nonempty(lhs) && nonempty(rhs) {
                    return Some((lhs.trim(), m.as_str().to_uppercase(), rhs.trim()));
                }
            }
            None
        }
        OpClass::Not | OpClass::DefinedUnary => None,
    }
}

/// Match a unary operator of class `op` at the start of the line; returns
/// the uppercased operator and the operand text.
pub(crate) fn match_unary<'a>(line: &'a str, op: OpClass) -> Option<(String, &'a str)> {
    match op {
        OpClass::Add => {
            let c = line.as_bytes().first()?;
            if *c != b'+' && *c != b'-' {
                return None;
            }
            let rest = line[1..].trim_start();
            if rest.is_empty() {
                return None;
            }
            Some(((*c as char).to_string(), rest))
        }
        OpClass::Not => {
            let m = NOT_OP_PREFIX.find(line)?;
            let rest = line[m.end()..].trim_start();
            if rest.is_empty() {
                return None;
            }
            Some((m.as_str().to_uppercase(), rest))
        }
        OpClass::DefinedUnary => {
            let m = DEFINED_OP_PREFIX.find(line)?;
            if ABS_NON_DEFINED_BINARY_OP.is_match(m.as_str()) {
                return None;
            }
            let rest = line[m.end()..].trim_start();
            if rest.is_empty() {
                return None;
            }
            Some((m.as_str().to_uppercase(), rest))
        }
        _ => None,
    }
}

/// Match a keyword (or keyword phrase such as `BLOCK DATA`) at the start of
/// `line`, insensitive to case and to interior spacing. Returns the number
/// of bytes consumed. The character following the match must not be part of
/// a name.
pub(crate) fn match_keyword_prefix(line: &str, word: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0usize;
    for part in word.split_whitespace() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if line.len() < i + part.len() {
            return None;
        }
        if !line[i..i + part.len()].eq_ignore_ascii_case(part) {
            return None;
        }
        i += part.len();
    }
    if let Some(&c) = bytes.get(i) {
        if c.is_ascii_alphanumeric() || c == b'_' {
            return None;
        }
    }
    Some(i)
}
