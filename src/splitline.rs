//! Replaces character literals and balanced parenthesized groups in a line
//! with opaque name-like tokens so that top-level punctuation (commas, `::`,
//! `=`, `=>`, `/../`, operators) can be located without being fooled by
//! nested content.

use std::collections::HashMap;

/// The restore side of [string_replace_map]: maps each opaque token back to
/// the original text it replaced. `restore` is a left inverse on any
/// substring of the rewritten line that lies on token boundaries.
#[derive(Debug, Clone, Default)]
pub struct ReplaceMap {
    map: HashMap<String, String>,
}

impl ReplaceMap {
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Substitute every opaque token occurring in `text` by its original.
    /// Originals of parenthesized groups may themselves contain string
    /// tokens, so substitution repeats until the text is stable.
    pub fn restore(&self, text: &str) -> String {
        if self.map.is_empty() {
            return text.to_string();
        }
        let mut out = text.to_string();
        loop {
            let mut changed = false;
            for (key, original) in &self.map {
                if out.contains(key.as_str()) {
                    out = out.replace(key.as_str(), original);
                    changed = true;
                }
            }
            if !changed {
                return out;
            }
        }
    }
}

/// Rewrite `line` so that every character literal and every balanced
/// parenthesized group is replaced by an opaque token, and return the
/// rewritten line together with the [ReplaceMap] that restores originals.
///
/// String tokens keep their surrounding quotes and group tokens keep their
/// surrounding parentheses, so the rewritten line still has the shape the
/// terminal patterns expect.
pub fn string_replace_map(line: &str) -> (String, ReplaceMap) {
    let mut map = ReplaceMap::default();
    let mut counter = 0usize;

    // pass 1: character literals
    let mut mapped = String::with_capacity(line.len());
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' || c == '"' {
            let quote = c;
            let start = i;
            i += 1;
            loop {
                if i >= chars.len() {
                    // unterminated literal; leave the tail untouched
                    break;
                }
                if chars[i] == quote {
                    if chars.get(i + 1) == Some(&quote) {
                        i += 2;
                        continue;
                    }
                    i += 1;
                    break;
                }
                i += 1;
            }
            let original: String = chars[start..i].iter().collect();
            let inner: String = original
                .chars()
                .skip(1)
                .take(original.chars().count().saturating_sub(2))
                .collect();
            if inner.is_empty() {
                mapped.push_str(&original);
            } else {
                counter += 1;
                let key = format!("{0}FPT_STRING_CONSTANT_{1}_{0}", quote, counter);
                map.map.insert(key.clone(), original);
                mapped.push_str(&key);
            }
        } else {
            mapped.push(c);
            i += 1;
        }
    }

    // pass 2: balanced top-level parenthesized groups
    let bytes: Vec<char> = mapped.chars().collect();
    let mut out = String::with_capacity(mapped.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == '(' {
            let mut depth = 1usize;
            let mut j = i + 1;
            while j < bytes.len() && depth > 0 {
                match bytes[j] {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }
            if depth == 0 {
                let inner: String = bytes[i + 1..j - 1].iter().collect();
                if inner.is_empty() {
                    out.push_str("()");
                } else {
                    counter += 1;
                    let key = format!("FPT_EXPR_GROUP_{}_", counter);
                    map.map.insert(key.clone(), inner);
                    out.push('(');
                    out.push_str(&key);
                    out.push(')');
                }
                i = j;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    (out, map)
}

#[cfg(test)]
mod tests {
    use super::string_replace_map;

    #[test]
    fn strings_are_hidden() {
        let (line, repmap) = string_replace_map("a = 'x ! y' // b");
        assert!(!line.contains('!'));
        assert_eq!(repmap.restore(&line), "a = 'x ! y' // b");
    }

    #[test]
    fn groups_are_hidden() {
        let (line, repmap) = string_replace_map("f(a, g(b, c)) + h(d)");
        assert_eq!(line.matches('(').count(), 2);
        assert!(!line.contains("a,"));
        assert_eq!(repmap.restore(&line), "f(a, g(b, c)) + h(d)");
    }

    #[test]
    fn doubled_quotes_stay_in_one_literal() {
        let (line, repmap) = string_replace_map("'don''t' // x");
        assert!(line.starts_with('\''));
        assert_eq!(repmap.restore(&line), "'don''t' // x");
    }

    #[test]
    fn restore_is_identity_without_tokens() {
        let (line, repmap) = string_replace_map("i = i + 1");
        assert_eq!(line, "i = i + 1");
        assert!(repmap.is_empty());
    }
}
