//! Parser for the flat `key=value` properties format used by filter files.
//!
//! Follows the usual properties-file rules: `#` and `!` comment lines, `=`, `:`
//! or whitespace as key terminator, backslash line continuation and the
//! `\t \n \r \f \uXXXX` escapes. Keys and values are trimmed.

use indexmap::IndexMap;

/// A parse failure with the 1-based line where the offending entry starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Parses properties text into an ordered map.
///
/// A key that appears twice keeps its first position and its last value.
pub fn parse_properties(content: &str) -> Result<IndexMap<String, String>, ParseError> {
    let mut properties = IndexMap::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let key = unescape(key).map_err(|message| ParseError { line: index + 1, message })?;
        let value = unescape(value).map_err(|message| ParseError { line: index + 1, message })?;
        properties.insert(key, value);
    }
    Ok(properties)
}

/// Splits a logical line at the first unescaped `=`, `:` or blank.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(&['=', ':'][..]) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

/// Resolves escapes and drops trailing unescaped blanks.
fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    // Length of `out` up to the last character that must survive trimming.
    let mut significant = 0;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            if !is_blank(c) {
                significant = out.len();
            }
            continue;
        }
        let escaped = match chars.next() {
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\x0c',
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("malformed \\uxxxx escape '\\u{hex}'"))?
            }
            Some(other) => other,
            None => break,
        };
        out.push(escaped);
        significant = out.len();
    }

    out.truncate(significant);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_entries() {
        let props = parse_properties(
            "# comment\n! also comment\n\nhost = a.example.com\nport:8080\nname value with spaces  \n",
        )
        .unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props["host"], "a.example.com");
        assert_eq!(props["port"], "8080");
        assert_eq!(props["name"], "value with spaces");
    }

    #[test]
    fn test_order_and_duplicates() {
        let props = parse_properties("b=1\na=2\nb=3\n").unwrap();
        let keys: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(props["b"], "3");
    }

    #[test]
    fn test_continuation() {
        let props = parse_properties("list = one, \\\n        two, \\\n        three\nnext=x\n").unwrap();
        assert_eq!(props["list"], "one, two, three");
        assert_eq!(props["next"], "x");

        // An escaped backslash does not continue the line.
        let props = parse_properties("path=C:\\\\\nother=y\n").unwrap();
        assert_eq!(props["path"], "C:\\");
        assert_eq!(props["other"], "y");
    }

    #[test]
    fn test_escapes() {
        let props = parse_properties("key\\=with\\:sep = tab\\there\\u0041\\ \nempty=\n").unwrap();
        assert_eq!(props["key=with:sep"], "tab\there\u{41} ");
        assert_eq!(props["empty"], "");
    }

    #[test]
    fn test_crlf() {
        let props = parse_properties("a=1\r\nb=2\r\n").unwrap();
        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = parse_properties("ok=1\nbad=\\u12G4\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("\\u12G4"));
    }
}
