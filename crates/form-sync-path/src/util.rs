use crate::types::{Path, Segment};
use crate::validate::{validate_path, validate_path_str, MAX_INDEX};
use crate::PathError;

/// Parse a path string into segments.
///
/// Accepted forms:
/// - `name` (simple path)
/// - `a.b.c` (object descent)
/// - `a[0].b`, `[0].b` (array indexing)
/// - `a["b.c"]`, `a['b']` (quoted keys, `\` escapes the quote character)
///
/// # Example
///
/// ```
/// use form_sync_path::{parse_path, Segment};
///
/// let path = parse_path("addresses[1].city").unwrap();
/// assert_eq!(
///     path.segments(),
///     &[Segment::key("addresses"), Segment::Index(1), Segment::key("city")]
/// );
/// ```
pub fn parse_path(input: &str) -> Result<Path, PathError> {
    if input.is_empty() {
        return Err(PathError::EmptyPath);
    }
    validate_path_str(input)?;

    let chars: Vec<char> = input.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;
    let mut require_key = false;

    loop {
        if require_key || chars.get(pos) != Some(&'[') {
            let start = pos;
            while pos < chars.len() && chars[pos] != '.' && chars[pos] != '[' {
                if chars[pos] == ']' {
                    return Err(PathError::UnexpectedChar(']'));
                }
                pos += 1;
            }
            if pos == start {
                return Err(PathError::EmptySegment);
            }
            segments.push(Segment::Key(chars[start..pos].iter().collect()));
        }

        while chars.get(pos) == Some(&'[') {
            let (segment, next) = parse_bracket(&chars, pos + 1)?;
            segments.push(segment);
            pos = next;
        }

        match chars.get(pos) {
            None => break,
            Some('.') => {
                pos += 1;
                require_key = true;
            }
            Some(&c) => return Err(PathError::UnexpectedChar(c)),
        }
    }

    validate_path(&segments)?;
    Ok(Path::new(segments))
}

/// Parse the inside of a `[...]` selector starting right after the `[`.
///
/// Returns the segment and the position just past the closing `]`.
fn parse_bracket(chars: &[char], mut pos: usize) -> Result<(Segment, usize), PathError> {
    match chars.get(pos) {
        None => Err(PathError::UnclosedBracket),
        Some(&quote) if quote == '"' || quote == '\'' => {
            pos += 1;
            let mut key = String::new();
            loop {
                match chars.get(pos) {
                    None => return Err(PathError::UnclosedBracket),
                    Some('\\') => {
                        let escaped = chars.get(pos + 1).ok_or(PathError::UnclosedBracket)?;
                        key.push(*escaped);
                        pos += 2;
                    }
                    Some(&c) if c == quote => {
                        pos += 1;
                        break;
                    }
                    Some(&c) => {
                        key.push(c);
                        pos += 1;
                    }
                }
            }
            match chars.get(pos) {
                Some(']') => Ok((Segment::Key(key), pos + 1)),
                Some(&c) => Err(PathError::UnexpectedChar(c)),
                None => Err(PathError::UnclosedBracket),
            }
        }
        Some(_) => {
            let start = pos;
            while pos < chars.len() && chars[pos] != ']' {
                pos += 1;
            }
            if pos == chars.len() {
                return Err(PathError::UnclosedBracket);
            }
            let digits: String = chars[start..pos].iter().collect();
            if !is_valid_index(&digits) {
                return Err(PathError::InvalidIndex);
            }
            let idx = digits
                .parse::<usize>()
                .ok()
                .filter(|idx| *idx <= MAX_INDEX)
                .ok_or(PathError::InvalidIndex)?;
            Ok((Segment::Index(idx), pos + 1))
        }
    }
}

/// Format segments into the canonical path string.
///
/// Keys that could not be read back as a bare identifier are written in
/// quoted bracket form.
///
/// # Example
///
/// ```
/// use form_sync_path::{format_path, Segment};
///
/// assert_eq!(format_path(&[]), "");
/// assert_eq!(
///     format_path(&[Segment::key("a"), Segment::Index(0), Segment::key("b.c")]),
///     r#"a[0]["b.c"]"#
/// );
/// ```
pub fn format_path(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Index(idx) => {
                out.push('[');
                out.push_str(&idx.to_string());
                out.push(']');
            }
            Segment::Key(key) if is_bare_key(key) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Key(key) => {
                out.push_str("[\"");
                out.push_str(&escape_key(key));
                out.push_str("\"]");
            }
        }
    }
    out
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', ']', '"', '\''])
}

fn escape_key(key: &str) -> String {
    if !key.contains(['"', '\\']) {
        return key.to_string();
    }
    key.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Check if a string is a canonical non-negative array index (no leading zeros).
///
/// # Example
///
/// ```
/// use form_sync_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("12"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a string consists only of ASCII digits.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}
