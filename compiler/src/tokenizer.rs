//! Cursor primitives over an immutable byte buffer.
//!
//! Every function takes the whole buffer plus a position and returns the
//! advanced position, or `None` when nothing matched. None of them read past
//! `buf.len()`, and none of them hold state between calls.

use crate::types::StringLiteral;

pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Advances past ASCII whitespace.
pub fn skip_whitespace(buf: &[u8], pos: usize) -> usize {
    let mut p = pos.min(buf.len());
    while p < buf.len() && buf[p].is_ascii_whitespace() {
        p += 1;
    }
    p
}

/// Matches one `// ...` or `/* ... */` comment after optional whitespace.
pub fn comment(buf: &[u8], pos: usize) -> Option<usize> {
    let p = skip_whitespace(buf, pos);
    let rest = &buf[p..];
    if rest.starts_with(b"//") {
        let end = rest
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(rest.len());
        return Some(p + end);
    }
    if rest.starts_with(b"/*") {
        let body = &rest[2..];
        let close = body.windows(2).position(|w| w == b"*/")?;
        return Some(p + 2 + close + 2);
    }
    None
}

/// Skips zero or more comments. Comments carry nothing, so they are dropped.
pub fn skip_comments(buf: &[u8], pos: usize) -> usize {
    let mut p = pos;
    while let Some(next) = comment(buf, p) {
        p = next;
    }
    p
}

/// Skips whitespace, then matches `token` byte for byte.
pub fn eat(buf: &[u8], pos: usize, token: &str) -> Option<usize> {
    let p = skip_whitespace(buf, pos);
    let end = p.checked_add(token.len())?;
    if end <= buf.len() && &buf[p..end] == token.as_bytes() {
        Some(end)
    } else {
        None
    }
}

/// Like [`eat`], but the keyword must not run on into an identifier.
pub fn eat_keyword(buf: &[u8], pos: usize, keyword: &str) -> Option<usize> {
    let end = eat(buf, pos, keyword)?;
    match buf.get(end) {
        Some(&b) if is_ident_byte(b) => None,
        _ => Some(end),
    }
}

/// Raw identifier text without reserved-word escaping.
pub fn raw_ident(buf: &[u8], pos: usize) -> Option<(&str, usize)> {
    let start = skip_whitespace(buf, pos);
    if !buf.get(start).copied().is_some_and(is_ident_start) {
        return None;
    }
    let mut end = start + 1;
    while end < buf.len() && is_ident_byte(buf[end]) {
        end += 1;
    }
    // Only ASCII bytes were consumed.
    let text = std::str::from_utf8(&buf[start..end]).ok()?;
    Some((text, end))
}

/// A bare literal value: numbers, `true`/`false`, enum case names.
pub fn value_token(buf: &[u8], pos: usize) -> Option<(&str, usize)> {
    let start = skip_whitespace(buf, pos);
    let mut end = start;
    while end < buf.len()
        && (is_ident_byte(buf[end]) || matches!(buf[end], b'.' | b'+' | b'-'))
    {
        end += 1;
    }
    if end == start {
        return None;
    }
    let text = std::str::from_utf8(&buf[start..end]).ok()?;
    Some((text, end))
}

/// `"..."`; a backslash protects the byte after it.
pub fn string_literal(buf: &[u8], pos: usize) -> Option<(StringLiteral, usize)> {
    let open = eat(buf, pos, "\"")?;
    let mut p = open;
    while p < buf.len() {
        match buf[p] {
            b'"' => {
                let value = std::str::from_utf8(&buf[open..p]).ok()?.to_string();
                return Some((StringLiteral { value }, p + 1));
            }
            b'\\' => p += 2,
            _ => p += 1,
        }
    }
    None
}
