//! Field specifier scanner.
//!
//! An ADIF field is written `<TAG:LEN[:TYPE]>VALUE`. The scanner finds the
//! left-most such unit at or after a cursor and reports where the next scan
//! has to resume. It works on an immutable `&str` with explicit byte
//! offsets; nothing is copied except the upper-cased tag.
//!
//! # Length recovery
//!
//! `LEN` counts characters. Some loggers count bytes instead (or simply get
//! it wrong), so a declared length larger than the text available before the
//! next `<` is clamped to what is there. The resume position is always the
//! end of the *consumed* value, never the end of the trailing text run, so
//! text after a short value is rescanned rather than swallowed.

use std::ops::Range;

use memchr::memchr_iter;
use unicode_xid::UnicodeXID;

/// One `<TAG:LEN[:TYPE]>VALUE` unit found in a buffer.
///
/// Borrows the value from the scanned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpecifier<'a> {
    /// Tag, upper-cased.
    pub tag: String,
    /// Length as written in the specifier.
    pub declared_len: usize,
    /// Effective length in characters, `min(declared_len, available)`.
    pub len: usize,
    /// Optional one-character data type indicator (`:D`, `:N`, ...).
    pub type_code: Option<char>,
    /// The value text.
    pub value: &'a str,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset immediately after the consumed value.
    pub resume: usize,
}

impl FieldSpecifier<'_> {
    /// True if the declared length overran the available text.
    #[inline]
    pub fn is_clamped(&self) -> bool {
        self.len < self.declared_len
    }
}

/// Scan `buf` for the next field specifier starting at byte offset `from`.
///
/// Returns `None` when no well-formed specifier remains. A `<` that does not
/// open a valid specifier is skipped, the search continues at the next `<`.
pub fn scan(buf: &str, from: usize) -> Option<FieldSpecifier<'_>> {
    let from = from.min(buf.len());
    memchr_iter(b'<', &buf.as_bytes()[from..]).find_map(|offset| scan_at(buf, from + offset))
}

/// Try to read a specifier whose `<` sits at byte offset `start`.
fn scan_at(buf: &str, start: usize) -> Option<FieldSpecifier<'_>> {
    let rest = &buf[start + 1..];

    let tag_len = word_len(rest);
    if tag_len == 0 {
        return None;
    }
    let tag = &rest[..tag_len];

    let rest = rest[tag_len..].strip_prefix(':')?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let declared_len = parse_len(&rest[..digits]);
    let rest = &rest[digits..];

    let (type_code, rest) = match rest.strip_prefix(':') {
        Some(typed) => {
            let mut chars = typed.chars();
            let code = chars.next().filter(|&c| is_word_char(c))?;
            (Some(code), chars.as_str().strip_prefix('>')?)
        }
        None => (None, rest.strip_prefix('>')?),
    };

    let value_start = buf.len() - rest.len();
    let run = match memchr::memchr(b'<', rest.as_bytes()) {
        Some(end) => &rest[..end],
        None => rest,
    };
    let (value, len) = take_chars(run, declared_len);

    Some(FieldSpecifier {
        tag: tag.to_uppercase(),
        declared_len,
        len,
        type_code,
        value,
        start,
        resume: value_start + value.len(),
    })
}

/// Byte length of the leading run of word characters.
fn word_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(s.len(), |(i, _)| i)
}

#[inline]
fn is_word_char(c: char) -> bool {
    c == '_' || c.is_xid_continue()
}

/// Decimal digits to a length, saturating instead of overflowing.
fn parse_len(digits: &str) -> usize {
    digits
        .bytes()
        .fold(0usize, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as usize))
}

/// Take up to `n` characters from `run`, returning the slice and its
/// character count.
fn take_chars(run: &str, n: usize) -> (&str, usize) {
    match run.char_indices().nth(n) {
        Some((end, _)) => (&run[..end], n),
        None => (run, run.chars().count()),
    }
}

/// Bare, argument-free markers that delimit the header and the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `<EOH>` - end of the header block.
    EndOfHeader,
    /// `<EOR>` - end of one record.
    EndOfRecord,
}

impl Marker {
    /// Marker name without the angle brackets.
    pub fn name(self) -> &'static str {
        match self {
            Self::EndOfHeader => "EOH",
            Self::EndOfRecord => "EOR",
        }
    }

    /// Find the first occurrence of this marker at or after `from`,
    /// case-insensitively. Returns the byte range of `<NAME>`.
    pub fn find(self, buf: &str, from: usize) -> Option<Range<usize>> {
        let bytes = buf.as_bytes();
        let from = from.min(bytes.len());
        let name = self.name().as_bytes();
        let width = name.len() + 2;

        memchr_iter(b'<', &bytes[from..])
            .map(|offset| from + offset)
            .find(|&start| {
                bytes.get(start + 1..start + 1 + name.len()).is_some_and(|n| n.eq_ignore_ascii_case(name))
                    && bytes.get(start + width - 1) == Some(&b'>')
            })
            .map(|start| start..start + width)
    }

    /// True if the marker occurs anywhere at or after `from`.
    #[inline]
    pub fn is_in(self, buf: &str, from: usize) -> bool {
        self.find(buf, from).is_some()
    }
}
