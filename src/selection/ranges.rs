//! Page range parsing.
//!
//! Users describe the pages they want with text such as `"1-3, 5, 7-9"`.
//! Parsing is lenient: a token that is malformed or falls outside the
//! document is dropped on its own and never fails the rest of the input.
//!
//! Supported tokens:
//! - `"5"` - single page
//! - `"1-5"` - range of pages (inclusive)
//! - `"1-3, 5, 7-9"` - any combination, separated by commas

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use tracing::trace;

/// One comma-separated unit of page range input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    /// A single 1-indexed page.
    Single(u32),
    /// An inclusive range of 1-indexed pages, start never after end.
    Span(u32, u32),
}

impl RangeToken {
    /// Parse one token, already split on commas.
    ///
    /// Returns `None` for empty tokens, non-numeric parts, page zero, values
    /// that overflow `u32`, more than one hyphen, and ranges whose start is
    /// after their end.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfpick::selection::RangeToken;
    ///
    /// assert_eq!(RangeToken::parse(" 2 - 4 "), Some(RangeToken::Span(2, 4)));
    /// assert_eq!(RangeToken::parse("7"), Some(RangeToken::Single(7)));
    /// assert_eq!(RangeToken::parse("4-2"), None);
    /// ```
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();

        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;
                (start <= end).then_some(Self::Span(start, end))
            }
            None => parse_page_number(token).map(Self::Single),
        }
    }

    /// Pages covered by this token, if all of them exist in a document with
    /// `page_count` pages.
    pub fn pages(&self, page_count: u32) -> Option<RangeInclusive<u32>> {
        let (start, end) = match *self {
            Self::Single(page) => (page, page),
            Self::Span(start, end) => (start, end),
        };

        (end <= page_count).then_some(start..=end)
    }
}

/// Parse a positive page number made only of ASCII digits.
fn parse_page_number(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    s.parse::<u32>().ok().filter(|&page| page > 0)
}

/// Parse page range text into an ascending list of distinct pages.
///
/// Every token that is well formed and lies within `1..=page_count`
/// contributes its pages; every other token is ignored. Empty or fully
/// invalid input yields an empty list. Defaulting to "all pages" is left to
/// the caller.
///
/// # Examples
///
/// ```
/// use pdfpick::selection::parse_ranges;
///
/// assert_eq!(parse_ranges("5, 1-3", 10), vec![1, 2, 3, 5]);
/// assert_eq!(parse_ranges("1-3, 2-4", 10), vec![1, 2, 3, 4]);
/// assert_eq!(parse_ranges("8-12, x, 0", 10), Vec::<u32>::new());
/// ```
pub fn parse_ranges(text: &str, page_count: u32) -> Vec<u32> {
    let mut pages = BTreeSet::new();

    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match RangeToken::parse(part).and_then(|token| token.pages(page_count)) {
            Some(range) => pages.extend(range),
            None => trace!(token = part, page_count, "ignoring page range token"),
        }
    }

    pages.into_iter().collect()
}

/// Render ascending pages back into compact range text.
///
/// Consecutive runs collapse into `A-B`; the output parses back to the same
/// pages.
///
/// ```
/// use pdfpick::selection::format_ranges;
///
/// assert_eq!(format_ranges(&[1, 2, 3, 5, 7, 8]), "1-3, 5, 7-8");
/// ```
pub fn format_ranges(pages: &[u32]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut iter = pages.iter().copied();

    let Some(first) = iter.next() else {
        return String::new();
    };

    let (mut start, mut end) = (first, first);
    for page in iter {
        if end.checked_add(1) == Some(page) {
            end = page;
            continue;
        }
        parts.push(format_run(start, end));
        start = page;
        end = page;
    }
    parts.push(format_run(start, end));

    parts.join(", ")
}

fn format_run(start: u32, end: u32) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}
