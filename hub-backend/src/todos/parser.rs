//! todo.txt line parser
//!
//! Runs fixed passes over one line: completion marker, priority marker,
//! dates, then `@context` / `+project` tags. Everything left over becomes
//! `text`. Scanning is byte-based; every marker is ASCII so UTF-8 slices
//! always land on character boundaries.

use hub_types::Todo;
use std::ops::Range;

const COMPLETED_PREFIX: &str = "x ";
/// `YYYY-MM-DD`
const DATE_LEN: usize = 10;

/// Word characters in the ASCII sense: letters, digits, underscore
fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Match `(X) ` at the very start, returning the priority letter
fn priority_marker(s: &str) -> Option<char> {
    match s.as_bytes() {
        [b'(', letter, b')', b' ', ..] if letter.is_ascii_uppercase() => Some(*letter as char),
        _ => None,
    }
}

fn is_date_at(bytes: &[u8], start: usize) -> bool {
    let Some(candidate) = bytes.get(start..start + DATE_LEN) else {
        return false;
    };
    let shape_ok = candidate.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return false;
    }
    let bounded_left = start == 0 || !is_word(bytes[start - 1]);
    let bounded_right = bytes.get(start + DATE_LEN).is_none_or(|b| !is_word(*b));
    bounded_left && bounded_right
}

/// Leftmost, non-overlapping word-bounded dates
fn find_dates(s: &str) -> Vec<Range<usize>> {
    let bytes = s.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i + DATE_LEN <= bytes.len() {
        if is_date_at(bytes, i) {
            found.push(i..i + DATE_LEN);
            i += DATE_LEN;
        } else {
            i += 1;
        }
    }
    found
}

/// `sigil` followed by a word run, where the sigil itself is not glued to a
/// preceding word character
fn find_tags(s: &str, sigil: u8) -> Vec<Range<usize>> {
    let bytes = s.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let starts_tag = bytes[i] == sigil && (i == 0 || !is_word(bytes[i - 1]));
        if starts_tag {
            let run = bytes[i + 1..].iter().take_while(|b| is_word(**b)).count();
            if run > 0 {
                found.push(i..i + 1 + run);
                i += 1 + run;
                continue;
            }
        }
        i += 1;
    }
    found
}

/// Rebuild `s` with each range swapped for `with`
fn replace_ranges(s: &str, ranges: &[Range<usize>], with: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for range in ranges {
        out.push_str(&s[last..range.start]);
        out.push_str(with);
        last = range.end;
    }
    out.push_str(&s[last..]);
    out
}

fn slices(s: &str, ranges: &[Range<usize>]) -> Vec<String> {
    ranges.iter().map(|r| s[r.clone()].to_string()).collect()
}

/// Parse a single non-blank todo.txt line
pub fn parse_line(line: &str) -> Todo {
    let mut todo = Todo {
        raw: line.to_string(),
        ..Default::default()
    };
    let mut rest = line.trim();

    if let Some(stripped) = rest.strip_prefix(COMPLETED_PREFIX) {
        todo.completed = true;
        rest = stripped;
    }

    if let Some(letter) = priority_marker(rest) {
        todo.priority = Some(letter);
        rest = &rest[4..];
    }

    let mut dates = slices(rest, &find_dates(rest)).into_iter();
    if todo.completed {
        todo.completion_date = dates.next();
        todo.creation_date = dates.next();
    } else {
        todo.creation_date = dates.next();
    }

    todo.contexts = slices(rest, &find_tags(rest, b'@'));
    todo.projects = slices(rest, &find_tags(rest, b'+'));

    // Cleanup re-scans the string after every pass; removals can shift what
    // a later pass sees.
    let mut text = match priority_marker(rest) {
        Some(_) => rest[4..].to_string(),
        None => rest.to_string(),
    };
    text = replace_ranges(&text, &find_dates(&text), " ");
    text = replace_ranges(&text, &find_tags(&text, b'@'), "");
    text = replace_ranges(&text, &find_tags(&text, b'+'), "");
    todo.text = text.trim().to_string();

    todo
}
