//! Pre-release tag ordering
//!
//! Tags are compared identifier by identifier (dot separated). Numeric identifiers
//! compare by value and always order before alphanumeric ones, which compare by
//! ASCII order. A tag that runs out of identifiers first orders lower.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Identifier<'a> {
    Numeric(&'a str),
    Lexical(&'a str),
}

impl<'a> Identifier<'a> {
    fn classify(token: &'a str) -> Self {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            Identifier::Numeric(token)
        } else {
            Identifier::Lexical(token)
        }
    }
}

impl Ord for Identifier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => compare_numeric(a, b),
            (Identifier::Numeric(_), Identifier::Lexical(_)) => Ordering::Less,
            (Identifier::Lexical(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::Lexical(a), Identifier::Lexical(b)) => a.cmp(b),
        }
    }
}

impl PartialEq for Identifier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Identifier<'_> {}

impl PartialOrd for Identifier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare digit strings by value without overflowing on long identifiers
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Non-empty identifiers of a tag; `alpha..1` yields `alpha`, `1`
fn identifiers(tag: &str) -> impl Iterator<Item = Identifier<'_>> {
    tag.split('.')
        .filter(|token| !token.is_empty())
        .map(Identifier::classify)
}

/// Order two pre-release tags
pub fn compare_pre_release(actual: &str, expected: &str) -> Ordering {
    identifiers(actual).cmp(identifiers(expected))
}
