//! Raw store records to canonical values.
//!
//! Both normalizers share the same text discipline: NFC, lowercase, collapsed
//! whitespace, comma-separated lists split into sets, free text tokenized on
//! anything that is not alphanumeric (`+` and `#` are kept so `c++` and `c#`
//! survive).

pub mod fields;
pub mod job;
pub mod profile;

use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

pub use job::JobNormalizer;
pub use profile::ProfileNormalizer;

/// Tokens shorter than this are dropped from free text
pub const MIN_TOKEN_LENGTH: usize = 2;

/// Articles, prepositions and conjunctions (English and French) that would
/// otherwise produce spurious bio/description matches.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "into", "of", "on", "or", "over",
    "the", "to", "with", "au", "aux", "avec", "dans", "de", "des", "du", "en", "et", "la", "le",
    "les", "par", "pour", "sur", "un", "une",
];

/// NFC, lowercase, trimmed, inner whitespace collapsed to single spaces
pub fn canonical(text: &str) -> String {
    text.nfc()
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a comma-separated field into canonical, non-empty items
pub fn split_list(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(',')
        .map(canonical)
        .filter(|item| !item.is_empty())
}

pub(crate) fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Word tokens of `text` without stop words or tokens under [`MIN_TOKEN_LENGTH`] chars
pub fn tokenize(text: &str) -> BTreeSet<String> {
    canonical(text)
        .split(|c: char| !is_token_char(c))
        .filter(|token| token.chars().count() >= MIN_TOKEN_LENGTH)
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}
