//! Comment and docstring removal.
//!
//! Stripping is line-oriented: every removed multi-line span is replaced by
//! the newlines it contained, so line numbers in the normalized text match
//! the input. String literals are not tokenized, which means a `#` or `//`
//! inside a string is treated as the start of a comment.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{Language, LanguageFamily};

lazy_static! {
    static ref TRIPLE_DOUBLE: Regex = Regex::new(r#"(?s)""".*?""""#).unwrap();
    static ref TRIPLE_SINGLE: Regex = Regex::new(r"(?s)'''.*?'''").unwrap();
    static ref HASH_COMMENT: Regex = Regex::new(r"(?m)#.*$").unwrap();
    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new(r"(?m)//.*$").unwrap();
}

/// Remove comments (and Python docstrings) from `code`.
pub fn strip_comments(code: &str, language: Language) -> String {
    match language.family() {
        LanguageFamily::Indentation => {
            let text = remove_spans(&TRIPLE_DOUBLE, code);
            let text = remove_spans(&TRIPLE_SINGLE, &text);
            HASH_COMMENT.replace_all(&text, "").into_owned()
        }
        LanguageFamily::Brace => {
            let text = remove_spans(&BLOCK_COMMENT, code);
            LINE_COMMENT.replace_all(&text, "").into_owned()
        }
    }
}

/// Replace every match with the newlines it spanned.
fn remove_spans(pattern: &Regex, text: &str) -> String {
    pattern
        .replace_all(text, |caps: &Captures| {
            "\n".repeat(caps[0].matches('\n').count())
        })
        .into_owned()
}
