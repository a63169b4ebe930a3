//! Brace-depth scanner for C, C++ and unrecognized languages.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{
    EngineConfig, FrameStack, FunctionRecord, LanguageFamily, LoopHeader, LoopKind,
    ScopeScanner, ScopeSignals,
};

lazy_static! {
    static ref LOOP_KEYWORD: Regex = Regex::new(r"^(for|while)\s*\(").unwrap();
    static ref CONSTANT_CONDITION: Regex =
        Regex::new(r"^\s*[A-Za-z_]\w*\s*<=?\s*(\d+)\s*$").unwrap();
    static ref ASSIGNED_VARIABLE: Regex = Regex::new(r"([A-Za-z_]\w*)\s*=[^=]").unwrap();
    static ref DECLARED_VARIABLE: Regex = Regex::new(r"([A-Za-z_]\w*)\s*$").unwrap();
    static ref MEMBERSHIP: Regex = Regex::new(r"\.(count|find)\s*\(").unwrap();

    /// Declarations whose return type is one of the common keywords.
    static ref FUNCTION_DECLARATION: Regex = Regex::new(
        r"(?m)(?:^|[\s;{}])(?:(?:static|inline|virtual|constexpr|const)\s+)*(?:std::)?(?:(?:unsigned|signed|long|short)\s+)*(?:void|int|long|short|unsigned|bool|char|float|double|auto|string|size_t|vector\s*<[^;{}()]*>|ListNode|TreeNode|Node)(?:\s*[*&]+\s*|\s+)(?:[A-Za-z_]\w*::)?([A-Za-z_]\w*)\s*\("
    ).unwrap();
}

/// Words that look like function names to the declaration pattern but are not.
const NOT_FUNCTION_NAMES: &[&str] = &[
    "if", "for", "while", "switch", "return", "sizeof", "catch", "else", "do",
];

/// Scanner for brace-delimited code.
pub struct CFamilyScanner;

impl CFamilyScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CFamilyScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeScanner for CFamilyScanner {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Brace
    }

    fn scan_scopes(&self, text: &str, config: &EngineConfig) -> ScopeSignals {
        let mut stack = FrameStack::new(config);
        let mut depth: usize = 0;
        // Loop header whose parenthesis is still open at the end of a line.
        let mut open_header: Option<String> = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let header_text = match open_header.take() {
                Some(mut joined) => {
                    joined.push(' ');
                    joined.push_str(trimmed);
                    Some(joined)
                }
                None => {
                    // A brace-less header from the previous line owns this line as its body.
                    if let Some(top) = stack.top_mut() {
                        top.pending = false;
                    }
                    LOOP_KEYWORD.is_match(trimmed).then(|| trimmed.to_string())
                }
            };

            if let Some(header_text) = header_text {
                if closing_paren(&header_text).is_none() {
                    open_header = Some(header_text);
                    continue;
                }
                let header = parse_loop_header(&header_text, config.constant_bound_limit);
                let pending = !header_text.contains('{') && !header_text.ends_with(';');
                stack.push(header, depth, pending);
            }

            let opens = trimmed.matches('{').count();
            let closes = trimmed.matches('}').count();
            depth = (depth + opens).saturating_sub(closes);

            stack.pop_while(|frame| !frame.pending && frame.level >= depth);
        }

        stack.finish()
    }

    fn function_body(&self, text: &str, name: &str) -> Option<FunctionRecord> {
        let header = Regex::new(&format!(
            r"\b[A-Za-z_][\w:]*(?:<[^;{{}}()]*>)?[\s*&]+(?:[A-Za-z_]\w*::)?{}\s*\([^;{{}}]*\)\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?\{{",
            regex::escape(name)
        ))
        .ok()?;
        let found = header.find(text)?;

        let body = balanced_body(&text[found.end()..])?;
        Some(FunctionRecord {
            name: name.to_string(),
            body: body.to_string(),
        })
    }

    fn function_names(&self, text: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in FUNCTION_DECLARATION.captures_iter(text) {
            let name = &caps[1];
            if NOT_FUNCTION_NAMES.contains(&name) || names.iter().any(|n| n == name) {
                continue;
            }
            names.push(name.to_string());
        }
        names
    }
}

/// Return the text up to the brace that closes an already-open block.
///
/// `rest` starts just after the opening `{`. Returns `None` if the block
/// never closes.
fn balanced_body(rest: &str) -> Option<&str> {
    let mut depth: usize = 1;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..idx]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte offsets of the parenthesis after the loop keyword and of its match.
fn closing_paren(header: &str) -> Option<(usize, usize)> {
    let open = header.find('(')?;
    let mut depth: usize = 0;
    for (idx, ch) in header[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((open, open + idx));
                }
            }
            _ => {}
        }
    }
    None
}

/// Text between the parenthesis after the keyword and its matching close.
///
/// An unclosed header yields everything after `(`.
fn header_clause(header: &str) -> &str {
    match closing_paren(header) {
        Some((open, close)) => &header[open + 1..close],
        None => header.find('(').map(|open| &header[open + 1..]).unwrap_or(""),
    }
}

/// Byte offset of a `:` that is not part of `::`.
fn range_colon(clause: &str) -> Option<usize> {
    let bytes = clause.as_bytes();
    (0..bytes.len()).find(|&i| {
        bytes[i] == b':'
            && (i == 0 || bytes[i - 1] != b':')
            && (i + 1 >= bytes.len() || bytes[i + 1] != b':')
    })
}

fn parse_loop_header(header: &str, constant_bound_limit: u64) -> LoopHeader {
    let clause = header_clause(header);

    if header.starts_with("while") {
        return LoopHeader {
            tests_membership: MEMBERSHIP.is_match(clause),
            condition: Some(clause.trim().to_string()),
            ..LoopHeader::new(LoopKind::While)
        };
    }

    if !clause.contains(';') {
        // Range-based `for (decl : expr)`.
        let mut header = LoopHeader::new(LoopKind::For);
        if let Some(colon) = range_colon(clause) {
            let decl = clause[..colon].trim_end_matches(|c: char| c.is_whitespace());
            header.iteration_variable = DECLARED_VARIABLE
                .captures(decl)
                .map(|c| c[1].to_string());
            header.iterable = Some(clause[colon + 1..].trim().to_string());
        }
        return header;
    }

    let mut parts = clause.splitn(3, ';');
    let init = parts.next().unwrap_or("");
    let condition = parts.next().unwrap_or("");

    let is_constant_bound = CONSTANT_CONDITION
        .captures(condition)
        .and_then(|c| c[1].parse::<u64>().ok())
        .map(|k| k <= constant_bound_limit)
        .unwrap_or(false);

    LoopHeader {
        iteration_variable: ASSIGNED_VARIABLE
            .captures(init)
            .map(|c| c[1].to_string()),
        is_constant_bound,
        ..LoopHeader::new(LoopKind::For)
    }
}
