//! Indentation-based scanner for Python.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{
    EngineConfig, FrameStack, FunctionRecord, LanguageFamily, LoopHeader, LoopKind,
    ScopeScanner, ScopeSignals,
};

lazy_static! {
    static ref LOOP_KEYWORD: Regex = Regex::new(r"^(for|while)\b").unwrap();
    static ref FOR_HEADER: Regex = Regex::new(r"^for\s+(.+?)\s+in\s+(.+?)\s*:$").unwrap();
    static ref CONSTANT_RANGE: Regex =
        Regex::new(r"^for\s+[A-Za-z_]\w*\s+in\s+range\(\s*(\d+)\s*\)\s*:$").unwrap();
    static ref WHILE_HEADER: Regex = Regex::new(r"^while\b\s*(.+?)\s*:$").unwrap();
    static ref SIMPLE_IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_]\w*$").unwrap();
    static ref MEMBERSHIP: Regex = Regex::new(r"\bin\b").unwrap();
    static ref DEF_NAME: Regex = Regex::new(r"\bdef\s+([A-Za-z_]\w*)\s*\(").unwrap();
}

/// Scanner for indentation-delimited code.
pub struct PythonScanner;

impl PythonScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PythonScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeScanner for PythonScanner {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Indentation
    }

    fn scan_scopes(&self, text: &str, config: &EngineConfig) -> ScopeSignals {
        let mut stack = FrameStack::new(config);

        for line in text.lines() {
            let stripped = line.trim_end();
            let trimmed = stripped.trim_start();
            if trimmed.is_empty() {
                continue;
            }

            let indent = indentation(stripped);
            stack.pop_while(|frame| frame.level >= indent);

            if !LOOP_KEYWORD.is_match(trimmed) || !trimmed.ends_with(':') {
                continue;
            }
            if let Some(header) = parse_loop_header(trimmed, config.constant_bound_limit) {
                stack.push(header, indent, false);
            }
        }

        stack.finish()
    }

    fn function_body(&self, text: &str, name: &str) -> Option<FunctionRecord> {
        let header = Regex::new(&format!(
            r"def\s+{}\s*\([^)]*\)[^:]*:",
            regex::escape(name)
        ))
        .ok()?;
        let found = header.find(text)?;

        let mut body_indent: Option<usize> = None;
        let mut body_lines: Vec<&str> = Vec::new();

        // The first segment is the remainder of the header line.
        for line in text[found.end()..].split('\n').skip(1) {
            let stripped = line.trim_end();
            if stripped.trim_start().is_empty() {
                body_lines.push(stripped);
                continue;
            }
            let indent = indentation(stripped);
            let required = *body_indent.get_or_insert(indent);
            if indent < required {
                break;
            }
            body_lines.push(stripped);
        }

        Some(FunctionRecord {
            name: name.to_string(),
            body: body_lines.join("\n"),
        })
    }

    fn function_names(&self, text: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in DEF_NAME.captures_iter(text) {
            let name = &caps[1];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Parse a trimmed `for ...:` / `while ...:` header.
fn parse_loop_header(trimmed: &str, constant_bound_limit: u64) -> Option<LoopHeader> {
    if let Some(caps) = FOR_HEADER.captures(trimmed) {
        let target = caps[1].trim();
        let is_constant_bound = CONSTANT_RANGE
            .captures(trimmed)
            .and_then(|c| c[1].parse::<u64>().ok())
            .map(|k| k <= constant_bound_limit)
            .unwrap_or(false);

        return Some(LoopHeader {
            iteration_variable: SIMPLE_IDENTIFIER
                .is_match(target)
                .then(|| target.to_string()),
            iterable: Some(caps[2].trim().to_string()),
            is_constant_bound,
            ..LoopHeader::new(LoopKind::For)
        });
    }

    if let Some(caps) = WHILE_HEADER.captures(trimmed) {
        let condition = caps[1].trim().to_string();
        return Some(LoopHeader {
            tests_membership: MEMBERSHIP.is_match(&condition),
            condition: Some(condition),
            ..LoopHeader::new(LoopKind::While)
        });
    }

    // `for` header without a recognizable `in` clause still counts as a loop.
    Some(LoopHeader::new(if trimmed.starts_with("for") {
        LoopKind::For
    } else {
        LoopKind::While
    }))
}
