//! Self-recursion detection over extracted function bodies.

use regex::Regex;
use serde::Serialize;

use super::ScopeScanner;

/// Recursion facts for one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecursionSignals {
    /// Some function calls itself.
    pub detected: bool,
    /// Most self-call sites found in any single function body.
    pub max_self_calls: usize,
    /// Names of the self-referential functions, in declaration order.
    pub recursive_functions: Vec<String>,
}

/// Collect recursion facts for every declared function.
pub fn analyze_recursion(text: &str, scanner: &dyn ScopeScanner) -> RecursionSignals {
    let mut signals = RecursionSignals::default();

    for name in scanner.function_names(text) {
        let Some(record) = scanner.function_body(text, &name) else {
            continue;
        };
        let calls = count_self_calls(&record.body, &name);
        if calls > 0 {
            signals.detected = true;
            signals.recursive_functions.push(name);
        }
        signals.max_self_calls = signals.max_self_calls.max(calls);
    }

    signals
}

/// Whether any declared function references itself.
pub fn detect_recursion(text: &str, scanner: &dyn ScopeScanner) -> bool {
    scanner.function_names(text).iter().any(|name| {
        scanner
            .function_body(text, name)
            .map(|record| count_self_calls(&record.body, name) > 0)
            .unwrap_or(false)
    })
}

/// Maximum number of self-call sites in any one function body.
pub fn count_recursive_calls(text: &str, scanner: &dyn ScopeScanner) -> usize {
    scanner
        .function_names(text)
        .iter()
        .filter_map(|name| {
            scanner
                .function_body(text, name)
                .map(|record| count_self_calls(&record.body, name))
        })
        .max()
        .unwrap_or(0)
}

/// Receivers through which a method may call itself.
const SELF_RECEIVERS: &[&str] = &["self.", "cls.", "this->", "this."];

/// Count `name(` call sites in `body`.
///
/// A call through another object (`self.items.append(`, `v.size()`) is not
/// a self-call.
fn count_self_calls(body: &str, name: &str) -> usize {
    let Ok(call) = Regex::new(&format!(r"\b{}\s*\(", regex::escape(name))) else {
        return 0;
    };
    call.find_iter(body)
        .filter(|m| is_self_receiver(&body[..m.start()]))
        .count()
}

/// Whether the text before a call site leaves it unqualified or qualified by
/// the enclosing object.
fn is_self_receiver(before: &str) -> bool {
    let before = before.trim_end();
    if !before.ends_with('.') && !before.ends_with("->") {
        return true;
    }
    SELF_RECEIVERS.iter().any(|receiver| {
        before.strip_suffix(receiver).is_some_and(|rest| {
            !rest
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        })
    })
}
