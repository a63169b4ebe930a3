//! Core traits for language scanning.

use super::{EngineConfig, LanguageFamily, ScopeSignals};

/// A function name paired with its extracted body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    pub body: String,
}

/// Per-family structural scanner.
///
/// Each block convention (indentation, braces) implements this trait once.
/// All methods operate on comment-stripped text and keep no state between
/// calls, so a single static instance serves every analysis.
pub trait ScopeScanner: Send + Sync {
    /// Returns the family this scanner handles.
    fn family(&self) -> LanguageFamily;

    /// Walk the text line by line and accumulate loop-shape signals.
    fn scan_scopes(&self, text: &str, config: &EngineConfig) -> ScopeSignals;

    /// Isolate the body of the function called `name`.
    ///
    /// Returns `None` when no declaration is found or its body is malformed.
    fn function_body(&self, text: &str, name: &str) -> Option<FunctionRecord>;

    /// Names of functions declared in the text, in declaration order.
    fn function_names(&self, text: &str) -> Vec<String>;
}
