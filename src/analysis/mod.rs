//! Structural analysis of a single source snippet.
//!
//! This module turns raw source text into the signals the classifiers need,
//! without building a syntax tree:
//! - Language detection from the filename
//! - Comment and docstring stripping
//! - Loop-nesting scan with constant-bound exclusion
//! - Function-body extraction and self-recursion detection
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌──────────────┐
//! │ code+filename│───▶│ strip_comments│───▶│ ScopeScanner │──┐
//! └──────────────┘    └───────────────┘    │ (Python, C)  │  │
//!                                          └──────────────┘  ▼
//!                     ┌───────────────┐    ┌──────────────┐  Signals
//!                     │ detect::*     │───▶│ classify::*  │◀─┘
//!                     └───────────────┘    └──────────────┘
//! ```
//!
//! # Adding a New Language Family
//!
//! 1. Create a scanner in `src/analysis/languages/`
//! 2. Implement the `ScopeScanner` trait
//! 3. Add a variant to `LanguageFamily` and register it in `languages/mod.rs`

mod comments;
mod engine;
mod language;
mod languages;
mod recursion;
mod scope;
mod traits;

pub use comments::strip_comments;
pub use engine::{analyze_complexity, analyze_with, Analysis, EngineConfig};
pub use language::{detect_language, Language, LanguageFamily};
pub use languages::{scanner_for, scanner_for_family, CFamilyScanner, PythonScanner};
pub use recursion::{analyze_recursion, count_recursive_calls, detect_recursion, RecursionSignals};
pub use scope::{identifiers, FrameStack, LoopFrame, LoopHeader, LoopKind, ScopeSignals};
pub use traits::{FunctionRecord, ScopeScanner};
