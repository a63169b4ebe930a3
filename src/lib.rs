//! bigocheck - heuristic Big-O estimation for practice solutions.
//!
//! bigocheck labels short Python, C and C++ snippets with approximate time
//! and space complexity. It scans the text structurally (loop nesting with
//! constant-bound exclusion, recursion shape, library calls such as sorting
//! or heaps) and never executes or fully parses the code.
//!
//! # Architecture
//!
//! - `analysis`: language detection, comment stripping, scope scanning,
//!   recursion detection and the `analyze_complexity` entry point
//! - `detect`: independent textual pattern predicates
//! - `classify`: the ordered time and space decision tables
//! - `config`: YAML configuration schema
//! - `report`: output formatting (text, JSON)
//!
//! # Example
//!
//! ```
//! let result = bigocheck::analyze_complexity("nums.sort()\n", "main.py");
//! assert_eq!(result.time.to_string(), "O(n log n)");
//! ```

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod detect;
pub mod report;

pub use analysis::{analyze_complexity, analyze_with, Analysis, EngineConfig, Language};
pub use classify::{BigO, ComplexityResult, SpaceRule, TimeRule};
pub use config::Config;
