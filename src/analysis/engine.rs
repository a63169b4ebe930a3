//! The analysis pipeline: detect, strip, scan, classify.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{analyze_recursion, detect_language, scanner_for, strip_comments, Language};
use crate::classify::{
    classify_space, classify_time, ComplexityResult, Signals, SpaceRule, TimeRule,
};
use crate::detect::collect_patterns;

/// Default ceiling for a literal loop bound to count as constant.
pub const DEFAULT_CONSTANT_BOUND_LIMIT: u64 = 256;

/// Tunable heuristics for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Largest literal loop bound treated as a fixed alphabet or buffer.
    #[serde(default = "default_constant_bound_limit")]
    pub constant_bound_limit: u64,
    /// Collapse two-pointer and membership-guarded loop nests to linear.
    #[serde(default = "default_amortized_linear")]
    pub amortized_linear: bool,
}

fn default_constant_bound_limit() -> u64 {
    DEFAULT_CONSTANT_BOUND_LIMIT
}

fn default_amortized_linear() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            constant_bound_limit: default_constant_bound_limit(),
            amortized_linear: default_amortized_linear(),
        }
    }
}

/// A full analysis: the result plus the evidence behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub language: Language,
    pub signals: Signals,
    pub result: ComplexityResult,
    pub time_rule: TimeRule,
    pub space_rule: SpaceRule,
}

/// Analyze `code` with explicit engine settings.
///
/// `filename` is only used to pick the language. The call is pure: no I/O and
/// no state survives between calls.
pub fn analyze_with(code: &str, filename: &str, config: &EngineConfig) -> Analysis {
    let language = detect_language(filename);
    let text = strip_comments(code, language);
    let scanner = scanner_for(language);

    let signals = Signals {
        scope: scanner.scan_scopes(&text, config),
        patterns: collect_patterns(&text, language),
        recursion: analyze_recursion(&text, scanner),
    };
    debug!(
        filename,
        %language,
        depth = signals.scope.max_effective_depth,
        loops = signals.scope.loops_seen,
        recursive = signals.recursion.detected,
        "collected signals"
    );

    let (time, time_rule) = classify_time(&signals);
    let (space, space_rule) = classify_space(&signals);
    debug!(filename, %time, %space, "classified");

    Analysis {
        language,
        signals,
        result: ComplexityResult { time, space },
        time_rule,
        space_rule,
    }
}

/// Estimate time and space complexity with default settings.
pub fn analyze_complexity(code: &str, filename: &str) -> ComplexityResult {
    analyze_with(code, filename, &EngineConfig::default()).result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::BigO;

    #[test]
    fn test_single_loop() {
        let r = analyze_complexity("for x in data:\n    total += x\n", "main.py");
        assert_eq!(r.time, BigO::Linear);
        assert_eq!(r.space, BigO::Constant);
    }

    #[test]
    fn test_single_loop_accumulating() {
        let code = "out = []\nfor x in data:\n    out.append(x)\n";
        let r = analyze_complexity(code, "main.py");
        assert_eq!(r.time, BigO::Linear);
        assert_eq!(r.space, BigO::Linear);
    }

    #[test]
    fn test_empty_input() {
        let r = analyze_complexity("", "");
        assert_eq!(r.time, BigO::Constant);
        assert_eq!(r.space, BigO::Constant);
    }

    #[test]
    fn test_commented_loop_is_ignored() {
        let code = "# for x in data:\n#     pass\nx = 1\n";
        assert_eq!(analyze_complexity(code, "main.py").time, BigO::Constant);

        let code = "/* for (int i = 0; i < n; i++) {\n} */\nint x = 1;\n";
        assert_eq!(analyze_complexity(code, "main.cpp").time, BigO::Constant);
    }

    #[test]
    fn test_rules_are_reported() {
        let a = analyze_with(
            "nums.sort()\nfor x in nums:\n    pass\n",
            "main.py",
            &EngineConfig::default(),
        );
        assert_eq!(a.language, Language::Python);
        assert_eq!(a.time_rule, TimeRule::Sorting);
        assert_eq!(a.space_rule, SpaceRule::Default);
        assert_eq!(a.result.time, BigO::Linearithmic);
    }

    #[test]
    fn test_config_changes_constant_threshold() {
        let code = "for i in range(500):\n    for j in range(500):\n        pass\n";
        assert_eq!(analyze_complexity(code, "main.py").time, BigO::Polynomial(2));

        let config = EngineConfig {
            constant_bound_limit: 1000,
            ..EngineConfig::default()
        };
        assert_eq!(analyze_with(code, "main.py", &config).result.time, BigO::Constant);
    }

    #[test]
    fn test_engine_config_yaml_defaults() {
        let config: EngineConfig = serde_yaml::from_str("amortized_linear: false").unwrap();
        assert_eq!(config.constant_bound_limit, 256);
        assert!(!config.amortized_linear);
    }
}
