//! Textual pattern detectors over comment-stripped source.
//!
//! Each detector is a standalone predicate; [`collect_patterns`] runs all of
//! them once and bundles the answers for the classifiers.

mod space_patterns;
mod time_patterns;

use serde::Serialize;

use crate::analysis::Language;

pub use space_patterns::{has_dynamic_container, has_fixed_buffer, has_matrix_allocation};
pub use time_patterns::{
    has_binary_search_call, has_divide_pattern, has_halving_loop, has_heap,
    has_manual_binary_search, has_memoization, has_sorting,
};

/// Every pattern flag for one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternSignals {
    pub sorting: bool,
    pub binary_search_call: bool,
    pub manual_binary_search: bool,
    pub halving_loop: bool,
    pub heap: bool,
    pub divide: bool,
    pub memoization: bool,
    pub matrix_allocation: bool,
    pub dynamic_container: bool,
    pub fixed_buffer: bool,
}

/// Run every detector against `text`.
pub fn collect_patterns(text: &str, language: Language) -> PatternSignals {
    PatternSignals {
        sorting: has_sorting(text, language),
        binary_search_call: has_binary_search_call(text, language),
        manual_binary_search: has_manual_binary_search(text, language),
        halving_loop: has_halving_loop(text, language),
        heap: has_heap(text, language),
        divide: has_divide_pattern(text, language),
        memoization: has_memoization(text, language),
        matrix_allocation: has_matrix_allocation(text, language),
        dynamic_container: has_dynamic_container(text, language),
        fixed_buffer: has_fixed_buffer(text, language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_patterns_python() {
        let code = r#"
import heapq
def top(nums, k):
    h = []
    for n in nums:
        heapq.heappush(h, n)
        if len(h) > k:
            heapq.heappop(h)
    return h
"#;
        let p = collect_patterns(code, Language::Python);
        assert!(p.heap);
        assert!(p.dynamic_container);
        assert!(!p.sorting);
        assert!(!p.memoization);
    }

    #[test]
    fn test_collect_patterns_empty() {
        assert_eq!(collect_patterns("", Language::Cpp), PatternSignals::default());
    }
}
