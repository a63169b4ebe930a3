//! Textual signals that drive the time classifier.
//!
//! Every predicate takes comment-stripped text and a language, and answers a
//! single yes/no question. They are deliberately independent of each other so
//! that each can be checked in isolation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{Language, LanguageFamily};

/// Compiled time-related patterns for one language family.
struct TimePatterns {
    sorting: Regex,
    binary_search_call: Regex,
    bounded_while: Regex,
    midpoint: Regex,
    halving_division: Regex,
    halving_while: Regex,
    heap: Regex,
    divide: Regex,
    memoization: Regex,
}

lazy_static! {
    static ref PYTHON: TimePatterns = TimePatterns {
        sorting: Regex::new(r"\.sort\(|\bsorted\(").unwrap(),
        binary_search_call: Regex::new(r"\bbisect").unwrap(),
        bounded_while: Regex::new(r"(?m)\bwhile\s+.*<.*:").unwrap(),
        midpoint: Regex::new(r"\bmid\s*=(?:[^=]|$)").unwrap(),
        halving_division: Regex::new(r"//\s*2").unwrap(),
        halving_while: Regex::new(r"(?s)\bwhile\b.*?(?://=?\s*2|>>=?\s*1|<<)").unwrap(),
        heap: Regex::new(r"\bheapq\.|\bheappush\b|\bheappop\b|\bheapify\b").unwrap(),
        divide: Regex::new(r"\[\s*:.*\bmid\s*\]|\[.*\bmid\s*:\s*\]|//\s*2").unwrap(),
        memoization: Regex::new(r"@(?:functools\.)?(?:lru_)?cache\b|\bmemo\b|\bdp\[").unwrap(),
    };

    static ref C_FAMILY: TimePatterns = TimePatterns {
        sorting: Regex::new(r"\b(?:sort|stable_sort|partial_sort|qsort)\s*\(").unwrap(),
        binary_search_call: Regex::new(
            r"\b(?:binary_search|lower_bound|upper_bound|equal_range|bsearch)\s*\("
        ).unwrap(),
        bounded_while: Regex::new(r"(?m)\bwhile\s*\(.*<.*\)").unwrap(),
        midpoint: Regex::new(r"\bmid\s*=(?:[^=]|$)").unwrap(),
        halving_division: Regex::new(r"/\s*2\b|>>\s*1\b").unwrap(),
        halving_while: Regex::new(r"(?s)\bwhile\b.*?(?:/=\s*2\b|>>=?\s*1\b)").unwrap(),
        heap: Regex::new(
            r"\bpriority_queue\b|\b(?:make_heap|push_heap|pop_heap)\s*\("
        ).unwrap(),
        divide: Regex::new(r"/\s*2\b|>>\s*1\b").unwrap(),
        memoization: Regex::new(
            r"\bmemo\b|\bdp\s*\[|\b(?:unordered_)?map\s*<[^;]*>\s*&?\s*(?:memo|cache|dp)\w*"
        ).unwrap(),
    };
}

fn patterns(language: Language) -> &'static TimePatterns {
    match language.family() {
        LanguageFamily::Indentation => &PYTHON,
        LanguageFamily::Brace => &C_FAMILY,
    }
}

/// A library or built-in sort call.
pub fn has_sorting(text: &str, language: Language) -> bool {
    patterns(language).sorting.is_match(text)
}

/// A library binary-search call (`bisect`, `lower_bound`, ...).
pub fn has_binary_search_call(text: &str, language: Language) -> bool {
    patterns(language).binary_search_call.is_match(text)
}

/// A `while` loop bounded by `<` together with a midpoint or halving step.
pub fn has_manual_binary_search(text: &str, language: Language) -> bool {
    let p = patterns(language);
    p.bounded_while.is_match(text)
        && (p.midpoint.is_match(text) || p.halving_division.is_match(text))
}

/// A `while` loop followed somewhere by a halving or shifting update.
pub fn has_halving_loop(text: &str, language: Language) -> bool {
    patterns(language).halving_while.is_match(text)
}

/// Heap or priority-queue operations.
pub fn has_heap(text: &str, language: Language) -> bool {
    patterns(language).heap.is_match(text)
}

/// Divide-and-conquer split around a midpoint.
pub fn has_divide_pattern(text: &str, language: Language) -> bool {
    patterns(language).divide.is_match(text)
}

/// A cache decorator, a `memo` table or an indexed `dp` access.
pub fn has_memoization(text: &str, language: Language) -> bool {
    patterns(language).memoization.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PY: Language = Language::Python;
    const CPP: Language = Language::Cpp;

    #[test]
    fn test_sorting() {
        assert!(has_sorting("nums.sort()", PY));
        assert!(has_sorting("for x in sorted(arr):", PY));
        assert!(!has_sorting("resorted = 1", PY));
        assert!(has_sorting("sort(nums.begin(), nums.end());", CPP));
        assert!(has_sorting("std::stable_sort(v.begin(), v.end());", CPP));
        assert!(!has_sorting("int sorter = 0;", CPP));
    }

    #[test]
    fn test_binary_search_call() {
        assert!(has_binary_search_call("i = bisect.bisect_left(a, x)", PY));
        assert!(has_binary_search_call(
            "auto it = lower_bound(a.begin(), a.end(), x);",
            CPP
        ));
        assert!(!has_binary_search_call("auto it = find(a.begin(), a.end(), x);", CPP));
    }

    #[test]
    fn test_manual_binary_search() {
        let py = "while lo < hi:\n    mid = (lo + hi) // 2\n";
        assert!(has_manual_binary_search(py, PY));
        assert!(!has_manual_binary_search("while lo < hi:\n    lo += 1\n", PY));

        let cpp = "while (l <= r) {\n    int mid = l + (r - l) / 2;\n}\n";
        assert!(has_manual_binary_search(cpp, CPP));
    }

    #[test]
    fn test_midpoint_comparison_is_not_assignment() {
        assert!(!has_manual_binary_search("while a < b:\n    if mid == 3:\n        pass\n", PY));
    }

    #[test]
    fn test_halving_loop() {
        assert!(has_halving_loop("while n > 0:\n    n //= 2\n", PY));
        assert!(has_halving_loop("while n:\n    n >>= 1\n", PY));
        assert!(has_halving_loop("while (n > 0) {\n    n /= 2;\n}\n", CPP));
        assert!(!has_halving_loop("n //= 2\nwhile n > 0:\n    n -= 1\n", PY));
        assert!(!has_halving_loop("while (i < n) {\n    cout << i;\n}\n", CPP));
    }

    #[test]
    fn test_heap() {
        assert!(has_heap("heapq.heappush(h, x)", PY));
        assert!(has_heap("heappop(h)", PY));
        assert!(has_heap("priority_queue<int> pq;", CPP));
        assert!(!has_heap("queue<int> q;", CPP));
    }

    #[test]
    fn test_divide_pattern() {
        assert!(has_divide_pattern("left = merge(arr[:mid])", PY));
        assert!(has_divide_pattern("right = merge(arr[mid:])", PY));
        assert!(has_divide_pattern("mid = len(arr) // 2", PY));
        assert!(has_divide_pattern("int mid = (lo + hi) / 2;", CPP));
        assert!(!has_divide_pattern("return f(n - 1) + f(n - 2)", PY));
    }

    #[test]
    fn test_memoization() {
        assert!(has_memoization("@lru_cache(None)\ndef f(n):", PY));
        assert!(has_memoization("@cache\ndef f(n):", PY));
        assert!(has_memoization("@functools.cache\ndef f(n):", PY));
        assert!(has_memoization("if n in self.memo:", PY));
        assert!(has_memoization("dp[i] = dp[i - 1] + dp[i - 2]", PY));
        assert!(!has_memoization("return f(n - 1) + f(n - 2)", PY));

        assert!(has_memoization("if (dp[n] != -1) return dp[n];", CPP));
        assert!(has_memoization("unordered_map<int, int> cache;", CPP));
        assert!(has_memoization("map<pair<int,int>, long> memoTable;", CPP));
        assert!(!has_memoization("unordered_map<int, int> seen;", CPP));
    }
}
