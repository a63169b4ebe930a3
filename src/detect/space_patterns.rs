//! Allocation signals that drive the space classifier.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{Language, LanguageFamily};

struct SpacePatterns {
    /// Alternatives that each indicate a true two-dimensional allocation.
    matrix: Vec<Regex>,
    /// Alternatives that each indicate a growable container or heap allocation.
    dynamic: Vec<Regex>,
    fixed: Vec<Regex>,
}

/// Declaration tail for a C++ local: a name followed by `;`, `=`, a brace
/// initializer or a constructor call. Parameters and return types never match.
const DECL_TAIL: &str = r"\s*[A-Za-z_]\w*\s*(?:;|=|\{|\([^;{]*\)\s*;)";

const SCALAR_TYPES: &str = r"(?:int|long|bool|char|double|float|short|unsigned|size_t)";

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

lazy_static! {
    static ref PYTHON: SpacePatterns = SpacePatterns {
        matrix: compile(&[
            // [[0] * n for ...] / [[False] * (cols + 1) ...]
            r"\[\s*\[[^\[\]]+\]\s*\*\s*[A-Za-z_(]".to_string(),
            // [[0 for _ in range(n)] for _ in range(m)]
            r"\[\s*\[[^\[\]]*\bfor\b[^\[\]]*\brange\(\s*[^\d\s)][^)]*\)\s*\]\s*for\b".to_string(),
        ]),
        dynamic: compile(&[
            r"\bdict\(".to_string(),
            r"\{[^{}\n]*:[^{}\n]*\}".to_string(),
            r"\bdefaultdict\b".to_string(),
            r"\w+\s*=\s*\{\s*\}".to_string(),
            r"\bset\b".to_string(),
            r"\[\s*\]".to_string(),
            r"\blist\(".to_string(),
            r"\.append\(".to_string(),
            r"\bdeque\(".to_string(),
            r"\bheapq\b".to_string(),
            r"\bCounter\(".to_string(),
            // [0] * (n + 1), [False] * len(s)
            r"(?m)(?:^|[=(,:]|\breturn)\s*\[[^\[\]\n]*\]\s*\*\s*[A-Za-z_(]".to_string(),
            // [x * 2 for x in nums]
            r"\[[^\[\]\n]*\bfor\b".to_string(),
        ]),
        fixed: compile(&[r"\[[^\[\]]*\]\s*\*\s*\d+".to_string()]),
    };

    static ref C_FAMILY: SpacePatterns = SpacePatterns {
        matrix: compile(&[
            format!(r"\bvector\s*<\s*(?:std::)?vector\s*<[^;(){{}}]*>{}", DECL_TAIL),
            format!(r"\b{}\s+[A-Za-z_]\w*\s*\[[^\]]*\]\s*\[", SCALAR_TYPES),
        ]),
        dynamic: compile(&[
            format!(
                r"\b(?:unordered_map|unordered_set|unordered_multimap|unordered_multiset|map|set|multimap|multiset|vector|deque|queue|stack|priority_queue|list)\s*<[^;(){{}}]*>{}",
                DECL_TAIL
            ),
            r"\bstring\s+[A-Za-z_]\w*\s*(?:;|=)".to_string(),
            r"\bnew\s+[A-Za-z_]".to_string(),
            r"\b(?:malloc|calloc|realloc)\s*\(".to_string(),
        ]),
        fixed: compile(&[
            format!(r"\b{}\s+[A-Za-z_]\w*\s*\[\s*\d+\s*\]", SCALAR_TYPES),
            r"\b(?:std::)?array\s*<".to_string(),
        ]),
    };
}

fn patterns(language: Language) -> &'static SpacePatterns {
    match language.family() {
        LanguageFamily::Indentation => &PYTHON,
        LanguageFamily::Brace => &C_FAMILY,
    }
}

fn any_match(alternatives: &[Regex], text: &str) -> bool {
    alternatives.iter().any(|re| re.is_match(text))
}

/// A genuine two-dimensional allocation sized by the input.
///
/// A list of empty sublists (`[[] for _ in range(n)]`) is flat fan-out and
/// does not count.
pub fn has_matrix_allocation(text: &str, language: Language) -> bool {
    any_match(&patterns(language).matrix, text)
}

/// A map, set, list, deque, dynamic array, heap or manual heap allocation.
pub fn has_dynamic_container(text: &str, language: Language) -> bool {
    any_match(&patterns(language).dynamic, text)
}

/// A fixed-size array or buffer literal.
pub fn has_fixed_buffer(text: &str, language: Language) -> bool {
    any_match(&patterns(language).fixed, text)
}
