//! Time-complexity decision table.

use tracing::trace;

use super::{BigO, Signals, TimeRule};

/// Classify time complexity. Rows are checked in order; the first match wins.
pub fn classify_time(signals: &Signals) -> (BigO, TimeRule) {
    let scope = &signals.scope;
    let patterns = &signals.patterns;
    let recursion = &signals.recursion;
    let depth = scope.max_effective_depth;

    let (big_o, rule) = if scope.has_only_constant_loops {
        (BigO::Constant, TimeRule::ConstantLoops)
    } else if patterns.binary_search_call
        || patterns.manual_binary_search
        || patterns.halving_loop
    {
        // A hand-written search is itself one of the loops counted in `depth`.
        let own_loop = usize::from(patterns.manual_binary_search || patterns.halving_loop);
        if depth > own_loop {
            (BigO::Linearithmic, TimeRule::BinarySearch)
        } else {
            (BigO::Logarithmic, TimeRule::BinarySearch)
        }
    } else if patterns.sorting {
        if depth >= 2 {
            (BigO::polynomial(depth as u32), TimeRule::Sorting)
        } else {
            (BigO::Linearithmic, TimeRule::Sorting)
        }
    } else if patterns.heap {
        (BigO::LinearLogK, TimeRule::Heap)
    } else if recursion.detected {
        if patterns.divide {
            (BigO::Linearithmic, TimeRule::RecursionDivide)
        } else if !patterns.memoization && recursion.max_self_calls >= 2 {
            (BigO::Exponential, TimeRule::RecursionExponential)
        } else {
            (BigO::Linear, TimeRule::RecursionLinear)
        }
    } else {
        (by_loop_depth(signals), TimeRule::LoopDepth)
    };

    trace!(%big_o, rule = rule.as_str(), depth, "time classified");
    (big_o, rule)
}

fn by_loop_depth(signals: &Signals) -> BigO {
    let scope = &signals.scope;
    match scope.max_effective_depth {
        2 if scope.has_bucket_traversal || scope.has_amortized_linear => BigO::Linear,
        2 if scope.has_char_iteration => BigO::LinearTimesK,
        d => BigO::polynomial(d as u32),
    }
}
