//! Space-complexity decision table.

use tracing::trace;

use super::{BigO, Signals, SpaceRule};

/// Classify auxiliary space. Rows are checked in order; the first match wins.
pub fn classify_space(signals: &Signals) -> (BigO, SpaceRule) {
    let patterns = &signals.patterns;

    let (big_o, rule) = if signals.scope.has_only_constant_loops {
        (BigO::Constant, SpaceRule::ConstantLoops)
    } else if patterns.matrix_allocation {
        (BigO::LinearTimesM, SpaceRule::Matrix)
    } else if patterns.dynamic_container {
        (BigO::Linear, SpaceRule::DynamicContainer)
    } else if patterns.fixed_buffer {
        (BigO::Constant, SpaceRule::FixedBuffer)
    } else if signals.recursion.detected {
        (BigO::Linear, SpaceRule::CallStack)
    } else {
        (BigO::Constant, SpaceRule::Default)
    };

    trace!(%big_o, rule = rule.as_str(), "space classified");
    (big_o, rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_constant() {
        assert_eq!(
            classify_space(&Signals::default()),
            (BigO::Constant, SpaceRule::Default)
        );
    }

    #[test]
    fn test_rows_in_order() {
        let mut s = Signals::default();
        s.recursion.detected = true;
        assert_eq!(classify_space(&s), (BigO::Linear, SpaceRule::CallStack));

        s.patterns.fixed_buffer = true;
        assert_eq!(classify_space(&s), (BigO::Constant, SpaceRule::FixedBuffer));

        s.patterns.dynamic_container = true;
        assert_eq!(
            classify_space(&s),
            (BigO::Linear, SpaceRule::DynamicContainer)
        );

        s.patterns.matrix_allocation = true;
        assert_eq!(classify_space(&s), (BigO::LinearTimesM, SpaceRule::Matrix));

        s.scope.loops_seen = 1;
        s.scope.has_only_constant_loops = true;
        assert_eq!(
            classify_space(&s),
            (BigO::Constant, SpaceRule::ConstantLoops)
        );
    }
}
