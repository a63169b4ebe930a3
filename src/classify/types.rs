//! Core types for classification results.

use serde::{Deserialize, Serialize};

/// A symbolic Big-O expression drawn from a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BigO {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    /// `O(n log k)`, heap of bounded size.
    LinearLogK,
    /// `O(n^d)` for `d >= 2`.
    Polynomial(u32),
    /// `O(n * m)`, two independent dimensions.
    LinearTimesM,
    /// `O(n * k)`, inner scan over an element of the input.
    LinearTimesK,
    Exponential,
}

impl BigO {
    /// Normalize a loop depth to the matching expression.
    pub fn polynomial(degree: u32) -> Self {
        match degree {
            0 => BigO::Constant,
            1 => BigO::Linear,
            d => BigO::Polynomial(d),
        }
    }
}

impl std::fmt::Display for BigO {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BigO::Constant => write!(f, "O(1)"),
            BigO::Logarithmic => write!(f, "O(log n)"),
            BigO::Linear => write!(f, "O(n)"),
            BigO::Linearithmic => write!(f, "O(n log n)"),
            BigO::LinearLogK => write!(f, "O(n log k)"),
            BigO::Polynomial(d) => write!(f, "O(n^{})", d),
            BigO::LinearTimesM => write!(f, "O(n * m)"),
            BigO::LinearTimesK => write!(f, "O(n * k)"),
            BigO::Exponential => write!(f, "O(2^n)"),
        }
    }
}

impl std::str::FromStr for BigO {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "O(1)" => Ok(BigO::Constant),
            "O(log n)" => Ok(BigO::Logarithmic),
            "O(n)" => Ok(BigO::Linear),
            "O(n log n)" => Ok(BigO::Linearithmic),
            "O(n log k)" => Ok(BigO::LinearLogK),
            "O(n * m)" => Ok(BigO::LinearTimesM),
            "O(n * k)" => Ok(BigO::LinearTimesK),
            "O(2^n)" => Ok(BigO::Exponential),
            other => other
                .strip_prefix("O(n^")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|d| d.parse::<u32>().ok())
                .filter(|d| *d >= 2)
                .map(BigO::Polynomial)
                .ok_or_else(|| format!("unknown complexity: {}", s)),
        }
    }
}

impl From<BigO> for String {
    fn from(value: BigO) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BigO {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Estimated time and space complexity for one snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityResult {
    pub time: BigO,
    pub space: BigO,
}

/// Which row of the time table produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRule {
    ConstantLoops,
    BinarySearch,
    Sorting,
    Heap,
    RecursionDivide,
    RecursionExponential,
    RecursionLinear,
    LoopDepth,
}

impl TimeRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRule::ConstantLoops => "constant_loops",
            TimeRule::BinarySearch => "binary_search",
            TimeRule::Sorting => "sorting",
            TimeRule::Heap => "heap",
            TimeRule::RecursionDivide => "recursion_divide",
            TimeRule::RecursionExponential => "recursion_exponential",
            TimeRule::RecursionLinear => "recursion_linear",
            TimeRule::LoopDepth => "loop_depth",
        }
    }
}

impl std::fmt::Display for TimeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which row of the space table produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceRule {
    ConstantLoops,
    Matrix,
    DynamicContainer,
    FixedBuffer,
    CallStack,
    Default,
}

impl SpaceRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceRule::ConstantLoops => "constant_loops",
            SpaceRule::Matrix => "matrix",
            SpaceRule::DynamicContainer => "dynamic_container",
            SpaceRule::FixedBuffer => "fixed_buffer",
            SpaceRule::CallStack => "call_stack",
            SpaceRule::Default => "default",
        }
    }
}

impl std::fmt::Display for SpaceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_strings() {
        assert_eq!(BigO::Constant.to_string(), "O(1)");
        assert_eq!(BigO::Linearithmic.to_string(), "O(n log n)");
        assert_eq!(BigO::Polynomial(3).to_string(), "O(n^3)");
        assert_eq!(BigO::LinearTimesK.to_string(), "O(n * k)");
        assert_eq!(BigO::Exponential.to_string(), "O(2^n)");
    }

    #[test]
    fn test_parse() {
        assert_eq!("O(n log k)".parse::<BigO>().unwrap(), BigO::LinearLogK);
        assert_eq!("O(n^4)".parse::<BigO>().unwrap(), BigO::Polynomial(4));
        assert!("O(n^1)".parse::<BigO>().is_err());
        assert!("O(n!)".parse::<BigO>().is_err());
    }

    #[test]
    fn test_polynomial_normalizes_low_degrees() {
        assert_eq!(BigO::polynomial(0), BigO::Constant);
        assert_eq!(BigO::polynomial(1), BigO::Linear);
        assert_eq!(BigO::polynomial(2), BigO::Polynomial(2));
    }

    #[test]
    fn test_serializes_as_string() {
        let result = ComplexityResult {
            time: BigO::Polynomial(2),
            space: BigO::Linear,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"time":"O(n^2)","space":"O(n)"}"#);

        let back: ComplexityResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(TimeRule::RecursionExponential.as_str(), "recursion_exponential");
        assert_eq!(SpaceRule::DynamicContainer.to_string(), "dynamic_container");
    }
}
