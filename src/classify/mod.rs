//! Ordered decision tables that turn signals into Big-O labels.
//!
//! Both tables are first-match-wins. Their row order is part of the
//! contract: inputs that match several rows get the label of the earliest.

mod space;
mod time;
mod types;

use serde::Serialize;

use crate::analysis::{RecursionSignals, ScopeSignals};
use crate::detect::PatternSignals;

pub use space::classify_space;
pub use time::classify_time;
pub use types::{BigO, ComplexityResult, SpaceRule, TimeRule};

/// Everything the classifiers look at for one snippet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub scope: ScopeSignals,
    pub patterns: PatternSignals,
    pub recursion: RecursionSignals,
}
