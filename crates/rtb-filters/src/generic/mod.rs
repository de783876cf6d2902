//! Parameterized building blocks concrete filters are composed from.
//!
//! None of these hold runtime-polymorphic state; each is a generic type
//! specialized per concrete filter, matching the value types that filter
//! cares about (`String` for a URL filter, `AdPosition` for fold-position,
//! and so on).

mod include_exclude;
mod interval;
mod iterative;
mod list;
mod regex;
mod segment_list;

pub use include_exclude::IncludeExcludeFilter;
pub use interval::IntervalFilter;
pub use iterative::IterativeFilter;
pub use list::ListFilter;
pub use regex::RegexFilter;
pub use segment_list::SegmentListFilter;

use rtb_bitset::ConfigSet;
use rtb_core::CfgIdx;

/// Evaluates a request-derived value against accumulated per-config state.
pub trait EvalFilter {
    type Input: ?Sized;
    fn eval(&self, input: &Self::Input) -> ConfigSet;
}

/// Maintains per-config acceleration state as configs come and go.
pub trait FilterAccumulator {
    type Value;
    fn new() -> Self;
    fn add(&mut self, index: CfgIdx, values: &[Self::Value]);
    fn remove(&mut self, index: CfgIdx, values: &[Self::Value]);
}
