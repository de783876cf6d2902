//! The filter chain: generic bitset-accelerated predicates plus the
//! concrete filters that wire them to `AgentConfig`/`BidRequest` fields.

mod concrete;
mod filter;
mod generic;
mod state;

pub use concrete::{
    CreativeFilter, ExchangeNameFilter, ExchangePostFilter, ExchangePreFilter, FoldPositionFilter,
    HourOfWeekFilter, LanguageRegexFilter, LocationRegexFilter, RequiredIdsFilter, SegmentsFilter,
    UrlRegexFilter,
};
pub use filter::{Filter, priority};
pub use generic::{
    EvalFilter, FilterAccumulator, IncludeExcludeFilter, IntervalFilter, IterativeFilter,
    ListFilter, RegexFilter, SegmentListFilter,
};
pub use state::{BiddableSpots, FilterState};
