//! One module per filter predicate, each built from the generic blocks
//! in [`crate::generic`] plus whatever per-filter bookkeeping it needs.

mod creative;
mod exchange_name;
mod exchange_pre_post;
mod fold_position;
mod hour_of_week;
mod regex_filters;
mod required_ids;
mod segments;

pub use creative::CreativeFilter;
pub use exchange_name::ExchangeNameFilter;
pub use exchange_pre_post::{ExchangePostFilter, ExchangePreFilter};
pub use fold_position::FoldPositionFilter;
pub use hour_of_week::HourOfWeekFilter;
pub use regex_filters::{LanguageRegexFilter, LocationRegexFilter, UrlRegexFilter};
pub use required_ids::RequiredIdsFilter;
pub use segments::SegmentsFilter;
