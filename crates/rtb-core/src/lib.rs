//! Shared domain types for the bid-request filter pipeline.
//!
//! This crate holds everything the filter chain reads but does not own:
//! the read-only [`BidRequest`](request::BidRequest), the
//! [`ExchangeConnector`](connector::ExchangeConnector) contract, the opaque
//! [`AgentConfig`](config::AgentConfig), and the fatal error kinds the
//! pipeline can raise.

mod config;
mod connector;
mod error;
mod request;

#[cfg(feature = "diagnostics")]
pub mod diagnostics;

pub use config::{AgentConfig, Creative, HourOfWeekFilterConfig, IncludeExclude, SegmentInfo};
pub use connector::ExchangeConnector;
pub use error::FilterFault;
pub use request::{AdPosition, BidRequest, Format, Imp, Segment, SegmentList, Timestamp};

/// The small integer identity assigned to a live configuration by the pool.
/// Stable for the configuration's lifetime and reused after removal.
pub type CfgIdx = usize;
