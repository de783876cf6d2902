use std::fmt;

/// Fatal failures surfaced by the filter pipeline.
///
/// These always indicate a bug or a misconfiguration, never a transient
/// condition — see the error handling policy in the pipeline design notes.
/// "No config survives filtering" is *not* an error; it is represented by an
/// empty [`crate::ConfigSet`](../rtb_bitset/struct.ConfigSet.html) returned
/// from the happy path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterFault {
    /// `FilterRegistry::makeFilter` (or `FilterPool::addFilter`) was asked
    /// for a filter name that was never registered.
    UnknownFilter { name: String },
    /// A filter that depends on `request.timestamp` (e.g. `HourOfWeekFilter`)
    /// was handed a request with no timestamp.
    NullTimestamp,
}

impl fmt::Display for FilterFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFilter { name } => write!(f, "unknown filter: {name}"),
            Self::NullTimestamp => write!(f, "bid request has no timestamp"),
        }
    }
}

impl std::error::Error for FilterFault {}
