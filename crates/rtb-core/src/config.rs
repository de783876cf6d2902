use crate::request::{AdPosition, Format, SegmentList};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A positive/negative pair of values, the shape every `IncludeExcludeFilter`
/// sub-filter is registered from.
///
/// An empty `include` means "matches anything" (see
/// `IncludeExcludeFilter`'s `empty_includes` handling); `exclude` always
/// vetoes regardless of `include`.
#[derive(Debug, Clone)]
pub struct IncludeExclude<T> {
    pub include: Vec<T>,
    pub exclude: Vec<T>,
}

impl<T> Default for IncludeExclude<T> {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl<T> IncludeExclude<T> {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// One creative variant belonging to a configuration.
#[derive(Debug, Clone, Copy)]
pub struct Creative {
    pub format: Format,
}

/// Per-domain segment targeting for one configuration.
#[derive(Debug, Clone, Default)]
pub struct SegmentInfo {
    pub include: SegmentList,
    pub exclude: SegmentList,
    /// If true, a request that never mentions this domain at all is
    /// rejected outright — see `SegmentsFilter`'s `exclude_if_not_present`.
    pub exclude_if_not_present: bool,
    /// Exchanges this targeting rule applies to; empty means all exchanges.
    pub apply_to_exchanges: IncludeExclude<String>,
}

/// Per-hour admissibility bitmap, 24 hours x 7 days.
#[derive(Debug, Clone)]
pub struct HourOfWeekFilterConfig {
    pub hour_bitmap: [bool; 24 * 7],
}

impl Default for HourOfWeekFilterConfig {
    fn default() -> Self {
        Self {
            hour_bitmap: [true; 24 * 7],
        }
    }
}

/// A bidding campaign's filter spec plus its list of creatives.
///
/// Owned by the caller and shared into the pool (see `FilterPool::add_config`);
/// the pool never mutates the fields a filter reads here, only the
/// `provider_data` table, which is guarded by its own lock for exactly that
/// reason.
#[derive(Debug, Default)]
pub struct AgentConfig {
    pub segments: HashMap<String, SegmentInfo>,
    pub hour_of_week_filter: HourOfWeekFilterConfig,
    pub creatives: Vec<Creative>,
    pub url_filter: IncludeExclude<String>,
    pub language_filter: IncludeExclude<String>,
    pub location_filter: IncludeExclude<String>,
    pub fold_position_filter: IncludeExclude<AdPosition>,
    pub exchange_filter: IncludeExclude<String>,
    pub required_ids: Vec<String>,
    provider_data: Mutex<HashMap<String, Arc<dyn std::any::Any + Send + Sync>>>,
}

impl AgentConfig {
    /// Reads the provider-data blob registered for `exchange`, under the
    /// per-configuration lock mandated by the concurrency model — hold the
    /// lock only long enough to clone the `Arc`.
    pub fn provider_data(&self, exchange: &str) -> Option<Arc<dyn std::any::Any + Send + Sync>> {
        self.provider_data.lock().get(exchange).cloned()
    }

    pub fn set_provider_data(&self, exchange: &str, data: Arc<dyn std::any::Any + Send + Sync>) {
        self.provider_data.lock().insert(exchange.to_string(), data);
    }
}
