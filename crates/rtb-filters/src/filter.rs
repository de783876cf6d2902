use crate::state::FilterState;
use rtb_core::{AgentConfig, CfgIdx, FilterFault};
use std::sync::Arc;

/// Published priority bands. Lower runs earlier; ties keep insertion
/// order. Cheap, highly selective bitmap filters run first so an early
/// empty `configs` short-circuits the expensive regex and exchange
/// callbacks at the end of the chain.
pub mod priority {
    pub const EXCHANGE_PRE: u32 = 0x0010;
    pub const FOLD_POSITION: u32 = 0x1100;
    pub const CREATIVE_FORMAT: u32 = 0x1200;
    pub const REQUIRED_IDS: u32 = 0x3000;
    pub const HOUR_OF_WEEK: u32 = 0x4000;
    pub const EXCHANGE_NAME: u32 = 0x5000;
    pub const LOCATION: u32 = 0x6000;
    pub const LANGUAGE: u32 = 0x7000;
    pub const SEGMENTS: u32 = 0x8000;
    pub const URL: u32 = 0x9000;
    pub const EXCHANGE_POST: u32 = 0x9900;
}

/// The filter interface every predicate in the chain implements.
///
/// `addConfig`/`removeConfig` maintain each filter's own acceleration
/// structures as configurations come and go; `filter` is the hot path and
/// must not allocate for the common case — only narrow `state`.
pub trait Filter: Send + Sync {
    /// Stable identifier used by the registry.
    fn name(&self) -> &'static str;

    /// Deep copy, used when cloning a pool snapshot for a write.
    fn clone_box(&self) -> Box<dyn Filter>;

    fn priority(&self) -> u32;

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>);

    fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>);

    /// Narrows `state`. Only the configuration-error class of failure
    /// (see the crate's error-handling design) is returned here; an empty
    /// `state.configs()` afterwards is not an error.
    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault>;
}
