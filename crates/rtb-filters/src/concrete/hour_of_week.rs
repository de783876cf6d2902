use crate::filter::{Filter, priority};
use crate::state::FilterState;
use rtb_bitset::ConfigSet;
use rtb_core::{AgentConfig, CfgIdx, FilterFault};
use std::sync::Arc;

const HOURS_PER_WEEK: usize = 24 * 7;

/// One `ConfigSet` per hour-of-week; a config's bit is set in every hour
/// its `hour_bitmap` permits bidding. `filter` is a single array index by
/// the request's `hourOfWeek()`.
pub struct HourOfWeekFilter {
    data: Vec<ConfigSet>,
}

impl Default for HourOfWeekFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl HourOfWeekFilter {
    pub fn new() -> Self {
        Self {
            data: vec![ConfigSet::new(); HOURS_PER_WEEK],
        }
    }
}

impl Filter for HourOfWeekFilter {
    fn name(&self) -> &'static str {
        "hourOfWeek"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(HourOfWeekFilter {
            data: self.data.clone(),
        })
    }

    fn priority(&self) -> u32 {
        priority::HOUR_OF_WEEK
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for (hour, set) in self.data.iter_mut().enumerate() {
            if config.hour_of_week_filter.hour_bitmap[hour] {
                set.set(index);
            }
        }
    }

    fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for (hour, set) in self.data.iter_mut().enumerate() {
            if config.hour_of_week_filter.hour_bitmap[hour] {
                set.reset(index);
            }
        }
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        let timestamp = state.request.timestamp.ok_or(FilterFault::NullTimestamp)?;
        let mask = self.data[timestamp.hour_of_week()].clone();
        state.narrow_configs(&mask);
        Ok(())
    }
}
