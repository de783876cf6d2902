use rtb_bitset::ConfigSet;
use rtb_core::AgentConfig;
use rtb_filters::Filter;
use std::sync::Arc;

/// One live configuration's identity within a pool snapshot. A removed
/// config leaves behind an empty-name `None` slot, reused by the next
/// `add_config` rather than shifting every later index.
#[derive(Clone)]
pub struct Slot {
    pub name: String,
    pub config: Arc<AgentConfig>,
}

/// The RCU-published unit: everything a read needs to evaluate one bid
/// request, and everything a write needs to clone-mutate-publish the next
/// version. Read-only after publication — see `FilterPool`.
pub struct Data {
    pub filters: Vec<Box<dyn Filter>>,
    pub slots: Vec<Option<Slot>>,
    pub active_configs: ConfigSet,
}

impl Data {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            slots: Vec::new(),
            active_configs: ConfigSet::new(),
        }
    }

    pub fn clone_for_write(&self) -> Self {
        Self {
            filters: self.filters.iter().map(|f| f.clone_box()).collect(),
            slots: self.slots.clone(),
            active_configs: self.active_configs.clone(),
        }
    }

    pub fn creative_counts(&self) -> Vec<usize> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|s| s.config.creatives.len()).unwrap_or(0))
            .collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|s| s.name == name))
    }

    /// Finds a free slot to reuse, or appends a fresh one.
    pub fn reserve_slot(&mut self) -> usize {
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            index
        } else {
            self.slots.push(None);
            self.slots.len() - 1
        }
    }

    pub fn resort_by_priority(&mut self) {
        self.filters.sort_by_key(|f| f.priority());
    }
}

impl Default for Data {
    fn default() -> Self {
        Self::new()
    }
}
