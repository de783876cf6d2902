use crate::filter::{Filter, priority};
use crate::state::FilterState;
use rtb_bitset::ConfigSet;
use rtb_core::{AgentConfig, CfgIdx, FilterFault};
use std::collections::HashMap;
use std::sync::Arc;

/// `domain -> ConfigSet` of configs that require the user-id domain to be
/// present. A config survives iff every domain it requires shows up in
/// the request, i.e. iff it's absent from the union of *missing* domains.
#[derive(Default)]
pub struct RequiredIdsFilter {
    data: HashMap<String, ConfigSet>,
}

impl Filter for RequiredIdsFilter {
    fn name(&self) -> &'static str {
        "requiredIds"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(RequiredIdsFilter {
            data: self.data.clone(),
        })
    }

    fn priority(&self) -> u32 {
        priority::REQUIRED_IDS
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for domain in &config.required_ids {
            self.data.entry(domain.clone()).or_default().set(index);
        }
    }

    fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for domain in &config.required_ids {
            if let Some(set) = self.data.get_mut(domain) {
                set.reset(index);
                if set.is_empty() {
                    self.data.remove(domain);
                }
            }
        }
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        let mut missing = ConfigSet::new();
        for (domain, set) in &self.data {
            if !state.request.user_ids.contains_key(domain) {
                missing.or(set);
            }
        }
        missing.negate();
        state.narrow_configs(&missing);
        Ok(())
    }
}
