use crate::filter::{Filter, priority};
use crate::generic::IterativeFilter;
use crate::state::FilterState;
use rtb_core::{AgentConfig, CfgIdx, FilterFault};
use std::collections::HashMap;
use std::sync::Arc;

/// Runs first in the chain: no acceleration bitmap exists for an opaque
/// connector predicate, so every eligible config is walked one at a time
/// via [`IterativeFilter`], looking up provider data under the config's
/// own lock (held only long enough to clone the `Arc`).
#[derive(Default)]
pub struct ExchangePreFilter {
    configs: HashMap<CfgIdx, Arc<AgentConfig>>,
}

impl Filter for ExchangePreFilter {
    fn name(&self) -> &'static str {
        "exchangePre"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(ExchangePreFilter {
            configs: self.configs.clone(),
        })
    }

    fn priority(&self) -> u32 {
        priority::EXCHANGE_PRE
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        self.configs.insert(index, config.clone());
    }

    fn remove_config(&mut self, index: CfgIdx, _config: &Arc<AgentConfig>) {
        self.configs.remove(&index);
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        let exchange = state.connector.exchange_name().to_string();
        let eligible = state.configs().clone();
        let configs = &self.configs;
        let result = IterativeFilter::filter(&eligible, |index| {
            let Some(config) = configs.get(&index) else {
                return false;
            };
            let provider_data = config.provider_data(&exchange);
            state
                .connector
                .bid_request_pre_filter(state.request, config, provider_data.as_ref())
        });
        state.narrow_configs(&result);
        Ok(())
    }
}

/// Runs last in the chain: every other filter has already narrowed
/// `configs`, so the expensive connector callback only runs against
/// survivors.
#[derive(Default)]
pub struct ExchangePostFilter {
    configs: HashMap<CfgIdx, Arc<AgentConfig>>,
}

impl Filter for ExchangePostFilter {
    fn name(&self) -> &'static str {
        "exchangePost"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(ExchangePostFilter {
            configs: self.configs.clone(),
        })
    }

    fn priority(&self) -> u32 {
        priority::EXCHANGE_POST
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        self.configs.insert(index, config.clone());
    }

    fn remove_config(&mut self, index: CfgIdx, _config: &Arc<AgentConfig>) {
        self.configs.remove(&index);
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        let exchange = state.connector.exchange_name().to_string();
        let eligible = state.configs().clone();
        let configs = &self.configs;
        let result = IterativeFilter::filter(&eligible, |index| {
            let Some(config) = configs.get(&index) else {
                return false;
            };
            let provider_data = config.provider_data(&exchange);
            state
                .connector
                .bid_request_post_filter(state.request, config, provider_data.as_ref())
        });
        state.narrow_configs(&result);
        Ok(())
    }
}
