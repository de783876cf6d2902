use crate::filter::{Filter, priority};
use crate::generic::{IncludeExcludeFilter, ListFilter};
use crate::state::FilterState;
use rtb_core::{AgentConfig, CfgIdx, FilterFault};
use std::sync::Arc;

/// `IncludeExcludeFilter<ListFilter<String>>` over the request's exchange
/// name. Uses `request.exchange` rather than the connector's own name —
/// the connector may front several exchange identities, and the request
/// is the more specific source (see the design notes on this choice).
#[derive(Default, Clone)]
pub struct ExchangeNameFilter {
    inner: IncludeExcludeFilter<ListFilter<String>>,
}

impl Filter for ExchangeNameFilter {
    fn name(&self) -> &'static str {
        "exchangeName"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }

    fn priority(&self) -> u32 {
        priority::EXCHANGE_NAME
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        self.inner.add_config(
            index,
            &config.exchange_filter.include,
            &config.exchange_filter.exclude,
        );
    }

    fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        self.inner.remove_config(
            index,
            &config.exchange_filter.include,
            &config.exchange_filter.exclude,
        );
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        let mask = self.inner.filter(&state.request.exchange);
        state.narrow_configs(&mask);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_core::{BidRequest, IncludeExclude};

    struct NoopConnector;
    impl rtb_core::ExchangeConnector for NoopConnector {
        fn exchange_name(&self) -> &str {
            "test"
        }
        fn bid_request_pre_filter(
            &self,
            _: &BidRequest,
            _: &AgentConfig,
            _: Option<&Arc<dyn std::any::Any + Send + Sync>>,
        ) -> bool {
            true
        }
        fn bid_request_post_filter(
            &self,
            _: &BidRequest,
            _: &AgentConfig,
            _: Option<&Arc<dyn std::any::Any + Send + Sync>>,
        ) -> bool {
            true
        }
    }

    #[test]
    fn narrows_by_exchange_name() {
        let mut filter = ExchangeNameFilter::default();
        let mut config = AgentConfig::default();
        config.exchange_filter = IncludeExclude {
            include: vec!["appnexus".into()],
            exclude: vec![],
        };
        let config = Arc::new(config);
        filter.add_config(0, &config);

        let connector = NoopConnector;
        let matching = BidRequest {
            exchange: "appnexus".into(),
            ..Default::default()
        };
        let active = rtb_bitset::ConfigSet::from_iter([0]);
        let mut state = FilterState::new(&matching, &connector, active, &[0]);
        filter.filter(&mut state).unwrap();
        assert!(state.configs().test(0));

        let other = BidRequest {
            exchange: "rubicon".into(),
            ..Default::default()
        };
        let active = rtb_bitset::ConfigSet::from_iter([0]);
        let mut state = FilterState::new(&other, &connector, active, &[0]);
        filter.filter(&mut state).unwrap();
        assert!(!state.configs().test(0));
    }
}
