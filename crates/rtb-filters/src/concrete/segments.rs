use crate::filter::{Filter, priority};
use crate::generic::{IncludeExcludeFilter, ListFilter, SegmentListFilter};
use crate::state::FilterState;
use rtb_bitset::ConfigSet;
use rtb_core::{AgentConfig, CfgIdx, FilterFault};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default, Clone)]
struct DomainEntry {
    filter: IncludeExcludeFilter<SegmentListFilter>,
    /// Configs that reject a request outright if this domain is absent.
    exclude_if_not_present: ConfigSet,
    /// Which exchanges a config's rule for this domain applies to; a
    /// config out of scope for the current exchange is treated as if it
    /// had no restriction at all (same as an empty include list).
    exchange_scope: IncludeExcludeFilter<ListFilter<String>>,
}

/// Per-segment-domain include/exclude targeting, plus presence and
/// exchange-scope overlays. The hardest concrete filter: every domain a
/// request mentions narrows independently, then every domain requiring
/// presence that the request *didn't* mention vetoes its registered
/// configs.
#[derive(Default, Clone)]
pub struct SegmentsFilter {
    domains: HashMap<String, DomainEntry>,
}

impl SegmentsFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Filter for SegmentsFilter {
    fn name(&self) -> &'static str {
        "segments"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }

    fn priority(&self) -> u32 {
        priority::SEGMENTS
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for (domain, info) in &config.segments {
            let entry = self.domains.entry(domain.clone()).or_default();
            entry
                .filter
                .add_config(index, info.include.labels(), info.exclude.labels());
            if info.exclude_if_not_present {
                entry.exclude_if_not_present.set(index);
            }
            entry.exchange_scope.add_config(
                index,
                &info.apply_to_exchanges.include,
                &info.apply_to_exchanges.exclude,
            );
        }
    }

    fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for (domain, info) in &config.segments {
            if let Some(entry) = self.domains.get_mut(domain) {
                entry
                    .filter
                    .remove_config(index, info.include.labels(), info.exclude.labels());
                if info.exclude_if_not_present {
                    entry.exclude_if_not_present.reset(index);
                }
                entry.exchange_scope.remove_config(
                    index,
                    &info.apply_to_exchanges.include,
                    &info.apply_to_exchanges.exclude,
                );
            }
        }
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        for (domain, segment_list) in &state.request.segments {
            let Some(entry) = self.domains.get(domain) else {
                continue;
            };
            let raw = entry.filter.filter(segment_list);
            let mut out_of_scope = entry.exchange_scope.filter(&state.request.exchange);
            out_of_scope.negate();
            let mut effective = raw;
            effective.or(&out_of_scope);
            state.narrow_configs(&effective);
            if state.is_empty() {
                return Ok(());
            }
        }

        for (domain, entry) in &self.domains {
            if state.request.segments.contains_key(domain) {
                continue;
            }
            let mut mask = entry.exclude_if_not_present.clone();
            mask.negate();
            state.narrow_configs(&mask);
            if state.is_empty() {
                return Ok(());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_core::{BidRequest, IncludeExclude, Segment, SegmentInfo, SegmentList};

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

    fn config_with(segments: HashMap<String, SegmentInfo>) -> Arc<AgentConfig> {
        let mut config = AgentConfig::default();
        config.segments = segments;
        Arc::new(config)
    }

    /// c0: no constraints. c1: seg1 present with no include list. c2: seg1 required present.
    #[test]
    fn exclude_if_not_present_scenario() {
        let mut filter = SegmentsFilter::new();

        let c0 = config_with(HashMap::new());
        let mut seg1_present: HashMap<String, SegmentInfo> = HashMap::new();
        seg1_present.insert("seg1".into(), SegmentInfo::default());
        let c1 = config_with(seg1_present);
        let mut seg1_required: HashMap<String, SegmentInfo> = HashMap::new();
        seg1_required.insert(
            "seg1".into(),
            SegmentInfo {
                exclude_if_not_present: true,
                ..Default::default()
            },
        );
        let c2 = config_with(seg1_required);

        filter.add_config(0, &c0);
        filter.add_config(1, &c1);
        filter.add_config(2, &c2);

        let connector = NoopConnector;

        // r0: no segments at all -> c0, c1 pass.
        let r0 = BidRequest::default();
        let active: ConfigSet = [0, 1, 2].into_iter().collect();
        let mut state = FilterState::new(&r0, &connector, active, &[0, 0, 0]);
        filter.filter(&mut state).unwrap();
        assert!(state.configs().test(0));
        assert!(state.configs().test(1));
        assert!(!state.configs().test(2));

        // r1: seg1 present -> all three pass.
        let mut r1 = BidRequest::default();
        r1.segments
            .insert("seg1".into(), SegmentList::new(vec![Segment::Int(1)]));
        let active: ConfigSet = [0, 1, 2].into_iter().collect();
        let mut state = FilterState::new(&r1, &connector, active, &[0, 0, 0]);
        filter.filter(&mut state).unwrap();
        assert!(state.configs().test(0));
        assert!(state.configs().test(1));
        assert!(state.configs().test(2));

        // r3: seg2, seg3 present but not seg1 -> c0, c1 pass.
        let mut r3 = BidRequest::default();
        r3.segments
            .insert("seg2".into(), SegmentList::new(vec![Segment::Int(1)]));
        r3.segments
            .insert("seg3".into(), SegmentList::new(vec![Segment::Int(1)]));
        let active: ConfigSet = [0, 1, 2].into_iter().collect();
        let mut state = FilterState::new(&r3, &connector, active, &[0, 0, 0]);
        filter.filter(&mut state).unwrap();
        assert!(state.configs().test(0));
        assert!(state.configs().test(1));
        assert!(!state.configs().test(2));
    }

    #[test]
    fn exchange_out_of_scope_is_treated_as_unrestricted() {
        let mut filter = SegmentsFilter::new();
        let mut segments = HashMap::new();
        segments.insert(
            "age".into(),
            SegmentInfo {
                include: SegmentList::new(vec![Segment::Int(18)]),
                apply_to_exchanges: IncludeExclude {
                    include: vec!["other-exchange".into()],
                    exclude: vec![],
                },
                ..Default::default()
            },
        );
        let config = config_with(segments);
        filter.add_config(0, &config);

        let connector = NoopConnector;
        let mut request = BidRequest {
            exchange: "test".into(),
            ..Default::default()
        };
        request
            .segments
            .insert("age".into(), SegmentList::new(vec![Segment::Int(30)]));
        let active: ConfigSet = [0].into_iter().collect();
        let mut state = FilterState::new(&request, &connector, active, &[0]);
        filter.filter(&mut state).unwrap();
        // config 0's age rule only applies to "other-exchange"; on "test" it's exempt.
        assert!(state.configs().test(0));
    }
}
