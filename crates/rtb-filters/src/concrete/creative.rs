use crate::filter::{Filter, priority};
use crate::state::FilterState;
use rtb_bitset::CreativeMatrix;
use rtb_core::{AgentConfig, CfgIdx, FilterFault, Format};
use std::collections::HashMap;
use std::sync::Arc;

/// The only filter that writes creative matrices. One `CreativeMatrix` per
/// distinct format (packed `width<<16|height`): row = creative-id within
/// the config, column = config. For each impression, unions the matrices
/// of every format the impression accepts and narrows the impression's
/// matrix (and thus `state.configs`) by the result.
#[derive(Default)]
pub struct CreativeFilter {
    by_format: HashMap<u32, CreativeMatrix>,
}

impl Filter for CreativeFilter {
    fn name(&self) -> &'static str {
        "creative"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(CreativeFilter {
            by_format: self.by_format.clone(),
        })
    }

    fn priority(&self) -> u32 {
        priority::CREATIVE_FORMAT
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for (creative_id, creative) in config.creatives.iter().enumerate() {
            self.by_format
                .entry(creative.format.pack())
                .or_default()
                .set(creative_id, index);
        }
    }

    fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        for (creative_id, creative) in config.creatives.iter().enumerate() {
            if let Some(matrix) = self.by_format.get_mut(&creative.format.pack()) {
                matrix.reset(creative_id, index);
            }
        }
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        let mut any_biddable = rtb_bitset::ConfigSet::new();
        for imp_id in 0..state.num_impressions() {
            let formats: Vec<Format> = state.request.imp[imp_id].formats.clone();
            let mut union = CreativeMatrix::new();
            for format in formats {
                if let Some(matrix) = self.by_format.get(&format.pack()) {
                    union.or(matrix);
                }
            }
            state.narrow_creatives_for_imp(imp_id, &union);
            any_biddable.or(&state.creatives(imp_id).aggregate());
        }
        // A config survives if at least one impression still has a
        // biddable creative for it — bidding is per-impression, so one
        // unmatched impression shouldn't disqualify a config from every
        // other impression in the request.
        state.narrow_configs(&any_biddable);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_core::{BidRequest, Creative, Imp};

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

    /// c0: creatives [_, 100x100, 300x300] (index 0 is a placeholder format
    /// that never matches). c1: creatives [100x100, 200x200].
    #[test]
    fn creative_format_scenario() {
        let mut filter = CreativeFilter::default();
        let mut c0 = AgentConfig::default();
        c0.creatives = vec![
            Creative {
                format: Format::new(1, 1),
            },
            Creative {
                format: Format::new(100, 100),
            },
            Creative {
                format: Format::new(300, 300),
            },
        ];
        let c0 = Arc::new(c0);
        let mut c1 = AgentConfig::default();
        c1.creatives = vec![
            Creative {
                format: Format::new(100, 100),
            },
            Creative {
                format: Format::new(200, 200),
            },
        ];
        let c1 = Arc::new(c1);
        filter.add_config(0, &c0);
        filter.add_config(1, &c1);

        let connector = NoopConnector;
        let request = BidRequest {
            imp: vec![
                Imp {
                    formats: vec![Format::new(100, 100)],
                    ..Default::default()
                },
                Imp {
                    formats: vec![Format::new(400, 400)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let active = rtb_bitset::ConfigSet::from_iter([0, 1]);
        let mut state = FilterState::new(&request, &connector, active, &[3, 2]);
        filter.filter(&mut state).unwrap();

        let spots = state.biddable_spots();
        let c0_spots = spots.get(&0).cloned().unwrap_or_default();
        assert!(c0_spots.iter().any(|(imp, ids)| *imp == 0 && ids == &[1]));
        assert!(!c0_spots.iter().any(|(imp, _)| *imp == 1));

        let c1_spots = spots.get(&1).cloned().unwrap_or_default();
        assert!(c1_spots.iter().any(|(imp, ids)| *imp == 0 && ids == &[0]));
    }
}
