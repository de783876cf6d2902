use rtb_bitset::{ConfigSet, CreativeMatrix};
use rtb_core::{BidRequest, CfgIdx, ExchangeConnector};
use std::collections::HashMap;

/// Per-impression, per-config list of biddable creative ids — the filter
/// chain's final output, alongside the surviving [`ConfigSet`].
pub type BiddableSpots = HashMap<CfgIdx, Vec<(usize, Vec<usize>)>>;

/// The mutable working set a filter chain narrows for one bid request.
///
/// Constructed fresh per request from the pool's `activeConfigs` snapshot;
/// never shared across requests and never retained by a filter after
/// `filter()` returns.
pub struct FilterState<'a> {
    pub request: &'a BidRequest,
    pub connector: &'a dyn ExchangeConnector,
    /// How many creatives each live config declares, indexed by `cfgIdx`.
    pub creative_counts: &'a [usize],
    configs: ConfigSet,
    creatives: Vec<CreativeMatrix>,
}

impl<'a> FilterState<'a> {
    pub fn new(
        request: &'a BidRequest,
        connector: &'a dyn ExchangeConnector,
        active_configs: ConfigSet,
        creative_counts: &'a [usize],
    ) -> Self {
        let creatives = request
            .imp
            .iter()
            .map(|_| CreativeMatrix::with_default_row(active_configs.clone()))
            .collect();
        Self {
            request,
            connector,
            creative_counts,
            configs: active_configs,
            creatives,
        }
    }

    pub fn configs(&self) -> &ConfigSet {
        &self.configs
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// ANDs `mask` into the currently-eligible set.
    pub fn narrow_configs(&mut self, mask: &ConfigSet) {
        self.configs.and(mask);
    }

    /// ANDs `mask` into the creative matrix for `imp_id`. A config is only
    /// removed from `configs` once none of its impressions have a
    /// surviving creative — see `CreativeFilter`, the sole writer of
    /// creative matrices, which narrows `configs` by the union across all
    /// impressions after every one has been updated.
    pub fn narrow_creatives_for_imp(&mut self, imp_id: usize, mask: &CreativeMatrix) {
        self.creatives[imp_id].and(mask);
    }

    pub fn narrow_all_creatives(&mut self, mask: &CreativeMatrix) {
        for imp_id in 0..self.creatives.len() {
            self.narrow_creatives_for_imp(imp_id, mask);
        }
    }

    pub fn num_impressions(&self) -> usize {
        self.creatives.len()
    }

    /// The creative matrix for `imp_id`, restricted to the currently
    /// eligible configs.
    pub fn creatives(&self, imp_id: usize) -> CreativeMatrix {
        let mut masked = self.creatives[imp_id].clone();
        masked.and_columns(&self.configs);
        masked
    }

    /// Builds the final `(configs, biddableSpots)` output: for every
    /// impression, every creative id up to that config's declared count
    /// whose bit survives in the masked matrix contributes to that
    /// config's spot list for the impression.
    pub fn biddable_spots(&self) -> BiddableSpots {
        let mut spots: BiddableSpots = HashMap::new();
        for imp_id in 0..self.creatives.len() {
            let matrix = self.creatives(imp_id);
            for cfg in self.configs.iter() {
                let count = self.creative_counts.get(cfg).copied().unwrap_or(0);
                let creative_ids: Vec<usize> =
                    (0..count).filter(|&cid| matrix.test(cid, cfg)).collect();
                if !creative_ids.is_empty() {
                    spots.entry(cfg).or_default().push((imp_id, creative_ids));
                }
            }
        }
        spots
    }
}
