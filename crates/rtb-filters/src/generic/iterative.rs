use rtb_bitset::ConfigSet;
use rtb_core::CfgIdx;

/// Fallback for predicates with no efficient bitmap encoding: walks the
/// currently-eligible configs one at a time and asks a closure whether
/// each survives. Used by `ExchangePreFilter`/`ExchangePostFilter`, whose
/// verdict depends on a connector callback rather than static config data.
pub struct IterativeFilter;

impl IterativeFilter {
    pub fn filter(configs: &ConfigSet, mut keep: impl FnMut(CfgIdx) -> bool) -> ConfigSet {
        let mut result = configs.clone();
        for index in configs.iter() {
            if !keep(index) {
                result.reset(index);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_configs_that_fail_the_predicate() {
        let set: ConfigSet = (0..5).collect();
        let filtered = IterativeFilter::filter(&set, |idx| idx % 2 == 0);
        assert!(filtered.test(0));
        assert!(!filtered.test(1));
        assert!(filtered.test(2));
        assert!(!filtered.test(3));
        assert!(filtered.test(4));
    }
}
