use super::{EvalFilter, FilterAccumulator};
use rtb_bitset::ConfigSet;
use rtb_core::CfgIdx;

/// `(emptyIncludes | includes.eval(x)) & !excludes.eval(x)`, short-circuiting
/// before the exclude side is even evaluated when the include side is
/// already empty — configs with nothing to exclude from don't pay for the
/// exclude lookup.
pub struct IncludeExcludeFilter<F: EvalFilter + FilterAccumulator> {
    empty_includes: ConfigSet,
    includes: F,
    excludes: F,
}

impl<F: EvalFilter + FilterAccumulator + Clone> Clone for IncludeExcludeFilter<F> {
    fn clone(&self) -> Self {
        Self {
            empty_includes: self.empty_includes.clone(),
            includes: self.includes.clone(),
            excludes: self.excludes.clone(),
        }
    }
}

impl<F: EvalFilter + FilterAccumulator> Default for IncludeExcludeFilter<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: EvalFilter + FilterAccumulator> IncludeExcludeFilter<F> {
    pub fn new() -> Self {
        Self {
            empty_includes: ConfigSet::new(),
            includes: F::new(),
            excludes: F::new(),
        }
    }

    pub fn add_config(&mut self, index: CfgIdx, include: &[F::Value], exclude: &[F::Value]) {
        if include.is_empty() {
            self.empty_includes.set(index);
        } else {
            self.includes.add(index, include);
        }
        self.excludes.add(index, exclude);
    }

    pub fn remove_config(&mut self, index: CfgIdx, include: &[F::Value], exclude: &[F::Value]) {
        if include.is_empty() {
            self.empty_includes.reset(index);
        } else {
            self.includes.remove(index, include);
        }
        self.excludes.remove(index, exclude);
    }

    pub fn filter(&self, input: &F::Input) -> ConfigSet {
        let mut configs = self.empty_includes.clone();
        configs.or(&self.includes.eval(input));
        if configs.is_empty() {
            return configs;
        }
        let mut excluded = self.excludes.eval(input);
        excluded.negate();
        configs.and(&excluded);
        configs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::ListFilter;

    #[test]
    fn empty_include_matches_anything_unless_excluded() {
        let mut f: IncludeExcludeFilter<ListFilter<&str>> = IncludeExcludeFilter::new();
        f.add_config(0, &[], &[]); // matches everything
        f.add_config(1, &["us"], &[]); // matches only "us"
        f.add_config(2, &[], &["us"]); // matches everything except "us"

        let us = f.filter(&"us");
        assert!(us.test(0));
        assert!(us.test(1));
        assert!(!us.test(2));

        let fr = f.filter(&"fr");
        assert!(fr.test(0));
        assert!(!fr.test(1));
        assert!(fr.test(2));
    }

    #[test]
    fn remove_restores_prior_state() {
        let mut f: IncludeExcludeFilter<ListFilter<&str>> = IncludeExcludeFilter::new();
        f.add_config(0, &["us"], &["ca"]);
        f.remove_config(0, &["us"], &["ca"]);
        assert!(f.filter(&"us").is_empty());
        assert!(f.filter(&"ca").is_empty());
    }
}
