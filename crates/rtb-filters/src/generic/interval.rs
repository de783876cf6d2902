use super::{EvalFilter, FilterAccumulator};
use rtb_bitset::ConfigSet;
use rtb_core::CfgIdx;

/// Half-open intervals `[lo, hi)` per config, represented as two sorted
/// boundary arrays rather than per-config ranges: `upper[hi]` carries a
/// config's bit for every value `< hi` (the interval hasn't ended yet),
/// `lower[lo]` carries it for every value `< lo` (the interval hasn't
/// started yet). A value matches a config iff its bit survives in the
/// upper union but not in the lower union — started and not yet ended.
#[derive(Debug, Default, Clone)]
pub struct IntervalFilter<T: Ord + Copy> {
    lower: Vec<(T, ConfigSet)>,
    upper: Vec<(T, ConfigSet)>,
}

fn insert_bound<T: Ord + Copy>(bounds: &mut Vec<(T, ConfigSet)>, bound: T, index: CfgIdx) {
    match bounds.binary_search_by(|(b, _)| b.cmp(&bound)) {
        Ok(pos) => bounds[pos].1.set(index),
        Err(pos) => {
            let mut set = ConfigSet::new();
            set.set(index);
            bounds.insert(pos, (bound, set));
        }
    }
}

fn remove_bound<T: Ord + Copy>(bounds: &mut Vec<(T, ConfigSet)>, bound: T, index: CfgIdx) {
    if let Ok(pos) = bounds.binary_search_by(|(b, _)| b.cmp(&bound)) {
        bounds[pos].1.reset(index);
        if bounds[pos].1.is_empty() {
            bounds.remove(pos);
        }
    }
}

impl<T: Ord + Copy> FilterAccumulator for IntervalFilter<T> {
    type Value = (T, T);

    fn new() -> Self {
        Self {
            lower: Vec::new(),
            upper: Vec::new(),
        }
    }

    fn add(&mut self, index: CfgIdx, values: &[(T, T)]) {
        for &(lo, hi) in values {
            insert_bound(&mut self.lower, lo, index);
            insert_bound(&mut self.upper, hi, index);
        }
    }

    fn remove(&mut self, index: CfgIdx, values: &[(T, T)]) {
        for &(lo, hi) in values {
            remove_bound(&mut self.lower, lo, index);
            remove_bound(&mut self.upper, hi, index);
        }
    }
}

impl<T: Ord + Copy> EvalFilter for IntervalFilter<T> {
    type Input = T;

    fn eval(&self, value: &T) -> ConfigSet {
        let mut not_ended = ConfigSet::new();
        let end = self.upper.partition_point(|(bound, _)| bound <= value);
        for (_, set) in &self.upper[end..] {
            not_ended.or(set);
        }

        let mut not_started = ConfigSet::new();
        let start = self.lower.partition_point(|(bound, _)| bound <= value);
        for (_, set) in &self.lower[start..] {
            not_started.or(set);
        }
        not_started.negate();

        not_ended.and(&not_started);
        not_ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_within_interval_matches() {
        let mut f = IntervalFilter::<i32>::new();
        f.add(0, &[(10, 20)]);
        f.add(1, &[(0, 10)]);

        assert!(f.eval(&15).test(0));
        assert!(!f.eval(&15).test(1));
        assert!(!f.eval(&5).test(0));
        assert!(f.eval(&5).test(1));
        assert!(!f.eval(&20).test(0)); // half-open: upper bound excluded
    }

    #[test]
    fn overlapping_intervals_union() {
        let mut f = IntervalFilter::<i32>::new();
        f.add(0, &[(0, 10)]);
        f.add(1, &[(5, 15)]);
        let at7 = f.eval(&7);
        assert!(at7.test(0));
        assert!(at7.test(1));
    }

    #[test]
    fn remove_restores_empty() {
        let mut f = IntervalFilter::<i32>::new();
        f.add(0, &[(0, 10)]);
        f.remove(0, &[(0, 10)]);
        assert!(f.eval(&5).is_empty());
        assert!(f.lower.is_empty());
        assert!(f.upper.is_empty());
    }
}
