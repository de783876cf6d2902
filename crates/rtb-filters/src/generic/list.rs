use super::{EvalFilter, FilterAccumulator};
use rtb_bitset::ConfigSet;
use rtb_core::CfgIdx;
use std::collections::HashMap;
use std::hash::Hash;

/// `value -> ConfigSet` of configs whose include/exclude list names it.
/// `filter(value)` is a single map lookup.
#[derive(Debug, Default, Clone)]
pub struct ListFilter<T: Eq + Hash + Clone> {
    data: HashMap<T, ConfigSet>,
}

impl<T: Eq + Hash + Clone> FilterAccumulator for ListFilter<T> {
    type Value = T;

    fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    fn add(&mut self, index: CfgIdx, values: &[T]) {
        for value in values {
            self.data.entry(value.clone()).or_default().set(index);
        }
    }

    fn remove(&mut self, index: CfgIdx, values: &[T]) {
        for value in values {
            if let Some(set) = self.data.get_mut(value) {
                set.reset(index);
                if set.is_empty() {
                    self.data.remove(value);
                }
            }
        }
    }
}

impl<T: Eq + Hash + Clone> EvalFilter for ListFilter<T> {
    type Input = T;

    fn eval(&self, input: &T) -> ConfigSet {
        self.data.get(input).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_filter_scenario() {
        let mut f = ListFilter::<i32>::new();
        f.add(0, &[1, 2, 3]);
        f.add(1, &[3, 4, 5]);
        f.add(2, &[1, 5]);
        f.add(3, &[0, 6]);

        assert_eq!(f.eval(&3).count(), 2);
        assert!(f.eval(&3).test(0));
        assert!(f.eval(&3).test(1));

        assert_eq!(f.eval(&0).count(), 1);
        assert!(f.eval(&0).test(3));

        assert!(f.eval(&7).is_empty());
    }

    #[test]
    fn remove_purges_empty_entries() {
        let mut f = ListFilter::<&str>::new();
        f.add(0, &["a"]);
        f.remove(0, &["a"]);
        assert!(!f.data.contains_key("a"));
    }
}
