use super::{EvalFilter, FilterAccumulator};
use rtb_bitset::ConfigSet;
use rtb_core::{CfgIdx, Segment, SegmentList};
use std::collections::HashMap;

/// `label -> ConfigSet`, split by label kind since integer and string
/// segment labels hash and compare independently.
#[derive(Debug, Default, Clone)]
pub struct SegmentListFilter {
    int_labels: HashMap<i32, ConfigSet>,
    str_labels: HashMap<String, ConfigSet>,
}

impl FilterAccumulator for SegmentListFilter {
    type Value = Segment;

    fn new() -> Self {
        Self {
            int_labels: HashMap::new(),
            str_labels: HashMap::new(),
        }
    }

    fn add(&mut self, index: CfgIdx, values: &[Segment]) {
        for label in values {
            match label {
                Segment::Int(n) => self.int_labels.entry(*n).or_default().set(index),
                Segment::Str(s) => self.str_labels.entry(s.clone()).or_default().set(index),
            }
        }
    }

    fn remove(&mut self, index: CfgIdx, values: &[Segment]) {
        for label in values {
            match label {
                Segment::Int(n) => {
                    if let Some(set) = self.int_labels.get_mut(n) {
                        set.reset(index);
                        if set.is_empty() {
                            self.int_labels.remove(n);
                        }
                    }
                }
                Segment::Str(s) => {
                    if let Some(set) = self.str_labels.get_mut(s) {
                        set.reset(index);
                        if set.is_empty() {
                            self.str_labels.remove(s);
                        }
                    }
                }
            }
        }
    }
}

impl EvalFilter for SegmentListFilter {
    type Input = SegmentList;

    fn eval(&self, input: &SegmentList) -> ConfigSet {
        let mut matched = ConfigSet::new();
        for label in input.labels() {
            let set = match label {
                Segment::Int(n) => self.int_labels.get(n),
                Segment::Str(s) => self.str_labels.get(s.as_str()),
            };
            if let Some(set) = set {
                matched.or(set);
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_label_kinds() {
        let mut f = SegmentListFilter::new();
        f.add(0, &[Segment::Int(7), Segment::Str("sports".into())]);

        let request: SegmentList = [Segment::Int(7)].into_iter().collect();
        assert!(f.eval(&request).test(0));

        let miss: SegmentList = [Segment::Int(8)].into_iter().collect();
        assert!(f.eval(&miss).is_empty());
    }
}
