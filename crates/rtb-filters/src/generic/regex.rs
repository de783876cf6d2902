use super::{EvalFilter, FilterAccumulator};
use regex::Regex;
use rtb_bitset::ConfigSet;
use rtb_core::CfgIdx;
use std::collections::HashMap;

#[derive(Clone)]
struct Entry {
    regex: Regex,
    configs: ConfigSet,
}

/// `pattern -> {compiled regex, ConfigSet}`. Each pattern is compiled once,
/// on `add`, never on the hot `filter()` path; `eval` ORs together the
/// sets of every pattern that matches the input text.
#[derive(Default, Clone)]
pub struct RegexFilter {
    patterns: HashMap<String, Entry>,
}

impl FilterAccumulator for RegexFilter {
    type Value = String;

    fn new() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    fn add(&mut self, index: CfgIdx, values: &[String]) {
        for pattern in values {
            let entry = self
                .patterns
                .entry(pattern.clone())
                .or_insert_with(|| Entry {
                    regex: Regex::new(pattern)
                        .unwrap_or_else(|err| panic!("invalid regex {pattern:?}: {err}")),
                    configs: ConfigSet::new(),
                });
            entry.configs.set(index);
        }
    }

    fn remove(&mut self, index: CfgIdx, values: &[String]) {
        for pattern in values {
            if let Some(entry) = self.patterns.get_mut(pattern) {
                entry.configs.reset(index);
                if entry.configs.is_empty() {
                    self.patterns.remove(pattern);
                }
            }
        }
    }
}

impl EvalFilter for RegexFilter {
    type Input = str;

    fn eval(&self, input: &str) -> ConfigSet {
        let mut matched = ConfigSet::new();
        for entry in self.patterns.values() {
            if entry.regex.is_match(input) {
                matched.or(&entry.configs);
            }
        }
        matched
    }
}
