use crate::filter::{Filter, priority};
use crate::generic::{IncludeExcludeFilter, RegexFilter};
use crate::state::FilterState;
use rtb_core::{AgentConfig, CfgIdx, FilterFault};
use std::sync::Arc;

macro_rules! regex_field_filter {
    ($name:ident, $filter_name:literal, $priority:path, $field:ident, $request_field:ident) => {
        #[derive(Default, Clone)]
        pub struct $name {
            inner: IncludeExcludeFilter<RegexFilter>,
        }

        impl Filter for $name {
            fn name(&self) -> &'static str {
                $filter_name
            }

            fn clone_box(&self) -> Box<dyn Filter> {
                Box::new(self.clone())
            }

            fn priority(&self) -> u32 {
                $priority
            }

            fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
                self.inner
                    .add_config(index, &config.$field.include, &config.$field.exclude);
            }

            fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
                self.inner
                    .remove_config(index, &config.$field.include, &config.$field.exclude);
            }

            fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
                let mask = self.inner.filter(state.request.$request_field.as_str());
                state.narrow_configs(&mask);
                Ok(())
            }
        }
    };
}

regex_field_filter!(UrlRegexFilter, "url", priority::URL, url_filter, url);
regex_field_filter!(
    LanguageRegexFilter,
    "language",
    priority::LANGUAGE,
    language_filter,
    language
);
regex_field_filter!(
    LocationRegexFilter,
    "location",
    priority::LOCATION,
    location_filter,
    location
);
