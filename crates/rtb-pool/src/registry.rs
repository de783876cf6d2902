use parking_lot::Mutex;
use rtb_core::FilterFault;
use rtb_filters::Filter;
use std::sync::OnceLock;

type Constructor = fn() -> Box<dyn Filter>;

/// Process-wide name -> constructor table. Registration happens once at
/// startup via [`init_default_filters`]; lookups happen on every
/// `FilterPool::add_filter`. Guarded by a plain mutex rather than relying
/// on static-initialization order, per the pipeline's design notes.
pub struct FilterRegistry {
    entries: Mutex<Vec<(String, Constructor)>>,
}

impl FilterRegistry {
    fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn register_filter(&self, name: &str, constructor: Constructor) {
        let mut entries = self.entries.lock();
        if let Some(slot) = entries.iter_mut().find(|(n, _)| n == name) {
            slot.1 = constructor;
        } else {
            entries.push((name.to_string(), constructor));
        }
    }

    pub fn make_filter(&self, name: &str) -> Result<Box<dyn Filter>, FilterFault> {
        let entries = self.entries.lock();
        entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ctor)| ctor())
            .ok_or_else(|| FilterFault::UnknownFilter {
                name: name.to_string(),
            })
    }

    /// Names in registration order, the order `init_default_filters` used.
    pub fn list_filters(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(n, _)| n.clone()).collect()
    }
}

static REGISTRY: OnceLock<FilterRegistry> = OnceLock::new();

pub fn registry() -> &'static FilterRegistry {
    REGISTRY.get_or_init(FilterRegistry::new)
}

/// Registers every built-in filter. The application calls this explicitly
/// before `FilterPool::init_with_default_filters` — nothing here runs as
/// a side effect of linking the crate.
pub fn init_default_filters() {
    let registry = registry();
    registry.register_filter("exchangePre", || {
        Box::new(rtb_filters::ExchangePreFilter::default())
    });
    registry.register_filter("foldPosition", || {
        Box::new(rtb_filters::FoldPositionFilter::default())
    });
    registry.register_filter("creative", || {
        Box::new(rtb_filters::CreativeFilter::default())
    });
    registry.register_filter("requiredIds", || {
        Box::new(rtb_filters::RequiredIdsFilter::default())
    });
    registry.register_filter("hourOfWeek", || {
        Box::new(rtb_filters::HourOfWeekFilter::default())
    });
    registry.register_filter("exchangeName", || {
        Box::new(rtb_filters::ExchangeNameFilter::default())
    });
    registry.register_filter("location", || {
        Box::new(rtb_filters::LocationRegexFilter::default())
    });
    registry.register_filter("language", || {
        Box::new(rtb_filters::LanguageRegexFilter::default())
    });
    registry.register_filter("segments", || {
        Box::new(rtb_filters::SegmentsFilter::default())
    });
    registry.register_filter("url", || Box::new(rtb_filters::UrlRegexFilter::default()));
    registry.register_filter("exchangePost", || {
        Box::new(rtb_filters::ExchangePostFilter::default())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_is_fatal() {
        let registry = FilterRegistry::new();
        let Err(err) = registry.make_filter("nope") else {
            panic!("expected an error")
        };
        assert_eq!(
            err,
            FilterFault::UnknownFilter {
                name: "nope".into()
            }
        );
    }

    #[test]
    fn registers_and_constructs() {
        let registry = FilterRegistry::new();
        registry.register_filter("hourOfWeek", || {
            Box::new(rtb_filters::HourOfWeekFilter::default())
        });
        let filter = registry.make_filter("hourOfWeek").unwrap();
        assert_eq!(filter.name(), "hourOfWeek");
    }

    #[test]
    fn default_filters_register_in_a_stable_order() {
        init_default_filters();
        let names = registry().list_filters();
        assert_eq!(names.first().map(String::as_str), Some("exchangePre"));
        assert_eq!(names.last().map(String::as_str), Some("exchangePost"));
    }
}
