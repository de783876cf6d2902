use crate::data::{Data, Slot};
use crate::registry::registry;
use parking_lot::Mutex;
use rtb_bitset::ConfigSet;
use rtb_core::{AgentConfig, BidRequest, CfgIdx, ExchangeConnector, FilterFault};
use rtb_filters::{BiddableSpots, FilterState};
use std::sync::Arc;

/// Owns the filter chain and live configuration table behind a single
/// published [`Data`] snapshot.
///
/// Readers (`filter`) clone the `Arc<Data>` under the mutex — a single,
/// uncontended pointer bump — and do everything else against their own
/// clone, so concurrent readers never block each other or a writer once
/// past that instant. Writers clone-mutate-publish in a loop: build the
/// new snapshot against the value they last observed, then take the
/// mutex and swap in only if nobody published ahead of them
/// (`Arc::ptr_eq`), retrying otherwise. This gives the same "readers see
/// a whole snapshot or the next one, never a partial one" guarantee an
/// RCU/CAS pair would, without unsafe code — reclamation of the old
/// snapshot is just the last `Arc` clone being dropped.
pub struct FilterPool {
    current: Mutex<Arc<Data>>,
}

impl FilterPool {
    pub fn new() -> Self {
        log::info!("[pool] constructing empty filter pool");
        Self {
            current: Mutex::new(Arc::new(Data::new())),
        }
    }

    fn snapshot(&self) -> Arc<Data> {
        self.current.lock().clone()
    }

    /// Clone-mutate-CAS-publish-retry. `mutate` receives an owned clone of
    /// the last-observed snapshot and returns the next version.
    fn publish(&self, mut mutate: impl FnMut(Data) -> Data) {
        loop {
            let observed = self.snapshot();
            let next = Arc::new(mutate(observed.as_ref().clone_for_write()));
            let mut guard = self.current.lock();
            if Arc::ptr_eq(&guard, &observed) {
                *guard = next;
                return;
            }
        }
    }

    pub fn init_with_default_filters(&self) {
        crate::registry::init_default_filters();
        let names = registry().list_filters();
        log::info!("[pool] installing {} default filters", names.len());
        for name in names {
            self.add_filter(&name)
                .expect("default filters are always registered");
        }
    }

    pub fn add_filter(&self, name: &str) -> Result<(), FilterFault> {
        let mut error = None;
        self.publish(|mut data| {
            if error.is_some() {
                return data;
            }
            match registry().make_filter(name) {
                Ok(mut filter) => {
                    for (index, slot) in data.slots.iter().enumerate() {
                        if let Some(slot) = slot {
                            filter.add_config(index, &slot.config);
                        }
                    }
                    data.filters.push(filter);
                    data.resort_by_priority();
                    data
                }
                Err(err) => {
                    error = Some(err);
                    data
                }
            }
        });
        match error {
            Some(err) => {
                log::warn!("[pool] add_filter({}) failed: {}", name, err);
                Err(err)
            }
            None => {
                log::info!("[pool] added filter {}", name);
                Ok(())
            }
        }
    }

    pub fn remove_filter(&self, name: &str) {
        self.publish(|mut data| {
            data.filters.retain(|f| f.name() != name);
            data
        });
        log::info!("[pool] removed filter {}", name);
    }

    pub fn add_config(&self, name: &str, config: Arc<AgentConfig>) -> CfgIdx {
        let mut assigned = 0;
        self.publish(|mut data| {
            let index = data.reserve_slot();
            for filter in &mut data.filters {
                filter.add_config(index, &config);
            }
            data.slots[index] = Some(Slot {
                name: name.to_string(),
                config: config.clone(),
            });
            data.active_configs.set(index);
            assigned = index;
            data
        });
        log::debug!("[pool] added config {} at slot {}", name, assigned);
        assigned
    }

    pub fn remove_config(&self, name: &str) {
        let mut removed = false;
        self.publish(|mut data| {
            let Some(index) = data.find_by_name(name) else {
                return data;
            };
            let Some(slot) = data.slots[index].take() else {
                return data;
            };
            for filter in &mut data.filters {
                filter.remove_config(index, &slot.config);
            }
            data.active_configs.reset(index);
            removed = true;
            data
        });
        if removed {
            log::debug!("[pool] removed config {}", name);
        } else {
            log::warn!("[pool] remove_config({}): no such config", name);
        }
    }

    /// Runs the filter chain in priority order, short-circuiting once
    /// `configs` is empty, and derives the biddable-spots map from the
    /// final creative matrices.
    pub fn filter(
        &self,
        request: &BidRequest,
        connector: &dyn ExchangeConnector,
    ) -> Result<(ConfigSet, BiddableSpots), FilterFault> {
        let data = self.snapshot();
        let creative_counts = data.creative_counts();
        let mut state = FilterState::new(
            request,
            connector,
            data.active_configs.clone(),
            &creative_counts,
        );
        for filter in &data.filters {
            if state.is_empty() {
                break;
            }
            filter.filter(&mut state)?;
        }
        Ok((state.configs().clone(), state.biddable_spots()))
    }
}

impl Default for FilterPool {
    fn default() -> Self {
        Self::new()
    }
}
