use crate::filter::{Filter, priority};
use crate::generic::{IncludeExcludeFilter, ListFilter};
use crate::state::FilterState;
use rtb_core::{AdPosition, AgentConfig, CfgIdx, FilterFault};
use std::sync::Arc;

/// `IncludeExcludeFilter<ListFilter<AdPosition>>`, applied to every
/// impression and ANDed together — a config must accept the fold position
/// of every impression in the request, not just one.
#[derive(Default, Clone)]
pub struct FoldPositionFilter {
    inner: IncludeExcludeFilter<ListFilter<AdPosition>>,
}

impl Filter for FoldPositionFilter {
    fn name(&self) -> &'static str {
        "foldPosition"
    }

    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }

    fn priority(&self) -> u32 {
        priority::FOLD_POSITION
    }

    fn add_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        self.inner.add_config(
            index,
            &config.fold_position_filter.include,
            &config.fold_position_filter.exclude,
        );
    }

    fn remove_config(&mut self, index: CfgIdx, config: &Arc<AgentConfig>) {
        self.inner.remove_config(
            index,
            &config.fold_position_filter.include,
            &config.fold_position_filter.exclude,
        );
    }

    fn filter(&self, state: &mut FilterState<'_>) -> Result<(), FilterFault> {
        for imp in &state.request.imp {
            let position = imp.position.unwrap_or(AdPosition::Unknown);
            let mask = self.inner.filter(&position);
            state.narrow_configs(&mask);
            if state.is_empty() {
                break;
            }
        }
        Ok(())
    }
}
