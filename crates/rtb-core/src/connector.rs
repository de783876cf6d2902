use crate::config::AgentConfig;
use crate::request::BidRequest;
use std::sync::Arc;

/// The subset of an exchange connector that the filter pipeline consumes.
///
/// Everything else about a connector (HTTP transport, auction protocol
/// parsing, response encoding, …) is the router's concern, not the filter
/// pipeline's; only identity and the two callbacks used by
/// `ExchangePreFilter`/`ExchangePostFilter` are part of this contract.
pub trait ExchangeConnector: Send + Sync {
    /// Stable name used to key provider data for the pre/post callbacks
    /// below. Per the filter pipeline's normalization of the open question
    /// around `ExchangeNameFilter`, that filter compares against
    /// `request.exchange` instead — see `ExchangeNameFilter::filter`.
    fn exchange_name(&self) -> &str;

    /// Pre-auction veto: called once per still-eligible config before the
    /// rest of the chain runs. A provider panic or soft failure must be
    /// caught by the caller and treated as `false`, never propagated.
    fn bid_request_pre_filter(
        &self,
        request: &BidRequest,
        config: &AgentConfig,
        provider_data: Option<&Arc<dyn std::any::Any + Send + Sync>>,
    ) -> bool;

    /// Post-auction veto, evaluated last after every other filter narrowed
    /// the set — see the priority rationale for why this runs last.
    fn bid_request_post_filter(
        &self,
        request: &BidRequest,
        config: &AgentConfig,
        provider_data: Option<&Arc<dyn std::any::Any + Send + Sync>>,
    ) -> bool;
}
