//! The seam between the adapter and the routing engine it embeds.

use crate::request::CanonicalRequest;
use crate::response::ResponseSink;

/// A routing engine that answers one request by writing into a response sink.
///
/// `serve` is synchronous and returns once the response is complete. Route
/// registration, matching and error pages are the engine's business; by the
/// time `serve` returns, failures should already be a 4xx/5xx status.
pub trait RoutingEngine: Send + Sync {
    fn serve(&self, sink: &mut dyn ResponseSink, request: CanonicalRequest);
}

impl<F> RoutingEngine for F
where
    F: Fn(&mut dyn ResponseSink, CanonicalRequest) + Send + Sync,
{
    fn serve(&self, sink: &mut dyn ResponseSink, request: CanonicalRequest) {
        self(sink, request);
    }
}
