//! routelamb - serve API Gateway and ALB proxy events with an embedded HTTP routing engine.
//!
//! Each invocation runs a straight pipeline:
//! 1. The proxy event is translated into a [`request::CanonicalRequest`]
//! 2. The routing engine writes its answer into a [`response::ResponseCollector`]
//! 3. The collector is serialized back into the proxy response shape
//!
//! The outbound header representation (single- or multi-value) always mirrors
//! the one the inbound event used.
//!
//! # Example
//!
//! ```
//! use routelamb::core::events::ApiGatewayProxyRequest;
//! use routelamb::request::{CanonicalRequest, RequestContext};
//! use routelamb::response::ResponseSink;
//! use routelamb::ProxyHandler;
//!
//! let handler = ProxyHandler::new(|sink: &mut dyn ResponseSink, request: CanonicalRequest| {
//!     let name = request.path().trim_start_matches("/greeting/").to_string();
//!     sink.write(format!("Hello, {}!", name).as_bytes());
//! });
//!
//! let event = ApiGatewayProxyRequest {
//!     http_method: "GET".to_string(),
//!     path: "/greeting/Bruce".to_string(),
//!     ..Default::default()
//! };
//!
//! let response = handler
//!     .handle_api_gateway(&event, RequestContext::default())
//!     .unwrap();
//! assert_eq!(response.status_code, 200);
//! assert_eq!(response.body, "Hello, Bruce!");
//! ```

pub mod core;
pub mod engine;
pub mod errors;
pub mod handler;
pub mod request;
pub mod response;
pub mod runtime;

pub use engine::RoutingEngine;
pub use errors::AdapterError;
pub use handler::ProxyHandler;
pub use runtime::{start, start_target_group, start_with_config};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. Safe to call more than once; later calls leave the first subscriber
/// in place.
///
/// # Example
///
/// ```
/// routelamb::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
