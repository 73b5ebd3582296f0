//! Glue between `lambda_runtime` and [`ProxyHandler`].

use std::time::{Duration, UNIX_EPOCH};

use lambda_runtime::{Context, Error, LambdaEvent, service_fn};
use tracing::info;

use crate::core::config::{AdapterConfig, EventSource};
use crate::core::events::{
    AlbTargetGroupRequest, AlbTargetGroupResponse, ApiGatewayProxyRequest,
    ApiGatewayProxyResponse,
};
use crate::engine::RoutingEngine;
use crate::handler::ProxyHandler;
use crate::request::RequestContext;

impl From<&Context> for RequestContext {
    fn from(context: &Context) -> Self {
        let mut request_context = RequestContext::default();
        request_context.request_id =
            Some(context.request_id.clone()).filter(|id| !id.is_empty());
        request_context.deadline =
            (context.deadline > 0).then(|| UNIX_EPOCH + Duration::from_millis(context.deadline));
        request_context.xray_trace_id = context.xray_trace_id.clone();
        request_context
    }
}

/// Lambda handler body for API Gateway proxy events.
///
/// # Errors
///
/// Propagates request construction failures to the runtime.
pub fn api_gateway_handler<E: RoutingEngine>(
    handler: &ProxyHandler<E>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let context = RequestContext::from(&event.context);
    handler
        .handle_api_gateway(&event.payload, context)
        .map_err(Error::from)
}

/// Lambda handler body for ALB target-group events.
///
/// # Errors
///
/// Propagates request construction failures to the runtime.
pub fn target_group_handler<E: RoutingEngine>(
    handler: &ProxyHandler<E>,
    event: LambdaEvent<AlbTargetGroupRequest>,
) -> Result<AlbTargetGroupResponse, Error> {
    let context = RequestContext::from(&event.context);
    handler
        .handle_target_group(&event.payload, context)
        .map_err(Error::from)
}

/// Runs the Lambda event loop for API Gateway proxy events.
///
/// The engine should have its routes registered but must not be listening.
pub async fn start<E: RoutingEngine + 'static>(engine: E) -> Result<(), Error> {
    start_with_config(engine, AdapterConfig::default()).await
}

/// Runs the Lambda event loop for ALB target-group events.
pub async fn start_target_group<E: RoutingEngine + 'static>(engine: E) -> Result<(), Error> {
    let config = AdapterConfig {
        event_source: EventSource::TargetGroup,
        ..AdapterConfig::default()
    };
    start_with_config(engine, config).await
}

pub async fn start_with_config<E: RoutingEngine + 'static>(
    engine: E,
    config: AdapterConfig,
) -> Result<(), Error> {
    let source = config.event_source;
    let handler = ProxyHandler::with_config(engine, config);
    info!(event_source = ?source, "Starting proxy event adapter");

    match source {
        EventSource::ApiGateway => {
            lambda_runtime::run(service_fn(
                move |event: LambdaEvent<ApiGatewayProxyRequest>| {
                    let handler = handler.clone();
                    async move { api_gateway_handler(&handler, event) }
                },
            ))
            .await
        }
        EventSource::TargetGroup => {
            lambda_runtime::run(service_fn(
                move |event: LambdaEvent<AlbTargetGroupRequest>| {
                    let handler = handler.clone();
                    async move { target_group_handler(&handler, event) }
                },
            ))
            .await
        }
    }
}
