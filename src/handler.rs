//! Per-invocation pipeline: translate, dispatch into the engine, serialize.
//!
//! Every call builds its own request and collector, so one handler can serve
//! concurrent invocations as long as the engine itself is `Sync`.

use std::sync::Arc;

use tracing::{debug, error};

use crate::core::config::AdapterConfig;
use crate::core::events::{
    AlbTargetGroupRequest, AlbTargetGroupResponse, ApiGatewayProxyRequest,
    ApiGatewayProxyResponse,
};
use crate::engine::RoutingEngine;
use crate::errors::AdapterError;
use crate::request::{
    CanonicalRequest, HeaderMode, RequestContext, translate_api_gateway, translate_target_group,
};
use crate::response::{ProxyResponse, ResponseCollector, serialize};

/// Serves proxy events with an embedded routing engine.
pub struct ProxyHandler<E> {
    engine: Arc<E>,
    config: AdapterConfig,
}

impl<E> Clone for ProxyHandler<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            config: self.config.clone(),
        }
    }
}

impl<E: RoutingEngine> ProxyHandler<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, AdapterConfig::default())
    }

    #[must_use]
    pub fn with_config(engine: E, config: AdapterConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Handles one API Gateway proxy event.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::RequestConstruction` if the event cannot form a
    /// request; no response is produced in that case.
    #[tracing::instrument(level = "info", skip_all, fields(method = %event.http_method, path = %event.path))]
    pub fn handle_api_gateway(
        &self,
        event: &ApiGatewayProxyRequest,
        context: RequestContext,
    ) -> Result<ApiGatewayProxyResponse, AdapterError> {
        let (request, mode) = translate_api_gateway(event, context).map_err(|e| {
            error!("Failed to translate API Gateway event: {}", e);
            e
        })?;

        Ok(self.dispatch(request, mode).into())
    }

    /// Handles one ALB target-group event.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::RequestConstruction` if the event cannot form a
    /// request; no response is produced in that case.
    #[tracing::instrument(level = "info", skip_all, fields(method = %event.http_method, path = %event.path))]
    pub fn handle_target_group(
        &self,
        event: &AlbTargetGroupRequest,
        context: RequestContext,
    ) -> Result<AlbTargetGroupResponse, AdapterError> {
        let (request, mode) = translate_target_group(event, context).map_err(|e| {
            error!("Failed to translate target group event: {}", e);
            e
        })?;

        Ok(self.dispatch(request, mode).into())
    }

    fn dispatch(&self, request: CanonicalRequest, mode: HeaderMode) -> ProxyResponse {
        let mut collector = ResponseCollector::with_default_status(self.config.default_status);

        self.engine.serve(&mut collector, request);

        if collector.written_status().is_none() {
            debug!(
                status = collector.status().as_u16(),
                "Engine did not write a status, using default"
            );
        }

        let response = serialize(collector, mode);
        debug!(
            status = response.status.as_u16(),
            multi_value = mode.is_multi_value(),
            "Serialized proxy response"
        );
        response
    }
}
