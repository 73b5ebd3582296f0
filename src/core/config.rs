use std::env;
use std::str::FromStr;

use http::StatusCode;

use crate::errors::AdapterError;

pub const EVENT_SOURCE_VAR: &str = "ROUTELAMB_EVENT_SOURCE";
pub const DEFAULT_STATUS_VAR: &str = "ROUTELAMB_DEFAULT_STATUS";

/// Which proxy integration delivers events to the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSource {
    #[default]
    ApiGateway,
    TargetGroup,
}

impl FromStr for EventSource {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api_gateway" | "apigateway" | "apigw" => Ok(EventSource::ApiGateway),
            "alb" | "target_group" | "elb" => Ok(EventSource::TargetGroup),
            other => Err(AdapterError::Config(format!(
                "{}: unknown event source '{}'",
                EVENT_SOURCE_VAR, other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub event_source: EventSource,
    /// Status reported when the engine never calls `write_status`.
    pub default_status: StatusCode,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            event_source: EventSource::ApiGateway,
            default_status: StatusCode::OK,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Result<Self, AdapterError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdapterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(EVENT_SOURCE_VAR) {
            config.event_source = raw.parse()?;
        }

        if let Some(raw) = lookup(DEFAULT_STATUS_VAR) {
            let code = raw.trim().parse::<u16>().map_err(|e| {
                AdapterError::Config(format!("{}: {}", DEFAULT_STATUS_VAR, e))
            })?;
            config.default_status = StatusCode::from_u16(code).map_err(|e| {
                AdapterError::Config(format!("{}: {}", DEFAULT_STATUS_VAR, e))
            })?;
        }

        Ok(config)
    }
}
