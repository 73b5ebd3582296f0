//! Collector state → proxy response event.
//!
//! In single-value mode every header's values are joined with a bare `,`.
//! Values that already contain commas cannot be told apart afterwards; the
//! proxy integrations accept exactly this folding, so it is kept as is.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use http::{HeaderMap, StatusCode};

use super::ResponseCollector;
use crate::core::events::{
    AlbTargetGroupResponse, ApiGatewayProxyResponse, MultiValueMap, SingleValueMap,
};
use crate::request::HeaderMode;

/// Response headers in the representation the inbound event used.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedHeaders {
    Single(SingleValueMap),
    Multi(MultiValueMap),
}

impl EncodedHeaders {
    fn into_fields(self) -> (Option<SingleValueMap>, Option<MultiValueMap>) {
        match self {
            EncodedHeaders::Single(headers) => (Some(headers), None),
            EncodedHeaders::Multi(headers) => (None, Some(headers)),
        }
    }
}

/// Event-shape-independent result of serializing a collector.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: EncodedHeaders,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Folds the collector's final state into a proxy response.
///
/// Text bodies are copied verbatim; bodies that are not UTF-8 are base64
/// encoded and flagged.
#[must_use]
pub fn serialize(collector: ResponseCollector, mode: HeaderMode) -> ProxyResponse {
    let (status, headers, body) = collector.into_parts();

    let headers = match mode {
        HeaderMode::MultiValue => EncodedHeaders::Multi(multi_value_headers(&headers)),
        HeaderMode::SingleValue => EncodedHeaders::Single(
            multi_value_headers(&headers)
                .into_iter()
                .map(|(name, values)| (name, values.join(",")))
                .collect(),
        ),
    };

    let (body, is_base64_encoded) = match String::from_utf8(body) {
        Ok(text) => (text, false),
        Err(e) => (STANDARD.encode(e.into_bytes()), true),
    };

    ProxyResponse {
        status,
        headers,
        body,
        is_base64_encoded,
    }
}

fn multi_value_headers(headers: &HeaderMap) -> MultiValueMap {
    headers
        .keys()
        .map(|name| {
            let values = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect();
            (name.as_str().to_string(), values)
        })
        .collect()
}

/// `"<code> <reason>"`, the status line text ALB expects.
#[must_use]
pub fn status_description(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

impl From<ProxyResponse> for ApiGatewayProxyResponse {
    fn from(response: ProxyResponse) -> Self {
        let (headers, multi_value_headers) = response.headers.into_fields();
        Self {
            status_code: response.status.as_u16(),
            headers,
            multi_value_headers,
            body: response.body,
            is_base64_encoded: response.is_base64_encoded,
        }
    }
}

impl From<ProxyResponse> for AlbTargetGroupResponse {
    fn from(response: ProxyResponse) -> Self {
        let (headers, multi_value_headers) = response.headers.into_fields();
        Self {
            status_code: response.status.as_u16(),
            status_description: status_description(response.status),
            headers,
            multi_value_headers,
            body: response.body,
            is_base64_encoded: response.is_base64_encoded,
        }
    }
}
