//! Wire shapes of the proxy events exchanged with the Lambda service.
//!
//! A `null` field and a missing field both deserialize to `None`; an empty
//! object deserializes to `Some(empty map)`. The distinction matters because
//! the presence of `headers` selects single-value mode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type SingleValueMap = HashMap<String, String>;
pub type MultiValueMap = HashMap<String, Vec<String>>;

/// API Gateway REST proxy integration request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<MultiValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_query_string_parameters: Option<MultiValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_variables: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Application Load Balancer target-group request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbTargetGroupRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<MultiValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_query_string_parameters: Option<MultiValueMap>,
    #[serde(default)]
    pub request_context: AlbTargetGroupRequestContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbTargetGroupRequestContext {
    #[serde(default)]
    pub elb: ElbContext,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElbContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_group_arn: Option<String>,
}

/// Response expected by the API Gateway proxy integration.
///
/// Exactly one of `headers` and `multi_value_headers` is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<MultiValueMap>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Response expected by an ALB target group. ALB also requires the status line text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbTargetGroupResponse {
    pub status_code: u16,
    pub status_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<SingleValueMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<MultiValueMap>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}
