//! Proxy event → canonical request.
//!
//! API Gateway hands over the decoded resource path and decoded query values,
//! so both are escaped here. ALB passes the path and query exactly as the
//! client sent them: the path is kept verbatim (and recorded as the escaped
//! path), and query components are decoded before the common re-encoding.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Uri};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tracing::debug;
use url::form_urlencoded;

use super::{CanonicalRequest, HeaderMode, RequestBody, RequestContext};
use crate::core::events::{
    AlbTargetGroupRequest, ApiGatewayProxyRequest, MultiValueMap, SingleValueMap,
};
use crate::errors::AdapterError;

/// Characters escaped when turning a decoded path into a request target.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Borrowed view over the fields both event shapes share.
struct EventParts<'a> {
    method: &'a str,
    path: &'a str,
    headers: Option<&'a SingleValueMap>,
    multi_value_headers: Option<&'a MultiValueMap>,
    query: Option<&'a SingleValueMap>,
    multi_value_query: Option<&'a MultiValueMap>,
    body: Option<&'a str>,
    is_base64_encoded: bool,
}

/// Translates an API Gateway proxy event.
///
/// # Errors
///
/// Returns `AdapterError::RequestConstruction` when the method, target,
/// headers or base64 body cannot form a request.
pub fn translate_api_gateway(
    event: &ApiGatewayProxyRequest,
    context: RequestContext,
) -> Result<(CanonicalRequest, HeaderMode), AdapterError> {
    let parts = EventParts {
        method: &event.http_method,
        path: &event.path,
        headers: event.headers.as_ref(),
        multi_value_headers: event.multi_value_headers.as_ref(),
        query: event.query_string_parameters.as_ref(),
        multi_value_query: event.multi_value_query_string_parameters.as_ref(),
        body: event.body.as_deref(),
        is_base64_encoded: event.is_base64_encoded,
    };

    let mode = HeaderMode::from_headers_field(parts.headers);
    let path = utf8_percent_encode(non_empty_path(parts.path), PATH_ESCAPE).to_string();
    let query = build_query(&parts, mode, false);

    let request = build_request(&parts, mode, &path, &query)?.with_context(context);
    Ok((request, mode))
}

/// Translates an ALB target-group event and records its escaped path.
///
/// # Errors
///
/// Returns `AdapterError::RequestConstruction` when the method, target,
/// headers or base64 body cannot form a request.
pub fn translate_target_group(
    event: &AlbTargetGroupRequest,
    context: RequestContext,
) -> Result<(CanonicalRequest, HeaderMode), AdapterError> {
    let parts = EventParts {
        method: &event.http_method,
        path: &event.path,
        headers: event.headers.as_ref(),
        multi_value_headers: event.multi_value_headers.as_ref(),
        query: event.query_string_parameters.as_ref(),
        multi_value_query: event.multi_value_query_string_parameters.as_ref(),
        body: event.body.as_deref(),
        is_base64_encoded: event.is_base64_encoded,
    };

    let mode = HeaderMode::from_headers_field(parts.headers);
    let path = non_empty_path(parts.path);
    let query = build_query(&parts, mode, true);

    let request = build_request(&parts, mode, path, &query)?
        .with_raw_path(path)
        .with_context(context);
    Ok((request, mode))
}

fn non_empty_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

/// Encodes the query string. Keys are sorted; values keep their event order.
///
/// Components are handled as bytes so escapes that are not UTF-8 survive the
/// ALB decode and re-encode unchanged.
fn build_query(parts: &EventParts<'_>, mode: HeaderMode, decode: bool) -> String {
    let mut pairs: Vec<String> = Vec::new();
    let mut push = |key: &str, value: &str| {
        pairs.push(format!(
            "{}={}",
            encode_query_component(key, decode),
            encode_query_component(value, decode)
        ));
    };

    match mode {
        HeaderMode::MultiValue => {
            if let Some(query) = parts.multi_value_query {
                let mut keys: Vec<&String> = query.keys().collect();
                keys.sort();
                for key in keys {
                    for value in &query[key] {
                        push(key, value);
                    }
                }
            }
        }
        HeaderMode::SingleValue => {
            if let Some(query) = parts.query {
                let mut keys: Vec<&String> = query.keys().collect();
                keys.sort();
                for key in keys {
                    push(key, &query[key]);
                }
            }
        }
    }

    pairs.join("&")
}

fn encode_query_component(raw: &str, decode: bool) -> String {
    if decode {
        form_urlencoded::byte_serialize(&decode_query_component(raw)).collect()
    } else {
        form_urlencoded::byte_serialize(raw.as_bytes()).collect()
    }
}

fn decode_query_component(raw: &str) -> Vec<u8> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).collect()
}

fn build_request(
    parts: &EventParts<'_>,
    mode: HeaderMode,
    path: &str,
    query: &str,
) -> Result<CanonicalRequest, AdapterError> {
    let method = if parts.method.is_empty() {
        Method::GET
    } else {
        Method::from_bytes(parts.method.as_bytes())?
    };

    if !path.starts_with('/') {
        return Err(AdapterError::RequestConstruction(format!(
            "request target must start with '/': {}",
            path
        )));
    }

    let target = if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    };
    let uri: Uri = target.parse()?;

    let headers = build_headers(parts, mode)?;
    let body = build_body(parts)?;

    debug!(method = %method, target = %uri, mode = ?mode, "Translated proxy event");

    Ok(CanonicalRequest::new(method, uri, headers, body))
}

fn build_headers(parts: &EventParts<'_>, mode: HeaderMode) -> Result<HeaderMap, AdapterError> {
    let mut headers = HeaderMap::new();

    match mode {
        HeaderMode::MultiValue => {
            for (key, values) in parts.multi_value_headers.into_iter().flatten() {
                let name = header_name(key)?;
                for value in values {
                    headers.append(name.clone(), header_value(key, value)?);
                }
            }
        }
        HeaderMode::SingleValue => {
            for (key, value) in parts.headers.into_iter().flatten() {
                headers.insert(header_name(key)?, header_value(key, value)?);
            }
        }
    }

    Ok(headers)
}

fn header_name(key: &str) -> Result<HeaderName, AdapterError> {
    HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
        AdapterError::RequestConstruction(format!("invalid header name '{}': {}", key, e))
    })
}

fn header_value(key: &str, value: &str) -> Result<HeaderValue, AdapterError> {
    HeaderValue::from_str(value).map_err(|e| {
        AdapterError::RequestConstruction(format!("invalid value for header '{}': {}", key, e))
    })
}

fn build_body(parts: &EventParts<'_>) -> Result<RequestBody, AdapterError> {
    let bytes = match parts.body {
        None => Bytes::new(),
        Some(body) if parts.is_base64_encoded => Bytes::from(STANDARD.decode(body)?),
        Some(body) => Bytes::from(body.to_owned()),
    };
    Ok(RequestBody::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_query_component_handles_plus_and_escapes() {
        assert_eq!(decode_query_component("a+b%2Cc"), b"a b,c");
        assert_eq!(decode_query_component("plain"), b"plain");
        assert_eq!(decode_query_component("%FF%FE"), vec![0xff, 0xfe]);
    }

    #[test]
    fn test_non_utf8_escapes_are_re_encoded_verbatim() {
        assert_eq!(encode_query_component("%FF%FE", true), "%FF%FE");
        assert_eq!(encode_query_component("fish & chips", false), "fish+%26+chips");
    }

    #[test]
    fn test_path_escape_keeps_separators() {
        let escaped = utf8_percent_encode("/users/John Doe/50%", PATH_ESCAPE).to_string();
        assert_eq!(escaped, "/users/John%20Doe/50%25");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        assert_eq!(non_empty_path(""), "/");
        assert_eq!(non_empty_path("/a"), "/a");
    }
}
