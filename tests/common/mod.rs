//! Minimal routing engine used by the integration tests.
//!
//! Routes are registered per method with `:name` segments for path
//! parameters, the way the embedded engines being adapted usually work.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Read;

use http::{HeaderValue, Method, StatusCode, header};
use percent_encoding::percent_decode_str;
use routelamb::RoutingEngine;
use routelamb::request::CanonicalRequest;
use routelamb::response::ResponseSink;
use serde_json::Value;

type RouteFn = Box<dyn Fn(&mut RouteContext, &mut dyn ResponseSink) + Send + Sync>;

pub struct RouteContext {
    pub request: CanonicalRequest,
    params: HashMap<String, String>,
}

impl RouteContext {
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn query(&self, key: &str) -> String {
        self.request
            .query_values(key)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    pub fn query_array(&self, key: &str) -> Vec<String> {
        self.request.query_values(key)
    }

    pub fn header(&self, name: &str) -> String {
        self.request.header(name).unwrap_or("").to_string()
    }

    pub fn body_string(&mut self) -> String {
        let mut body = String::new();
        self.request
            .body_mut()
            .read_to_string(&mut body)
            .expect("request body should be UTF-8");
        body
    }
}

struct Route {
    method: Method,
    segments: Vec<String>,
    handler: RouteFn,
}

#[derive(Default)]
pub struct TestRouter {
    routes: Vec<Route>,
}

impl TestRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<F>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&mut RouteContext, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post<F>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&mut RouteContext, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.route(Method::POST, pattern, handler)
    }

    pub fn route<F>(mut self, method: Method, pattern: &str, handler: F) -> Self
    where
        F: Fn(&mut RouteContext, &mut dyn ResponseSink) + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            segments: split_path(pattern).map(str::to_string).collect(),
            handler: Box::new(handler),
        });
        self
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn match_route(route: &Route, path: &str) -> Option<HashMap<String, String>> {
    let segments: Vec<&str> = split_path(path).collect();
    if segments.len() != route.segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (pattern, segment) in route.segments.iter().zip(segments) {
        let decoded = percent_decode_str(segment).decode_utf8_lossy().into_owned();
        match pattern.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), decoded);
            }
            None if *pattern == decoded => {}
            None => return None,
        }
    }
    Some(params)
}

impl RoutingEngine for TestRouter {
    fn serve(&self, sink: &mut dyn ResponseSink, request: CanonicalRequest) {
        let path = request.escaped_path().to_string();
        for route in &self.routes {
            if route.method != *request.method() {
                continue;
            }
            if let Some(params) = match_route(route, &path) {
                let mut context = RouteContext { request, params };
                (route.handler)(&mut context, sink);
                return;
            }
        }

        sink.write_status(StatusCode::NOT_FOUND);
        sink.write(b"404 page not found");
    }
}

/// Writes `value` as a JSON body with the given status.
pub fn json(sink: &mut dyn ResponseSink, status: StatusCode, value: &Value) {
    sink.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    sink.write_status(status);
    sink.write(value.to_string().as_bytes());
}

pub fn greeting_format(time_of_day: &str) -> Option<&'static str> {
    match time_of_day {
        "morning" => Some("Good morning"),
        "afternoon" => Some("Great afternoon"),
        "evening" => Some("Fair evening"),
        _ => None,
    }
}

pub fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).expect("response body should be JSON")
}
