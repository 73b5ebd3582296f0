//! Canonical request handed to the routing engine, and the translators that
//! build it from proxy events.

pub mod translate;

use std::io::{self, BufRead, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use url::form_urlencoded;

pub use translate::{translate_api_gateway, translate_target_group};

/// Header/query representation used by an inbound event.
///
/// Chosen once per event from the presence of the single-value `headers`
/// field and mirrored by the outbound response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    SingleValue,
    MultiValue,
}

impl HeaderMode {
    #[must_use]
    pub fn from_headers_field<T>(headers: Option<&T>) -> Self {
        match headers {
            Some(_) => HeaderMode::SingleValue,
            None => HeaderMode::MultiValue,
        }
    }

    #[must_use]
    pub fn is_multi_value(self) -> bool {
        self == HeaderMode::MultiValue
    }
}

/// Shared flag the invoking environment can flip to ask the engine to stop.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Invocation metadata propagated into the request for the engine to observe.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub deadline: Option<SystemTime>,
    pub xray_trace_id: Option<String>,
    cancellation: CancellationFlag,
}

impl RequestContext {
    #[must_use]
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    #[must_use]
    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    /// True once the flag was raised or the invocation deadline has passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
            || self
                .deadline
                .is_some_and(|deadline| SystemTime::now() >= deadline)
    }

    /// Time left before the deadline, if one is known.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline
                .duration_since(SystemTime::now())
                .unwrap_or(Duration::ZERO)
        })
    }
}

/// In-memory request body. Never null: an empty event body reads as zero bytes.
#[derive(Debug, Clone, Default)]
pub struct RequestBody(Cursor<Bytes>);

impl RequestBody {
    #[must_use]
    pub fn new(bytes: Bytes) -> Self {
        Self(Cursor::new(bytes))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The whole body, regardless of how much has been read.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.get_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.get_ref().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.get_ref().is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.0.into_inner()
    }
}

impl Read for RequestBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl BufRead for RequestBody {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.0.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.0.consume(amt);
    }
}

/// Escaped path carried in `http::Request` extensions by [`CanonicalRequest::into_http`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedPath(pub String);

/// The engine-agnostic request built from one proxy event.
#[derive(Debug)]
pub struct CanonicalRequest {
    method: Method,
    uri: Uri,
    raw_path: Option<String>,
    headers: HeaderMap,
    body: RequestBody,
    context: RequestContext,
}

impl CanonicalRequest {
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: RequestBody) -> Self {
        Self {
            method,
            uri,
            raw_path: None,
            headers,
            body,
            context: RequestContext::default(),
        }
    }

    #[must_use]
    pub fn with_raw_path(mut self, raw_path: impl Into<String>) -> Self {
        self.raw_path = Some(raw_path.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// The explicitly populated escaped path, if the event source set one.
    pub fn raw_path(&self) -> Option<&str> {
        self.raw_path.as_deref()
    }

    /// Escaped path for matching: the raw path when present, else the target's path.
    pub fn escaped_path(&self) -> &str {
        self.raw_path.as_deref().unwrap_or_else(|| self.uri.path())
    }

    /// Decoded query pairs in the order they appear in the target.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query_values(&self, key: &str) -> Vec<String> {
        self.query_pairs()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, when it is visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut RequestBody {
        &mut self.body
    }

    pub fn into_body(self) -> RequestBody {
        self.body
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Converts into an `http::Request` for engines built on the `http` types.
    ///
    /// The context and the escaped path (when set) travel as extensions.
    pub fn into_http(self) -> http::Request<RequestBody> {
        let mut request = http::Request::new(self.body);
        *request.method_mut() = self.method;
        *request.uri_mut() = self.uri;
        *request.headers_mut() = self.headers;
        request.extensions_mut().insert(self.context);
        if let Some(raw_path) = self.raw_path {
            request.extensions_mut().insert(EscapedPath(raw_path));
        }
        request
    }
}
