use std::io;

use http::{HeaderMap, StatusCode};

use super::ResponseSink;

/// Captures status, headers and body written by the engine for one invocation.
#[derive(Debug)]
pub struct ResponseCollector {
    headers: HeaderMap,
    status: Option<StatusCode>,
    default_status: StatusCode,
    body: Vec<u8>,
}

impl Default for ResponseCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_status(StatusCode::OK)
    }

    /// Collector whose unset status resolves to `default_status`.
    #[must_use]
    pub fn with_default_status(default_status: StatusCode) -> Self {
        Self {
            headers: HeaderMap::new(),
            status: None,
            default_status,
            body: Vec::new(),
        }
    }

    /// Status explicitly written by the engine, if any.
    #[must_use]
    pub fn written_status(&self) -> Option<StatusCode> {
        self.status
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(self.default_status)
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (StatusCode, HeaderMap, Vec<u8>) {
        let status = self.status();
        (status, self.headers, self.body)
    }
}

impl ResponseSink for ResponseCollector {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, buf: &[u8]) -> usize {
        self.body.extend_from_slice(buf);
        buf.len()
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

impl io::Write for ResponseCollector {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(ResponseSink::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use std::io::Write as _;

    #[test]
    fn test_unset_status_uses_default() {
        let collector = ResponseCollector::new();
        assert_eq!(collector.written_status(), None);
        assert_eq!(collector.status(), StatusCode::OK);

        let collector = ResponseCollector::with_default_status(StatusCode::NO_CONTENT);
        assert_eq!(collector.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_last_status_wins() {
        let mut collector = ResponseCollector::new();
        collector.write_status(StatusCode::CREATED);
        collector.write_status(StatusCode::NOT_FOUND);
        assert_eq!(collector.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_writes_append_and_report_length() {
        let mut collector = ResponseCollector::new();
        assert_eq!(ResponseSink::write(&mut collector, b"Hello, "), 7);
        write!(collector, "{}!", "Bruce").unwrap();
        assert_eq!(collector.body(), b"Hello, Bruce!");
    }

    #[test]
    fn test_headers_accumulate_between_writes() {
        let mut collector = ResponseCollector::new();
        collector
            .headers_mut()
            .append("set-cookie", HeaderValue::from_static("a"));
        ResponseSink::write(&mut collector, b"body");
        collector
            .headers_mut()
            .append("set-cookie", HeaderValue::from_static("b"));

        let values: Vec<_> = collector.headers().get_all("set-cookie").iter().collect();
        assert_eq!(values, vec!["a", "b"]);
    }
}
