//! In-memory response sink and the serializer that turns its state into a
//! proxy response event.

pub mod collector;
pub mod serialize;

use http::{HeaderMap, StatusCode};

pub use collector::ResponseCollector;
pub use serialize::{EncodedHeaders, ProxyResponse, serialize};

/// What a routing engine needs from a response writer.
///
/// Headers may be written before or between body writes; nothing is sent
/// anywhere, so the order carries no wire semantics.
pub trait ResponseSink {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Appends to the body and returns the number of bytes taken.
    fn write(&mut self, buf: &[u8]) -> usize;

    /// Records the status code. The last call wins.
    fn write_status(&mut self, status: StatusCode);
}
