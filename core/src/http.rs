//! Request and response values that flow through the pipeline.
//!
//! # Design
//! `OutboundRequest` is built from resolved inputs and printed before it is
//! converted into a `ureq::http::Request` for sending. The host override is
//! kept apart from the header list so it never shows up in the printed
//! headers, matching how it is treated on the wire: it replaces the `Host`
//! header rather than adding a second one.
//!
//! `Headers` is a small ordered multimap. Names compare case-insensitively
//! and keep the spelling of their first occurrence; values keep insertion
//! order per name, and names keep first-insertion order overall.

use std::fmt;
use std::io::Read;

use ureq::http::header::{HeaderMap, HOST, USER_AGENT};
use ureq::http::{Method, Request, Uri};

/// Ordered header multimap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<String>)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `name`, keeping any values already present.
    pub fn append(&mut self, name: &str, value: &str) {
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, values)) => values.push(value.to_string()),
            None => self
                .entries
                .push((name.to_string(), vec![value.to_string()])),
        }
    }

    /// All values recorded for `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_all(name).is_some()
    }

    /// Iterate over `(name, values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Header values are converted lossily: bytes that are not valid UTF-8
/// become U+FFFD in the printed dump. Only bodies are written byte for byte.
impl From<&HeaderMap> for Headers {
    fn from(map: &HeaderMap) -> Self {
        let mut headers = Headers::new();
        for (name, value) in map {
            headers.append(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        headers
    }
}

/// A request ready to be printed and sent.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub uri: Uri,
    /// The URL exactly as the user typed it; this is what gets printed.
    pub url: String,
    pub headers: Headers,
    pub host: Option<String>,
    pub body: Vec<u8>,
}

impl OutboundRequest {
    /// An empty body means the request is sent without body content.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Convert into an `http::Request` carrying `body`.
    ///
    /// `user_agent` is only used when no `User-Agent` header was supplied.
    pub(crate) fn to_http<B>(
        &self,
        body: B,
        user_agent: &str,
    ) -> Result<Request<B>, ureq::http::Error> {
        let mut builder = Request::builder()
            .method(self.method.clone())
            .uri(self.uri.clone());
        for (name, values) in self.headers.iter() {
            for value in values {
                builder = builder.header(name, value.as_str());
            }
        }
        if let Some(host) = &self.host {
            builder = builder.header(HOST, host.as_str());
        }
        if !self.headers.contains(USER_AGENT.as_str()) {
            builder = builder.header(USER_AGENT, user_agent);
        }
        builder.body(body)
    }
}

/// A received response whose body has not been read yet.
pub struct InboundResponse {
    pub status: u16,
    pub headers: Headers,
    /// Drained once by printing; dropping it releases the connection.
    pub body: Option<Box<dyn Read>>,
}

impl InboundResponse {
    pub(crate) fn from_ureq(response: ureq::http::Response<ureq::Body>) -> Self {
        let status = response.status().as_u16();
        let headers = Headers::from(response.headers());
        let body: Box<dyn Read> = Box::new(response.into_body().into_reader());
        Self {
            status,
            headers,
            body: Some(body),
        }
    }
}

impl fmt::Debug for InboundResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboundResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| ".."))
            .finish()
    }
}
