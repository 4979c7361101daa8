//! The single-shot request pipeline.
//!
//! # Design
//! `RequestRunner` owns one `ureq::Agent` and nothing else. `run` walks a
//! fixed sequence: resolve URL, method and body, build the request, apply
//! headers, print the request, send it, print the response. The first
//! failing step returns its error and nothing after it runs, so a transport
//! failure leaves the request dump printed and no response dump.
//!
//! The resolution steps are free of I/O and exposed individually so they
//! can be checked without a server.

use std::io::Write;

use ureq::http::{Method, Uri};
use ureq::{Agent, SendBody};

use crate::error::{CurlError, Result};
use crate::http::{InboundResponse, OutboundRequest};
use crate::print::{print_request, print_response};
use crate::types::{Invocation, RunnerConfig};

const DEFAULT_METHOD: &str = "GET";

/// Builds, prints and sends one HTTP request.
#[derive(Clone)]
pub struct RequestRunner {
    agent: Agent,
    user_agent: String,
}

impl RequestRunner {
    pub fn new(config: &RunnerConfig) -> Self {
        let mut builder = Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true);
        if let Some(max) = config.max_redirects {
            builder = builder.max_redirects(max);
        }
        Self {
            agent: builder.build().new_agent(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Run the whole pipeline, writing both dumps to `out`.
    pub fn run<W: Write>(&self, inputs: &Invocation, out: &mut W) -> Result<()> {
        let url = resolve_url(inputs)?;
        let method = resolve_method(inputs);
        let body = resolve_body(inputs);
        log::debug!("resolved {method} {url} ({} byte body)", body.len());

        let mut request = build_request(&method, &url, body)?;
        apply_headers(&mut request, inputs);

        print_request(&url, &request, out)?;
        let response = self.execute(&request)?;
        print_response(response, out)?;
        out.flush().map_err(CurlError::Output)
    }

    /// Send `request` and return the response with its body unread.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    pub fn execute(&self, request: &OutboundRequest) -> Result<InboundResponse> {
        log::debug!("sending {} {}", request.method, request.uri);
        let sent = if request.has_body() {
            let http = request.to_http(request.body.as_slice(), &self.user_agent)?;
            self.agent.run(http)
        } else {
            let http = request.to_http(SendBody::none(), &self.user_agent)?;
            self.agent.run(http)
        };
        let response = sent.map_err(|e| {
            log::debug!("transport failure: {e}");
            CurlError::Transport(e)
        })?;

        log::debug!("received {}", response.status());
        Ok(InboundResponse::from_ureq(response))
    }
}

impl Default for RequestRunner {
    fn default() -> Self {
        Self::new(&RunnerConfig::default())
    }
}

/// The user's method verbatim, or `GET` when none was given.
pub fn resolve_method(inputs: &Invocation) -> String {
    match inputs.method.as_deref() {
        Some(method) if !method.is_empty() => method.to_string(),
        _ => DEFAULT_METHOD.to_string(),
    }
}

/// The first positional argument. No syntax check happens here.
pub fn resolve_url(inputs: &Invocation) -> Result<String> {
    match inputs.url.as_deref() {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => Err(CurlError::MissingUrl),
    }
}

/// The raw body with surrounding whitespace trimmed; empty when absent.
pub fn resolve_body(inputs: &Invocation) -> Vec<u8> {
    match inputs.raw_body.as_deref() {
        Some(raw) if !raw.is_empty() => raw.trim().as_bytes().to_vec(),
        _ => Vec::new(),
    }
}

/// Assemble a request with no headers yet.
///
/// Fails when `method` is not a valid token or `url` is not a valid URI.
pub fn build_request(method: &str, url: &str, body: Vec<u8>) -> Result<OutboundRequest> {
    let method = Method::from_bytes(method.as_bytes()).map_err(ureq::http::Error::from)?;
    let uri = url.parse::<Uri>().map_err(ureq::http::Error::from)?;
    Ok(OutboundRequest {
        method,
        uri,
        url: url.to_string(),
        headers: Default::default(),
        host: None,
        body,
    })
}

/// Apply every raw `"Name: Value"` line to `request`.
///
/// Lines without a colon and lines with an empty name are skipped. A `Host`
/// line sets the host override instead of adding a header; the last one
/// wins.
pub fn apply_headers(request: &mut OutboundRequest, inputs: &Invocation) {
    for line in &inputs.headers {
        let Some((name, value)) = line.split_once(':') else {
            log::trace!("ignoring header line without ':': {line:?}");
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() {
            log::trace!("ignoring header line with empty name: {line:?}");
            continue;
        }
        if name.eq_ignore_ascii_case("host") {
            request.host = Some(value.to_string());
        } else {
            request.headers.append(name, value);
        }
    }
}
