//! Single-shot HTTP client core behind the `rcurl` command.
//!
//! # Overview
//! Takes the resolved command-line inputs (method, URL, raw header lines,
//! raw body), builds one HTTP request, prints it, sends it with ureq and
//! prints the response. Both dumps go to any `io::Write` sink so the whole
//! pipeline can be driven from tests.
//!
//! # Design
//! - `RequestRunner` is the only stateful piece; it holds the HTTP agent.
//! - Resolution (`resolve_*`, `build_request`, `apply_headers`) is pure and
//!   exposed for direct testing.
//! - No retries, no timeouts, no concurrency: one request per run, and the
//!   first error ends it.

pub mod client;
pub mod error;
pub mod http;
pub mod print;
pub mod types;

pub use client::{
    apply_headers, build_request, resolve_body, resolve_method, resolve_url, RequestRunner,
};
pub use error::CurlError;
pub use http::{Headers, InboundResponse, OutboundRequest};
pub use print::{print_request, print_response};
pub use types::{Invocation, RunnerConfig};
