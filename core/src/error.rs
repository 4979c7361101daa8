//! Error types for the request pipeline.
//!
//! # Design
//! Every variant is terminal: the pipeline stops at the first failure and
//! hands the error to the caller untouched. `MissingUrl` and
//! `RequestConstruction` are raised before any network activity;
//! `Transport` means the exchange itself failed. The underlying message is
//! kept verbatim so the CLI can print it as-is.

use std::io;

use thiserror::Error;

/// Errors returned by `RequestRunner`.
#[derive(Debug, Error)]
pub enum CurlError {
    /// No positional URL was supplied, or it was empty.
    #[error("missing URL")]
    MissingUrl,

    /// The method, URL or a header could not be assembled into a request.
    #[error("{0}")]
    RequestConstruction(#[source] ureq::http::Error),

    /// The network exchange failed (DNS, connect, TLS, or I/O while
    /// sending or receiving).
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// The output sink rejected a write.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl From<ureq::http::Error> for CurlError {
    fn from(err: ureq::http::Error) -> Self {
        CurlError::RequestConstruction(err)
    }
}

pub type Result<T> = std::result::Result<T, CurlError>;
