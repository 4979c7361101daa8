//! Inputs and configuration handed to the pipeline.
//!
//! # Design
//! `Invocation` is the whole user-facing surface as plain data: whatever
//! parses the command line fills it in once and never touches it again.
//! `RunnerConfig` holds the few knobs of the HTTP agent itself.

/// Resolved command-line inputs for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// `-X` / `--request`.
    pub method: Option<String>,
    /// `-H` / `--header`, raw `"Name: Value"` lines in the order given.
    pub headers: Vec<String>,
    /// `--data-raw`.
    pub raw_body: Option<String>,
    /// First positional argument.
    pub url: Option<String>,
}

/// HTTP agent settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Sent as `User-Agent` unless the caller supplies one.
    pub user_agent: String,
    /// `None` keeps the client's default redirect limit.
    pub max_redirects: Option<u32>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("rcurl/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: None,
        }
    }
}
