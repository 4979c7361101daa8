use std::io::{self, Write};
use std::process;

use clap::Parser as ClapParser;

use rcurl_core::{CurlError, Invocation, RequestRunner, RunnerConfig};

/// rcurl: send one HTTP request and dump both the request and the response.
///
/// Accepts a small subset of curl's flags. Everything is printed to stdout;
/// errors go to stderr and make the process exit with status 1.
#[derive(ClapParser, Debug)]
#[command(name = "rcurl", version, about, long_about = None)]
struct Cli {
    /// Target URL.
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// HTTP method to use (default GET).
    #[arg(short = 'X', long = "request", value_name = "METHOD")]
    method: Option<String>,

    /// Header to send, "Name: Value". May be repeated.
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,

    /// Data sent as the request body, with surrounding whitespace trimmed.
    #[arg(long = "data-raw", value_name = "DATA", allow_hyphen_values = true)]
    data_raw: Option<String>,
}

impl From<Cli> for Invocation {
    fn from(cli: Cli) -> Self {
        Invocation {
            method: cli.method,
            headers: cli.headers,
            raw_body: cli.data_raw,
            url: cli.url,
        }
    }
}

/// Agent settings, with the user agent overridable via `RCURL_USER_AGENT`.
fn runner_config() -> RunnerConfig {
    let mut config = RunnerConfig::default();
    if let Ok(user_agent) = std::env::var("RCURL_USER_AGENT") {
        if !user_agent.is_empty() {
            config.user_agent = user_agent;
        }
    }
    config
}

fn run(inputs: Invocation) -> Result<(), CurlError> {
    let runner = RequestRunner::new(&runner_config());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = runner.run(&inputs, &mut out);
    // Whatever was dumped before a failure should still reach the terminal.
    let flushed = out.flush().map_err(CurlError::Output);
    result.and(flushed)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let inputs = Invocation::from(Cli::parse());
    log::debug!("{inputs:?}");

    if let Err(e) = run(inputs) {
        eprint!("\nerror: {e}\n");
        process::exit(1);
    }
}
