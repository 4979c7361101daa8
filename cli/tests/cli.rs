//! Exit-code and stream behavior of the built `rcurl` binary.

use std::net::SocketAddr;
use std::process::{Command, Output};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            echo_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn rcurl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rcurl"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("RCURL_USER_AGENT")
        .output()
        .unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[test]
fn no_arguments_reports_missing_url() {
    let output = rcurl(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(text(&output.stderr), "\nerror: missing URL\n");
}

#[test]
fn post_against_echo_server_exits_zero() {
    let addr = start_server();
    let url = format!("http://{addr}/http/status/201");
    let output = rcurl(&[
        url.as_str(),
        "-X",
        "POST",
        "-H",
        "Content-Type: application/json",
        "--data-raw",
        r#"{"a":1}"#,
    ]);

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    let stdout = text(&output.stdout);
    assert!(stdout.contains(&format!("* Request: POST {url}\n")));
    assert!(stdout.contains("\t- Header[Content-Type]=[\"application/json\"]\n"));
    assert!(stdout.contains("* Request Body:\n\t{\"a\":1}\n"));
    assert!(stdout.contains("* Response: 201\n"));
    assert!(stdout.contains("\t- Header[x-echo]=[\"ok\"]\n"));
    assert!(stdout.ends_with("\tcreated\n"));
}

#[test]
fn user_agent_from_environment() {
    let addr = start_server();
    let url = format!("http://{addr}/http/request");
    let output = Command::new(env!("CARGO_BIN_EXE_rcurl"))
        .arg(&url)
        .env_remove("RUST_LOG")
        .env("RCURL_USER_AGENT", "env-agent/3")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(text(&output.stdout).contains("\t- Header[x-echo-h-user-agent]=[\"env-agent/3\"]\n"));
}

#[test]
fn unreachable_url_prints_request_then_fails() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let url = format!("http://{addr}/");
    let output = rcurl(&[url.as_str()]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = text(&output.stdout);
    assert!(stdout.starts_with(&format!("* Request: GET {url}\n")));
    assert!(!stdout.contains("* Response:"));
    assert!(text(&output.stderr).starts_with("\nerror: "));
}

#[test]
fn invalid_method_fails_before_any_output() {
    let output = rcurl(&["-X", "BAD METHOD", "http://127.0.0.1:1/"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(text(&output.stderr).starts_with("\nerror: "));
}
