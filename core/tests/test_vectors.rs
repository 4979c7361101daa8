//! Verify input resolution against JSON test vectors stored in `test-vectors/`.
//!
//! Each header vector lists raw `-H` lines together with the header list and
//! host override they must produce; body vectors pair a raw `--data-raw`
//! value with the bytes that end up in the request.

use rcurl_core::{apply_headers, build_request, resolve_body, Invocation};
use serde::Deserialize;

const URL: &str = "http://localhost:3000/http/request";

#[derive(Deserialize)]
struct Vectors<T> {
    cases: Vec<T>,
}

#[derive(Deserialize)]
struct HeaderCase {
    name: String,
    lines: Vec<String>,
    expected_headers: Vec<(String, Vec<String>)>,
    expected_host: Option<String>,
}

#[derive(Deserialize)]
struct BodyCase {
    name: String,
    raw: Option<String>,
    expected: String,
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

#[test]
fn header_test_vectors() {
    let raw = include_str!("../../test-vectors/headers.json");
    let vectors: Vectors<HeaderCase> = serde_json::from_str(raw).unwrap();

    for case in vectors.cases {
        let name = &case.name;
        let inputs = Invocation {
            headers: case.lines,
            url: Some(URL.to_string()),
            ..Default::default()
        };
        let mut req = build_request("GET", URL, Vec::new()).unwrap();
        apply_headers(&mut req, &inputs);

        let actual: Vec<(String, Vec<String>)> = req
            .headers
            .iter()
            .map(|(n, values)| (n.to_string(), values.to_vec()))
            .collect();
        assert_eq!(actual, case.expected_headers, "{name}: headers");
        assert_eq!(req.host, case.expected_host, "{name}: host");
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

#[test]
fn body_test_vectors() {
    let raw = include_str!("../../test-vectors/body.json");
    let vectors: Vectors<BodyCase> = serde_json::from_str(raw).unwrap();

    for case in vectors.cases {
        let name = &case.name;
        let inputs = Invocation {
            raw_body: case.raw,
            url: Some(URL.to_string()),
            ..Default::default()
        };
        let body = resolve_body(&inputs);
        assert_eq!(body, case.expected.as_bytes(), "{name}: body");

        let req = build_request("POST", URL, body).unwrap();
        assert_eq!(req.has_body(), !case.expected.is_empty(), "{name}: has_body");
    }
}
