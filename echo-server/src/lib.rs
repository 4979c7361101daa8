use axum::{
    body::Bytes,
    extract::{OriginalUri, Path},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;

pub const ECHO_PATH: &str = "/http/request";
pub const STATUS_PATH: &str = "/http/status/{code}";
pub const REDIRECT_PATH: &str = "/http/redirect";

/// Where `REDIRECT_PATH` sends clients.
pub const REDIRECT_TARGET: &str = "/http/status/200";

const ECHO_HEADER_PREFIX: &str = "x-echo-h-";

pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route(ECHO_PATH, any(echo_request))
        .route(STATUS_PATH, any(echo_status))
        .route(REDIRECT_PATH, any(redirect))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn index() -> &'static str {
    "* /http/request\n* /http/status/{code}\n* /http/redirect\n"
}

/// Reflects the request: the body comes back unchanged, and the method,
/// host and every received header are mirrored into `x-echo-*` headers.
async fn echo_request(
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, HeaderMap, Bytes) {
    log::info!(
        "{uri} method={method} user-agent={:?} x-cloud-trace-context={:?} traceparent={:?}",
        header_str(&headers, "user-agent"),
        header_str(&headers, "x-cloud-trace-context"),
        header_str(&headers, "traceparent"),
    );

    let mut reply = echo_headers();
    if let Ok(value) = HeaderValue::from_str(method.as_str()) {
        reply.insert("x-echo-method", value);
    }
    if let Some(host) = headers.get("host") {
        reply.insert("x-echo-host", host.clone());
    }
    for (name, value) in &headers {
        let mirrored = format!("{ECHO_HEADER_PREFIX}{name}");
        if let Ok(mirrored) = HeaderName::try_from(mirrored) {
            reply.append(mirrored, value.clone());
        }
    }
    (StatusCode::OK, reply, body)
}

/// Answers with the status from the path and its lowercase reason phrase
/// as the body, e.g. `201` -> `created`.
async fn echo_status(Path(code): Path<u16>) -> impl IntoResponse {
    match StatusCode::from_u16(code) {
        Ok(status) => {
            let reason = status
                .canonical_reason()
                .unwrap_or_default()
                .to_lowercase();
            (status, echo_headers(), reason)
        }
        Err(_) => (
            StatusCode::BAD_REQUEST,
            echo_headers(),
            format!("invalid status code: {code}"),
        ),
    }
}

/// A bare `302 Found` pointing at `REDIRECT_TARGET`.
async fn redirect() -> (StatusCode, HeaderMap) {
    let mut headers = echo_headers();
    headers.insert("location", HeaderValue::from_static(REDIRECT_TARGET));
    (StatusCode::FOUND, headers)
}

fn echo_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-echo", HeaderValue::from_static("ok"));
    headers
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
