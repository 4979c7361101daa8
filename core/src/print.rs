//! Text dump of the request and response.
//!
//! Both halves share one layout: a summary line, a blank line, the header
//! list, a blank line, then the body after a tab. Body bytes are written
//! verbatim.

use std::io::{self, ErrorKind, Read, Write};

use crate::error::{CurlError, Result};
use crate::http::{Headers, InboundResponse, OutboundRequest};

/// Write the outbound request, labelled with `url` as the user typed it.
pub fn print_request<W: Write>(url: &str, request: &OutboundRequest, out: &mut W) -> Result<()> {
    write_request(url, request, out).map_err(CurlError::Output)
}

fn write_request<W: Write>(url: &str, request: &OutboundRequest, out: &mut W) -> io::Result<()> {
    writeln!(out, "* Request: {} {}", request.method, url)?;
    write!(out, "\n* Request Headers:\n")?;
    write_headers(&request.headers, out)?;
    write!(out, "\n* Request Body:\n\t")?;
    out.write_all(&request.body)?;
    writeln!(out)
}

/// Write the response, draining its body into `out`.
///
/// The body reader is consumed here and dropped on return, whether or not
/// printing succeeds.
pub fn print_response<W: Write>(response: InboundResponse, out: &mut W) -> Result<()> {
    let InboundResponse {
        status,
        headers,
        body,
    } = response;

    write_response_head(status, &headers, out).map_err(CurlError::Output)?;

    if let Some(mut body) = body {
        let copied = copy_body(&mut body, out)?;
        log::debug!("response body: {copied} bytes");
    }
    writeln!(out).map_err(CurlError::Output)
}

fn write_response_head<W: Write>(status: u16, headers: &Headers, out: &mut W) -> io::Result<()> {
    writeln!(out, "* Response: {status}")?;
    write!(out, "\n* Response Headers:\n")?;
    write_headers(headers, out)?;
    write!(out, "\n* Response Body:\n\t")
}

fn write_headers<W: Write>(headers: &Headers, out: &mut W) -> io::Result<()> {
    for (name, values) in headers.iter() {
        writeln!(out, "\t- Header[{name}]={values:?}")?;
    }
    Ok(())
}

/// Like `io::copy`, but keeps read failures (transport) apart from write
/// failures (output).
fn copy_body<R: Read + ?Sized, W: Write>(body: &mut R, out: &mut W) -> Result<u64> {
    let mut buf = [0u8; 8 * 1024];
    let mut total = 0u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CurlError::Transport(ureq::Error::Io(e))),
        };
        out.write_all(&buf[..n]).map_err(CurlError::Output)?;
        total += n as u64;
    }
}
