//! Minimal HTTP client over the modem's TCP socket commands
//!
//! The modem wraps inbound TCP data in a notification frame: the `+IPD,`
//! marker, a byte count, a colon, and the raw bytes. [`extract`] recovers
//! the HTTP status code and body from one such frame; the request side is
//! plain text written through the transaction engine after a send
//! announcement.

use core::fmt::Write as _;

use crate::modem::error::Error;
use crate::modem::{find_slice, Esp8266, TX_BUFFER_LEN};
use crate::serial::{Clock, Delay, SerialPort};
use crate::socket::LinkState;
use crate::storage::Sink;
use heapless::{String, Vec};

/// Marker introducing the modem's inbound-data notification.
pub const IPD_MARKER: &[u8] = b"+IPD,";

/// Capacity of an HTTP response body.
pub const BODY_BUFFER_LEN: usize = 2048;

const CONNECT_SETTLE_MS: u32 = 1_000;
const CONNECT_TIMEOUT_MS: u32 = 1_000;
const GET_ANNOUNCE_SETTLE_MS: u32 = 2_000;
const GET_ANNOUNCE_TIMEOUT_MS: u32 = 10_000;
const POST_ANNOUNCE_SETTLE_MS: u32 = 1_000;
const POST_ANNOUNCE_TIMEOUT_MS: u32 = 1_000;
const PAYLOAD_SETTLE_MS: u32 = 1_000;
const PAYLOAD_TIMEOUT_MS: u32 = 3_000;

const DOWNLOAD_CONNECT_TIMEOUT_MS: u32 = 5_000;
const DOWNLOAD_ANNOUNCE_SETTLE_MS: u32 = 0;
const DOWNLOAD_ANNOUNCE_TIMEOUT_MS: u32 = 2_000;
const DOWNLOAD_PAYLOAD_SETTLE_MS: u32 = 0;
const DOWNLOAD_PAYLOAD_TIMEOUT_MS: u32 = 3_000;

/// Result of an HTTP operation.
///
/// A `status_code` of 0 is the designated "could not complete the
/// transaction at all" sentinel, distinct from any real HTTP status. The
/// body is present if and only if the status code is 200; the modem profile
/// this driver targets discards non-200 bodies, and the driver mirrors
/// that.
#[derive(Debug)]
pub struct Response {
    /// HTTP status code, or 0 when the exchange never completed.
    pub status_code: u16,
    /// Response body, only for status 200.
    pub body: Option<Vec<u8, BODY_BUFFER_LEN>>,
}

impl Response {
    /// The sentinel response for an exchange that never completed.
    pub fn failed() -> Self {
        Self {
            status_code: 0,
            body: None,
        }
    }
}

/// Extracts the HTTP status code and body from one payload frame.
///
/// Everything before the first `+IPD,` marker is discarded. The remainder
/// splits at the first blank line into a synthetic header segment (length
/// field, colon, HTTP status line) and a candidate body. The status code is
/// the first whitespace-delimited all-digit token of the status line; a
/// frame without one is a parse failure, not a guess.
///
/// A 200 body that itself begins with a second copy of the marker has
/// everything through the next colon stripped first. The modem emits this
/// double prefix when a reply lands exactly on a framing boundary.
pub fn extract(raw: &[u8]) -> Result<(u16, Option<&[u8]>), Error> {
    let marker = find_slice(raw, IPD_MARKER).ok_or(Error::FrameError)?;
    let frame = &raw[marker + IPD_MARKER.len()..];

    let blank = find_slice(frame, b"\r\n\r\n").ok_or(Error::FrameError)?;
    let header = &frame[..blank];
    let candidate = &frame[blank + 4..];

    // Drop the length field: the status line starts after the first colon.
    let colon = find_slice(header, b":").ok_or(Error::FrameError)?;
    let header = &header[colon + 1..];
    let status_line = &header[..find_slice(header, b"\r\n").unwrap_or(header.len())];

    let token = status_line
        .split(|b: &u8| b.is_ascii_whitespace())
        .find(|tok| !tok.is_empty() && tok.iter().all(u8::is_ascii_digit))
        .ok_or(Error::FrameError)?;
    let code: u16 = core::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(Error::FrameError)?;

    if code != 200 {
        return Ok((code, None));
    }

    let body = if candidate.starts_with(IPD_MARKER) {
        match find_slice(candidate, b":") {
            Some(colon) => &candidate[colon + 1..],
            None => &candidate[candidate.len()..],
        }
    } else {
        candidate
    };
    Ok((200, Some(body)))
}

impl<S: SerialPort, T: Clock + Delay> Esp8266<S, T> {
    /// Performs an HTTP GET of `path` on `host:port`.
    ///
    /// Never fails outright: any transport, modem, or framing error yields
    /// the `(0, None)` sentinel response. The connection is closed on every
    /// path.
    pub fn http_get(&mut self, host: &str, path: &str, user_agent: &str, port: u16) -> Response {
        let mut request: String<TX_BUFFER_LEN> = String::new();
        if write!(
            request,
            "GET {} HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\n\r\n",
            path, host, user_agent
        )
        .is_err()
        {
            return Response::failed();
        }

        self.exchange(
            host,
            port,
            request.as_bytes(),
            GET_ANNOUNCE_SETTLE_MS,
            GET_ANNOUNCE_TIMEOUT_MS,
        )
    }

    /// Performs an HTTP POST of `content` to `path` on `host:port`.
    ///
    /// Failure behavior matches [`http_get`](Self::http_get).
    pub fn http_post(
        &mut self,
        host: &str,
        path: &str,
        user_agent: &str,
        content_type: &str,
        content: &str,
        port: u16,
    ) -> Response {
        let mut request: String<TX_BUFFER_LEN> = String::new();
        if write!(
            request,
            "POST {} HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n{}\r\n",
            path,
            host,
            user_agent,
            content_type,
            content.len(),
            content
        )
        .is_err()
        {
            return Response::failed();
        }

        self.exchange(
            host,
            port,
            request.as_bytes(),
            POST_ANNOUNCE_SETTLE_MS,
            POST_ANNOUNCE_TIMEOUT_MS,
        )
    }

    /// Downloads `segments` numbered resources into an append-only sink.
    ///
    /// One connection serves the whole download; segment `i` is requested
    /// as `{base_path}{i:03}`. Every drained reply chunk is independently
    /// run through [`extract`] (the modem re-frames each chunk with its own
    /// marker) and its body appended to `sink`. A non-200 status on any
    /// chunk, a missing send prompt, or a sink failure aborts the remaining
    /// download; completed segments stay in the sink.
    ///
    /// Returns the number of segments fully downloaded.
    pub fn http_download<K: Sink>(
        &mut self,
        host: &str,
        base_path: &str,
        segments: u32,
        user_agent: &str,
        port: u16,
        sink: &mut K,
    ) -> Result<u32, Error> {
        if let Err(e) = self.open_tcp(host, port, CONNECT_SETTLE_MS, DOWNLOAD_CONNECT_TIMEOUT_MS) {
            self.close();
            return Err(e);
        }

        let result = self.download_segments(host, base_path, segments, user_agent, sink);
        self.close();
        result
    }

    fn download_segments<K: Sink>(
        &mut self,
        host: &str,
        base_path: &str,
        segments: u32,
        user_agent: &str,
        sink: &mut K,
    ) -> Result<u32, Error> {
        let mut done = 0;
        for i in 0..segments {
            let mut request: String<TX_BUFFER_LEN> = String::new();
            write!(
                request,
                "GET {}{:03} HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\n\r\n",
                base_path, i, host, user_agent
            )
            .map_err(|_| Error::BufferOverflow)?;

            self.announce_send(
                request.len(),
                DOWNLOAD_ANNOUNCE_SETTLE_MS,
                DOWNLOAD_ANNOUNCE_TIMEOUT_MS,
            )?;

            self.transact_chunks(
                request.as_bytes(),
                DOWNLOAD_PAYLOAD_SETTLE_MS,
                DOWNLOAD_PAYLOAD_TIMEOUT_MS,
                |chunk| {
                    let (code, body) = extract(chunk)?;
                    if code != 200 {
                        return Err(Error::BadStatus);
                    }
                    sink.append(body.unwrap_or(&[]))
                        .map_err(|_| Error::SinkError)
                },
            )?;
            self.link = LinkState::Open;

            done += 1;
        }
        Ok(done)
    }

    fn exchange(
        &mut self,
        host: &str,
        port: u16,
        request: &[u8],
        announce_settle_ms: u32,
        announce_timeout_ms: u32,
    ) -> Response {
        if self.open_tcp(host, port, CONNECT_SETTLE_MS, CONNECT_TIMEOUT_MS).is_err() {
            // Close anyway: the modem may be holding a half-open connection.
            self.close();
            return Response::failed();
        }

        let response = self.exchange_open(request, announce_settle_ms, announce_timeout_ms);
        self.close();
        response.unwrap_or_else(|_| Response::failed())
    }

    fn exchange_open(
        &mut self,
        request: &[u8],
        announce_settle_ms: u32,
        announce_timeout_ms: u32,
    ) -> Result<Response, Error> {
        self.announce_send(request.len(), announce_settle_ms, announce_timeout_ms)?;
        let reply = self.send_payload(request, PAYLOAD_SETTLE_MS, PAYLOAD_TIMEOUT_MS)?;

        let (status_code, body) = extract(&reply.raw)?;
        let body = match body {
            Some(bytes) => Some(Vec::from_slice(bytes).map_err(|_| Error::BufferOverflow)?),
            None => None,
        };
        Ok(Response { status_code, body })
    }
}

#[cfg(test)]
mod tests;
