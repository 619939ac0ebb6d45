//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, health probe,
//! mapping the URL below the mount prefix onto storage segments, and access logging.

use crate::config::AppState;
use crate::http::{self, response, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use crate::streamer::{RequestHeaders, StreamError};
use hyper::header::{self, HeaderMap};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode, Version};
use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();

    let mut response = route_request(&parts, &state).await;

    response::apply_server_header(&mut response, &state.config.http.server_name);
    if state.config.http.enable_cors {
        response::apply_cors_headers(&mut response);
    }

    if state.config.logging.access_log {
        log_access(&parts, &response, peer_addr, started, &state);
    }

    Ok(response)
}

async fn route_request(req: &Parts, state: &AppState) -> Response<ResponseBody> {
    let method = &req.method;
    let path = req.uri.path();

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    // 2. Health check endpoint
    if path == state.config.http.health_path {
        return http::build_health_response();
    }

    // 3. Media files below the mount prefix
    let Some(relative) = strip_mount_prefix(path, &state.mount_prefix) else {
        return http::build_404_response();
    };

    let segments = match decode_segments(relative) {
        Ok(segments) => segments,
        Err(err) => return http::build_error_response(err.status(), err.public_message()),
    };

    let headers = &req.headers;
    let request_headers = RequestHeaders {
        range: header_str(headers, &header::RANGE),
        if_none_match: header_str(headers, &header::IF_NONE_MATCH),
        is_head: *method == Method::HEAD,
    };

    state
        .streamer
        .serve_request(&segments, &request_headers)
        .await
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<ResponseBody>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_debug(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Path below `prefix`, or `None` if the request is not for the mount.
/// `/api/uploads-evil/x` is not below `/api/uploads`.
fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('/')
}

/// Split on `/` and percent-decode each segment. An empty remainder yields no segments.
fn decode_segments(relative: &str) -> Result<Vec<Cow<'_, str>>, StreamError> {
    if relative.is_empty() {
        return Ok(Vec::new());
    }
    relative
        .split('/')
        .map(|segment| {
            urlencoding::decode(segment)
                .map_err(|_| StreamError::BadRequest("path is not valid UTF-8".to_string()))
        })
        .collect()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn log_access(
    req: &Parts,
    response: &Response<ResponseBody>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let headers = &req.headers;
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.http_version = version_str(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = if response.status() == StatusCode::NOT_MODIFIED
        || req.method == Method::HEAD
    {
        0
    } else {
        response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    };
    entry.range = header_str(headers, &header::RANGE).map(ToString::to_string);
    entry.referer = header_str(headers, &header::REFERER).map(ToString::to_string);
    entry.user_agent = header_str(headers, &header::USER_AGENT).map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
