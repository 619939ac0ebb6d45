//! HTTP response building module
//!
//! Provides builders for the non-streaming responses (errors, preflight, health)
//! and the boxed body type shared by every response the server produces.

use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::io;

/// Body type for every response: either a small in-memory payload or a file stream
pub type ResponseBody = http_body_util::combinators::BoxBody<Bytes, io::Error>;

/// Empty body
pub fn empty_body() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

/// In-memory body
pub fn full_body(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: u16,
    message: &'a str,
}

/// Build JSON error response, e.g. `{"error":{"code":404,"message":"Not Found"}}`
pub fn build_error_response(status: StatusCode, message: &str) -> Response<ResponseBody> {
    let body = ErrorBody {
        error: ErrorDetail {
            code: status.as_u16(),
            message,
        },
    };
    let json = serde_json::to_vec(&body).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        br#"{"error":{"code":500,"message":"Internal Server Error"}}"#.to_vec()
    });

    json_response(status, json)
}

/// Build 404 Not Found response for paths outside the media mount
pub fn build_404_response() -> Response<ResponseBody> {
    build_error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<ResponseBody> {
    let mut response = build_error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
    response
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, cache_control: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(header::ETAG, etag)
        .header(header::CACHE_CONTROL, cache_control)
        .body(empty_body())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            fallback(StatusCode::NOT_MODIFIED)
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(header::ALLOW, ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
            .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Range, If-None-Match")
            .header(header::ACCESS_CONTROL_MAX_AGE, "86400");
    }

    builder.body(empty_body()).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        fallback(StatusCode::NO_CONTENT)
    })
}

/// Build health check response
pub fn build_health_response() -> Response<ResponseBody> {
    json_response(StatusCode::OK, br#"{"status":"ok"}"#.to_vec())
}

/// Add CORS headers to a response headed for a browser media element
pub fn apply_cors_headers(response: &mut Response<ResponseBody>) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("Content-Range, Accept-Ranges, Content-Length, ETag"),
    );
}

/// Set the `Server` header unless the name is not a valid header value
pub fn apply_server_header(response: &mut Response<ResponseBody>, server_name: &str) {
    if let Ok(value) = HeaderValue::from_str(server_name) {
        response.headers_mut().insert(header::SERVER, value);
    }
}

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

fn json_response(status: StatusCode, json: Vec<u8>) -> Response<ResponseBody> {
    let content_length = json.len();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, content_length)
        .body(full_body(json))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback(status)
        })
}

/// Bare response with the intended status, used when the builder rejects a header
fn fallback(status: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(empty_body());
    *response.status_mut() = status;
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &dyn std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
