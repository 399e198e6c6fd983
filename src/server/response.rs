//! HTTP response helpers.

use anyhow::Result;
use serde::Serialize;
use tiny_http::{Header, Request, Response, StatusCode};

use super::protocol::ErrorResponse;
use crate::utils::mime::types::JSON;

/// Respond with a JSON body.
pub fn send_json<T: Serialize>(request: Request, status: u16, body: &T) -> Result<()> {
    let body = serde_json::to_vec(body)?;
    send_body(request, status, JSON, body)
}

/// Respond with `{ success: false, error }`.
pub fn send_error(request: Request, status: u16, error: impl Into<String>) -> Result<()> {
    send_json(request, status, &ErrorResponse::new(error))
}

/// Answer a CORS preflight.
pub fn send_preflight(request: Request) -> Result<()> {
    let response = with_cors(Response::empty(StatusCode(204)))
        .with_header(make_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .with_header(make_header("Access-Control-Allow-Headers", "Content-Type"));
    request.respond(response)?;
    Ok(())
}

fn send_body(request: Request, status: u16, content_type: &'static str, body: Vec<u8>) -> Result<()> {
    let response = with_cors(Response::from_data(body))
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn with_cors<R: std::io::Read>(response: Response<R>) -> Response<R> {
    response.with_header(make_header("Access-Control-Allow-Origin", "*"))
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
