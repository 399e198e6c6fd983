//! Request routing.
//!
//! | Method    | Path                  | Handler              |
//! |-----------|-----------------------|----------------------|
//! | `GET`     | `/health`             | health               |
//! | `POST`    | `/api/optimize`       | optimize-one         |
//! | `POST`    | `/api/optimize/batch` | optimize-batch       |
//! | `GET`     | `/api/plugins`        | plugin catalogue     |
//! | `OPTIONS` | any                   | CORS preflight (204) |

use std::io::Read;

use anyhow::Result;
use serde::de::DeserializeOwned;
use tiny_http::{Method, Request};

use super::protocol::{BatchFile, BatchRequest, BatchResponse, OptimizeRequest, PluginsResponse};
use super::response::{send_error, send_json, send_preflight};
use super::service::OptimizationService;
use crate::optimize::OptimizationOutcome;
use crate::{debug, log};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// A request body that could not be accepted.
#[derive(Debug, PartialEq, Eq)]
struct Rejection {
    status: u16,
    message: String,
}

impl Rejection {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn too_large() -> Self {
        Self::new(413, "Request body too large")
    }
}

/// Handle a single HTTP request.
pub fn handle_request(mut request: Request, service: &OptimizationService) -> Result<()> {
    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or_default().to_string();
    debug!("serve"; "{} {}", method, path);

    match (&method, path.as_str()) {
        (Method::Options, _) => send_preflight(request),
        (Method::Get, "/health") => send_json(request, 200, &service.health()),
        (Method::Get, "/api/plugins") => {
            let plugins = service.plugins().iter().map(|p| p.to_string()).collect();
            send_json(request, 200, &PluginsResponse { success: true, plugins })
        }
        (Method::Post, "/api/optimize") => match read_json::<OptimizeRequest>(&mut request) {
            Ok(body) => respond_optimize(request, service, body),
            Err(rejection) => send_error(request, rejection.status, rejection.message),
        },
        (Method::Post, "/api/optimize/batch") => match read_json::<BatchRequest>(&mut request) {
            Ok(body) => respond_batch(request, service, body),
            Err(rejection) => send_error(request, rejection.status, rejection.message),
        },
        _ => send_error(request, 404, format!("Cannot {method} {path}")),
    }
}

fn respond_optimize(
    request: Request,
    service: &OptimizationService,
    body: OptimizeRequest,
) -> Result<()> {
    match service.optimize(body.svg_string.as_deref(), body.config.as_ref()) {
        Ok(outcome) => send_json(request, 200, &outcome),
        Err(err) => {
            let status = err.status_code();
            if status >= 500 {
                log!("serve"; "optimization error: {err}");
            }
            send_json(request, status, &OptimizationOutcome::failed(&err))
        }
    }
}

fn respond_batch(request: Request, service: &OptimizationService, body: BatchRequest) -> Result<()> {
    let Some(entries) = body.svg_files else {
        return send_error(request, 400, "SVG files array is required");
    };
    let files: Vec<_> = entries.iter().map(BatchFile::from_value).collect();
    let results = service.optimize_batch(&files, body.config.as_ref());
    let failed = results.iter().filter(|r| !r.outcome.success).count();
    if failed > 0 {
        debug!("serve"; "batch: {} of {} items failed", failed, results.len());
    }
    send_json(request, 200, &BatchResponse { success: true, results })
}

/// Reject declared lengths over [`MAX_BODY_BYTES`] before reading.
fn check_body_length(declared: Option<usize>) -> Result<(), Rejection> {
    match declared {
        Some(len) if len > MAX_BODY_BYTES => Err(Rejection::too_large()),
        _ => Ok(()),
    }
}

fn read_json<T: DeserializeOwned>(request: &mut Request) -> Result<T, Rejection> {
    check_body_length(request.body_length())?;

    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| Rejection::new(400, format!("Failed to read request body: {e}")))?;
    if body.len() > MAX_BODY_BYTES {
        return Err(Rejection::too_large());
    }

    serde_json::from_slice(&body).map_err(|e| Rejection::new(400, format!("Invalid JSON: {e}")))
}
