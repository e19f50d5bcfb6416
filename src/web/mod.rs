//! Local HTTP endpoint for vizsift.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) exposing the
//! pipeline as JSON endpoints for a chat UI backend:
//! - `POST /api/extract`, `/api/visualize`, `/api/generate`
//! - `GET /api/stats`, `/api/health`
//!
//! Launched via `vizsift serve` (default: `http://127.0.0.1:9747`).

mod api;

use std::io::Cursor;

use anyhow::Result;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::VizsiftConfig;
use crate::pipeline::Pipeline;

/// Per-server state shared by every handler.
pub struct AppState {
    pub pipeline: Pipeline,
    pub log_enabled: bool,
}

impl AppState {
    pub fn from_config(config: &VizsiftConfig) -> Self {
        Self {
            pipeline: Pipeline::from_config(config),
            log_enabled: config.logging.enabled,
        }
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the HTTP server on the given address.
///
/// Blocks the current thread. Handles requests sequentially; a failing
/// request gets a 500 JSON body and the loop keeps serving.
pub fn serve(addr: &str, state: &AppState) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("vizsift listening at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let result = dispatch(state, &method, &url, body.as_deref());

        let status = match result {
            Ok(resp) => {
                let status = resp.status_code().0;
                let _ = request.respond(resp);
                status
            }
            Err(e) => {
                let _ = request.respond(error_response(&e));
                500
            }
        };

        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    state: &AppState,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let path = url.split('?').next().unwrap_or(url);
    let body = body.unwrap_or("{}");

    match (method, path) {
        // API — Pipeline
        (&Method::Post, "/api/extract") => api::post_extract(body),
        (&Method::Post, "/api/visualize") => api::post_visualize(state, body),
        (&Method::Post, "/api/generate") => api::post_generate(state, body),

        // API — Analytics
        (&Method::Get, "/api/stats") => api::get_stats(url),

        // API — Health
        (&Method::Get, "/api/health") => api::get_health(),

        // 404
        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// 404 response.
fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = r#"{"error": "not found"}"#;
    Response::from_data(body.as_bytes().to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

/// 500 response carrying the error chain.
fn error_response(err: &anyhow::Error) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": format!("{err:#}") }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(500))
}

/// JSON content type header.
pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8")
        .expect("static content type header must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState {
            pipeline: Pipeline::new(),
            log_enabled: false,
        }
    }

    #[test]
    fn unknown_routes_are_404() {
        let resp = dispatch(&state(), &Method::Get, "/nope", None).unwrap();
        assert_eq!(resp.status_code().0, 404);

        let resp = dispatch(&state(), &Method::Get, "/api/visualize", None).unwrap();
        assert_eq!(resp.status_code().0, 404);
    }

    #[test]
    fn visualize_route_returns_200() {
        let body = r#"{"text": "Churn Rate: 12%"}"#;
        let resp = dispatch(&state(), &Method::Post, "/api/visualize", Some(body)).unwrap();
        assert_eq!(resp.status_code().0, 200);
    }

    #[test]
    fn malformed_body_is_an_error() {
        let Err(err) = dispatch(&state(), &Method::Post, "/api/extract", Some("not json")) else {
            panic!("malformed body must fail");
        };
        assert!(format!("{err:#}").contains("invalid JSON"));
        assert_eq!(error_response(&err).status_code().0, 500);
    }

    #[test]
    fn missing_body_is_an_error() {
        assert!(dispatch(&state(), &Method::Post, "/api/extract", None).is_err());
    }

    #[test]
    fn health_route_ignores_query_string() {
        let resp = dispatch(&state(), &Method::Get, "/api/health?x=1", None).unwrap();
        assert_eq!(resp.status_code().0, 200);
    }
}
