//! JSON API handlers for the HTTP endpoint.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::analytics::{logger, reporter};
use crate::charts::VisualizationData;
use crate::extract::{ExtractedData, extract_data_from_response};

use super::{AppState, content_type_json};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /api/extract` and `POST /api/visualize`.
#[derive(Debug, Deserialize)]
struct TextRequest {
    text: String,
    #[serde(default)]
    context: String,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Deserialize)]
struct GenerateRequest {
    extracted: ExtractedData,
    #[serde(default)]
    context: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Parse the `?days=N` query parameter from a URL.
fn parse_days_param(url: &str) -> Option<u32> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == "days" { v.parse().ok() } else { None }
    })
}

fn extract_payload(body: &str) -> Result<ExtractedData> {
    let req: TextRequest =
        serde_json::from_str(body).context("invalid JSON in extract request")?;
    Ok(extract_data_from_response(&req.text))
}

fn visualize_payload(state: &AppState, body: &str) -> Result<Vec<VisualizationData>> {
    let req: TextRequest =
        serde_json::from_str(body).context("invalid JSON in visualize request")?;
    let run = state.pipeline.run(&req.text, &req.context);
    logger::log_pipeline_run("web", &run, state.log_enabled);
    Ok(run.visualizations)
}

fn generate_payload(state: &AppState, body: &str) -> Result<Vec<VisualizationData>> {
    let req: GenerateRequest =
        serde_json::from_str(body).context("invalid JSON in generate request")?;
    Ok(state.pipeline.select(&req.extracted, &req.context))
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `POST /api/extract` — `{ text }` → `ExtractedData`.
pub fn post_extract(body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&extract_payload(body)?)
}

/// `POST /api/visualize` — `{ text, context? }` → `[VisualizationData]`.
pub fn post_visualize(state: &AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&visualize_payload(state, body)?)
}

/// `POST /api/generate` — `{ extracted, context? }` → `[VisualizationData]`.
pub fn post_generate(state: &AppState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&generate_payload(state, body)?)
}

/// `GET /api/stats?days=N` — pipeline run statistics.
pub fn get_stats(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let days = parse_days_param(url);
    json_response(&reporter::compute_stats(days))
}

/// `GET /api/health` — liveness and version.
pub fn get_health() -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
