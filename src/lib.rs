//! vizsift: turn AI response text into chart descriptors.
//!
//! Two stages. [`extract_data_from_response`] scans free text for metrics,
//! markdown tables, bullet lists and time series. [`generate_visualizations`]
//! turns that intermediate representation into [`VisualizationData`]
//! descriptors a front-end can render.

pub mod analytics;
pub mod charts;
pub mod cli;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod web;

pub use charts::{ChartConfig, ChartType, VisualizationData, generate_visualizations};
pub use extract::{ExtractedData, extract_data_from_response};
pub use pipeline::{Pipeline, parse_response_for_visualizations, visualize_fragments};
