//! Text → extraction → chart selection, plus the streaming boundary.
//!
//! The AI backend hands over either a complete response or a sequence of
//! fragments. Fragments are buffered by [`ResponseAssembler`]; the pipeline
//! only ever runs on the finished text.

use std::time::Instant;

use crate::charts::{ChartSelector, VisualizationData};
use crate::config::VizsiftConfig;
use crate::extract::{ExtractedData, extract_data_from_response};

/// Extract and select in one call, with built-in settings.
pub fn parse_response_for_visualizations(
    ai_response: &str,
    conversation_context: &str,
) -> Vec<VisualizationData> {
    Pipeline::new().visualize(ai_response, conversation_context)
}

/// Concatenate streamed fragments and run the pipeline once on the result.
pub fn visualize_fragments<I, S>(fragments: I, conversation_context: &str) -> Vec<VisualizationData>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembler = ResponseAssembler::new();
    for fragment in fragments {
        assembler.push(fragment.as_ref());
    }
    assembler.finish(conversation_context)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Result of one pipeline run, with the intermediate representation kept for
/// callers that report on it.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub extracted: ExtractedData,
    pub visualizations: Vec<VisualizationData>,
    pub input_bytes: usize,
    pub duration_ms: u64,
}

/// Extractor + selector with a fixed selector configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    selector: ChartSelector,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `Pipeline` using the `[selector]` and `[palette]` sections.
    pub fn from_config(config: &VizsiftConfig) -> Self {
        Self {
            selector: ChartSelector::from_config(&config.selector, &config.palette),
        }
    }

    pub fn visualize(&self, text: &str, context: &str) -> Vec<VisualizationData> {
        let extracted = extract_data_from_response(text);
        self.selector.select(&extracted, context)
    }

    /// Run the pipeline and keep the intermediate data and timing.
    pub fn run(&self, text: &str, context: &str) -> PipelineRun {
        let start = Instant::now();
        let extracted = extract_data_from_response(text);
        let visualizations = self.selector.select(&extracted, context);
        let duration_ms = start.elapsed().as_millis() as u64;

        PipelineRun {
            extracted,
            visualizations,
            input_bytes: text.len(),
            duration_ms,
        }
    }

    /// Select charts for an already-extracted payload.
    pub fn select(&self, extracted: &ExtractedData, context: &str) -> Vec<VisualizationData> {
        self.selector.select(extracted, context)
    }
}

// ---------------------------------------------------------------------------
// Streaming boundary
// ---------------------------------------------------------------------------

/// Buffers streamed response fragments until the message is complete.
#[derive(Debug, Default)]
pub struct ResponseAssembler {
    buffer: String,
    fragments: usize,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
        self.fragments += 1;
    }

    /// Text received so far. Partial; do not chart it.
    pub fn partial_text(&self) -> &str {
        &self.buffer
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    /// Finish the message and return the complete text.
    pub fn into_text(self) -> String {
        self.buffer
    }

    /// Finish the message and chart it with built-in settings.
    pub fn finish(self, context: &str) -> Vec<VisualizationData> {
        parse_response_for_visualizations(&self.buffer, context)
    }
}
