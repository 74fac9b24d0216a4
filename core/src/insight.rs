//! AI insight generation for a selected segment.
//!
//! One non-cancellable request-response round trip per call: build a
//! prompt from the segment summary, send it to a generative-language
//! backend, and parse the INSIGHT / RECOMMENDATION / CONFIDENCE markers
//! out of the text reply. Every failure mode degrades to a fixed
//! displayable default — nothing here is fatal and nothing propagates
//! to the caller as an error.

use crate::{
    baseline::Segment,
    config::InsightConfig,
    error::{SimError, SimResult},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_INSIGHT: &str = "No insight generated.";
pub const DEFAULT_RECOMMENDATION: &str = "No recommendation generated.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentInsight {
    pub insight: String,
    pub recommendation: String,
    pub confidence: f64,
}

/// The text-generation seam. Production uses the Gemini REST backend;
/// tests substitute a canned implementation.
#[async_trait]
pub trait TextModelBackend: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> SimResult<String>;
}

pub struct InsightClient {
    backend: Option<Box<dyn TextModelBackend>>,
    timeout: Duration,
}

impl InsightClient {
    /// Build from configuration. A missing API key leaves the client in
    /// degraded mode rather than failing construction.
    pub fn new(config: &InsightConfig) -> Self {
        let backend: Option<Box<dyn TextModelBackend>> = config
            .api_key
            .as_ref()
            .map(|key| {
                Box::new(GeminiBackend::new(
                    config.endpoint.clone(),
                    config.model.clone(),
                    key.clone(),
                )) as Box<dyn TextModelBackend>
            });
        Self {
            backend,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Build over an explicit backend (test doubles).
    pub fn with_backend(backend: Box<dyn TextModelBackend>, timeout: Duration) -> Self {
        Self {
            backend: Some(backend),
            timeout,
        }
    }

    /// Request an insight for one segment. Infallible by design: missing
    /// credentials, transport failures, and malformed replies all map to
    /// fixed placeholder responses.
    pub async fn segment_insights(&self, segment: &Segment) -> SegmentInsight {
        let Some(backend) = &self.backend else {
            return SegmentInsight {
                insight: "API key not configured on server.".to_string(),
                recommendation: "Contact administrator.".to_string(),
                confidence: 0.0,
            };
        };

        let prompt = build_prompt(segment);
        let reply = tokio::time::timeout(self.timeout, backend.generate_text(&prompt)).await;

        match reply {
            Ok(Ok(text)) => parse_response(&text),
            Ok(Err(e)) => {
                log::warn!("insight request for {} failed: {e}", segment.id);
                Self::unavailable()
            }
            Err(_) => {
                log::warn!(
                    "insight request for {} timed out after {:?}",
                    segment.id,
                    self.timeout
                );
                Self::unavailable()
            }
        }
    }

    fn unavailable() -> SegmentInsight {
        SegmentInsight {
            insight: "Unable to generate insights at this time.".to_string(),
            recommendation: "Please try again later.".to_string(),
            confidence: 0.0,
        }
    }
}

/// The analysis prompt, including the two derived ratios the model is
/// asked to reason about.
pub fn build_prompt(segment: &Segment) -> String {
    format!(
        "Analyze this SaaS customer segment and provide ONE key insight and ONE actionable recommendation:\n\
         \n\
         Segment: {name}\n\
         Description: {description}\n\
         - Total Customers: {customers}\n\
         - Average Lifetime Value: ${ltv}\n\
         - Customer Acquisition Cost: ${cac}\n\
         - Average Revenue Per User: ${arpu}\n\
         - Monthly Expansion Rate: {expansion}%\n\
         - Churn Risk: {churn_risk}\n\
         - Organization Size: {org_size}\n\
         - Region: {region}\n\
         \n\
         Calculated Metrics:\n\
         - LTV:CAC Ratio: {ratio:.2}\n\
         - CAC Payback Period: {payback:.1} months\n\
         \n\
         Provide your response in this exact format:\n\
         INSIGHT: [One sentence observation about the segment's health]\n\
         RECOMMENDATION: [One specific action to improve retention or profitability]\n\
         CONFIDENCE: [High/Medium/Low based on data completeness]\n",
        name = segment.name,
        description = segment.description,
        customers = segment.total_customers,
        ltv = segment.average_lifetime_value,
        cac = segment.cac,
        arpu = segment.arpu,
        expansion = segment.expansion_rate,
        churn_risk = segment.churn_risk,
        org_size = segment.org_size,
        region = segment.region,
        ratio = segment.ltv_cac_ratio(),
        payback = segment.payback_months(),
    )
}

/// Extract the marker lines from a model reply. Missing markers fall
/// back to literal defaults; an unparseable confidence maps to 0.7.
pub fn parse_response(text: &str) -> SegmentInsight {
    let insight = marker_value(text, "INSIGHT:")
        .unwrap_or(DEFAULT_INSIGHT)
        .to_string();
    let recommendation = marker_value(text, "RECOMMENDATION:")
        .unwrap_or(DEFAULT_RECOMMENDATION)
        .to_string();

    let confidence = match marker_value(text, "CONFIDENCE:") {
        Some(v) if v.to_ascii_lowercase().starts_with("high") => 0.9,
        Some(v) if v.to_ascii_lowercase().starts_with("medium") => 0.7,
        Some(v) if v.to_ascii_lowercase().starts_with("low") => 0.5,
        _ => 0.7,
    };

    SegmentInsight {
        insight,
        recommendation,
        confidence,
    }
}

/// First line carrying `marker` (case-insensitive), with the marker and
/// surrounding whitespace stripped. Empty remainders count as missing.
fn marker_value<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let marker_upper = marker.to_ascii_uppercase();
    text.lines().find_map(|line| {
        let trimmed = line.trim();
        let head = trimmed.get(..marker.len())?;
        if head.eq_ignore_ascii_case(&marker_upper) {
            let rest = trimmed[marker.len()..].trim();
            (!rest.is_empty()).then_some(rest)
        } else {
            None
        }
    })
}

// ── Gemini REST backend ──────────────────────────────────────────────

pub struct GeminiBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TextModelBackend for GeminiBackend {
    async fn generate_text(&self, prompt: &str) -> SimResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SimError::InsightBackend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SimError::InsightBackend(format!(
                "API error: {}",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SimError::InsightBackend(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| SimError::InsightBackend("empty candidate list".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reply() {
        let reply = "INSIGHT: Strong unit economics across the board.\n\
                     RECOMMENDATION: Cross-sell the enterprise module.\n\
                     CONFIDENCE: High";
        let out = parse_response(reply);
        assert_eq!(out.insight, "Strong unit economics across the board.");
        assert_eq!(out.recommendation, "Cross-sell the enterprise module.");
        assert_eq!(out.confidence, 0.9);
    }

    #[test]
    fn confidence_markers_map_to_fixed_levels() {
        assert_eq!(parse_response("CONFIDENCE: Medium").confidence, 0.7);
        assert_eq!(parse_response("confidence: low").confidence, 0.5);
        assert_eq!(parse_response("CONFIDENCE: banana").confidence, 0.7);
        assert_eq!(parse_response("no markers here").confidence, 0.7);
    }

    #[test]
    fn missing_markers_fall_back_to_defaults() {
        let out = parse_response("The model rambled with no structure.");
        assert_eq!(out.insight, DEFAULT_INSIGHT);
        assert_eq!(out.recommendation, DEFAULT_RECOMMENDATION);
    }

    #[test]
    fn marker_match_is_case_insensitive_and_trimmed() {
        let out = parse_response("  insight:   tightly packed   \nRecommendation: act now");
        assert_eq!(out.insight, "tightly packed");
        assert_eq!(out.recommendation, "act now");
    }
}
