use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::rules::RULES;

/// Human-readable outcome of one rule.
pub type Finding = &'static str;

pub const MAX_SCORE: u8 = 100;

/// The payload a caller submits for analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    pub fn evaluate(&self) -> Result<ScoreResult, ValidationError> {
        evaluate(self.url.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u8,
    pub details: Vec<Finding>,
}

/// Scores `url` against every rule in order and caps the total at
/// [`MAX_SCORE`]. Empty input is rejected before any rule runs.
pub fn evaluate(url: &str) -> Result<ScoreResult, ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::MissingInput);
    }

    let mut total: u32 = 0;
    let mut details = Vec::with_capacity(RULES.len());

    for rule in &RULES {
        if let Some((weight, finding)) = rule.apply(url) {
            total += weight;
            details.push(finding);
        }
    }

    let score = total.min(u32::from(MAX_SCORE)) as u8;
    debug!(score, raw = total, findings = details.len(), "evaluated url");

    Ok(ScoreResult { score, details })
}
