use serde::Deserialize;
use serde_json::Value;

use crate::models::{Finding, Recommendation};

/// Score assigned when the engine produced nothing usable.
pub const DEFAULT_SCORE: f64 = 75.0;

/// The shape a structured engine response is expected to take. Every field
/// is defaulted so a partial object still counts as structured.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
    pub score: Option<f64>,
}

impl AnalysisPayload {
    pub fn score_or_default(&self) -> f64 {
        self.score.map(|s| s.clamp(0.0, 100.0)).unwrap_or(DEFAULT_SCORE)
    }
}

/// Defensively parsed engine response: either the expected schema or the raw
/// text, kept for audit. Never an error.
#[derive(Debug, Clone)]
pub enum EngineOutput {
    Structured(AnalysisPayload),
    Unstructured(String),
}

/// Parse an engine response. Tries, in order: the whole text as JSON, a
/// fenced ```json block, the outermost brace span. The first candidate that
/// is an object matching the schema wins; anything else degrades to
/// [`EngineOutput::Unstructured`].
pub fn parse_assessment(raw: &str) -> EngineOutput {
    for candidate in json_candidates(raw) {
        if !candidate.is_object() {
            continue;
        }
        if let Ok(payload) = serde_json::from_value::<AnalysisPayload>(candidate) {
            return EngineOutput::Structured(payload);
        }
    }
    EngineOutput::Unstructured(raw.to_string())
}

fn json_candidates(text: &str) -> Vec<Value> {
    let mut candidates = Vec::new();

    if let Ok(v) = serde_json::from_str::<Value>(text.trim()) {
        candidates.push(v);
    }

    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        if let Some(end) = rest.find("```") {
            if let Ok(v) = serde_json::from_str::<Value>(rest[..end].trim()) {
                candidates.push(v);
            }
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(v) = serde_json::from_str::<Value>(&text[start..=end]) {
                candidates.push(v);
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    const STRUCTURED: &str = r#"{
        "findings": [{
            "id": "iam-wildcard-admin",
            "pillar": "Security",
            "title": "Overly Broad IAM Policy",
            "description": "Policy admin allows *:*",
            "severity": "CRITICAL",
            "resourceArn": "arn:aws:iam::123456789012:policy/admin",
            "service": "IAM"
        }],
        "recommendations": [],
        "score": 58.5
    }"#;

    #[test]
    fn test_direct_json_parses() {
        match parse_assessment(STRUCTURED) {
            EngineOutput::Structured(payload) => {
                assert_eq!(payload.findings.len(), 1);
                assert_eq!(payload.findings[0].severity, Severity::Critical);
                assert_eq!(payload.score_or_default(), 58.5);
            }
            EngineOutput::Unstructured(_) => panic!("expected structured output"),
        }
    }

    #[test]
    fn test_fenced_block_parses() {
        let wrapped = format!("Here is my assessment:\n```json\n{}\n```\nLet me know!", STRUCTURED);
        assert!(matches!(parse_assessment(&wrapped), EngineOutput::Structured(_)));
    }

    #[test]
    fn test_embedded_braces_parse() {
        let wrapped = format!("Assessment follows. {} That is all.", STRUCTURED);
        assert!(matches!(parse_assessment(&wrapped), EngineOutput::Structured(_)));
    }

    #[test]
    fn test_prose_degrades_to_unstructured() {
        let raw = "Everything looks great, no issues found!";
        match parse_assessment(raw) {
            EngineOutput::Unstructured(text) => assert_eq!(text, raw),
            EngineOutput::Structured(_) => panic!("expected unstructured output"),
        }
    }

    #[test]
    fn test_malformed_schema_degrades_to_unstructured() {
        // Valid JSON, but findings don't match the schema.
        let raw = r#"{"findings": [{"severity": "SEVERE"}], "score": 10}"#;
        assert!(matches!(parse_assessment(raw), EngineOutput::Unstructured(_)));
    }

    #[test]
    fn test_array_response_is_not_structured() {
        assert!(matches!(parse_assessment("[1, 2, 3]"), EngineOutput::Unstructured(_)));
    }

    #[test]
    fn test_partial_object_counts_as_structured() {
        match parse_assessment(r#"{"score": 90}"#) {
            EngineOutput::Structured(payload) => {
                assert!(payload.findings.is_empty());
                assert_eq!(payload.score_or_default(), 90.0);
            }
            EngineOutput::Unstructured(_) => panic!("expected structured output"),
        }
    }

    #[test]
    fn test_missing_score_defaults() {
        match parse_assessment(r#"{"findings": [], "recommendations": []}"#) {
            EngineOutput::Structured(payload) => {
                assert_eq!(payload.score_or_default(), DEFAULT_SCORE);
            }
            EngineOutput::Unstructured(_) => panic!("expected structured output"),
        }
    }

    #[test]
    fn test_score_clamped_to_range() {
        match parse_assessment(r#"{"score": 250}"#) {
            EngineOutput::Structured(payload) => assert_eq!(payload.score_or_default(), 100.0),
            EngineOutput::Unstructured(_) => panic!("expected structured output"),
        }
    }
}
