//! Validation of language-model replies.
//!
//! Replies are untrusted text. Each parser either returns a fully typed value
//! or a `ModelOutputError`; callers pick the deterministic fallback.

use casefile::{EvidenceType, VictimProfile};
use serde::Deserialize;
use thiserror::Error;

use crate::evidence::EvidenceDraft;

#[derive(Debug, Error)]
pub enum ModelOutputError {
    #[error("no JSON object in model reply")]
    NoJson,

    #[error("model reply does not match schema: {0}")]
    Schema(String),

    #[error("model reply field {field} invalid: {reason}")]
    Field { field: &'static str, reason: String },
}

/// Locate the outermost `{ ... }` in a reply, ignoring code fences and chatter.
pub fn extract_json_object(reply: &str) -> Result<&str, ModelOutputError> {
    let start = reply.find('{').ok_or(ModelOutputError::NoJson)?;
    let end = reply.rfind('}').ok_or(ModelOutputError::NoJson)?;
    if end < start {
        return Err(ModelOutputError::NoJson);
    }
    Ok(&reply[start..=end])
}

#[derive(Deserialize)]
struct EvidenceReply {
    evidence_items: Vec<ModelEvidence>,
}

#[derive(Deserialize)]
struct ModelEvidence {
    #[serde(rename = "type")]
    kind: EvidenceType,
    description: String,
    confidence: f32,
    #[serde(default = "default_location")]
    location_text: String,
}

fn default_location() -> String {
    "reported by model".to_string()
}

/// Parse an `{"evidence_items": [...]}` reply. Any out-of-vocabulary type or
/// out-of-range confidence rejects the whole reply.
pub fn parse_evidence_reply(reply: &str) -> Result<Vec<EvidenceDraft>, ModelOutputError> {
    let json = extract_json_object(reply)?;
    let parsed: EvidenceReply =
        serde_json::from_str(json).map_err(|e| ModelOutputError::Schema(e.to_string()))?;

    parsed
        .evidence_items
        .into_iter()
        .map(|m| {
            if !m.confidence.is_finite() || !(0.0..=1.0).contains(&m.confidence) {
                return Err(ModelOutputError::Field {
                    field: "confidence",
                    reason: format!("{} outside [0, 1]", m.confidence),
                });
            }
            if m.description.trim().is_empty() {
                return Err(ModelOutputError::Field {
                    field: "description",
                    reason: "empty".to_string(),
                });
            }
            Ok(EvidenceDraft {
                kind: m.kind,
                description: m.description.trim().to_string(),
                confidence: m.confidence,
                location_text: m.location_text,
            })
        })
        .collect()
}

/// Parse a victim profile reply. All four fields are required and non-empty.
pub fn parse_victim_reply(reply: &str) -> Result<VictimProfile, ModelOutputError> {
    let json = extract_json_object(reply)?;
    let profile: VictimProfile =
        serde_json::from_str(json).map_err(|e| ModelOutputError::Schema(e.to_string()))?;

    let fields: [(&'static str, &str); 4] = [
        ("risk_level", &profile.risk_level),
        ("demographics_inferred", &profile.demographics_inferred),
        ("relation_to_suspect_hypothesis", &profile.relation_to_suspect_hypothesis),
        ("notes", &profile.notes),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ModelOutputError::Field {
                field,
                reason: "empty".to_string(),
            });
        }
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"evidence_items\": [{\"type\": \"knife\", \"description\": \"kitchen knife by sink\", \"confidence\": 0.9, \"location_text\": \"sink\"}]}\n```";
        let items = parse_evidence_reply(reply).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, EvidenceType::Knife);
        assert_eq!(items[0].location_text, "sink");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let reply = r#"{"evidence_items": [{"type": "lipstick", "description": "smear", "confidence": 0.5}]}"#;
        assert!(matches!(parse_evidence_reply(reply), Err(ModelOutputError::Schema(_))));
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let reply = r#"{"evidence_items": [{"type": "knife", "description": "blade", "confidence": 1.7}]}"#;
        assert!(matches!(
            parse_evidence_reply(reply),
            Err(ModelOutputError::Field { field: "confidence", .. })
        ));
    }

    #[test]
    fn test_no_json() {
        assert!(matches!(parse_evidence_reply("I cannot help with that."), Err(ModelOutputError::NoJson)));
        assert!(matches!(parse_evidence_reply("} backwards {"), Err(ModelOutputError::NoJson)));
    }

    #[test]
    fn test_victim_reply() {
        let reply = r#"{"risk_level": "High", "demographics_inferred": "adult", "relation_to_suspect_hypothesis": "acquaintance", "notes": "defensive wounds"}"#;
        let v = parse_victim_reply(reply).unwrap();
        assert_eq!(v.risk_level, "High");
    }

    #[test]
    fn test_victim_reply_missing_field() {
        let reply = r#"{"risk_level": "High", "notes": "x"}"#;
        assert!(matches!(parse_victim_reply(reply), Err(ModelOutputError::Schema(_))));
    }
}
