use casefile::{EvidenceItem, EvidenceType, SceneDescription};

use crate::keywords::{MEDIUM_TYPES, STRONG_TYPES};

pub const OBJECT_CONFIDENCE: f32 = 0.75;
pub const CLUE_CONFIDENCE: f32 = 0.85;
pub const SCENE_NOTE_CONFIDENCE: f32 = 0.6;

pub const MIN_CONFIDENCE: f32 = 0.15;
pub const MAX_CONFIDENCE: f32 = 0.98;

/// Evidence before ids are assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct EvidenceDraft {
    pub kind: EvidenceType,
    pub description: String,
    pub confidence: f32,
    pub location_text: String,
}

/// Stable 8-hex-char prefix for ids derived from a case.
pub fn id_base(case_id: &str) -> String {
    let hash = blake3::hash(case_id.as_bytes());
    hex::encode(&hash.as_bytes()[..4])
}

/// Keyword path: one draft per object, one per forensic clue.
pub fn keyword_drafts(desc: &SceneDescription) -> Vec<EvidenceDraft> {
    let objects = desc.objects.iter().map(|kind| EvidenceDraft {
        kind: *kind,
        description: format!("Detected {kind} based on description or image."),
        confidence: OBJECT_CONFIDENCE,
        location_text: "derived from scene text".to_string(),
    });
    let clues = desc.forensic_clues.iter().map(|clue| EvidenceDraft {
        kind: EvidenceType::ForensicClue,
        description: clue.clone(),
        confidence: CLUE_CONFIDENCE,
        location_text: "contextual".to_string(),
    });
    objects.chain(clues).collect()
}

/// De-duplicate, number, and guarantee at least one item.
///
/// Duplicates are judged on (type, lowercased description); the first
/// occurrence wins. An empty list becomes a single `scene_note`.
pub fn finalize_evidence(
    case_id: &str,
    drafts: Vec<EvidenceDraft>,
    desc: &SceneDescription,
) -> Vec<EvidenceItem> {
    let base = id_base(case_id);
    let mut seen: Vec<(EvidenceType, String)> = Vec::new();
    let mut out = Vec::new();

    for d in drafts {
        let key = (d.kind, d.description.trim().to_lowercase());
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(EvidenceItem {
            id: format!("EV-{base}-{}", out.len() + 1),
            kind: d.kind,
            description: d.description,
            confidence: round2(d.confidence.clamp(0.0, 1.0)),
            location_text: d.location_text,
        });
    }

    if out.is_empty() {
        let note: String = desc.description.chars().take(300).collect();
        out.push(EvidenceItem {
            id: format!("EV-{base}-1"),
            kind: EvidenceType::SceneNote,
            description: if note.trim().is_empty() {
                "No scene details provided.".to_string()
            } else {
                note
            },
            confidence: SCENE_NOTE_CONFIDENCE,
            location_text: "unspecified".to_string(),
        });
    }
    out
}

/// Keyword extraction end to end.
pub fn extract_evidence(case_id: &str, desc: &SceneDescription) -> Vec<EvidenceItem> {
    finalize_evidence(case_id, keyword_drafts(desc), desc)
}

/// Additive strength of the evidence set, clamped to [0.15, 0.98].
pub fn scene_confidence(items: &[EvidenceItem]) -> f32 {
    let mut score: f32 = 0.0;
    for ev in items {
        if STRONG_TYPES.contains(&ev.kind) {
            score += 0.20;
        } else if MEDIUM_TYPES.contains(&ev.kind) {
            score += 0.10;
        }
    }
    if items.len() >= 3 {
        score += 0.15;
    }
    if items.len() >= 5 {
        score += 0.10;
    }
    clamp_confidence(score)
}

pub fn clamp_confidence(x: f32) -> f32 {
    round2(x.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE))
}

pub(crate) fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}
