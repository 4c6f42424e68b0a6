//! Fixture cases shared by unit and integration tests.

use chrono::{TimeZone, Utc};

use crate::*;

/// A small knife-and-blood case with stable timestamps.
pub fn sample_case(case_id: &str) -> Case {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Case {
        case_id: case_id.to_string(),
        input_text: "Victim found with a knife wound, blood pooled near sofa".to_string(),
        image_captions: vec![],
        visual_analysis: None,
        description: SceneDescription {
            description: "Victim found with a knife wound, blood pooled near sofa".to_string(),
            objects: vec![EvidenceType::BloodStain, EvidenceType::Knife],
            scene_context: vec!["unknown".to_string()],
            forensic_clues: vec![],
        },
        evidence_items: vec![
            EvidenceItem {
                id: "EV-00000000-1".to_string(),
                kind: EvidenceType::BloodStain,
                description: "Detected blood_stain based on description or image.".to_string(),
                confidence: 0.75,
                location_text: "derived from scene text".to_string(),
            },
            EvidenceItem {
                id: "EV-00000000-2".to_string(),
                kind: EvidenceType::Knife,
                description: "Detected knife based on description or image.".to_string(),
                confidence: 0.75,
                location_text: "derived from scene text".to_string(),
            },
        ],
        evidence_source: EvidenceSource::Keyword,
        weapons: vec![WeaponHypothesis {
            weapon: "knife".to_string(),
            category: WeaponCategory::Bladed,
            confidence: 0.9,
            force_required: "medium".to_string(),
            engagement_distance: "close-range".to_string(),
            rationale: "Knife evidence directly detected.".to_string(),
        }],
        injuries: vec![InjuryHypothesis {
            injury: "significant bleeding".to_string(),
            category: InjuryCategory::Bleeding,
            lethality: LethalityTier::MediumHigh,
            confidence: 0.85,
            rationale: "Blood evidence strongly supports injury.".to_string(),
        }],
        suspect_hypotheses: vec![],
        victim_profile: VictimProfile::unknown(),
        timeline: vec![TimelineStep {
            step: 1,
            event: "Victim sustained injuries".to_string(),
            rationale: "Blood evidence confirms impact".to_string(),
            evidence_id: Some("EV-00000000-1".to_string()),
        }],
        risk_score: 7,
        executive_summary: "Bladed assault with significant blood loss.".to_string(),
        created_at: at,
        analyzed_at: at,
    }
}
