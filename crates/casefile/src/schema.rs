use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CaseId = String;

/// Fixed evidence vocabulary. Anything outside it is rejected at the
/// deserialization boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    BloodStain,
    BloodPool,
    Knife,
    Gun,
    ShellCasing,
    Footprint,
    Shoeprint,
    Fingerprint,
    BrokenGlass,
    Window,
    Door,
    Chair,
    Table,
    Rope,
    Glove,
    Mask,
    PersonalItem,
    ForensicClue,
    SceneNote,
}

impl EvidenceType {
    pub const ALL: [EvidenceType; 19] = [
        EvidenceType::BloodStain,
        EvidenceType::BloodPool,
        EvidenceType::Knife,
        EvidenceType::Gun,
        EvidenceType::ShellCasing,
        EvidenceType::Footprint,
        EvidenceType::Shoeprint,
        EvidenceType::Fingerprint,
        EvidenceType::BrokenGlass,
        EvidenceType::Window,
        EvidenceType::Door,
        EvidenceType::Chair,
        EvidenceType::Table,
        EvidenceType::Rope,
        EvidenceType::Glove,
        EvidenceType::Mask,
        EvidenceType::PersonalItem,
        EvidenceType::ForensicClue,
        EvidenceType::SceneNote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceType::BloodStain => "blood_stain",
            EvidenceType::BloodPool => "blood_pool",
            EvidenceType::Knife => "knife",
            EvidenceType::Gun => "gun",
            EvidenceType::ShellCasing => "shell_casing",
            EvidenceType::Footprint => "footprint",
            EvidenceType::Shoeprint => "shoeprint",
            EvidenceType::Fingerprint => "fingerprint",
            EvidenceType::BrokenGlass => "broken_glass",
            EvidenceType::Window => "window",
            EvidenceType::Door => "door",
            EvidenceType::Chair => "chair",
            EvidenceType::Table => "table",
            EvidenceType::Rope => "rope",
            EvidenceType::Glove => "glove",
            EvidenceType::Mask => "mask",
            EvidenceType::PersonalItem => "personal_item",
            EvidenceType::ForensicClue => "forensic_clue",
            EvidenceType::SceneNote => "scene_note",
        }
    }
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EvidenceType,
    pub description: String,
    pub confidence: f32, // 0.0..1.0
    pub location_text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    Keyword,
    Model,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub description: String,
    pub objects: Vec<EvidenceType>,
    pub scene_context: Vec<String>,
    pub forensic_clues: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    Bladed,
    Firearm,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponHypothesis {
    pub weapon: String,
    pub category: WeaponCategory,
    pub confidence: f32,
    pub force_required: String,
    pub engagement_distance: String,
    pub rationale: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryCategory {
    Bleeding,
    NoneDetected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LethalityTier {
    Unknown,
    Low,
    Medium,
    MediumHigh,
    High,
}

impl LethalityTier {
    /// Same spelling as the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            LethalityTier::Unknown => "unknown",
            LethalityTier::Low => "low",
            LethalityTier::Medium => "medium",
            LethalityTier::MediumHigh => "medium_high",
            LethalityTier::High => "high",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InjuryHypothesis {
    pub injury: String,
    pub category: InjuryCategory,
    pub lethality: LethalityTier,
    pub confidence: f32,
    pub rationale: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenderProbability {
    pub male: f32,
    pub female: f32,
    pub unknown: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuspectHypothesis {
    pub id: String,
    pub age_range: String,
    pub build: String,
    pub height_estimate_cm: String,
    pub shoe_size_estimate: String,
    pub dominant_hand: String,
    pub experience_level: String,
    pub likely_intent: String,
    pub emotional_state: String,
    pub gender_probability: GenderProbability,
    pub confidence: f32,
    pub rationale: String,
}

/// Every field is required; a model reply missing one is treated as malformed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VictimProfile {
    pub risk_level: String,
    pub demographics_inferred: String,
    pub relation_to_suspect_hypothesis: String,
    pub notes: String,
}

impl VictimProfile {
    pub fn unknown() -> Self {
        Self {
            risk_level: "Unknown".to_string(),
            demographics_inferred: "Unknown".to_string(),
            relation_to_suspect_hypothesis: "Unknown".to_string(),
            notes: "Victim profile could not be determined.".to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.risk_level == "Unknown"
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub step: u32,
    pub event: String,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_id: Option<String>,
}

/// The full case aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub case_id: CaseId,
    pub input_text: String,
    #[serde(default)]
    pub image_captions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_analysis: Option<String>,
    pub description: SceneDescription,
    pub evidence_items: Vec<EvidenceItem>,
    pub evidence_source: EvidenceSource,
    pub weapons: Vec<WeaponHypothesis>,
    pub injuries: Vec<InjuryHypothesis>,
    pub suspect_hypotheses: Vec<SuspectHypothesis>,
    pub victim_profile: VictimProfile,
    pub timeline: Vec<TimelineStep>,
    pub risk_score: u8, // 0..=10
    pub executive_summary: String,
    pub created_at: DateTime<Utc>,
    pub analyzed_at: DateTime<Utc>,
}

impl Case {
    pub fn primary_weapon(&self) -> Option<&WeaponHypothesis> {
        self.weapons.first()
    }

    pub fn primary_injury(&self) -> Option<&InjuryHypothesis> {
        self.injuries.first()
    }
}

/// Condensed fields answered by keyword memory queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseMemory {
    pub primary_weapon: String,
    pub injury: String,
    pub evidence_list: Vec<EvidenceType>,
    pub risk_score: u8,
    pub summary: String,
}

impl CaseMemory {
    pub fn from_case(case: &Case) -> Self {
        Self {
            primary_weapon: case
                .primary_weapon()
                .map(|w| w.weapon.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            injury: case
                .primary_injury()
                .map(|i| i.injury.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            evidence_list: case.evidence_items.iter().map(|e| e.kind).collect(),
            risk_score: case.risk_score,
            summary: case.executive_summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lethality_label_matches_json() {
        for tier in [
            LethalityTier::Unknown,
            LethalityTier::Low,
            LethalityTier::Medium,
            LethalityTier::MediumHigh,
            LethalityTier::High,
        ] {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.label()));
        }
    }
}
