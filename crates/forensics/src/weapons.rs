use casefile::{
    EvidenceItem, EvidenceType, InjuryCategory, InjuryHypothesis, LethalityTier, WeaponCategory,
    WeaponHypothesis,
};

use crate::evidence::{clamp_confidence, scene_confidence};

const DETECTED_WEAPON_BONUS: f32 = 0.50;
const BLEEDING_BONUS: f32 = 0.45;
const NO_INJURY_PENALTY: f32 = 0.10;

pub(crate) fn has_firearm(items: &[EvidenceItem]) -> bool {
    items
        .iter()
        .any(|e| matches!(e.kind, EvidenceType::Gun | EvidenceType::ShellCasing))
}

pub(crate) fn has_blade(items: &[EvidenceItem]) -> bool {
    items.iter().any(|e| e.kind == EvidenceType::Knife)
}

pub(crate) fn has_blood(items: &[EvidenceItem]) -> bool {
    items.iter().any(|e| e.kind.as_str().contains("blood"))
}

/// Best single guess. Firearm indicators outrank a blade.
pub fn weapon_hypothesis(items: &[EvidenceItem]) -> WeaponHypothesis {
    let scene = scene_confidence(items);
    let firearm = has_firearm(items);
    let blade = has_blade(items);

    if firearm {
        let also = if blade { " A knife was also noted but ballistic evidence dominates." } else { "" };
        WeaponHypothesis {
            weapon: "firearm".to_string(),
            category: WeaponCategory::Firearm,
            confidence: clamp_confidence(DETECTED_WEAPON_BONUS + scene),
            force_required: "high".to_string(),
            engagement_distance: "short-medium range".to_string(),
            rationale: format!("Shell casing or firearm markers detected.{also}"),
        }
    } else if blade {
        WeaponHypothesis {
            weapon: "knife".to_string(),
            category: WeaponCategory::Bladed,
            confidence: clamp_confidence(DETECTED_WEAPON_BONUS + scene),
            force_required: "medium".to_string(),
            engagement_distance: "close-range".to_string(),
            rationale: "Knife evidence directly detected.".to_string(),
        }
    } else {
        WeaponHypothesis {
            weapon: "unknown".to_string(),
            category: WeaponCategory::Unknown,
            confidence: clamp_confidence(scene),
            force_required: "unknown".to_string(),
            engagement_distance: "unknown".to_string(),
            rationale: "No direct weapon evidence; inferred only.".to_string(),
        }
    }
}

pub fn injury_hypothesis(items: &[EvidenceItem]) -> InjuryHypothesis {
    let scene = scene_confidence(items);

    if has_blood(items) {
        let lethality = if has_firearm(items) {
            LethalityTier::High
        } else {
            LethalityTier::MediumHigh
        };
        InjuryHypothesis {
            injury: "significant bleeding".to_string(),
            category: InjuryCategory::Bleeding,
            lethality,
            confidence: clamp_confidence(BLEEDING_BONUS + scene),
            rationale: "Blood evidence strongly supports injury.".to_string(),
        }
    } else {
        InjuryHypothesis {
            injury: "none_detected".to_string(),
            category: InjuryCategory::NoneDetected,
            lethality: LethalityTier::Unknown,
            confidence: clamp_confidence(scene - NO_INJURY_PENALTY),
            rationale: "No strong blood evidence detected.".to_string(),
        }
    }
}

/// Exactly one weapon and one injury hypothesis, always.
pub fn analyze_weapon_and_injury(
    items: &[EvidenceItem],
) -> (Vec<WeaponHypothesis>, Vec<InjuryHypothesis>) {
    (vec![weapon_hypothesis(items)], vec![injury_hypothesis(items)])
}
