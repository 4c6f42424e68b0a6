use casefile::{
    EvidenceItem, GenderProbability, InjuryCategory, InjuryHypothesis, LethalityTier,
    SceneDescription, SuspectHypothesis, VictimProfile, WeaponCategory, WeaponHypothesis,
};

use crate::evidence::id_base;

/// Two suspect hypotheses; narrative picked by weapon category.
pub fn generate_suspect_profiles(
    case_id: &str,
    desc: &SceneDescription,
    evidence: &[EvidenceItem],
    weapon: &WeaponHypothesis,
) -> Vec<SuspectHypothesis> {
    let scene = desc.description.to_lowercase();
    let base = id_base(case_id);
    let has_footprints = evidence
        .iter()
        .any(|e| e.kind.as_str().contains("footprint") || e.kind.as_str().contains("shoeprint"));
    let heavy_blood = evidence
        .iter()
        .filter(|e| e.kind.as_str().contains("blood"))
        .count()
        >= 2;

    let (dominant_hand, intent, experience, primary_rationale) = match weapon.category {
        WeaponCategory::Bladed => (
            "right",
            "assault",
            "low-moderate",
            "Knife evidence points to a close-range confrontation by a single aggressor; \
             medium build and probable right-hand use.",
        ),
        WeaponCategory::Firearm => (
            "unknown",
            "targeted attack",
            "moderate",
            "Ballistic evidence suggests a deliberate attacker able to engage from distance; \
             medium build typical for a single aggressor.",
        ),
        WeaponCategory::Unknown => (
            "unknown",
            "unknown",
            "low-moderate",
            "No direct weapon evidence; medium build assumed as the most common \
             single-aggressor profile.",
        ),
    };

    let secondary_rationale = if heavy_blood {
        "Heavy blood evidence with limited other disturbance fits a panicked, inexperienced assailant."
    } else {
        "Lighter build hypothesis due to limited physical disturbance at the scene."
    };

    vec![
        SuspectHypothesis {
            id: format!("SP-{base}-1"),
            age_range: "25-40".to_string(),
            build: "medium".to_string(),
            height_estimate_cm: "165-180".to_string(),
            shoe_size_estimate: if has_footprints { "8-10 US" } else { "unknown" }.to_string(),
            dominant_hand: dominant_hand.to_string(),
            experience_level: experience.to_string(),
            likely_intent: intent.to_string(),
            emotional_state: "agitated / impulsive".to_string(),
            gender_probability: GenderProbability {
                male: 0.55,
                female: 0.35,
                unknown: 0.10,
            },
            confidence: 0.45,
            rationale: primary_rationale.to_string(),
        },
        SuspectHypothesis {
            id: format!("SP-{base}-2"),
            age_range: "18-28".to_string(),
            build: "slim".to_string(),
            height_estimate_cm: "155-170".to_string(),
            shoe_size_estimate: if has_footprints { "6-8 US" } else { "unknown" }.to_string(),
            dominant_hand: if scene.contains("left") { "left" } else { "unknown" }.to_string(),
            experience_level: "low".to_string(),
            likely_intent: "robbery / conflict".to_string(),
            emotional_state: "panic / stress".to_string(),
            gender_probability: GenderProbability {
                male: 0.40,
                female: 0.50,
                unknown: 0.10,
            },
            confidence: 0.28,
            rationale: secondary_rationale.to_string(),
        },
    ]
}

/// Victim profile without a model, from the injury and weapon hypotheses.
pub fn derive_victim_profile(weapon: &WeaponHypothesis, injury: &InjuryHypothesis) -> VictimProfile {
    let risk_level = match (injury.category, injury.lethality) {
        (InjuryCategory::NoneDetected, _) => "Undetermined",
        (_, LethalityTier::High | LethalityTier::MediumHigh) => "High",
        (_, LethalityTier::Medium) => "Medium",
        (_, LethalityTier::Low) => "Low",
        (_, LethalityTier::Unknown) => "Undetermined",
    };
    let relation = match weapon.category {
        WeaponCategory::Bladed => "Close-range contact; attacker likely within arm's reach of the victim.",
        WeaponCategory::Firearm => "Attacker may have engaged from distance; relation not inferable.",
        WeaponCategory::Unknown => "Unknown",
    };

    VictimProfile {
        risk_level: risk_level.to_string(),
        demographics_inferred: "Not determinable from scene data".to_string(),
        relation_to_suspect_hypothesis: relation.to_string(),
        notes: format!("{} ({})", injury.rationale, injury.injury),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyze_weapon_and_injury, describe_scene, extract_evidence};

    #[test]
    fn test_two_profiles_with_weapon_narrative() {
        let desc = describe_scene("knife near the left hand, footprint by the door", &[]);
        let ev = extract_evidence("CASE-p", &desc);
        let (w, _) = analyze_weapon_and_injury(&ev);
        let profiles = generate_suspect_profiles("CASE-p", &desc, &ev, &w[0]);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].dominant_hand, "right");
        assert_eq!(profiles[0].likely_intent, "assault");
        assert_eq!(profiles[0].shoe_size_estimate, "8-10 US");
        assert_eq!(profiles[1].dominant_hand, "left");
        assert_ne!(profiles[0].id, profiles[1].id);
    }

    #[test]
    fn test_unknown_weapon_profiles() {
        let desc = describe_scene("", &[]);
        let ev = extract_evidence("CASE-q", &desc);
        let (w, _) = analyze_weapon_and_injury(&ev);
        let profiles = generate_suspect_profiles("CASE-q", &desc, &ev, &w[0]);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].likely_intent, "unknown");
        assert_eq!(profiles[0].shoe_size_estimate, "unknown");
    }

    #[test]
    fn test_derived_victim_profile() {
        let desc = describe_scene("knife, blood everywhere", &[]);
        let ev = extract_evidence("CASE-v", &desc);
        let (w, i) = analyze_weapon_and_injury(&ev);
        let v = derive_victim_profile(&w[0], &i[0]);
        assert_eq!(v.risk_level, "High");
        assert!(!v.is_unknown());
    }
}
