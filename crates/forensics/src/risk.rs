use casefile::{EvidenceItem, InjuryCategory, InjuryHypothesis, WeaponCategory, WeaponHypothesis};

pub const MAX_RISK: u8 = 10;

/// Canonical risk score, 0..=10.
///
/// evidence: +1 at 2 items, +1 at 4, +1 at 6
/// weapon:   firearm +4, bladed +3
/// injury:   bleeding +2
/// +1 when a detected weapon and bleeding corroborate each other
pub fn risk_score(evidence_count: usize, weapon: WeaponCategory, injury: InjuryCategory) -> u8 {
    let mut score: u8 = 0;

    score += [2, 4, 6].iter().filter(|t| evidence_count >= **t).count() as u8;

    score += match weapon {
        WeaponCategory::Firearm => 4,
        WeaponCategory::Bladed => 3,
        WeaponCategory::Unknown => 0,
    };

    let bleeding = injury == InjuryCategory::Bleeding;
    if bleeding {
        score += 2;
    }
    if bleeding && weapon != WeaponCategory::Unknown {
        score += 1;
    }

    score.min(MAX_RISK)
}

/// Score from a case's fields. Missing hypotheses count as unknown / none.
pub fn score_case(
    evidence: &[EvidenceItem],
    weapons: &[WeaponHypothesis],
    injuries: &[InjuryHypothesis],
) -> u8 {
    risk_score(
        evidence.len(),
        weapons.first().map(|w| w.category).unwrap_or(WeaponCategory::Unknown),
        injuries
            .first()
            .map(|i| i.category)
            .unwrap_or(InjuryCategory::NoneDetected),
    )
}
