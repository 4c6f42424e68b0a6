//! Deterministic investigation stages.
//!
//! Everything here is pure: the same scene text and captions always give the
//! same evidence, hypotheses, timeline and score. Calls to a language model
//! live in the service; this crate only validates what such a model returns.

pub mod keywords;
pub mod description;
pub mod evidence;
pub mod model_output;
pub mod weapons;
pub mod profiling;
pub mod timeline;
pub mod risk;
pub mod report;
pub mod memory;

pub use description::{caption_from_filename, describe_scene};
pub use evidence::{extract_evidence, finalize_evidence, id_base, scene_confidence, EvidenceDraft};
pub use model_output::{parse_evidence_reply, parse_victim_reply, ModelOutputError};
pub use weapons::analyze_weapon_and_injury;
pub use profiling::{derive_victim_profile, generate_suspect_profiles};
pub use timeline::reconstruct_timeline;
pub use risk::{risk_score, score_case};
pub use report::write_case_report;
pub use memory::{answer_from_memory, MemoryAnswer};

use casefile::{EvidenceItem, InjuryHypothesis, SceneDescription, SuspectHypothesis, TimelineStep, WeaponHypothesis};

/// Everything derived from the evidence list.
#[derive(Clone, Debug, PartialEq)]
pub struct Findings {
    pub weapons: Vec<WeaponHypothesis>,
    pub injuries: Vec<InjuryHypothesis>,
    pub suspect_hypotheses: Vec<SuspectHypothesis>,
    pub timeline: Vec<TimelineStep>,
    pub risk_score: u8,
}

/// Run weapon/injury inference, profiling, timeline and scoring.
pub fn derive_findings(case_id: &str, desc: &SceneDescription, evidence: &[EvidenceItem]) -> Findings {
    let (weapons, injuries) = analyze_weapon_and_injury(evidence);
    let suspect_hypotheses = generate_suspect_profiles(case_id, desc, evidence, &weapons[0]);
    let timeline = reconstruct_timeline(evidence);
    let score = risk::risk_score(evidence.len(), weapons[0].category, injuries[0].category);

    Findings {
        weapons,
        injuries,
        suspect_hypotheses,
        timeline,
        risk_score: score,
    }
}
