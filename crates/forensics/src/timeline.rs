use casefile::{EvidenceItem, TimelineStep};

#[derive(Default)]
struct Flags<'a> {
    entry: Option<&'a str>,
    footprints: Option<&'a str>,
    weapon: Option<&'a str>,
    shell: Option<&'a str>,
    blood: Option<&'a str>,
}

/// Each flag remembers the first evidence id that raised it.
fn scan(items: &[EvidenceItem]) -> Flags<'_> {
    let mut f = Flags::default();
    for ev in items {
        let t = ev.kind.as_str();
        let d = ev.description.to_lowercase();
        let id = Some(ev.id.as_str());
        if (t.contains("footprint") || t.contains("shoeprint")) && f.footprints.is_none() {
            f.footprints = id;
        }
        if (t.contains("broken_glass") || t.contains("window") || d.contains("window")) && f.entry.is_none() {
            f.entry = id;
        }
        if (t.contains("knife") || t.contains("gun")) && f.weapon.is_none() {
            f.weapon = id;
        }
        if (t.contains("shell") || t.contains("casing")) && f.shell.is_none() {
            f.shell = id;
        }
        if t.contains("blood") && f.blood.is_none() {
            f.blood = id;
        }
    }
    f
}

/// Arrival, weapon use, injury, flight, in that fixed order. Steps number
/// from 1; with no flags a single "Scene documented" step is emitted.
pub fn reconstruct_timeline(items: &[EvidenceItem]) -> Vec<TimelineStep> {
    let f = scan(items);
    let candidates = [
        (
            f.entry.or(f.footprints),
            "Suspect arrived at the scene",
            "Movement or entry indicators detected",
        ),
        (
            f.weapon.or(f.shell),
            "Weapon discharged or used",
            "Ballistic or weapon evidence present",
        ),
        (
            f.blood,
            "Victim sustained injuries",
            "Blood evidence confirms impact",
        ),
        (
            f.footprints,
            "Suspect fled the scene",
            "Footwear patterns indicate exit path",
        ),
    ];

    let mut timeline: Vec<TimelineStep> = Vec::new();
    for (trigger, event, rationale) in candidates {
        let Some(evidence_id) = trigger else { continue };
        timeline.push(TimelineStep {
            step: timeline.len() as u32 + 1,
            event: event.to_string(),
            rationale: rationale.to_string(),
            evidence_id: Some(evidence_id.to_string()),
        });
    }

    if timeline.is_empty() {
        timeline.push(TimelineStep {
            step: 1,
            event: "Scene documented".to_string(),
            rationale: "Insufficient evidence to reconstruct events".to_string(),
            evidence_id: None,
        });
    }
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{describe_scene, extract_evidence};

    fn timeline_for(text: &str) -> Vec<TimelineStep> {
        reconstruct_timeline(&extract_evidence("CASE-t", &describe_scene(text, &[])))
    }

    #[test]
    fn test_full_sequence() {
        let t = timeline_for("broken glass, footprint, knife and blood");
        let events: Vec<&str> = t.iter().map(|s| s.event.as_str()).collect();
        assert_eq!(
            events,
            vec![
                "Suspect arrived at the scene",
                "Weapon discharged or used",
                "Victim sustained injuries",
                "Suspect fled the scene",
            ]
        );
        assert!(t.iter().all(|s| s.evidence_id.is_some()));
    }

    #[test]
    fn test_steps_contiguous_when_gaps() {
        let t = timeline_for("blood only");
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].step, 1);
        assert_eq!(t[0].event, "Victim sustained injuries");
    }

    #[test]
    fn test_fallback_step() {
        let t = timeline_for("");
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].event, "Scene documented");
        assert_eq!(t[0].evidence_id, None);
    }
}
