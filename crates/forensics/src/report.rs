use std::fmt::Write as _;

use casefile::Case;

const NO_SUMMARY: &str = "(summary not provided)";

/// Markdown case report. The PDF export renders this same text.
pub fn write_case_report(case: &Case) -> String {
    let mut out = String::new();
    let summary = if case.executive_summary.trim().is_empty() {
        NO_SUMMARY
    } else {
        case.executive_summary.as_str()
    };

    let _ = writeln!(out, "# CSI Case Report: {}\n", case.case_id);
    let _ = writeln!(out, "Risk score: {}/10\n", case.risk_score);

    let _ = writeln!(out, "## Executive Summary\n");
    let _ = writeln!(out, "{summary}\n");

    let _ = writeln!(out, "## Scene Description\n");
    let _ = writeln!(out, "{}\n", case.description.description);
    if let Some(visual) = &case.visual_analysis {
        let _ = writeln!(out, "### Visual Analysis\n");
        let _ = writeln!(out, "{visual}\n");
    }

    let _ = writeln!(out, "## Evidence Table\n");
    let _ = writeln!(out, "| ID | Type | Location | Description | Confidence |");
    let _ = writeln!(out, "|---|---|---|---|---|");
    for ev in &case.evidence_items {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {:.2} |",
            ev.id,
            ev.kind,
            cell(&ev.location_text),
            cell(&ev.description),
            ev.confidence
        );
    }

    let _ = writeln!(out, "\n## Weapon and Injury\n");
    for w in &case.weapons {
        let _ = writeln!(
            out,
            "- Weapon: {} (confidence {:.2}, force {}, distance {}). {}",
            w.weapon, w.confidence, w.force_required, w.engagement_distance, w.rationale
        );
    }
    for i in &case.injuries {
        let _ = writeln!(
            out,
            "- Injury: {} (lethality {}, confidence {:.2}). {}",
            i.injury,
            i.lethality.label(),
            i.confidence,
            i.rationale
        );
    }

    let _ = writeln!(out, "\n## Timeline\n");
    for t in &case.timeline {
        let _ = writeln!(
            out,
            "- Step {}: {} - Evidence {} - {}",
            t.step,
            t.event,
            t.evidence_id.as_deref().unwrap_or("-"),
            t.rationale
        );
    }

    let _ = writeln!(out, "\n## Suspect Hypotheses\n");
    for s in &case.suspect_hypotheses {
        let _ = writeln!(
            out,
            "- {}: age {}, build {}, confidence {:.2}. Reason: {}",
            s.id, s.age_range, s.build, s.confidence, s.rationale
        );
    }

    let v = &case.victim_profile;
    let _ = writeln!(out, "\n## Victim Profile\n");
    let _ = writeln!(out, "- Risk level: {}", v.risk_level);
    let _ = writeln!(out, "- Demographics: {}", v.demographics_inferred);
    let _ = writeln!(out, "- Relation to suspect: {}", v.relation_to_suspect_hypothesis);
    let _ = writeln!(out, "- Notes: {}", v.notes);

    out
}

fn cell(s: &str) -> String {
    s.replace('|', "/").replace('\n', " ")
}
