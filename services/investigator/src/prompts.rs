use casefile::{Case, EvidenceType, SceneDescription};

fn vocabulary() -> String {
    EvidenceType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The full scene text goes in, not the truncated description, so appended
/// re-analysis notes and image findings reach the model.
pub fn evidence_prompt(
    input_text: &str,
    captions: &[String],
    visual_analysis: Option<&str>,
    desc: &SceneDescription,
) -> String {
    let captions = if captions.is_empty() {
        "none".to_string()
    } else {
        captions.iter().map(|c| format!("- {c}")).collect::<Vec<_>>().join("\n")
    };
    format!(
        "You are a crime scene evidence analyst.\n\
         Extract physical evidence from the scene below.\n\
         Reply with ONLY a JSON object of the form\n\
         {{\"evidence_items\": [{{\"type\": \"...\", \"description\": \"...\", \"confidence\": 0.0, \"location_text\": \"...\"}}]}}\n\
         Allowed types: {vocab}.\n\
         Confidence is a number between 0 and 1.\n\n\
         Scene text:\n{input_text}\n\n\
         Image captions:\n{captions}\n\n\
         Image analysis:\n{visual}\n\n\
         Context: {context}\n\
         Clues: {clues}",
        vocab = vocabulary(),
        visual = visual_analysis.unwrap_or("none"),
        context = desc.scene_context.join(", "),
        clues = desc.forensic_clues.join("; "),
    )
}

pub fn victim_prompt(case_json: &str) -> String {
    format!(
        "You are a forensic victimologist.\n\
         Based on the case below, reply with ONLY a JSON object with exactly these string fields:\n\
         risk_level, demographics_inferred, relation_to_suspect_hypothesis, notes.\n\
         Use \"Unknown\" where the evidence says nothing.\n\n\
         Case:\n{case_json}"
    )
}

pub fn summary_prompt(case_json: &str) -> String {
    format!(
        "You are a senior crime scene investigator.\n\
         Write a short executive summary (3 to 5 sentences) of the case below for a lead detective.\n\
         Mention the likely weapon, the injury, the sequence of events and the risk level.\n\
         Do not invent evidence that is not listed.\n\n\
         Case:\n{case_json}"
    )
}

pub fn image_prompt(scene_text: &str) -> String {
    format!(
        "You are a forensic photographer reviewing crime scene images.\n\
         Describe visible evidence: weapons, blood, footprints, broken objects and anything disturbed.\n\
         Be factual and concise.\n\n\
         Investigator notes:\n{scene_text}"
    )
}

pub fn question_prompt(case: &Case, case_json: &str, question: &str) -> String {
    format!(
        "You are assisting an investigator with case {id}.\n\
         Answer the question using only the case data below. If the data does not say, answer \"Unknown\".\n\n\
         Case:\n{case_json}\n\n\
         Question: {question}",
        id = case.case_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use forensics::describe_scene;

    #[test]
    fn test_evidence_prompt_lists_vocabulary() {
        let desc = describe_scene("knife near the door", &[]);
        let p = evidence_prompt("knife near the door", &[], None, &desc);
        assert!(p.contains("evidence_items"));
        assert!(p.contains("shell_casing"));
        assert!(p.contains("scene_note"));
        assert!(p.contains("knife near the door"));
    }

    #[test]
    fn test_evidence_prompt_carries_full_text_and_images() {
        let text = format!("{}\n\n[UPDATED LOG]: rope under the bed", "quiet room. ".repeat(100));
        let captions = vec!["Photo appears to show: gun".to_string()];
        let desc = describe_scene(&text, &captions);
        let p = evidence_prompt(&text, &captions, Some("A pistol on the rug."), &desc);
        assert!(p.contains("rope under the bed"));
        assert!(p.contains("- Photo appears to show: gun"));
        assert!(p.contains("A pistol on the rug."));
    }

    #[test]
    fn test_victim_prompt_names_fields() {
        let p = victim_prompt("{}");
        for field in ["risk_level", "demographics_inferred", "relation_to_suspect_hypothesis", "notes"] {
            assert!(p.contains(field));
        }
    }
}
