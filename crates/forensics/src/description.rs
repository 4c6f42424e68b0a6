use std::path::Path;

use casefile::{EvidenceType, SceneDescription};

use crate::keywords::{caption_phrase, BEDROOM_WORDS, KITCHEN_WORDS, OBJECT_KEYWORDS, PUBLIC_WORDS};

pub const MAX_DESCRIPTION_CHARS: usize = 800;

pub const NO_OBJECTS_CAPTION: &str = "Crime scene photo; no clear objects detected from file name.";

/// Keyword pass over the scene text and any image captions.
pub fn describe_scene(scene_text: &str, image_captions: &[String]) -> SceneDescription {
    let text = scene_text.to_lowercase();
    let flat = scene_text.trim().replace(['\r', '\n'], " ");
    let description: String = flat.chars().take(MAX_DESCRIPTION_CHARS).collect();

    let mut objects: Vec<EvidenceType> = Vec::new();
    let sources = std::iter::once(text.clone()).chain(image_captions.iter().map(|c| c.to_lowercase()));
    for source in sources {
        for (word, kind) in OBJECT_KEYWORDS {
            if source.contains(word) && !objects.contains(kind) {
                objects.push(*kind);
            }
        }
    }

    let scene_context = if KITCHEN_WORDS.iter().any(|w| text.contains(w)) {
        vec!["indoor", "kitchen"]
    } else if BEDROOM_WORDS.iter().any(|w| text.contains(w)) {
        vec!["indoor", "bedroom"]
    } else if PUBLIC_WORDS.iter().any(|w| text.contains(w)) {
        vec!["outdoor", "public"]
    } else {
        vec!["unknown"]
    };

    let mut forensic_clues = Vec::new();
    if text.contains("spatter") {
        forensic_clues.push("high-velocity blood spatter (possible weapon impact)");
    }
    if text.contains("pool of blood") || text.contains("pooled") {
        forensic_clues.push("pooled blood (injury occurred at location)");
    }
    if text.contains("trail of blood") {
        forensic_clues.push("movement after injury");
    }
    if text.contains("broken window") || objects.contains(&EvidenceType::BrokenGlass) {
        forensic_clues.push("forced entry or exit");
    }
    if objects.contains(&EvidenceType::Footprint) {
        forensic_clues.push("footprints suggest movement or arrival path");
    }
    if text.contains("chair overturned") || text.contains("overturned chair") {
        forensic_clues.push("signs of struggle");
    }

    SceneDescription {
        description,
        objects,
        scene_context: scene_context.into_iter().map(String::from).collect(),
        forensic_clues: forensic_clues.into_iter().map(String::from).collect(),
    }
}

/// Caption an image from its file name alone.
pub fn caption_from_filename(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let found: Vec<&str> = stem
        .replace(['_', '-'], " ")
        .split_whitespace()
        .filter_map(caption_phrase)
        .collect();

    if found.is_empty() {
        NO_OBJECTS_CAPTION.to_string()
    } else {
        format!("Photo appears to show {}.", found.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objects_deduplicated_in_table_order() {
        let d = describe_scene("Blood on the knife. More blood by the door.", &[]);
        assert_eq!(
            d.objects,
            vec![EvidenceType::BloodStain, EvidenceType::Knife, EvidenceType::Door]
        );
    }

    #[test]
    fn test_captions_contribute_objects() {
        let d = describe_scene("quiet room", &["Photo appears to show a sharp knife.".to_string()]);
        assert_eq!(d.objects, vec![EvidenceType::Knife]);
    }

    #[test]
    fn test_scene_context() {
        assert_eq!(describe_scene("body by the kitchen sink", &[]).scene_context, vec!["indoor", "kitchen"]);
        assert_eq!(describe_scene("dark alley", &[]).scene_context, vec!["outdoor", "public"]);
        assert_eq!(describe_scene("somewhere", &[]).scene_context, vec!["unknown"]);
    }

    #[test]
    fn test_clues() {
        let d = describe_scene("Broken window, trail of blood, overturned chair", &[]);
        assert!(d.forensic_clues.contains(&"forced entry or exit".to_string()));
        assert!(d.forensic_clues.contains(&"movement after injury".to_string()));
        assert!(d.forensic_clues.contains(&"signs of struggle".to_string()));
    }

    #[test]
    fn test_description_flattened_and_truncated() {
        let long = format!("line one\nline two {}", "x".repeat(2000));
        let d = describe_scene(&long, &[]);
        assert!(!d.description.contains('\n'));
        assert_eq!(d.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_caption_from_filename() {
        assert_eq!(
            caption_from_filename("uploads/knife_blood-pool.jpg"),
            "Photo appears to show a sharp knife, blood stains or pooling, a pool of blood."
        );
        assert_eq!(caption_from_filename("IMG_0042.png"), NO_OBJECTS_CAPTION);
    }
}
