//! Fixed lookup tables. Order matters: objects are reported in table order
//! of first match.

use casefile::EvidenceType;

/// Lowercased substring → evidence type, applied to scene text and captions.
pub const OBJECT_KEYWORDS: &[(&str, EvidenceType)] = &[
    ("blood", EvidenceType::BloodStain),
    ("stain", EvidenceType::BloodStain),
    ("pool of blood", EvidenceType::BloodPool),
    ("pooled", EvidenceType::BloodPool),
    ("knife", EvidenceType::Knife),
    ("blade", EvidenceType::Knife),
    ("gun", EvidenceType::Gun),
    ("pistol", EvidenceType::Gun),
    ("firearm", EvidenceType::Gun),
    ("shell", EvidenceType::ShellCasing),
    ("casing", EvidenceType::ShellCasing),
    ("bullet", EvidenceType::ShellCasing),
    ("footprint", EvidenceType::Footprint),
    ("shoeprint", EvidenceType::Shoeprint),
    ("fingerprint", EvidenceType::Fingerprint),
    ("window", EvidenceType::Window),
    ("broken glass", EvidenceType::BrokenGlass),
    ("chair", EvidenceType::Chair),
    ("table", EvidenceType::Table),
    ("door", EvidenceType::Door),
    ("rope", EvidenceType::Rope),
    ("glove", EvidenceType::Glove),
    ("mask", EvidenceType::Mask),
    ("wallet", EvidenceType::PersonalItem),
    ("phone", EvidenceType::PersonalItem),
];

/// File-name token → caption phrase.
pub const CRIME_KEYWORDS: &[(&str, &str)] = &[
    ("knife", "a sharp knife"),
    ("gun", "a firearm or gun"),
    ("pistol", "a pistol"),
    ("blood", "blood stains or pooling"),
    ("stain", "blood stains"),
    ("pool", "a pool of blood"),
    ("footprint", "a visible footprint"),
    ("shoeprint", "a shoeprint impression"),
    ("fingerprint", "a visible fingerprint"),
    ("wallet", "a dropped wallet"),
    ("phone", "a mobile phone"),
    ("glass", "broken glass pieces"),
    ("bottle", "a bottle that may contain prints"),
    ("rope", "a rope possibly used in struggle"),
    ("body", "a human body or figure"),
    ("victim", "a potential victim lying"),
    ("mask", "a mask possibly used by suspect"),
    ("glove", "a glove indicating suspect presence"),
    ("bullet", "bullet casings"),
    ("casing", "a bullet casing"),
];

pub const KITCHEN_WORDS: &[&str] = &["kitchen", "sink", "pan", "tile"];
pub const BEDROOM_WORDS: &[&str] = &["bed", "pillow", "wardrobe"];
pub const PUBLIC_WORDS: &[&str] = &["street", "alley", "road"];

/// Evidence that weighs heavily on scene confidence.
pub const STRONG_TYPES: &[EvidenceType] = &[
    EvidenceType::Knife,
    EvidenceType::Gun,
    EvidenceType::ShellCasing,
    EvidenceType::BloodStain,
    EvidenceType::BloodPool,
];

pub const MEDIUM_TYPES: &[EvidenceType] = &[
    EvidenceType::Footprint,
    EvidenceType::Shoeprint,
    EvidenceType::BrokenGlass,
    EvidenceType::Fingerprint,
];

pub(crate) fn caption_phrase(token: &str) -> Option<&'static str> {
    CRIME_KEYWORDS
        .iter()
        .find(|(k, _)| *k == token)
        .map(|(_, phrase)| *phrase)
}
