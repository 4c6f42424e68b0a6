use casefile::CaseMemory;

pub const CASE_NOT_FOUND: &str = "Case not found.";
pub const NO_MEMORY_SUMMARY: &str = "No memory summary found.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemoryAnswer {
    /// Answered from cached fields.
    Answered(String),
    /// No keyword matched; the caller may forward to a model.
    Unmatched,
}

/// Keyword dispatch over cached case fields, first match wins:
/// weapon, injury, where/location, risk, evidence.
pub fn answer_from_memory(question: &str, memory: &CaseMemory) -> MemoryAnswer {
    let q = question.to_lowercase();

    if q.contains("weapon") {
        MemoryAnswer::Answered(memory.primary_weapon.clone())
    } else if q.contains("injury") {
        MemoryAnswer::Answered(memory.injury.clone())
    } else if q.contains("where") || q.contains("location") {
        MemoryAnswer::Answered(summary_or_default(memory))
    } else if q.contains("risk") {
        MemoryAnswer::Answered(memory.risk_score.to_string())
    } else if q.contains("evidence") {
        let list: Vec<&str> = memory.evidence_list.iter().map(|e| e.as_str()).collect();
        MemoryAnswer::Answered(if list.is_empty() {
            "none".to_string()
        } else {
            list.join(", ")
        })
    } else {
        MemoryAnswer::Unmatched
    }
}

pub fn summary_or_default(memory: &CaseMemory) -> String {
    if memory.summary.trim().is_empty() {
        NO_MEMORY_SUMMARY.to_string()
    } else {
        memory.summary.clone()
    }
}
