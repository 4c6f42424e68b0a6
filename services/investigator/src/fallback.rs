use crate::provider::ProviderError;

pub const NO_PROVIDER_SUMMARY: &str = "(LLM API key missing - analysis skipped)";
pub const QUOTA_SUMMARY: &str = "(Summary unavailable: API Quota Exceeded. Please try again later.)";
pub const UNAVAILABLE_SUMMARY: &str = "(Summary unavailable: analysis service did not respond.)";

/// Fixed summary text for a failed summary call.
pub fn summary_fallback(err: &ProviderError) -> String {
    match err {
        ProviderError::RateLimited => QUOTA_SUMMARY.to_string(),
        ProviderError::ModelNotFound(model) => format!("(Summary unavailable: Model {model} not found.)"),
        _ => UNAVAILABLE_SUMMARY.to_string(),
    }
}

/// True for an empty summary or one of the fixed fallback texts.
pub fn is_fallback_summary(summary: &str) -> bool {
    let s = summary.trim();
    s.is_empty() || s == NO_PROVIDER_SUMMARY || s.starts_with("(Summary unavailable")
}
