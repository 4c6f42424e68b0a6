//! Investigation pipeline: description, evidence, findings, victim profile,
//! summary, persistence and export for one case.
//!
//! Model calls are optional at every step. Each one has a deterministic
//! fallback, so a run only fails on storage or export errors.

use std::sync::Arc;

use bytes::Bytes;
use casefile::{Case, CaseEnvelope, EnvelopeError, EvidenceItem, EvidenceSource, SceneDescription, VictimProfile};
use casestore::{CaseStore, StoreError, StoredCase};
use chrono::{DateTime, Utc};
use forensics::{
    answer_from_memory, caption_from_filename, derive_findings, derive_victim_profile, describe_scene,
    extract_evidence, finalize_evidence, parse_evidence_reply, parse_victim_reply, MemoryAnswer,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::export::{ExportError, ExportPaths, Exporter};
use crate::fallback::{summary_fallback, NO_PROVIDER_SUMMARY};
use crate::prompts;
use crate::provider::{CompletionRequest, ImageAttachment, LLMProvider};

pub const MAX_CASE_ID_LEN: usize = 64;
pub const UPDATE_MARKER: &str = "[UPDATED LOG]:";

#[derive(Debug, Error)]
pub enum InvestigationError {
    #[error("case {0} not found")]
    NotFound(String),

    #[error("invalid case id {0:?}")]
    InvalidCaseId(String),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("envelope: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("export: {0}")]
    Export(#[from] ExportError),

    #[error("serialization: {0}")]
    Ser(String),
}

pub type Result<T> = std::result::Result<T, InvestigationError>;

#[derive(Clone, Debug)]
pub struct ImageInput {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

#[derive(Clone, Debug, Default)]
pub struct InvestigationRequest {
    /// Generated when absent.
    pub case_id: Option<String>,
    pub scene_text: String,
    pub images: Vec<ImageInput>,
}

#[derive(Clone, Debug, Serialize)]
pub struct InvestigationOutcome {
    pub case: Case,
    pub artifacts: ExportPaths,
}

/// State carried over from an earlier run of the same case.
#[derive(Default)]
struct Prior {
    created_at: Option<DateTime<Utc>>,
    captions: Vec<String>,
    visual_analysis: Option<String>,
}

pub struct Investigator {
    store: Arc<dyn CaseStore>,
    provider: Option<Arc<dyn LLMProvider>>,
    exporter: Exporter,
}

impl Investigator {
    pub fn new(store: Arc<dyn CaseStore>, provider: Option<Arc<dyn LLMProvider>>, exporter: Exporter) -> Self {
        Self {
            store,
            provider,
            exporter,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Analyze a new scene. An existing case with the same id is overwritten;
    /// only its creation time is kept.
    pub async fn investigate(&self, req: InvestigationRequest) -> Result<InvestigationOutcome> {
        let case_id = match req.case_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => validate_case_id(id)?,
            None => new_case_id(),
        };

        let created_at = self
            .store
            .get(&case_id)
            .await?
            .map(|env| env.case.created_at);
        let prior = Prior {
            created_at,
            ..Prior::default()
        };

        self.run(case_id, req.scene_text, req.images, prior).await
    }

    /// Re-run the pipeline with extra notes and images appended to a stored case.
    pub async fn reanalyze(&self, case_id: &str, notes: &str, images: Vec<ImageInput>) -> Result<InvestigationOutcome> {
        let env = self
            .store
            .get(case_id)
            .await?
            .ok_or_else(|| InvestigationError::NotFound(case_id.to_string()))?;
        let old = env.case;

        let text = merge_text(&old.input_text, notes);
        let prior = Prior {
            created_at: Some(old.created_at),
            captions: old.image_captions,
            visual_analysis: old.visual_analysis,
        };

        self.run(old.case_id, text, images, prior).await
    }

    pub async fn case(&self, case_id: &str) -> Result<Option<CaseEnvelope>> {
        Ok(self.store.get(case_id).await?)
    }

    pub async fn list(&self) -> Result<Vec<StoredCase>> {
        Ok(self.store.list().await?)
    }

    pub async fn delete(&self, case_id: &str) -> Result<bool> {
        let existed = self.store.delete(case_id).await?;
        if existed {
            info!(case_id, "case deleted");
        }
        Ok(existed)
    }

    /// Answer a question about a stored case. `None` when the case is missing.
    pub async fn ask(&self, case_id: &str, question: &str) -> Result<Option<String>> {
        let Some(env) = self.store.get(case_id).await? else {
            return Ok(None);
        };

        if let MemoryAnswer::Answered(answer) = answer_from_memory(question, &env.memory) {
            return Ok(Some(answer));
        }

        let fallback = forensics::memory::summary_or_default(&env.memory);
        let Some(provider) = &self.provider else {
            return Ok(Some(fallback));
        };

        let case_json = case_json(&env.case)?;
        let req = CompletionRequest::text(prompts::question_prompt(&env.case, &case_json, question));
        match provider.complete(&req).await {
            Ok(answer) => Ok(Some(answer)),
            Err(e) => {
                warn!(case_id, error = %e, "question forwarding failed; answering with summary");
                Ok(Some(fallback))
            }
        }
    }

    async fn run(
        &self,
        case_id: String,
        input_text: String,
        images: Vec<ImageInput>,
        prior: Prior,
    ) -> Result<InvestigationOutcome> {
        info!(
            case_id = %case_id,
            images = images.len(),
            model = self.provider.is_some(),
            "investigation started"
        );

        let mut image_captions = prior.captions;
        image_captions.extend(images.iter().map(|img| caption_from_filename(&img.file_name)));

        let visual_analysis = self.analyze_images(&case_id, &input_text, &images).await.or(prior.visual_analysis);

        // model prose is never keyword-matched; it only reaches the evidence prompt
        let description = describe_scene(&input_text, &image_captions);

        let evidence_prompt = prompts::evidence_prompt(
            &input_text,
            &image_captions,
            visual_analysis.as_deref(),
            &description,
        );
        let (evidence_items, evidence_source) = self.extract(&case_id, &description, evidence_prompt).await;
        let findings = derive_findings(&case_id, &description, &evidence_items);

        let now = Utc::now();
        let victim_profile = match (findings.weapons.first(), findings.injuries.first()) {
            (Some(w), Some(i)) if self.provider.is_none() => derive_victim_profile(w, i),
            _ => VictimProfile::unknown(),
        };

        let mut case = Case {
            case_id,
            input_text,
            image_captions,
            visual_analysis,
            description,
            evidence_items,
            evidence_source,
            weapons: findings.weapons,
            injuries: findings.injuries,
            suspect_hypotheses: findings.suspect_hypotheses,
            victim_profile,
            timeline: findings.timeline,
            risk_score: findings.risk_score,
            executive_summary: String::new(),
            created_at: prior.created_at.unwrap_or(now),
            analyzed_at: now,
        };

        if let Some(provider) = &self.provider {
            case.victim_profile = self.model_victim(provider.as_ref(), &case).await?;
        }
        case.executive_summary = self.summarize(&case).await?;

        let envelope = CaseEnvelope::seal(case.clone())?;
        self.store.put(&case.case_id, &envelope).await?;
        info!(
            case_id = %case.case_id,
            evidence = case.evidence_items.len(),
            source = ?case.evidence_source,
            risk = case.risk_score,
            "case persisted"
        );

        let artifacts = self.exporter.write(&case).await?;
        Ok(InvestigationOutcome { case, artifacts })
    }

    async fn analyze_images(&self, case_id: &str, scene_text: &str, images: &[ImageInput]) -> Option<String> {
        let provider = self.provider.as_ref()?;
        if images.is_empty() {
            return None;
        }

        let attachments = images
            .iter()
            .map(|img| ImageAttachment {
                mime: img.mime.clone(),
                bytes: img.bytes.clone(),
            })
            .collect();
        let req = CompletionRequest::text(prompts::image_prompt(scene_text)).with_images(attachments);

        match provider.complete(&req).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(case_id, error = %e, "image analysis failed");
                None
            }
        }
    }

    /// Model evidence when available and valid, keyword evidence otherwise.
    async fn extract(
        &self,
        case_id: &str,
        desc: &SceneDescription,
        prompt: String,
    ) -> (Vec<EvidenceItem>, EvidenceSource) {
        let Some(provider) = &self.provider else {
            return (extract_evidence(case_id, desc), EvidenceSource::Keyword);
        };

        let req = CompletionRequest::text(prompt);
        let drafts = match provider.complete(&req).await {
            Ok(reply) => match parse_evidence_reply(&reply) {
                Ok(drafts) if !drafts.is_empty() => Some(drafts),
                Ok(_) => {
                    warn!(case_id, "model returned no evidence; using keyword path");
                    None
                }
                Err(e) => {
                    warn!(case_id, error = %e, "model evidence rejected; using keyword path");
                    None
                }
            },
            Err(e) => {
                warn!(case_id, error = %e, "evidence extraction call failed; using keyword path");
                None
            }
        };

        match drafts {
            Some(drafts) => (finalize_evidence(case_id, drafts, desc), EvidenceSource::Model),
            None => (extract_evidence(case_id, desc), EvidenceSource::Keyword),
        }
    }

    async fn model_victim(&self, provider: &dyn LLMProvider, case: &Case) -> Result<VictimProfile> {
        let req = CompletionRequest::text(prompts::victim_prompt(&case_json(case)?));
        let profile = match provider.complete(&req).await {
            Ok(reply) => parse_victim_reply(&reply).unwrap_or_else(|e| {
                warn!(case_id = %case.case_id, error = %e, "victim profile reply rejected");
                VictimProfile::unknown()
            }),
            Err(e) => {
                warn!(case_id = %case.case_id, error = %e, "victim profile call failed");
                VictimProfile::unknown()
            }
        };
        Ok(profile)
    }

    async fn summarize(&self, case: &Case) -> Result<String> {
        let Some(provider) = &self.provider else {
            return Ok(NO_PROVIDER_SUMMARY.to_string());
        };

        let req = CompletionRequest::text(prompts::summary_prompt(&case_json(case)?));
        Ok(match provider.complete(&req).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(case_id = %case.case_id, error = %e, "summary call failed; using fallback text");
                summary_fallback(&e)
            }
        })
    }
}

fn case_json(case: &Case) -> Result<String> {
    serde_json::to_string_pretty(case).map_err(|e| InvestigationError::Ser(e.to_string()))
}

/// `CASE-` followed by eight hex characters.
pub fn new_case_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("CASE-{}", &id[..8])
}

pub fn validate_case_id(id: &str) -> Result<String> {
    let ok = !id.is_empty()
        && id.len() <= MAX_CASE_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(id.to_string())
    } else {
        Err(InvestigationError::InvalidCaseId(id.to_string()))
    }
}

/// Append re-analysis notes to the stored text.
pub fn merge_text(old: &str, notes: &str) -> String {
    let notes = notes.trim();
    if notes.is_empty() {
        old.to_string()
    } else if old.trim().is_empty() {
        notes.to_string()
    } else {
        format!("{old}\n\n{UPDATE_MARKER} {notes}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_id_shape() {
        let id = new_case_id();
        assert!(id.starts_with("CASE-"));
        assert_eq!(id.len(), 13);
        assert!(validate_case_id(&id).is_ok());
    }

    #[test]
    fn test_rejects_bad_case_ids() {
        let long = "x".repeat(65);
        for bad in ["", "has space", "../up", long.as_str()] {
            assert!(matches!(validate_case_id(bad), Err(InvestigationError::InvalidCaseId(_))), "{bad:?}");
        }
        assert!(validate_case_id("CASE_ok-1").is_ok());
    }

    #[test]
    fn test_merge_text() {
        assert_eq!(merge_text("first", "second"), "first\n\n[UPDATED LOG]: second");
        assert_eq!(merge_text("first", "  "), "first");
        assert_eq!(merge_text("", "second"), "second");
    }
}
