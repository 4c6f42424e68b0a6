use std::path::PathBuf;

use casefile::Case;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::pdf::render_pdf;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf error: {0}")]
    Pdf(String),

    #[error("serialization error: {0}")]
    Ser(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportPaths {
    pub json_path: PathBuf,
    pub md_path: PathBuf,
    pub pdf_path: PathBuf,
}

/// Writes per-case JSON, Markdown and PDF artifacts into one directory.
#[derive(Clone, Debug)]
pub struct Exporter {
    out_dir: PathBuf,
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    pub fn paths_for(&self, case_id: &str) -> ExportPaths {
        let stem = file_stem(case_id);
        ExportPaths {
            json_path: self.out_dir.join(format!("{stem}.json")),
            md_path: self.out_dir.join(format!("{stem}.md")),
            pdf_path: self.out_dir.join(format!("{stem}.pdf")),
        }
    }

    pub async fn write(&self, case: &Case) -> Result<ExportPaths, ExportError> {
        let paths = self.paths_for(&case.case_id);
        let json = serde_json::to_string_pretty(case).map_err(|e| ExportError::Ser(e.to_string()))?;
        let report = forensics::write_case_report(case);

        // lopdf is synchronous
        let pdf_input = report.clone();
        let pdf = tokio::task::spawn_blocking(move || render_pdf(&pdf_input))
            .await
            .map_err(|e| ExportError::Pdf(e.to_string()))??;

        tokio::fs::create_dir_all(&self.out_dir).await?;
        tokio::fs::write(&paths.json_path, json).await?;
        tokio::fs::write(&paths.md_path, report).await?;
        tokio::fs::write(&paths.pdf_path, pdf).await?;

        info!(case_id = %case.case_id, dir = %self.out_dir.display(), "exported case artifacts");
        Ok(paths)
    }
}

/// Case ids are validated upstream; this keeps file names safe regardless.
fn file_stem(case_id: &str) -> String {
    let stem: String = case_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "case".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casefile::testing::sample_case;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("CASE-1a2b"), "CASE-1a2b");
        assert_eq!(file_stem("../etc/passwd"), "___etc_passwd");
        assert_eq!(file_stem(""), "case");
    }

    #[tokio::test]
    async fn test_writes_three_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("out"));
        let case = sample_case("CASE-export");

        let paths = exporter.write(&case).await.unwrap();

        let json = std::fs::read_to_string(&paths.json_path).unwrap();
        let back: Case = serde_json::from_str(&json).unwrap();
        assert_eq!(back, case);

        let md = std::fs::read_to_string(&paths.md_path).unwrap();
        assert!(md.starts_with("# CSI Case Report: CASE-export"));

        let pdf = std::fs::read(&paths.pdf_path).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
