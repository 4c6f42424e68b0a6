use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://csi_app.db?mode=rwc";
pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.0-flash-exp:free";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub output_dir: PathBuf,
    pub bind_addr: String,
    /// `None` when no API key is configured; the pipeline then runs keyword-only.
    pub llm: Option<LlmConfig>,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_backoff: Duration,
    pub referer: String,
    pub title: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (env, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = get_or("DATABASE_URL", DEFAULT_DATABASE_URL);
        let output_dir = PathBuf::from(get_or("CSI_OUTPUT_DIR", "csi_output"));
        let bind_addr = get_or("CSI_BIND_ADDR", "0.0.0.0:8080");

        if !database_url.starts_with("sqlite:") {
            bail!("DATABASE_URL must be a sqlite: URL");
        }

        let llm = match lookup("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty()) {
            None => None,
            Some(api_key) => {
                let base_url = get_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL);
                let timeout_secs: u64 = parse(&lookup, "LLM_TIMEOUT_SECS", 30)?;
                let max_attempts: u32 = parse(&lookup, "LLM_MAX_ATTEMPTS", 3)?;
                let backoff_ms: u64 = parse(&lookup, "LLM_RETRY_BACKOFF_MS", 2000)?;

                // Tiny sanity checks (fail fast, fail loud)
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    bail!("LLM_BASE_URL must start with http:// or https://");
                }
                if max_attempts == 0 {
                    bail!("LLM_MAX_ATTEMPTS must be at least 1");
                }
                if timeout_secs == 0 {
                    bail!("LLM_TIMEOUT_SECS must be at least 1");
                }

                Some(LlmConfig {
                    base_url: base_url.trim_end_matches('/').to_string(),
                    api_key,
                    model: get_or("LLM_MODEL", DEFAULT_LLM_MODEL),
                    timeout: Duration::from_secs(timeout_secs),
                    max_attempts,
                    retry_backoff: Duration::from_millis(backoff_ms),
                    referer: get_or("LLM_HTTP_REFERER", "http://localhost:8080"),
                    title: get_or("LLM_APP_TITLE", "CSI Investigator"),
                })
            }
        };

        Ok(Self {
            database_url,
            output_dir,
            bind_addr,
            llm,
        })
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for env var {key}: {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults_without_key() {
        let c = cfg(&[]).unwrap();
        assert_eq!(c.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(c.output_dir, PathBuf::from("csi_output"));
        assert!(c.llm.is_none());
    }

    #[test]
    fn test_llm_section() {
        let c = cfg(&[
            ("OPENROUTER_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "http://127.0.0.1:9999/v1/"),
            ("LLM_MAX_ATTEMPTS", "5"),
        ])
        .unwrap();
        let llm = c.llm.unwrap();
        assert_eq!(llm.base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(llm.max_attempts, 5);
        assert_eq!(llm.timeout, Duration::from_secs(30));
        assert_eq!(llm.retry_backoff, Duration::from_millis(2000));
        assert_eq!(llm.model, DEFAULT_LLM_MODEL);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(cfg(&[("OPENROUTER_API_KEY", "k"), ("LLM_BASE_URL", "ftp://x")]).is_err());
        assert!(cfg(&[("OPENROUTER_API_KEY", "k"), ("LLM_MAX_ATTEMPTS", "0")]).is_err());
        assert!(cfg(&[("OPENROUTER_API_KEY", "k"), ("LLM_TIMEOUT_SECS", "soon")]).is_err());
        assert!(cfg(&[("DATABASE_URL", "postgres://db")]).is_err());
    }

    #[test]
    fn test_blank_key_means_no_llm() {
        assert!(cfg(&[("OPENROUTER_API_KEY", "  ")]).unwrap().llm.is_none());
    }
}
