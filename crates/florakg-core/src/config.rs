//! Application configuration.
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. Every field has a default so an empty file is valid.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{FloraError, FloraResult};
use crate::plant::default_aliases;
use crate::store::StoreBackend;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "florakg.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub llm: LlmConfig,
    pub answer: AnswerConfig,
    pub server: ServerConfig,
    /// Alias table. The built-in one is used only when the section is absent;
    /// an empty `[aliases]` table disables aliasing.
    pub aliases: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            llm: LlmConfig::default(),
            answer: AnswerConfig::default(),
            server: ServerConfig::default(),
            aliases: default_aliases(),
        }
    }
}

/// Backing store selection and Neo4j credentials.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub table_path: Option<PathBuf>,
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Seconds allowed for the initial connection handshake.
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Graph,
            table_path: None,
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Hosted text-completion endpoint (OpenAI-compatible).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            model: "llama3-8b-8192".to_string(),
            timeout_secs: 30,
            max_tokens: 512,
            temperature: 0.0,
        }
    }
}

/// How answers are phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStrategy {
    /// Direct field substitution, no model call.
    Template,
    /// Model phrasing constrained by a grounding context.
    Grounded,
}

impl AnswerStrategy {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "template" => Some(Self::Template),
            "grounded" | "llm" => Some(Self::Grounded),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Grounded => "grounded",
        }
    }
}

/// Answer composition settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    pub strategy: AnswerStrategy,
    /// Joins multi-valued results in template answers.
    pub delimiter: String,
    /// Maximum answer length, in characters, requested from the model.
    pub max_answer_chars: usize,
    /// How much of an internal error message a user may see.
    pub error_excerpt_chars: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            strategy: AnswerStrategy::Template,
            delimiter: "、".to_string(),
            max_answer_chars: 300,
            error_excerpt_chars: 60,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> FloraResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from an explicit path, `FLORAKG_CONFIG`, or `./florakg.toml`,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> FloraResult<Self> {
        let env_path = std::env::var("FLORAKG_CONFIG").ok().map(PathBuf::from);
        let candidate = path
            .map(Path::to_path_buf)
            .or(env_path)
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            });

        let mut config = match candidate {
            Some(p) => {
                let text = std::fs::read_to_string(&p).map_err(|e| {
                    FloraError::Config(format!("cannot read {}: {}", p.display(), e))
                })?;
                info!(path = %p.display(), "Loaded configuration file");
                Self::from_toml_str(&text)?
            }
            None => {
                debug!("No configuration file, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> FloraResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("NEO4J_URI") {
            self.store.uri = v;
        }
        if let Some(v) = get("NEO4J_USER") {
            self.store.user = v;
        }
        if let Some(v) = get("NEO4J_PASSWORD") {
            self.store.password = v;
        }
        if let Some(v) = get("NEO4J_DATABASE") {
            self.store.database = v;
        }
        if let Some(v) = get("FLORAKG_BACKEND") {
            self.store.backend = StoreBackend::parse(&v)
                .ok_or_else(|| FloraError::Config(format!("unknown backend '{}'", v)))?;
        }
        if let Some(v) = get("FLORAKG_TABLE_PATH") {
            self.store.table_path = Some(PathBuf::from(v));
        }
        if let Some(v) = get("FLORAKG_STRATEGY") {
            self.answer.strategy = AnswerStrategy::parse(&v)
                .ok_or_else(|| FloraError::Config(format!("unknown answer strategy '{}'", v)))?;
        }
        if let Some(v) = get("LLM_API_KEY").or_else(|| get("GROQ_API_KEY")) {
            self.llm.api_key = Some(v);
        }
        if let Some(v) = get("LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Some(v) = get("LLM_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = get("LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = v
                .parse()
                .map_err(|_| FloraError::Config(format!("LLM_TIMEOUT_SECS is not a number: '{}'", v)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Graph);
        assert_eq!(config.answer.strategy, AnswerStrategy::Template);
        assert_eq!(config.answer.delimiter, "、");
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.aliases.get("梅花").map(String::as_str), Some("梅"));
    }

    #[test]
    fn test_parse_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [store]
            backend = "table"
            table_path = "data/plants.csv"

            [answer]
            strategy = "grounded"
            delimiter = "; "

            [aliases]
            "红梅" = "梅"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Table);
        assert_eq!(config.store.table_path, Some(PathBuf::from("data/plants.csv")));
        assert_eq!(config.answer.strategy, AnswerStrategy::Grounded);
        assert_eq!(config.answer.delimiter, "; ");
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_empty_toml_keeps_default_aliases() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert!(config.aliases.contains_key("菊花"));
    }

    #[test]
    fn test_empty_alias_table_disables_defaults() {
        let config = AppConfig::from_toml_str("[aliases]\n").unwrap();
        assert!(config.aliases.is_empty());

        let config = AppConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.aliases, default_aliases());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("NEO4J_URI", "neo4j+s://example.databases.neo4j.io"),
            ("FLORAKG_BACKEND", "fixture"),
            ("GROQ_API_KEY", "gsk_test"),
            ("LLM_TIMEOUT_SECS", "12"),
            ("NEO4J_USER", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.store.uri, "neo4j+s://example.databases.neo4j.io");
        assert_eq!(config.store.user, "neo4j");
        assert_eq!(config.store.backend, StoreBackend::Fixture);
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.llm.timeout_secs, 12);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|k| (k == "FLORAKG_STRATEGY").then(|| "poetry".to_string()));
        assert!(matches!(result, Err(FloraError::Config(_))));
    }
}
