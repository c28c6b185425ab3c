// src/fetch/config.rs
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sources::Source;

const ENV_PATH: &str = "AGGREGATOR_CONFIG_PATH";
const DEFAULT_DEADLINE_SECS: u64 = 10;

/// Per-run fetch settings: one shared deadline for the whole batch plus
/// optional per-source endpoint overrides.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub deadline: Duration,
    endpoints: BTreeMap<Source, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
            endpoints: BTreeMap::new(),
        }
    }
}

impl FetchConfig {
    /// Endpoint for a source: configured override, else the built-in default.
    pub fn endpoint(&self, source: Source) -> &str {
        self.endpoints
            .get(&source)
            .map(String::as_str)
            .unwrap_or_else(|| source.default_endpoint())
    }

    pub fn set_endpoint(&mut self, source: Source, url: impl Into<String>) {
        self.endpoints.insert(source, url.into());
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<FetchConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
}

/// Load config using env var + fallbacks:
/// 1) $AGGREGATOR_CONFIG_PATH
/// 2) config/sources.toml
/// 3) config/sources.json
pub fn load_config_default() -> Result<FetchConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("AGGREGATOR_CONFIG_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/sources.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/sources.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(FetchConfig::default())
}

#[derive(serde::Deserialize)]
struct RawConfig {
    deadline_secs: Option<u64>,
    #[serde(default)]
    endpoints: BTreeMap<String, String>,
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FetchConfig> {
    // Try TOML first unless the extension says otherwise.
    let toml_first = hint_ext != "json";
    if toml_first {
        if let Ok(raw) = toml::from_str::<RawConfig>(s) {
            return build(raw);
        }
    }
    if let Ok(raw) = serde_json::from_str::<RawConfig>(s) {
        return build(raw);
    }
    if !toml_first {
        if let Ok(raw) = toml::from_str::<RawConfig>(s) {
            return build(raw);
        }
    }
    Err(anyhow!("unsupported sources config format"))
}

fn build(raw: RawConfig) -> Result<FetchConfig> {
    let mut cfg = FetchConfig::default();
    if let Some(secs) = raw.deadline_secs {
        cfg.deadline = Duration::from_secs(secs);
    }
    for (name, url) in raw.endpoints {
        let source: Source = name.parse().context("in sources config endpoints")?;
        cfg.set_endpoint(source, url);
    }
    Ok(cfg)
}
