//! Configuration loading
//!
//! Reads the generator configuration file and layers command-line overrides
//! on top of it.

use adapter_compiler::logging::LogLevel;
use adapter_compiler::GeneratorConfig;
use anyhow::Context;
use std::fs;
use std::path::Path;

pub fn load(path: &Path) -> anyhow::Result<GeneratorConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("in config {}", path.display()))?;
    Ok(config)
}

pub fn parse(content: &str) -> anyhow::Result<GeneratorConfig> {
    let config: GeneratorConfig = serde_json::from_str(content)?;
    // Surface bad type or field names before any request is read.
    config.runtime_types()?;
    config.field_names()?;
    config.default_context_provider_ref()?;
    Ok(config)
}

/// Settings given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub log_level: Option<LogLevel>,
    pub default_context_provider: Option<String>,
}

impl Overrides {
    pub fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(provider) = &self.default_context_provider {
            config.default_context_provider = Some(provider.clone());
        }
        config
    }
}
