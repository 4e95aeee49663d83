//! Perform Generate
//!
//! Request discovery, parallel generation and output writing for `adaptc`.

use adapter_compiler::logging::Logger;
use adapter_compiler::model::AdapterRequest;
use adapter_compiler::{emit_adapter, generate_adapter, AdapterDescriptor, GeneratorConfig};
use anyhow::Context;
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Rendering of a generated adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Kotlin,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Kotlin => "kt",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kotlin" | "kt" => Ok(OutputFormat::Kotlin),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub message: String,
    /// Request file the diagnostic is about.
    pub file: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, file: Option<&Path>) -> Self {
        Diagnostic {
            category: DiagnosticCategory::Error,
            message: message.into(),
            file: file.map(|f| f.display().to_string()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };
        match &self.file {
            Some(file) => write!(f, "{}: {} ({})", category, self.message, file),
            None => write!(f, "{}: {}", category, self.message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Request files or glob patterns.
    pub inputs: Vec<String>,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub config: GeneratorConfig,
}

#[derive(Debug, Default)]
pub struct GenerateResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Files written, in input order.
    pub written: Vec<PathBuf>,
}

/// One rendered adapter waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAdapter {
    /// Path relative to the output directory.
    pub relative_path: PathBuf,
    pub source: String,
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expands input patterns into request files, deduplicated in first-seen order.
pub fn discover_inputs(patterns: &[String]) -> (Vec<PathBuf>, Vec<Diagnostic>) {
    let mut files = IndexSet::new();
    let mut diagnostics = Vec::new();

    for pattern in patterns {
        if !has_glob_meta(pattern) {
            let path = PathBuf::from(pattern);
            if path.is_file() {
                files.insert(path);
            } else {
                diagnostics.push(Diagnostic::error("request file not found", Some(path.as_path())));
            }
            continue;
        }

        match glob::glob(pattern) {
            Ok(paths) => {
                let before = files.len();
                for entry in paths {
                    match entry {
                        Ok(path) if path.is_file() => {
                            files.insert(path);
                        }
                        Ok(_) => {}
                        Err(e) => diagnostics.push(Diagnostic {
                            category: DiagnosticCategory::Warning,
                            message: format!("cannot read {}", e),
                            file: None,
                        }),
                    }
                }
                if files.len() == before {
                    diagnostics.push(Diagnostic::error(
                        format!("pattern '{}' matched no request file", pattern),
                        None,
                    ));
                }
            }
            Err(e) => diagnostics.push(Diagnostic::error(
                format!("invalid glob pattern '{}': {}", pattern, e),
                None,
            )),
        }
    }

    (files.into_iter().collect(), diagnostics)
}

pub fn parse_request(content: &str) -> anyhow::Result<AdapterRequest> {
    Ok(serde_json::from_str(content)?)
}

pub fn render(adapter: &AdapterDescriptor, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Kotlin => Ok(emit_adapter(adapter)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(adapter)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// `<package path>/<Adapter>.<ext>`.
pub fn output_path(adapter: &AdapterDescriptor, format: OutputFormat) -> PathBuf {
    let mut path: PathBuf = adapter
        .package_name()
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect();
    path.push(format!("{}.{}", adapter.simple_name(), format.extension()));
    path
}

/// Generates and renders one request without touching the output directory.
pub fn generate_request(
    content: &str,
    config: &GeneratorConfig,
    format: OutputFormat,
    logger: &dyn Logger,
) -> anyhow::Result<RenderedAdapter> {
    let request = parse_request(content).context("malformed request")?;
    let adapter = generate_adapter(&request, config, logger)?;
    Ok(RenderedAdapter {
        relative_path: output_path(&adapter, format),
        source: render(&adapter, format)?,
    })
}

fn generate_file(
    path: &Path,
    options: &GenerateOptions,
    logger: &dyn Logger,
) -> anyhow::Result<RenderedAdapter> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    generate_request(&content, &options.config, options.format, logger)
}

pub fn perform_generation(options: &GenerateOptions, logger: &dyn Logger) -> GenerateResult {
    let (files, mut diagnostics) = discover_inputs(&options.inputs);
    logger.info(&format!("generating {} request(s)", files.len()));

    let outcomes: Vec<(&PathBuf, anyhow::Result<RenderedAdapter>)> = files
        .par_iter()
        .map(|file| (file, generate_file(file, options, logger)))
        .collect();

    let mut by_output: IndexMap<PathBuf, Vec<(&PathBuf, RenderedAdapter)>> = IndexMap::new();
    for (file, outcome) in outcomes {
        match outcome {
            Ok(rendered) => by_output
                .entry(rendered.relative_path.clone())
                .or_default()
                .push((file, rendered)),
            Err(e) => diagnostics.push(Diagnostic::error(format!("{:#}", e), Some(file.as_path()))),
        }
    }

    let mut written = Vec::new();
    for (relative_path, mut claims) in by_output {
        if claims.len() > 1 {
            for (file, _) in &claims {
                diagnostics.push(Diagnostic::error(
                    format!("output {} is generated by more than one request", relative_path.display()),
                    Some(file.as_path()),
                ));
            }
            continue;
        }
        let Some((file, rendered)) = claims.pop() else {
            continue;
        };
        let target = options.out_dir.join(&relative_path);
        match write_output(&target, &rendered.source) {
            Ok(()) => {
                logger.debug(&format!("{} -> {}", file.display(), target.display()));
                written.push(target);
            }
            Err(e) => diagnostics.push(Diagnostic::error(format!("{:#}", e), Some(file.as_path()))),
        }
    }

    GenerateResult {
        diagnostics,
        written,
    }
}

fn write_output(target: &Path, source: &str) -> anyhow::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(target, source).with_context(|| format!("failed to write {}", target.display()))
}

/// Format diagnostics for display.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    for diag in diagnostics {
        output.push_str(&diag.to_string());
        output.push('\n');
    }
    output
}

pub fn exit_code_from_result(diagnostics: &[Diagnostic]) -> i32 {
    let has_errors = diagnostics
        .iter()
        .any(|d| d.category == DiagnosticCategory::Error);
    if has_errors {
        1
    } else {
        0
    }
}
