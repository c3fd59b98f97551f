//! Configuration parsing and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "structproto.toml";

/// Default documentation command timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// structproto.toml structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generate: GenerateSection,

    #[serde(default)]
    pub comments: CommentsSection,

    #[serde(default)]
    pub types: TypesSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSection {
    /// Input Rust file
    pub source: Option<PathBuf>,

    /// Structs to convert; empty means every pub struct
    pub types: Vec<String>,

    pub strict: bool,

    /// Output file; absent means stdout
    pub output: Option<PathBuf>,
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            source: None,
            types: Vec::new(),
            strict: true,
            output: None,
        }
    }
}

/// Where comments come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CommentMode {
    /// Trailing comments in the source file itself
    #[default]
    Source,
    /// Listings printed by an external documentation command
    Command,
    /// No comments
    None,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommentsSection {
    pub mode: CommentMode,

    /// Use `///` docs for fields without a trailing comment
    pub doc_fallback: bool,

    /// Documentation command; `{type}` is replaced by the type name
    pub command: Vec<String>,

    pub timeout_ms: u64,
}

impl Default for CommentsSection {
    fn default() -> Self {
        Self {
            mode: CommentMode::Source,
            doc_fallback: false,
            command: Vec::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypesSection {
    /// Extra type names mapped to int64 like timestamps
    pub time_like: Vec<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load an explicit config, else `./structproto.toml` if present, else defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG).exists() => Self::from_file(DEFAULT_CONFIG),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(source) = &self.generate.source {
            if source.as_os_str().is_empty() {
                anyhow::bail!("Source path cannot be empty");
            }
        }

        if let Some(output) = &self.generate.output {
            if output.as_os_str().is_empty() {
                anyhow::bail!("Output path cannot be empty");
            }
        }

        if self.generate.types.iter().any(|t| t.trim().is_empty()) {
            anyhow::bail!("Type names cannot be empty");
        }

        if self.comments.mode == CommentMode::Command && self.comments.command.is_empty() {
            anyhow::bail!("Comment mode 'command' requires a command");
        }

        if self.comments.timeout_ms == 0 {
            anyhow::bail!("Comment command timeout must be greater than zero");
        }

        if self.types.time_like.iter().any(|t| t.trim().is_empty()) {
            anyhow::bail!("Time-like type names cannot be empty");
        }

        Ok(())
    }
}

/// Check command implementation
pub fn check(config_path: Option<String>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    println!("Checking config: {}", path);

    let config = Config::from_file(&path)?;
    config.validate()?;

    let source = config
        .generate
        .source
        .as_ref()
        .map_or_else(|| "(not set)".to_string(), |s| s.display().to_string());
    let types = if config.generate.types.is_empty() {
        "all pub structs".to_string()
    } else {
        config.generate.types.join(", ")
    };

    println!("✓ Source: {}", source);
    println!("✓ Types: {}", types);
    println!("✓ Strict: {}", config.generate.strict);
    println!("✓ Comments: {:?}", config.comments.mode);
    println!("✓ Time-like types: {}", config.types.time_like.len());
    println!("\nConfig is valid!");

    Ok(())
}
