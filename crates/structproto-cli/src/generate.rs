//! Protobuf generation command

use crate::config::{CommentMode, Config};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use structproto::comments::{CommandComments, NoComments, SourceComments};
use structproto::{Catalog, CommentSource, Emitter, ParseOptions};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub source: Option<String>,
    pub types: Vec<String>,
    pub lenient: bool,
    pub output: Option<String>,
    pub comments: Option<CommentMode>,
}

/// Effective generation settings after merging flags into config.
#[derive(Debug)]
pub struct Settings {
    pub source: PathBuf,
    pub types: Vec<String>,
    pub strict: bool,
    pub output: Option<PathBuf>,
    pub mode: CommentMode,
}

impl Settings {
    pub fn resolve(config: &Config, overrides: Overrides) -> Result<Self> {
        let source = overrides
            .source
            .map(PathBuf::from)
            .or_else(|| config.generate.source.clone())
            .context("No source file given (use --source or [generate] source)")?;

        let types = if overrides.types.is_empty() {
            config.generate.types.clone()
        } else {
            overrides.types
        };

        Ok(Self {
            source,
            types,
            strict: config.generate.strict && !overrides.lenient,
            output: overrides
                .output
                .map(PathBuf::from)
                .or_else(|| config.generate.output.clone()),
            mode: overrides.comments.unwrap_or(config.comments.mode),
        })
    }
}

/// Run the generate command
pub fn run(config_path: Option<String>, overrides: Overrides) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let settings = Settings::resolve(&config, overrides)?;

    let mut config = config;
    config.comments.mode = settings.mode;
    config.validate()?;

    let proto = generate(&config, &settings)?;

    match &settings.output {
        Some(path) => {
            fs::write(path, &proto)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            tracing::info!(output = %path.display(), "wrote protobuf messages");
        }
        None => print!("{}", proto),
    }

    Ok(())
}

/// Convert the selected structs into protobuf text.
pub fn generate(config: &Config, settings: &Settings) -> Result<String> {
    let options = ParseOptions {
        time_like: config.types.time_like.clone(),
    };
    let catalog = Catalog::parse_file(&settings.source, &options)
        .with_context(|| format!("Failed to parse source: {:?}", settings.source))?;
    tracing::info!(
        source = %settings.source.display(),
        records = catalog.records().len(),
        "parsed source"
    );

    let comments = comment_source(config, settings.mode, &settings.source)?;
    let records = catalog.select(settings.types.as_slice())?;

    let proto = Emitter::new(&catalog, comments.as_ref(), settings.strict)
        .convert_all(records)
        .context("Failed to generate protobuf messages")?;

    Ok(proto)
}

fn comment_source(
    config: &Config,
    mode: CommentMode,
    source: &Path,
) -> Result<Box<dyn CommentSource>> {
    let comments: Box<dyn CommentSource> = match mode {
        CommentMode::Source => Box::new(
            SourceComments::from_file(source, config.comments.doc_fallback)
                .with_context(|| format!("Failed to read comments from {:?}", source))?,
        ),
        CommentMode::Command => {
            let timeout = Duration::from_millis(config.comments.timeout_ms);
            Box::new(
                CommandComments::from_command_line(&config.comments.command, timeout)
                    .context("Comment mode 'command' requires a command")?,
            )
        }
        CommentMode::None => Box::new(NoComments),
    };

    Ok(comments)
}
