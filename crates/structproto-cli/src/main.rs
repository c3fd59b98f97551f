//! structproto CLI - Protocol Buffers messages from Rust structs
//!
//! Commands:
//! - `structproto generate` - Emit `.proto` messages for structs in a source file
//! - `structproto list` - List the structs found in a source file
//! - `structproto check` - Validate a structproto.toml configuration

use clap::{Parser, Subcommand};

mod config;
mod generate;
mod list;
mod logging;

use config::CommentMode;

#[derive(Parser)]
#[command(name = "structproto")]
#[command(author, version, about = "Generate protobuf messages from Rust structs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate protobuf messages
    Generate {
        /// Rust source file containing the structs
        #[arg(short = 'i', long)]
        source: Option<String>,

        /// Struct to convert (repeatable; default: every pub struct)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        /// Replace unrepresentable map values with `Any` instead of failing
        #[arg(long)]
        lenient: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Path to structproto.toml
        #[arg(short, long)]
        config: Option<String>,

        /// Where field and message comments come from
        #[arg(long, value_enum)]
        comments: Option<CommentMode>,
    },

    /// List structs found in a source file
    List {
        /// Rust source file containing the structs
        #[arg(short = 'i', long)]
        source: Option<String>,

        /// Path to structproto.toml
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Validate a structproto.toml configuration
    Check {
        /// Path to structproto.toml (default: ./structproto.toml)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            source,
            types,
            lenient,
            output,
            config,
            comments,
        } => {
            let overrides = generate::Overrides {
                source,
                types,
                lenient,
                output,
                comments,
            };
            generate::run(config, overrides)?;
        }
        Commands::List { source, config } => {
            list::run(config, source)?;
        }
        Commands::Check { config } => {
            config::check(config)?;
        }
    }

    Ok(())
}
