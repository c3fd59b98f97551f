//! Comments produced by an external documentation tool

use super::listing::parse_listing;
use super::{CommentError, CommentSource, TypeComments};
use std::time::Duration;
use tokio::process::Command;

/// Argument placeholder replaced by the qualified type name.
const TYPE_PLACEHOLDER: &str = "{type}";

/// Runs a documentation tool per type and parses its struct listing.
///
/// The tool is invoked as `program args...`. An argument equal to `{type}` is
/// replaced by the qualified type name; without one, the name is appended.
#[derive(Debug, Clone)]
pub struct CommandComments {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandComments {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    /// Build from a command line such as `["tool", "doc", "{type}"]`.
    pub fn from_command_line(command: &[String], timeout: Duration) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program.clone(), args.to_vec(), timeout))
    }

    fn args_for(&self, qualified_name: &str) -> Vec<String> {
        let mut replaced = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg == TYPE_PLACEHOLDER {
                    replaced = true;
                    qualified_name.to_string()
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !replaced {
            args.push(qualified_name.to_string());
        }
        args
    }

    async fn run(&self, qualified_name: &str) -> Result<String, CommentError> {
        let output = Command::new(&self.program)
            .args(self.args_for(qualified_name))
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, output)
            .await
            .map_err(|_| CommentError::Timeout {
                type_name: qualified_name.to_string(),
                timeout: self.timeout,
            })??;

        if !output.status.success() {
            return Err(CommentError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl CommentSource for CommandComments {
    fn comments(&self, qualified_name: &str) -> Result<TypeComments, CommentError> {
        tracing::debug!(program = %self.program, type_name = qualified_name, "running documentation command");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let listing = runtime.block_on(self.run(qualified_name))?;

        Ok(parse_listing(&listing))
    }
}
