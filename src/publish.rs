use crate::error::{ExpoBumpError, Result};
use log::debug;
use std::process::{Command, Stdio};

/// Publishes the release currently checked out
pub trait Publisher {
    fn publish(&self) -> Result<()>;
}

/// Runs an external publish command (by default `exp publish`).
///
/// The command inherits the terminal's stdin, stdout and stderr so it can
/// prompt for credentials, and blocks until it exits. Any non-zero exit code
/// is a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandPublisher {
    program: String,
    args: Vec<String>,
}

impl CommandPublisher {
    /// Builds a publisher from `program arg...`.
    pub fn from_command(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ExpoBumpError::config("publish_command must not be empty"))?;
        Ok(CommandPublisher {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Publisher for CommandPublisher {
    fn publish(&self) -> Result<()> {
        debug!("running {}", self.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                ExpoBumpError::publish(format!("Failed to run `{}`: {}", self.display(), e))
            })?;

        if !status.success() {
            return Err(ExpoBumpError::publish(format!(
                "`{}` exited with code {}",
                self.display(),
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
