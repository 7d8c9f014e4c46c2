//! Seams to the external remote shell.

use async_trait::async_trait;
use psrun_command::{ExitOutcome, ParameterSet};

use crate::error::TransportError;

/// Raw result of one remote execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
	pub stdout: String,
	pub stderr: String,
	pub exit_code: i32,
}

impl CommandOutput {
	pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
		Self {
			stdout: stdout.into(),
			stderr: stderr.into(),
			exit_code,
		}
	}

	pub fn outcome(&self) -> ExitOutcome {
		ExitOutcome::from_code(self.exit_code)
	}

	/// First non-blank stdout line, trimmed.
	pub fn first_line(&self) -> Option<&str> {
		self.stdout.lines().map(str::trim).find(|line| !line.is_empty())
	}
}

/// Runs script text on the remote host and collects its streams.
///
/// Connection setup, authentication and stream handling belong to the
/// implementor. The exit code returned must be the remote process exit code.
#[async_trait]
pub trait RemoteShell: Send + Sync {
	async fn execute(&self, script: &str) -> Result<CommandOutput, TransportError>;
}

/// Source of declared task parameters, typically task metadata.
#[async_trait]
pub trait TaskCatalog: Send + Sync {
	async fn accepted_parameters(&self, task_path: &str) -> Result<ParameterSet, TransportError>;
}
