use std::sync::Arc;

use psrun_command::{ScriptInvocation, Shell, TaskInvocation, template};
use psrun_data::{Codec, DecodeError, Value, decode_document};

use crate::error::RunnerError;
use crate::transport::{CommandOutput, RemoteShell, TaskCatalog};

/// Output of a task run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput(pub CommandOutput);

impl TaskOutput {
	/// Structured result the task printed.
	///
	/// Returns `Ok(None)` when stdout is blank; a task that printed nothing has
	/// no structured result, which is distinct from a corrupt one.
	pub fn value(&self, codec: Codec) -> Result<Option<Value>, DecodeError> {
		if self.0.stdout.trim().is_empty() {
			return Ok(None);
		}
		decode_document(&self.0.stdout, codec).map(Some)
	}

	pub fn output(&self) -> &CommandOutput {
		&self.0
	}

	pub fn into_output(self) -> CommandOutput {
		self.0
	}
}

/// Executes generated commands over a [`RemoteShell`].
///
/// Every script is sent with the session prelude in front of it.
pub struct Runner<S> {
	remote: S,
	shell: Shell,
	catalog: Option<Arc<dyn TaskCatalog>>,
}

impl<S: RemoteShell> Runner<S> {
	pub fn new(remote: S, shell: Shell) -> Self {
		Self {
			remote,
			shell,
			catalog: None,
		}
	}

	/// Filters task arguments locally against declared parameters.
	pub fn with_catalog(mut self, catalog: Arc<dyn TaskCatalog>) -> Self {
		self.catalog = Some(catalog);
		self
	}

	pub fn shell(&self) -> &Shell {
		&self.shell
	}

	pub fn remote(&self) -> &S {
		&self.remote
	}

	/// Sends `text` behind the prelude and returns the raw output.
	pub async fn run_command(&self, text: &str) -> Result<CommandOutput, RunnerError> {
		let mut script = self.shell.prelude();
		script.push('\n');
		script.push_str(text);
		tracing::trace!(%script, "remote script");
		let output = self.remote.execute(&script).await?;
		tracing::debug!(exit_code = output.exit_code, stdout_len = output.stdout.len(), stderr_len = output.stderr.len(), "remote command finished");
		Ok(output)
	}

	pub async fn run_script(&self, invocation: &ScriptInvocation) -> Result<CommandOutput, RunnerError> {
		tracing::debug!(path = %invocation.script_path, args = invocation.arguments.len(), "run script");
		self.run_command(&self.shell.script_command(invocation)).await
	}

	pub async fn run_task(&self, invocation: &TaskInvocation) -> Result<TaskOutput, RunnerError> {
		let accepted = match &self.catalog {
			Some(catalog) => Some(catalog.accepted_parameters(&invocation.task_path).await?),
			None => None,
		};
		tracing::debug!(path = %invocation.task_path, method = %invocation.input_method, filtered = accepted.is_some(), "run task");
		let text = self.shell.task_command(invocation, accepted.as_ref())?;
		Ok(TaskOutput(self.run_command(&text).await?))
	}

	/// Creates a temporary directory under the `parent` expression and
	/// returns its remote path.
	pub async fn make_tempdir(&self, parent: &str) -> Result<String, RunnerError> {
		let output = self.run_checked(&template::make_tempdir(parent)).await?;
		output
			.first_line()
			.map(str::to_owned)
			.ok_or(RunnerError::EmptyOutput { operation: "make_tempdir" })
	}

	pub async fn mkdirs<P: AsRef<str>>(&self, dirs: &[P]) -> Result<(), RunnerError> {
		let text = template::mkdirs(dirs);
		if text.is_empty() {
			return Ok(());
		}
		self.run_checked(&text).await.map(drop)
	}

	pub async fn rmdir(&self, path: &str) -> Result<(), RunnerError> {
		self.run_checked(&template::rmdir(path)).await.map(drop)
	}

	async fn run_checked(&self, text: &str) -> Result<CommandOutput, RunnerError> {
		let output = self.run_command(text).await?;
		let outcome = output.outcome();
		if !outcome.succeeded {
			return Err(RunnerError::Remote {
				exit_code: outcome.exit_code,
				stderr: output.stderr,
			});
		}
		Ok(output)
	}
}
