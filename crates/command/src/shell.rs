//! Configured command generation.
//!
//! [`Shell`] pairs a [`ShellConfig`] with the template library and decides how
//! each script or task reaches its interpreter.

use psrun_data::{Record, Value, encode_json};

use crate::config::ShellConfig;
use crate::dispatch::{Interpreter, dispatch_with};
use crate::error::CommandError;
use crate::quote::escape_arguments;
use crate::{CommandSpec, InputMethod, ParameterSet, ScriptInvocation, TaskInvocation, filter_arguments, template};

/// Prefix for per-argument task environment variables.
pub const TASK_ENV_PREFIX: &str = "PT_";

#[derive(Debug, Clone, Default)]
pub struct Shell {
	config: ShellConfig,
}

impl Shell {
	pub fn new(config: ShellConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &ShellConfig {
		&self.config
	}

	/// Session bootstrap sent ahead of every generated command.
	pub fn prelude(&self) -> String {
		template::prelude(self.config.legacy_json_bridge)
	}

	pub fn dispatch(&self, path: &str) -> CommandSpec {
		dispatch_with(path, &self.config.interpreters)
	}

	/// Launches `spec` after applying the toolchain environment and `env`.
	pub fn execute_process(&self, spec: &CommandSpec, env: &[(String, String)], stdin: Option<&str>) -> String {
		let mut text = String::new();
		for update in self.config.environment() {
			text.push_str(&template::extend_env(&update));
		}
		for (name, value) in env {
			text.push_str(&template::set_env(name, value));
		}
		text.push_str(&template::execute_process(&spec.program, &spec.arguments, stdin));
		text
	}

	/// Script text for one invocation.
	///
	/// PowerShell scripts without input run in-session; everything else is
	/// launched through its interpreter.
	pub fn script_command(&self, invocation: &ScriptInvocation) -> String {
		let path = invocation.script_path.as_str();
		if Interpreter::for_path(path) == Interpreter::PowerShell && invocation.stdin.is_none() {
			tracing::debug!(path, "running script in-session");
			return template::run_script(path, &invocation.arguments);
		}

		let spec = self.dispatch(path).with_arguments(escape_arguments(&invocation.arguments));
		tracing::debug!(path, program = %spec.program, "launching script");
		self.execute_process(&spec, &[], invocation.stdin.as_deref())
	}

	/// Task text for one invocation.
	///
	/// When `accepted` is known the arguments are filtered before they leave
	/// the caller; the in-session path filters again remotely either way.
	pub fn task_command(&self, invocation: &TaskInvocation, accepted: Option<&ParameterSet>) -> Result<String, CommandError> {
		let path = invocation.task_path.as_str();
		let method = invocation.input_method;
		let arguments = match accepted {
			Some(accepted) => filter_arguments(&invocation.arguments, accepted),
			None => invocation.arguments.clone(),
		};

		let is_powershell = Interpreter::for_path(path) == Interpreter::PowerShell;
		if method == InputMethod::Powershell {
			if !is_powershell {
				return Err(CommandError::UnsupportedInputMethod {
					task_path: path.to_owned(),
					method,
				});
			}
			tracing::debug!(path, %method, "running task in-session");
			return Ok(template::run_task(path, &arguments, method)?);
		}

		let env = if method.uses_environment() { task_environment(&arguments)? } else { Vec::new() };
		let stdin = if method.uses_stdin() {
			Some(encode_json(&Value::Record(arguments))?)
		} else {
			None
		};

		let spec = self.dispatch(path);
		tracing::debug!(path, %method, program = %spec.program, env = env.len(), "launching task");
		Ok(self.execute_process(&spec, &env, stdin.as_deref()))
	}
}

/// `PT_<name>` pairs: strings verbatim, other values as JSON text.
pub fn task_environment(arguments: &Record) -> Result<Vec<(String, String)>, CommandError> {
	arguments
		.iter()
		.map(|(name, value)| -> Result<(String, String), CommandError> {
			let text = match value {
				Value::String(text) => text.clone(),
				other => encode_json(other)?,
			};
			Ok((format!("{TASK_ENV_PREFIX}{name}"), text))
		})
		.collect()
}
