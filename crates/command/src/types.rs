use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use psrun_data::Record;
use serde::{Deserialize, Serialize};

/// A program plus its launcher arguments, ready for process invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec {
	pub program: String,
	pub arguments: Vec<String>,
}

impl CommandSpec {
	pub fn new(program: impl Into<String>, arguments: Vec<String>) -> Self {
		Self {
			program: program.into(),
			arguments,
		}
	}

	/// Appends caller arguments after the dispatcher's own.
	pub fn with_arguments<I, S>(mut self, extra: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.arguments.extend(extra.into_iter().map(Into::into));
		self
	}
}

/// One remote script execution request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptInvocation {
	pub script_path: String,
	pub arguments: Vec<String>,
	pub stdin: Option<String>,
}

impl ScriptInvocation {
	pub fn new(script_path: impl Into<String>, arguments: Vec<String>) -> Self {
		Self {
			script_path: script_path.into(),
			arguments,
			stdin: None,
		}
	}

	pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
		self.stdin = Some(stdin.into());
		self
	}
}

/// How named task arguments reach the task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
	/// JSON document on standard input.
	Stdin,
	/// One `PT_<name>` environment variable per argument.
	Environment,
	/// Base64 payload decoded in-session and bound by parameter name.
	Powershell,
	/// Standard input and environment together.
	#[default]
	Both,
	/// The task receives no arguments.
	None,
}

impl InputMethod {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Stdin => "stdin",
			Self::Environment => "environment",
			Self::Powershell => "powershell",
			Self::Both => "both",
			Self::None => "none",
		}
	}

	pub const fn uses_stdin(self) -> bool {
		matches!(self, Self::Stdin | Self::Both)
	}

	pub const fn uses_environment(self) -> bool {
		matches!(self, Self::Environment | Self::Both)
	}
}

impl fmt::Display for InputMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for InputMethod {
	type Err = String;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		match input {
			"stdin" => Ok(Self::Stdin),
			"environment" => Ok(Self::Environment),
			"powershell" => Ok(Self::Powershell),
			"both" => Ok(Self::Both),
			"none" => Ok(Self::None),
			other => Err(format!("unknown input method '{other}'")),
		}
	}
}

/// One remote task execution request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskInvocation {
	pub task_path: String,
	pub arguments: Record,
	pub input_method: InputMethod,
}

impl TaskInvocation {
	pub fn new(task_path: impl Into<String>, arguments: Record, input_method: InputMethod) -> Self {
		Self {
			task_path: task_path.into(),
			arguments,
			input_method,
		}
	}
}

/// Parameter names a task declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet(BTreeSet<String>);

impl ParameterSet {
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains(name)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for ParameterSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

/// Keeps only the arguments a task declares, in caller order.
///
/// Undeclared keys are dropped silently; extra input is not an error.
pub fn filter_arguments(arguments: &Record, accepted: &ParameterSet) -> Record {
	let mut kept = arguments.clone();
	kept.retain_keys(|key| accepted.contains(key));
	if kept.len() != arguments.len() {
		let dropped: Vec<&str> = arguments.keys().filter(|key| !accepted.contains(key)).collect();
		tracing::debug!(?dropped, "ignoring undeclared task parameters");
	}
	kept
}

#[cfg(test)]
mod tests;
