//! Extension-based interpreter selection.

use serde::{Deserialize, Serialize};

use crate::CommandSpec;
use crate::quote::quote_if_needed;

/// Flags for a non-interactive, profile-free, policy-bypassing session.
pub const POWERSHELL_FLAGS: [&str; 5] = ["-NoProfile", "-NonInteractive", "-NoLogo", "-ExecutionPolicy", "Bypass"];

/// Program names used for each interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterPaths {
	pub powershell: String,
	pub ruby: String,
	pub puppet: String,
	pub host_shell: String,
}

impl Default for InterpreterPaths {
	fn default() -> Self {
		Self {
			powershell: "powershell.exe".to_owned(),
			ruby: "ruby.exe".to_owned(),
			puppet: "puppet.bat".to_owned(),
			host_shell: "cmd.exe".to_owned(),
		}
	}
}

/// Interpreter chosen for a script by its extension.
///
/// [`Interpreter::HostShell`] is the default for every unrecognized
/// extension and hands the path to the host's file associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpreter {
	PowerShell,
	Ruby,
	Puppet,
	HostShell,
}

impl Interpreter {
	/// Maps an extension, with or without the leading dot, case-insensitively.
	pub fn from_extension(ext: &str) -> Self {
		let ext = ext.strip_prefix('.').unwrap_or(ext);
		if ext.eq_ignore_ascii_case("ps1") {
			Self::PowerShell
		} else if ext.eq_ignore_ascii_case("rb") {
			Self::Ruby
		} else if ext.eq_ignore_ascii_case("pp") {
			Self::Puppet
		} else {
			Self::HostShell
		}
	}

	pub fn for_path(path: &str) -> Self {
		extension(path).map_or(Self::HostShell, Self::from_extension)
	}

	pub fn program(self, paths: &InterpreterPaths) -> &str {
		match self {
			Self::PowerShell => &paths.powershell,
			Self::Ruby => &paths.ruby,
			Self::Puppet => &paths.puppet,
			Self::HostShell => &paths.host_shell,
		}
	}

	/// Launcher arguments that run `path` with this interpreter.
	pub fn arguments(self, path: &str) -> Vec<String> {
		let path = quote_if_needed(path);
		match self {
			Self::PowerShell => POWERSHELL_FLAGS.iter().map(|flag| (*flag).to_owned()).chain(["-File".to_owned(), path]).collect(),
			Self::Ruby => vec!["-S".to_owned(), path],
			Self::Puppet => vec!["apply".to_owned(), path],
			Self::HostShell => vec!["/c".to_owned(), path],
		}
	}
}

/// Extension of the last path component, accepting either separator.
fn extension(path: &str) -> Option<&str> {
	let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
	match file.rfind('.') {
		Some(0) | None => None,
		Some(idx) => Some(&file[idx + 1..]),
	}
}

/// Selects the program and arguments for `path` with default program names.
pub fn dispatch(path: &str) -> CommandSpec {
	dispatch_with(path, &InterpreterPaths::default())
}

pub fn dispatch_with(path: &str, paths: &InterpreterPaths) -> CommandSpec {
	let interpreter = Interpreter::for_path(path);
	CommandSpec::new(interpreter.program(paths), interpreter.arguments(path))
}
