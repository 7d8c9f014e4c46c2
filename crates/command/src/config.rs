//! Shell configuration.
//!
//! Companion-toolchain locations are an explicit value here rather than text
//! baked into the session bootstrap, so callers can override or drop them and
//! tests can inspect them without reading generated script.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatch::InterpreterPaths;
use crate::error::ConfigError;

/// Where a directory list goes relative to a variable's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
	Append,
	Prepend,
}

/// One directory-list environment variable update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvUpdate {
	pub name: String,
	/// Entries may contain `%VAR%` references, expanded on the remote host.
	pub entries: Vec<String>,
	pub position: Position,
}

/// Companion toolchain made visible to launched interpreters.
///
/// Empty lists disable the corresponding update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Toolchain {
	/// Appended to `PATH`.
	pub bin_dirs: Vec<String>,
	/// Prepended to [`Toolchain::lib_var`].
	pub lib_dirs: Vec<String>,
	pub lib_var: String,
}

impl Default for Toolchain {
	fn default() -> Self {
		let root = r"%ProgramFiles%\Puppet Labs\Puppet";
		Self {
			bin_dirs: vec![format!(r"{root}\bin"), format!(r"{root}\puppet\bin"), format!(r"{root}\sys\ruby\bin")],
			lib_dirs: vec![format!(r"{root}\puppet\lib"), format!(r"{root}\facter\lib"), format!(r"{root}\hiera\lib")],
			lib_var: "RUBYLIB".to_owned(),
		}
	}
}

impl Toolchain {
	/// Structured environment updates, skipping empty lists.
	pub fn environment(&self) -> Vec<EnvUpdate> {
		let mut updates = Vec::with_capacity(2);
		if !self.bin_dirs.is_empty() {
			updates.push(EnvUpdate {
				name: "PATH".to_owned(),
				entries: self.bin_dirs.clone(),
				position: Position::Append,
			});
		}
		if !self.lib_dirs.is_empty() {
			updates.push(EnvUpdate {
				name: self.lib_var.clone(),
				entries: self.lib_dirs.clone(),
				position: Position::Prepend,
			});
		}
		updates
	}
}

/// Settings injected into command generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
	pub interpreters: InterpreterPaths,
	/// `None` launches interpreters with the host environment untouched.
	pub toolchain: Option<Toolchain>,
	/// Ship the tree-based JSON polyfill for interpreters older than 3.0.
	pub legacy_json_bridge: bool,
}

impl Default for ShellConfig {
	fn default() -> Self {
		Self {
			interpreters: InterpreterPaths::default(),
			toolchain: Some(Toolchain::default()),
			legacy_json_bridge: true,
		}
	}
}

impl ShellConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}

	/// Environment updates applied before each launched process.
	pub fn environment(&self) -> Vec<EnvUpdate> {
		self.toolchain.as_ref().map(Toolchain::environment).unwrap_or_default()
	}
}

#[cfg(test)]
mod tests;
