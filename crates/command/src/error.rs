//! Error types for command generation and configuration.

use std::path::PathBuf;

use psrun_data::EncodingError;
use thiserror::Error;

use crate::InputMethod;

/// Errors raised while generating command text.
#[derive(Debug, Error)]
pub enum CommandError {
	/// Task arguments could not be serialized for transit.
	#[error(transparent)]
	Encoding(#[from] EncodingError),

	/// The input method cannot deliver arguments to this kind of task.
	#[error("input method '{method}' is not supported for task {task_path}")]
	UnsupportedInputMethod {
		/// Path of the task being invoked.
		task_path: String,
		/// The rejected input method.
		method: InputMethod,
	},
}

/// Errors that can occur when loading shell configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}
