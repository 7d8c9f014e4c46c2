//! Error types for remote execution.

use psrun_command::CommandError;
use thiserror::Error;

/// Failures reported by a [`crate::RemoteShell`] or [`crate::TaskCatalog`].
#[derive(Debug, Error)]
pub enum TransportError {
	/// The remote host could not be reached or the session dropped.
	#[error("remote shell unavailable: {0}")]
	Unavailable(String),

	/// Local I/O while talking to the transport.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RunnerError {
	#[error(transparent)]
	Transport(#[from] TransportError),

	#[error(transparent)]
	Command(#[from] CommandError),

	/// A housekeeping command exited non-zero.
	#[error("remote command failed with exit code {exit_code}: {stderr}")]
	Remote {
		/// Normalized exit code.
		exit_code: i32,
		/// Captured standard error.
		stderr: String,
	},

	/// A command that must print a result printed nothing.
	#[error("{operation} produced no output")]
	EmptyOutput {
		/// Name of the runner operation.
		operation: &'static str,
	},
}
