//! Command text generation for a remote PowerShell host.
//!
//! Generated text passes through three interpreters before a user script sees
//! its arguments: the outer process launcher, the remote session, and the
//! script's own interpreter. [`quote`] holds the escaping rule for each layer,
//! [`template`] builds the statements, and [`Shell`] applies a
//! [`ShellConfig`] to route scripts and tasks to the right interpreter. Every
//! invocation ends with the [`exit`] trailer so callers see one exit code.

mod config;
pub mod dispatch;
mod error;
pub mod exit;
pub mod quote;
mod shell;
pub mod template;
mod types;

pub use config::{EnvUpdate, Position, ShellConfig, Toolchain};
pub use dispatch::{Interpreter, InterpreterPaths, dispatch, dispatch_with};
pub use error::{CommandError, ConfigError};
pub use exit::ExitOutcome;
pub use shell::{Shell, TASK_ENV_PREFIX, task_environment};
pub use types::{CommandSpec, InputMethod, ParameterSet, ScriptInvocation, TaskInvocation, filter_arguments};
