//! Remote execution facade.
//!
//! The transport itself is external: implement [`RemoteShell`] over whatever
//! channel reaches the host, optionally a [`TaskCatalog`] for declared task
//! parameters, and drive scripts, tasks and housekeeping through [`Runner`].

mod error;
mod runner;
mod transport;

pub use error::{RunnerError, TransportError};
pub use runner::{Runner, TaskOutput};
pub use transport::{CommandOutput, RemoteShell, TaskCatalog};
