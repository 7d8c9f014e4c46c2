//! psrun command-line front end.
//!
//! Prints generated command text for a remote PowerShell host and converts
//! task arguments to and from the base64 transit payload.

mod cli;

use clap::Parser;
use cli::Cli;
use psrun_command::Shell;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = cli.shell_config()?;
	tracing::debug!(config = ?cli.config, legacy_json_bridge = config.legacy_json_bridge, "shell configured");
	let shell = Shell::new(config);

	let mut stdout = std::io::stdout().lock();
	cli.command.execute(&shell, &mut stdout)
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("PSRUN_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("psrun=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).init();
}
