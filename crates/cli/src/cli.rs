use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use psrun_command::{CommandSpec, InputMethod, ParameterSet, ScriptInvocation, Shell, ShellConfig, TaskInvocation, template};
use psrun_data::{Codec, Record, Value, decode_document, decode_payload, encode_json, encode_payload};

#[derive(Parser, Debug)]
#[command(name = "psrun")]
#[command(about = "Injection-safe PowerShell command text for remote script and task runs")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Shell configuration file (TOML)
	#[arg(long, short = 'c', value_name = "FILE", global = true)]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

impl Cli {
	/// Configuration from `--config`, or the defaults.
	pub fn shell_config(&self) -> anyhow::Result<ShellConfig> {
		match &self.config {
			Some(path) => ShellConfig::load(path).with_context(|| format!("loading shell config {}", path.display())),
			None => Ok(ShellConfig::default()),
		}
	}
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Run a program with literal arguments
	Exec {
		/// Text piped to the program's standard input
		#[arg(long)]
		stdin: Option<String>,
		program: String,
		#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
		args: Vec<String>,
	},
	/// Run a script, choosing the interpreter by extension
	Script {
		/// Text piped to the script's standard input
		#[arg(long)]
		stdin: Option<String>,
		path: String,
		#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
		args: Vec<String>,
	},
	/// Run a task with named arguments
	Task {
		/// stdin, environment, powershell, both or none
		#[arg(long, short = 'i', default_value_t = InputMethod::Both)]
		input_method: InputMethod,
		/// Task arguments as a JSON object
		#[arg(long, short = 'a', default_value = "{}")]
		args: String,
		/// Declared task parameters; others are dropped before sending
		#[arg(long, short = 'p', value_delimiter = ',')]
		params: Option<Vec<String>>,
		path: String,
	},
	/// Show the program and arguments chosen for a path
	Dispatch { path: String },
	/// Create directories
	Mkdirs {
		#[arg(required = true)]
		dirs: Vec<String>,
	},
	/// Create a randomly named directory and print its path
	Tempdir {
		/// Parent directory expression, evaluated remotely
		#[arg(long, default_value = "$env:TEMP")]
		parent: String,
	},
	/// Remove a directory tree
	Rmdir { path: String },
	/// Encode a JSON object as a base64 transit payload
	Encode { json: String },
	/// Decode a base64 transit payload to JSON
	Decode {
		/// Use the element-tree decoder of interpreters older than 3.0
		#[arg(long)]
		legacy: bool,
		payload: String,
	},
	/// Print the session prelude
	Prelude,
}

impl Command {
	/// Writes the generated text or decoded data for this subcommand.
	pub fn execute(&self, shell: &Shell, out: &mut impl Write) -> anyhow::Result<()> {
		let text = match self {
			Self::Exec { stdin, program, args } => {
				shell.execute_process(&CommandSpec::new(program.clone(), args.clone()), &[], stdin.as_deref())
			}
			Self::Script { stdin, path, args } => {
				let mut invocation = ScriptInvocation::new(path.clone(), args.clone());
				if let Some(stdin) = stdin {
					invocation = invocation.with_stdin(stdin.clone());
				}
				shell.script_command(&invocation)
			}
			Self::Task {
				input_method,
				args,
				params,
				path,
			} => {
				let arguments = parse_record(args).context("parsing task arguments")?;
				let accepted: Option<ParameterSet> = params.as_ref().map(|names| names.iter().cloned().collect());
				let invocation = TaskInvocation::new(path.clone(), arguments, *input_method);
				shell.task_command(&invocation, accepted.as_ref())?
			}
			Self::Dispatch { path } => {
				let spec = shell.dispatch(path);
				let mut line = spec.program;
				for arg in &spec.arguments {
					line.push(' ');
					line.push_str(arg);
				}
				line.push('\n');
				line
			}
			Self::Mkdirs { dirs } => template::mkdirs(dirs),
			Self::Tempdir { parent } => template::make_tempdir(parent),
			Self::Rmdir { path } => template::rmdir(path),
			Self::Encode { json } => {
				let record = parse_record(json)?;
				let mut payload = encode_payload(&record)?.into_string();
				payload.push('\n');
				payload
			}
			Self::Decode { legacy, payload } => {
				let codec = if *legacy { Codec::LegacyTree } else { Codec::Native };
				let record = decode_payload(payload, codec)?;
				let mut json = encode_json(&Value::Record(record))?;
				json.push('\n');
				json
			}
			Self::Prelude => shell.prelude(),
		};
		out.write_all(text.as_bytes())?;
		Ok(())
	}
}

fn parse_record(json: &str) -> anyhow::Result<Record> {
	match decode_document(json, Codec::Native)? {
		Value::Record(record) => Ok(record),
		other => bail!("expected a JSON object, got {}", other.get_type()),
	}
}
