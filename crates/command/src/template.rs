//! Command text templates.
//!
//! Every function here is pure: typed inputs in, PowerShell text out. Values
//! interpolated into the text go through [`crate::quote`]; nothing the caller
//! supplies is ever spliced in raw except the parent expression accepted by
//! [`make_tempdir`].

use std::collections::BTreeSet;

use psrun_data::{EncodingError, Record, encode_payload};

use crate::InputMethod;
use crate::config::{EnvUpdate, Position};
use crate::exit::with_trailer;
use crate::quote::{literal_block, quote};

const PRELUDE: &str = include_str!("template/prelude.ps1");
const LEGACY_JSON: &str = include_str!("template/legacy_json.ps1");
const CONTENT_AS_JSON: &str = include_str!("template/content_as_json.ps1");

const FORCE_OUTPUT_ENCODING: &str = "$OutputEncoding = [Console]::OutputEncoding\n";

/// Session bootstrap defining `$utf8` and `Get-ContentAsJson`.
///
/// With `legacy_json_bridge` the tree-based JSON polyfill is included for
/// interpreters older than 3.0.
pub fn prelude(legacy_json_bridge: bool) -> String {
	let mut text = String::with_capacity(PRELUDE.len() + LEGACY_JSON.len() + CONTENT_AS_JSON.len() + 2);
	text.push_str(PRELUDE);
	text.push('\n');
	if legacy_json_bridge {
		text.push_str(LEGACY_JSON);
		text.push('\n');
	}
	text.push_str(CONTENT_AS_JSON);
	text
}

/// Runs `program` with each argument as its own literal, feeding `stdin` as a
/// literal block when present.
pub fn execute_process<S: AsRef<str>>(program: &str, arguments: &[S], stdin: Option<&str>) -> String {
	let mut invocation = format!("& {}", quote(program));
	for arg in arguments {
		invocation.push(' ');
		invocation.push_str(&quote(arg.as_ref()));
	}

	let mut text = String::from(FORCE_OUTPUT_ENCODING);
	if let Some(input) = stdin {
		text.push_str(&literal_block(input));
		text.push_str(" | ");
	}
	text.push_str(&invocation);
	with_trailer(text)
}

/// Creates every directory in one idempotent command.
///
/// Duplicates are dropped and the list sorted so equal sets give equal text.
/// An empty list yields empty text.
pub fn mkdirs<S: AsRef<str>>(dirs: &[S]) -> String {
	let unique: BTreeSet<&str> = dirs.iter().map(AsRef::as_ref).collect();
	if unique.is_empty() {
		return String::new();
	}
	let paths = unique.into_iter().map(quote).collect::<Vec<_>>().join(",");
	format!("mkdir -Force {paths} | Out-Null\n")
}

/// Creates a randomly named directory under `parent` and prints its path.
///
/// `parent` is an expression evaluated remotely, such as `$env:TEMP`.
pub fn make_tempdir(parent: &str) -> String {
	format!(
		"$parent = {parent}
$name = [System.IO.Path]::GetRandomFileName()
$path = Join-Path $parent $name
New-Item -ItemType Directory -Path $path | Out-Null
$path
"
	)
}

/// Removes `path` recursively; succeeds when it is already gone.
pub fn rmdir(path: &str) -> String {
	let path = quote(path);
	format!("if (Test-Path -LiteralPath {path}) {{ Remove-Item -LiteralPath {path} -Force -Recurse }}\n")
}

/// Looks up the command at `path` without wildcard expansion of `[`, `]`,
/// `*` or `?` in the file name.
fn command_at(path: &str) -> String {
	format!("(Get-Command -Name ([System.Management.Automation.WildcardPattern]::Escape({})))", quote(path))
}

/// Invokes a script's block in isolation with positional arguments.
pub fn run_script<S: AsRef<str>>(script_path: &str, arguments: &[S]) -> String {
	let args = arguments.iter().map(|arg| quote(arg.as_ref())).collect::<Vec<_>>().join(", ");
	with_trailer(format!(
		"$invokeArgs = @{{
  ScriptBlock = {command}.ScriptBlock
  ArgumentList = @({args})
}}

try
{{
  Invoke-Command @invokeArgs
}}
catch
{{
  Write-Error $_.Exception
  exit 1
}}
",
		command = command_at(script_path),
	))
}

/// Invokes a task in-session.
///
/// With [`InputMethod::Powershell`] the arguments travel as an encoded
/// payload, are decoded remotely, and only the keys the task declares as
/// parameters are bound. A payload that fails to decode exits 1 before the
/// task starts. Any other method binds nothing.
pub fn run_task(task_path: &str, arguments: &Record, input_method: InputMethod) -> Result<String, EncodingError> {
	let task = quote(task_path);
	if input_method != InputMethod::Powershell {
		return Ok(with_trailer(format!("try {{ & {task} }} catch {{ Write-Error $_.Exception; exit 1 }}\n")));
	}

	let payload = encode_payload(arguments)?;
	Ok(with_trailer(format!(
		"try {{
  $private:tempArgs = Get-ContentAsJson -ErrorAction Stop (
    $utf8.GetString([System.Convert]::FromBase64String('{payload}'))
  )
}} catch {{ Write-Error $_.Exception; exit 1 }}
if ($null -eq $private:tempArgs) {{ Write-Error 'Task arguments did not decode to an object'; exit 1 }}
$allowedArgs = {command}.Parameters.Keys
$private:taskArgs = @{{}}
$private:tempArgs.Keys | Where-Object {{ $allowedArgs -contains $_ }} | ForEach-Object {{ $private:taskArgs[$_] = $private:tempArgs[$_] }}
try {{ & {task} @taskArgs }} catch {{ Write-Error $_.Exception; exit 1 }}
",
		command = command_at(task_path),
	)))
}

/// Sets a process-scoped environment variable.
pub fn set_env(name: &str, value: &str) -> String {
	format!("[Environment]::SetEnvironmentVariable({}, {})\n", quote(name), literal_block(value))
}

/// Adds directory entries to a list-valued environment variable.
pub fn extend_env(update: &EnvUpdate) -> String {
	let name = quote(&update.name);
	let current = format!("[Environment]::GetEnvironmentVariable({name})");
	let entries = update
		.entries
		.iter()
		.map(|entry| format!("[Environment]::ExpandEnvironmentVariables({})", quote(entry)))
		.collect::<Vec<_>>()
		.join(" + ';' + ");
	let value = match update.position {
		Position::Append => format!("{current} + ';' + {entries}"),
		Position::Prepend => format!("{entries} + ';' + {current}"),
	};
	format!("[Environment]::SetEnvironmentVariable({name}, {value})\n")
}

#[cfg(test)]
mod tests;
