use pretty_assertions::assert_eq;
use psrun_data::{Codec, Value, decode_payload};

use super::*;
use crate::exit::TRAILER;

fn embedded_payload(text: &str) -> &str {
	let start = text.find("FromBase64String('").expect("payload start") + "FromBase64String('".len();
	let len = text[start..].find("')").expect("payload end");
	&text[start..start + len]
}

#[test]
fn prelude_includes_bridge_only_when_enabled() {
	let with_bridge = prelude(true);
	assert!(with_bridge.contains("function ConvertFrom-JsonTree"));
	assert!(with_bridge.contains("function Get-ContentAsJson"));
	assert!(with_bridge.starts_with("$utf8 = "));

	let without = prelude(false);
	assert!(!without.contains("function ConvertFrom-JsonTree"));
	assert!(without.contains("function Get-ContentAsJson"));
}

#[test]
fn legacy_bridge_coerces_with_invariant_rules() {
	let text = prelude(true);
	assert!(text.contains("function ConvertFrom-NumberText"));
	assert!(text.contains("function ConvertFrom-DateText"));
	assert!(text.contains("[System.Globalization.CultureInfo]::InvariantCulture"));
	assert!(text.contains("TryParseExact"));
	assert!(text.contains("throw 'No parseable JSON document in input'"));
	assert!(!text.contains("-as [DateTime]"));
}

#[test]
fn native_decoder_stops_on_malformed_json() {
	assert!(prelude(false).contains("ConvertFrom-Json -ErrorAction Stop"));
}

#[test]
fn execute_process_quotes_every_argument() {
	let text = execute_process("ruby.exe", &["-S", "task's.rb"], None);
	assert_eq!(
		text,
		format!("$OutputEncoding = [Console]::OutputEncoding\n& 'ruby.exe' '-S' 'task''s.rb'\n{TRAILER}")
	);
}

#[test]
fn execute_process_pipes_stdin_block() {
	let text = execute_process::<&str>("cmd.exe", &[], Some("{\"a\":1}"));
	assert!(text.contains("@'\n{\"a\":1}\n'@ | & 'cmd.exe'\n"));
	assert!(text.ends_with(TRAILER));
}

#[test]
fn mkdirs_dedups_and_sorts() {
	assert_eq!(mkdirs(&["C:\\b", "C:\\a", "C:\\b"]), "mkdir -Force 'C:\\a','C:\\b' | Out-Null\n");
}

#[test]
fn mkdirs_empty_is_empty() {
	assert_eq!(mkdirs::<&str>(&[]), "");
}

#[test]
fn make_tempdir_prints_path() {
	let text = make_tempdir("$env:TEMP");
	assert!(text.starts_with("$parent = $env:TEMP\n"));
	assert!(text.contains("GetRandomFileName()"));
	assert!(text.ends_with("$path\n"));
}

#[test]
fn rmdir_tolerates_missing_path() {
	assert_eq!(
		rmdir("C:\\tmp\\x'y"),
		"if (Test-Path -LiteralPath 'C:\\tmp\\x''y') { Remove-Item -LiteralPath 'C:\\tmp\\x''y' -Force -Recurse }\n"
	);
}

#[test]
fn run_script_passes_positional_arguments() {
	let text = run_script("C:\\s\\a.ps1", &["one", "it's"]);
	assert!(text.contains("ScriptBlock = (Get-Command -Name ([System.Management.Automation.WildcardPattern]::Escape('C:\\s\\a.ps1'))).ScriptBlock"));
	assert!(text.contains("ArgumentList = @('one', 'it''s')"));
	assert!(text.contains("Invoke-Command @invokeArgs"));
	assert!(text.ends_with(TRAILER));
}

#[test]
fn run_task_embeds_decodable_payload() {
	let mut args = Record::new();
	args.push("name", Value::string("ok"));
	args.push("ignored", Value::Int(5));
	let text = run_task("C:\\t\\init.ps1", &args, InputMethod::Powershell).unwrap();

	let decoded = decode_payload(embedded_payload(&text), Codec::Native).unwrap();
	assert_eq!(decoded, args);
	assert!(text.contains("$allowedArgs = (Get-Command -Name ([System.Management.Automation.WildcardPattern]::Escape('C:\\t\\init.ps1'))).Parameters.Keys"));
	assert!(text.contains("& 'C:\\t\\init.ps1' @taskArgs"));
	assert!(text.ends_with(TRAILER));
}

#[test]
fn run_task_stops_before_task_when_decode_fails() {
	let text = run_task("C:\\t\\init.ps1", &Record::new(), InputMethod::Powershell).unwrap();

	let decode = text.find("Get-ContentAsJson -ErrorAction Stop").expect("decode stops on error");
	let opened = text.find("try {").expect("decode is guarded");
	let caught = text[decode..].find("} catch { Write-Error $_.Exception; exit 1 }").map(|at| decode + at);
	let null_guard = text
		.find("if ($null -eq $private:tempArgs) { Write-Error 'Task arguments did not decode to an object'; exit 1 }")
		.expect("null result is rejected");
	let invoke = text.find("& 'C:\\t\\init.ps1' @taskArgs").expect("task invocation");

	assert!(opened < decode);
	assert!(caught.is_some_and(|at| at < null_guard));
	assert!(null_guard < invoke);
}

#[test]
fn command_lookup_escapes_wildcards() {
	let text = run_script("C:\\s\\run[1]'s.ps1", &["x"]);
	assert!(text.contains("WildcardPattern]::Escape('C:\\s\\run[1]''s.ps1')"));
	assert!(!text.contains("Get-Command 'C:"));

	let text = run_task("C:\\t\\[x].ps1", &Record::new(), InputMethod::Powershell).unwrap();
	assert!(text.contains("(Get-Command -Name ([System.Management.Automation.WildcardPattern]::Escape('C:\\t\\[x].ps1'))).Parameters.Keys"));
}

#[test]
fn run_task_without_structured_input_binds_nothing() {
	let mut args = Record::new();
	args.push("name", Value::string("ok"));
	let text = run_task("C:\\t\\init.ps1", &args, InputMethod::Environment).unwrap();
	assert!(!text.contains("FromBase64String"));
	assert!(text.starts_with("try { & 'C:\\t\\init.ps1' }"));
}

#[test]
fn run_task_rejects_unencodable_arguments() {
	let mut args = Record::new();
	args.push("ratio", Value::Float(f64::NAN));
	assert!(run_task("t.ps1", &args, InputMethod::Powershell).is_err());
}

#[test]
fn set_env_uses_literal_block() {
	assert_eq!(
		set_env("PT_name", "a'b"),
		"[Environment]::SetEnvironmentVariable('PT_name', @'\na'b\n'@)\n"
	);
}

#[test]
fn extend_env_respects_position() {
	let append = EnvUpdate {
		name: "PATH".to_owned(),
		entries: vec!["%A%\\bin".to_owned(), "D:\\x".to_owned()],
		position: Position::Append,
	};
	assert_eq!(
		extend_env(&append),
		"[Environment]::SetEnvironmentVariable('PATH', [Environment]::GetEnvironmentVariable('PATH') + ';' + \
		 [Environment]::ExpandEnvironmentVariables('%A%\\bin') + ';' + [Environment]::ExpandEnvironmentVariables('D:\\x'))\n"
	);

	let prepend = EnvUpdate {
		position: Position::Prepend,
		..append
	};
	assert!(extend_env(&prepend).ends_with("ExpandEnvironmentVariables('D:\\x') + ';' + [Environment]::GetEnvironmentVariable('PATH'))\n"));
}
