use std::io::Write;

use super::*;

#[test]
fn default_config_carries_toolchain() {
	let config = ShellConfig::default();
	assert!(config.legacy_json_bridge);
	let env = config.environment();
	assert_eq!(env.len(), 2);
	assert_eq!(env[0].name, "PATH");
	assert_eq!(env[0].position, Position::Append);
	assert!(env[0].entries.iter().all(|dir| dir.starts_with("%ProgramFiles%")));
	assert_eq!(env[1].name, "RUBYLIB");
	assert_eq!(env[1].position, Position::Prepend);
}

#[test]
fn empty_toml_is_the_default() {
	assert_eq!(ShellConfig::from_toml_str("").unwrap(), ShellConfig::default());
}

#[test]
fn toml_overrides_individual_fields() {
	let config = ShellConfig::from_toml_str(
		r#"
legacy_json_bridge = false

[interpreters]
powershell = "pwsh.exe"

[toolchain]
bin_dirs = ['D:\tools\bin']
lib_dirs = []
"#,
	)
	.unwrap();
	assert!(!config.legacy_json_bridge);
	assert_eq!(config.interpreters.powershell, "pwsh.exe");
	assert_eq!(config.interpreters.host_shell, "cmd.exe");
	let env = config.environment();
	assert_eq!(env.len(), 1);
	assert_eq!(env[0].entries, vec![r"D:\tools\bin".to_owned()]);
}

#[test]
fn no_toolchain_means_no_environment() {
	let config = ShellConfig {
		toolchain: None,
		..ShellConfig::default()
	};
	assert!(config.environment().is_empty());
}

#[test]
fn unknown_keys_are_rejected() {
	let err = ShellConfig::from_toml_str("legacy_bridge = true").expect_err("typo should fail");
	assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn load_reads_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "legacy_json_bridge = false").unwrap();
	let config = ShellConfig::load(file.path()).unwrap();
	assert!(!config.legacy_json_bridge);
}

#[test]
fn load_reports_missing_file() {
	let err = ShellConfig::load(Path::new("/nonexistent/psrun.toml")).expect_err("missing file");
	assert!(matches!(err, ConfigError::Io { .. }));
}
