use psrun_data::Value;

use super::*;

fn caller_args() -> Record {
	let mut r = Record::new();
	r.push("name", Value::string("a"));
	r.push("count", Value::Int(1));
	r.push("extra", Value::string("x"));
	r
}

#[test]
fn filter_keeps_declared_parameters_only() {
	let accepted: ParameterSet = ["name", "count"].into_iter().collect();
	let kept = filter_arguments(&caller_args(), &accepted);
	assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["name", "count"]);
	assert_eq!(kept.get("count"), Some(&Value::Int(1)));
}

#[test]
fn filter_with_empty_declaration_binds_nothing() {
	assert!(filter_arguments(&caller_args(), &ParameterSet::default()).is_empty());
}

#[test]
fn filter_ignores_declared_but_missing_parameters() {
	let accepted: ParameterSet = ["name", "timeout"].into_iter().collect();
	let kept = filter_arguments(&caller_args(), &accepted);
	assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["name"]);
}

#[test]
fn input_method_parses_and_displays() {
	for method in [InputMethod::Stdin, InputMethod::Environment, InputMethod::Powershell, InputMethod::Both, InputMethod::None] {
		assert_eq!(method.as_str().parse::<InputMethod>(), Ok(method));
		assert_eq!(method.to_string(), method.as_str());
	}
	assert!("pipe".parse::<InputMethod>().is_err());
}

#[test]
fn input_method_delivery_channels() {
	assert!(InputMethod::Both.uses_stdin() && InputMethod::Both.uses_environment());
	assert!(InputMethod::Stdin.uses_stdin() && !InputMethod::Stdin.uses_environment());
	assert!(!InputMethod::Powershell.uses_stdin() && !InputMethod::Powershell.uses_environment());
	assert!(!InputMethod::None.uses_stdin() && !InputMethod::None.uses_environment());
}

#[test]
fn command_spec_appends_caller_arguments() {
	let spec = CommandSpec::new("cmd.exe", vec!["/c".into()]).with_arguments(["run.bat", "x"]);
	assert_eq!(spec.arguments, vec!["/c", "run.bat", "x"]);
}
