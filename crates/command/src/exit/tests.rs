use super::*;

#[test]
fn false_flag_without_code_fails_closed() {
	assert_eq!(ExitOutcome::from_signals(false, None), ExitOutcome { exit_code: 1, succeeded: false });
}

#[test]
fn numeric_code_propagates_verbatim() {
	assert_eq!(ExitOutcome::from_signals(false, Some(5)).exit_code, 5);
	assert_eq!(ExitOutcome::from_signals(true, Some(0)), ExitOutcome { exit_code: 0, succeeded: true });
	assert_eq!(ExitOutcome::from_signals(true, Some(3)).exit_code, 3);
}

#[test]
fn true_flag_without_code_succeeds() {
	assert!(ExitOutcome::from_signals(true, None).succeeded);
}

#[test]
fn trailer_reads_both_signals() {
	assert!(TRAILER.contains("-not $?"));
	assert!(TRAILER.contains("$null -eq $LASTEXITCODE"));
	assert!(TRAILER.ends_with("exit $LASTEXITCODE\n"));
}

#[test]
fn with_trailer_starts_on_a_fresh_line() {
	assert_eq!(with_trailer("& 'x'".to_owned()), format!("& 'x'\n{TRAILER}"));
	assert_eq!(with_trailer("& 'x'\n".to_owned()), format!("& 'x'\n{TRAILER}"));
}
