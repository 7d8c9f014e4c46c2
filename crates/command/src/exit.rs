//! Exit-status normalization.
//!
//! The interpreter reports failure through two independent signals: a
//! success flag for the last statement and a nullable numeric code for the
//! last native command. Some failure classes set the flag but leave the code
//! unset. The trailer folds both into one process exit code and treats the
//! ambiguous case (flag false, no code) as failure.

/// Text appended to generated invocations.
pub const TRAILER: &str = "if (-not $? -and ($null -eq $LASTEXITCODE)) { exit 1 }\nexit $LASTEXITCODE\n";

/// Appends [`TRAILER`] to `body`, separating it onto its own line.
pub fn with_trailer(mut body: String) -> String {
	if !body.is_empty() && !body.ends_with('\n') {
		body.push('\n');
	}
	body.push_str(TRAILER);
	body
}

/// Single authoritative result of a remote invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitOutcome {
	pub exit_code: i32,
	pub succeeded: bool,
}

impl ExitOutcome {
	pub const fn from_code(exit_code: i32) -> Self {
		Self {
			exit_code,
			succeeded: exit_code == 0,
		}
	}

	/// Mirrors [`TRAILER`]: a present code wins verbatim, a false flag with no
	/// code becomes 1, and a true flag with no code becomes 0.
	pub const fn from_signals(success: bool, code: Option<i32>) -> Self {
		match (success, code) {
			(_, Some(code)) => Self::from_code(code),
			(false, None) => Self::from_code(1),
			(true, None) => Self::from_code(0),
		}
	}
}

#[cfg(test)]
mod tests;
