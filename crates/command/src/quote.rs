//! Quoting rules for the two layers generated text passes through.
//!
//! [`quote`] targets string literals inside the script body. [`quote_if_needed`]
//! targets word splitting by the outer process launcher. They are not
//! interchangeable.

/// Characters the interpreter accepts as single-quote delimiters.
const SINGLE_QUOTES: [char; 5] = ['\'', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];

/// Doubles every single-quote delimiter so `value` can sit inside `'...'`.
pub fn escape(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 2);
	for ch in value.chars() {
		if SINGLE_QUOTES.contains(&ch) {
			out.push(ch);
		}
		out.push(ch);
	}
	out
}

/// Renders `value` as a single-quoted literal.
pub fn quote(value: &str) -> String {
	format!("'{}'", escape(value))
}

/// Wraps `value` in double quotes only when it contains whitespace.
pub fn quote_if_needed(value: &str) -> String {
	if value.chars().any(char::is_whitespace) {
		format!("\"{value}\"")
	} else {
		value.to_owned()
	}
}

/// Applies [`quote_if_needed`] to each launcher argument.
pub fn escape_arguments<S: AsRef<str>>(arguments: &[S]) -> Vec<String> {
	arguments.iter().map(|arg| quote_if_needed(arg.as_ref())).collect()
}

/// Renders `value` as a verbatim here-string block.
///
/// A here-string cannot escape its own terminator, so text containing a line
/// that starts with a quote followed by `@` falls back to [`quote`].
pub fn literal_block(value: &str) -> String {
	if has_block_terminator(value) {
		return quote(value);
	}
	format!("@'\n{value}\n'@")
}

fn has_block_terminator(value: &str) -> bool {
	value.split(['\n', '\r']).any(|line| {
		let mut chars = line.trim_start().chars();
		matches!((chars.next(), chars.next()), (Some(q), Some('@')) if SINGLE_QUOTES.contains(&q))
	})
}

#[cfg(test)]
mod tests;
