use proptest::prelude::*;

use super::*;

/// Reads one single-quoted literal the way the interpreter tokenizer does,
/// returning the value and the unconsumed rest.
fn read_single_quoted(text: &str) -> Option<(String, &str)> {
	let mut chars = text.char_indices().peekable();
	let (_, open) = chars.next()?;
	if !SINGLE_QUOTES.contains(&open) {
		return None;
	}
	let mut out = String::new();
	while let Some((idx, ch)) = chars.next() {
		if SINGLE_QUOTES.contains(&ch) {
			match chars.peek() {
				Some(&(_, next)) if SINGLE_QUOTES.contains(&next) => {
					chars.next();
					out.push(ch);
				}
				_ => return Some((out, &text[idx + ch.len_utf8()..])),
			}
		} else {
			out.push(ch);
		}
	}
	None
}

#[test]
fn escape_doubles_ascii_quotes() {
	assert_eq!(escape("it's"), "it''s");
	assert_eq!(quote("it's"), "'it''s'");
}

#[test]
fn escape_doubles_typographic_quotes() {
	assert_eq!(escape("\u{2019}x"), "\u{2019}\u{2019}x");
}

#[test]
fn quote_neutralizes_breakout_attempt() {
	let hostile = "'; Remove-Item C:\\ -Recurse; '";
	let quoted = quote(hostile);
	let (value, rest) = read_single_quoted(&quoted).expect("literal should close");
	assert_eq!(value, hostile);
	assert!(rest.is_empty());
}

#[test]
fn quote_if_needed_only_wraps_whitespace() {
	assert_eq!(quote_if_needed(r"C:\scripts\run.ps1"), r"C:\scripts\run.ps1");
	assert_eq!(quote_if_needed(r"C:\my scripts\run.ps1"), r#""C:\my scripts\run.ps1""#);
	assert_eq!(quote_if_needed("tab\there"), "\"tab\there\"");
}

#[test]
fn escape_arguments_maps_each_argument() {
	assert_eq!(escape_arguments(&["a", "b c"]), vec!["a".to_owned(), "\"b c\"".to_owned()]);
}

#[test]
fn literal_block_uses_here_string() {
	assert_eq!(literal_block("line one\nline 'two'"), "@'\nline one\nline 'two'\n'@");
}

#[test]
fn literal_block_falls_back_when_text_contains_terminator() {
	let text = "data\n'@\nGet-Process";
	assert_eq!(literal_block(text), quote(text));
	let indented = "data\n   '@";
	assert_eq!(literal_block(indented), quote(indented));
}

proptest! {
	/// Any string survives a trip through a single-quoted literal unchanged.
	#[test]
	fn prop_quote_reads_back_exactly(value in "[a-z '\u{2018}\u{2019}\u{201A}\u{201B};$@\n]{0,24}") {
		let quoted = quote(&value);
		let (read, rest) = read_single_quoted(&quoted).expect("literal should close");
		prop_assert_eq!(read, value);
		prop_assert!(rest.is_empty());
	}
}
