//! Parsing of `@pugdoc` comment bodies into a description and
//! [`AnnotationTag`]s.
//!
//! ```text
//! //- @pugdoc
//! //- Renders a button.
//! //- @param {{
//! //-   label: string
//! //- }} opts Options.
//! ```
//!
//! Tag types are brace delimited and may span several physical lines, so the
//! body is walked with a [`LineCursor`] that the type scanner is allowed to
//! advance.

use crate::AnnotationTag;
use crate::PugdocError;
use crate::PugdocResult;
use crate::type_expression::parse_type_expression;

/// Tags whose text after the type starts with a parameter name.
const NAMED_TAG_TITLES: [&str; 5] = ["param", "arg", "argument", "prop", "property"];

/// The description and tags of one documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
	pub description: String,
	pub tags: Vec<AnnotationTag>,
}

/// A position within the trimmed lines of a comment body.
///
/// `index` counts from the marker line, so it doubles as the line offset of
/// the current line within the comment.
#[derive(Debug)]
pub struct LineCursor<'a> {
	lines: &'a [String],
	index: usize,
}

impl<'a> LineCursor<'a> {
	/// Start on the first line after the marker.
	pub fn new(lines: &'a [String]) -> Self {
		Self { lines, index: 1 }
	}

	pub fn current(&self) -> Option<&'a str> {
		self.lines.get(self.index).map(String::as_str)
	}

	/// The offset of the current line from the marker line.
	pub fn offset(&self) -> usize {
		self.index
	}

	/// Move to the next line, returning it.
	pub fn advance(&mut self) -> Option<&'a str> {
		self.index += 1;
		self.current()
	}
}

/// Parse the raw comment text of a marker (including the marker line).
///
/// An unterminated type fails with
/// [`PugdocError::UnterminatedTypeExpression`] whose `line` is the offset of
/// the tag line from the marker line.
pub fn parse_body(comment_text: &str) -> PugdocResult<ParsedComment> {
	let lines: Vec<String> = comment_text.split('\n').map(clean_line).collect();
	let mut cursor = LineCursor::new(&lines);
	let mut parsed = ParsedComment::default();

	while let Some(line) = cursor.current() {
		if let Some(tag_line) = line.strip_prefix('@') {
			let tag = parse_tag(tag_line, &mut cursor)?;
			parsed.tags.push(tag);
		} else {
			// Text after a tag continues that tag until the next `@` line.
			match parsed.tags.last_mut() {
				Some(tag) => continue_tag(tag, line),
				None => push_words(&mut parsed.description, line),
			}
		}

		cursor.advance();
	}

	for tag in &mut parsed.tags {
		let trimmed_len = tag.description.trim_end().len();
		tag.description.truncate(trimmed_len);
	}

	Ok(parsed)
}

/// Append a continuation line to a tag. Verbatim bodies keep their line
/// breaks and blank lines, other bodies flow into a single line.
fn continue_tag(tag: &mut AnnotationTag, line: &str) {
	if !tag.is_verbatim() {
		push_words(&mut tag.description, line);
		return;
	}

	if tag.description.is_empty() {
		tag.description.push_str(line);
	} else {
		tag.description.push('\n');
		tag.description.push_str(line);
	}
}

fn push_words(text: &mut String, line: &str) {
	if line.is_empty() {
		return;
	}
	if !text.is_empty() {
		text.push(' ');
	}
	text.push_str(line);
}

/// Trim a line and drop a leading line comment opener, so both
/// one-comment-per-line bodies and indented block comment bodies read the
/// same.
fn clean_line(line: &str) -> String {
	let trimmed = line.trim();
	let stripped = trimmed
		.strip_prefix("//-")
		.or_else(|| trimmed.strip_prefix("//"))
		.unwrap_or(trimmed);

	stripped.trim().to_string()
}

/// Parse one tag. `tag_line` is the current line without its `@`. The cursor
/// is left on the last line the tag consumed.
fn parse_tag<'a>(tag_line: &'a str, cursor: &mut LineCursor<'a>) -> PugdocResult<AnnotationTag> {
	let title_len = tag_line
		.find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
		.unwrap_or(tag_line.len());
	let title = tag_line[..title_len].to_string();
	let rest = tag_line[title_len..].trim_start();

	let mut tag = AnnotationTag {
		title,
		..AnnotationTag::default()
	};

	let remainder = match rest.strip_prefix('{') {
		Some(after_brace) if !tag.is_verbatim() => {
			let scan = scan_type(after_brace, cursor)?;
			tag.r#type = Some(parse_type_expression(&scan.text));
			scan.remainder
		}
		_ => rest.to_string(),
	};

	if NAMED_TAG_TITLES.contains(&tag.title.as_str()) {
		let (name, description) = split_name(&remainder);
		if let Some(name) = name {
			apply_name(&mut tag, name);
		}
		tag.description = strip_separator(description).to_string();
	} else {
		tag.description = remainder;
	}

	Ok(tag)
}

/// The result of scanning a brace delimited type.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeScan {
	/// Everything between the outer braces. Newlines are kept and each
	/// continuation line is re-indented with one tab per open brace.
	pub text: String,
	/// The trimmed rest of the line that holds the closing brace.
	pub remainder: String,
}

/// Scan a type starting right after its opening `{`.
///
/// The scan walks character by character, tracking brace depth, and moves
/// the cursor onto following lines until the closing brace of depth zero is
/// found. Inner braces are kept in the text, the outer pair is not.
pub fn scan_type<'a>(
	after_brace: &'a str,
	cursor: &mut LineCursor<'a>,
) -> PugdocResult<TypeScan> {
	let start_offset = cursor.offset();
	let mut text = String::new();
	let mut depth = 0usize;
	let mut line = after_brace;
	let mut chars = line.char_indices();

	let close = loop {
		let Some((position, ch)) = chars.next() else {
			let Some(next) = cursor.advance() else {
				return Err(PugdocError::UnterminatedTypeExpression {
					line: start_offset,
				});
			};

			// Closing braces at the start of the next line belong to an
			// outer level, so they are not indented as deep as the body.
			let leading_closers = next.chars().take_while(|&c| c == '}').count();
			text.push('\n');
			text.push_str(&"\t".repeat(depth.saturating_sub(leading_closers)));

			line = next;
			chars = line.char_indices();
			continue;
		};

		match ch {
			'{' => depth += 1,
			'}' if depth == 0 => break position,
			'}' => depth -= 1,
			_ => {}
		}

		text.push(ch);
	};

	Ok(TypeScan {
		text,
		remainder: line[close + 1..].trim().to_string(),
	})
}

/// Split `name description` at the first whitespace. A bracketed optional
/// name (`[size=large]`) is kept whole even when its default has spaces.
fn split_name(remainder: &str) -> (Option<&str>, &str) {
	let remainder = remainder.trim();

	if remainder.is_empty() {
		return (None, "");
	}

	if remainder.starts_with('[') {
		if let Some(close) = remainder.find(']') {
			return (Some(&remainder[..=close]), remainder[close + 1..].trim_start());
		}
	}

	match remainder.split_once(char::is_whitespace) {
		Some((name, description)) => (Some(name), description.trim_start()),
		None => (Some(remainder), ""),
	}
}

/// Store a parameter name, unwrapping `[name]` and `[name=default]`.
fn apply_name(tag: &mut AnnotationTag, name: &str) {
	let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) else {
		tag.name = Some(name.to_string());
		return;
	};

	tag.optional = true;
	match inner.split_once('=') {
		Some((name, default)) => {
			tag.name = Some(name.trim().to_string());
			tag.default = Some(default.trim().to_string());
		}
		None => tag.name = Some(inner.trim().to_string()),
	}
}

/// JSDoc allows `@param {string} name - description`.
fn strip_separator(description: &str) -> &str {
	description
		.strip_prefix("- ")
		.map_or(description, str::trim_start)
}
