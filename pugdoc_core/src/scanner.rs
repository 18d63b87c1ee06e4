//! Line-level scanning of pug sources.
//!
//! The scanner never parses pug. It only knows two things about the
//! language: `//` starts a comment, and a line indented deeper than the line
//! above it belongs to that line's block.

use std::borrow::Cow;

/// The keyword that flags the following mixin or block as documented.
pub const MARKER_KEYWORD: &str = "@pugdoc";

/// A pug comment opener followed by its unbuffered variant marker.
const COMMENT_OPENER: &str = "//";

/// A marker comment together with the structural block that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
	/// 0-indexed line of the `@pugdoc` marker.
	pub line: usize,
	/// The marker line and every continuation line of its comment.
	pub comment_text: String,
	/// The first non-comment block after the comment. Empty when the file
	/// ends before one appears.
	pub block_text: String,
	/// The 0-indexed line right after the consumed comment. Scanning resumes
	/// here.
	pub next_line: usize,
}

/// One logical pug block: a line and everything nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalBlock {
	/// 0-indexed first line.
	pub start: usize,
	/// 0-indexed line after the last line of the block.
	pub end: usize,
	pub text: String,
}

/// Remove every carriage return, including stray ones inside a line.
pub fn strip_carriage_returns(content: &str) -> Cow<'_, str> {
	if content.contains('\r') {
		Cow::Owned(content.replace('\r', ""))
	} else {
		Cow::Borrowed(content)
	}
}

/// Split content into lines. Run [`strip_carriage_returns`] first for raw
/// file content.
pub fn split_lines(content: &str) -> Vec<&str> {
	content.split('\n').collect()
}

/// Check whether a line is exactly a documentation marker: optional
/// indentation, a comment opener, at least one space, the keyword and
/// optional trailing whitespace.
pub fn is_marker_line(line: &str) -> bool {
	let Some(rest) = line.trim_start().strip_prefix(COMMENT_OPENER) else {
		return false;
	};
	let rest = rest.strip_prefix('-').unwrap_or(rest);

	if !rest.starts_with(char::is_whitespace) {
		return false;
	}

	rest.trim() == MARKER_KEYWORD
}

/// Find the next documentation marker at or after `start`.
///
/// Returns `None` once the end of the file is reached without another
/// marker.
pub fn find_next_marker(lines: &[&str], start: usize) -> Option<MarkerMatch> {
	let line = (start..lines.len()).find(|&index| is_marker_line(lines[index]))?;
	let mut blocks = read_blocks(lines, line, 2).into_iter();
	let comment = blocks.next()?;
	let block_text = blocks.next().map(|block| block.text).unwrap_or_default();

	Some(MarkerMatch {
		line,
		comment_text: comment.text,
		block_text,
		next_line: comment.end,
	})
}

/// Read up to `count` consecutive logical blocks beginning at `start`.
///
/// Blank lines between blocks are skipped. A comment block also absorbs the
/// `//` lines that directly follow it at the same indentation, so a run of
/// line comments reads as one comment.
pub fn read_blocks(lines: &[&str], start: usize, count: usize) -> Vec<LogicalBlock> {
	let mut blocks = Vec::with_capacity(count);
	let mut cursor = start;

	while blocks.len() < count {
		while cursor < lines.len() && lines[cursor].trim().is_empty() {
			cursor += 1;
		}

		if cursor >= lines.len() {
			break;
		}

		let block = read_block(lines, cursor);
		cursor = block.end;
		blocks.push(block);
	}

	blocks
}

fn read_block(lines: &[&str], start: usize) -> LogicalBlock {
	let head = lines[start];
	let indent = indentation(head);
	let is_comment = is_comment_line(head);
	let mut end = start + 1;
	let mut last_content = start;

	while end < lines.len() {
		let line = lines[end];

		if line.trim().is_empty() {
			// A blank line ends a comment but may sit inside a nested block.
			if is_comment {
				break;
			}
			end += 1;
			continue;
		}

		let nested = indentation(line) > indent;
		let continues_comment = is_comment && indentation(line) == indent && is_comment_line(line);

		if !nested && !continues_comment {
			break;
		}

		last_content = end;
		end += 1;
	}

	let end = last_content + 1;
	let text = lines[start..end]
		.iter()
		.map(|line| strip_indentation(line, indent))
		.collect::<Vec<_>>()
		.join("\n");

	LogicalBlock { start, end, text }
}

fn is_comment_line(line: &str) -> bool {
	line.trim_start().starts_with(COMMENT_OPENER)
}

fn indentation(line: &str) -> usize {
	line.len() - line.trim_start().len()
}

fn strip_indentation(line: &str, indent: usize) -> &str {
	let leading = indentation(line).min(indent);
	if line.is_char_boundary(leading) {
		&line[leading..]
	} else {
		line.trim_start()
	}
}
