use std::ops::Range;

use logos::Logos;

use crate::RecordField;
use crate::TypeExpression;

/// Raw tokens of a tag's type text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TypeToken {
	#[token("{")]
	BraceOpen,
	#[token("}")]
	BraceClose,
	#[token(":")]
	Colon,
	#[token(",")]
	Comma,
	#[token(";")]
	Semicolon,
	#[token("\n")]
	Newline,
	#[regex(r"[ \t\r]+")]
	Whitespace,
	#[regex(r"[<(\[]")]
	GroupOpen,
	#[regex(r"[>)\]]")]
	GroupClose,
	#[regex(r"[^{}:,;\n \t\r<>()\[\]]+")]
	Text,
}

impl TypeToken {
	fn is_separator(self) -> bool {
		matches!(self, Self::Comma | Self::Semicolon | Self::Newline)
	}
}

/// Parse the text scanned between a tag's outer braces.
///
/// Text that forms a complete record (`{ key: type, ... }`, with fields
/// separated by commas, semicolons or newlines) becomes
/// [`TypeExpression::Record`]. Everything else is kept verbatim as a
/// [`TypeExpression::Named`].
pub fn parse_type_expression(text: &str) -> TypeExpression {
	let trimmed = text.trim();
	RecordParser::new(trimmed)
		.parse()
		.unwrap_or_else(|| TypeExpression::named(trimmed))
}

/// Recursive descent over the token stream of a record type.
struct RecordParser<'a> {
	source: &'a str,
	tokens: Vec<(TypeToken, Range<usize>)>,
	cursor: usize,
}

impl<'a> RecordParser<'a> {
	fn new(source: &'a str) -> Self {
		let tokens = TypeToken::lexer(source)
			.spanned()
			.filter_map(|(token, span)| token.ok().map(|token| (token, span)))
			.collect();

		Self {
			source,
			tokens,
			cursor: 0,
		}
	}

	fn parse(mut self) -> Option<TypeExpression> {
		if self.peek() != Some(TypeToken::BraceOpen) {
			return None;
		}

		let record = self.parse_record()?;
		self.skip_while(|token| matches!(token, TypeToken::Whitespace | TypeToken::Newline));

		// Trailing text after the closing brace means this is not a plain
		// record, e.g. `{a: string}[]`.
		(self.cursor == self.tokens.len()).then_some(record)
	}

	fn peek(&self) -> Option<TypeToken> {
		self.tokens.get(self.cursor).map(|(token, _)| *token)
	}

	fn bump(&mut self) -> Option<(TypeToken, Range<usize>)> {
		let token = self.tokens.get(self.cursor).cloned();
		self.cursor += 1;
		token
	}

	fn skip_while(&mut self, predicate: impl Fn(TypeToken) -> bool) {
		while self.peek().is_some_and(&predicate) {
			self.cursor += 1;
		}
	}

	fn skip_blank(&mut self) {
		self.skip_while(|token| matches!(token, TypeToken::Whitespace | TypeToken::Newline));
	}

	fn parse_record(&mut self) -> Option<TypeExpression> {
		let (TypeToken::BraceOpen, _) = self.bump()? else {
			return None;
		};
		let mut fields = Vec::new();

		loop {
			self.skip_while(|token| token == TypeToken::Whitespace || token.is_separator());

			match self.peek()? {
				TypeToken::BraceClose => {
					self.cursor += 1;
					return Some(TypeExpression::record(fields));
				}
				TypeToken::Text => fields.push(self.parse_field()?),
				_ => return None,
			}
		}
	}

	fn parse_field(&mut self) -> Option<RecordField> {
		let (_, key_span) = self.bump()?;
		let key = self.source[key_span].to_string();

		self.skip_while(|token| token == TypeToken::Whitespace);
		let (TypeToken::Colon, _) = self.bump()? else {
			return None;
		};
		self.skip_blank();

		let value = if self.peek()? == TypeToken::BraceOpen {
			self.parse_record()?
		} else {
			self.parse_named_value()?
		};

		Some(RecordField::new(key, value))
	}

	/// Collect the verbatim text of a field value up to the next separator or
	/// closing brace that is not nested inside `<>`, `()`, `[]` or `{}`.
	fn parse_named_value(&mut self) -> Option<TypeExpression> {
		let mut depth = 0usize;
		let mut start = None;
		let mut end = 0;

		while let Some(token) = self.peek() {
			if depth == 0 && (token.is_separator() || token == TypeToken::BraceClose) {
				break;
			}

			match token {
				TypeToken::GroupOpen | TypeToken::BraceOpen => depth += 1,
				TypeToken::GroupClose | TypeToken::BraceClose => depth = depth.checked_sub(1)?,
				_ => {}
			}

			let span = self.tokens[self.cursor].1.clone();
			if token != TypeToken::Whitespace && token != TypeToken::Newline {
				start.get_or_insert(span.start);
				end = span.end;
			}
			self.cursor += 1;
		}

		let start = start?;
		(depth == 0).then(|| TypeExpression::named(&self.source[start..end]))
	}
}
