use super::DocWriter;
use super::OutputType;
use crate::AnnotationTag;
use crate::DocumentNode;
use crate::DocumentTree;
use crate::Options;
use crate::PugdocResult;
use crate::RecordField;
use crate::TypeExpression;

/// Writes the mixins of the tree as a nested markdown list. Blocks are not
/// documented.
pub struct MarkdownWriter;

impl DocWriter for MarkdownWriter {
	fn output_type(&self) -> OutputType {
		OutputType::Markdown
	}

	fn render(&self, tree: &DocumentTree, _options: &Options) -> PugdocResult<String> {
		let mut buffer = MarkdownBuffer::default();

		buffer.write_line("## Mixins");
		for mixin in tree.mixins() {
			buffer.write_mixin(mixin);
		}

		Ok(buffer.content)
	}
}

/// Output text plus the current tab indentation. Created fresh for every
/// render.
#[derive(Debug, Default)]
struct MarkdownBuffer {
	content: String,
	indentation: usize,
}

impl MarkdownBuffer {
	/// Write indentation followed by `text`, without ending the line.
	fn write(&mut self, text: &str) {
		self.write_indentation();
		self.append(text);
	}

	fn append(&mut self, text: &str) {
		self.content.push_str(text);
	}

	fn write_line(&mut self, text: &str) {
		self.write(text);
		self.content.push('\n');
	}

	fn write_indentation(&mut self) {
		self.content.push_str(&"\t".repeat(self.indentation));
	}

	/// Move the indentation by `delta` levels. It never drops below zero.
	fn adjust_indentation(&mut self, delta: isize) {
		self.indentation = self.indentation.saturating_add_signed(delta);
	}

	fn advance_indentation(&mut self) {
		self.adjust_indentation(1);
	}

	fn retreat_indentation(&mut self) {
		self.adjust_indentation(-1);
	}

	fn write_mixin(&mut self, mixin: &DocumentNode) {
		let name = mixin.name.as_deref().unwrap_or_default();
		self.write_line(&format!("- **{name}**"));
		self.advance_indentation();

		if !mixin.description.is_empty() {
			self.write_line(&mixin.description);
		}
		self.write_line(&format!("- **Location:** {}", mixin.location));

		let params: Vec<&AnnotationTag> = mixin.params().collect();
		if !params.is_empty() {
			self.write_line("- **Parameters:**");
			self.advance_indentation();
			for param in params {
				self.write_param(param);
			}
			self.retreat_indentation();
		}

		for example in mixin.tags.iter().filter(|tag| tag.is_verbatim()) {
			self.write_example(example);
		}

		self.retreat_indentation();
	}

	fn write_example(&mut self, example: &AnnotationTag) {
		self.write_line("- **Example:**");
		self.advance_indentation();
		self.write_line("```pug");
		for line in example.description.lines() {
			self.write_line(line);
		}
		self.write_line("```");
		self.retreat_indentation();
	}

	fn write_param(&mut self, param: &AnnotationTag) {
		let name = param.name.as_deref().unwrap_or("(unnamed)");
		let qualifier = match (&param.default, param.optional) {
			(Some(default), _) => format!(" (optional, default: `{default}`)"),
			(None, true) => " (optional)".to_string(),
			(None, false) => String::new(),
		};
		self.write_line(&format!("- *{name}*{qualifier}"));
		self.advance_indentation();

		match &param.r#type {
			Some(TypeExpression::Named { name }) => {
				let mut line = format!("- `{name}`");
				if !param.description.is_empty() {
					line.push(' ');
					line.push_str(&param.description);
				}
				self.write_line(&line);
			}
			Some(TypeExpression::Record { fields }) => {
				self.write_line("```typescript");
				self.write_record(fields);
				self.write_line("```");
				if !param.description.is_empty() {
					self.write_line(&param.description);
				}
			}
			None => {
				if !param.description.is_empty() {
					self.write_line(&format!("- {}", param.description));
				}
			}
		}

		self.retreat_indentation();
	}

	fn write_record(&mut self, fields: &[RecordField]) {
		self.write_line("{");
		self.advance_indentation();
		self.write_fields(fields);
		self.retreat_indentation();
		self.write_line("}");
	}

	fn write_fields(&mut self, fields: &[RecordField]) {
		for (index, field) in fields.iter().enumerate() {
			self.write(&field.key);
			self.append(": ");

			match &field.value {
				TypeExpression::Named { name } => self.append(name),
				TypeExpression::Record { fields } if fields.is_empty() => self.append("{}"),
				TypeExpression::Record { fields } => {
					self.append("{\n");
					self.advance_indentation();
					self.write_fields(fields);
					self.retreat_indentation();
					self.write("}");
				}
			}

			if index + 1 < fields.len() {
				self.append(",");
			}
			self.append("\n");
		}
	}
}
