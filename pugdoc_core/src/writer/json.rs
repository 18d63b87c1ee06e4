use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::DocWriter;
use super::OutputType;
use crate::DocumentTree;
use crate::Options;
use crate::PugdocError;
use crate::PugdocResult;

/// Writes the document tree as tab indented JSON. The output reads back with
/// [`DocumentTree::from_json`].
pub struct JsonWriter;

impl DocWriter for JsonWriter {
	fn output_type(&self) -> OutputType {
		OutputType::Ast
	}

	fn render(&self, tree: &DocumentTree, _options: &Options) -> PugdocResult<String> {
		let mut buffer = Vec::new();
		let formatter = PrettyFormatter::with_indent(b"\t");
		let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

		tree.serialize(&mut serializer)
			.map_err(|e| PugdocError::Serialize(e.to_string()))?;
		buffer.push(b'\n');

		String::from_utf8(buffer).map_err(|e| PugdocError::Serialize(e.to_string()))
	}
}
