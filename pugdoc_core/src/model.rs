use std::fmt;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;

use crate::PugdocError;
use crate::PugdocResult;

/// Tag titles that introduce a named parameter.
pub const PARAM_TAG_TITLES: [&str; 3] = ["param", "arg", "argument"];

/// Tags whose body is free text even when it starts with `{`. Their
/// continuation lines keep their line breaks.
pub const VERBATIM_TAG_TITLES: [&str; 1] = ["example"];

/// The structural unit a documentation comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Mixin,
	Block,
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Mixin => write!(f, "mixin"),
			Self::Block => write!(f, "block"),
		}
	}
}

/// Where a documented unit was declared. `line` is the 1-indexed line of the
/// `@pugdoc` marker, not of the declaration itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
	/// Path relative to the source root, always `/`-separated.
	pub file: String,
	pub line: usize,
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.file, self.line)
	}
}

/// One documented mixin or block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
	pub kind: NodeKind,
	/// Always present for mixins, optional for anonymous blocks.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub tags: Vec<AnnotationTag>,
	pub location: Location,
}

impl DocumentNode {
	pub fn is_mixin(&self) -> bool {
		self.kind == NodeKind::Mixin
	}

	/// The `@param` style tags of this node, in declaration order.
	pub fn params(&self) -> impl Iterator<Item = &AnnotationTag> {
		self.tags.iter().filter(|tag| tag.is_param())
	}
}

/// A single `@tag` line (or multi-line tag) of a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotationTag {
	/// The tag keyword without the `@`, e.g. `param`.
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub r#type: Option<TypeExpression>,
	#[serde(default)]
	pub description: String,
	/// Set for `[name]` and `[name=value]` parameters.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub optional: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<String>,
}

impl AnnotationTag {
	pub fn is_param(&self) -> bool {
		PARAM_TAG_TITLES.contains(&self.title.as_str())
	}

	pub fn is_verbatim(&self) -> bool {
		VERBATIM_TAG_TITLES.contains(&self.title.as_str())
	}
}

/// The parsed form of a tag's `{...}` type text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TypeExpression {
	/// A bare type such as `string` or `Array<Item>`, kept verbatim.
	#[serde(rename = "NamedType")]
	Named { name: String },
	/// A structural object type. Fields keep their source order.
	#[serde(rename = "RecordType")]
	Record { fields: Vec<RecordField> },
}

impl TypeExpression {
	pub fn named(name: impl Into<String>) -> Self {
		Self::Named { name: name.into() }
	}

	pub fn record(fields: Vec<RecordField>) -> Self {
		Self::Record { fields }
	}

	pub fn is_record(&self) -> bool {
		matches!(self, Self::Record { .. })
	}

	/// Multi-line rendering with two-space indentation per nesting level.
	pub fn pretty(&self) -> String {
		let mut out = String::new();
		write_pretty(self, 0, &mut out);
		out
	}
}

fn write_pretty(expression: &TypeExpression, depth: usize, out: &mut String) {
	match expression {
		TypeExpression::Named { name } => out.push_str(name),
		TypeExpression::Record { fields } if fields.is_empty() => out.push_str("{}"),
		TypeExpression::Record { fields } => {
			out.push_str("{\n");
			for (index, field) in fields.iter().enumerate() {
				out.push_str(&"  ".repeat(depth + 1));
				out.push_str(&field.key);
				out.push_str(": ");
				write_pretty(&field.value, depth + 1, out);
				if index + 1 < fields.len() {
					out.push(',');
				}
				out.push('\n');
			}
			out.push_str(&"  ".repeat(depth));
			out.push('}');
		}
	}
}

/// Compact single-line form, e.g. `{ label: string, size: number }`.
impl fmt::Display for TypeExpression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Named { name } => write!(f, "{name}"),
			Self::Record { fields } if fields.is_empty() => write!(f, "{{}}"),
			Self::Record { fields } => {
				write!(f, "{{ ")?;
				for (index, field) in fields.iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}: {}", field.key, field.value)?;
				}
				write!(f, " }}")
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
	pub key: String,
	pub value: TypeExpression,
}

impl RecordField {
	pub fn new(key: impl Into<String>, value: TypeExpression) -> Self {
		Self {
			key: key.into(),
			value,
		}
	}
}

/// Every documented node of a run, ordered by input file and then by line.
///
/// The tree is assembled once and then only read. It dereferences to the
/// node slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Serialize, Deserialize)]
pub struct DocumentTree {
	nodes: Vec<DocumentNode>,
}

impl DocumentTree {
	pub fn new(nodes: Vec<DocumentNode>) -> Self {
		Self { nodes }
	}

	/// Only the mixin nodes, which are what the markdown and html writers
	/// document.
	pub fn mixins(&self) -> impl Iterator<Item = &DocumentNode> {
		self.nodes.iter().filter(|node| node.is_mixin())
	}

	/// Append the nodes of one more file. Files must be appended in input
	/// order.
	pub(crate) fn append_file(&mut self, nodes: Vec<DocumentNode>) {
		debug_assert!(
			nodes
				.iter()
				.all(|node| !self.nodes.iter().any(|n| n.location == node.location)),
			"duplicate node location"
		);
		self.nodes.extend(nodes);
	}

	pub fn into_nodes(self) -> Vec<DocumentNode> {
		self.nodes
	}

	/// Read back a tree from the `ast` artifact.
	pub fn from_json(json: &str) -> PugdocResult<Self> {
		serde_json::from_str(json).map_err(|e| PugdocError::Serialize(e.to_string()))
	}
}
