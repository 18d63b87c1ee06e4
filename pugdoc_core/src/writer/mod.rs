//! Output writers. Each format implements [`DocWriter`] and is selected
//! through the closed [`OutputType`] enum.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::DocumentTree;
use crate::Options;
use crate::PugdocError;
use crate::PugdocResult;

mod html;
mod json;
mod markdown;

pub use html::HtmlWriter;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;

/// An artifact format. The declaration order is the order artifacts are
/// written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
	/// The serialized document tree.
	Ast,
	Markdown,
	Html,
}

impl OutputType {
	pub const ALL: [OutputType; 3] = [Self::Ast, Self::Markdown, Self::Html];

	pub fn extension(self) -> &'static str {
		match self {
			Self::Ast => "json",
			Self::Markdown => "md",
			Self::Html => "html",
		}
	}

	pub fn writer(self) -> &'static dyn DocWriter {
		match self {
			Self::Ast => &JsonWriter,
			Self::Markdown => &MarkdownWriter,
			Self::Html => &HtmlWriter,
		}
	}
}

impl fmt::Display for OutputType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Ast => write!(f, "ast"),
			Self::Markdown => write!(f, "markdown"),
			Self::Html => write!(f, "html"),
		}
	}
}

impl FromStr for OutputType {
	type Err = PugdocError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"ast" | "json" => Ok(Self::Ast),
			"markdown" | "md" => Ok(Self::Markdown),
			"html" => Ok(Self::Html),
			_ => Err(PugdocError::UnknownOutputType(value.to_string())),
		}
	}
}

/// Renders a [`DocumentTree`] into one output format.
///
/// Implementations must be pure functions of the tree and the options so
/// that writers can run in any order.
pub trait DocWriter {
	fn output_type(&self) -> OutputType;

	/// Render the full document.
	fn render(&self, tree: &DocumentTree, options: &Options) -> PugdocResult<String>;

	/// Render the document and write it to `path`. The file is flushed before
	/// returning and closed on every path.
	fn write_to_file(&self, tree: &DocumentTree, options: &Options, path: &Path) -> PugdocResult<()> {
		let content = self.render(tree, options)?;
		let write_error = |source: std::io::Error| PugdocError::WriteFile {
			path: path.to_path_buf(),
			source,
		};

		let file = File::create(path).map_err(write_error)?;
		let mut writer = BufWriter::new(file);
		writer.write_all(content.as_bytes()).map_err(write_error)?;
		writer.flush().map_err(write_error)?;

		tracing::debug!(path = %path.display(), format = %self.output_type(), "wrote artifact");
		Ok(())
	}
}
