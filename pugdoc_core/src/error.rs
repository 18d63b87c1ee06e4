use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum PugdocError {
	#[error(transparent)]
	#[diagnostic(code(pugdoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{}`", .path.display())]
	#[diagnostic(code(pugdoc::read_file))]
	ReadFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write `{}`", .path.display())]
	#[diagnostic(
		code(pugdoc::write_file),
		help("check that the output directory is writable")
	)]
	WriteFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("unterminated type expression starting on line {line}")]
	#[diagnostic(
		code(pugdoc::malformed_type_expression),
		help("every `{{` in a tag type needs a matching `}}`")
	)]
	UnterminatedTypeExpression { line: usize },

	#[error("unsupported block kind: `{0}`")]
	#[diagnostic(
		code(pugdoc::unsupported_block_kind),
		help("`@pugdoc` comments can only document `mixin` and `block` declarations")
	)]
	UnsupportedBlockKind(String),

	#[error("`@pugdoc` marker on line {line} is not followed by a mixin or block")]
	#[diagnostic(code(pugdoc::missing_structural_unit))]
	MissingStructuralUnit { line: usize },

	#[error("mixin declaration on line {line} has no name")]
	#[diagnostic(code(pugdoc::missing_mixin_name))]
	MissingMixinName { line: usize },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(pugdoc::config_parse),
		help("check that pugdoc.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("invalid input pattern `{pattern}`: {reason}")]
	#[diagnostic(code(pugdoc::invalid_glob))]
	InvalidGlob { pattern: String, reason: String },

	#[error("unknown output type: `{0}`")]
	#[diagnostic(
		code(pugdoc::unknown_output_type),
		help("available output types: all, ast, markdown, html")
	)]
	UnknownOutputType(String),

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(pugdoc::template_render))]
	TemplateRender(String),

	#[error("failed to serialize the document tree: {0}")]
	#[diagnostic(code(pugdoc::serialize))]
	Serialize(String),
}

impl PugdocError {
	/// Errors that only invalidate a single marker. The assembler skips the
	/// node and keeps scanning the file.
	pub fn is_recoverable(&self) -> bool {
		matches!(
			self,
			Self::UnsupportedBlockKind(_)
				| Self::MissingStructuralUnit { .. }
				| Self::MissingMixinName { .. }
		)
	}
}

pub type PugdocResult<T> = Result<T, PugdocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
