use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::DocumentNode;
use crate::DocumentTree;
use crate::Location;
use crate::PugdocError;
use crate::PugdocResult;
use crate::annotation::parse_body;
use crate::classifier::classify;
use crate::scanner::find_next_marker;
use crate::scanner::split_lines;
use crate::scanner::strip_carriage_returns;

/// A marker that was found but could not produce a node. These never stop
/// the file from being processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum ParseDiagnostic {
	/// The marker precedes something other than a mixin or block.
	UnsupportedBlockKind { keyword: String, location: Location },
	/// The file ends right after the marker comment.
	MissingStructuralUnit { location: Location },
	/// `mixin` is not followed by a name.
	MissingMixinName { location: Location },
}

impl ParseDiagnostic {
	/// Turn a recoverable error into a diagnostic. Any other error is handed
	/// back unchanged.
	pub(crate) fn from_error(error: PugdocError, location: Location) -> PugdocResult<Self> {
		match error {
			PugdocError::UnsupportedBlockKind(keyword) => {
				Ok(Self::UnsupportedBlockKind { keyword, location })
			}
			PugdocError::MissingStructuralUnit { .. } => Ok(Self::MissingStructuralUnit { location }),
			PugdocError::MissingMixinName { .. } => Ok(Self::MissingMixinName { location }),
			other => Err(other),
		}
	}

	pub fn location(&self) -> &Location {
		match self {
			Self::UnsupportedBlockKind { location, .. }
			| Self::MissingStructuralUnit { location }
			| Self::MissingMixinName { location } => location,
		}
	}

	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		match self {
			Self::UnsupportedBlockKind { keyword, .. } => {
				format!("`@pugdoc` cannot document `{keyword}`, only mixins and blocks")
			}
			Self::MissingStructuralUnit { .. } => {
				"`@pugdoc` marker is not followed by a mixin or block".to_string()
			}
			Self::MissingMixinName { .. } => "documented mixin has no name".to_string(),
		}
	}
}

/// The nodes and diagnostics of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
	pub nodes: Vec<DocumentNode>,
	pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parse pug source content. `file` is the label stored in every node's
/// location.
///
/// Markers attached to unsupported units are reported as diagnostics and
/// skipped. A malformed type expression fails the whole file, with `line`
/// rewritten to the 1-indexed line of the offending tag.
pub fn parse_source(content: &str, file: &str) -> PugdocResult<ParsedFile> {
	let content = strip_carriage_returns(content);
	let lines = split_lines(&content);
	let mut parsed = ParsedFile::default();
	let mut cursor = 0;

	while let Some(marker) = find_next_marker(&lines, cursor) {
		cursor = marker.next_line;

		let location = Location {
			file: file.to_string(),
			line: marker.line + 1,
		};

		let classified = match classify(&marker.block_text, location.line) {
			Ok(classified) => classified,
			Err(error) if !error.is_recoverable() => return Err(error),
			Err(error) => {
				let diagnostic = ParseDiagnostic::from_error(error, location)?;
				tracing::warn!(
					location = %diagnostic.location(),
					"skipping marker: {}",
					diagnostic.message()
				);
				parsed.diagnostics.push(diagnostic);
				continue;
			}
		};

		let comment = parse_body(&marker.comment_text).map_err(|error| match error {
			PugdocError::UnterminatedTypeExpression { line } => {
				PugdocError::UnterminatedTypeExpression {
					line: location.line + line,
				}
			}
			other => other,
		})?;

		tracing::debug!(
			location = %location,
			kind = %classified.kind,
			name = classified.name.as_deref().unwrap_or_default(),
			"assembled node"
		);

		parsed.nodes.push(DocumentNode {
			kind: classified.kind,
			name: classified.name,
			description: comment.description,
			tags: comment.tags,
			location,
		});
	}

	Ok(parsed)
}

/// Read and parse a single file.
///
/// Locations are reported relative to `source_dir`, which defaults to the
/// file's own directory.
pub fn parse_file(path: &Path, source_dir: Option<&Path>) -> PugdocResult<ParsedFile> {
	let content = std::fs::read_to_string(path).map_err(|source| PugdocError::ReadFile {
		path: path.to_path_buf(),
		source,
	})?;
	let label = relative_label(path, source_dir);

	tracing::debug!(file = %path.display(), label = %label, "parsing file");
	parse_source(&content, &label)
}

/// `path` relative to `source_dir` (or its parent), with `/` separators.
pub fn relative_label(path: &Path, source_dir: Option<&Path>) -> String {
	let root = source_dir
		.or_else(|| path.parent())
		.unwrap_or_else(|| Path::new(""));
	let relative = strip_root(path, root).unwrap_or(path);

	relative
		.components()
		.map(|component| component.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/")
}

fn strip_root<'a>(path: &'a Path, root: &Path) -> Option<&'a Path> {
	if let Ok(relative) = path.strip_prefix(root) {
		return Some(relative);
	}

	// `./views/a.pug` against `views` and similar spellings of the same root.
	let clean_path = path.strip_prefix(".").unwrap_or(path);
	let clean_root = root.strip_prefix(".").unwrap_or(root);
	clean_path.strip_prefix(clean_root).ok()
}

/// A source file that could not be documented.
#[derive(Debug)]
pub struct FileFailure {
	pub file: PathBuf,
	pub error: PugdocError,
}

/// The unified tree of a run together with everything that was skipped.
#[derive(Debug, Default)]
pub struct TreeBuild {
	pub tree: DocumentTree,
	pub diagnostics: Vec<ParseDiagnostic>,
	pub failures: Vec<FileFailure>,
}

impl TreeBuild {
	pub fn has_failures(&self) -> bool {
		!self.failures.is_empty()
	}
}

/// Parse every file in order and merge the nodes into one tree. A file that
/// fails is recorded and the remaining files are still processed.
pub fn build_tree(paths: &[PathBuf], source_dir: Option<&Path>) -> TreeBuild {
	let mut build = TreeBuild::default();

	for path in paths {
		match parse_file(path, source_dir) {
			Ok(parsed) => {
				build.tree.append_file(parsed.nodes);
				build.diagnostics.extend(parsed.diagnostics);
			}
			Err(error) => {
				tracing::error!(file = %path.display(), "{error}");
				build.failures.push(FileFailure {
					file: path.clone(),
					error,
				});
			}
		}
	}

	build
}
