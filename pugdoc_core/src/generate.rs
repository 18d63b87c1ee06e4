use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobMatcher;

use crate::FileFailure;
use crate::InputSource;
use crate::Options;
use crate::ParseDiagnostic;
use crate::PugdocError;
use crate::PugdocResult;
use crate::build_tree;

const DIRECTORY_GLOB: &str = "**/*.pug";

/// The outcome of a completed run.
#[derive(Debug, Default)]
pub struct GenerateReport {
	/// Input files that were processed.
	pub files: Vec<PathBuf>,
	/// Number of nodes in the document tree.
	pub nodes: usize,
	/// Artifacts written, in write order.
	pub artifacts: Vec<PathBuf>,
	/// Markers that were skipped.
	pub diagnostics: Vec<ParseDiagnostic>,
	/// Files that could not be documented.
	pub failures: Vec<FileFailure>,
}

impl GenerateReport {
	/// True when every input file was documented.
	pub fn is_ok(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Run the whole pipeline: resolve inputs, build the tree and write one
/// artifact per requested output type.
///
/// Per-file problems end up in the report. Only configuration and
/// destination errors abort the run.
pub fn generate(options: &Options) -> PugdocResult<GenerateReport> {
	let files = resolve_input_files(&options.input)?;

	if files.is_empty() {
		tracing::warn!("no input files matched, nothing to document");
		return Ok(GenerateReport::default());
	}

	let build = build_tree(&files, options.source_dir.as_deref());
	let tree = build.tree;

	prepare_output_dir(&options.output, options.clear_output_dir)?;

	let mut artifacts = Vec::with_capacity(options.types.len());
	for output_type in &options.types {
		let path = options
			.output
			.join(format!("{}.{}", options.output_name, output_type.extension()));
		output_type.writer().write_to_file(&tree, options, &path)?;
		artifacts.push(path);
	}

	Ok(GenerateReport {
		files,
		nodes: tree.len(),
		artifacts,
		diagnostics: build.diagnostics,
		failures: build.failures,
	})
}

/// Create the output directory, removing it first when `clear` is set.
pub fn prepare_output_dir(output: &Path, clear: bool) -> PugdocResult<()> {
	let write_error = |source: std::io::Error| PugdocError::WriteFile {
		path: output.to_path_buf(),
		source,
	};

	if clear && output.exists() {
		tracing::debug!(output = %output.display(), "clearing output directory");
		std::fs::remove_dir_all(output).map_err(write_error)?;
	}

	std::fs::create_dir_all(output).map_err(write_error)
}

/// Turn the `input` option into a sorted, deduplicated list of files.
///
/// Explicit lists are used verbatim. A string naming an existing file is
/// that file, anything else is treated as a glob pattern.
pub fn resolve_input_files(input: &InputSource) -> PugdocResult<Vec<PathBuf>> {
	let mut files = match input {
		InputSource::Files(files) => return Ok(files.clone()),
		InputSource::Pattern(pattern) if Path::new(pattern).is_file() => {
			vec![PathBuf::from(pattern)]
		}
		InputSource::Pattern(pattern) => expand_pattern(pattern)?,
	};

	files.sort();
	files.dedup();
	Ok(files)
}

fn expand_pattern(pattern: &str) -> PugdocResult<Vec<PathBuf>> {
	let (base, mut glob) = split_pattern(pattern);

	// A bare directory documents every pug file below it.
	if glob.is_empty() && base.is_dir() {
		glob = DIRECTORY_GLOB.to_string();
	}

	let matcher = build_matcher(pattern, &glob)?;
	let mut files = Vec::new();

	walk_dir(&base, &base, &matcher, &mut files)?;
	Ok(files)
}

/// Split a pattern into the literal directory it starts from and the glob
/// that is matched against paths below that directory.
fn split_pattern(pattern: &str) -> (PathBuf, String) {
	let mut base = PathBuf::new();
	let mut rest = Vec::new();

	for component in Path::new(pattern).components() {
		let text = component.as_os_str().to_string_lossy();
		if rest.is_empty() && !has_glob_syntax(&text) {
			match component {
				Component::CurDir => {}
				other => base.push(other.as_os_str()),
			}
			continue;
		}
		rest.push(text.into_owned());
	}

	if base.as_os_str().is_empty() {
		base.push(".");
	}

	(base, rest.join("/"))
}

fn has_glob_syntax(text: &str) -> bool {
	text.contains(['*', '?', '[', '{'])
}

fn build_matcher(pattern: &str, glob: &str) -> PugdocResult<GlobMatcher> {
	GlobBuilder::new(glob)
		.literal_separator(true)
		.build()
		.map(|glob| glob.compile_matcher())
		.map_err(|e| PugdocError::InvalidGlob {
			pattern: pattern.to_string(),
			reason: e.to_string(),
		})
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules"
}

fn walk_dir(
	base: &Path,
	dir: &Path,
	matcher: &GlobMatcher,
	files: &mut Vec<PathBuf>,
) -> PugdocResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	for path in read_dir_entries(dir)? {
		if path.is_dir() {
			let ignored = path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(is_ignored_directory_name);
			if !ignored {
				walk_dir(base, &path, matcher, files)?;
			}
			continue;
		}

		let Ok(relative) = path.strip_prefix(base) else {
			continue;
		};
		if matcher.is_match(relative) {
			files.push(path);
		}
	}

	Ok(())
}

/// The entries of `dir`. Failures name the directory being read.
pub(crate) fn read_dir_entries(dir: &Path) -> PugdocResult<Vec<PathBuf>> {
	let read_error = |source: std::io::Error| PugdocError::ReadFile {
		path: dir.to_path_buf(),
		source,
	};

	std::fs::read_dir(dir)
		.map_err(read_error)?
		.map(|entry| entry.map(|entry| entry.path()).map_err(read_error))
		.collect()
}
