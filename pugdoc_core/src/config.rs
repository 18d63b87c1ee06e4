use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::PugdocError;
use crate::PugdocResult;
use crate::writer::OutputType;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["pugdoc.toml", ".pugdoc.toml", ".config/pugdoc.toml"];

pub const DEFAULT_INPUT: &str = "./**/*.pug";
pub const DEFAULT_OUTPUT: &str = "./docs";
pub const DEFAULT_OUTPUT_NAME: &str = "index";
pub const DEFAULT_TITLE: &str = "Documentation";

/// Which files to document.
///
/// ```toml
/// input = "views/**/*.pug"
/// # or
/// input = ["views/button.pug", "views/card.pug"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum InputSource {
	/// A single file path or a glob pattern.
	Pattern(String),
	/// Explicit file paths, used as given.
	Files(Vec<PathBuf>),
}

impl Default for InputSource {
	fn default() -> Self {
		Self::Pattern(DEFAULT_INPUT.to_string())
	}
}

/// The `types` option: `"all"`, a comma separated string, or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum TypesValue {
	One(String),
	Many(Vec<String>),
}

impl TypesValue {
	/// Resolve to the requested output types in canonical order without
	/// duplicates.
	pub fn resolve(&self) -> PugdocResult<Vec<OutputType>> {
		let names: Vec<&str> = match self {
			Self::One(value) => value.split(',').collect(),
			Self::Many(values) => values.iter().map(String::as_str).collect(),
		};

		let mut types = Vec::new();
		for name in names.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
			if name.eq_ignore_ascii_case("all") {
				types.extend(OutputType::ALL);
				continue;
			}
			types.push(name.parse::<OutputType>()?);
		}

		types.sort();
		types.dedup();
		Ok(types)
	}
}

/// Presentation settings shared by the writers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattingOptions {
	/// The document title.
	pub title: String,
	/// Language of the generated html page (`<html lang>`).
	pub locale: Option<String>,
	/// Theme values passed through verbatim to the html template as CSS
	/// custom properties.
	pub theme: BTreeMap<String, serde_json::Value>,
}

impl Default for FormattingOptions {
	fn default() -> Self {
		Self {
			title: DEFAULT_TITLE.to_string(),
			locale: None,
			theme: BTreeMap::new(),
		}
	}
}

/// Fully resolved settings for one run. Built once by [`Options::resolve`]
/// and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
	pub input: InputSource,
	/// Output directory.
	pub output: PathBuf,
	/// Base file name of every artifact, without extension.
	pub output_name: String,
	pub types: Vec<OutputType>,
	/// Root that reported source locations are relative to. `None` means each
	/// file's own directory.
	pub source_dir: Option<PathBuf>,
	/// Remove and recreate the output directory before writing.
	pub clear_output_dir: bool,
	pub formatting: FormattingOptions,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			input: InputSource::default(),
			output: PathBuf::from(DEFAULT_OUTPUT),
			output_name: DEFAULT_OUTPUT_NAME.to_string(),
			types: OutputType::ALL.to_vec(),
			source_dir: None,
			clear_output_dir: false,
			formatting: FormattingOptions::default(),
		}
	}
}

impl Options {
	/// Fill every field missing from `partial` with the value from
	/// `defaults`.
	pub fn resolve(defaults: Options, partial: PartialOptions) -> PugdocResult<Options> {
		let types = match partial.types {
			Some(types) => types.resolve()?,
			None => defaults.types,
		};
		let formatting = partial.formatting.unwrap_or_default();

		Ok(Options {
			input: partial.input.unwrap_or(defaults.input),
			output: partial.output.unwrap_or(defaults.output),
			output_name: partial.output_name.unwrap_or(defaults.output_name),
			types,
			source_dir: partial.source_dir.or(defaults.source_dir),
			clear_output_dir: partial.clear_output_dir.unwrap_or(defaults.clear_output_dir),
			formatting: FormattingOptions {
				title: formatting.title.unwrap_or(defaults.formatting.title),
				locale: formatting.locale.or(defaults.formatting.locale),
				theme: formatting.theme.unwrap_or(defaults.formatting.theme),
			},
		})
	}

	/// Resolve every relative path against `root`.
	#[must_use]
	pub fn relative_to(mut self, root: &Path) -> Self {
		self.input = match self.input {
			InputSource::Pattern(pattern) if Path::new(&pattern).is_relative() => {
				InputSource::Pattern(root.join(pattern).to_string_lossy().into_owned())
			}
			InputSource::Files(files) => {
				InputSource::Files(files.into_iter().map(|f| root.join(f)).collect())
			}
			other @ InputSource::Pattern(_) => other,
		};
		self.output = root.join(&self.output);
		self.source_dir = self.source_dir.map(|dir| root.join(dir));
		self
	}
}

/// User supplied settings where every field is optional. Deserialized from
/// `pugdoc.toml` and built from command line flags. Unknown keys are
/// ignored.
///
/// ```toml
/// input = "views/**/*.pug"
/// output = "docs"
/// outputName = "index"
/// types = ["markdown", "html"]
/// sourceDir = "views"
/// clearOutputDir = true
///
/// [formatting]
/// title = "UI Kit"
/// locale = "en"
///
/// [formatting.theme]
/// accent = "#7b3fe4"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
	#[serde(default)]
	pub input: Option<InputSource>,
	#[serde(default)]
	pub output: Option<PathBuf>,
	#[serde(default)]
	pub output_name: Option<String>,
	#[serde(default)]
	pub types: Option<TypesValue>,
	#[serde(default)]
	pub source_dir: Option<PathBuf>,
	#[serde(default)]
	pub clear_output_dir: Option<bool>,
	#[serde(default)]
	pub formatting: Option<PartialFormatting>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PartialFormatting {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub locale: Option<String>,
	#[serde(default)]
	pub theme: Option<BTreeMap<String, serde_json::Value>>,
}

impl PartialOptions {
	/// Layer `overrides` on top of `self`. Fields set in `overrides` win.
	#[must_use]
	pub fn merge(self, overrides: PartialOptions) -> PartialOptions {
		let formatting = match (self.formatting, overrides.formatting) {
			(Some(base), Some(over)) => Some(PartialFormatting {
				title: over.title.or(base.title),
				locale: over.locale.or(base.locale),
				theme: over.theme.or(base.theme),
			}),
			(base, over) => over.or(base),
		};

		PartialOptions {
			input: overrides.input.or(self.input),
			output: overrides.output.or(self.output),
			output_name: overrides.output_name.or(self.output_name),
			types: overrides.types.or(self.types),
			source_dir: overrides.source_dir.or(self.source_dir),
			clear_output_dir: overrides.clear_output_dir.or(self.clear_output_dir),
			formatting,
		}
	}

	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the first discovered config file at `root`. Returns `None` if
	/// there is none.
	pub fn load(root: &Path) -> PugdocResult<Option<PartialOptions>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load an explicit config file.
	pub fn load_file(path: &Path) -> PugdocResult<PartialOptions> {
		let content = std::fs::read_to_string(path).map_err(|source| PugdocError::ReadFile {
			path: path.to_path_buf(),
			source,
		})?;

		tracing::debug!(config = %path.display(), "loaded config file");
		Self::from_toml(&content)
	}

	pub fn from_toml(content: &str) -> PugdocResult<PartialOptions> {
		toml::from_str(content).map_err(|e| PugdocError::ConfigParse(e.to_string()))
	}
}
